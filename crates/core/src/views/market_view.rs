use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::CoreError;
use crate::models::market::MarketSnapshot;
use crate::models::settings::RefreshInterval;
use crate::services::market_service::MarketService;
use super::refresh::RefreshPolicy;

/// State of the market overview tab. Polls every minute.
#[derive(Debug, Clone, Serialize)]
pub struct MarketView {
    pub snapshot: Option<MarketSnapshot>,
    pub policy: RefreshPolicy,
    pub error: Option<String>,
}

impl MarketView {
    pub fn new() -> Self {
        Self {
            snapshot: None,
            policy: RefreshPolicy::new(true, RefreshInterval::OneMinute),
            error: None,
        }
    }

    pub fn apply_snapshot(&mut self, snapshot: MarketSnapshot, now: DateTime<Utc>) {
        self.snapshot = Some(snapshot);
        self.error = None;
        self.policy.mark_refreshed(now);
    }

    /// The previous snapshot stays on screen.
    pub fn record_error(&mut self, error: &CoreError, now: DateTime<Utc>) {
        tracing::warn!(error = %error, "market refresh failed");
        self.error = Some("Failed to fetch market data. Please try again later.".to_string());
        self.policy.mark_refreshed(now);
    }

    pub fn last_updated_label(&self, now: DateTime<Utc>, market_service: &MarketService) -> Option<String> {
        self.policy
            .last_update
            .map(|last| market_service.last_updated_label(last, now))
    }
}

impl Default for MarketView {
    fn default() -> Self {
        Self::new()
    }
}
