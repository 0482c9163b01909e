use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::CoreError;
use crate::models::chart::ChartPayload;
use crate::models::settings::Settings;
use crate::models::social::{SentimentSummary, SocialItem};
use crate::services::chart_service::ChartService;
use crate::services::sentiment_service::SentimentService;
use super::refresh::RefreshPolicy;

/// State of the social sentiment tab.
#[derive(Debug, Clone, Serialize)]
pub struct SocialView {
    pub ticker: String,
    pub policy: RefreshPolicy,
    pub posts: Vec<SocialItem>,

    /// `None` until a non-empty batch arrives
    pub summary: Option<SentimentSummary>,

    pub history_chart: Option<ChartPayload>,
    pub error: Option<String>,
}

impl SocialView {
    pub fn new(ticker: &str, policy: RefreshPolicy) -> Self {
        Self {
            ticker: ticker.trim().to_uppercase(),
            policy,
            posts: Vec::new(),
            summary: None,
            history_chart: None,
            error: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            &settings.default_ticker,
            RefreshPolicy::new(settings.auto_refresh, settings.refresh_interval),
        )
    }

    /// Switch ticker from raw input. Returns true when the ticker changed.
    pub fn submit_ticker(&mut self, input: &str) -> bool {
        let formatted = input.trim().to_uppercase();
        if formatted.is_empty() || formatted == self.ticker {
            return false;
        }
        self.ticker = formatted;
        self.policy.request_refresh();
        true
    }

    /// Replace the feed with a new batch and recompute the summary.
    pub fn apply_batch(
        &mut self,
        posts: Vec<SocialItem>,
        prior_history: &[f64],
        now: DateTime<Utc>,
        sentiment_service: &SentimentService,
        chart_service: &ChartService,
    ) {
        self.summary = sentiment_service.aggregate(&posts).ok();
        self.history_chart = self.summary.as_ref().map(|summary| {
            chart_service.build_sentiment_history(
                &sentiment_service.history_with_current(prior_history, summary),
            )
        });
        self.posts = posts;
        self.error = None;
        self.policy.mark_refreshed(now);
    }

    /// Keep the current feed; retry on the next poll.
    pub fn record_error(&mut self, error: &CoreError, now: DateTime<Utc>) {
        self.error = Some(error.to_string());
        self.policy.mark_refreshed(now);
    }

    pub fn change_24h_label(&self, sentiment_service: &SentimentService) -> Option<String> {
        self.summary
            .as_ref()
            .map(|s| sentiment_service.change_24h_label(s))
    }
}
