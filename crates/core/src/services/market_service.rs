use chrono::{DateTime, Utc};

use crate::errors::CoreError;
use crate::models::market::{Movers, StockQuote};
use crate::services::forecast_service::round2;

/// Market overview calculations: index moves, movers lists, freshness labels.
pub struct MarketService;

impl MarketService {
    pub fn new() -> Self {
        Self
    }

    /// Intraday change `(close - open) / open * 100`, rounded to two decimals.
    pub fn change_pct(&self, open: f64, close: f64) -> Result<f64, CoreError> {
        if open == 0.0 {
            return Err(CoreError::ValidationError(
                "open price is zero; change is undefined".into(),
            ));
        }
        Ok(round2((close - open) / open * 100.0))
    }

    /// Positive movers become gainers (largest first); everything else is a
    /// loser (most negative first). Both lists are capped at `limit`.
    pub fn split_movers(&self, quotes: Vec<StockQuote>, limit: usize) -> Movers {
        let (mut gainers, mut losers): (Vec<_>, Vec<_>) =
            quotes.into_iter().partition(|q| q.change > 0.0);

        gainers.sort_by(|a, b| {
            b.change
                .partial_cmp(&a.change)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        losers.sort_by(|a, b| {
            a.change
                .partial_cmp(&b.change)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        gainers.truncate(limit);
        losers.truncate(limit);

        Movers { gainers, losers }
    }

    /// "just now", "1 minute ago", "N minutes ago"
    pub fn last_updated_label(&self, last_update: DateTime<Utc>, now: DateTime<Utc>) -> String {
        let elapsed_ms = (now - last_update).num_milliseconds() as f64;
        let minutes = (elapsed_ms / 60_000.0).round() as i64;
        match minutes {
            m if m < 1 => "just now".to_string(),
            1 => "1 minute ago".to_string(),
            m => format!("{m} minutes ago"),
        }
    }
}

impl Default for MarketService {
    fn default() -> Self {
        Self::new()
    }
}
