use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::forecast::{PredictionRequest, PredictionResponse};
use crate::models::market::MarketSnapshot;
use crate::models::news::{NewsCategory, NewsItem};
use crate::models::social::SocialItem;

/// Everything the dashboard views fetch.
///
/// The prediction backend and the sample-data generator both implement this
/// trait, so swapping one for the other never touches the normalizer or the
/// aggregator.
#[async_trait]
pub trait DashboardProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Run a forecast for the requested ticker and horizon.
    async fn fetch_prediction(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, CoreError>;

    /// Major indices and the day's top movers.
    async fn fetch_market(&self) -> Result<MarketSnapshot, CoreError>;

    /// Latest headlines in the given categories.
    async fn fetch_news(&self, categories: &[NewsCategory]) -> Result<Vec<NewsItem>, CoreError>;

    /// Recent social posts mentioning `symbol`.
    async fn fetch_social(&self, symbol: &str) -> Result<Vec<SocialItem>, CoreError>;

    /// Daily average sentiment for the days before today, oldest first.
    /// Providers without history return an empty series.
    async fn fetch_sentiment_history(&self, _symbol: &str) -> Result<Vec<f64>, CoreError> {
        Ok(Vec::new())
    }
}
