use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::forecast::{PredictionRequest, PredictionResponse};
use crate::models::market::MarketSnapshot;
use crate::models::news::{NewsCategory, NewsItem};
use crate::models::settings::Settings;
use crate::models::social::SocialItem;
use super::traits::DashboardProvider;

const PROVIDER_NAME: &str = "PredictionBackend";

/// Client for the prediction backend.
///
/// - `POST /predict` — forecast for a ticker
/// - `GET /market` — indices and movers
/// - `GET /news?categories=` — headlines
/// - `GET /social?symbol=` — social posts
///
/// Error responses carry `{"error": "..."}`; that message is surfaced as-is.
pub struct HttpProvider {
    client: Client,
    base_url: String,
}

impl HttpProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.api_base_url.clone(), settings.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<T, CoreError> {
        let resp = request.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let message = resp
                .json::<ErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_else(|_| format!("{what} request failed with HTTP {status}"));
            tracing::warn!(%status, %message, "{what} request rejected");
            return Err(CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message,
            });
        }

        resp.json::<T>()
            .await
            .map_err(|e| CoreError::Deserialization(format!("Failed to parse {what} response: {e}")))
    }
}

// ── Backend response types ──────────────────────────────────────────

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// News arrives either as a bare array or wrapped in `feed`.
#[derive(Deserialize)]
#[serde(untagged)]
enum NewsBody {
    List(Vec<NewsItem>),
    Feed { feed: Vec<NewsItem> },
}

/// Social posts arrive either as a bare array or wrapped in `messages`.
#[derive(Deserialize)]
#[serde(untagged)]
enum SocialBody {
    List(Vec<SocialItem>),
    Messages { messages: Vec<SocialItem> },
}

#[async_trait]
impl DashboardProvider for HttpProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch_prediction(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, CoreError> {
        tracing::debug!(ticker = %request.ticker, days = request.days, "requesting prediction");
        let builder = self.client.post(self.url("/predict")).json(request);
        self.send_json(builder, "prediction").await
    }

    async fn fetch_market(&self) -> Result<MarketSnapshot, CoreError> {
        let builder = self.client.get(self.url("/market"));
        self.send_json(builder, "market").await
    }

    async fn fetch_news(&self, categories: &[NewsCategory]) -> Result<Vec<NewsItem>, CoreError> {
        let joined = categories
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let builder = self
            .client
            .get(self.url("/news"))
            .query(&[("categories", joined)]);
        let body: NewsBody = self.send_json(builder, "news").await?;
        Ok(match body {
            NewsBody::List(items) | NewsBody::Feed { feed: items } => items,
        })
    }

    async fn fetch_social(&self, symbol: &str) -> Result<Vec<SocialItem>, CoreError> {
        let builder = self
            .client
            .get(self.url("/social"))
            .query(&[("symbol", symbol)]);
        let body: SocialBody = self.send_json(builder, "social").await?;
        Ok(match body {
            SocialBody::List(items) | SocialBody::Messages { messages: items } => items,
        })
    }
}
