pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod views;

use chrono::{DateTime, Local, NaiveDate, Utc};
use models::{
    forecast::PredictionRequest,
    settings::{Settings, Theme},
};
use providers::{http::HttpProvider, mock::MockProvider, traits::DashboardProvider};
use services::{
    chart_service::ChartService, forecast_service::ForecastService,
    market_service::MarketService, news_service::NewsService,
    sentiment_service::SentimentService,
};
use views::{
    market_view::MarketView, news_view::NewsView, prediction_view::PredictionView,
    social_view::SocialView, Tab,
};

use errors::CoreError;

/// Main entry point for the dashboard core.
/// Holds one data provider, the per-tab view state and the services that
/// turn fetched data into display values.
#[must_use]
pub struct Dashboard {
    provider: Box<dyn DashboardProvider>,
    settings: Settings,
    active_tab: Tab,
    theme: Theme,
    forecast_service: ForecastService,
    sentiment_service: SentimentService,
    chart_service: ChartService,
    market_service: MarketService,
    news_service: NewsService,
    prediction: PredictionView,
    market: MarketView,
    news: NewsView,
    social: SocialView,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("provider", &self.provider.name())
            .field("active_tab", &self.active_tab)
            .field("theme", &self.theme)
            .field("ticker", &self.social.ticker)
            .finish()
    }
}

impl Dashboard {
    /// Build a dashboard around an explicit provider.
    pub fn new(settings: Settings, provider: Box<dyn DashboardProvider>) -> Self {
        Self {
            provider,
            active_tab: Tab::default(),
            theme: settings.theme,
            forecast_service: ForecastService::new(),
            sentiment_service: SentimentService::new(),
            chart_service: ChartService::new(),
            market_service: MarketService::new(),
            news_service: NewsService::new(),
            prediction: PredictionView::new(),
            market: MarketView::new(),
            news: NewsView::from_settings(&settings),
            social: SocialView::from_settings(&settings),
            settings,
        }
    }

    /// Pick the provider the settings ask for: sample data or the backend.
    pub fn from_settings(settings: Settings) -> Self {
        let provider: Box<dyn DashboardProvider> = if settings.use_mock {
            match settings.mock_seed {
                Some(seed) => Box::new(MockProvider::with_seed(seed)),
                None => Box::new(MockProvider::new()),
            }
        } else {
            Box::new(HttpProvider::from_settings(&settings))
        };
        tracing::info!(provider = provider.name(), "dashboard initialised");
        Self::new(settings, provider)
    }

    // ── Shell state ─────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    #[must_use]
    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn set_active_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    // ── Views ───────────────────────────────────────────────────────

    pub fn prediction(&self) -> &PredictionView {
        &self.prediction
    }

    pub fn prediction_mut(&mut self) -> &mut PredictionView {
        &mut self.prediction
    }

    pub fn market(&self) -> &MarketView {
        &self.market
    }

    pub fn news(&self) -> &NewsView {
        &self.news
    }

    pub fn news_mut(&mut self) -> &mut NewsView {
        &mut self.news
    }

    pub fn social(&self) -> &SocialView {
        &self.social
    }

    pub fn social_mut(&mut self) -> &mut SocialView {
        &mut self.social
    }

    pub fn sentiment_service(&self) -> &SentimentService {
        &self.sentiment_service
    }

    pub fn market_service(&self) -> &MarketService {
        &self.market_service
    }

    // ── Fetch & derive ──────────────────────────────────────────────

    /// Run a forecast, anchoring the axes at today's local date.
    pub async fn predict(&mut self, request: PredictionRequest) -> Result<&PredictionView, CoreError> {
        self.predict_at(request, Local::now().date_naive()).await
    }

    /// Run a forecast with an explicit reference date.
    ///
    /// Invalid requests never reach the provider. Fetch failures leave the
    /// previous snapshot in place and record a message on the view.
    pub async fn predict_at(
        &mut self,
        request: PredictionRequest,
        reference_date: NaiveDate,
    ) -> Result<&PredictionView, CoreError> {
        if let Err(e) = request.validate() {
            self.prediction.record_error(&e);
            return Err(e);
        }

        self.prediction.last_request = Some(request.clone());
        match self.provider.fetch_prediction(&request).await {
            Ok(response) => {
                tracing::info!(
                    ticker = %response.ticker,
                    historical = response.historical.len(),
                    predicted = response.predictions.len(),
                    "prediction received"
                );
                self.prediction.apply_response(
                    response,
                    reference_date,
                    &self.forecast_service,
                    &self.chart_service,
                )?;
                Ok(&self.prediction)
            }
            Err(e) => {
                tracing::error!(ticker = %request.ticker, error = %e, "prediction fetch failed");
                self.prediction.record_error(&e);
                Err(e)
            }
        }
    }

    pub async fn refresh_market(&mut self, now: DateTime<Utc>) -> Result<&MarketView, CoreError> {
        match self.provider.fetch_market().await {
            Ok(snapshot) => {
                tracing::debug!(indices = snapshot.indices.len(), "market snapshot received");
                self.market.apply_snapshot(snapshot, now);
                Ok(&self.market)
            }
            Err(e) => {
                self.market.record_error(&e, now);
                Err(e)
            }
        }
    }

    pub async fn refresh_news(&mut self, now: DateTime<Utc>) -> Result<&NewsView, CoreError> {
        let selected = self.news.selected.clone();
        match self.provider.fetch_news(&selected).await {
            Ok(items) => {
                tracing::debug!(items = items.len(), "news received");
                self.news.apply_items(items, now, &self.news_service);
                Ok(&self.news)
            }
            Err(e) => {
                tracing::warn!(error = %e, "news refresh failed");
                self.news.record_error(&e, now);
                Err(e)
            }
        }
    }

    /// Refetch posts for the current ticker and recompute the summary.
    pub async fn refresh_social(&mut self, now: DateTime<Utc>) -> Result<&SocialView, CoreError> {
        let ticker = self.social.ticker.clone();
        let fetched = match self.provider.fetch_social(&ticker).await {
            Ok(posts) => self
                .provider
                .fetch_sentiment_history(&ticker)
                .await
                .map(|history| (posts, history)),
            Err(e) => Err(e),
        };

        match fetched {
            Ok((posts, history)) => {
                tracing::debug!(%ticker, posts = posts.len(), "social batch received");
                self.social.apply_batch(
                    posts,
                    &history,
                    now,
                    &self.sentiment_service,
                    &self.chart_service,
                );
                Ok(&self.social)
            }
            Err(e) => {
                tracing::warn!(%ticker, error = %e, "social refresh failed");
                self.social.record_error(&e, now);
                Err(e)
            }
        }
    }

    /// Refresh every polled view that is due. Failures are recorded on the
    /// view and do not stop the other refreshes.
    /// Returns the tabs that fetched successfully.
    pub async fn poll(&mut self, now: DateTime<Utc>) -> Vec<Tab> {
        let mut refreshed = Vec::new();
        if self.market.policy.is_due(now) && self.refresh_market(now).await.is_ok() {
            refreshed.push(Tab::Market);
        }
        if self.news.policy.is_due(now) && self.refresh_news(now).await.is_ok() {
            refreshed.push(Tab::News);
        }
        if self.social.policy.is_due(now) && self.refresh_social(now).await.is_ok() {
            refreshed.push(Tab::Social);
        }
        refreshed
    }
}
