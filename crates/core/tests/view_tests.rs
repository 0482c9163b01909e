use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use prophet_dashboard_core::errors::CoreError;
use prophet_dashboard_core::models::forecast::{Metrics, PredictionResponse};
use prophet_dashboard_core::models::market::MarketSnapshot;
use prophet_dashboard_core::models::news::{NewsCategory, NewsItem, NewsSentiment};
use prophet_dashboard_core::models::settings::{RefreshInterval, Settings};
use prophet_dashboard_core::models::social::{SentimentTrend, SocialItem, SocialSource};
use prophet_dashboard_core::services::chart_service::ChartService;
use prophet_dashboard_core::services::forecast_service::ForecastService;
use prophet_dashboard_core::services::market_service::MarketService;
use prophet_dashboard_core::services::news_service::NewsService;
use prophet_dashboard_core::services::sentiment_service::SentimentService;
use prophet_dashboard_core::views::market_view::MarketView;
use prophet_dashboard_core::views::news_view::NewsView;
use prophet_dashboard_core::views::prediction_view::PredictionView;
use prophet_dashboard_core::views::refresh::RefreshPolicy;
use prophet_dashboard_core::views::social_view::SocialView;
use prophet_dashboard_core::views::Tab;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 13, 9, 30, 0).unwrap()
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 13).unwrap()
}

fn post(sentiment: f64) -> SocialItem {
    SocialItem {
        text: "$AAPL - update".into(),
        sentiment,
        source: SocialSource::Twitter,
        user: "@marketwatch".into(),
        timestamp: "2m ago".into(),
        relevance: 0.75,
        url: None,
    }
}

fn headline(category: NewsCategory) -> NewsItem {
    NewsItem {
        title: format!("{category} headline"),
        description: String::new(),
        url: "#".into(),
        source: "Bloomberg".into(),
        published_at: "1 minutes ago".into(),
        sentiment: NewsSentiment::Positive,
        category,
    }
}

fn response(historical: Vec<f64>, predictions: Vec<f64>) -> PredictionResponse {
    PredictionResponse {
        ticker: "AAPL".into(),
        historical,
        predictions,
        metrics: Some(Metrics {
            trend: 1.94,
            volatility: 0.97,
            rsi: Some(58.2),
            sentiment: None,
        }),
    }
}

// ═══════════════════════════════════════════════════════════════════
//  RefreshPolicy
// ═══════════════════════════════════════════════════════════════════

mod refresh_policy {
    use super::*;

    #[test]
    fn due_before_first_fetch() {
        let policy = RefreshPolicy::new(false, RefreshInterval::FiveMinutes);
        assert!(policy.is_due(t0()));
        assert_eq!(policy.next_update_at(), None);
    }

    #[test]
    fn due_once_interval_elapses() {
        let mut policy = RefreshPolicy::default();
        policy.mark_refreshed(t0());
        assert!(!policy.is_due(t0() + Duration::minutes(4)));
        assert!(policy.is_due(t0() + Duration::minutes(5)));
        assert_eq!(policy.next_update_at(), Some(t0() + Duration::minutes(5)));
    }

    #[test]
    fn disabled_auto_refresh_is_never_due_on_its_own() {
        let mut policy = RefreshPolicy::new(false, RefreshInterval::FiveMinutes);
        policy.mark_refreshed(t0());
        assert!(!policy.is_due(t0() + Duration::hours(3)));
        assert_eq!(policy.countdown_label(t0()), "Auto-refresh disabled");
    }

    #[test]
    fn requested_refresh_is_due_immediately() {
        let mut policy = RefreshPolicy::new(false, RefreshInterval::FiveMinutes);
        policy.mark_refreshed(t0());
        policy.request_refresh();
        assert!(policy.is_due(t0()));
        policy.mark_refreshed(t0());
        assert!(!policy.is_due(t0()));
    }

    #[test]
    fn toggling_auto_refresh_refetches() {
        let mut policy = RefreshPolicy::default();
        policy.mark_refreshed(t0());
        policy.toggle_auto_refresh();
        assert!(!policy.auto_refresh);
        assert!(policy.is_due(t0()));
    }

    #[test]
    fn changing_interval_refetches() {
        let mut policy = RefreshPolicy::default();
        policy.mark_refreshed(t0());
        policy.set_interval(RefreshInterval::FiveMinutes);
        assert!(!policy.is_due(t0()));
        policy.set_interval(RefreshInterval::FifteenMinutes);
        assert!(policy.is_due(t0()));
    }

    #[test]
    fn countdown_label() {
        let mut policy = RefreshPolicy::default();
        policy.mark_refreshed(t0());
        assert_eq!(policy.countdown_label(t0()), "Next update in 5m 0s");
        assert_eq!(
            policy.countdown_label(t0() + Duration::seconds(30)),
            "Next update in 4m 30s"
        );
        assert_eq!(
            policy.countdown_label(t0() + Duration::minutes(9)),
            "Next update in 0m 0s"
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
//  PredictionView
// ═══════════════════════════════════════════════════════════════════

mod prediction_view {
    use super::*;

    #[test]
    fn builds_snapshot() {
        let mut view = PredictionView::new();
        view.apply_response(
            response(vec![100.0, 102.0, 101.0], vec![103.0, 105.0]),
            monday(),
            &ForecastService::new(),
            &ChartService::new(),
        )
        .unwrap();

        let snap = view.snapshot.as_ref().unwrap();
        assert_eq!(snap.chart.labels.len(), 5);
        assert_eq!(snap.daily.len(), 2);
        assert_eq!(snap.summary.last_price, 105.0);
        assert_eq!(snap.metrics.rsi, "58.20");
        assert_eq!(snap.metrics.trend, "Bullish");
        assert!(view.error.is_none());
    }

    #[test]
    fn empty_predictions_render_nothing() {
        let mut view = PredictionView::new();
        let forecast = ForecastService::new();
        let chart = ChartService::new();
        view.apply_response(response(vec![1.0], vec![2.0]), monday(), &forecast, &chart)
            .unwrap();
        assert!(view.snapshot.is_some());

        view.apply_response(response(vec![1.0], vec![]), monday(), &forecast, &chart)
            .unwrap();
        assert!(view.snapshot.is_none());
        assert!(view.error.is_none());
    }

    #[test]
    fn zero_base_keeps_previous_snapshot() {
        let mut view = PredictionView::new();
        let forecast = ForecastService::new();
        let chart = ChartService::new();
        view.apply_response(response(vec![], vec![10.0, 11.0]), monday(), &forecast, &chart)
            .unwrap();

        let err = view
            .apply_response(response(vec![], vec![0.0, 1.0]), monday(), &forecast, &chart)
            .unwrap_err();
        assert!(matches!(err, CoreError::ZeroBasePrice));
        assert_eq!(view.snapshot.as_ref().unwrap().summary.first_price, 10.0);
        assert_eq!(view.error.as_deref(), Some(err.to_string().as_str()));
    }

    #[test]
    fn daily_details_toggle() {
        let mut view = PredictionView::new();
        assert!(!view.show_daily_details);
        view.toggle_daily_details();
        assert!(view.show_daily_details);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  SocialView
// ═══════════════════════════════════════════════════════════════════

mod social_view {
    use super::*;

    fn view() -> SocialView {
        SocialView::from_settings(&Settings::default())
    }

    #[test]
    fn opens_on_default_ticker() {
        let v = view();
        assert_eq!(v.ticker, "AAPL");
        assert!(v.summary.is_none());
        assert!(v.policy.is_due(t0()));
    }

    #[test]
    fn submit_ticker_formats_and_refetches() {
        let mut v = view();
        v.policy.mark_refreshed(t0());
        assert!(v.submit_ticker(" msft "));
        assert_eq!(v.ticker, "MSFT");
        assert!(v.policy.is_due(t0()));
    }

    #[test]
    fn submit_same_or_blank_ticker_is_ignored() {
        let mut v = view();
        v.policy.mark_refreshed(t0());
        assert!(!v.submit_ticker("aapl"));
        assert!(!v.submit_ticker("   "));
        assert!(!v.policy.is_due(t0()));
    }

    #[test]
    fn batch_updates_summary_and_history() {
        let mut v = view();
        v.apply_batch(
            vec![post(0.4), post(0.2)],
            &[0.1, -0.2],
            t0(),
            &SentimentService::new(),
            &ChartService::new(),
        );

        let summary = v.summary.unwrap();
        assert!((summary.average - 0.3).abs() < 1e-9);
        assert_eq!(summary.trend, SentimentTrend::Up);
        assert_eq!(v.change_24h_label(&SentimentService::new()).as_deref(), Some("+6.0%"));

        let chart = v.history_chart.as_ref().unwrap();
        assert_eq!(chart.labels, vec!["3 Days Ago", "2 Days Ago", "Today"]);
        assert_eq!(v.posts.len(), 2);
        assert_eq!(v.policy.last_update, Some(t0()));
    }

    #[test]
    fn empty_batch_clears_summary() {
        let mut v = view();
        let sentiment = SentimentService::new();
        let chart = ChartService::new();
        v.apply_batch(vec![post(0.5)], &[], t0(), &sentiment, &chart);
        assert!(v.summary.is_some());

        v.apply_batch(vec![], &[0.1], t0(), &sentiment, &chart);
        assert!(v.summary.is_none());
        assert!(v.history_chart.is_none());
        assert!(v.change_24h_label(&sentiment).is_none());
    }

    #[test]
    fn error_keeps_feed() {
        let mut v = view();
        v.apply_batch(vec![post(0.5)], &[], t0(), &SentimentService::new(), &ChartService::new());
        v.record_error(&CoreError::Network("timed out".into()), t0() + Duration::minutes(5));
        assert_eq!(v.posts.len(), 1);
        assert_eq!(v.error.as_deref(), Some("Network error: timed out"));
        assert!(!v.policy.is_due(t0() + Duration::minutes(6)));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  NewsView
// ═══════════════════════════════════════════════════════════════════

mod news_view {
    use super::*;

    #[test]
    fn toggle_category_adds_and_removes() {
        let mut v = NewsView::from_settings(&Settings::default());
        assert!(v.is_selected(NewsCategory::Market));
        assert!(!v.is_selected(NewsCategory::Crypto));

        v.policy.mark_refreshed(t0());
        v.toggle_category(NewsCategory::Crypto);
        assert!(v.is_selected(NewsCategory::Crypto));
        assert!(v.policy.is_due(t0()));

        v.toggle_category(NewsCategory::Market);
        assert!(!v.is_selected(NewsCategory::Market));
    }

    #[test]
    fn apply_items_filters_to_selection() {
        let mut v = NewsView::new(RefreshPolicy::default());
        v.apply_items(
            vec![
                headline(NewsCategory::Crypto),
                headline(NewsCategory::Economy),
                headline(NewsCategory::Commodities),
            ],
            t0(),
            &NewsService::new(),
        );
        assert_eq!(v.items.len(), 1);
        assert_eq!(v.items[0].category, NewsCategory::Economy);
        assert_eq!(v.policy.last_update, Some(t0()));
    }

    #[test]
    fn show_more_toggle() {
        let mut v = NewsView::new(RefreshPolicy::default());
        v.toggle_show_more();
        assert!(v.show_more);
        v.toggle_show_more();
        assert!(!v.show_more);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  MarketView
// ═══════════════════════════════════════════════════════════════════

mod market_view {
    use super::*;

    #[test]
    fn polls_every_minute() {
        let mut v = MarketView::new();
        v.apply_snapshot(MarketSnapshot::default(), t0());
        assert!(!v.policy.is_due(t0() + Duration::seconds(59)));
        assert!(v.policy.is_due(t0() + Duration::seconds(60)));
    }

    #[test]
    fn last_updated_label() {
        let mut v = MarketView::new();
        let svc = MarketService::new();
        assert_eq!(v.last_updated_label(t0(), &svc), None);

        v.apply_snapshot(MarketSnapshot::default(), t0());
        assert_eq!(v.last_updated_label(t0(), &svc).as_deref(), Some("just now"));
        assert_eq!(
            v.last_updated_label(t0() + Duration::minutes(3), &svc).as_deref(),
            Some("3 minutes ago")
        );
    }

    #[test]
    fn error_keeps_previous_snapshot() {
        let mut v = MarketView::new();
        v.apply_snapshot(MarketSnapshot::default(), t0());
        v.record_error(&CoreError::Network("refused".into()), t0());
        assert!(v.snapshot.is_some());
        assert_eq!(
            v.error.as_deref(),
            Some("Failed to fetch market data. Please try again later.")
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Tabs
// ═══════════════════════════════════════════════════════════════════

mod tabs {
    use super::*;

    #[test]
    fn prediction_is_default() {
        assert_eq!(Tab::default(), Tab::Prediction);
        assert_eq!(Tab::ALL.len(), 4);
    }

    #[test]
    fn labels_and_serde() {
        assert_eq!(Tab::Social.to_string(), "Social");
        assert_eq!(serde_json::to_string(&Tab::Market).unwrap(), "\"market\"");
    }
}
