use chrono::NaiveDate;
use prophet_dashboard_core::errors::CoreError;
use prophet_dashboard_core::models::chart::{ChartDataset, ChartPayload, DatasetStyle, SeriesTone};
use prophet_dashboard_core::models::forecast::{
    is_valid_ticker, sanitize_ticker, Metrics, MetricsDisplay, PredictionRequest,
    PredictionResponse, TrendRating, VolatilityRating,
};
use prophet_dashboard_core::models::market::{IndexQuote, MarketSnapshot};
use prophet_dashboard_core::models::news::{NewsCategory, NewsItem, NewsSentiment};
use prophet_dashboard_core::models::settings::{RefreshInterval, Theme};
use prophet_dashboard_core::models::social::{
    SentimentTone, SentimentTrend, SocialItem, SocialSource,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn post(sentiment: f64, timestamp: &str) -> SocialItem {
    SocialItem {
        text: "$AAPL - test".into(),
        sentiment,
        source: SocialSource::Twitter,
        user: "@stockguru".into(),
        timestamp: timestamp.into(),
        relevance: 0.8,
        url: None,
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Ticker handling
// ═══════════════════════════════════════════════════════════════════

mod ticker {
    use super::*;

    #[test]
    fn sanitize_uppercases_and_trims() {
        assert_eq!(sanitize_ticker("  aapl "), "AAPL");
    }

    #[test]
    fn sanitize_drops_disallowed_characters() {
        assert_eq!(sanitize_ticker("brk.b"), "BRKB");
        assert_eq!(sanitize_ticker("brk-b"), "BRK-B");
        assert_eq!(sanitize_ticker("$tsla!"), "TSLA");
    }

    #[test]
    fn sanitize_caps_length() {
        assert_eq!(sanitize_ticker("abcdefghijklmnop"), "ABCDEFGHIJ");
    }

    #[test]
    fn valid_ticker_pattern() {
        assert!(is_valid_ticker("AAPL"));
        assert!(is_valid_ticker("BRK-B"));
        assert!(is_valid_ticker("7203"));
        assert!(!is_valid_ticker(""));
        assert!(!is_valid_ticker("aapl"));
        assert!(!is_valid_ticker("BRK.B"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  PredictionRequest / PredictionResponse
// ═══════════════════════════════════════════════════════════════════

mod prediction_request {
    use super::*;

    #[test]
    fn defaults_cover_one_year_and_seven_days() {
        let req = PredictionRequest::with_defaults("msft", d(2025, 6, 30));
        assert_eq!(req.ticker, "MSFT");
        assert_eq!(req.days, 7);
        assert_eq!(req.start_date, d(2024, 6, 30));
        assert_eq!(req.end_date, d(2025, 6, 30));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn rejects_empty_ticker() {
        let req = PredictionRequest::new("...", 7, d(2024, 1, 1), d(2025, 1, 1));
        assert!(matches!(req.validate(), Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn rejects_days_out_of_range() {
        for days in [0, 31, 100] {
            let req = PredictionRequest::new("AAPL", days, d(2024, 1, 1), d(2025, 1, 1));
            assert!(
                matches!(req.validate(), Err(CoreError::ValidationError(_))),
                "days={days} should be rejected"
            );
        }
    }

    #[test]
    fn accepts_boundary_days() {
        for days in [1, 30] {
            let req = PredictionRequest::new("AAPL", days, d(2024, 1, 1), d(2025, 1, 1));
            assert!(req.validate().is_ok());
        }
    }

    #[test]
    fn rejects_inverted_window() {
        let req = PredictionRequest::new("AAPL", 7, d(2025, 1, 1), d(2025, 1, 1));
        assert!(matches!(req.validate(), Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn serializes_with_camel_case_dates() {
        let req = PredictionRequest::new("AAPL", 5, d(2024, 1, 2), d(2025, 1, 2));
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["ticker"], "AAPL");
        assert_eq!(json["days"], 5);
        assert_eq!(json["startDate"], "2024-01-02");
        assert_eq!(json["endDate"], "2025-01-02");
    }

    #[test]
    fn response_without_metrics() {
        let json = r#"{"ticker":"AAPL","historical":[1.0,2.0],"predictions":[3.0]}"#;
        let resp: PredictionResponse = serde_json::from_str(json).unwrap();
        assert!(resp.metrics.is_none());
        assert!(resp.has_predictions());
    }

    #[test]
    fn response_with_partial_metrics() {
        let json = r#"{"ticker":"AAPL","historical":[],"predictions":[],
                       "metrics":{"trend":-1.5,"volatility":0.4,"rsi":null,"sentiment":0.12}}"#;
        let resp: PredictionResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.has_predictions());
        let m = resp.metrics.unwrap();
        assert_eq!(m.trend, -1.5);
        assert_eq!(m.rsi, None);
        assert_eq!(m.sentiment, Some(0.12));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Metrics display
// ═══════════════════════════════════════════════════════════════════

mod metrics {
    use super::*;

    #[test]
    fn trend_rating_boundary_is_bullish() {
        assert_eq!(TrendRating::from_trend(0.0), TrendRating::Bullish);
        assert_eq!(TrendRating::from_trend(-0.01), TrendRating::Bearish);
    }

    #[test]
    fn volatility_buckets() {
        assert_eq!(VolatilityRating::from_volatility(0.99), VolatilityRating::Low);
        assert_eq!(VolatilityRating::from_volatility(1.0), VolatilityRating::Medium);
        assert_eq!(VolatilityRating::from_volatility(1.99), VolatilityRating::Medium);
        assert_eq!(VolatilityRating::from_volatility(2.0), VolatilityRating::High);
    }

    #[test]
    fn display_with_metrics() {
        let m = Metrics {
            trend: -1.0,
            volatility: 1.5,
            rsi: Some(55.123),
            sentiment: None,
        };
        let shown = MetricsDisplay::from_metrics(Some(&m));
        assert_eq!(shown.rsi, "55.12");
        assert_eq!(shown.trend, "Bearish");
        assert_eq!(shown.volatility, "Medium");
        assert_eq!(shown.trend_value, -1.0);
    }

    #[test]
    fn display_missing_rsi() {
        let m = Metrics {
            trend: 2.0,
            volatility: 0.5,
            rsi: None,
            sentiment: None,
        };
        let shown = MetricsDisplay::from_metrics(Some(&m));
        assert_eq!(shown.rsi, "N/A");
        assert_eq!(shown.trend, "Bullish");
        assert_eq!(shown.volatility, "Low");
    }

    #[test]
    fn display_without_metrics() {
        let shown = MetricsDisplay::from_metrics(None);
        assert_eq!(shown.rsi, "N/A");
        assert_eq!(shown.trend, "N/A");
        assert_eq!(shown.volatility, "N/A");
        assert_eq!(shown.trend_value, 0.0);
        assert_eq!(shown.volatility_value, 0.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Social
// ═══════════════════════════════════════════════════════════════════

mod social {
    use super::*;

    #[test]
    fn trend_thresholds() {
        assert_eq!(SentimentTrend::from_average(0.11), SentimentTrend::Up);
        assert_eq!(SentimentTrend::from_average(0.1), SentimentTrend::Neutral);
        assert_eq!(SentimentTrend::from_average(0.0), SentimentTrend::Neutral);
        assert_eq!(SentimentTrend::from_average(-0.1), SentimentTrend::Neutral);
        assert_eq!(SentimentTrend::from_average(-0.11), SentimentTrend::Down);
    }

    #[test]
    fn trend_labels() {
        assert_eq!(SentimentTrend::Up.label(), "Improving");
        assert_eq!(SentimentTrend::Down.label(), "Declining");
        assert_eq!(SentimentTrend::Neutral.label(), "Stable");
    }

    #[test]
    fn trend_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&SentimentTrend::Up).unwrap(), "\"up\"");
        assert_eq!(serde_json::to_string(&SentimentTrend::Neutral).unwrap(), "\"neutral\"");
    }

    #[test]
    fn tone_buckets() {
        assert_eq!(SentimentTone::from_score(0.31), SentimentTone::Positive);
        assert_eq!(SentimentTone::from_score(0.3), SentimentTone::Mixed);
        assert_eq!(SentimentTone::from_score(-0.3), SentimentTone::Mixed);
        assert_eq!(SentimentTone::from_score(-0.31), SentimentTone::Negative);
    }

    #[test]
    fn minutes_ago_parses_relative_timestamp() {
        assert_eq!(post(0.1, "12m ago").minutes_ago(), Some(12));
        assert_eq!(post(0.1, "0m ago").minutes_ago(), Some(0));
        assert_eq!(post(0.1, "yesterday").minutes_ago(), None);
    }

    #[test]
    fn social_item_deserializes_without_optional_fields() {
        let json = r#"{"text":"hi","sentiment":-0.4,"source":"reddit","user":"u/a","timestamp":"3m ago"}"#;
        let item: SocialItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.source, SocialSource::Reddit);
        assert_eq!(item.relevance, 0.0);
        assert!(item.url.is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Chart payload
// ═══════════════════════════════════════════════════════════════════

mod chart {
    use super::*;

    #[test]
    fn gaps_serialize_as_null() {
        let payload = ChartPayload {
            labels: vec!["Jan 1".into(), "Jan 2".into()],
            datasets: vec![ChartDataset {
                label: "Predicted Price".into(),
                data: vec![None, Some(1.5)],
                style: DatasetStyle::default(),
            }],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["datasets"][0]["data"], serde_json::json!([null, 1.5]));
    }

    #[test]
    fn bound_style_is_dashed_without_points() {
        let style = DatasetStyle::bound();
        assert!(style.dashed);
        assert!(!style.point_markers);
        assert_eq!(style.tone, SeriesTone::Muted);
    }

    #[test]
    fn style_serializes_camel_case() {
        let json = serde_json::to_value(DatasetStyle::bound()).unwrap();
        assert_eq!(json["pointMarkers"], false);
        assert_eq!(json["dashed"], true);
    }

    #[test]
    fn dataset_lookup_by_label() {
        let payload = ChartPayload {
            labels: vec![],
            datasets: vec![ChartDataset {
                label: "Historical Price".into(),
                data: vec![],
                style: DatasetStyle::default(),
            }],
        };
        assert!(payload.dataset("Historical Price").is_some());
        assert!(payload.dataset("Predicted Price").is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Market / News
// ═══════════════════════════════════════════════════════════════════

mod market_and_news {
    use super::*;

    #[test]
    fn market_snapshot_without_movers() {
        let json = r#"{"indices":{"S&P 500":{"value":5000.5,"change":-0.25}}}"#;
        let snap: MarketSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(
            snap.indices.get("S&P 500"),
            Some(&IndexQuote { value: 5000.5, change: -0.25 })
        );
        assert!(snap.movers.gainers.is_empty());
        assert!(snap.movers.losers.is_empty());
    }

    #[test]
    fn index_direction() {
        assert!(IndexQuote { value: 1.0, change: 0.0 }.is_up());
        assert!(!IndexQuote { value: 1.0, change: -0.1 }.is_up());
    }

    #[test]
    fn news_category_parse() {
        assert_eq!("crypto".parse::<NewsCategory>().unwrap(), NewsCategory::Crypto);
        assert_eq!(" Stocks ".parse::<NewsCategory>().unwrap(), NewsCategory::Stocks);
        assert!("sports".parse::<NewsCategory>().is_err());
    }

    #[test]
    fn default_category_selection() {
        assert_eq!(
            NewsCategory::default_selection(),
            vec![NewsCategory::Market, NewsCategory::Stocks, NewsCategory::Economy]
        );
    }

    #[test]
    fn news_item_wire_names() {
        let json = r#"{"title":"t","description":"d","url":"u","source":"Reuters",
                       "publishedAt":"5 minutes ago","sentiment":"negative","category":"commodities"}"#;
        let item: NewsItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.published_at, "5 minutes ago");
        assert_eq!(item.sentiment, NewsSentiment::Negative);
        assert_eq!(item.category, NewsCategory::Commodities);
        assert_eq!(item.sentiment.to_string(), "Negative");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings enums
// ═══════════════════════════════════════════════════════════════════

mod settings_enums {
    use super::*;

    #[test]
    fn refresh_interval_from_minutes() {
        assert_eq!(RefreshInterval::try_from(5).unwrap(), RefreshInterval::FiveMinutes);
        assert_eq!(RefreshInterval::try_from(15).unwrap(), RefreshInterval::FifteenMinutes);
        assert!(RefreshInterval::try_from(7).is_err());
    }

    #[test]
    fn refresh_interval_serde_as_minutes() {
        assert_eq!(serde_json::to_string(&RefreshInterval::TenMinutes).unwrap(), "10");
        let back: RefreshInterval = serde_json::from_str("15").unwrap();
        assert_eq!(back, RefreshInterval::FifteenMinutes);
        assert!(serde_json::from_str::<RefreshInterval>("3").is_err());
    }

    #[test]
    fn refresh_interval_durations() {
        assert_eq!(RefreshInterval::FiveMinutes.as_duration().as_secs(), 300);
        assert_eq!(RefreshInterval::FifteenMinutes.as_chrono().num_seconds(), 900);
        assert_eq!(RefreshInterval::OneMinute.to_string(), "1 minute");
        assert_eq!(RefreshInterval::TenMinutes.to_string(), "10 minutes");
    }

    #[test]
    fn theme_toggle_and_parse() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
        assert!("blue".parse::<Theme>().is_err());
    }
}
