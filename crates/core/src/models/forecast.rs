use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Fewest days the backend will forecast.
pub const MIN_FORECAST_DAYS: u32 = 1;

/// Most days the backend will forecast.
pub const MAX_FORECAST_DAYS: u32 = 30;

/// Default forecast horizon for a fresh request.
pub const DEFAULT_FORECAST_DAYS: u32 = 7;

/// Longest ticker the input form accepts.
pub const MAX_TICKER_LEN: usize = 10;

/// Body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    /// Ticker symbol, uppercased (e.g., "AAPL", "BRK-B")
    pub ticker: String,

    /// Number of future business days to forecast
    pub days: u32,

    /// First day of the training window
    pub start_date: NaiveDate,

    /// Last day of the training window
    pub end_date: NaiveDate,
}

impl PredictionRequest {
    /// Build a request, sanitising the ticker the same way the input form does.
    pub fn new(ticker: &str, days: u32, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            ticker: sanitize_ticker(ticker),
            days,
            start_date,
            end_date,
        }
    }

    /// A 7-day forecast trained on the year ending at `today`.
    pub fn with_defaults(ticker: &str, today: NaiveDate) -> Self {
        let start = today.checked_sub_days(Days::new(365)).unwrap_or(today);
        Self::new(ticker, DEFAULT_FORECAST_DAYS, start, today)
    }

    /// Reject requests the backend would answer with a 400.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.ticker.is_empty() {
            return Err(CoreError::ValidationError("Ticker symbol is required".into()));
        }
        if !is_valid_ticker(&self.ticker) {
            return Err(CoreError::ValidationError(format!(
                "Invalid ticker symbol format: {}",
                self.ticker
            )));
        }
        if !(MIN_FORECAST_DAYS..=MAX_FORECAST_DAYS).contains(&self.days) {
            return Err(CoreError::ValidationError(format!(
                "Days must be between {MIN_FORECAST_DAYS} and {MAX_FORECAST_DAYS}, got {}",
                self.days
            )));
        }
        if self.start_date >= self.end_date {
            return Err(CoreError::ValidationError(format!(
                "Start date {} must be before end date {}",
                self.start_date, self.end_date
            )));
        }
        Ok(())
    }
}

/// Uppercase, drop anything outside `[A-Z0-9-]`, cap at [`MAX_TICKER_LEN`].
pub fn sanitize_ticker(input: &str) -> String {
    input
        .trim()
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || *c == '-')
        .take(MAX_TICKER_LEN)
        .collect()
}

/// `^[A-Z0-9-]+$`
pub fn is_valid_ticker(ticker: &str) -> bool {
    !ticker.is_empty()
        && ticker
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
}

/// Response of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub ticker: String,

    /// Closing prices of the training window, oldest first
    pub historical: Vec<f64>,

    /// One predicted price per requested business day
    pub predictions: Vec<f64>,

    /// Upstream summary metrics, passed through unmodified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
}

impl PredictionResponse {
    /// True when there is something to render.
    pub fn has_predictions(&self) -> bool {
        !self.predictions.is_empty()
    }
}

/// Scalar summary produced alongside a forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Percent change across the forecast horizon
    #[serde(default)]
    pub trend: f64,

    /// Coefficient of variation of the forecast, in percent
    #[serde(default)]
    pub volatility: f64,

    /// Latest RSI of the training window
    #[serde(default)]
    pub rsi: Option<f64>,

    /// Social sentiment that was folded into the forecast
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendRating {
    Bullish,
    Bearish,
}

impl TrendRating {
    pub fn from_trend(trend: f64) -> Self {
        if trend >= 0.0 {
            TrendRating::Bullish
        } else {
            TrendRating::Bearish
        }
    }
}

impl std::fmt::Display for TrendRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendRating::Bullish => write!(f, "Bullish"),
            TrendRating::Bearish => write!(f, "Bearish"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolatilityRating {
    Low,
    Medium,
    High,
}

impl VolatilityRating {
    pub fn from_volatility(volatility: f64) -> Self {
        if volatility < 1.0 {
            VolatilityRating::Low
        } else if volatility < 2.0 {
            VolatilityRating::Medium
        } else {
            VolatilityRating::High
        }
    }
}

impl std::fmt::Display for VolatilityRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VolatilityRating::Low => write!(f, "Low"),
            VolatilityRating::Medium => write!(f, "Medium"),
            VolatilityRating::High => write!(f, "High"),
        }
    }
}

/// Display-ready rendering of optional [`Metrics`].
///
/// Missing metrics (or a missing RSI) render as "N/A"; missing numbers as 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsDisplay {
    pub rsi: String,
    pub trend: String,
    pub volatility: String,
    pub trend_value: f64,
    pub volatility_value: f64,
}

impl MetricsDisplay {
    pub fn from_metrics(metrics: Option<&Metrics>) -> Self {
        match metrics {
            Some(m) => Self {
                rsi: m
                    .rsi
                    .map(|r| format!("{r:.2}"))
                    .unwrap_or_else(|| "N/A".to_string()),
                trend: TrendRating::from_trend(m.trend).to_string(),
                volatility: VolatilityRating::from_volatility(m.volatility).to_string(),
                trend_value: m.trend,
                volatility_value: m.volatility,
            },
            None => Self {
                rsi: "N/A".to_string(),
                trend: "N/A".to_string(),
                volatility: "N/A".to_string(),
                trend_value: 0.0,
                volatility_value: 0.0,
            },
        }
    }
}

/// Output of the forecast normalizer: one shared date axis plus the ±2% band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedForecast {
    /// Historical dates followed by predicted dates
    pub dates: Vec<NaiveDate>,

    /// How many leading entries of `dates` belong to the historical series
    pub historical_len: usize,

    /// `predicted[i] * 1.02`
    pub confidence_upper: Vec<f64>,

    /// `predicted[i] * 0.98`
    pub confidence_lower: Vec<f64>,

    /// `(last - first) / first * 100` over the predicted series
    pub percent_change: f64,

    /// `last - first >= 0`
    pub is_positive: bool,
}

impl NormalizedForecast {
    /// Index where predicted dates begin, clamped to the axis length.
    pub fn split(&self) -> usize {
        self.historical_len.min(self.dates.len())
    }

    pub fn historical_dates(&self) -> &[NaiveDate] {
        &self.dates[..self.split()]
    }

    pub fn predicted_dates(&self) -> &[NaiveDate] {
        &self.dates[self.split()..]
    }
}

/// Headline numbers for the prediction card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub first_price: f64,
    pub last_price: f64,
    pub price_change: f64,
    pub percent_change: f64,
    pub is_positive: bool,
    /// Confidence range on the final forecast day
    pub final_lower: f64,
    pub final_upper: f64,
}

/// One row of the daily breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPrediction {
    pub date: NaiveDate,
    pub price: f64,

    /// Change vs. the previous day; `None` when the base is missing or zero
    pub change_pct: Option<f64>,

    pub lower: f64,
    pub upper: f64,
}

impl DailyPrediction {
    pub fn is_positive(&self) -> bool {
        self.change_pct.is_some_and(|c| c >= 0.0)
    }
}
