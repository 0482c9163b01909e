use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::errors::CoreError;
use crate::models::forecast::{DailyPrediction, ForecastSummary, Metrics, NormalizedForecast};

/// Half-width of the confidence band, as a fraction of the predicted price.
pub const CONFIDENCE_MARGIN: f64 = 0.02;

/// RSI reported when the upstream value is unknown.
pub const NEUTRAL_RSI: f64 = 50.0;

/// Turns raw historical/predicted price series into chart-ready axes and metrics.
///
/// Every method is a pure function of its inputs. The historical axis uses
/// calendar days while the predicted axis walks business days; both are kept
/// as-is so the rendered axis matches what users already see.
pub struct ForecastService;

impl ForecastService {
    pub fn new() -> Self {
        Self
    }

    /// Derive the shared date axis, the ±2% band and the headline change.
    ///
    /// Fails on an empty `predicted` series (nothing to render) and when
    /// `predicted[0]` is zero (percent change undefined).
    pub fn normalize(
        &self,
        historical: &[f64],
        predicted: &[f64],
        reference_date: NaiveDate,
    ) -> Result<NormalizedForecast, CoreError> {
        let percent_change = self.percent_change(predicted)?;
        let is_positive = self.is_positive(predicted)?;

        let mut dates = self.historical_dates(historical.len(), reference_date);
        let historical_len = dates.len();
        dates.extend(self.business_days_after(reference_date, predicted.len()));

        let (confidence_upper, confidence_lower) = self.confidence_band(predicted);

        tracing::debug!(
            historical = historical.len(),
            predicted = predicted.len(),
            %reference_date,
            percent_change,
            "normalized forecast"
        );

        Ok(NormalizedForecast {
            dates,
            historical_len,
            confidence_upper,
            confidence_lower,
            percent_change,
            is_positive,
        })
    }

    /// `reference_date - (len - i)` calendar days for each index `i`.
    pub fn historical_dates(&self, len: usize, reference_date: NaiveDate) -> Vec<NaiveDate> {
        (0..len)
            .filter_map(|i| reference_date.checked_sub_days(Days::new((len - i) as u64)))
            .collect()
    }

    /// The next `count` weekdays strictly after `reference_date`.
    pub fn business_days_after(&self, reference_date: NaiveDate, count: usize) -> Vec<NaiveDate> {
        let mut dates = Vec::with_capacity(count);
        let mut current = reference_date;
        while dates.len() < count {
            current = match current.succ_opt() {
                Some(next) => next,
                None => break,
            };
            if !is_weekend(current) {
                dates.push(current);
            }
        }
        dates
    }

    /// `(upper, lower)` with `upper[i] = p * 1.02`, `lower[i] = p * 0.98`.
    pub fn confidence_band(&self, predicted: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let upper = predicted.iter().map(|p| p * (1.0 + CONFIDENCE_MARGIN)).collect();
        let lower = predicted.iter().map(|p| p * (1.0 - CONFIDENCE_MARGIN)).collect();
        (upper, lower)
    }

    /// `(last - first) / first * 100`
    pub fn percent_change(&self, predicted: &[f64]) -> Result<f64, CoreError> {
        let (first, last) = endpoints(predicted)?;
        if first == 0.0 {
            return Err(CoreError::ZeroBasePrice);
        }
        Ok((last - first) / first * 100.0)
    }

    /// Zero change counts as positive.
    pub fn is_positive(&self, predicted: &[f64]) -> Result<bool, CoreError> {
        let (first, last) = endpoints(predicted)?;
        Ok(last - first >= 0.0)
    }

    pub fn summary(&self, forecast: &NormalizedForecast, predicted: &[f64]) -> Result<ForecastSummary, CoreError> {
        let (first, last) = endpoints(predicted)?;
        let final_lower = forecast.confidence_lower.last().copied().ok_or(CoreError::EmptyPrediction)?;
        let final_upper = forecast.confidence_upper.last().copied().ok_or(CoreError::EmptyPrediction)?;
        Ok(ForecastSummary {
            first_price: first,
            last_price: last,
            price_change: last - first,
            percent_change: forecast.percent_change,
            is_positive: forecast.is_positive,
            final_lower,
            final_upper,
        })
    }

    /// Per-day rows for the detail view.
    ///
    /// Day 0 is compared with the last historical price, later days with the
    /// previous prediction. A missing or zero base yields `change_pct: None`.
    pub fn daily_breakdown(
        &self,
        forecast: &NormalizedForecast,
        historical: &[f64],
        predicted: &[f64],
    ) -> Vec<DailyPrediction> {
        let bounds = forecast
            .confidence_lower
            .iter()
            .zip(&forecast.confidence_upper);

        forecast
            .predicted_dates()
            .iter()
            .zip(predicted)
            .zip(bounds)
            .enumerate()
            .map(|(i, ((date, price), (lower, upper)))| {
                let base = if i == 0 {
                    historical.last().copied()
                } else {
                    predicted.get(i - 1).copied()
                };
                DailyPrediction {
                    date: *date,
                    price: *price,
                    change_pct: base
                        .filter(|b| *b != 0.0)
                        .map(|b| (price - b) / b * 100.0),
                    lower: *lower,
                    upper: *upper,
                }
            })
            .collect()
    }

    /// Compute the metrics block the prediction backend attaches to a forecast.
    ///
    /// `trend` is the horizon percent change and `volatility` the population
    /// coefficient of variation, both in percent and rounded to two decimals.
    pub fn derive_metrics(&self, predicted: &[f64], rsi: Option<f64>) -> Result<Metrics, CoreError> {
        let trend = self.percent_change(predicted)?;
        let n = predicted.len() as f64;
        let mean = predicted.iter().sum::<f64>() / n;
        let variance = predicted.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / n;
        let volatility = if mean != 0.0 {
            variance.sqrt() / mean * 100.0
        } else {
            0.0
        };
        Ok(Metrics {
            trend: round2(trend),
            volatility: round2(volatility),
            rsi: Some(round2(rsi.unwrap_or(NEUTRAL_RSI))),
            sentiment: None,
        })
    }
}

impl Default for ForecastService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn endpoints(predicted: &[f64]) -> Result<(f64, f64), CoreError> {
    match (predicted.first(), predicted.last()) {
        (Some(first), Some(last)) => Ok((*first, *last)),
        _ => Err(CoreError::EmptyPrediction),
    }
}
