use chrono::NaiveDate;

use crate::models::chart::{ChartDataset, ChartPayload, DatasetStyle, SeriesInput, SeriesTone};
use crate::models::forecast::NormalizedForecast;

pub const HISTORICAL_LABEL: &str = "Historical Price";
pub const PREDICTED_LABEL: &str = "Predicted Price";
pub const UPPER_LABEL: &str = "Upper Confidence";
pub const LOWER_LABEL: &str = "Lower Confidence";
pub const SENTIMENT_LABEL: &str = "Social Sentiment";

/// Generates chart-ready payloads from normalized series.
///
/// All datasets of a payload share one label axis and have the same length.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Lay every series onto the axis given by `dates`.
    ///
    /// Slots a series does not cover are `None`; values past the end of the
    /// axis are dropped.
    pub fn build(&self, dates: &[NaiveDate], series: &[SeriesInput]) -> ChartPayload {
        let labels = dates.iter().map(|d| date_label(*d)).collect();
        self.build_with_labels(labels, series)
    }

    pub fn build_with_labels(&self, labels: Vec<String>, series: &[SeriesInput]) -> ChartPayload {
        let slots = labels.len();
        let datasets = series
            .iter()
            .map(|s| {
                let mut data = vec![None; slots];
                let mut dropped = 0usize;
                for (k, value) in s.values.iter().enumerate() {
                    match data.get_mut(s.offset + k) {
                        Some(slot) => *slot = *value,
                        None => dropped += 1,
                    }
                }
                if dropped > 0 {
                    tracing::warn!(
                        series = %s.label,
                        dropped,
                        slots,
                        "series extends past the chart axis; truncating"
                    );
                }
                ChartDataset {
                    label: s.label.clone(),
                    data,
                    style: s.style,
                }
            })
            .collect();

        ChartPayload { labels, datasets }
    }

    /// Historical, predicted and both confidence bounds on one axis.
    pub fn build_forecast_chart(
        &self,
        forecast: &NormalizedForecast,
        historical: &[f64],
        predicted: &[f64],
    ) -> ChartPayload {
        let split = forecast.split();
        let tone = if forecast.is_positive {
            SeriesTone::Positive
        } else {
            SeriesTone::Negative
        };

        let series = [
            SeriesInput::dense_at(HISTORICAL_LABEL, 0, historical),
            SeriesInput::dense_at(PREDICTED_LABEL, split, predicted)
                .styled(DatasetStyle::with_tone(tone)),
            SeriesInput::dense_at(UPPER_LABEL, split, &forecast.confidence_upper)
                .styled(DatasetStyle::bound()),
            SeriesInput::dense_at(LOWER_LABEL, split, &forecast.confidence_lower)
                .styled(DatasetStyle::bound()),
        ];

        self.build(&forecast.dates, &series)
    }

    /// Daily sentiment line: "N Days Ago" for each prior value, then "Today".
    pub fn build_sentiment_history(&self, values: &[f64]) -> ChartPayload {
        let n = values.len();
        let labels = (0..n)
            .map(|i| {
                if i + 1 == n {
                    "Today".to_string()
                } else {
                    format!("{} Days Ago", n - i)
                }
            })
            .collect();
        let series = [SeriesInput::dense_at(SENTIMENT_LABEL, 0, values)
            .styled(DatasetStyle::with_tone(SeriesTone::Accent))];
        self.build_with_labels(labels, &series)
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}

/// "Oct 14"
pub fn date_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// "Tue, Oct 15"
pub fn weekday_label(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}
