use crate::errors::CoreError;
use crate::models::social::{SentimentSummary, SentimentTone, SentimentTrend, SocialItem};

/// Multiplier behind the cosmetic "24h change" figure.
const CHANGE_24H_FACTOR: f64 = 20.0;

/// Aggregates per-item sentiment into the summary shown above the feed.
pub struct SentimentService;

impl SentimentService {
    pub fn new() -> Self {
        Self
    }

    /// Arithmetic mean of all scores plus its trend bucket.
    pub fn aggregate(&self, items: &[SocialItem]) -> Result<SentimentSummary, CoreError> {
        if items.is_empty() {
            return Err(CoreError::EmptySentimentSet);
        }
        let average = items.iter().map(|i| i.sentiment).sum::<f64>() / items.len() as f64;
        Ok(SentimentSummary {
            average,
            trend: SentimentTrend::from_average(average),
        })
    }

    /// `average * 20`, in percent. Display only; not a measured statistic.
    pub fn change_24h(&self, summary: &SentimentSummary) -> f64 {
        summary.average * CHANGE_24H_FACTOR
    }

    /// e.g. "+4.0%" or "-3.2%"
    pub fn change_24h_label(&self, summary: &SentimentSummary) -> String {
        let sign = if summary.average > 0.0 { "+" } else { "" };
        format!("{sign}{:.1}%", self.change_24h(summary))
    }

    /// Score on a -100..=100 scale.
    pub fn score(&self, sentiment: f64) -> i32 {
        (sentiment * 100.0).round() as i32
    }

    pub fn tone(&self, sentiment: f64) -> SentimentTone {
        SentimentTone::from_score(sentiment)
    }

    /// Prior daily values followed by today's average.
    pub fn history_with_current(&self, prior: &[f64], summary: &SentimentSummary) -> Vec<f64> {
        let mut values = prior.to_vec();
        values.push(summary.average);
        values
    }
}

impl Default for SentimentService {
    fn default() -> Self {
        Self::new()
    }
}
