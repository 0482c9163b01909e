use serde::{Deserialize, Serialize};

/// Average above which sentiment counts as improving.
pub const TREND_UP_THRESHOLD: f64 = 0.1;

/// Average below which sentiment counts as declining.
pub const TREND_DOWN_THRESHOLD: f64 = -0.1;

/// Platform a social post came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialSource {
    Twitter,
    Reddit,
}

impl std::fmt::Display for SocialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SocialSource::Twitter => write!(f, "twitter"),
            SocialSource::Reddit => write!(f, "reddit"),
        }
    }
}

/// A single social/news post with a polarity score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialItem {
    pub text: String,

    /// Polarity in [-1, 1]
    pub sentiment: f64,

    pub source: SocialSource,

    /// Handle of the author (e.g., "@stockguru", "u/valueInvestor")
    pub user: String,

    /// Relative timestamp as displayed (e.g., "12m ago")
    pub timestamp: String,

    /// How relevant the post is to the ticker, in [0, 1]
    #[serde(default)]
    pub relevance: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl SocialItem {
    /// Minutes encoded in a `"{n}m ago"` timestamp, if it has that shape.
    pub fn minutes_ago(&self) -> Option<u32> {
        self.timestamp
            .trim()
            .strip_suffix("m ago")
            .and_then(|n| n.parse().ok())
    }
}

/// Coarse direction of the aggregate sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentTrend {
    Up,
    Down,
    Neutral,
}

impl SentimentTrend {
    pub fn from_average(average: f64) -> Self {
        if average > TREND_UP_THRESHOLD {
            SentimentTrend::Up
        } else if average < TREND_DOWN_THRESHOLD {
            SentimentTrend::Down
        } else {
            SentimentTrend::Neutral
        }
    }

    /// Label shown next to the overall score.
    pub fn label(&self) -> &'static str {
        match self {
            SentimentTrend::Up => "Improving",
            SentimentTrend::Down => "Declining",
            SentimentTrend::Neutral => "Stable",
        }
    }
}

impl std::fmt::Display for SentimentTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentTrend::Up => write!(f, "up"),
            SentimentTrend::Down => write!(f, "down"),
            SentimentTrend::Neutral => write!(f, "neutral"),
        }
    }
}

/// Colour bucket for a single score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentTone {
    Positive,
    Negative,
    Mixed,
}

impl SentimentTone {
    pub fn from_score(sentiment: f64) -> Self {
        if sentiment > 0.3 {
            SentimentTone::Positive
        } else if sentiment < -0.3 {
            SentimentTone::Negative
        } else {
            SentimentTone::Mixed
        }
    }
}

/// Aggregate over the current batch of social items.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub average: f64,
    pub trend: SentimentTrend,
}
