use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsSentiment {
    Positive,
    Neutral,
    Negative,
}

impl std::fmt::Display for NewsSentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NewsSentiment::Positive => write!(f, "Positive"),
            NewsSentiment::Neutral => write!(f, "Neutral"),
            NewsSentiment::Negative => write!(f, "Negative"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsCategory {
    Market,
    Stocks,
    Economy,
    Crypto,
    Commodities,
}

impl NewsCategory {
    pub const ALL: [NewsCategory; 5] = [
        NewsCategory::Market,
        NewsCategory::Stocks,
        NewsCategory::Economy,
        NewsCategory::Crypto,
        NewsCategory::Commodities,
    ];

    /// Categories selected when the news view first opens.
    pub fn default_selection() -> Vec<NewsCategory> {
        vec![NewsCategory::Market, NewsCategory::Stocks, NewsCategory::Economy]
    }

    /// Wire name (e.g., "stocks").
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsCategory::Market => "market",
            NewsCategory::Stocks => "stocks",
            NewsCategory::Economy => "economy",
            NewsCategory::Crypto => "crypto",
            NewsCategory::Commodities => "commodities",
        }
    }
}

impl std::fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NewsCategory::Market => write!(f, "Market"),
            NewsCategory::Stocks => write!(f, "Stocks"),
            NewsCategory::Economy => write!(f, "Economy"),
            NewsCategory::Crypto => write!(f, "Crypto"),
            NewsCategory::Commodities => write!(f, "Commodities"),
        }
    }
}

impl std::str::FromStr for NewsCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NewsCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown news category: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub title: String,
    pub description: String,
    pub url: String,
    pub source: String,

    /// Relative publish time as displayed (e.g., "35 minutes ago")
    pub published_at: String,

    pub sentiment: NewsSentiment,
    pub category: NewsCategory,
}
