pub mod market_view;
pub mod news_view;
pub mod prediction_view;
pub mod refresh;
pub mod social_view;

use serde::{Deserialize, Serialize};

/// Top-level dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Prediction,
    Market,
    News,
    Social,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Prediction, Tab::Market, Tab::News, Tab::Social];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Prediction => "Prediction",
            Tab::Market => "Market",
            Tab::News => "News",
            Tab::Social => "Social",
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
