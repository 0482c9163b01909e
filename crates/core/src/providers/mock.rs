use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::errors::CoreError;
use crate::models::forecast::{PredictionRequest, PredictionResponse};
use crate::models::market::{IndexQuote, MarketSnapshot, StockQuote, TOP_MOVERS_LIMIT};
use crate::models::news::{NewsCategory, NewsItem, NewsSentiment};
use crate::models::social::{SocialItem, SocialSource};
use crate::services::forecast_service::{is_weekend, round2, ForecastService};
use crate::services::market_service::MarketService;
use crate::services::news_service::NewsService;
use super::traits::DashboardProvider;

/// Tickers with their own event tables; anything else borrows AAPL's.
pub const POPULAR_TICKERS: [&str; 7] = ["AAPL", "MSFT", "GOOGL", "AMZN", "META", "NVDA", "TSLA"];

/// Fewest historical closes the backend trains on.
const MIN_HISTORY: usize = 60;

/// Headline and its sentiment score.
pub type TickerEvent = (&'static str, f64);

static TICKER_EVENTS: [(&str, [TickerEvent; 5]); 7] = [
    ("AAPL", [
        ("iPhone sales exceed expectations in emerging markets", 0.85),
        ("New MacBook Pro receives rave reviews", 0.75),
        ("Supply chain constraints may impact production", -0.6),
        ("Apple's services revenue shows steady growth", 0.3),
        ("Vision Pro pre-orders surpass expectations", 0.9),
    ]),
    ("MSFT", [
        ("Azure cloud revenue grows significantly", 0.8),
        ("AI integration boosts Microsoft 365 adoption", 0.7),
        ("Gaming division faces increased competition", -0.5),
        ("Enterprise solutions gain market share", 0.6),
        ("New Windows features announced", 0.2),
    ]),
    ("GOOGL", [
        ("Ad revenue rebounds strongly", 0.75),
        ("Gemini AI shows promising results", 0.85),
        ("Antitrust concerns weigh on outlook", -0.7),
        ("YouTube subscription growth accelerates", 0.6),
        ("Cloud platform gains enterprise customers", 0.4),
    ]),
    ("AMZN", [
        ("AWS maintains cloud market leadership", 0.8),
        ("Prime membership reaches new milestone", 0.7),
        ("Rising logistics costs impact margins", -0.55),
        ("International expansion shows promise", 0.65),
        ("New fulfillment centers operational", 0.3),
    ]),
    ("META", [
        ("Ad platform recovery exceeds expectations", 0.9),
        ("Metaverse engagement metrics improve", 0.65),
        ("Privacy changes affect targeting", -0.5),
        ("WhatsApp monetization progresses", 0.7),
        ("New VR hardware announced", 0.4),
    ]),
    ("NVDA", [
        ("AI chip demand remains strong", 0.95),
        ("Data center revenue hits record", 0.85),
        ("Chip prices face pressure", -0.45),
        ("New GPU architecture unveiled", 0.75),
        ("Gaming segment stabilizes", 0.3),
    ]),
    ("TSLA", [
        ("Production efficiency improves", 0.8),
        ("New gigafactory exceeds targets", 0.75),
        ("Competition intensifies in EV market", -0.65),
        ("FSD capability expands", 0.7),
        ("Energy storage deployment grows", 0.4),
    ]),
];

const TWITTER_USERS: [&str; 6] = [
    "@marketanalyst",
    "@techtrader",
    "@stockguru",
    "@investorpro",
    "@marketwatch",
    "@tradingexpert",
];

const REDDIT_USERS: [&str; 5] = [
    "u/valueInvestor",
    "u/techanalyst",
    "u/stocktrader",
    "u/marketpro",
    "u/investorinsights",
];

const BULLISH_CLOSERS: [&str; 3] = ["Bullish! 🚀", "Looking strong! 📈", "Great potential! ⭐"];
const BEARISH_CLOSERS: [&str; 3] = ["Concerning... 📉", "Need to watch this 👀", "Stay cautious 🔍"];
const NEUTRAL_CLOSERS: [&str; 3] = [
    "Interesting development 🤔",
    "Worth monitoring 📊",
    "Keep an eye on this 👁️",
];

/// Prior six days of the sentiment history chart.
const SENTIMENT_HISTORY: [f64; 6] = [0.2, 0.15, -0.1, -0.3, 0.1, 0.4];

struct NewsTemplate {
    title: &'static str,
    description: &'static str,
    url: &'static str,
    source: &'static str,
    /// `publishedAt` is drawn from `[min, min + spread)` minutes ago
    min_minutes: u32,
    spread_minutes: u32,
    sentiment: NewsSentiment,
    category: NewsCategory,
}

static NEWS: [NewsTemplate; 8] = [
    NewsTemplate {
        title: "Fed signals potential rate cuts as inflation cools",
        description: "Federal Reserve officials indicate openness to rate reductions as inflation shows consistent signs of moderating.",
        url: "https://www.reuters.com/markets/us/federal-reserve-signals-rate-cuts-inflation-cools",
        source: "Reuters",
        min_minutes: 5,
        spread_minutes: 30,
        sentiment: NewsSentiment::Positive,
        category: NewsCategory::Economy,
    },
    NewsTemplate {
        title: "AI chip demand drives record semiconductor sales",
        description: "Global semiconductor industry reports unprecedented growth driven by artificial intelligence and machine learning applications.",
        url: "https://www.bloomberg.com/news/articles/ai-chip-demand-semiconductor-sales",
        source: "Bloomberg",
        min_minutes: 30,
        spread_minutes: 60,
        sentiment: NewsSentiment::Positive,
        category: NewsCategory::Stocks,
    },
    NewsTemplate {
        title: "Treasury yields retreat on economic data",
        description: "U.S. Treasury yields decline as latest economic indicators suggest moderating growth and cooling inflation pressures.",
        url: "https://www.wsj.com/articles/treasury-yields-retreat-economic-data",
        source: "Wall Street Journal",
        min_minutes: 60,
        spread_minutes: 60,
        sentiment: NewsSentiment::Neutral,
        category: NewsCategory::Market,
    },
    NewsTemplate {
        title: "Oil prices volatile amid Middle East tensions",
        description: "Crude oil markets experience increased volatility as geopolitical tensions in the Middle East raise supply concerns.",
        url: "https://www.ft.com/content/oil-markets-middle-east-tensions",
        source: "Financial Times",
        min_minutes: 120,
        spread_minutes: 120,
        sentiment: NewsSentiment::Negative,
        category: NewsCategory::Commodities,
    },
    NewsTemplate {
        title: "Bitcoin surges past key resistance levels",
        description: "Leading cryptocurrency breaks through technical barriers as institutional adoption continues to grow.",
        url: "https://www.coindesk.com/markets/bitcoin-resistance-levels",
        source: "CoinDesk",
        min_minutes: 180,
        spread_minutes: 180,
        sentiment: NewsSentiment::Positive,
        category: NewsCategory::Crypto,
    },
    NewsTemplate {
        title: "Global markets rally on positive economic data",
        description: "Stock markets worldwide post gains as economic indicators suggest resilient growth despite challenges.",
        url: "https://www.marketwatch.com/story/global-markets-rally-economic-data",
        source: "MarketWatch",
        min_minutes: 240,
        spread_minutes: 240,
        sentiment: NewsSentiment::Positive,
        category: NewsCategory::Market,
    },
    NewsTemplate {
        title: "Tech sector leads market gains on AI optimism",
        description: "Technology stocks outperform broader market as investors bet on artificial intelligence growth prospects.",
        url: "https://www.cnbc.com/tech-stocks-ai-optimism",
        source: "CNBC",
        min_minutes: 300,
        spread_minutes: 300,
        sentiment: NewsSentiment::Positive,
        category: NewsCategory::Stocks,
    },
    NewsTemplate {
        title: "Gold prices hit new highs on safe-haven demand",
        description: "Precious metals continue upward trend as investors seek safety amid global uncertainties.",
        url: "https://www.reuters.com/markets/commodities/gold-prices-new-highs",
        source: "Reuters",
        min_minutes: 360,
        spread_minutes: 360,
        sentiment: NewsSentiment::Positive,
        category: NewsCategory::Commodities,
    },
];

/// Index display name, base level.
const INDICES: [(&str, f64); 4] = [
    ("S&P 500", 5_000.0),
    ("NASDAQ", 16_000.0),
    ("DOW", 38_000.0),
    ("RUSSELL 2000", 2_000.0),
];

/// Symbol, company name, base price.
const MOVER_UNIVERSE: [(&str, &str, f64); 10] = [
    ("AAPL", "Apple Inc.", 185.0),
    ("MSFT", "Microsoft Corporation", 410.0),
    ("AMZN", "Amazon.com, Inc.", 175.0),
    ("NVDA", "NVIDIA Corporation", 880.0),
    ("GOOGL", "Alphabet Inc.", 150.0),
    ("META", "Meta Platforms, Inc.", 490.0),
    ("XOM", "Exxon Mobil Corporation", 115.0),
    ("JPM", "JPMorgan Chase & Co.", 195.0),
    ("V", "Visa Inc.", 280.0),
    ("JNJ", "Johnson & Johnson", 155.0),
];

/// Placeholder data source generating plausible sample data.
///
/// Stands in for the backend and the social/news APIs behind the same
/// [`DashboardProvider`] interface. Seed it for reproducible output.
pub struct MockProvider {
    rng: Mutex<StdRng>,
    forecast_service: ForecastService,
    market_service: MarketService,
    news_service: NewsService,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            forecast_service: ForecastService::new(),
            market_service: MarketService::new(),
            news_service: NewsService::new(),
        }
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        // A panic mid-generation leaves the RNG usable.
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Event table for `ticker`, falling back to AAPL's.
    pub fn events_for(ticker: &str) -> &'static [TickerEvent; 5] {
        TICKER_EVENTS
            .iter()
            .find(|(t, _)| *t == ticker)
            .map(|(_, events)| events)
            .unwrap_or(&TICKER_EVENTS[0].1)
    }

    fn generate_post(rng: &mut StdRng, ticker: &str, event: &TickerEvent, minutes_ago: u32) -> SocialItem {
        let (headline, sentiment) = *event;
        let is_twitter = rng.gen_bool(0.5);
        let users: &[&str] = if is_twitter { &TWITTER_USERS } else { &REDDIT_USERS };
        let user = users.choose(&mut *rng).copied().unwrap_or_default();

        let closers: &[&str] = if sentiment > 0.0 {
            &BULLISH_CLOSERS
        } else if sentiment < 0.0 {
            &BEARISH_CLOSERS
        } else {
            &NEUTRAL_CLOSERS
        };
        let closer = closers.choose(&mut *rng).copied().unwrap_or_default();

        let post_id = random_id(rng);
        let url = if is_twitter {
            format!("https://twitter.com/example/status/{post_id}")
        } else {
            format!("https://reddit.com/r/stocks/comments/{post_id}")
        };

        SocialItem {
            text: format!("${ticker} - {headline}. {closer}"),
            sentiment,
            source: if is_twitter {
                SocialSource::Twitter
            } else {
                SocialSource::Reddit
            },
            user: user.to_string(),
            timestamp: format!("{minutes_ago}m ago"),
            relevance: 0.7 + rng.gen::<f64>() * 0.3,
            url: Some(url),
        }
    }

    /// Starting price derived from the ticker so repeated requests look alike.
    fn base_price(ticker: &str) -> f64 {
        let sum: u32 = ticker.bytes().map(u32::from).sum();
        50.0 + f64::from(sum % 450)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Nine base-36 characters.
fn random_id(rng: &mut StdRng) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    (0..9)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect()
}

/// Geometric random walk of `len` steps from `start`, daily moves within ±`step`.
fn random_walk(rng: &mut StdRng, start: f64, len: usize, step: f64) -> Vec<f64> {
    let mut price = start;
    (0..len)
        .map(|_| {
            price *= 1.0 + rng.gen_range(-step..step);
            round2(price)
        })
        .collect()
}

#[async_trait]
impl DashboardProvider for MockProvider {
    fn name(&self) -> &str {
        "MockData"
    }

    async fn fetch_prediction(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, CoreError> {
        request.validate()?;

        let trading_days = request
            .start_date
            .iter_days()
            .take_while(|d| *d <= request.end_date)
            .filter(|d| !is_weekend(*d))
            .count()
            .max(MIN_HISTORY);

        let (historical, predictions, rsi) = {
            let mut rng = self.rng();
            let historical = random_walk(&mut rng, Self::base_price(&request.ticker), trading_days, 0.015);
            let last = historical.last().copied().unwrap_or(100.0);
            let predictions = random_walk(&mut rng, last, request.days as usize, 0.01);
            let rsi = rng.gen_range(30.0..70.0);
            (historical, predictions, rsi)
        };

        let metrics = self.forecast_service.derive_metrics(&predictions, Some(rsi))?;
        tracing::debug!(ticker = %request.ticker, days = request.days, "generated sample prediction");

        Ok(PredictionResponse {
            ticker: request.ticker.clone(),
            historical,
            predictions,
            metrics: Some(metrics),
        })
    }

    async fn fetch_market(&self) -> Result<MarketSnapshot, CoreError> {
        let mut rng = self.rng();

        let mut indices = BTreeMap::new();
        for (name, base) in INDICES {
            let open = base * (1.0 + rng.gen_range(-0.01..0.01));
            let close = open * (1.0 + rng.gen_range(-0.015..0.015));
            let change = self.market_service.change_pct(open, close)?;
            indices.insert(name.to_string(), IndexQuote { value: round2(close), change });
        }

        let mut quotes = Vec::with_capacity(MOVER_UNIVERSE.len());
        for (symbol, name, base) in MOVER_UNIVERSE {
            let close = base * (1.0 + rng.gen_range(-0.04..0.04));
            quotes.push(StockQuote {
                symbol: symbol.to_string(),
                name: name.to_string(),
                price: round2(close),
                change: self.market_service.change_pct(base, close)?,
            });
        }

        Ok(MarketSnapshot {
            indices,
            movers: self.market_service.split_movers(quotes, TOP_MOVERS_LIMIT),
        })
    }

    async fn fetch_news(&self, categories: &[NewsCategory]) -> Result<Vec<NewsItem>, CoreError> {
        let mut rng = self.rng();
        let items = NEWS
            .iter()
            .map(|n| NewsItem {
                title: n.title.to_string(),
                description: n.description.to_string(),
                url: n.url.to_string(),
                source: n.source.to_string(),
                published_at: format!(
                    "{} minutes ago",
                    n.min_minutes + rng.gen_range(0..n.spread_minutes)
                ),
                sentiment: n.sentiment,
                category: n.category,
            })
            .collect();
        Ok(self.news_service.filter_by_categories(items, categories))
    }

    async fn fetch_social(&self, symbol: &str) -> Result<Vec<SocialItem>, CoreError> {
        let ticker = symbol.trim().to_uppercase();
        let mut rng = self.rng();

        let mut posts: Vec<SocialItem> = Self::events_for(&ticker)
            .iter()
            .enumerate()
            .map(|(index, event)| {
                let minutes_ago = rng.gen_range(0..30) + index as u32 * 15;
                Self::generate_post(&mut rng, &ticker, event, minutes_ago)
            })
            .collect();

        // Most recent first
        posts.sort_by_key(|p| p.minutes_ago().unwrap_or(u32::MAX));
        Ok(posts)
    }

    async fn fetch_sentiment_history(&self, _symbol: &str) -> Result<Vec<f64>, CoreError> {
        Ok(SENTIMENT_HISTORY.to_vec())
    }
}
