use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::errors::CoreError;

/// Backend address used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";

/// Polling intervals. Users pick from [`RefreshInterval::ALL`]; the market
/// overview polls every minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum RefreshInterval {
    OneMinute,
    #[default]
    FiveMinutes,
    TenMinutes,
    FifteenMinutes,
}

impl RefreshInterval {
    pub const ALL: [RefreshInterval; 3] = [
        RefreshInterval::FiveMinutes,
        RefreshInterval::TenMinutes,
        RefreshInterval::FifteenMinutes,
    ];

    /// Whether users may configure this interval.
    pub fn is_selectable(&self) -> bool {
        Self::ALL.contains(self)
    }

    pub fn minutes(&self) -> u32 {
        match self {
            RefreshInterval::OneMinute => 1,
            RefreshInterval::FiveMinutes => 5,
            RefreshInterval::TenMinutes => 10,
            RefreshInterval::FifteenMinutes => 15,
        }
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.minutes()) * 60)
    }

    pub fn as_chrono(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.minutes()))
    }
}

impl TryFrom<u32> for RefreshInterval {
    type Error = String;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        match minutes {
            1 => Ok(RefreshInterval::OneMinute),
            5 => Ok(RefreshInterval::FiveMinutes),
            10 => Ok(RefreshInterval::TenMinutes),
            15 => Ok(RefreshInterval::FifteenMinutes),
            other => Err(format!("refresh interval must be 1, 5, 10 or 15 minutes, got {other}")),
        }
    }
}

impl From<RefreshInterval> for u32 {
    fn from(interval: RefreshInterval) -> Self {
        interval.minutes()
    }
}

impl std::fmt::Display for RefreshInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefreshInterval::OneMinute => write!(f, "1 minute"),
            other => write!(f, "{} minutes", other.minutes()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// Dashboard configuration.
///
/// Resolution order: built-in defaults, then an optional JSON file, then
/// `PROPHET_*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the prediction backend (e.g., "http://127.0.0.1:5000").
    pub api_base_url: String,

    /// Per-request timeout for backend calls.
    pub request_timeout_secs: u64,

    /// Ticker the social view opens with.
    pub default_ticker: String,

    pub refresh_interval: RefreshInterval,

    pub auto_refresh: bool,

    pub theme: Theme,

    /// Serve generated sample data instead of calling the backend.
    pub use_mock: bool,

    /// Seed for the mock generator; random when unset.
    pub mock_seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 30,
            default_ticker: "AAPL".to_string(),
            refresh_interval: RefreshInterval::default(),
            auto_refresh: true,
            theme: Theme::default(),
            use_mock: false,
            mock_seed: None,
        }
    }
}

impl Settings {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Read a JSON settings file. Missing fields keep their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let settings: Self = serde_json::from_str(&raw).map_err(|e| {
            CoreError::Config(format!("{}: {e}", path.as_ref().display()))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// File (if given) then environment.
    pub fn load(path: Option<&Path>) -> Result<Self, CoreError> {
        let base = match path {
            Some(p) => Self::load_from_file(p)?,
            None => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `PROPHET_*` overrides from an arbitrary lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("PROPHET_API_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(secs) = lookup("PROPHET_REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = parse_var("PROPHET_REQUEST_TIMEOUT_SECS", &secs)?;
        }
        if let Some(ticker) = lookup("PROPHET_DEFAULT_TICKER") {
            self.default_ticker = ticker.trim().to_uppercase();
        }
        if let Some(minutes) = lookup("PROPHET_REFRESH_MINUTES") {
            let minutes: u32 = parse_var("PROPHET_REFRESH_MINUTES", &minutes)?;
            self.refresh_interval = RefreshInterval::try_from(minutes).map_err(CoreError::Config)?;
        }
        if let Some(flag) = lookup("PROPHET_AUTO_REFRESH") {
            self.auto_refresh = parse_flag("PROPHET_AUTO_REFRESH", &flag)?;
        }
        if let Some(theme) = lookup("PROPHET_THEME") {
            self.theme = theme.parse().map_err(CoreError::Config)?;
        }
        if let Some(flag) = lookup("PROPHET_USE_MOCK") {
            self.use_mock = parse_flag("PROPHET_USE_MOCK", &flag)?;
        }
        if let Some(seed) = lookup("PROPHET_MOCK_SEED") {
            self.mock_seed = Some(parse_var("PROPHET_MOCK_SEED", &seed)?);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(CoreError::Config(format!(
                "api_base_url must be an http(s) URL, got {}",
                self.api_base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::Config("request_timeout_secs must be positive".into()));
        }
        if !self.refresh_interval.is_selectable() {
            return Err(CoreError::Config(format!(
                "refresh_interval must be 5, 10 or 15 minutes, got {}",
                self.refresh_interval.minutes()
            )));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, CoreError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| CoreError::Config(format!("{key}={value}: {e}")))
}

fn parse_flag(key: &str, value: &str) -> Result<bool, CoreError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(CoreError::Config(format!("{key}={other}: expected a boolean"))),
    }
}
