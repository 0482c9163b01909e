use thiserror::Error;

/// Unified error type for the entire prophet-dashboard-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Arithmetic guards ───────────────────────────────────────────
    #[error("Prediction series is empty — nothing to render")]
    EmptyPrediction,

    #[error("First predicted price is zero — percent change is undefined")]
    ZeroBasePrice,

    #[error("No social items to aggregate")]
    EmptySentimentSet,

    // ── Input ───────────────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Configuration / File I/O ────────────────────────────────────
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File I/O error: {0}")]
    FileIO(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return CoreError::Network("request to the prediction backend timed out".into());
        }
        // Query strings carry user input (tickers, categories); keep URLs out.
        CoreError::Network(e.without_url().to_string())
    }
}
