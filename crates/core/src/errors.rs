use thiserror::Error;

/// Unified error type for the entire coin-dashboard-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// The series aligner itself never fails: malformed points are dropped and
/// unmatched cells become gaps. Errors only come from the layers around it.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Payloads ────────────────────────────────────────────────────
    #[error("Malformed payload for series '{series}': {reason}")]
    MalformedPayload { series: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("Coin not found: {0}")]
    CoinNotFound(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors embed the full request URL; drop the query string.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
