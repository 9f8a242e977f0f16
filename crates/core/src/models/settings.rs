use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use super::series::{ChartMetric, DEFAULT_THRESHOLD_MILLIS};

pub const DEFAULT_API_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// User-configurable settings for the dashboard core.
///
/// Every field has a default, so a partial JSON document is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pricing currency for listings and charts (lowercase, e.g. "usd")
    pub base_currency: String,

    /// Market-data API root, overridable for proxies and tests
    pub api_base_url: String,

    /// Per-request HTTP timeout (ignored on wasm32)
    pub request_timeout_secs: u64,

    /// How many coins the listing fetches (ordered by market cap)
    pub markets_per_page: u32,

    /// Nearest-neighbour threshold used when aligning series
    pub align_threshold_millis: i64,

    /// Which payload array the chart shows
    pub metric: ChartMetric,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_currency: "usd".to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 30,
            markets_per_page: 10,
            align_threshold_millis: DEFAULT_THRESHOLD_MILLIS,
            metric: ChartMetric::default(),
        }
    }
}

impl Settings {
    /// Load settings from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize settings: {e}")))
    }
}
