use async_trait::async_trait;
use serde_json::Value;

use crate::errors::CoreError;
use crate::models::coin::CoinSummary;
use crate::models::range::TimeRange;

/// Trait abstraction for market data sources.
///
/// Chart bodies are handed back as raw JSON: the chart service validates them
/// into typed series itself, so a provider never decides which entries are
/// usable.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Top coins by market cap, priced in `currency`.
    async fn get_markets(
        &self,
        currency: &str,
        per_page: u32,
    ) -> Result<Vec<CoinSummary>, CoreError>;

    /// Raw market-chart payload (`{ prices, market_caps, total_volumes }`)
    /// for one coin over `range`, priced in `currency`.
    async fn get_market_chart(
        &self,
        coin_id: &str,
        currency: &str,
        range: &TimeRange,
    ) -> Result<Value, CoreError>;
}
