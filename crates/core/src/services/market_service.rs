use crate::errors::CoreError;
use crate::models::coin::CoinSummary;
use crate::providers::traits::MarketDataProvider;

/// Fetches the coin listing and answers name searches over it.
pub struct MarketService;

impl MarketService {
    pub fn new() -> Self {
        Self
    }

    /// Fetch the top `per_page` coins by market cap, priced in `currency`.
    pub async fn fetch_markets(
        &self,
        provider: &dyn MarketDataProvider,
        currency: &str,
        per_page: u32,
    ) -> Result<Vec<CoinSummary>, CoreError> {
        match provider.get_markets(currency, per_page).await {
            Ok(coins) => {
                tracing::info!(
                    provider = provider.name(),
                    currency,
                    count = coins.len(),
                    "market listing refreshed"
                );
                Ok(coins)
            }
            Err(e) => {
                tracing::warn!(provider = provider.name(), currency, error = %e, "market listing failed");
                Err(e)
            }
        }
    }

    /// Case-insensitive substring search on coin names.
    /// A blank term returns the whole listing.
    pub fn filter_by_name(&self, coins: &[CoinSummary], term: &str) -> Vec<CoinSummary> {
        if term.trim().is_empty() {
            return coins.to_vec();
        }
        let needle = term.to_lowercase();
        coins
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

impl Default for MarketService {
    fn default() -> Self {
        Self::new()
    }
}
