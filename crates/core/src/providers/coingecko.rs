use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::coin::CoinSummary;
use crate::models::range::TimeRange;
use crate::models::settings::{Settings, DEFAULT_API_BASE_URL};
use super::traits::MarketDataProvider;

const PROVIDER_NAME: &str = "CoinGecko";

/// CoinGecko API provider for listings and market charts.
///
/// - **Free**: No API key required for the public endpoints.
/// - **Endpoints**: `/coins/markets`, `/coins/{id}/market_chart`,
///   `/coins/{id}/market_chart/range`
///
/// CoinGecko identifies coins by lowercase ids ("bitcoin", "ethereum") and
/// prices them directly in the requested `vs_currency`, so no second
/// conversion step is needed.
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE_URL, 30)
    }

    /// Provider pointed at a different API root (proxy, mirror, test server).
    pub fn with_base_url(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(timeout_secs));
        #[cfg(target_arch = "wasm32")]
        let _ = timeout_secs;
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_base_url(settings.api_base_url.clone(), settings.request_timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the market listing for `currency`.
    pub fn markets_url(&self, currency: &str, per_page: u32) -> String {
        format!(
            "{}/coins/markets?vs_currency={}&order=market_cap_desc&per_page={per_page}&page=1&sparkline=false",
            self.base_url,
            currency.to_lowercase(),
        )
    }

    /// URL of the market chart for one coin. Explicit date ranges go to the
    /// `/range` endpoint with Unix-second bounds; day windows use `days=`.
    pub fn market_chart_url(&self, coin_id: &str, currency: &str, range: &TimeRange) -> String {
        let currency = currency.to_lowercase();
        match range {
            TimeRange::Days(days) => format!(
                "{}/coins/{coin_id}/market_chart?vs_currency={currency}&days={days}",
                self.base_url,
            ),
            TimeRange::Between { .. } => {
                let (from, to) = range.unix_bounds().unwrap_or_default();
                format!(
                    "{}/coins/{coin_id}/market_chart/range?vs_currency={currency}&from={from}&to={to}",
                    self.base_url,
                )
            }
        }
    }

    async fn get_json(&self, url: &str, what: &str) -> Result<Value, CoreError> {
        tracing::debug!(provider = PROVIDER_NAME, what, "requesting");
        let resp = self.client.get(url).send().await?;
        let resp = check_status(resp, what)?;
        resp.json().await.map_err(|e| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("Failed to parse {what}: {e}"),
        })
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn check_status(resp: Response, what: &str) -> Result<Response, CoreError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("{what} request failed with status {status}"),
        })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketDataProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn get_markets(
        &self,
        currency: &str,
        per_page: u32,
    ) -> Result<Vec<CoinSummary>, CoreError> {
        let url = self.markets_url(currency, per_page);
        let body = self.get_json(&url, "market listing").await?;
        serde_json::from_value(body).map_err(|e| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("Unexpected market listing shape: {e}"),
        })
    }

    async fn get_market_chart(
        &self,
        coin_id: &str,
        currency: &str,
        range: &TimeRange,
    ) -> Result<Value, CoreError> {
        let url = self.market_chart_url(coin_id, currency, range);
        self.get_json(&url, &format!("market chart for {coin_id}")).await
    }
}
