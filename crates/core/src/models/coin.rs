use serde::{Deserialize, Serialize};

/// One row of the market listing (`/coins/markets`), ordered by market cap.
///
/// Numeric fields are optional: freshly listed coins often come back
/// without a price or market cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinSummary {
    /// API identifier used for chart requests (e.g. "bitcoin")
    pub id: String,

    /// Ticker symbol as reported, usually lowercase (e.g. "btc")
    pub symbol: String,

    /// Human-readable name (e.g. "Bitcoin")
    pub name: String,

    #[serde(default)]
    pub current_price: Option<f64>,

    #[serde(default)]
    pub market_cap: Option<f64>,

    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
}

impl CoinSummary {
    pub fn new(id: impl Into<String>, symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            name: name.into(),
            current_price: None,
            market_cap: None,
            price_change_percentage_24h: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.current_price = Some(price);
        self
    }

    pub fn with_market_cap(mut self, market_cap: f64) -> Self {
        self.market_cap = Some(market_cap);
        self
    }

    /// Case-insensitive symbol comparison ("BTC" matches "btc").
    pub fn has_symbol(&self, symbol: &str) -> bool {
        self.symbol.eq_ignore_ascii_case(symbol.trim())
    }
}

/// Display name for a coin id, falling back to the id itself.
pub fn display_name<'a>(coins: &'a [CoinSummary], id: &'a str) -> &'a str {
    coins
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.as_str())
        .unwrap_or(id)
}
