use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::coin::CoinSummary;

/// Currencies the dashboard can price in (lowercase API codes).
pub const SUPPORTED_CURRENCIES: [&str; 5] = ["usd", "inr", "eur", "gbp", "jpy"];

/// Approximate USD → currency rates for holdings entered in USD.
const USD_RATES: [(&str, f64); 5] = [
    ("usd", 1.0),
    ("inr", 83.5),
    ("eur", 0.85),
    ("gbp", 0.75),
    ("jpy", 150.0),
];

/// Result of converting an amount of one coin into another coin or the
/// base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub amount: f64,
    /// Upper-case source symbol (e.g. "BTC")
    pub from: String,
    /// Upper-case target symbol or base currency code (e.g. "ETH", "USD")
    pub to: String,
    pub result: f64,
    /// Price of one `from` unit in the base currency
    pub from_price: f64,
}

/// Handles currency selection and coin ↔ coin / coin → base conversion.
///
/// All coin prices come from the market listing, which is already priced
/// in the base currency, so conversion is a single ratio:
/// `amount * from_price / to_price`, where the base currency itself has
/// price 1.
pub struct CurrencyService;

impl CurrencyService {
    pub fn new() -> Self {
        Self
    }

    /// Trim and lowercase `code`, rejecting currencies the dashboard does not support.
    pub fn normalize_currency(&self, code: &str) -> Result<String, CoreError> {
        let normalized = code.trim().to_lowercase();
        if SUPPORTED_CURRENCIES.contains(&normalized.as_str()) {
            Ok(normalized)
        } else {
            Err(CoreError::UnsupportedCurrency(format!(
                "'{code}' (supported: {})",
                SUPPORTED_CURRENCIES.join(", ")
            )))
        }
    }

    /// USD → `currency` rate; unknown currencies fall back to 1.
    pub fn conversion_rate(&self, currency: &str) -> f64 {
        let code = currency.trim().to_lowercase();
        USD_RATES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, rate)| *rate)
            .unwrap_or(1.0)
    }

    /// Convert `amount_text` units of the coin `from_symbol` into
    /// `to_symbol`, which is either another listed coin or the base currency.
    ///
    /// The amount must be a plain positive decimal ("12", "0.5", ".5").
    pub fn convert(
        &self,
        amount_text: &str,
        from_symbol: &str,
        to_symbol: &str,
        coins: &[CoinSummary],
        base_currency: &str,
    ) -> Result<Conversion, CoreError> {
        let amount = parse_amount(amount_text)?;

        let from = from_symbol.trim().to_uppercase();
        let to = to_symbol.trim().to_uppercase();

        let from_price = coins
            .iter()
            .find(|c| c.has_symbol(&from))
            .ok_or_else(|| CoreError::CoinNotFound(format!("From currency not found: {from}")))?
            .current_price
            .ok_or_else(|| CoreError::ValidationError(format!("No price available for {from}")))?;

        let to_price = if to.eq_ignore_ascii_case(base_currency.trim()) {
            1.0
        } else {
            coins
                .iter()
                .find(|c| c.has_symbol(&to))
                .ok_or_else(|| CoreError::CoinNotFound(format!("To currency not found: {to}")))?
                .current_price
                .ok_or_else(|| CoreError::ValidationError(format!("No price available for {to}")))?
        };

        if to_price <= 0.0 || !to_price.is_finite() {
            return Err(CoreError::ValidationError(format!(
                "Cannot convert into {to}: price is {to_price}"
            )));
        }

        Ok(Conversion {
            amount,
            from,
            to,
            result: amount * from_price / to_price,
            from_price,
        })
    }
}

impl Default for CurrencyService {
    fn default() -> Self {
        Self::new()
    }
}

/// Accepts only `digits[.digits]` (either side may be empty, not both).
fn parse_amount(text: &str) -> Result<f64, CoreError> {
    let well_formed = !text.is_empty()
        && text.chars().filter(|c| *c == '.').count() <= 1
        && text.chars().all(|c| c.is_ascii_digit() || c == '.');
    let amount: f64 = well_formed
        .then(|| text.parse().ok())
        .flatten()
        .ok_or_else(|| CoreError::ValidationError("Please enter a valid number".into()))?;
    if amount <= 0.0 {
        return Err(CoreError::ValidationError("Amount must be greater than 0".into()));
    }
    Ok(amount)
}
