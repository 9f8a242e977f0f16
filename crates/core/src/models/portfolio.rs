use serde::{Deserialize, Serialize};

/// A position held in one coin, valued in USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub id: String,
    pub name: String,
    /// Amount invested (USD)
    pub amount: f64,
    /// Current value (USD)
    pub value: f64,
}

impl Holding {
    pub fn new(id: impl Into<String>, name: impl Into<String>, amount: f64, value: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
            value,
        }
    }
}

/// One holding converted to the display currency, with its share of the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub value: f64,
    /// Share of the total value, 0–100
    pub percentage: f64,
}

/// Allocation breakdown of all holdings in one currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioAllocation {
    pub currency: String,
    pub total_value: f64,
    pub slices: Vec<AllocationSlice>,
}
