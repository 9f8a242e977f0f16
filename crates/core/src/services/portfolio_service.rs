use crate::models::portfolio::{AllocationSlice, Holding, PortfolioAllocation};
use super::currency_service::CurrencyService;

/// Computes the allocation breakdown of a set of holdings.
pub struct PortfolioService {
    currency_service: CurrencyService,
}

impl PortfolioService {
    pub fn new() -> Self {
        Self {
            currency_service: CurrencyService::new(),
        }
    }

    /// Convert USD holdings into `base_currency` and compute each one's
    /// share of the total value. Slices keep the input order; an all-zero
    /// portfolio yields 0% everywhere rather than NaN.
    pub fn allocation(&self, holdings: &[Holding], base_currency: &str) -> PortfolioAllocation {
        let rate = self.currency_service.conversion_rate(base_currency);

        let converted: Vec<(&Holding, f64, f64)> = holdings
            .iter()
            .map(|h| (h, h.amount * rate, h.value * rate))
            .collect();
        let total_value: f64 = converted.iter().map(|(_, _, value)| value).sum();

        let slices = converted
            .into_iter()
            .map(|(h, amount, value)| AllocationSlice {
                id: h.id.clone(),
                name: h.name.clone(),
                amount,
                value,
                percentage: if total_value > 0.0 {
                    value / total_value * 100.0
                } else {
                    0.0
                },
            })
            .collect();

        PortfolioAllocation {
            currency: base_currency.trim().to_lowercase(),
            total_value,
            slices,
        }
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
