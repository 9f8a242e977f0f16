// ═══════════════════════════════════════════════════════════════════
// Provider Tests: CoinGecko URL building and configuration
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;

use coin_dashboard_core::models::range::TimeRange;
use coin_dashboard_core::models::settings::{Settings, DEFAULT_API_BASE_URL};
use coin_dashboard_core::providers::coingecko::CoinGeckoProvider;
use coin_dashboard_core::providers::traits::MarketDataProvider;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

mod coingecko {
    use super::*;

    #[test]
    fn name() {
        assert_eq!(CoinGeckoProvider::new().name(), "CoinGecko");
    }

    #[test]
    fn default_base_url() {
        assert_eq!(CoinGeckoProvider::default().base_url(), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn trailing_slash_trimmed() {
        let p = CoinGeckoProvider::with_base_url("http://localhost:9000/api/", 5);
        assert_eq!(p.base_url(), "http://localhost:9000/api");
    }

    #[test]
    fn from_settings_uses_configured_root() {
        let settings = Settings {
            api_base_url: "http://proxy.local/v3".into(),
            ..Settings::default()
        };
        assert_eq!(CoinGeckoProvider::from_settings(&settings).base_url(), "http://proxy.local/v3");
    }

    #[test]
    fn markets_url() {
        let p = CoinGeckoProvider::new();
        assert_eq!(
            p.markets_url("USD", 10),
            "https://api.coingecko.com/api/v3/coins/markets?vs_currency=usd&order=market_cap_desc&per_page=10&page=1&sparkline=false"
        );
    }

    #[test]
    fn market_chart_url_for_day_window() {
        let p = CoinGeckoProvider::new();
        assert_eq!(
            p.market_chart_url("bitcoin", "eur", &TimeRange::Days(30)),
            "https://api.coingecko.com/api/v3/coins/bitcoin/market_chart?vs_currency=eur&days=30"
        );
    }

    #[test]
    fn market_chart_url_for_date_range_uses_unix_seconds() {
        let p = CoinGeckoProvider::with_base_url("http://test", 1);
        let range = TimeRange::Between {
            from: d(2024, 1, 1),
            to: d(2024, 1, 2),
        };
        assert_eq!(
            p.market_chart_url("ethereum", "INR", &range),
            "http://test/coins/ethereum/market_chart/range?vs_currency=inr&from=1704067200&to=1704153600"
        );
    }

    #[test]
    fn currency_lowercased_in_every_url() {
        let p = CoinGeckoProvider::new();
        assert!(p.markets_url("GBP", 5).contains("vs_currency=gbp"));
        assert!(p
            .market_chart_url("x", "JPY", &TimeRange::Days(1))
            .contains("vs_currency=jpy"));
    }
}
