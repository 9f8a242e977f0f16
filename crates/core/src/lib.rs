pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use std::sync::Arc;

use models::{
    chart::{ChartData, ChartType},
    coin::CoinSummary,
    page::PageRequest,
    portfolio::{Holding, PortfolioAllocation},
    range::TimeRange,
    settings::Settings,
};
use providers::{coingecko::CoinGeckoProvider, traits::MarketDataProvider};
use services::{
    aligner::SeriesAligner,
    chart_service::{ChartRequest, ChartResponse, ChartService},
    currency_service::{Conversion, CurrencyService},
    market_service::MarketService,
    portfolio_service::PortfolioService,
};

use errors::CoreError;

/// Main entry point for the coin dashboard core library.
///
/// Owns every piece of dashboard state (listing, search, selection,
/// currency, time range, current chart) and is passed explicitly to each
/// operation. The series aligner it drives is stateless.
///
/// Chart refreshes are tagged with a generation number; any state change
/// that affects the chart bumps it, so a response computed for an older
/// selection is dropped instead of overwriting a newer one.
#[must_use]
pub struct CryptoDashboard {
    settings: Settings,
    provider: Arc<dyn MarketDataProvider>,
    coins: Vec<CoinSummary>,
    filtered_coins: Vec<CoinSummary>,
    search_term: String,
    selected: Vec<String>,
    time_range: TimeRange,
    chart_type: ChartType,
    chart: Option<ChartData>,
    generation: u64,
    last_error: Option<String>,
    market_service: MarketService,
    chart_service: ChartService,
    currency_service: CurrencyService,
    portfolio_service: PortfolioService,
}

impl std::fmt::Debug for CryptoDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoDashboard")
            .field("provider", &self.provider.name())
            .field("base_currency", &self.settings.base_currency)
            .field("coins", &self.coins.len())
            .field("selected", &self.selected)
            .field("time_range", &self.time_range)
            .field("chart_type", &self.chart_type)
            .field("has_chart", &self.chart.is_some())
            .field("generation", &self.generation)
            .finish()
    }
}

impl CryptoDashboard {
    /// Create a dashboard backed by CoinGecko, configured from `settings`.
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        let provider = Arc::new(CoinGeckoProvider::from_settings(&settings));
        Self::with_provider(settings, provider)
    }

    /// Create a dashboard backed by any market data provider.
    pub fn with_provider(
        mut settings: Settings,
        provider: Arc<dyn MarketDataProvider>,
    ) -> Result<Self, CoreError> {
        let currency_service = CurrencyService::new();
        settings.base_currency = currency_service.normalize_currency(&settings.base_currency)?;
        let aligner = SeriesAligner::with_threshold(settings.align_threshold_millis);

        Ok(Self {
            settings,
            provider,
            coins: Vec::new(),
            filtered_coins: Vec::new(),
            search_term: String::new(),
            selected: Vec::new(),
            time_range: TimeRange::default(),
            chart_type: ChartType::default(),
            chart: None,
            generation: 0,
            last_error: None,
            market_service: MarketService::new(),
            chart_service: ChartService::with_aligner(aligner),
            currency_service,
            portfolio_service: PortfolioService::new(),
        })
    }

    // ── Market Listing ──────────────────────────────────────────────

    /// Re-fetch the coin listing in the current base currency.
    /// Resets the search filter to the full listing on success.
    pub async fn refresh_markets(&mut self) -> Result<(), CoreError> {
        let provider = Arc::clone(&self.provider);
        let result = self
            .market_service
            .fetch_markets(
                provider.as_ref(),
                &self.settings.base_currency,
                self.settings.markets_per_page,
            )
            .await;

        match result {
            Ok(coins) => {
                self.filtered_coins = coins.clone();
                self.coins = coins;
                self.search_term.clear();
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Full listing from the last successful refresh.
    #[must_use]
    pub fn coins(&self) -> &[CoinSummary] {
        &self.coins
    }

    /// Listing narrowed by the last search.
    #[must_use]
    pub fn filtered_coins(&self) -> &[CoinSummary] {
        &self.filtered_coins
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Filter the listing by name (case-insensitive). A blank term restores
    /// the full listing.
    pub fn search(&mut self, term: &str) -> &[CoinSummary] {
        self.filtered_coins = self.market_service.filter_by_name(&self.coins, term);
        self.search_term = term.to_string();
        &self.filtered_coins
    }

    /// One page of the filtered listing.
    #[must_use]
    pub fn coins_page(&self, page: &PageRequest) -> &[CoinSummary] {
        page.apply(&self.filtered_coins)
    }

    // ── Currency ────────────────────────────────────────────────────

    /// Switch the pricing currency (e.g. "usd", "EUR").
    /// The listing and chart must be refreshed afterwards.
    pub fn set_base_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        let normalized = self.currency_service.normalize_currency(currency)?;
        if normalized != self.settings.base_currency {
            tracing::debug!(from = %self.settings.base_currency, to = %normalized, "base currency changed");
            self.settings.base_currency = normalized;
            self.invalidate_chart_requests();
        }
        Ok(())
    }

    #[must_use]
    pub fn base_currency(&self) -> &str {
        &self.settings.base_currency
    }

    /// Convert an amount of one listed coin into another coin or the base currency.
    pub fn convert(
        &self,
        amount: &str,
        from_symbol: &str,
        to_symbol: &str,
    ) -> Result<Conversion, CoreError> {
        self.currency_service.convert(
            amount,
            from_symbol,
            to_symbol,
            &self.coins,
            &self.settings.base_currency,
        )
    }

    /// Allocation of USD holdings, expressed in the base currency.
    #[must_use]
    pub fn portfolio_allocation(&self, holdings: &[Holding]) -> PortfolioAllocation {
        self.portfolio_service
            .allocation(holdings, &self.settings.base_currency)
    }

    // ── Selection ───────────────────────────────────────────────────

    /// Add a coin id to the chart selection.
    /// Returns `false` for blank ids and ids already selected.
    pub fn select_coin(&mut self, id: &str) -> bool {
        let id = id.trim();
        if id.is_empty() || self.selected.iter().any(|s| s == id) {
            return false;
        }
        self.selected.push(id.to_string());
        self.invalidate_chart_requests();
        true
    }

    /// Remove a coin id from the selection. Clears the chart when the
    /// selection becomes empty.
    pub fn deselect_coin(&mut self, id: &str) -> bool {
        let before = self.selected.len();
        self.selected.retain(|s| s != id);
        let removed = self.selected.len() != before;
        if removed {
            self.invalidate_chart_requests();
            if self.selected.is_empty() {
                self.chart = None;
            }
        }
        removed
    }

    #[must_use]
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    // ── Time Range & Chart Type ─────────────────────────────────────

    pub fn set_time_range(&mut self, range: TimeRange) -> Result<(), CoreError> {
        range.validate()?;
        if range != self.time_range {
            self.time_range = range;
            self.invalidate_chart_requests();
        }
        Ok(())
    }

    /// Apply a preset such as "1D", "1W", "1M", "6M" or "1Y".
    pub fn set_time_preset(&mut self, label: &str) -> Result<(), CoreError> {
        let range = TimeRange::preset(label).ok_or_else(|| {
            CoreError::ValidationError(format!("Unknown time range preset '{label}'"))
        })?;
        self.set_time_range(range)
    }

    #[must_use]
    pub fn time_range(&self) -> &TimeRange {
        &self.time_range
    }

    pub fn set_chart_type(&mut self, chart_type: ChartType) {
        self.chart_type = chart_type;
    }

    #[must_use]
    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    // ── Charts ──────────────────────────────────────────────────────

    /// Snapshot the current state into a chart request and make it the
    /// newest generation. Run it with [`ChartService::execute`] and hand the
    /// response back to [`apply_chart_response`](Self::apply_chart_response).
    pub fn begin_chart_request(&mut self) -> ChartRequest {
        self.generation += 1;
        ChartRequest {
            generation: self.generation,
            selection: self.selected.clone(),
            currency: self.settings.base_currency.clone(),
            range: self.time_range,
            metric: self.settings.metric,
            coins: self.coins.clone(),
        }
    }

    /// Store a finished chart response. Returns `false` (and changes
    /// nothing) when the response belongs to an outdated generation.
    pub fn apply_chart_response(&mut self, response: ChartResponse) -> bool {
        if response.generation != self.generation {
            tracing::debug!(
                response = response.generation,
                current = self.generation,
                "dropping stale chart response"
            );
            return false;
        }
        match response.result {
            Ok(chart) => {
                self.chart = chart;
                self.last_error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "chart refresh failed");
                self.chart = None;
                self.last_error = Some(e.to_string());
            }
        }
        true
    }

    /// Fetch, align and store the chart for the current state.
    /// `Ok(None)` means there is nothing to render (empty selection or every
    /// series failed to load).
    pub async fn refresh_chart(&mut self) -> Result<Option<&ChartData>, CoreError> {
        let request = self.begin_chart_request();
        let provider = Arc::clone(&self.provider);
        let ChartResponse { generation, result } =
            self.chart_service.execute(provider.as_ref(), request).await;

        match result {
            Ok(chart) => {
                self.apply_chart_response(ChartResponse {
                    generation,
                    result: Ok(chart),
                });
                Ok(self.chart.as_ref())
            }
            Err(e) => {
                self.chart = None;
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// The chart service this dashboard uses, for running requests off
    /// the dashboard.
    #[must_use]
    pub fn chart_service(&self) -> &ChartService {
        &self.chart_service
    }

    /// Shared handle to the market data provider.
    #[must_use]
    pub fn provider(&self) -> Arc<dyn MarketDataProvider> {
        Arc::clone(&self.provider)
    }

    #[must_use]
    pub fn chart(&self) -> Option<&ChartData> {
        self.chart.as_ref()
    }

    /// Generation of the newest chart request.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ── Status & Settings ───────────────────────────────────────────

    /// Message of the most recent listing/chart failure, cleared on success.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Internal ────────────────────────────────────────────────────

    fn invalidate_chart_requests(&mut self) {
        self.generation += 1;
    }
}
