use futures::future::join_all;

use crate::errors::CoreError;
use crate::models::chart::{ChartData, ChartDataset};
use crate::models::coin::{display_name, CoinSummary};
use crate::models::range::TimeRange;
use crate::models::series::{Alignment, ChartMetric, SeriesInput};
use crate::providers::traits::MarketDataProvider;
use super::aligner::SeriesAligner;

/// Generates chart-ready data sets from per-coin market charts.
///
/// The core computes all the numbers; the frontend only renders.
/// A chart is built in three steps:
/// 1. Fetch every selected coin concurrently
/// 2. Validate each payload into a typed series, omitting failures
/// 3. Align the survivors onto one axis and format labels/datasets
pub struct ChartService {
    aligner: SeriesAligner,
}

/// Snapshot of everything a chart depends on, tagged with the generation
/// that issued it. The caller keeps only responses from its latest
/// generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    pub generation: u64,
    pub selection: Vec<String>,
    pub currency: String,
    pub range: TimeRange,
    pub metric: ChartMetric,
    /// Listing used to resolve display names
    pub coins: Vec<CoinSummary>,
}

/// Outcome of a [`ChartRequest`]. `Ok(None)` means "nothing to render".
#[derive(Debug)]
pub struct ChartResponse {
    pub generation: u64,
    pub result: Result<Option<ChartData>, CoreError>,
}

impl ChartService {
    pub fn new() -> Self {
        Self::with_aligner(SeriesAligner::new())
    }

    pub fn with_aligner(aligner: SeriesAligner) -> Self {
        Self { aligner }
    }

    pub fn aligner(&self) -> &SeriesAligner {
        &self.aligner
    }

    /// Fetch and validate one series per id, all requests in flight at once.
    ///
    /// Each result stays paired with the id that requested it, so completion
    /// order never matters. Failed or malformed series are logged and left
    /// out; no retries. The returned series keep the order of `ids`.
    pub async fn fetch_series(
        &self,
        provider: &dyn MarketDataProvider,
        ids: &[String],
        currency: &str,
        range: &TimeRange,
        metric: ChartMetric,
    ) -> Vec<SeriesInput> {
        let requests = ids.iter().map(move |id| async move {
            let result = provider
                .get_market_chart(id, currency, range)
                .await
                .and_then(|payload| SeriesInput::from_market_chart(id.as_str(), &payload, metric));
            (id, result)
        });

        join_all(requests)
            .await
            .into_iter()
            .filter_map(|(id, result)| match result {
                Ok(series) => {
                    tracing::debug!(series = %id, points = series.len(), "series fetched");
                    Some(series)
                }
                Err(e) => {
                    tracing::warn!(
                        series = %id,
                        provider = provider.name(),
                        error = %e,
                        "omitting series from chart"
                    );
                    None
                }
            })
            .collect()
    }

    /// Align already-fetched series and shape them for the chart library.
    /// Labels come from the coin listing, falling back to the series id.
    /// Returns `None` when there is nothing to render.
    pub fn build_chart(&self, inputs: &[SeriesInput], coins: &[CoinSummary]) -> Option<ChartData> {
        if inputs.is_empty() {
            return None;
        }
        let alignment = self
            .aligner
            .align_with_labels(inputs, |id| Some(display_name(coins, id).to_string()));
        Some(chart_from_alignment(&alignment))
    }

    /// Fetch, align and format a chart for `selection`.
    ///
    /// An empty selection short-circuits to `Ok(None)` without touching the
    /// network, and so does a batch where every fetch failed.
    pub async fn generate_chart(
        &self,
        provider: &dyn MarketDataProvider,
        selection: &[String],
        coins: &[CoinSummary],
        currency: &str,
        range: &TimeRange,
        metric: ChartMetric,
    ) -> Result<Option<ChartData>, CoreError> {
        range.validate()?;
        if selection.is_empty() {
            return Ok(None);
        }

        let inputs = self
            .fetch_series(provider, selection, currency, range, metric)
            .await;
        if inputs.is_empty() {
            tracing::info!(requested = selection.len(), "no series available, chart cleared");
            return Ok(None);
        }

        Ok(self.build_chart(&inputs, coins))
    }

    /// Run a state snapshot through [`generate_chart`](Self::generate_chart).
    pub async fn execute(
        &self,
        provider: &dyn MarketDataProvider,
        request: ChartRequest,
    ) -> ChartResponse {
        let result = self
            .generate_chart(
                provider,
                &request.selection,
                &request.coins,
                &request.currency,
                &request.range,
                request.metric,
            )
            .await;
        ChartResponse {
            generation: request.generation,
            result,
        }
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn an alignment into labels + datasets.
pub fn chart_from_alignment(alignment: &Alignment) -> ChartData {
    ChartData {
        labels: alignment.axis.iter().map(|&ts| format_axis_label(ts)).collect(),
        datasets: alignment.series.iter().map(ChartDataset::from).collect(),
        raw_timestamps: alignment.axis.clone(),
    }
}

/// Short month/day label in UTC, e.g. "Jan 5".
pub fn format_axis_label(timestamp_millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(timestamp_millis)
        .map(|dt| dt.format("%b %-d").to_string())
        .unwrap_or_else(|| timestamp_millis.to_string())
}
