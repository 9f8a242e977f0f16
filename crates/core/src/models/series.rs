use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::CoreError;

/// Default nearest-neighbour threshold: 3 hours in milliseconds.
pub const DEFAULT_THRESHOLD_MILLIS: i64 = 3 * 60 * 60 * 1000;

/// A single observation of a series (epoch millis → value).
///
/// `value` is `None` when the source reported the timestamp without a number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub timestamp: i64,
    pub value: Option<f64>,
}

impl TimePoint {
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self {
            timestamp,
            value: Some(value),
        }
    }

    /// A point that marks a timestamp without a value.
    pub fn empty(timestamp: i64) -> Self {
        Self {
            timestamp,
            value: None,
        }
    }

    /// Parse one untyped entry into a point.
    ///
    /// Accepted shapes:
    /// - `[timestamp, value, ...]` (CoinGecko style pairs)
    /// - `{ "timestamp": .., "value": .. }` or the short `{ "ts": .., "v": .. }`
    ///
    /// The timestamp must be an integral number; the value must be a number,
    /// `null`, or (for objects) absent. Anything else yields `None`.
    pub fn from_json(entry: &Value) -> Option<Self> {
        match entry {
            Value::Array(items) if items.len() >= 2 => Some(Self {
                timestamp: timestamp_from_json(&items[0])?,
                value: value_from_json(&items[1])?,
            }),
            Value::Object(map) => {
                let ts = map.get("timestamp").or_else(|| map.get("ts"))?;
                let value = match map.get("value").or_else(|| map.get("v")) {
                    Some(v) => value_from_json(v)?,
                    None => None,
                };
                Some(Self {
                    timestamp: timestamp_from_json(ts)?,
                    value,
                })
            }
            _ => None,
        }
    }
}

fn timestamp_from_json(v: &Value) -> Option<i64> {
    if let Some(ts) = v.as_i64() {
        return Some(ts);
    }
    let f = v.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// `Some(None)` for JSON null, `Some(Some(x))` for a number, `None` otherwise.
fn value_from_json(v: &Value) -> Option<Option<f64>> {
    match v {
        Value::Null => Some(None),
        Value::Number(n) => n.as_f64().filter(|x| x.is_finite()).map(Some),
        _ => None,
    }
}

/// Which array of a market-chart payload gets charted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartMetric {
    Prices,
    #[default]
    MarketCaps,
    TotalVolumes,
}

impl ChartMetric {
    /// Field name in the market-chart payload.
    pub fn key(&self) -> &'static str {
        match self {
            ChartMetric::Prices => "prices",
            ChartMetric::MarketCaps => "market_caps",
            ChartMetric::TotalVolumes => "total_volumes",
        }
    }
}

impl std::fmt::Display for ChartMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// One independently-fetched series, already validated into typed points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesInput {
    /// Opaque series identifier (e.g. a CoinGecko coin id like "bitcoin")
    pub id: String,
    pub points: Vec<TimePoint>,
}

impl SeriesInput {
    pub fn new(id: impl Into<String>, points: Vec<TimePoint>) -> Self {
        Self {
            id: id.into(),
            points,
        }
    }

    /// Validate an untyped series body.
    ///
    /// The body itself must be a JSON array, otherwise the whole series is
    /// rejected. Individual entries that fail [`TimePoint::from_json`] are
    /// dropped silently.
    pub fn from_json(id: impl Into<String>, body: &Value) -> Result<Self, CoreError> {
        let id = id.into();
        let entries = body.as_array().ok_or_else(|| CoreError::MalformedPayload {
            series: id.clone(),
            reason: format!("expected an array of points, got {}", json_kind(body)),
        })?;
        let points = entries.iter().filter_map(TimePoint::from_json).collect();
        Ok(Self { id, points })
    }

    /// Validate a market-chart payload (`{ prices, market_caps, total_volumes }`)
    /// and extract the series for `metric`.
    ///
    /// Pairs reporting a `null` value are dropped along with malformed ones;
    /// the market-data API uses them for "no data" rather than a real gap.
    pub fn from_market_chart(
        id: impl Into<String>,
        payload: &Value,
        metric: ChartMetric,
    ) -> Result<Self, CoreError> {
        let id = id.into();
        let body = payload
            .get(metric.key())
            .ok_or_else(|| CoreError::MalformedPayload {
                series: id.clone(),
                reason: format!("missing '{}' field", metric.key()),
            })?;
        let mut series = Self::from_json(id, body)?;
        series.points.retain(|p| p.value.is_some());
        Ok(series)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A series remapped onto the unified axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedSeries {
    pub id: String,
    /// Display label, resolved by the caller (falls back to the id)
    pub label: String,
    /// Palette colour chosen by input position
    pub color: String,
    /// One cell per axis timestamp; `None` is a gap
    pub values: Vec<Option<f64>>,
}

/// Result of aligning N series onto one axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    /// Strictly ascending, de-duplicated timestamps (epoch millis)
    pub axis: Vec<i64>,
    /// Same order as the inputs; every `values` has `axis.len()` cells
    pub series: Vec<AlignedSeries>,
}

impl Alignment {
    /// True when there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Look up an aligned series by its id.
    pub fn get(&self, id: &str) -> Option<&AlignedSeries> {
        self.series.iter().find(|s| s.id == id)
    }
}
