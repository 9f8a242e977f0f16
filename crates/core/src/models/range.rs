use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Named shortcuts shown next to the chart (label → days).
pub const TIME_RANGE_PRESETS: [(&str, u32); 5] =
    [("1D", 1), ("1W", 7), ("1M", 30), ("6M", 180), ("1Y", 365)];

/// Window of market data to request for a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    /// The last `n` days up to now
    Days(u32),
    /// An explicit calendar range, both ends at UTC midnight
    Between { from: NaiveDate, to: NaiveDate },
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::Days(30)
    }
}

impl TimeRange {
    /// Resolve a preset label such as "1W" (case-insensitive).
    pub fn preset(label: &str) -> Option<Self> {
        let label = label.trim().to_uppercase();
        TIME_RANGE_PRESETS
            .iter()
            .find(|(name, _)| *name == label)
            .map(|(_, days)| TimeRange::Days(*days))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            TimeRange::Days(0) => Err(CoreError::ValidationError(
                "Day window must be at least 1 day".into(),
            )),
            TimeRange::Days(_) => Ok(()),
            TimeRange::Between { from, to } if from > to => Err(CoreError::ValidationError(
                format!("'from' date ({from}) must not be after 'to' date ({to})"),
            )),
            TimeRange::Between { .. } => Ok(()),
        }
    }

    /// Unix seconds for the `Between` bounds, `None` for day windows.
    pub fn unix_bounds(&self) -> Option<(i64, i64)> {
        match self {
            TimeRange::Days(_) => None,
            TimeRange::Between { from, to } => Some((midnight_utc(*from), midnight_utc(*to))),
        }
    }
}

fn midnight_utc(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp()
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeRange::Days(days) => write!(f, "last {days} days"),
            TimeRange::Between { from, to } => write!(f, "{from}..{to}"),
        }
    }
}
