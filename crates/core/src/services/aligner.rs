use std::collections::{BTreeSet, HashMap};

use crate::models::chart::palette_color;
use crate::models::series::{AlignedSeries, Alignment, SeriesInput, TimePoint, DEFAULT_THRESHOLD_MILLIS};

/// Merges independently time-stamped series onto one common axis.
///
/// The market-data API never returns synchronized timestamps for two coins,
/// so every series is remapped onto the union of all timestamps:
/// 1. exact timestamp match → that value
/// 2. otherwise the nearest point of the same series, if it lies within
///    `threshold_millis`
/// 3. otherwise `None` (rendered as a gap)
///
/// Stateless: every call builds its own maps, so one aligner can be shared
/// freely and identical inputs always give identical output.
///
/// Cost is O(A · S · P) in the worst case (A axis points, S series, P points
/// per series) because the nearest-neighbour fallback is a linear scan.
/// Selections are a handful of coins with a few hundred points each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesAligner {
    threshold_millis: i64,
}

impl SeriesAligner {
    /// Aligner with the default 3 hour threshold.
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_THRESHOLD_MILLIS)
    }

    /// Aligner with a custom threshold; negative values are clamped to 0.
    pub fn with_threshold(threshold_millis: i64) -> Self {
        Self {
            threshold_millis: threshold_millis.max(0),
        }
    }

    pub fn threshold_millis(&self) -> i64 {
        self.threshold_millis
    }

    /// Align `inputs`, labelling each series by its id.
    pub fn align(&self, inputs: &[SeriesInput]) -> Alignment {
        self.align_with_labels(inputs, |_| None)
    }

    /// Align `inputs`, resolving display labels through `resolve_label`.
    /// Ids the resolver does not know are used as their own label.
    pub fn align_with_labels<F>(&self, inputs: &[SeriesInput], resolve_label: F) -> Alignment
    where
        F: Fn(&str) -> Option<String>,
    {
        if inputs.is_empty() {
            return Alignment::default();
        }

        let axis = unified_axis(inputs);

        let series = inputs
            .iter()
            .enumerate()
            .map(|(idx, input)| {
                // Later duplicates overwrite earlier ones.
                let exact: HashMap<i64, Option<f64>> = input
                    .points
                    .iter()
                    .map(|p| (p.timestamp, p.value))
                    .collect();

                let values = axis
                    .iter()
                    .map(|&t| match exact.get(&t) {
                        Some(value) => *value,
                        None => nearest_within(&input.points, t, self.threshold_millis),
                    })
                    .collect();

                AlignedSeries {
                    id: input.id.clone(),
                    label: resolve_label(&input.id).unwrap_or_else(|| input.id.clone()),
                    color: palette_color(idx).to_string(),
                    values,
                }
            })
            .collect();

        Alignment { axis, series }
    }
}

impl Default for SeriesAligner {
    fn default() -> Self {
        Self::new()
    }
}

/// Align with an explicit threshold and id labels.
pub fn align(inputs: &[SeriesInput], threshold_millis: i64) -> Alignment {
    SeriesAligner::with_threshold(threshold_millis).align(inputs)
}

/// Sorted union of every timestamp across all series, duplicates collapsed.
pub fn unified_axis(inputs: &[SeriesInput]) -> Vec<i64> {
    inputs
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.timestamp))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Value of the point closest to `t`, or `None` if the closest point is
/// farther than `threshold` (or the series is empty). Ties keep the first
/// point in input order.
fn nearest_within(points: &[TimePoint], t: i64, threshold: i64) -> Option<f64> {
    let mut closest: Option<&TimePoint> = None;
    let mut min_diff = u64::MAX;
    for p in points {
        let diff = p.timestamp.abs_diff(t);
        if diff < min_diff {
            min_diff = diff;
            closest = Some(p);
        }
    }
    // threshold is clamped non-negative in the constructor
    let threshold = threshold.unsigned_abs();
    closest.filter(|_| min_diff <= threshold).and_then(|p| p.value)
}

