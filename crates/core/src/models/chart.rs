use serde::{Deserialize, Serialize};

use super::series::AlignedSeries;

/// Fixed series palette; series `i` is drawn with `PALETTE[i % PALETTE.len()]`.
pub const PALETTE: [&str; 6] = [
    "rgba(16, 91, 246, 1)",   // blue
    "rgba(235, 88, 88, 1)",   // red
    "rgba(88, 196, 180, 1)",  // teal
    "rgba(255, 159, 64, 1)",  // orange
    "rgba(153, 102, 255, 1)", // purple
    "rgba(255, 206, 86, 1)",  // yellow
];

/// Palette colour for the series at `index` in input order.
pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Fill colour derived from an opaque palette colour (alpha 0.12).
pub fn translucent(color: &str) -> String {
    color.replace(", 1)", ", 0.12)")
}

/// How the frontend draws the datasets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Line,
    Bar,
}

impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartType::Line => write!(f, "line"),
            ChartType::Bar => write!(f, "bar"),
        }
    }
}

/// One line/bar series in chart-library shape.
///
/// The core generates these; the frontend just renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,

    /// One cell per label; `null` renders as a gap
    pub data: Vec<Option<f64>>,

    pub border_color: String,
    pub background_color: String,
    pub point_radius: u32,
    pub point_hover_radius: u32,
    pub tension: f64,
    pub border_width: u32,
    pub span_gaps: bool,
}

impl From<&AlignedSeries> for ChartDataset {
    fn from(series: &AlignedSeries) -> Self {
        Self {
            label: series.label.clone(),
            data: series.values.clone(),
            border_color: series.color.clone(),
            background_color: translucent(&series.color),
            point_radius: 0,
            point_hover_radius: 6,
            tension: 0.18,
            border_width: 2,
            span_gaps: true,
        }
    }
}

/// Chart-ready structure: x-axis labels plus one dataset per series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    /// Human-readable axis labels (e.g. "Jan 5"), one per timestamp
    pub labels: Vec<String>,

    pub datasets: Vec<ChartDataset>,

    /// The unified axis the labels were formatted from (epoch millis)
    pub raw_timestamps: Vec<i64>,
}
