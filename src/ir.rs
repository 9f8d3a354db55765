use crate::data::TreeNode;
use serde::Serialize;

// =============================================================================
// Assembled visualization spec
// =============================================================================

/// An axis of a cartesian chart.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Axis {
    /// Discrete axis carrying the pivoted category labels in order.
    Category { labels: Vec<String> },
    /// Continuous numeric axis.
    Value {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

/// One series entry of the assembled spec.
///
/// The `stack` tag is omitted entirely when stacking was not requested, so
/// that its absence never reads as an empty shared stack group.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SeriesSpec {
    Line {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// One slot per category; `null` marks a missing combination.
        values: Vec<Option<f64>>,
        smooth: bool,
        show_symbol: bool,
        /// Fill under the line. Forced true for area chart kinds.
        area: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        stack: Option<String>,
    },
    Bar {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        values: Vec<Option<f64>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        stack: Option<String>,
    },
    Scatter { points: Vec<[f64; 2]> },
    /// Hierarchical payloads bypass the category/series pivot entirely and
    /// carry the input forest as-is.
    Treemap { data: Vec<TreeNode> },
    Sunburst { data: Vec<TreeNode> },
}

impl SeriesSpec {
    /// Legend label, when the series is named.
    pub fn name(&self) -> Option<&str> {
        match self {
            SeriesSpec::Line { name, .. } | SeriesSpec::Bar { name, .. } => name.as_deref(),
            _ => None,
        }
    }

    /// Stack group tag, when stacking was requested.
    pub fn stack(&self) -> Option<&str> {
        match self {
            SeriesSpec::Line { stack, .. } | SeriesSpec::Bar { stack, .. } => stack.as_deref(),
            _ => None,
        }
    }
}

/// The fully assembled, backend-neutral chart description.
/// Immutable once built; consumed exactly once by the render dispatcher.
#[derive(Debug, Clone, Serialize)]
pub struct VisualizationSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<Axis>,
    /// Legend entries, one per named series; empty when all series are anonymous.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub legend: Vec<String>,
    pub series: Vec<SeriesSpec>,
}
