use crate::data::{TabularRecord, TreeNode};
use crate::RenderOptions;
use anyhow::Result;
use serde::Deserialize;

/// A complete chart-generation request: kind-specific parameters plus the
/// shared presentation options.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartRequest {
    #[serde(flatten)]
    pub chart: ChartParams,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(flatten)]
    pub options: RenderOptions,
}

/// Kind-specific chart parameters, dispatched on the `kind` tag.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartParams {
    Line(CategoryParams),
    Area(CategoryParams),
    Bar(CategoryParams),
    Scatter(ScatterParams),
    Treemap(HierarchyParams),
    Sunburst(HierarchyParams),
}

impl ChartParams {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ChartParams::Line(_) => "line",
            ChartParams::Area(_) => "area",
            ChartParams::Bar(_) => "bar",
            ChartParams::Scatter(_) => "scatter",
            ChartParams::Treemap(_) => "treemap",
            ChartParams::Sunburst(_) => "sunburst",
        }
    }

    /// Input shape preconditions, checked before any pivoting or assembly.
    pub fn validate(&self) -> Result<()> {
        let empty = match self {
            ChartParams::Line(p) | ChartParams::Area(p) | ChartParams::Bar(p) => p.data.is_empty(),
            ChartParams::Scatter(p) => p.data.is_empty(),
            ChartParams::Treemap(p) | ChartParams::Sunburst(p) => p.data.is_empty(),
        };
        if empty {
            anyhow::bail!("{} chart data cannot be empty", self.kind_name());
        }
        Ok(())
    }
}

/// Parameters for category-axis charts (line, area, bar).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryParams {
    pub data: Vec<TabularRecord>,
    pub category_field: String,
    pub value_field: String,
    #[serde(default)]
    pub series_field: Option<String>,
    /// Stack identifier; series sharing it render as cumulative layers.
    #[serde(default)]
    pub stack: Option<String>,
    #[serde(default)]
    pub smooth: bool,
    #[serde(default)]
    pub show_area: bool,
    #[serde(default = "default_true")]
    pub show_symbol: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterParams {
    pub data: Vec<ScatterPoint>,
    #[serde(default)]
    pub axis_x_title: Option<String>,
    #[serde(default)]
    pub axis_y_title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HierarchyParams {
    pub data: Vec<TreeNode>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutputFormat;

    #[test]
    fn test_deserialize_line_request() {
        let request: ChartRequest = serde_json::from_str(
            r#"{
                "kind": "line",
                "data": [{"time": "2020", "value": 10}],
                "categoryField": "time",
                "valueField": "value",
                "title": "Trend",
                "width": 400,
                "height": 300,
                "outputType": "svg"
            }"#,
        )
        .unwrap();

        assert_eq!(request.title.as_deref(), Some("Trend"));
        assert_eq!(request.options.width, 400);
        assert_eq!(request.options.height, 300);
        assert!(matches!(request.options.format, OutputFormat::Svg));
        let ChartParams::Line(params) = &request.chart else {
            panic!("expected line params");
        };
        assert_eq!(params.category_field, "time");
        assert!(params.show_symbol);
        assert!(!params.show_area);
        assert!(params.series_field.is_none());
    }

    #[test]
    fn test_deserialize_defaults() {
        let request: ChartRequest = serde_json::from_str(
            r#"{
                "kind": "bar",
                "data": [{"c": "A", "v": 1}],
                "categoryField": "c",
                "valueField": "v"
            }"#,
        )
        .unwrap();
        assert_eq!(request.options.width, 800);
        assert_eq!(request.options.height, 600);
        assert!(matches!(request.options.format, OutputFormat::Png));
        assert!(request.title.is_none());
    }

    #[test]
    fn test_deserialize_treemap_request() {
        let request: ChartRequest = serde_json::from_str(
            r#"{
                "kind": "treemap",
                "data": [{"name": "Design", "value": 70, "children": [{"name": "Tech", "value": 20}]}]
            }"#,
        )
        .unwrap();
        let ChartParams::Treemap(params) = &request.chart else {
            panic!("expected treemap params");
        };
        assert_eq!(params.data[0].children.len(), 1);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let result: Result<ChartRequest, _> = serde_json::from_str(
            r#"{"kind": "hologram", "data": []}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_empty_data() {
        let request: ChartRequest = serde_json::from_str(
            r#"{
                "kind": "line",
                "data": [],
                "categoryField": "c",
                "valueField": "v"
            }"#,
        )
        .unwrap();
        let result = request.chart.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot be empty"));
    }
}
