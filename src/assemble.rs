use crate::ir::{Axis, SeriesSpec, VisualizationSpec};
use crate::request::{CategoryParams, ChartParams, HierarchyParams, ScatterParams};
use crate::transform::pivot_records;

/// Assemble the backend-neutral visualization spec for a request.
///
/// Cartesian kinds run the category/series pivot; hierarchical kinds attach
/// their tree payload directly.
pub fn assemble_spec(chart: &ChartParams, title: Option<&str>) -> VisualizationSpec {
    match chart {
        // Area is a line chart with the fill flag forced on, not its own
        // code path; the caller-supplied show_area is ignored.
        ChartParams::Line(params) => line_spec(params, title, params.show_area),
        ChartParams::Area(params) => line_spec(params, title, true),
        ChartParams::Bar(params) => bar_spec(params, title),
        ChartParams::Scatter(params) => scatter_spec(params, title),
        ChartParams::Treemap(params) => hierarchy_spec(params, title, true),
        ChartParams::Sunburst(params) => hierarchy_spec(params, title, false),
    }
}

fn line_spec(params: &CategoryParams, title: Option<&str>, area: bool) -> VisualizationSpec {
    let table = pivot_records(
        &params.data,
        &params.category_field,
        &params.value_field,
        params.series_field.as_deref(),
    );

    let legend = legend_entries(&table);
    let series = table
        .series
        .into_iter()
        .map(|s| SeriesSpec::Line {
            name: s.name,
            values: s.values,
            smooth: params.smooth,
            show_symbol: params.show_symbol,
            area,
            stack: params.stack.clone(),
        })
        .collect();

    cartesian(title, table.categories, legend, series)
}

fn bar_spec(params: &CategoryParams, title: Option<&str>) -> VisualizationSpec {
    let table = pivot_records(
        &params.data,
        &params.category_field,
        &params.value_field,
        params.series_field.as_deref(),
    );

    let legend = legend_entries(&table);
    let series = table
        .series
        .into_iter()
        .map(|s| SeriesSpec::Bar {
            name: s.name,
            values: s.values,
            stack: params.stack.clone(),
        })
        .collect();

    cartesian(title, table.categories, legend, series)
}

fn scatter_spec(params: &ScatterParams, title: Option<&str>) -> VisualizationSpec {
    VisualizationSpec {
        title: title.map(str::to_owned),
        x_axis: Some(Axis::Value {
            name: params.axis_x_title.clone(),
        }),
        y_axis: Some(Axis::Value {
            name: params.axis_y_title.clone(),
        }),
        legend: Vec::new(),
        series: vec![SeriesSpec::Scatter {
            points: params.data.iter().map(|p| [p.x, p.y]).collect(),
        }],
    }
}

fn hierarchy_spec(params: &HierarchyParams, title: Option<&str>, treemap: bool) -> VisualizationSpec {
    let series = if treemap {
        SeriesSpec::Treemap {
            data: params.data.clone(),
        }
    } else {
        SeriesSpec::Sunburst {
            data: params.data.clone(),
        }
    };

    VisualizationSpec {
        title: title.map(str::to_owned),
        x_axis: None,
        y_axis: None,
        legend: Vec::new(),
        series: vec![series],
    }
}

fn legend_entries(table: &crate::transform::SeriesTable) -> Vec<String> {
    table.series.iter().filter_map(|s| s.name.clone()).collect()
}

fn cartesian(
    title: Option<&str>,
    categories: Vec<String>,
    legend: Vec<String>,
    series: Vec<SeriesSpec>,
) -> VisualizationSpec {
    VisualizationSpec {
        title: title.map(str::to_owned),
        x_axis: Some(Axis::Category { labels: categories }),
        y_axis: Some(Axis::Value { name: None }),
        legend,
        series,
    }
}
