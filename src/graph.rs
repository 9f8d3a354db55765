use anyhow::{anyhow, bail, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;

use crate::data::TreeNode;
use crate::ir::{Axis, SeriesSpec, VisualizationSpec};
use crate::Theme;

/// Categorical color cycle (d3 category10).
const CATEGORY10: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0x8c, 0x56, 0x4b),
    RGBColor(0xe3, 0x77, 0xc2),
    RGBColor(0x7f, 0x7f, 0x7f),
    RGBColor(0xbc, 0xbd, 0x22),
    RGBColor(0x17, 0xbe, 0xcf),
];

fn series_color(index: usize) -> RGBColor {
    CATEGORY10[index % CATEGORY10.len()]
}

struct ThemeColors {
    background: RGBColor,
    foreground: RGBColor,
}

fn theme_colors(theme: Theme) -> ThemeColors {
    match theme {
        Theme::Default => ThemeColors {
            background: WHITE,
            foreground: RGBColor(0x33, 0x33, 0x33),
        },
        Theme::Dark => ThemeColors {
            background: RGBColor(0x10, 0x14, 0x1c),
            foreground: RGBColor(0xdd, 0xdd, 0xdd),
        },
    }
}

/// Map a drawing-layer error into an anyhow error with a stable message.
fn draw_err<E: std::fmt::Display>(what: &'static str) -> impl FnOnce(E) -> anyhow::Error {
    move |e| anyhow!("{}: {}", what, e)
}

/// Draw a complete visualization spec onto a drawing area.
///
/// Works against any plotters backend; the caller owns surface acquisition
/// and release.
pub fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &VisualizationSpec,
    theme: Theme,
) -> Result<()> {
    let colors = theme_colors(theme);
    root.fill(&colors.background)
        .map_err(draw_err("failed to fill background"))?;

    match spec.series.first() {
        None => bail!("visualization spec has no series"),
        Some(SeriesSpec::Treemap { data }) => {
            draw_treemap(root, data, spec.title.as_deref(), &colors)
        }
        Some(SeriesSpec::Sunburst { data }) => {
            draw_sunburst(root, data, spec.title.as_deref(), &colors)
        }
        Some(SeriesSpec::Scatter { .. }) => draw_scatter(root, spec, &colors),
        Some(_) => draw_cartesian(root, spec, &colors),
    }
}

// =============================================================================
// Category-axis charts (line, area, bar)
// =============================================================================

/// Per-series drawable values after stack resolution: for each category,
/// the (base, top) band or `None` where the combination is missing.
struct ResolvedSeries<'a> {
    spec: &'a SeriesSpec,
    color: RGBColor,
    bands: Vec<Option<(f64, f64)>>,
}

/// Resolve stacking: series sharing a stack tag accumulate per-category
/// offsets in series order; nulls contribute nothing. Distinct stack groups
/// do not interact.
fn resolve_stacks(series: &[SeriesSpec], n: usize) -> Vec<ResolvedSeries<'_>> {
    let mut offsets: Vec<(String, Vec<f64>)> = Vec::new();
    let mut resolved = Vec::with_capacity(series.len());

    for (index, s) in series.iter().enumerate() {
        let values = match s {
            SeriesSpec::Line { values, .. } | SeriesSpec::Bar { values, .. } => values,
            _ => continue,
        };

        let bands = match s.stack() {
            Some(tag) => {
                let group = match offsets.iter().position(|(t, _)| t == tag) {
                    Some(p) => p,
                    None => {
                        offsets.push((tag.to_string(), vec![0.0; n]));
                        offsets.len() - 1
                    }
                };
                (0..n)
                    .map(|i| {
                        values.get(i).copied().flatten().map(|v| {
                            let base = offsets[group].1[i];
                            offsets[group].1[i] = base + v;
                            (base, base + v)
                        })
                    })
                    .collect()
            }
            None => (0..n)
                .map(|i| values.get(i).copied().flatten().map(|v| (0.0, v)))
                .collect(),
        };

        resolved.push(ResolvedSeries {
            spec: s,
            color: series_color(index),
            bands,
        });
    }

    resolved
}

/// Dodge column per bar series: series in the same stack group share a
/// column, every unstacked series gets its own.
fn bar_columns(resolved: &[ResolvedSeries<'_>]) -> (Vec<usize>, usize) {
    let mut keys: Vec<Option<String>> = Vec::new();
    let mut column_of = Vec::with_capacity(resolved.len());

    for rs in resolved {
        if !matches!(rs.spec, SeriesSpec::Bar { .. }) {
            column_of.push(0);
            continue;
        }
        let column = match rs.spec.stack() {
            Some(tag) => match keys.iter().position(|k| k.as_deref() == Some(tag)) {
                Some(p) => p,
                None => {
                    keys.push(Some(tag.to_string()));
                    keys.len() - 1
                }
            },
            None => {
                keys.push(None);
                keys.len() - 1
            }
        };
        column_of.push(column);
    }

    (column_of, keys.len().max(1))
}

fn padded_range(min: f64, max: f64) -> Range<f64> {
    if min == max {
        (min - 1.0)..(max + 1.0)
    } else {
        let padding = (max - min) * 0.05;
        (min - padding)..(max + padding)
    }
}

fn draw_cartesian<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &VisualizationSpec,
    colors: &ThemeColors,
) -> Result<()> {
    let labels = match &spec.x_axis {
        Some(Axis::Category { labels }) => labels.clone(),
        _ => bail!("category chart requires a category x axis"),
    };
    let n = labels.len();
    if n == 0 {
        bail!("category chart has no categories");
    }

    let resolved = resolve_stacks(&spec.series, n);
    let has_bar = resolved
        .iter()
        .any(|rs| matches!(rs.spec, SeriesSpec::Bar { .. }));
    let has_area = resolved
        .iter()
        .any(|rs| matches!(rs.spec, SeriesSpec::Line { area: true, .. }));

    // Global y range over all resolved bands; bars and areas anchor at 0.
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for rs in &resolved {
        for band in rs.bands.iter().flatten() {
            y_min = y_min.min(band.0).min(band.1);
            y_max = y_max.max(band.0).max(band.1);
        }
    }
    if !y_min.is_finite() {
        // Every cell was null; draw an empty frame rather than failing.
        y_min = 0.0;
        y_max = 1.0;
    }
    if has_bar || has_area {
        y_min = y_min.min(0.0);
        y_max = y_max.max(0.0);
    }

    let x_range = if has_bar {
        0.0..(n as f64)
    } else {
        -0.5..(n as f64 - 0.5)
    };

    let mut chart = ChartBuilder::on(root)
        .margin(10)
        .caption(
            spec.title.as_deref().unwrap_or(""),
            ("sans-serif", 20).into_font().color(&colors.foreground),
        )
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, padded_range(y_min, y_max))
        .map_err(draw_err("failed to build chart"))?;

    let label_for = move |x: &f64| {
        let idx = if has_bar { *x as usize } else { x.round() as usize };
        labels.get(idx).cloned().unwrap_or_default()
    };
    chart
        .configure_mesh()
        .x_labels(n)
        .x_label_formatter(&label_for)
        .label_style(("sans-serif", 12).into_font().color(&colors.foreground))
        .axis_style(&colors.foreground)
        .light_line_style(&colors.foreground.mix(0.1))
        .bold_line_style(&colors.foreground.mix(0.2))
        .draw()
        .map_err(draw_err("failed to draw mesh"))?;

    let (column_of, ncols) = bar_columns(&resolved);
    let bar_width = 0.8 / ncols as f64;
    let line_x = |i: usize| {
        if has_bar {
            i as f64 + 0.5
        } else {
            i as f64
        }
    };

    // Area fills first, in reverse series order so cumulative stacks read as
    // bands instead of the last fill covering the others.
    for rs in resolved.iter().rev() {
        if !matches!(rs.spec, SeriesSpec::Line { area: true, .. }) {
            continue;
        }
        for segment in contiguous_segments(&rs.bands) {
            let points: Vec<(f64, f64)> = segment
                .iter()
                .map(|&(i, (_, top))| (line_x(i), top))
                .collect();
            chart
                .draw_series(AreaSeries::new(points, 0.0, &rs.color.mix(0.25)))
                .map_err(draw_err("failed to draw area fill"))?;
        }
    }

    for (series_idx, rs) in resolved.iter().enumerate() {
        match rs.spec {
            SeriesSpec::Bar { .. } => {
                let column = column_of[series_idx];
                let x_offset = (column as f64 - (ncols as f64 - 1.0) / 2.0) * bar_width;
                let color = rs.color;
                chart
                    .draw_series(rs.bands.iter().copied().enumerate().filter_map(|(i, band)| {
                        band.map(|(base, top)| {
                            let x_center = i as f64 + 0.5 + x_offset;
                            Rectangle::new(
                                [
                                    (x_center - bar_width / 2.0, base),
                                    (x_center + bar_width / 2.0, top),
                                ],
                                color.filled(),
                            )
                        })
                    }))
                    .map_err(draw_err("failed to draw bar series"))?
                    .label_if(rs.spec.name(), color);
            }
            SeriesSpec::Line { show_symbol, .. } => {
                let color = rs.color;
                let mut labeled = false;
                for segment in contiguous_segments(&rs.bands) {
                    let points: Vec<(f64, f64)> = segment
                        .iter()
                        .map(|&(i, (_, top))| (line_x(i), top))
                        .collect();
                    let anno = chart
                        .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
                        .map_err(draw_err("failed to draw line series"))?;
                    if !labeled {
                        anno.label_if(rs.spec.name(), color);
                        labeled = true;
                    }
                    if *show_symbol {
                        chart
                            .draw_series(
                                points
                                    .iter()
                                    .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
                            )
                            .map_err(draw_err("failed to draw symbols"))?;
                    }
                }
            }
            _ => {}
        }
    }

    if !spec.legend.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerMiddle)
            .background_style(&colors.background.mix(0.8))
            .border_style(&colors.foreground.mix(0.4))
            .label_font(("sans-serif", 12).into_font().color(&colors.foreground))
            .draw()
            .map_err(draw_err("failed to draw legend"))?;
    }

    Ok(())
}

/// Split a band row into runs of consecutive present values, keeping the
/// category index of each point. Nulls break line segments.
fn contiguous_segments(bands: &[Option<(f64, f64)>]) -> Vec<Vec<(usize, (f64, f64))>> {
    let mut segments = Vec::new();
    let mut current: Vec<(usize, (f64, f64))> = Vec::new();
    for (i, band) in bands.iter().enumerate() {
        match band {
            Some(b) => current.push((i, *b)),
            None => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Attach a legend entry to a series annotation when the series is named.
trait LabelIf {
    fn label_if(&mut self, name: Option<&str>, color: RGBColor);
}

impl<DB: DrawingBackend> LabelIf for plotters::chart::SeriesAnno<'_, DB> {
    fn label_if(&mut self, name: Option<&str>, color: RGBColor) {
        if let Some(name) = name {
            self.label(name).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2))
            });
        }
    }
}

// =============================================================================
// Scatter
// =============================================================================

fn draw_scatter<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &VisualizationSpec,
    colors: &ThemeColors,
) -> Result<()> {
    let points = match spec.series.first() {
        Some(SeriesSpec::Scatter { points }) => points,
        _ => bail!("scatter chart requires a scatter series"),
    };

    let x_min = points.iter().map(|p| p[0]).fold(f64::INFINITY, f64::min);
    let x_max = points.iter().map(|p| p[0]).fold(f64::NEG_INFINITY, f64::max);
    let y_min = points.iter().map(|p| p[1]).fold(f64::INFINITY, f64::min);
    let y_max = points.iter().map(|p| p[1]).fold(f64::NEG_INFINITY, f64::max);
    if !x_min.is_finite() || !y_min.is_finite() {
        bail!("scatter chart has no points");
    }

    let axis_name = |axis: &Option<Axis>| match axis {
        Some(Axis::Value { name: Some(name) }) => name.clone(),
        _ => String::new(),
    };

    let mut chart = ChartBuilder::on(root)
        .margin(10)
        .caption(
            spec.title.as_deref().unwrap_or(""),
            ("sans-serif", 20).into_font().color(&colors.foreground),
        )
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(padded_range(x_min, x_max), padded_range(y_min, y_max))
        .map_err(draw_err("failed to build chart"))?;

    chart
        .configure_mesh()
        .x_desc(axis_name(&spec.x_axis))
        .y_desc(axis_name(&spec.y_axis))
        .label_style(("sans-serif", 12).into_font().color(&colors.foreground))
        .axis_style(&colors.foreground)
        .light_line_style(&colors.foreground.mix(0.1))
        .bold_line_style(&colors.foreground.mix(0.2))
        .draw()
        .map_err(draw_err("failed to draw mesh"))?;

    let color = series_color(0);
    chart
        .draw_series(
            points
                .iter()
                .map(|&[x, y]| Circle::new((x, y), 4, color.filled())),
        )
        .map_err(draw_err("failed to draw scatter series"))?;

    Ok(())
}

// =============================================================================
// Hierarchy charts (treemap, sunburst)
// =============================================================================

struct TreemapCell {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    name: String,
    color: usize,
}

/// Slice-and-dice layout: alternate the split axis per depth, partitioning
/// each rectangle proportionally to node weight. Leaves become cells,
/// colored by their top-level ancestor.
fn layout_treemap(
    nodes: &[TreeNode],
    rect: (f64, f64, f64, f64),
    depth: usize,
    ancestor: Option<usize>,
    out: &mut Vec<TreemapCell>,
) {
    let total: f64 = nodes.iter().map(TreeNode::weight).sum();
    if total <= 0.0 {
        return;
    }

    let (x0, y0, x1, y1) = rect;
    let horizontal = depth % 2 == 0;
    let mut offset = 0.0;

    for (i, node) in nodes.iter().enumerate() {
        let fraction = node.weight() / total;
        if fraction <= 0.0 {
            continue;
        }
        let cell = if horizontal {
            let w = x1 - x0;
            (x0 + w * offset, y0, x0 + w * (offset + fraction), y1)
        } else {
            let h = y1 - y0;
            (x0, y0 + h * offset, x1, y0 + h * (offset + fraction))
        };
        offset += fraction;

        let color = ancestor.unwrap_or(i);
        if node.children.is_empty() {
            out.push(TreemapCell {
                x0: cell.0,
                y0: cell.1,
                x1: cell.2,
                y1: cell.3,
                name: node.name.clone(),
                color,
            });
        } else {
            layout_treemap(&node.children, cell, depth + 1, Some(color), out);
        }
    }
}

/// Reserve the caption strip at the top when a title is present.
fn title_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    title: Option<&str>,
    colors: &ThemeColors,
) -> Result<DrawingArea<DB, Shift>> {
    match title {
        Some(text) => root
            .titled(
                text,
                ("sans-serif", 20).into_font().color(&colors.foreground),
            )
            .map_err(draw_err("failed to draw title")),
        None => Ok(root.clone()),
    }
}

fn draw_treemap<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    data: &[TreeNode],
    title: Option<&str>,
    colors: &ThemeColors,
) -> Result<()> {
    let area = title_area(root, title, colors)?;
    let (width, height) = area.dim_in_pixel();
    let margin = 8.0;
    let rect = (
        margin,
        margin,
        width as f64 - margin,
        height as f64 - margin,
    );

    let mut cells = Vec::new();
    layout_treemap(data, rect, 0, None, &mut cells);
    if cells.is_empty() {
        bail!("treemap has no nodes with positive weight");
    }

    for cell in &cells {
        let tl = (cell.x0 as i32, cell.y0 as i32);
        let br = (cell.x1 as i32, cell.y1 as i32);
        let color = series_color(cell.color);
        area.draw(&Rectangle::new([tl, br], color.filled()))
            .map_err(draw_err("failed to draw treemap cell"))?;
        area.draw(&Rectangle::new([tl, br], colors.background.stroke_width(1)))
            .map_err(draw_err("failed to draw treemap border"))?;

        // Label only cells with room for readable text.
        if cell.x1 - cell.x0 > 40.0 && cell.y1 - cell.y0 > 16.0 {
            area.draw(&Text::new(
                cell.name.clone(),
                (tl.0 + 4, tl.1 + 4),
                ("sans-serif", 12).into_font().color(&WHITE),
            ))
            .map_err(draw_err("failed to draw treemap label"))?;
        }
    }

    Ok(())
}

fn tree_depth(nodes: &[TreeNode]) -> usize {
    nodes
        .iter()
        .map(|n| 1 + tree_depth(&n.children))
        .max()
        .unwrap_or(0)
}

fn draw_sunburst<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    data: &[TreeNode],
    title: Option<&str>,
    colors: &ThemeColors,
) -> Result<()> {
    let area = title_area(root, title, colors)?;
    let (width, height) = area.dim_in_pixel();
    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;
    let max_radius = (width.min(height) as f64 / 2.0) * 0.9;
    let inner_radius = max_radius * 0.15;

    let depth = tree_depth(data);
    if depth == 0 {
        bail!("sunburst has no nodes");
    }
    let ring = (max_radius - inner_radius) / depth as f64;

    draw_ring(
        &area,
        data,
        (cx, cy),
        inner_radius,
        ring,
        0,
        (-std::f64::consts::FRAC_PI_2, 3.0 * std::f64::consts::FRAC_PI_2),
        None,
        colors,
    )
}

/// Draw one hierarchy level as ring segments, recursing into children within
/// each segment's angular span.
#[allow(clippy::too_many_arguments)]
fn draw_ring<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    nodes: &[TreeNode],
    center: (f64, f64),
    inner_radius: f64,
    ring: f64,
    level: usize,
    span: (f64, f64),
    ancestor: Option<usize>,
    colors: &ThemeColors,
) -> Result<()> {
    let total: f64 = nodes.iter().map(TreeNode::weight).sum();
    if total <= 0.0 {
        return Ok(());
    }

    let (start, end) = span;
    let mut angle = start;
    let r0 = inner_radius + ring * level as f64;
    let r1 = r0 + ring;

    for (i, node) in nodes.iter().enumerate() {
        let fraction = node.weight() / total;
        if fraction <= 0.0 {
            continue;
        }
        let a0 = angle;
        let a1 = angle + (end - start) * fraction;
        angle = a1;

        let color_index = ancestor.unwrap_or(i);
        let points = ring_segment(center, r0, r1, a0, a1);
        area.draw(&Polygon::new(
            points.clone(),
            series_color(color_index).filled(),
        ))
        .map_err(draw_err("failed to draw sunburst segment"))?;
        area.draw(&PathElement::new(points, colors.background.stroke_width(1)))
            .map_err(draw_err("failed to draw sunburst border"))?;

        if !node.children.is_empty() {
            draw_ring(
                area,
                &node.children,
                center,
                inner_radius,
                ring,
                level + 1,
                (a0, a1),
                Some(color_index),
                colors,
            )?;
        }
    }

    Ok(())
}

/// Approximate an annular segment as a closed polygon in pixel coordinates.
fn ring_segment(center: (f64, f64), r0: f64, r1: f64, a0: f64, a1: f64) -> Vec<(i32, i32)> {
    let steps = (((a1 - a0).abs() / 0.05).ceil() as usize).max(2);
    let (cx, cy) = center;
    let at = |r: f64, a: f64| ((cx + r * a.cos()) as i32, (cy + r * a.sin()) as i32);

    let mut points = Vec::with_capacity(steps * 2 + 2);
    for i in 0..=steps {
        let a = a0 + (a1 - a0) * i as f64 / steps as f64;
        points.push(at(r1, a));
    }
    for i in (0..=steps).rev() {
        let a = a0 + (a1 - a0) * i as f64 / steps as f64;
        points.push(at(r0, a));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_stacks_accumulates_shared_tag() {
        let series = vec![
            SeriesSpec::Line {
                name: Some("a".to_string()),
                values: vec![Some(1.0), Some(2.0)],
                smooth: false,
                show_symbol: false,
                area: false,
                stack: Some("total".to_string()),
            },
            SeriesSpec::Line {
                name: Some("b".to_string()),
                values: vec![Some(10.0), None],
                smooth: false,
                show_symbol: false,
                area: false,
                stack: Some("total".to_string()),
            },
        ];
        let resolved = resolve_stacks(&series, 2);
        assert_eq!(resolved[0].bands, vec![Some((0.0, 1.0)), Some((0.0, 2.0))]);
        // Nulls leave the running offset untouched.
        assert_eq!(resolved[1].bands, vec![Some((1.0, 11.0)), None]);
    }

    #[test]
    fn test_resolve_stacks_distinct_groups_do_not_interact() {
        let series = vec![
            SeriesSpec::Bar {
                name: None,
                values: vec![Some(5.0)],
                stack: Some("left".to_string()),
            },
            SeriesSpec::Bar {
                name: None,
                values: vec![Some(7.0)],
                stack: Some("right".to_string()),
            },
        ];
        let resolved = resolve_stacks(&series, 1);
        assert_eq!(resolved[0].bands, vec![Some((0.0, 5.0))]);
        assert_eq!(resolved[1].bands, vec![Some((0.0, 7.0))]);
    }

    #[test]
    fn test_bar_columns_share_stack_column() {
        let series = vec![
            SeriesSpec::Bar {
                name: None,
                values: vec![],
                stack: Some("s".to_string()),
            },
            SeriesSpec::Bar {
                name: None,
                values: vec![],
                stack: Some("s".to_string()),
            },
            SeriesSpec::Bar {
                name: None,
                values: vec![],
                stack: None,
            },
        ];
        let resolved = resolve_stacks(&series, 0);
        let (columns, ncols) = bar_columns(&resolved);
        assert_eq!(columns, vec![0, 0, 1]);
        assert_eq!(ncols, 2);
    }

    #[test]
    fn test_contiguous_segments_split_on_null() {
        let bands = vec![
            Some((0.0, 1.0)),
            None,
            Some((0.0, 2.0)),
            Some((0.0, 3.0)),
        ];
        let segments = contiguous_segments(&bands);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], vec![(0, (0.0, 1.0))]);
        assert_eq!(segments[1], vec![(2, (0.0, 2.0)), (3, (0.0, 3.0))]);
    }

    #[test]
    fn test_layout_treemap_partitions_area() {
        let nodes: Vec<TreeNode> = serde_json::from_value(json!([
            {"name": "a", "value": 75.0},
            {"name": "b", "value": 25.0},
        ]))
        .unwrap();
        let mut cells = Vec::new();
        layout_treemap(&nodes, (0.0, 0.0, 100.0, 100.0), 0, None, &mut cells);
        assert_eq!(cells.len(), 2);
        // First split is horizontal and proportional to weight.
        assert_eq!(cells[0].x1 - cells[0].x0, 75.0);
        assert_eq!(cells[1].x1 - cells[1].x0, 25.0);
        assert_eq!(cells[1].x0, 75.0);
    }

    #[test]
    fn test_ring_segment_is_closed_polygon() {
        let points = ring_segment((50.0, 50.0), 10.0, 20.0, 0.0, std::f64::consts::PI);
        assert!(points.len() >= 6);
        // Outer arc first point sits at radius 20 from center.
        let (x, y) = points[0];
        let d = (((x - 50).pow(2) + (y - 50).pow(2)) as f64).sqrt();
        assert!((d - 20.0).abs() < 1.5);
    }

    #[test]
    fn test_tree_depth() {
        let nodes: Vec<TreeNode> = serde_json::from_value(json!([
            {"name": "a", "children": [{"name": "b", "children": [{"name": "c", "value": 1.0}]}]},
            {"name": "d", "value": 2.0},
        ]))
        .unwrap();
        assert_eq!(tree_depth(&nodes), 3);
    }
}
