use anyhow::{anyhow, Context, Result};
use image::ImageEncoder;
use plotters::prelude::*;
use tracing::debug;

use crate::graph::draw_chart;
use crate::ir::VisualizationSpec;
use crate::{OutputFormat, RenderOptions};

/// Fixed oversampling factor for raster output. Pixel surfaces are rendered
/// at this multiple of the requested size so PNGs stay crisp on dense
/// displays.
pub const RASTER_OVERSAMPLE: u32 = 3;

/// Raw backend output, before delivery resolution.
#[derive(Debug, Clone)]
pub enum RenderOutput {
    /// Encoded PNG bytes.
    Png(Vec<u8>),
    /// Vector markup text.
    Svg(String),
    /// The validated spec, pretty-printed; no backend was invoked.
    Spec(String),
}

/// Dispatch a visualization spec to the rendering strategy selected by the
/// output format.
///
/// Spec echo is terminal and never touches a drawing surface. The vector and
/// raster paths acquire a surface scoped to this call; it is released on
/// every exit path, including draw failures.
pub fn render(spec: &VisualizationSpec, options: &RenderOptions) -> Result<RenderOutput> {
    debug!(
        format = ?options.format,
        width = options.width,
        height = options.height,
        "dispatching render"
    );
    match options.format {
        OutputFormat::Spec => {
            let text = serde_json::to_string_pretty(spec)
                .context("failed to serialize visualization spec")?;
            Ok(RenderOutput::Spec(text))
        }
        OutputFormat::Svg => render_svg(spec, options).map(RenderOutput::Svg),
        OutputFormat::Png => render_png(spec, options).map(RenderOutput::Png),
    }
}

fn render_svg(spec: &VisualizationSpec, options: &RenderOptions) -> Result<String> {
    let mut markup = String::new();
    {
        let root = SVGBackend::with_string(&mut markup, (options.width, options.height))
            .into_drawing_area();
        draw_chart(&root, spec, options.theme)?;
        root.present()
            .map_err(|e| anyhow!("failed to finalize vector surface: {}", e))?;
    }
    Ok(markup)
}

fn render_png(spec: &VisualizationSpec, options: &RenderOptions) -> Result<Vec<u8>> {
    let width = options.width * RASTER_OVERSAMPLE;
    let height = options.height * RASTER_OVERSAMPLE;
    let mut buffer = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw_chart(&root, spec, options.theme)?;
        root.present()
            .map_err(|e| anyhow!("failed to finalize pixel surface: {}", e))?;
    }
    encode_png(&buffer, width, height)
}

/// Encode a raw RGB buffer as PNG.
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut png_bytes = Vec::new();
    {
        let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
        encoder
            .write_image(buffer, width, height, image::ColorType::Rgb8)
            .context("Failed to encode PNG")?;
    }
    Ok(png_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::assemble_spec;
    use crate::request::ChartParams;
    use crate::Theme;
    use serde_json::json;

    fn line_request_spec() -> VisualizationSpec {
        let params: ChartParams = serde_json::from_value(json!({
            "kind": "line",
            "data": [
                {"time": "2020", "value": 10},
                {"time": "2021", "value": 20},
            ],
            "categoryField": "time",
            "valueField": "value"
        }))
        .unwrap();
        assemble_spec(&params, Some("Trend"))
    }

    fn options(format: OutputFormat, width: u32, height: u32) -> RenderOptions {
        RenderOptions {
            width,
            height,
            theme: Theme::Default,
            format,
        }
    }

    #[test]
    fn test_spec_mode_never_acquires_a_surface() {
        // Dimensions no surface could be created with; spec echo must still
        // succeed because it returns before any backend is touched.
        let spec = line_request_spec();
        let result = render(&spec, &options(OutputFormat::Spec, 0, 0)).unwrap();
        match result {
            RenderOutput::Spec(text) => {
                assert!(text.contains("\"series\""));
                assert!(text.contains("2020"));
            }
            _ => panic!("expected spec output"),
        }
    }

    #[test]
    fn test_spec_mode_is_pretty_printed() {
        let spec = line_request_spec();
        let result = render(&spec, &options(OutputFormat::Spec, 800, 600)).unwrap();
        let RenderOutput::Spec(text) = result else {
            panic!("expected spec output");
        };
        assert!(text.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(parsed.get("series").is_some());
    }

    #[test]
    fn test_svg_mode_produces_vector_markup() {
        let spec = line_request_spec();
        let result = render(&spec, &options(OutputFormat::Svg, 640, 480)).unwrap();
        let RenderOutput::Svg(markup) = result else {
            panic!("expected svg output");
        };
        assert!(markup.contains("<svg"));
        assert!(markup.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_png_mode_produces_oversampled_raster() {
        let spec = line_request_spec();
        let result = render(&spec, &options(OutputFormat::Png, 200, 100)).unwrap();
        let RenderOutput::Png(bytes) = result else {
            panic!("expected png output");
        };
        assert_eq!(&bytes[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 200 * RASTER_OVERSAMPLE);
        assert_eq!(decoded.height(), 100 * RASTER_OVERSAMPLE);
    }

    #[test]
    fn test_dark_theme_renders() {
        let spec = line_request_spec();
        let opts = RenderOptions {
            width: 320,
            height: 240,
            theme: Theme::Dark,
            format: OutputFormat::Svg,
        };
        let result = render(&spec, &opts).unwrap();
        assert!(matches!(result, RenderOutput::Svg(_)));
    }
}
