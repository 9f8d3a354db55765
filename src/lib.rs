// Library exports for chartforge

pub mod assemble;
pub mod csv_reader;
pub mod data;
pub mod delivery;
pub mod graph;
pub mod ir;
pub mod render;
pub mod request;
pub mod response;
pub mod runtime;
pub mod sign;
pub mod transform;

use serde::Deserialize;
use std::sync::Once;

/// Output mode of a chart-generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum OutputFormat {
    /// Rendered raster image.
    #[serde(rename = "png")]
    #[default]
    Png,
    /// Vector markup text.
    #[serde(rename = "svg")]
    Svg,
    /// The validated visualization spec, echoed without rendering.
    #[serde(rename = "spec")]
    Spec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,
    Dark,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderOptions {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default, rename = "outputType")]
    pub format: OutputFormat,
}

fn default_width() -> u32 {
    800
}
fn default_height() -> u32 {
    600
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            theme: Theme::Default,
            format: OutputFormat::Png,
        }
    }
}

static INIT: Once = Once::new();

/// One-time process setup, to be invoked by the host before the first
/// render. Installs the global tracing subscriber; repeated calls are
/// no-ops. Rendering fonts are discovered lazily by the plotters font
/// runtime and need no registration here.
pub fn init() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    });
}
