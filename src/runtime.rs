// Chart generation pipeline: assemble -> render -> deliver -> encode

use anyhow::{Context, Result};
use tracing::debug;

use crate::assemble::assemble_spec;
use crate::delivery::{self, ObjectStoreConfig};
use crate::render::{self, RenderOutput};
use crate::request::ChartRequest;
use crate::response::{self, ChartResponse};

/// Generate a chart for the given request, resolving raster delivery
/// against the environment-driven object store configuration.
pub fn generate_chart(request: ChartRequest) -> Result<ChartResponse> {
    let config = ObjectStoreConfig::from_env();
    generate_chart_with_store(request, config.as_ref())
}

/// Generate a chart with an explicit store configuration (`None` forces
/// inline delivery for raster output).
pub fn generate_chart_with_store(
    request: ChartRequest,
    store: Option<&ObjectStoreConfig>,
) -> Result<ChartResponse> {
    request.chart.validate()?;
    debug!(kind = request.chart.kind_name(), "generating chart");

    let spec = assemble_spec(&request.chart, request.title.as_deref());
    let output = render::render(&spec, &request.options).context("chart rendering failed")?;

    match output {
        RenderOutput::Svg(text) | RenderOutput::Spec(text) => Ok(response::encode_text(text)),
        RenderOutput::Png(bytes) => {
            let artifact = delivery::resolve(&bytes, store)?;
            Ok(response::encode_artifact(artifact))
        }
    }
}
