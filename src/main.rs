use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use chartforge::request::{ChartParams, ChartRequest};
use chartforge::{csv_reader, runtime};

#[derive(Parser, Debug)]
#[command(name = "chartforge")]
#[command(about = "Generate charts from JSON chart requests", long_about = None)]
struct Args {
    /// Path to a JSON chart request; reads stdin when omitted
    request: Option<PathBuf>,

    /// CSV file whose rows replace the request's tabular data
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    chartforge::init();
    let args = Args::parse();

    let text = match &args.request {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read request from stdin")?;
            buffer
        }
    };

    let mut request: ChartRequest =
        serde_json::from_str(&text).context("Failed to parse chart request")?;

    if let Some(path) = &args.csv {
        let records = csv_reader::read_records_from_path(path)?;
        match &mut request.chart {
            ChartParams::Line(params) | ChartParams::Area(params) | ChartParams::Bar(params) => {
                params.data = records;
            }
            _ => anyhow::bail!("--csv only applies to category charts (line, area, bar)"),
        }
    }

    let response = runtime::generate_chart(request).context("Failed to generate chart")?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer(&mut handle, &response).context("Failed to write response")?;
    handle.write_all(b"\n").context("Failed to write response")?;
    handle.flush().context("Failed to flush stdout")?;

    Ok(())
}
