use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::path::Path;

use crate::data::TabularRecord;

/// Read CSV rows as tabular records, keyed by the header row.
/// Numeric cells become numbers; everything else stays a string.
pub fn read_records_from_path(path: &Path) -> Result<Vec<TabularRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open CSV file {}", path.display()))?;
    read_records(&mut reader)
}

pub fn read_records<R: std::io::Read>(reader: &mut csv::Reader<R>) -> Result<Vec<TabularRecord>> {
    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("Failed to read CSV row {}", row_idx + 1))?;
        let mut record = TabularRecord::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            record.insert(header.clone(), cell_value(cell));
        }
        records.push(record);
    }

    if records.is_empty() {
        bail!("CSV input contains no data rows");
    }

    Ok(records)
}

fn cell_value(cell: &str) -> Value {
    cell.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(cell.to_string()))
}
