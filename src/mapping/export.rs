//! Dataset export as pretty JSON or CSV

use crate::mapping::types::{FieldMapping, StandardizedRecord};
use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Write;

/// Serialize the whole dataset as pretty-printed JSON
pub fn to_json_pretty(records: &[StandardizedRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).context("Failed to serialize dataset")
}

/// Column names for export: selected standard names, in mapping order, each once
pub fn csv_header(mappings: &[FieldMapping]) -> Vec<&str> {
    let mut header: Vec<&str> = Vec::new();
    for mapping in mappings.iter().filter(|m| m.is_selected) {
        if !header.contains(&mapping.standard_name.as_str()) {
            header.push(&mapping.standard_name);
        }
    }
    header
}

/// Write the dataset as CSV.
///
/// Cells are quoted only when they contain a comma, quote or line break.
/// Null and missing values become empty cells.
pub fn write_csv<W: Write>(
    writer: W,
    records: &[StandardizedRecord],
    mappings: &[FieldMapping],
) -> Result<()> {
    let header = csv_header(mappings);
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer);

    csv_writer
        .write_record(&header)
        .context("Failed to write CSV header")?;

    for record in records {
        let row = header.iter().map(|name| cell_text(record.get(*name)));
        csv_writer
            .write_record(row)
            .context("Failed to write CSV row")?;
    }

    csv_writer.flush().context("Failed to flush CSV writer")
}

/// Render the dataset as a CSV string
pub fn to_csv(records: &[StandardizedRecord], mappings: &[FieldMapping]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, records, mappings)?;
    String::from_utf8(buffer).context("CSV output was not valid UTF-8")
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
