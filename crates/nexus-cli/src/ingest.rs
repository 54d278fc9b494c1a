//! Reading raw records from JSON and CSV files.
//!
//! JSON input is a single object or an array of objects. CSV input has a
//! header row; every non-empty cell becomes a text value and empty cells
//! become the absent marker. Numeric text is coerced later by the pipeline.

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::ReaderBuilder;
use nexus_model::{RawRecord, RecordValue};
use serde::Deserialize;
use tracing::{debug, info};

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    /// Picks the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonPayload {
    Many(Vec<RawRecord>),
    One(RawRecord),
}

/// Parses a JSON object or array of objects.
pub fn parse_json(content: &str) -> Result<Vec<RawRecord>> {
    let payload: JsonPayload =
        serde_json::from_str(content).context("expected a JSON object or an array of objects")?;
    Ok(match payload {
        JsonPayload::Many(records) => records,
        JsonPayload::One(record) => vec![record],
    })
}

/// Parses CSV with a header row.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .context("read csv headers")?
        .iter()
        .map(|header| header.trim_matches('\u{feff}').to_string())
        .collect();

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row.with_context(|| format!("read csv row {}", index + 1))?;
        let record: RawRecord = headers
            .iter()
            .zip(row.iter())
            .map(|(header, cell)| (header.clone(), cell_value(cell)))
            .collect();
        records.push(record);
    }
    Ok(records)
}

fn cell_value(cell: &str) -> RecordValue {
    if cell.is_empty() {
        RecordValue::Absent
    } else {
        RecordValue::from(cell)
    }
}

/// Reads every record in `path`.
///
/// `format` overrides detection by extension.
pub fn read_records(path: &Path, format: Option<InputFormat>) -> Result<Vec<RawRecord>> {
    let Some(format) = format.or_else(|| InputFormat::from_path(path)) else {
        bail!(
            "cannot tell the format of {}; use a .json or .csv extension or pass --format",
            path.display()
        );
    };

    let records = match format {
        InputFormat::Json => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("read input: {}", path.display()))?;
            parse_json(&content).with_context(|| format!("parse json: {}", path.display()))?
        }
        InputFormat::Csv => {
            let file = fs::File::open(path)
                .with_context(|| format!("open input: {}", path.display()))?;
            parse_csv(file).with_context(|| format!("parse csv: {}", path.display()))?
        }
    };
    info!(path = %path.display(), record_count = records.len(), "read input records");
    Ok(records)
}

/// Rejects the batch if any record lacks one of `required`.
///
/// A field counts as missing when it is absent, `null`, or blank text.
pub fn validate_required(records: &[RawRecord], required: &[String]) -> Result<()> {
    let mut problems = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let missing: Vec<&str> = required
            .iter()
            .map(String::as_str)
            .filter(|field| is_blank(record.present(field)))
            .collect();
        if !missing.is_empty() {
            debug!(index, ?missing, "record failed validation");
            problems.push(format!("record {}: missing {}", index + 1, missing.join(", ")));
        }
    }
    if problems.is_empty() {
        return Ok(());
    }
    bail!("{} invalid record(s): {}", problems.len(), problems.join("; "))
}

fn is_blank(value: Option<&RecordValue>) -> bool {
    match value {
        None => true,
        Some(RecordValue::Text(text)) => text.trim().is_empty(),
        Some(_) => false,
    }
}
