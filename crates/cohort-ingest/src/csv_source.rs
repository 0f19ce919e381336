//! CSV reading for raw source tables.
//!
//! Source tables are entirely integer-coded: person ids, years, categorical
//! codes, and counts. Every cell is parsed as an optional integer; an empty
//! cell is missing, and a non-numeric cell is a data-quality error that
//! names the file, column, and row.

use std::path::Path;

use csv::ReaderBuilder;
use polars::prelude::{Column, DataFrame};
use tracing::debug;

use crate::error::{IngestError, Result};

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> &str {
    raw.trim().trim_matches('\u{feff}')
}

/// Parse one cell as an optional integer. Stata exports carry integral
/// floats ("3.0"), which are accepted; anything else non-numeric is not.
fn parse_cell(value: &str) -> Option<i64> {
    if let Ok(parsed) = value.parse::<i64>() {
        return Some(parsed);
    }
    let parsed = value.parse::<f64>().ok()?;
    if parsed.fract() == 0.0 {
        Some(parsed as i64)
    } else {
        None
    }
}

/// Read one source CSV into a typed frame of optional-integer columns.
pub fn read_source_csv(path: &Path) -> Result<DataFrame> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|error| IngestError::Csv {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|error| IngestError::Csv {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(IngestError::MissingHeader {
            path: path.to_path_buf(),
        });
    }

    let mut cells: Vec<Vec<Option<i64>>> = vec![Vec::new(); headers.len()];
    for (row_idx, record) in reader.records().enumerate() {
        let record = record.map_err(|error| IngestError::Csv {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
        for (col_idx, header) in headers.iter().enumerate() {
            let value = normalize_cell(record.get(col_idx).unwrap_or(""));
            let parsed = if value.is_empty() {
                None
            } else {
                match parse_cell(value) {
                    Some(parsed) => Some(parsed),
                    None => {
                        return Err(IngestError::InvalidNumeric {
                            path: path.to_path_buf(),
                            column: header.clone(),
                            // header line is row 1
                            row: row_idx + 2,
                            value: value.to_string(),
                        });
                    }
                }
            };
            cells[col_idx].push(parsed);
        }
    }
    if cells.first().is_none_or(Vec::is_empty) {
        return Err(IngestError::Empty {
            path: path.to_path_buf(),
        });
    }

    let columns: Vec<Column> = headers
        .iter()
        .zip(cells)
        .map(|(name, values)| Column::new(name.as_str().into(), values))
        .collect();
    let frame = DataFrame::new(columns)?;
    debug!(path = %path.display(), rows = frame.height(), "loaded source table");
    Ok(frame)
}
