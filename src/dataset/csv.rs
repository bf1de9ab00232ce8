//! Minimal RFC 4180 CSV reading.
//!
//! Handles quoted fields, doubled quotes, embedded newlines and CRLF line
//! endings. Empty cells, quoted or not, are read as absent values.

use crate::dataset::record::Dataset;
use crate::error::DatasetError;
use crate::utils::decode_text;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read and decode a CSV file into a dataset
pub fn read_csv_path(path: &Path, encoding: &str) -> Result<Dataset, DatasetError> {
    let bytes = fs::read(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = decode_text(&bytes, encoding)?;
    let dataset = parse_csv(&text)?;

    debug!(
        path = %path.display(),
        records = dataset.len(),
        columns = dataset.columns().len(),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Parse CSV text whose first row is the header
pub fn parse_csv(text: &str) -> Result<Dataset, DatasetError> {
    let mut rows = split_rows(text)?.into_iter();

    let header = rows.next().ok_or(DatasetError::MissingHeader)?;
    let columns = header
        .into_iter()
        .map(|cell| cell.unwrap_or_default().trim().to_string())
        .collect();

    Dataset::new(columns, rows.collect())
}

fn split_rows(text: &str) -> Result<Vec<Vec<Option<String>>>, DatasetError> {
    let mut rows = Vec::new();
    let mut row: Vec<Option<String>> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut field_start = true;
    let mut quote_row = 0;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(ch),
            }
            continue;
        }

        // A quote only opens a quoted field as its first character
        match ch {
            '"' if field_start => {
                in_quotes = true;
                field_start = false;
                quote_row = rows.len() + 1;
            }
            ',' => {
                row.push(take_cell(&mut field));
                field_start = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                row.push(take_cell(&mut field));
                push_row(&mut rows, std::mem::take(&mut row));
                field_start = true;
            }
            _ => {
                field.push(ch);
                field_start = false;
            }
        }
    }

    if in_quotes {
        return Err(DatasetError::UnterminatedQuote { row: quote_row });
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(take_cell(&mut field));
        push_row(&mut rows, row);
    }

    Ok(rows)
}

fn take_cell(field: &mut String) -> Option<String> {
    let cell = std::mem::take(field);
    (!cell.is_empty()).then_some(cell)
}

/// Blank lines carry no record
fn push_row(rows: &mut Vec<Vec<Option<String>>>, row: Vec<Option<String>>) {
    if row.len() == 1 && row[0].is_none() {
        return;
    }
    rows.push(row);
}
