//! Flattened-table CSV export.
//!
//! Writes the full [`FlatTable`] — every observed column plus the four
//! derived columns — with a header row and no index column. Column order is
//! the union-of-keys discovery order followed by the derived columns in the
//! order they were computed.
//!
//! # Format
//! - Delimiter: `,` by default, configurable
//! - Timestamps (`date`, `edited`): `%Y-%m-%d %H:%M:%S`
//! - Raw string values verbatim; other raw values as compact JSON
//! - Encoding: UTF-8

use std::fs::File;
use std::path::Path;

use crate::error::Result;
use crate::table::{DERIVED_COLUMNS, FlatTable, Row, display_value};

/// Default field delimiter.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Writes the table to `path`, header row included. No row filtering.
pub fn write_csv(table: &FlatTable, path: &Path, delimiter: u8) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(file);
    write_into(table, &mut writer)?;
    Ok(())
}

/// Renders the table as a CSV string (useful in tests).
pub fn to_csv(table: &FlatTable, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    write_into(table, &mut writer)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_into<W: std::io::Write>(table: &FlatTable, writer: &mut csv::Writer<W>) -> Result<()> {
    writer.write_record(table.export_columns())?;

    for row in &table.rows {
        let record = build_record(table, row);
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Builds the cells of one row, raw columns first, derived columns last.
fn build_record(table: &FlatTable, row: &Row) -> Vec<String> {
    let mut record = Vec::with_capacity(table.columns.len() + DERIVED_COLUMNS.len());

    for column in &table.columns {
        record.push(raw_cell(row, column));
    }

    record.push(row.date_only.format("%Y-%m-%d").to_string());
    record.push(row.hour.to_string());
    record.push(row.text_length.to_string());
    record.push(row.clean_text.clone());

    record
}

fn raw_cell(row: &Row, column: &str) -> String {
    match column {
        // Parsed timestamps export in canonical form, not as raw JSON.
        "date" => row.date.format("%Y-%m-%d %H:%M:%S").to_string(),
        "edited" => row
            .edited
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default(),
        // The body exports in its coerced string form.
        "text" => row.text.clone(),
        _ => row.raw.get(column).map(display_value).unwrap_or_default(),
    }
}
