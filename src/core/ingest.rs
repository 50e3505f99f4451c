// ClaimAudit - core/ingest.rs
//
// CSV ingestion: parse an uploaded claims file into a typed ClaimTable.
//
// Parsing is all-or-nothing. A ragged row, invalid UTF-8, or a bad header
// aborts the load and no table is produced.
//
// Type inference runs per column after all rows are read, following the
// pandas read_csv conventions: missing-value tokens become Null, and a
// column is Integer, Float, Date, or Text depending on whether every present
// cell parses as that type (tried in that order).

use crate::core::model::{ClaimTable, Column, ColumnType, Value};
use crate::util::constants::{DATE_FORMATS, MISSING_VALUE_TOKENS};
use crate::util::error::IngestError;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::io::Read;

/// UTF-8 byte order mark, stripped from the first header cell.
const BOM: char = '\u{feff}';

/// Parse CSV text with a header row into a claim table.
///
/// `source_name` is only used for the table label and error messages.
pub fn load_csv<R: Read>(reader: R, source_name: &str) -> Result<ClaimTable, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| csv_error(source_name, e))?
        .clone();

    let names = validate_headers(&headers, source_name)?;

    let mut raw_rows: Vec<csv::StringRecord> = Vec::new();
    for record in csv_reader.records() {
        raw_rows.push(record.map_err(|e| csv_error(source_name, e))?);
    }

    let mut columns = Vec::with_capacity(names.len());
    let mut rows: Vec<Vec<Value>> = (0..raw_rows.len())
        .map(|_| Vec::with_capacity(names.len()))
        .collect();

    for (col_idx, name) in names.into_iter().enumerate() {
        let cells: Vec<&str> = raw_rows
            .iter()
            .map(|r| r.get(col_idx).unwrap_or(""))
            .collect();
        let kind = infer_column_type(&cells);
        for (row, cell) in rows.iter_mut().zip(&cells) {
            row.push(convert_cell(cell, kind));
        }
        columns.push(Column { name, kind });
    }

    tracing::info!(
        source = source_name,
        rows = rows.len(),
        columns = columns.len(),
        "Claims table loaded"
    );
    tracing::debug!(
        source = source_name,
        schema = ?columns.iter().map(|c| (c.name.as_str(), c.kind.label())).collect::<Vec<_>>(),
        "Inferred column types"
    );

    Ok(ClaimTable {
        source_name: source_name.to_string(),
        columns,
        rows,
    })
}

fn csv_error(source_name: &str, source: csv::Error) -> IngestError {
    IngestError::Csv {
        source_name: source_name.to_string(),
        source,
    }
}

/// Check the header row and return the cleaned column names.
fn validate_headers(
    headers: &csv::StringRecord,
    source_name: &str,
) -> Result<Vec<String>, IngestError> {
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestError::EmptyHeader {
            source_name: source_name.to_string(),
        });
    }

    let mut seen = HashSet::new();
    let mut names = Vec::with_capacity(headers.len());
    for (position, raw) in headers.iter().enumerate() {
        let name = if position == 0 {
            raw.trim_start_matches(BOM)
        } else {
            raw
        }
        .trim()
        .to_string();

        if name.is_empty() {
            return Err(IngestError::BlankColumnName {
                source_name: source_name.to_string(),
                position,
            });
        }
        if !seen.insert(name.clone()) {
            return Err(IngestError::DuplicateColumn {
                source_name: source_name.to_string(),
                name,
            });
        }
        names.push(name);
    }
    Ok(names)
}

fn is_missing(cell: &str) -> bool {
    MISSING_VALUE_TOKENS.contains(&cell.trim())
}

/// A leading zero followed by more digits marks an identifier such as an NDC
/// (`00071015523`); parsing it as a number would drop the zeros.
fn has_significant_leading_zero(cell: &str) -> bool {
    let digits = cell.strip_prefix(['-', '+']).unwrap_or(cell);
    let mut chars = digits.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('0'), Some(c)) if c.is_ascii_digit()
    )
}

fn parse_integer(cell: &str) -> Option<i64> {
    if has_significant_leading_zero(cell) {
        return None;
    }
    cell.parse().ok()
}

/// Integer-shaped tokens are only floats when they also fit an i64, so a
/// long identifier such as a 20-digit pharmacy ID is never rounded.
fn parse_float(cell: &str) -> Option<f64> {
    if has_significant_leading_zero(cell) {
        return None;
    }
    if !cell.contains(['.', 'e', 'E']) && parse_integer(cell).is_none() {
        return None;
    }
    cell.parse::<f64>().ok().filter(|f| f.is_finite())
}

fn parse_date(cell: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(cell, fmt).ok())
}

/// Infer the narrowest type every present cell of a column satisfies.
pub fn infer_column_type(cells: &[&str]) -> ColumnType {
    let present: Vec<&str> = cells
        .iter()
        .filter(|c| !is_missing(c))
        .map(|c| c.trim())
        .collect();

    if present.is_empty() {
        ColumnType::Empty
    } else if present.iter().all(|c| parse_integer(c).is_some()) {
        ColumnType::Integer
    } else if present.iter().all(|c| parse_float(c).is_some()) {
        ColumnType::Float
    } else if present.iter().all(|c| parse_date(c).is_some()) {
        ColumnType::Date
    } else {
        ColumnType::Text
    }
}

/// Convert one raw cell to a value of the column's inferred type.
fn convert_cell(cell: &str, kind: ColumnType) -> Value {
    if is_missing(cell) {
        return Value::Null;
    }
    let trimmed = cell.trim();
    match kind {
        ColumnType::Integer => parse_integer(trimmed).map_or(Value::Null, Value::Integer),
        ColumnType::Float => parse_float(trimmed).map_or(Value::Null, Value::Float),
        ColumnType::Date => parse_date(trimmed).map_or(Value::Null, Value::Date),
        ColumnType::Text => Value::Text(cell.to_string()),
        ColumnType::Empty => Value::Null,
    }
}
