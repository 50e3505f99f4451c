// ClaimAudit - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::core::audit::AuditKind;
use crate::util::constants::DISPLAY_DATE_FORMAT;
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

// =============================================================================
// Cell values
// =============================================================================

/// A single cell of a claim table or audit result.
///
/// Values carry a total order so they can key `BTreeMap` groups and
/// partitions: `Null` sorts first, then numbers (integers and floats compare
/// numerically), then dates, then text, then `Undefined`.
#[derive(Debug, Clone)]
pub enum Value {
    /// Missing cell.
    Null,
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    Text(String),
    /// Result of arithmetic with no defined value, e.g. a percentage
    /// deviation from a zero mean.
    Undefined,
}

impl Value {
    /// Numeric view of the cell. Only `Integer` and `Float` are numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Canonical text form used for equality filtering and display.
    ///
    /// Integers and whole floats render identically (`12` and `12.0` both
    /// become `"12"`), so numeric and text identifiers compare equal.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Integer(_) | Value::Float(_) => 1,
            Value::Date(_) => 2,
            Value::Text(_) => 3,
            Value::Undefined => 4,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Date(d) => write!(f, "{}", d.format(DISPLAY_DATE_FORMAT)),
            Value::Text(s) => f.write_str(s),
            Value::Undefined => f.write_str("undefined"),
        }
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (a, b) if a.rank() == 1 && b.rank() == 1 => {
                let (x, y) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
                x.total_cmp(&y)
            }
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null | Value::Undefined => serializer.serialize_none(),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Date(_) => serializer.collect_str(self),
            Value::Text(s) => serializer.serialize_str(s),
        }
    }
}

// =============================================================================
// Columns and tables
// =============================================================================

/// Type inferred for a whole column at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Date,
    Text,
    /// Every cell in the column is missing.
    Empty,
}

impl ColumnType {
    /// Human-readable label for the table summary.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Date => "date",
            ColumnType::Text => "text",
            ColumnType::Empty => "empty",
        }
    }
}

/// A named, typed column of a claim table.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnType,
}

/// The full set of claim records from one uploaded file.
///
/// Rows are stored positionally; `rows[r][c]` is the value of column `c`.
/// Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone)]
pub struct ClaimTable {
    /// File name the table was loaded from (display only).
    pub source_name: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Value>>,
}

impl ClaimTable {
    /// Position of the named column, if present. Names match exactly.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Resolve every named column, returning the names of those missing.
    pub fn resolve_columns(&self, names: &[&str]) -> Result<Vec<usize>, Vec<String>> {
        let mut found = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for name in names {
            match self.column_index(name) {
                Some(idx) => found.push(idx),
                None => missing.push((*name).to_string()),
            }
        }
        if missing.is_empty() {
            Ok(found)
        } else {
            Err(missing)
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// The first `n` rows, for the upload preview.
    pub fn head(&self, n: usize) -> &[Vec<Value>] {
        &self.rows[..n.min(self.rows.len())]
    }
}

// =============================================================================
// Audit results
// =============================================================================

/// Output rowset of one audit query. Transient: lives for one display cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditResult {
    pub audit: AuditKind,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl AuditResult {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// An audit result together with the rows that passed the post-query filter.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditOutcome {
    pub result: AuditResult,

    /// Indices into `result.rows` of the rows matching the filter.
    pub visible: Vec<usize>,
}

impl AuditOutcome {
    /// Iterate the filtered rows in result order.
    pub fn visible_rows(&self) -> impl Iterator<Item = &Vec<Value>> {
        self.visible.iter().filter_map(|&i| self.result.rows.get(i))
    }
}
