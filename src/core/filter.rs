// ClaimAudit - core/filter.rs
//
// Post-query filter for audit results.
// All active filters are AND-combined.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::AuditResult;
use crate::util::error::FilterError;

/// Result column matched by the pharmacy filter.
pub const PHARMACY_COLUMN: &str = "pharmacy_id";

/// Result column matched by the patient filter.
pub const PATIENT_COLUMN: &str = "patient_id";

/// Complete filter state. All fields are AND-combined when applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Exact pharmacy ID. Empty = no filter.
    pub pharmacy_id: String,

    /// Exact patient ID. Empty = no filter.
    pub patient_id: String,
}

impl FilterState {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.pharmacy_id.is_empty() && self.patient_id.is_empty()
    }

    /// Active (column, value) pairs.
    fn active(&self) -> Vec<(&'static str, &str)> {
        [
            (PHARMACY_COLUMN, self.pharmacy_id.as_str()),
            (PATIENT_COLUMN, self.patient_id.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }
}

/// Apply filters to an audit result, returning indices of matching rows.
///
/// A cell matches when its canonical text form equals the filter value
/// exactly, so the integer `12` matches the filter text `"12"`. No trimming
/// or case folding is applied.
///
/// Fails if a non-empty filter names a column the result does not have.
pub fn apply_filters(result: &AuditResult, filter: &FilterState) -> Result<Vec<usize>, FilterError> {
    if filter.is_empty() {
        return Ok((0..result.rows.len()).collect());
    }

    let mut predicates = Vec::new();
    for (column, value) in filter.active() {
        let idx = result
            .column_index(column)
            .ok_or(FilterError::ColumnNotInResult {
                column,
                audit: result.audit,
            })?;
        predicates.push((idx, value));
    }

    Ok(result
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            predicates
                .iter()
                .all(|&(idx, value)| row.get(idx).is_some_and(|cell| cell.to_text() == value))
        })
        .map(|(idx, _)| idx)
        .collect())
}
