// ClaimAudit - core/export.rs
//
// CSV and JSON export of the visible (filtered) rows of an audit result.
// Core layer: writes to any Write trait object.

use crate::core::model::AuditOutcome;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export the visible rows of an outcome as CSV with a header row.
///
/// Cells use their canonical text form; missing cells are empty and an
/// undefined risk score is written as `undefined`.
pub fn export_csv<W: Write>(
    outcome: &AuditOutcome,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(&outcome.result.columns)
        .map_err(csv_err)?;

    let mut count = 0;
    for row in outcome.visible_rows() {
        csv_writer
            .write_record(row.iter().map(|v| v.to_text()))
            .map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(
        audit = %outcome.result.audit,
        rows = count,
        path = %export_path.display(),
        "Exported audit result to CSV"
    );
    Ok(count)
}

/// Export the visible rows as a JSON array of objects keyed by column name.
///
/// Numbers stay numbers; missing and undefined cells become `null`.
pub fn export_json<W: Write>(
    outcome: &AuditOutcome,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let json_err = |e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    };

    // serde_json's preserve_order keeps keys in the audit's column order.
    let mut records: Vec<serde_json::Map<String, serde_json::Value>> =
        Vec::with_capacity(outcome.visible.len());
    for row in outcome.visible_rows() {
        let mut record = serde_json::Map::new();
        for (name, cell) in outcome.result.columns.iter().zip(row) {
            record.insert(name.clone(), serde_json::to_value(cell).map_err(json_err)?);
        }
        records.push(record);
    }

    serde_json::to_writer_pretty(writer, &records).map_err(json_err)?;

    tracing::info!(
        audit = %outcome.result.audit,
        rows = records.len(),
        path = %export_path.display(),
        "Exported audit result to JSON"
    );
    Ok(records.len())
}
