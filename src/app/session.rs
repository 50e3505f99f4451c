// ClaimAudit - app/session.rs
//
// Session context: owns the one live claim table of a user session and runs
// audits against it.
//
// Design principles:
// - The table is held by this object, never by a process-wide global; each
//   session (window, or client if ever served) owns its own AuditSession.
// - A successful load replaces the previous table entirely. A failed load
//   leaves the previous table in place.
// - Nothing is persisted: dropping the session drops the table.

use crate::core::audit::{self, AuditKind, CostRange};
use crate::core::filter::{self, FilterState};
use crate::core::ingest;
use crate::core::model::{AuditOutcome, ClaimTable};
use crate::platform::fs;
use crate::util::error::{AuditError, ClaimAuditError, IngestError};
use std::path::Path;
use std::time::Instant;

/// Everything one "Run Audit" press needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditRequest {
    pub kind: AuditKind,
    pub range: CostRange,
    pub filter: FilterState,
}

/// Session-scoped query context.
#[derive(Debug, Default)]
pub struct AuditSession {
    table: Option<ClaimTable>,
}

impl AuditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live table, if a file has been loaded.
    pub fn table(&self) -> Option<&ClaimTable> {
        self.table.as_ref()
    }

    pub fn has_table(&self) -> bool {
        self.table.is_some()
    }

    /// Replace the live table.
    pub fn replace_table(&mut self, table: ClaimTable) -> &ClaimTable {
        if let Some(old) = &self.table {
            tracing::debug!(
                previous = %old.source_name,
                previous_rows = old.row_count(),
                "Replacing loaded table"
            );
        }
        self.table.insert(table)
    }

    /// Parse CSV bytes (e.g. a dropped file) and make them the live table.
    pub fn load_bytes(
        &mut self,
        bytes: &[u8],
        source_name: &str,
    ) -> Result<&ClaimTable, IngestError> {
        let table = ingest::load_csv(bytes, source_name)?;
        Ok(self.replace_table(table))
    }

    /// Read a CSV from disk (size-checked) and make it the live table.
    pub fn load_path(&mut self, path: &Path, max_bytes: u64) -> Result<&ClaimTable, IngestError> {
        let bytes = fs::read_upload(path, max_bytes)?;
        self.load_bytes(&bytes, &fs::display_name(path))
    }

    /// Run one audit and apply the post-query filter.
    ///
    /// Pure with respect to the session: identical requests against an
    /// unchanged table give identical outcomes.
    pub fn run_audit(&self, request: &AuditRequest) -> Result<AuditOutcome, ClaimAuditError> {
        let table = self.table.as_ref().ok_or(AuditError::NoTableLoaded)?;
        let started = Instant::now();

        let result = audit::run_audit(table, request.kind, &request.range)?;
        let visible = filter::apply_filters(&result, &request.filter)?;

        tracing::info!(
            audit = %request.kind,
            rows = result.row_count(),
            visible = visible.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Audit complete"
        );

        Ok(AuditOutcome { result, visible })
    }
}

// =============================================================================
// Unit tests
// =============================================================================
