// ClaimAudit - app/state.rs
//
// Application state management. Holds the audit session, the sidebar
// parameters, the latest audit outcome, and UI flags.
// Owned by the eframe::App implementation.

use crate::app::session::{AuditRequest, AuditSession};
use crate::core::audit::{AuditKind, CostRange};
use crate::core::export;
use crate::core::filter::FilterState;
use crate::core::model::AuditOutcome;
use crate::platform::config::AppConfig;
use crate::util::error::{ClaimAuditError, ExportError, IngestError};
use std::path::{Path, PathBuf};

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// The session's claim table and query context.
    pub session: AuditSession,

    /// Audit selected in the sidebar.
    pub selected_audit: AuditKind,

    /// Cost range for the high-cost audit.
    pub cost_range: CostRange,

    /// Configured range restored by Reset.
    pub default_range: CostRange,

    /// Pharmacy / patient filter inputs.
    pub filter_state: FilterState,

    /// Outcome of the most recent successful run, cleared on reload.
    pub outcome: Option<AuditOutcome>,

    /// Error from the most recent upload or run, shown as a banner.
    pub last_error: Option<String>,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal warnings (config validation and the like).
    pub warnings: Vec<String>,

    /// Rows shown in the upload preview.
    pub preview_rows: usize,

    /// Largest accepted upload in bytes.
    pub max_upload_bytes: u64,

    /// Path queued for loading by the menu or the command line.
    pub pending_open: Option<PathBuf>,

    /// Whether to show the table summary dialog.
    pub show_summary: bool,

    /// Whether to show the About dialog.
    pub show_about: bool,

    pub dark_mode: bool,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    /// Create initial state from validated configuration.
    pub fn new(config: &AppConfig, debug_mode: bool) -> Self {
        let default_range = CostRange {
            min: config.default_min_cost,
            max: config.default_max_cost,
        };
        Self {
            session: AuditSession::new(),
            selected_audit: AuditKind::default(),
            cost_range: default_range,
            default_range,
            filter_state: FilterState::default(),
            outcome: None,
            last_error: None,
            status_message: "Ready. Open a claims CSV to begin.".to_string(),
            warnings: Vec::new(),
            preview_rows: config.preview_rows,
            max_upload_bytes: config.max_upload_bytes,
            pending_open: None,
            show_summary: false,
            show_about: false,
            dark_mode: config.dark_mode,
            debug_mode,
        }
    }

    /// Load a CSV from disk, replacing the current table on success.
    pub fn open_path(&mut self, path: &Path) {
        match self.session.load_path(path, self.max_upload_bytes) {
            Ok(table) => {
                self.status_message = format!(
                    "Loaded {}: {} rows, {} columns.",
                    table.source_name,
                    table.row_count(),
                    table.columns.len()
                );
                self.after_load();
            }
            Err(e) => self.report(ClaimAuditError::from(e)),
        }
    }

    /// Load CSV content already in memory (drag-and-drop).
    ///
    /// Held to the same size limit as a file read from disk.
    pub fn open_bytes(&mut self, bytes: &[u8], source_name: &str) {
        let size = bytes.len() as u64;
        if size > self.max_upload_bytes {
            self.report(ClaimAuditError::from(IngestError::FileTooLarge {
                path: PathBuf::from(source_name),
                size,
                max_size: self.max_upload_bytes,
            }));
            return;
        }
        match self.session.load_bytes(bytes, source_name) {
            Ok(table) => {
                self.status_message = format!(
                    "Loaded {}: {} rows, {} columns.",
                    table.source_name,
                    table.row_count(),
                    table.columns.len()
                );
                self.after_load();
            }
            Err(e) => self.report(ClaimAuditError::from(e)),
        }
    }

    /// Results from the previous table must never outlive it.
    fn after_load(&mut self) {
        self.outcome = None;
        self.last_error = None;
    }

    /// The request described by the current sidebar inputs.
    pub fn current_request(&self) -> AuditRequest {
        AuditRequest {
            kind: self.selected_audit,
            range: self.cost_range,
            filter: self.filter_state.clone(),
        }
    }

    /// Run the selected audit with the current parameters.
    pub fn run_audit(&mut self) {
        match self.session.run_audit(&self.current_request()) {
            Ok(outcome) => {
                self.status_message = format!(
                    "{}: {} of {} rows match the filters.",
                    outcome.result.audit,
                    outcome.visible.len(),
                    outcome.result.row_count()
                );
                self.last_error = None;
                self.outcome = Some(outcome);
            }
            Err(e) => {
                self.outcome = None;
                self.report(e);
            }
        }
    }

    /// Write the visible rows of the latest outcome to `dest`.
    pub fn export_to(&mut self, dest: &Path, format: ExportFormat) {
        match self.try_export(dest, format) {
            Ok(n) => {
                self.status_message =
                    format!("Exported {n} rows to {}.", dest.display());
            }
            Err(e) => self.report(e),
        }
    }

    fn try_export(&self, dest: &Path, format: ExportFormat) -> Result<usize, ClaimAuditError> {
        let outcome = self.outcome.as_ref().ok_or(ExportError::NothingToExport)?;
        let file = std::fs::File::create(dest).map_err(|e| ClaimAuditError::Io {
            path: dest.to_path_buf(),
            operation: "create export file",
            source: e,
        })?;
        let count = match format {
            ExportFormat::Csv => export::export_csv(outcome, file, dest)?,
            ExportFormat::Json => export::export_json(outcome, file, dest)?,
        };
        Ok(count)
    }

    /// Record a recoverable error for the banner, status bar and log.
    fn report(&mut self, error: ClaimAuditError) {
        tracing::warn!(error = %error, "Operation failed");
        self.status_message = error.to_string();
        self.last_error = Some(error.to_string());
    }

    /// Reset filters and cost range to the configured defaults.
    pub fn reset_parameters(&mut self) {
        self.filter_state = FilterState::default();
        self.cost_range = self.default_range;
    }
}
