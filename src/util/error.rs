// ClaimAudit - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.
// Every variant is recoverable: the user retries with another file,
// another audit, or other filter values.

use crate::core::audit::AuditKind;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all ClaimAudit operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum ClaimAuditError {
    /// CSV ingestion failed; no table was loaded.
    Ingest(IngestError),

    /// An audit query could not be executed.
    Audit(AuditError),

    /// Post-query filtering failed.
    Filter(FilterError),

    /// Export operation failed.
    Export(ExportError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for ClaimAuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ingest(e) => write!(f, "Upload failed: {e}"),
            Self::Audit(e) => write!(f, "Audit failed: {e}"),
            Self::Filter(e) => write!(f, "Filter error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ClaimAuditError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Ingest(e) => Some(e),
            Self::Audit(e) => Some(e),
            Self::Filter(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Ingest errors
// ---------------------------------------------------------------------------

/// Errors raised while turning an uploaded CSV into a claim table.
#[derive(Debug)]
pub enum IngestError {
    /// The CSV reader rejected the content: ragged rows, invalid UTF-8,
    /// or an unreadable stream.
    Csv {
        source_name: String,
        source: csv::Error,
    },

    /// The file has no header row.
    EmptyHeader { source_name: String },

    /// A header cell is blank.
    BlankColumnName {
        source_name: String,
        position: usize,
    },

    /// Two header cells share the same name.
    DuplicateColumn { source_name: String, name: String },

    /// The file exceeds the configured upload limit.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// I/O error reading the uploaded file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv {
                source_name,
                source,
            } => write!(f, "'{source_name}' is not valid CSV: {source}"),
            Self::EmptyHeader { source_name } => {
                write!(f, "'{source_name}' has no header row")
            }
            Self::BlankColumnName {
                source_name,
                position,
            } => write!(
                f,
                "'{source_name}': header column {} has no name",
                position + 1
            ),
            Self::DuplicateColumn { source_name, name } => {
                write!(f, "'{source_name}': column '{name}' appears more than once")
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "'{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::Io { path, source } => {
                write!(f, "cannot read '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for IngestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<IngestError> for ClaimAuditError {
    fn from(e: IngestError) -> Self {
        Self::Ingest(e)
    }
}

// ---------------------------------------------------------------------------
// Audit errors
// ---------------------------------------------------------------------------

/// Errors related to executing an audit query.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditError {
    /// No claims file has been loaded in this session.
    NoTableLoaded,

    /// The loaded table lacks columns the audit reads.
    MissingColumns {
        audit: AuditKind,
        missing: Vec<String>,
    },
}

impl fmt::Display for AuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTableLoaded => write!(f, "no claims file has been loaded"),
            Self::MissingColumns { audit, missing } => write!(
                f,
                "'{audit}' needs column(s) missing from the uploaded file: {}",
                missing.join(", ")
            ),
        }
    }
}

impl std::error::Error for AuditError {}

impl From<AuditError> for ClaimAuditError {
    fn from(e: AuditError) -> Self {
        Self::Audit(e)
    }
}

// ---------------------------------------------------------------------------
// Filter errors
// ---------------------------------------------------------------------------

/// Errors related to filter operations.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    /// A filter value was supplied for a column the audit does not output.
    ColumnNotInResult {
        column: &'static str,
        audit: AuditKind,
    },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColumnNotInResult { column, audit } => write!(
                f,
                "'{audit}' results have no '{column}' column; clear that filter to run this audit"
            ),
        }
    }
}

impl std::error::Error for FilterError {}

impl From<FilterError> for ClaimAuditError {
    fn from(e: FilterError) -> Self {
        Self::Filter(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// No audit has been run yet.
    NothingToExport,
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
            Self::NothingToExport => write!(f, "run an audit before exporting"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::NothingToExport => None,
        }
    }
}

impl From<ExportError> for ClaimAuditError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}
