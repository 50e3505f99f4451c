// ClaimAudit - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "ClaimAudit";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "ClaimAudit";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Ingest limits
// =============================================================================

/// Default maximum size of an uploaded CSV file in bytes.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 256 * 1024 * 1024; // 256 MB

/// Minimum user-configurable upload size limit.
pub const MIN_MAX_UPLOAD_BYTES: u64 = 1024; // 1 KB

/// Hard upper bound on the upload size limit. The whole table is held in
/// memory, so this also bounds the heap used by a single session.
pub const ABSOLUTE_MAX_UPLOAD_BYTES: u64 = 2 * 1024 * 1024 * 1024; // 2 GB

/// Cell values treated as missing during type inference (pandas defaults).
/// Compared after trimming surrounding whitespace.
pub const MISSING_VALUE_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "NULL", "null", "None", "#N/A",
];

/// Date formats tried, in order, when inferring a date column.
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Canonical display format for date cells.
pub const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Audit defaults
// =============================================================================

/// Default lower bound of the high-cost range (inclusive).
pub const DEFAULT_MIN_COST: f64 = 0.0;

/// Default upper bound of the high-cost range (inclusive).
pub const DEFAULT_MAX_COST: f64 = 1000.0;

/// Drag speed of the cost inputs in the sidebar.
pub const COST_DRAG_SPEED: f64 = 1.0;

/// Risk score (percent above the drug mean) at which a row is highlighted.
pub const HIGH_RISK_THRESHOLD_PCT: f64 = 50.0;

// =============================================================================
// UI limits
// =============================================================================

/// Default number of rows shown in the upload preview.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Maximum user-configurable number of preview rows.
pub const MAX_PREVIEW_ROWS: usize = 100;

/// Maximum number of result rows rendered in the results grid.
/// Filtering and export always operate on the complete result.
pub const MAX_DISPLAY_ROWS: usize = 5_000;

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// File extensions accepted by the open dialog and drag-and-drop.
pub const CSV_EXTENSIONS: &[&str] = &["csv"];
