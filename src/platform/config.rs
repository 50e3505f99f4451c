// ClaimAudit - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for ClaimAudit configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/claimaudit/ or %APPDATA%\ClaimAudit\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[audit]` section.
    pub audit: AuditSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[ingest]` section.
    pub ingest: IngestSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[audit]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct AuditSection {
    /// Initial lower bound of the high-cost range.
    pub default_min_cost: Option<f64>,
    /// Initial upper bound of the high-cost range.
    pub default_max_cost: Option<f64>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Rows shown in the upload preview.
    pub preview_rows: Option<usize>,
}

/// `[ingest]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct IngestSection {
    /// Largest accepted CSV file in bytes.
    pub max_upload_bytes: Option<u64>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- Audit --
    pub default_min_cost: f64,
    pub default_max_cost: f64,

    // -- UI --
    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,
    pub preview_rows: usize,

    // -- Ingest --
    pub max_upload_bytes: u64,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_min_cost: constants::DEFAULT_MIN_COST,
            default_max_cost: constants::DEFAULT_MAX_COST,
            dark_mode: true,
            preview_rows: constants::DEFAULT_PREVIEW_ROWS,
            max_upload_bytes: constants::DEFAULT_MAX_UPLOAD_BYTES,
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unparseable, returns defaults with a warning; the
/// application still starts but the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            let msg = format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            return (AppConfig::default(), vec![msg]);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let msg = format!(
                "Failed to parse config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            return (AppConfig::default(), vec![msg]);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");
    validate(raw)
}

/// Validate each field against named constants, accumulating all warnings.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- Audit: cost bounds --
    if let Some(min) = raw.audit.default_min_cost {
        if min.is_finite() && min >= 0.0 {
            config.default_min_cost = min;
        } else {
            warnings.push(format!(
                "[audit] default_min_cost = {min} must be a number >= 0. Using default ({}).",
                constants::DEFAULT_MIN_COST,
            ));
        }
    }
    if let Some(max) = raw.audit.default_max_cost {
        if max.is_finite() && max >= 0.0 {
            config.default_max_cost = max;
        } else {
            warnings.push(format!(
                "[audit] default_max_cost = {max} must be a number >= 0. Using default ({}).",
                constants::DEFAULT_MAX_COST,
            ));
        }
    }
    if config.default_min_cost > config.default_max_cost {
        warnings.push(format!(
            "[audit] default_min_cost ({}) exceeds default_max_cost ({}). Using defaults ({}-{}).",
            config.default_min_cost,
            config.default_max_cost,
            constants::DEFAULT_MIN_COST,
            constants::DEFAULT_MAX_COST,
        ));
        config.default_min_cost = constants::DEFAULT_MIN_COST;
        config.default_max_cost = constants::DEFAULT_MAX_COST;
    }

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => {
                warnings.push(format!(
                    "[ui] theme = \"{other}\" is not recognised. Expected \"dark\" or \"light\". Using default (dark).",
                ));
            }
        }
    }

    // -- UI: preview_rows --
    if let Some(rows) = raw.ui.preview_rows {
        if (1..=constants::MAX_PREVIEW_ROWS).contains(&rows) {
            config.preview_rows = rows;
        } else {
            warnings.push(format!(
                "[ui] preview_rows = {rows} is out of range (1-{}). Using default ({}).",
                constants::MAX_PREVIEW_ROWS,
                constants::DEFAULT_PREVIEW_ROWS,
            ));
        }
    }

    // -- Ingest: max_upload_bytes --
    if let Some(bytes) = raw.ingest.max_upload_bytes {
        if (constants::MIN_MAX_UPLOAD_BYTES..=constants::ABSOLUTE_MAX_UPLOAD_BYTES)
            .contains(&bytes)
        {
            config.max_upload_bytes = bytes;
        } else {
            warnings.push(format!(
                "[ingest] max_upload_bytes = {bytes} is out of range ({}-{}). Using default ({}).",
                constants::MIN_MAX_UPLOAD_BYTES,
                constants::ABSOLUTE_MAX_UPLOAD_BYTES,
                constants::DEFAULT_MAX_UPLOAD_BYTES,
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}
