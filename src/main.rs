// ClaimAudit - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading and logging initialisation
// 3. eframe GUI launch, optionally with a claims file queued for loading

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` can use
// `crate::app::...`, `crate::core::...` etc.
pub use claimaudit::app;
pub use claimaudit::core;
pub use claimaudit::platform;
pub use claimaudit::ui;
pub use claimaudit::util;

use clap::Parser;
use std::path::PathBuf;

/// ClaimAudit - Pharmacy claims audit tool.
///
/// Load a claims CSV and run duplicate, refill, and high-cost audits
/// against it. Nothing is written back or persisted.
#[derive(Parser, Debug)]
#[command(name = "ClaimAudit", version, about)]
struct Cli {
    /// Claims CSV to load at startup.
    path: Option<PathBuf>,

    /// Directory containing config.toml (defaults to the platform config dir).
    #[arg(short = 'c', long = "config-dir")]
    config_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let platform_paths = platform::config::PlatformPaths::resolve();
    let config_dir = cli
        .config_dir
        .as_deref()
        .unwrap_or(&platform_paths.config_dir);

    // Config is read before logging starts so its level can apply;
    // warnings are logged once the subscriber exists.
    let (config, warnings) = platform::config::load_config(config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config_dir = %config_dir.display(),
        "ClaimAudit starting"
    );
    for warning in &warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    let mut state = app::state::AppState::new(&config, cli.debug);
    state.warnings = warnings;

    if let Some(path) = cli.path {
        state.pending_open = Some(path);
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 500.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_ID,
        native_options,
        Box::new(move |cc| {
            ui::theme::apply(&cc.egui_ctx, state.dark_mode);
            Ok(Box::new(gui::ClaimAuditApp::new(state)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch ClaimAudit GUI: {e}");
        std::process::exit(1);
    }
}
