// ClaimAudit - gui.rs
//
// Top-level eframe::App implementation.
// Wires together the menu bar, sidebar, preview and results panels, and
// handles file open, drag-and-drop, and export requests.

use crate::app::state::{AppState, ExportFormat};
use crate::platform::fs;
use crate::ui;
use crate::util::constants::CSV_EXTENSIONS;
use std::path::Path;

/// The ClaimAudit application.
pub struct ClaimAuditApp {
    pub state: AppState,
}

impl ClaimAuditApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Load any files dropped onto the window. Only the first CSV is used.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }

        for file in dropped {
            if let Some(path) = file.path {
                if fs::has_extension(&path, CSV_EXTENSIONS) {
                    self.state.open_path(&path);
                    return;
                }
                tracing::debug!(path = %path.display(), "Ignoring dropped non-CSV file");
            } else if let Some(bytes) = file.bytes {
                // Web-style drops carry content but no path.
                if fs::has_extension(Path::new(&file.name), CSV_EXTENSIONS) {
                    self.state.open_bytes(&bytes[..], &file.name);
                    return;
                }
                tracing::debug!(name = %file.name, "Ignoring dropped non-CSV content");
            }
        }
        self.state.status_message = "Dropped files contained no .csv file.".to_string();
    }

    fn prompt_export(&mut self, format: ExportFormat) {
        let ext = format.extension();
        let file_name = format!(
            "{}.{ext}",
            self.state
                .outcome
                .as_ref()
                .map(|o| o.result.audit.label().to_lowercase().replace(' ', "_"))
                .unwrap_or_else(|| "audit".to_string())
        );
        if let Some(dest) = rfd::FileDialog::new()
            .add_filter(ext.to_uppercase(), &[ext])
            .set_file_name(file_name)
            .save_file()
        {
            self.state.export_to(&dest, format);
        }
    }
}

impl eframe::App for ClaimAuditApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // pending_open: set by the command line or the File menu.
        if let Some(path) = self.state.pending_open.take() {
            self.state.open_path(&path);
        }
        self.handle_dropped_files(ctx);

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open CSV\u{2026}").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("CSV", CSV_EXTENSIONS)
                            .pick_file()
                        {
                            self.state.pending_open = Some(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    let has_outcome = self.state.outcome.is_some();
                    ui.add_enabled_ui(has_outcome, |ui| {
                        ui.menu_button("Export Results", |ui| {
                            if ui.button("CSV\u{2026}").clicked() {
                                self.prompt_export(ExportFormat::Csv);
                                ui.close_menu();
                            }
                            if ui.button("JSON\u{2026}").clicked() {
                                self.prompt_export(ExportFormat::Json);
                                ui.close_menu();
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.button("Table Summary").clicked() {
                        self.state.show_summary = true;
                        ui.close_menu();
                    }
                    if ui.checkbox(&mut self.state.dark_mode, "Dark Mode").changed() {
                        ui::theme::apply(ctx, self.state.dark_mode);
                    }
                    ui.separator();
                    if ui.button("About").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(outcome) = &self.state.outcome {
                        ui.label(format!(
                            "{}/{} rows",
                            outcome.visible.len(),
                            outcome.result.row_count()
                        ));
                    }
                    if self.state.debug_mode {
                        ui.label(egui::RichText::new("DEBUG").small().weak());
                    }
                });
            });
        });

        // Left sidebar
        egui::SidePanel::left("sidebar")
            .default_width(ui::theme::SIDEBAR_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("sidebar_scroll")
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        ui::panels::sidebar::render(ui, &mut self.state);
                    });
            });

        // Central panel: preview on top, results underneath.
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::preview::render(ui, &self.state);
            ui.add_space(8.0);
            ui.separator();
            ui::panels::results::render(ui, &mut self.state);
        });

        ui::panels::summary::render(ctx, &mut self.state);
        ui::panels::about::render(ctx, &mut self.state);
    }
}
