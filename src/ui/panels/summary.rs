// ClaimAudit - ui/panels/summary.rs
//
// Table summary modal window.
// Shows the loaded file, its row count, and each column with its inferred
// type. Startup warnings are listed underneath.

use crate::app::state::AppState;
use crate::ui::theme;

/// Render the table summary dialog (if state.show_summary is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_summary {
        return;
    }

    let mut open = true;
    egui::Window::new("Table Summary")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .min_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            if let Some(claims) = state.session.table() {
                ui.strong("Overview");
                egui::Grid::new("summary_overview")
                    .num_columns(2)
                    .spacing([16.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("Source:");
                        ui.label(&claims.source_name);
                        ui.end_row();

                        ui.label("Rows:");
                        ui.label(claims.row_count().to_string());
                        ui.end_row();

                        ui.label("Columns:");
                        ui.label(claims.columns.len().to_string());
                        ui.end_row();
                    });

                ui.add_space(8.0);
                ui.separator();
                ui.strong("Columns");

                egui::ScrollArea::vertical()
                    .id_salt("summary_columns")
                    .max_height(260.0)
                    .show(ui, |ui| {
                        egui::Grid::new("summary_column_table")
                            .num_columns(3)
                            .striped(true)
                            .spacing([16.0, 2.0])
                            .show(ui, |ui| {
                                ui.strong("#");
                                ui.strong("Name");
                                ui.strong("Type");
                                ui.end_row();

                                for (idx, column) in claims.columns.iter().enumerate() {
                                    ui.label((idx + 1).to_string());
                                    ui.monospace(&column.name);
                                    ui.label(column.kind.label());
                                    ui.end_row();
                                }
                            });
                    });
            } else {
                ui.label("No claims file loaded.");
            }

            if !state.warnings.is_empty() {
                ui.add_space(8.0);
                ui.separator();
                ui.strong(format!("Warnings ({})", state.warnings.len()));
                for warning in &state.warnings {
                    ui.label(egui::RichText::new(warning).small().color(theme::NOTE_TEXT));
                }
            }
        });

    if !open {
        state.show_summary = false;
    }
}
