// ClaimAudit - ui/panels/preview.rs
//
// Preview of the first rows of the uploaded claims table.

use crate::app::state::AppState;
use crate::ui::panels::table;

/// Render the upload preview, or a prompt when nothing is loaded.
pub fn render(ui: &mut egui::Ui, state: &AppState) {
    let Some(claims) = state.session.table() else {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.label(egui::RichText::new("No claims file loaded.").size(16.0).weak());
            ui.label(
                egui::RichText::new("Use File > Open CSV\u{2026} or drop a .csv file here.").weak(),
            );
        });
        return;
    };

    ui.horizontal(|ui| {
        ui.heading("Preview of Uploaded Data");
        ui.label(
            egui::RichText::new(format!(
                "{} \u{00b7} {} rows \u{00b7} {} columns",
                claims.source_name,
                claims.row_count(),
                claims.columns.len()
            ))
            .weak(),
        );
    });

    let max_height = ui.available_height() * 0.4;
    let columns: Vec<String> = claims.columns.iter().map(|c| c.name.clone()).collect();
    table::render(
        ui,
        "preview_grid",
        &columns,
        claims.head(state.preview_rows).iter(),
        None,
        state.dark_mode,
        max_height,
    );
}
