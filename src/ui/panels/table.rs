// ClaimAudit - ui/panels/table.rs
//
// Shared striped grid for the preview and results tables.

use crate::core::model::Value;
use crate::ui::theme;

/// Render a header row plus data rows as a striped grid.
///
/// `risk_column` is the index of a risk score column to colour, if any.
/// The grid scrolls once it grows past `max_height`.
/// Missing cells show as a dimmed dash so they are distinguishable from
/// empty text.
pub fn render<'a>(
    ui: &mut egui::Ui,
    id: &str,
    columns: &[String],
    rows: impl Iterator<Item = &'a Vec<Value>>,
    risk_column: Option<usize>,
    dark_mode: bool,
    max_height: f32,
) {
    egui::ScrollArea::both()
        .id_salt(id)
        .max_height(max_height)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            egui::Grid::new(id)
                .num_columns(columns.len())
                .striped(true)
                .spacing(theme::GRID_SPACING)
                .show(ui, |ui| {
                    for name in columns {
                        ui.strong(name);
                    }
                    ui.end_row();

                    for row in rows {
                        for (idx, cell) in row.iter().enumerate() {
                            ui.label(cell_text(cell, idx, risk_column, dark_mode));
                        }
                        ui.end_row();
                    }
                });
        });
}

fn cell_text(
    cell: &Value,
    idx: usize,
    risk_column: Option<usize>,
    dark_mode: bool,
) -> egui::RichText {
    let text = match cell {
        Value::Null => egui::RichText::new("\u{2013}").color(theme::placeholder_colour(dark_mode)),
        Value::Undefined => egui::RichText::new(cell.to_text())
            .italics()
            .color(theme::placeholder_colour(dark_mode)),
        Value::Float(f) if risk_column == Some(idx) => {
            let text = egui::RichText::new(format!("{f:+.2}%"));
            match theme::risk_colour(cell, dark_mode) {
                Some(colour) => text.color(colour),
                None => text,
            }
        }
        Value::Float(f) => egui::RichText::new(format_float(*f)),
        other => egui::RichText::new(other.to_text()),
    };
    text.monospace().size(theme::CELL_FONT_SIZE)
}

/// Floats with a fractional part are shown to two places; whole values as is.
fn format_float(f: f64) -> String {
    if f.fract() == 0.0 {
        format!("{f}")
    } else {
        format!("{f:.2}")
    }
}
