// ClaimAudit - ui/panels/results.rs
//
// Results area: error banner, audit caveats, and the filtered result grid.
// Display is capped at MAX_DISPLAY_ROWS; export always writes every
// visible row.

use crate::app::state::AppState;
use crate::core::audit::RISK_SCORE_COLUMN;
use crate::ui::panels::table;
use crate::ui::theme;
use crate::util::constants::MAX_DISPLAY_ROWS;

/// Render the latest audit outcome, if any.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    if let Some(message) = state.last_error.clone() {
        let dismissed = error_banner(ui, &message);
        if dismissed {
            state.last_error = None;
        }
        ui.add_space(6.0);
    }

    let Some(outcome) = &state.outcome else {
        return;
    };
    let audit = outcome.result.audit;

    ui.heading(format!("{audit} Results"));
    if let Some(note) = audit.note() {
        ui.label(egui::RichText::new(note).small().color(theme::NOTE_TEXT));
    }

    if outcome.visible.is_empty() {
        let message = if outcome.result.is_empty() {
            "The audit returned no rows."
        } else {
            "No rows match the pharmacy / patient filters."
        };
        ui.add_space(8.0);
        ui.label(egui::RichText::new(message).weak());
        return;
    }

    let shown = outcome.visible.len().min(MAX_DISPLAY_ROWS);
    if shown < outcome.visible.len() {
        ui.label(
            egui::RichText::new(format!(
                "Showing the first {shown} of {} rows. Export to see them all.",
                outcome.visible.len()
            ))
            .small()
            .weak(),
        );
    }

    table::render(
        ui,
        "results_grid",
        &outcome.result.columns,
        outcome.visible_rows().take(MAX_DISPLAY_ROWS),
        outcome.result.column_index(RISK_SCORE_COLUMN),
        state.dark_mode,
        f32::INFINITY,
    );
}

/// Returns true when the user dismissed the banner.
fn error_banner(ui: &mut egui::Ui, message: &str) -> bool {
    let mut dismissed = false;
    ui.horizontal_wrapped(|ui| {
        ui.label(
            egui::RichText::new(format!(" {message} "))
                .color(theme::ERROR_TEXT)
                .background_color(theme::ERROR_BG),
        );
        if ui.small_button("Dismiss").clicked() {
            dismissed = true;
        }
    });
    dismissed
}
