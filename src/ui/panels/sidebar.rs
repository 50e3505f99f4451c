// ClaimAudit - ui/panels/sidebar.rs
//
// Filter options sidebar: cost range, pharmacy and patient filters, audit
// selection, and the Run Audit trigger.

use crate::app::state::AppState;
use crate::core::audit::AuditKind;
use crate::util::constants::COST_DRAG_SPEED;

/// Render the sidebar controls.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    egui::Grid::new("cost_inputs")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            ui.label("Minimum Cost");
            ui.add(
                egui::DragValue::new(&mut state.cost_range.min)
                    .range(0.0..=f64::MAX)
                    .speed(COST_DRAG_SPEED)
                    .fixed_decimals(2),
            );
            ui.end_row();

            ui.label("Maximum Cost");
            ui.add(
                egui::DragValue::new(&mut state.cost_range.max)
                    .range(0.0..=f64::MAX)
                    .speed(COST_DRAG_SPEED)
                    .fixed_decimals(2),
            );
            ui.end_row();
        });

    if state.cost_range.min > state.cost_range.max {
        ui.label(
            egui::RichText::new("Minimum exceeds maximum: no claim can match.")
                .small()
                .color(crate::ui::theme::NOTE_TEXT),
        );
    }

    ui.add_space(6.0);
    ui.label("Pharmacy ID (optional)");
    ui.text_edit_singleline(&mut state.filter_state.pharmacy_id);
    ui.label("Patient ID (optional)");
    ui.text_edit_singleline(&mut state.filter_state.patient_id);

    ui.add_space(4.0);
    if ui.small_button("Reset Filters").clicked() {
        state.reset_parameters();
    }

    ui.separator();

    ui.label("Select Audit Type");
    egui::ComboBox::from_id_salt("audit_type")
        .selected_text(state.selected_audit.label())
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for kind in AuditKind::all() {
                ui.selectable_value(&mut state.selected_audit, *kind, kind.label());
            }
        });

    ui.add_space(8.0);
    let loaded = state.session.has_table();
    let run = ui
        .add_enabled(loaded, egui::Button::new("Run Audit"))
        .on_disabled_hover_text("Open a claims CSV first.");
    if run.clicked() {
        state.run_audit();
    }
}
