// ClaimAudit - ui/theme.rs
//
// Colour scheme, cell colour mapping, and layout constants.
// No dependencies on app state or business logic.

use crate::core::model::Value;
use crate::util::constants::{DEFAULT_FONT_SIZE, HIGH_RISK_THRESHOLD_PCT};
use egui::Color32;

/// Apply the dark or light egui theme and the body font size.
pub fn apply(ctx: &egui::Context, dark_mode: bool) {
    if dark_mode {
        ctx.set_visuals(egui::Visuals::dark());
    } else {
        ctx.set_visuals(egui::Visuals::light());
    }

    let mut style = (*ctx.style()).clone();
    if let Some(body) = style.text_styles.get_mut(&egui::TextStyle::Body) {
        body.size = DEFAULT_FONT_SIZE;
    }
    ctx.set_style(style);
}

/// Colour for a risk score cell: red above the high-risk threshold, amber
/// for any positive deviation, green below the drug mean.
pub fn risk_colour(value: &Value, dark_mode: bool) -> Option<Color32> {
    let score = value.as_f64()?;
    let colour = if score >= HIGH_RISK_THRESHOLD_PCT {
        if dark_mode {
            Color32::from_rgb(248, 113, 113) // Red 400
        } else {
            Color32::from_rgb(185, 28, 28) // Red 700
        }
    } else if score > 0.0 {
        if dark_mode {
            Color32::from_rgb(253, 186, 116) // Orange 300
        } else {
            Color32::from_rgb(194, 65, 12) // Orange 700
        }
    } else if dark_mode {
        Color32::from_rgb(134, 239, 172) // Green 300
    } else {
        Color32::from_rgb(21, 128, 61) // Green 700
    };
    Some(colour)
}

/// Colour for missing and undefined cells.
pub fn placeholder_colour(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(107, 114, 128) // Gray 500
    } else {
        Color32::from_rgb(156, 163, 175) // Gray 400
    }
}

/// Error banner colours.
pub const ERROR_TEXT: Color32 = Color32::from_rgb(248, 113, 113); // Red 400
pub const ERROR_BG: Color32 = Color32::from_rgba_premultiplied(185, 28, 28, 40);

/// Note (caveat) text colour.
pub const NOTE_TEXT: Color32 = Color32::from_rgb(253, 186, 116); // Orange 300

/// Layout constants.
pub const SIDEBAR_WIDTH: f32 = 260.0;
pub const CELL_FONT_SIZE: f32 = 12.5;
pub const GRID_SPACING: [f32; 2] = [14.0, 3.0];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_colour_only_for_numbers() {
        assert!(risk_colour(&Value::Undefined, true).is_none());
        assert!(risk_colour(&Value::Null, true).is_none());
        assert!(risk_colour(&Value::Float(75.0), true).is_some());
    }

    #[test]
    fn test_risk_colour_bands_differ() {
        let high = risk_colour(&Value::Float(HIGH_RISK_THRESHOLD_PCT), true);
        let raised = risk_colour(&Value::Float(1.0), true);
        let below = risk_colour(&Value::Float(-20.0), true);
        assert_ne!(high, raised);
        assert_ne!(raised, below);
    }
}
