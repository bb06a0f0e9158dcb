//! Shared color constants for the UI.

use egui::Color32;

/// Subtle gray used for table borders.
pub const TABLE_BORDER: Color32 = Color32::from_rgb(200, 200, 200);

/// Light gray header background.
pub const HEADER_BG: Color32 = Color32::from_rgb(245, 245, 245);

/// Pale blue fill behind selected rows.
pub const SELECTED_ROW_BG: Color32 = Color32::from_rgb(230, 244, 255);

/// Red for destructive actions.
pub const DANGER_RED: Color32 = Color32::from_rgb(220, 53, 69);
