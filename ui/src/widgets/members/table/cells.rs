//! Cell frames and the small widgets that go inside them.

use egui::{Color32, Frame, InnerResponse, Margin, Response, TextEdit, Ui, WidgetInfo, WidgetType};
use members_business::{MemberField, MemberKey};

use crate::utils::colors::{HEADER_BG, SELECTED_ROW_BG};

const EDIT_WIDTH: f32 = 160.0;

pub fn header_cell<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> InnerResponse<R> {
    Frame::NONE
        .fill(HEADER_BG)
        .inner_margin(Margin::symmetric(8, 8))
        .show(ui, add_contents)
}

/// Selected rows get a tinted background.
pub fn data_cell<R>(
    ui: &mut Ui,
    selected: bool,
    add_contents: impl FnOnce(&mut Ui) -> R,
) -> InnerResponse<R> {
    let fill = if selected {
        SELECTED_ROW_BG
    } else {
        Color32::TRANSPARENT
    };
    Frame::NONE
        .fill(fill)
        .inner_margin(Margin::symmetric(8, 6))
        .show(ui, add_contents)
}

/// A text-less checkbox that still carries an accessible label.
pub fn select_checkbox(ui: &mut Ui, checked: &mut bool, label: &str) -> Response {
    let response = ui.checkbox(checked, "");
    let value = *checked;
    response.widget_info(|| WidgetInfo::selected(WidgetType::Checkbox, true, value, label));
    response
}

/// Inline editor for one field. Returns the new text when it changed.
pub fn edit_cell(ui: &mut Ui, key: MemberKey, field: MemberField, current: &str) -> Option<String> {
    let mut buffer = current.to_owned();
    let response = ui.add(
        TextEdit::singleline(&mut buffer)
            .id_salt(("member_edit", key, field))
            .hint_text(field.label())
            .desired_width(EDIT_WIDTH),
    );
    response.changed().then_some(buffer)
}
