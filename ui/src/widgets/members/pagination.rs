//! Page control: total, prev, page numbers, next and a quick-jump box.
//!
//! There is no page-size picker; the size comes from configuration.

use egui::{Button, Id, Key, TextEdit, Ui};
use members_business::{MembersTableState, PageItem};

const PREV_LABEL: &str = "‹ Prev";
const NEXT_LABEL: &str = "Next ›";
const JUMP_LABEL: &str = "Go to";

/// Renders the control centered under the table.
///
/// egui lays out left to right in one pass, so the control's width from the
/// previous frame is used to pad it into the middle.
pub fn render_pagination(ui: &mut Ui, table: &mut MembersTableState) {
    let width_id = Id::new("members_pagination_width");
    let last_width: f32 = ui.data(|data| data.get_temp(width_id)).unwrap_or_default();

    ui.horizontal(|ui| {
        ui.add_space(((ui.available_width() - last_width) / 2.0).max(0.0));
        let controls = ui.horizontal(|ui| pagination_controls(ui, table)).response;
        ui.data_mut(|data| data.insert_temp(width_id, controls.rect.width()));
    });
}

fn pagination_controls(ui: &mut Ui, table: &mut MembersTableState) {
    ui.label(format!("Total {} items", table.displayed_len()));

    let current = table.current_page();
    if ui.add_enabled(current > 1, Button::new(PREV_LABEL)).clicked() {
        table.prev_page();
    }

    for item in table.page_items() {
        match item {
            PageItem::Page(page) => {
                if ui
                    .selectable_label(page == table.current_page(), page.to_string())
                    .clicked()
                {
                    table.set_page(page);
                }
            }
            PageItem::Ellipsis => {
                ui.label("…");
            }
        }
    }

    let has_next = table.current_page() < table.page_count();
    if ui.add_enabled(has_next, Button::new(NEXT_LABEL)).clicked() {
        table.next_page();
    }

    ui.label(JUMP_LABEL);
    let jump = ui.add(
        TextEdit::singleline(table.jump_input_mut())
            .id_salt("members_quick_jump")
            .desired_width(40.0),
    );
    if jump.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter)) {
        table.commit_quick_jump();
    }
}
