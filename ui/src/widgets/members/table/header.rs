use egui::Ui;
use members_business::MembersTableState;

use super::TableIntent;
use super::cells::{header_cell, select_checkbox};

const HEADERS: [&str; 4] = ["Name", "Email", "Role", "Actions"];

/// Header row. The checkbox reflects whether every displayed row, on any
/// page, is selected.
pub fn render_table_header(ui: &mut Ui, table: &MembersTableState) -> Option<TableIntent> {
    let mut checked = table.all_selected();
    let toggled = header_cell(ui, |ui| {
        select_checkbox(ui, &mut checked, "Select all rows")
            .on_hover_text("All Pages")
            .changed()
    })
    .inner;

    for label in HEADERS {
        header_cell(ui, |ui| {
            ui.strong(label);
        });
    }
    ui.end_row();

    toggled.then_some(TableIntent::SelectAll(checked))
}
