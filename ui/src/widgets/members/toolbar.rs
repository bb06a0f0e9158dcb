use egui::{Align, Layout, RichText, TextEdit, Ui};
use members_business::MembersTableState;

use crate::utils::colors::DANGER_RED;

const SEARCH_HINT: &str = "Search...";
const DELETE_SELECTED: &str = "Delete Selected";

pub fn render_toolbar(ui: &mut Ui, table: &mut MembersTableState) {
    ui.horizontal(|ui| {
        let mut text = table.search_text().to_owned();
        let search = ui.add(
            TextEdit::singleline(&mut text)
                .id_salt("members_search")
                .hint_text(SEARCH_HINT)
                .desired_width(320.0),
        );
        if search.changed() {
            table.search(text);
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui
                .button(RichText::new(DELETE_SELECTED).color(DANGER_RED))
                .clicked()
            {
                table.delete_selected();
            }

            let selected = table.selected_count();
            if selected > 0 {
                ui.label(format!("{selected} selected"));
            }
        });
    });
}
