use egui::{RichText, Ui};
use members_business::{Member, MemberField, MembersTableState};

use super::TableIntent;
use super::cells::{data_cell, edit_cell, select_checkbox};
use crate::utils::colors::DANGER_RED;

/// One member row. The row being edited shows inputs and Save/Cancel,
/// every other row shows text and Edit/Delete.
pub fn render_member_row(
    ui: &mut Ui,
    table: &MembersTableState,
    member: &Member,
    intents: &mut Vec<TableIntent>,
) {
    let key = member.key;
    let selected = table.is_selected(&key);
    let editing = table.is_editing(&key);

    data_cell(ui, selected, |ui| {
        let mut checked = selected;
        if select_checkbox(ui, &mut checked, &format!("Select {}", member.name)).changed() {
            intents.push(TableIntent::ToggleRow(key, checked));
        }
    });

    for field in MemberField::ALL {
        data_cell(ui, selected, |ui| {
            if editing {
                if let Some(value) = edit_cell(ui, key, field, table.cell_value(member, field)) {
                    intents.push(TableIntent::SetField(key, field, value));
                }
            } else {
                ui.label(member.field(field));
            }
        });
    }

    data_cell(ui, selected, |ui| {
        ui.horizontal(|ui| {
            if editing {
                if ui.button("Save").clicked() {
                    intents.push(TableIntent::Save(key));
                }
                if ui.button("Cancel").clicked() {
                    intents.push(TableIntent::Cancel(key));
                }
            } else {
                if ui.button("Edit").clicked() {
                    intents.push(TableIntent::Edit(key));
                }
                if ui.button(RichText::new("Delete").color(DANGER_RED)).clicked() {
                    intents.push(TableIntent::Delete(key));
                }
            }
        });
    });

    ui.end_row();
}
