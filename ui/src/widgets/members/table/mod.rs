//! Members table rendering.
//!
//! Rendering only reads [`MembersTableState`]. Clicks and keystrokes come
//! back as [`TableIntent`]s that the panel applies after the grid is drawn.

mod cells;
pub mod header;
pub mod row;

use egui::{Frame, Grid, Margin, ScrollArea, Stroke, Ui};
use members_business::{MemberField, MemberKey, MembersTableState};

use crate::utils::colors::TABLE_BORDER;

/// Checkbox, name, email, role, actions.
pub const COLUMN_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableIntent {
    SelectAll(bool),
    ToggleRow(MemberKey, bool),
    Edit(MemberKey),
    SetField(MemberKey, MemberField, String),
    Save(MemberKey),
    Cancel(MemberKey),
    Delete(MemberKey),
}

impl TableIntent {
    pub fn apply(self, table: &mut MembersTableState) {
        match self {
            Self::SelectAll(checked) => table.select_all(checked),
            Self::ToggleRow(key, checked) => table.toggle_row(key, checked),
            Self::Edit(key) => table.edit(key),
            Self::SetField(key, field, value) => table.set_field(key, field, value),
            Self::Save(key) => table.save(key),
            Self::Cancel(key) => table.cancel(key),
            Self::Delete(key) => table.delete_one(key),
        }
    }
}

/// Draws the current page and returns what the user asked for.
pub fn members_table(table: &MembersTableState, ui: &mut Ui) -> Vec<TableIntent> {
    let mut intents = Vec::new();

    Frame::NONE
        .stroke(Stroke::new(1.0, TABLE_BORDER))
        .inner_margin(Margin::ZERO)
        .show(ui, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    Grid::new("members_table")
                        .num_columns(COLUMN_COUNT)
                        .striped(true)
                        .spacing([0.0, 0.0])
                        .min_col_width(40.0)
                        .show(ui, |ui| {
                            intents.extend(header::render_table_header(ui, table));
                            for member in table.page_members() {
                                row::render_member_row(ui, table, member, &mut intents);
                            }
                        });
                });
        });

    intents
}

#[cfg(test)]
mod tests {
    use super::*;
    use members_business::{EditMode, Member};
    use ustr::Ustr;

    #[test]
    fn intents_route_to_table_operations() {
        let mut table = MembersTableState::new(10, EditMode::Live);
        table.populate(
            vec![
                Member::new("1", "Ann", "a@x.com", "Admin"),
                Member::new("2", "Bo", "b@x.com", "User"),
            ],
            chrono::Utc::now(),
        );
        let ann = Ustr::from("1");

        TableIntent::Edit(ann).apply(&mut table);
        TableIntent::SetField(ann, MemberField::Name, "Annie".to_owned()).apply(&mut table);
        TableIntent::Save(ann).apply(&mut table);
        assert_eq!(table.member(&ann).map(|m| m.name.as_str()), Some("Annie"));

        TableIntent::SelectAll(true).apply(&mut table);
        assert!(table.all_selected());
        TableIntent::ToggleRow(ann, false).apply(&mut table);
        assert!(!table.all_selected());

        TableIntent::Delete(Ustr::from("2")).apply(&mut table);
        assert_eq!(table.displayed_len(), 1);
    }
}
