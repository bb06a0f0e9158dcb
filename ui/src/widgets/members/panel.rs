use egui::{Response, Ui};
use members_business::MembersTableState;
use members_states::StateCtx;

use super::pagination::render_pagination;
use super::table::members_table;
use super::toolbar::render_toolbar;

const LOADING_LABEL: &str = "Loading members...";
const EMPTY_LABEL: &str = "No data";

/// Toolbar, one page of the table, then the page control.
pub fn members_panel(state_ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    let table = state_ctx.state_mut::<MembersTableState>();

    ui.vertical(|ui| {
        render_toolbar(ui, table);
        ui.add_space(8.0);

        // Collect while rendering, apply once the grid no longer borrows the rows.
        let intents = members_table(table, ui);
        if !intents.is_empty() {
            for intent in intents {
                intent.apply(table);
            }
            ui.ctx().request_repaint();
        }

        if table.is_loading() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(LOADING_LABEL);
            });
        } else if table.displayed_len() == 0 {
            ui.weak(EMPTY_LABEL);
        }

        ui.add_space(8.0);
        render_pagination(ui, table);
    })
    .response
}
