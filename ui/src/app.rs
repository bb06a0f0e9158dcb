use std::time::Duration;

use members_business::{MembersTableState, apply_settled_load};

use crate::{state::State, widgets};

/// How often to repaint while waiting on the network.
const LOADING_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

pub struct MembersAdminApp {
    pub state: State,
}

impl MembersAdminApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }
}

impl eframe::App for MembersAdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.ctx.sync();
        self.state.ensure_initial_load();
        apply_settled_load(&mut self.state.ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Members");
            ui.separator();
            widgets::members_panel(&mut self.state.ctx, ui);
        });

        // Command results arrive off-frame; keep polling until the load lands.
        if self.state.ctx.state::<MembersTableState>().is_loading() {
            ctx.request_repaint_after(LOADING_REPAINT_INTERVAL);
        }
    }
}
