use members_business::{BusinessConfig, LoadMembersCommand, MembersLoadStatus, MembersTableState};
use members_states::StateCtx;

/// The main application state.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
    initial_load_requested: bool,
}

impl Default for State {
    fn default() -> Self {
        Self::new(BusinessConfig::default())
    }
}

impl State {
    pub fn new(config: BusinessConfig) -> Self {
        let mut ctx = StateCtx::new();

        ctx.add_state(MembersTableState::from_config(&config));
        ctx.add_state(MembersLoadStatus::default());
        ctx.add_state(config);
        ctx.record_command(LoadMembersCommand);

        Self {
            ctx,
            initial_load_requested: false,
        }
    }

    /// State pointed at `{base_url}/members.json`, for mock servers.
    pub fn test(base_url: String) -> Self {
        let url = format!("{}/members.json", base_url.trim_end_matches('/'));
        Self::new(BusinessConfig::new(url))
    }

    /// Starts the one and only members fetch. Later calls do nothing.
    pub fn ensure_initial_load(&mut self) {
        if self.initial_load_requested {
            return;
        }
        self.initial_load_requested = true;

        self.ctx.state_mut::<MembersTableState>().begin_loading();
        if let Err(err) = self.ctx.dispatch::<LoadMembersCommand>() {
            log::error!("Could not start members load: {err}");
            self.ctx.state_mut::<MembersTableState>().finish_without_data();
        }
    }

    pub fn initial_load_requested(&self) -> bool {
        self.initial_load_requested
    }
}
