//! Members "load" status + the command that fills it.
//!
//! - `LoadMembersCommand` performs the network IO and publishes progress into
//!   `MembersLoadStatus` via `Updater::set()`.
//! - `apply_settled_load` moves a finished result into `MembersTableState`
//!   exactly once; the app calls it every frame after `StateCtx::sync`.

use std::any::Any;

use chrono::{DateTime, Utc};
use members_states::{
    BoxedTask, Command, CommandSnapshot, State, StateCtx, Updater, state_assign_impl,
};
use tokio_util::sync::CancellationToken;

use crate::BusinessConfig;
use crate::members::api::fetch_members;
use crate::members::model::Member;
use crate::members::table::MembersTableState;

#[derive(Debug, Clone, Default)]
pub enum MembersLoadResult {
    /// Nothing requested, or the last result was already applied.
    #[default]
    Idle,

    Loading,

    Loaded {
        members: Vec<Member>,
        fetched_at: DateTime<Utc>,
    },

    /// The message is for logs only; the table just stays empty.
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct MembersLoadStatus {
    pub result: MembersLoadResult,
}

impl MembersLoadStatus {
    pub fn loading() -> Self {
        Self {
            result: MembersLoadResult::Loading,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            result: MembersLoadResult::Failed(message.into()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.result, MembersLoadResult::Loading)
    }

    pub fn is_settled(&self) -> bool {
        matches!(
            self.result,
            MembersLoadResult::Loaded { .. } | MembersLoadResult::Failed(_)
        )
    }

    /// Hands out a finished result and resets to `Idle`.
    pub fn take_settled(&mut self) -> Option<MembersLoadResult> {
        if self.is_settled() {
            Some(std::mem::take(&mut self.result))
        } else {
            None
        }
    }
}

impl State for MembersLoadStatus {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

/// Fetches the members list once. Dispatch via `ctx.dispatch::<LoadMembersCommand>()`.
#[derive(Debug, Default)]
pub struct LoadMembersCommand;

impl Command for LoadMembersCommand {
    fn run(&self, snap: CommandSnapshot, updater: Updater, cancel: CancellationToken) -> BoxedTask {
        let config = snap.state::<BusinessConfig>();

        Box::pin(async move {
            let config = match config {
                Ok(config) => config,
                Err(err) => {
                    log::error!("LoadMembersCommand: {err}");
                    updater.set(MembersLoadStatus::failed(err.to_string()));
                    return;
                }
            };

            updater.set(MembersLoadStatus::loading());
            log::info!("Loading members from {}", config.members_url);

            let result = tokio::select! {
                () = cancel.cancelled() => {
                    log::debug!("members load cancelled");
                    return;
                }
                result = fetch_members(&config.members_url) => result,
            };

            match result {
                Ok(members) => {
                    log::info!("Loaded {} members", members.len());
                    updater.set(MembersLoadStatus {
                        result: MembersLoadResult::Loaded {
                            members,
                            fetched_at: Utc::now(),
                        },
                    });
                }
                Err(err) => {
                    log::error!("Error fetching members: {err}");
                    updater.set(MembersLoadStatus::failed(err.to_string()));
                }
            }
        })
    }
}

/// Moves a settled load into the table. Returns `true` when something was applied.
pub fn apply_settled_load(ctx: &mut StateCtx) -> bool {
    let Some(result) = ctx.state_mut::<MembersLoadStatus>().take_settled() else {
        return false;
    };

    let table = ctx.state_mut::<MembersTableState>();
    match result {
        MembersLoadResult::Loaded {
            members,
            fetched_at,
        } => table.populate(members, fetched_at),
        MembersLoadResult::Failed(_) => table.finish_without_data(),
        MembersLoadResult::Idle | MembersLoadResult::Loading => {}
    }
    true
}
