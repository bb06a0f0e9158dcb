use std::any::{Any, TypeId, type_name};

use flume::Sender;
use tokio_util::sync::CancellationToken;

use crate::runtime::BoxedTask;
use crate::{CommandSnapshot, State, TaskId};

/// A value published from a command, applied on the next `StateCtx::sync`.
pub(crate) struct Update {
    pub(crate) target: TypeId,
    pub(crate) name: &'static str,
    pub(crate) origin: Option<TaskId>,
    pub(crate) value: Box<dyn Any + Send>,
}

/// Manual-only side effect, dispatched explicitly via `StateCtx::dispatch`.
///
/// Commands never touch `StateCtx`: they read the snapshot taken at dispatch
/// time and publish results through the `Updater`.
pub trait Command: Send + Sync + 'static {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> BoxedTask;
}

/// Publishes whole state values back to the owning `StateCtx`.
///
/// Updaters created for a dispatched task are latest-only: once the same
/// command is dispatched again, values from the older task are dropped.
#[derive(Clone)]
pub struct Updater {
    send: Sender<Update>,
    origin: Option<TaskId>,
}

impl Updater {
    pub(crate) fn new(send: Sender<Update>, origin: Option<TaskId>) -> Self {
        Self { send, origin }
    }

    pub fn set<T: State + Send>(&self, value: T) {
        let update = Update {
            target: TypeId::of::<T>(),
            name: type_name::<T>(),
            origin: self.origin,
            value: Box::new(value),
        };
        if self.send.send(update).is_err() {
            log::debug!(
                "state context dropped, discarding update for {}",
                type_name::<T>()
            );
        }
    }
}

impl std::fmt::Debug for Updater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Updater")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}
