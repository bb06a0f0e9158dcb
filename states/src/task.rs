//! Bookkeeping for dispatched commands.
//!
//! A dispatch is identified by its command type plus a sequence number taken
//! from the owning `StateCtx`. Re-dispatching a command trips the previous
//! run's token, and `sync` discards whatever the older run still publishes.

use std::any::TypeId;

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    command: TypeId,
    seq: u64,
}

impl TaskId {
    pub fn new(command: TypeId, seq: u64) -> Self {
        Self { command, seq }
    }

    pub fn command(&self) -> TypeId {
        self.command
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Same command, dispatched later.
    pub fn supersedes(&self, other: &Self) -> bool {
        self.command == other.command && self.seq > other.seq
    }
}

/// The latest run of one command. Cancellation only takes effect where the
/// task awaits its token.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    token: CancellationToken,
}

impl TaskHandle {
    pub fn new(id: TaskId, token: CancellationToken) -> Self {
        Self { id, token }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn cancel(&self) {
        log::debug!("cancelling run {}", self.id.seq);
        self.token.cancel();
    }
}
