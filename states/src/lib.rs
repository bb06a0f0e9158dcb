mod command;
mod ctx;
mod error;
mod runtime;
mod snapshot;
mod state;
mod task;

pub use command::{Command, Updater};
pub use ctx::StateCtx;
pub use error::Error;
pub use runtime::BoxedTask;
pub use snapshot::CommandSnapshot;
pub use state::{State, state_assign_impl};
pub use task::{TaskHandle, TaskId};
