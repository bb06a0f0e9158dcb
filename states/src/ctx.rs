use std::any::{TypeId, type_name};
use std::collections::BTreeMap;

use flume::{Receiver, Sender};
use tokio_util::sync::CancellationToken;

use crate::command::Update;
use crate::{Command, CommandSnapshot, Error, State, TaskHandle, TaskId, Updater, runtime};

struct Slot {
    name: &'static str,
    value: Box<dyn State>,
}

/// Owner of all UI-thread state.
///
/// States are registered once with `add_state`, read and mutated by type,
/// and receive async results from commands through `sync`, which the app
/// calls at the start of every frame.
pub struct StateCtx {
    states: BTreeMap<TypeId, Slot>,
    commands: BTreeMap<TypeId, (&'static str, Box<dyn Command>)>,
    tasks: BTreeMap<TypeId, TaskHandle>,
    seq: u64,
    send: Sender<Update>,
    recv: Receiver<Update>,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self {
            states: BTreeMap::new(),
            commands: BTreeMap::new(),
            tasks: BTreeMap::new(),
            seq: 0,
            send,
            recv,
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        self.states.insert(
            TypeId::of::<T>(),
            Slot {
                name: type_name::<T>(),
                value: Box::new(state),
            },
        );
    }

    pub fn record_command<C: Command>(&mut self, command: C) {
        self.commands
            .insert(TypeId::of::<C>(), (type_name::<C>(), Box::new(command)));
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.value.as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::state_not_found(type_name::<T>(), "StateCtx::state"))
    }

    pub fn try_state_mut<T: State>(&mut self) -> Result<&mut T, Error> {
        self.states
            .get_mut(&TypeId::of::<T>())
            .and_then(|slot| slot.value.as_any_mut().downcast_mut::<T>())
            .ok_or_else(|| Error::state_not_found(type_name::<T>(), "StateCtx::state_mut"))
    }

    /// # Panics
    /// Panics if `T` was never registered with `add_state`.
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>().unwrap_or_else(|err| panic!("{err}"))
    }

    /// # Panics
    /// Panics if `T` was never registered with `add_state`.
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        self.try_state_mut::<T>().unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        f(self.state_mut::<T>());
    }

    /// An updater not tied to any task; its values are always applied.
    pub fn updater(&self) -> Updater {
        Updater::new(self.send.clone(), None)
    }

    /// Runs a registered command in the background.
    ///
    /// A still-running task for the same command is cancelled first.
    pub fn dispatch<C: Command>(&mut self) -> Result<TaskId, Error> {
        let type_id = TypeId::of::<C>();
        let Some((name, command)) = self.commands.get(&type_id) else {
            return Err(Error::CommandNotFound {
                name: type_name::<C>(),
            });
        };
        let name = *name;

        let mut snap = CommandSnapshot::new();
        for (id, slot) in &self.states {
            if let Some(value) = slot.value.snapshot() {
                snap.insert_cloned(*id, value);
            }
        }

        self.seq += 1;
        let task_id = TaskId::new(type_id, self.seq);
        let token = CancellationToken::new();
        let updater = Updater::new(self.send.clone(), Some(task_id));
        let task = command.run(snap, updater, token.clone());

        runtime::spawn(name, task)?;
        log::debug!("dispatched {name} as run {}", task_id.seq());

        if let Some(previous) = self.tasks.insert(type_id, TaskHandle::new(task_id, token)) {
            previous.cancel();
        }

        Ok(task_id)
    }

    pub fn task<C: Command>(&self) -> Option<&TaskHandle> {
        self.tasks.get(&TypeId::of::<C>())
    }

    /// Applies every pending update. Returns how many were applied.
    pub fn sync(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(update) = self.recv.try_recv() {
            if let Some(origin) = update.origin {
                let superseded = self
                    .tasks
                    .get(&origin.command())
                    .is_some_and(|handle| handle.id().supersedes(&origin));
                if superseded {
                    log::debug!(
                        "dropping stale update for {} from run {}",
                        update.name,
                        origin.seq()
                    );
                    continue;
                }
            }

            match self.states.get_mut(&update.target) {
                Some(slot) => {
                    slot.value.assign_box(update.value);
                    applied += 1;
                }
                None => log::warn!("update for unregistered state {}", update.name),
            }
        }
        applied
    }
}

impl Drop for StateCtx {
    fn drop(&mut self) {
        for handle in self.tasks.values() {
            handle.cancel();
        }
    }
}

impl std::fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let states: Vec<&str> = self.states.values().map(|slot| slot.name).collect();
        let commands: Vec<&str> = self.commands.values().map(|(name, _)| *name).collect();
        f.debug_struct("StateCtx")
            .field("states", &states)
            .field("commands", &commands)
            .field("seq", &self.seq)
            .finish_non_exhaustive()
    }
}
