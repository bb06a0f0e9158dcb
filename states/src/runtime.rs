use std::future::Future;
use std::pin::Pin;

use crate::Error;

pub type BoxedTask = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Spawns a command future on the ambient executor.
///
/// Native builds need an entered tokio runtime (the binary enters one before
/// starting eframe, `#[tokio::test]` provides one in tests). Web builds hand
/// the future to the browser's microtask queue.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn spawn(name: &'static str, task: BoxedTask) -> Result<(), Error> {
    let handle = tokio::runtime::Handle::try_current().map_err(|_| Error::NoRuntime { name })?;
    drop(handle.spawn(task));
    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn spawn(_name: &'static str, task: BoxedTask) -> Result<(), Error> {
    wasm_bindgen_futures::spawn_local(task);
    Ok(())
}
