use std::any::{Any, type_name};

/// A value owned by [`crate::StateCtx`], addressed by its concrete type.
///
/// `snapshot` decides whether commands may read the state: returning `None`
/// keeps a state private to the UI thread. `assign_box` receives values
/// published through an [`crate::Updater`].
pub trait State: Any {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        None
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Replaces `target` with the boxed value when the types line up.
///
/// Mismatches are logged and dropped; they can only come from a bug in
/// an updater call site.
pub fn state_assign_impl<T: State>(target: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *target = *value,
        Err(_) => log::warn!(
            "discarding update with mismatched type for {}",
            type_name::<T>()
        ),
    }
}
