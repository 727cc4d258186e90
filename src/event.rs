//! Synchronous host callbacks.

/// A host callback receiving plain event data on the UI thread.
pub type Callback<E> = Box<dyn FnMut(&E) + Send>;

/// Invoke `callback` if the host registered one.
pub(crate) fn emit<E>(callback: &mut Option<Callback<E>>, event: &E) {
    if let Some(callback) = callback.as_mut() {
        callback(event);
    }
}
