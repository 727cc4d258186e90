//! Gesture sessions and document-level listener bookkeeping.
//!
//! A gesture keeps tracking the pointer after it leaves the element it started
//! on, so move/up handling is registered on the document for the duration of
//! the gesture. Each registration is an RAII [`ListenerGuard`] owned by a
//! [`GestureSession`]; dropping the session removes exactly the listeners it
//! added.

use crate::geometry::Point;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// Which pointer events a document listener wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerMove,
    PointerUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug)]
struct Registration {
    owner: &'static str,
    kind: ListenerKind,
}

#[derive(Debug, Default)]
struct DocumentInner {
    next_id: AtomicU64,
    listeners: Mutex<HashMap<ListenerId, Registration>>,
}

/// Document-level listener registry shared by all controllers of one view.
///
/// Cloning is cheap and every clone refers to the same registry.
#[derive(Debug, Clone, Default)]
pub struct Document {
    inner: Arc<DocumentInner>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it stays registered until the guard is dropped.
    pub fn listen(&self, owner: &'static str, kind: ListenerKind) -> ListenerGuard {
        let id = ListenerId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.inner
            .listeners
            .lock()
            .insert(id, Registration { owner, kind });
        trace!(owner, ?kind, "document listener attached");
        ListenerGuard {
            document: self.clone(),
            id,
        }
    }

    /// Number of listeners currently attached.
    pub fn active_listeners(&self) -> usize {
        self.inner.listeners.lock().len()
    }

    /// Number of listeners currently attached by `owner`.
    pub fn listeners_for(&self, owner: &str) -> usize {
        self.inner
            .listeners
            .lock()
            .values()
            .filter(|registration| registration.owner == owner)
            .count()
    }

    fn detach(&self, id: ListenerId) {
        if let Some(registration) = self.inner.listeners.lock().remove(&id) {
            trace!(
                owner = registration.owner,
                kind = ?registration.kind,
                "document listener detached"
            );
        }
    }
}

/// Removes its listener from the document when dropped.
#[derive(Debug)]
pub struct ListenerGuard {
    document: Document,
    id: ListenerId,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.document.detach(self.id);
    }
}

/// One pointer-down → move* → up interaction.
///
/// Holds the pointer origin and the move/up listeners registered for the
/// gesture. The controller that created it decides what else to remember.
#[derive(Debug)]
pub struct GestureSession {
    origin: Point,
    last: Point,
    _listeners: [ListenerGuard; 2],
}

impl GestureSession {
    pub fn begin(document: &Document, owner: &'static str, origin: Point) -> Self {
        Self {
            origin,
            last: origin,
            _listeners: [
                document.listen(owner, ListenerKind::PointerMove),
                document.listen(owner, ListenerKind::PointerUp),
            ],
        }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Last pointer position seen by the session.
    pub fn last(&self) -> Point {
        self.last
    }

    /// Record a new pointer position and return the cumulative delta from the
    /// origin.
    pub fn track(&mut self, position: Point) -> Point {
        self.last = position;
        position - self.origin
    }
}
