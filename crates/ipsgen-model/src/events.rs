//! Change notifications for model objects

use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// What changed inside an object
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentChange {
    /// Unspecific change of the whole object
    WholeContent,
    /// A property of a part changed, e.g. the value set of an attribute
    PartChanged { part: String, property: String },
    PartAdded { part: String },
    PartRemoved { part: String },
}

/// A change of one model object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentChangeEvent {
    /// Qualified name of the changed object.
    pub object: String,
    pub change: ContentChange,
}

impl ContentChangeEvent {
    pub fn whole_content(object: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            change: ContentChange::WholeContent,
        }
    }

    pub fn part_changed(
        object: impl Into<String>,
        part: impl Into<String>,
        property: impl Into<String>,
    ) -> Self {
        Self {
            object: object.into(),
            change: ContentChange::PartChanged {
                part: part.into(),
                property: property.into(),
            },
        }
    }

    pub fn part_added(object: impl Into<String>, part: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            change: ContentChange::PartAdded { part: part.into() },
        }
    }
}

/// Listener callback for change events
pub type ChangeListener = Arc<dyn Fn(&ContentChangeEvent) + Send + Sync>;

/// Handle returned on registration, used to remove the listener again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registered listeners, optionally restricted to one object
#[derive(Default)]
pub struct ChangeListeners {
    next_id: AtomicU64,
    listeners: RwLock<Vec<(ListenerId, Option<String>, ChangeListener)>>,
}

impl ChangeListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen to changes of every object.
    pub fn add(&self, listener: ChangeListener) -> ListenerId {
        self.register(None, listener)
    }

    /// Listen to changes of one object.
    pub fn add_for(&self, object: impl Into<String>, listener: ChangeListener) -> ListenerId {
        self.register(Some(object.into()), listener)
    }

    fn register(&self, object: Option<String>, listener: ChangeListener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, object, listener));
        id
    }

    pub fn remove(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(listener_id, _, _)| *listener_id != id);
        before != listeners.len()
    }

    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }

    /// Deliver an event to every interested listener.
    pub fn fire(&self, event: &ContentChangeEvent) {
        // listeners may register others while being notified
        let targets: Vec<ChangeListener> = self
            .listeners
            .read()
            .iter()
            .filter(|(_, object, _)| object.as_deref().is_none_or(|o| o == event.object))
            .map(|(_, _, listener)| Arc::clone(listener))
            .collect();
        tracing::trace!(object = %event.object, listeners = targets.len(), "content changed");
        for listener in targets {
            listener(event);
        }
    }
}

impl std::fmt::Debug for ChangeListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeListeners")
            .field("count", &self.len())
            .finish()
    }
}
