use crate::foundation::core::{ElementId, Millis, Viewport};
use crate::host::stage::World;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Signals delivered by the host environment.
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    /// The page scrolled to vertical position `y`.
    Scroll {
        /// New scroll position in pixels.
        y: f64,
    },
    /// The viewport changed size.
    Resize {
        /// New viewport.
        viewport: Viewport,
    },
    /// One animation frame elapsed.
    Frame {
        /// Host time after the frame.
        now: Millis,
        /// Time covered by the frame.
        dt: Millis,
    },
    /// A looping CSS animation on `element` completed one iteration.
    AnimationIteration {
        /// Element whose animation iterated.
        element: ElementId,
    },
}

impl HostEvent {
    /// Discriminant used for subscription filtering.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Scroll { .. } => EventKind::Scroll,
            Self::Resize { .. } => EventKind::Resize,
            Self::Frame { .. } => EventKind::Frame,
            Self::AnimationIteration { .. } => EventKind::AnimationIteration,
        }
    }
}

/// Event categories a listener can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// [`HostEvent::Scroll`].
    Scroll,
    /// [`HostEvent::Resize`].
    Resize,
    /// [`HostEvent::Frame`].
    Frame,
    /// [`HostEvent::AnimationIteration`].
    AnimationIteration,
}

type Listener = Rc<RefCell<dyn FnMut(&HostEvent, &mut World)>>;

struct Slot {
    id: u64,
    kind: EventKind,
    listener: Listener,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    slots: Vec<Slot>,
}

impl Registry {
    fn contains(&self, id: u64) -> bool {
        self.slots.iter().any(|s| s.id == id)
    }
}

/// Listener registry for host events.
///
/// Listeners run in registration order. A listener removed while an event is being dispatched
/// is not called for that event.
#[derive(Default)]
pub struct EventHub {
    registry: Rc<RefCell<Registry>>,
}

impl fmt::Debug for EventHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.registry.borrow().slots.len())
            .finish()
    }
}

impl EventHub {
    /// Empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for events of `kind`. Dropping the returned handle unsubscribes.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, kind: EventKind, listener: F) -> Subscription
    where
        F: FnMut(&HostEvent, &mut World) + 'static,
    {
        let mut reg = self.registry.borrow_mut();
        let id = reg.next_id;
        reg.next_id += 1;
        let listener: Listener = Rc::new(RefCell::new(listener));
        reg.slots.push(Slot { id, kind, listener });
        Subscription {
            id,
            kind,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Number of live listeners for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.registry
            .borrow()
            .slots
            .iter()
            .filter(|s| s.kind == kind)
            .count()
    }

    /// Deliver `event` to every listener subscribed to its kind.
    pub(crate) fn dispatch(&self, event: &HostEvent, world: &mut World) {
        let kind = event.kind();
        let snapshot: Vec<(u64, Listener)> = self
            .registry
            .borrow()
            .slots
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| (s.id, Rc::clone(&s.listener)))
            .collect();
        for (id, listener) in snapshot {
            if !self.registry.borrow().contains(id) {
                continue;
            }
            let mut f = listener.borrow_mut();
            (&mut *f)(event, world);
        }
    }
}

/// Scoped listener registration. Unsubscribes on drop.
pub struct Subscription {
    id: u64,
    kind: EventKind,
    registry: Weak<RefCell<Registry>>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("active", &self.is_active())
            .finish()
    }
}

impl Subscription {
    /// Event kind this subscription listens to.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// `true` while the hub is alive and still holds this listener.
    pub fn is_active(&self) -> bool {
        let Some(reg) = self.registry.upgrade() else {
            return false;
        };
        reg.borrow().contains(self.id)
    }

    /// Explicitly unsubscribe. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(reg) = self.registry.upgrade() else {
            return;
        };
        // The listener is dropped outside the borrow: it may own further subscriptions.
        let removed = {
            let mut r = reg.borrow_mut();
            let idx = r.slots.iter().position(|s| s.id == self.id);
            idx.map(|i| r.slots.remove(i))
        };
        drop(removed);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/events.rs"]
mod tests;
