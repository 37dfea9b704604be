//! Global event listeners with scoped registration.
//!
//! Listeners are held by an [`EventHub`] (the stand-in for `document` /
//! `window` listener lists). Registering returns a [`ListenerGuard`]; the
//! listener is removed when the guard drops, so a component that owns its
//! guards cannot leak listeners across mounts.

use std::cell::RefCell;
use std::rc::{
    Rc,
    Weak,
};

use super::document::NodeId;

/// Events delivered to global listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// A pointer click. `path` runs from the target up to the root.
    Click { path: Vec<NodeId> },
    /// The viewport was resized to `width` CSS pixels.
    Resize { width: u32 },
}

impl DomEvent {
    /// イベントの種別
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Click { .. } => EventKind::Click,
            Self::Resize { .. } => EventKind::Resize,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Resize,
}

/// Shared, re-entrant callback slot.
type Callback = Rc<RefCell<dyn FnMut(&DomEvent)>>;

/// A registered listener.
struct Listener {
    /// Registration id, unique per hub
    id: u64,
    /// Event kind the listener subscribed to
    kind: EventKind,
    /// The callback itself
    callback: Callback,
}

/// Listener storage shared by the hub and its guards.
#[derive(Default)]
struct Registry {
    /// Next registration id
    next_id: u64,
    /// Live listeners in registration order
    listeners: Vec<Listener>,
}

/// Global listener list for one page.
///
/// Cloning yields another handle to the same list. Single-threaded by
/// construction (`Rc`), like the browser event loop it models.
#[derive(Clone, Default)]
pub struct EventHub {
    /// 共有レジストリ
    registry: Rc<RefCell<Registry>>,
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.registry.borrow();
        f.debug_struct("EventHub").field("listeners", &registry.listeners.len()).finish()
    }
}

impl EventHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for events of `kind`.
    ///
    /// The listener stays installed exactly as long as the returned guard.
    pub fn listen(&self, kind: EventKind, callback: impl FnMut(&DomEvent) + 'static) -> ListenerGuard {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push(Listener { id, kind, callback: Rc::new(RefCell::new(callback)) });
        tracing::trace!(id, ?kind, "listener registered");

        ListenerGuard { registry: Rc::downgrade(&self.registry), id, kind }
    }

    /// Delivers `event` to every listener of its kind.
    ///
    /// Listeners may register or drop guards while being called; the set of
    /// recipients is fixed when dispatch starts.
    pub fn dispatch(&self, event: &DomEvent) {
        let kind = event.kind();
        let recipients: Vec<Callback> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .filter(|listener| listener.kind == kind)
            .map(|listener| Rc::clone(&listener.callback))
            .collect();

        for callback in recipients {
            // A listener dispatching into itself is skipped rather than re-entered.
            if let Ok(mut callback) = callback.try_borrow_mut() {
                (*callback)(event);
            }
        }
    }

    /// Number of live listeners for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.registry.borrow().listeners.iter().filter(|listener| listener.kind == kind).count()
    }
}

/// Keeps a listener installed; removes it on drop.
#[must_use = "dropping the guard removes the listener immediately"]
pub struct ListenerGuard {
    /// Registry the listener lives in (weak: the hub may go first)
    registry: Weak<RefCell<Registry>>,
    /// 登録 ID
    id: u64,
    /// 登録時のイベント種別
    kind: EventKind,
}

impl std::fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerGuard").field("id", &self.id).field("kind", &self.kind).finish()
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let Some(shared) = self.registry.upgrade() else {
            return;
        };
        // The removed closure may own guards of its own; it is dropped only
        // after the registry borrow ends so they can remove themselves too.
        let removed = {
            let Ok(mut registry) = shared.try_borrow_mut() else {
                tracing::warn!(id = self.id, kind = ?self.kind, "registry busy, listener not removed");
                return;
            };
            let position = registry.listeners.iter().position(|listener| listener.id == self.id);
            position.map(|index| registry.listeners.remove(index))
        };
        if removed.is_some() {
            tracing::trace!(id = self.id, kind = ?self.kind, "listener removed");
        }
        drop(removed);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::cell::Cell;

    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn listener_is_removed_when_guard_drops() {
        let hub = EventHub::new();
        let guard = hub.listen(EventKind::Click, |_| {});

        assert_that!(hub.listener_count(EventKind::Click), eq(1));
        drop(guard);
        assert_that!(hub.listener_count(EventKind::Click), eq(0));
    }

    #[rstest]
    fn dispatch_only_reaches_matching_kind() {
        let hub = EventHub::new();
        let clicks = Rc::new(Cell::new(0));
        let resizes = Rc::new(Cell::new(0));

        let clicks_in = Rc::clone(&clicks);
        let _click = hub.listen(EventKind::Click, move |_| clicks_in.set(clicks_in.get() + 1));
        let resizes_in = Rc::clone(&resizes);
        let _resize = hub.listen(EventKind::Resize, move |_| resizes_in.set(resizes_in.get() + 1));

        hub.dispatch(&DomEvent::Resize { width: 500 });
        hub.dispatch(&DomEvent::Resize { width: 900 });
        hub.dispatch(&DomEvent::Click { path: Vec::new() });

        assert_that!(clicks.get(), eq(1));
        assert_that!(resizes.get(), eq(2));
    }

    #[rstest]
    fn dropped_listener_no_longer_receives_events() {
        let hub = EventHub::new();
        let calls = Rc::new(Cell::new(0));
        let calls_in = Rc::clone(&calls);
        let guard = hub.listen(EventKind::Click, move |_| calls_in.set(calls_in.get() + 1));

        hub.dispatch(&DomEvent::Click { path: Vec::new() });
        drop(guard);
        hub.dispatch(&DomEvent::Click { path: Vec::new() });

        assert_that!(calls.get(), eq(1));
    }

    #[rstest]
    fn guard_owned_by_listener_is_released_with_it() {
        let hub = EventHub::new();
        let inner = Rc::new(RefCell::new(Some(hub.listen(EventKind::Click, |_| {}))));
        let held = Rc::clone(&inner);
        let outer = hub.listen(EventKind::Resize, move |_| {
            let _ = &held;
        });
        drop(inner);

        drop(outer);

        assert_that!(hub.listener_count(EventKind::Resize), eq(0));
        assert_that!(hub.listener_count(EventKind::Click), eq(0));
    }

    #[rstest]
    fn listener_can_register_on_activation() {
        let hub = EventHub::new();
        let registered: Rc<RefCell<Option<ListenerGuard>>> = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&registered);
        let handle = hub.clone();
        let outer = hub.listen(EventKind::Resize, move |_| {
            slot.borrow_mut().replace(handle.listen(EventKind::Click, |_| {}));
        });

        hub.dispatch(&DomEvent::Resize { width: 800 });
        assert_that!(hub.listener_count(EventKind::Click), eq(1));

        drop(registered);
        drop(outer);
        assert_that!(hub.listener_count(EventKind::Click), eq(0));
    }

    #[rstest]
    fn guard_outliving_hub_is_harmless() {
        let hub = EventHub::new();
        let guard = hub.listen(EventKind::Resize, |_| {});
        drop(hub);
        drop(guard);
    }
}
