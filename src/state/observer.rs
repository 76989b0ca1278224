//! Focus observers - per-view lifecycle notifications.
//!
//! Widgets that care about gaining or losing a routing channel register a
//! [`FocusObserver`] for their view. The focus manager calls them
//! synchronously, losses before gains, inside the call that performed the
//! reassignment.
//!
//! # Example
//!
//! ```ignore
//! let id = manager.observe(field, FocusCallbacks {
//!     on_focus_received: Some(Box::new(|view| println!("{view} focused"))),
//!     on_focus_lost: Some(Box::new(|view| println!("{view} blurred"))),
//!     ..Default::default()
//! });
//! manager.unobserve(field, id);
//! ```

use std::collections::HashMap;

use crate::types::ViewId;

// =============================================================================
// OBSERVER TRAIT
// =============================================================================

/// Lifecycle hooks for the three routing channels. All default to no-ops.
pub trait FocusObserver {
    fn on_focus_lost(&mut self, _view: ViewId) {}
    fn on_focus_received(&mut self, _view: ViewId) {}
    /// Fires after both `on_focus_lost` and `on_focus_received`.
    fn on_focus_changed(&mut self, _view: ViewId) {}
    fn on_mouse_capture_lost(&mut self, _view: ViewId) {}
    fn on_top_lost(&mut self, _view: ViewId) {}
}

// =============================================================================
// CLOSURE OBSERVER
// =============================================================================

pub type ViewCallback = Box<dyn FnMut(ViewId)>;

/// Closure-backed observer. Unset hooks are skipped.
#[derive(Default)]
pub struct FocusCallbacks {
    pub on_focus_lost: Option<ViewCallback>,
    pub on_focus_received: Option<ViewCallback>,
    pub on_focus_changed: Option<ViewCallback>,
    pub on_mouse_capture_lost: Option<ViewCallback>,
    pub on_top_lost: Option<ViewCallback>,
}

fn fire(callback: &mut Option<ViewCallback>, view: ViewId) {
    if let Some(callback) = callback {
        callback(view);
    }
}

impl FocusObserver for FocusCallbacks {
    fn on_focus_lost(&mut self, view: ViewId) {
        fire(&mut self.on_focus_lost, view);
    }

    fn on_focus_received(&mut self, view: ViewId) {
        fire(&mut self.on_focus_received, view);
    }

    fn on_focus_changed(&mut self, view: ViewId) {
        fire(&mut self.on_focus_changed, view);
    }

    fn on_mouse_capture_lost(&mut self, view: ViewId) {
        fire(&mut self.on_mouse_capture_lost, view);
    }

    fn on_top_lost(&mut self, view: ViewId) {
        fire(&mut self.on_top_lost, view);
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Token returned by [`ObserverRegistry::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Observers keyed by view. Multiple observers per view are supported.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: HashMap<ViewId, Vec<(ObserverId, Box<dyn FocusObserver>)>>,
    next_id: u64,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, view: ViewId, observer: impl FocusObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers
            .entry(view)
            .or_default()
            .push((id, Box::new(observer)));
        id
    }

    pub fn unobserve(&mut self, view: ViewId, id: ObserverId) -> bool {
        let Some(list) = self.observers.get_mut(&view) else {
            return false;
        };
        let before = list.len();
        list.retain(|(existing, _)| *existing != id);
        let removed = list.len() != before;
        if list.is_empty() {
            self.observers.remove(&view);
        }
        removed
    }

    /// Drop every observer of `view`.
    pub fn forget(&mut self, view: ViewId) {
        self.observers.remove(&view);
    }

    pub fn count(&self, view: ViewId) -> usize {
        self.observers.get(&view).map_or(0, Vec::len)
    }

    pub fn clear(&mut self) {
        self.observers.clear();
    }

    /// Invoke `hook` on every observer of `view`, in registration order.
    pub fn notify(&mut self, view: ViewId, mut hook: impl FnMut(&mut dyn FocusObserver, ViewId)) {
        if let Some(list) = self.observers.get_mut(&view) {
            for (_, observer) in list.iter_mut() {
                hook(observer.as_mut(), view);
            }
        }
    }
}
