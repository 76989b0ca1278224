//! UI context - the widget tree and its focus manager, owned together.
//!
//! There is no global focus manager. An application creates one `UiContext`
//! at startup, hands `&mut` access to whatever dispatches input, and calls
//! [`UiContext::shutdown`] on exit.
//!
//! The context also enforces the destruction protocol: every view in a
//! subtree is forgotten by the focus manager *before* the tree releases it,
//! so no callback ever fires on a half-destroyed view.

use tracing::debug;

use crate::config::FocusConfig;
use crate::engine::{ViewHierarchy, ViewTree};
use crate::error::TreeResult;
use crate::state::{
    Clock, FocusChange, FocusManager, FocusOptions, InputEvent, KeyRoute, MouseAction,
    MouseRoute, route_key, route_mouse,
};
use crate::types::{ViewFlags, ViewId};

/// Where [`UiContext::handle_event`] sent an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    Key(KeyRoute),
    Mouse(MouseRoute),
    /// Window activation changed.
    AppFocus(bool),
    Resize(u16, u16),
    Ignored,
}

pub struct UiContext {
    tree: ViewTree,
    focus: FocusManager,
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new(FocusConfig::default())
    }
}

impl UiContext {
    pub fn new(config: FocusConfig) -> Self {
        Self {
            tree: ViewTree::new(),
            focus: FocusManager::new(config),
        }
    }

    pub fn with_clock(config: FocusConfig, clock: impl Clock + 'static) -> Self {
        Self {
            tree: ViewTree::new(),
            focus: FocusManager::with_clock(config, clock),
        }
    }

    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    pub fn focus(&self) -> &FocusManager {
        &self.focus
    }

    pub fn focus_mut(&mut self) -> &mut FocusManager {
        &mut self.focus
    }

    /// Both halves at once, for calls that take the tree alongside the
    /// manager.
    pub fn split_mut(&mut self) -> (&ViewTree, &mut FocusManager) {
        (&self.tree, &mut self.focus)
    }

    // =========================================================================
    // VIEW LIFECYCLE
    // =========================================================================

    pub fn create_view(
        &mut self,
        name: Option<&str>,
        parent: Option<ViewId>,
        flags: ViewFlags,
    ) -> TreeResult<ViewId> {
        self.tree.create(name, parent, flags)
    }

    /// Destroy `view` and its subtree.
    ///
    /// Channels pointing into the subtree are cleared without callbacks.
    /// Returns the released handles.
    pub fn destroy_view(&mut self, view: ViewId) -> Vec<ViewId> {
        let mut doomed = vec![view];
        doomed.extend(self.tree.descendants(view));
        for &v in &doomed {
            self.focus.forget(v);
        }
        let released = self.tree.release(view);
        if !released.is_empty() {
            debug!(view = %view, count = released.len(), "view destroyed");
        }
        released
    }

    /// Take `view` out of the tree (it stays alive as a root), releasing any
    /// channel that points into it with the usual callbacks.
    pub fn detach_view(&mut self, view: ViewId) -> TreeResult<()> {
        self.tree.detach(view)?;
        self.focus.release_focus_if_needed(&self.tree, view);
        Ok(())
    }

    /// Move `view` under `parent`. Any actual move releases the channels
    /// pointing into `view`, as if it had left the tree.
    pub fn set_parent(&mut self, view: ViewId, parent: Option<ViewId>) -> TreeResult<()> {
        if parent.is_none() {
            return self.detach_view(view);
        }
        let moved = self.tree.parent_of(view) != parent;
        self.tree.set_parent(view, parent)?;
        if moved {
            self.focus.release_focus_if_needed(&self.tree, view);
        }
        Ok(())
    }

    // =========================================================================
    // CHANNELS
    // =========================================================================

    pub fn set_keyboard_focus(&mut self, target: Option<ViewId>, options: FocusOptions) -> FocusChange {
        self.focus.set_keyboard_focus(&self.tree, target, options)
    }

    pub fn set_mouse_capture(&mut self, captor: Option<ViewId>) {
        self.focus.set_mouse_capture(captor);
    }

    pub fn set_top_ctrl(&mut self, view: Option<ViewId>) {
        self.focus.set_top_ctrl(view);
    }

    pub fn restore_group_focus(&mut self, root: ViewId) -> FocusChange {
        self.focus.restore_group_focus(&self.tree, root)
    }

    // =========================================================================
    // DISPATCH
    // =========================================================================

    /// Route one input event.
    ///
    /// `hit` is the dispatch layer's hit test for mouse events and is ignored
    /// otherwise. A mouse press outside the top control dismisses it.
    pub fn handle_event(&mut self, event: &InputEvent, hit: Option<ViewId>) -> Routed {
        match event {
            InputEvent::Key(key) => Routed::Key(route_key(&self.focus, &self.tree, key)),
            InputEvent::Mouse(mouse) => {
                let route = route_mouse(&self.focus, &self.tree, hit);
                if let MouseRoute::OutsideTop { .. } = route {
                    if mouse.action == MouseAction::Down {
                        self.focus.set_top_ctrl(None);
                    }
                }
                Routed::Mouse(route)
            }
            InputEvent::FocusGained => {
                self.focus.set_app_has_focus(true);
                Routed::AppFocus(true)
            }
            InputEvent::FocusLost => {
                self.focus.set_app_has_focus(false);
                Routed::AppFocus(false)
            }
            InputEvent::Resize(w, h) => Routed::Resize(*w, *h),
            InputEvent::None => Routed::Ignored,
        }
    }

    /// Teardown: clear every channel and view. No callbacks fire.
    pub fn shutdown(&mut self) {
        self.focus.reset();
        self.tree.clear();
        debug!("ui context shut down");
    }
}
