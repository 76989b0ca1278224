//! Routing - decide which view an input event goes to.
//!
//! The dispatch layer hit-tests mouse positions and owns the widgets; these
//! functions only consult the focus manager's channels:
//!
//! - Mouse capture preempts hit testing entirely
//! - With a top control, hits inside it route normally and hits outside are
//!   reported as [`MouseRoute::OutsideTop`]
//! - Keys go to the keyboard focus; text input is withheld from a focus
//!   owner that asked for keystrokes only

use super::focus::FocusManager;
use super::keyboard::KeyboardEvent;
use crate::engine::ViewHierarchy;
use crate::types::ViewId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRoute {
    Focused {
        target: ViewId,
        /// Deliver the key as text input as well as a keystroke.
        text_input: bool,
    },
    Unrouted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseRoute {
    /// Mouse capture preempts hit testing.
    Captured(ViewId),
    Hit(ViewId),
    /// A top control is up and the event landed outside it.
    OutsideTop { top: ViewId, hit: Option<ViewId> },
    Unrouted,
}

/// Channel holders that no longer resolve in `tree` are treated as unset.
pub fn route_key(
    focus: &FocusManager,
    tree: &dyn ViewHierarchy,
    event: &KeyboardEvent,
) -> KeyRoute {
    match focus.keyboard_focus().filter(|&view| tree.is_alive(view)) {
        Some(target) => KeyRoute::Focused {
            target,
            text_input: event.is_text() && !focus.keystrokes_only(),
        },
        None => KeyRoute::Unrouted,
    }
}

/// Route a mouse event whose hit test found `hit`.
///
/// Stale captors, top controls and hits are ignored.
pub fn route_mouse(
    focus: &FocusManager,
    tree: &dyn ViewHierarchy,
    hit: Option<ViewId>,
) -> MouseRoute {
    let alive = |view: &ViewId| tree.is_alive(*view);
    if let Some(captor) = focus.mouse_capture().filter(alive) {
        return MouseRoute::Captured(captor);
    }
    let hit = hit.filter(alive);
    match (focus.top_ctrl().filter(alive), hit) {
        (Some(top), Some(view)) if tree.is_within(view, top) => MouseRoute::Hit(view),
        (Some(top), hit) => MouseRoute::OutsideTop { top, hit },
        (None, Some(view)) => MouseRoute::Hit(view),
        (None, None) => MouseRoute::Unrouted,
    }
}
