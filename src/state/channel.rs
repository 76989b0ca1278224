//! Exclusive routing channel.
//!
//! Mouse capture, keyboard focus and the top control are three independent
//! instances of the same two-state machine:
//!
//! ```text
//! Unassigned ──set(x)──▶ Assigned(x) ──set(y)──▶ Assigned(y)
//!      ▲                     │  ▲  │
//!      └──set(None)/remove───┘  └──┘ set(x): no-op
//! ```
//!
//! The channel only tracks the holder. Notifying observers is the focus
//! manager's job, driven by the [`Transition`] each assignment returns.

use spark_signals::{Signal, signal};

use crate::engine::ViewHierarchy;
use crate::types::ViewId;

/// Result of [`Channel::assign`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Target already held the channel.
    Unchanged,
    Changed {
        previous: Option<ViewId>,
        current: Option<ViewId>,
    },
}

/// Single-holder routing channel.
pub struct Channel {
    name: &'static str,
    holder: Option<ViewId>,
    signal: Signal<Option<ViewId>>,
}

impl Channel {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            holder: None,
            signal: signal(None),
        }
    }

    /// Channel label used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn holder(&self) -> Option<ViewId> {
        self.holder
    }

    /// Reactive view of the holder.
    pub fn signal(&self) -> Signal<Option<ViewId>> {
        self.signal.clone()
    }

    /// Hand the channel to `target` (`None` releases it).
    pub fn assign(&mut self, target: Option<ViewId>) -> Transition {
        if self.holder == target {
            return Transition::Unchanged;
        }
        let previous = std::mem::replace(&mut self.holder, target);
        self.signal.set(target);
        Transition::Changed {
            previous,
            current: target,
        }
    }

    /// Forced removal: clears the channel only if `view` holds it.
    pub fn remove(&mut self, view: ViewId) -> bool {
        if self.holder != Some(view) {
            return false;
        }
        self.holder = None;
        self.signal.set(None);
        true
    }

    /// True when the holder is `parent` or one of its descendants.
    pub fn is_held_within(&self, tree: &dyn ViewHierarchy, parent: ViewId) -> bool {
        self.holder
            .is_some_and(|holder| tree.is_within(holder, parent))
    }
}
