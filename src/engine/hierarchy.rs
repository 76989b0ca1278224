//! Ancestry queries the focus manager needs from a widget tree.

use crate::types::ViewId;

/// Read-only view of a widget tree.
///
/// The focus manager never walks widgets itself; every "is this inside that"
/// question goes through this trait. [`ViewTree`](super::ViewTree) is the
/// provided implementation, but any tree that can answer `parent_of` works.
pub trait ViewHierarchy {
    /// Parent of `view`, or `None` for roots and stale handles.
    fn parent_of(&self, view: ViewId) -> Option<ViewId>;

    /// Whether `view` still resolves to a live widget.
    fn is_alive(&self, view: ViewId) -> bool;

    /// Whether `view` groups its descendants for focus history.
    fn is_focus_root(&self, view: ViewId) -> bool;

    /// True when `view` is `ancestor` or lies somewhere beneath it.
    fn is_within(&self, view: ViewId, ancestor: ViewId) -> bool {
        let mut current = Some(view);
        while let Some(v) = current {
            if v == ancestor {
                return true;
            }
            current = self.parent_of(v);
        }
        false
    }

    /// Root-most focus root on the parent chain of `view` (inclusive).
    fn focus_root_of(&self, view: ViewId) -> Option<ViewId> {
        let mut root = None;
        let mut current = Some(view);
        while let Some(v) = current {
            if self.is_focus_root(v) {
                root = Some(v);
            }
            current = self.parent_of(v);
        }
        root
    }
}
