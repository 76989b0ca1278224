//! View Registry - Arena of widget handles.
//!
//! Manages the lifecycle of views:
//! - Generational handle allocation with a free slot pool for O(1) reuse
//! - Name ↔ handle bidirectional mapping
//! - Parent/child links for ancestry queries
//! - Destroy callbacks, run when a view is released

use std::collections::HashMap;

use tracing::trace;

use super::hierarchy::ViewHierarchy;
use crate::error::{TreeError, TreeResult};
use crate::types::{ViewFlags, ViewId};

// =============================================================================
// Registry State
// =============================================================================

struct Node {
    name: String,
    parent: Option<ViewId>,
    children: Vec<ViewId>,
    flags: ViewFlags,
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

type DestroyCallback = Box<dyn FnOnce(ViewId)>;

/// Arena-backed widget tree.
///
/// Views are never referenced by pointer. A released view's slot goes back to
/// the pool with a bumped generation, so stale handles simply stop resolving.
#[derive(Default)]
pub struct ViewTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    names: HashMap<String, ViewId>,
    name_counter: usize,
    destroy_callbacks: HashMap<ViewId, Vec<DestroyCallback>>,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn node(&self, view: ViewId) -> Option<&Node> {
        self.slots
            .get(view.index())
            .filter(|slot| slot.generation == view.generation())
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, view: ViewId) -> Option<&mut Node> {
        self.slots
            .get_mut(view.index())
            .filter(|slot| slot.generation == view.generation())
            .and_then(|slot| slot.node.as_mut())
    }

    // =========================================================================
    // Allocation
    // =========================================================================

    /// Create a view.
    ///
    /// # Arguments
    /// * `name` - Optional unique name. If not provided, one is generated.
    /// * `parent` - Parent view, or `None` for a new root.
    /// * `flags` - Behaviour flags.
    pub fn create(
        &mut self,
        name: Option<&str>,
        parent: Option<ViewId>,
        flags: ViewFlags,
    ) -> TreeResult<ViewId> {
        if let Some(parent) = parent {
            if self.node(parent).is_none() {
                return Err(TreeError::StaleParent(parent));
            }
        }

        let name = match name {
            Some(name) => name.to_string(),
            None => loop {
                let candidate = format!("v{}", self.name_counter);
                self.name_counter += 1;
                if !self.names.contains_key(&candidate) {
                    break candidate;
                }
            },
        };
        if self.names.contains_key(&name) {
            return Err(TreeError::DuplicateName(name));
        }

        // Reuse free slot or grow
        let view = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                ViewId::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    node: None,
                });
                ViewId::new(index, 0)
            }
        };

        self.slots[view.index()].node = Some(Node {
            name: name.clone(),
            parent,
            children: Vec::new(),
            flags,
        });
        self.names.insert(name, view);
        if let Some(parent) = parent.and_then(|p| self.node_mut(p)) {
            parent.children.push(view);
        }

        trace!(%view, "view created");
        Ok(view)
    }

    /// Release a view and, recursively, all of its children.
    ///
    /// Children are released before their parent. Returns every released
    /// handle in release order; a stale handle releases nothing.
    pub fn release(&mut self, view: ViewId) -> Vec<ViewId> {
        let mut released = Vec::new();
        if self.node(view).is_none() {
            return released;
        }

        // Unlink from the parent first so the subtree is detached as a whole
        if let Some(parent) = self.node(view).and_then(|n| n.parent) {
            if let Some(parent) = self.node_mut(parent) {
                parent.children.retain(|&c| c != view);
            }
        }

        self.release_recursive(view, &mut released);
        released
    }

    fn release_recursive(&mut self, view: ViewId, released: &mut Vec<ViewId>) {
        let children = match self.node(view) {
            Some(node) => node.children.clone(),
            None => return,
        };
        for child in children {
            self.release_recursive(child, released);
        }

        self.run_destroy_callbacks(view);

        let slot = &mut self.slots[view.index()];
        if let Some(node) = slot.node.take() {
            self.names.remove(&node.name);
        }
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(view.index() as u32);

        trace!(%view, "view released");
        released.push(view);
    }

    /// Remove every view.
    ///
    /// Destroy callbacks are not run.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.names.clear();
        self.name_counter = 0;
        self.destroy_callbacks.clear();
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Move `view` under `parent` (or make it a root with `None`).
    pub fn set_parent(&mut self, view: ViewId, parent: Option<ViewId>) -> TreeResult<()> {
        let old_parent = match self.node(view) {
            Some(node) => node.parent,
            None => return Err(TreeError::StaleView(view)),
        };
        if let Some(parent) = parent {
            if self.node(parent).is_none() {
                return Err(TreeError::StaleParent(parent));
            }
            if self.is_within(parent, view) {
                return Err(TreeError::Cycle {
                    child: view,
                    parent,
                });
            }
        }
        if old_parent == parent {
            return Ok(());
        }

        if let Some(old) = old_parent.and_then(|p| self.node_mut(p)) {
            old.children.retain(|&c| c != view);
        }
        if let Some(new) = parent.and_then(|p| self.node_mut(p)) {
            new.children.push(view);
        }
        if let Some(node) = self.node_mut(view) {
            node.parent = parent;
        }
        Ok(())
    }

    /// Make `view` a root.
    pub fn detach(&mut self, view: ViewId) -> TreeResult<()> {
        self.set_parent(view, None)
    }

    pub fn children(&self, view: ViewId) -> &[ViewId] {
        self.node(view).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Every live view beneath `view` (exclusive), depth first.
    pub fn descendants(&self, view: ViewId) -> Vec<ViewId> {
        let mut out = Vec::new();
        let mut stack: Vec<ViewId> = self.children(view).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Get handle for a view name.
    pub fn find(&self, name: &str) -> Option<ViewId> {
        self.names.get(name).copied()
    }

    /// Get name for a handle.
    pub fn name(&self, view: ViewId) -> Option<&str> {
        self.node(view).map(|n| n.name.as_str())
    }

    pub fn flags(&self, view: ViewId) -> ViewFlags {
        self.node(view).map(|n| n.flags).unwrap_or_default()
    }

    pub fn set_flags(&mut self, view: ViewId, flags: ViewFlags) -> TreeResult<()> {
        let node = self.node_mut(view).ok_or(TreeError::StaleView(view))?;
        node.flags = flags;
        Ok(())
    }

    /// Count of live views.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    // =========================================================================
    // Destroy Callbacks
    // =========================================================================

    /// Register a callback to run when `view` is released.
    pub fn on_destroy(&mut self, view: ViewId, callback: impl FnOnce(ViewId) + 'static) {
        if self.node(view).is_none() {
            return;
        }
        self.destroy_callbacks
            .entry(view)
            .or_default()
            .push(Box::new(callback));
    }

    fn run_destroy_callbacks(&mut self, view: ViewId) {
        if let Some(callbacks) = self.destroy_callbacks.remove(&view) {
            for callback in callbacks {
                callback(view);
            }
        }
    }
}

impl ViewHierarchy for ViewTree {
    fn parent_of(&self, view: ViewId) -> Option<ViewId> {
        self.node(view).and_then(|n| n.parent)
    }

    fn is_alive(&self, view: ViewId) -> bool {
        self.node(view).is_some()
    }

    fn is_focus_root(&self, view: ViewId) -> bool {
        self.flags(view).contains(ViewFlags::FOCUS_ROOT)
    }
}
