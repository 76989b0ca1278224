//! Widget tree.
//!
//! - Registry: arena of generational view handles, names, parent links
//! - Hierarchy: the ancestry trait the focus manager queries
//!
//! Widgets are NOT objects owned by the focus manager. They are handles into
//! the arena, and every ancestry question is answered by [`ViewHierarchy`].

mod hierarchy;
mod registry;

pub use hierarchy::*;
pub use registry::*;
