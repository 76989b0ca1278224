//! # spark-focus
//!
//! Focus and input routing for widget trees.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) so
//! renderers can react to focus changes.
//!
//! ## Architecture
//!
//! Widgets are handles into an arena ([`ViewTree`]), not objects. The
//! [`FocusManager`] holds only handles and arbitrates three exclusive
//! channels over the tree:
//!
//! ```text
//! input events → routing → { mouse capture | keyboard focus | top control } → ViewId
//! ```
//!
//! Destroying a view goes through [`UiContext::destroy_view`], which makes the
//! manager forget the whole subtree before the tree releases it.
//!
//! ## Modules
//!
//! - [`types`] - Core types (ViewId, ViewFlags, Rgba)
//! - [`engine`] - Widget tree arena and the ancestry trait
//! - [`state`] - Focus manager, channels, observers, flash, input routing
//! - [`context`] - Tree + manager owned together
//! - [`config`] - Focus presentation settings

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::FocusConfig;
pub use context::{Routed, UiContext};
pub use error::{ConfigError, ConfigResult, TreeError, TreeResult};

pub use engine::{ViewHierarchy, ViewTree};

pub use state::{
    // Focus
    FocusChange, FocusManager, FocusOptions,
    // Channels
    Channel, Transition,
    // Observers
    FocusCallbacks, FocusObserver, ObserverId, ViewCallback,
    // Flash
    Clock, FocusFlash, ManualClock, SystemClock,
    // Input
    InputEvent, KeyState, KeyboardEvent, Modifiers, MouseAction, MouseButton, MouseEvent,
    ScrollDirection, convert_event, disable_input, enable_input, poll_event, read_event,
    // Routing
    KeyRoute, MouseRoute, route_key, route_mouse,
};
