//! State Module - Runtime focus and input state
//!
//! - **Channel** - Single-holder routing channel state machine
//! - **Focus** - FocusManager: mouse capture, keyboard focus, top control,
//!   lock, history
//! - **Observer** - Per-view lost/received/changed notifications
//! - **Flash** - Clock and time-decayed focus highlight
//! - **Keyboard / Mouse** - Event types
//! - **Input** - crossterm event conversion
//! - **Routing** - Which view an event goes to

mod channel;
mod flash;
mod focus;
mod input;
mod keyboard;
mod mouse;
mod observer;
mod routing;

pub use channel::*;
pub use flash::*;
pub use focus::*;
pub use input::*;
pub use keyboard::*;
pub use mouse::*;
pub use observer::*;
pub use routing::*;
