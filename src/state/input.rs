//! Input Module - Event conversion and polling
//!
//! Bridges crossterm's event system with our keyboard and mouse types.
//! Decoding only: where an event goes is decided by the routing module.
//!
//! # API
//!
//! - `convert_event` - Convert any crossterm Event to an `InputEvent`
//! - `convert_mouse_event` / `convert_key_event` - Per-kind conversion
//! - `poll_event` - Non-blocking event check with timeout
//! - `read_event` - Blocking event read
//! - `enable_input` / `disable_input` - Terminal mouse and focus reporting

use std::io::stdout;
use std::time::Duration;

use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
    Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers,
    MouseButton as CrosstermMouseButton, MouseEvent as CrosstermMouseEvent, MouseEventKind, poll,
    read,
};
use crossterm::execute;

use super::keyboard::{KeyState, KeyboardEvent, Modifiers};
use super::mouse::{MouseAction, MouseButton, MouseEvent, ScrollDirection};

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// Unified event type
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Mouse(MouseEvent),
    Key(KeyboardEvent),
    /// The terminal window was activated.
    FocusGained,
    /// The terminal window was deactivated.
    FocusLost,
    /// Terminal resize event (new width, height)
    Resize(u16, u16),
    /// Unhandled event type
    None,
}

/// Convert any crossterm event.
pub fn convert_event(event: CrosstermEvent) -> InputEvent {
    match event {
        CrosstermEvent::Mouse(mouse) => InputEvent::Mouse(convert_mouse_event(mouse)),
        CrosstermEvent::Key(key) => InputEvent::Key(convert_key_event(key)),
        CrosstermEvent::FocusGained => InputEvent::FocusGained,
        CrosstermEvent::FocusLost => InputEvent::FocusLost,
        CrosstermEvent::Resize(w, h) => InputEvent::Resize(w, h),
        _ => InputEvent::None,
    }
}

// =============================================================================
// MOUSE EVENT CONVERSION
// =============================================================================

pub fn convert_mouse_event(event: CrosstermMouseEvent) -> MouseEvent {
    let (x, y) = (event.column, event.row);
    let mut converted = match event.kind {
        MouseEventKind::Down(btn) => MouseEvent::down(convert_mouse_button(btn), x, y),
        MouseEventKind::Up(btn) => MouseEvent::up(convert_mouse_button(btn), x, y),
        MouseEventKind::Drag(btn) => {
            MouseEvent::new(MouseAction::Drag, convert_mouse_button(btn), x, y)
        }
        MouseEventKind::Moved => MouseEvent::move_to(x, y),
        MouseEventKind::ScrollUp => MouseEvent::scroll(x, y, ScrollDirection::Up),
        MouseEventKind::ScrollDown => MouseEvent::scroll(x, y, ScrollDirection::Down),
        MouseEventKind::ScrollLeft => MouseEvent::scroll(x, y, ScrollDirection::Left),
        MouseEventKind::ScrollRight => MouseEvent::scroll(x, y, ScrollDirection::Right),
    };
    converted.modifiers = convert_modifiers(event.modifiers);
    converted
}

fn convert_mouse_button(btn: CrosstermMouseButton) -> MouseButton {
    match btn {
        CrosstermMouseButton::Left => MouseButton::Left,
        CrosstermMouseButton::Right => MouseButton::Right,
        CrosstermMouseButton::Middle => MouseButton::Middle,
    }
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyboardEvent {
    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "BackTab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        KeyCode::Insert => "Insert".to_string(),
        _ => String::new(),
    };

    let state = match event.kind {
        KeyEventKind::Press => KeyState::Press,
        KeyEventKind::Repeat => KeyState::Repeat,
        KeyEventKind::Release => KeyState::Release,
    };

    KeyboardEvent {
        key,
        modifiers: convert_modifiers(event.modifiers),
        state,
    }
}

fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        shift: mods.contains(KeyModifiers::SHIFT),
        meta: mods.contains(KeyModifiers::META) || mods.contains(KeyModifiers::SUPER),
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event()?))
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking).
pub fn read_event() -> std::io::Result<InputEvent> {
    Ok(convert_event(read()?))
}

/// Turn on terminal mouse reporting and focus change reporting.
pub fn enable_input() -> std::io::Result<()> {
    execute!(stdout(), EnableMouseCapture, EnableFocusChange)
}

pub fn disable_input() -> std::io::Result<()> {
    execute!(stdout(), DisableMouseCapture, DisableFocusChange)
}
