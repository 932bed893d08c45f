//! Input Module - Event conversion and polling
//!
//! Bridges crossterm's event system with the effects engine. The engine
//! only cares about pointer motion and resizes; everything else converts
//! to `InputEvent::None` so hosts can forward their whole event stream.
//!
//! # API
//!
//! - `convert_event` - Convert a crossterm Event to our InputEvent
//! - `convert_mouse_event` - Convert a crossterm MouseEvent
//! - `poll_event` - Non-blocking event check with timeout
//! - `read_event` - Blocking event read
//!
//! # Example
//!
//! ```ignore
//! use pointer_fx::input::poll_event;
//! use std::time::Duration;
//!
//! loop {
//!     if let Ok(Some(event)) = poll_event(Duration::from_millis(16)) {
//!         session.handle_event(&event)?;
//!     }
//!     session.advance_frame();
//! }
//! ```

use crossterm::event::{
    poll, read, Event as CrosstermEvent, MouseEvent as CrosstermMouseEvent, MouseEventKind,
};
use std::time::Duration;

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// The subset of terminal events the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer moved to the given cell.
    Pointer { x: u16, y: u16 },
    /// Terminal resize event (new width, height).
    Resize(u16, u16),
    /// No event or unhandled event type.
    None,
}

// =============================================================================
// EVENT CONVERSION
// =============================================================================

/// Convert a crossterm Event to our InputEvent.
pub fn convert_event(event: CrosstermEvent) -> InputEvent {
    match event {
        CrosstermEvent::Mouse(mouse) => convert_mouse_event(mouse),
        CrosstermEvent::Resize(w, h) => InputEvent::Resize(w, h),
        _ => InputEvent::None,
    }
}

/// Convert a crossterm MouseEvent to our InputEvent.
///
/// Motion and drags both count as pointer movement; clicks and scrolls
/// carry no position change the engine cares about.
pub fn convert_mouse_event(event: CrosstermMouseEvent) -> InputEvent {
    match event.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => InputEvent::Pointer {
            x: event.column,
            y: event.row,
        },
        _ => InputEvent::None,
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

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> CrosstermMouseEvent {
        CrosstermMouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::empty(),
        }
    }

    #[test]
    fn test_convert_mouse_move() {
        let event = convert_mouse_event(mouse(MouseEventKind::Moved, 30, 20));
        assert_eq!(event, InputEvent::Pointer { x: 30, y: 20 });
    }

    #[test]
    fn test_convert_mouse_drag() {
        let event = convert_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 5, 7));
        assert_eq!(event, InputEvent::Pointer { x: 5, y: 7 });
    }

    #[test]
    fn test_convert_mouse_click_is_none() {
        let event = convert_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 3, 3));
        assert_eq!(event, InputEvent::None);
    }

    #[test]
    fn test_convert_mouse_scroll_is_none() {
        for kind in [
            MouseEventKind::ScrollUp,
            MouseEventKind::ScrollDown,
            MouseEventKind::ScrollLeft,
            MouseEventKind::ScrollRight,
        ] {
            assert_eq!(convert_mouse_event(mouse(kind, 0, 0)), InputEvent::None);
        }
    }

    #[test]
    fn test_convert_resize() {
        let event = convert_event(CrosstermEvent::Resize(120, 40));
        assert_eq!(event, InputEvent::Resize(120, 40));
    }

    #[test]
    fn test_convert_focus_is_none() {
        let event = convert_event(CrosstermEvent::FocusGained);
        assert_eq!(event, InputEvent::None);
    }
}
