//! Raw input to semantic signals
//!
//! The game only understands "press started", "press ended" and "restart".
//! Which keys restart depends on whether the game-over overlay is up.

/// What the session acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSignal {
    PressStart,
    PressEnd,
    Restart,
}

/// Pointer events the shell listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    MouseDown,
    MouseUp,
    TouchStart,
    TouchEnd,
}

impl PointerEvent {
    /// All DOM event names, for listener registration
    pub const ALL: [PointerEvent; 4] = [
        PointerEvent::MouseDown,
        PointerEvent::MouseUp,
        PointerEvent::TouchStart,
        PointerEvent::TouchEnd,
    ];

    pub fn dom_name(&self) -> &'static str {
        match self {
            PointerEvent::MouseDown => "mousedown",
            PointerEvent::MouseUp => "mouseup",
            PointerEvent::TouchStart => "touchstart",
            PointerEvent::TouchEnd => "touchend",
        }
    }

    pub fn signal(&self) -> InputSignal {
        match self {
            PointerEvent::MouseDown | PointerEvent::TouchStart => InputSignal::PressStart,
            PointerEvent::MouseUp | PointerEvent::TouchEnd => InputSignal::PressEnd,
        }
    }

    pub fn is_touch(&self) -> bool {
        matches!(self, PointerEvent::TouchStart | PointerEvent::TouchEnd)
    }
}

/// Map a `KeyboardEvent.key` value to a signal
///
/// Space restarts at any time; Enter and R only while the game-over overlay
/// is showing.
pub fn map_key(key: &str, game_over_showing: bool) -> Option<InputSignal> {
    match key {
        " " => Some(InputSignal::Restart),
        "Enter" | "r" | "R" if game_over_showing => Some(InputSignal::Restart),
        _ => None,
    }
}
