//! Input abstraction layer.
//!
//! Normalizes mouse, touch, and stylus contacts into a single-pointer
//! `InputEvent` consumed by the pen tool. Coordinates are in view space;
//! the engine maps them into canvas space before the tool sees them.

/// The phase of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Down,
    Move,
    Up,
}

/// A normalized input event from any pointing device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start, pencil contact).
    PointerDown { x: f32, y: f32 },

    /// Pointer moved while pressed.
    PointerMove { x: f32, y: f32 },

    /// Pointer released.
    PointerUp { x: f32, y: f32 },
}

impl InputEvent {
    /// Build from the host's `(action, x, y)` triple.
    pub fn new(action: PointerAction, x: f32, y: f32) -> Self {
        match action {
            PointerAction::Down => Self::PointerDown { x, y },
            PointerAction::Move => Self::PointerMove { x, y },
            PointerAction::Up => Self::PointerUp { x, y },
        }
    }

    pub fn from_pointer_down(x: f32, y: f32) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn from_pointer_move(x: f32, y: f32) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn from_pointer_up(x: f32, y: f32) -> Self {
        Self::PointerUp { x, y }
    }

    pub fn action(&self) -> PointerAction {
        match self {
            Self::PointerDown { .. } => PointerAction::Down,
            Self::PointerMove { .. } => PointerAction::Move,
            Self::PointerUp { .. } => PointerAction::Up,
        }
    }

    pub fn position(&self) -> (f32, f32) {
        match *self {
            Self::PointerDown { x, y } | Self::PointerMove { x, y } | Self::PointerUp { x, y } => {
                (x, y)
            }
        }
    }
}
