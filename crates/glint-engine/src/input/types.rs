use std::fmt;

/// Keyboard key identifier.
///
/// Window layers map platform key codes into these variants where possible
/// and fall back to `Key::Unknown(u32)` with a stable platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    // Common control keys
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Modifiers as keys (useful for focus/navigation policies)
    Shift,
    Control,
    Alt,
    Meta,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Function keys
    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    /// Platform-dependent key not yet represented here.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Mouse wheel delta.
///
/// `Line` corresponds to "scroll lines" style input; `Pixel` is high precision.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

impl MouseWheelDelta {
    /// Vertical component, whatever the unit.
    pub fn y(&self) -> f32 {
        match *self {
            MouseWheelDelta::Line { y, .. } | MouseWheelDelta::Pixel { y, .. } => y,
        }
    }
}

/// Platform-agnostic input events.
///
/// Whatever owns the window translates its native events into these and
/// hands them to [`FrameDriver::dispatch`](crate::core::FrameDriver::dispatch).
/// Coordinates are in canvas pixels, origin top-left.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
    },

    /// Committed character input.
    Text(char),

    PointerMoved {
        x: f32,
        y: f32,
    },

    /// Coordinates are included so handlers need not track the pointer.
    PointerButton {
        button: MouseButton,
        state: MouseButtonState,
        x: f32,
        y: f32,
    },

    MouseWheel {
        delta: MouseWheelDelta,
    },

    /// Canvas size changed, in pixels.
    Resized {
        width: u32,
        height: u32,
    },
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_y_ignores_unit() {
        assert_eq!(MouseWheelDelta::Line { x: 0.0, y: -1.0 }.y(), -1.0);
        assert_eq!(MouseWheelDelta::Pixel { x: 3.0, y: 12.5 }.y(), 12.5);
    }

    #[test]
    fn key_display() {
        assert_eq!(Key::Escape.to_string(), "Escape");
        assert_eq!(Key::Unknown(42).to_string(), "Unknown(42)");
    }
}
