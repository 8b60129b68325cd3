use std::fmt;

use serde::{Deserialize, Serialize};

/// Keyboard key identifier.
///
/// Platform layers map their key codes onto these variants; anything not
/// listed travels as `Key::Unknown(code)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Shift,
    Control,
    Alt,
    Meta,

    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    Unknown(u32),
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonState {
    Pressed,
    Released,
}

impl ButtonState {
    #[inline]
    pub fn from_pressed(pressed: bool) -> Self {
        if pressed { Self::Pressed } else { Self::Released }
    }
}

/// Platform-agnostic input events fed to the stage.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key { key: Key, state: ButtonState },

    PointerMoved { x: f32, y: f32 },
    PointerButton { button: MouseButton, state: ButtonState },

    /// Pointer entered the window surface.
    PointerEntered,
    /// Pointer left the window surface.
    PointerLeft,

    /// Window focus change.
    Focused(bool),
}

impl InputEvent {
    pub fn key(key: Key, pressed: bool) -> Self {
        InputEvent::Key { key, state: ButtonState::from_pressed(pressed) }
    }

    pub fn button(button: MouseButton, pressed: bool) -> Self {
        InputEvent::PointerButton { button, state: ButtonState::from_pressed(pressed) }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
