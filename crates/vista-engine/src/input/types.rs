use crate::coords::Vec2;

/// Keyboard keys the viewer reacts to.
///
/// Anything else is reported as `Unknown` with the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    /// Toggles the sidebar.
    M,
    /// Re-opens and re-renders the current image.
    O,
    /// Re-renders the current image.
    R,
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Platform-agnostic input event (logical pixels).
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerMoved(Vec2),
    PointerLeft,
    PointerButton { button: MouseButton, state: ButtonState },
    Key { key: Key, state: ButtonState, repeat: bool },
    Focused(bool),
}
