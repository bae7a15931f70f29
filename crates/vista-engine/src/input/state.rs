use std::collections::HashSet;

use crate::coords::Vec2;

use super::types::{ButtonState, InputEvent, Key, MouseButton};

/// Current input state for the window.
///
/// Holds pointer position and held buttons/keys. A click is a primary-button
/// press followed by its release while the pointer is still inside the window.
#[derive(Debug, Default)]
pub struct InputState {
    /// Pointer position in logical pixels; `None` once it leaves the window.
    pub pointer_pos: Option<Vec2>,

    pub focused: bool,

    pub buttons_down: HashSet<MouseButton>,
    pub keys_down: HashSet<Key>,
}

/// What an applied event amounted to.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputAction {
    None,
    Click(Vec2),
    KeyPressed(Key),
}

impl InputState {
    /// Applies one event and reports the resulting high-level action.
    pub fn apply_event(&mut self, ev: &InputEvent) -> InputAction {
        match ev {
            InputEvent::PointerMoved(pos) => {
                self.pointer_pos = Some(*pos);
                InputAction::None
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
                InputAction::None
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Avoids stuck keys/buttons when focus changes mid-press.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
                InputAction::None
            }

            InputEvent::PointerButton { button, state } => match state {
                ButtonState::Pressed => {
                    self.buttons_down.insert(*button);
                    InputAction::None
                }
                ButtonState::Released => {
                    let was_down = self.buttons_down.remove(button);
                    match (button, was_down, self.pointer_pos) {
                        (MouseButton::Left, true, Some(pos)) => InputAction::Click(pos),
                        _ => InputAction::None,
                    }
                }
            },

            InputEvent::Key { key, state, repeat } => match state {
                ButtonState::Pressed => {
                    let inserted = self.keys_down.insert(*key);
                    if inserted && !*repeat {
                        InputAction::KeyPressed(*key)
                    } else {
                        InputAction::None
                    }
                }
                ButtonState::Released => {
                    self.keys_down.remove(key);
                    InputAction::None
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(button: MouseButton) -> InputEvent {
        InputEvent::PointerButton { button, state: ButtonState::Pressed }
    }

    fn release(button: MouseButton) -> InputEvent {
        InputEvent::PointerButton { button, state: ButtonState::Released }
    }

    #[test]
    fn press_release_is_a_click_at_pointer() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::PointerMoved(Vec2::new(10.0, 20.0)));
        assert_eq!(s.apply_event(&press(MouseButton::Left)), InputAction::None);
        assert_eq!(
            s.apply_event(&release(MouseButton::Left)),
            InputAction::Click(Vec2::new(10.0, 20.0))
        );
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::PointerMoved(Vec2::new(1.0, 1.0)));
        assert_eq!(s.apply_event(&release(MouseButton::Left)), InputAction::None);
    }

    #[test]
    fn right_button_never_clicks() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::PointerMoved(Vec2::new(1.0, 1.0)));
        s.apply_event(&press(MouseButton::Right));
        assert_eq!(s.apply_event(&release(MouseButton::Right)), InputAction::None);
    }

    #[test]
    fn leaving_window_cancels_click() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::PointerMoved(Vec2::new(1.0, 1.0)));
        s.apply_event(&press(MouseButton::Left));
        s.apply_event(&InputEvent::PointerLeft);
        assert_eq!(s.apply_event(&release(MouseButton::Left)), InputAction::None);
    }

    #[test]
    fn key_repeat_fires_once() {
        let mut s = InputState::default();
        let down = InputEvent::Key { key: Key::M, state: ButtonState::Pressed, repeat: false };
        let again = InputEvent::Key { key: Key::M, state: ButtonState::Pressed, repeat: true };
        assert_eq!(s.apply_event(&down), InputAction::KeyPressed(Key::M));
        assert_eq!(s.apply_event(&again), InputAction::None);
    }

    #[test]
    fn focus_loss_clears_held_state() {
        let mut s = InputState::default();
        s.apply_event(&press(MouseButton::Left));
        s.apply_event(&InputEvent::Focused(false));
        assert!(s.buttons_down.is_empty());
    }
}
