use std::collections::HashSet;

use crate::coords::Vec2;

use super::frame::InputFrame;
use super::types::{ButtonState, InputEvent, Key, MouseButton};

/// Current keyboard and mouse state for the stage window.
#[derive(Debug)]
pub struct InputState {
    pub focused: bool,

    /// Whether the pointer is currently over the window surface.
    pub inside_window: bool,

    /// Last known pointer position.
    pub pointer_pos: Option<Vec2>,

    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            focused: true,
            inside_window: false,
            pointer_pos: None,
            keys_down: HashSet::new(),
            buttons_down: HashSet::new(),
        }
    }
}

impl InputState {
    /// Applies an event to the held state and records transitions in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases never arrive for keys held while unfocused.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved { x, y } => {
                self.pointer_pos = Some(Vec2::new(*x, *y));
                self.inside_window = true;
            }

            InputEvent::PointerEntered => self.inside_window = true,

            InputEvent::PointerLeft => {
                self.inside_window = false;
                self.pointer_pos = None;
            }

            InputEvent::Key { key, state } => match state {
                ButtonState::Pressed => {
                    if self.keys_down.insert(*key) {
                        frame.keys_pressed.insert(*key);
                    }
                }
                ButtonState::Released => {
                    if self.keys_down.remove(key) {
                        frame.keys_released.insert(*key);
                    }
                }
            },

            InputEvent::PointerButton { button, state } => match state {
                ButtonState::Pressed => {
                    if self.buttons_down.insert(*button) {
                        frame.buttons_pressed.insert(*button);
                    }
                }
                ButtonState::Released => {
                    if self.buttons_down.remove(button) {
                        frame.buttons_released.insert(*button);
                    }
                }
            },
        }

        frame.events.push(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn any_key_down(&self, keys: &[Key]) -> bool {
        keys.iter().any(|k| self.key_down(*k))
    }

    pub fn all_keys_up(&self, keys: &[Key]) -> bool {
        !self.any_key_down(keys)
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn is_inside_window(&self) -> bool {
        self.inside_window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_is_reported_once_while_held() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, InputEvent::key(Key::W, true));
        state.apply_event(&mut frame, InputEvent::key(Key::W, true));

        assert!(state.key_down(Key::W));
        assert!(frame.key_typed(Key::W));
        assert_eq!(frame.keys_pressed.len(), 1);
        assert_eq!(frame.events.len(), 2);

        frame.clear();
        assert!(!frame.key_typed(Key::W));
        assert!(state.key_down(Key::W));
    }

    #[test]
    fn any_key_down_checks_every_key() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::key(Key::ArrowLeft, true));

        assert!(state.any_key_down(&[Key::A, Key::ArrowLeft]));
        assert!(!state.any_key_down(&[Key::D, Key::ArrowRight]));
        assert!(state.all_keys_up(&[Key::D, Key::ArrowRight]));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::key(Key::S, true));
        state.apply_event(&mut frame, InputEvent::button(MouseButton::Left, true));
        state.apply_event(&mut frame, InputEvent::Focused(false));

        assert!(!state.key_down(Key::S));
        assert!(!state.button_down(MouseButton::Left));
    }

    #[test]
    fn pointer_tracking_sets_inside_window() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        assert!(!state.is_inside_window());

        state.apply_event(&mut frame, InputEvent::PointerMoved { x: 4.0, y: 8.0 });
        assert!(state.is_inside_window());
        assert_eq!(state.pointer_pos, Some(Vec2::new(4.0, 8.0)));

        state.apply_event(&mut frame, InputEvent::PointerLeft);
        assert!(!state.is_inside_window());
        assert_eq!(state.pointer_pos, None);

        state.apply_event(&mut frame, InputEvent::PointerEntered);
        assert!(state.is_inside_window());
    }
}
