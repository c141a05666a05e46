// Input manager - turns winit events into hero input state

use super::action::InputSource;
use super::config::InputConfig;
use super::state::InputState;
use glam::IVec2;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// Routes keyboard and mouse events through the bindings
#[derive(Debug, Default)]
pub struct InputManager {
    config: InputConfig,
    state: InputState,
}

impl InputManager {
    /// Create an input manager with the default bindings
    pub fn new() -> Self {
        Self::with_config(InputConfig::with_defaults())
    }

    pub fn with_config(config: InputConfig) -> Self {
        Self {
            config,
            state: InputState::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            // Key repeats are not new presses
            if event.repeat {
                return;
            }
            self.apply(InputSource::key(key_code), event.state);
        }
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.apply(InputSource::mouse(button), state);
    }

    /// Process a cursor move from winit
    pub fn process_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.state
            .set_pointer(IVec2::new(position.x as i32, position.y as i32));
    }

    fn apply(&mut self, source: InputSource, state: ElementState) {
        let Some(action) = self.config.get_action(source) else {
            return;
        };
        match state {
            ElementState::Pressed => self.state.press(action),
            ElementState::Released => self.state.release(action),
        }
    }

    /// Start a new frame. Call once per logic tick.
    pub fn update(&mut self) {
        self.state.update();
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut InputState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::Action;

    #[test]
    fn test_mouse_button_maps_to_main_actions() {
        let mut manager = InputManager::new();
        manager.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(manager.state().pressing(Action::Main1));

        manager.process_mouse_button(MouseButton::Left, ElementState::Released);
        assert!(!manager.state().pressing(Action::Main1));
    }

    #[test]
    fn test_unbound_button_ignored() {
        let mut manager = InputManager::new();
        manager.process_mouse_button(MouseButton::Middle, ElementState::Pressed);
        assert!(!manager.state().pressing(Action::Main1));
        assert!(!manager.state().pressing(Action::Main2));
    }

    #[test]
    fn test_cursor_moved_sets_pointer() {
        let mut manager = InputManager::new();
        manager.process_cursor_moved(PhysicalPosition::new(120.7, 64.2));
        assert_eq!(manager.state().pointer(), IVec2::new(120, 64));
    }

    #[test]
    fn test_custom_bindings_change_routing() {
        let config = InputConfig::from_bindings(vec![(
            InputSource::mouse(MouseButton::Middle),
            Action::Accept,
        )]);
        let mut manager = InputManager::with_config(config);
        manager.process_mouse_button(MouseButton::Middle, ElementState::Pressed);
        assert!(manager.state().pressing(Action::Accept));

        manager.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(!manager.state().pressing(Action::Main1));
    }

    #[test]
    fn test_update_clears_just_pressed() {
        let mut manager = InputManager::new();
        manager.state_mut().press(Action::Bar(3));
        assert!(manager.state().just_pressed(Action::Bar(3)));

        manager.update();
        assert!(!manager.state().just_pressed(Action::Bar(3)));
        assert!(manager.state().pressing(Action::Bar(3)));
    }
}
