// Hero actions and their default key/mouse bindings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Number of numbered action bar keys
pub const BAR_KEYS: u8 = 10;

/// Everything the hero can be told to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    Up,
    Down,
    Left,
    Right,

    // Primary and secondary pointer actions
    Main1,
    Main2,

    // Menu/confirm
    Accept,
    Cancel,

    /// Numbered action bar key, `0..BAR_KEYS`
    Bar(u8),
}

impl Action {
    pub fn is_movement(&self) -> bool {
        matches!(self, Action::Up | Action::Down | Action::Left | Action::Right)
    }
}

/// Represents an input source (keyboard key or mouse button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Create a mouse button input source
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

const BAR_KEY_CODES: [KeyCode; BAR_KEYS as usize] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
    KeyCode::Digit0,
];

/// Default keyboard/mouse bindings
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    let mut bindings = vec![
        // Movement (arrows and WASD)
        (InputSource::key(KeyCode::ArrowUp), Action::Up),
        (InputSource::key(KeyCode::ArrowDown), Action::Down),
        (InputSource::key(KeyCode::ArrowLeft), Action::Left),
        (InputSource::key(KeyCode::ArrowRight), Action::Right),
        (InputSource::key(KeyCode::KeyW), Action::Up),
        (InputSource::key(KeyCode::KeyS), Action::Down),
        (InputSource::key(KeyCode::KeyA), Action::Left),
        (InputSource::key(KeyCode::KeyD), Action::Right),
        // Pointer actions
        (InputSource::mouse(MouseButton::Left), Action::Main1),
        (InputSource::mouse(MouseButton::Right), Action::Main2),
        // Meta
        (InputSource::key(KeyCode::Enter), Action::Accept),
        (InputSource::key(KeyCode::Escape), Action::Cancel),
    ];

    bindings.extend(
        BAR_KEY_CODES
            .iter()
            .enumerate()
            .map(|(slot, code)| (InputSource::key(*code), Action::Bar(slot as u8))),
    );
    bindings
}
