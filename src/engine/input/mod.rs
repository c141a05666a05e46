// Input handling
//
// - `action`: hero actions and default key/mouse bindings
// - `config`: remappable bindings
// - `state`: pressed, locked and pointer state read by the avatar each frame
// - `manager`: feeds winit events through the bindings into the state

pub mod action;
pub mod config;
pub mod manager;
pub mod state;

pub use action::{Action, InputSource, BAR_KEYS};
pub use config::InputConfig;
pub use manager::InputManager;
pub use state::InputState;
