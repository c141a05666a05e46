// Per-frame input state for the hero

use super::action::Action;
use glam::IVec2;
use std::collections::HashSet;

/// Pressed/locked actions plus the pointer position
#[derive(Debug, Default)]
pub struct InputState {
    /// Actions currently held down
    pressed: HashSet<Action>,

    /// Actions pressed since the last `update`
    just_pressed: HashSet<Action>,

    /// Actions released since the last `update`
    just_released: HashSet<Action>,

    /// Actions consumed by a consumer until their next release
    locked: HashSet<Action>,

    /// Pointer position in screen pixels
    pointer: IVec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently held
    pub fn pressing(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was pressed this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was released this frame
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Whether a held action has already been consumed
    pub fn is_locked(&self, action: Action) -> bool {
        self.locked.contains(&action)
    }

    /// Mark a held action as consumed. The lock lasts until the action is
    /// released.
    pub fn lock(&mut self, action: Action) {
        self.locked.insert(action);
    }

    /// Any of the four movement actions is held
    pub fn pressing_direction(&self) -> bool {
        self.pressed.iter().any(Action::is_movement)
    }

    pub fn pointer(&self) -> IVec2 {
        self.pointer
    }

    pub fn set_pointer(&mut self, pointer: IVec2) {
        self.pointer = pointer;
    }

    /// Register an action press
    pub fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release. Releasing also drops its lock.
    pub fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
        self.locked.remove(&action);
    }

    /// Start a new frame. Call once per logic tick after the consumer ran.
    pub fn update(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Drop all input state (e.g. on focus loss)
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
        self.locked.clear();
    }
}
