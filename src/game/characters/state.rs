// Avatar state machine

use crate::game::powers::PowerState;

/// Represents the current state of the avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AvatarState {
    /// Idle and ready to act
    #[default]
    Stance,
    /// Moving
    Run,
    /// Swinging a melee power
    Melee,
    /// Casting a mental power
    Cast,
    /// Firing a ranged power
    Shoot,
    /// Holding a block power
    Block,
    /// Hit reaction, cannot be cancelled
    Hit,
    /// Dead until respawn
    Dead,
}

impl AvatarState {
    /// Animation played while in this state
    pub fn animation_name(&self) -> &'static str {
        match self {
            Self::Stance => "stance",
            Self::Run => "run",
            Self::Melee => "melee",
            Self::Cast => "ment",
            Self::Shoot => "ranged",
            Self::Block => "block",
            Self::Hit => "hit",
            Self::Dead => "die",
        }
    }

    /// State entered when a power with the given activation kind starts
    pub fn for_power(state: PowerState) -> Self {
        match state {
            PowerState::Swing => Self::Melee,
            PowerState::Shoot => Self::Shoot,
            PowerState::Cast => Self::Cast,
            PowerState::Block => Self::Block,
        }
    }
}

/// Holds the active state; exactly one at a time
#[derive(Debug)]
pub struct AvatarStateMachine {
    current_state: AvatarState,
}

impl Default for AvatarStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl AvatarStateMachine {
    pub fn new() -> Self {
        Self {
            current_state: AvatarState::Stance,
        }
    }

    pub fn state(&self) -> AvatarState {
        self.current_state
    }

    /// Transition to a new state. Returns true if the state changed.
    pub fn transition(&mut self, new_state: AvatarState) -> bool {
        if self.current_state == new_state {
            return false;
        }
        log::trace!("avatar state {:?} -> {:?}", self.current_state, new_state);
        self.current_state = new_state;
        true
    }

    pub fn is_dead(&self) -> bool {
        self.current_state == AvatarState::Dead
    }
}
