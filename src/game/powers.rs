// Power definitions and the activation seam
//
// The avatar core only reads the fields below. What an activation actually
// spawns (missiles, hazards, effects) belongs to the power system behind
// `PowerManager`.

use std::collections::HashMap;

use glam::IVec2;

use crate::game::characters::StatBlock;

/// Identifier of a power in the power database
pub type PowerId = u32;

/// Blood spurt effect fired while bleeding
pub const POWER_SPARK_BLOOD: PowerId = 127;

/// Avatar state a power puts the hero into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerState {
    Swing,
    Shoot,
    Cast,
    Block,
}

/// Fields of a power the avatar core consults
#[derive(Debug, Clone)]
pub struct PowerDef {
    pub name: String,
    pub new_state: PowerState,
    /// Turn to face the target when used
    pub face: bool,
    pub requires_mp: i32,
    pub requires_physical_weapon: bool,
    pub requires_mental_weapon: bool,
    pub requires_offense_weapon: bool,
    pub requires_los: bool,
    pub requires_empty_target: bool,
    /// Screen-space vertical nudge applied to the pointer before aiming
    pub aim_assist: i32,
}

impl PowerDef {
    /// A power with no requirements
    pub fn new(name: &str, new_state: PowerState) -> Self {
        Self {
            name: name.to_string(),
            new_state,
            face: true,
            requires_mp: 0,
            requires_physical_weapon: false,
            requires_mental_weapon: false,
            requires_offense_weapon: false,
            requires_los: false,
            requires_empty_target: false,
            aim_assist: 0,
        }
    }

    pub fn with_mp(mut self, mp: i32) -> Self {
        self.requires_mp = mp;
        self
    }

    pub fn with_los(mut self) -> Self {
        self.requires_los = true;
        self
    }

    pub fn with_empty_target(mut self) -> Self {
        self.requires_empty_target = true;
        self
    }

    pub fn with_aim_assist(mut self, aim_assist: i32) -> Self {
        self.aim_assist = aim_assist;
        self
    }

    pub fn without_facing(mut self) -> Self {
        self.face = false;
        self
    }
}

/// Power lookup and activation, shared by the state machine and the damage
/// resolver
pub trait PowerManager {
    fn power(&self, id: PowerId) -> Option<&PowerDef>;

    /// Fire `id` on behalf of `caster` toward `target`. Returns false if the
    /// power is unknown.
    fn activate(&mut self, id: PowerId, caster: &mut StatBlock, target: IVec2) -> bool;
}

/// A power fired this frame, waiting for the hazard spawner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub power: PowerId,
    pub origin: IVec2,
    pub target: IVec2,
}

/// In-memory power database
#[derive(Debug, Default)]
pub struct PowerLibrary {
    powers: HashMap<PowerId, PowerDef>,
    pending: Vec<Activation>,
}

impl PowerLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Powers a new hero starts with
    pub fn with_starter_powers() -> Self {
        let mut library = Self::new();
        library.insert(1, PowerDef::new("Swing", PowerState::Swing));
        library.insert(
            2,
            PowerDef::new("Shoot", PowerState::Shoot)
                .with_los()
                .with_aim_assist(32),
        );
        library.insert(
            3,
            PowerDef::new("Shock", PowerState::Cast).with_mp(1).with_los(),
        );
        library.insert(
            4,
            PowerDef::new("Blink", PowerState::Cast)
                .with_mp(2)
                .with_los()
                .with_empty_target(),
        );
        library.insert(
            5,
            PowerDef::new("Shield", PowerState::Block).without_facing(),
        );
        library.insert(
            POWER_SPARK_BLOOD,
            PowerDef::new("Blood Spark", PowerState::Cast).without_facing(),
        );
        library
    }

    pub fn insert(&mut self, id: PowerId, def: PowerDef) {
        self.powers.insert(id, def);
    }

    /// Activations since the last drain
    pub fn pending(&self) -> &[Activation] {
        &self.pending
    }

    /// Hand queued activations to the hazard spawner
    pub fn drain_activations(&mut self) -> Vec<Activation> {
        std::mem::take(&mut self.pending)
    }
}

impl PowerManager for PowerLibrary {
    fn power(&self, id: PowerId) -> Option<&PowerDef> {
        self.powers.get(&id)
    }

    fn activate(&mut self, id: PowerId, caster: &mut StatBlock, target: IVec2) -> bool {
        let Some(def) = self.powers.get(&id) else {
            log::warn!("activation of unknown power {}", id);
            return false;
        };

        caster.mp = (caster.mp - def.requires_mp).max(0);
        log::debug!("power {} ({}) fired toward {}", id, def.name, target);

        self.pending.push(Activation {
            power: id,
            origin: caster.pos,
            target,
        });
        true
    }
}
