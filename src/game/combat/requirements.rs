// Requirement gate for starting a power
//
// Gates run in a fixed order and stop at the first failure: mana, weapon
// category (physical, mental, offense), line of sight, target emptiness.
// Map queries are never made for a power that already failed a cheaper gate.

use glam::IVec2;

use crate::game::characters::StatBlock;
use crate::game::powers::PowerDef;
use crate::game::world::MapCollaborator;

/// The first requirement a power failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GateFailure {
    #[error("not enough mana")]
    Mana,
    #[error("requires a physical weapon")]
    PhysicalWeapon,
    #[error("requires a mental weapon")]
    MentalWeapon,
    #[error("requires an offense weapon")]
    OffenseWeapon,
    #[error("target not in line of sight")]
    LineOfSight,
    #[error("target is occupied")]
    TargetOccupied,
}

/// Check whether `caster` may use `power` on `target` right now
pub fn check_requirements(
    power: &PowerDef,
    caster: &StatBlock,
    map: &dyn MapCollaborator,
    target: IVec2,
) -> Result<(), GateFailure> {
    if power.requires_mp > caster.mp {
        return Err(GateFailure::Mana);
    }
    if power.requires_physical_weapon && !caster.wielding_physical {
        return Err(GateFailure::PhysicalWeapon);
    }
    if power.requires_mental_weapon && !caster.wielding_mental {
        return Err(GateFailure::MentalWeapon);
    }
    if power.requires_offense_weapon && !caster.wielding_offense {
        return Err(GateFailure::OffenseWeapon);
    }
    if power.requires_los && !map.line_of_sight(caster.pos, target) {
        return Err(GateFailure::LineOfSight);
    }
    if power.requires_empty_target && !map.is_empty(target) {
        return Err(GateFailure::TargetOccupied);
    }
    Ok(())
}
