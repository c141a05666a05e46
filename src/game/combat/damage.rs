// Damage resolution
//
// Resolves one hazard against a defender's stat block, in this order:
// re-attack throttle, accuracy roll, base damage, elemental attunement,
// absorption (with blocking), hp loss, status effects and life steal,
// post-hit power, vengeance stacks, outcome.
//
// The whole resolution runs inside one `resolve` call, so no partially
// applied hit is ever observable.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::hazard::Hazard;
use crate::game::characters::stats::{MAX_VENGEANCE_STACKS, TARGETED_FRAMES};
use crate::game::characters::StatBlock;
use crate::game::cues::{CueSink, SoundEffect};
use crate::game::powers::PowerManager;

/// `physdef` needed for blocking to build vengeance
const VENGEANCE_PHYSDEF: i32 = 9;

/// Result of resolving one hazard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Throttled, dodged, or the defender was already dead. Nothing changed.
    Miss,
    /// A blocking defender absorbed everything
    Blocked,
    /// The hit landed and the defender survived. `damage` may be zero for a
    /// penetrating hit that rolled nothing.
    Landed { damage: i32, prev_hp: i32 },
    /// The hit brought hp to zero
    Killed { damage: i32 },
}

impl HitOutcome {
    /// Whether the attack connected
    pub fn landed(&self) -> bool {
        !matches!(self, HitOutcome::Miss)
    }

    /// Whether the defender should play a hit reaction
    pub fn interrupts(&self, hp_after: i32) -> bool {
        matches!(self, HitOutcome::Landed { prev_hp, .. } if *prev_hp > hp_after)
    }
}

/// Rolls and applies hazards. Owns its random source so a fixed seed gives
/// a fixed sequence of outcomes.
#[derive(Debug)]
pub struct DamageResolver<R: Rng = StdRng> {
    rng: R,
}

impl DamageResolver<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> DamageResolver<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Uniform roll in `[min, max]`, fixed when the range is degenerate
    fn roll_range(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            min
        } else {
            self.rng.gen_range(min..=max)
        }
    }

    /// Resolve `hazard` against `defender`.
    pub fn resolve(
        &mut self,
        hazard: Hazard<'_>,
        defender: &mut StatBlock,
        powers: &mut dyn PowerManager,
        cues: &mut dyn CueSink,
    ) -> HitOutcome {
        if !defender.alive {
            return HitOutcome::Miss;
        }

        // Slow, wide missiles would otherwise get an attack roll every frame
        if defender.targeted > 0 {
            return HitOutcome::Miss;
        }
        defender.targeted = TARGETED_FRAMES;

        let mut avoidance = defender.avoidance;
        if defender.blocking {
            avoidance *= 2;
        }
        if self.rng.gen_range(0..100) > hazard.accuracy - avoidance + 25 {
            return HitOutcome::Miss;
        }

        let mut dmg = self.roll_range(hazard.dmg_min, hazard.dmg_max);

        if let Some(element) = hazard.element {
            dmg = (dmg * element.attunement(defender) / 100).max(0);
        }

        let mut blocked = false;
        if !hazard.armor_penetration {
            let mut absorption = self.roll_range(defender.absorb_min, defender.absorb_max);
            if defender.blocking {
                absorption += absorption + defender.absorb_max;
            }

            dmg -= absorption;
            if dmg < 1 && !defender.blocking {
                dmg = 1;
            }
            if dmg <= 0 {
                dmg = 0;
                blocked = true;
                cues.play(SoundEffect::Block);
            }
        }

        let prev_hp = defender.hp;
        defender.take_damage(dmg);

        if defender.hp > 0 && defender.immunity_duration == 0 && dmg > 0 {
            defender.stun_duration = defender.stun_duration.max(hazard.stun_duration);
            defender.slow_duration = defender.slow_duration.max(hazard.slow_duration);
            defender.bleed_duration = defender.bleed_duration.max(hazard.bleed_duration);
            defender.immobilize_duration =
                defender.immobilize_duration.max(hazard.immobilize_duration);

            if hazard.hp_steal != 0 {
                if let Some(source) = hazard.source {
                    let stolen = (dmg as f32 * hazard.hp_steal as f32 / 100.0).ceil() as i32;
                    source.heal(stolen);
                }
            }
        }

        // Post-hit powers are cast by the defender at its own position
        if let Some(post_power) = hazard.post_power {
            if dmg > 0 {
                let at = defender.pos;
                powers.activate(post_power, defender, at);
            }
        }

        if defender.blocking
            && defender.physdef >= VENGEANCE_PHYSDEF
            && defender.vengeance_stacks < MAX_VENGEANCE_STACKS
        {
            defender.vengeance_stacks += 1;
        }

        if defender.hp <= 0 {
            defender.alive = false;
            defender.death_penalty = true;
            log::info!("{} was defeated", defender.name);
            HitOutcome::Killed { damage: dmg }
        } else if blocked {
            HitOutcome::Blocked
        } else {
            HitOutcome::Landed {
                damage: dmg,
                prev_hp,
            }
        }
    }
}
