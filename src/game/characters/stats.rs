// Character stats - build attributes, resources, derived combat values and
// timed status counters.
//
// Derived fields are only trustworthy after `recalc()`. Nothing invalidates
// them automatically; setters that change their inputs mark the block dirty.

use glam::IVec2;

/// Highest reachable level
pub const MAX_LEVEL: u32 = 17;

/// Experience needed to leave each level (`XP_TABLE[level]`)
pub const XP_TABLE: [u32; MAX_LEVEL as usize] = [
    0, 100, 250, 450, 700, 1000, 1350, 1750, 2200, 2700, 3250, 3850, 4500, 5200, 5950, 6750,
    7600,
];

/// Bleed deals one point of damage each time its counter hits this phase
pub const BLEED_INTERVAL: u32 = 30;

/// Frames of re-attack protection after a hazard is evaluated
pub const TARGETED_FRAMES: u32 = 5;

/// Cap on vengeance stacks
pub const MAX_VENGEANCE_STACKS: u32 = 3;

/// Modifiers granted by the currently equipped gear
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipmentBonus {
    pub dmg_melee_min: i32,
    pub dmg_melee_max: i32,
    pub dmg_ranged_min: i32,
    pub dmg_ranged_max: i32,
    pub dmg_ment_min: i32,
    pub dmg_ment_max: i32,
    pub absorb_min: i32,
    pub absorb_max: i32,
    /// Percent of fire damage ignored
    pub resist_fire: i32,
    /// Percent of ice/water damage ignored
    pub resist_ice: i32,
    pub bonus_hp: i32,
    pub bonus_mp: i32,
    pub wielding_physical: bool,
    pub wielding_mental: bool,
    pub wielding_offense: bool,
}

impl EquipmentBonus {
    /// Combine two bonuses (e.g. main hand + body armor)
    pub fn stack(mut self, other: &EquipmentBonus) -> Self {
        self.dmg_melee_min += other.dmg_melee_min;
        self.dmg_melee_max += other.dmg_melee_max;
        self.dmg_ranged_min += other.dmg_ranged_min;
        self.dmg_ranged_max += other.dmg_ranged_max;
        self.dmg_ment_min += other.dmg_ment_min;
        self.dmg_ment_max += other.dmg_ment_max;
        self.absorb_min += other.absorb_min;
        self.absorb_max += other.absorb_max;
        self.resist_fire += other.resist_fire;
        self.resist_ice += other.resist_ice;
        self.bonus_hp += other.bonus_hp;
        self.bonus_mp += other.bonus_mp;
        self.wielding_physical |= other.wielding_physical;
        self.wielding_mental |= other.wielding_mental;
        self.wielding_offense |= other.wielding_offense;
        self
    }
}

/// The four build attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Build {
    pub physical: i32,
    pub mental: i32,
    pub offense: i32,
    pub defense: i32,
}

impl Default for Build {
    fn default() -> Self {
        Self {
            physical: 1,
            mental: 1,
            offense: 1,
            defense: 1,
        }
    }
}

/// Numeric and status data for a character
#[derive(Debug, Clone)]
pub struct StatBlock {
    // Identity
    pub name: String,
    /// Body base (e.g. "male")
    pub base: String,
    /// Head/look option within the base
    pub look: String,
    pub hero: bool,

    // Progress
    pub level: u32,
    pub xp: u32,
    pub build: Build,

    // Resources
    pub hp: i32,
    pub maxhp: i32,
    pub mp: i32,
    pub maxmp: i32,

    // Derived combat stats
    pub accuracy: i32,
    pub avoidance: i32,
    pub dmg_melee_min: i32,
    pub dmg_melee_max: i32,
    pub dmg_ranged_min: i32,
    pub dmg_ranged_max: i32,
    pub dmg_ment_min: i32,
    pub dmg_ment_max: i32,
    pub absorb_min: i32,
    pub absorb_max: i32,
    /// Percent of incoming fire damage taken
    pub attunement_fire: i32,
    /// Percent of incoming ice/water damage taken
    pub attunement_ice: i32,
    pub physoff: i32,
    pub physdef: i32,
    pub mentoff: i32,
    pub mentdef: i32,
    pub physment: i32,
    pub offdef: i32,

    // Movement and position
    /// Map-unit position
    pub pos: IVec2,
    /// Facing direction, 0..8
    pub direction: u8,
    /// Orthogonal movement speed (map units per frame)
    pub speed: i32,
    /// Per-axis speed when moving diagonally
    pub dspeed: i32,

    // Cooldown
    /// Frames added to `cooldown_ticks` after a power animation
    pub cooldown: u32,
    pub cooldown_ticks: u32,

    // Timed statuses (frames remaining)
    pub stun_duration: u32,
    pub slow_duration: u32,
    pub bleed_duration: u32,
    pub immobilize_duration: u32,
    pub immunity_duration: u32,
    pub haste_duration: u32,
    /// Re-attack throttle
    pub targeted: u32,

    // Flags
    pub blocking: bool,
    pub alive: bool,
    pub corpse: bool,
    pub wielding_physical: bool,
    pub wielding_mental: bool,
    pub wielding_offense: bool,
    /// Raised on death, consumed once by whoever applies the penalty
    pub death_penalty: bool,
    pub vengeance_stacks: u32,

    equipment: EquipmentBonus,
    dirty: bool,
}

impl Default for StatBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl StatBlock {
    /// A fresh level-1 hero with recalculated derived stats
    pub fn new() -> Self {
        let mut stats = Self {
            name: "Unknown".to_string(),
            base: "male".to_string(),
            look: "head_short".to_string(),
            hero: true,
            level: 1,
            xp: 0,
            build: Build::default(),
            hp: 0,
            maxhp: 0,
            mp: 0,
            maxmp: 0,
            accuracy: 0,
            avoidance: 0,
            dmg_melee_min: 0,
            dmg_melee_max: 0,
            dmg_ranged_min: 0,
            dmg_ranged_max: 0,
            dmg_ment_min: 0,
            dmg_ment_max: 0,
            absorb_min: 0,
            absorb_max: 0,
            attunement_fire: 100,
            attunement_ice: 100,
            physoff: 0,
            physdef: 0,
            mentoff: 0,
            mentdef: 0,
            physment: 0,
            offdef: 0,
            pos: IVec2::ZERO,
            direction: 0,
            speed: 14,
            dspeed: 10,
            cooldown: 4,
            cooldown_ticks: 0,
            stun_duration: 0,
            slow_duration: 0,
            bleed_duration: 0,
            immobilize_duration: 0,
            immunity_duration: 0,
            haste_duration: 0,
            targeted: 0,
            blocking: false,
            alive: true,
            corpse: false,
            wielding_physical: false,
            wielding_mental: false,
            wielding_offense: false,
            death_penalty: false,
            vengeance_stacks: 0,
            equipment: EquipmentBonus::default(),
            dirty: true,
        };
        stats.recalc();
        stats.hp = stats.maxhp;
        stats.mp = stats.maxmp;
        stats
    }

    /// Whether derived stats are stale
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replace the build attributes
    pub fn set_build(&mut self, build: Build) {
        self.build = build;
        self.dirty = true;
    }

    /// Replace the applied equipment modifiers
    pub fn set_equipment(&mut self, equipment: EquipmentBonus) {
        self.equipment = equipment;
        self.dirty = true;
    }

    pub fn equipment(&self) -> &EquipmentBonus {
        &self.equipment
    }

    /// Recompute every derived stat from level, build and equipment.
    pub fn recalc(&mut self) {
        let lev0 = self.level as i32 - 1;
        let phys0 = self.build.physical - 1;
        let ment0 = self.build.mental - 1;
        let off0 = self.build.offense - 1;
        let def0 = self.build.defense - 1;
        let eq = &self.equipment;

        self.maxhp = 12 + 3 * lev0 + 6 * phys0 + eq.bonus_hp;
        self.maxmp = 12 + 3 * lev0 + 6 * ment0 + eq.bonus_mp;
        self.accuracy = 75 + lev0 + 5 * off0;
        self.avoidance = 25 + lev0 + 5 * def0;

        let b = self.build;
        self.physoff = b.physical + b.offense;
        self.physdef = b.physical + b.defense;
        self.mentoff = b.mental + b.offense;
        self.mentdef = b.mental + b.defense;
        self.physment = b.physical + b.mental;
        self.offdef = b.offense + b.defense;

        self.dmg_melee_min = eq.dmg_melee_min;
        self.dmg_melee_max = eq.dmg_melee_max;
        self.dmg_ranged_min = eq.dmg_ranged_min;
        self.dmg_ranged_max = eq.dmg_ranged_max;
        self.dmg_ment_min = eq.dmg_ment_min;
        self.dmg_ment_max = eq.dmg_ment_max;
        self.absorb_min = eq.absorb_min;
        self.absorb_max = eq.absorb_max.max(eq.absorb_min);
        self.attunement_fire = 100 - eq.resist_fire;
        self.attunement_ice = 100 - eq.resist_ice;
        self.wielding_physical = eq.wielding_physical;
        self.wielding_mental = eq.wielding_mental;
        self.wielding_offense = eq.wielding_offense;

        self.hp = self.hp.clamp(0, self.maxhp.max(0));
        self.mp = self.mp.clamp(0, self.maxmp.max(0));
        self.dirty = false;
    }

    /// Lose `amount` hp. Negative amounts deal nothing; hp stays in
    /// `0..=maxhp`.
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount.max(0)).clamp(0, self.maxhp.max(0));
    }

    /// Gain `amount` hp (negative drains), kept in `0..=maxhp`
    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount).clamp(0, self.maxhp.max(0));
    }

    /// Advance cooldowns and timed statuses by one frame
    pub fn logic(&mut self) {
        self.cooldown_ticks = self.cooldown_ticks.saturating_sub(1);
        self.stun_duration = self.stun_duration.saturating_sub(1);
        self.slow_duration = self.slow_duration.saturating_sub(1);
        self.bleed_duration = self.bleed_duration.saturating_sub(1);
        self.immobilize_duration = self.immobilize_duration.saturating_sub(1);
        self.immunity_duration = self.immunity_duration.saturating_sub(1);
        self.haste_duration = self.haste_duration.saturating_sub(1);
        self.targeted = self.targeted.saturating_sub(1);

        if self.bleed_tick() {
            self.take_damage(1);
        }
    }

    /// True on frames where an active bleed bites
    pub fn bleed_tick(&self) -> bool {
        self.bleed_duration % BLEED_INTERVAL == 1
    }

    /// Drop all timed statuses and the blocking stance
    pub fn clear_effects(&mut self) {
        self.stun_duration = 0;
        self.slow_duration = 0;
        self.bleed_duration = 0;
        self.immobilize_duration = 0;
        self.immunity_duration = 0;
        self.haste_duration = 0;
        self.blocking = false;
    }

    /// Experience needed to leave the current level, `None` at the cap
    pub fn next_level_xp(&self) -> Option<u32> {
        if self.level < MAX_LEVEL {
            XP_TABLE.get(self.level as usize).copied()
        } else {
            None
        }
    }

    /// Gain at most one level if experience allows it. Returns true on level-up.
    pub fn check_level_up(&mut self) -> bool {
        match self.next_level_xp() {
            Some(needed) if self.xp >= needed => {
                self.level += 1;
                self.dirty = true;
                self.recalc();
                true
            }
            _ => false,
        }
    }

    /// Consume the death penalty flag
    pub fn take_death_penalty(&mut self) -> bool {
        std::mem::take(&mut self.death_penalty)
    }

    /// Refill hp and mp
    pub fn restore(&mut self) {
        self.hp = self.maxhp;
        self.mp = self.maxmp;
    }
}
