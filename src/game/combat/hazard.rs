// Incoming attack instances

use std::fmt;

use crate::game::characters::StatBlock;
use crate::game::powers::PowerId;

/// Elemental trait of a hazard. Each element maps to one attunement stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Fire,
    Water,
}

impl Element {
    /// Percent of this element's damage the defender takes
    pub fn attunement(&self, stats: &StatBlock) -> i32 {
        match self {
            Element::Fire => stats.attunement_fire,
            Element::Water => stats.attunement_ice,
        }
    }
}

/// One incoming attack.
///
/// A hazard is consumed by value when resolved, so it can only land once.
/// The attacker's stat block is borrowed for life-steal crediting.
pub struct Hazard<'src> {
    pub dmg_min: i32,
    pub dmg_max: i32,
    pub accuracy: i32,
    pub element: Option<Element>,
    /// Skip absorption entirely
    pub armor_penetration: bool,
    pub stun_duration: u32,
    pub slow_duration: u32,
    pub bleed_duration: u32,
    pub immobilize_duration: u32,
    /// Percent of damage dealt returned to the attacker as hp
    pub hp_steal: i32,
    pub source: Option<&'src mut StatBlock>,
    /// Power triggered on the defender after a damaging hit
    pub post_power: Option<PowerId>,
}

impl<'src> Hazard<'src> {
    pub fn new(dmg_min: i32, dmg_max: i32, accuracy: i32) -> Self {
        Self {
            dmg_min,
            dmg_max,
            accuracy,
            element: None,
            armor_penetration: false,
            stun_duration: 0,
            slow_duration: 0,
            bleed_duration: 0,
            immobilize_duration: 0,
            hp_steal: 0,
            source: None,
            post_power: None,
        }
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.element = Some(element);
        self
    }

    pub fn penetrating(mut self) -> Self {
        self.armor_penetration = true;
        self
    }

    pub fn with_stun(mut self, frames: u32) -> Self {
        self.stun_duration = frames;
        self
    }

    pub fn with_slow(mut self, frames: u32) -> Self {
        self.slow_duration = frames;
        self
    }

    pub fn with_bleed(mut self, frames: u32) -> Self {
        self.bleed_duration = frames;
        self
    }

    pub fn with_immobilize(mut self, frames: u32) -> Self {
        self.immobilize_duration = frames;
        self
    }

    /// Credit `percent` of dealt damage to `source`
    pub fn with_life_steal(mut self, percent: i32, source: &'src mut StatBlock) -> Self {
        self.hp_steal = percent;
        self.source = Some(source);
        self
    }

    pub fn with_post_power(mut self, power: PowerId) -> Self {
        self.post_power = Some(power);
        self
    }
}

impl fmt::Debug for Hazard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hazard")
            .field("dmg", &(self.dmg_min..=self.dmg_max))
            .field("accuracy", &self.accuracy)
            .field("element", &self.element)
            .field("armor_penetration", &self.armor_penetration)
            .field("hp_steal", &self.hp_steal)
            .field("source", &self.source.as_ref().map(|s| s.name.as_str()))
            .field("post_power", &self.post_power)
            .finish_non_exhaustive()
    }
}
