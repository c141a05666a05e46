// Save slots
//
// A save is a plain `key=value` text file per slot. The hero's stat block is
// saved directly; inventory, hotkeys and campaign flags go through the ports
// below so their owners stay independent of the file format.

mod record;
mod save;

pub use record::SaveRecord;
pub use save::{LoadStatus, SaveError, SaveSlots, SaveStatus};

use crate::game::actionbar::HOTKEY_SLOTS;
use crate::game::characters::{EquipmentBonus, StatBlock};
use crate::game::inventory::ItemStorage;
use crate::game::world::MapCollaborator;

/// Slot value that disables saving and loading
pub const NO_SLOT: u32 = 0;

/// Highest save slot
pub const MAX_SLOT: u32 = 4;

/// Gold and item storages
pub trait InventoryPort {
    fn gold(&self) -> i32;
    fn set_gold(&mut self, gold: i32);
    fn equipped(&self) -> &ItemStorage;
    fn equipped_mut(&mut self) -> &mut ItemStorage;
    fn carried(&self) -> &ItemStorage;
    fn carried_mut(&mut self) -> &mut ItemStorage;
    /// Combined modifiers of everything equipped
    fn equipment_bonus(&self) -> EquipmentBonus;
}

/// Action bar hotkeys, -1 for an empty slot
pub trait HotkeyPort {
    fn hotkeys(&self) -> [i32; HOTKEY_SLOTS];
    fn set_hotkeys(&mut self, hotkeys: [i32; HOTKEY_SLOTS]);
}

/// Campaign flags as one opaque blob
pub trait CampaignPort {
    fn get_all(&self) -> String;
    fn set_all(&mut self, all: &str);
}

/// Everything a save touches
pub struct HeroSession<'a> {
    pub stats: &'a mut StatBlock,
    pub inventory: &'a mut dyn InventoryPort,
    pub hotkeys: &'a mut dyn HotkeyPort,
    pub campaign: &'a mut dyn CampaignPort,
    pub map: &'a mut dyn MapCollaborator,
}
