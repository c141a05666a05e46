// Hero inventory: gold, equipped gear and carried items
//
// Item ids index an item catalog; id 0 is an empty slot.

use std::collections::HashMap;

use crate::game::characters::EquipmentBonus;
use crate::game::persistence::InventoryPort;

/// Equipment slots, in storage order
pub const SLOT_MAIN: usize = 0;
pub const SLOT_BODY: usize = 1;
pub const SLOT_OFF: usize = 2;
pub const SLOT_ARTIFACT: usize = 3;
pub const EQUIPPED_SLOTS: usize = 4;

/// Backpack size
pub const CARRIED_SLOTS: usize = 64;

/// Item id of an empty slot
pub const NO_ITEM: i32 = 0;

/// A catalog entry
#[derive(Debug, Clone, Default)]
pub struct ItemDef {
    pub name: String,
    /// Sprite layer shown when equipped, empty for none
    pub graphic: String,
    pub bonus: EquipmentBonus,
}

impl ItemDef {
    pub fn new(name: &str, graphic: &str, bonus: EquipmentBonus) -> Self {
        Self {
            name: name.to_string(),
            graphic: graphic.to_string(),
            bonus,
        }
    }
}

/// Fixed-size slots of item ids and stack quantities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStorage {
    items: Vec<i32>,
    quantities: Vec<i32>,
}

impl ItemStorage {
    pub fn new(slots: usize) -> Self {
        Self {
            items: vec![NO_ITEM; slots],
            quantities: vec![0; slots],
        }
    }

    pub fn slots(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[i32] {
        &self.items
    }

    pub fn quantities(&self) -> &[i32] {
        &self.quantities
    }

    pub fn item(&self, slot: usize) -> i32 {
        self.items.get(slot).copied().unwrap_or(NO_ITEM)
    }

    /// Put `quantity` of `item` into `slot`. Out-of-range slots are ignored.
    pub fn set(&mut self, slot: usize, item: i32, quantity: i32) {
        if slot < self.items.len() {
            self.items[slot] = item;
            self.quantities[slot] = quantity;
        }
    }

    /// Overwrite item ids from the front; extra values are dropped and
    /// slots past the end of `items` are emptied
    pub fn set_items(&mut self, items: &[i32]) {
        fill(&mut self.items, items, NO_ITEM);
    }

    pub fn set_quantities(&mut self, quantities: &[i32]) {
        fill(&mut self.quantities, quantities, 0);
    }
}

fn fill(slots: &mut [i32], values: &[i32], empty: i32) {
    for (index, slot) in slots.iter_mut().enumerate() {
        *slot = values.get(index).copied().unwrap_or(empty);
    }
}

/// Gold plus the equipped and carried storages
#[derive(Debug, Clone)]
pub struct Inventory {
    pub gold: i32,
    equipped: ItemStorage,
    carried: ItemStorage,
    catalog: HashMap<i32, ItemDef>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self {
            gold: 0,
            equipped: ItemStorage::new(EQUIPPED_SLOTS),
            carried: ItemStorage::new(CARRIED_SLOTS),
            catalog: HashMap::new(),
        }
    }

    /// A small catalog of starter gear
    pub fn with_starter_catalog() -> Self {
        let mut inventory = Self::new();
        inventory.register(
            1,
            ItemDef::new(
                "Dagger",
                "dagger",
                EquipmentBonus {
                    dmg_melee_min: 2,
                    dmg_melee_max: 6,
                    wielding_physical: true,
                    ..Default::default()
                },
            ),
        );
        inventory.register(
            2,
            ItemDef::new(
                "Wand",
                "wand",
                EquipmentBonus {
                    dmg_ment_min: 2,
                    dmg_ment_max: 6,
                    wielding_mental: true,
                    ..Default::default()
                },
            ),
        );
        inventory.register(
            3,
            ItemDef::new(
                "Leather Armor",
                "leather_armor",
                EquipmentBonus {
                    absorb_min: 1,
                    absorb_max: 2,
                    ..Default::default()
                },
            ),
        );
        inventory.register(
            4,
            ItemDef::new(
                "Buckler",
                "buckler",
                EquipmentBonus {
                    absorb_min: 0,
                    absorb_max: 1,
                    ..Default::default()
                },
            ),
        );
        inventory.register(
            5,
            ItemDef::new(
                "Ring of Fire Resistance",
                "",
                EquipmentBonus {
                    resist_fire: 25,
                    ..Default::default()
                },
            ),
        );
        inventory
    }

    pub fn register(&mut self, id: i32, def: ItemDef) {
        self.catalog.insert(id, def);
    }

    pub fn item_def(&self, id: i32) -> Option<&ItemDef> {
        self.catalog.get(&id)
    }

    fn graphic(&self, slot: usize) -> &str {
        self.item_def(self.equipped.item(slot))
            .map(|def| def.graphic.as_str())
            .unwrap_or("")
    }

    /// Sprite layers for the equipped main hand, body and off hand
    pub fn equipped_graphics(&self) -> (&str, &str, &str) {
        (
            self.graphic(SLOT_MAIN),
            self.graphic(SLOT_BODY),
            self.graphic(SLOT_OFF),
        )
    }

    /// Lose half the gold, rounding in the hero's favor
    pub fn apply_death_penalty(&mut self) {
        let lost = self.gold / 2;
        self.gold -= lost;
        log::info!("lost {} gold", lost);
    }
}

impl InventoryPort for Inventory {
    fn gold(&self) -> i32 {
        self.gold
    }

    fn set_gold(&mut self, gold: i32) {
        self.gold = gold;
    }

    fn equipped(&self) -> &ItemStorage {
        &self.equipped
    }

    fn equipped_mut(&mut self) -> &mut ItemStorage {
        &mut self.equipped
    }

    fn carried(&self) -> &ItemStorage {
        &self.carried
    }

    fn carried_mut(&mut self) -> &mut ItemStorage {
        &mut self.carried
    }

    /// Unknown item ids contribute nothing
    fn equipment_bonus(&self) -> EquipmentBonus {
        self.equipped
            .items()
            .iter()
            .filter(|id| **id != NO_ITEM)
            .filter_map(|id| self.catalog.get(id))
            .fold(EquipmentBonus::default(), |total, def| total.stack(&def.bonus))
    }
}
