// Save file contents and the key=value text format

use glam::IVec2;

use super::HeroSession;
use crate::core::math::{tile_center, to_tile};
use crate::game::actionbar::{EMPTY_HOTKEY, HOTKEY_SLOTS};
use crate::game::characters::Build;
use crate::game::world::SpawnPoint;

/// One save file. Every field is optional: a file may lack any key, and
/// loading only overwrites what the file provides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveRecord {
    pub name: Option<String>,
    pub base: Option<String>,
    pub look: Option<String>,
    pub xp: Option<u32>,
    pub build: Option<Build>,
    pub gold: Option<i32>,
    pub equipped: Option<Vec<i32>>,
    pub equipped_quantity: Option<Vec<i32>>,
    pub carried: Option<Vec<i32>>,
    pub carried_quantity: Option<Vec<i32>>,
    /// Respawn map and tile
    pub spawn: Option<(String, IVec2)>,
    pub actionbar: Option<[i32; HOTKEY_SLOTS]>,
    pub campaign: Option<String>,
}

impl SaveRecord {
    /// Snapshot everything that gets saved
    pub fn capture(session: &HeroSession<'_>) -> Self {
        let stats = &*session.stats;
        let inventory = &*session.inventory;
        let respawn = session.map.respawn_point();

        Self {
            name: Some(stats.name.clone()),
            base: Some(stats.base.clone()),
            look: Some(stats.look.clone()),
            xp: Some(stats.xp),
            build: Some(stats.build),
            gold: Some(inventory.gold()),
            equipped: Some(inventory.equipped().items().to_vec()),
            equipped_quantity: Some(inventory.equipped().quantities().to_vec()),
            carried: Some(inventory.carried().items().to_vec()),
            carried_quantity: Some(inventory.carried().quantities().to_vec()),
            spawn: Some((respawn.map, to_tile(respawn.pos))),
            actionbar: Some(session.hotkeys.hotkeys()),
            campaign: Some(session.campaign.get_all()),
        }
    }

    /// Render as save file text, one `key=value` per line
    pub fn to_text(&self) -> String {
        let mut lines = Vec::new();
        let mut line = |key: &str, value: String| lines.push(format!("{}={}", key, value));

        if let Some(name) = &self.name {
            line("name", name.clone());
        }
        if let Some(base) = &self.base {
            line("base", base.clone());
        }
        if let Some(look) = &self.look {
            line("look", look.clone());
        }
        if let Some(xp) = self.xp {
            line("xp", xp.to_string());
        }
        if let Some(b) = self.build {
            line(
                "build",
                join(&[b.physical, b.mental, b.offense, b.defense]),
            );
        }
        if let Some(gold) = self.gold {
            line("gold", gold.to_string());
        }
        if let Some(items) = &self.equipped {
            line("equipped", join(items));
        }
        if let Some(quantities) = &self.equipped_quantity {
            line("equipped_quantity", join(quantities));
        }
        if let Some(items) = &self.carried {
            line("carried", join(items));
        }
        if let Some(quantities) = &self.carried_quantity {
            line("carried_quantity", join(quantities));
        }
        if let Some((map, tile)) = &self.spawn {
            line("spawn", format!("{},{},{}", map, tile.x, tile.y));
        }
        if let Some(hotkeys) = &self.actionbar {
            line("actionbar", join(hotkeys));
        }
        if let Some(campaign) = &self.campaign {
            line("campaign", campaign.clone());
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    /// Parse save file text. Never fails: blank lines, `#` comments, lines
    /// without `=`, unknown keys and malformed values are skipped.
    pub fn parse(text: &str) -> Self {
        let mut record = Self::default();

        for raw in text.lines() {
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let Some((key, value)) = trimmed.split_once('=') else {
                log::debug!("skipping save line without '=': {:?}", trimmed);
                continue;
            };
            let (key, value) = (key.trim(), value.trim());

            if !record.accept(key, value) {
                log::warn!("ignoring malformed save value {}={:?}", key, value);
            }
        }

        record
    }

    /// Store one key. Returns false if the value is malformed.
    fn accept(&mut self, key: &str, value: &str) -> bool {
        match key {
            "name" => self.name = Some(value.to_string()),
            "base" => self.base = Some(value.to_string()),
            "look" => self.look = Some(value.to_string()),
            "xp" => match value.parse() {
                Ok(xp) => self.xp = Some(xp),
                Err(_) => return false,
            },
            "build" => match parse_ints(value).as_deref() {
                Some(&[physical, mental, offense, defense]) => {
                    self.build = Some(Build {
                        physical,
                        mental,
                        offense,
                        defense,
                    })
                }
                _ => return false,
            },
            "gold" => match value.parse() {
                Ok(gold) => self.gold = Some(gold),
                Err(_) => return false,
            },
            "equipped" => return store_ints(&mut self.equipped, value),
            "equipped_quantity" => return store_ints(&mut self.equipped_quantity, value),
            "carried" => return store_ints(&mut self.carried, value),
            "carried_quantity" => return store_ints(&mut self.carried_quantity, value),
            "spawn" => match parse_spawn(value) {
                Some(spawn) => self.spawn = Some(spawn),
                None => return false,
            },
            "actionbar" => match parse_ints(value) {
                Some(values) if values.len() <= HOTKEY_SLOTS => {
                    let mut hotkeys = [EMPTY_HOTKEY; HOTKEY_SLOTS];
                    hotkeys[..values.len()].copy_from_slice(&values);
                    self.actionbar = Some(hotkeys);
                }
                _ => return false,
            },
            "campaign" => self.campaign = Some(value.to_string()),
            _ => log::debug!("ignoring unknown save key {:?}", key),
        }
        true
    }

    /// Hand the record's fields to their owners. The spawn becomes a
    /// teleport request to the tile centre, replacing the map's own spawn.
    pub fn apply(self, session: &mut HeroSession<'_>) {
        let stats = &mut *session.stats;
        if let Some(name) = self.name {
            stats.name = name;
        }
        if let Some(base) = self.base {
            stats.base = base;
        }
        if let Some(look) = self.look {
            stats.look = look;
        }
        if let Some(xp) = self.xp {
            stats.xp = xp;
        }
        if let Some(build) = self.build {
            stats.set_build(build);
        }

        let inventory = &mut *session.inventory;
        if let Some(gold) = self.gold {
            inventory.set_gold(gold);
        }
        if let Some(items) = self.equipped {
            inventory.equipped_mut().set_items(&items);
        }
        if let Some(quantities) = self.equipped_quantity {
            inventory.equipped_mut().set_quantities(&quantities);
        }
        if let Some(items) = self.carried {
            inventory.carried_mut().set_items(&items);
        }
        if let Some(quantities) = self.carried_quantity {
            inventory.carried_mut().set_quantities(&quantities);
        }

        if let Some((map, tile)) = self.spawn {
            session
                .map
                .request_teleport(SpawnPoint::new(&map, tile_center(tile)));
            session.map.clear_events();
        }

        if let Some(hotkeys) = self.actionbar {
            session.hotkeys.set_hotkeys(hotkeys);
        }
        if let Some(campaign) = self.campaign {
            session.campaign.set_all(&campaign);
        }
    }
}

fn join(values: &[i32]) -> String {
    values
        .iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Comma-separated integers; empty pieces are skipped, anything else that
/// is not a number fails the whole list
fn parse_ints(value: &str) -> Option<Vec<i32>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| piece.parse().ok())
        .collect()
}

fn store_ints(field: &mut Option<Vec<i32>>, value: &str) -> bool {
    match parse_ints(value) {
        Some(values) => {
            *field = Some(values);
            true
        }
        None => false,
    }
}

fn parse_spawn(value: &str) -> Option<(String, IVec2)> {
    let mut parts = value.split(',').map(str::trim);
    let map = parts.next().filter(|map| !map.is_empty())?;
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    Some((map.to_string(), IVec2::new(x, y)))
}
