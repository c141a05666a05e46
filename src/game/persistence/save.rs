// Save slots on disk: save{slot}.txt under a save directory

use std::fs;
use std::path::{Path, PathBuf};

use super::{HeroSession, SaveRecord, MAX_SLOT, NO_SLOT};
use crate::core::math::FACE_CAMERA;

/// Save/load errors
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("invalid save slot {0}")]
    InvalidSlot(u32),

    #[error("Failed to access save file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// What `SaveSlots::save` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    /// Slot 0, nothing written
    Disabled,
    Written(PathBuf),
    /// The write failed and was logged; the game goes on
    Skipped,
}

/// What `SaveSlots::load` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Slot 0, nothing touched
    Disabled,
    /// No readable save file; the hero keeps its current values
    Missing,
    Loaded,
}

/// Numbered save files in one directory
#[derive(Debug, Clone)]
pub struct SaveSlots {
    dir: PathBuf,
}

impl SaveSlots {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn slot_path(&self, slot: u32) -> Result<PathBuf, SaveError> {
        if slot == NO_SLOT || slot > MAX_SLOT {
            return Err(SaveError::InvalidSlot(slot));
        }
        Ok(self.dir.join(format!("save{}.txt", slot)))
    }

    /// Write a record to a slot, creating the save directory if needed
    pub fn write(&self, slot: u32, record: &SaveRecord) -> Result<PathBuf, SaveError> {
        let path = self.slot_path(slot)?;
        fs::create_dir_all(&self.dir).map_err(|source| SaveError::Io {
            path: self.dir.display().to_string(),
            source,
        })?;
        fs::write(&path, record.to_text()).map_err(|source| SaveError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(path)
    }

    /// Read a slot. A missing file is `Ok(None)`.
    pub fn read(&self, slot: u32) -> Result<Option<SaveRecord>, SaveError> {
        let path = self.slot_path(slot)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(SaveRecord::parse(&text))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SaveError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    /// Save the session to a slot. Failures are logged, never fatal.
    pub fn save(&self, slot: u32, session: &HeroSession<'_>) -> SaveStatus {
        if slot == NO_SLOT {
            return SaveStatus::Disabled;
        }
        match self.write(slot, &SaveRecord::capture(session)) {
            Ok(path) => {
                log::info!("Saved game to {}", path.display());
                SaveStatus::Written(path)
            }
            Err(e) => {
                log::warn!("Save skipped: {}", e);
                SaveStatus::Skipped
            }
        }
    }

    /// Load a slot into the session, then rebuild derived stats from the
    /// equipped gear, refill hp/mp and face the camera.
    ///
    /// The rebuild also runs when the file is missing so a new hero starts
    /// on the same footing as a loaded one.
    pub fn load(&self, slot: u32, session: &mut HeroSession<'_>) -> LoadStatus {
        if slot == NO_SLOT {
            return LoadStatus::Disabled;
        }

        let status = match self.read(slot) {
            Ok(Some(record)) => {
                record.apply(session);
                log::info!("Loaded save slot {}", slot);
                LoadStatus::Loaded
            }
            Ok(None) => {
                log::info!("No save in slot {}, starting fresh", slot);
                LoadStatus::Missing
            }
            Err(e) => {
                log::warn!("Load skipped: {}", e);
                LoadStatus::Missing
            }
        };

        let stats = &mut *session.stats;
        stats.set_equipment(session.inventory.equipment_bonus());
        stats.recalc();
        stats.restore();
        stats.direction = FACE_CAMERA;

        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::actionbar::ActionBar;
    use crate::game::campaign::CampaignTracker;
    use crate::game::characters::{Build, StatBlock};
    use crate::game::inventory::{Inventory, SLOT_BODY, SLOT_MAIN};
    use crate::game::persistence::{CampaignPort, InventoryPort};
    use crate::game::world::testing::ScriptedMap;
    use crate::game::world::SpawnPoint;
    use crate::core::math::tile_center;
    use glam::IVec2;
    use tempfile::TempDir;

    struct Fixture {
        stats: StatBlock,
        inventory: Inventory,
        bar: ActionBar,
        campaign: CampaignTracker,
        map: ScriptedMap,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                stats: StatBlock::new(),
                inventory: Inventory::with_starter_catalog(),
                bar: ActionBar::new(),
                campaign: CampaignTracker::new(),
                map: ScriptedMap::default(),
            }
        }

        fn session(&mut self) -> HeroSession<'_> {
            HeroSession {
                stats: &mut self.stats,
                inventory: &mut self.inventory,
                hotkeys: &mut self.bar,
                campaign: &mut self.campaign,
                map: &mut self.map,
            }
        }
    }

    fn veteran() -> Fixture {
        let mut fx = Fixture::new();
        fx.stats.name = "Aria".to_string();
        fx.stats.base = "female".to_string();
        fx.stats.look = "head_long".to_string();
        fx.stats.xp = 480;
        fx.stats.set_build(Build {
            physical: 3,
            mental: 2,
            offense: 4,
            defense: 1,
        });
        fx.inventory.gold = 125;
        fx.inventory.equipped_mut().set(SLOT_MAIN, 1, 1);
        fx.inventory.equipped_mut().set(SLOT_BODY, 3, 1);
        fx.inventory.carried_mut().set(5, 2, 1);
        fx.bar = ActionBar::with_starter_powers();
        fx.campaign.set("found_key");
        fx.map.respawn = SpawnPoint::new("goblin_warrens", tile_center(IVec2::new(12, 40)));
        fx
    }

    #[test]
    fn test_slot_paths() {
        let slots = SaveSlots::new("saves");
        assert_eq!(
            slots.slot_path(3).unwrap(),
            PathBuf::from("saves").join("save3.txt")
        );
        assert!(matches!(slots.slot_path(0), Err(SaveError::InvalidSlot(0))));
        assert!(matches!(slots.slot_path(5), Err(SaveError::InvalidSlot(5))));
    }

    #[test]
    fn test_save_then_load_restores_hero() {
        let dir = TempDir::new().unwrap();
        let slots = SaveSlots::new(dir.path().join("saves"));

        let mut old = veteran();
        let status = slots.save(2, &old.session());
        assert_eq!(
            status,
            SaveStatus::Written(dir.path().join("saves").join("save2.txt"))
        );

        let mut fresh = Fixture::new();
        assert_eq!(slots.load(2, &mut fresh.session()), LoadStatus::Loaded);

        assert_eq!(fresh.stats.name, "Aria");
        assert_eq!(fresh.stats.look, "head_long");
        assert_eq!(fresh.stats.xp, 480);
        assert_eq!(fresh.stats.build, old.stats.build);
        assert_eq!(fresh.inventory.gold, 125);
        assert_eq!(fresh.inventory.equipped().items(), &[1, 3, 0, 0]);
        assert_eq!(fresh.inventory.equipped().quantities(), &[1, 1, 0, 0]);
        assert_eq!(fresh.inventory.carried().item(5), 2);
        assert_eq!(fresh.inventory.carried().quantities()[5], 1);
        assert_eq!(fresh.bar, ActionBar::with_starter_powers());
        assert_eq!(fresh.campaign.get_all(), "found_key");
        assert_eq!(
            fresh.map.teleports,
            vec![SpawnPoint::new(
                "goblin_warrens",
                tile_center(IVec2::new(12, 40))
            )]
        );
    }

    #[test]
    fn test_load_refills_and_faces_camera() {
        let dir = TempDir::new().unwrap();
        let slots = SaveSlots::new(dir.path());

        let mut old = veteran();
        slots.save(1, &old.session());

        let mut fresh = Fixture::new();
        fresh.stats.hp = 1;
        fresh.stats.mp = 0;
        fresh.stats.direction = 2;
        slots.load(1, &mut fresh.session());

        assert_eq!(fresh.stats.hp, fresh.stats.maxhp);
        assert_eq!(fresh.stats.mp, fresh.stats.maxmp);
        assert_eq!(fresh.stats.direction, FACE_CAMERA);
        // Equipped dagger and leather armor feed the derived stats
        assert!(fresh.stats.wielding_physical);
        assert_eq!(fresh.stats.equipment().absorb_max, 2);
    }

    #[test]
    fn test_load_teleports_to_saved_tile_centre() {
        let dir = TempDir::new().unwrap();
        let slots = SaveSlots::new(dir.path());

        let mut old = veteran();
        // Respawn point off the tile centre still saves the tile
        old.map.respawn.pos += IVec2::new(5, -7);
        slots.save(1, &old.session());

        let mut fresh = Fixture::new();
        slots.load(1, &mut fresh.session());

        assert_eq!(
            fresh.map.teleports,
            vec![SpawnPoint::new(
                "goblin_warrens",
                tile_center(IVec2::new(12, 40))
            )]
        );
        assert!(fresh.map.events_cleared);
    }

    #[test]
    fn test_slot_zero_is_disabled() {
        let dir = TempDir::new().unwrap();
        let slots = SaveSlots::new(dir.path());

        let mut fx = veteran();
        assert_eq!(slots.save(0, &fx.session()), SaveStatus::Disabled);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);

        fx.stats.hp = 3;
        assert_eq!(slots.load(0, &mut fx.session()), LoadStatus::Disabled);
        assert_eq!(fx.stats.hp, 3);
    }

    #[test]
    fn test_missing_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let slots = SaveSlots::new(dir.path());

        let mut fx = Fixture::new();
        fx.stats.hp = 2;
        assert_eq!(slots.load(4, &mut fx.session()), LoadStatus::Missing);
        assert_eq!(fx.stats.hp, fx.stats.maxhp);
        assert_eq!(fx.stats.xp, 0);
        assert!(fx.map.teleports.is_empty());
        assert!(!fx.map.events_cleared);
    }

    #[test]
    fn test_hand_edited_file_loads_known_keys() {
        let dir = TempDir::new().unwrap();
        let slots = SaveSlots::new(dir.path());
        fs::write(
            dir.path().join("save1.txt"),
            "# edited\ngold=oops\nfavourite_colour=blue\n\nxp=250\nname=Edit\n",
        )
        .unwrap();

        let mut fx = Fixture::new();
        fx.inventory.gold = 40;
        assert_eq!(slots.load(1, &mut fx.session()), LoadStatus::Loaded);
        assert_eq!(fx.stats.xp, 250);
        assert_eq!(fx.stats.name, "Edit");
        assert_eq!(fx.inventory.gold, 40);
        assert!(fx.map.teleports.is_empty());
    }

    #[test]
    fn test_unwritable_dir_skips_save() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, "file in the way").unwrap();

        let slots = SaveSlots::new(&blocker);
        let mut fx = veteran();
        assert_eq!(slots.save(1, &fx.session()), SaveStatus::Skipped);
    }

    #[test]
    fn test_level_is_not_saved() {
        let dir = TempDir::new().unwrap();
        let slots = SaveSlots::new(dir.path());

        let mut old = veteran();
        old.stats.level = 4;
        slots.save(1, &old.session());

        let text = fs::read_to_string(dir.path().join("save1.txt")).unwrap();
        assert!(!text.contains("level="));
        assert!(text.contains("xp=480\n"));
    }
}
