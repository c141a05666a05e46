// One play session: the hero plus everything it is saved with
//
// Owns the collaborators the avatar core only borrows (map, input, action
// bar, inventory, campaign) and acts on the requests it leaves behind:
// teleports, death penalties, messages and fired powers.

use std::time::Duration;

use crate::core::math::FACE_CAMERA;
use crate::engine::game_loop::FrameClock;
use crate::engine::input::InputManager;
use crate::engine::settings::GameSettings;
use crate::game::actionbar::ActionBar;
use crate::game::campaign::CampaignTracker;
use crate::game::characters::{Avatar, Renderable};
use crate::game::cues::CueSink;
use crate::game::inventory::Inventory;
use crate::game::persistence::{HeroSession, InventoryPort, LoadStatus, SaveSlots, SaveStatus};
use crate::game::powers::PowerLibrary;
use crate::game::world::{MapCollaborator, TileMap};

/// Name of the starting map
pub const START_MAP: &str = "hero_camp";

pub struct HeroGame<C: CueSink> {
    settings: GameSettings,
    avatar: Avatar<PowerLibrary, C>,
    inventory: Inventory,
    actionbar: ActionBar,
    campaign: CampaignTracker,
    map: TileMap,
    saves: SaveSlots,
    input: InputManager,
    clock: FrameClock,
}

impl<C: CueSink> HeroGame<C> {
    /// Build the session and load the configured save slot
    pub fn new(settings: GameSettings, cues: C) -> Self {
        let powers = PowerLibrary::with_starter_powers();
        let avatar = match settings.seed {
            Some(seed) => Avatar::seeded(powers, cues, settings.movement, seed),
            None => Avatar::new(powers, cues, settings.movement),
        };

        let mut game = Self {
            saves: SaveSlots::new(&settings.save_dir),
            settings,
            avatar,
            inventory: Inventory::with_starter_catalog(),
            actionbar: ActionBar::with_starter_powers(),
            campaign: CampaignTracker::new(),
            map: TileMap::new(START_MAP, 32, 32),
            input: InputManager::new(),
            clock: FrameClock::new(),
        };

        let spawn = game.map.respawn_point();
        game.avatar.spawn(spawn.pos, FACE_CAMERA);
        game.load();
        game
    }

    fn session(&mut self) -> HeroSession<'_> {
        HeroSession {
            stats: &mut self.avatar.stats,
            inventory: &mut self.inventory,
            hotkeys: &mut self.actionbar,
            campaign: &mut self.campaign,
            map: &mut self.map,
        }
    }

    /// Load the configured slot and move the hero to its saved spawn
    pub fn load(&mut self) -> LoadStatus {
        let slot = self.settings.slot;
        let saves = self.saves.clone();
        let status = saves.load(slot, &mut self.session());
        self.follow_teleport();
        self.refresh_equipment();
        status
    }

    pub fn save(&mut self) -> SaveStatus {
        let slot = self.settings.slot;
        let saves = self.saves.clone();
        saves.save(slot, &self.session())
    }

    /// Push the equipped gear into the stats and the hero composite
    pub fn refresh_equipment(&mut self) {
        self.avatar
            .stats
            .set_equipment(self.inventory.equipment_bonus());
        self.avatar.stats.recalc();
        let (main, armor, off) = self.inventory.equipped_graphics();
        self.avatar.load_graphics(main, armor, off);
    }

    /// Run the logic frames due since the previous render frame
    pub fn tick(&mut self) -> u32 {
        let frames = self.clock.begin_frame();
        self.run_frames(frames)
    }

    /// Account for `elapsed` of wall clock and run the logic frames that are due
    pub fn update(&mut self, elapsed: Duration) -> u32 {
        let frames = self.clock.advance(elapsed);
        self.run_frames(frames)
    }

    fn run_frames(&mut self, frames: u32) -> u32 {
        for _ in 0..frames {
            self.logic_frame();
        }
        frames
    }

    /// Run exactly one logic frame
    pub fn logic_frame(&mut self) {
        let power = self.actionbar.selected_power(self.input.state());
        self.avatar.logic(
            self.input.state_mut(),
            &mut self.map,
            power,
            self.settings.restrict_power_use,
        );

        if self.avatar.stats.take_death_penalty() {
            self.inventory.apply_death_penalty();
        }
        if let Some(message) = self.avatar.take_message() {
            log::info!("{}", message);
        }
        for fired in self.avatar.powers_mut().drain_activations() {
            log::debug!(
                "power {} fired from {} toward {}",
                fired.power,
                fired.origin,
                fired.target
            );
        }
        self.follow_teleport();

        self.input.update();
    }

    fn follow_teleport(&mut self) {
        let Some(destination) = self.map.take_teleport() else {
            return;
        };
        if destination.map != self.map.name() {
            log::info!("entering {}", destination.map);
            self.map = TileMap::new(&destination.map, 32, 32);
        }
        let direction = self.avatar.stats.direction;
        self.avatar.spawn(destination.pos, direction);
    }

    pub fn avatar(&self) -> &Avatar<PowerLibrary, C> {
        &self.avatar
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn campaign_mut(&mut self) -> &mut CampaignTracker {
        &mut self.campaign
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn input_mut(&mut self) -> &mut InputManager {
        &mut self.input
    }

    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }

    pub fn render(&self) -> Renderable {
        self.avatar.render()
    }
}
