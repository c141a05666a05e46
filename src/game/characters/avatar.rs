// The player avatar
//
// Ties the stat block, the state machine and the animation player together
// and runs them once per logic frame. Frame order is fixed:
// status tick -> stun gate -> level-up -> bleed spark -> death check ->
// animation advance -> per-state branch -> camera and map events.

use glam::IVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::animation::AnimationPlayer;
use super::appearance::{AvatarGraphics, Renderable};
use super::state::{AvatarState, AvatarStateMachine};
use super::stats::StatBlock;
use crate::core::math::{direction_from_keys, face, step_delta, to_tile};
use crate::engine::input::{Action, InputState};
use crate::game::combat::{check_requirements, DamageResolver, Hazard, HitOutcome};
use crate::game::cues::{CueSink, SoundEffect, STEP_SOUNDS};
use crate::game::powers::{PowerId, PowerManager, PowerState, POWER_SPARK_BLOOD};
use crate::game::world::MapCollaborator;

/// How the hero is steered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementMode {
    /// Walk toward the pointer while the primary button is held
    Pointer,
    /// 8-way movement from the directional keys
    #[default]
    Keys,
}

/// The hero: stats, behavior state, animation and look
#[derive(Debug)]
pub struct Avatar<P: PowerManager, C: CueSink> {
    pub stats: StatBlock,
    state: AvatarStateMachine,
    animation: AnimationPlayer,
    graphics: AvatarGraphics,
    resolver: DamageResolver,
    /// Cosmetic rolls (footstep variation), kept apart from combat rolls
    rng: StdRng,
    powers: P,
    cues: C,
    movement: MovementMode,

    /// Power captured when a power state started
    current_power: Option<PowerId>,
    /// Target captured with `current_power`
    act_target: IVec2,
    /// Pointer walk started by holding the primary button
    drag_walking: bool,
    /// Latest player-facing message
    message: Option<String>,
}

impl<P: PowerManager, C: CueSink> Avatar<P, C> {
    pub fn new(powers: P, cues: C, movement: MovementMode) -> Self {
        Self::with_rngs(
            powers,
            cues,
            movement,
            DamageResolver::from_entropy(),
            StdRng::from_entropy(),
        )
    }

    /// An avatar whose combat and cosmetic rolls are reproducible
    pub fn seeded(powers: P, cues: C, movement: MovementMode, seed: u64) -> Self {
        Self::with_rngs(
            powers,
            cues,
            movement,
            DamageResolver::seeded(seed),
            StdRng::seed_from_u64(seed.wrapping_add(1)),
        )
    }

    fn with_rngs(
        powers: P,
        cues: C,
        movement: MovementMode,
        resolver: DamageResolver,
        rng: StdRng,
    ) -> Self {
        Self {
            stats: StatBlock::new(),
            state: AvatarStateMachine::new(),
            animation: AnimationPlayer::with_hero_animations(),
            graphics: AvatarGraphics::new(),
            resolver,
            rng,
            powers,
            cues,
            movement,
            current_power: None,
            act_target: IVec2::ZERO,
            drag_walking: false,
            message: None,
        }
    }

    /// Place the hero, e.g. at the map spawn or after a teleport
    pub fn spawn(&mut self, pos: IVec2, direction: u8) {
        self.stats.pos = pos;
        self.stats.direction = direction;
    }

    pub fn state(&self) -> AvatarState {
        self.state.state()
    }

    pub fn animation(&self) -> &AnimationPlayer {
        &self.animation
    }

    pub fn graphics(&self) -> &AvatarGraphics {
        &self.graphics
    }

    pub fn powers(&self) -> &P {
        &self.powers
    }

    pub fn powers_mut(&mut self) -> &mut P {
        &mut self.powers
    }

    pub fn cues(&self) -> &C {
        &self.cues
    }

    pub fn movement(&self) -> MovementMode {
        self.movement
    }

    pub fn set_movement(&mut self, movement: MovementMode) {
        self.movement = movement;
    }

    pub fn current_power(&self) -> Option<PowerId> {
        self.current_power
    }

    pub fn act_target(&self) -> IVec2 {
        self.act_target
    }

    pub fn drag_walking(&self) -> bool {
        self.drag_walking
    }

    /// Hand the latest message to the UI, once
    pub fn take_message(&mut self) -> Option<String> {
        self.message.take()
    }

    /// Rebuild the hero composite if the equipped look changed
    pub fn load_graphics(&mut self, main: &str, armor: &str, off: &str) -> bool {
        self.graphics
            .load(&self.stats.base, &self.stats.look, main, armor, off)
    }

    pub fn render(&self) -> Renderable {
        Renderable {
            animation: self.animation.current_animation().to_string(),
            tick: self.animation.cur_tick(),
            frame: self.animation.current_frame(),
            direction: self.stats.direction,
            map_pos: self.stats.pos,
        }
    }

    fn enter(&mut self, new_state: AvatarState) {
        if self.state.state() == AvatarState::Block && new_state != AvatarState::Block {
            self.stats.blocking = false;
        }
        self.state.transition(new_state);
    }

    /// Run one logic frame.
    ///
    /// `actionbar_power` is the power selected this frame, if any. With
    /// pointer movement, `restrict_power_use` means the primary button is
    /// aimed at open ground and should walk rather than attack.
    pub fn logic(
        &mut self,
        input: &mut InputState,
        map: &mut dyn MapCollaborator,
        actionbar_power: Option<PowerId>,
        restrict_power_use: bool,
    ) {
        self.stats.logic();
        if self.stats.stun_duration > 0 {
            return;
        }

        if self.stats.check_level_up() {
            log::info!("{} reached level {}", self.stats.name, self.stats.level);
            self.message = Some(format!(
                "Congratulations, you have reached level {}! You may increase one attribute through the Character Menu.",
                self.stats.level
            ));
            self.cues.play(SoundEffect::LevelUp);
        }

        if self.stats.bleed_tick() {
            let pos = self.stats.pos;
            self.powers.activate(POWER_SPARK_BLOOD, &mut self.stats, pos);
        }

        // bled out
        if self.stats.hp == 0 && !self.state.is_dead() {
            self.stats.alive = false;
            self.stats.death_penalty = true;
            self.enter(AvatarState::Dead);
        }

        if !input.pressing(Action::Main1) {
            self.drag_walking = false;
        }

        self.animation.advance();

        let state = self.state.state();
        self.animation.set_animation(state.animation_name());

        match state {
            AvatarState::Stance => self.stance(input, map, actionbar_power, restrict_power_use),
            AvatarState::Run => self.run(input, map, actionbar_power, restrict_power_use),
            AvatarState::Melee | AvatarState::Cast | AvatarState::Shoot => self.perform(state),
            AvatarState::Block => self.hold_block(actionbar_power),
            AvatarState::Hit => {
                if self.animation.times_played() >= 1 {
                    self.enter(AvatarState::Stance);
                }
            }
            AvatarState::Dead => self.dead(input, map),
        }

        map.set_camera(self.stats.pos, to_tile(self.stats.pos));
        map.check_events(self.stats.pos);
    }

    fn stance(
        &mut self,
        input: &mut InputState,
        map: &mut dyn MapCollaborator,
        actionbar_power: Option<PowerId>,
        restrict_power_use: bool,
    ) {
        let (allowed_to_move, allowed_to_use_power) = match self.movement {
            MovementMode::Pointer => {
                let allowed = restrict_power_use
                    && (!input.is_locked(Action::Main1) || self.drag_walking);
                (allowed, !allowed)
            }
            MovementMode::Keys => (true, true),
        };

        if allowed_to_move {
            self.set_direction(input, map);
        }

        if allowed_to_move && self.pressing_move(input) {
            if self.movement == MovementMode::Pointer && input.pressing(Action::Main1) {
                input.lock(Action::Main1);
                self.drag_walking = true;
            }

            if self.move_hero(map) {
                self.enter(AvatarState::Run);
            }
        }

        if allowed_to_use_power {
            self.try_start_power(input, map, actionbar_power);
        }
    }

    fn run(
        &mut self,
        input: &mut InputState,
        map: &mut dyn MapCollaborator,
        actionbar_power: Option<PowerId>,
        restrict_power_use: bool,
    ) {
        let step = self.rng.gen_range(0..STEP_SOUNDS);
        let tick = self.animation.cur_tick();
        if tick == 1 || tick == self.animation.max_tick() / 2 {
            self.cues.play(SoundEffect::Step(step));
        }

        let allowed_to_use_power = match self.movement {
            MovementMode::Pointer => !(restrict_power_use && !input.is_locked(Action::Main1)),
            MovementMode::Keys => true,
        };

        self.set_direction(input, map);

        if !self.pressing_move(input) || !self.move_hero(map) {
            self.enter(AvatarState::Stance);
            return;
        }

        if allowed_to_use_power {
            self.try_start_power(input, map, actionbar_power);
        }
    }

    /// Melee, cast and shoot: fire the captured power at the midpoint, then
    /// return to stance with a cooldown
    fn perform(&mut self, state: AvatarState) {
        let tick = self.animation.cur_tick();

        if state == AvatarState::Melee && tick == 1 {
            self.cues.play(SoundEffect::Melee);
        }

        if tick == self.animation.max_tick() / 2 {
            if let Some(power) = self.current_power {
                self.powers.activate(power, &mut self.stats, self.act_target);
            }
        }

        if self.animation.times_played() >= 1 {
            self.enter(AvatarState::Stance);
            if self.stats.haste_duration == 0 {
                self.stats.cooldown_ticks += self.stats.cooldown;
            }
        }
    }

    fn hold_block(&mut self, actionbar_power: Option<PowerId>) {
        let still_blocking = actionbar_power
            .and_then(|id| self.powers.power(id))
            .is_some_and(|power| power.new_state == PowerState::Block);

        if !still_blocking {
            self.enter(AvatarState::Stance);
        }
    }

    fn dead(&mut self, input: &InputState, map: &mut dyn MapCollaborator) {
        if self.animation.cur_tick() == 1 && self.animation.times_played() < 1 {
            self.cues.play(SoundEffect::Die);
            log::info!("{} was defeated", self.stats.name);
            self.message = Some(
                "You are defeated.  You lose half your gold.  Press Enter to continue.".to_string(),
            );
        }

        if self.animation.times_played() >= 1 {
            self.stats.corpse = true;
        }

        if input.pressing(Action::Accept) {
            self.stats.restore();
            self.stats.alive = true;
            self.stats.corpse = false;
            self.stats.clear_effects();
            self.enter(AvatarState::Stance);

            let respawn = map.respawn_point();
            log::info!("respawning at {} {}", respawn.map, respawn.pos);
            map.request_teleport(respawn);
        }
    }

    /// Start the selected power if it is ready and every requirement holds.
    /// A failed requirement silently ends the attempt.
    fn try_start_power(
        &mut self,
        input: &InputState,
        map: &dyn MapCollaborator,
        actionbar_power: Option<PowerId>,
    ) {
        let Some(id) = actionbar_power else {
            return;
        };
        if self.stats.cooldown_ticks > 0 {
            return;
        }
        let Some(power) = self.powers.power(id) else {
            return;
        };

        let aim = input.pointer() + IVec2::new(0, power.aim_assist);
        let target = map.screen_to_map(aim, self.stats.pos);

        if let Err(gate) = check_requirements(power, &self.stats, map, target) {
            log::trace!("power {} not started: {}", id, gate);
            return;
        }

        let faces_target = power.face;
        let new_state = AvatarState::for_power(power.new_state);

        self.current_power = Some(id);
        self.act_target = target;

        if faces_target {
            if let Some(direction) = face(self.stats.pos, target) {
                self.stats.direction = direction;
            }
        }

        if new_state == AvatarState::Block {
            self.stats.blocking = true;
        }
        self.enter(new_state);
    }

    fn pressing_move(&self, input: &InputState) -> bool {
        match self.movement {
            MovementMode::Pointer => input.pressing(Action::Main1),
            MovementMode::Keys => input.pressing_direction(),
        }
    }

    fn set_direction(&mut self, input: &InputState, map: &dyn MapCollaborator) {
        let direction = match self.movement {
            MovementMode::Pointer => {
                let target = map.screen_to_map(input.pointer(), self.stats.pos);
                face(self.stats.pos, target)
            }
            MovementMode::Keys => direction_from_keys(
                input.pressing(Action::Up),
                input.pressing(Action::Down),
                input.pressing(Action::Left),
                input.pressing(Action::Right),
            ),
        };

        if let Some(direction) = direction {
            self.stats.direction = direction;
        }
    }

    /// Step once in the facing direction. Returns false when blocked.
    fn move_hero(&mut self, map: &dyn MapCollaborator) -> bool {
        if self.stats.immobilize_duration > 0 {
            return false;
        }

        let (mut speed, mut dspeed) = (self.stats.speed, self.stats.dspeed);
        if self.stats.slow_duration > 0 {
            speed /= 2;
            dspeed /= 2;
        }

        let delta = step_delta(self.stats.direction, speed, dspeed);
        map.move_entity(&mut self.stats.pos, delta)
    }

    /// Resolve an incoming hazard. Returns false on a miss.
    pub fn take_hit(&mut self, hazard: Hazard<'_>) -> bool {
        if self.state.is_dead() {
            return false;
        }

        let outcome =
            self.resolver
                .resolve(hazard, &mut self.stats, &mut self.powers, &mut self.cues);

        match outcome {
            HitOutcome::Miss => return false,
            // shield stutter
            HitOutcome::Blocked => self.animation.reset(),
            HitOutcome::Killed { .. } => self.enter(AvatarState::Dead),
            HitOutcome::Landed { .. } => {
                if outcome.interrupts(self.stats.hp) {
                    self.cues.play(SoundEffect::Hit);
                    self.enter(AvatarState::Hit);
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::cues::RecordedCues;
    use crate::game::powers::PowerLibrary;
    use crate::game::world::testing::ScriptedMap;
    use crate::game::world::SpawnPoint;

    const SWING: PowerId = 1;
    const SHOOT: PowerId = 2;
    const SHOCK: PowerId = 3;
    const SHIELD: PowerId = 5;

    struct Rig {
        avatar: Avatar<PowerLibrary, RecordedCues>,
        input: InputState,
        map: ScriptedMap,
    }

    impl Rig {
        fn new(movement: MovementMode) -> Self {
            let mut avatar = Avatar::seeded(
                PowerLibrary::with_starter_powers(),
                RecordedCues::new(),
                movement,
                11,
            );
            avatar.spawn(IVec2::new(320, 320), 6);
            Self {
                avatar,
                input: InputState::new(),
                map: ScriptedMap::default(),
            }
        }

        fn frame(&mut self, power: Option<PowerId>) {
            self.frame_restricted(power, false);
        }

        fn frame_restricted(&mut self, power: Option<PowerId>, restrict: bool) {
            self.avatar
                .logic(&mut self.input, &mut self.map, power, restrict);
            self.input.update();
        }

        fn state(&self) -> AvatarState {
            self.avatar.state()
        }

        fn step_cues(&self) -> usize {
            self.avatar
                .cues()
                .played
                .iter()
                .filter(|s| matches!(s, SoundEffect::Step(_)))
                .count()
        }
    }

    #[test]
    fn test_idle_frame_updates_camera_and_events() {
        let mut rig = Rig::new(MovementMode::Keys);
        rig.frame(None);

        assert_eq!(rig.state(), AvatarState::Stance);
        assert_eq!(rig.map.cam, IVec2::new(320, 320));
        assert_eq!(rig.map.hero_tile, IVec2::new(10, 10));
        assert_eq!(rig.map.events_checked, 1);
        assert_eq!(rig.avatar.render().animation, "stance");
    }

    #[test]
    fn test_keys_start_running() {
        let mut rig = Rig::new(MovementMode::Keys);
        rig.input.press(Action::Right);
        rig.frame(None);

        assert_eq!(rig.state(), AvatarState::Run);
        assert_eq!(rig.avatar.stats.direction, 4);
        assert_eq!(rig.avatar.stats.pos, IVec2::new(330, 310));
    }

    #[test]
    fn test_single_axis_direction_uses_full_speed() {
        let mut rig = Rig::new(MovementMode::Keys);
        rig.input.press(Action::Up);
        rig.input.press(Action::Left);
        rig.frame(None);

        assert_eq!(rig.avatar.stats.direction, 1);
        assert_eq!(rig.avatar.stats.pos, IVec2::new(306, 320));
    }

    #[test]
    fn test_release_returns_to_stance() {
        let mut rig = Rig::new(MovementMode::Keys);
        rig.input.press(Action::Right);
        rig.frame(None);
        rig.frame(None);
        assert_eq!(rig.state(), AvatarState::Run);

        rig.input.release(Action::Right);
        rig.frame(None);
        assert_eq!(rig.state(), AvatarState::Stance);
    }

    #[test]
    fn test_collision_stops_run() {
        let mut rig = Rig::new(MovementMode::Keys);
        rig.input.press(Action::Down);
        rig.frame(None);
        assert_eq!(rig.state(), AvatarState::Run);

        rig.map.walkable = false;
        rig.frame(None);
        assert_eq!(rig.state(), AvatarState::Stance);
    }

    #[test]
    fn test_running_hero_can_start_power() {
        let mut rig = Rig::new(MovementMode::Keys);
        rig.input.press(Action::Right);
        rig.frame(None);
        assert_eq!(rig.state(), AvatarState::Run);

        rig.frame(Some(SWING));
        assert_eq!(rig.state(), AvatarState::Melee);
        assert_eq!(rig.avatar.current_power(), Some(SWING));
    }

    #[test]
    fn test_restricted_pointer_run_keeps_walking() {
        let mut rig = Rig::new(MovementMode::Pointer);
        rig.avatar.enter(AvatarState::Run);
        rig.input.set_pointer(IVec2::new(100, 0));
        rig.input.press(Action::Main1);
        assert!(!rig.input.is_locked(Action::Main1));
        let mp = rig.avatar.stats.mp;

        rig.frame_restricted(Some(SHOCK), true);

        assert_eq!(rig.state(), AvatarState::Run);
        assert_ne!(rig.avatar.stats.pos, IVec2::new(320, 320));
        assert_eq!(rig.avatar.stats.mp, mp);
        assert_eq!(rig.avatar.current_power(), None);
        assert!(rig.avatar.powers().pending().is_empty());
    }

    #[test]
    fn test_collision_while_running_skips_power() {
        let mut rig = Rig::new(MovementMode::Keys);
        rig.input.press(Action::Right);
        rig.frame(None);
        assert_eq!(rig.state(), AvatarState::Run);

        rig.map.walkable = false;
        rig.frame(Some(SWING));
        assert_eq!(rig.state(), AvatarState::Stance);
        assert_eq!(rig.avatar.current_power(), None);
    }

    #[test]
    fn test_blocked_move_stays_in_stance() {
        let mut rig = Rig::new(MovementMode::Keys);
        rig.map.walkable = false;
        rig.input.press(Action::Down);
        rig.frame(None);
        assert_eq!(rig.state(), AvatarState::Stance);
        assert_eq!(rig.avatar.stats.direction, 6);
    }

    #[test]
    fn test_slow_halves_speed() {
        let mut rig = Rig::new(MovementMode::Keys);
        rig.avatar.stats.slow_duration = 10;
        rig.input.press(Action::Right);
        rig.frame(None);
        assert_eq!(rig.avatar.stats.pos, IVec2::new(325, 315));
    }

    #[test]
    fn test_immobilized_cannot_move() {
        let mut rig = Rig::new(MovementMode::Keys);
        rig.avatar.stats.immobilize_duration = 10;
        rig.input.press(Action::Right);
        rig.frame(None);
        assert_eq!(rig.state(), AvatarState::Stance);
        assert_eq!(rig.avatar.stats.pos, IVec2::new(320, 320));
        assert_eq!(rig.map.moves.get(), 0);
    }

    #[test]
    fn test_footsteps_at_run_checkpoints() {
        let mut rig = Rig::new(MovementMode::Keys);
        rig.input.press(Action::Right);
        rig.frame(None);
        for _ in 0..10 {
            rig.frame(None);
        }
        // run clip is 16 ticks: steps on ticks 1 and 8
        assert_eq!(rig.step_cues(), 2);
    }

    #[test]
    fn test_stun_skips_frame() {
        let mut rig = Rig::new(MovementMode::Keys);
        rig.avatar.stats.stun_duration = 3;
        rig.avatar.stats.xp = 100;
        rig.input.press(Action::Right);

        rig.frame(None);
        rig.frame(None);
        assert_eq!(rig.state(), AvatarState::Stance);
        assert_eq!(rig.avatar.stats.pos, IVec2::new(320, 320));
        assert_eq!(rig.avatar.stats.level, 1);
        assert_eq!(rig.map.events_checked, 0);

        rig.frame(None);
        assert_eq!(rig.state(), AvatarState::Run);
        assert_eq!(rig.avatar.stats.level, 2);
    }

    #[test]
    fn test_one_level_per_frame() {
        let mut rig = Rig::new(MovementMode::Keys);
        rig.avatar.stats.xp = 1000;

        rig.frame(None);
        assert_eq!(rig.avatar.stats.level, 2);
        assert!(rig
            .avatar
            .take_message()
            .is_some_and(|m| m.contains("level 2")));
        assert!(rig.avatar.take_message().is_none());

        for _ in 0..10 {
            rig.frame(None);
        }
        assert_eq!(rig.avatar.stats.level, 6);
        assert_eq!(rig.avatar.cues().count(SoundEffect::LevelUp), 5);
        assert_eq!(rig.avatar.stats.maxhp, 12 + 3 * 5);
    }

    #[test]
    fn test_los_gate_failure_keeps_stance_and_mana() {
        let mut rig = Rig::new(MovementMode::Keys);
        rig.map.los = false;
        rig.input.set_pointer(IVec2::new(64, 0));
        let mp = rig.avatar.stats.mp;

        rig.frame(Some(SHOCK));

        assert_eq!(rig.state(), AvatarState::Stance);
        assert_eq!(rig.avatar.stats.mp, mp);
        assert_eq!(rig.avatar.current_power(), None);
        assert_eq!(*rig.map.queries.borrow(), vec!["los"]);
        assert!(rig.avatar.powers().pending().is_empty());
    }

    #[test]
    fn test_mana_gate_failure() {
        let mut rig = Rig::new(MovementMode::Keys);
        rig.avatar.stats.mp = 0;
        rig.frame(Some(SHOCK));
        assert_eq!(rig.state(), AvatarState::Stance);
        assert!(rig.map.queries.borrow().is_empty());
    }

    #[test]
    fn test_melee_fires_once_at_midpoint() {
        let mut rig = Rig::new(MovementMode::Keys);
        rig.input.set_pointer(IVec2::new(32, 0));
        rig.frame(Some(SWING));
        assert_eq!(rig.state(), AvatarState::Melee);
        assert_eq!(rig.avatar.current_power(), Some(SWING));
        assert_eq!(rig.avatar.act_target(), IVec2::new(352, 320));
        assert_eq!(rig.avatar.stats.direction, 5);

        let mut frames = 0;
        while rig.state() == AvatarState::Melee {
            rig.frame(None);
            frames += 1;
            assert!(frames < 30, "melee never finished");
        }

        // 12-tick clip plus the frame that notices completion
        assert_eq!(frames, 13);
        assert_eq!(rig.state(), AvatarState::Stance);
        let fired = rig.avatar.powers_mut().drain_activations();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].power, SWING);
        assert_eq!(fired[0].target, IVec2::new(352, 320));
        assert_eq!(rig.avatar.cues().count(SoundEffect::Melee), 1);
        assert_eq!(rig.avatar.stats.cooldown_ticks, 4);
    }

    #[test]
    fn test_cooldown_delays_next_power() {
        let mut rig = Rig::new(MovementMode::Keys);
        rig.avatar.stats.cooldown_ticks = 2;
        rig.frame(Some(SWING));
        assert_eq!(rig.state(), AvatarState::Stance);
        rig.frame(Some(SWING));
        assert_eq!(rig.state(), AvatarState::Melee);
    }

    #[test]
    fn test_haste_skips_cooldown() {
        let mut rig = Rig::new(MovementMode::Keys);
        rig.avatar.stats.haste_duration = 100;
        rig.frame(Some(SWING));
        while rig.state() == AvatarState::Melee {
            rig.frame(None);
        }
        assert_eq!(rig.avatar.stats.cooldown_ticks, 0);
    }

    #[test]
    fn test_aim_assist_shifts_target() {
        let mut rig = Rig::new(MovementMode::Keys);
        rig.input.set_pointer(IVec2::ZERO);
        rig.frame(Some(SHOOT));

        assert_eq!(rig.state(), AvatarState::Shoot);
        assert_eq!(rig.avatar.act_target(), IVec2::new(320, 352));
        assert_eq!(rig.avatar.stats.direction, 7);
    }

    #[test]
    fn test_block_holds_while_selected() {
        let mut rig = Rig::new(MovementMode::Keys);
        rig.avatar.stats.direction = 2;
        rig.frame(Some(SHIELD));
        assert_eq!(rig.state(), AvatarState::Block);
        assert!(rig.avatar.stats.blocking);
        assert_eq!(rig.avatar.stats.direction, 2);

        rig.frame(Some(SHIELD));
        assert_eq!(rig.state(), AvatarState::Block);

        rig.frame(None);
        assert_eq!(rig.state(), AvatarState::Stance);
        assert!(!rig.avatar.stats.blocking);
    }

    #[test]
    fn test_block_exits_when_other_power_selected() {
        let mut rig = Rig::new(MovementMode::Keys);
        rig.frame(Some(SHIELD));
        rig.frame(Some(SWING));
        assert_eq!(rig.state(), AvatarState::Stance);
        assert!(!rig.avatar.stats.blocking);
    }

    #[test]
    fn test_hit_reaction_cannot_be_cancelled() {
        let mut rig = Rig::new(MovementMode::Keys);
        assert!(rig.avatar.take_hit(Hazard::new(3, 3, 10_000)));
        assert_eq!(rig.state(), AvatarState::Hit);
        assert_eq!(rig.avatar.stats.hp, 9);
        assert!(rig.avatar.cues().contains(SoundEffect::Hit));

        rig.input.press(Action::Right);
        let mut frames = 0;
        while rig.state() == AvatarState::Hit {
            assert_eq!(rig.avatar.stats.pos, IVec2::new(320, 320));
            rig.frame(Some(SWING));
            frames += 1;
            assert!(frames < 20, "hit never finished");
        }
        assert_eq!(frames, 7);
        assert_eq!(rig.state(), AvatarState::Stance);
    }

    #[test]
    fn test_miss_returns_false() {
        let mut rig = Rig::new(MovementMode::Keys);
        assert!(!rig.avatar.take_hit(Hazard::new(3, 3, -10_000)));
        assert_eq!(rig.state(), AvatarState::Stance);
    }

    #[test]
    fn test_blocked_hit_stutters_shield() {
        let mut rig = Rig::new(MovementMode::Keys);
        rig.frame(Some(SHIELD));
        rig.frame(Some(SHIELD));
        rig.frame(Some(SHIELD));
        assert!(rig.avatar.animation().cur_tick() > 0);

        rig.avatar.stats.absorb_min = 5;
        rig.avatar.stats.absorb_max = 5;
        assert!(rig.avatar.take_hit(Hazard::new(3, 3, 10_000)));
        assert_eq!(rig.state(), AvatarState::Block);
        assert_eq!(rig.avatar.animation().cur_tick(), 0);
        assert!(rig.avatar.cues().contains(SoundEffect::Block));
    }

    #[test]
    fn test_death_and_respawn() {
        let mut rig = Rig::new(MovementMode::Keys);
        assert!(rig.avatar.take_hit(Hazard::new(50, 50, 10_000)));
        assert_eq!(rig.state(), AvatarState::Dead);
        assert!(!rig.avatar.stats.alive);
        assert!(!rig.avatar.take_hit(Hazard::new(1, 1, 10_000)));

        rig.avatar.stats.slow_duration = 100;
        rig.avatar.stats.mp = 3;
        for _ in 0..25 {
            rig.frame(None);
        }
        assert_eq!(rig.state(), AvatarState::Dead);
        assert!(rig.avatar.stats.corpse);
        assert_eq!(rig.avatar.cues().count(SoundEffect::Die), 1);
        assert!(rig
            .avatar
            .take_message()
            .is_some_and(|m| m.contains("defeated")));

        assert!(rig.avatar.stats.take_death_penalty());
        assert!(!rig.avatar.stats.take_death_penalty());

        rig.input.press(Action::Accept);
        rig.frame(None);

        let stats = &rig.avatar.stats;
        assert_eq!(rig.state(), AvatarState::Stance);
        assert_eq!(stats.hp, stats.maxhp);
        assert_eq!(stats.mp, stats.maxmp);
        assert_eq!(stats.slow_duration, 0);
        assert!(stats.alive);
        assert!(!stats.corpse);
        assert_eq!(
            rig.map.teleports,
            vec![SpawnPoint::new("town", IVec2::new(320, 480))]
        );
    }

    #[test]
    fn test_bleeding_out() {
        let mut rig = Rig::new(MovementMode::Keys);
        rig.avatar.stats.hp = 1;
        rig.avatar.stats.bleed_duration = 32;

        rig.frame(None);

        assert_eq!(rig.avatar.stats.hp, 0);
        assert_eq!(rig.state(), AvatarState::Dead);
        assert!(rig.avatar.stats.death_penalty);
        let sparks = rig.avatar.powers_mut().drain_activations();
        assert_eq!(sparks.len(), 1);
        assert_eq!(sparks[0].power, POWER_SPARK_BLOOD);
    }

    #[test]
    fn test_pointer_drag_walk() {
        let mut rig = Rig::new(MovementMode::Pointer);
        rig.input.set_pointer(IVec2::new(10, 0));
        rig.input.press(Action::Main1);

        rig.frame_restricted(None, true);
        assert_eq!(rig.state(), AvatarState::Run);
        assert_eq!(rig.avatar.stats.direction, 5);
        assert_eq!(rig.avatar.stats.pos, IVec2::new(334, 320));
        assert!(rig.input.is_locked(Action::Main1));
        assert!(rig.avatar.drag_walking());

        rig.input.release(Action::Main1);
        rig.frame_restricted(None, true);
        assert_eq!(rig.state(), AvatarState::Stance);
        assert!(!rig.avatar.drag_walking());
    }

    #[test]
    fn test_pointer_click_on_target_uses_power() {
        let mut rig = Rig::new(MovementMode::Pointer);
        rig.input.set_pointer(IVec2::new(0, 40));
        rig.input.press(Action::Main1);

        rig.frame_restricted(Some(SWING), false);
        assert_eq!(rig.state(), AvatarState::Melee);
        assert_eq!(rig.avatar.stats.pos, IVec2::new(320, 320));
    }

    #[test]
    fn test_graphics_memoized() {
        let mut rig = Rig::new(MovementMode::Keys);
        assert!(rig.avatar.load_graphics("dagger", "", ""));
        assert!(!rig.avatar.load_graphics("dagger", "clothes", ""));
        assert_eq!(rig.avatar.graphics().rebuilds(), 1);
    }

    #[test]
    fn test_render_reports_position_and_facing() {
        let mut rig = Rig::new(MovementMode::Keys);
        rig.input.press(Action::Right);
        rig.frame(None);
        rig.frame(None);

        let render = rig.avatar.render();
        assert_eq!(render.animation, "run");
        assert_eq!(render.direction, 4);
        assert_eq!(render.map_pos, rig.avatar.stats.pos);
    }
}
