// Character animation system
//
// Clips are measured in logic ticks: each sprite frame is shown for
// `ticks_per_frame` ticks. The state machine keys gameplay events (power
// activation, footsteps, sounds) off the current tick, so a given tick is
// visited exactly once per play-through.

use std::collections::HashMap;

/// How a clip behaves when it reaches its end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    /// Wrap back to the first tick
    Looped,
    /// Hold the last tick
    PlayOnce,
}

/// A single animation clip
#[derive(Debug, Clone)]
pub struct AnimationClip {
    /// Name of the animation (e.g., "stance", "run", "melee")
    pub name: String,
    /// Row in the hero sprite sheet
    pub row: u32,
    /// Number of sprite frames
    pub frames: u32,
    /// Logic ticks each frame stays on screen
    pub ticks_per_frame: u32,
    pub playback: Playback,
}

impl AnimationClip {
    pub fn new(name: &str, row: u32, frames: u32, ticks_per_frame: u32, playback: Playback) -> Self {
        Self {
            name: name.to_string(),
            row,
            frames: frames.max(1),
            ticks_per_frame: ticks_per_frame.max(1),
            playback,
        }
    }

    pub fn looping(name: &str, row: u32, frames: u32, ticks_per_frame: u32) -> Self {
        Self::new(name, row, frames, ticks_per_frame, Playback::Looped)
    }

    pub fn one_shot(name: &str, row: u32, frames: u32, ticks_per_frame: u32) -> Self {
        Self::new(name, row, frames, ticks_per_frame, Playback::PlayOnce)
    }

    /// Total ticks in one play-through
    pub fn max_tick(&self) -> u32 {
        self.frames * self.ticks_per_frame
    }
}

/// Manages animation playback for the avatar
#[derive(Debug)]
pub struct AnimationPlayer {
    animations: HashMap<String, AnimationClip>,
    current_animation: String,
    cur_tick: u32,
    times_played: u32,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self {
            animations: HashMap::new(),
            current_animation: String::new(),
            cur_tick: 0,
            times_played: 0,
        }
    }

    /// Animation set of the hero sprite sheet
    pub fn with_hero_animations() -> Self {
        let mut player = Self::new();

        player.add_animation(AnimationClip::looping("stance", 0, 4, 3));
        player.add_animation(AnimationClip::looping("run", 1, 8, 2));
        player.add_animation(AnimationClip::one_shot("melee", 2, 4, 3));
        player.add_animation(AnimationClip::one_shot("ment", 3, 4, 3));
        player.add_animation(AnimationClip::one_shot("ranged", 4, 4, 3));
        player.add_animation(AnimationClip::one_shot("block", 5, 2, 3));
        player.add_animation(AnimationClip::one_shot("hit", 6, 2, 3));
        player.add_animation(AnimationClip::one_shot("die", 7, 6, 3));

        player.set_animation("stance");
        player
    }

    pub fn add_animation(&mut self, clip: AnimationClip) {
        self.animations.insert(clip.name.clone(), clip);
    }

    /// Switch clips. Switching to the clip already playing keeps its progress.
    pub fn set_animation(&mut self, name: &str) {
        if self.current_animation != name {
            self.current_animation = name.to_string();
            self.reset();
        }
    }

    /// Rewind the current clip
    pub fn reset(&mut self) {
        self.cur_tick = 0;
        self.times_played = 0;
    }

    /// Advance one logic tick
    pub fn advance(&mut self) {
        let Some(clip) = self.animations.get(&self.current_animation) else {
            return;
        };
        let max_tick = clip.max_tick();

        match clip.playback {
            Playback::Looped => {
                self.cur_tick += 1;
                if self.cur_tick >= max_tick {
                    self.cur_tick = 0;
                    self.times_played += 1;
                }
            }
            Playback::PlayOnce => {
                if self.cur_tick + 1 < max_tick {
                    self.cur_tick += 1;
                } else {
                    self.times_played = 1;
                }
            }
        }
    }

    pub fn current_animation(&self) -> &str {
        &self.current_animation
    }

    pub fn cur_tick(&self) -> u32 {
        self.cur_tick
    }

    /// Tick count of one play-through of the current clip
    pub fn max_tick(&self) -> u32 {
        self.current_clip().map(AnimationClip::max_tick).unwrap_or(0)
    }

    /// Completed play-throughs since the clip started
    pub fn times_played(&self) -> u32 {
        self.times_played
    }

    /// Sprite frame shown on the current tick
    pub fn current_frame(&self) -> u32 {
        self.current_clip()
            .map(|clip| (self.cur_tick / clip.ticks_per_frame).min(clip.frames - 1))
            .unwrap_or(0)
    }

    pub fn current_clip(&self) -> Option<&AnimationClip> {
        self.animations.get(&self.current_animation)
    }
}
