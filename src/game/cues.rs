// Fire-and-forget audio cues raised by the avatar core

/// Number of footstep variations
pub const STEP_SOUNDS: usize = 4;

/// Sounds the avatar core can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Melee,
    Hit,
    Die,
    Block,
    /// Footstep variation, `0..STEP_SOUNDS`
    Step(usize),
    LevelUp,
}

impl SoundEffect {
    /// Every sound the hero needs loaded before play starts
    pub fn all() -> Vec<SoundEffect> {
        let mut all = vec![
            SoundEffect::Melee,
            SoundEffect::Hit,
            SoundEffect::Die,
            SoundEffect::Block,
            SoundEffect::LevelUp,
        ];
        all.extend((0..STEP_SOUNDS).map(SoundEffect::Step));
        all
    }

    /// Asset file for this sound, relative to the sound directory
    pub fn file_name(&self) -> String {
        match self {
            SoundEffect::Melee => "melee_attack.ogg".to_string(),
            SoundEffect::Hit => "male_hit.ogg".to_string(),
            SoundEffect::Die => "male_die.ogg".to_string(),
            SoundEffect::Block => "powers/block.ogg".to_string(),
            SoundEffect::Step(n) => format!("step_echo{}.ogg", n + 1),
            SoundEffect::LevelUp => "level_up.ogg".to_string(),
        }
    }
}

/// Receiver of one-way audio cues
pub trait CueSink {
    fn play(&mut self, sound: SoundEffect);
}

/// Cue sink that remembers everything it was asked to play
#[derive(Debug, Default)]
pub struct RecordedCues {
    pub played: Vec<SoundEffect>,
}

impl RecordedCues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, sound: SoundEffect) -> usize {
        self.played.iter().filter(|s| **s == sound).count()
    }

    pub fn contains(&self, sound: SoundEffect) -> bool {
        self.count(sound) > 0
    }
}

impl CueSink for RecordedCues {
    fn play(&mut self, sound: SoundEffect) {
        self.played.push(sound);
    }
}
