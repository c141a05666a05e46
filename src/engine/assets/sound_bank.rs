// Hero sound effects, verified on load

use std::collections::HashMap;

use super::{AssetError, AssetLoader, AssetType};
use crate::game::cues::{CueSink, SoundEffect};

/// Loaded hero sound effects.
///
/// Audio device output is owned by the platform layer; the bank keeps the
/// encoded bytes and reports what was requested.
#[derive(Debug)]
pub struct SoundBank {
    sounds: HashMap<SoundEffect, Vec<u8>>,
    plays: u64,
}

impl SoundBank {
    /// Load every hero sound. Any missing file is an error.
    pub fn load(loader: &AssetLoader) -> Result<Self, AssetError> {
        let mut sounds = HashMap::new();
        for sound in SoundEffect::all() {
            let bytes = loader.load_bytes(AssetType::Sound, &sound.file_name())?;
            sounds.insert(sound, bytes);
        }
        log::info!("Loaded {} hero sounds", sounds.len());
        Ok(Self { sounds, plays: 0 })
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }

    /// Number of cues played so far
    pub fn plays(&self) -> u64 {
        self.plays
    }
}

impl CueSink for SoundBank {
    fn play(&mut self, sound: SoundEffect) {
        if let Some(bytes) = self.sounds.get(&sound) {
            self.plays += 1;
            log::debug!("play {} ({} bytes)", sound.file_name(), bytes.len());
        }
    }
}
