// Game settings: code-level defaults, overridable from the environment

use std::path::PathBuf;

use crate::game::characters::MovementMode;
use crate::game::persistence::MAX_SLOT;

/// Problems with environment overrides
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("{key} must be a number, got {value:?}")]
    NotANumber { key: &'static str, value: String },

    #[error("save slot {0} out of range (0 disables saving, 1 to 4 are valid)")]
    SlotOutOfRange(u32),

    #[error("{key} must be true or false, got {value:?}")]
    NotABool { key: &'static str, value: String },
}

/// Everything the demo binary needs to start a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSettings {
    pub save_dir: PathBuf,
    pub asset_dir: PathBuf,
    /// Active save slot, 0 disables saving and loading
    pub slot: u32,
    pub movement: MovementMode,
    /// In pointer mode, a click on open ground walks instead of using a power
    pub restrict_power_use: bool,
    /// Fixed seed for combat and cosmetic rolls
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("saves"),
            asset_dir: PathBuf::from("assets"),
            slot: 1,
            movement: MovementMode::Keys,
            restrict_power_use: true,
            seed: None,
        }
    }
}

impl GameSettings {
    /// Defaults with `HERO_*` environment overrides applied
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides from `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(dir) = lookup("HERO_SAVE_DIR") {
            settings.save_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("HERO_ASSET_DIR") {
            settings.asset_dir = PathBuf::from(dir);
        }
        if let Some(value) = lookup("HERO_SLOT") {
            let slot = parse_number("HERO_SLOT", &value)?;
            if slot > MAX_SLOT {
                return Err(SettingsError::SlotOutOfRange(slot));
            }
            settings.slot = slot;
        }
        if let Some(value) = lookup("HERO_MOUSE_MOVE") {
            settings.movement = if parse_bool("HERO_MOUSE_MOVE", &value)? {
                MovementMode::Pointer
            } else {
                MovementMode::Keys
            };
        }
        if let Some(value) = lookup("HERO_SEED") {
            settings.seed = Some(parse_number("HERO_SEED", &value)?);
        }

        Ok(settings)
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, SettingsError> {
    value
        .trim()
        .parse()
        .map_err(|_| SettingsError::NotANumber {
            key,
            value: value.to_string(),
        })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, SettingsError> {
    match value.trim() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(SettingsError::NotABool {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_overrides() {
        let settings = GameSettings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, GameSettings::default());
        assert_eq!(settings.movement, MovementMode::Keys);
    }

    #[test]
    fn test_overrides() {
        let settings = GameSettings::from_lookup(lookup(&[
            ("HERO_SAVE_DIR", "/tmp/hero"),
            ("HERO_SLOT", "3"),
            ("HERO_MOUSE_MOVE", "true"),
            ("HERO_SEED", " 42 "),
        ]))
        .unwrap();

        assert_eq!(settings.save_dir, PathBuf::from("/tmp/hero"));
        assert_eq!(settings.slot, 3);
        assert_eq!(settings.movement, MovementMode::Pointer);
        assert_eq!(settings.seed, Some(42));
    }

    #[test]
    fn test_slot_zero_disables() {
        let settings = GameSettings::from_lookup(lookup(&[("HERO_SLOT", "0")])).unwrap();
        assert_eq!(settings.slot, 0);
    }

    #[test]
    fn test_bad_values() {
        assert!(matches!(
            GameSettings::from_lookup(lookup(&[("HERO_SLOT", "9")])),
            Err(SettingsError::SlotOutOfRange(9))
        ));
        assert!(matches!(
            GameSettings::from_lookup(lookup(&[("HERO_SEED", "abc")])),
            Err(SettingsError::NotANumber { key: "HERO_SEED", .. })
        ));
        assert!(matches!(
            GameSettings::from_lookup(lookup(&[("HERO_MOUSE_MOVE", "maybe")])),
            Err(SettingsError::NotABool { .. })
        ));
    }
}
