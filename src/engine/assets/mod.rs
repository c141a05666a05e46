// Asset lookup for the hero's sounds and sprite layers
//
// Missing hero assets are fatal at startup; nothing here tries to recover.

mod loader;
mod sound_bank;

pub use loader::{AssetLoader, AssetType};
pub use sound_bank::SoundBank;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to read asset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("soundfx/level_up.ogg".to_string());
        assert_eq!(err.to_string(), "Asset not found: soundfx/level_up.ogg");
    }
}
