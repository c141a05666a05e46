// Asset path resolution and loading

use super::AssetError;
use std::path::{Path, PathBuf};

/// Kinds of hero assets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    Sound,
    /// Avatar sprite layers, grouped per body base
    Sprite,
}

impl AssetType {
    /// Directory for this asset type under the asset root
    pub fn default_directory(&self) -> &'static str {
        match self {
            AssetType::Sound => "soundfx",
            AssetType::Sprite => "images/avatar",
        }
    }

    /// File extension for this asset type
    pub fn extension(&self) -> &'static str {
        match self {
            AssetType::Sound => "ogg",
            AssetType::Sprite => "png",
        }
    }
}

/// Finds and loads asset files under one root directory
#[derive(Debug, Clone)]
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, asset_type: AssetType, name: &str) -> PathBuf {
        self.base_path
            .join(asset_type.default_directory())
            .join(name)
    }

    /// Load asset bytes from disk
    pub fn load_bytes(&self, asset_type: AssetType, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.resolve_path(asset_type, name);

        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
        }

        std::fs::read(&path).map_err(|source| AssetError::Io {
            path: path.to_string_lossy().to_string(),
            source,
        })
    }

    pub fn exists(&self, asset_type: AssetType, name: &str) -> bool {
        self.resolve_path(asset_type, name).exists()
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}
