// Hero appearance - which sprite layers make up the composited hero sheet
//
// The hero sheet is 8 direction rows. Assuming a right-handed hero, the
// main hand is furthest from the camera on rows 0-1 and 6-7 and nearest on
// rows 2-5; the off hand is the mirror image.

use std::ops::Range;

use glam::IVec2;

use crate::engine::assets::AssetType;

/// Armor layer used when nothing is worn
pub const DEFAULT_ARMOR: &str = "clothes";

/// Direction rows on the hero sheet
pub const SHEET_ROWS: u32 = 8;

const FAR_ROWS_TOP: Range<u32> = 0..2;
const FAR_ROWS_BOTTOM: Range<u32> = 6..8;
const NEAR_ROWS: Range<u32> = 2..6;

/// Equipment-driven part of the hero's look
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppearanceDescriptor {
    pub main: String,
    pub armor: String,
    pub off: String,
}

impl AppearanceDescriptor {
    /// Normalize a request: no armor means plain clothes
    pub fn new(main: &str, armor: &str, off: &str) -> Self {
        let armor = if armor.is_empty() { DEFAULT_ARMOR } else { armor };
        Self {
            main: main.to_string(),
            armor: armor.to_string(),
            off: off.to_string(),
        }
    }
}

/// One image blitted onto the composite, restricted to some rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteLayer {
    /// Sprite asset name, relative to the avatar sprite directory
    pub image: String,
    pub rows: Range<u32>,
}

/// The composited hero sheet, as an ordered list of layers (bottom first)
#[derive(Debug)]
pub struct CompositeSprite {
    layers: Vec<SpriteLayer>,
}

impl CompositeSprite {
    fn build(base: &str, look: &str, descriptor: &AppearanceDescriptor) -> Self {
        let image = |name: &str| format!("{}/{}.{}", base, name, AssetType::Sprite.extension());
        let mut layers = vec![SpriteLayer {
            image: image(&descriptor.armor),
            rows: 0..SHEET_ROWS,
        }];

        let main = (!descriptor.main.is_empty()).then(|| image(&descriptor.main));
        let off = (!descriptor.off.is_empty()).then(|| image(&descriptor.off));
        let push = |layers: &mut Vec<SpriteLayer>, image: &Option<String>, rows: Range<u32>| {
            if let Some(image) = image {
                layers.push(SpriteLayer {
                    image: image.clone(),
                    rows,
                });
            }
        };

        // furthest hand first
        push(&mut layers, &main, FAR_ROWS_TOP);
        push(&mut layers, &main, FAR_ROWS_BOTTOM);
        push(&mut layers, &off, NEAR_ROWS);

        layers.push(SpriteLayer {
            image: image(look),
            rows: 0..SHEET_ROWS,
        });

        // closest hand last
        push(&mut layers, &off, FAR_ROWS_TOP);
        push(&mut layers, &off, FAR_ROWS_BOTTOM);
        push(&mut layers, &main, NEAR_ROWS);

        Self { layers }
    }

    pub fn layers(&self) -> &[SpriteLayer] {
        &self.layers
    }
}

impl Drop for CompositeSprite {
    fn drop(&mut self) {
        log::trace!("released hero composite ({} layers)", self.layers.len());
    }
}

/// Owns the hero composite and rebuilds it only when the look changes
#[derive(Debug, Default)]
pub struct AvatarGraphics {
    descriptor: Option<AppearanceDescriptor>,
    composite: Option<CompositeSprite>,
    rebuilds: u32,
}

impl AvatarGraphics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a look. Returns true if the composite was rebuilt.
    pub fn load(&mut self, base: &str, look: &str, main: &str, armor: &str, off: &str) -> bool {
        let requested = AppearanceDescriptor::new(main, armor, off);
        if self.descriptor.as_ref() == Some(&requested) {
            return false;
        }

        // Old composite is released before the new one is built
        self.composite = None;
        self.composite = Some(CompositeSprite::build(base, look, &requested));
        self.descriptor = Some(requested);
        self.rebuilds += 1;
        log::debug!("rebuilt hero composite for {:?}", self.descriptor);
        true
    }

    pub fn descriptor(&self) -> Option<&AppearanceDescriptor> {
        self.descriptor.as_ref()
    }

    pub fn composite(&self) -> Option<&CompositeSprite> {
        self.composite.as_ref()
    }

    /// Times the composite has been built
    pub fn rebuilds(&self) -> u32 {
        self.rebuilds
    }
}

/// What the external renderer needs to draw the hero this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderable {
    pub animation: String,
    pub tick: u32,
    /// Sheet column
    pub frame: u32,
    /// Sheet row
    pub direction: u8,
    pub map_pos: IVec2,
}
