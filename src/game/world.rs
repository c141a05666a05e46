// Map/collision seam used by the avatar core, plus a tile-grid map
//
// The avatar only asks the map questions (line of sight, emptiness,
// movement) and leaves requests on it (teleport, camera). Acting on those
// requests is the game engine's job.

use glam::IVec2;

use crate::core::math::{tile_center, to_tile};

/// A map name plus a map-unit position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnPoint {
    pub map: String,
    pub pos: IVec2,
}

impl SpawnPoint {
    pub fn new(map: &str, pos: IVec2) -> Self {
        Self {
            map: map.to_string(),
            pos,
        }
    }
}

/// Queries and requests the avatar core exchanges with the current map
pub trait MapCollaborator {
    /// Nothing solid between the two map-unit points
    fn line_of_sight(&self, from: IVec2, to: IVec2) -> bool;

    /// The point lies on a walkable, unoccupied tile
    fn is_empty(&self, at: IVec2) -> bool;

    /// Move `pos` by `delta` unless the destination collides. Returns true
    /// if the move happened.
    fn move_entity(&self, pos: &mut IVec2, delta: IVec2) -> bool;

    /// Convert a screen-space pointer into map units around the hero
    fn screen_to_map(&self, screen: IVec2, hero: IVec2) -> IVec2;

    /// Where a defeated hero comes back
    fn respawn_point(&self) -> SpawnPoint;

    /// Ask the engine to move the hero to another map/position
    fn request_teleport(&mut self, destination: SpawnPoint);

    /// Per-frame camera focus and hero tile
    fn set_camera(&mut self, cam: IVec2, hero_tile: IVec2);

    /// Fire any map events at the hero position
    fn check_events(&mut self, pos: IVec2);

    /// Drop pending map events (e.g. the new-map spawn trigger)
    fn clear_events(&mut self);
}

/// A map event that teleports the hero when entered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEvent {
    pub tile: IVec2,
    pub teleport: SpawnPoint,
}

/// Grid map with solid and open tiles
#[derive(Debug, Clone)]
pub struct TileMap {
    name: String,
    width: i32,
    height: i32,
    solid: Vec<bool>,
    occupied: Vec<bool>,
    viewport: IVec2,
    respawn: SpawnPoint,
    events: Vec<MapEvent>,
    pub teleport: Option<SpawnPoint>,
    pub cam: IVec2,
    pub hero_tile: IVec2,
}

impl TileMap {
    /// An open map with a solid border
    pub fn new(name: &str, width: i32, height: i32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let mut map = Self {
            name: name.to_string(),
            width,
            height,
            solid: vec![false; (width * height) as usize],
            occupied: vec![false; (width * height) as usize],
            viewport: IVec2::new(640, 480),
            respawn: SpawnPoint::new(name, tile_center(IVec2::new(width / 2, height / 2))),
            events: Vec::new(),
            teleport: None,
            cam: IVec2::ZERO,
            hero_tile: IVec2::ZERO,
        };
        for x in 0..width {
            map.set_solid(IVec2::new(x, 0), true);
            map.set_solid(IVec2::new(x, height - 1), true);
        }
        for y in 0..height {
            map.set_solid(IVec2::new(0, y), true);
            map.set_solid(IVec2::new(width - 1, y), true);
        }
        map
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_viewport(mut self, width: i32, height: i32) -> Self {
        self.viewport = IVec2::new(width, height);
        self
    }

    pub fn set_respawn_point(&mut self, respawn: SpawnPoint) {
        self.respawn = respawn;
    }

    pub fn add_event(&mut self, event: MapEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[MapEvent] {
        &self.events
    }

    /// Take the pending teleport request, if any
    pub fn take_teleport(&mut self) -> Option<SpawnPoint> {
        self.teleport.take()
    }

    fn index(&self, tile: IVec2) -> Option<usize> {
        if tile.x < 0 || tile.y < 0 || tile.x >= self.width || tile.y >= self.height {
            return None;
        }
        Some((tile.y * self.width + tile.x) as usize)
    }

    pub fn set_solid(&mut self, tile: IVec2, solid: bool) {
        if let Some(i) = self.index(tile) {
            self.solid[i] = solid;
        }
    }

    pub fn set_occupied(&mut self, tile: IVec2, occupied: bool) {
        if let Some(i) = self.index(tile) {
            self.occupied[i] = occupied;
        }
    }

    fn is_solid_tile(&self, tile: IVec2) -> bool {
        self.index(tile).map_or(true, |i| self.solid[i])
    }

    fn is_walkable_tile(&self, tile: IVec2) -> bool {
        self.index(tile)
            .is_some_and(|i| !self.solid[i] && !self.occupied[i])
    }
}

impl MapCollaborator for TileMap {
    fn line_of_sight(&self, from: IVec2, to: IVec2) -> bool {
        // Bresenham walk across tiles
        let mut cur = to_tile(from);
        let end = to_tile(to);
        let dx = (end.x - cur.x).abs();
        let dy = -(end.y - cur.y).abs();
        let sx = if cur.x < end.x { 1 } else { -1 };
        let sy = if cur.y < end.y { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            if self.is_solid_tile(cur) {
                return false;
            }
            if cur == end {
                return true;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                cur.x += sx;
            }
            if e2 <= dx {
                err += dx;
                cur.y += sy;
            }
        }
    }

    fn is_empty(&self, at: IVec2) -> bool {
        self.is_walkable_tile(to_tile(at))
    }

    fn move_entity(&self, pos: &mut IVec2, delta: IVec2) -> bool {
        if delta == IVec2::ZERO {
            return false;
        }
        let dest = *pos + delta;
        if self.is_walkable_tile(to_tile(dest)) {
            *pos = dest;
            true
        } else {
            false
        }
    }

    fn screen_to_map(&self, screen: IVec2, hero: IVec2) -> IVec2 {
        let scr = screen - self.viewport / 2;
        hero + IVec2::new(scr.x + 2 * scr.y, 2 * scr.y - scr.x)
    }

    fn respawn_point(&self) -> SpawnPoint {
        self.respawn.clone()
    }

    fn request_teleport(&mut self, destination: SpawnPoint) {
        log::debug!("teleport requested to {} {}", destination.map, destination.pos);
        self.teleport = Some(destination);
    }

    fn set_camera(&mut self, cam: IVec2, hero_tile: IVec2) {
        self.cam = cam;
        self.hero_tile = hero_tile;
    }

    fn check_events(&mut self, pos: IVec2) {
        let tile = to_tile(pos);
        if let Some(event) = self.events.iter().find(|e| e.tile == tile) {
            self.teleport = Some(event.teleport.clone());
        }
    }

    fn clear_events(&mut self) {
        self.events.clear();
    }
}
