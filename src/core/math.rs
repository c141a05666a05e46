// Math utilities: map units, tiles and 8-way facing

use glam::{IVec2, Vec2};

/// Map units per tile edge
pub const UNITS_PER_TILE: i32 = 32;

/// Facing direction that looks toward the camera
pub const FACE_CAMERA: u8 = 6;

/// Unit step for each of the 8 facing directions in map space.
///
/// The map is isometric, so direction 0 is screen-left (map south-west) and
/// the directions advance clockwise on screen. Odd directions move along a
/// single map axis, even directions move along both.
pub const DIRECTION_STEPS: [IVec2; 8] = [
    IVec2::new(-1, 1),
    IVec2::new(-1, 0),
    IVec2::new(-1, -1),
    IVec2::new(0, -1),
    IVec2::new(1, -1),
    IVec2::new(1, 0),
    IVec2::new(1, 1),
    IVec2::new(0, 1),
];

/// Whether a direction moves along both map axes at once
pub fn is_diagonal(direction: u8) -> bool {
    direction % 2 == 0
}

/// Movement delta for one frame in the given direction.
///
/// Single-axis directions move `speed` units; two-axis directions move
/// `diagonal_speed` units on each axis.
pub fn step_delta(direction: u8, speed: i32, diagonal_speed: i32) -> IVec2 {
    let step = DIRECTION_STEPS[(direction % 8) as usize];
    if is_diagonal(direction) {
        step * diagonal_speed
    } else {
        step * speed
    }
}

/// Direction from `from` toward `to`, or `None` when the points coincide
pub fn face(from: IVec2, to: IVec2) -> Option<u8> {
    let wanted = (to - from).as_vec2();
    if wanted == Vec2::ZERO {
        return None;
    }

    let mut best = 0u8;
    let mut best_dot = f32::MIN;
    for (index, step) in DIRECTION_STEPS.iter().enumerate() {
        let dot = step.as_vec2().normalize().dot(wanted);
        if dot > best_dot {
            best_dot = dot;
            best = index as u8;
        }
    }
    Some(best)
}

/// Direction from held directional keys, or `None` when nothing is held.
/// Two-key combinations win over single keys.
pub fn direction_from_keys(up: bool, down: bool, left: bool, right: bool) -> Option<u8> {
    match (up, down, left, right) {
        (true, _, true, _) => Some(1),
        (true, _, _, true) => Some(3),
        (_, true, _, true) => Some(5),
        (_, true, true, _) => Some(7),
        (_, _, true, _) => Some(0),
        (true, _, _, _) => Some(2),
        (_, _, _, true) => Some(4),
        (_, true, _, _) => Some(6),
        _ => None,
    }
}

/// Tile containing a map-unit position
pub fn to_tile(pos: IVec2) -> IVec2 {
    IVec2::new(
        pos.x.div_euclid(UNITS_PER_TILE),
        pos.y.div_euclid(UNITS_PER_TILE),
    )
}

/// Map-unit position at the centre of a tile
pub fn tile_center(tile: IVec2) -> IVec2 {
    tile * UNITS_PER_TILE + IVec2::splat(UNITS_PER_TILE / 2)
}
