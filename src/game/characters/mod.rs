// Hero character
//
// - `stats`: the stat block (attributes, resources, timed statuses)
// - `state`: avatar behavior states and transitions
// - `animation`: tick-based sprite clips
// - `appearance`: composited hero sprite layers
// - `avatar`: the per-frame hero logic tying them together

pub mod animation;
pub mod appearance;
pub mod avatar;
pub mod state;
pub mod stats;

pub use animation::{AnimationClip, AnimationPlayer, Playback};
pub use appearance::{AppearanceDescriptor, AvatarGraphics, CompositeSprite, Renderable};
pub use avatar::{Avatar, MovementMode};
pub use state::{AvatarState, AvatarStateMachine};
pub use stats::{Build, EquipmentBonus, StatBlock};
