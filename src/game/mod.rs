// Game modules: the hero and the collaborators it is saved with

pub mod actionbar;
pub mod campaign;
pub mod characters;
pub mod combat;
pub mod cues;
pub mod inventory;
pub mod persistence;
pub mod powers;
pub mod session;
pub mod world;
