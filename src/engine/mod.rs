// Engine modules: assets, frame clock, input, settings

pub mod assets;
pub mod game_loop;
pub mod input;
pub mod settings;
