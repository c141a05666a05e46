use anyhow::{Context, Result};
use log::info;
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::assets::{AssetLoader, SoundBank};
use engine::settings::GameSettings;
use game::session::HeroGame;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Rusted Hero...");

    let settings = GameSettings::from_env().context("Invalid settings")?;
    info!("Settings: {:?}", settings);

    // Hero sounds are required; a missing one stops startup
    let loader = AssetLoader::new(&settings.asset_dir);
    let sounds = SoundBank::load(&loader).context("Failed to load hero sounds")?;

    let mut game = HeroGame::new(settings, sounds);

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Rusted Hero")
        .with_inner_size(winit::dpi::LogicalSize::new(640, 480))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                game.save();
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                if event.state == ElementState::Pressed
                    && !event.repeat
                    && event.physical_key == PhysicalKey::Code(KeyCode::KeyP)
                {
                    game.clock_mut().toggle_pause();
                }
                game.input_mut().process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::MouseInput { state, button, .. },
                ..
            } => {
                game.input_mut().process_mouse_button(button, state);
            }
            Event::WindowEvent {
                event: WindowEvent::CursorMoved { position, .. },
                ..
            } => {
                game.input_mut().process_cursor_moved(position);
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => {
                game.input_mut().state_mut().reset();
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                game.tick();

                let frame = game.render();
                log::trace!(
                    "{} frame {} dir {} at {}",
                    frame.animation,
                    frame.frame,
                    frame.direction,
                    frame.map_pos
                );
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
