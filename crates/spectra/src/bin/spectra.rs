//! SPECTRA - display stress test.
//!
//! Run with: `cargo run --release --bin spectra -- --windowed`

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use spectra::{input, logging, App, Cli, FontChoice, TickOutcome};
use spectra_core::{InputEvent, Language, Settings};
use tracing::{error, info};
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Fullscreen, WindowBuilder};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref())?;

    let settings = Settings::load_or_default(&cli.config)
        .with_context(|| format!("failed to load settings from {}", cli.config.display()))?;
    let mut session = settings.session(Language::from_env());
    if let Some(language) = cli.lang {
        session.language = language;
    }
    let fullscreen = settings.display.fullscreen && !cli.windowed;
    info!(
        fullscreen,
        category = ?session.selector.category(),
        pacing = ?session.config.pacing_mode,
        language = ?session.language,
        "SPECTRA starting"
    );

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let window = WindowBuilder::new()
        .with_title("SPECTRA")
        .with_inner_size(PhysicalSize::new(settings.display.width, settings.display.height))
        .with_fullscreen(fullscreen.then_some(Fullscreen::Borderless(None)))
        .build(&event_loop)
        .context("failed to create window")?;
    let window = Arc::new(window);

    let font = FontChoice {
        path: settings.overlay.font_path.clone(),
        pixel_height: settings.overlay.font_px,
    };
    let mut app = App::new(window, session, font)?;

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, window_id } if window_id == app.window().id() => {
                    match event {
                        WindowEvent::CloseRequested => app.push(InputEvent::CloseRequested),
                        WindowEvent::Resized(size) => app.push(InputEvent::Resized {
                            width: size.width,
                            height: size.height,
                        }),
                        WindowEvent::KeyboardInput { event, .. } => {
                            if let Some(code) = input::pressed_key(&event) {
                                app.push(InputEvent::Key(code));
                            }
                        }
                        WindowEvent::RedrawRequested => match app.tick() {
                            Ok(TickOutcome::Continue) => {}
                            Ok(TickOutcome::Exit) => elwt.exit(),
                            Err(err) => {
                                error!("{err:#}");
                                elwt.exit();
                            }
                        },
                        _ => {}
                    }
                }
                Event::AboutToWait => app.request_redraw(),
                _ => {}
            }
        })
        .context("event loop terminated with an error")?;

    info!("SPECTRA stopped");
    Ok(())
}
