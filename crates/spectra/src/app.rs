//! # Render Loop
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         ONE TICK                              │
//! ├──────────────────────────────────────────────────────────────┤
//! │  drain events → Session::apply     (exit / resize / vsync)    │
//! │       ↓                                                       │
//! │  FramePacer::update                (clock, target fps)        │
//! │       ↓                                                       │
//! │  pattern uniforms + overlay layout → render + present         │
//! │       ↓                                                       │
//! │  FIXED-mode sleep → end_frame      (EMA, once-a-second report)│
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Winit delivers events between ticks; they are only queued here and
//! applied at the start of the next tick.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use spectra_core::{dispatch, ControlMap, EventQueue, FpsReport, FramePacer, InputEvent, Session};
use spectra_patterns::PatternCatalog;
use spectra_rendering::{FrameContent, Renderer, WgpuGlyphTextures};
use spectra_text::{find_system_font, TextEngine};
use spectra_ui::{OverlayLayout, OverlayStatus, SystemInfo};
use tracing::{debug, info, warn};
use winit::keyboard::KeyCode;
use winit::window::Window;

use crate::input::default_controls;
use crate::scene::{pattern_params, FontChoice, OverlayScene};

/// Whether the loop keeps going after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep ticking.
    Continue,
    /// Exit was requested.
    Exit,
}

/// Everything the loop owns.
pub struct App {
    window: Arc<Window>,
    renderer: Renderer,
    text: TextEngine<WgpuGlyphTextures>,
    font: FontChoice,
    session: Session,
    controls: ControlMap<KeyCode>,
    events: EventQueue<KeyCode>,
    pacer: FramePacer,
    layout: OverlayLayout,
    system: SystemInfo,
    scene: OverlayScene,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("renderer", &self.renderer)
            .field("session", &self.session)
            .field("font", &self.font)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Opens the GPU on `window` and loads the overlay font.
    ///
    /// # Errors
    ///
    /// Fails when no GPU device can present to the window. A missing font
    /// only disables overlay text.
    pub fn new(window: Arc<Window>, session: Session, font: FontChoice) -> Result<Self> {
        let size = window.inner_size();
        let renderer = pollster::block_on(Renderer::new(
            window.clone(),
            (size.width, size.height),
            session.config.vsync_enabled,
        ))
        .context("failed to initialize GPU")?;

        let refresh_hz = refresh_rate(&window);
        let system = renderer.system_info(refresh_hz);
        info!(
            renderer = %system.renderer,
            vendor = %system.vendor,
            driver = %system.driver,
            refresh_hz = ?refresh_hz,
            "Display ready"
        );

        let text = TextEngine::new(renderer.glyph_store());
        let mut app = Self {
            window,
            renderer,
            text,
            font,
            session,
            controls: default_controls(),
            events: EventQueue::new(),
            pacer: FramePacer::new(Instant::now()),
            layout: OverlayLayout::default(),
            system,
            scene: OverlayScene::new(),
        };
        app.reload_font();
        Ok(app)
    }

    /// Window the app draws into.
    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Queues an event for the next tick.
    pub fn push(&mut self, event: InputEvent<KeyCode>) {
        self.events.push(event);
    }

    /// Runs one loop iteration.
    ///
    /// # Errors
    ///
    /// Only when the surface runs out of memory.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        let input = dispatch(&mut self.events, &self.controls, &mut self.session);
        if input.exit_requested {
            info!("Exit requested");
            return Ok(TickOutcome::Exit);
        }
        if let Some((width, height)) = input.resized {
            self.resize(width, height);
        }
        if let Some(enabled) = input.vsync_changed {
            self.renderer.set_vsync(enabled);
        }

        self.pacer.update(&self.session.config, Instant::now());

        let status = OverlayStatus {
            system: &self.system,
            session: &self.session,
            clock: self.pacer.clock(),
            controls: self.controls.hints(),
        };
        self.scene.compose(&self.layout, &status, &mut self.text);

        let content = FrameContent {
            pattern: pattern_params(&self.session, self.pacer.clock(), self.renderer.size()),
            panels: &self.scene.panels,
            quads: &self.scene.quads,
        };
        self.renderer
            .render_frame(&content, self.text.store())
            .context("frame rendering failed")?;

        if let Some(delay) = self.pacer.pacing_delay(&self.session.config, Instant::now()) {
            std::thread::sleep(delay);
        }
        let now = Instant::now();
        self.pacer.mark_paced(now);
        if let Some(report) = self.pacer.end_frame(now) {
            self.report(&report);
        }
        Ok(TickOutcome::Continue)
    }

    /// Asks winit for the next redraw.
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.renderer.resize(width, height);
        self.system.resolution = (width, height);
        self.reload_font();
        debug!(width, height, "Resized");
    }

    /// Loads the overlay font at the size for the current surface height.
    fn reload_font(&mut self) {
        let (_, height) = self.renderer.size();
        let pixel_height = self.font.pixel_height_for(height);
        if self.text.has_font() && self.text.pixel_height() == pixel_height {
            return;
        }
        let Some(path) = self.font.resolve_with(find_system_font) else {
            warn!("No usable font found, overlay text disabled");
            self.text.unload_font();
            return;
        };
        if let Err(err) = self.text.load_font_file(&path, pixel_height) {
            warn!(%err, path = %path.display(), "Font load failed, overlay text disabled");
        }
    }

    fn report(&self, report: &FpsReport) {
        let config = &self.session.config;
        let selector = &self.session.selector;
        let pattern = PatternCatalog::entry(selector.category(), selector.index());
        info!(
            fps = format_args!("{:.1}", report.fps),
            frame_time_ms = format_args!("{:.2}", report.frame_time_ms),
            target_fps = format_args!("{:.0}", self.pacer.clock().target_fps),
            pacing = ?config.pacing_mode,
            vsync = config.vsync_enabled,
            group = ?selector.category(),
            pattern = pattern.name_en,
            paused = config.paused,
            "FPS report"
        );
    }
}

/// Refresh rate of the window's monitor, rounded to whole hertz.
fn refresh_rate(window: &Window) -> Option<u32> {
    window
        .current_monitor()
        .and_then(|monitor| monitor.refresh_rate_millihertz())
        .map(|millihertz| (millihertz + 500) / 1000)
}
