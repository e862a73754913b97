//! Per-frame scene assembly, independent of the GPU.
//!
//! Turns session state into the two things the renderer consumes: the
//! pattern uniform block and the overlay (panel boxes plus glyph quads).

use std::path::PathBuf;

use spectra_core::{FrameClock, Session};
use spectra_rendering::PatternParams;
use spectra_text::{font_pixel_size, GlyphQuad, GlyphTextureStore, TextEngine};
use spectra_ui::{OverlayLayout, OverlayStatus, Rect};

/// Uniforms for the active pattern at the clock's elapsed time.
#[must_use]
pub fn pattern_params(session: &Session, clock: &FrameClock, surface: (u32, u32)) -> PatternParams {
    let selector = &session.selector;
    PatternParams::new(surface, clock.elapsed_time, selector.category(), selector.index())
}

/// Overlay geometry for one frame, reused across frames.
#[derive(Debug, Default)]
pub struct OverlayScene {
    /// Panel backgrounds, left first.
    pub panels: Vec<Rect>,
    /// Glyphs to draw over the panels.
    pub quads: Vec<GlyphQuad>,
}

impl OverlayScene {
    /// Empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays out both panels and queues their text.
    ///
    /// Without a font the scene stays empty: no boxes, no text.
    pub fn compose<S: GlyphTextureStore>(
        &mut self,
        layout: &OverlayLayout,
        status: &OverlayStatus<'_>,
        text: &mut TextEngine<S>,
    ) {
        self.panels.clear();
        self.quads.clear();
        if !text.has_font() {
            return;
        }
        let frame = layout.layout(status, text);
        for panel in std::iter::once(&frame.left).chain(frame.right.as_ref()) {
            self.panels.push(panel.bounds);
            for line in &panel.text {
                text.render(&line.text, line.x, line.y, layout.scale, line.color.to_rgb());
            }
        }
        self.quads.extend(text.drain_quads());
    }
}

/// Where the overlay font comes from and how big it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontChoice {
    /// Explicit file; `None` searches the usual system locations.
    pub path: Option<PathBuf>,
    /// Fixed pixel height; `None` follows the surface height.
    pub pixel_height: Option<u32>,
}

impl FontChoice {
    /// Pixel height for a surface `surface_height` pixels tall.
    #[must_use]
    pub fn pixel_height_for(&self, surface_height: u32) -> u32 {
        self.pixel_height
            .unwrap_or_else(|| font_pixel_size(surface_height))
    }

    /// Font file to load, explicit path first.
    #[must_use]
    pub fn resolve_with<F>(&self, discover: F) -> Option<PathBuf>
    where
        F: FnOnce() -> Option<PathBuf>,
    {
        self.path.clone().or_else(discover)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spectra_core::{Action, Category, ControlMap};
    use spectra_text::{FontBackend, FontMetrics, MemoryTextureStore, RasterizedGlyph};
    use spectra_ui::SystemInfo;

    /// Every glyph is a solid 6×10 block advancing 8px.
    struct BlockFont;

    impl FontBackend for BlockFont {
        fn pixel_height(&self) -> u32 {
            10
        }

        fn metrics(&self) -> FontMetrics {
            FontMetrics {
                ascent: 8.0,
                descent: 2.0,
                line_height: 12.0,
            }
        }

        fn rasterize(&mut self, ch: char) -> Option<RasterizedGlyph> {
            if ch == ' ' {
                return Some(RasterizedGlyph {
                    width: 0,
                    height: 0,
                    bearing_x: 0,
                    bearing_y: 0,
                    advance: 8 * 64,
                    coverage: Vec::new(),
                });
            }
            Some(RasterizedGlyph {
                width: 6,
                height: 10,
                bearing_x: 1,
                bearing_y: 8,
                advance: 8 * 64,
                coverage: vec![255; 60],
            })
        }
    }

    fn status_parts() -> (SystemInfo, Session, FrameClock, ControlMap<u8>) {
        let system = SystemInfo {
            backend: "Vulkan".into(),
            vendor: "NVIDIA".into(),
            renderer: "Test GPU".into(),
            driver: "1.0".into(),
            resolution: (1920, 1080),
            refresh_hz: Some(144),
        };
        let mut controls = ControlMap::new();
        controls.bind(0, Action::Exit).hint("ESC", Action::Exit);
        (system, Session::default(), FrameClock::default(), controls)
    }

    #[test]
    fn test_params_follow_selector() {
        let mut session = Session::default();
        session.selector.set_category(Category::Auxiliary);
        session.selector.select(3);
        let clock = FrameClock {
            elapsed_time: 2.5,
            ..FrameClock::default()
        };
        let params = pattern_params(&session, &clock, (1280, 720));
        assert_eq!(params.category, 2);
        assert_eq!(params.index, 3);
        assert_eq!(params.variant, 0);
        assert_eq!(params.time, 2.5);
        assert_eq!(params.resolution, [1280.0, 720.0]);
    }

    #[test]
    fn test_no_font_means_no_overlay() {
        let (system, session, clock, controls) = status_parts();
        let status = OverlayStatus {
            system: &system,
            session: &session,
            clock: &clock,
            controls: controls.hints(),
        };
        let mut text = TextEngine::new(MemoryTextureStore::new());
        let mut scene = OverlayScene::new();
        scene.compose(&OverlayLayout::default(), &status, &mut text);
        assert!(scene.panels.is_empty());
        assert!(scene.quads.is_empty());
    }

    #[test]
    fn test_full_overlay_has_two_panels() {
        let (system, session, clock, controls) = status_parts();
        let status = OverlayStatus {
            system: &system,
            session: &session,
            clock: &clock,
            controls: controls.hints(),
        };
        let mut text = TextEngine::new(MemoryTextureStore::new());
        text.load_font(Box::new(BlockFont));
        let mut scene = OverlayScene::new();
        scene.compose(&OverlayLayout::default(), &status, &mut text);

        assert_eq!(scene.panels.len(), 2);
        assert!(!scene.quads.is_empty());
        assert!(text.quads().is_empty());
        let left = scene.panels[0];
        assert!(scene.quads.iter().any(|q| left.contains(q.x, q.y)));
    }

    #[test]
    fn test_minimal_overlay_has_one_panel() {
        let (system, mut session, clock, controls) = status_parts();
        session.minimal_overlay = true;
        let status = OverlayStatus {
            system: &system,
            session: &session,
            clock: &clock,
            controls: controls.hints(),
        };
        let mut text = TextEngine::new(MemoryTextureStore::new());
        text.load_font(Box::new(BlockFont));
        let mut scene = OverlayScene::new();
        scene.compose(&OverlayLayout::default(), &status, &mut text);

        assert_eq!(scene.panels.len(), 1);
        // "FPS: 0" without the space
        assert_eq!(scene.quads.len(), 5);
    }

    #[test]
    fn test_recompose_does_not_accumulate() {
        let (system, session, clock, controls) = status_parts();
        let status = OverlayStatus {
            system: &system,
            session: &session,
            clock: &clock,
            controls: controls.hints(),
        };
        let mut text = TextEngine::new(MemoryTextureStore::new());
        text.load_font(Box::new(BlockFont));
        let mut scene = OverlayScene::new();
        let layout = OverlayLayout::default();
        scene.compose(&layout, &status, &mut text);
        let first = scene.quads.len();
        let uploads = text.store().uploads();
        scene.compose(&layout, &status, &mut text);
        assert_eq!(scene.quads.len(), first);
        assert_eq!(text.store().uploads(), uploads);
    }

    #[test]
    fn test_font_choice() {
        let auto = FontChoice::default();
        assert_eq!(auto.pixel_height_for(2160), 24);
        assert_eq!(auto.pixel_height_for(480), 16);
        let fixed = FontChoice {
            path: Some(PathBuf::from("/fonts/mono.ttf")),
            pixel_height: Some(30),
        };
        assert_eq!(fixed.pixel_height_for(2160), 30);
        assert_eq!(
            fixed.resolve_with(|| Some(PathBuf::from("/system.ttf"))),
            Some(PathBuf::from("/fonts/mono.ttf"))
        );
        assert_eq!(
            auto.resolve_with(|| Some(PathBuf::from("/system.ttf"))),
            Some(PathBuf::from("/system.ttf"))
        );
        assert_eq!(auto.resolve_with(|| None), None);
    }
}
