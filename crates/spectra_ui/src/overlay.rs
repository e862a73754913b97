//! # Overlay Layout
//!
//! Rebuilds both panels from live state each frame.
//!
//! ```text
//!  margin                                         margin
//! ┌──────┬──────────────────┐       ┌──────────────────────────┬──────┐
//! │      │ padding          │ top   │ padding                  │      │
//! │      │ ascent ─ line 0  │       │ Controls                 │      │
//! │      │   line_height    │       │ ESC    Exit              │      │
//! │      │ ...  (+gap)      │       │ ←/→    Prev/Next pattern │      │
//! │      │ descent          │       │  key col │ gap │ desc col│      │
//! │      │ padding          │       │ padding                  │      │
//! └──────┴──────────────────┘       └──────────────────────────┴──────┘
//! ```
//!
//! Panel height is `ceil(A + (N-1)·L + D + G + 2·padding)` and width is
//! `ceil(max line width + 2·padding)`. Text baselines are placed with the
//! same numbers, so the box always hugs the text it was sized for.

use spectra_core::{ControlHint, FrameClock, Language, Session};
use spectra_patterns::PatternCatalog;
use spectra_text::{GlyphTextureStore, TextEngine};

use crate::geometry::Rect;
use crate::labels::{self, tr};
use crate::style::Color;

/// Line metrics and width measurement, as the layout needs them.
pub trait TextMeasure {
    /// Advance width of `text` at `scale`.
    fn measure(&mut self, text: &str, scale: f32) -> f32;
    /// Baseline-to-baseline distance at `scale`.
    fn line_height(&self, scale: f32) -> f32;
    /// Ascent at `scale`.
    fn ascent(&self, scale: f32) -> f32;
    /// Descent at `scale`, positive.
    fn descent(&self, scale: f32) -> f32;
}

impl<S: GlyphTextureStore> TextMeasure for TextEngine<S> {
    fn measure(&mut self, text: &str, scale: f32) -> f32 {
        TextEngine::measure(self, text, scale)
    }

    fn line_height(&self, scale: f32) -> f32 {
        TextEngine::line_height(self, scale)
    }

    fn ascent(&self, scale: f32) -> f32 {
        TextEngine::ascent(self, scale)
    }

    fn descent(&self, scale: f32) -> f32 {
        TextEngine::descent(self, scale)
    }
}

/// Facts about the machine shown in the status panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemInfo {
    /// Graphics API in use, e.g. `Vulkan`.
    pub backend: String,
    /// Adapter vendor.
    pub vendor: String,
    /// Adapter name.
    pub renderer: String,
    /// Driver name and version.
    pub driver: String,
    /// Surface size in pixels.
    pub resolution: (u32, u32),
    /// Refresh rate of the current monitor, if known.
    pub refresh_hz: Option<u32>,
}

/// One status-panel line.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLine {
    /// Text.
    pub text: String,
    /// Colour.
    pub color: Color,
    /// Add [`OverlayLayout::line_gap`] below this line.
    pub extra_gap: bool,
}

impl OverlayLine {
    fn new(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color,
            extra_gap: false,
        }
    }

    fn gap(mut self, extra_gap: bool) -> Self {
        self.extra_gap = extra_gap;
        self
    }
}

/// A string placed at a baseline position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    /// Text.
    pub text: String,
    /// Left edge of the pen.
    pub x: f32,
    /// Baseline.
    pub y: f32,
    /// Colour.
    pub color: Color,
}

/// Background box plus the text drawn over it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Panel {
    /// Background rectangle, whole pixels.
    pub bounds: Rect,
    /// Text in draw order.
    pub text: Vec<PlacedText>,
}

/// Both panels for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayFrame {
    /// Status panel, top-left.
    pub left: Panel,
    /// Controls panel, top-right; absent in minimal mode.
    pub right: Option<Panel>,
}

/// Everything the overlay reads.
#[derive(Debug, Clone, Copy)]
pub struct OverlayStatus<'a> {
    /// Machine facts.
    pub system: &'a SystemInfo,
    /// Run state.
    pub session: &'a Session,
    /// Timing state.
    pub clock: &'a FrameClock,
    /// Rows of the controls panel.
    pub controls: &'a [ControlHint],
}

/// `ceil(A + (N-1)·L + D + G + 2·padding)`; zero lines give zero height.
#[must_use]
pub fn panel_height(
    lines: usize,
    line_height: f32,
    ascent: f32,
    descent: f32,
    gaps: f32,
    padding: f32,
) -> f32 {
    if lines == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let rows = (lines - 1) as f32;
    (ascent + rows * line_height + descent + gaps + padding * 2.0).ceil()
}

/// Panel geometry constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayLayout {
    /// Distance from the left/right surface edge.
    pub margin: f32,
    /// Distance from the top surface edge.
    pub top_margin: f32,
    /// Inner padding on every side.
    pub padding: f32,
    /// Extra space below lines flagged `extra_gap`.
    pub line_gap: f32,
    /// Space between the key and description columns.
    pub column_gap: f32,
    /// Text scale.
    pub scale: f32,
}

impl Default for OverlayLayout {
    fn default() -> Self {
        Self {
            margin: 24.0,
            top_margin: 40.0,
            padding: 16.0,
            line_gap: 8.0,
            column_gap: 16.0,
            scale: 1.0,
        }
    }
}

impl OverlayLayout {
    /// Lays out both panels.
    pub fn layout(&self, status: &OverlayStatus<'_>, text: &mut dyn TextMeasure) -> OverlayFrame {
        let lines = self.status_lines(status);
        let left = self.layout_lines(&lines, text);
        let right = (!status.session.minimal_overlay).then(|| {
            let rows = Self::control_rows(status.session.language, status.controls);
            #[allow(clippy::cast_precision_loss)]
            let surface_width = status.system.resolution.0 as f32;
            self.layout_controls(&rows, surface_width, text)
        });
        OverlayFrame { left, right }
    }

    /// Status-panel lines for the current state.
    #[must_use]
    pub fn status_lines(&self, status: &OverlayStatus<'_>) -> Vec<OverlayLine> {
        let session = status.session;
        let clock = status.clock;
        let lang = session.language;
        #[allow(clippy::cast_possible_truncation)]
        let fps_text = format!("FPS: {}", clock.measured_fps as i64);

        if session.minimal_overlay {
            return vec![OverlayLine::new(fps_text, Color::WHITE)];
        }

        let system = status.system;
        let config = &session.config;
        let body = Color::BODY;
        let mut lines = Vec::with_capacity(16);

        lines.push(OverlayLine::new(tr(lang, "GPU 信息", "GPU Info"), Color::GPU_HEADER));
        lines.push(OverlayLine::new(
            format!("{}{}", tr(lang, "图形接口: ", "Backend: "), system.backend),
            body,
        ));
        lines.push(OverlayLine::new(
            format!("{}{}", tr(lang, "显卡厂商: ", "Vendor: "), system.vendor),
            body,
        ));
        lines.push(OverlayLine::new(
            format!("{}{}", tr(lang, "显卡型号: ", "Renderer: "), system.renderer),
            body,
        ));
        lines.push(OverlayLine::new(
            format!("{}{}", tr(lang, "驱动: ", "Driver: "), system.driver),
            body,
        ));
        lines.push(
            OverlayLine::new(
                format!(
                    "{}{}x{}",
                    tr(lang, "分辨率: ", "Resolution: "),
                    system.resolution.0,
                    system.resolution.1
                ),
                body,
            )
            .gap(true),
        );

        lines.push(OverlayLine::new(tr(lang, "显示器信息", "Monitor"), Color::MONITOR_HEADER));
        let refresh = match system.refresh_hz {
            Some(hz) => format!("{}{hz} Hz", tr(lang, "刷新率: ", "Refresh: ")),
            None => tr(lang, "刷新率: 未知", "Refresh: Unknown").to_owned(),
        };
        lines.push(OverlayLine::new(refresh, body).gap(true));

        lines.push(OverlayLine::new(tr(lang, "实时测试信息", "Runtime"), Color::RUNTIME_HEADER));
        lines.push(OverlayLine::new(fps_text, Color::for_fps(clock.measured_fps)));

        let mut frame_time = format!(
            "{}{:.2} ms",
            tr(lang, "帧时间: ", "Frame time: "),
            clock.smoothed_frame_time_ms
        );
        if !(config.pacing_mode.is_range() && !config.vsync_enabled) {
            let target_ms = clock.target_frame_interval.as_secs_f64() * 1000.0;
            frame_time.push_str(&format!(
                "{}{target_ms:.2} ms)",
                tr(lang, "  (目标: ", "  (Target: ")
            ));
        }
        lines.push(OverlayLine::new(frame_time, body));
        lines.push(OverlayLine::new(
            labels::pacing_line(lang, config.pacing_mode, config.vsync_enabled),
            body,
        ));
        lines.push(OverlayLine::new(
            format!(
                "{}{}",
                tr(lang, "模式: ", "Mode: "),
                labels::mode_name(lang, config.pacing_mode)
            ),
            body,
        ));

        let category = session.selector.category();
        let index = session.selector.index();
        lines.push(OverlayLine::new(
            format!(
                "{}{}",
                tr(lang, "模式组: ", "Group: "),
                labels::group_name(lang, category)
            ),
            body,
        ));
        #[allow(clippy::cast_possible_wrap)]
        let entry = PatternCatalog::lookup(category, index as i64);
        lines.push(OverlayLine::new(
            format!(
                "{}[{}:{index}] {}",
                tr(lang, "图样: ", "Pattern: "),
                category.tag(),
                entry.name(lang)
            ),
            body,
        ));

        lines.push(OverlayLine::new(
            format!(
                "{}{}",
                tr(lang, "垂直同步: ", "VSync: "),
                labels::on_off(lang, config.vsync_enabled)
            ),
            body,
        ));
        lines.push(OverlayLine::new(
            format!("{}{}", tr(lang, "目标帧率: ", "Target FPS: "), config.target_fps),
            body,
        ));
        lines.push(
            OverlayLine::new(
                format!(
                    "{}{}~{}",
                    tr(lang, "范围: ", "Range: "),
                    config.min_fps,
                    config.max_fps
                ),
                body,
            )
            .gap(config.paused),
        );
        if config.paused {
            lines.push(OverlayLine::new(
                tr(lang, "状态: 已暂停", "Status: Paused"),
                Color::PAUSED,
            ));
        }
        lines
    }

    /// `(key, description)` rows of the controls panel, header first.
    #[must_use]
    pub fn control_rows(
        language: Language,
        hints: &[ControlHint],
    ) -> Vec<(String, String)> {
        let mut rows = Vec::with_capacity(hints.len() + 1);
        rows.push((String::new(), tr(language, "控制说明", "Controls").to_owned()));
        rows.extend(hints.iter().map(|hint| {
            (
                hint.keys.clone(),
                labels::action_description(language, hint.action).to_owned(),
            )
        }));
        rows
    }

    /// Sizes and places the status panel.
    pub fn layout_lines(&self, lines: &[OverlayLine], text: &mut dyn TextMeasure) -> Panel {
        let (line_height, ascent, descent) = self.metrics(text);
        let mut max_width: f32 = 0.0;
        let mut gaps = 0.0;
        for line in lines {
            max_width = max_width.max(text.measure(&line.text, self.scale));
            if line.extra_gap {
                gaps += self.line_gap;
            }
        }
        let height = panel_height(lines.len(), line_height, ascent, descent, gaps, self.padding);
        let width = (max_width + self.padding * 2.0).ceil();
        let bounds = Rect::new(self.margin, self.top_margin, width, height);

        let x = self.margin + self.padding;
        let mut y = self.top_margin + self.padding + ascent;
        let mut placed = Vec::with_capacity(lines.len());
        for line in lines {
            placed.push(PlacedText {
                text: line.text.clone(),
                x,
                y,
                color: line.color,
            });
            y += line_height;
            if line.extra_gap {
                y += self.line_gap;
            }
        }
        Panel {
            bounds,
            text: placed,
        }
    }

    /// Sizes and places the controls panel against the right edge.
    ///
    /// The first row is the header and spans both columns.
    pub fn layout_controls(
        &self,
        rows: &[(String, String)],
        surface_width: f32,
        text: &mut dyn TextMeasure,
    ) -> Panel {
        let (line_height, ascent, descent) = self.metrics(text);
        let mut key_width: f32 = 0.0;
        let mut desc_width: f32 = 0.0;
        for (key, desc) in rows {
            key_width = key_width.max(text.measure(key, self.scale));
            desc_width = desc_width.max(text.measure(desc, self.scale));
        }
        let gap = if key_width > 0.0 { self.column_gap } else { 0.0 };
        let width = (key_width + gap + desc_width + self.padding * 2.0).ceil();
        let height = panel_height(rows.len(), line_height, ascent, descent, 0.0, self.padding);
        let left = surface_width - (width + self.margin);
        let bounds = Rect::new(left, self.top_margin, width, height);

        let x = left + self.padding;
        let mut y = self.top_margin + self.padding + ascent;
        let mut placed = Vec::with_capacity(rows.len() * 2);
        for (i, (key, desc)) in rows.iter().enumerate() {
            if i == 0 {
                placed.push(PlacedText {
                    text: desc.clone(),
                    x,
                    y,
                    color: Color::CONTROLS_HEADER,
                });
            } else {
                let mut desc_x = x;
                if !key.is_empty() {
                    placed.push(PlacedText {
                        text: key.clone(),
                        x,
                        y,
                        color: Color::BODY,
                    });
                    desc_x = x + key_width + self.column_gap;
                }
                placed.push(PlacedText {
                    text: desc.clone(),
                    x: desc_x,
                    y,
                    color: Color::BODY,
                });
            }
            y += line_height;
        }
        Panel {
            bounds,
            text: placed,
        }
    }

    fn metrics(&self, text: &dyn TextMeasure) -> (f32, f32, f32) {
        (
            text.line_height(self.scale),
            text.ascent(self.scale),
            text.descent(self.scale),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spectra_core::{Action, Category, PacingMode, PatternSelector, RunConfig};

    /// 10 px per code point, 20 px lines.
    struct FixedMeasure;

    impl TextMeasure for FixedMeasure {
        fn measure(&mut self, text: &str, scale: f32) -> f32 {
            #[allow(clippy::cast_precision_loss)]
            let n = text.chars().count() as f32;
            n * 10.0 * scale
        }
        fn line_height(&self, scale: f32) -> f32 {
            20.0 * scale
        }
        fn ascent(&self, scale: f32) -> f32 {
            15.0 * scale
        }
        fn descent(&self, scale: f32) -> f32 {
            4.5 * scale
        }
    }

    fn system() -> SystemInfo {
        SystemInfo {
            backend: "Vulkan".into(),
            vendor: "0x10de".into(),
            renderer: "Test GPU".into(),
            driver: "550.1".into(),
            resolution: (1920, 1080),
            refresh_hz: Some(144),
        }
    }

    fn session() -> Session {
        Session::new(
            RunConfig::default(),
            PatternSelector::new(Category::Dynamic),
            Language::En,
        )
    }

    fn texts(lines: &[OverlayLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_panel_height_formula() {
        assert_eq!(panel_height(3, 20.0, 15.0, 4.5, 8.0, 16.0), 100.0);
        assert_eq!(panel_height(1, 20.0, 15.2, 4.5, 0.0, 16.0), 52.0);
        assert_eq!(panel_height(0, 20.0, 15.0, 4.5, 0.0, 16.0), 0.0);
    }

    #[test]
    fn test_left_panel_geometry() {
        let layout = OverlayLayout::default();
        let lines = vec![
            OverlayLine::new("abc", Color::BODY).gap(true),
            OverlayLine::new("abcdefgh", Color::BODY),
        ];
        let panel = layout.layout_lines(&lines, &mut FixedMeasure);
        assert_eq!(panel.bounds, Rect::new(24.0, 40.0, 112.0, 80.0));
        assert_eq!(panel.text[0].x, 40.0);
        assert_eq!(panel.text[0].y, 71.0);
        assert_eq!(panel.text[1].y, 99.0);
    }

    #[test]
    fn test_controls_columns_align() {
        let layout = OverlayLayout::default();
        let rows = vec![
            (String::new(), "Controls".to_owned()),
            ("ESC".to_owned(), "Exit".to_owned()),
            ("F5/F6".to_owned(), "Range min -/+".to_owned()),
        ];
        let panel = layout.layout_controls(&rows, 1920.0, &mut FixedMeasure);
        // keys 50, gap 16, desc 130, padding 32
        assert_eq!(panel.bounds.width, 228.0);
        assert_eq!(panel.bounds.x, 1920.0 - 228.0 - 24.0);
        let desc_x: Vec<f32> = panel
            .text
            .iter()
            .filter(|t| t.text == "Exit" || t.text == "Range min -/+")
            .map(|t| t.x)
            .collect();
        assert_eq!(desc_x, vec![panel.bounds.x + 16.0 + 66.0; 2]);
        assert_eq!(panel.text[0].color, Color::CONTROLS_HEADER);
    }

    #[test]
    fn test_minimal_overlay_shows_only_fps() {
        let mut session = session();
        session.minimal_overlay = true;
        let clock = FrameClock {
            measured_fps: 143.7,
            ..FrameClock::default()
        };
        let system = system();
        let status = OverlayStatus {
            system: &system,
            session: &session,
            clock: &clock,
            controls: &[],
        };
        let frame = OverlayLayout::default().layout(&status, &mut FixedMeasure);
        assert!(frame.right.is_none());
        assert_eq!(frame.left.text.len(), 1);
        assert_eq!(frame.left.text[0].text, "FPS: 143");
        assert_eq!(frame.left.text[0].color, Color::WHITE);
    }

    #[test]
    fn test_status_lines_content() {
        let session = session();
        let clock = FrameClock::default();
        let system = system();
        let status = OverlayStatus {
            system: &system,
            session: &session,
            clock: &clock,
            controls: &[],
        };
        let lines = OverlayLayout::default().status_lines(&status);
        let text = texts(&lines);
        assert!(text.contains(&"Pattern: [D:0] HE: Channel Hash"));
        assert!(text.contains(&"Refresh: 144 Hz"));
        assert!(text.contains(&"Pacing: Fixed"));
        assert!(text.contains(&"Frame time: 0.00 ms  (Target: 8.33 ms)"));
        assert!(text.contains(&"Range: 30~144"));
        assert!(!text.contains(&"Status: Paused"));
    }

    #[test]
    fn test_range_pacing_hides_target_suffix() {
        let mut session = session();
        session.config.pacing_mode = PacingMode::Jitter;
        let clock = FrameClock::default();
        let system = system();
        let status = OverlayStatus {
            system: &system,
            session: &session,
            clock: &clock,
            controls: &[],
        };
        let lines = OverlayLayout::default().status_lines(&status);
        assert!(texts(&lines).contains(&"Frame time: 0.00 ms"));
    }

    #[test]
    fn test_paused_adds_gap_and_status() {
        let mut session = session();
        session.config.paused = true;
        session.language = Language::Zh;
        let clock = FrameClock::default();
        let system = system();
        let status = OverlayStatus {
            system: &system,
            session: &session,
            clock: &clock,
            controls: &[],
        };
        let lines = OverlayLayout::default().status_lines(&status);
        let last = &lines[lines.len() - 1];
        assert_eq!(last.text, "状态: 已暂停");
        assert_eq!(last.color, Color::PAUSED);
        assert!(lines[lines.len() - 2].extra_gap);
    }

    #[test]
    fn test_control_rows_follow_hints() {
        let hints = vec![
            ControlHint {
                keys: "ESC".into(),
                action: Action::Exit,
            },
            ControlHint {
                keys: "F7/F8".into(),
                action: Action::DecreaseMaxFps,
            },
        ];
        let rows = OverlayLayout::control_rows(Language::En, &hints);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], (String::new(), "Controls".to_owned()));
        assert_eq!(rows[2], ("F7/F8".to_owned(), "Range max -/+".to_owned()));
    }
}
