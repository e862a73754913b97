//! Static calibration charts.
//!
//! None of these read the clock; the 32px grid's background "breathing" is
//! evaluated at `t = 0` so the chart stays still.

use spectra_core::STATIC_PATTERN_COUNT;

use crate::catalog::{PatternEntry, PatternInput};
use crate::shading::{modulo, smoothstep, step, Rgb, Vec2};

/// Static charts in index order.
pub static STATIC_PATTERNS: [PatternEntry; STATIC_PATTERN_COUNT] = [
    PatternEntry::new("Color Bars", "彩条", color_bars),
    PatternEntry::new("Gray Gradient", "灰阶渐变", gray_gradient),
    PatternEntry::new("16-step Gray", "16阶灰条", gray_steps),
    PatternEntry::new("Fine Checker (1px)", "细棋盘(1px)", fine_checker),
    PatternEntry::new("Coarse Checker", "粗棋盘", coarse_checker),
    PatternEntry::new("Grid 32px", "网格32px", grid_32),
    PatternEntry::new("Grid 8px", "网格8px", grid_8),
    PatternEntry::new("RGB Stripes", "RGB竖条", rgb_stripes),
    PatternEntry::new("Cross + Thirds", "十字+三分线", cross_thirds),
    PatternEntry::new("Black", "纯黑", black),
    PatternEntry::new("White", "纯白", white),
    PatternEntry::new("Red", "纯红", red),
    PatternEntry::new("Green", "纯绿", green),
    PatternEntry::new("Blue", "纯蓝", blue),
    PatternEntry::new("50% Gray", "50%灰", mid_gray),
    PatternEntry::new("Siemens Star", "Siemens Star", siemens_star),
    PatternEntry::new("Horizontal Wedge", "水平楔形", horizontal_wedge),
    PatternEntry::new("Vertical Wedge", "垂直楔形", vertical_wedge),
    PatternEntry::new("Concentric Rings", "同心圆环", concentric_rings),
    PatternEntry::new("Dot Grid", "点栅格", dot_grid),
    PatternEntry::new("Gamma Checker", "Gamma Checker", gamma_checker),
];

const BARS: [Rgb; 8] = [
    Rgb::new(1.0, 1.0, 1.0),
    Rgb::new(1.0, 1.0, 0.0),
    Rgb::new(0.0, 1.0, 1.0),
    Rgb::new(0.0, 1.0, 0.0),
    Rgb::new(1.0, 0.0, 1.0),
    Rgb::new(1.0, 0.0, 0.0),
    Rgb::new(0.0, 0.0, 1.0),
    Rgb::new(0.0, 0.0, 0.0),
];

/// Center and thirds guide positions.
const GUIDES: [f32; 3] = [0.5, 1.0 / 3.0, 2.0 / 3.0];

fn binary(on: bool) -> Rgb {
    if on {
        Rgb::WHITE
    } else {
        Rgb::BLACK
    }
}

/// Column index `floor(x * n)` clamped to `0..n`.
fn band(x: f32, n: usize) -> usize {
    #[allow(clippy::cast_precision_loss)]
    let scaled = (x * n as f32).floor();
    // negative and NaN map to 0 through the saturating cast
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let idx = scaled as usize;
    idx.min(n - 1)
}

fn color_bars(input: &PatternInput) -> Rgb {
    BARS[band(input.uv.x, BARS.len())]
}

fn gray_gradient(input: &PatternInput) -> Rgb {
    Rgb::gray(input.uv.x.clamp(0.0, 1.0))
}

fn gray_steps(input: &PatternInput) -> Rgb {
    let steps = 16.0;
    Rgb::gray(((input.uv.x * steps).floor() + 0.5) / steps)
}

/// Checkerboard parity of a cell lattice, `0` or `1`.
pub(crate) fn checker_parity(cell: Vec2) -> f32 {
    modulo(cell.x.floor() + cell.y.floor(), 2.0)
}

fn fine_checker(input: &PatternInput) -> Rgb {
    Rgb::gray(checker_parity(input.pixel()))
}

/// 16×16 black/white checker over the whole surface.
pub(crate) fn coarse_checker(input: &PatternInput) -> Rgb {
    Rgb::gray(checker_parity(input.uv * 16.0))
}

fn grid(input: &PatternInput, spacing: f32, background: f32) -> Rgb {
    let cell = (input.pixel() * (1.0 / spacing)).fract();
    let line_width = 1.0 / spacing;
    if cell.x < line_width || cell.y < line_width {
        Rgb::WHITE
    } else {
        Rgb::gray(background)
    }
}

fn grid_32(input: &PatternInput) -> Rgb {
    // breathing term 0.05 * sin(0.6 t) frozen at t = 0
    grid(input, 32.0, 0.10)
}

fn grid_8(input: &PatternInput) -> Rgb {
    grid(input, 8.0, 0.15)
}

fn rgb_stripes(input: &PatternInput) -> Rgb {
    match band(input.uv.x, 90) % 3 {
        0 => Rgb::new(1.0, 0.0, 0.0),
        1 => Rgb::new(0.0, 1.0, 0.0),
        _ => Rgb::new(0.0, 0.0, 1.0),
    }
}

fn cross_thirds(input: &PatternInput) -> Rgb {
    let uv = input.uv;
    let res = input.resolution;
    let line_width = 1.0;
    let columns: f32 = GUIDES
        .iter()
        .map(|&c| step((uv.x - c).abs() * res.x, line_width))
        .sum();
    let rows: f32 = GUIDES
        .iter()
        .map(|&c| step((uv.y - c).abs() * res.y, line_width))
        .sum();
    Rgb::gray((columns + rows).clamp(0.0, 1.0))
}

/// Black solid; also the neutral fallback entry.
pub(crate) fn black(_: &PatternInput) -> Rgb {
    Rgb::BLACK
}

fn white(_: &PatternInput) -> Rgb {
    Rgb::WHITE
}

fn red(_: &PatternInput) -> Rgb {
    Rgb::new(1.0, 0.0, 0.0)
}

fn green(_: &PatternInput) -> Rgb {
    Rgb::new(0.0, 1.0, 0.0)
}

fn blue(_: &PatternInput) -> Rgb {
    Rgb::new(0.0, 0.0, 1.0)
}

fn mid_gray(_: &PatternInput) -> Rgb {
    Rgb::gray(0.5)
}

fn siemens_star(input: &PatternInput) -> Rgb {
    let angle = (input.uv - 0.5).angle();
    binary((angle * 100.0).cos() > 0.0)
}

fn horizontal_wedge(input: &PatternInput) -> Rgb {
    let x = input.uv.x;
    binary((400.0 * x * x).sin() > 0.0)
}

fn vertical_wedge(input: &PatternInput) -> Rgb {
    let y = input.uv.y;
    binary((400.0 * y * y).sin() > 0.0)
}

fn concentric_rings(input: &PatternInput) -> Rgb {
    let c = input.uv - 0.5;
    binary((120.0 * c.dot(c)).sin() > 0.0)
}

fn dot_grid(input: &PatternInput) -> Rgb {
    let g = (input.pixel() * (1.0 / 16.0)).fract();
    let d = Vec2::new(g.x.min(1.0 - g.x), g.y.min(1.0 - g.y));
    let r = ((d - 0.5 / 16.0) * 16.0).length();
    Rgb::gray(smoothstep(0.15, 0.05, r))
}

fn gamma_checker(input: &PatternInput) -> Rgb {
    let steps = 8.0;
    let g = ((input.uv.x * steps).floor() + 0.5) / steps;
    let amplitude = if checker_parity(input.uv * 16.0) > 0.5 {
        0.15
    } else {
        -0.15
    };
    Rgb::gray((g + amplitude * (1.0 - g) * g).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(uv: (f32, f32)) -> PatternInput {
        PatternInput::new([uv.0, uv.1], 0.0, [1920.0, 1080.0])
    }

    #[test]
    fn test_color_bar_order() {
        assert_eq!(color_bars(&at((0.01, 0.5))), Rgb::WHITE);
        assert_eq!(color_bars(&at((0.3, 0.5))), Rgb::new(0.0, 1.0, 1.0));
        assert_eq!(color_bars(&at((0.4, 0.5))), Rgb::new(0.0, 1.0, 0.0));
        assert_eq!(color_bars(&at((0.99, 0.5))), Rgb::BLACK);
        assert_eq!(color_bars(&at((1.0, 0.5))), Rgb::BLACK);
    }

    #[test]
    fn test_fine_checker_alternates_per_pixel() {
        let a = fine_checker(&at((0.5 / 1920.0, 0.5 / 1080.0)));
        let b = fine_checker(&at((1.5 / 1920.0, 0.5 / 1080.0)));
        assert_ne!(a, b);
    }

    #[test]
    fn test_gray_steps_are_centered() {
        assert_eq!(gray_steps(&at((0.0, 0.0))), Rgb::gray(0.5 / 16.0));
        assert_eq!(gray_steps(&at((0.999, 0.0))), Rgb::gray(15.5 / 16.0));
    }

    #[test]
    fn test_cross_lines_hit_center() {
        assert_eq!(cross_thirds(&at((0.5, 0.2))), Rgb::WHITE);
        assert_eq!(cross_thirds(&at((0.1, 0.1))), Rgb::BLACK);
    }

    #[test]
    fn test_dot_grid_lights_lattice_points() {
        // pixel (0.5, 0.5) sits next to a lattice point
        let near = dot_grid(&at((0.5 / 1920.0, 0.5 / 1080.0)));
        let far = dot_grid(&at((8.0 / 1920.0, 8.0 / 1080.0)));
        assert!(near.r > 0.9);
        assert!(far.r < 0.01);
    }

    #[test]
    fn test_gamma_checker_brackets_step() {
        let v = gamma_checker(&at((0.01, 0.01))).r;
        let base = 0.5 / 8.0;
        assert!((v - base).abs() > 0.0);
        assert!((v - base).abs() <= 0.15 * (1.0 - base) * base + 1e-6);
    }
}
