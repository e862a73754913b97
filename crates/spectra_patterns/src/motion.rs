//! Motion and temporal diagnostics.
//!
//! Unquantized; these exercise response time, persistence and temporal
//! dithering rather than bit depth.

use spectra_core::AUXILIARY_PATTERN_COUNT;

use crate::catalog::{PatternEntry, PatternInput};
use crate::charts::{checker_parity, coarse_checker};
use crate::entropy::blue_noise_field;
use crate::quantize::{code_10bit, TEN_BIT_MAX};
use crate::shading::{fract, mix, mix_rgb, modulo, smoothstep, step, Rgb, Vec2};

/// Temporal flip rate of the 1px checker and bit-plane flicker, Hz.
pub const FLIP_RATE_HZ: f32 = 120.0;

/// Auxiliary patterns in index order.
pub static AUXILIARY_PATTERNS: [PatternEntry; AUXILIARY_PATTERN_COUNT] = [
    PatternEntry::new("Aux: Moving Bar", "辅助: 移动亮条", moving_bar),
    PatternEntry::new("Aux: UFO Motion", "辅助: UFO 运动", ufo_motion),
    PatternEntry::new("Aux: 1px Temporal Flip", "辅助: 1px 反相", temporal_flip),
    PatternEntry::new("Aux: Zone Plate", "辅助: Zone Plate", zone_plate),
    PatternEntry::new("Aux: Bit-Plane Flicker", "辅助: 位平面闪烁", bit_plane_flicker),
    PatternEntry::new("Aux: Color Checker Cycle", "辅助: 彩色棋盘轮换", color_checker_cycle),
    PatternEntry::new("Aux: Blue-Noise Scroll", "辅助: 蓝噪声滚动", blue_noise_field),
    PatternEntry::new("Aux: Radial Sweep", "辅助: 径向扫频", radial_sweep),
    PatternEntry::new("Aux: Wedge Spin", "辅助: 旋转楔形", wedge_spin),
    PatternEntry::new("Aux: Checker Coarse", "辅助: 粗棋盘", coarse_checker),
];

/// `0` or `1`, toggling `FLIP_RATE_HZ` times a second.
fn flip_phase(t: f32) -> f32 {
    modulo((t * FLIP_RATE_HZ).floor(), 2.0)
}

fn moving_bar(input: &PatternInput) -> Rgb {
    let pos = fract(input.time * 0.25);
    let dx = (input.uv.x - pos).abs();
    // circular distance so the bar wraps at the edge
    let dx = dx.min(1.0 - dx);
    let half_width = 0.05;
    let bar = step(dx, half_width);
    let edge = smoothstep(half_width, half_width - 0.01, dx);
    let body = mix_rgb(Rgb::BLACK, Rgb::WHITE, bar);
    mix_rgb(body, Rgb::new(1.0, 1.0, 0.3), edge * 0.6)
}

fn ufo_motion(input: &PatternInput) -> Rgb {
    const ROWS: usize = 3;
    let uv = input.uv;
    let mut color = Rgb::gray(0.02);
    for row in 0..ROWS {
        #[allow(clippy::cast_precision_loss)]
        let (i, n) = (row as f32, ROWS as f32);
        let y = mix(0.2, 0.8, (i + 0.5) / n);
        let speed = mix(0.6, 2.5, i / (n - 1.0).max(1.0));
        let center = Vec2::new(fract(input.time * speed), y);

        let mut d = uv - center;
        d.x *= 2.0;
        let body = smoothstep(0.08, 0.075, d.length());
        let dome = smoothstep(0.05, 0.045, (uv - (center + Vec2::new(0.0, 0.035))).length());
        let trail = (-(uv.x - center.x).abs() * 30.0).exp()
            * smoothstep(0.02, 0.0, (uv.y - y).abs());

        let hull = mix_rgb(Rgb::gray(0.1), Rgb::gray(0.9), body);
        let canopy = mix_rgb(Rgb::new(0.1, 0.8, 1.0), Rgb::WHITE, dome) * (0.9 * body.max(dome));
        let flame = Rgb::new(1.0, 0.8, 0.2) * trail;
        color = color.max(hull * body.max(dome)).max(canopy).max(flame);
    }
    color
}

fn temporal_flip(input: &PatternInput) -> Rgb {
    let cb = checker_parity(input.pixel());
    Rgb::gray((cb - flip_phase(input.time)).abs())
}

fn zone_plate(input: &PatternInput) -> Rgb {
    let c = (input.uv - 0.5) * 2.0;
    let phase = 90.0 * c.dot(c) + input.time * 1.2;
    let wave = |offset: f32| 0.5 + 0.5 * (phase + offset).sin();
    Rgb::new(wave(0.0), wave(2.1), wave(4.2))
}

fn bit_plane_flicker(input: &PatternInput) -> Rgb {
    let t = input.time;
    // round-robin over the five low bits, one step every half second
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let bit = modulo((t * 2.0).floor(), 5.0) as u16;
    let flipping = flip_phase(t) > 0.5;
    let flip = |value: f32, plane: u16| {
        let code = code_10bit(value);
        let code = if flipping { code ^ (1 << plane) } else { code };
        (f32::from(code) / TEN_BIT_MAX).clamp(0.0, 1.0)
    };
    let uv = input.uv;
    Rgb::new(
        flip(uv.x, bit),
        flip(uv.y, (bit + 1) % 5),
        flip(fract(uv.x + uv.y), (bit + 2) % 5),
    )
}

fn color_checker_cycle(input: &PatternInput) -> Rgb {
    let cb = checker_parity(input.uv * 24.0);
    let phase = modulo((input.time * 2.0).floor(), 3.0);
    let color = if phase < 0.5 {
        Rgb::new(1.0, 0.0, 0.0)
    } else if phase < 1.5 {
        Rgb::new(0.0, 1.0, 0.0)
    } else {
        Rgb::new(0.0, 0.0, 1.0)
    };
    mix_rgb(Rgb::BLACK, color, cb)
}

fn radial_sweep(input: &PatternInput) -> Rgb {
    let t = input.time;
    let r = (input.uv - 0.5).length();
    let k = mix(10.0, 250.0, 0.5 + 0.5 * (t * 0.7).sin());
    Rgb::gray(0.5 + 0.5 * (k * r + t * 2.0).sin())
}

fn wedge_spin(input: &PatternInput) -> Rgb {
    let angle = (input.uv - 0.5).angle() + input.time * 0.8;
    if (angle * 120.0).sin() > 0.0 {
        Rgb::WHITE
    } else {
        Rgb::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RES: [f32; 2] = [1920.0, 1080.0];

    fn at(uv: [f32; 2], t: f32) -> PatternInput {
        PatternInput::new(uv, t, RES)
    }

    #[test]
    fn test_moving_bar_wraps_at_edge() {
        // bar centred at x = 0 covers both edges
        assert!(moving_bar(&at([0.99, 0.5], 0.0)).r > 0.99);
        assert!(moving_bar(&at([0.01, 0.5], 0.0)).r > 0.99);
        assert_eq!(moving_bar(&at([0.5, 0.5], 0.0)), Rgb::BLACK);
    }

    #[test]
    fn test_temporal_flip_inverts_each_tick() {
        let uv = [0.5 / 1920.0, 0.5 / 1080.0];
        let a = temporal_flip(&at(uv, 0.001));
        let b = temporal_flip(&at(uv, 1.5 / FLIP_RATE_HZ));
        assert_eq!(a.r + b.r, 1.0);
    }

    #[test]
    fn test_bit_plane_flicker_touches_one_bit() {
        let uv = [0.5, 0.25];
        let steady = bit_plane_flicker(&at(uv, 0.001));
        let flipped = bit_plane_flicker(&at(uv, 1.5 / FLIP_RATE_HZ));
        let before = code_10bit(steady.r);
        let after = code_10bit(flipped.r);
        assert_eq!((before ^ after).count_ones(), 1);
        assert_eq!(before ^ after, 1);
    }

    #[test]
    fn test_color_checker_cycles_channels() {
        // cell (0, 1) has odd parity
        let uv = [0.5 / 24.0, 1.5 / 24.0];
        assert_eq!(color_checker_cycle(&at(uv, 0.0)), Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(color_checker_cycle(&at(uv, 0.6)), Rgb::new(0.0, 1.0, 0.0));
        assert_eq!(color_checker_cycle(&at(uv, 1.1)), Rgb::new(0.0, 0.0, 1.0));
        assert_eq!(color_checker_cycle(&at(uv, 1.6)), Rgb::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ufo_background_is_dark() {
        let far = ufo_motion(&at([0.5, 0.02], 0.3));
        assert_eq!(far, Rgb::gray(0.02));
    }

    #[test]
    fn test_ufo_body_is_bright() {
        // row 0 ship sits at x = fract(0.6 t), y = 0.3
        let t = 0.5;
        let ship = ufo_motion(&at([0.3, 0.3], t));
        assert!(ship.r > 0.8);
    }
}
