//! High-entropy patterns.
//!
//! Each channel is drawn from its own sine-hash lattice (or a smooth gamut
//! sweep) so neighbouring cells decorrelate and the stream compresses poorly.
//! Every output channel is 10-bit quantized. Hash constants are tuned by eye
//! for decorrelation; keep them exact.

use spectra_core::DYNAMIC_PATTERN_COUNT;

use crate::catalog::{PatternEntry, PatternInput};
use crate::quantize::quantize_rgb;
use crate::shading::{fract, hsv_to_rgb, lattice_hash, mix, mix_rgb, sine_hash, Rgb, Vec2};

/// High-entropy patterns in index order.
pub static DYNAMIC_PATTERNS: [PatternEntry; DYNAMIC_PATTERN_COUNT] = [
    PatternEntry::new("HE: Channel Hash", "高熵: 通道哈希", channel_hash),
    PatternEntry::new("HE: Multi-Scale Hash", "高熵: 多尺度哈希", multi_scale_hash),
    PatternEntry::new("HE: Spectral Mix", "高熵: 频谱混合", spectral_mix),
    PatternEntry::new("HE: Blue-Noise Scroll", "高熵: 蓝噪声滚动", blue_noise),
    PatternEntry::new("HE: Radial Turbulence", "高熵: 径向扰动", radial_turbulence),
    PatternEntry::new("HE: Zoneplate Dynamic", "高熵: 区域板动态", zoneplate_dynamic),
    PatternEntry::new("HE: Mixed Field", "高熵: 混合场", mixed_field),
    PatternEntry::new("HE: HSV Full-Gamut", "高熵: HSV 全色域", hsv_full_gamut),
    PatternEntry::new("HE: Spectral Gradient", "高熵: 谱梯度混合", spectral_gradient),
    PatternEntry::new("HE: Lissajous Field", "高熵: Lissajous 色域", lissajous_field),
    PatternEntry::new("HE: HSV Wheel", "高熵: HSV 色轮", hsv_wheel),
    PatternEntry::new("HE: Hue Sweep", "高熵: 色相扫动", hue_sweep),
    PatternEntry::new("HE: Tri-Sine Gamut", "高熵: 三正弦色域", tri_sine_gamut),
    PatternEntry::new("HE: YUV Sweep", "高熵: YUV 扫动", yuv_sweep),
];

/// Three independent per-pixel lattices.
fn channel_hashes(input: &PatternInput) -> [f32; 3] {
    let cell = input.pixel().floor();
    let t = input.time;
    [
        lattice_hash(cell, Vec2::new(12.9898, 78.233), t * 19.19, 43_758.545_3),
        lattice_hash(cell + 13.0, Vec2::new(39.3468, 11.135), t * 23.17, 24_634.634_5),
        lattice_hash(cell + 71.0, Vec2::new(9.154, 27.983), t * 29.41, 17_431.371_1),
    ]
}

/// Two-octave scrolling noise shared with the auxiliary scroll.
pub(crate) fn blue_noise_field(input: &PatternInput) -> Rgb {
    let t = input.time;
    let p = input.pixel() * 0.5 + Vec2::new(t * 60.0, t * 47.0);
    let n1 = lattice_hash(p.floor(), Vec2::new(12.9898, 78.233), 0.0, 43_758.545_3);
    let n2 = lattice_hash((p + 23.0).floor(), Vec2::new(39.3468, 11.135), 0.0, 24_634.634_5);
    let v = (n1 * 0.7 + n2 * 0.3).clamp(0.0, 1.0);
    Rgb::new(fract(v + 0.33), fract(v + 0.66), v)
}

fn channel_hash(input: &PatternInput) -> Rgb {
    let [h1, h2, h3] = channel_hashes(input);
    quantize_rgb(Rgb::new(h1, h2, h3))
}

fn multi_scale_hash(input: &PatternInput) -> Rgb {
    let [h1, h2, h3] = channel_hashes(input);
    let p = input.pixel();
    let t = input.time;
    let m1 = lattice_hash((p * 0.5).floor(), Vec2::new(15.7, 47.3), t * 13.3, 31_871.1);
    let m2 = lattice_hash((p * 2.7).floor(), Vec2::new(61.3, 21.9), t * 31.7, 55_147.3);
    quantize_rgb(Rgb::new(mix(h1, m1, 0.5), mix(h2, m2, 0.5), mix(h3, h1, 0.5)))
}

fn spectral_mix(input: &PatternInput) -> Rgb {
    let Vec2 { x, y } = input.uv;
    let t = input.time;
    quantize_rgb(Rgb::new(
        sine_hash(x * 123.0 + y * 173.0 + t * 2.17, 43_758.3),
        sine_hash(x * 231.0 + y * 119.0 - t * 1.93, 31_871.7),
        sine_hash(x * 199.0 + y * 157.0 + t * 2.71, 27_493.9),
    ))
}

fn blue_noise(input: &PatternInput) -> Rgb {
    quantize_rgb(blue_noise_field(input))
}

fn radial_turbulence(input: &PatternInput) -> Rgb {
    let d = (input.uv - 0.5) * 2.0;
    let v = sine_hash(d.length() * 333.0 + d.angle() * 177.0 + input.time * 3.0, 32_768.0);
    quantize_rgb(Rgb::new(v, fract(v + 0.37), fract(v + 0.73)))
}

fn zoneplate_dynamic(input: &PatternInput) -> Rgb {
    let d = (input.uv - 0.5) * 2.0;
    let base = 0.5 + 0.5 * (90.0 * d.dot(d) + input.time * 1.8).sin();
    quantize_rgb(Rgb::new(base, fract(base + 0.31), fract(base + 0.62)))
}

fn mixed_field(input: &PatternInput) -> Rgb {
    let p = input.pixel();
    let t = input.time;
    quantize_rgb(Rgb::new(
        sine_hash(p.dot(Vec2::new(0.251, 0.391)) + t * 2.3, 51_413.0),
        sine_hash(p.dot(Vec2::new(0.173, 0.613)) - t * 1.7, 37_199.0),
        sine_hash(p.dot(Vec2::new(0.421, 0.287)) + t * 3.1, 29_761.0),
    ))
}

fn hsv_full_gamut(input: &PatternInput) -> Rgb {
    let h = fract(input.uv.x + input.uv.y + input.time * 0.05);
    quantize_rgb(hsv_to_rgb(h, 0.9, 0.9))
}

fn spectral_gradient(input: &PatternInput) -> Rgb {
    let w = fract(input.uv.x * 0.37 + input.uv.y * 0.41 + input.time * 0.10);
    quantize_rgb(mix_rgb(Rgb::new(1.0, 0.0, 0.5), Rgb::new(0.0, 1.0, 1.0), w))
}

fn lissajous_field(input: &PatternInput) -> Rgb {
    let Vec2 { x, y } = input.uv;
    let t = input.time;
    let wave = |fx: f32, px: f32, fy: f32, py: f32| {
        (x * fx + t * px).sin() * (y * fy + t * py).sin() * 0.5 + 0.5
    };
    quantize_rgb(Rgb::new(
        wave(157.0, 2.31, 133.0, -1.77),
        wave(141.0, -2.07, 149.0, 1.61),
        wave(163.0, 2.83, 127.0, -1.29),
    ))
}

fn hsv_wheel(input: &PatternInput) -> Rgb {
    let d = (input.uv - 0.5) * 2.0;
    let h = fract(d.angle() / 6.283_185_3 + 1.0);
    let radius = d.length().clamp(0.0, 1.0);
    quantize_rgb(hsv_to_rgb(h, 0.9, 1.0 - radius * 0.2))
}

fn hue_sweep(input: &PatternInput) -> Rgb {
    let h = fract(input.uv.x + input.time * 0.05);
    quantize_rgb(hsv_to_rgb(h, 0.85, 0.95))
}

fn tri_sine_gamut(input: &PatternInput) -> Rgb {
    let Vec2 { x, y } = input.uv;
    let phase = input.time * 0.35;
    let wave = |fx: f32, fy: f32, offset: f32| {
        0.5 + 0.5 * (6.28318 * (x * fx + y * fy) + phase + offset).sin()
    };
    quantize_rgb(Rgb::new(
        wave(0.23, 0.31, 0.0),
        wave(0.29, 0.17, 2.094),
        wave(0.19, 0.27, 4.188),
    ))
}

fn yuv_sweep(input: &PatternInput) -> Rgb {
    let luma = 0.7;
    let u = (input.uv.x * 3.0 + input.time * 0.4).sin() * 0.5;
    let v = (input.uv.y * 3.0 - input.time * 0.5).sin() * 0.5;
    quantize_rgb(Rgb::new(
        (luma + 1.139_83 * v).clamp(0.0, 1.0),
        (luma - 0.394_65 * u - 0.580_60 * v).clamp(0.0, 1.0),
        (luma + 2.032_11 * u).clamp(0.0, 1.0),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantize::quantize_10bit;

    const RES: [f32; 2] = [1920.0, 1080.0];

    #[test]
    fn test_every_channel_is_a_10bit_level() {
        for entry in &DYNAMIC_PATTERNS {
            for i in 0..64 {
                let uv = [i as f32 / 64.0, 1.0 - i as f32 / 71.0];
                let c = (entry.eval)(&PatternInput::new(uv, i as f32 * 0.37, RES));
                for channel in c.to_array() {
                    assert_eq!(quantize_10bit(channel), channel, "{}", entry.name_en);
                }
            }
        }
    }

    #[test]
    fn test_channel_hash_decorrelates_neighbours() {
        let a = channel_hash(&PatternInput::new([0.0, 0.0], 0.0, RES));
        let b = channel_hash(&PatternInput::new([1.0 / 1920.0, 0.0], 0.0, RES));
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_constant_within_cell() {
        let a = channel_hash(&PatternInput::new([0.1 / 1920.0, 0.2 / 1080.0], 0.0, RES));
        let b = channel_hash(&PatternInput::new([0.8 / 1920.0, 0.7 / 1080.0], 0.0, RES));
        assert_eq!(a, b);
    }

    #[test]
    fn test_yuv_center_is_neutral() {
        let c = yuv_sweep(&PatternInput::new([0.0, 0.0], 0.0, RES));
        assert_eq!(c, Rgb::gray(quantize_10bit(0.7)));
    }
}
