//! 10-bit quantization.

use crate::shading::{saturate, Rgb};

/// Highest 10-bit code.
pub const TEN_BIT_MAX: f32 = 1023.0;

/// Rounds `v` to the nearest of 1024 levels in `[0, 1]`.
///
/// Input is clamped first, so the result is always a valid level.
#[must_use]
pub fn quantize_10bit(v: f32) -> f32 {
    saturate((saturate(v) * TEN_BIT_MAX + 0.5).floor() / TEN_BIT_MAX)
}

/// 10-bit code for `v`, `0..=1023`.
#[must_use]
pub fn code_10bit(v: f32) -> u16 {
    // saturate keeps the product inside u16
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let code = (saturate(v) * TEN_BIT_MAX + 0.5).floor() as u16;
    code
}

/// [`quantize_10bit`] on every channel.
#[must_use]
pub fn quantize_rgb(c: Rgb) -> Rgb {
    c.map(quantize_10bit)
}
