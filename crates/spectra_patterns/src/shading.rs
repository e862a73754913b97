//! Shader-style scalar and vector helpers.
//!
//! These follow GPU semantics rather than Rust's: [`fract`] is `x - floor(x)`
//! (always non-negative), [`modulo`] takes the sign of the divisor and
//! [`smoothstep`] accepts reversed edges. Everything is `f32` so CPU and GPU
//! agree on the same lattice cells.

use std::ops::{Add, Mul, Sub};

/// Linear RGB colour with channels nominally in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rgb {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
}

impl Rgb {
    /// Black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    /// White.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Creates a colour.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Grey level `v` on all channels.
    #[must_use]
    pub const fn gray(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Applies `f` per channel.
    #[must_use]
    pub fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b))
    }

    /// Per-channel maximum.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.r.max(other.r), self.g.max(other.g), self.b.max(other.b))
    }

    /// Clamps every channel into `[0, 1]`.
    #[must_use]
    pub fn saturate(self) -> Self {
        self.map(saturate)
    }

    /// Channels as an array.
    #[must_use]
    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// True when every channel lies in `[0, 1]`.
    #[must_use]
    pub fn is_normalized(self) -> bool {
        self.to_array().iter().all(|c| (0.0..=1.0).contains(c))
    }
}

impl Add for Rgb {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl Sub for Rgb {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.r - rhs.r, self.g - rhs.g, self.b - rhs.b)
    }
}

impl Mul<f32> for Rgb {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

/// Two-component vector for pixel and uv math.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    /// X.
    pub x: f32,
    /// Y.
    pub y: f32,
}

impl Vec2 {
    /// Creates a vector.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Same value on both axes.
    #[must_use]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v)
    }

    /// Dot product.
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Per-component floor.
    #[must_use]
    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }

    /// Per-component [`fract`].
    #[must_use]
    pub fn fract(self) -> Self {
        Self::new(fract(self.x), fract(self.y))
    }

    /// `atan2(y, x)`.
    #[must_use]
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Per-component product.
    #[must_use]
    pub fn scale(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Add<f32> for Vec2 {
    type Output = Self;

    fn add(self, rhs: f32) -> Self {
        Self::new(self.x + rhs, self.y + rhs)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Sub<f32> for Vec2 {
    type Output = Self;

    fn sub(self, rhs: f32) -> Self {
        Self::new(self.x - rhs, self.y - rhs)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// `x - floor(x)`.
#[must_use]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Floored modulo, sign of `y`.
#[must_use]
pub fn modulo(x: f32, y: f32) -> f32 {
    x - y * (x / y).floor()
}

/// Clamp into `[0, 1]`.
#[must_use]
pub fn saturate(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// `0` when `x < edge`, else `1`.
#[must_use]
pub fn step(edge: f32, x: f32) -> f32 {
    if x < edge {
        0.0
    } else {
        1.0
    }
}

/// Hermite ramp from `edge0` to `edge1`; reversed edges invert the ramp.
#[must_use]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = saturate((x - edge0) / (edge1 - edge0));
    t * t * (3.0 - 2.0 * t)
}

/// Linear blend.
#[must_use]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Linear blend of colours.
#[must_use]
pub fn mix_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    Rgb::new(mix(a.r, b.r, t), mix(a.g, b.g, t), mix(a.b, b.b, t))
}

/// Sine hash: `fract(sin(x) * scale)`.
#[must_use]
pub fn sine_hash(x: f32, scale: f32) -> f32 {
    fract(x.sin() * scale)
}

/// Lattice hash of a cell: `fract(sin(dot(cell, k) + phase) * scale)`.
#[must_use]
pub fn lattice_hash(cell: Vec2, k: Vec2, phase: f32, scale: f32) -> f32 {
    sine_hash(cell.dot(k) + phase, scale)
}

/// HSV (all in `[0, 1]`) to RGB.
#[must_use]
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    let channel = |offset: f32| saturate((fract(h + offset) * 6.0 - 3.0).abs() - 1.0);
    let rgb = Rgb::new(channel(0.0), channel(2.0 / 3.0), channel(1.0 / 3.0));
    mix_rgb(Rgb::WHITE, rgb, s) * v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fract_is_non_negative() {
        assert!((fract(-0.25) - 0.75).abs() < 1e-6);
        assert!((fract(2.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_modulo_follows_divisor_sign() {
        assert!((modulo(-1.0, 2.0) - 1.0).abs() < 1e-6);
        assert!((modulo(5.0, 3.0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_smoothstep_reversed_edges() {
        assert_eq!(smoothstep(0.15, 0.05, 0.0), 1.0);
        assert_eq!(smoothstep(0.15, 0.05, 0.2), 0.0);
        assert!((smoothstep(0.15, 0.05, 0.1) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_step_edge_inclusive() {
        assert_eq!(step(1.0, 1.0), 1.0);
        assert_eq!(step(1.0, 0.999), 0.0);
    }

    #[test]
    fn test_hsv_primaries() {
        let red = hsv_to_rgb(0.0, 1.0, 1.0);
        assert!((red.r - 1.0).abs() < 1e-6 && red.g.abs() < 1e-6 && red.b.abs() < 1e-6);
        let green = hsv_to_rgb(1.0 / 3.0, 1.0, 1.0);
        assert!(green.g > 0.999 && green.r < 1e-5);
        assert_eq!(hsv_to_rgb(0.42, 0.0, 0.5), Rgb::gray(0.5));
    }
}
