//! Overlay palette.
//!
//! Near-white body text, a distinct hue per section header.

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Solid white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Body text.
    pub const BODY: Self = Self::rgb(0.92, 0.94, 0.96);
    /// "GPU Info" header.
    pub const GPU_HEADER: Self = Self::rgb(0.30, 0.95, 0.50);
    /// "Monitor" header.
    pub const MONITOR_HEADER: Self = Self::rgb(0.40, 0.80, 1.00);
    /// "Runtime" header.
    pub const RUNTIME_HEADER: Self = Self::rgb(1.00, 0.75, 0.30);
    /// "Controls" header.
    pub const CONTROLS_HEADER: Self = Self::rgb(1.00, 0.90, 0.40);
    /// Paused indicator.
    pub const PAUSED: Self = Self::rgb(1.0, 0.2, 0.2);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from RGB values (0-1) with full alpha.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// RGB part as an array.
    #[must_use]
    pub const fn to_rgb(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Red at 0 fps shading to green at 120 fps and above.
    #[must_use]
    pub fn for_fps(fps: f64) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let ratio = (fps / 120.0).clamp(0.0, 1.0) as f32;
        Self::rgb(1.0 - ratio, ratio, 0.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_color_ramp() {
        assert_eq!(Color::for_fps(0.0), Color::rgb(1.0, 0.0, 0.2));
        assert_eq!(Color::for_fps(60.0), Color::rgb(0.5, 0.5, 0.2));
        assert_eq!(Color::for_fps(500.0), Color::rgb(0.0, 1.0, 0.2));
    }
}
