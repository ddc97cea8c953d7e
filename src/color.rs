//! Color type and 8-bit packing conversions.
//!
//! Colors carry four floating components in `[0, 1]` so that blending
//! arithmetic (coverage scaling, lerps between samples) stays exact until a
//! pixel is stored. Packing to 8-bit channels is lossy and rounds/clamps to
//! `[0, 255]`.

use std::ops::{Add, Mul};

/// RGBA color with floating-point components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    /// Red component (0.0-1.0).
    pub r: f32,
    /// Green component (0.0-1.0).
    pub g: f32,
    /// Blue component (0.0-1.0).
    pub b: f32,
    /// Alpha component (0.0-1.0, 1.0 = fully opaque).
    pub a: f32,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 1.0).
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Unpack from 8-bit RGBA channels.
    #[must_use]
    pub fn from_rgba8(texel: [u8; 4]) -> Self {
        Self::new(
            f32::from(texel[0]) / 255.0,
            f32::from(texel[1]) / 255.0,
            f32::from(texel[2]) / 255.0,
            f32::from(texel[3]) / 255.0,
        )
    }

    /// Pack into 8-bit RGBA channels, rounding and clamping to `[0, 255]`.
    #[must_use]
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            channel_to_u8(self.a),
        ]
    }

    /// Linear interpolation between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        self * (1.0 - t) + other * t
    }
}

/// Round and clamp a normalized channel to an 8-bit value.
#[inline]
fn channel_to_u8(c: f32) -> u8 {
    (255.0 * c.clamp(0.0, 1.0)).round() as u8
}

impl Mul<f32> for Color {
    type Output = Self;

    fn mul(self, s: f32) -> Self {
        Self::new(self.r * s, self.g * s, self.b * s, self.a * s)
    }
}

impl Mul<Color> for f32 {
    type Output = Color;

    fn mul(self, c: Color) -> Color {
        c * self
    }
}

impl Add for Color {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.r + other.r,
            self.g + other.g,
            self.b + other.b,
            self.a + other.a,
        )
    }
}
