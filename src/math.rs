//! Vector and matrix primitives for the transform pipeline.
//!
//! 2D points are rasterized by homogenizing `(x, y, 1)`, applying a composed
//! 3x3 matrix, and dividing by the resulting homogeneous `w`.

use std::ops::{Add, Mul, Sub};

/// A 2D point or vector with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Vec2 {
    /// Origin (0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        let d = self - other;
        (d.x * d.x + d.y * d.y).sqrt()
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// A 3-component vector used for homogeneous 2D coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Homogeneous coordinate.
    pub z: f32,
}

impl Vec3 {
    /// Create a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// A row-major 3x3 matrix for composing affine (and projective-scale)
/// 2D transforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    /// Entries in row-major order.
    pub m: [f32; 9],
}

impl Mat3 {
    /// Create a matrix from row-major entries.
    #[must_use]
    pub const fn new(m: [f32; 9]) -> Self {
        Self { m }
    }

    /// The identity matrix.
    #[must_use]
    pub const fn identity() -> Self {
        Self::new([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0])
    }

    /// A translation by `(tx, ty)`.
    #[must_use]
    pub const fn translation(tx: f32, ty: f32) -> Self {
        Self::new([1.0, 0.0, tx, 0.0, 1.0, ty, 0.0, 0.0, 1.0])
    }

    /// A non-uniform scale about the origin.
    #[must_use]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self::new([sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0])
    }

    /// Transform a 2D point: homogenize, multiply, divide by `w`.
    #[must_use]
    pub fn apply(&self, p: Vec2) -> Vec2 {
        let u = *self * Vec3::new(p.x, p.y, 1.0);
        Vec2::new(u.x / u.z, u.y / u.z)
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Mat3 {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        let a = &self.m;
        let b = &other.m;
        let mut out = [0.0f32; 9];
        for row in 0..3 {
            for col in 0..3 {
                out[row * 3 + col] = a[row * 3] * b[col]
                    + a[row * 3 + 1] * b[3 + col]
                    + a[row * 3 + 2] * b[6 + col];
            }
        }
        Self::new(out)
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            m[0] * v.x + m[1] * v.y + m[2] * v.z,
            m[3] * v.x + m[4] * v.y + m[5] * v.z,
            m[6] * v.x + m[7] * v.y + m[8] * v.z,
        )
    }
}
