//! 2D vector math and viewport geometry.
//!
//! Positions are kept in `f32` at full precision. The host's own cursor is
//! usually integer-backed, so [`Vec2::trunc`] exists to compare against it.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A 2D vector or point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }

    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// True when both components are exactly zero.
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Unit vector in the same direction, or zero if the length is too
    /// small to normalize.
    pub fn safe_normal(self) -> Self {
        let len_sq = self.length_squared();
        if len_sq <= f32::EPSILON * f32::EPSILON {
            return Self::ZERO;
        }
        if (len_sq - 1.0).abs() <= f32::EPSILON {
            return self;
        }
        self / len_sq.sqrt()
    }

    /// Truncate both components toward zero.
    pub fn trunc(self) -> Self {
        Self::new(self.x.trunc(), self.y.trunc())
    }

    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }

    /// Component-wise multiplication.
    pub fn mul_elem(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;
    fn mul(self, rhs: Vec2) -> Vec2 {
        rhs * self
    }
}

impl Div<f32> for Vec2 {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// Placement of one player's viewport in absolute (desktop) space.
///
/// `size` is the viewport's local extent; `scale` maps one local unit to
/// absolute units, so the viewport covers `origin .. origin + size * scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportGeometry {
    pub origin: Vec2,
    pub size: Vec2,
    pub scale: f32,
}

impl ViewportGeometry {
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self {
            origin,
            size,
            scale: 1.0,
        }
    }

    pub const fn with_scale(self, scale: f32) -> Self {
        Self {
            origin: self.origin,
            size: self.size,
            scale,
        }
    }

    /// Local extent rounded to whole pixels.
    pub fn local_size(&self) -> Vec2 {
        self.size.round()
    }

    pub fn absolute_to_local(&self, absolute: Vec2) -> Vec2 {
        (absolute - self.origin) / self.scale
    }

    pub fn local_to_absolute(&self, local: Vec2) -> Vec2 {
        self.origin + local * self.scale
    }

    /// Absolute position at normalized viewport coordinates.
    pub fn absolute_at_uv(&self, uv: Vec2) -> Vec2 {
        self.local_to_absolute(self.size.mul_elem(uv))
    }

    pub fn center(&self) -> Vec2 {
        self.absolute_at_uv(Vec2::splat(0.5))
    }

    /// Whether an absolute point lies inside the viewport.
    pub fn contains(&self, absolute: Vec2) -> bool {
        let local = self.absolute_to_local(absolute);
        local.x >= 0.0 && local.y >= 0.0 && local.x < self.size.x && local.y < self.size.y
    }
}
