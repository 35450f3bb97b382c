/// Closed intervals used by cameras and frusta.
///
/// `Range1f` carries the camera's clipping range in single precision
/// (the attribute's stored type); `Range1d` and `Range2d` are the double
/// precision near/far interval and window of a frustum.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign};
use glam::{DVec2, Vec2};

/// Single-precision interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range1f {
    pub min: f32,
    pub max: f32,
}

impl Range1f {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// `true` if `max < min`.
    pub fn is_empty(&self) -> bool {
        self.max < self.min
    }
}

impl From<Range1f> for Vec2 {
    fn from(range: Range1f) -> Self {
        Vec2::new(range.min, range.max)
    }
}

impl From<Vec2> for Range1f {
    fn from(v: Vec2) -> Self {
        Range1f::new(v.x, v.y)
    }
}

/// Double-precision interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range1d {
    pub min: f64,
    pub max: f64,
}

impl Range1d {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn size(&self) -> f64 {
        self.max - self.min
    }
}

impl From<Range1f> for Range1d {
    fn from(range: Range1f) -> Self {
        Range1d::new(range.min as f64, range.max as f64)
    }
}

/// Double-precision axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range2d {
    pub min: DVec2,
    pub max: DVec2,
}

impl Range2d {
    pub const fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    pub fn midpoint(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }
}

// Minkowski sum: adding a degenerate range translates the rectangle.
impl Add for Range2d {
    type Output = Range2d;

    fn add(self, rhs: Range2d) -> Range2d {
        Range2d::new(self.min + rhs.min, self.max + rhs.max)
    }
}

impl AddAssign for Range2d {
    fn add_assign(&mut self, rhs: Range2d) {
        *self = *self + rhs;
    }
}

impl Mul<f64> for Range2d {
    type Output = Range2d;

    /// Scales both corners. A negative factor swaps them so `min <= max` holds.
    fn mul(self, factor: f64) -> Range2d {
        let a = self.min * factor;
        let b = self.max * factor;
        Range2d::new(a.min(b), a.max(b))
    }
}

impl MulAssign<f64> for Range2d {
    fn mul_assign(&mut self, factor: f64) {
        *self = *self * factor;
    }
}

impl Div<f64> for Range2d {
    type Output = Range2d;

    fn div(self, divisor: f64) -> Range2d {
        self * (1.0 / divisor)
    }
}

impl DivAssign<f64> for Range2d {
    fn div_assign(&mut self, divisor: f64) {
        *self = *self / divisor;
    }
}

#[cfg(test)]
#[path = "range_tests.rs"]
mod tests;
