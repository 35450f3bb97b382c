/// Frustum: the volume a camera sees, in the form a renderer consumes.
///
/// A frustum is a camera-to-world transform, a 2D window, a near/far
/// interval and a projection type. For perspective frusta the window is
/// on the plane at unit distance in front of the eye; for orthographic
/// frusta it is the cross-section of the box.
///
/// From that description it builds the OpenGL-style projection matrix
/// (the inverse of `Camera::set_from_view_and_projection_matrix`) and
/// the six world-space planes used for visibility culling.

use glam::{DMat4, DVec3, DVec4};
use crate::range::{Range1d, Range2d};

/// Frustum projection type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrustumProjection {
    Perspective,
    Orthographic,
}

/// Result of a 3-way frustum/box classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumTest {
    /// Box is entirely outside the frustum
    Outside,
    /// Box is entirely inside the frustum
    Inside,
    /// Box partially overlaps the frustum
    Partial,
}

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// World-space axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    transform: DMat4,
    window: Range2d,
    near_far: Range1d,
    projection: FrustumProjection,
}

impl Frustum {
    pub fn new(
        transform: DMat4,
        window: Range2d,
        near_far: Range1d,
        projection: FrustumProjection,
    ) -> Self {
        Self { transform, window, near_far, projection }
    }

    // ===== GETTERS =====

    /// Camera-to-world transform.
    pub fn transform(&self) -> &DMat4 {
        &self.transform
    }

    pub fn window(&self) -> &Range2d {
        &self.window
    }

    pub fn near_far(&self) -> &Range1d {
        &self.near_far
    }

    pub fn projection(&self) -> FrustumProjection {
        self.projection
    }

    /// Eye position in world space.
    pub fn position(&self) -> DVec3 {
        self.transform.w_axis.truncate()
    }

    // ===== MATRICES =====

    /// World-to-camera matrix.
    pub fn compute_view_matrix(&self) -> DMat4 {
        self.transform.inverse()
    }

    /// OpenGL-style projection matrix (camera looks down -Z, clip z in [-1, 1]).
    pub fn compute_projection_matrix(&self) -> DMat4 {
        let n = self.near_far.min;
        let f = self.near_far.max;

        match self.projection {
            FrustumProjection::Orthographic => {
                let (l, r) = (self.window.min.x, self.window.max.x);
                let (b, t) = (self.window.min.y, self.window.max.y);

                DMat4::from_cols(
                    DVec4::new(2.0 / (r - l), 0.0, 0.0, 0.0),
                    DVec4::new(0.0, 2.0 / (t - b), 0.0, 0.0),
                    DVec4::new(0.0, 0.0, -2.0 / (f - n), 0.0),
                    DVec4::new(
                        -(r + l) / (r - l),
                        -(t + b) / (t - b),
                        -(f + n) / (f - n),
                        1.0,
                    ),
                )
            }
            FrustumProjection::Perspective => {
                // Window is at unit distance; move it to the near plane
                let (l, r) = (self.window.min.x * n, self.window.max.x * n);
                let (b, t) = (self.window.min.y * n, self.window.max.y * n);

                DMat4::from_cols(
                    DVec4::new(2.0 * n / (r - l), 0.0, 0.0, 0.0),
                    DVec4::new(0.0, 2.0 * n / (t - b), 0.0, 0.0),
                    DVec4::new(
                        (r + l) / (r - l),
                        (t + b) / (t - b),
                        -(f + n) / (f - n),
                        -1.0,
                    ),
                    DVec4::new(0.0, 0.0, -2.0 * f * n / (f - n), 0.0),
                )
            }
        }
    }

    // ===== CULLING =====

    /// Six world-space planes: left, right, bottom, top, near, far.
    ///
    /// Each plane is (A, B, C, D) with a unit inward normal; a point P is
    /// inside when `A*x + B*y + C*z + D >= 0` for all planes. Extracted
    /// from the view-projection matrix (Gribb & Hartmann).
    pub fn culling_planes(&self) -> [DVec4; 6] {
        let vp = self.compute_projection_matrix() * self.compute_view_matrix();
        let m = vp.to_cols_array_2d();

        let row = |i: usize| DVec4::new(m[0][i], m[1][i], m[2][i], m[3][i]);
        let (r0, r1, r2, r3) = (row(0), row(1), row(2), row(3));

        let mut planes = [r3 + r0, r3 - r0, r3 + r1, r3 - r1, r3 + r2, r3 - r2];

        for plane in &mut planes {
            let normal_len = plane.truncate().length();
            if normal_len > 0.0 {
                *plane /= normal_len;
            }
        }

        planes
    }

    /// `true` if the box is (potentially) inside or intersecting.
    ///
    /// Conservative: may return false positives, never false negatives.
    pub fn intersects_box(&self, aabb: &Aabb) -> bool {
        self.classify_box(aabb) != FrustumTest::Outside
    }

    /// Classify a box against the frustum (3-way test).
    ///
    /// - p-vertex outside any plane → `Outside`
    /// - n-vertex outside any plane → at least `Partial`
    /// - otherwise → `Inside`
    pub fn classify_box(&self, aabb: &Aabb) -> FrustumTest {
        let mut all_inside = true;

        for plane in &self.culling_planes() {
            let normal = plane.truncate();

            // Corner most in the direction of the normal
            let p_vertex = DVec3::new(
                if normal.x >= 0.0 { aabb.max.x } else { aabb.min.x },
                if normal.y >= 0.0 { aabb.max.y } else { aabb.min.y },
                if normal.z >= 0.0 { aabb.max.z } else { aabb.min.z },
            );

            if normal.dot(p_vertex) + plane.w < 0.0 {
                return FrustumTest::Outside;
            }

            // Corner least in the direction of the normal
            let n_vertex = DVec3::new(
                if normal.x >= 0.0 { aabb.min.x } else { aabb.max.x },
                if normal.y >= 0.0 { aabb.min.y } else { aabb.max.y },
                if normal.z >= 0.0 { aabb.min.z } else { aabb.max.z },
            );

            if normal.dot(n_vertex) + plane.w < 0.0 {
                all_inside = false;
            }
        }

        if all_inside { FrustumTest::Inside } else { FrustumTest::Partial }
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
