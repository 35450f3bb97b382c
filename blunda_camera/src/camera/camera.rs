/// Camera: physical camera parameters and their conversions.
///
/// A camera is described by film-back (aperture) and lens (focal length)
/// parameters in the units cinematographers use. From those it can
/// produce a renderer-facing `Frustum`, and it can be rebuilt from a
/// view matrix and an OpenGL-style projection matrix.
///
/// Apertures and focal length are in tenths of a scene unit (mm when the
/// scene unit is cm). Clipping range and focus distance are in scene units.

use glam::{DMat4, DVec2, Vec4};
use crate::range::{Range1f, Range1d, Range2d};
use super::frustum::{Frustum, FrustumProjection};

/// Horizontal and vertical aperture are in mm whereas scene units are cm.
pub const APERTURE_UNIT: f64 = 0.1;

/// Focal length is in mm whereas scene units are cm.
pub const FOCAL_LENGTH_UNIT: f64 = 0.1;

/// 35mm spherical projector aperture width (0.825in) in aperture units.
pub const DEFAULT_HORIZONTAL_APERTURE: f64 = 0.825 * 2.54 / APERTURE_UNIT;

/// 35mm spherical projector aperture height (0.602in) in aperture units.
pub const DEFAULT_VERTICAL_APERTURE: f64 = 0.602 * 2.54 / APERTURE_UNIT;

/// Focal length used whenever the requested one is undefined.
pub const FALLBACK_FOCAL_LENGTH: f32 = 50.0;

/// Default clipping range in scene units.
pub const DEFAULT_CLIPPING_RANGE: Range1f = Range1f::new(1.0, 1_000_000.0);

/// Lens model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Projection {
    #[default]
    Perspective,
    Orthographic,
}

/// Which aperture dimension a field of view (or orthographic size) refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FovDirection {
    Horizontal,
    Vertical,
}

/// Element `[i][j]` of a matrix in row-vector notation.
///
/// glam stores column-vector matrices column-major, so row `i` of the
/// row-vector form is glam's column `i`.
#[inline]
fn element(m: &DMat4, i: usize, j: usize) -> f64 {
    m.col(i)[j]
}

/// Camera parameters.
///
/// All fields are independently settable; nothing is validated. The
/// consequences of degenerate values (zero focal length, zero vertical
/// aperture) are handled by the operations that consume them.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    transform: DMat4,
    projection: Projection,
    horizontal_aperture: f32,
    vertical_aperture: f32,
    horizontal_aperture_offset: f32,
    vertical_aperture_offset: f32,
    focal_length: f32,
    clipping_range: Range1f,
    clipping_planes: Vec<Vec4>,
    f_stop: f32,
    focus_distance: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            transform: DMat4::IDENTITY,
            projection: Projection::Perspective,
            horizontal_aperture: DEFAULT_HORIZONTAL_APERTURE as f32,
            vertical_aperture: DEFAULT_VERTICAL_APERTURE as f32,
            horizontal_aperture_offset: 0.0,
            vertical_aperture_offset: 0.0,
            focal_length: 50.0,
            clipping_range: DEFAULT_CLIPPING_RANGE,
            clipping_planes: Vec::new(),
            f_stop: 0.0,
            focus_distance: 0.0,
        }
    }
}

impl Camera {
    /// Create a camera from explicit parameters. Values are stored verbatim.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        transform: DMat4,
        projection: Projection,
        horizontal_aperture: f32,
        vertical_aperture: f32,
        horizontal_aperture_offset: f32,
        vertical_aperture_offset: f32,
        focal_length: f32,
        clipping_range: Range1f,
        clipping_planes: Vec<Vec4>,
        f_stop: f32,
        focus_distance: f32,
    ) -> Self {
        Self {
            transform,
            projection,
            horizontal_aperture,
            vertical_aperture,
            horizontal_aperture_offset,
            vertical_aperture_offset,
            focal_length,
            clipping_range,
            clipping_planes,
            f_stop,
            focus_distance,
        }
    }

    // ===== GETTERS =====

    /// Camera-to-world transform.
    pub fn transform(&self) -> &DMat4 {
        &self.transform
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn horizontal_aperture(&self) -> f32 {
        self.horizontal_aperture
    }

    pub fn vertical_aperture(&self) -> f32 {
        self.vertical_aperture
    }

    pub fn horizontal_aperture_offset(&self) -> f32 {
        self.horizontal_aperture_offset
    }

    pub fn vertical_aperture_offset(&self) -> f32 {
        self.vertical_aperture_offset
    }

    pub fn focal_length(&self) -> f32 {
        self.focal_length
    }

    /// Near/far distances in scene units.
    pub fn clipping_range(&self) -> Range1f {
        self.clipping_range
    }

    /// Additional camera-space clipping planes `(a, b, c, d)`; a point is
    /// kept when `a*x + b*y + c*z + d >= 0`.
    pub fn clipping_planes(&self) -> &[Vec4] {
        &self.clipping_planes
    }

    pub fn f_stop(&self) -> f32 {
        self.f_stop
    }

    pub fn focus_distance(&self) -> f32 {
        self.focus_distance
    }

    // ===== SETTERS =====

    pub fn set_transform(&mut self, transform: DMat4) {
        self.transform = transform;
    }

    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    pub fn set_horizontal_aperture(&mut self, value: f32) {
        self.horizontal_aperture = value;
    }

    pub fn set_vertical_aperture(&mut self, value: f32) {
        self.vertical_aperture = value;
    }

    pub fn set_horizontal_aperture_offset(&mut self, value: f32) {
        self.horizontal_aperture_offset = value;
    }

    pub fn set_vertical_aperture_offset(&mut self, value: f32) {
        self.vertical_aperture_offset = value;
    }

    pub fn set_focal_length(&mut self, value: f32) {
        self.focal_length = value;
    }

    pub fn set_clipping_range(&mut self, range: Range1f) {
        self.clipping_range = range;
    }

    pub fn set_clipping_planes(&mut self, planes: Vec<Vec4>) {
        self.clipping_planes = planes;
    }

    pub fn set_f_stop(&mut self, value: f32) {
        self.f_stop = value;
    }

    pub fn set_focus_distance(&mut self, value: f32) {
        self.focus_distance = value;
    }

    // ===== CONVERSIONS =====

    fn aperture(&self, direction: FovDirection) -> f32 {
        match direction {
            FovDirection::Horizontal => self.horizontal_aperture,
            FovDirection::Vertical => self.vertical_aperture,
        }
    }

    /// Make this a perspective camera with the given aspect ratio and field of view.
    ///
    /// The horizontal aperture is kept as given and the vertical one follows
    /// from the aspect ratio (an aspect ratio of 0 is treated as 1). The
    /// focal length is solved from `fov = 2 * atan(aperture / (2 * focal))`
    /// along `direction`. A field of view whose half-angle is a multiple of
    /// 90° has no finite non-zero tangent; the focal length then falls back
    /// to 50.
    pub fn set_perspective_from_aspect_ratio_and_field_of_view(
        &mut self,
        aspect_ratio: f32,
        field_of_view: f32,
        direction: FovDirection,
        horizontal_aperture: f32,
    ) {
        self.projection = Projection::Perspective;

        self.horizontal_aperture = horizontal_aperture;
        self.vertical_aperture =
            horizontal_aperture / if aspect_ratio != 0.0 { aspect_ratio } else { 1.0 };

        let aperture = self.aperture(direction);

        let half_angle = 0.5 * field_of_view as f64;
        let tan_value = half_angle.to_radians().tan() as f32;

        // tan(90°) evaluates to ~1.6e16 in floating point, not infinity
        if tan_value == 0.0 || half_angle.rem_euclid(90.0) == 0.0 {
            self.focal_length = FALLBACK_FOCAL_LENGTH;
            return;
        }

        self.focal_length = (aperture as f64 * APERTURE_UNIT
            / (2.0 * tan_value) as f64
            / FOCAL_LENGTH_UNIT) as f32;
    }

    /// Make this an orthographic camera covering `orthographic_size` scene
    /// units along `direction`.
    pub fn set_orthographic_from_aspect_ratio_and_size(
        &mut self,
        aspect_ratio: f32,
        orthographic_size: f32,
        direction: FovDirection,
    ) {
        self.projection = Projection::Orthographic;

        // Unused by orthographic cameras, kept sane
        self.focal_length = FALLBACK_FOCAL_LENGTH;

        match direction {
            FovDirection::Horizontal => {
                self.horizontal_aperture = (orthographic_size as f64 / APERTURE_UNIT) as f32;
                self.vertical_aperture = if aspect_ratio > 0.0 {
                    self.horizontal_aperture / aspect_ratio
                } else {
                    self.horizontal_aperture
                };
            }
            FovDirection::Vertical => {
                self.vertical_aperture = (orthographic_size as f64 / APERTURE_UNIT) as f32;
                self.horizontal_aperture = self.vertical_aperture * aspect_ratio;
            }
        }
    }

    /// Rebuild the camera from a view matrix and a projection matrix.
    ///
    /// The transform becomes the inverse of `view_matrix`. `proj_matrix` is
    /// classified by its `[2][3]` element: below -0.5 it is read as a
    /// perspective matrix (expected -1), otherwise as an orthographic one
    /// (expected 0). A matrix that does not match its expected shape is
    /// still converted, after logging a warning.
    pub fn set_from_view_and_projection_matrix(
        &mut self,
        view_matrix: &DMat4,
        proj_matrix: &DMat4,
        focal_length: f32,
    ) {
        self.transform = view_matrix.inverse();
        self.focal_length = focal_length;

        let p = |i, j| element(proj_matrix, i, j);

        if p(2, 3) < -0.5 {
            // Negated comparison so that NaN also warns
            if !((p(2, 3) - (-1.0)).abs() < 1e-6) {
                crate::blunda_warn!(
                    "blunda::Camera",
                    "Given projection matrix does not appear to be valid perspective matrix."
                );
            }

            self.projection = Projection::Perspective;

            let aperture_base =
                ((2.0 * focal_length) as f64 * (FOCAL_LENGTH_UNIT / APERTURE_UNIT)) as f32;

            self.horizontal_aperture = (aperture_base as f64 / p(0, 0)) as f32;
            self.vertical_aperture = (aperture_base as f64 / p(1, 1)) as f32;
            self.horizontal_aperture_offset =
                (0.5 * self.horizontal_aperture as f64 * p(2, 0)) as f32;
            self.vertical_aperture_offset =
                (0.5 * self.vertical_aperture as f64 * p(2, 1)) as f32;
            self.clipping_range = Range1f::new(
                (p(3, 2) / (p(2, 2) - 1.0)) as f32,
                (p(3, 2) / (p(2, 2) + 1.0)) as f32,
            );
        } else {
            if !(p(2, 3).abs() < 1e-6) {
                crate::blunda_warn!(
                    "blunda::Camera",
                    "Given projection matrix does not appear to be valid orthographic matrix."
                );
            }

            self.projection = Projection::Orthographic;

            self.horizontal_aperture = ((2.0 / APERTURE_UNIT) / p(0, 0)) as f32;
            self.vertical_aperture = ((2.0 / APERTURE_UNIT) / p(1, 1)) as f32;
            self.horizontal_aperture_offset =
                (-0.5 * self.horizontal_aperture as f64 * p(3, 0)) as f32;
            self.vertical_aperture_offset =
                (-0.5 * self.vertical_aperture as f64 * p(3, 1)) as f32;

            let near_minus_far_half = 1.0 / p(2, 2);
            let near_plus_far_half = near_minus_far_half * p(3, 2);
            self.clipping_range = Range1f::new(
                (near_plus_far_half + near_minus_far_half) as f32,
                (near_plus_far_half - near_minus_far_half) as f32,
            );
        }
    }

    /// Width over height of the aperture, 0 when the vertical aperture is 0.
    pub fn aspect_ratio(&self) -> f32 {
        if self.vertical_aperture == 0.0 {
            0.0
        } else {
            self.horizontal_aperture / self.vertical_aperture
        }
    }

    /// Field of view in degrees along `direction`.
    ///
    /// A zero focal length is the limit of an infinitely wide lens: 180°
    /// (signed like the aperture), or 0° when the aperture is also 0.
    pub fn field_of_view(&self, direction: FovDirection) -> f32 {
        let aperture = self.aperture(direction);

        if self.focal_length == 0.0 {
            return if aperture == 0.0 { 0.0 } else { 180.0_f32.copysign(aperture) };
        }

        let fov_rad = 2.0
            * ((aperture as f64 * APERTURE_UNIT)
                / (2.0 * self.focal_length as f64 * FOCAL_LENGTH_UNIT))
                .atan();

        fov_rad.to_degrees() as f32
    }

    /// Viewing frustum in scene units.
    ///
    /// Perspective windows lie on the plane at unit distance from the eye.
    /// A zero focal length leaves the window undivided.
    pub fn frustum(&self) -> Frustum {
        let max = DVec2::new(
            (self.horizontal_aperture / 2.0) as f64,
            (self.vertical_aperture / 2.0) as f64,
        );
        let mut window = Range2d::new(-max, max);

        let offset = DVec2::new(
            self.horizontal_aperture_offset as f64,
            self.vertical_aperture_offset as f64,
        );
        window += Range2d::new(offset, offset);

        // Aperture units to scene units
        window *= APERTURE_UNIT;

        if self.projection != Projection::Orthographic && self.focal_length != 0.0 {
            window /= self.focal_length as f64 * FOCAL_LENGTH_UNIT;
        }

        let projection = match self.projection {
            Projection::Orthographic => FrustumProjection::Orthographic,
            Projection::Perspective => FrustumProjection::Perspective,
        };

        Frustum::new(
            self.transform,
            window,
            Range1d::from(self.clipping_range),
            projection,
        )
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
