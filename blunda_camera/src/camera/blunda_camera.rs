/// BlundaCamera: a `Camera` with one additional scalar parameter.
///
/// Everything a `Camera` can do is available through `Deref`. Equality
/// against another `BlundaCamera` compares every field including
/// `hohoho`; equality against a plain `Camera` compares only the
/// fields a `Camera` has.

use std::ops::{Deref, DerefMut};
use glam::{DMat4, Vec4};
use crate::range::Range1f;
use super::camera::{Camera, Projection};

/// Default value of the `hohoho` parameter.
pub const DEFAULT_HOHOHO: f32 = 20.955;

#[derive(Debug, Clone, PartialEq)]
pub struct BlundaCamera {
    camera: Camera,
    hohoho: f32,
}

impl Default for BlundaCamera {
    fn default() -> Self {
        Self {
            camera: Camera::default(),
            hohoho: DEFAULT_HOHOHO,
        }
    }
}

impl BlundaCamera {
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
        hohoho: f32,
    ) -> Self {
        Self {
            camera: Camera::new(
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
            ),
            hohoho,
        }
    }

    /// Extend a base camera with an explicit `hohoho` value.
    pub fn from_camera(camera: Camera, hohoho: f32) -> Self {
        Self { camera, hohoho }
    }

    pub fn hohoho(&self) -> f32 {
        self.hohoho
    }

    pub fn set_hohoho(&mut self, value: f32) {
        self.hohoho = value;
    }

    /// Base view of this camera.
    pub fn as_camera(&self) -> &Camera {
        &self.camera
    }

    /// Drop the extra parameter.
    pub fn into_camera(self) -> Camera {
        self.camera
    }
}

impl From<Camera> for BlundaCamera {
    fn from(camera: Camera) -> Self {
        Self::from_camera(camera, DEFAULT_HOHOHO)
    }
}

impl Deref for BlundaCamera {
    type Target = Camera;

    fn deref(&self) -> &Camera {
        &self.camera
    }
}

impl DerefMut for BlundaCamera {
    fn deref_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }
}

impl PartialEq<Camera> for BlundaCamera {
    fn eq(&self, other: &Camera) -> bool {
        self.camera == *other
    }
}

impl PartialEq<BlundaCamera> for Camera {
    fn eq(&self, other: &BlundaCamera) -> bool {
        *self == other.camera
    }
}

#[cfg(test)]
#[path = "blunda_camera_tests.rs"]
mod tests;
