//! Camera parameters, their extended form, and the frustum.
//!
//! Cameras are plain values owned by the caller. Nothing here stores,
//! shares or synchronizes them.

mod camera;
mod blunda_camera;
mod frustum;

pub use camera::{
    Camera, Projection, FovDirection,
    APERTURE_UNIT, FOCAL_LENGTH_UNIT,
    DEFAULT_HORIZONTAL_APERTURE, DEFAULT_VERTICAL_APERTURE,
    DEFAULT_CLIPPING_RANGE, FALLBACK_FOCAL_LENGTH,
};
pub use blunda_camera::{BlundaCamera, DEFAULT_HOHOHO};
pub use frustum::{
    Frustum, FrustumProjection, FrustumTest, Aabb,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
