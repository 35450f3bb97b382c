use glam::{DMat4, DVec3, Vec4};
use crate::range::Range1f;
use super::*;
use super::super::camera::FovDirection;

fn make(hohoho: f32) -> BlundaCamera {
    BlundaCamera::new(
        DMat4::from_translation(DVec3::new(0.0, 0.0, 7.0)),
        Projection::Perspective,
        36.0,
        24.0,
        0.5,
        -0.5,
        35.0,
        Range1f::new(0.1, 500.0),
        vec![Vec4::new(0.0, 1.0, 0.0, 0.0)],
        4.0,
        120.0,
        hohoho,
    )
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_blunda_camera_default() {
    let camera = BlundaCamera::default();

    assert_eq!(camera.hohoho(), DEFAULT_HOHOHO);
    assert_eq!(*camera.as_camera(), Camera::default());
}

#[test]
fn test_blunda_camera_from_camera_uses_default_hohoho() {
    let camera: BlundaCamera = Camera::default().into();
    assert_eq!(camera.hohoho(), 20.955);
}

#[test]
fn test_blunda_camera_base_operations_through_deref() {
    let mut camera = make(1.0);
    camera.set_perspective_from_aspect_ratio_and_field_of_view(
        1.5, 45.0, FovDirection::Horizontal, 36.0,
    );

    assert!((camera.field_of_view(FovDirection::Horizontal) - 45.0).abs() < 1e-4);
    assert_eq!(camera.hohoho(), 1.0);

    camera.set_hohoho(3.5);
    assert_eq!(camera.hohoho(), 3.5);
    assert_eq!(camera.into_camera().horizontal_aperture(), 36.0);
}

// ============================================================================
// Equality
// ============================================================================

#[test]
fn test_strict_equality_compares_every_field() {
    assert_eq!(make(2.0), make(2.0));
    assert_ne!(make(2.0), make(2.5));

    let mut other = make(2.0);
    other.set_focus_distance(121.0);
    assert_ne!(make(2.0), other);

    let mut other = make(2.0);
    other.set_clipping_planes(Vec::new());
    assert_ne!(make(2.0), other);
}

#[test]
fn test_base_equality_ignores_hohoho() {
    let base = make(0.0).into_camera();

    assert!(make(2.0) == base);
    assert!(make(99.0) == base);
    assert!(base == make(-1.0));
}

#[test]
fn test_base_equality_still_compares_base_fields() {
    let mut base = make(0.0).into_camera();
    base.set_f_stop(5.6);

    assert!(make(2.0) != base);
    assert!(base != make(2.0));
}

#[test]
fn test_equality_nan_field_is_not_reflexive() {
    let mut camera = make(1.0);
    camera.set_hohoho(f32::NAN);

    assert_ne!(camera, camera.clone());
}
