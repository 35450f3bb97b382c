use glam::{DMat4, DVec3, Vec4};
use crate::range::Range1f;
use super::*;
use super::super::frustum::FrustumProjection;

fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} within {}, got {}",
        expected,
        tolerance,
        actual
    );
}

fn assert_rel(actual: f32, expected: f32, rel: f32) {
    let scale = expected.abs().max(1e-6);
    assert!(
        ((actual - expected) / scale).abs() <= rel,
        "expected {} (relative {}), got {}",
        expected,
        rel,
        actual
    );
}

fn film_camera() -> Camera {
    Camera::new(
        DMat4::from_translation(DVec3::new(0.0, 1.5, 10.0)),
        Projection::Perspective,
        36.0,
        24.0,
        0.0,
        0.0,
        50.0,
        Range1f::new(1.0, 1000.0),
        Vec::new(),
        2.8,
        250.0,
    )
}

// ============================================================================
// Construction / accessors
// ============================================================================

#[test]
fn test_camera_default() {
    let camera = Camera::default();

    assert_eq!(*camera.transform(), DMat4::IDENTITY);
    assert_eq!(camera.projection(), Projection::Perspective);
    assert_close(camera.horizontal_aperture(), 20.955, 1e-4);
    assert_close(camera.vertical_aperture(), 15.2908, 1e-4);
    assert_eq!(camera.focal_length(), 50.0);
    assert_eq!(camera.clipping_range(), Range1f::new(1.0, 1_000_000.0));
    assert!(camera.clipping_planes().is_empty());
    assert_eq!(camera.f_stop(), 0.0);
    assert_eq!(camera.focus_distance(), 0.0);
}

#[test]
fn test_camera_new_stores_values_verbatim() {
    // Out-of-range values are accepted as-is
    let camera = Camera::new(
        DMat4::IDENTITY,
        Projection::Orthographic,
        -4.0,
        0.0,
        1.0,
        -1.0,
        0.0,
        Range1f::new(10.0, 1.0),
        vec![Vec4::new(0.0, 0.0, -1.0, 5.0)],
        1.4,
        3.0,
    );

    assert_eq!(camera.projection(), Projection::Orthographic);
    assert_eq!(camera.horizontal_aperture(), -4.0);
    assert_eq!(camera.vertical_aperture(), 0.0);
    assert_eq!(camera.horizontal_aperture_offset(), 1.0);
    assert_eq!(camera.vertical_aperture_offset(), -1.0);
    assert_eq!(camera.focal_length(), 0.0);
    assert_eq!(camera.clipping_range(), Range1f::new(10.0, 1.0));
    assert_eq!(camera.clipping_planes(), &[Vec4::new(0.0, 0.0, -1.0, 5.0)]);
    assert_eq!(camera.f_stop(), 1.4);
    assert_eq!(camera.focus_distance(), 3.0);
}

#[test]
fn test_camera_setters() {
    let mut camera = Camera::default();
    let transform = DMat4::from_translation(DVec3::new(1.0, 2.0, 3.0));

    camera.set_transform(transform);
    camera.set_projection(Projection::Orthographic);
    camera.set_horizontal_aperture(10.0);
    camera.set_vertical_aperture(5.0);
    camera.set_horizontal_aperture_offset(0.5);
    camera.set_vertical_aperture_offset(0.25);
    camera.set_focal_length(35.0);
    camera.set_clipping_range(Range1f::new(0.1, 100.0));
    camera.set_clipping_planes(vec![Vec4::X, Vec4::Y]);
    camera.set_f_stop(8.0);
    camera.set_focus_distance(12.0);

    assert_eq!(*camera.transform(), transform);
    assert_eq!(camera.projection(), Projection::Orthographic);
    assert_eq!(camera.horizontal_aperture(), 10.0);
    assert_eq!(camera.vertical_aperture(), 5.0);
    assert_eq!(camera.horizontal_aperture_offset(), 0.5);
    assert_eq!(camera.vertical_aperture_offset(), 0.25);
    assert_eq!(camera.focal_length(), 35.0);
    assert_eq!(camera.clipping_range(), Range1f::new(0.1, 100.0));
    assert_eq!(camera.clipping_planes().len(), 2);
    assert_eq!(camera.f_stop(), 8.0);
    assert_eq!(camera.focus_distance(), 12.0);
}

#[test]
fn test_default_apertures_match_projector_gate() {
    assert!((DEFAULT_HORIZONTAL_APERTURE - 20.955).abs() < 1e-9);
    assert!((DEFAULT_VERTICAL_APERTURE - 15.2908).abs() < 1e-9);
}

// ============================================================================
// Aspect ratio / field of view
// ============================================================================

#[test]
fn test_aspect_ratio() {
    assert_close(film_camera().aspect_ratio(), 1.5, 1e-6);
}

#[test]
fn test_aspect_ratio_zero_vertical_aperture() {
    let mut camera = film_camera();
    camera.set_vertical_aperture(0.0);

    let aspect = camera.aspect_ratio();
    assert_eq!(aspect, 0.0);
    assert!(aspect.is_finite());
}

#[test]
fn test_field_of_view_known_lens() {
    // 36mm film back, 50mm lens: 2 * atan(18 / 50) = 39.5978°
    let camera = film_camera();
    assert_close(camera.field_of_view(FovDirection::Horizontal), 39.5978, 1e-3);
    assert_close(camera.field_of_view(FovDirection::Vertical), 26.9915, 1e-3);
}

#[test]
fn test_field_of_view_zero_focal_length_is_guarded() {
    let mut camera = film_camera();
    camera.set_focal_length(0.0);

    assert_eq!(camera.field_of_view(FovDirection::Horizontal), 180.0);

    camera.set_horizontal_aperture(0.0);
    assert_eq!(camera.field_of_view(FovDirection::Horizontal), 0.0);
}

#[test]
fn test_perspective_fov_round_trip() {
    for aspect in [0.5_f32, 1.0, 1.78, 2.39] {
        for fov in [10.0_f32, 45.0, 90.0, 170.0] {
            for direction in [FovDirection::Horizontal, FovDirection::Vertical] {
                let mut camera = Camera::default();
                camera.set_perspective_from_aspect_ratio_and_field_of_view(
                    aspect, fov, direction, 20.955,
                );

                assert_eq!(camera.projection(), Projection::Perspective);
                assert_close(camera.field_of_view(direction), fov, 1e-4);
            }
        }
    }
}

#[test]
fn test_perspective_sets_apertures_from_aspect_ratio() {
    let mut camera = Camera::default();
    camera.set_perspective_from_aspect_ratio_and_field_of_view(
        2.0, 60.0, FovDirection::Horizontal, 40.0,
    );

    assert_eq!(camera.horizontal_aperture(), 40.0);
    assert_eq!(camera.vertical_aperture(), 20.0);
    // 40 * 0.1 / (2 * tan(30°)) / 0.1
    assert_close(camera.focal_length(), 34.641, 1e-3);
}

#[test]
fn test_perspective_zero_aspect_ratio_treated_as_one() {
    let mut camera = Camera::default();
    camera.set_perspective_from_aspect_ratio_and_field_of_view(
        0.0, 45.0, FovDirection::Vertical, 30.0,
    );

    assert_eq!(camera.vertical_aperture(), 30.0);
}

#[test]
fn test_perspective_degenerate_fov_uses_fallback_focal_length() {
    for fov in [0.0_f32, 180.0] {
        let mut camera = Camera::default();
        camera.set_focal_length(12.0);
        camera.set_perspective_from_aspect_ratio_and_field_of_view(
            1.5, fov, FovDirection::Horizontal, 36.0,
        );

        assert_eq!(camera.focal_length(), 50.0);
        assert_eq!(camera.projection(), Projection::Perspective);
    }
}

// ============================================================================
// Orthographic from size
// ============================================================================

#[test]
fn test_orthographic_from_horizontal_size() {
    let mut camera = film_camera();
    camera.set_orthographic_from_aspect_ratio_and_size(1.78, 10.0, FovDirection::Horizontal);

    assert_eq!(camera.projection(), Projection::Orthographic);
    assert_eq!(camera.focal_length(), 50.0);
    assert_close(camera.horizontal_aperture(), 100.0, 1e-4);
    assert_close(camera.vertical_aperture(), 56.1798, 1e-3);
}

#[test]
fn test_orthographic_from_horizontal_size_without_aspect_ratio() {
    let mut camera = film_camera();
    camera.set_orthographic_from_aspect_ratio_and_size(0.0, 4.0, FovDirection::Horizontal);

    assert_close(camera.horizontal_aperture(), 40.0, 1e-4);
    assert_eq!(camera.vertical_aperture(), camera.horizontal_aperture());
}

#[test]
fn test_orthographic_from_vertical_size() {
    let mut camera = film_camera();
    camera.set_orthographic_from_aspect_ratio_and_size(2.0, 5.0, FovDirection::Vertical);

    assert_close(camera.vertical_aperture(), 50.0, 1e-4);
    assert_close(camera.horizontal_aperture(), 100.0, 1e-4);
}

// ============================================================================
// Frustum
// ============================================================================

#[test]
fn test_frustum_window_perspective() {
    let camera = Camera::new(
        DMat4::IDENTITY,
        Projection::Perspective,
        20.955,
        15.2908,
        0.0,
        0.0,
        50.0,
        Range1f::new(1.0, 1000.0),
        Vec::new(),
        0.0,
        0.0,
    );

    let frustum = camera.frustum();
    let half_width = frustum.window().size().x / 2.0;

    assert!((half_width - 0.20955).abs() < 1e-6);
    assert!((frustum.window().max.x - 0.20955).abs() < 1e-6);
    assert!((frustum.window().min.y + 0.152908).abs() < 1e-6);
    assert_eq!(frustum.projection(), FrustumProjection::Perspective);
    assert_eq!(frustum.near_far().min, 1.0);
    assert_eq!(frustum.near_far().max, 1000.0);
}

#[test]
fn test_frustum_window_applies_offsets() {
    let mut camera = film_camera();
    camera.set_horizontal_aperture_offset(2.0);
    camera.set_vertical_aperture_offset(-1.0);

    let window = *camera.frustum().window();
    // (18 + 2) * 0.1 / 5, (-18 + 2) * 0.1 / 5
    assert!((window.max.x - 0.4).abs() < 1e-6);
    assert!((window.min.x + 0.32).abs() < 1e-6);
    assert!((window.midpoint().y + 0.02).abs() < 1e-6);
}

#[test]
fn test_frustum_window_zero_focal_length_left_undivided() {
    let mut camera = film_camera();
    camera.set_focal_length(0.0);

    let window = *camera.frustum().window();
    assert!((window.max.x - 1.8).abs() < 1e-6);
    assert!(window.max.x.is_finite());
}

#[test]
fn test_frustum_window_orthographic_not_divided() {
    let mut camera = film_camera();
    camera.set_projection(Projection::Orthographic);

    let frustum = camera.frustum();
    assert_eq!(frustum.projection(), FrustumProjection::Orthographic);
    assert!((frustum.window().max.x - 1.8).abs() < 1e-6);
    assert_eq!(*frustum.transform(), *camera.transform());
}

// ============================================================================
// set_from_view_and_projection_matrix
// ============================================================================

#[test]
fn test_from_matrices_perspective_round_trip() {
    let mut original = film_camera();
    original.set_horizontal_aperture_offset(1.5);
    original.set_vertical_aperture_offset(-0.75);

    let frustum = original.frustum();
    let view = frustum.compute_view_matrix();
    let proj = frustum.compute_projection_matrix();

    let mut camera = Camera::default();
    camera.set_projection(Projection::Orthographic);
    camera.set_from_view_and_projection_matrix(&view, &proj, 50.0);

    assert_eq!(camera.projection(), Projection::Perspective);
    assert_eq!(camera.focal_length(), 50.0);
    assert_rel(camera.horizontal_aperture(), 36.0, 1e-5);
    assert_rel(camera.vertical_aperture(), 24.0, 1e-5);
    assert_rel(camera.horizontal_aperture_offset(), 1.5, 1e-5);
    assert_rel(camera.vertical_aperture_offset(), -0.75, 1e-5);
    assert_rel(camera.clipping_range().min, 1.0, 1e-5);
    assert_rel(camera.clipping_range().max, 1000.0, 1e-5);
    assert!(camera.transform().abs_diff_eq(*original.transform(), 1e-9));
}

#[test]
fn test_from_matrices_standard_perspective() {
    let fov_y = 40.0_f64.to_radians();
    let proj = DMat4::perspective_rh_gl(fov_y, 1.5, 0.5, 200.0);
    let view = DMat4::look_at_rh(DVec3::new(0.0, 0.0, 5.0), DVec3::ZERO, DVec3::Y);

    let mut camera = Camera::default();
    camera.set_from_view_and_projection_matrix(&view, &proj, 35.0);

    assert_close(camera.field_of_view(FovDirection::Vertical), 40.0, 1e-4);
    assert_rel(camera.aspect_ratio(), 1.5, 1e-5);
    assert_eq!(camera.horizontal_aperture_offset(), 0.0);
    assert_rel(camera.clipping_range().min, 0.5, 1e-5);
    assert_rel(camera.clipping_range().max, 200.0, 1e-5);
    assert!((camera.transform().w_axis.z - 5.0).abs() < 1e-9);
}

#[test]
fn test_from_matrices_orthographic_round_trip() {
    let proj = DMat4::orthographic_rh_gl(-5.0, 5.0, -2.0, 4.0, 0.5, 100.0);

    let mut camera = Camera::default();
    camera.set_from_view_and_projection_matrix(&DMat4::IDENTITY, &proj, 50.0);

    assert_eq!(camera.projection(), Projection::Orthographic);
    assert_rel(camera.horizontal_aperture(), 100.0, 1e-5);
    assert_rel(camera.vertical_aperture(), 60.0, 1e-5);
    assert!(camera.horizontal_aperture_offset().abs() < 1e-5);
    assert_rel(camera.vertical_aperture_offset(), 10.0, 1e-5);
    assert_rel(camera.clipping_range().min, 0.5, 1e-5);
    assert_rel(camera.clipping_range().max, 100.0, 1e-5);

    // And back again through the frustum
    let rebuilt = camera.frustum().compute_projection_matrix();
    assert!(rebuilt.abs_diff_eq(proj, 1e-5));
}

#[test]
fn test_from_matrices_malformed_perspective_still_converts() {
    let mut proj = DMat4::perspective_rh_gl(1.0, 1.0, 1.0, 10.0);
    proj.z_axis.w = -0.7;

    let mut camera = Camera::default();
    camera.set_projection(Projection::Orthographic);
    camera.set_from_view_and_projection_matrix(&DMat4::IDENTITY, &proj, 50.0);

    assert_eq!(camera.projection(), Projection::Perspective);
    assert!(camera.horizontal_aperture().is_finite());
}
