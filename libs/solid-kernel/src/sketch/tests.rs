//! Tests for profiles, sketch planes and triangulation.

use super::*;
use approx::assert_relative_eq;

fn triangle_area(points: &[DVec2], tri: [usize; 3]) -> f64 {
    let [a, b, c] = tri.map(|i| points[i]);
    (b - a).perp_dot(c - a) / 2.0
}

// =============================================================================
// PROFILE TESTS
// =============================================================================

#[test]
fn test_polygon_reorders_clockwise_input() {
    let profile = Profile::polygon(vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(0.0, 1.0),
        DVec2::new(1.0, 0.0),
    ])
    .unwrap();
    assert_relative_eq!(profile.signed_area(), 0.5);
}

#[test]
fn test_polygon_rejects_degenerate_input() {
    assert!(Profile::polygon(vec![DVec2::ZERO, DVec2::X]).is_err());
    assert!(Profile::polygon(vec![DVec2::ZERO, DVec2::X, DVec2::X * 2.0]).is_err());
}

#[test]
fn test_circle_starts_on_u_axis() {
    let profile = Profile::circle(17.5, 48).unwrap();
    assert_eq!(profile.points().len(), 48);
    assert_relative_eq!(profile.points()[0].x, 17.5);
    assert_relative_eq!(profile.points()[0].y, 0.0);
    assert!(profile.signed_area() > 0.0);
}

#[test]
fn test_rectangle_area() {
    let profile = Profile::rectangle(4.0, 2.5).unwrap();
    assert_relative_eq!(profile.signed_area(), 10.0);
    assert!(Profile::rectangle(0.0, 1.0).is_err());
}

#[test]
fn test_centered_at_uses_bounding_box() {
    let profile = Profile::polygon(vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(15.0, 0.0),
        DVec2::new(0.0, 10.0),
    ])
    .unwrap()
    .centered_at(DVec2::new(30.0, 7.65));
    let (min, max) = profile.bounds();
    assert_relative_eq!(min.x, 22.5);
    assert_relative_eq!(max.x, 37.5);
    assert_relative_eq!(min.y, 2.65);
    assert_relative_eq!(max.y, 12.65);
}

// =============================================================================
// SKETCH PLANE TESTS
// =============================================================================

#[test]
fn test_plane_normals_are_right_handed() {
    for plane in [SketchPlane::XY, SketchPlane::YZ, SketchPlane::XZ] {
        assert_eq!(plane.u.cross(plane.v), plane.normal);
    }
}

#[test]
fn test_xz_plane_maps_v_to_z() {
    let plane = SketchPlane::XZ.with_origin(DVec3::new(0.0, 2.0, 0.0));
    let p = plane.to_world(DVec2::new(3.0, 4.0));
    assert_eq!(p, DVec3::new(3.0, 2.0, 4.0));
}

// =============================================================================
// TRIANGULATION TESTS
// =============================================================================

#[test]
fn test_triangulate_convex() {
    let profile = Profile::circle(1.0, 16).unwrap();
    let tris = triangulate(profile.points()).unwrap();
    assert_eq!(tris.len(), 14);
    let total: f64 = tris.iter().map(|&t| triangle_area(profile.points(), t)).sum();
    assert_relative_eq!(total, profile.signed_area(), epsilon = 1e-12);
}

#[test]
fn test_triangulate_concave() {
    // L-shape
    let points = vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(2.0, 0.0),
        DVec2::new(2.0, 1.0),
        DVec2::new(1.0, 1.0),
        DVec2::new(1.0, 2.0),
        DVec2::new(0.0, 2.0),
    ];
    let tris = triangulate(&points).unwrap();
    assert_eq!(tris.len(), 4);
    for &t in &tris {
        assert!(triangle_area(&points, t) > 0.0);
    }
    let total: f64 = tris.iter().map(|&t| triangle_area(&points, t)).sum();
    assert_relative_eq!(total, 3.0, epsilon = 1e-12);
}

#[test]
fn test_triangulate_skips_collinear_vertex() {
    let points = vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(1.0, 0.0),
        DVec2::new(2.0, 0.0),
        DVec2::new(2.0, 2.0),
        DVec2::new(0.0, 2.0),
    ];
    let tris = triangulate(&points).unwrap();
    let total: f64 = tris.iter().map(|&t| triangle_area(&points, t)).sum();
    assert_relative_eq!(total, 4.0, epsilon = 1e-12);
    assert!(tris.iter().all(|&t| triangle_area(&points, t) > 0.0));
}
