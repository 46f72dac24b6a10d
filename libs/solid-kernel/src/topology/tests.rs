//! Tests for edge extraction and selection.

use super::*;
use crate::mesh::Mesh;
use crate::ops::boolean::{difference, union};
use crate::ops::extrude::{linear_extrude, ExtrudeMode};
use crate::primitives::{create_cuboid, create_cylinder};
use crate::sketch::{Profile, SketchPlane};
use approx::assert_relative_eq;
use glam::DVec3;

fn boxed(size: DVec3, center: DVec3) -> Mesh {
    let mut mesh = create_cuboid(size, true).unwrap();
    mesh.translate(center);
    mesh
}

fn x_cylinder(radius: f64, length: f64, segments: u32) -> Mesh {
    let circle = Profile::circle(radius, segments).unwrap();
    linear_extrude(&circle, &SketchPlane::YZ, length, ExtrudeMode::OneSided).unwrap()
}

// =============================================================================
// EXTRACTION
// =============================================================================

#[test]
fn test_cube_has_twelve_convex_lines() {
    let edges = extract_edges(&create_cuboid(DVec3::splat(2.0), true).unwrap());

    assert_eq!(edges.len(), 12);
    for edge in &edges {
        assert_eq!(edge.geom_type(), GeomType::Line);
        assert_eq!(edge.convexity(), Convexity::Convex);
        assert_relative_eq!(edge.length(), 2.0, epsilon = 1e-12);
    }
}

#[test]
fn test_cylinder_has_two_rim_circles() {
    let edges = extract_edges(&create_cylinder(5.0, 10.0, 32).unwrap());

    assert_eq!(edges.len(), 2);
    let mut heights: Vec<f64> = edges
        .iter()
        .map(|e| {
            let circle = e.circle().unwrap();
            assert!(e.is_closed());
            assert_eq!(e.convexity(), Convexity::Convex);
            assert_relative_eq!(circle.radius, 5.0, epsilon = 1e-9);
            assert_eq!(circle.segments, Some(32));
            circle.center.z
        })
        .collect();
    heights.sort_by(f64::total_cmp);
    assert_relative_eq!(heights[0], 0.0, epsilon = 1e-9);
    assert_relative_eq!(heights[1], 10.0, epsilon = 1e-9);
}

#[test]
fn test_sliver_on_rim_keeps_circle_closed() {
    let n = 32;
    let cylinder = create_cylinder(5.0, 10.0, n).unwrap();
    let (j, j_next) = (5, 6);
    let (t_j, t_next) = (n + j, n + j_next);

    // Split the side triangle (b_j, t_j+1, t_j) at a point just outside the
    // rim chord and close the gap with a sliver against the top cap
    let mut mesh = Mesh::new();
    for &v in cylinder.vertices() {
        mesh.add_vertex(v);
    }
    let chord_mid = (cylinder.vertex(t_j) + cylinder.vertex(t_next)) / 2.0;
    let outward = DVec3::new(chord_mid.x, chord_mid.y, 0.0).normalize();
    let p = mesh.add_vertex(chord_mid + outward * 5e-5);
    for (i, &[a, b, c]) in cylinder.triangles().iter().enumerate() {
        if i == 2 * j as usize + 1 {
            mesh.add_triangle(a, b, p);
            mesh.add_triangle(a, p, c);
        } else {
            mesh.add_triangle(a, b, c);
        }
    }
    mesh.add_triangle(t_j, p, t_next);
    assert!(mesh.validate());

    let edges = extract_edges(&mesh);
    assert_eq!(edges.len(), 2);
    for edge in &edges {
        assert_eq!(edge.geom_type(), GeomType::Circle);
        assert!(edge.is_closed());
        assert_eq!(edge.convexity(), Convexity::Convex);
        assert_relative_eq!(edge.radius().unwrap(), 5.0, epsilon = 1e-9);
    }
}

#[test]
fn test_step_has_concave_edge() {
    // L-shaped block: 4 x 2 x 1 base with a 2 x 2 x 1 step on one half
    let base = boxed(DVec3::new(4.0, 2.0, 1.0), DVec3::new(0.0, 0.0, 0.5));
    let step = boxed(DVec3::new(2.0, 2.0, 1.0), DVec3::new(-1.0, 0.0, 1.5));
    let block = union(&base, &step).unwrap();

    let concave: Vec<Edge> = extract_edges(&block)
        .into_iter()
        .filter(|e| e.convexity() == Convexity::Concave)
        .collect();

    assert_eq!(concave.len(), 1);
    let edge = &concave[0];
    assert_eq!(edge.geom_type(), GeomType::Line);
    assert!(Axis::Y.is_parallel(edge.direction().unwrap()));
    assert_relative_eq!(edge.center().x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(edge.center().z, 1.0, epsilon = 1e-9);
    assert_relative_eq!(edge.length(), 2.0, epsilon = 1e-9);
}

#[test]
fn test_slotted_cylinder_rim_arcs_share_circle() {
    let body = x_cylinder(17.5, 60.0, 48);
    let slot = boxed(DVec3::new(30.1, 70.0, 16.3), DVec3::new(15.0, 0.0, 0.0));
    let slotted = difference(&body, &slot).unwrap();

    let rims = EdgeSelection::new(extract_edges(&slotted))
        .filter_by_type(GeomType::Circle)
        .filter_by(|e| e.radius().is_some_and(|r| r > 10.0))
        .filter_by(|e| e.center().x.abs() < 0.1 || (e.center().x - 60.0).abs() < 0.1);

    // Two arcs at x = 0 and the untouched circle at x = 60
    assert_eq!(rims.len(), 3);
    assert_eq!(rims.distinct_circles(), 2);
    for rim in &rims {
        assert_relative_eq!(rim.radius().unwrap(), 17.5, epsilon = 1e-6);
    }
}

#[test]
fn test_slot_floor_edges_are_concave_y_lines() {
    let body = x_cylinder(17.5, 60.0, 48);
    let slot = boxed(DVec3::new(30.1, 70.0, 16.3), DVec3::new(15.0, 0.0, 0.0));
    let slotted = difference(&body, &slot).unwrap();

    let floor = EdgeSelection::new(extract_edges(&slotted))
        .filter_by_axis(Axis::Y)
        .filter_by(|e| (e.center().x - 30.0).abs() < 1.0);

    assert_eq!(floor.len(), 2);
    for edge in &floor {
        assert_eq!(edge.convexity(), Convexity::Concave);
        assert_relative_eq!(edge.center().z.abs(), 8.15, epsilon = 1e-9);
    }
}

// =============================================================================
// EDGE QUERIES
// =============================================================================

#[test]
fn test_center_is_half_arc_length_point() {
    let edges = extract_edges(&create_cuboid(DVec3::new(4.0, 2.0, 2.0), false).unwrap());
    let along_x = EdgeSelection::new(edges).filter_by_axis(Axis::X);
    assert_eq!(along_x.len(), 4);
    for edge in &along_x {
        assert_relative_eq!(edge.center().x, 2.0, epsilon = 1e-12);
    }
}

#[test]
fn test_extraction_is_deterministic() {
    let body = x_cylinder(10.0, 20.0, 24);
    let cut = boxed(DVec3::new(8.0, 30.0, 6.0), DVec3::new(10.0, 0.0, 0.0));
    let mesh = difference(&body, &cut).unwrap();

    let first = extract_edges(&mesh);
    let second = extract_edges(&mesh);
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.points(), b.points());
        assert_eq!(a.geom_type(), b.geom_type());
    }
}
