//! # Boolean Operations (CSG)
//!
//! Constructive Solid Geometry operations using BSP trees.
//!
//! ## Algorithm
//!
//! Based on the csg.js algorithm by Evan Wallace:
//! - Union: A.clipTo(B); B.clipTo(A); B.invert(); B.clipTo(A); B.invert(); combine
//! - Difference: A.invert(); A.clipTo(B); B.clipTo(A); B.invert(); B.clipTo(A); B.invert(); combine; invert
//! - Intersection: A.invert(); B.clipTo(A); B.invert(); A.clipTo(B); B.clipTo(A); combine; invert
//!
//! The output is re-indexed through a [`VertexWelder`]. BSP splitting leaves
//! T-junctions behind; they do not affect volume and are repaired by the
//! topology pass when edges are extracted.
//!
//! ## Example
//!
//! ```rust
//! use solid_kernel::ops::boolean::difference;
//! use solid_kernel::primitives::create_cuboid;
//! use glam::DVec3;
//!
//! let a = create_cuboid(DVec3::splat(4.0), true).unwrap();
//! let b = create_cuboid(DVec3::splat(2.0), true).unwrap();
//! let hollow = difference(&a, &b).unwrap();
//! assert!((hollow.volume() - 56.0).abs() < 1e-6);
//! ```

mod bsp;
mod plane;
mod polygon;


use crate::error::KernelError;
use crate::mesh::Mesh;
use crate::weld::VertexWelder;
use bsp::BspNode;
use config::constants::{MIN_TRIANGLE_AREA, WELD_TOLERANCE};
use polygon::Polygon;
use tracing::debug;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Compute union of two meshes.
pub fn union(a: &Mesh, b: &Mesh) -> Result<Mesh, KernelError> {
    let polys_a = mesh_to_polygons(a);
    let polys_b = mesh_to_polygons(b);

    if polys_a.is_empty() {
        return Ok(b.clone());
    }
    if polys_b.is_empty() {
        return Ok(a.clone());
    }

    let mut bsp_a = BspNode::new(polys_a);
    let mut bsp_b = BspNode::new(polys_b);

    bsp_a.clip_to(&bsp_b);
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();

    let mut result = bsp_a.all_polygons();
    result.extend(bsp_b.all_polygons());

    finish("union", a, b, result)
}

/// Compute difference of two meshes (A - B).
pub fn difference(a: &Mesh, b: &Mesh) -> Result<Mesh, KernelError> {
    let polys_a = mesh_to_polygons(a);
    let polys_b = mesh_to_polygons(b);

    if polys_a.is_empty() {
        return Ok(Mesh::new());
    }
    if polys_b.is_empty() {
        return Ok(a.clone());
    }

    let mut bsp_a = BspNode::new(polys_a);
    let mut bsp_b = BspNode::new(polys_b);

    // A - B = ~(~A | B)
    bsp_a.invert();
    bsp_a.clip_to(&bsp_b);
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();

    let mut result = bsp_a.all_polygons();
    result.extend(bsp_b.all_polygons());
    result.iter_mut().for_each(Polygon::flip);

    finish("difference", a, b, result)
}

/// Compute intersection of two meshes.
pub fn intersection(a: &Mesh, b: &Mesh) -> Result<Mesh, KernelError> {
    let polys_a = mesh_to_polygons(a);
    let polys_b = mesh_to_polygons(b);

    if polys_a.is_empty() || polys_b.is_empty() {
        return Ok(Mesh::new());
    }

    let mut bsp_a = BspNode::new(polys_a);
    let mut bsp_b = BspNode::new(polys_b);

    // A & B = ~(~A | ~B)
    bsp_a.invert();
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_a.clip_to(&bsp_b);
    bsp_b.clip_to(&bsp_a);

    let mut result = bsp_a.all_polygons();
    result.extend(bsp_b.all_polygons());
    result.iter_mut().for_each(Polygon::flip);

    finish("intersection", a, b, result)
}

// =============================================================================
// CONVERSION HELPERS
// =============================================================================

fn finish(op: &str, a: &Mesh, b: &Mesh, polygons: Vec<Polygon>) -> Result<Mesh, KernelError> {
    let mesh = polygons_to_mesh(&polygons);
    mesh.check_limits()?;
    debug!(
        op,
        lhs = a.triangle_count(),
        rhs = b.triangle_count(),
        result = mesh.triangle_count(),
        "boolean"
    );
    Ok(mesh)
}

/// Convert mesh triangles to BSP polygons, skipping degenerate ones.
fn mesh_to_polygons(mesh: &Mesh) -> Vec<Polygon> {
    (0..mesh.triangle_count())
        .filter_map(|i| Polygon::from_vertices(mesh.triangle_positions(i).to_vec()))
        .collect()
}

/// Convert convex polygons back to a welded, fan-triangulated mesh.
fn polygons_to_mesh(polygons: &[Polygon]) -> Mesh {
    let mut welder = VertexWelder::new(WELD_TOLERANCE);
    let mut triangles = Vec::new();

    for poly in polygons {
        let indices: Vec<u32> = poly.vertices().iter().map(|&v| welder.insert(v)).collect();
        for i in 1..indices.len() - 1 {
            let tri = [indices[0], indices[i], indices[i + 1]];
            if tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2] {
                triangles.push(tri);
            }
        }
    }

    let mut mesh = Mesh::with_capacity(welder.len(), triangles.len());
    for p in welder.into_positions() {
        mesh.add_vertex(p);
    }
    for [a, b, c] in triangles {
        let (pa, pb, pc) = (mesh.vertex(a), mesh.vertex(b), mesh.vertex(c));
        if (pb - pa).cross(pc - pa).length() * 0.5 > MIN_TRIANGLE_AREA {
            mesh.add_triangle(a, b, c);
        }
    }
    mesh
}
