//! # T-Junction Repair
//!
//! BSP booleans split polygons independently, so a vertex created on one
//! side of an edge often has no counterpart on the other side. Such a vertex
//! sits in the middle of a neighbouring triangle's edge and breaks edge
//! adjacency. This pass finds those vertices and re-triangulates the
//! affected triangles so that every mesh edge is shared by whole edges.

use crate::mesh::Mesh;
use glam::DVec3;
use std::collections::HashMap;

type Cell = (i64, i64, i64);

/// Grid resolution relative to the bounding box diagonal.
const GRID_DIVISIONS: f64 = 32.0;

struct VertexGrid {
    cell_size: f64,
    cells: HashMap<Cell, Vec<u32>>,
}

impl VertexGrid {
    fn new(mesh: &Mesh) -> Self {
        let (min, max) = mesh.bounding_box();
        let cell_size = ((max - min).length() / GRID_DIVISIONS).max(1e-6);
        let mut grid = Self {
            cell_size,
            cells: HashMap::new(),
        };
        for (i, &v) in mesh.vertices().iter().enumerate() {
            let cell = grid.cell(v);
            grid.cells.entry(cell).or_default().push(i as u32);
        }
        grid
    }

    fn cell(&self, p: DVec3) -> Cell {
        let s = p / self.cell_size;
        (s.x.floor() as i64, s.y.floor() as i64, s.z.floor() as i64)
    }

    /// Vertex indices in all cells overlapping the box `[min, max]`.
    fn query(&self, min: DVec3, max: DVec3) -> impl Iterator<Item = u32> + '_ {
        let (lo, hi) = (self.cell(min), self.cell(max));
        (lo.0..=hi.0).flat_map(move |x| {
            (lo.1..=hi.1).flat_map(move |y| {
                (lo.2..=hi.2).flat_map(move |z| {
                    self.cells
                        .get(&(x, y, z))
                        .map(|bucket| bucket.as_slice())
                        .unwrap_or(&[])
                        .iter()
                        .copied()
                })
            })
        })
    }
}

/// Vertices lying strictly inside segment `a`-`b`, ordered from `a` to `b`.
fn vertices_on_segment(mesh: &Mesh, grid: &VertexGrid, a: u32, b: u32, tolerance: f64) -> Vec<u32> {
    let (pa, pb) = (mesh.vertex(a), mesh.vertex(b));
    let d = pb - pa;
    let len_sq = d.length_squared();
    if len_sq <= tolerance * tolerance {
        return Vec::new();
    }
    let len = len_sq.sqrt();
    let pad = DVec3::splat(tolerance);

    let mut hits: Vec<(f64, u32)> = grid
        .query(pa.min(pb) - pad, pa.max(pb) + pad)
        .filter(|&v| v != a && v != b)
        .filter_map(|v| {
            let p = mesh.vertex(v);
            let t = (p - pa).dot(d) / len_sq;
            let along = t * len;
            let inside = along > tolerance && along < len - tolerance;
            (inside && (pa + d * t).distance(p) <= tolerance).then_some((t, v))
        })
        .collect();

    hits.sort_by(|x, y| x.0.total_cmp(&y.0).then(x.1.cmp(&y.1)));
    hits.dedup_by_key(|h| h.1);
    hits.into_iter().map(|(_, v)| v).collect()
}

/// Splits triangles whose edges contain other mesh vertices.
///
/// Affected triangles are replaced by a fan around their centroid through all
/// boundary vertices, which keeps the surface (and the volume) unchanged.
pub fn repair_t_junctions(mesh: &Mesh, tolerance: f64) -> Mesh {
    let grid = VertexGrid::new(mesh);
    let mut cache: HashMap<(u32, u32), Vec<u32>> = HashMap::new();

    let mut repaired = Mesh::with_capacity(mesh.vertex_count(), mesh.triangle_count());
    for &v in mesh.vertices() {
        repaired.add_vertex(v);
    }

    for &tri in mesh.triangles() {
        let mut boundary = Vec::with_capacity(3);
        for k in 0..3 {
            let (a, b) = (tri[k], tri[(k + 1) % 3]);
            boundary.push(a);
            let key = (a.min(b), a.max(b));
            let on_edge = cache
                .entry(key)
                .or_insert_with(|| vertices_on_segment(mesh, &grid, key.0, key.1, tolerance));
            if a < b {
                boundary.extend(on_edge.iter().copied());
            } else {
                boundary.extend(on_edge.iter().rev().copied());
            }
        }

        if boundary.len() == 3 {
            repaired.add_triangle(tri[0], tri[1], tri[2]);
            continue;
        }

        let [p0, p1, p2] = tri.map(|i| mesh.vertex(i));
        let centroid = repaired.add_vertex((p0 + p1 + p2) / 3.0);
        for i in 0..boundary.len() {
            repaired.add_triangle(centroid, boundary[i], boundary[(i + 1) % boundary.len()]);
        }
    }

    repaired
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repair_splits_t_junction() {
        // Two triangles on top of a long edge, one triangle below it
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0)); // 0
        mesh.add_vertex(DVec3::new(2.0, 0.0, 0.0)); // 1
        mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0)); // 2, T-junction
        mesh.add_vertex(DVec3::new(1.0, 1.0, 0.0)); // 3
        mesh.add_vertex(DVec3::new(1.0, -1.0, 0.0)); // 4
        mesh.add_triangle(0, 2, 3);
        mesh.add_triangle(2, 1, 3);
        mesh.add_triangle(0, 4, 1);

        let area = mesh.surface_area();
        let repaired = repair_t_junctions(&mesh, 1e-6);

        // Lower triangle becomes a 4-triangle fan
        assert_eq!(repaired.triangle_count(), 2 + 4);
        assert!((repaired.surface_area() - area).abs() < 1e-12);
        let sharing = repaired
            .triangles()
            .iter()
            .filter(|t| t.contains(&1) && t.contains(&2))
            .count();
        assert_eq!(sharing, 2);
    }

    #[test]
    fn test_repair_leaves_clean_mesh_alone() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        mesh.add_vertex(DVec3::Y);
        mesh.add_triangle(0, 1, 2);

        let repaired = repair_t_junctions(&mesh, 1e-6);
        assert_eq!(repaired.triangles(), mesh.triangles());
        assert_eq!(repaired.vertex_count(), 3);
    }
}
