//! # Vertex Welding
//!
//! Merges positions that lie within a tolerance of each other so a triangle
//! soup produced by booleans can be turned back into an indexed mesh.
//!
//! Lookups use a uniform hash grid with the tolerance as cell size; a query
//! inspects the 27 neighbouring cells so points straddling a cell boundary
//! still merge.

use crate::mesh::Mesh;
use glam::DVec3;
use std::collections::HashMap;

type Cell = (i64, i64, i64);

/// Incrementally deduplicates vertex positions.
///
/// The grid map is only used for lookups; output order is the insertion order,
/// which keeps welding deterministic.
#[derive(Debug)]
pub struct VertexWelder {
    tolerance: f64,
    positions: Vec<DVec3>,
    grid: HashMap<Cell, Vec<u32>>,
}

impl VertexWelder {
    /// Creates a welder merging points closer than `tolerance`.
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            positions: Vec::new(),
            grid: HashMap::new(),
        }
    }

    fn cell(&self, p: DVec3) -> Cell {
        let s = p / self.tolerance;
        (s.x.floor() as i64, s.y.floor() as i64, s.z.floor() as i64)
    }

    /// Returns the index of an existing vertex within tolerance of `p`, or
    /// inserts `p` as a new vertex.
    pub fn insert(&mut self, p: DVec3) -> u32 {
        if let Some(existing) = self.find(p) {
            return existing;
        }
        let index = self.positions.len() as u32;
        self.positions.push(p);
        let cell = self.cell(p);
        self.grid.entry(cell).or_default().push(index);
        index
    }

    /// Finds the closest existing vertex within tolerance of `p`.
    pub fn find(&self, p: DVec3) -> Option<u32> {
        let (cx, cy, cz) = self.cell(p);
        let tol_sq = self.tolerance * self.tolerance;
        let mut best: Option<(u32, f64)> = None;

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = self.grid.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    for &index in bucket {
                        let d = self.positions[index as usize].distance_squared(p);
                        if d <= tol_sq && best.map_or(true, |(_, bd)| d < bd) {
                            best = Some((index, d));
                        }
                    }
                }
            }
        }

        best.map(|(index, _)| index)
    }

    /// Number of distinct vertices so far.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True when no vertex has been inserted.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Consumes the welder and returns the distinct positions.
    pub fn into_positions(self) -> Vec<DVec3> {
        self.positions
    }
}

/// Rebuilds a mesh with coincident vertices merged and collapsed triangles
/// dropped.
pub fn weld_mesh(mesh: &Mesh, tolerance: f64) -> Mesh {
    let mut welder = VertexWelder::new(tolerance);
    let remap: Vec<u32> = mesh.vertices().iter().map(|&v| welder.insert(v)).collect();

    let mut triangles = Vec::with_capacity(mesh.triangle_count());
    for &[a, b, c] in mesh.triangles() {
        let (a, b, c) = (remap[a as usize], remap[b as usize], remap[c as usize]);
        if a != b && b != c && a != c {
            triangles.push([a, b, c]);
        }
    }

    let mut welded = Mesh::with_capacity(welder.len(), triangles.len());
    for p in welder.into_positions() {
        welded.add_vertex(p);
    }
    for [a, b, c] in triangles {
        welded.add_triangle(a, b, c);
    }
    welded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welder_merges_close_points() {
        let mut welder = VertexWelder::new(1e-5);
        let a = welder.insert(DVec3::new(1.0, 2.0, 3.0));
        let b = welder.insert(DVec3::new(1.0 + 1e-7, 2.0, 3.0 - 1e-7));
        assert_eq!(a, b);
        assert_eq!(welder.len(), 1);
    }

    #[test]
    fn test_welder_merges_across_cell_boundary() {
        let mut welder = VertexWelder::new(1e-3);
        // 0.0 and -1e-6 fall into different grid cells
        let a = welder.insert(DVec3::ZERO);
        let b = welder.insert(DVec3::new(-1e-6, 0.0, 0.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_welder_keeps_distinct_points() {
        let mut welder = VertexWelder::new(1e-5);
        let a = welder.insert(DVec3::ZERO);
        let b = welder.insert(DVec3::new(1e-3, 0.0, 0.0));
        assert_ne!(a, b);
        assert_eq!(welder.len(), 2);
    }

    #[test]
    fn test_weld_mesh_drops_collapsed_triangles() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        mesh.add_vertex(DVec3::Y);
        mesh.add_vertex(DVec3::new(1e-9, 0.0, 0.0));
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(0, 3, 2);

        let welded = weld_mesh(&mesh, 1e-5);
        assert_eq!(welded.vertex_count(), 3);
        assert_eq!(welded.triangle_count(), 1);
    }
}
