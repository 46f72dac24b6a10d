//! # Edge Selection
//!
//! Chainable filters over the edges of a solid, mirroring the way CAD
//! scripts narrow an edge set down before filleting it.
//!
//! ```rust
//! use solid_kernel::{GeomType, Solid};
//!
//! let cylinder = Solid::cylinder(17.5, 50.0, 48).unwrap();
//! let rims = cylinder
//!     .edges()
//!     .filter_by_type(GeomType::Circle)
//!     .filter_by(|e| e.radius().is_some_and(|r| r > 10.0));
//! assert_eq!(rims.len(), 2);
//! ```

use super::edge::{Axis, Edge, GeomType};

/// Tolerance used when grouping arcs into distinct circles.
const SAME_CIRCLE_TOLERANCE: f64 = 1e-3;

/// An ordered set of edges.
#[derive(Debug, Clone, Default)]
pub struct EdgeSelection {
    edges: Vec<Edge>,
}

impl EdgeSelection {
    pub fn new(edges: Vec<Edge>) -> Self {
        Self { edges }
    }

    /// Keeps edges of the given geometric type.
    pub fn filter_by_type(self, geom_type: GeomType) -> Self {
        self.filter_by(|e| e.geom_type() == geom_type)
    }

    /// Keeps line edges parallel to `axis`.
    pub fn filter_by_axis(self, axis: Axis) -> Self {
        self.filter_by(|e| e.direction().is_some_and(|d| axis.is_parallel(d)))
    }

    /// Keeps edges matching `predicate`.
    pub fn filter_by(self, predicate: impl Fn(&Edge) -> bool) -> Self {
        Self {
            edges: self.edges.into_iter().filter(|e| predicate(e)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }

    pub fn as_slice(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of distinct circles the circular edges lie on.
    ///
    /// Arcs of one circle cut apart by other features count once.
    pub fn distinct_circles(&self) -> usize {
        let mut seen: Vec<_> = Vec::new();
        for circle in self.edges.iter().filter_map(Edge::circle) {
            if !seen
                .iter()
                .any(|other| circle.same_circle(other, SAME_CIRCLE_TOLERANCE))
            {
                seen.push(*circle);
            }
        }
        seen.len()
    }
}

impl IntoIterator for EdgeSelection {
    type Item = Edge;
    type IntoIter = std::vec::IntoIter<Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.into_iter()
    }
}

impl<'a> IntoIterator for &'a EdgeSelection {
    type Item = &'a Edge;
    type IntoIter = std::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}
