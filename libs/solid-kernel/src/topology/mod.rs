//! # Topology
//!
//! Edge structure recovered from triangle meshes: feature-edge extraction,
//! T-junction repair, edge classification and selection.

mod edge;
mod extract;
mod repair;
mod selection;

#[cfg(test)]
mod tests;

pub use edge::{Axis, CircleGeometry, Convexity, Edge, EdgeSample, GeomType};
pub use extract::extract_edges;
pub use repair::repair_t_junctions;
pub use selection::EdgeSelection;
