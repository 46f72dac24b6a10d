//! # Edge Predicates
//!
//! Geometric predicates that pick the bracket edges to round.

use crate::params::BracketParams;
use config::constants::{RIM_MIN_RADIUS, RIM_POSITION_TOLERANCE, SLOT_EDGE_TOLERANCE};
use solid_kernel::{Axis, EdgeSelection, GeomType, Solid};

/// Outer rim circles at both end faces.
///
/// Keeps circles larger than `RIM_MIN_RADIUS` (mounting holes are always
/// smaller) whose centre lies on the `x = 0` or `x = total_length` face.
pub fn rim_edges(solid: &Solid, params: &BracketParams) -> EdgeSelection {
    let length = params.total_length();
    solid
        .edges()
        .filter_by_type(GeomType::Circle)
        .filter_by(|e| e.radius().is_some_and(|r| r > RIM_MIN_RADIUS))
        .filter_by(|e| {
            let x = e.center().x;
            x.abs() < RIM_POSITION_TOLERANCE || (x - length).abs() < RIM_POSITION_TOLERANCE
        })
}

/// Straight edges along Y where a slot floor meets the slot faces.
pub fn slot_transition_edges(solid: &Solid, params: &BracketParams) -> EdgeSelection {
    let [floor_a, floor_b] = params.slot_floors();
    solid.edges().filter_by_axis(Axis::Y).filter_by(|e| {
        let x = e.center().x;
        (x - floor_a).abs() < SLOT_EDGE_TOLERANCE || (x - floor_b).abs() < SLOT_EDGE_TOLERANCE
    })
}
