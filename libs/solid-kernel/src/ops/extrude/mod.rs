//! # Extrusion Operations
//!
//! Sweeps of 2D [`Profile`](crate::sketch::Profile)s into closed meshes:
//! - **linear_extrude**: along the normal of a sketch plane, one-sided or
//!   symmetric
//! - **revolve**: full revolution around an arbitrary axis

mod linear;
mod revolve;


pub use linear::{linear_extrude, ExtrudeMode};
pub use revolve::{revolve, RevolveFrame};
