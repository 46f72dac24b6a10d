//! # Primitives
//!
//! Mesh generation for the solid primitives used by the bracket pipeline.

pub mod cuboid;
pub mod cylinder;

pub use cuboid::create_cuboid;
pub use cylinder::create_cylinder;
