//! # Solid Kernel
//!
//! Mesh-based solid modelling for parametric part scripts.
//!
//! ## Architecture
//!
//! ```text
//! primitives / sketch + extrude → Solid → booleans → edges → fillet → STL
//! ```
//!
//! ## Algorithms
//!
//! All algorithms are pure Rust:
//! - **Boolean Operations**: BSP trees (csg.js algorithm)
//! - **Triangulation**: Ear clipping with robust orientation predicates
//! - **Edges**: Dihedral-angle feature detection, chained and fitted to
//!   lines and circles
//! - **Fillets**: Boolean cutters and fillers swept along the edge
//!
//! ## Usage
//!
//! ```rust
//! use solid_kernel::{GeomType, Solid};
//! use config::constants::Tessellation;
//!
//! let tess = Tessellation::default();
//! let body = Solid::cylinder(17.5, 40.0, tess.circle_segments).unwrap();
//! let rims = body.edges().filter_by_type(GeomType::Circle);
//! let rounded = body.fillet(&rims, 1.0, &tess).unwrap();
//! assert!(rounded.volume() < body.volume());
//! ```

pub mod error;
pub mod export;
pub mod mesh;
pub mod ops;
pub mod primitives;
pub mod sketch;
pub mod solid;
pub mod topology;
pub mod weld;

pub use error::KernelError;
pub use export::{export_stl, load_stl};
pub use mesh::Mesh;
pub use ops::extrude::{ExtrudeMode, RevolveFrame};
pub use sketch::{Profile, SketchPlane};
pub use solid::Solid;
pub use topology::{Axis, Convexity, Edge, EdgeSelection, GeomType};
