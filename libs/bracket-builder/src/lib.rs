//! # Bracket Builder
//!
//! Parametric bed-rail bracket: a cylindrical body with two board slots,
//! optional slot fillets, gussets, mounting holes and rounded rims.
//!
//! ## Pipeline
//!
//! ```text
//! BracketParams → BracketBuilder::build → Bracket { solid, report } → STL
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bracket_builder::{write_outputs, BracketBuilder, Variant};
//! use std::path::Path;
//!
//! let variant = Variant::Reinforced;
//! let bracket = BracketBuilder::new(variant.params()).build().unwrap();
//! write_outputs(&bracket.solid, Path::new("exports/stl"), variant.output_stem()).unwrap();
//! ```

pub mod builder;
pub mod error;
pub mod holes;
pub mod output;
pub mod params;
pub mod report;
pub mod selection;

pub use builder::{Bracket, BracketBuilder};
pub use error::BuildError;
pub use holes::{HoleClearance, HoleOffsets};
pub use output::{show, write_outputs};
pub use params::{BaseBody, BracketParams, Gussets, HolePattern, HolePlacement, Variant};
pub use report::{BuildReport, FilletStep, HoleReport};
pub use selection::{rim_edges, slot_transition_edges};
