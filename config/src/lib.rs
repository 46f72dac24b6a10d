//! # Config Crate
//!
//! Centralized configuration constants for the bracket pipeline.
//! All magic numbers and tunable parameters are defined here so the kernel
//! and the bracket builder agree on tolerances and tessellation.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{Tessellation, EPSILON, RIM_MIN_RADIUS};
//!
//! let value: f64 = 0.00000000001;
//! assert!(value.abs() < EPSILON);
//!
//! let tess = Tessellation::default();
//! assert!(tess.segments_for_radius(1.65) <= tess.circle_segments);
//! assert!(RIM_MIN_RADIUS > 0.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Millimetre Units**: Every length is in millimetres
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
