//! # Mesh Operations
//!
//! Booleans, extrusions and fillets over [`Mesh`](crate::Mesh).

pub mod boolean;
pub mod extrude;
pub mod fillet;
