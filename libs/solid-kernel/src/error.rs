//! # Kernel Errors
//!
//! Error types for solid construction, booleans, fillets and export.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur inside the solid kernel.
#[derive(Debug, Error)]
pub enum KernelError {
    /// Degenerate geometry (zero size, too few points, ...)
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// Operation the kernel does not support for the given input
    #[error("Unsupported: {message}")]
    Unsupported { message: String },

    /// Boolean operation failed
    #[error("Boolean operation failed: {message}")]
    BooleanFailed { message: String },

    /// Fillet could not be constructed
    #[error("Fillet failed: {message}")]
    FilletFailed { message: String },

    /// Too many vertices
    #[error("Too many vertices: {count} (max: {max})")]
    TooManyVertices { count: usize, max: usize },

    /// Too many triangles
    #[error("Too many triangles: {count} (max: {max})")]
    TooManyTriangles { count: usize, max: usize },

    /// Writing an export file failed
    #[error("Failed to export {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading a mesh file failed
    #[error("Failed to import {path}: {source}")]
    Import {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl KernelError {
    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates an unsupported operation error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }

    /// Creates a boolean operation failed error.
    pub fn boolean_failed(message: impl Into<String>) -> Self {
        Self::BooleanFailed {
            message: message.into(),
        }
    }

    /// Creates a fillet failed error.
    pub fn fillet_failed(message: impl Into<String>) -> Self {
        Self::FilletFailed {
            message: message.into(),
        }
    }

    /// Creates an export error for the given path.
    pub fn export(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Export {
            path: path.into(),
            source,
        }
    }

    /// Creates an import error for the given path.
    pub fn import(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Import {
            path: path.into(),
            source,
        }
    }
}
