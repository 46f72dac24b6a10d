//! # Build Errors

use solid_kernel::KernelError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or writing a bracket.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A parameter is out of range
    #[error("Invalid parameter `{name}`: {message}")]
    InvalidParameter { name: &'static str, message: String },

    /// A mounting hole breaks out of the body or into a slot
    #[error("Hole clearance violated: {message}")]
    HoleClearance { message: String },

    /// The geometry kernel rejected an operation
    #[error(transparent)]
    Kernel(#[from] KernelError),

    /// Writing outputs failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BuildError {
    /// Creates an invalid parameter error.
    pub fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    /// Creates a hole clearance error.
    pub fn clearance(message: impl Into<String>) -> Self {
        Self::HoleClearance {
            message: message.into(),
        }
    }

    /// Creates an I/O error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
