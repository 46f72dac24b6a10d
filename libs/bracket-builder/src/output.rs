//! # Output
//!
//! Writes the exported mesh and optionally opens it in the system viewer.

use crate::error::BuildError;
use solid_kernel::{export_stl, Solid};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Exports `solid` as `<output_dir>/<stem>.stl`, creating the directory if
/// needed. Returns the written path.
pub fn write_outputs(solid: &Solid, output_dir: &Path, stem: &str) -> Result<PathBuf, BuildError> {
    std::fs::create_dir_all(output_dir).map_err(|e| BuildError::io(output_dir, e))?;
    let path = output_dir.join(format!("{}.stl", stem));
    export_stl(solid, &path)?;
    info!(path = %path.display(), "Model saved");
    Ok(path)
}

/// Opens `path` in the default viewer. A missing viewer is not an error.
pub fn show(path: &Path) -> bool {
    match open::that(path) {
        Ok(()) => true,
        Err(error) => {
            warn!(path = %path.display(), %error, "Could not launch viewer");
            false
        }
    }
}
