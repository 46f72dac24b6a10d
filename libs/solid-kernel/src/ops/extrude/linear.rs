//! # Linear Extrusion
//!
//! Extrudes a profile along the normal of its sketch plane.
//!
//! ## Algorithm
//!
//! 1. Place the profile ring at the start and end offsets along the normal
//! 2. Connect consecutive ring vertices with two side triangles
//! 3. Close both ends with ear-clipped caps

use crate::error::KernelError;
use crate::mesh::Mesh;
use crate::sketch::{triangulate, Profile, SketchPlane};

/// Direction of a linear extrusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtrudeMode {
    /// From the sketch plane to `amount` along its normal.
    #[default]
    OneSided,
    /// `amount` to each side of the sketch plane.
    Symmetric,
}

/// Extrudes `profile` drawn on `plane` by `amount`.
///
/// # Example
///
/// ```rust
/// use solid_kernel::ops::extrude::{linear_extrude, ExtrudeMode};
/// use solid_kernel::sketch::{Profile, SketchPlane};
///
/// let square = Profile::rectangle(2.0, 2.0).unwrap();
/// let mesh = linear_extrude(&square, &SketchPlane::XY, 3.0, ExtrudeMode::OneSided).unwrap();
/// assert!((mesh.volume() - 12.0).abs() < 1e-9);
/// ```
pub fn linear_extrude(
    profile: &Profile,
    plane: &SketchPlane,
    amount: f64,
    mode: ExtrudeMode,
) -> Result<Mesh, KernelError> {
    if amount <= 0.0 {
        return Err(KernelError::degenerate(format!(
            "Extrusion amount must be positive: {}",
            amount
        )));
    }

    let (start, end) = match mode {
        ExtrudeMode::OneSided => (0.0, amount),
        ExtrudeMode::Symmetric => (-amount, amount),
    };

    let points = profile.points();
    let n = points.len();
    let caps = triangulate(points)?;
    let mut mesh = Mesh::with_capacity(2 * n, 2 * n + 2 * caps.len());

    let bottom: Vec<u32> = points
        .iter()
        .map(|&p| mesh.add_vertex(plane.to_world(p) + plane.normal * start))
        .collect();
    let top: Vec<u32> = points
        .iter()
        .map(|&p| mesh.add_vertex(plane.to_world(p) + plane.normal * end))
        .collect();

    for i in 0..n {
        let j = (i + 1) % n;
        mesh.add_triangle(bottom[i], bottom[j], top[j]);
        mesh.add_triangle(bottom[i], top[j], top[i]);
    }

    for [a, b, c] in caps {
        mesh.add_triangle(bottom[a], bottom[c], bottom[b]);
        mesh.add_triangle(top[a], top[b], top[c]);
    }

    Ok(mesh)
}
