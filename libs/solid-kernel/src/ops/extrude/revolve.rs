//! # Revolution
//!
//! Revolves a profile a full turn around an arbitrary axis.
//!
//! The profile is read in (radial, axial) coordinates: `x` is the distance
//! from the axis and `y` the position along it. Ring `k` lies at angle
//! `2 * PI * k / segments` from the frame's reference direction, which lets
//! callers line the rings up with an existing tessellation.

use crate::error::KernelError;
use crate::mesh::Mesh;
use crate::sketch::Profile;
use config::constants::AXIS_PARALLEL_TOLERANCE;
use glam::DVec3;
use std::f64::consts::TAU;

/// Axis and angular origin of a revolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevolveFrame {
    pub origin: DVec3,
    /// Unit axis direction.
    pub axis: DVec3,
    /// Unit direction perpendicular to `axis` where angle zero lies.
    pub reference: DVec3,
}

impl RevolveFrame {
    /// Frame around `axis` with an arbitrary perpendicular reference.
    pub fn new(origin: DVec3, axis: DVec3) -> Result<Self, KernelError> {
        let axis = axis
            .try_normalize()
            .ok_or_else(|| KernelError::degenerate("Revolve axis has zero length"))?;
        Ok(Self {
            origin,
            axis,
            reference: axis.any_orthonormal_vector(),
        })
    }

    /// Replaces the reference direction, projecting it perpendicular to the
    /// axis.
    pub fn with_reference(self, reference: DVec3) -> Result<Self, KernelError> {
        let projected = reference - self.axis * reference.dot(self.axis);
        if projected.length_squared() <= AXIS_PARALLEL_TOLERANCE * reference.length_squared() {
            return Err(KernelError::degenerate(
                "Revolve reference direction is parallel to the axis",
            ));
        }
        Ok(Self {
            reference: projected.normalize(),
            ..self
        })
    }

    fn point(&self, radial: f64, axial: f64, angle: f64) -> DVec3 {
        let binormal = self.axis.cross(self.reference);
        self.origin
            + self.axis * axial
            + (self.reference * angle.cos() + binormal * angle.sin()) * radial
    }
}

/// Revolves `profile` a full turn around `frame`.
///
/// All profile points must have a positive radial coordinate.
pub fn revolve(profile: &Profile, frame: &RevolveFrame, segments: u32) -> Result<Mesh, KernelError> {
    if segments < 3 {
        return Err(KernelError::degenerate(format!(
            "Revolve segments must be at least 3: {}",
            segments
        )));
    }
    let points = profile.points();
    if points.iter().any(|p| p.x <= 0.0) {
        return Err(KernelError::degenerate(
            "Revolve profile must stay strictly off the axis",
        ));
    }

    let n = points.len();
    let s = segments as usize;
    let mut mesh = Mesh::with_capacity(n * s, 2 * n * s);

    let rings: Vec<Vec<u32>> = (0..s)
        .map(|k| {
            let angle = TAU * k as f64 / segments as f64;
            points
                .iter()
                .map(|p| mesh.add_vertex(frame.point(p.x, p.y, angle)))
                .collect()
        })
        .collect();

    for k in 0..s {
        let (ring, next) = (&rings[k], &rings[(k + 1) % s]);
        for i in 0..n {
            let j = (i + 1) % n;
            mesh.add_triangle(ring[i], next[j], ring[j]);
            mesh.add_triangle(ring[i], next[i], next[j]);
        }
    }

    Ok(mesh)
}
