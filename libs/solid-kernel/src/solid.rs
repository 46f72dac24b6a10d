//! # Solid
//!
//! Opaque solid handle composed through declarative operations. Callers
//! never see the mesh representation except through [`Solid::mesh`], which
//! exists for export and inspection.

use crate::error::KernelError;
use crate::mesh::Mesh;
use crate::ops::boolean;
use crate::ops::extrude::{self, ExtrudeMode, RevolveFrame};
use crate::ops::fillet::fillet_edges;
use crate::primitives::{create_cuboid, create_cylinder};
use crate::sketch::{Profile, SketchPlane};
use crate::topology::{extract_edges, EdgeSelection};
use config::constants::Tessellation;
use glam::{DMat4, DQuat, DVec3};

/// A closed solid.
///
/// # Example
///
/// ```rust
/// use solid_kernel::Solid;
/// use glam::DVec3;
///
/// let body = Solid::cuboid(DVec3::splat(10.0)).unwrap();
/// let cut = Solid::cuboid(DVec3::new(20.0, 20.0, 2.0)).unwrap();
/// let slotted = body.difference(&cut).unwrap();
/// assert!((slotted.volume() - 800.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solid {
    mesh: Mesh,
}

impl Solid {
    /// Wraps an existing closed, outward-facing mesh.
    pub fn from_mesh(mesh: Mesh) -> Self {
        Self { mesh }
    }

    // =========================================================================
    // CONSTRUCTION
    // =========================================================================

    /// Cylinder along +Z with its base on z = 0.
    pub fn cylinder(radius: f64, height: f64, segments: u32) -> Result<Self, KernelError> {
        create_cylinder(radius, height, segments).map(Self::from_mesh)
    }

    /// Box centred at the origin.
    pub fn cuboid(size: DVec3) -> Result<Self, KernelError> {
        create_cuboid(size, true).map(Self::from_mesh)
    }

    /// Linear extrusion of a profile drawn on `plane`.
    pub fn extrude(
        profile: &Profile,
        plane: &SketchPlane,
        amount: f64,
        mode: ExtrudeMode,
    ) -> Result<Self, KernelError> {
        extrude::linear_extrude(profile, plane, amount, mode).map(Self::from_mesh)
    }

    /// Full revolution of a profile in (radial, axial) coordinates.
    pub fn revolve(profile: &Profile, frame: &RevolveFrame, segments: u32) -> Result<Self, KernelError> {
        extrude::revolve(profile, frame, segments).map(Self::from_mesh)
    }

    // =========================================================================
    // TRANSFORMS
    // =========================================================================

    pub fn translated(mut self, offset: DVec3) -> Self {
        self.mesh.translate(offset);
        self
    }

    pub fn rotated(self, rotation: DQuat) -> Self {
        self.transformed(&DMat4::from_quat(rotation))
    }

    pub fn transformed(mut self, matrix: &DMat4) -> Self {
        self.mesh.transform(matrix);
        self
    }

    // =========================================================================
    // BOOLEANS
    // =========================================================================

    pub fn union(&self, other: &Solid) -> Result<Self, KernelError> {
        boolean::union(&self.mesh, &other.mesh).map(Self::from_mesh)
    }

    pub fn difference(&self, other: &Solid) -> Result<Self, KernelError> {
        boolean::difference(&self.mesh, &other.mesh).map(Self::from_mesh)
    }

    pub fn intersection(&self, other: &Solid) -> Result<Self, KernelError> {
        boolean::intersection(&self.mesh, &other.mesh).map(Self::from_mesh)
    }

    // =========================================================================
    // EDGES
    // =========================================================================

    /// All feature edges of the solid.
    pub fn edges(&self) -> EdgeSelection {
        EdgeSelection::new(extract_edges(&self.mesh))
    }

    /// Rounds the selected edges.
    pub fn fillet(
        &self,
        edges: &EdgeSelection,
        radius: f64,
        tess: &Tessellation,
    ) -> Result<Self, KernelError> {
        fillet_edges(&self.mesh, edges.as_slice(), radius, tess).map(Self::from_mesh)
    }

    // =========================================================================
    // METRICS
    // =========================================================================

    /// Enclosed volume in cubic model units.
    pub fn volume(&self) -> f64 {
        self.mesh.volume()
    }

    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        self.mesh.bounding_box()
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    pub fn is_empty(&self) -> bool {
        self.mesh.is_empty()
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::GeomType;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_rotated_cylinder_lies_along_x() {
        let cylinder = Solid::cylinder(17.5, 107.5, 48)
            .unwrap()
            .rotated(DQuat::from_rotation_y(FRAC_PI_2));
        let (min, max) = cylinder.bounding_box();
        assert_relative_eq!(min.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(max.x, 107.5, epsilon = 1e-9);
        assert!(cylinder.volume() > 0.0);
    }

    #[test]
    fn test_translated_cuboid() {
        let cuboid = Solid::cuboid(DVec3::new(30.1, 37.0, 17.0))
            .unwrap()
            .translated(DVec3::new(15.0, 0.0, 0.0));
        let (min, max) = cuboid.bounding_box();
        assert_relative_eq!(min.x, -0.05, epsilon = 1e-12);
        assert_relative_eq!(max.x, 30.05, epsilon = 1e-12);
    }

    #[test]
    fn test_cylinder_edges_are_circles() {
        let edges = Solid::cylinder(5.0, 10.0, 32).unwrap().edges();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges.filter_by_type(GeomType::Circle).len(), 2);
    }

    #[test]
    fn test_fillet_through_solid() {
        let cube = Solid::cuboid(DVec3::splat(4.0)).unwrap();
        let edges = cube.edges().filter_by(|e| e.center().z > 1.9 && e.center().x > 1.9);
        assert_eq!(edges.len(), 1);

        let rounded = cube.fillet(&edges, 1.0, &Tessellation::default()).unwrap();
        assert!(rounded.volume() < cube.volume());
    }
}
