//! # Cylinder Primitive
//!
//! Generates mesh for Z-axis cylinders.

use crate::error::KernelError;
use crate::mesh::Mesh;
use glam::DVec3;
use std::f64::consts::PI;

/// Creates a cylinder mesh along +Z with its base on z = 0.
///
/// Ring vertex `j` sits at angle `2 * PI * j / segments` measured from +X, so
/// the tessellation phase of a cylinder is known to anything that needs to
/// line up with it (revolved fillet tools, for example).
///
/// # Arguments
///
/// * `radius` - Cylinder radius
/// * `height` - Height along Z axis
/// * `segments` - Number of segments around circumference
///
/// # Example
///
/// ```rust
/// use solid_kernel::primitives::create_cylinder;
///
/// let mesh = create_cylinder(17.5, 107.5, 48).unwrap();
/// assert_eq!(mesh.vertex_count(), 96);
/// ```
pub fn create_cylinder(radius: f64, height: f64, segments: u32) -> Result<Mesh, KernelError> {
    if height <= 0.0 {
        return Err(KernelError::degenerate(format!(
            "Cylinder height must be positive: {}",
            height
        )));
    }

    if radius <= 0.0 {
        return Err(KernelError::degenerate(format!(
            "Cylinder radius must be positive: {}",
            radius
        )));
    }

    if segments < 3 {
        return Err(KernelError::degenerate(format!(
            "Cylinder segments must be at least 3: {}",
            segments
        )));
    }

    let n = segments as usize;
    let mut mesh = Mesh::with_capacity(2 * n, 4 * n);

    let ring = |mesh: &mut Mesh, z: f64| -> Vec<u32> {
        (0..segments)
            .map(|j| {
                let theta = 2.0 * PI * j as f64 / segments as f64;
                mesh.add_vertex(DVec3::new(radius * theta.cos(), radius * theta.sin(), z))
            })
            .collect()
    };
    let bottom = ring(&mut mesh, 0.0);
    let top = ring(&mut mesh, height);

    for j in 0..n {
        let j_next = (j + 1) % n;
        mesh.add_triangle(bottom[j], bottom[j_next], top[j_next]);
        mesh.add_triangle(bottom[j], top[j_next], top[j]);
    }

    for j in 1..n - 1 {
        mesh.add_triangle(bottom[0], bottom[j + 1], bottom[j]);
        mesh.add_triangle(top[0], top[j], top[j + 1]);
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cylinder_basic() {
        let mesh = create_cylinder(5.0, 10.0, 32).unwrap();
        assert_eq!(mesh.triangle_count(), 2 * 32 + 2 * 30);
        assert!(mesh.validate());
    }

    #[test]
    fn test_cylinder_volume_matches_polygon_prism() {
        let segments = 48;
        let mesh = create_cylinder(5.0, 10.0, segments).unwrap();
        let polygon_area = 0.5 * segments as f64 * 25.0 * (2.0 * PI / segments as f64).sin();
        assert_relative_eq!(mesh.volume(), polygon_area * 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cylinder_base_on_origin() {
        let mesh = create_cylinder(5.0, 10.0, 32).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_relative_eq!(min.z, 0.0);
        assert_relative_eq!(max.z, 10.0);
        assert_relative_eq!(max.x, 5.0);
    }

    #[test]
    fn test_cylinder_invalid_inputs() {
        assert!(create_cylinder(5.0, 0.0, 32).is_err());
        assert!(create_cylinder(0.0, 10.0, 32).is_err());
        assert!(create_cylinder(5.0, 10.0, 2).is_err());
    }
}
