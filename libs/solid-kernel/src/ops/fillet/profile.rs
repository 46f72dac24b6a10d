//! # Fillet Cross-Sections
//!
//! Builds the 2D region between a sharp corner and its rounding arc.
//!
//! For a corner `P` between faces with outward normals `n1`, `n2` (angle
//! `theta` between them) and fillet radius `f`, with `s = -1` for a convex and
//! `s = +1` for a concave corner:
//!
//! ```text
//! C   = P + s * f / (1 + cos theta) * (n1 + n2)   arc centre
//! T_i = C - s * f * n_i                           tangent points
//! ```
//!
//! The region is closed through the corner and pushed `overlap` past both
//! faces (away from the material for cutters, into it for fillers) so that
//! tool and body never share a face.

use crate::error::KernelError;
use crate::sketch::Profile;
use crate::topology::Convexity;
use glam::DVec2;
use std::f64::consts::FRAC_PI_2;

/// Below this `1 + cos theta` the faces fold back onto each other.
const MIN_OPENING: f64 = 1e-6;

/// Corner geometry in some 2D cross-section plane.
#[derive(Debug, Clone, Copy)]
pub struct Corner {
    pub point: DVec2,
    /// Outward unit normals of the two faces.
    pub normals: [DVec2; 2],
    pub convexity: Convexity,
}

/// Region swept by a fillet tool in the cross-section plane.
pub fn fillet_section(
    corner: &Corner,
    radius: f64,
    segments_per_quarter: u32,
    overlap: f64,
) -> Result<Profile, KernelError> {
    let [n1, n2] = corner.normals;
    let opening = 1.0 + n1.dot(n2);
    if opening < MIN_OPENING {
        return Err(KernelError::fillet_failed(
            "Adjacent faces fold back onto each other",
        ));
    }

    let s = match corner.convexity {
        Convexity::Convex => -1.0,
        Convexity::Concave => 1.0,
    };
    let p = corner.point;
    let center = p + (n1 + n2) * (s * radius / opening);
    let outer = p - (n1 + n2) * (s * overlap / opening);

    let u1 = n1 * -s;
    let u2 = n2 * -s;
    let sweep = u1.perp_dot(u2).atan2(u1.dot(u2));
    let steps = ((sweep.abs() / FRAC_PI_2) * segments_per_quarter as f64)
        .ceil()
        .max(1.0) as u32;

    let mut points = Vec::with_capacity(steps as usize + 4);
    points.push(center + u1 * radius - n1 * (s * overlap));
    points.push(outer);
    points.push(center + u2 * radius - n2 * (s * overlap));
    for k in (0..=steps).rev() {
        let angle = sweep * k as f64 / steps as f64;
        points.push(center + DVec2::from_angle(angle).rotate(u1) * radius);
    }

    Profile::polygon(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn right_angle(convexity: Convexity) -> Corner {
        Corner {
            point: DVec2::ZERO,
            normals: [DVec2::Y, DVec2::X],
            convexity,
        }
    }

    #[test]
    fn test_convex_section_area() {
        let section = fillet_section(&right_angle(Convexity::Convex), 2.0, 64, 0.0).unwrap();
        let expected = (1.0 - std::f64::consts::PI / 4.0) * 4.0;
        assert_relative_eq!(section.signed_area(), expected, epsilon = 1e-3);
    }

    #[test]
    fn test_convex_section_stays_near_corner() {
        let section = fillet_section(&right_angle(Convexity::Convex), 2.0, 8, 0.01).unwrap();
        let (min, max) = section.bounds();
        assert_relative_eq!(min.x, -2.0, epsilon = 1e-12);
        assert_relative_eq!(max.x, 0.01, epsilon = 1e-12);
        assert_relative_eq!(max.y, 0.01, epsilon = 1e-12);
    }

    #[test]
    fn test_concave_section_extends_into_material() {
        let section = fillet_section(&right_angle(Convexity::Concave), 1.5, 8, 0.01).unwrap();
        let (min, max) = section.bounds();
        // Empty space is on the positive side of both faces
        assert_relative_eq!(max.x, 1.5, epsilon = 1e-12);
        assert_relative_eq!(max.y, 1.5, epsilon = 1e-12);
        assert_relative_eq!(min.x, -0.01, epsilon = 1e-12);
        assert_relative_eq!(min.y, -0.01, epsilon = 1e-12);
    }

    #[test]
    fn test_folded_faces_are_rejected() {
        let corner = Corner {
            point: DVec2::ZERO,
            normals: [DVec2::X, DVec2::NEG_X],
            convexity: Convexity::Convex,
        };
        assert!(fillet_section(&corner, 1.0, 8, 0.01).is_err());
    }
}
