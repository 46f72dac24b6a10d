//! # Sketches
//!
//! Closed 2D profiles and the planes they are drawn on.
//!
//! A [`Profile`] is always stored counter-clockwise in its own (u, v)
//! coordinates. A [`SketchPlane`] maps (u, v) to world space; its normal is
//! `u × v`, so extruding a profile along the normal yields outward-facing
//! triangles without further checks.

mod triangulate;

#[cfg(test)]
mod tests;

pub use triangulate::triangulate;

use crate::error::KernelError;
use config::constants::MIN_TRIANGLE_AREA;
use glam::{DVec2, DVec3};
use std::f64::consts::TAU;

// =============================================================================
// PROFILE
// =============================================================================

/// A simple closed polygon in sketch coordinates, counter-clockwise.
///
/// # Example
///
/// ```rust
/// use solid_kernel::sketch::Profile;
/// use glam::DVec2;
///
/// let tri = Profile::polygon(vec![
///     DVec2::new(0.0, 0.0),
///     DVec2::new(0.0, 10.0),
///     DVec2::new(15.0, 0.0),
/// ])
/// .unwrap();
/// assert!(tri.signed_area() > 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    points: Vec<DVec2>,
}

impl Profile {
    /// Creates a profile from any simple polygon, reordering it to be
    /// counter-clockwise.
    pub fn polygon(points: Vec<DVec2>) -> Result<Self, KernelError> {
        if points.len() < 3 {
            return Err(KernelError::degenerate(format!(
                "Profile needs at least 3 points, got {}",
                points.len()
            )));
        }
        let mut profile = Self { points };
        let area = profile.signed_area();
        if area.abs() <= MIN_TRIANGLE_AREA {
            return Err(KernelError::degenerate("Profile has zero area"));
        }
        if area < 0.0 {
            profile.points.reverse();
        }
        Ok(profile)
    }

    /// Regular polygon approximating a circle centred at the origin.
    ///
    /// The first point lies on +u.
    pub fn circle(radius: f64, segments: u32) -> Result<Self, KernelError> {
        if radius <= 0.0 {
            return Err(KernelError::degenerate(format!(
                "Circle radius must be positive: {}",
                radius
            )));
        }
        if segments < 3 {
            return Err(KernelError::degenerate(format!(
                "Circle segments must be at least 3: {}",
                segments
            )));
        }
        let points = (0..segments)
            .map(|i| {
                let theta = TAU * i as f64 / segments as f64;
                DVec2::new(radius * theta.cos(), radius * theta.sin())
            })
            .collect();
        Ok(Self { points })
    }

    /// Axis-aligned rectangle centred at the origin.
    pub fn rectangle(width: f64, height: f64) -> Result<Self, KernelError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(KernelError::degenerate(format!(
                "Rectangle size must be positive: {} x {}",
                width, height
            )));
        }
        let (hw, hh) = (width / 2.0, height / 2.0);
        Ok(Self {
            points: vec![
                DVec2::new(-hw, -hh),
                DVec2::new(hw, -hh),
                DVec2::new(hw, hh),
                DVec2::new(-hw, hh),
            ],
        })
    }

    /// Profile points in counter-clockwise order.
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// Shoelace area; positive for counter-clockwise profiles.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        (0..n)
            .map(|i| self.points[i].perp_dot(self.points[(i + 1) % n]))
            .sum::<f64>()
            / 2.0
    }

    /// Axis-aligned bounds (min, max).
    pub fn bounds(&self) -> (DVec2, DVec2) {
        self.points.iter().fold(
            (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)),
            |(min, max), &p| (min.min(p), max.max(p)),
        )
    }

    /// Returns the profile moved by `offset`.
    pub fn translated(mut self, offset: DVec2) -> Self {
        for p in &mut self.points {
            *p += offset;
        }
        self
    }

    /// Returns the profile moved so its bounding box is centred on `center`.
    pub fn centered_at(self, center: DVec2) -> Self {
        let (min, max) = self.bounds();
        let offset = center - (min + max) / 2.0;
        self.translated(offset)
    }
}

// =============================================================================
// SKETCH PLANE
// =============================================================================

/// A plane in world space with local axes `u`, `v` and normal `u × v`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SketchPlane {
    pub origin: DVec3,
    pub u: DVec3,
    pub v: DVec3,
    pub normal: DVec3,
}

impl SketchPlane {
    /// u = X, v = Y, normal = Z.
    pub const XY: SketchPlane = SketchPlane {
        origin: DVec3::ZERO,
        u: DVec3::X,
        v: DVec3::Y,
        normal: DVec3::Z,
    };

    /// u = Y, v = Z, normal = X.
    pub const YZ: SketchPlane = SketchPlane {
        origin: DVec3::ZERO,
        u: DVec3::Y,
        v: DVec3::Z,
        normal: DVec3::X,
    };

    /// u = X, v = Z, normal = -Y.
    pub const XZ: SketchPlane = SketchPlane {
        origin: DVec3::ZERO,
        u: DVec3::X,
        v: DVec3::Z,
        normal: DVec3::NEG_Y,
    };

    /// Same axes with a different origin.
    pub fn with_origin(self, origin: DVec3) -> Self {
        Self { origin, ..self }
    }

    /// Maps sketch coordinates to world space.
    #[inline]
    pub fn to_world(&self, p: DVec2) -> DVec3 {
        self.origin + self.u * p.x + self.v * p.y
    }
}
