//! # Edges
//!
//! Feature edges recovered from a mesh, with the geometric queries used by
//! edge selection and fillets.

use config::constants::AXIS_PARALLEL_TOLERANCE;
use glam::DVec3;
use serde::Serialize;

/// Geometric classification of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GeomType {
    /// Straight segment.
    Line,
    /// Planar circle or circular arc.
    Circle,
    /// Anything else.
    Curve,
}

/// Which side of the dihedral the material is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Convexity {
    /// Outside corner; a fillet removes material.
    Convex,
    /// Inside corner; a fillet adds material.
    Concave,
}

/// World coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Unit direction of the axis.
    pub fn direction(self) -> DVec3 {
        match self {
            Axis::X => DVec3::X,
            Axis::Y => DVec3::Y,
            Axis::Z => DVec3::Z,
        }
    }

    /// True if `dir` is parallel (or anti-parallel) to this axis.
    pub fn is_parallel(self, dir: DVec3) -> bool {
        1.0 - dir.normalize_or_zero().dot(self.direction()).abs() <= AXIS_PARALLEL_TOLERANCE
    }
}

/// Fitted circle of a [`GeomType::Circle`] edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleGeometry {
    pub center: DVec3,
    /// Unit normal of the circle's plane.
    pub normal: DVec3,
    pub radius: f64,
    /// A tessellation vertex lying exactly on the circle.
    pub phase_vertex: DVec3,
    /// Segment count of the full tessellated circle, estimated from the
    /// turning angle between facets.
    pub segments: Option<u32>,
}

impl CircleGeometry {
    /// True if both describe the same circle within `tolerance`.
    pub fn same_circle(&self, other: &CircleGeometry, tolerance: f64) -> bool {
        self.center.distance(other.center) <= tolerance
            && (self.radius - other.radius).abs() <= tolerance
            && 1.0 - self.normal.dot(other.normal).abs() <= AXIS_PARALLEL_TOLERANCE.max(tolerance)
    }
}

/// Local geometry of an edge at one point: where the two faces meet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSample {
    pub point: DVec3,
    /// Unit tangent of the edge.
    pub tangent: DVec3,
    /// Outward unit normals of the two adjacent faces.
    pub normals: [DVec3; 2],
}

/// A chain of feature segments classified as one edge.
#[derive(Debug, Clone)]
pub struct Edge {
    pub(crate) geom_type: GeomType,
    pub(crate) points: Vec<DVec3>,
    pub(crate) closed: bool,
    pub(crate) convexity: Convexity,
    pub(crate) sample: EdgeSample,
    pub(crate) circle: Option<CircleGeometry>,
}

impl Edge {
    pub fn geom_type(&self) -> GeomType {
        self.geom_type
    }

    pub fn convexity(&self) -> Convexity {
        self.convexity
    }

    /// Polyline points; for closed edges the first point is not repeated.
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn sample(&self) -> &EdgeSample {
        &self.sample
    }

    pub fn circle(&self) -> Option<&CircleGeometry> {
        self.circle.as_ref()
    }

    /// Circle radius, `None` for non-circular edges.
    pub fn radius(&self) -> Option<f64> {
        self.circle.map(|c| c.radius)
    }

    /// Unit direction of a line edge.
    pub fn direction(&self) -> Option<DVec3> {
        match self.geom_type {
            GeomType::Line => {
                let first = *self.points.first()?;
                let last = *self.points.last()?;
                (last - first).try_normalize()
            }
            _ => None,
        }
    }

    fn segments(&self) -> impl Iterator<Item = (DVec3, DVec3)> + '_ {
        let n = self.points.len();
        let count = if self.closed { n } else { n.saturating_sub(1) };
        (0..count).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Arc length of the polyline.
    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| a.distance(b)).sum()
    }

    /// Point at half the arc length, measured from the first point.
    pub fn center(&self) -> DVec3 {
        let half = self.length() / 2.0;
        let mut walked = 0.0;
        for (a, b) in self.segments() {
            let len = a.distance(b);
            if walked + len >= half && len > 0.0 {
                return a.lerp(b, (half - walked) / len);
            }
            walked += len;
        }
        self.points.first().copied().unwrap_or(DVec3::ZERO)
    }
}
