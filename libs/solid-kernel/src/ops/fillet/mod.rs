//! # Fillets
//!
//! Rounds selected feature edges of a mesh with boolean tools:
//!
//! - **Convex edges**: a cutter (corner region outside the arc) is
//!   subtracted from the body
//! - **Concave edges**: a filler (corner region inside the arc) is added
//!
//! Line edges get a straight tool extruded along the edge. Circle edges get a
//! tool revolved around the circle's axis, phased and subdivided like the
//! circle's own tessellation so the tool hugs the facets. Arcs of one circle
//! share a single revolved tool. Other curves are not supported.

mod profile;


pub use profile::{fillet_section, Corner};

use crate::error::KernelError;
use crate::mesh::Mesh;
use crate::ops::boolean::{difference, union};
use crate::ops::extrude::{linear_extrude, revolve, ExtrudeMode, RevolveFrame};
use crate::sketch::SketchPlane;
use crate::topology::{CircleGeometry, Convexity, Edge, GeomType};
use config::constants::{Tessellation, FILLET_TOOL_OVERLAP};
use glam::{DVec2, DVec3};
use tracing::debug;

/// Circles closer than this are filleted with one shared tool.
const SAME_CIRCLE_TOLERANCE: f64 = 1e-3;

/// A tool mesh plus how it is applied.
struct Tool {
    mesh: Mesh,
    convexity: Convexity,
}

/// Rounds `edges` of `mesh` with the given radius.
///
/// # Errors
///
/// - `DegenerateGeometry` for a non-positive radius
/// - `Unsupported` if an edge is neither a line nor a circle
/// - `FilletFailed` if the radius does not fit the edge geometry
pub fn fillet_edges(
    mesh: &Mesh,
    edges: &[Edge],
    radius: f64,
    tess: &Tessellation,
) -> Result<Mesh, KernelError> {
    if radius <= 0.0 {
        return Err(KernelError::degenerate(format!(
            "Fillet radius must be positive: {}",
            radius
        )));
    }

    let mut tools = Vec::with_capacity(edges.len());
    let mut circles: Vec<CircleGeometry> = Vec::new();

    for edge in edges {
        match (edge.geom_type(), edge.circle()) {
            (GeomType::Line, _) => tools.push(line_tool(edge, radius, tess)?),
            (GeomType::Circle, Some(circle)) => {
                if circles
                    .iter()
                    .any(|c| c.same_circle(circle, SAME_CIRCLE_TOLERANCE))
                {
                    continue;
                }
                circles.push(*circle);
                tools.push(circle_tool(edge, circle, radius, tess)?);
            }
            (geom_type, _) => {
                return Err(KernelError::unsupported(format!(
                    "Cannot fillet {:?} edge",
                    geom_type
                )))
            }
        }
    }

    let mut body = mesh.clone();
    for tool in &tools {
        body = match tool.convexity {
            Convexity::Convex => difference(&body, &tool.mesh)?,
            Convexity::Concave => union(&body, &tool.mesh)?,
        };
    }

    debug!(
        edges = edges.len(),
        tools = tools.len(),
        radius,
        triangles = body.triangle_count(),
        "fillet"
    );
    Ok(body)
}

/// Unit vector of `v` projected onto the plane spanned by `e1`, `e2`.
fn project(v: DVec3, e1: DVec3, e2: DVec3) -> Result<DVec2, KernelError> {
    DVec2::new(v.dot(e1), v.dot(e2))
        .try_normalize()
        .ok_or_else(|| KernelError::fillet_failed("Face normal is parallel to the edge"))
}

fn line_tool(edge: &Edge, radius: f64, tess: &Tessellation) -> Result<Tool, KernelError> {
    let sample = edge.sample();
    let t = sample.tangent;
    let e_u = t.any_orthonormal_vector();
    let e_v = t.cross(e_u);

    let corner = Corner {
        point: DVec2::ZERO,
        normals: [
            project(sample.normals[0], e_u, e_v)?,
            project(sample.normals[1], e_u, e_v)?,
        ],
        convexity: edge.convexity(),
    };
    let section = fillet_section(&corner, radius, tess.fillet_segments, FILLET_TOOL_OVERLAP)?;

    // Extent of the edge along its tangent, measured from the sample point
    let (lo, hi) = edge
        .points()
        .iter()
        .map(|&p| (p - sample.point).dot(t))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| {
            (lo.min(d), hi.max(d))
        });
    let (start, end) = match edge.convexity() {
        Convexity::Convex => (lo - FILLET_TOOL_OVERLAP, hi + FILLET_TOOL_OVERLAP),
        Convexity::Concave => (lo + FILLET_TOOL_OVERLAP, hi - FILLET_TOOL_OVERLAP),
    };
    if end <= start {
        return Err(KernelError::fillet_failed(format!(
            "Edge of length {:.4} is too short to fillet",
            edge.length()
        )));
    }

    let plane = SketchPlane {
        origin: sample.point + t * start,
        u: e_u,
        v: e_v,
        normal: t,
    };
    let mesh = linear_extrude(&section, &plane, end - start, ExtrudeMode::OneSided)?;
    Ok(Tool {
        mesh,
        convexity: edge.convexity(),
    })
}

fn circle_tool(
    edge: &Edge,
    circle: &CircleGeometry,
    radius: f64,
    tess: &Tessellation,
) -> Result<Tool, KernelError> {
    let sample = edge.sample();
    let axis = circle.normal;
    let offset = sample.point - circle.center;
    let radial = (offset - axis * offset.dot(axis))
        .try_normalize()
        .ok_or_else(|| KernelError::fillet_failed("Circle sample lies on its axis"))?;

    let corner = Corner {
        point: DVec2::new(circle.radius, offset.dot(axis)),
        normals: [
            project(sample.normals[0], radial, axis)?,
            project(sample.normals[1], radial, axis)?,
        ],
        convexity: edge.convexity(),
    };
    let section = fillet_section(&corner, radius, tess.fillet_segments, FILLET_TOOL_OVERLAP)?;

    let (min, _) = section.bounds();
    if min.x <= 0.0 {
        return Err(KernelError::fillet_failed(format!(
            "Fillet radius {} does not fit circle of radius {:.3}",
            radius, circle.radius
        )));
    }

    let frame = RevolveFrame::new(circle.center, axis)?
        .with_reference(circle.phase_vertex - circle.center)?;
    let segments = circle.segments.unwrap_or(tess.circle_segments);
    let mesh = revolve(&section, &frame, segments)?;
    Ok(Tool {
        mesh,
        convexity: edge.convexity(),
    })
}
