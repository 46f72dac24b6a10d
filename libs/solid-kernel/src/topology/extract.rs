//! # Feature-Edge Extraction
//!
//! Recovers the edges of a solid from its triangle mesh:
//!
//! 1. Weld coincident vertices and repair T-junctions
//! 2. Mark mesh edges whose adjacent faces meet at more than
//!    `FEATURE_ANGLE_DEGREES` as feature segments
//! 3. Chain segments through vertices of degree 2, breaking at corners
//!    sharper than `CORNER_ANGLE_DEGREES` and where convexity changes
//! 4. Join chains that stopped at a vertex shared with a stray segment
//! 5. Classify every chain as a line, a circle or a generic curve
//!
//! Sliver triangles left by booleans have no trustworthy normal of their
//! own. They take the normal of the best matching neighbour, so a sliver
//! lying along a feature edge does not cut that edge in two.

use super::edge::{CircleGeometry, Convexity, Edge, EdgeSample, GeomType};
use super::repair::repair_t_junctions;
use crate::mesh::Mesh;
use crate::weld::weld_mesh;
use config::constants::{
    CIRCLE_FIT_TOLERANCE, CORNER_ANGLE_DEGREES, FEATURE_ANGLE_DEGREES, LINE_TOLERANCE,
    MAX_FRAGMENTS, MIN_TRIANGLE_AREA, PLANARITY_TOLERANCE, SLIVER_HEIGHT, WELD_TOLERANCE,
};
use glam::{DMat3, DVec3};
use std::collections::BTreeMap;
use std::f64::consts::TAU;
use tracing::debug;

/// Chain points whose turning angle is below this are treated as lying on a
/// straight facet edge rather than on a tessellation corner.
const CORNER_POINT_MIN_TURN: f64 = 1e-3;

/// One mesh edge flagged as a feature.
#[derive(Debug, Clone, Copy)]
struct Segment {
    a: u32,
    b: u32,
    convexity: Convexity,
    normals: [DVec3; 2],
}

impl Segment {
    fn other(&self, v: u32) -> u32 {
        if self.a == v {
            self.b
        } else {
            self.a
        }
    }
}

/// A chain of segments: `vertices[i]` and `vertices[i + 1]` are joined by
/// `segments[i]` (wrapping around for closed chains).
struct Chain {
    vertices: Vec<u32>,
    segments: Vec<usize>,
    closed: bool,
}

impl Chain {
    fn reverse(&mut self) {
        self.vertices.reverse();
        self.segments.reverse();
    }
}

/// One end of an open chain.
#[derive(Debug, Clone, Copy)]
struct ChainEnd {
    chain: usize,
    at_start: bool,
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Extracts the feature edges of a closed mesh.
///
/// The output order depends only on the mesh, never on hash iteration.
pub fn extract_edges(mesh: &Mesh) -> Vec<Edge> {
    let mesh = repair_t_junctions(&weld_mesh(mesh, WELD_TOLERANCE), WELD_TOLERANCE);
    let segments = feature_segments(&mesh);
    let chains = merge_chains(&mesh, &segments, build_chains(&mesh, &segments));

    let edges: Vec<Edge> = chains
        .iter()
        .map(|chain| classify(&mesh, &segments, chain))
        .collect();

    debug!(
        triangles = mesh.triangle_count(),
        segments = segments.len(),
        edges = edges.len(),
        "extracted feature edges"
    );
    edges
}

// =============================================================================
// FEATURE SEGMENTS
// =============================================================================

/// Normal of a triangle that is thick enough to trust.
fn reliable_normal(mesh: &Mesh, index: usize) -> Option<DVec3> {
    let [a, b, c] = mesh.triangle_positions(index);
    let cross = (b - a).cross(c - a);
    let double_area = cross.length();
    if double_area * 0.5 <= MIN_TRIANGLE_AREA {
        return None;
    }
    let longest = a.distance(b).max(b.distance(c)).max(c.distance(a));
    (double_area / longest >= SLIVER_HEIGHT).then(|| cross / double_area)
}

/// Face normals for feature detection.
///
/// Slivers adopt the normal of the edge-adjacent face that agrees best with
/// their raw orientation, pass after pass, until no sliver can be resolved.
fn face_normals(mesh: &Mesh, edge_map: &BTreeMap<(u32, u32), Vec<usize>>) -> Vec<Option<DVec3>> {
    let mut normals: Vec<Option<DVec3>> = (0..mesh.triangle_count())
        .map(|i| reliable_normal(mesh, i))
        .collect();

    loop {
        let mut adopted = Vec::new();
        for (t, tri) in mesh.triangles().iter().enumerate() {
            if normals[t].is_some() {
                continue;
            }
            let [a, b, c] = mesh.triangle_positions(t);
            let raw = (b - a).cross(c - a);
            let best = (0..3)
                .filter_map(|k| {
                    let (u, v) = (tri[k], tri[(k + 1) % 3]);
                    let &[t1, t2] = edge_map.get(&(u.min(v), u.max(v)))?.as_slice() else {
                        return None;
                    };
                    normals[if t1 == t { t2 } else { t1 }]
                })
                .max_by(|n1, n2| n1.dot(raw).total_cmp(&n2.dot(raw)));
            if let Some(normal) = best {
                adopted.push((t, normal));
            }
        }
        if adopted.is_empty() {
            break;
        }
        for (t, normal) in adopted {
            normals[t] = Some(normal);
        }
    }

    normals
}

fn feature_segments(mesh: &Mesh) -> Vec<Segment> {
    let mut edge_map: BTreeMap<(u32, u32), Vec<usize>> = BTreeMap::new();
    for (t, tri) in mesh.triangles().iter().enumerate() {
        for k in 0..3 {
            let (a, b) = (tri[k], tri[(k + 1) % 3]);
            edge_map.entry((a.min(b), a.max(b))).or_default().push(t);
        }
    }
    let normals = face_normals(mesh, &edge_map);

    let cos_feature = FEATURE_ANGLE_DEGREES.to_radians().cos();
    let mut segments = Vec::new();

    for (&(a, b), tris) in &edge_map {
        let &[t1, t2] = tris.as_slice() else {
            continue;
        };
        let (Some(n1), Some(n2)) = (normals[t1], normals[t2]) else {
            continue;
        };
        if n1.dot(n2) >= cos_feature {
            continue;
        }

        // Convex when the fold turns the same way as t1 walks the edge
        let tri = mesh.triangles()[t1];
        let forward = (0..3).any(|k| tri[k] == a && tri[(k + 1) % 3] == b);
        let walk = if forward {
            mesh.vertex(b) - mesh.vertex(a)
        } else {
            mesh.vertex(a) - mesh.vertex(b)
        };
        let convexity = if n1.cross(n2).dot(walk) > 0.0 {
            Convexity::Convex
        } else {
            Convexity::Concave
        };

        segments.push(Segment {
            a,
            b,
            convexity,
            normals: [n1, n2],
        });
    }

    segments
}

// =============================================================================
// CHAINING
// =============================================================================

fn build_chains(mesh: &Mesh, segments: &[Segment]) -> Vec<Chain> {
    let mut adjacency: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (i, s) in segments.iter().enumerate() {
        adjacency.entry(s.a).or_default().push(i);
        adjacency.entry(s.b).or_default().push(i);
    }

    let cos_corner = CORNER_ANGLE_DEGREES.to_radians().cos();
    let mut visited = vec![false; segments.len()];
    let mut chains = Vec::new();

    // Next segment to walk onto from `vertex`, if the chain may continue there.
    let step = |vertex: u32, from: usize, dir: DVec3, visited: &[bool]| -> Option<usize> {
        let adjacent = adjacency.get(&vertex)?;
        if adjacent.len() != 2 {
            return None;
        }
        let next = if adjacent[0] == from {
            adjacent[1]
        } else {
            adjacent[0]
        };
        let seg = &segments[next];
        if visited[next] || seg.convexity != segments[from].convexity {
            return None;
        }
        let next_dir = (mesh.vertex(seg.other(vertex)) - mesh.vertex(vertex)).normalize_or_zero();
        (dir.dot(next_dir) >= cos_corner).then_some(next)
    };

    for start in 0..segments.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let seg = segments[start];

        let mut vertices = vec![seg.a, seg.b];
        let mut chain_segments = vec![start];
        let mut closed = false;

        // Forward from b
        let (mut current, mut last) = (seg.b, start);
        let mut dir = (mesh.vertex(seg.b) - mesh.vertex(seg.a)).normalize_or_zero();
        loop {
            // Closing back onto the start segment
            if current == seg.a && vertices.len() > 2 {
                closed = true;
                vertices.pop();
                break;
            }
            let Some(next) = step(current, last, dir, &visited) else {
                break;
            };
            visited[next] = true;
            let other = segments[next].other(current);
            dir = (mesh.vertex(other) - mesh.vertex(current)).normalize_or_zero();
            vertices.push(other);
            chain_segments.push(next);
            current = other;
            last = next;
        }

        if !closed {
            // Backward from a
            let (mut current, mut last) = (seg.a, start);
            let mut dir = (mesh.vertex(seg.a) - mesh.vertex(seg.b)).normalize_or_zero();
            let mut front_vertices = Vec::new();
            let mut front_segments = Vec::new();
            while let Some(next) = step(current, last, dir, &visited) {
                visited[next] = true;
                let other = segments[next].other(current);
                dir = (mesh.vertex(other) - mesh.vertex(current)).normalize_or_zero();
                front_vertices.push(other);
                front_segments.push(next);
                current = other;
                last = next;
            }
            front_vertices.reverse();
            front_segments.reverse();
            front_vertices.extend(vertices);
            front_segments.extend(chain_segments);
            vertices = front_vertices;
            chain_segments = front_segments;
        }

        chains.push(Chain {
            vertices,
            segments: chain_segments,
            closed,
        });
    }

    chains
}

/// Joins open chains whose ends meet at a vertex the walk could not pass,
/// such as one shared with a stray segment.
///
/// Two ends are joined when they share convexity, continue each other within
/// `CORNER_ANGLE_DEGREES`, and are the only such pair at that vertex. A chain
/// whose two ends join this way becomes closed.
fn merge_chains(mesh: &Mesh, segments: &[Segment], mut chains: Vec<Chain>) -> Vec<Chain> {
    let cos_corner = CORNER_ANGLE_DEGREES.to_radians().cos();

    // (segment at the end, neighbouring vertex inside the chain)
    let end_info = |chains: &[Chain], end: ChainEnd| -> (usize, u32) {
        let chain = &chains[end.chain];
        if end.at_start {
            (chain.segments[0], chain.vertices[1])
        } else {
            (
                chain.segments[chain.segments.len() - 1],
                chain.vertices[chain.vertices.len() - 2],
            )
        }
    };

    'merge: loop {
        let mut ends: BTreeMap<u32, Vec<ChainEnd>> = BTreeMap::new();
        for (i, chain) in chains.iter().enumerate() {
            if chain.closed || chain.vertices.len() < 2 {
                continue;
            }
            let (first, last) = (chain.vertices[0], chain.vertices[chain.vertices.len() - 1]);
            ends.entry(first).or_default().push(ChainEnd { chain: i, at_start: true });
            ends.entry(last).or_default().push(ChainEnd { chain: i, at_start: false });
        }

        for (&vertex, at_vertex) in &ends {
            let p = mesh.vertex(vertex);
            let mut pairs = Vec::new();
            for (k, &e1) in at_vertex.iter().enumerate() {
                for &e2 in &at_vertex[k + 1..] {
                    let (s1, n1) = end_info(&chains, e1);
                    let (s2, n2) = end_info(&chains, e2);
                    if segments[s1].convexity != segments[s2].convexity {
                        continue;
                    }
                    if e1.chain == e2.chain && chains[e1.chain].segments.len() < 3 {
                        continue;
                    }
                    let incoming = (p - mesh.vertex(n1)).normalize_or_zero();
                    let outgoing = (mesh.vertex(n2) - p).normalize_or_zero();
                    if incoming.dot(outgoing) >= cos_corner {
                        pairs.push((e1, e2));
                    }
                }
            }
            let &[(e1, e2)] = pairs.as_slice() else {
                continue;
            };

            if e1.chain == e2.chain {
                let chain = &mut chains[e1.chain];
                chain.vertices.pop();
                chain.closed = true;
            } else {
                let mut tail = chains.remove(e2.chain);
                let head_index = if e1.chain > e2.chain { e1.chain - 1 } else { e1.chain };
                let head = &mut chains[head_index];
                if e1.at_start {
                    head.reverse();
                }
                if !e2.at_start {
                    tail.reverse();
                }
                head.vertices.extend_from_slice(&tail.vertices[1..]);
                head.segments.extend(tail.segments);
            }
            continue 'merge;
        }
        break;
    }

    chains
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Angle between the incoming and outgoing direction at point `i`.
fn turn_angle(points: &[DVec3], i: usize, closed: bool) -> Option<f64> {
    let n = points.len();
    if !closed && (i == 0 || i == n - 1) {
        return None;
    }
    let prev = points[(i + n - 1) % n];
    let next = points[(i + 1) % n];
    let d_in = (points[i] - prev).try_normalize()?;
    let d_out = (next - points[i]).try_normalize()?;
    Some(d_in.dot(d_out).clamp(-1.0, 1.0).acos())
}

fn is_line(points: &[DVec3], closed: bool) -> bool {
    if closed || points.len() < 2 {
        return false;
    }
    let (first, last) = (points[0], points[points.len() - 1]);
    let Some(dir) = (last - first).try_normalize() else {
        return false;
    };
    points.iter().all(|&p| {
        let v = p - first;
        (v - dir * v.dot(dir)).length() <= LINE_TOLERANCE
    })
}

/// Algebraic (Kasa) circle fit in the plane spanned by `e1`, `e2`.
///
/// Returns the centre in plane coordinates relative to `origin`.
fn fit_circle_2d(points: &[DVec3], origin: DVec3, e1: DVec3, e2: DVec3) -> Option<(f64, f64)> {
    let mut m = DMat3::ZERO;
    let mut rhs = DVec3::ZERO;
    for &p in points {
        let d = p - origin;
        let (x, y) = (d.dot(e1), d.dot(e2));
        let z = x * x + y * y;
        let row = DVec3::new(x, y, 1.0);
        m = m + DMat3::from_cols(row * x, row * y, row);
        rhs += row * z;
    }
    if m.determinant().abs() <= f64::EPSILON {
        return None;
    }
    let sol = m.inverse() * rhs;
    Some((sol.x / 2.0, sol.y / 2.0))
}

fn fit_circle(points: &[DVec3], closed: bool) -> Option<CircleGeometry> {
    if points.len() < 3 {
        return None;
    }

    let turns: Vec<Option<f64>> = (0..points.len())
        .map(|i| turn_angle(points, i, closed))
        .collect();
    let corners: Vec<DVec3> = points
        .iter()
        .zip(&turns)
        .filter(|(_, t)| t.is_some_and(|t| t > CORNER_POINT_MIN_TURN))
        .map(|(&p, _)| p)
        .collect();
    let fit_points: &[DVec3] = if corners.len() >= 3 { &corners } else { points };

    // Newell normal of the (implicitly closed) polygon
    let centroid = points.iter().copied().sum::<DVec3>() / points.len() as f64;
    let normal = (0..points.len())
        .map(|i| {
            let a = points[i] - centroid;
            let b = points[(i + 1) % points.len()] - centroid;
            a.cross(b)
        })
        .sum::<DVec3>()
        .try_normalize()?;

    if points
        .iter()
        .any(|&p| (p - centroid).dot(normal).abs() > PLANARITY_TOLERANCE)
    {
        return None;
    }

    let e1 = normal.any_orthonormal_vector();
    let e2 = normal.cross(e1);
    let origin = fit_points.iter().copied().sum::<DVec3>() / fit_points.len() as f64;
    let (cx, cy) = fit_circle_2d(fit_points, origin, e1, e2)?;
    let center = origin + e1 * cx + e2 * cy;
    let radius = fit_points.iter().map(|p| p.distance(center)).sum::<f64>() / fit_points.len() as f64;

    if !radius.is_finite() || radius <= 0.0 {
        return None;
    }
    if points
        .iter()
        .any(|p| (p.distance(center) - radius).abs() > CIRCLE_FIT_TOLERANCE * radius)
    {
        return None;
    }

    let mut corner_turns: Vec<f64> = turns
        .iter()
        .flatten()
        .copied()
        .filter(|&t| t > CORNER_POINT_MIN_TURN)
        .collect();
    corner_turns.sort_by(f64::total_cmp);
    let segments = corner_turns
        .get(corner_turns.len() / 2)
        .map(|&t| (TAU / t).round())
        .filter(|&n| n >= 3.0 && n <= MAX_FRAGMENTS as f64)
        .map(|n| n as u32);

    Some(CircleGeometry {
        center,
        normal,
        radius,
        phase_vertex: fit_points[0],
        segments,
    })
}

fn classify(mesh: &Mesh, segments: &[Segment], chain: &Chain) -> Edge {
    let points: Vec<DVec3> = chain.vertices.iter().map(|&v| mesh.vertex(v)).collect();
    let n = points.len();

    let (geom_type, circle) = if is_line(&points, chain.closed) {
        (GeomType::Line, None)
    } else if let Some(circle) = fit_circle(&points, chain.closed) {
        (GeomType::Circle, Some(circle))
    } else {
        (GeomType::Curve, None)
    };

    // Segment used for the local sample
    let sample_index = match &circle {
        Some(c) => {
            let at = points.iter().position(|&p| p == c.phase_vertex).unwrap_or(0);
            if at < chain.segments.len() {
                at
            } else {
                at.saturating_sub(1)
            }
        }
        None => chain.segments.len() / 2,
    };
    let seg = segments[chain.segments[sample_index]];
    let (pa, pb) = (points[sample_index], points[(sample_index + 1) % n]);

    let tangent = match geom_type {
        GeomType::Line => (points[n - 1] - points[0]).normalize_or_zero(),
        _ => (pb - pa).normalize_or_zero(),
    };

    Edge {
        geom_type,
        points,
        closed: chain.closed,
        convexity: seg.convexity,
        sample: EdgeSample {
            point: (pa + pb) / 2.0,
            tangent,
            normals: seg.normals,
        },
        circle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spur_does_not_split_circle() {
        let mut mesh = Mesh::new();
        for i in 0..16 {
            let angle = TAU * i as f64 / 16.0;
            mesh.add_vertex(DVec3::new(angle.cos(), angle.sin(), 0.0) * 4.0);
        }
        let spur_end = mesh.add_vertex(mesh.vertex(4) * 1.5);

        let segment = |a: u32, b: u32| Segment {
            a: a.min(b),
            b: a.max(b),
            convexity: Convexity::Convex,
            normals: [DVec3::Z, DVec3::X],
        };
        let mut segments: Vec<Segment> = (0..16).map(|i| segment(i, (i + 1) % 16)).collect();
        segments.push(segment(4, spur_end));

        let chains = build_chains(&mesh, &segments);
        assert!(chains.iter().all(|c| !c.closed));

        let chains = merge_chains(&mesh, &segments, chains);
        assert_eq!(chains.len(), 2);
        let circle = chains.iter().find(|c| c.closed).unwrap();
        assert_eq!(circle.vertices.len(), 16);
        assert_eq!(circle.segments.len(), 16);
        let spur = chains.iter().find(|c| !c.closed).unwrap();
        assert_eq!(spur.vertices, vec![4, spur_end]);
    }

    #[test]
    fn test_corner_ends_stay_apart() {
        let mut mesh = Mesh::new();
        let corner = mesh.add_vertex(DVec3::ZERO);
        let along_x = mesh.add_vertex(DVec3::X);
        let along_y = mesh.add_vertex(DVec3::Y);
        let along_z = mesh.add_vertex(DVec3::Z);

        let segments: Vec<Segment> = [along_x, along_y, along_z]
            .into_iter()
            .map(|end| Segment {
                a: corner,
                b: end,
                convexity: Convexity::Convex,
                normals: [DVec3::Z, DVec3::X],
            })
            .collect();

        let chains = merge_chains(&mesh, &segments, build_chains(&mesh, &segments));
        assert_eq!(chains.len(), 3);
    }
}
