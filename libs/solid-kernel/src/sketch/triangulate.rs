//! # Ear Clipping
//!
//! Triangulates simple counter-clockwise polygons for extrusion caps.
//! Orientation tests use the adaptive-precision predicates of the `robust`
//! crate so nearly collinear vertices are classified consistently.

use crate::error::KernelError;
use glam::DVec2;
use robust::{orient2d, Coord};

fn orient(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    orient2d(
        Coord { x: a.x, y: a.y },
        Coord { x: b.x, y: b.y },
        Coord { x: c.x, y: c.y },
    )
}

/// True if `p` lies inside or on triangle `abc` (counter-clockwise).
fn in_triangle(p: DVec2, a: DVec2, b: DVec2, c: DVec2) -> bool {
    orient(a, b, p) >= 0.0 && orient(b, c, p) >= 0.0 && orient(c, a, p) >= 0.0
}

/// Triangulates a simple counter-clockwise polygon.
///
/// Returns index triples into `points`, each counter-clockwise. Collinear
/// vertices are dropped from the output without producing slivers.
///
/// # Errors
///
/// Fails if no ear can be found, which happens for self-intersecting input.
pub fn triangulate(points: &[DVec2]) -> Result<Vec<[usize; 3]>, KernelError> {
    let mut remaining: Vec<usize> = (0..points.len()).collect();
    let mut triangles = Vec::with_capacity(points.len().saturating_sub(2));

    while remaining.len() > 3 {
        let n = remaining.len();
        let mut clipped = false;

        for i in 0..n {
            let prev = remaining[(i + n - 1) % n];
            let curr = remaining[i];
            let next = remaining[(i + 1) % n];
            let (a, b, c) = (points[prev], points[curr], points[next]);

            let turn = orient(a, b, c);
            if turn == 0.0 {
                // Collinear vertex carries no area
                remaining.remove(i);
                clipped = true;
                break;
            }
            if turn < 0.0 {
                continue;
            }

            let blocked = remaining.iter().any(|&k| {
                k != prev
                    && k != curr
                    && k != next
                    && points[k] != a
                    && points[k] != b
                    && points[k] != c
                    && in_triangle(points[k], a, b, c)
            });
            if !blocked {
                triangles.push([prev, curr, next]);
                remaining.remove(i);
                clipped = true;
                break;
            }
        }

        if !clipped {
            return Err(KernelError::degenerate(
                "Profile is not a simple polygon; no ear found",
            ));
        }
    }

    if remaining.len() == 3 {
        let [a, b, c] = [remaining[0], remaining[1], remaining[2]];
        if orient(points[a], points[b], points[c]) > 0.0 {
            triangles.push([a, b, c]);
        }
    }

    Ok(triangles)
}
