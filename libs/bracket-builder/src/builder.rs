//! # Bracket Builder
//!
//! Turns a [`BracketParams`] set into one solid:
//!
//! ```text
//! base body → slot cuts → slot fillet → gussets → holes → rim fillet
//! ```
//!
//! Optional steps run only when their parameters are present. A rounding
//! step whose edge selection comes back empty is skipped with a warning.

use crate::error::BuildError;
use crate::holes::{HoleClearance, HoleOffsets};
use crate::params::{BaseBody, BracketParams, Gussets, HolePattern};
use crate::report::{BuildReport, FilletStep, HoleReport};
use crate::selection::{rim_edges, slot_transition_edges};
use config::constants::{Tessellation, ENVELOPE_MARGIN, HOLE_OVERSHOOT, MIN_HOLE_CLEARANCE};
use glam::{DQuat, DVec2, DVec3};
use solid_kernel::{EdgeSelection, ExtrudeMode, Profile, SketchPlane, Solid};
use std::f64::consts::FRAC_PI_2;
use tracing::{debug, info, info_span, warn};

/// A finished bracket and its metrics.
#[derive(Debug, Clone)]
pub struct Bracket {
    pub solid: Solid,
    pub report: BuildReport,
}

/// Builds brackets from a parameter set.
///
/// # Example
///
/// ```rust,no_run
/// use bracket_builder::{BracketBuilder, BracketParams};
///
/// let bracket = BracketBuilder::new(BracketParams::reinforced()).build().unwrap();
/// println!("{}", bracket.report);
/// ```
#[derive(Debug, Clone)]
pub struct BracketBuilder {
    params: BracketParams,
    tess: Tessellation,
}

impl BracketBuilder {
    pub fn new(params: BracketParams) -> Self {
        Self {
            params,
            tess: Tessellation::default(),
        }
    }

    /// Overrides the default tessellation.
    pub fn with_tessellation(mut self, tess: Tessellation) -> Self {
        self.tess = tess;
        self
    }

    pub fn params(&self) -> &BracketParams {
        &self.params
    }

    /// Runs the full pipeline.
    pub fn build(&self) -> Result<Bracket, BuildError> {
        let _span = info_span!("build_bracket", length = self.params.total_length()).entered();
        self.params.validate()?;

        // ===== BASE + SLOTS =====
        let mut solid = self.base_body()?;
        solid = self.cut_slots(solid)?;

        // ===== SLOT FILLET =====
        let slot_fillet = match self.params.slot_fillet {
            Some(radius) => {
                let edges = slot_transition_edges(&solid, &self.params);
                let step = self.round("slot", &mut solid, &edges, radius)?;
                if matches!(step, FilletStep::Applied { .. }) {
                    // Straight fillers overhang the curved wall at their ends
                    solid = solid.intersection(&self.envelope()?)?;
                }
                step
            }
            None => FilletStep::Disabled,
        };

        // ===== GUSSETS =====
        let gussets = match &self.params.gussets {
            Some(gussets) => {
                let (reinforced, count) = self.add_gussets(solid, gussets)?;
                solid = reinforced;
                count
            }
            None => 0,
        };

        // ===== HOLES =====
        let holes = match &self.params.holes {
            Some(pattern) => {
                let (drilled, report) = self.drill_holes(solid, pattern)?;
                solid = drilled;
                Some(report)
            }
            None => None,
        };

        // ===== RIM FILLET =====
        let rim_fillet = match self.params.rim_fillet {
            Some(radius) => {
                let edges = rim_edges(&solid, &self.params);
                self.round("rim", &mut solid, &edges, radius)?
            }
            None => FilletStep::Disabled,
        };

        let report = BuildReport {
            total_length: self.params.total_length(),
            cylinder_diameter: self.params.cylinder_diameter,
            volume_mm3: solid.volume(),
            triangle_count: solid.triangle_count(),
            slot_fillet,
            gussets,
            holes,
            rim_fillet,
        };
        info!(
            volume_mm3 = report.volume_mm3,
            triangles = report.triangle_count,
            "Bracket built"
        );

        Ok(Bracket { solid, report })
    }

    // =========================================================================
    // PIPELINE STEPS
    // =========================================================================

    /// Cylinder along +X from `x = 0` to `x = total_length`.
    fn base_body(&self) -> Result<Solid, BuildError> {
        let radius = self.params.radius();
        let length = self.params.total_length();
        let solid = self.cylinder_along_x(radius, length)?;
        info!(base = ?self.params.base, radius, length, "Base body");
        Ok(solid)
    }

    /// The base body grown slightly in radius and past both end faces,
    /// tessellated in phase with it.
    fn envelope(&self) -> Result<Solid, BuildError> {
        let length = self.params.total_length() + 2.0 * HOLE_OVERSHOOT;
        Ok(self
            .cylinder_along_x(self.params.radius() + ENVELOPE_MARGIN, length)?
            .translated(DVec3::new(-HOLE_OVERSHOOT, 0.0, 0.0)))
    }

    fn cylinder_along_x(&self, radius: f64, length: f64) -> Result<Solid, BuildError> {
        let segments = self.tess.circle_segments;
        let solid = match self.params.base {
            BaseBody::Cylinder => {
                Solid::cylinder(radius, length, segments)?.rotated(DQuat::from_rotation_y(FRAC_PI_2))
            }
            BaseBody::ExtrudedProfile => {
                let circle = Profile::circle(radius, segments)?;
                Solid::extrude(&circle, &SketchPlane::YZ, length, ExtrudeMode::OneSided)?
            }
        };
        Ok(solid)
    }

    fn cut_slots(&self, mut solid: Solid) -> Result<Solid, BuildError> {
        let p = &self.params;
        let widths = [p.slot_width_a, p.slot_width_b];

        for (center, width) in p.slot_centers().into_iter().zip(widths) {
            let cutter = Solid::cuboid(DVec3::new(
                p.engagement_depth + p.slot_overcut,
                p.slot_span,
                width,
            ))?
            .translated(DVec3::new(center, 0.0, 0.0));
            solid = solid.difference(&cutter)?;
            debug!(center, width, "Slot cut");
        }
        info!(triangles = solid.triangle_count(), "Slots cut");
        Ok(solid)
    }

    /// Fillets `edges`, or skips the step when nothing was selected.
    fn round(
        &self,
        step: &'static str,
        solid: &mut Solid,
        edges: &EdgeSelection,
        radius: f64,
    ) -> Result<FilletStep, BuildError> {
        if edges.is_empty() {
            warn!(step, "No edges selected, skipping fillet");
            return Ok(FilletStep::Skipped);
        }
        *solid = solid.fillet(edges, radius, &self.tess)?;
        info!(step, edges = edges.len(), radius, "Edges rounded");
        Ok(FilletStep::Applied { edges: edges.len() })
    }

    /// Adds a top and a bottom rib at each slot transition.
    fn add_gussets(&self, mut solid: Solid, gussets: &Gussets) -> Result<(Solid, usize), BuildError> {
        let p = &self.params;
        let [floor_a, floor_b] = p.slot_floors();
        // (x of the slot floor, slot width, x direction into the span)
        let slots = [(floor_a, p.slot_width_a, 1.0), (floor_b, p.slot_width_b, -1.0)];

        let mut count = 0;
        for (floor, width, toward_span) in slots {
            for side in [1.0, -1.0] {
                let anchor = DVec2::new(floor, side * (width / 2.0 - gussets.overlap));
                let rib = Profile::polygon(vec![
                    DVec2::ZERO,
                    DVec2::new(toward_span * gussets.length, 0.0),
                    DVec2::new(0.0, side * gussets.height),
                ])?
                .centered_at(anchor);
                let rib = Solid::extrude(
                    &rib,
                    &SketchPlane::XZ,
                    gussets.thickness / 2.0,
                    ExtrudeMode::Symmetric,
                )?;
                solid = solid.union(&rib)?;
                count += 1;
            }
        }
        info!(count, triangles = solid.triangle_count(), "Gussets added");
        Ok((solid, count))
    }

    /// Drills four axial holes from mid-length out through the start face.
    fn drill_holes(
        &self,
        mut solid: Solid,
        pattern: &HolePattern,
    ) -> Result<(Solid, HoleReport), BuildError> {
        let p = &self.params;
        let hole_radius = pattern.radius();
        let offsets = pattern.offsets(p);
        let clearance = offsets.clearance(p, hole_radius);
        check_clearance(&offsets, &clearance)?;

        let segments = self.tess.segments_for_radius(hole_radius);
        for center in pattern.positions(p) {
            solid = solid.difference(&pattern.bore(p, center, segments)?)?;
        }
        info!(
            lateral = offsets.lateral,
            vertical = offsets.vertical,
            mid_length = p.mid_length(),
            "Holes drilled"
        );

        Ok((
            solid,
            HoleReport {
                diameter: pattern.diameter,
                offsets,
                clearance,
            },
        ))
    }
}

/// Fails when a bore breaks out of the body or into a slot, warns when the
/// remaining wall is thin.
fn check_clearance(offsets: &HoleOffsets, clearance: &HoleClearance) -> Result<(), BuildError> {
    if clearance.wall < 0.0 {
        return Err(BuildError::clearance(format!(
            "holes at y = ±{:.2}, z = ±{:.2} break through the outer wall by {:.2} mm",
            offsets.lateral, offsets.vertical, -clearance.wall
        )));
    }
    if clearance.slot < 0.0 {
        return Err(BuildError::clearance(format!(
            "holes at z = ±{:.2} cut into slot A by {:.2} mm",
            offsets.vertical, -clearance.slot
        )));
    }
    if clearance.min() < MIN_HOLE_CLEARANCE {
        warn!(
            wall = clearance.wall,
            slot = clearance.slot,
            between = clearance.between,
            "Thin material around holes"
        );
    }
    Ok(())
}
