//! # Bracket Parameters
//!
//! Flat, hand-tuned measurements of one bracket design and the dimensions
//! derived from them. Three presets reproduce the design iterations:
//!
//! | Variant | Body | Extras |
//! |---------|------|--------|
//! | `plain` | Ø35 cylinder primitive | none |
//! | `filleted` | Ø35 extruded circle | Ø3.3 holes, rim fillet |
//! | `reinforced` | Ø40 extruded circle | slot fillet, gussets, Ø5.3 holes, rim fillet |
//!
//! All lengths are in millimetres. The body axis is X, running from `x = 0`
//! to `x = total_length`.

use crate::error::BuildError;
use config::constants::{HOLE_MAX_LATERAL, HOLE_WALL_MARGIN, SLOT_OVERCUT};
use serde::Serialize;
use std::fmt;

// =============================================================================
// VARIANTS
// =============================================================================

/// The preset bracket designs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Slotted cylinder only.
    Plain,
    /// Extruded body with mounting holes and rounded rims.
    Filleted,
    /// Heavier body with slot fillets, gussets and M5 holes.
    #[default]
    Reinforced,
}

impl Variant {
    /// All variants in design order.
    pub const ALL: [Variant; 3] = [Variant::Plain, Variant::Filleted, Variant::Reinforced];

    pub fn params(self) -> BracketParams {
        match self {
            Variant::Plain => BracketParams::plain(),
            Variant::Filleted => BracketParams::filleted(),
            Variant::Reinforced => BracketParams::reinforced(),
        }
    }

    /// File stem of the exported mesh.
    pub fn output_stem(self) -> &'static str {
        match self {
            Variant::Plain => "bracket_plain",
            Variant::Filleted => "bracket_filleted",
            Variant::Reinforced => "bracket_reinforced",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variant::Plain => "plain",
            Variant::Filleted => "filleted",
            Variant::Reinforced => "reinforced",
        };
        f.write_str(name)
    }
}

// =============================================================================
// FEATURE PARAMETERS
// =============================================================================

/// How the cylindrical body is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BaseBody {
    /// Z-axis cylinder primitive rotated onto X.
    Cylinder,
    /// Circle sketched on the YZ plane and extruded along +X.
    ExtrudedProfile,
}

/// Triangular reinforcement ribs at the slot transitions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Gussets {
    /// Rib thickness along Y.
    pub thickness: f64,
    /// Leg along X, pointing into the span between the slots.
    pub length: f64,
    /// Leg along Z, pointing away from the body axis.
    pub height: f64,
    /// How far the rib anchor sits inside the slot face.
    pub overlap: f64,
}

/// Rule for placing the four axial mounting holes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum HolePlacement {
    /// Offsets derived from the body radius and the narrower slot.
    Derived { max_lateral: f64, wall_margin: f64 },
    /// Hand-picked offsets.
    Fixed { lateral: f64, vertical: f64 },
}

/// Four axial holes at `(±lateral, ±vertical)` in the YZ cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HolePattern {
    pub diameter: f64,
    pub placement: HolePlacement,
}

impl HolePattern {
    #[inline]
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }
}

// =============================================================================
// PARAMETER SET
// =============================================================================

/// Complete parameter set of one bracket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BracketParams {
    /// Depth each board sits in its slot.
    pub engagement_depth: f64,
    /// Distance between the two boards.
    pub board_gap: f64,
    pub cylinder_diameter: f64,
    /// Slot width (Z) at the `x = 0` end.
    pub slot_width_a: f64,
    /// Slot width (Z) at the `x = total_length` end.
    pub slot_width_b: f64,
    /// Extent of the slot cutting box across the body (Y).
    pub slot_span: f64,
    /// Extra axial length of the slot cutting box.
    pub slot_overcut: f64,
    pub base: BaseBody,
    pub slot_fillet: Option<f64>,
    pub gussets: Option<Gussets>,
    pub holes: Option<HolePattern>,
    pub rim_fillet: Option<f64>,
}

impl BracketParams {
    /// Slotted cylinder for a 16 mm board with 0.5 mm tolerance per side.
    pub fn plain() -> Self {
        let board_thickness = 16.0;
        let tolerance = 0.5;
        let cylinder_diameter = 35.0;
        let slot_width = board_thickness + tolerance * 2.0;

        Self {
            engagement_depth: 30.0,
            board_gap: 47.5,
            cylinder_diameter,
            slot_width_a: slot_width,
            slot_width_b: slot_width,
            slot_span: cylinder_diameter + 2.0,
            slot_overcut: SLOT_OVERCUT,
            base: BaseBody::Cylinder,
            slot_fillet: None,
            gussets: None,
            holes: None,
            rim_fillet: None,
        }
    }

    /// Extruded body with derived hole placement and rounded rims.
    pub fn filleted() -> Self {
        let cylinder_diameter = 35.0;

        Self {
            engagement_depth: 30.0,
            board_gap: 47.5,
            cylinder_diameter,
            slot_width_a: 16.3,
            slot_width_b: 18.5,
            slot_span: cylinder_diameter * 2.0,
            slot_overcut: SLOT_OVERCUT,
            base: BaseBody::ExtrudedProfile,
            slot_fillet: None,
            gussets: None,
            holes: Some(HolePattern {
                diameter: 3.3,
                placement: HolePlacement::Derived {
                    max_lateral: HOLE_MAX_LATERAL,
                    wall_margin: HOLE_WALL_MARGIN,
                },
            }),
            rim_fillet: Some(1.0),
        }
    }

    /// Heavy-duty body for M5 threaded rods.
    ///
    /// The hole offsets leave about 2.5 mm to the outer wall, 3.2 mm to
    /// slot A and 4.7 mm between neighbouring holes.
    pub fn reinforced() -> Self {
        let cylinder_diameter = 40.0;

        Self {
            engagement_depth: 30.0,
            board_gap: 47.5,
            cylinder_diameter,
            slot_width_a: 16.3,
            slot_width_b: 18.5,
            slot_span: cylinder_diameter * 2.0,
            slot_overcut: SLOT_OVERCUT,
            base: BaseBody::ExtrudedProfile,
            slot_fillet: Some(1.5),
            gussets: Some(Gussets {
                thickness: 4.0,
                length: 15.0,
                height: 10.0,
                overlap: 0.5,
            }),
            holes: Some(HolePattern {
                diameter: 5.3,
                placement: HolePlacement::Fixed {
                    lateral: 5.0,
                    vertical: 14.0,
                },
            }),
            rim_fillet: Some(2.0),
        }
    }

    // =========================================================================
    // DERIVED DIMENSIONS
    // =========================================================================

    /// Length of the body: both engagement depths plus the board gap.
    ///
    /// ```rust
    /// use bracket_builder::BracketParams;
    /// assert_eq!(BracketParams::plain().total_length(), 107.5);
    /// ```
    pub fn total_length(&self) -> f64 {
        self.engagement_depth + self.board_gap + self.engagement_depth
    }

    pub fn radius(&self) -> f64 {
        self.cylinder_diameter / 2.0
    }

    /// Axial centres of slot A and slot B.
    pub fn slot_centers(&self) -> [f64; 2] {
        [
            self.engagement_depth / 2.0,
            self.engagement_depth + self.board_gap + self.engagement_depth / 2.0,
        ]
    }

    /// Axial positions of the slot floors, where the slot transition edges lie.
    pub fn slot_floors(&self) -> [f64; 2] {
        [self.engagement_depth, self.engagement_depth + self.board_gap]
    }

    pub fn mid_length(&self) -> f64 {
        self.total_length() / 2.0
    }

    pub fn narrow_slot_width(&self) -> f64 {
        self.slot_width_a.min(self.slot_width_b)
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Rejects parameter sets that cannot produce a single sound part.
    pub fn validate(&self) -> Result<(), BuildError> {
        positive("engagement_depth", self.engagement_depth)?;
        positive("board_gap", self.board_gap)?;
        positive("cylinder_diameter", self.cylinder_diameter)?;
        positive("slot_width_a", self.slot_width_a)?;
        positive("slot_width_b", self.slot_width_b)?;
        positive("slot_overcut", self.slot_overcut)?;

        for (name, width) in [("slot_width_a", self.slot_width_a), ("slot_width_b", self.slot_width_b)] {
            if width >= self.cylinder_diameter {
                return Err(BuildError::invalid(
                    name,
                    format!(
                        "slot width {} must be narrower than the body diameter {}",
                        width, self.cylinder_diameter
                    ),
                ));
            }
        }
        if self.slot_span < self.cylinder_diameter {
            return Err(BuildError::invalid(
                "slot_span",
                format!(
                    "slot span {} does not cut through the body diameter {}",
                    self.slot_span, self.cylinder_diameter
                ),
            ));
        }

        let radius = self.radius();
        for (name, fillet) in [("slot_fillet", self.slot_fillet), ("rim_fillet", self.rim_fillet)] {
            if let Some(r) = fillet {
                positive(name, r)?;
                if r >= radius {
                    return Err(BuildError::invalid(
                        name,
                        format!("fillet radius {} must be smaller than the body radius {}", r, radius),
                    ));
                }
            }
        }

        if let Some(gussets) = &self.gussets {
            positive("gussets.thickness", gussets.thickness)?;
            positive("gussets.length", gussets.length)?;
            positive("gussets.height", gussets.height)?;
            if gussets.overlap < 0.0 {
                return Err(BuildError::invalid(
                    "gussets.overlap",
                    format!("must not be negative: {}", gussets.overlap),
                ));
            }
        }

        if let Some(holes) = &self.holes {
            positive("holes.diameter", holes.diameter)?;
            if holes.radius() >= radius {
                return Err(BuildError::invalid(
                    "holes.diameter",
                    format!("hole diameter {} does not fit the body", holes.diameter),
                ));
            }
            if let HolePlacement::Derived { max_lateral, wall_margin } = holes.placement {
                positive("holes.max_lateral", max_lateral)?;
                if wall_margin < 0.0 {
                    return Err(BuildError::invalid(
                        "holes.wall_margin",
                        format!("must not be negative: {}", wall_margin),
                    ));
                }
            }
        }

        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), BuildError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(BuildError::invalid(name, format!("must be positive: {}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        for variant in Variant::ALL {
            variant.params().validate().unwrap();
        }
    }

    #[test]
    fn test_total_length_scenario() {
        let params = BracketParams::plain();
        assert_eq!(params.cylinder_diameter, 35.0);
        assert_eq!(params.total_length(), 107.5);
        assert_eq!(params.slot_centers(), [15.0, 92.5]);
        assert_eq!(params.slot_floors(), [30.0, 77.5]);
        assert_eq!(params.mid_length(), 53.75);
    }

    #[test]
    fn test_plain_slot_width_includes_tolerance() {
        let params = BracketParams::plain();
        assert_eq!(params.slot_width_a, 17.0);
        assert_eq!(params.slot_span, 37.0);
    }

    #[test]
    fn test_rejects_slot_wider_than_body() {
        let mut params = BracketParams::filleted();
        params.slot_width_b = 40.0;
        match params.validate() {
            Err(BuildError::InvalidParameter { name, .. }) => assert_eq!(name, "slot_width_b"),
            other => panic!("expected invalid parameter, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        let mut params = BracketParams::plain();
        params.board_gap = 0.0;
        assert!(params.validate().is_err());

        let mut params = BracketParams::plain();
        params.engagement_depth = f64::NAN;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_fillet() {
        let mut params = BracketParams::reinforced();
        params.rim_fillet = Some(25.0);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_short_slot_span() {
        let mut params = BracketParams::plain();
        params.slot_span = 30.0;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_variant_names() {
        assert_eq!(Variant::default(), Variant::Reinforced);
        assert_eq!(Variant::Filleted.to_string(), "filleted");
        assert_eq!(Variant::Plain.output_stem(), "bracket_plain");
    }
}
