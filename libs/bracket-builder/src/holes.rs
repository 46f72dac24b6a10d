//! # Hole Placement
//!
//! The mounting holes are bored along the body axis from mid-length out
//! through the `x = 0` end face, at the four sign combinations of a lateral
//! (Y) and vertical (Z) offset. The derived
//! placement puts the hole axis halfway between the narrower slot face and
//! the outer wall, then moves it sideways as far as the wall allows:
//!
//! ```text
//! z = (r + min(slot_a, slot_b) / 2) / 2
//! y = min(max_lateral, sqrt(r² - z²) - hole_r - wall_margin)
//! ```

use crate::params::{BracketParams, HolePattern, HolePlacement};
use config::constants::HOLE_OVERSHOOT;
use glam::{DQuat, DVec2, DVec3};
use serde::Serialize;
use solid_kernel::{KernelError, Solid};
use std::f64::consts::FRAC_PI_2;

/// Lateral (Y) and vertical (Z) offset of the hole axes from the body axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoleOffsets {
    pub lateral: f64,
    pub vertical: f64,
}

/// Remaining material around the holes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoleClearance {
    /// Hole edge to the outer cylindrical wall.
    pub wall: f64,
    /// Hole edge to the face of slot A, the only slot a bore passes.
    pub slot: f64,
    /// Between neighbouring holes.
    pub between: f64,
}

impl HoleClearance {
    /// Smallest of the three clearances.
    pub fn min(&self) -> f64 {
        self.wall.min(self.slot).min(self.between)
    }
}

impl HolePattern {
    /// Offsets of the hole axes for the given body.
    ///
    /// ```rust
    /// use bracket_builder::BracketParams;
    ///
    /// let params = BracketParams::reinforced();
    /// let offsets = params.holes.unwrap().offsets(&params);
    /// assert_eq!((offsets.lateral, offsets.vertical), (5.0, 14.0));
    /// ```
    pub fn offsets(&self, params: &BracketParams) -> HoleOffsets {
        match self.placement {
            HolePlacement::Fixed { lateral, vertical } => HoleOffsets { lateral, vertical },
            HolePlacement::Derived {
                max_lateral,
                wall_margin,
            } => {
                let r = params.radius();
                let vertical = (r + params.narrow_slot_width() / 2.0) / 2.0;
                let y_max = (r * r - vertical * vertical).max(0.0).sqrt();
                let lateral = max_lateral
                    .min(y_max - self.radius() - wall_margin)
                    .max(0.0);
                HoleOffsets { lateral, vertical }
            }
        }
    }

    /// Hole centres in the YZ cross-section, as `(y, z)`.
    pub fn positions(&self, params: &BracketParams) -> [DVec2; 4] {
        let HoleOffsets { lateral, vertical } = self.offsets(params);
        [
            DVec2::new(lateral, vertical),
            DVec2::new(lateral, -vertical),
            DVec2::new(-lateral, vertical),
            DVec2::new(-lateral, -vertical),
        ]
    }

    /// Bore for the hole centred at `center`, running along X from
    /// mid-length to `HOLE_OVERSHOOT` past the `x = 0` face.
    pub fn bore(
        &self,
        params: &BracketParams,
        center: DVec2,
        segments: u32,
    ) -> Result<Solid, KernelError> {
        let depth = params.mid_length() + HOLE_OVERSHOOT;
        Ok(Solid::cylinder(self.radius(), depth, segments)?
            .rotated(DQuat::from_rotation_y(FRAC_PI_2))
            .translated(DVec3::new(-HOLE_OVERSHOOT, center.x, center.y)))
    }
}

impl HoleOffsets {
    /// Clearances left by holes of `hole_radius` at these offsets.
    ///
    /// A bore ends at mid-length, short of the slot B floor, so only slot A
    /// counts for the slot clearance.
    pub fn clearance(&self, params: &BracketParams, hole_radius: f64) -> HoleClearance {
        let center_distance = DVec2::new(self.lateral, self.vertical).length();
        HoleClearance {
            wall: params.radius() - (center_distance + hole_radius),
            slot: self.vertical.abs() - hole_radius - params.slot_width_a / 2.0,
            between: (2.0 * self.lateral.abs()).min(2.0 * self.vertical.abs()) - 2.0 * hole_radius,
        }
    }
}
