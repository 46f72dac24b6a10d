//! # Build Report
//!
//! Derived metrics printed after a build: dimensions, material volume and
//! how many edges each rounding step touched.

use crate::holes::{HoleClearance, HoleOffsets};
use serde::Serialize;
use std::fmt;

/// Outcome of one optional rounding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FilletStep {
    /// Not configured for this bracket.
    Disabled,
    /// The selection was empty, so the step was skipped.
    Skipped,
    /// Number of selected edges rounded.
    Applied { edges: usize },
}

/// Hole placement summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoleReport {
    pub diameter: f64,
    pub offsets: HoleOffsets,
    pub clearance: HoleClearance,
}

/// Metrics of a finished bracket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildReport {
    pub total_length: f64,
    pub cylinder_diameter: f64,
    pub volume_mm3: f64,
    pub triangle_count: usize,
    pub slot_fillet: FilletStep,
    pub gussets: usize,
    pub holes: Option<HoleReport>,
    pub rim_fillet: FilletStep,
}

impl BuildReport {
    /// Material volume in cubic centimetres.
    pub fn volume_cm3(&self) -> f64 {
        self.volume_mm3 / 1000.0
    }
}

impl fmt::Display for FilletStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilletStep::Disabled => f.write_str("disabled"),
            FilletStep::Skipped => f.write_str("skipped (no matching edges)"),
            FilletStep::Applied { edges } => write!(f, "{} edges", edges),
        }
    }
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Body length:     {:.1} mm", self.total_length)?;
        writeln!(f, "Body diameter:   {:.1} mm", self.cylinder_diameter)?;
        writeln!(f, "Material volume: {:.2} cm3", self.volume_cm3())?;
        writeln!(f, "Triangles:       {}", self.triangle_count)?;
        writeln!(f, "Slot fillet:     {}", self.slot_fillet)?;
        writeln!(f, "Gussets:         {}", self.gussets)?;
        if let Some(holes) = &self.holes {
            writeln!(
                f,
                "Holes:           4 x {:.1} mm at y = ±{:.2}, z = ±{:.2} (min clearance {:.2} mm)",
                holes.diameter,
                holes.offsets.lateral,
                holes.offsets.vertical,
                holes.clearance.min()
            )?;
        }
        write!(f, "Rim fillet:      {}", self.rim_fillet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BuildReport {
        BuildReport {
            total_length: 107.5,
            cylinder_diameter: 35.0,
            volume_mm3: 81_234.5,
            triangle_count: 1200,
            slot_fillet: FilletStep::Disabled,
            gussets: 0,
            holes: None,
            rim_fillet: FilletStep::Applied { edges: 4 },
        }
    }

    #[test]
    fn test_volume_in_cubic_centimetres() {
        assert!((sample().volume_cm3() - 81.2345).abs() < 1e-12);
    }

    #[test]
    fn test_display_lists_metrics() {
        let text = sample().to_string();
        assert!(text.contains("107.5 mm"));
        assert!(text.contains("81.23 cm3"));
        assert!(text.contains("Rim fillet:      4 edges"));
        assert!(!text.contains("Holes"));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["rim_fillet"]["status"], "applied");
        assert_eq!(json["rim_fillet"]["edges"], 4);
        assert_eq!(json["slot_fillet"]["status"], "disabled");
        assert!(json["holes"].is_null());
    }
}
