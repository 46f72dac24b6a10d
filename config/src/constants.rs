//! # Configuration Constants
//!
//! Centralized constants for the bracket pipeline. All geometry tolerances,
//! tessellation parameters, kernel limits and bracket defaults live here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Resolution**: Default tessellation parameters
//! - **Topology**: Feature-edge detection thresholds
//! - **Limits**: Maximum values for safety bounds
//! - **Bracket**: Defaults shared by the bracket presets

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Thickness of a BSP splitting plane.
///
/// Points closer than this to a plane are classified as coplanar. Chosen for
/// millimetre-scale parts where features are never thinner than a micron.
pub const PLANE_EPSILON: f64 = 1e-5;

/// Distance under which two vertices are treated as the same point when
/// welding a triangle soup back into an indexed mesh.
///
/// # Example
///
/// ```rust
/// use config::constants::{PLANE_EPSILON, WELD_TOLERANCE};
///
/// // Welding must be at least as coarse as plane classification.
/// assert!(WELD_TOLERANCE >= PLANE_EPSILON);
/// ```
pub const WELD_TOLERANCE: f64 = 1e-5;

/// Minimum triangle area kept when rebuilding meshes.
pub const MIN_TRIANGLE_AREA: f64 = 1e-12;

// =============================================================================
// RESOLUTION CONSTANTS
// =============================================================================

/// Default number of segments for circular outlines of the bracket body.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_SEGMENTS, MIN_FRAGMENTS};
///
/// assert!(DEFAULT_SEGMENTS >= MIN_FRAGMENTS);
/// ```
pub const DEFAULT_SEGMENTS: u32 = 48;

/// Default number of segments used to approximate a quarter-circle fillet arc.
pub const DEFAULT_FILLET_SEGMENTS: u32 = 6;

/// Default minimum fragment angle in degrees.
pub const DEFAULT_FA: f64 = 12.0;

/// Default minimum fragment size in millimetres.
pub const DEFAULT_FS: f64 = 0.5;

/// Minimum number of fragments for any circular shape.
///
/// Kept above `360 / FEATURE_ANGLE_DEGREES` so that neighbouring facets of a
/// tessellated cylinder are never mistaken for a sharp edge.
///
/// # Example
///
/// ```rust
/// use config::constants::{FEATURE_ANGLE_DEGREES, MIN_FRAGMENTS};
///
/// assert!(360.0 / MIN_FRAGMENTS as f64 <= FEATURE_ANGLE_DEGREES);
/// ```
pub const MIN_FRAGMENTS: u32 = 16;

/// Maximum number of fragments for any circular shape.
pub const MAX_FRAGMENTS: u32 = 512;

// =============================================================================
// TOPOLOGY CONSTANTS
// =============================================================================

/// Dihedral angle (between face normals) above which a mesh edge is a
/// feature edge.
pub const FEATURE_ANGLE_DEGREES: f64 = 30.0;

/// Turning angle between consecutive feature segments above which a chain
/// is split into two edges.
pub const CORNER_ANGLE_DEGREES: f64 = 30.0;

/// Maximum distance of a chain point from the fitted line for the chain to be
/// classified as a straight edge.
pub const LINE_TOLERANCE: f64 = 1e-4;

/// Maximum distance of a chain point from the fitted plane for the chain to be
/// considered planar.
pub const PLANARITY_TOLERANCE: f64 = 1e-4;

/// Relative radial deviation allowed when classifying a chain as a circle.
///
/// Covers the sagitta of chord points introduced when a tessellated circle is
/// cut by a boolean: `1 - cos(PI / MIN_FRAGMENTS)` is just under 0.02.
pub const CIRCLE_FIT_TOLERANCE: f64 = 0.03;

/// Angular tolerance (as `1 - |cos|`) for treating a direction as parallel to
/// an axis.
pub const AXIS_PARALLEL_TOLERANCE: f64 = 1e-6;

/// Triangles whose smallest height is below this have normals too noisy for
/// feature-edge detection. They borrow a neighbour's normal instead.
pub const SLIVER_HEIGHT: f64 = 1e-4;

/// Overlap used by fillet tools so that their faces never coincide with the
/// faces of the body they modify.
pub const FILLET_TOOL_OVERLAP: f64 = 0.01;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of vertices in a single mesh.
pub const MAX_VERTICES: usize = 10_000_000;

/// Maximum number of triangles in a single mesh.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_TRIANGLES;
///
/// let triangle_count = 250_000;
/// assert!(triangle_count < MAX_TRIANGLES);
/// ```
pub const MAX_TRIANGLES: usize = 2_000_000;

/// Remaining stack below which recursive BSP code grows a new stack segment
/// through the `stacker` crate.
pub const STACK_RED_ZONE_BYTES: usize = 64 * 1024;

/// Size of each stack segment allocated by `stacker`.
pub const STACK_GROW_BYTES: usize = 4 * 1024 * 1024;

// =============================================================================
// BRACKET CONSTANTS
// =============================================================================

/// Extra axial length of a slot cutting box so the cut clears the end face.
pub const SLOT_OVERCUT: f64 = 0.1;

/// Rim edges are circles larger than this radius; mounting-hole circles are
/// always smaller.
pub const RIM_MIN_RADIUS: f64 = 10.0;

/// Distance from an end face within which a circle counts as a rim circle.
pub const RIM_POSITION_TOLERANCE: f64 = 0.1;

/// Distance from a slot floor within which a line counts as a slot-transition
/// edge.
pub const SLOT_EDGE_TOLERANCE: f64 = 1.0;

/// Lateral offset cap used by the derived hole placement.
pub const HOLE_MAX_LATERAL: f64 = 6.0;

/// Wall margin subtracted from the lateral room in the derived hole placement.
pub const HOLE_WALL_MARGIN: f64 = 0.5;

/// Clearance below which a hole is reported as thin-walled.
pub const MIN_HOLE_CLEARANCE: f64 = 1.0;

/// Distance hole bores extend past the `x = 0` end face. The slot fillet
/// envelope reaches this far past both end faces.
pub const HOLE_OVERSHOOT: f64 = 1.0;

/// Radial margin of the body envelope used to trim slot fillet fillers back
/// to the cylindrical wall. Kept well above `PLANE_EPSILON` so the envelope
/// never shares a face with the body.
pub const ENVELOPE_MARGIN: f64 = 1e-3;

/// Default output directory for exported meshes.
pub const DEFAULT_OUTPUT_DIR: &str = "exports/stl";

// =============================================================================
// TESSELLATION SETTINGS
// =============================================================================

/// Tessellation settings shared by every primitive and tool of one build.
///
/// # Examples
/// ```
/// use config::constants::Tessellation;
/// let tess = Tessellation::default();
/// assert_eq!(tess.circle_segments, config::constants::DEFAULT_SEGMENTS);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tessellation {
    /// Segments around full circles of the body and revolved tools.
    pub circle_segments: u32,
    /// Segments per quarter circle of a fillet arc.
    pub fillet_segments: u32,
}

impl Tessellation {
    /// Builds tessellation settings, rejecting counts too coarse for
    /// feature-edge detection.
    ///
    /// # Examples
    /// ```
    /// use config::constants::{ConfigError, Tessellation};
    /// assert!(Tessellation::new(64, 8).is_ok());
    /// assert_eq!(Tessellation::new(8, 8), Err(ConfigError::InvalidSegments(8)));
    /// ```
    pub fn new(circle_segments: u32, fillet_segments: u32) -> Result<Self, ConfigError> {
        if !(MIN_FRAGMENTS..=MAX_FRAGMENTS).contains(&circle_segments) {
            return Err(ConfigError::InvalidSegments(circle_segments));
        }
        if fillet_segments == 0 || fillet_segments > MAX_FRAGMENTS / 4 {
            return Err(ConfigError::InvalidFilletSegments(fillet_segments));
        }
        Ok(Self {
            circle_segments,
            fillet_segments,
        })
    }

    /// Segment count for a small circle, derived from its radius but never
    /// coarser than `MIN_FRAGMENTS` nor finer than the body circles.
    pub fn segments_for_radius(&self, radius: f64) -> u32 {
        compute_fragments(radius, 0.0, DEFAULT_FA, DEFAULT_FS).min(self.circle_segments)
    }
}

impl Default for Tessellation {
    fn default() -> Self {
        Self {
            circle_segments: DEFAULT_SEGMENTS,
            fillet_segments: DEFAULT_FILLET_SEGMENTS,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Circle segment count outside `MIN_FRAGMENTS..=MAX_FRAGMENTS`.
    InvalidSegments(u32),
    /// Fillet arc segment count is zero or absurdly large.
    InvalidFilletSegments(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSegments(value) => write!(
                f,
                "circle segments must be within {MIN_FRAGMENTS}..={MAX_FRAGMENTS}: {value}"
            ),
            ConfigError::InvalidFilletSegments(value) => {
                write!(f, "fillet segments must be positive and reasonable: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Computes the number of fragments for a circular shape.
///
/// - If `fn_value > 0`: use it directly
/// - Otherwise: `ceil(min(360 / fa, 2 * PI * r / fs))`
///
/// The result is clamped to `MIN_FRAGMENTS..=MAX_FRAGMENTS`.
///
/// # Example
///
/// ```rust
/// use config::constants::{compute_fragments, DEFAULT_FA, DEFAULT_FS, MIN_FRAGMENTS};
///
/// assert_eq!(compute_fragments(10.0, 32.0, DEFAULT_FA, DEFAULT_FS), 32);
/// assert!(compute_fragments(1.0, 0.0, DEFAULT_FA, DEFAULT_FS) >= MIN_FRAGMENTS);
/// ```
pub fn compute_fragments(radius: f64, fn_value: f64, fa_value: f64, fs_value: f64) -> u32 {
    let fragments = if fn_value > 0.0 {
        fn_value as u32
    } else {
        let from_angle = 360.0 / fa_value;
        let from_size = (2.0 * std::f64::consts::PI * radius) / fs_value;
        from_angle.min(from_size).ceil() as u32
    };

    fragments.clamp(MIN_FRAGMENTS, MAX_FRAGMENTS)
}

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero within EPSILON.
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
