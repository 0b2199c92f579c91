//! Pipeline constants
//!
//! Every distance below is in drawing units (inches or millimeters,
//! whatever the source file uses). These are the defaults behind
//! [`crate::Tolerances`]; the settings crate may override them.
//! Earlier revisions of the cleanup used 0.05 for healing, so outputs
//! can differ slightly from files processed with those revisions.

/// Maximum endpoint distance for two open chains to be joined.
pub const HEAL_TOLERANCE: f64 = 0.1;

/// Consecutive points closer than this are treated as one point.
pub const DUPLICATE_EPSILON: f64 = 1e-6;

/// First/last vertex distance under which an unflagged polyline is closed.
pub const CLOSURE_EPSILON: f64 = 1e-3;

/// Triangle area under which a vertex is collinear with its neighbours.
pub const COLLINEAR_EPSILON: f64 = 1e-4;

/// Chains with a shorter perimeter are debris.
pub const MIN_PERIMETER: f64 = 2.0;

/// Segments used to approximate a full circle.
pub const ARC_SEGMENTS: usize = 64;

/// Accepted frame widths for inch drawings.
pub const FRAME_WIDTH_BAND_IN: (f64, f64) = (40.0, 80.0);

/// Accepted frame widths for millimeter drawings.
pub const FRAME_WIDTH_BAND_MM: (f64, f64) = (1000.0, 2050.0);

/// Deepest containment nesting the classifier will descend into.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Divider marks are at most this wide.
pub const DIVIDER_MAX_WIDTH: f64 = 0.5;

/// Divider marks span at least this fraction of the drawing height.
pub const DIVIDER_MIN_HEIGHT_RATIO: f64 = 0.8;

/// Label height used when the source text carries none.
pub const DEFAULT_LABEL_HEIGHT: f64 = 1.0;

/// Markers identifying exports whose size codes should be placed.
pub const LABEL_MARKERS: &[&str] = &["ACCUMARK", "GERBER"];
