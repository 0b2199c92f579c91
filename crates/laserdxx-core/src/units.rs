//! Unit conversion utilities
//!
//! Material consumption is reported in yards. The pipeline assumes
//! inch-equivalent drawing units for that figure.

/// Drawing units per yard.
pub const INCHES_PER_YARD: f64 = 36.0;

/// Convert a drawing-unit length to yards.
///
/// Non-finite or negative lengths report zero consumption.
pub fn to_yards(length: f64) -> f64 {
    if !length.is_finite() || length <= 0.0 {
        return 0.0;
    }
    length / INCHES_PER_YARD
}

/// Format a yard figure the way the stats panel shows it.
pub fn format_yards(yards: f64) -> String {
    format!("{:.2} yd", yards)
}
