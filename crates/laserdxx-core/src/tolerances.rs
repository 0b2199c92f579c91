//! Tolerance knobs of the cleanup pipeline.

use crate::constants;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Distances and thresholds used by the pipeline stages
///
/// Defaults come from [`crate::constants`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Endpoint distance for gap healing
    pub heal_tolerance: f64,
    /// Distance under which consecutive points collapse
    pub duplicate_epsilon: f64,
    /// First/last distance that closes an unflagged polyline
    pub closure_epsilon: f64,
    /// Triangle area under which a vertex is collinear
    pub collinear_epsilon: f64,
    /// Minimum perimeter of a surviving chain
    pub min_perimeter: f64,
    /// Segments per full circle for CIRCLE/ARC rings
    pub arc_segments: usize,
    /// Frame width band for inch drawings (min, max)
    pub frame_band_in: (f64, f64),
    /// Frame width band for millimeter drawings (min, max)
    pub frame_band_mm: (f64, f64),
    /// Containment depth cap
    pub max_nesting_depth: usize,
    /// Maximum width of a zone divider mark
    pub divider_max_width: f64,
    /// Minimum divider height as a fraction of the drawing height
    pub divider_min_height_ratio: f64,
    /// Label height when the source text has none
    pub default_label_height: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            heal_tolerance: constants::HEAL_TOLERANCE,
            duplicate_epsilon: constants::DUPLICATE_EPSILON,
            closure_epsilon: constants::CLOSURE_EPSILON,
            collinear_epsilon: constants::COLLINEAR_EPSILON,
            min_perimeter: constants::MIN_PERIMETER,
            arc_segments: constants::ARC_SEGMENTS,
            frame_band_in: constants::FRAME_WIDTH_BAND_IN,
            frame_band_mm: constants::FRAME_WIDTH_BAND_MM,
            max_nesting_depth: constants::MAX_NESTING_DEPTH,
            divider_max_width: constants::DIVIDER_MAX_WIDTH,
            divider_min_height_ratio: constants::DIVIDER_MIN_HEIGHT_RATIO,
            default_label_height: constants::DEFAULT_LABEL_HEIGHT,
        }
    }
}

impl Tolerances {
    /// Validate that every knob is usable
    pub fn validate(&self) -> Result<()> {
        let distances = [
            ("heal_tolerance", self.heal_tolerance),
            ("duplicate_epsilon", self.duplicate_epsilon),
            ("closure_epsilon", self.closure_epsilon),
            ("collinear_epsilon", self.collinear_epsilon),
            ("min_perimeter", self.min_perimeter),
            ("divider_max_width", self.divider_max_width),
            ("divider_min_height_ratio", self.divider_min_height_ratio),
            ("default_label_height", self.default_label_height),
        ];
        for (name, value) in distances {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidGeometry(format!(
                    "{} must be a positive number (got {})",
                    name, value
                )));
            }
        }

        if self.arc_segments < 3 {
            return Err(Error::InvalidGeometry(
                "arc_segments must be at least 3".to_string(),
            ));
        }

        if self.max_nesting_depth == 0 {
            return Err(Error::InvalidGeometry(
                "max_nesting_depth must be > 0".to_string(),
            ));
        }

        for (name, (min, max)) in [
            ("frame_band_in", self.frame_band_in),
            ("frame_band_mm", self.frame_band_mm),
        ] {
            if !(min.is_finite() && max.is_finite()) || min >= max {
                return Err(Error::InvalidGeometry(format!(
                    "{} must satisfy min < max (got {}..{})",
                    name, min, max
                )));
            }
        }

        Ok(())
    }

    /// Whether a bounding-box width falls in either roll-width band
    pub fn is_roll_width(&self, width: f64) -> bool {
        let in_band = |(min, max): (f64, f64)| width >= min && width <= max;
        in_band(self.frame_band_in) || in_band(self.frame_band_mm)
    }
}
