//! Arc Expander
//!
//! Approximates CIRCLE and ARC entities as point rings so the rest of
//! the pipeline only ever deals with straight segments.

use laserdxx_core::constants::ARC_SEGMENTS;
use laserdxx_core::Point;
use std::f64::consts::PI;

/// Converts circles and arcs to point chains
#[derive(Debug)]
pub struct ArcExpander {
    /// Number of segments for a full circle
    num_segments: usize,
}

impl ArcExpander {
    /// Expander with the given segment count per full turn
    pub fn with_segments(num_segments: usize) -> Self {
        Self {
            num_segments: num_segments.max(3),
        }
    }

    /// Expand a full circle into a ring
    ///
    /// The ring is not closed; the caller marks it closed. A non-finite
    /// center or radius yields no points.
    pub fn expand_circle(&self, center: Point, radius: f64) -> Vec<Point> {
        if !(center.x.is_finite() && center.y.is_finite() && radius.is_finite()) {
            return Vec::new();
        }
        let n = self.num_segments;
        (0..n)
            .map(|i| {
                let angle = 2.0 * PI * i as f64 / n as f64;
                Point::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                )
            })
            .collect()
    }

    /// Expand a counter-clockwise arc given in degrees
    ///
    /// Both the start and the end point are included. The segment count
    /// is proportional to the sweep; equal angles mean a full turn.
    /// Non-finite input yields no points.
    pub fn expand_arc(
        &self,
        center: Point,
        radius: f64,
        start_angle_deg: f64,
        end_angle_deg: f64,
    ) -> Vec<Point> {
        let inputs = [center.x, center.y, radius, start_angle_deg, end_angle_deg];
        if inputs.iter().any(|v| !v.is_finite()) {
            return Vec::new();
        }

        let start_deg = start_angle_deg.rem_euclid(360.0);
        let sweep = (end_angle_deg.rem_euclid(360.0) - start_deg).rem_euclid(360.0);
        let sweep = if sweep == 0.0 { 360.0 } else { sweep };

        let full = self.num_segments as f64;
        let segments = ((full * sweep / 360.0).ceil() as usize).max(1);
        let start = start_deg.to_radians();
        let delta = sweep.to_radians();

        (0..=segments)
            .map(|i| {
                let angle = start + delta * i as f64 / segments as f64;
                Point::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                )
            })
            .collect()
    }
}

impl Default for ArcExpander {
    fn default() -> Self {
        Self::with_segments(ARC_SEGMENTS)
    }
}
