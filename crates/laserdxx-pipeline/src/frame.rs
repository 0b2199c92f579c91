//! Material frame detection
//!
//! Marker files usually carry a rectangle the width of the fabric roll
//! around all the pieces. It is kept for orientation but must not count
//! as a piece or towards material consumption.

use laserdxx_core::geometry::point_in_polygon;
use laserdxx_core::{ContourId, Polyline, Tolerances};
use tracing::debug;

/// Find the frame contour, if any
///
/// The frame is the closed chain with the largest bounding-box area
/// whose width lies in one of the roll-width bands, provided at least
/// one other chain starts inside it.
pub fn detect_frame(polylines: &[Polyline], tolerances: &Tolerances) -> Option<ContourId> {
    let candidate = polylines
        .iter()
        .filter(|p| p.closed && tolerances.is_roll_width(p.bbox.width()))
        .fold(None::<&Polyline>, |best, p| match best {
            Some(b) if b.bbox.area() >= p.bbox.area() => Some(b),
            _ => Some(p),
        })?;

    let encloses_something = polylines.iter().any(|other| {
        other.id != candidate.id
            && other
                .start()
                .is_some_and(|start| point_in_polygon(&start, &candidate.points))
    });

    if encloses_something {
        debug!(frame = %candidate.id, width = candidate.bbox.width(), "detected material frame");
        Some(candidate.id)
    } else {
        debug!(candidate = %candidate.id, "frame candidate encloses nothing, rejected");
        None
    }
}
