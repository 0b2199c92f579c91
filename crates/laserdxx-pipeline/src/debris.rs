//! Debris filtering: stray marks too short to be real cut geometry.

use laserdxx_core::Polyline;
use tracing::debug;

/// Keep chains whose perimeter reaches `min_perimeter`
///
/// Returns the survivors and the number of chains dropped.
pub fn remove_debris(polylines: Vec<Polyline>, min_perimeter: f64) -> (Vec<Polyline>, usize) {
    let before = polylines.len();
    let kept: Vec<Polyline> = polylines
        .into_iter()
        .filter(|p| p.perimeter() >= min_perimeter)
        .collect();
    let removed = before - kept.len();
    if removed > 0 {
        debug!(removed, min_perimeter, "dropped debris chains");
    }
    (kept, removed)
}
