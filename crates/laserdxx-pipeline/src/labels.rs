//! Size label placement
//!
//! Graded marker exports lay out one size per zone, separated by thin
//! vertical divider marks spanning the drawing. Each zone gets one
//! label above its largest cut piece.

use laserdxx_core::{Bounds, ContourId, Layer, Polyline, TextEntity, Tolerances};
use tracing::debug;

/// Whether the raw input comes from an export flavour that carries size zones
pub fn is_labeling_source(input: &str, markers: &[String]) -> bool {
    let haystack = input.to_uppercase();
    markers
        .iter()
        .any(|m| !m.is_empty() && haystack.contains(&m.to_uppercase()))
}

/// Divider chains: narrow and nearly as tall as the drawing
///
/// Returns their ids and sorted X positions.
pub fn find_dividers(
    polylines: &[Polyline],
    frame: Option<ContourId>,
    tolerances: &Tolerances,
) -> (Vec<ContourId>, Vec<f64>) {
    let Some(drawing) = drawing_bounds(polylines, frame) else {
        return (Vec::new(), Vec::new());
    };
    let min_height = drawing.height() * tolerances.divider_min_height_ratio;
    if min_height <= 0.0 {
        return (Vec::new(), Vec::new());
    }

    let dividers: Vec<&Polyline> = polylines
        .iter()
        .filter(|p| Some(p.id) != frame)
        .filter(|p| p.bbox.width() <= tolerances.divider_max_width && p.bbox.height() >= min_height)
        .collect();

    let ids = dividers.iter().map(|p| p.id).collect();
    let mut xs: Vec<f64> = dividers.iter().map(|p| p.bbox.center_x()).collect();
    xs.sort_by(f64::total_cmp);
    xs.dedup();
    (ids, xs)
}

/// Zone of `x` given sorted divider positions
pub fn zone_index(dividers: &[f64], x: f64) -> usize {
    dividers.partition_point(|&d| d < x)
}

/// One label per zone that has both a size code and a cut piece
///
/// The code is the first captured text in the zone; the piece is the
/// zone's closed CUT chain with the largest bounding box. Chains must
/// already be classified.
pub fn place_labels(
    polylines: &[Polyline],
    texts: &[TextEntity],
    frame: Option<ContourId>,
    tolerances: &Tolerances,
) -> Vec<TextEntity> {
    let (divider_ids, dividers) = find_dividers(polylines, frame, tolerances);
    let zones = dividers.len() + 1;
    let mut labels = Vec::new();

    for zone in 0..zones {
        let Some(code) = texts.iter().find(|t| zone_index(&dividers, t.x) == zone) else {
            debug!(zone, "no size code in zone");
            continue;
        };
        let piece = polylines
            .iter()
            .filter(|p| p.closed && p.layer == Some(Layer::Cut))
            .filter(|p| Some(p.id) != frame && !divider_ids.contains(&p.id))
            .filter(|p| zone_index(&dividers, p.bbox.center_x()) == zone)
            .fold(None::<&Polyline>, |best, p| match best {
                Some(b) if b.bbox.area() >= p.bbox.area() => Some(b),
                _ => Some(p),
            });
        let Some(piece) = piece else {
            debug!(zone, code = %code.text, "no cut piece in zone");
            continue;
        };

        let height = if code.height > 0.0 {
            code.height
        } else {
            tolerances.default_label_height
        };
        labels.push(TextEntity::new(
            piece.bbox.center_x(),
            piece.bbox.max_y + height,
            code.text.clone(),
            Layer::Boards.as_str(),
            height,
        ));
    }

    debug!(zones, labels = labels.len(), "placed size labels");
    labels
}

fn drawing_bounds(polylines: &[Polyline], frame: Option<ContourId>) -> Option<Bounds> {
    polylines
        .iter()
        .filter(|p| Some(p.id) != frame)
        .map(|p| p.bbox)
        .reduce(|a, b| a.union(&b))
}
