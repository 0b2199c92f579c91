//! Entity extraction
//!
//! Reads the DXF entity stream with the `dxf` crate and maps the few
//! entity types the cutting workflow uses onto point chains. Text is
//! kept only when it carries a recognized size code.

use crate::arc_expander::ArcExpander;
use crate::size_codes::SizeCodeMatcher;
use dxf::entities::{Entity, EntityType};
use dxf::Drawing;
use laserdxx_core::{ContourId, Error, Point, Polyline, Result, TextEntity, Tolerances};
use tracing::debug;

/// Output of the extraction stage
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub polylines: Vec<Polyline>,
    /// Size codes found in TEXT/MTEXT, in drawing order
    pub texts: Vec<TextEntity>,
}

/// Parse a DXF string
///
/// Any grammar error aborts with [`Error::MalformedInput`], and so does
/// input without a single SECTION (blank or truncated files).
pub fn parse_drawing(content: &str) -> Result<Drawing> {
    if !content.lines().any(|line| line.trim() == "SECTION") {
        return Err(Error::malformed("no SECTION found"));
    }
    let mut bytes = content.as_bytes();
    Drawing::load(&mut bytes).map_err(|e| Error::malformed(e.to_string()))
}

/// Parse and extract in one step
pub fn extract_str(content: &str, tolerances: &Tolerances, capture_text: bool) -> Result<Extraction> {
    let drawing = parse_drawing(content)?;
    Ok(extract(&drawing, tolerances, capture_text))
}

/// Map drawing entities to chains and size-code texts
///
/// Ids are handed out in entity order starting at zero.
pub fn extract(drawing: &Drawing, tolerances: &Tolerances, capture_text: bool) -> Extraction {
    let expander = ArcExpander::with_segments(tolerances.arc_segments);
    let matcher = SizeCodeMatcher::new();
    let mut extraction = Extraction::default();
    let mut next_id = 0u64;
    let mut ignored = 0usize;

    for entity in drawing.entities() {
        let layer = entity.common.layer.as_str();
        match chain_for_entity(entity, &expander) {
            Some((points, flagged_closed)) => {
                if let Some(polyline) =
                    build_chain(ContourId(next_id), points, flagged_closed, layer, tolerances)
                {
                    next_id += 1;
                    extraction.polylines.push(polyline);
                }
            }
            None => {
                if let Some(text) = capture_text
                    .then(|| text_for_entity(entity, &matcher))
                    .flatten()
                {
                    extraction.texts.push(text);
                } else {
                    ignored += 1;
                }
            }
        }
    }

    debug!(
        chains = extraction.polylines.len(),
        texts = extraction.texts.len(),
        ignored,
        "extracted drawing entities"
    );
    extraction
}

/// Raw vertices of a geometric entity and whether the source flags it closed
fn chain_for_entity(entity: &Entity, expander: &ArcExpander) -> Option<(Vec<Point>, bool)> {
    match &entity.specific {
        EntityType::Line(line) => Some((
            vec![
                Point::new(line.p1.x, line.p1.y),
                Point::new(line.p2.x, line.p2.y),
            ],
            false,
        )),
        EntityType::LwPolyline(polyline) => {
            let points = polyline
                .vertices
                .iter()
                .map(|v| Point::new(v.x, v.y))
                .collect();
            // Bit 0 (value 1) indicates closed
            Some((points, polyline.flags & 1 != 0))
        }
        EntityType::Polyline(polyline) => {
            let points = polyline
                .vertices()
                .map(|v| Point::new(v.location.x, v.location.y))
                .collect();
            Some((points, polyline.flags & 1 != 0))
        }
        EntityType::Circle(circle) => Some((
            expander.expand_circle(Point::new(circle.center.x, circle.center.y), circle.radius),
            true,
        )),
        EntityType::Arc(arc) => Some((
            expander.expand_arc(
                Point::new(arc.center.x, arc.center.y),
                arc.radius,
                arc.start_angle,
                arc.end_angle,
            ),
            false,
        )),
        _ => None,
    }
}

fn text_for_entity(entity: &Entity, matcher: &SizeCodeMatcher) -> Option<TextEntity> {
    let layer = entity.common.layer.clone();
    match &entity.specific {
        EntityType::Text(text) => matcher.find(&text.value).map(|code| {
            TextEntity::new(text.location.x, text.location.y, code, layer, text.text_height)
        }),
        EntityType::MText(mtext) => {
            let mut raw = mtext.extended_text.concat();
            raw.push_str(&mtext.text);
            matcher.find(&matcher.clean_mtext(&raw)).map(|code| {
                TextEntity::new(
                    mtext.insertion_point.x,
                    mtext.insertion_point.y,
                    code,
                    layer,
                    mtext.initial_text_height,
                )
            })
        }
        _ => None,
    }
}

/// Clean raw vertices into a chain
///
/// Drops consecutive duplicates, detects implicit closure and forces
/// the closing vertex to be an exact copy of the start.
fn build_chain(
    id: ContourId,
    raw: Vec<Point>,
    flagged_closed: bool,
    layer: &str,
    tolerances: &Tolerances,
) -> Option<Polyline> {
    let mut points: Vec<Point> = Vec::with_capacity(raw.len());
    for p in raw {
        if !(p.x.is_finite() && p.y.is_finite()) {
            continue;
        }
        match points.last() {
            Some(last) if last.distance_to(&p) < tolerances.duplicate_epsilon => {}
            _ => points.push(p),
        }
    }
    if points.len() < 2 {
        return None;
    }

    let first = points[0];
    let last = points[points.len() - 1];
    let touching = points.len() > 2 && first.distance_to(&last) <= tolerances.closure_epsilon;
    let closed = (flagged_closed && points.len() > 2) || touching;
    if touching {
        let last_index = points.len() - 1;
        points[last_index] = first;
    }

    Some(Polyline::new(id, points, closed, layer))
}
