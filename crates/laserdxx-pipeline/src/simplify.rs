//! Knot simplification: drops vertices that add nothing to the shape.

use laserdxx_core::geometry::triangle_area;
use laserdxx_core::{Point, Polyline};

/// Remove interior vertices collinear with their neighbours
///
/// Each vertex is tested against the last kept vertex and the next
/// vertex. Endpoints always stay, so a closed chain stays closed.
pub fn simplify(polylines: Vec<Polyline>, epsilon: f64) -> Vec<Polyline> {
    polylines
        .into_iter()
        .map(|mut polyline| {
            if polyline.points.len() >= 3 {
                polyline.points = drop_collinear(&polyline.points, epsilon);
                polyline.refresh_geometry();
            }
            polyline
        })
        .collect()
}

fn drop_collinear(points: &[Point], epsilon: f64) -> Vec<Point> {
    let mut kept = Vec::with_capacity(points.len());
    kept.push(points[0]);
    for window in points.windows(2).skip(1) {
        let (current, next) = (window[0], window[1]);
        let previous = kept[kept.len() - 1];
        if triangle_area(&previous, &current, &next) >= epsilon {
            kept.push(current);
        }
    }
    kept.push(points[points.len() - 1]);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use laserdxx_core::ContourId;

    #[test]
    fn test_collinear_vertices_removed() {
        let chain = Polyline::new(
            ContourId(0),
            vec![
                Point::new(0.0, 0.0),
                Point::new(5.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
            ],
            false,
            "0",
        );
        let out = simplify(vec![chain], 1e-4);
        assert_eq!(
            out[0].points,
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)]
        );
    }

    #[test]
    fn test_closed_square_with_midpoints() {
        let chain = Polyline::new(
            ContourId(1),
            vec![
                Point::new(0.0, 0.0),
                Point::new(5.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 5.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ],
            true,
            "0",
        );
        let out = simplify(vec![chain], 1e-4);
        let square = &out[0];
        assert_eq!(square.points.len(), 5);
        assert_eq!(square.points.first(), square.points.last());
        assert_eq!(square.area, Some(100.0));
    }

    #[test]
    fn test_short_chains_untouched() {
        let chain = Polyline::new(
            ContourId(2),
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)],
            false,
            "0",
        );
        let out = simplify(vec![chain.clone()], 1e-4);
        assert_eq!(out[0], chain);
    }

    #[test]
    fn test_endpoints_kept_even_when_collinear() {
        let chain = Polyline::new(
            ContourId(3),
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 0.0)],
            false,
            "0",
        );
        let out = simplify(vec![chain], 1e-4);
        assert_eq!(out[0].points, vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0)]);
    }
}
