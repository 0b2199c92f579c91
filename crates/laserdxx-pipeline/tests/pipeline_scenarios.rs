use laserdxx_core::{ContourId, Layer, Point};
use laserdxx_pipeline::{process_dxf, ProcessOptions, ProcessedResult};

fn drawing(body: &str) -> String {
    format!("0\nSECTION\n2\nENTITIES\n{}0\nENDSEC\n0\nEOF\n", body)
}

fn line(a: (f64, f64), b: (f64, f64)) -> String {
    format!(
        "0\nLINE\n8\nPIECES\n10\n{}\n20\n{}\n30\n0.0\n11\n{}\n21\n{}\n31\n0.0\n",
        a.0, a.1, b.0, b.1
    )
}

fn closed_lwpolyline(points: &[(f64, f64)]) -> String {
    let mut s = format!("0\nLWPOLYLINE\n8\nPIECES\n90\n{}\n70\n1\n", points.len());
    for (x, y) in points {
        s.push_str(&format!("10\n{}\n20\n{}\n", x, y));
    }
    s
}

fn square(x: f64, y: f64, size: f64) -> String {
    closed_lwpolyline(&[(x, y), (x + size, y), (x + size, y + size), (x, y + size)])
}

fn text(value: &str, x: f64, y: f64) -> String {
    format!(
        "0\nTEXT\n8\nNOTES\n10\n{}\n20\n{}\n30\n0.0\n40\n2.0\n1\n{}\n",
        x, y, value
    )
}

fn run(body: &str) -> ProcessedResult {
    process_dxf(&drawing(body), &ProcessOptions::default()).unwrap()
}

#[test]
fn test_concentric_squares() {
    let body = format!("{}{}", square(0.0, 0.0, 100.0), square(25.0, 25.0, 50.0));
    let result = run(&body);

    assert_eq!(result.polylines.len(), 2);
    assert_eq!(result.polylines[0].layer, Some(Layer::Cut));
    assert_eq!(result.polylines[1].layer, Some(Layer::Boards));
    assert_eq!(result.stats.original_count, 2);
    assert_eq!(result.stats.healed_count, 2);
    assert_eq!(result.stats.debris_removed, 0);
    assert_eq!(result.frame, None);
}

#[test]
fn test_debris_is_dropped() {
    let body = format!(
        "{}{}",
        closed_lwpolyline(&[(500.0, 500.0), (500.004, 500.0), (500.0, 500.003)]),
        square(0.0, 0.0, 100.0)
    );
    let result = run(&body);

    assert_eq!(result.stats.debris_removed, 1);
    assert_eq!(result.polylines.len(), 1);
    assert_eq!(result.polylines[0].area, Some(10000.0));
}

#[test]
fn test_fragmented_square_closes_in_any_order() {
    let corners = [(0.0, 0.0), (40.0, 0.0), (40.0, 40.0), (0.0, 40.0)];
    let edges: Vec<((f64, f64), (f64, f64))> =
        (0..4).map(|i| (corners[i], corners[(i + 1) % 4])).collect();

    let orders = [
        [0, 1, 2, 3],
        [3, 2, 1, 0],
        [0, 2, 1, 3],
        [2, 0, 3, 1],
        [1, 3, 0, 2],
        [3, 0, 2, 1],
    ];
    for (n, order) in orders.iter().enumerate() {
        let body: String = order
            .iter()
            .enumerate()
            .map(|(k, &i)| {
                let (a, b) = edges[i];
                // Flip every other segment on alternate runs
                if (n + k) % 2 == 0 {
                    line(a, b)
                } else {
                    line(b, a)
                }
            })
            .collect();
        let result = run(&body);

        assert_eq!(result.stats.original_count, 4, "order {:?}", order);
        assert_eq!(result.polylines.len(), 1, "order {:?}", order);
        let square = &result.polylines[0];
        assert!(square.closed, "order {:?}", order);
        assert_eq!(square.points.len(), 5, "order {:?}", order);
        assert_eq!(square.points.first(), square.points.last());
        assert_eq!(square.area, Some(1600.0));
        assert_eq!(square.layer, Some(Layer::Cut));
    }
}

#[test]
fn test_small_gaps_are_healed() {
    let body = format!(
        "{}{}{}{}",
        line((0.0, 0.0), (20.0, 0.0)),
        line((20.05, 0.0), (20.0, 20.0)),
        line((20.0, 20.02), (0.0, 20.0)),
        line((0.0, 19.95), (0.03, 0.0)),
    );
    let result = run(&body);
    assert_eq!(result.polylines.len(), 1);
    assert!(result.polylines[0].closed);
    assert!(result.polylines[0].is_properly_closed());
}

#[test]
fn test_frame_excluded_from_bounds() {
    let body = format!("{}{}", square(0.0, 0.0, 60.0), square(10.0, 10.0, 10.0));
    let result = run(&body);

    assert_eq!(result.frame, Some(ContourId(0)));
    assert_eq!(result.polylines[0].layer, Some(Layer::Boards));
    assert_eq!(result.polylines[1].layer, Some(Layer::Cut));
    assert_eq!(result.stats.bounds.width(), 10.0);
    assert_eq!(result.stats.bounds.min_x, 10.0);

    let options = ProcessOptions {
        preserve_frame: false,
        ..ProcessOptions::default()
    };
    let result = process_dxf(&drawing(&body), &options).unwrap();
    assert_eq!(result.frame, None);
    assert_eq!(result.polylines[0].layer, Some(Layer::Cut));
    assert_eq!(result.polylines[1].layer, Some(Layer::Boards));
    assert_eq!(result.stats.bounds.width(), 60.0);
}

#[test]
fn test_closure_invariant_holds_everywhere() {
    let body = format!(
        "{}{}{}{}{}",
        square(0.0, 0.0, 100.0),
        line((10.0, 10.0), (30.0, 10.0)),
        line((30.0, 10.0), (30.0, 30.0)),
        line((30.0, 30.0), (10.0, 10.0)),
        "0\nCIRCLE\n8\n0\n10\n70.0\n20\n70.0\n30\n0.0\n40\n5.0\n",
    );
    let result = run(&body);
    assert_eq!(result.polylines.len(), 3);
    for polyline in &result.polylines {
        assert!(polyline.closed);
        assert!(polyline.is_properly_closed(), "{} broke closure", polyline.id);
    }
    assert_eq!(result.count_on(Layer::Boards), 2);
}

#[test]
fn test_open_cut_inside_piece_is_boards() {
    let body = format!("{}{}", square(0.0, 0.0, 100.0), line((20.0, 50.0), (80.0, 50.0)));
    let result = run(&body);
    assert_eq!(result.polylines[1].layer, Some(Layer::Boards));
    assert!(!result.polylines[1].closed);
}

#[test]
fn test_size_labels_per_zone() {
    let body = format!(
        "{}{}{}{}{}{}",
        text("ACCUMARK EXPORT", 0.0, -10.0),
        square(5.0, 10.0, 30.0),
        text("M", 10.0, 5.0),
        line((50.0, 0.0), (50.0, 100.0)),
        square(60.0, 20.0, 30.0),
        text("xl", 70.0, 5.0),
    );
    let labeled = ProcessOptions {
        enable_labeling: true,
        ..ProcessOptions::default()
    };
    let result = process_dxf(&drawing(&body), &labeled).unwrap();

    assert_eq!(result.labels.len(), 2);
    assert_eq!(result.labels[0].text, "M");
    assert_eq!(result.labels[0].x, 20.0);
    assert_eq!(result.labels[0].y, 42.0);
    assert_eq!(result.labels[1].text, "XL");
    assert_eq!(result.labels[1].x, 75.0);
    assert_eq!(result.labels[1].layer, "BOARDS");

    let result = process_dxf(&drawing(&body), &ProcessOptions::default()).unwrap();
    assert!(result.labels.is_empty());
}

#[test]
fn test_labeling_needs_marker() {
    let body = format!("{}{}", square(5.0, 10.0, 30.0), text("M", 10.0, 5.0));
    let labeled = ProcessOptions {
        enable_labeling: true,
        ..ProcessOptions::default()
    };
    let result = process_dxf(&drawing(&body), &labeled).unwrap();
    assert!(result.labels.is_empty());
}

#[test]
fn test_malformed_input() {
    let err = process_dxf("this is not\na drawing\n", &ProcessOptions::default()).unwrap_err();
    assert!(err.is_malformed_input());
}

#[test]
fn test_degenerate_input_has_zero_consumption() {
    let result = run(&line((5.0, 5.0), (5.0, 5.0)));
    assert!(result.polylines.is_empty());
    assert_eq!(result.stats.material_width_yards, 0.0);
    assert_eq!(result.stats.material_height_yards, 0.0);
    assert!(result.stats.bounds.width().is_finite());
}

#[test]
fn test_result_serializes_camel_case() {
    let result = run(&square(0.0, 0.0, 36.0));
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["stats"]["healedCount"], 1);
    assert_eq!(json["stats"]["materialWidthYards"], 1.0);
    assert_eq!(json["polylines"][0]["layer"], "CUT");
    assert_eq!(json["polylines"][0]["originalLayer"], "PIECES");
    assert_eq!(
        json["polylines"][0]["points"][0],
        serde_json::to_value(Point::new(0.0, 0.0)).unwrap()
    );
}
