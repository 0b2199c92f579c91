use laserdxx_core::{Layer, Tolerances};
use laserdxx_pipeline::extract::extract_str;
use laserdxx_pipeline::{generate_r12, process_dxf, ExportKind, ProcessOptions};

fn drawing(body: &str) -> String {
    format!("0\nSECTION\n2\nENTITIES\n{}0\nENDSEC\n0\nEOF\n", body)
}

fn lwpolyline(points: &[(f64, f64)], closed: bool) -> String {
    let mut s = format!(
        "0\nLWPOLYLINE\n8\nPIECES\n90\n{}\n70\n{}\n",
        points.len(),
        if closed { 1 } else { 0 }
    );
    for (x, y) in points {
        s.push_str(&format!("10\n{}\n20\n{}\n", x, y));
    }
    s
}

fn sample() -> String {
    drawing(&format!(
        "{}{}{}",
        lwpolyline(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)], true),
        lwpolyline(&[(25.0, 25.0), (75.0, 25.0), (75.0, 75.0), (25.0, 75.0)], true),
        lwpolyline(&[(10.0, 90.0), (20.5, 90.0), (20.5, 95.25)], false),
    ))
}

#[test]
fn test_reextracted_output_matches() {
    let result = process_dxf(&sample(), &ProcessOptions::default()).unwrap();
    let dxf = generate_r12(&result.polylines, &result.labels);

    let reread = extract_str(&dxf, &Tolerances::default(), false).unwrap();
    assert_eq!(reread.polylines.len(), result.polylines.len());

    // BOARDS are written first, so match by geometry rather than position
    for original in &result.polylines {
        let copy = reread
            .polylines
            .iter()
            .find(|p| p.points == original.points)
            .unwrap_or_else(|| panic!("{} not found after round trip", original.id));
        assert_eq!(copy.closed, original.closed);
        assert_eq!(copy.original_layer, original.layer.unwrap().as_str());
    }
}

#[test]
fn test_reprocessing_is_stable() {
    let first = process_dxf(&sample(), &ProcessOptions::default()).unwrap();
    let second = process_dxf(&first.export(ExportKind::All), &ProcessOptions::default()).unwrap();

    assert_eq!(second.polylines.len(), first.polylines.len());
    assert_eq!(second.count_on(Layer::Cut), first.count_on(Layer::Cut));
    assert_eq!(second.count_on(Layer::Boards), first.count_on(Layer::Boards));
    assert_eq!(second.stats.bounds, first.stats.bounds);
}

#[test]
fn test_split_exports_partition_polylines() {
    let result = process_dxf(&sample(), &ProcessOptions::default()).unwrap();
    let cut = extract_str(&result.export(ExportKind::CutOnly), &Tolerances::default(), false).unwrap();
    let boards =
        extract_str(&result.export(ExportKind::BoardsOnly), &Tolerances::default(), false).unwrap();

    assert_eq!(cut.polylines.len(), result.count_on(Layer::Cut));
    assert_eq!(boards.polylines.len(), result.count_on(Layer::Boards));
    assert!(cut.polylines.iter().all(|p| p.original_layer == "CUT"));
    assert!(boards.polylines.iter().all(|p| p.original_layer == "BOARDS"));
}
