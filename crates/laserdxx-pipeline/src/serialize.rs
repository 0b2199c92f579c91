//! DXF R12 writer
//!
//! Emits the smallest R12 file cutting software accepts: a header with
//! the version only, an empty TABLES section and the entities. BOARDS
//! geometry is written first so internal cuts happen before the piece
//! is released from the material.

use laserdxx_core::{Layer, Point, Polyline, TextEntity};
use std::fmt::Display;

/// Serialize polylines and labels to a DXF R12 string
///
/// Unclassified polylines are written as CUT. Closed polylines set the
/// closed flag and omit the repeated closing vertex.
pub fn generate_r12(polylines: &[Polyline], labels: &[TextEntity]) -> String {
    let mut writer = R12Writer::default();

    writer.section("HEADER");
    writer.group(9, "$ACADVER");
    writer.group(1, "AC1009");
    writer.end_section();

    writer.section("TABLES");
    writer.end_section();

    writer.section("ENTITIES");
    let mut ordered: Vec<&Polyline> = polylines.iter().collect();
    // Stable sort keeps input order within each layer
    ordered.sort_by_key(|p| match p.layer.unwrap_or(Layer::Cut) {
        Layer::Boards => 0,
        Layer::Cut => 1,
    });
    for polyline in ordered {
        writer.polyline(polyline);
    }
    for label in labels {
        writer.text(label);
    }
    writer.end_section();

    writer.group(0, "EOF");
    writer.finish()
}

#[derive(Default)]
struct R12Writer {
    out: String,
}

impl R12Writer {
    fn group(&mut self, code: i32, value: impl Display) {
        self.out.push_str(&format!("{}\n{}\n", code, value));
    }

    fn coord(&mut self, code: i32, value: f64) {
        self.group(code, format!("{:.6}", value));
    }

    fn section(&mut self, name: &str) {
        self.group(0, "SECTION");
        self.group(2, name);
    }

    fn end_section(&mut self) {
        self.group(0, "ENDSEC");
    }

    fn polyline(&mut self, polyline: &Polyline) {
        let layer = polyline.layer.unwrap_or(Layer::Cut);
        self.group(0, "POLYLINE");
        self.group(8, layer.as_str());
        self.group(62, layer.color_index());
        self.group(66, 1);
        self.group(70, if polyline.closed { 1 } else { 0 });
        self.coord(10, 0.0);
        self.coord(20, 0.0);
        self.coord(30, 0.0);

        let points: &[Point] = if polyline.closed && polyline.points.len() > 1 {
            &polyline.points[..polyline.points.len() - 1]
        } else {
            &polyline.points
        };
        for point in points {
            self.group(0, "VERTEX");
            self.group(8, layer.as_str());
            self.coord(10, point.x);
            self.coord(20, point.y);
            self.coord(30, 0.0);
        }

        self.group(0, "SEQEND");
        self.group(8, layer.as_str());
    }

    fn text(&mut self, label: &TextEntity) {
        self.group(0, "TEXT");
        self.group(8, Layer::Boards.as_str());
        self.group(62, Layer::Boards.color_index());
        self.coord(10, label.x);
        self.coord(20, label.y);
        self.coord(30, 0.0);
        self.coord(40, label.height);
        self.group(1, &label.text);
        // 72=1 centers the text on 11/21
        self.group(72, 1);
        self.coord(11, label.x);
        self.coord(21, label.y);
    }

    fn finish(self) -> String {
        self.out
    }
}
