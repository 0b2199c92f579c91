//! Contour data model
//!
//! Every stage of the pipeline consumes and produces [`Polyline`]s.
//! A polyline's `id` is assigned once by the extractor and never
//! changes afterwards; the viewer uses it to toggle the layer of a
//! contour without rerunning the pipeline.

use crate::geometry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A point in drawing units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Stable contour identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContourId(pub u64);

impl fmt::Display for ContourId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Output layer of a classified contour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// Outer cutting boundary
    #[serde(rename = "CUT")]
    Cut,
    /// Internal geometry: holes, boards, frame
    #[serde(rename = "BOARDS")]
    Boards,
}

impl Layer {
    /// Layer name as written to DXF
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cut => "CUT",
            Self::Boards => "BOARDS",
        }
    }

    /// ACI color index used on export
    pub fn color_index(&self) -> i16 {
        match self {
            Self::Boards => 1,
            Self::Cut => 3,
        }
    }

    /// The other layer
    pub fn toggled(&self) -> Self {
        match self {
            Self::Cut => Self::Boards,
            Self::Boards => Self::Cut,
        }
    }

    /// Even nesting depth cuts, odd depth is internal
    pub fn for_depth(depth: usize) -> Self {
        if depth % 2 == 0 {
            Self::Cut
        } else {
            Self::Boards
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Layer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CUT" => Ok(Self::Cut),
            "BOARDS" => Ok(Self::Boards),
            _ => Err(format!("Unknown layer: {}", s)),
        }
    }
}

/// Axis-aligned bounding box
///
/// The default is the zero rectangle, which is what degenerate
/// inputs report.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Bounds of a point set, `None` when the set is empty
    pub fn enclosing<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::new(first.x, first.y, first.x, first.y);
        for p in iter {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center_x(&self) -> f64 {
        (self.min_x + self.max_x) / 2.0
    }

    /// Whether `other` lies within these bounds (edges inclusive)
    pub fn contains(&self, other: &Bounds) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }
}

/// A contour: an ordered chain of points, open or closed
///
/// When `closed` is set the last point is an exact copy of the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Polyline {
    pub id: ContourId,
    pub points: Vec<Point>,
    pub closed: bool,
    pub layer: Option<Layer>,
    /// Layer name in the source drawing
    pub original_layer: String,
    /// Absolute polygon area, closed chains only
    pub area: Option<f64>,
    pub bbox: Bounds,
}

impl Polyline {
    /// Build a contour and compute its cached area and bounds
    pub fn new(
        id: ContourId,
        points: Vec<Point>,
        closed: bool,
        original_layer: impl Into<String>,
    ) -> Self {
        let mut polyline = Self {
            id,
            points,
            closed,
            layer: None,
            original_layer: original_layer.into(),
            area: None,
            bbox: Bounds::default(),
        };
        if closed {
            polyline.ensure_closed(0.0);
        }
        polyline.refresh_geometry();
        polyline
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = Some(layer);
        self
    }

    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Recompute the cached area and bounds after the points changed
    pub fn refresh_geometry(&mut self) {
        self.bbox = Bounds::enclosing(&self.points).unwrap_or_default();
        self.area = if self.closed {
            Some(geometry::polygon_area(&self.points).abs())
        } else {
            None
        };
    }

    /// Force the closure invariant on a chain marked closed
    ///
    /// An end point within `epsilon` of the start is replaced by a copy
    /// of the start; otherwise the start is appended. Returns `true`
    /// when the points had to change.
    pub fn ensure_closed(&mut self, epsilon: f64) -> bool {
        if !self.closed || self.points.len() < 2 {
            return false;
        }
        let first = self.points[0];
        let last_index = self.points.len() - 1;
        let last = self.points[last_index];
        if first == last {
            return false;
        }
        if self.points.len() > 2 && first.distance_to(&last) <= epsilon {
            self.points[last_index] = first;
        } else {
            self.points.push(first);
        }
        true
    }

    /// Whether the closure invariant holds
    pub fn is_properly_closed(&self) -> bool {
        !self.closed || self.points.first() == self.points.last()
    }

    /// Path length including the closing edge of a closed chain
    pub fn perimeter(&self) -> f64 {
        let mut length = geometry::path_length(&self.points);
        if self.closed {
            if let (Some(first), Some(last)) = (self.points.first(), self.points.last()) {
                length += last.distance_to(first);
            }
        }
        length
    }
}

/// A placed size-code label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextEntity {
    pub x: f64,
    pub y: f64,
    /// Recognized size code, upper-cased
    pub text: String,
    pub layer: String,
    pub height: f64,
}

impl TextEntity {
    pub fn new(x: f64, y: f64, text: impl Into<String>, layer: impl Into<String>, height: f64) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            layer: layer.into(),
            height,
        }
    }
}
