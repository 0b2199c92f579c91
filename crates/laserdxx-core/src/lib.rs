//! # LaserDXX Core
//!
//! Core types and utilities shared by the LaserDXX crates.
//! Provides the contour data model, plane geometry helpers,
//! the tolerance knobs of the cleanup pipeline and the error type.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod tolerances;
pub mod types;
pub mod units;

pub use error::{Error, Result};
pub use tolerances::Tolerances;
pub use types::{Bounds, ContourId, Layer, Point, Polyline, TextEntity};
pub use units::{to_yards, INCHES_PER_YARD};
