//! # LaserDXX Pipeline
//!
//! Turns a noisy, fragmented laser-cutting DXF into a clean set of
//! classified contours and writes them back out as DXF R12.
//!
//! ## Stages
//!
//! - **Extract**: LINE/LWPOLYLINE/POLYLINE/CIRCLE/ARC to point chains, TEXT/MTEXT to size codes
//! - **Heal**: joins open chains whose endpoints touch
//! - **Simplify**: drops collinear vertices
//! - **Debris**: drops chains with a tiny perimeter
//! - **Frame**: finds the material frame rectangle
//! - **Classify**: CUT/BOARDS by containment depth
//! - **Labels**: places one size label per zone
//! - **Serialize**: DXF R12 entity stream
//!
//! [`process_dxf`] runs every stage in order.

pub mod arc_expander;
pub mod classify;
pub mod debris;
pub mod export;
pub mod extract;
pub mod frame;
pub mod heal;
pub mod labels;
pub mod pipeline;
pub mod serialize;
pub mod simplify;
pub mod size_codes;

pub use arc_expander::ArcExpander;
pub use export::{export_file_name, ExportKind};
pub use extract::{extract, parse_drawing, Extraction};
pub use pipeline::{
    process_dxf, process_dxf_with, PipelineConfig, ProcessOptions, ProcessStats, ProcessedResult,
};
pub use serialize::generate_r12;
pub use size_codes::SizeCodeMatcher;
