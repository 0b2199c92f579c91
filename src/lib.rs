//! # LaserDXX
//!
//! Cleans up laser-cutting DXF drawings exported by pattern CAD systems:
//! - Heals contours broken into loose segments
//! - Drops collinear vertices and stray debris
//! - Splits contours into CUT and BOARDS by nesting depth
//! - Detects the material frame and reports consumption in yards
//! - Places size labels on graded marker exports
//! - Writes DXF R12 for the cutter
//!
//! ## Architecture
//!
//! 1. **laserdxx-core** - Contour model, geometry, tolerances, errors
//! 2. **laserdxx-pipeline** - The cleanup stages and the R12 writer
//! 3. **laserdxx-settings** - JSON/TOML configuration
//! 4. **laserdxx** - Command-line front end

pub mod cli;

pub use laserdxx_core::{
    Bounds, ContourId, Error, Layer, Point, Polyline, Result, TextEntity, Tolerances,
};
pub use laserdxx_pipeline::{
    export_file_name, generate_r12, process_dxf, process_dxf_with, ExportKind, PipelineConfig,
    ProcessOptions, ProcessStats, ProcessedResult,
};
pub use laserdxx_settings::{Config, SettingsError};

/// Version string with the build date
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, pretty or JSON
/// - RUST_LOG environment variable support, `info` otherwise
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .json();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_line_number(true)
            .pretty();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
