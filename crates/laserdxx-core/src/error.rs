//! Error handling for LaserDXX
//!
//! A single error type covers the whole cleanup pipeline. Only
//! unparseable input is fatal; degenerate geometry and heuristic
//! misses are reported through the result instead of through errors.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for LaserDXX
#[derive(Error, Debug)]
pub enum Error {
    /// The input could not be read as a DXF entity stream
    #[error("Malformed DXF input: {0}")]
    MalformedInput(String),

    /// A caller-supplied value cannot produce valid geometry
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

impl Error {
    /// Create a malformed-input error from a parser message
    pub fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedInput(msg.into())
    }

    /// Check if this is a parse failure of the input drawing
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Error::MalformedInput(_))
    }
}

/// Result type alias for LaserDXX operations
pub type Result<T> = std::result::Result<T, Error>;
