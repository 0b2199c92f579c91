//! LaserDXX Settings Crate
//!
//! Loads and saves the processing defaults, tolerances and export
//! preferences used by the command-line front end.

pub mod config;
pub mod error;

pub use config::{Config, ExportSettings, ProcessingSettings};
pub use error::{SettingsError, SettingsResult};
