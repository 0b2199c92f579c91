//! Configuration for LaserDXX
//!
//! Supports JSON and TOML files. Every section falls back to its
//! defaults, so a file only needs the keys it changes.
//!
//! Configuration is organized into sections:
//! - Processing switches (frame, labeling, marker strings)
//! - Pipeline tolerances
//! - Export preferences (output directory, variants)

use crate::error::{SettingsError, SettingsResult};
use laserdxx_core::constants::LABEL_MARKERS;
use laserdxx_core::Tolerances;
use laserdxx_pipeline::{ExportKind, PipelineConfig, ProcessOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_DIR: &str = "laserdxx";
const CONFIG_FILE: &str = "config.toml";

/// Processing switches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingSettings {
    /// Detect the material frame
    pub preserve_frame: bool,
    /// Place size labels on marker exports
    pub enable_labeling: bool,
    /// Input substrings that identify a marker export
    pub label_markers: Vec<String>,
}

impl Default for ProcessingSettings {
    fn default() -> Self {
        Self {
            preserve_frame: true,
            enable_labeling: false,
            label_markers: LABEL_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Export preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Where exports go; next to the input when unset
    pub output_directory: Option<PathBuf>,
    /// Variants written per input
    pub kinds: Vec<ExportKind>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_directory: None,
            kinds: vec![ExportKind::All],
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub processing: ProcessingSettings,
    pub tolerances: Tolerances,
    pub export: ExportSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::SaveError(format!("{}: {}", parent.display(), e)))?;
        }
        std::fs::write(path, content)?;
        debug!(path = %path.display(), "saved configuration");
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.tolerances
            .validate()
            .map_err(|e| SettingsError::invalid("tolerances", e.to_string()))?;

        if self.processing.enable_labeling
            && self.processing.label_markers.iter().all(|m| m.trim().is_empty())
        {
            return Err(SettingsError::invalid(
                "processing.label_markers",
                "labeling needs at least one marker",
            ));
        }

        if self.export.kinds.is_empty() {
            return Err(SettingsError::invalid(
                "export.kinds",
                "at least one export variant is required",
            ));
        }

        Ok(())
    }

    /// Platform config file location
    pub fn default_path() -> SettingsResult<PathBuf> {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| SettingsError::ConfigDirectory("no config or home directory".into()))?;
        path.push(APP_DIR);
        path.push(CONFIG_FILE);
        Ok(path)
    }

    /// Load the platform config file, or defaults when there is none
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            debug!(path = %path.display(), "no configuration file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn process_options(&self) -> ProcessOptions {
        ProcessOptions {
            preserve_frame: self.processing.preserve_frame,
            enable_labeling: self.processing.enable_labeling,
        }
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            tolerances: self.tolerances.clone(),
            label_markers: self.processing.label_markers.clone(),
        }
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            _ => Err(SettingsError::LoadError(format!(
                "{}: config file must be .json or .toml",
                path.display()
            ))),
        }
    }
}
