//! Export variants
//!
//! The cutter runs internal boards and outer cuts as separate jobs on
//! some machines, so a processed drawing can be written whole or split
//! by layer.

use crate::serialize::generate_r12;
use laserdxx_core::{Layer, Polyline, TextEntity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Base name used when the source file has none
const FALLBACK_NAME: &str = "LASERDXX";

/// Which part of a processed drawing to write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    /// Every polyline and label
    #[default]
    All,
    /// CUT polylines, no labels
    CutOnly,
    /// BOARDS polylines and the labels
    BoardsOnly,
}

impl ExportKind {
    pub const ALL: [ExportKind; 3] = [Self::All, Self::CutOnly, Self::BoardsOnly];

    /// File name suffix before the extension
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::All => "_FULL",
            Self::CutOnly => "_CUT_ONLY",
            Self::BoardsOnly => "_INTERNAL_ONLY",
        }
    }

    fn includes(&self, layer: Layer) -> bool {
        match self {
            Self::All => true,
            Self::CutOnly => layer == Layer::Cut,
            Self::BoardsOnly => layer == Layer::Boards,
        }
    }

    /// Serialize the part of `polylines` and `labels` this variant covers
    pub fn render(&self, polylines: &[Polyline], labels: &[TextEntity]) -> String {
        let selected: Vec<Polyline> = polylines
            .iter()
            .filter(|p| self.includes(p.layer.unwrap_or(Layer::Cut)))
            .cloned()
            .collect();
        let labels: &[TextEntity] = match self {
            Self::CutOnly => &[],
            Self::All | Self::BoardsOnly => labels,
        };
        generate_r12(&selected, labels)
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::All => "all",
            Self::CutOnly => "cut",
            Self::BoardsOnly => "boards",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ExportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "full" => Ok(Self::All),
            "cut" | "cut_only" => Ok(Self::CutOnly),
            "boards" | "boards_only" | "internal" => Ok(Self::BoardsOnly),
            _ => Err(format!("Unknown export kind: {}", s)),
        }
    }
}

/// Output file name for an export of `source_name`
///
/// A trailing `.dxf` is stripped in any case; an empty base falls back
/// to `LASERDXX`.
pub fn export_file_name(source_name: &str, kind: ExportKind) -> String {
    let trimmed = source_name.trim();
    let split = trimmed.len().saturating_sub(4);
    let base = match trimmed.get(split..) {
        Some(ext) if ext.eq_ignore_ascii_case(".dxf") => &trimmed[..split],
        _ => trimmed,
    };
    let base = if base.is_empty() { FALLBACK_NAME } else { base };
    format!("{}{}.dxf", base, kind.suffix())
}
