//! Pipeline driver
//!
//! Runs every stage in order on one DXF string. Nothing here touches
//! the filesystem; callers hand in the file content and decide what to
//! do with the result.

use crate::classify::classify;
use crate::debris::remove_debris;
use crate::export::ExportKind;
use crate::extract::extract_str;
use crate::frame::detect_frame;
use crate::heal::heal;
use crate::labels::{is_labeling_source, place_labels};
use crate::simplify::simplify;
use laserdxx_core::constants::LABEL_MARKERS;
use laserdxx_core::units::to_yards;
use laserdxx_core::{Bounds, ContourId, Layer, Polyline, Result, TextEntity, Tolerances};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Per-call switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessOptions {
    /// Detect the material frame and keep it out of the pieces
    pub preserve_frame: bool,
    /// Place size labels for marker exports
    pub enable_labeling: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            preserve_frame: true,
            enable_labeling: false,
        }
    }
}

/// Tunables that rarely change between calls
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub tolerances: Tolerances,
    /// Substrings that mark an input as a labeled marker export
    pub label_markers: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tolerances: Tolerances::default(),
            label_markers: LABEL_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Counts and material consumption of one run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStats {
    /// Chains produced by extraction
    pub original_count: usize,
    /// Chains left after healing
    pub healed_count: usize,
    pub debris_removed: usize,
    /// Extent of everything except the frame
    pub bounds: Bounds,
    pub material_height_yards: f64,
    pub material_width_yards: f64,
}

/// Everything the pipeline produces
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedResult {
    pub polylines: Vec<Polyline>,
    pub labels: Vec<TextEntity>,
    pub stats: ProcessStats,
    /// Id of the detected material frame
    pub frame: Option<ContourId>,
}

impl ProcessedResult {
    /// Flip a contour between CUT and BOARDS
    ///
    /// Returns the new layer, or `None` for an unknown id.
    pub fn toggle_layer(&mut self, id: ContourId) -> Option<Layer> {
        let polyline = self.polylines.iter_mut().find(|p| p.id == id)?;
        let layer = polyline.layer.unwrap_or(Layer::Cut).toggled();
        polyline.layer = Some(layer);
        debug!(id = %id, layer = %layer, "toggled contour layer");
        Some(layer)
    }

    pub fn count_on(&self, layer: Layer) -> usize {
        self.polylines
            .iter()
            .filter(|p| p.layer.unwrap_or(Layer::Cut) == layer)
            .count()
    }

    /// Serialize one export variant as DXF R12
    pub fn export(&self, kind: ExportKind) -> String {
        kind.render(&self.polylines, &self.labels)
    }
}

/// Run the pipeline with default tolerances and markers
pub fn process_dxf(input: &str, options: &ProcessOptions) -> Result<ProcessedResult> {
    process_dxf_with(input, options, &PipelineConfig::default())
}

/// Run the pipeline
///
/// Fails only on invalid tolerances or unparseable input. Heuristic
/// misses (no frame, no zones) leave the result without that feature.
pub fn process_dxf_with(
    input: &str,
    options: &ProcessOptions,
    config: &PipelineConfig,
) -> Result<ProcessedResult> {
    let tol = &config.tolerances;
    tol.validate()?;

    let labeling =
        options.enable_labeling && is_labeling_source(input, &config.label_markers);
    let extraction = extract_str(input, tol, labeling)?;
    let original_count = extraction.polylines.len();

    let healed = reclose("heal", heal(extraction.polylines, tol.heal_tolerance));
    let healed_count = healed.len();
    let simplified = reclose("simplify", simplify(healed, tol.collinear_epsilon));
    let (kept, debris_removed) = remove_debris(simplified, tol.min_perimeter);

    let frame = if options.preserve_frame {
        detect_frame(&kept, tol)
    } else {
        None
    };
    let polylines = classify(kept, frame, tol.max_nesting_depth);
    let labels = if labeling {
        place_labels(&polylines, &extraction.texts, frame, tol)
    } else {
        Vec::new()
    };

    let bounds = polylines
        .iter()
        .filter(|p| Some(p.id) != frame)
        .map(|p| p.bbox)
        .reduce(|a, b| a.union(&b))
        .unwrap_or_default();
    let stats = ProcessStats {
        original_count,
        healed_count,
        debris_removed,
        bounds,
        material_height_yards: to_yards(bounds.height()),
        material_width_yards: to_yards(bounds.width()),
    };

    info!(
        original = stats.original_count,
        healed = stats.healed_count,
        debris = stats.debris_removed,
        frame = frame.is_some(),
        labels = labels.len(),
        width_yd = stats.material_width_yards,
        height_yd = stats.material_height_yards,
        "processed drawing"
    );

    Ok(ProcessedResult {
        polylines,
        labels,
        stats,
        frame,
    })
}

/// Restore the closure invariant on chains a stage left inconsistent
fn reclose(stage: &str, mut polylines: Vec<Polyline>) -> Vec<Polyline> {
    for polyline in polylines.iter_mut() {
        if polyline.ensure_closed(0.0) {
            warn!(stage, id = %polyline.id, "re-closed inconsistent chain");
            polyline.refresh_geometry();
        }
    }
    polylines
}
