//! Command-line front end
//!
//! Reads one DXF file, runs the pipeline and writes the requested
//! export variants next to the input or into `--out`.

use anyhow::Context;
use clap::Parser;
use laserdxx_core::units::format_yards;
use laserdxx_core::Layer;
use laserdxx_pipeline::{export_file_name, process_dxf_with, ExportKind, ProcessedResult};
use laserdxx_settings::Config;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "laserdxx")]
#[command(version = crate::VERSION)]
#[command(about = "Clean up a laser-cutting DXF and export CUT/BOARDS layers")]
pub struct Cli {
    /// Path to the input DXF file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Configuration file (.toml or .json); the platform default otherwise
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Do not detect the material frame
    #[arg(long)]
    pub no_frame: bool,

    /// Place size labels on marker exports
    #[arg(long)]
    pub labels: bool,

    /// Export variant to write (all, cut, boards); repeatable
    #[arg(long = "export", value_name = "KIND")]
    pub exports: Vec<ExportKind>,

    /// Output directory for exports
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Print the full result as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Log as JSON lines
    #[arg(long)]
    pub json_log: bool,
}

/// Run the command, printing each file written
pub fn run(args: &Cli) -> anyhow::Result<()> {
    let written = execute(args)?;
    for path in written {
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn execute(args: &Cli) -> anyhow::Result<Vec<PathBuf>> {
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load_or_default().context("loading default config")?,
    };
    if args.no_frame {
        config.processing.preserve_frame = false;
    }
    if args.labels {
        config.processing.enable_labeling = true;
    }

    let content = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let result = process_dxf_with(&content, &config.process_options(), &config.pipeline_config())
        .with_context(|| format!("processing {}", args.input.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", summary(&result));
    }

    let kinds = if args.exports.is_empty() {
        config.export.kinds.clone()
    } else {
        args.exports.clone()
    };
    let out_dir = args
        .out
        .clone()
        .or_else(|| config.export.output_directory.clone())
        .unwrap_or_else(|| input_dir(&args.input));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let source_name = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut written = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let path = out_dir.join(export_file_name(&source_name, kind));
        std::fs::write(&path, result.export(kind))
            .with_context(|| format!("writing {}", path.display()))?;
        info!(kind = %kind, path = %path.display(), "exported");
        written.push(path);
    }
    Ok(written)
}

fn input_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Human-readable run summary
pub fn summary(result: &ProcessedResult) -> String {
    let stats = &result.stats;
    let mut out = String::new();
    out.push_str(&format!(
        "contours: {} extracted, {} after healing, {} debris removed\n",
        stats.original_count, stats.healed_count, stats.debris_removed
    ));
    out.push_str(&format!(
        "layers:   {} CUT, {} BOARDS\n",
        result.count_on(Layer::Cut),
        result.count_on(Layer::Boards)
    ));
    if let Some(frame) = result.frame {
        out.push_str(&format!("frame:    {}\n", frame));
    }
    if !result.labels.is_empty() {
        let codes: Vec<&str> = result.labels.iter().map(|l| l.text.as_str()).collect();
        out.push_str(&format!("labels:   {}\n", codes.join(", ")));
    }
    out.push_str(&format!(
        "material: {} wide x {} long\n",
        format_yards(stats.material_width_yards),
        format_yards(stats.material_height_yards)
    ));
    out
}
