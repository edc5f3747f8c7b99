//! keisen: CLI for the screenshot line-extraction pipeline.
//!
//! Runs the pipeline on the given image files with configurable
//! parameters, printing a per-file summary and optionally the detected
//! segments, a per-stage diagnostics report, and serialized `.rm` /
//! `.svg` output. Useful for:
//!
//! - Inspecting what a given screenshot detects before wiring a watcher
//! - Comparing Laplacian kernel strengths (`k4` / `k8` / `k20`)
//! - Tuning the binarization threshold
//! - Measuring per-stage durations
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin keisen -- [OPTIONS] <IMAGE_PATH>...
//! ```
//!
//! Log verbosity follows `RUST_LOG` (e.g. `RUST_LOG=keisen_io=debug`).

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use keisen_export::page::RmPage;
use keisen_export::svg::{SvgMetadata, to_svg};
use keisen_pipeline::{EdgeKernelKind, PipelineConfig};

/// Extract horizontal line segments from screenshot files.
#[derive(Parser)]
#[command(name = "keisen", version)]
struct Cli {
    /// Paths to input images (PNG, JPEG, BMP, WebP).
    #[arg(required = true)]
    image_paths: Vec<PathBuf>,

    /// Laplacian kernel strength for edge enhancement.
    #[arg(long, value_enum, default_value_t = Kernel::K20)]
    kernel: Kernel,

    /// Binarization threshold (foreground = intensity strictly above).
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_THRESHOLD)]
    threshold: u8,

    /// Only accept files whose name starts with the screenshot prefix,
    /// as the watch loop would.
    #[arg(long)]
    screenshots_only: bool,

    /// Print every detected segment as `(x1, y1) -> (x2, y2)`.
    #[arg(long)]
    print_segments: bool,

    /// Print the segment list as JSON.
    #[arg(long)]
    json: bool,

    /// Print the per-stage diagnostics report.
    #[arg(long)]
    report: bool,

    /// Write the detected segments as a reMarkable `.lines` v5 page.
    #[arg(long, value_name = "PATH")]
    rm_out: Option<PathBuf>,

    /// Write the detected segments as an SVG overlay.
    #[arg(long, value_name = "PATH")]
    svg_out: Option<PathBuf>,
}

/// CLI surface for [`EdgeKernelKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kernel {
    /// 4-connected Laplacian (center -4).
    K4,
    /// 8-connected Laplacian (center -8).
    K8,
    /// Amplified Laplacian (center -20), the production default.
    K20,
}

impl From<Kernel> for EdgeKernelKind {
    fn from(kernel: Kernel) -> Self {
        match kernel {
            Kernel::K4 => Self::K4,
            Kernel::K8 => Self::K8,
            Kernel::K20 => Self::K20,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = PipelineConfig {
        edge_kernel: cli.kernel.into(),
        threshold: cli.threshold,
    };

    let mut failed = false;
    for path in &cli.image_paths {
        if let Err(e) = run_one(path, &config, &cli) {
            eprintln!("{}: {e}", path.display());
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Process a single file and emit the requested outputs.
fn run_one(
    path: &std::path::Path,
    config: &PipelineConfig,
    cli: &Cli,
) -> Result<(), Box<dyn std::error::Error>> {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if cli.screenshots_only && !keisen_io::is_eligible(&filename, keisen_io::SCREENSHOT_PREFIX) {
        return Err(Box::new(keisen_io::IoError::NotEligible { filename }));
    }

    let gray = keisen_io::load_grayscale(path)?;
    let (result, diagnostics) = keisen_pipeline::process_with_diagnostics(&gray, config)?;

    println!(
        "{}: {} segments in {}x{}",
        path.display(),
        result.count(),
        result.dimensions.width,
        result.dimensions.height,
    );

    if cli.print_segments {
        for segment in &result.segments {
            let (x1, y1, x2, y2) = segment.as_tuple();
            println!("  ({x1}, {y1}) -> ({x2}, {y2})");
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    if cli.report {
        println!("{}", diagnostics.report());
    }

    if let Some(rm_path) = &cli.rm_out {
        let bytes = RmPage::from_segments(&result.segments).export();
        std::fs::write(rm_path, &bytes)?;
        println!("wrote {} ({} bytes)", rm_path.display(), bytes.len());
    }

    if let Some(svg_path) = &cli.svg_out {
        let description = format!(
            "kernel={:?} threshold={}",
            config.edge_kernel, config.threshold,
        );
        let meta = SvgMetadata {
            title: Some(&filename),
            description: Some(&description),
        };
        let svg = to_svg(&result.segments, result.dimensions, &meta);
        std::fs::write(svg_path, &svg)?;
        println!("wrote {} ({} bytes)", svg_path.display(), svg.len());
    }

    Ok(())
}
