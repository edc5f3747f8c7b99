//! Directory-watch event interface and per-file orchestration.
//!
//! Watch-event *production* (inotify, polling, or any other mechanism)
//! is outside this repository; whatever produces them hands each new
//! file to [`handle_event`] as a [`FileEvent`]. This module owns the
//! caller-side responsibilities the core pipeline excludes: filename
//! eligibility and the load-then-process sequence.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use keisen_pipeline::{PipelineConfig, ProcessResult};

use crate::IoError;
use crate::loader::load_grayscale;

/// Filename prefix identifying device screenshots.
pub const SCREENSHOT_PREFIX: &str = "Screenshot";

/// A new file appearing in a watched directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEvent {
    /// Directory the file appeared in.
    pub directory: PathBuf,
    /// Bare filename within `directory`.
    pub filename: String,
}

impl FileEvent {
    /// Full path to the file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }
}

/// Check whether `filename` carries the expected prefix.
#[must_use]
pub fn is_eligible(filename: &str, prefix: &str) -> bool {
    filename.starts_with(prefix)
}

/// Process one watch event through the pipeline.
///
/// Convenience wrapper over [`handle_new_file`] with the default
/// screenshot prefix.
///
/// # Errors
///
/// Same as [`handle_new_file`].
pub fn handle_event(event: &FileEvent, config: &PipelineConfig) -> Result<ProcessResult, IoError> {
    handle_new_file(&event.directory, &event.filename, config)
}

/// Load an eligible file and run the line-extraction pipeline on it.
///
/// Ineligible filenames fail with [`IoError::NotEligible`] before any
/// file access, so callers can cheaply distinguish "skipped" from
/// "processed but found nothing".
///
/// # Errors
///
/// Returns [`IoError::NotEligible`] for filenames lacking
/// [`SCREENSHOT_PREFIX`], [`IoError::Io`]/[`IoError::Image`] for
/// loading failures, and [`IoError::Pipeline`] if the pipeline itself
/// fails.
pub fn handle_new_file(
    directory: &Path,
    filename: &str,
    config: &PipelineConfig,
) -> Result<ProcessResult, IoError> {
    if !is_eligible(filename, SCREENSHOT_PREFIX) {
        debug!(filename, "ignoring file without screenshot prefix");
        return Err(IoError::NotEligible {
            filename: filename.to_string(),
        });
    }

    let path = directory.join(filename);
    let gray = load_grayscale(&path)?;
    let result = keisen_pipeline::process(&gray, config)?;

    info!(
        filename,
        segments = result.count(),
        width = result.dimensions.width,
        height = result.dimensions.height,
        "processed screenshot"
    );
    Ok(result)
}
