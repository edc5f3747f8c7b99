//! keisen-io: Native I/O collaborators around the pure pipeline.
//!
//! Everything the core deliberately excludes lives here: decoding image
//! files into grayscale buffers, filename eligibility filtering, and the
//! directory-watch event interface with its [`handle_new_file`]
//! orchestration entry point. The watch *producer* (inotify or
//! equivalent) stays outside this repository; consumers hand completed
//! [`FileEvent`]s to [`handle_event`].

pub mod loader;
pub mod watch;

pub use loader::load_grayscale;
pub use watch::{FileEvent, SCREENSHOT_PREFIX, handle_event, handle_new_file, is_eligible};

use keisen_pipeline::PipelineError;

/// Errors from the I/O layer and the pipeline behind it.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// The filename does not carry the expected screenshot prefix.
    #[error("file {filename:?} does not match the expected prefix")]
    NotEligible {
        /// The rejected filename.
        filename: String,
    },

    /// The file could not be read.
    #[error("failed to read image file: {0}")]
    Io(#[from] std::io::Error),

    /// The file contents could not be decoded as an image.
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    /// The pipeline failed after loading succeeded.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}
