//! Shared types for the keisen line-extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::edge::EdgeKernelKind;

/// Re-export `GrayImage` so downstream crates can reference the
/// intensity buffers without depending on `image` directly.
pub use image::GrayImage;

/// A 2D point in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from left edge).
    pub x: f64,
    /// Vertical position (pixels from top edge).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A horizontal line segment detected in one image row.
///
/// Both endpoints share the same `y` (the row), and `start.x <= end.x`.
/// A segment whose endpoints coincide represents an isolated foreground
/// pixel rather than a true line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Left endpoint.
    pub start: Point,
    /// Right endpoint.
    pub end: Point,
}

impl Segment {
    /// Create a segment spanning columns `from..=to` in `row`.
    ///
    /// Callers must pass `from <= to`; the extractor's left-to-right scan
    /// guarantees this by construction.
    #[must_use]
    pub fn new(row: u32, from: u32, to: u32) -> Self {
        debug_assert!(from <= to, "segment columns out of order: {from} > {to}");
        Self {
            start: Point::new(f64::from(from), f64::from(row)),
            end: Point::new(f64::from(to), f64::from(row)),
        }
    }

    /// Create a degenerate segment for an isolated pixel at (`col`, `row`).
    #[must_use]
    pub fn point(row: u32, col: u32) -> Self {
        Self::new(row, col, col)
    }

    /// Returns `true` if both endpoints coincide (an isolated pixel).
    #[must_use]
    pub fn is_point(&self) -> bool {
        self.start == self.end
    }

    /// The row this segment lies in.
    #[must_use]
    pub const fn row(&self) -> f64 {
        self.start.y
    }

    /// Length in pixels covered, counting both endpoints.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixel_count(&self) -> u32 {
        (self.end.x - self.start.x) as u32 + 1
    }

    /// The segment as an `(x1, y1, x2, y2)` tuple, the wire form consumed
    /// by overlay renderers.
    #[must_use]
    pub const fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.start.x, self.start.y, self.end.x, self.end.y)
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Configuration for the line-extraction pipeline.
///
/// The defaults reproduce the production screenshot path: the strong K20
/// Laplacian after smoothing, with every strictly-positive response kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Which Laplacian kernel the edge-enhancement pass applies.
    pub edge_kernel: EdgeKernelKind,

    /// Binarization threshold: a filtered pixel becomes foreground when
    /// its intensity is strictly greater than this value.
    pub threshold: u8,
}

impl PipelineConfig {
    /// Default edge-enhancement kernel.
    pub const DEFAULT_EDGE_KERNEL: EdgeKernelKind = EdgeKernelKind::K20;

    /// Default binarization threshold.
    pub const DEFAULT_THRESHOLD: u8 = 0;
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            edge_kernel: Self::DEFAULT_EDGE_KERNEL,
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}

/// Result of running the line-extraction pipeline.
///
/// The segment list is the only value that outlives the call; all
/// intermediate buffers are dropped before it is returned. Ownership
/// passes to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResult {
    /// Detected segments, ordered by increasing row, then increasing
    /// start column within a row.
    pub segments: Vec<Segment>,

    /// Dimensions of the source image in pixels.
    ///
    /// Serializers use this to set coordinate spaces (e.g. SVG `viewBox`).
    pub dimensions: Dimensions,
}

impl ProcessResult {
    /// Number of detected segments.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.segments.len()
    }
}

/// Errors that can occur during pipeline processing.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// An intermediate buffer or the boolean mask could not be allocated.
    ///
    /// Always fatal to the current invocation: buffers already acquired
    /// are released on unwind and no partial result is produced.
    #[error("failed to allocate pipeline buffer: {0}")]
    Allocation(#[from] std::collections::TryReserveError),
}
