//! Pipeline diagnostics: timing and counts for each stage.
//!
//! Collected by [`process_with_diagnostics`](crate::process_with_diagnostics)
//! for parameter experimentation and the CLI report. Only durations and
//! counts are recorded; intermediate buffers are never retained.
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Diagnostics collected from a single pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineDiagnostics {
    /// Stage 1: Gaussian smoothing.
    pub smooth: StageDiagnostics,
    /// Stage 2: Laplacian edge enhancement.
    pub edge_enhance: StageDiagnostics,
    /// Stage 3: binarization.
    pub binarize: StageDiagnostics,
    /// Stage 4: segment extraction.
    pub extract: StageDiagnostics,
    /// Total wall-clock duration of the entire pipeline (seconds).
    #[serde(with = "duration_serde")]
    pub total_duration: Duration,
    /// Summary counts across the run.
    pub summary: PipelineSummary,
}

/// Diagnostics for a single pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageDiagnostics {
    /// Wall-clock duration of this stage (seconds).
    #[serde(with = "duration_serde")]
    pub duration: Duration,
    /// Stage-specific metrics.
    pub metrics: StageMetrics,
}

/// Stage-specific metrics that vary by pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StageMetrics {
    /// Gaussian smoothing metrics.
    Smooth {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },
    /// Laplacian edge-enhancement metrics.
    EdgeEnhance {
        /// Which kernel preset was applied.
        kernel: String,
        /// Number of strictly-positive pixels in the output.
        positive_pixel_count: u64,
    },
    /// Binarization metrics.
    Binarize {
        /// Threshold applied (exclusive).
        threshold: u8,
        /// Foreground pixels in the mask.
        foreground_count: u64,
        /// Total pixel count for computing density.
        total_pixel_count: u64,
    },
    /// Segment extraction metrics.
    Extract {
        /// Segments emitted.
        segment_count: usize,
        /// How many of those are degenerate single-pixel points.
        point_count: usize,
        /// Rows that produced at least one segment.
        rows_with_segments: usize,
    },
}

/// High-level summary counts for the entire run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Source image width in pixels.
    pub image_width: u32,
    /// Source image height in pixels.
    pub image_height: u32,
    /// Total pixel count.
    pub pixel_count: u64,
    /// Segments in the final output.
    pub segment_count: usize,
}

impl PipelineDiagnostics {
    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Pipeline Diagnostics Report\n{}", "=".repeat(60)));
        lines.push(format!(
            "Image: {}x{} ({} pixels)",
            self.summary.image_width, self.summary.image_height, self.summary.pixel_count,
        ));
        lines.push(format!(
            "Total duration: {:.3}ms",
            duration_ms(self.total_duration),
        ));
        lines.push(String::new());

        lines.push(format!(
            "{:<16} {:>10} {:>10}  {}",
            "Stage", "Duration", "% Total", "Details"
        ));
        lines.push("-".repeat(72));

        let total_ms = duration_ms(self.total_duration);
        let stages: [(&str, &StageDiagnostics); 4] = [
            ("Smooth", &self.smooth),
            ("Edge Enhance", &self.edge_enhance),
            ("Binarize", &self.binarize),
            ("Extract", &self.extract),
        ];

        for (name, diag) in &stages {
            let ms = duration_ms(diag.duration);
            let pct = if total_ms > 0.0 {
                ms / total_ms * 100.0
            } else {
                0.0
            };
            let details = format_metrics(&diag.metrics);
            lines.push(format!("{name:<16} {ms:>8.3}ms {pct:>9.1}%  {details}"));
        }

        lines.push(String::new());
        lines.push(format!("Segments: {}", self.summary.segment_count));

        lines.join("\n")
    }
}

/// Convert a `Duration` to milliseconds as `f64`.
fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Format stage metrics into a compact detail string.
fn format_metrics(metrics: &StageMetrics) -> String {
    match metrics {
        StageMetrics::Smooth { width, height } => format!("{width}x{height}"),
        StageMetrics::EdgeEnhance {
            kernel,
            positive_pixel_count,
        } => {
            format!("{kernel} positive={positive_pixel_count}")
        }
        StageMetrics::Binarize {
            threshold,
            foreground_count,
            total_pixel_count,
        } => {
            #[allow(clippy::cast_precision_loss)]
            let density = if *total_pixel_count > 0 {
                *foreground_count as f64 / *total_pixel_count as f64 * 100.0
            } else {
                0.0
            };
            format!("thr>{threshold} fg={foreground_count} ({density:.1}%)")
        }
        StageMetrics::Extract {
            segment_count,
            point_count,
            rows_with_segments,
        } => {
            format!("{segment_count} segments ({point_count} points) in {rows_with_segments} rows")
        }
    }
}

/// Count strictly-positive pixels in a grayscale image.
pub(crate) fn count_positive_pixels(image: &image::GrayImage) -> u64 {
    image.pixels().map(|p| u64::from(u8::from(p.0[0] > 0))).sum()
}
