//! keisen-pipeline: Pure horizontal line extraction (sans-IO).
//!
//! Reduces a grayscale screenshot to a list of horizontal line segments
//! through: Gaussian smoothing -> Laplacian edge enhancement ->
//! binarization -> per-row run-length extraction.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! pixel buffers and returns structured data. File loading, filename
//! eligibility, and the watch loop live in `keisen-io`.

pub mod blur;
pub mod convolve;
pub mod diagnostics;
pub mod edge;
pub mod mask;
pub mod segments;
pub mod types;

use std::time::Instant;

pub use convolve::Kernel;
pub use edge::EdgeKernelKind;
pub use mask::BitMask;
pub use types::{
    Dimensions, GrayImage, PipelineConfig, PipelineError, Point, ProcessResult, Segment,
};

use diagnostics::{
    PipelineDiagnostics, PipelineSummary, StageDiagnostics, StageMetrics, count_positive_pixels,
};

/// Run the full line-extraction pipeline over one grayscale image.
///
/// The caller keeps ownership of `image`; it is never mutated. Each
/// intermediate buffer is dropped as soon as the next stage has consumed
/// it, and only the segment list survives the call.
///
/// Images too small to have interior pixels (width or height <= 2) are
/// not an error: the convolution passes copy through and extraction runs
/// on the raw-thresholded mask.
///
/// # Pipeline steps
///
/// 1. Gaussian smoothing (noise reduction)
/// 2. Laplacian edge enhancement (into a distinct buffer)
/// 3. Binarization (strictly-greater-than-threshold rule)
/// 4. Per-row horizontal segment extraction
///
/// # Errors
///
/// Returns [`PipelineError::Allocation`] if the boolean mask cannot be
/// materialized. Zero detected segments is `Ok` with an empty list, not
/// an error.
pub fn process(
    image: &GrayImage,
    config: &PipelineConfig,
) -> Result<ProcessResult, PipelineError> {
    let dimensions = Dimensions {
        width: image.width(),
        height: image.height(),
    };

    // Smoothing output lives only long enough to feed edge enhancement.
    let edges = {
        let smoothed = blur::smooth(image);
        edge::enhance_edges(&smoothed, config.edge_kernel)
    };

    let mask = BitMask::from_image(&edges, config.threshold)?;
    drop(edges);

    let segments = segments::extract_horizontal(&mask);

    Ok(ProcessResult {
        segments,
        dimensions,
    })
}

/// Like [`process`], additionally collecting per-stage timing and counts.
///
/// # Errors
///
/// Returns [`PipelineError::Allocation`] under the same conditions as
/// [`process`].
pub fn process_with_diagnostics(
    image: &GrayImage,
    config: &PipelineConfig,
) -> Result<(ProcessResult, PipelineDiagnostics), PipelineError> {
    let dimensions = Dimensions {
        width: image.width(),
        height: image.height(),
    };
    let pixel_count = u64::from(dimensions.width) * u64::from(dimensions.height);
    let total_start = Instant::now();

    let stage_start = Instant::now();
    let smoothed = blur::smooth(image);
    let smooth_diag = StageDiagnostics {
        duration: stage_start.elapsed(),
        metrics: StageMetrics::Smooth {
            width: dimensions.width,
            height: dimensions.height,
        },
    };

    let stage_start = Instant::now();
    let edges = edge::enhance_edges(&smoothed, config.edge_kernel);
    drop(smoothed);
    let edge_diag = StageDiagnostics {
        duration: stage_start.elapsed(),
        metrics: StageMetrics::EdgeEnhance {
            kernel: format!("{:?}", config.edge_kernel),
            positive_pixel_count: count_positive_pixels(&edges),
        },
    };

    let stage_start = Instant::now();
    let mask = BitMask::from_image(&edges, config.threshold)?;
    drop(edges);
    let binarize_diag = StageDiagnostics {
        duration: stage_start.elapsed(),
        metrics: StageMetrics::Binarize {
            threshold: config.threshold,
            foreground_count: mask.foreground_count() as u64,
            total_pixel_count: pixel_count,
        },
    };

    let stage_start = Instant::now();
    let segments = segments::extract_horizontal(&mask);
    let rows_with_segments = {
        let mut rows = 0usize;
        let mut last_row = f64::NEG_INFINITY;
        for segment in &segments {
            if (segment.row() - last_row).abs() > f64::EPSILON {
                rows += 1;
                last_row = segment.row();
            }
        }
        rows
    };
    let extract_diag = StageDiagnostics {
        duration: stage_start.elapsed(),
        metrics: StageMetrics::Extract {
            segment_count: segments.len(),
            point_count: segments.iter().filter(|s| s.is_point()).count(),
            rows_with_segments,
        },
    };

    let diagnostics = PipelineDiagnostics {
        smooth: smooth_diag,
        edge_enhance: edge_diag,
        binarize: binarize_diag,
        extract: extract_diag,
        total_duration: total_start.elapsed(),
        summary: PipelineSummary {
            image_width: dimensions.width,
            image_height: dimensions.height,
            pixel_count,
            segment_count: segments.len(),
        },
    };

    Ok((
        ProcessResult {
            segments,
            dimensions,
        },
        diagnostics,
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    /// 12x9 black image with a single 200-intensity row at y = 4.
    fn bright_stroke_image() -> GrayImage {
        GrayImage::from_fn(12, 9, |_, y| {
            if y == 4 { image::Luma([200]) } else { image::Luma([0]) }
        })
    }

    #[test]
    fn all_black_image_yields_empty_result() {
        let img = GrayImage::new(20, 20);
        let result = process(&img, &PipelineConfig::default()).unwrap();
        assert!(result.segments.is_empty());
        assert_eq!(result.count(), 0);
        assert_eq!(
            result.dimensions,
            Dimensions {
                width: 20,
                height: 20
            },
        );
    }

    #[test]
    fn bright_stroke_detected_on_flanking_rows() {
        // Smoothing spreads the stroke to rows 3..=5 (values 50/100/50);
        // the K20 Laplacian then responds positively on rows 2 and 6 and
        // cancels to zero on rows 3..=5. The stroke's own border pixels
        // (columns 0 and 11 of row 4) are copied through both passes and
        // survive as isolated points.
        let img = bright_stroke_image();
        let result = process(&img, &PipelineConfig::default()).unwrap();

        let spans: Vec<(f64, f64, f64)> = result
            .segments
            .iter()
            .map(|s| (s.row(), s.start.x, s.end.x))
            .collect();
        assert_eq!(
            spans,
            vec![
                (2.0, 1.0, 10.0),
                (4.0, 0.0, 0.0),
                (4.0, 11.0, 11.0),
                (6.0, 1.0, 10.0),
            ],
        );
        assert!(result.segments[1].is_point());
        assert!(result.segments[2].is_point());
    }

    #[test]
    fn uniform_bright_image_keeps_only_border_ring() {
        // The Laplacian nulls the interior; the copied-through border
        // ring stays bright and binarizes to foreground: full-width runs
        // on the first and last rows, edge-column points in between.
        let img = GrayImage::from_fn(6, 5, |_, _| image::Luma([128]));
        let result = process(&img, &PipelineConfig::default()).unwrap();

        let spans: Vec<(f64, f64, f64)> = result
            .segments
            .iter()
            .map(|s| (s.row(), s.start.x, s.end.x))
            .collect();
        assert_eq!(
            spans,
            vec![
                (0.0, 0.0, 5.0),
                (1.0, 0.0, 0.0),
                (1.0, 5.0, 5.0),
                (2.0, 0.0, 0.0),
                (2.0, 5.0, 5.0),
                (3.0, 0.0, 0.0),
                (3.0, 5.0, 5.0),
                (4.0, 0.0, 5.0),
            ],
        );
    }

    #[test]
    fn degenerate_width_passes_raw_pixels_through() {
        // Width 2 leaves no interior: both passes copy through, so the
        // mask reflects the raw image and each bright row becomes a run.
        let img = GrayImage::from_fn(2, 3, |_, y| {
            if y == 1 { image::Luma([9]) } else { image::Luma([0]) }
        });
        let result = process(&img, &PipelineConfig::default()).unwrap();
        let spans: Vec<(f64, f64, f64)> = result
            .segments
            .iter()
            .map(|s| (s.row(), s.start.x, s.end.x))
            .collect();
        assert_eq!(spans, vec![(1.0, 0.0, 1.0)]);
    }

    #[test]
    fn input_image_is_not_mutated() {
        let img = bright_stroke_image();
        let before = img.clone();
        let _ = process(&img, &PipelineConfig::default()).unwrap();
        assert_eq!(img, before);
    }

    #[test]
    fn segment_ordering_is_row_major() {
        let img = bright_stroke_image();
        let result = process(&img, &PipelineConfig::default()).unwrap();
        for pair in result.segments.windows(2) {
            let row_ordered = pair[0].row() < pair[1].row()
                || ((pair[0].row() - pair[1].row()).abs() < f64::EPSILON
                    && pair[0].start.x < pair[1].start.x);
            assert!(
                row_ordered,
                "segments out of order: {:?} then {:?}",
                pair[0], pair[1],
            );
        }
    }

    #[test]
    fn higher_threshold_reduces_foreground() {
        let img = bright_stroke_image();
        let default_result = process(&img, &PipelineConfig::default()).unwrap();
        let strict = PipelineConfig {
            threshold: 254,
            ..PipelineConfig::default()
        };
        let strict_result = process(&img, &strict).unwrap();
        assert!(strict_result.count() <= default_result.count());
    }

    #[test]
    fn diagnostics_match_result() {
        let img = bright_stroke_image();
        let (result, diag) = process_with_diagnostics(&img, &PipelineConfig::default()).unwrap();

        assert_eq!(diag.summary.segment_count, result.count());
        assert_eq!(diag.summary.image_width, 12);
        assert_eq!(diag.summary.image_height, 9);
        assert_eq!(diag.summary.pixel_count, 12 * 9);

        match &diag.extract.metrics {
            diagnostics::StageMetrics::Extract {
                segment_count,
                point_count,
                rows_with_segments,
            } => {
                assert_eq!(*segment_count, 4);
                assert_eq!(*point_count, 2);
                assert_eq!(*rows_with_segments, 3);
            }
            other => panic!("unexpected extract metrics: {other:?}"),
        }

        let report = diag.report();
        assert!(report.contains("12x9"));
        assert!(report.contains("Segments: 4"));
    }

    #[test]
    fn diagnostics_agree_with_plain_process() {
        let img = bright_stroke_image();
        let plain = process(&img, &PipelineConfig::default()).unwrap();
        let (with_diag, _) = process_with_diagnostics(&img, &PipelineConfig::default()).unwrap();
        assert_eq!(plain, with_diag);
    }
}
