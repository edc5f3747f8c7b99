//! Horizontal segment extraction: run-length scan over the boolean mask.
//!
//! Each row is scanned independently, left to right, by a two-state
//! machine: *idle* (no run open) and *in-run* (a start column recorded).
//! A maximal contiguous run of foreground pixels becomes one
//! [`Segment`]; a run of length one becomes a degenerate point segment.
//!
//! The scan emits segments in increasing-row, then increasing-start-
//! column order by construction, so no sorting pass is needed.

use crate::mask::BitMask;
use crate::types::Segment;

/// Extract horizontal segments from a boolean mask.
///
/// Runs are closed in three ways:
/// - a foreground pixel followed by a background pixel closes at the
///   previous column;
/// - a run still open at the last column closes there;
/// - a run opening *on* the last column closes immediately as a single
///   pixel.
///
/// Rows with no foreground pixels contribute nothing. The output list
/// grows as needed; no upper bound on run count is assumed.
#[must_use = "returns the detected segments"]
pub fn extract_horizontal(mask: &BitMask) -> Vec<Segment> {
    let (width, height) = (mask.width(), mask.height());
    let mut segments = Vec::new();

    for row in 0..height {
        let mut run_start: Option<u32> = None;

        for x in 0..width {
            let is_pixel = mask.get(x, row);

            match run_start {
                Some(from) => {
                    if is_pixel {
                        if x + 1 == width {
                            segments.push(Segment::new(row, from, x));
                            run_start = None;
                        }
                    } else {
                        // Run ended at the previous column.
                        segments.push(Segment::new(row, from, x - 1));
                        run_start = None;
                    }
                }
                None => {
                    if is_pixel {
                        if x + 1 == width {
                            // Single pixel on the last column.
                            segments.push(Segment::point(row, x));
                        } else {
                            run_start = Some(x);
                        }
                    }
                }
            }
        }

        debug_assert!(run_start.is_none(), "run left open past row {row}");
    }

    segments
}
