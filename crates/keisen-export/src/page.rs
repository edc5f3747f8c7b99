//! reMarkable `.lines` version-5 binary page serializer.
//!
//! Serializes detected segments as pen strokes on a blank tablet page:
//! a 43-byte ASCII header, a layer count, then per stroke a fixed
//! attribute block followed by its points. All integers and floats are
//! little-endian.
//!
//! Horizontal segments become two-point strokes. Degenerate point
//! segments would be invisible as zero-length strokes, so they are
//! widened into a three-point stroke 0.01px to either side, which the
//! device renders as a dot.

use keisen_pipeline::Segment;

/// Version-5 file header, padded with spaces to 43 bytes.
pub const HEADER_V5: &[u8; 43] = b"reMarkable .lines file, version=5          ";

/// Page width in device pixels.
pub const X_MAX: f32 = 1404.0;

/// Page height in device pixels.
pub const Y_MAX: f32 = 1872.0;

/// Brush identifier for the fineliner pen.
const BRUSH_TYPE: i32 = 17;

/// Base brush size for a 0.3mm-ish stroke.
const BRUSH_BASE_SIZE: f32 = 1.0;

/// Half-width of the synthetic stroke drawn for an isolated pixel.
const POINT_NUDGE: f32 = 0.01;

/// A single point within a stroke, with the pen dynamics the device
/// expects per point.
#[derive(Debug, Clone, Copy, PartialEq)]
struct StrokePoint {
    x: f32,
    y: f32,
    speed: f32,
    direction: f32,
    width: f32,
    pressure: f32,
}

impl StrokePoint {
    const fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            speed: 0.1,
            direction: 0.0,
            width: 2.0,
            pressure: 1.0,
        }
    }
}

/// One pen stroke: fixed attributes plus its point list.
#[derive(Debug, Clone, PartialEq)]
struct Stroke {
    points: Vec<StrokePoint>,
}

/// A reMarkable page under construction.
///
/// Collect strokes with [`add_segment`](Self::add_segment) (or build
/// from a whole list with [`from_segments`](Self::from_segments)), then
/// serialize with [`export`](Self::export).
#[derive(Debug, Clone, Default)]
pub struct RmPage {
    strokes: Vec<Stroke>,
}

impl RmPage {
    /// Create an empty page.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strokes: Vec::new(),
        }
    }

    /// Build a page containing one stroke per detected segment.
    #[must_use]
    pub fn from_segments(segments: &[Segment]) -> Self {
        let mut page = Self::new();
        for segment in segments {
            page.add_segment(segment);
        }
        page
    }

    /// Add one segment as a stroke.
    ///
    /// Point segments are widened into a short three-point stroke so the
    /// device renders them as visible dots.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_segment(&mut self, segment: &Segment) {
        let y = segment.start.y as f32;
        let points = if segment.is_point() {
            let x = segment.start.x as f32;
            vec![
                StrokePoint::new(x - POINT_NUDGE, y),
                StrokePoint::new(x, y),
                StrokePoint::new(x + POINT_NUDGE, y),
            ]
        } else {
            vec![
                StrokePoint::new(segment.start.x as f32, y),
                StrokePoint::new(segment.end.x as f32, y),
            ]
        };
        self.strokes.push(Stroke { points });
    }

    /// Number of strokes currently on the page.
    #[must_use]
    pub const fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Serialize the page to `.lines` v5 bytes: header, one layer, then
    /// each stroke with its attribute block and points.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn export(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(HEADER_V5);

        // Single layer holding every stroke.
        push_i32(&mut out, 1);
        push_i32(&mut out, self.strokes.len() as i32);

        for stroke in &self.strokes {
            push_i32(&mut out, BRUSH_TYPE);
            push_i32(&mut out, 0); // color: black
            push_i32(&mut out, 0); // padding
            push_f32(&mut out, BRUSH_BASE_SIZE);
            push_f32(&mut out, 0.0); // unknown line attribute
            push_i32(&mut out, stroke.points.len() as i32);

            for point in &stroke.points {
                push_f32(&mut out, point.x);
                push_f32(&mut out, point.y);
                push_f32(&mut out, point.speed);
                push_f32(&mut out, point.direction);
                push_f32(&mut out, point.width);
                push_f32(&mut out, point.pressure);
            }
        }

        out
    }
}

fn push_i32(out: &mut Vec<u8>, value: i32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn push_f32(out: &mut Vec<u8>, value: f32) {
    out.extend_from_slice(&value.to_le_bytes());
}
