//! SVG overlay serializer.
//!
//! Converts a segment list into an SVG string with one `<line>` element
//! per segment, using the [`svg`] crate for document construction and
//! XML escaping. The viewBox is the source image's pixel space, so the
//! overlay aligns 1:1 when stacked on the screenshot.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::Text;
use svg::node::element::{Description, Line, Title};

use keisen_pipeline::{Dimensions, Segment};

/// Stroke color for detected segments.
const STROKE_COLOR: &str = "#d90707";

/// Metadata to embed in the SVG document.
///
/// Both fields are optional. When present, a `<title>` and/or `<desc>`
/// element is emitted immediately after the opening `<svg>` tag. Text
/// values are XML-escaped automatically by the `svg` crate.
#[derive(Debug, Clone, Default)]
pub struct SvgMetadata<'a> {
    /// Document title, emitted as `<title>`.
    ///
    /// Typically the source screenshot filename.
    pub title: Option<&'a str>,

    /// Document description, emitted as `<desc>`.
    ///
    /// Typically the pipeline parameters that produced the overlay.
    pub description: Option<&'a str>,
}

/// Serialize segments into an SVG overlay string.
///
/// Each segment becomes a `<line>` in image pixel coordinates. Round
/// line caps make degenerate point segments (zero-length lines) render
/// as dots instead of disappearing.
///
/// # Examples
///
/// ```
/// use keisen_pipeline::{Dimensions, Segment};
/// use keisen_export::svg::{SvgMetadata, to_svg};
///
/// let segments = vec![Segment::new(5, 2, 30)];
/// let dims = Dimensions { width: 64, height: 48 };
/// let svg = to_svg(&segments, dims, &SvgMetadata::default());
/// assert!(svg.contains("<line"));
/// assert!(svg.contains("viewBox=\"0 0 64 48\""));
/// ```
#[must_use]
pub fn to_svg(segments: &[Segment], dimensions: Dimensions, metadata: &SvgMetadata<'_>) -> String {
    let (w, h) = (dimensions.width, dimensions.height);
    let mut doc = Document::new()
        .set("width", w)
        .set("height", h)
        .set("viewBox", (0, 0, w, h));

    if let Some(title) = metadata.title {
        doc = doc.add(Title::new(title));
    }
    if let Some(description) = metadata.description {
        doc = doc.add(Description::new().add(Text::new(description)));
    }

    for segment in segments {
        let line = Line::new()
            .set("x1", segment.start.x)
            .set("y1", segment.start.y)
            .set("x2", segment.end.x)
            .set("y2", segment.end.y)
            .set("stroke", STROKE_COLOR)
            .set("stroke-width", 1)
            .set("stroke-linecap", "round");
        doc = doc.add(line);
    }

    doc.to_string()
}
