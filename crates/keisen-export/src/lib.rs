//! keisen-export: Pure format serializers (sans-IO)
//!
//! Converts detected segment lists into downstream formats: the
//! reMarkable `.lines` version-5 binary page and an SVG overlay for
//! visual inspection. Both serializers return in-memory bytes/strings;
//! writing files is the caller's job.

pub mod page;
pub mod svg;

pub use page::RmPage;
pub use svg::{SvgMetadata, to_svg};
