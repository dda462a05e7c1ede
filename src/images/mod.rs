//! Embedded screenshot handling
//!
//! The study log embeds its screenshots as base64 data-URI reference
//! definitions at the bottom of the file:
//!
//! ```text
//! [image7]: <data:image/png;base64,iVBORw0KGgo...>
//! ```
//!
//! This module owns the patterns for those blocks: [`extract`] decodes them
//! into real image files, [`strip_image_payloads`] removes them so the
//! segmenter never sees raw base64, and [`zoom`] is a small resize utility
//! for cleaning up individual screenshots.

pub mod extract;
pub mod zoom;

pub use extract::{extract_images, ExtractSummary};
pub use zoom::zoom_image;

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A full payload block with capture groups for decoding. Base64 data
    /// may contain embedded newlines, which are removed before decoding.
    static ref IMAGE_PAYLOAD: Regex = Regex::new(
        r"\[(image\d+)\]: <data:image/(?P<fmt>png|jpeg);base64,(?P<data>[A-Za-z0-9+/=\n\r]+)>"
    )
    .unwrap();

    /// The same block shape, loosened for removal (any payload content up
    /// to the closing `>`), plus trailing whitespace.
    static ref IMAGE_PAYLOAD_BLOCK: Regex =
        Regex::new(r"\[image\d+\]: <data:image/[^>]+>\s*").unwrap();
}

/// Remove all embedded base64 payload blocks from a markdown document.
///
/// Run before segmentation so the line scan only ever sees prose, markers,
/// and inline image references.
pub fn strip_image_payloads(text: &str) -> Cow<'_, str> {
    IMAGE_PAYLOAD_BLOCK.replace_all(text, "")
}
