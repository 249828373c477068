//! Converts rich-text editor HTML into a list of styled paragraphs ready for a
//! Word document writer.
//!
//! ```no_run
//! let doc = html_docx_model::html_to_document("<h2>Title</h2><p>Hello <b>world</b></p>")?;
//! for p in &doc {
//!     println!("{:?} {}", p.heading, p.text());
//! }
//! # Ok::<(), html_docx_model::ConvertError>(())
//! ```

pub mod blocks;
pub mod color;
pub mod dom;
mod error;
pub mod extract;
pub mod model;
mod options;
pub mod runs;
pub mod style;
pub mod units;

use std::io::Read;

pub use crate::color::{normalize_color, quantize_to_highlight};
pub use crate::error::{ConvertError, Result};
pub use crate::model::{Document, HeadingLevel, Paragraph, TextRun};
pub use crate::options::{ConvertOptions, DEFAULT_CLASS_PREFIX};
pub use crate::runs::build_runs;
pub use crate::style::{Alignment, Highlight, StyleDelta, StyleSet};
pub use crate::units::to_half_points;

/// Converts `html` with the default options.
pub fn html_to_document(html: &str) -> Result<Document> {
    html_to_document_with(html, &ConvertOptions::default())
}

/// Converts `html`, matching editor classes against `opts.class_prefix`.
pub fn html_to_document_with(html: &str, opts: &ConvertOptions) -> Result<Document> {
    if blocks::is_empty_markup(html) {
        log::debug!("empty input, using the blank document");
        return Ok(Document::fallback());
    }
    let nodes = dom::parse_fragment(html);
    Ok(blocks::assemble(&nodes, opts))
}

/// Reads markup from `reader` (lossily decoded as UTF-8) and converts it.
pub fn read_document<R: Read>(reader: &mut R, opts: &ConvertOptions) -> Result<Document> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let html = String::from_utf8_lossy(&bytes);
    html_to_document_with(&html, opts)
}
