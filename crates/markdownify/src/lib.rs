//! # markdownify
//!
//! Convert HTML element trees to Markdown.
//!
//! ## Design
//!
//! Conversion is one depth-first walk over an [`Element`] tree per selected
//! root. Every start and end tag appends Markdown to a single output buffer:
//!
//! - Recognized tags (headings, paragraphs, lists, blockquotes, code,
//!   emphasis, links, rules, line breaks) become Markdown syntax
//! - Text is normalized: whitespace collapsed, one sentence per line
//! - Unknown elements and everything inside them are kept as literal HTML
//! - Link URLs can be moved to reference definitions after the content
//!
//! ## Example (Element-based)
//!
//! ```rust
//! use markdownify::{Element, MarkdownifyService};
//!
//! let body = Element::new("body").with_child(
//!     Element::new("p")
//!         .with_text("Hello ")
//!         .with_child(Element::new("em").with_text("World")),
//! );
//!
//! let mut service = MarkdownifyService::new();
//! assert_eq!(service.convert_element(&body), "Hello *World*");
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! use markdownify::{convert, Options};
//!
//! let markdown = convert("<h1>Hello World</h1>", "body", Options::default()).unwrap();
//! assert_eq!(markdown, vec!["# Hello World"]);
//! ```

use std::path::Path;

pub mod context;
mod decode;
#[cfg(feature = "html")]
pub mod html;
pub mod node;
mod service;
pub mod tags;
pub mod walk;

pub use decode::decode_html;
#[cfg(feature = "html")]
pub use html::parse_html;
pub use markdownify_core::{LinkStyle, Options};
pub use node::{Element, NodeRef};
pub use service::MarkdownifyService;
pub use tags::Tag;
pub use walk::{walk, Event};

/// Error type for markdownify operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid selector {selector:?}: {message}")]
    InvalidSelector { selector: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Convert the elements of `html` matching `selector` to Markdown, one
/// string per match
#[cfg(feature = "html")]
pub fn convert(html: &str, selector: &str, options: Options) -> Result<Vec<String>> {
    MarkdownifyService::with_options(options).convert_document(html, selector)
}

/// Convert the elements of `html` matching `selector` to Markdown with link
/// URLs moved to reference definitions at the end of each result
///
/// # Example
///
/// ```rust
/// use markdownify::convert_with_links;
///
/// let markdown = convert_with_links(r#"<a href="http://x">text</a>"#, "body").unwrap();
/// assert_eq!(markdown, vec!["[text][]\n\n[text]: http://x"]);
/// ```
#[cfg(feature = "html")]
pub fn convert_with_links(html: &str, selector: &str) -> Result<Vec<String>> {
    convert(html, selector, Options::move_links())
}

/// Read an HTML file, decoding it with [`decode_html`]
pub fn read_file(path: impl AsRef<Path>) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(decode_html(&bytes).into_owned())
}
