//! markdownify-core - text normalization and newline primitives
//!
//! This crate holds the pieces of the HTML to Markdown conversion that know
//! nothing about HTML: the text normalizer that turns raw text nodes into
//! Markdown-safe prose, the trailing-newline normalizer that controls spacing
//! between block constructs, and the conversion options.
//!
//! # Architecture
//!
//! ```text
//!                     ┌──────────────────┐
//! text / tail ──────▶ │ text::normalize  │ ──▶ Markdown-safe fragment
//!                     └──────────────────┘
//!                     ┌──────────────────┐
//! output buffer ────▶ │ newlines::ensure │ ──▶ buffer with N trailing '\n'
//!                     └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use markdownify_core::{ensure_trailing_newlines, normalize};
//!
//! let mut markdown = String::from("# Title");
//! ensure_trailing_newlines(&mut markdown, 2, true);
//! markdown.push_str(&normalize(Some("First sentence. Second one"), 0, 0));
//!
//! assert_eq!(markdown, "# Title\n\nFirst sentence.\nSecond one");
//! ```

mod newlines;
mod options;
pub mod text;

pub use newlines::{
    ensure_trailing_newlines, require_exact_newlines, require_newlines, trailing_newlines,
};
pub use options::{LinkStyle, Options};
pub use text::{indent, normalize, quote};
