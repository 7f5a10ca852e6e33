//! Text normalization.
//!
//! Raw text and tail strings from the HTML tree go through [`normalize`]
//! before they reach the output buffer. The normalizer is an ordered pipeline
//! of plain rewrite functions, each usable on its own:
//!
//! 1. [`collapse_whitespace`]
//! 2. [`break_sentences`]
//! 3. [`escape_list_markers`]

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const NEWLINE: char = '\n';

/// Marker prepended once per blockquote nesting level
pub const QUOTE_MARKER: &str = "> ";

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Two or more non-terminators and a period, or `?!`, followed by whitespace
static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^.?!]{2,}\.|\?!)\s+").expect("sentence pattern is valid"));

/// Digits and `. ` after whitespace, which Markdown reads as an ordered list marker
static FAKE_LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\s+)([0-9]+)\. ").expect("list marker pattern is valid"));

/// Indentation for the given level.
///
/// Always empty: continuation lines are prefixed with quote markers only.
pub fn indent(_level: usize) -> String {
    String::new()
}

/// Blockquote prefix for the given nesting level
pub fn quote(level: usize) -> String {
    QUOTE_MARKER.repeat(level)
}

/// Normalize a text fragment for Markdown output.
///
/// `None` and whitespace-only input give an empty string.
pub fn normalize(text: Option<&str>, indent_level: usize, quote_level: usize) -> String {
    let Some(text) = text else {
        return String::new();
    };
    if text.trim().is_empty() {
        return String::new();
    }

    let text = collapse_whitespace(text);
    let text = break_sentences(&text, indent_level, quote_level);
    // `*` and `_` are left alone, see `escape_emphasis`
    escape_list_markers(&text)
}

/// Strip leading and trailing newlines, then collapse every whitespace run
/// to a single space
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE
        .replace_all(text.trim_matches(NEWLINE), " ")
        .into_owned()
}

/// Start a new line after every sentence, continuing the current
/// indentation and blockquote nesting
pub fn break_sentences(text: &str, indent_level: usize, quote_level: usize) -> String {
    let prefix = indent(indent_level) + &quote(quote_level);
    SENTENCE_END
        .replace_all(text, |caps: &Captures| {
            format!("{}{}{}", &caps[1], NEWLINE, prefix)
        })
        .into_owned()
}

/// Escape the dot in `12. ` so the number is not read as a list marker
pub fn escape_list_markers(text: &str) -> String {
    FAKE_LIST_MARKER
        .replace_all(text, |caps: &Captures| {
            format!("{}{}\\. ", &caps[1], &caps[2])
        })
        .into_owned()
}

/// Backslash-escape `*` and `_`.
///
/// [`normalize`] does not apply this: emphasis characters in text reach the
/// output unescaped, matching the converter's established output.
pub fn escape_emphasis(text: &str) -> String {
    text.replace('*', "\\*").replace('_', "\\_")
}
