//! Tag classification for the converter's dispatch.

/// Void (self-closing) HTML elements
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta",
    "param", "source", "track", "wbr",
];

/// Elements without a Markdown equivalent that are still safe to inline:
/// their tags are written literally but their content is converted normally
pub const INLINE_PASSTHROUGH: &[&str] = &[
    "big", "small", "abbr", "acronym", "cite", "dfn", "kbd", "samp", "var", "bdo", "map",
    "object", "q", "script", "span", "sub", "sup", "button", "input", "label", "select",
];

/// How an element is converted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// `a`
    Link,
    /// `b`, `strong`
    Strong,
    /// `i`, `em`
    Emphasis,
    /// `blockquote`
    Blockquote,
    /// `br`
    LineBreak,
    /// `code`, `tt`
    Code,
    /// `h1` to `h6`
    Heading(u8),
    /// `hr`
    Rule,
    /// `li`
    ListItem,
    /// `ol`
    OrderedList,
    /// `ul`
    UnorderedList,
    /// `p`
    Paragraph,
    /// `pre`
    Pre,
    /// Any other void element, written as a literal start tag
    Void,
    /// Inline passthrough element, written literally without changing mode
    Inline,
    /// Anything else: the element and its subtree are written as literal HTML
    Verbatim,
}

impl Tag {
    /// Classify a lowercase tag name
    pub fn classify(name: &str) -> Self {
        match name {
            "a" => Tag::Link,
            "b" | "strong" => Tag::Strong,
            "i" | "em" => Tag::Emphasis,
            "blockquote" => Tag::Blockquote,
            "br" => Tag::LineBreak,
            "code" | "tt" => Tag::Code,
            "hr" => Tag::Rule,
            "li" => Tag::ListItem,
            "ol" => Tag::OrderedList,
            "ul" => Tag::UnorderedList,
            "p" => Tag::Paragraph,
            "pre" => Tag::Pre,
            _ => {
                if let Some(level) = heading_level(name) {
                    Tag::Heading(level)
                } else if is_void(name) {
                    Tag::Void
                } else if is_inline_passthrough(name) {
                    Tag::Inline
                } else {
                    Tag::Verbatim
                }
            }
        }
    }
}

/// Heading level of `h1`..`h6`
pub fn heading_level(name: &str) -> Option<u8> {
    match name.as_bytes() {
        [b'h', digit @ b'1'..=b'6'] => Some(digit - b'0'),
        _ => None,
    }
}

/// Check if a tag is a void element
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Check if a tag is an inline passthrough element
pub fn is_inline_passthrough(tag: &str) -> bool {
    INLINE_PASSTHROUGH.contains(&tag.to_lowercase().as_str())
}
