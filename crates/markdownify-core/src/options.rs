//! Configuration options for Markdown conversion

/// Link style options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStyle {
    /// Use inline links [text](url)
    #[default]
    Inlined,
    /// Use collapsed reference links [text][] with the URLs listed after the
    /// converted content
    Referenced,
}

/// Options for Markdown conversion
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Link style
    pub link_style: LinkStyle,
}

impl Options {
    /// Options that move link URLs to the bottom of the output
    pub fn move_links() -> Self {
        Self {
            link_style: LinkStyle::Referenced,
        }
    }

    /// Whether link URLs are deferred to reference definitions
    pub fn defers_links(&self) -> bool {
        self.link_style == LinkStyle::Referenced
    }
}
