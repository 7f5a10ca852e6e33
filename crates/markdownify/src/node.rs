//! Element tree consumed by the converter.
//!
//! The tree follows the text/tail layout: an element's `text` is the
//! character data between its start tag and its first child, and each
//! child's `tail` is the character data between that child's end tag and the
//! next sibling. Any HTML parser can be adapted to produce it; see
//! [`crate::html`] for the scraper adapter.

use crate::tags;

/// An HTML element with its text, tail and children
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Tag name, lowercase
    pub tag: String,

    /// Attributes in source order
    pub attributes: Vec<(String, String)>,

    /// Text before the first child element
    pub text: Option<String>,

    /// Text after this element's end tag, before the next sibling
    pub tail: Option<String>,

    /// Child elements
    pub children: Vec<Element>,

    /// Whether the element was matched by the selector that produced the tree
    pub selection_root: bool,
}

impl Element {
    /// Create a new element
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_lowercase(),
            attributes: Vec::new(),
            text: None,
            tail: None,
            children: Vec::new(),
            selection_root: false,
        }
    }

    /// Add an attribute
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    /// Set the leading text
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    /// Set the tail text
    pub fn with_tail(mut self, tail: &str) -> Self {
        self.tail = Some(tail.to_string());
        self
    }

    /// Append a child element
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Mark the element as a selection root
    pub fn selected(mut self) -> Self {
        self.selection_root = true;
        self
    }

    /// Append a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attr_name, _)| attr_name.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Check if an attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Number of child elements
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// The first child element, if any
    pub fn first_child(&self) -> Option<&Element> {
        self.children.first()
    }

    /// Check if this is a void element
    pub fn is_void(&self) -> bool {
        tags::is_void(&self.tag)
    }

    /// The literal start tag, e.g. `<a href="x">`.
    ///
    /// Attribute values are written as-is, without entity escaping.
    pub fn start_tag(&self) -> String {
        let mut tag = format!("<{}", self.tag);
        for (name, value) in &self.attributes {
            tag.push(' ');
            tag.push_str(name);
            tag.push_str("=\"");
            tag.push_str(value);
            tag.push('"');
        }
        tag.push('>');
        tag
    }

    /// The literal end tag, empty for void elements
    pub fn end_tag(&self) -> String {
        if self.is_void() {
            String::new()
        } else {
            format!("</{}>", self.tag)
        }
    }
}

impl Drop for Element {
    // Flatten the subtree so dropping a deeply nested tree does not recurse
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut child) = pending.pop() {
            pending.append(&mut child.children);
        }
    }
}

/// A reference to an element with its parent.
/// This allows navigation up one level without storing parent pointers.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    /// The element itself
    pub node: &'a Element,
    parent: Option<&'a Element>,
}

impl<'a> NodeRef<'a> {
    /// Create a new NodeRef without parent context
    pub fn new(node: &'a Element) -> Self {
        Self { node, parent: None }
    }

    /// Create a new NodeRef with its parent
    pub fn with_parent(node: &'a Element, parent: &'a Element) -> Self {
        Self {
            node,
            parent: Some(parent),
        }
    }

    /// The parent element, `None` for a walk root
    pub fn parent(&self) -> Option<&'a Element> {
        self.parent
    }

    /// Get the parent tag name if known
    pub fn parent_tag(&self) -> Option<&'a str> {
        self.parent.map(|p| p.tag.as_str())
    }

    /// Check if the parent has the given tag
    pub fn parent_is(&self, tag: &str) -> bool {
        self.parent_tag() == Some(tag)
    }

    /// Check if this element is its parent's first child
    pub fn is_first_child(&self) -> bool {
        self.parent
            .and_then(Element::first_child)
            .is_some_and(|first| std::ptr::eq(first, self.node))
    }

    /// Check if this element is its parent's only child
    pub fn is_only_child(&self) -> bool {
        self.parent.is_some_and(|p| p.child_count() == 1)
    }

    /// Check if both refer to the same element in the tree
    pub fn same_node(&self, other: &Element) -> bool {
        std::ptr::eq(self.node, other)
    }

    pub fn tag(&self) -> &'a str {
        &self.node.tag
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.node.attr(name)
    }

    pub fn text(&self) -> Option<&'a str> {
        self.node.text.as_deref()
    }

    pub fn tail(&self) -> Option<&'a str> {
        self.node.tail.as_deref()
    }
}
