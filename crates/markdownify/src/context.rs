//! Formatting context carried through one tree walk.

use markdownify_core::{indent, quote};

use crate::node::Element;

/// Kind of an open list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

/// One open list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFrame {
    pub kind: ListKind,
    /// Number of the next item, used by ordered lists only
    pub next_index: usize,
}

impl ListFrame {
    fn new(kind: ListKind) -> Self {
        Self {
            kind,
            next_index: 1,
        }
    }
}

/// Nesting state of a walk: indentation, blockquotes, open lists and
/// verbatim passthrough.
///
/// Every `enter_*`/`push_*` is paired with its `exit_*`/`pop_*` on the
/// element's exit event, so the levels return to their previous values once
/// the element is done.
#[derive(Debug, Default)]
pub struct FormattingContext<'a> {
    indent_level: usize,
    quote_level: usize,
    lists: Vec<ListFrame>,
    /// Per open blockquote: whether it raised the indent level
    quote_indents: Vec<bool>,
    verbatim_root: Option<&'a Element>,
}

impl<'a> FormattingContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    pub fn quote_level(&self) -> usize {
        self.quote_level
    }

    /// Open lists, innermost last
    pub fn lists(&self) -> &[ListFrame] {
        &self.lists
    }

    /// Line prefix for the current nesting
    pub fn prefix(&self) -> String {
        indent(self.indent_level) + &quote(self.quote_level)
    }

    /// Open a blockquote, raising the indent level too when `indents` is set
    pub fn enter_blockquote(&mut self, indents: bool) {
        if indents {
            self.indent_level += 1;
        }
        self.quote_indents.push(indents);
        self.quote_level += 1;
    }

    /// Close the innermost blockquote
    pub fn exit_blockquote(&mut self) {
        if self.quote_indents.pop().unwrap_or(false) {
            self.indent_level = self.indent_level.saturating_sub(1);
        }
        self.quote_level = self.quote_level.saturating_sub(1);
    }

    pub fn enter_pre(&mut self) {
        self.indent_level += 1;
    }

    pub fn exit_pre(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn push_list(&mut self, kind: ListKind) {
        self.lists.push(ListFrame::new(kind));
    }

    pub fn pop_list(&mut self) -> Option<ListFrame> {
        self.lists.pop()
    }

    /// Whether an item outside of any list needs an implicit list first
    pub fn needs_implicit_list(&self) -> bool {
        self.lists.is_empty()
    }

    /// Marker for the next item of the innermost list: `N. ` for ordered
    /// lists, advancing the counter, and `+ ` for unordered ones.
    ///
    /// An item with no open list starts an implicit unordered list, which
    /// stays open for the rest of the walk.
    pub fn next_marker(&mut self) -> String {
        if self.lists.is_empty() {
            self.push_list(ListKind::Unordered);
        }
        match self.lists.last_mut() {
            Some(ListFrame {
                kind: ListKind::Ordered,
                next_index,
            }) => {
                let marker = format!("{next_index}. ");
                *next_index += 1;
                marker
            }
            _ => "+ ".to_string(),
        }
    }

    /// Start verbatim passthrough at `root`
    pub fn enter_verbatim(&mut self, root: &'a Element) {
        self.verbatim_root = Some(root);
    }

    pub fn is_verbatim(&self) -> bool {
        self.verbatim_root.is_some()
    }

    /// Leave verbatim passthrough if `node` is the element it started at.
    /// Returns whether it did.
    pub fn leave_verbatim(&mut self, node: &Element) -> bool {
        match self.verbatim_root {
            Some(root) if std::ptr::eq(root, node) => {
                self.verbatim_root = None;
                true
            }
            _ => false,
        }
    }
}
