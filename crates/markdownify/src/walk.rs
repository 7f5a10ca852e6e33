//! Depth-first start/end traversal of an element tree.

use crate::node::{Element, NodeRef};

/// A traversal event
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    /// The walk reached the element's start tag
    Enter(NodeRef<'a>),
    /// The element and all its descendants have been visited
    Exit(NodeRef<'a>),
}

impl<'a> Event<'a> {
    /// The element the event refers to
    pub fn node(&self) -> NodeRef<'a> {
        match self {
            Event::Enter(node) | Event::Exit(node) => *node,
        }
    }
}

struct Frame<'a> {
    node: NodeRef<'a>,
    next_child: usize,
}

/// Iterator over the [`Event`]s of a tree, in document order
pub struct Walk<'a> {
    root: Option<NodeRef<'a>>,
    stack: Vec<Frame<'a>>,
}

/// Walk `root` and all its descendants
pub fn walk(root: &Element) -> Walk<'_> {
    Walk {
        root: Some(NodeRef::new(root)),
        stack: Vec::new(),
    }
}

impl<'a> Walk<'a> {
    /// Current nesting depth (number of entered, not yet exited elements)
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn enter(&mut self, node: NodeRef<'a>) -> Event<'a> {
        self.stack.push(Frame {
            node,
            next_child: 0,
        });
        Event::Enter(node)
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            return Some(self.enter(root));
        }

        let frame = self.stack.last_mut()?;
        let parent = frame.node.node;
        if let Some(child) = parent.children.get(frame.next_child) {
            frame.next_child += 1;
            return Some(self.enter(NodeRef::with_parent(child, parent)));
        }

        self.stack.pop().map(|frame| Event::Exit(frame.node))
    }
}
