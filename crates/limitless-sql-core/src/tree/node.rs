//! Syntax tree nodes.

use serde::Serialize;

use super::NodeKind;
use crate::lexer::Span;

/// A node of the syntax tree.
///
/// Nodes own their children; there are no parent links. Code that needs the
/// ancestors of a node keeps them on a stack while walking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// The construct kind.
    pub kind: NodeKind,
    /// Byte range in the source text.
    pub span: Span,
    /// Normalized value: a name, literal text, option keyword or operator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Children in document order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// Creates a new leaf node.
    #[must_use]
    pub const fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            span,
            value: None,
            children: Vec::new(),
        }
    }

    /// Sets the node's value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the node's children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Appends a child.
    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Returns the value as a string slice.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Returns the first child of the given kind.
    #[must_use]
    pub fn child(&self, kind: NodeKind) -> Option<&Node> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// Returns all children of the given kind.
    pub fn children_of(&self, kind: NodeKind) -> impl Iterator<Item = &Node> + '_ {
        self.children.iter().filter(move |c| c.kind == kind)
    }

    /// Returns true if any direct child has the given kind.
    #[must_use]
    pub fn has_child(&self, kind: NodeKind) -> bool {
        self.children.iter().any(|c| c.kind == kind)
    }

    /// Returns an iterator over this node and its descendants in pre-order,
    /// paired with their depth relative to this node.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(self, 0)],
        }
    }

    /// Returns the number of nodes in this subtree.
    #[must_use]
    pub fn size(&self) -> usize {
        self.walk().count()
    }
}

/// Pre-order iterator over a subtree. See [`Node::walk`].
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<(&'a Node, usize)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (&'a Node, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|c| (c, depth + 1)));
        Some((node, depth))
    }
}
