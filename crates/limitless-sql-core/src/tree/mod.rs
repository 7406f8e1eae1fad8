//! Syntax tree produced by the parser.
//!
//! Every construct is a [`Node`] with a closed [`NodeKind`], a byte span, an
//! optional normalized value and ordered children. A successfully parsed tree
//! is well-formed: each child span lies within its parent span and sibling
//! spans do not overlap and appear in document order.

mod kind;
mod node;

use serde::Serialize;

pub use kind::{Category, NodeKind};
pub use node::{Node, Walk};

use crate::lexer::Span;

/// The tree for one source unit. The root is a `script` node spanning the
/// whole text whose children are the statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxTree {
    root: Node,
}

impl SyntaxTree {
    /// Wraps a root node.
    #[must_use]
    pub const fn new(root: Node) -> Self {
        Self { root }
    }

    /// Creates an empty tree for a text of `len` bytes.
    #[must_use]
    pub const fn empty(len: usize) -> Self {
        Self::new(Node::new(NodeKind::Script, Span::new(0, len)))
    }

    /// Returns the root node.
    #[must_use]
    pub const fn root(&self) -> &Node {
        &self.root
    }

    /// Consumes the tree and returns its root.
    #[must_use]
    pub fn into_root(self) -> Node {
        self.root
    }

    /// Returns the top-level statements, including unparsed regions.
    #[must_use]
    pub fn statements(&self) -> &[Node] {
        &self.root.children
    }

    /// Returns true if the tree has no statements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Iterates over all nodes in pre-order with their depth.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        self.root.walk()
    }

    /// Returns true if any unparsed region is present.
    #[must_use]
    pub fn has_unparsed(&self) -> bool {
        self.walk().any(|(n, _)| n.kind == NodeKind::Unparsed)
    }
}
