//! Structural checks on syntax trees and findings.

use limitless_sql_core::{Node, SyntaxTree};

use crate::error::TreeError;
use crate::finding::Finding;

/// Checks that every child lies within its parent and that siblings are in
/// document order without overlapping.
///
/// # Errors
///
/// Returns the first violation found in pre-order.
pub fn check_tree(tree: &SyntaxTree) -> Result<(), TreeError> {
    tree.walk().try_for_each(|(node, _)| check_children(node))
}

fn check_children(node: &Node) -> Result<(), TreeError> {
    for child in &node.children {
        if !node.span.contains(child.span) {
            return Err(TreeError::ChildOutsideParent {
                parent: node.kind,
                parent_span: node.span,
                child: child.kind,
                child_span: child.span,
            });
        }
    }
    for pair in node.children.windows(2) {
        let (first, second) = (&pair[0], &pair[1]);
        if second.span.start < first.span.end {
            return Err(TreeError::SiblingOrder {
                first: first.kind,
                first_span: first.span,
                second: second.kind,
                second_span: second.span,
            });
        }
    }
    Ok(())
}

/// Checks that every finding lies within the unit's root span.
///
/// # Errors
///
/// Returns the first finding outside the root span.
pub fn check_findings(tree: &SyntaxTree, findings: &[Finding]) -> Result<(), TreeError> {
    let root = tree.root().span;
    match findings.iter().find(|f| !root.contains(f.span)) {
        Some(finding) => Err(TreeError::FindingOutsideRoot {
            rule_id: finding.rule_id.clone(),
            span: finding.span,
            root,
        }),
        None => Ok(()),
    }
}
