#![allow(dead_code)]

use limitless_sql_core::{Node, NodeKind, SyntaxError, SyntaxTree, parse};

pub fn parse_tree(sql: &str) -> SyntaxTree {
    let result = parse(sql);
    assert!(
        result.is_ok(),
        "Failed to parse: {sql}\nErrors: {:?}",
        result.errors()
    );
    assert_well_formed(result.tree());
    result.into_parts().0
}

pub fn parse_statement(sql: &str) -> Node {
    parse_tree(sql)
        .into_root()
        .children
        .into_iter()
        .next()
        .unwrap_or_else(|| panic!("No statement in: {sql}"))
}

pub fn parse_err(sql: &str) -> (SyntaxTree, Vec<SyntaxError>) {
    let result = parse(sql);
    assert!(!result.is_ok(), "Expected parse error for: {sql}");
    assert_well_formed(result.tree());
    result.into_parts()
}

/// Values of every node of `kind` below `node`, in document order.
pub fn values(node: &Node, kind: NodeKind) -> Vec<String> {
    node.walk()
        .filter(|(n, _)| n.kind == kind)
        .filter_map(|(n, _)| n.value.clone())
        .collect()
}

pub fn count(node: &Node, kind: NodeKind) -> usize {
    node.walk().filter(|(n, _)| n.kind == kind).count()
}

/// Asserts that children lie within their parent and that siblings appear
/// in document order without overlapping.
pub fn assert_well_formed(tree: &SyntaxTree) {
    check_node(tree.root());
}

fn check_node(node: &Node) {
    assert!(node.span.start <= node.span.end, "inverted span in {node:?}");
    let mut previous_end = node.span.start;
    for child in &node.children {
        assert!(
            node.span.contains(child.span),
            "{} {:?} escapes parent {} {:?}",
            child.kind,
            child.span,
            node.kind,
            node.span
        );
        assert!(
            child.span.start >= previous_end,
            "{} {:?} overlaps its previous sibling in {}",
            child.kind,
            child.span,
            node.kind
        );
        previous_end = child.span.end;
        check_node(child);
    }
}
