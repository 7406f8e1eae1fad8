//! Tree walker and rule engine.
//!
//! The walker visits every node of a syntax tree in document order, keeping
//! the chain of ancestors on an explicit stack, and evaluates the catalog
//! rules targeting each node's kind. Every matching rule yields one finding.
//! Rules are evaluated independently: a rule that faults is reported as an
//! `INFO` finding and the remaining rules still run.

use limitless_sql_core::{LineIndex, Node, NodeKind, SyntaxTree};
use tracing::warn;

use crate::catalog::Catalog;
use crate::finding::Finding;
use crate::rule::{Rule, Severity};

/// Rule id of the finding reported for every unparsed region.
pub const UNPARSED_RULE_ID: &str = "unparsed-region";

/// Evaluates `catalog` against `tree` and returns the findings in visit
/// order.
#[must_use]
pub fn evaluate(
    tree: &SyntaxTree,
    catalog: &Catalog,
    unit_id: &str,
    lines: &LineIndex<'_>,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut ancestors: Vec<&Node> = Vec::new();

    for (node, depth) in tree.walk() {
        ancestors.truncate(depth);
        if node.kind == NodeKind::Unparsed {
            findings.push(unparsed(node, unit_id, lines));
        } else {
            for rule in catalog.rules_for(node.kind) {
                if let Some(finding) = apply(rule, node, &ancestors, unit_id, lines) {
                    findings.push(finding);
                }
            }
        }
        ancestors.push(node);
    }

    findings
}

fn apply(
    rule: &Rule,
    node: &Node,
    ancestors: &[&Node],
    unit_id: &str,
    lines: &LineIndex<'_>,
) -> Option<Finding> {
    match rule.check.evaluate(node, ancestors) {
        Ok(Some(matched)) => {
            let message = rule.render(node.value(), node.kind, matched.detail.as_deref());
            Some(Finding::new(
                &rule.id,
                rule.severity,
                message,
                node.span,
                unit_id,
                lines,
            ))
        }
        Ok(None) => None,
        Err(fault) => {
            warn!(unit = unit_id, rule = %rule.id, %fault, "rule evaluation failed");
            Some(Finding::new(
                &rule.id,
                Severity::Info,
                format!("Rule evaluation failed: {fault}"),
                node.span,
                unit_id,
                lines,
            ))
        }
    }
}

fn unparsed(node: &Node, unit_id: &str, lines: &LineIndex<'_>) -> Finding {
    let error = node.value().unwrap_or("syntax error");
    Finding::new(
        UNPARSED_RULE_ID,
        Severity::Blocker,
        format!("Statement could not be parsed: {error}"),
        node.span,
        unit_id,
        lines,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Check, CustomCheck};
    use crate::error::RuleFault;
    use limitless_sql_core::{parse, Span};

    fn run(sql: &str, rules: Vec<Rule>) -> Vec<Finding> {
        let catalog = Catalog::from_rules("test", rules).unwrap();
        let tree = parse(sql).into_parts().0;
        evaluate(&tree, &catalog, "unit.sql", &LineIndex::new(sql))
    }

    #[test]
    fn test_every_matching_rule_fires() {
        let findings = run(
            "CREATE TABLE t (id int) SHARD KEY (id);",
            vec![
                Rule::new("a", NodeKind::ShardKey, Severity::Blocker, "a"),
                Rule::new("b", NodeKind::ShardKey, Severity::Warning, "b"),
                Rule::new("c", NodeKind::Tablespace, Severity::Blocker, "c"),
            ],
        );
        let ids: Vec<&str> = findings.iter().map(|f| f.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(findings[0].span, Span::new(24, 38));
        assert_eq!((findings[0].line, findings[0].column), (1, 25));
        assert_eq!(findings[0].unit_id, "unit.sql");
    }

    #[test]
    fn test_ancestors_are_root_first() {
        let seen = CustomCheck::new(|node, ancestors| {
            let kinds: Vec<NodeKind> = ancestors.iter().map(|a| a.kind).collect();
            assert_eq!(node.kind, NodeKind::Subquery);
            assert_eq!(kinds[0], NodeKind::Script);
            assert_eq!(kinds[1], NodeKind::Select);
            Ok(None)
        });
        let findings = run(
            "SELECT * FROM t WHERE id IN (SELECT id FROM u)",
            vec![Rule::new("s", NodeKind::Subquery, Severity::Info, "s")
                .with_check(Check::Custom(seen))],
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn test_fault_becomes_info_and_siblings_still_run() {
        let faulty = Check::Custom(CustomCheck::new(|_, _| {
            Err(RuleFault::Custom("broken predicate".into()))
        }));
        let findings = run(
            "CREATE TABLE t (id int) SHARD KEY (id);",
            vec![
                Rule::new("broken", NodeKind::ShardKey, Severity::Blocker, "x").with_check(faulty),
                Rule::new("fine", NodeKind::ShardKey, Severity::Blocker, "shard key"),
            ],
        );
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].rule_id, "broken");
        assert_eq!(findings[0].severity, Severity::Info);
        assert_eq!(findings[0].message, "Rule evaluation failed: broken predicate");
        assert_eq!(findings[1].rule_id, "fine");
        assert_eq!(findings[1].severity, Severity::Blocker);
    }

    #[test]
    fn test_unparsed_region_is_a_blocker() {
        let findings = run(
            "SELEKT * FROM t; CREATE TABLE t (id int);",
            vec![Rule::new("tables", NodeKind::CreateTable, Severity::Info, "table")],
        );
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].rule_id, UNPARSED_RULE_ID);
        assert_eq!(findings[0].severity, Severity::Blocker);
        assert_eq!(findings[0].span.start, 0);
        assert!(findings[0].message.contains("SELEKT"), "{}", findings[0].message);
        assert_eq!(findings[1].rule_id, "tables");
    }

    #[test]
    fn test_message_renders_value() {
        let findings = run(
            "CREATE EXTENSION postgis;",
            vec![Rule::new(
                "ext",
                NodeKind::CreateExtension,
                Severity::Blocker,
                "Extension {value} is not supported",
            )],
        );
        assert_eq!(findings[0].message, "Extension postgis is not supported");
    }

    #[test]
    fn test_leaves_are_visited() {
        let findings = run(
            "SELECT a, b FROM t",
            vec![Rule::new("col", NodeKind::ColumnRef, Severity::Info, "{value}")],
        );
        let values: Vec<&str> = findings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(values, vec!["a", "b"]);
    }
}
