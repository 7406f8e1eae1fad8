//! Rule applicability predicates.

use std::fmt;
use std::sync::Arc;

use limitless_sql_core::{Node, NodeKind};
use serde::Deserialize;

use super::sequence::{self, SequenceLimits};
use crate::error::RuleFault;

/// A successful predicate match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Match {
    /// Text substituted for `{detail}` in the rule message.
    pub detail: Option<String>,
}

impl Match {
    /// Creates a match carrying detail text.
    #[must_use]
    pub fn with_detail(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
        }
    }
}

/// Outcome of evaluating one predicate on one node.
pub type CheckResult = Result<Option<Match>, RuleFault>;

type CheckFn = dyn Fn(&Node, &[&Node]) -> CheckResult + Send + Sync;

/// A predicate supplied as a closure by programmatic catalogs.
#[derive(Clone)]
pub struct CustomCheck(Arc<CheckFn>);

impl CustomCheck {
    /// Wraps a closure receiving the node and its ancestors, root first.
    pub fn new(f: impl Fn(&Node, &[&Node]) -> CheckResult + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }
}

impl fmt::Debug for CustomCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomCheck(..)")
    }
}

/// The closed set of rule predicates.
///
/// In catalog definitions a predicate is an object tagged by `check`, e.g.
/// `{"check": "value_in", "values": ["EXCLUDE"]}`. Value comparisons are
/// case-insensitive.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum Check {
    /// Always matches.
    #[default]
    Present,
    /// The node's value is one of `values`.
    ValueIn { values: Vec<String> },
    /// The node has a value and it is none of `values`.
    ValueNotIn { values: Vec<String> },
    /// A direct child of `kind` exists, with a value in `values` if given.
    HasChild {
        kind: NodeKind,
        #[serde(default)]
        values: Option<Vec<String>>,
    },
    /// No direct child of `kind` exists.
    LacksChild { kind: NodeKind },
    /// The parent node has a direct child of `kind`, with a value in
    /// `values` if given.
    ParentHasChild {
        kind: NodeKind,
        #[serde(default)]
        values: Option<Vec<String>>,
    },
    /// Some ancestor has `kind` and, if `having` is given, a direct child of
    /// that kind.
    Within {
        kind: NodeKind,
        #[serde(default)]
        having: Option<NodeKind>,
    },
    /// The inner predicate does not match.
    Not { of: Box<Check> },
    /// Every inner predicate matches.
    All { checks: Vec<Check> },
    /// At least one inner predicate matches.
    Any { checks: Vec<Check> },
    /// A `create_sequence` node cannot be distributed across routers.
    SequenceCapacity(SequenceLimits),
    /// A programmatic predicate.
    #[serde(skip)]
    Custom(CustomCheck),
}

impl Check {
    /// Evaluates the predicate on `node` whose ancestors, root first, are
    /// `ancestors`.
    ///
    /// # Errors
    ///
    /// Returns a `RuleFault` if the predicate cannot be applied to the node.
    pub fn evaluate(&self, node: &Node, ancestors: &[&Node]) -> CheckResult {
        let matched = match self {
            Self::Present => true,
            Self::ValueIn { values } => value_in(node.value(), values),
            Self::ValueNotIn { values } => {
                node.value().is_some() && !value_in(node.value(), values)
            }
            Self::HasChild { kind, values } => has_child(node, *kind, values.as_deref()),
            Self::LacksChild { kind } => !node.has_child(*kind),
            Self::ParentHasChild { kind, values } => ancestors
                .last()
                .is_some_and(|parent| has_child(parent, *kind, values.as_deref())),
            Self::Within { kind, having } => ancestors.iter().any(|ancestor| {
                ancestor.kind == *kind && having.map_or(true, |child| ancestor.has_child(child))
            }),
            Self::Not { of } => of.evaluate(node, ancestors)?.is_none(),
            Self::All { checks } => {
                let mut detail = None;
                for check in checks {
                    match check.evaluate(node, ancestors)? {
                        Some(found) => detail = detail.or(found.detail),
                        None => return Ok(None),
                    }
                }
                return Ok(Some(Match { detail }));
            }
            Self::Any { checks } => {
                for check in checks {
                    if let Some(found) = check.evaluate(node, ancestors)? {
                        return Ok(Some(found));
                    }
                }
                false
            }
            Self::SequenceCapacity(limits) => {
                return Ok(sequence::check_capacity(node, limits)?.map(Match::with_detail));
            }
            Self::Custom(custom) => return (custom.0)(node, ancestors),
        };
        Ok(matched.then(Match::default))
    }
}

fn value_in(value: Option<&str>, values: &[String]) -> bool {
    value.is_some_and(|value| values.iter().any(|v| v.eq_ignore_ascii_case(value)))
}

fn has_child(node: &Node, kind: NodeKind, values: Option<&[String]>) -> bool {
    node.children_of(kind)
        .any(|child| values.map_or(true, |values| value_in(child.value(), values)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use limitless_sql_core::Span;

    fn leaf(kind: NodeKind, value: &str) -> Node {
        Node::new(kind, Span::new(0, 1)).with_value(value)
    }

    fn table() -> Node {
        Node::new(NodeKind::CreateTable, Span::new(0, 40)).with_children(vec![
            Node::new(NodeKind::Temporary, Span::new(7, 11)),
            leaf(NodeKind::QualifiedName, "t"),
            Node::new(NodeKind::ShardKey, Span::new(30, 40)),
        ])
    }

    fn check(json: &str) -> Check {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_present_by_default() {
        let node = leaf(NodeKind::Tablespace, "fast");
        assert_eq!(Check::default().evaluate(&node, &[]), Ok(Some(Match::default())));
    }

    #[test]
    fn test_value_checks_ignore_case() {
        let node = leaf(NodeKind::AccessMethod, "gist");
        let allowed = check(r#"{"check": "value_not_in", "values": ["BTREE", "HASH"]}"#);
        assert!(allowed.evaluate(&node, &[]).unwrap().is_some());
        let node = leaf(NodeKind::AccessMethod, "hash");
        assert!(allowed.evaluate(&node, &[]).unwrap().is_none());

        let listed = check(r#"{"check": "value_in", "values": ["Hash"]}"#);
        assert!(listed.evaluate(&node, &[]).unwrap().is_some());
    }

    #[test]
    fn test_value_not_in_requires_a_value() {
        let node = Node::new(NodeKind::CreateSchema, Span::new(0, 5));
        let c = check(r#"{"check": "value_not_in", "values": ["public"]}"#);
        assert_eq!(c.evaluate(&node, &[]), Ok(None));
    }

    #[test]
    fn test_child_checks() {
        let node = table();
        let has = check(r#"{"check": "has_child", "kind": "temporary"}"#);
        let lacks = check(r#"{"check": "lacks_child", "kind": "temporary"}"#);
        let named = check(r#"{"check": "has_child", "kind": "qualified_name", "values": ["u"]}"#);
        assert!(has.evaluate(&node, &[]).unwrap().is_some());
        assert!(lacks.evaluate(&node, &[]).unwrap().is_none());
        assert!(named.evaluate(&node, &[]).unwrap().is_none());
    }

    #[test]
    fn test_ancestor_checks() {
        let table = table();
        let node = &table.children[0];
        let within = check(r#"{"check": "within", "kind": "create_table", "having": "shard_key"}"#);
        let parent = check(r#"{"check": "parent_has_child", "kind": "shard_key"}"#);
        assert!(within.evaluate(node, &[&table]).unwrap().is_some());
        assert!(parent.evaluate(node, &[&table]).unwrap().is_some());
        assert!(within.evaluate(node, &[]).unwrap().is_none());
        assert!(parent.evaluate(node, &[]).unwrap().is_none());

        let without_tablespace =
            check(r#"{"check": "within", "kind": "create_table", "having": "tablespace"}"#);
        assert!(without_tablespace.evaluate(node, &[&table]).unwrap().is_none());
    }

    #[test]
    fn test_combinators() {
        let node = table();
        let all = check(
            r#"{"check": "all", "checks": [
                {"check": "has_child", "kind": "shard_key"},
                {"check": "not", "of": {"check": "has_child", "kind": "tablespace"}}
            ]}"#,
        );
        let any = check(
            r#"{"check": "any", "checks": [
                {"check": "has_child", "kind": "tablespace"},
                {"check": "has_child", "kind": "inherits"}
            ]}"#,
        );
        assert!(all.evaluate(&node, &[]).unwrap().is_some());
        assert!(any.evaluate(&node, &[]).unwrap().is_none());
    }

    #[test]
    fn test_faults_propagate_through_combinators() {
        let node = table();
        let c = Check::Not {
            of: Box::new(Check::Custom(CustomCheck::new(|_, _| {
                Err(RuleFault::Custom("boom".into()))
            }))),
        };
        assert_eq!(
            c.evaluate(&node, &[]),
            Err(RuleFault::Custom("boom".into()))
        );
    }

    #[test]
    fn test_custom_check_sees_ancestors() {
        let table = table();
        let c = Check::Custom(CustomCheck::new(|node, ancestors| {
            Ok((node.kind == NodeKind::ShardKey && ancestors.len() == 1)
                .then(|| Match::with_detail("sharded")))
        }));
        let found = c.evaluate(&table.children[2], &[&table]).unwrap();
        assert_eq!(found.and_then(|m| m.detail).as_deref(), Some("sharded"));
    }

    #[test]
    fn test_unknown_check_is_rejected() {
        assert!(serde_json::from_str::<Check>(r#"{"check": "regex"}"#).is_err());
    }
}
