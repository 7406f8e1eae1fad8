//! SQL Parser
//!
//! A hand-written recursive descent parser with Pratt expression parsing and
//! statement-level error recovery.

mod ddl;
mod error;
mod expr;
mod parser;
mod pratt;
mod query;

use serde::Serialize;

pub use error::SyntaxError;
pub use parser::{MAX_DEPTH, Parser};

use crate::dialect::DialectKind;
use crate::tree::SyntaxTree;

/// Outcome of parsing one source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ParseResult {
    /// Every statement parsed.
    Tree(SyntaxTree),
    /// At least one statement was malformed. `partial` holds the recovered
    /// tree in which each malformed region is an `unparsed` node.
    Errors {
        errors: Vec<SyntaxError>,
        partial: SyntaxTree,
    },
}

impl ParseResult {
    /// Returns the complete or partial tree.
    #[must_use]
    pub const fn tree(&self) -> &SyntaxTree {
        match self {
            Self::Tree(tree) | Self::Errors { partial: tree, .. } => tree,
        }
    }

    /// Returns the syntax errors, empty when parsing succeeded.
    #[must_use]
    pub fn errors(&self) -> &[SyntaxError] {
        match self {
            Self::Tree(_) => &[],
            Self::Errors { errors, .. } => errors,
        }
    }

    /// Returns true if no syntax error was recorded.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Tree(_))
    }

    /// Splits the result into its tree and errors.
    #[must_use]
    pub fn into_parts(self) -> (SyntaxTree, Vec<SyntaxError>) {
        match self {
            Self::Tree(tree) => (tree, Vec::new()),
            Self::Errors { errors, partial } => (partial, errors),
        }
    }
}

/// Parses `text` with the PostgreSQL dialect.
#[must_use]
pub fn parse(text: &str) -> ParseResult {
    parse_with_dialect(text, DialectKind::Postgres)
}

/// Parses `text` with the given dialect.
#[must_use]
pub fn parse_with_dialect(text: &str, dialect: DialectKind) -> ParseResult {
    let (tree, errors) = Parser::with_dialect(text, dialect.dialect()).parse_script();
    if errors.is_empty() {
        ParseResult::Tree(tree)
    } else {
        ParseResult::Errors {
            errors,
            partial: tree,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeKind;

    #[test]
    fn test_parse_ok() {
        let result = parse("CREATE TABLE t (id int);");
        assert!(result.is_ok());
        assert!(result.errors().is_empty());
        assert_eq!(result.tree().statements()[0].kind, NodeKind::CreateTable);
    }

    #[test]
    fn test_parse_errors_keep_partial_tree() {
        let result = parse("SELECT 1; SELEKT 2; SELECT 3");
        assert!(!result.is_ok());
        assert_eq!(result.errors().len(), 1);
        let kinds: Vec<NodeKind> = result.tree().statements().iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NodeKind::Select, NodeKind::Unparsed, NodeKind::Select]);
    }

    #[test]
    fn test_generic_dialect_backticks() {
        let result = parse_with_dialect("SELECT `a b` FROM t", DialectKind::Generic);
        assert!(result.is_ok());
        let result = parse("SELECT `a b` FROM t");
        assert!(!result.is_ok());
    }
}
