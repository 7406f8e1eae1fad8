//! # limitless-sql-core
//!
//! A PostgreSQL-flavoured SQL/DDL front end for compatibility assessment.
//!
//! This crate provides:
//! - A hand-written lexer covering dollar quoting, escape strings, nested
//!   block comments and positional parameters
//! - A recursive descent parser with Pratt expression parsing that recovers
//!   from malformed statements
//! - A generic syntax tree of spanned nodes with a closed set of kinds
//!
//! ## Parsing
//!
//! ```rust
//! use limitless_sql_core::{parse, NodeKind};
//!
//! let result = parse("CREATE TABLE t (id INT) SHARD KEY (id); SELEKT 1;");
//! assert_eq!(result.errors().len(), 1);
//!
//! let statements = result.tree().statements();
//! assert_eq!(statements[0].kind, NodeKind::CreateTable);
//! assert!(statements[0].has_child(NodeKind::ShardKey));
//! assert_eq!(statements[1].kind, NodeKind::Unparsed);
//! ```
//!
//! Malformed statements never abort the parse: each one is reported as a
//! [`SyntaxError`] and kept in the tree as an `unparsed` node spanning the
//! text up to the next `;`.

pub mod dialect;
pub mod lexer;
pub mod parser;
pub mod tree;

pub use dialect::DialectKind;
pub use lexer::{LineIndex, Span};
pub use parser::{MAX_DEPTH, ParseResult, Parser, SyntaxError, parse, parse_with_dialect};
pub use tree::{Category, Node, NodeKind, SyntaxTree};
