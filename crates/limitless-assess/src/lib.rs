//! Compatibility assessment of SQL/DDL scripts for Limitless databases.
//!
//! `limitless-assess` reads PostgreSQL scripts, finds every construct the
//! restricted Limitless execution mode rejects or treats differently, and
//! reports them with a severity and a source location.
//!
//! # Architecture
//!
//! - **Parser** - `limitless-sql-core` turns each unit into a syntax tree,
//!   recovering from malformed statements
//! - **Catalog** - Versioned JSON rule definitions with inheritance
//! - **Engine** - Walks the tree and evaluates the rules targeting each node
//! - **Aggregator** - Orders findings and drops exact duplicates
//! - **Report** - Severity counts, statuses and text/JSON rendering
//! - **Runner** - Assesses units on a bounded worker pool with a deadline
//!
//! # Example
//!
//! ```rust
//! use limitless_assess::prelude::*;
//!
//! let catalog = Catalog::builtin().unwrap();
//! let units = vec![SourceUnit::new(
//!     "orders.sql",
//!     "CREATE TABLE orders (id int) SHARD KEY (id);",
//! )];
//! let report = Assessor::new(&catalog, AssessmentOptions::default())
//!     .run(&units)
//!     .unwrap();
//!
//! assert_eq!(report.status(), Status::Fail);
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Assess every .sql file under a directory
//! limitless-assess migrations/
//!
//! # Text output against a specific engine version
//! limitless-assess --engine-version 15.5 --format text schema.sql
//!
//! # Show the rules of the default version
//! limitless-assess --list-rules
//! ```

pub mod aggregate;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod finding;
pub mod invariant;
pub mod report;
pub mod rule;
pub mod runner;
pub mod source;

pub use aggregate::aggregate;
pub use catalog::Catalog;
pub use engine::evaluate;
pub use error::{AssessError, CatalogError, Result, RuleFault, TreeError};
pub use finding::Finding;
pub use report::{build, AssessmentReport, Status, UnitOutcome, UnitResult};
pub use rule::{Rule, Severity};
pub use runner::{AssessmentOptions, Assessor};
pub use source::SourceUnit;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::catalog::{Catalog, Check};
    pub use crate::finding::Finding;
    pub use crate::report::{AssessmentReport, Status, UnitOutcome};
    pub use crate::rule::{Rule, Severity};
    pub use crate::runner::{AssessmentOptions, Assessor};
    pub use crate::source::SourceUnit;
    pub use limitless_sql_core::{DialectKind, NodeKind};
}
