//! Error types for the assessment pipeline.

use std::path::PathBuf;

use limitless_sql_core::{NodeKind, Span};

/// Errors that abort loading a rule catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog definition is not valid JSON or does not match the schema.
    #[error("Invalid catalog definition: {0}")]
    Json(#[from] serde_json::Error),

    /// The catalog file could not be read.
    #[error("Failed to read catalog '{path}': {source}")]
    Io {
        /// Path to the catalog file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The requested engine version is not defined.
    #[error("Engine version '{0}' is not defined in the catalog")]
    UnknownVersion(String),

    /// A version inherits from a version that is not defined.
    #[error("Version '{version}' inherits from '{parent}' which doesn't exist")]
    UnknownParent {
        /// The inheriting version.
        version: String,
        /// The missing parent.
        parent: String,
    },

    /// The inheritance chain loops back on itself.
    #[error("Circular inheritance detected: {}", .0.join(" -> "))]
    InheritanceCycle(Vec<String>),

    /// Two rules share an identifier.
    #[error("Duplicate rule '{id}' in version '{version}'")]
    DuplicateRule {
        /// The repeated rule identifier.
        id: String,
        /// The version declaring the duplicate.
        version: String,
    },

    /// A rule is marked as an override but nothing is inherited under its id.
    #[error("Rule '{id}' in version '{version}' overrides a rule that is not inherited")]
    UnknownOverride {
        /// The overriding rule identifier.
        id: String,
        /// The version declaring the override.
        version: String,
    },

    /// A version disables a rule that is not in effect.
    #[error("Version '{version}' disables unknown rule '{id}'")]
    UnknownDisabled {
        /// The disabled rule identifier.
        id: String,
        /// The version listing it.
        version: String,
    },

    /// A rule definition is incomplete.
    #[error("Invalid rule '{id}': {reason}")]
    InvalidRule {
        /// The rule identifier, possibly empty.
        id: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// A structural invariant of a syntax tree or finding list does not hold.
///
/// The parser guarantees these invariants, so hitting one means a bug; the
/// affected unit is reported as failed rather than with wrong findings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// A child span extends outside its parent span.
    #[error("{child} at {child_span:?} lies outside its parent {parent} at {parent_span:?}")]
    ChildOutsideParent {
        /// Kind of the parent node.
        parent: NodeKind,
        /// Span of the parent node.
        parent_span: Span,
        /// Kind of the child node.
        child: NodeKind,
        /// Span of the child node.
        child_span: Span,
    },

    /// Two siblings overlap or are out of document order.
    #[error("{second} at {second_span:?} overlaps or precedes its sibling {first} at {first_span:?}")]
    SiblingOrder {
        /// Kind of the earlier sibling.
        first: NodeKind,
        /// Span of the earlier sibling.
        first_span: Span,
        /// Kind of the later sibling.
        second: NodeKind,
        /// Span of the later sibling.
        second_span: Span,
    },

    /// A finding points outside the unit's text.
    #[error("Finding '{rule_id}' at {span:?} lies outside the unit span {root:?}")]
    FindingOutsideRoot {
        /// The rule that produced the finding.
        rule_id: String,
        /// Span of the finding.
        span: Span,
        /// Span of the whole unit.
        root: Span,
    },
}

/// A rule predicate could not be evaluated against a node.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleFault {
    /// The predicate only applies to a different construct kind.
    #[error("check applies to {expected} nodes, not {found}")]
    WrongTarget {
        /// The kind the predicate understands.
        expected: NodeKind,
        /// The kind it was applied to.
        found: NodeKind,
    },

    /// An option argument is not an integer.
    #[error("{option} has a non-integer argument '{value}'")]
    InvalidNumber {
        /// The option name.
        option: String,
        /// The argument text.
        value: String,
    },

    /// An option is missing its argument.
    #[error("{0} has no argument")]
    MissingArgument(String),

    /// The predicate configuration itself is unusable.
    #[error("invalid check configuration: {0}")]
    InvalidCheck(String),

    /// A programmatic predicate failed.
    #[error("{0}")]
    Custom(String),
}

/// Errors that abort an assessment run.
#[derive(Debug, thiserror::Error)]
pub enum AssessError {
    /// The rule catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The worker pool could not be created.
    #[error("Failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for catalog loading.
pub type Result<T> = std::result::Result<T, CatalogError>;
