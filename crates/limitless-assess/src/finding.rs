//! Findings reported by the rule engine.

use limitless_sql_core::{LineIndex, Span};
use serde::Serialize;

use crate::rule::Severity;

/// One rule violation at a location in a unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// The rule that fired.
    pub rule_id: String,
    /// Severity of the rule, or `INFO` when the rule faulted.
    pub severity: Severity,
    /// Rendered explanation.
    pub message: String,
    /// 1-based line of the span start.
    pub line: usize,
    /// 1-based column of the span start.
    pub column: usize,
    /// Byte range of the offending construct.
    #[serde(skip)]
    pub span: Span,
    /// The unit the finding belongs to.
    #[serde(skip)]
    pub unit_id: String,
}

impl Finding {
    /// Creates a finding, deriving line and column from `lines`.
    #[must_use]
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        span: Span,
        unit_id: impl Into<String>,
        lines: &LineIndex<'_>,
    ) -> Self {
        let (line, column) = lines.line_col(span.start);
        Self {
            rule_id: rule_id.into(),
            severity,
            message: message.into(),
            line,
            column,
            span,
            unit_id: unit_id.into(),
        }
    }
}
