//! Assessment report.
//!
//! [`build`] turns per-unit results into an [`AssessmentReport`] with severity
//! counts and a status for every unit and for the whole run. The report
//! serializes to camelCase JSON and renders as plain text via `Display`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::finding::Finding;
use crate::rule::Severity;

/// Overall verdict derived from finding severities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// No BLOCKER or WARNING finding.
    Pass,
    /// WARNING findings only.
    FailWithWarnings,
    /// At least one BLOCKER finding.
    Fail,
}

impl Status {
    /// Derives the status from severity counts.
    #[must_use]
    pub const fn from_counts(counts: &SeverityCounts) -> Self {
        if counts.blocker > 0 {
            Self::Fail
        } else if counts.warning > 0 {
            Self::FailWithWarnings
        } else {
            Self::Pass
        }
    }

    /// Returns the status name as used in reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::FailWithWarnings => "FAIL_WITH_WARNINGS",
            Self::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the assessment of one unit ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitOutcome {
    /// Parsed and evaluated without syntax errors.
    Assessed,
    /// Evaluated, but some statements could not be parsed.
    SyntaxErrors,
    /// An internal invariant was violated; no findings are reported.
    Failed,
    /// The run deadline passed before the unit was started.
    Timeout,
}

impl UnitOutcome {
    /// Returns the outcome name as used in reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Assessed => "ASSESSED",
            Self::SyntaxErrors => "SYNTAX_ERRORS",
            Self::Failed => "FAILED",
            Self::Timeout => "TIMEOUT",
        }
    }
}

impl fmt::Display for UnitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A syntax error located by line and column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntaxErrorEntry {
    /// The parser's message.
    pub message: String,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
}

/// The result of assessing one unit, before report assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitResult {
    /// Unit identifier.
    pub unit_id: String,
    /// How the assessment ended.
    pub outcome: UnitOutcome,
    /// Syntax errors in document order.
    pub syntax_errors: Vec<SyntaxErrorEntry>,
    /// Aggregated findings.
    pub findings: Vec<Finding>,
    /// Number of top-level statements, unparsed regions included.
    pub statements: usize,
    /// Statements with at least one BLOCKER finding.
    pub unsupported_statements: usize,
    /// Why the unit failed, for `FAILED` outcomes.
    pub failure: Option<String>,
}

impl UnitResult {
    /// Creates the result of a unit that was never started.
    #[must_use]
    pub fn timed_out(unit_id: impl Into<String>) -> Self {
        Self::empty(unit_id, UnitOutcome::Timeout, None)
    }

    /// Creates the result of a unit whose assessment broke an invariant.
    #[must_use]
    pub fn failed(unit_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::empty(unit_id, UnitOutcome::Failed, Some(reason.into()))
    }

    fn empty(unit_id: impl Into<String>, outcome: UnitOutcome, failure: Option<String>) -> Self {
        Self {
            unit_id: unit_id.into(),
            outcome,
            syntax_errors: Vec::new(),
            findings: Vec::new(),
            statements: 0,
            unsupported_statements: 0,
            failure,
        }
    }
}

/// Finding counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityCounts {
    #[serde(rename = "blockerCount")]
    pub blocker: usize,
    #[serde(rename = "warningCount")]
    pub warning: usize,
    #[serde(rename = "infoCount")]
    pub info: usize,
}

impl SeverityCounts {
    /// Counts the findings by severity.
    #[must_use]
    pub fn of(findings: &[Finding]) -> Self {
        let mut counts = Self::default();
        for finding in findings {
            match finding.severity {
                Severity::Blocker => counts.blocker += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Info => counts.info += 1,
            }
        }
        counts
    }

    fn add(&mut self, other: Self) {
        self.blocker += other.blocker;
        self.warning += other.warning;
        self.info += other.info;
    }
}

/// Report section for one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitReport {
    pub unit_id: String,
    pub outcome: UnitOutcome,
    pub status: Status,
    #[serde(flatten)]
    pub counts: SeverityCounts,
    pub statements: usize,
    pub unsupported_statements: usize,
    pub syntax_errors: Vec<SyntaxErrorEntry>,
    pub findings: Vec<Finding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

/// Run-wide totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(flatten)]
    pub counts: SeverityCounts,
    pub status: Status,
    pub units: usize,
    pub statements: usize,
    pub unsupported_statements: usize,
}

/// Facts about the run that vary between identical runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunMetadata {
    pub catalog_version: String,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

/// The complete assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub summary: Summary,
    pub units: Vec<UnitReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RunMetadata>,
}

impl AssessmentReport {
    /// Attaches run metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: RunMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Returns the overall status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.summary.status
    }

    /// Iterates over every finding of every unit, in report order.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.units.iter().flat_map(|unit| unit.findings.iter())
    }
}

/// Assembles a report from unit results, keeping their order.
#[must_use]
pub fn build(units: Vec<UnitResult>) -> AssessmentReport {
    let mut totals = SeverityCounts::default();
    let mut statements = 0;
    let mut unsupported_statements = 0;

    let units: Vec<UnitReport> = units
        .into_iter()
        .map(|unit| {
            let counts = SeverityCounts::of(&unit.findings);
            totals.add(counts);
            statements += unit.statements;
            unsupported_statements += unit.unsupported_statements;
            UnitReport {
                unit_id: unit.unit_id,
                outcome: unit.outcome,
                status: Status::from_counts(&counts),
                counts,
                statements: unit.statements,
                unsupported_statements: unit.unsupported_statements,
                syntax_errors: unit.syntax_errors,
                findings: unit.findings,
                failure: unit.failure,
            }
        })
        .collect();

    AssessmentReport {
        summary: Summary {
            counts: totals,
            status: Status::from_counts(&totals),
            units: units.len(),
            statements,
            unsupported_statements,
        },
        units,
        metadata: None,
    }
}

impl fmt::Display for AssessmentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for unit in &self.units {
            writeln!(f, "{} [{}] {}", unit.unit_id, unit.outcome, unit.status)?;
            if let Some(failure) = &unit.failure {
                writeln!(f, "  failure: {failure}")?;
            }
            for error in &unit.syntax_errors {
                writeln!(
                    f,
                    "  {}:{}: syntax error: {}",
                    error.line, error.column, error.message
                )?;
            }
            for finding in &unit.findings {
                writeln!(
                    f,
                    "  {}:{}: {} [{}] {}",
                    finding.line, finding.column, finding.severity, finding.rule_id, finding.message
                )?;
            }
        }

        let summary = &self.summary;
        writeln!(
            f,
            "{} unit(s), {} statement(s), {} unsupported",
            summary.units, summary.statements, summary.unsupported_statements
        )?;
        writeln!(
            f,
            "{} blocker(s), {} warning(s), {} info",
            summary.counts.blocker, summary.counts.warning, summary.counts.info
        )?;
        if let Some(metadata) = &self.metadata {
            writeln!(
                f,
                "catalog {} | started {} | {} ms",
                metadata.catalog_version,
                metadata.started_at.to_rfc3339(),
                metadata.elapsed_ms
            )?;
        }
        write!(f, "status: {}", summary.status)
    }
}
