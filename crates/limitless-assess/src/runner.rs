//! Parallel assessment of source units.
//!
//! Each unit is parsed, checked, evaluated and aggregated on one worker of a
//! bounded thread pool. Units share nothing but the read-only catalog, and
//! results are collected in input order.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use chrono::Utc;
use limitless_sql_core::{parse_with_dialect, DialectKind, LineIndex, SyntaxTree};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::aggregate::aggregate;
use crate::catalog::Catalog;
use crate::engine::evaluate;
use crate::error::AssessError;
use crate::finding::Finding;
use crate::invariant::{check_findings, check_tree};
use crate::report::{build, AssessmentReport, RunMetadata, SyntaxErrorEntry, UnitOutcome, UnitResult};
use crate::rule::Severity;
use crate::source::SourceUnit;

/// Default worker stack size. The parser recurses once per nesting level.
pub const DEFAULT_STACK_SIZE: usize = 16 << 20;

/// Run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentOptions {
    /// SQL dialect used for parsing.
    pub dialect: DialectKind,
    /// Number of worker threads.
    pub workers: usize,
    /// Run deadline, measured from the start of [`Assessor::run`].
    pub timeout: Option<Duration>,
    /// Stack size of each worker thread in bytes.
    pub stack_size: usize,
}

impl Default for AssessmentOptions {
    fn default() -> Self {
        Self {
            dialect: DialectKind::default(),
            workers: std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
            timeout: None,
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}

/// Assesses source units against a catalog.
#[derive(Debug)]
pub struct Assessor<'a> {
    catalog: &'a Catalog,
    options: AssessmentOptions,
}

impl<'a> Assessor<'a> {
    /// Creates a new assessor.
    #[must_use]
    pub fn new(catalog: &'a Catalog, options: AssessmentOptions) -> Self {
        Self { catalog, options }
    }

    /// Returns the run configuration.
    #[must_use]
    pub fn options(&self) -> &AssessmentOptions {
        &self.options
    }

    /// Assesses every unit and builds the report.
    ///
    /// Units not started before the deadline are reported as `TIMEOUT`.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker pool cannot be created.
    pub fn run(&self, units: &[SourceUnit]) -> Result<AssessmentReport, AssessError> {
        let started_at = Utc::now();
        let started = Instant::now();
        let deadline = self.options.timeout.map(|timeout| started + timeout);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.workers.max(1))
            .stack_size(self.options.stack_size)
            .thread_name(|index| format!("assess-{index}"))
            .build()?;

        let results: Vec<UnitResult> = pool.install(|| {
            units
                .par_iter()
                .map(|unit| match deadline {
                    Some(deadline) if Instant::now() >= deadline => {
                        debug!(unit = unit.id(), "deadline passed before unit started");
                        UnitResult::timed_out(unit.id())
                    }
                    _ => self.assess_unit(unit),
                })
                .collect()
        });

        let report = build(results).with_metadata(RunMetadata {
            catalog_version: self.catalog.version().to_string(),
            started_at,
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        });
        info!(
            units = report.summary.units,
            blockers = report.summary.counts.blocker,
            warnings = report.summary.counts.warning,
            status = %report.summary.status,
            "assessment finished"
        );
        Ok(report)
    }

    /// Assesses one unit on the calling thread.
    #[must_use]
    pub fn assess_unit(&self, unit: &SourceUnit) -> UnitResult {
        let lines = LineIndex::new(unit.text());
        let (tree, errors) = parse_with_dialect(unit.text(), self.options.dialect).into_parts();

        if let Err(violation) = check_tree(&tree) {
            warn!(unit = unit.id(), %violation, "malformed syntax tree");
            return UnitResult::failed(unit.id(), violation.to_string());
        }
        let findings = evaluate(&tree, self.catalog, unit.id(), &lines);
        if let Err(violation) = check_findings(&tree, &findings) {
            warn!(unit = unit.id(), %violation, "finding outside unit");
            return UnitResult::failed(unit.id(), violation.to_string());
        }
        let findings = aggregate(findings);

        let syntax_errors: Vec<SyntaxErrorEntry> = errors
            .iter()
            .map(|error| {
                let (line, column) = lines.line_col(error.span.start);
                SyntaxErrorEntry {
                    message: error.message.clone(),
                    line,
                    column,
                }
            })
            .collect();
        let outcome = if syntax_errors.is_empty() {
            UnitOutcome::Assessed
        } else {
            UnitOutcome::SyntaxErrors
        };

        debug!(
            unit = unit.id(),
            statements = tree.statements().len(),
            findings = findings.len(),
            syntax_errors = syntax_errors.len(),
            "assessed unit"
        );

        UnitResult {
            unit_id: unit.id().to_string(),
            outcome,
            statements: tree.statements().len(),
            unsupported_statements: unsupported_statements(&tree, &findings),
            syntax_errors,
            findings,
            failure: None,
        }
    }
}

/// Counts statements with at least one BLOCKER finding inside them.
fn unsupported_statements(tree: &SyntaxTree, findings: &[Finding]) -> usize {
    tree.statements()
        .iter()
        .filter(|statement| {
            findings
                .iter()
                .any(|f| f.severity == Severity::Blocker && statement.span.contains(f.span))
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Status;

    fn assessor(catalog: &Catalog) -> Assessor<'_> {
        Assessor::new(
            catalog,
            AssessmentOptions {
                workers: 2,
                ..AssessmentOptions::default()
            },
        )
    }

    #[test]
    fn test_default_options() {
        let options = AssessmentOptions::default();
        assert_eq!(options.dialect, DialectKind::Postgres);
        assert!(options.workers >= 1);
        assert!(options.timeout.is_none());
    }

    #[test]
    fn test_assess_unit_counts_statements() {
        let catalog = Catalog::builtin().unwrap();
        let unit = SourceUnit::new(
            "two.sql",
            "CREATE TABLE a (id int);\nCREATE TABLE b (id int) SHARD KEY (id);\n",
        );
        let result = assessor(&catalog).assess_unit(&unit);
        assert_eq!(result.outcome, UnitOutcome::Assessed);
        assert_eq!(result.statements, 2);
        assert_eq!(result.unsupported_statements, 1);
        assert_eq!(result.findings[0].rule_id, "shard-key-clause");
        assert_eq!(result.findings[0].line, 2);
    }

    #[test]
    fn test_syntax_errors_are_located() {
        let catalog = Catalog::builtin().unwrap();
        let unit = SourceUnit::new("bad.sql", "SELECT 1;\n  SELEKT 2;");
        let result = assessor(&catalog).assess_unit(&unit);
        assert_eq!(result.outcome, UnitOutcome::SyntaxErrors);
        assert_eq!(result.syntax_errors.len(), 1);
        assert_eq!(
            (result.syntax_errors[0].line, result.syntax_errors[0].column),
            (2, 3)
        );
        assert_eq!(result.unsupported_statements, 1);
    }

    #[test]
    fn test_run_keeps_input_order() {
        let catalog = Catalog::builtin().unwrap();
        let units: Vec<SourceUnit> = (0..16)
            .map(|i| SourceUnit::new(format!("u{i:02}.sql"), format!("SELECT {i};")))
            .collect();
        let report = assessor(&catalog).run(&units).unwrap();
        let ids: Vec<&str> = report.units.iter().map(|u| u.unit_id.as_str()).collect();
        let expected: Vec<String> = (0..16).map(|i| format!("u{i:02}.sql")).collect();
        assert_eq!(ids, expected);
        assert_eq!(report.status(), Status::Pass);
        assert_eq!(
            report.metadata.as_ref().map(|m| m.catalog_version.as_str()),
            Some(catalog.version())
        );
    }

    #[test]
    fn test_zero_timeout_times_out_every_unit() {
        let catalog = Catalog::builtin().unwrap();
        let options = AssessmentOptions {
            timeout: Some(Duration::ZERO),
            ..AssessmentOptions::default()
        };
        let units = vec![SourceUnit::new("a.sql", "CREATE TABLE t (id int) SHARD KEY (id);")];
        let report = Assessor::new(&catalog, options).run(&units).unwrap();
        assert_eq!(report.units[0].outcome, UnitOutcome::Timeout);
        assert!(report.units[0].findings.is_empty());
        assert_eq!(report.status(), Status::Pass);
    }
}
