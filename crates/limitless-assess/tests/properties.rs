//! Properties that hold for every script.

mod common;
use common::*;

use limitless_assess::invariant::check_tree;
use limitless_assess::prelude::*;
use limitless_assess::{aggregate, Finding};
use limitless_sql_core::parse;

const SCRIPTS: &[&str] = &[
    "CREATE TABLE t (id INT) SHARD KEY (id);",
    "SELEKT * FROM t; SELECT 1;",
    "CREATE TEMP TABLE t (id int REFERENCES u (id), CONSTRAINT x EXCLUDE USING gist (id WITH =)) \
     INHERITS (p) PARTITION BY LIST (id) TABLESPACE fast;\n\
     CREATE UNIQUE INDEX i ON t USING gin (id);\n\
     ALTER TABLE t ADD COLUMN s serial NOT NULL, SET TABLESPACE slow;",
    "CREATE SEQUENCE s AS smallint INCREMENT BY 1000 CYCLE;\n\
     CREATE EXTENSION postgis;\n\
     GRANT USAGE ON LANGUAGE plperl TO bob;\n\
     CREATE TRIGGER trg AFTER INSERT ON t EXECUTE FUNCTION f();",
    "CREATE PROCEDURE p() RETURNS int LANGUAGE plperl AS 'x';\n\
     CREATE TABLE t (id int CHECK (id IN (SELECT 1))) SHARD KEY (id);\n\
     CREATE TABLE t (id int CHECK (id IN (SELECT 1))) SHARD KEY (id);",
    "",
];

fn findings(catalog: &Catalog, sql: &str) -> Vec<Finding> {
    assess_with(catalog, sql).findings
}

#[test]
fn trees_are_well_formed() {
    for sql in SCRIPTS {
        let result = parse(sql);
        assert_eq!(check_tree(result.tree()), Ok(()), "{sql}");
    }
}

#[test]
fn assessment_is_deterministic() {
    let catalog = builtin();
    for sql in SCRIPTS {
        let first = assess_with(&catalog, sql);
        for _ in 0..3 {
            assert_eq!(assess_with(&catalog, sql), first, "{sql}");
        }
    }
}

#[test]
fn parallel_run_matches_sequential() {
    let catalog = builtin();
    let units: Vec<(&str, &str)> = SCRIPTS
        .iter()
        .enumerate()
        .map(|(i, sql)| (["a", "b", "c", "d", "e", "f"][i], *sql))
        .collect();
    let parallel = report(&catalog, &units);
    for (unit, (id, sql)) in parallel.units.iter().zip(&units) {
        assert_eq!(unit.unit_id, *id);
        let sequential = single_worker(&catalog).assess_unit(&SourceUnit::new(*id, *sql));
        assert_eq!(unit.findings, sequential.findings, "{id}");
    }
}

#[test]
fn disabling_a_rule_only_removes_its_findings() {
    let catalog = builtin();
    for sql in SCRIPTS {
        let all = findings(&catalog, sql);
        for rule in catalog.all_rules() {
            let without = catalog.without_rule(&rule.id).unwrap();
            let expected: Vec<Finding> = all
                .iter()
                .filter(|f| f.rule_id != rule.id)
                .cloned()
                .collect();
            assert_eq!(findings(&without, sql), expected, "{} on {sql}", rule.id);
        }
    }
}

#[test]
fn aggregation_is_idempotent() {
    let catalog = builtin();
    for sql in SCRIPTS {
        let once = findings(&catalog, sql);
        assert_eq!(aggregate(once.clone()), once, "{sql}");

        let mut doubled = once.clone();
        doubled.extend(once.iter().rev().cloned());
        assert_eq!(aggregate(doubled), once, "{sql}");
    }
}

#[test]
fn findings_are_ordered_by_severity() {
    let catalog = builtin();
    for sql in SCRIPTS {
        let found = findings(&catalog, sql);
        for pair in found.windows(2) {
            assert!(
                (pair[0].severity, pair[0].span.start) <= (pair[1].severity, pair[1].span.start),
                "{:?} before {:?}",
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn status_follows_severities() {
    let catalog = builtin();
    for sql in SCRIPTS {
        let report = report(&catalog, &[("unit.sql", sql)]);
        let has = |severity: Severity| report.findings().any(|f| f.severity == severity);
        let expected = if has(Severity::Blocker) {
            Status::Fail
        } else if has(Severity::Warning) {
            Status::FailWithWarnings
        } else {
            Status::Pass
        };
        assert_eq!(report.status(), expected, "{sql}");
    }
}

#[test]
fn findings_lie_within_their_statement() {
    let catalog = builtin();
    for sql in SCRIPTS {
        let tree = parse(sql).into_parts().0;
        for finding in findings(&catalog, sql) {
            assert!(
                tree.statements().iter().any(|s| s.span.contains(finding.span)),
                "{finding:?}"
            );
        }
    }
}
