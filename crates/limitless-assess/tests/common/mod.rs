#![allow(dead_code)]

use limitless_assess::prelude::*;
use limitless_assess::UnitResult;

pub fn builtin() -> Catalog {
    Catalog::builtin().unwrap_or_else(|e| panic!("Built-in catalog failed to load: {e}"))
}

pub fn version(version: &str) -> Catalog {
    Catalog::builtin_version(Some(version))
        .unwrap_or_else(|e| panic!("Built-in version {version} failed to load: {e}"))
}

pub fn single_worker(catalog: &Catalog) -> Assessor<'_> {
    Assessor::new(
        catalog,
        AssessmentOptions {
            workers: 1,
            ..AssessmentOptions::default()
        },
    )
}

/// Assesses one script against `catalog`.
pub fn assess_with(catalog: &Catalog, sql: &str) -> UnitResult {
    single_worker(catalog).assess_unit(&SourceUnit::new("unit.sql", sql))
}

/// Assesses one script against the built-in catalog.
pub fn assess(sql: &str) -> UnitResult {
    assess_with(&builtin(), sql)
}

/// Assesses several named scripts and returns the report.
pub fn report(catalog: &Catalog, units: &[(&str, &str)]) -> AssessmentReport {
    let units: Vec<SourceUnit> = units
        .iter()
        .map(|(id, sql)| SourceUnit::new(*id, *sql))
        .collect();
    Assessor::new(catalog, AssessmentOptions::default())
        .run(&units)
        .unwrap_or_else(|e| panic!("Run failed: {e}"))
}

pub fn rule_ids(findings: &[Finding]) -> Vec<&str> {
    findings.iter().map(|f| f.rule_id.as_str()).collect()
}

/// Findings of one rule.
pub fn of_rule<'a>(findings: &'a [Finding], id: &str) -> Vec<&'a Finding> {
    findings.iter().filter(|f| f.rule_id == id).collect()
}

pub fn fires(sql: &str, rule: &str) -> bool {
    assess(sql).findings.iter().any(|f| f.rule_id == rule)
}

pub fn single_finding(sql: &str) -> Finding {
    let result = assess(sql);
    assert_eq!(
        result.findings.len(),
        1,
        "Expected one finding for: {sql}\nGot: {:?}",
        rule_ids(&result.findings)
    );
    result.findings.into_iter().next().unwrap()
}
