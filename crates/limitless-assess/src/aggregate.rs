//! Finding aggregation.

use std::cmp::Ordering;

use crate::finding::Finding;

/// Orders findings by severity (most severe first), span start and rule id,
/// and drops exact duplicates: findings with the same rule, span and unit.
///
/// The result is a fixed point: aggregating it again changes nothing.
#[must_use]
pub fn aggregate(findings: impl IntoIterator<Item = Finding>) -> Vec<Finding> {
    let mut findings: Vec<Finding> = findings.into_iter().collect();
    findings.sort_by(compare);
    findings.dedup_by(|later, earlier| {
        later.rule_id == earlier.rule_id
            && later.span == earlier.span
            && later.unit_id == earlier.unit_id
    });
    findings
}

fn compare(a: &Finding, b: &Finding) -> Ordering {
    a.severity
        .cmp(&b.severity)
        .then(a.span.start.cmp(&b.span.start))
        .then_with(|| a.rule_id.cmp(&b.rule_id))
        .then_with(|| a.unit_id.cmp(&b.unit_id))
        .then(a.span.end.cmp(&b.span.end))
        .then_with(|| a.message.cmp(&b.message))
}
