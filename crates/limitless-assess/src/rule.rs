//! Compatibility rules and their severities.

use std::fmt;
use std::str::FromStr;

use limitless_sql_core::NodeKind;
use serde::{Deserialize, Serialize};

use crate::catalog::Check;

/// How serious a finding is. Orders from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// The construct cannot run in the restricted mode.
    Blocker,
    /// The construct runs but behaves differently or needs review.
    Warning,
    /// Informational only.
    Info,
}

impl Severity {
    /// Every severity, most severe first.
    pub const ALL: [Self; 3] = [Self::Blocker, Self::Warning, Self::Info];

    /// Returns the uppercase name used in reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Blocker => "BLOCKER",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BLOCKER" => Ok(Self::Blocker),
            "WARNING" => Ok(Self::Warning),
            "INFO" => Ok(Self::Info),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

/// A compatibility rule: when a node of `target` kind satisfies `check`, a
/// finding with `severity` and the rendered `message` is reported.
///
/// Messages may contain `{value}` (the node's value), `{kind}` (its
/// construct kind) and `{detail}` (text supplied by the check).
#[derive(Debug, Clone)]
pub struct Rule {
    /// Unique identifier.
    pub id: String,
    /// Construct kind the rule is evaluated on.
    pub target: NodeKind,
    /// Applicability predicate.
    pub check: Check,
    /// Severity of the resulting finding.
    pub severity: Severity,
    /// Explanation template.
    pub message: String,
}

impl Rule {
    /// Creates a new rule that fires on every node of `target` kind.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        target: NodeKind,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            target,
            check: Check::Present,
            severity,
            message: message.into(),
        }
    }

    /// Sets the applicability predicate.
    #[must_use]
    pub fn with_check(mut self, check: Check) -> Self {
        self.check = check;
        self
    }

    /// Renders the message template.
    #[must_use]
    pub fn render(&self, value: Option<&str>, kind: NodeKind, detail: Option<&str>) -> String {
        self.message
            .replace("{value}", value.unwrap_or_default())
            .replace("{kind}", kind.as_str())
            .replace("{detail}", detail.unwrap_or_default())
    }
}
