//! Rule catalog.
//!
//! The catalog maps construct kinds to compatibility rules. It is loaded
//! once per run from a versioned JSON definition, either the built-in one
//! or a file, and is shared read-only by every worker.
//!
//! # Definition format
//!
//! ```json
//! {
//!   "default_version": "16.4",
//!   "versions": {
//!     "15.5": { "rules": [
//!       { "id": "shard-key-clause", "target": "shard_key", "severity": "BLOCKER",
//!         "message": "SHARD KEY is not supported" }
//!     ] },
//!     "16.4": { "inherit_from": "15.5", "disable": ["shard-key-clause"] }
//!   }
//! }
//! ```
//!
//! A version's effective rules are its ancestors' rules, root first,
//! followed by its own. A rule may replace an inherited one only when it
//! sets `"override": true`.

mod check;
mod definition;
mod sequence;

use std::collections::{HashMap, HashSet};
use std::ops::Range;
use std::path::Path;

use limitless_sql_core::NodeKind;
use tracing::debug;

pub use check::{Check, CheckResult, CustomCheck, Match};
pub use definition::{CatalogDefinition, RuleDefinition, VersionDefinition};
pub use sequence::SequenceLimits;

use crate::error::{CatalogError, Result};
use crate::rule::Rule;

/// The built-in catalog definition.
pub const BUILTIN_CATALOG: &str = include_str!("../../resources/catalog.json");

/// An immutable, indexed set of rules for one engine version.
#[derive(Debug, Clone)]
pub struct Catalog {
    version: String,
    /// Rules grouped by target kind, in definition order within a kind.
    rules: Vec<Rule>,
    by_kind: HashMap<NodeKind, Range<usize>>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Loads the default version of the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in definition is invalid.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG, None)
    }

    /// Loads a version of the built-in catalog, or its default version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version is unknown.
    pub fn builtin_version(version: Option<&str>) -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG, version)
    }

    /// Loads a catalog from a JSON definition.
    ///
    /// # Errors
    ///
    /// Returns an error if the definition is malformed, the version is
    /// unknown, or the rules conflict.
    pub fn from_json(text: &str, version: Option<&str>) -> Result<Self> {
        let definition = CatalogDefinition::from_json(text)?;
        Self::from_definition(&definition, version)
    }

    /// Loads a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its definition is
    /// invalid.
    pub fn from_path(path: impl AsRef<Path>, version: Option<&str>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, version)
    }

    /// Resolves one version of a parsed definition.
    ///
    /// # Errors
    ///
    /// Returns an error if the version is unknown or the rules conflict.
    pub fn from_definition(definition: &CatalogDefinition, version: Option<&str>) -> Result<Self> {
        let version = version.unwrap_or(definition.default_version.as_str());
        let rules = definition.resolve(version)?;
        debug!(version, rules = rules.len(), "loaded rule catalog");
        Self::from_rules(version, rules)
    }

    /// Builds a catalog from rules constructed in code.
    ///
    /// # Errors
    ///
    /// Returns an error if two rules share an identifier or a rule is
    /// incomplete.
    pub fn from_rules(version: impl Into<String>, rules: Vec<Rule>) -> Result<Self> {
        let version = version.into();
        let mut seen = HashSet::new();
        for rule in &rules {
            if rule.id.trim().is_empty() || rule.message.trim().is_empty() {
                return Err(CatalogError::InvalidRule {
                    id: rule.id.clone(),
                    reason: "identifier and message must not be empty".to_string(),
                });
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(CatalogError::DuplicateRule {
                    id: rule.id.clone(),
                    version,
                });
            }
        }

        let mut rules = rules;
        rules.sort_by_key(|rule| rule.target);

        let mut by_kind = HashMap::new();
        let mut start = 0;
        while start < rules.len() {
            let kind = rules[start].target;
            let end = start + rules[start..].iter().take_while(|r| r.target == kind).count();
            by_kind.insert(kind, start..end);
            start = end;
        }
        let by_id = rules
            .iter()
            .enumerate()
            .map(|(index, rule)| (rule.id.clone(), index))
            .collect();

        Ok(Self {
            version,
            rules,
            by_kind,
            by_id,
        })
    }

    /// Returns the engine version the rules were resolved for.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the rules targeting `kind`.
    #[must_use]
    pub fn rules_for(&self, kind: NodeKind) -> &[Rule] {
        self.by_kind
            .get(&kind)
            .map_or(&[] as &[Rule], |range| &self.rules[range.clone()])
    }

    /// Returns every rule, grouped by target kind.
    #[must_use]
    pub fn all_rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Looks up a rule by identifier.
    #[must_use]
    pub fn rule(&self, id: &str) -> Option<&Rule> {
        self.by_id.get(id).map(|&index| &self.rules[index])
    }

    /// Returns a copy of this catalog without the rule `id`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownDisabled` if no such rule exists.
    pub fn without_rule(&self, id: &str) -> Result<Self> {
        if self.rule(id).is_none() {
            return Err(CatalogError::UnknownDisabled {
                id: id.to_string(),
                version: self.version.clone(),
            });
        }
        let rules = self.rules.iter().filter(|r| r.id != id).cloned().collect();
        Self::from_rules(self.version.clone(), rules)
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the catalog has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
