//! Versioned catalog definitions and inheritance resolution.

use std::collections::{BTreeMap, HashSet};

use limitless_sql_core::NodeKind;
use serde::Deserialize;

use super::Check;
use crate::error::{CatalogError, Result};
use crate::rule::{Rule, Severity};

/// The on-disk catalog format.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDefinition {
    /// Version loaded when none is requested.
    pub default_version: String,
    /// Rule sets by engine version.
    pub versions: BTreeMap<String, VersionDefinition>,
}

/// The rules introduced by one engine version.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionDefinition {
    /// Version whose effective rules this one starts from.
    #[serde(default)]
    pub inherit_from: Option<String>,
    /// Rules added or overridden by this version.
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,
    /// Inherited rules dropped by this version.
    #[serde(default)]
    pub disable: Vec<String>,
}

/// One rule as written in a catalog definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDefinition {
    pub id: String,
    pub target: NodeKind,
    #[serde(default)]
    pub when: Check,
    pub severity: Severity,
    pub message: String,
    /// Replaces an inherited rule with the same id.
    #[serde(default, rename = "override")]
    pub replaces: bool,
}

impl From<RuleDefinition> for Rule {
    fn from(definition: RuleDefinition) -> Self {
        Self {
            id: definition.id,
            target: definition.target,
            check: definition.when,
            severity: definition.severity,
            message: definition.message,
        }
    }
}

impl CatalogDefinition {
    /// Parses a definition from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` if the text is malformed.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Returns the inheritance chain of `version`, root first.
    ///
    /// # Errors
    ///
    /// Returns an error if a version in the chain is undefined or the chain
    /// is circular.
    pub fn chain(&self, version: &str) -> Result<Vec<&str>> {
        let Some((mut current, mut definition)) = self.versions.get_key_value(version) else {
            return Err(CatalogError::UnknownVersion(version.to_string()));
        };
        let mut chain: Vec<&str> = Vec::new();
        let mut seen = HashSet::new();
        loop {
            if !seen.insert(current.as_str()) {
                let mut cycle: Vec<String> = chain.iter().map(|v| (*v).to_string()).collect();
                cycle.push(current.clone());
                return Err(CatalogError::InheritanceCycle(cycle));
            }
            chain.push(current);
            let Some(parent) = definition.inherit_from.as_deref() else {
                break;
            };
            let Some((key, next)) = self.versions.get_key_value(parent) else {
                return Err(CatalogError::UnknownParent {
                    version: current.clone(),
                    parent: parent.to_string(),
                });
            };
            current = key;
            definition = next;
        }
        chain.reverse();
        Ok(chain)
    }

    /// Resolves the effective rule list of `version`: its ancestors' rules,
    /// root first, then its own, with overrides applied in place and
    /// disabled rules removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the chain is invalid or any rule conflicts.
    pub fn resolve(&self, version: &str) -> Result<Vec<Rule>> {
        let mut rules: Vec<Rule> = Vec::new();
        for name in self.chain(version)? {
            let definition = &self.versions[name];
            let mut declared = HashSet::new();
            for rule in &definition.rules {
                validate(rule)?;
                if !declared.insert(rule.id.as_str()) {
                    return Err(CatalogError::DuplicateRule {
                        id: rule.id.clone(),
                        version: name.to_string(),
                    });
                }
                let existing = rules.iter().position(|r| r.id == rule.id);
                match (existing, rule.replaces) {
                    (Some(index), true) => rules[index] = rule.clone().into(),
                    (None, false) => rules.push(rule.clone().into()),
                    (Some(_), false) => {
                        return Err(CatalogError::DuplicateRule {
                            id: rule.id.clone(),
                            version: name.to_string(),
                        })
                    }
                    (None, true) => {
                        return Err(CatalogError::UnknownOverride {
                            id: rule.id.clone(),
                            version: name.to_string(),
                        })
                    }
                }
            }
            for id in &definition.disable {
                let Some(index) = rules.iter().position(|r| &r.id == id) else {
                    return Err(CatalogError::UnknownDisabled {
                        id: id.clone(),
                        version: name.to_string(),
                    });
                };
                rules.remove(index);
            }
        }
        Ok(rules)
    }
}

fn validate(rule: &RuleDefinition) -> Result<()> {
    let reason = if rule.id.trim().is_empty() {
        "identifier is empty"
    } else if rule.message.trim().is_empty() {
        "message is empty"
    } else if rule.target == NodeKind::Unparsed {
        "unparsed regions are reported by the engine itself"
    } else {
        return Ok(());
    };
    Err(CatalogError::InvalidRule {
        id: rule.id.clone(),
        reason: reason.to_string(),
    })
}
