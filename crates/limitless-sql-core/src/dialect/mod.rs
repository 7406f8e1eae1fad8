//! SQL Dialect support.
//!
//! The dialect decides which lexical forms are recognized. PostgreSQL is the
//! default; the generic dialect accepts ANSI-style scripts with backtick
//! identifiers and `:name` parameters instead of dollar quoting.

mod generic;
mod postgres;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use generic::GenericDialect;
pub use postgres::PostgresDialect;

/// Trait for SQL dialect-specific behavior.
pub trait Dialect: Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the characters that open and close a quoted identifier.
    fn identifier_quotes(&self) -> &'static [char] {
        &['"']
    }

    /// Returns whether `$$..$$` and `$tag$..$tag$` strings and `$1`
    /// parameters are recognized.
    fn supports_dollar_quoting(&self) -> bool {
        false
    }

    /// Returns whether `E'..'` strings with backslash escapes are recognized.
    fn supports_escape_strings(&self) -> bool {
        false
    }

    /// Returns whether `:name` parameters are recognized.
    fn supports_named_parameters(&self) -> bool {
        false
    }
}

/// Selects one of the built-in dialects by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    /// PostgreSQL, the default.
    #[default]
    Postgres,
    /// ANSI-style generic SQL.
    Generic,
}

impl DialectKind {
    /// Returns the dialect implementation for this selector.
    #[must_use]
    pub fn dialect(self) -> &'static dyn Dialect {
        match self {
            Self::Postgres => &PostgresDialect,
            Self::Generic => &GenericDialect,
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dialect().name())
    }
}

impl FromStr for DialectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "generic" | "ansi" => Ok(Self::Generic),
            other => Err(format!("unknown dialect: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_kind_from_str() {
        assert_eq!("PostgreSQL".parse::<DialectKind>(), Ok(DialectKind::Postgres));
        assert_eq!("generic".parse::<DialectKind>(), Ok(DialectKind::Generic));
        assert!("mysql".parse::<DialectKind>().is_err());
    }

    #[test]
    fn test_dialect_kind_display() {
        assert_eq!(DialectKind::default().to_string(), "postgres");
        assert_eq!(DialectKind::Generic.to_string(), "generic");
    }
}
