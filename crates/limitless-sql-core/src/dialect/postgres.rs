//! PostgreSQL dialect.

use super::Dialect;

/// PostgreSQL lexical conventions: dollar quoting, `E'..'` strings and
/// positional `$n` parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresDialect;

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn supports_dollar_quoting(&self) -> bool {
        true
    }

    fn supports_escape_strings(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_dialect() {
        let dialect = PostgresDialect;
        assert_eq!(dialect.name(), "postgres");
        assert_eq!(dialect.identifier_quotes(), &['"']);
        assert!(dialect.supports_dollar_quoting());
        assert!(dialect.supports_escape_strings());
        assert!(!dialect.supports_named_parameters());
    }
}
