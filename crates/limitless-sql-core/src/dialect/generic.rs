//! Generic SQL dialect.

use super::Dialect;

/// A generic SQL dialect using ANSI SQL standards.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn identifier_quotes(&self) -> &'static [char] {
        &['"', '`']
    }

    fn supports_named_parameters(&self) -> bool {
        true
    }
}
