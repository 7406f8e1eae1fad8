//! Parser error types.

use serde::Serialize;

use crate::lexer::{Span, Token, TokenKind};

/// A syntax error at a location in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxError {
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub span: Span,
    /// What the parser expected, if applicable.
    #[serde(skip)]
    pub expected: Option<String>,
    /// Description of the token found instead.
    #[serde(skip)]
    pub found: Option<String>,
}

impl SyntaxError {
    /// Creates a new syntax error.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            expected: None,
            found: None,
        }
    }

    /// Creates an "unexpected token" error. Lexer error tokens keep their own
    /// message.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: &Token) -> Self {
        let expected: String = expected.into();
        match &found.kind {
            TokenKind::Error(message) => Self {
                message: message.clone(),
                span: found.span,
                expected: Some(expected),
                found: None,
            },
            TokenKind::Eof => Self::unexpected_eof(expected, found.span),
            _ => {
                let description = found.describe();
                Self {
                    message: format!("Unexpected token: expected {expected}, found {description}"),
                    span: found.span,
                    expected: Some(expected),
                    found: Some(description),
                }
            }
        }
    }

    /// Creates an "unexpected end of input" error.
    #[must_use]
    pub fn unexpected_eof(expected: impl Into<String>, span: Span) -> Self {
        let expected: String = expected.into();
        Self {
            message: format!("Unexpected end of input: expected {expected}"),
            span,
            expected: Some(expected),
            found: Some("end of input".to_string()),
        }
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at position {}..{}",
            self.message, self.span.start, self.span.end
        )
    }
}

impl std::error::Error for SyntaxError {}
