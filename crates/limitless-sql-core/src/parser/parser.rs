//! SQL Parser implementation: driver, error recovery and token helpers.
//!
//! Statement grammars live in the sibling `query`, `ddl` and `expr` modules,
//! each adding methods to [`Parser`].

use super::error::SyntaxError;
use crate::dialect::{Dialect, PostgresDialect};
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};
use crate::tree::{Node, NodeKind, SyntaxTree};

/// Maximum nesting depth of expressions and queries.
///
/// Sized so that a maximally nested statement parses within a 2 MiB thread
/// stack in an unoptimized build.
pub const MAX_DEPTH: usize = 64;

pub(crate) type PResult<T> = Result<T, SyntaxError>;

/// SQL Parser.
pub struct Parser<'a> {
    input: &'a str,
    lexer: Lexer<'a>,
    current: Token,
    previous: Token,
    lookahead: Option<Token>,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input using the PostgreSQL dialect.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_dialect(input, &PostgresDialect)
    }

    /// Creates a new parser for the given input and dialect.
    #[must_use]
    pub fn with_dialect(input: &'a str, dialect: &'a dyn Dialect) -> Self {
        let mut lexer = Lexer::with_dialect(input, dialect);
        let current = lexer.next_token();
        Self {
            input,
            lexer,
            current,
            previous: Token::new(TokenKind::Eof, Span::new(0, 0)),
            lookahead: None,
            depth: 0,
        }
    }

    /// Parses the whole input as a script.
    ///
    /// Never fails: a malformed statement is recorded as a [`SyntaxError`]
    /// and replaced in the tree by an `unparsed` node covering the region up
    /// to the next `;`, after which parsing resumes.
    #[must_use]
    pub fn parse_script(mut self) -> (SyntaxTree, Vec<SyntaxError>) {
        let mut statements = Vec::new();
        let mut errors = Vec::new();

        loop {
            while self.check(&TokenKind::Semicolon) {
                self.advance();
            }
            if self.current.is_eof() {
                break;
            }

            let start = self.current.span.start;
            self.depth = 0;
            let result = self.parse_statement().and_then(|node| {
                if self.check(&TokenKind::Semicolon) || self.current.is_eof() {
                    Ok(node)
                } else {
                    Err(SyntaxError::unexpected("; or end of input", &self.current))
                }
            });

            match result {
                Ok(node) => statements.push(node),
                Err(error) => {
                    statements.push(self.recover(start, &error));
                    errors.push(error);
                }
            }
        }

        let root = Node::new(NodeKind::Script, Span::new(0, self.input.len()))
            .with_children(statements);
        (SyntaxTree::new(root), errors)
    }

    /// Skips to the next `;` (or end of input) and returns the `unparsed`
    /// node covering the abandoned statement.
    fn recover(&mut self, start: usize, error: &SyntaxError) -> Node {
        let mut end = if self.previous.span.start >= start {
            self.previous.span.end
        } else {
            start
        };
        while !self.check(&TokenKind::Semicolon) && !self.current.is_eof() {
            end = self.current.span.end;
            self.advance();
        }
        Node::new(NodeKind::Unparsed, Span::new(start, end)).with_value(error.message.clone())
    }

    /// Parses a single statement, without its terminating `;`.
    ///
    /// # Errors
    ///
    /// Returns a `SyntaxError` if the input is not a recognized statement.
    pub fn parse_statement(&mut self) -> PResult<Node> {
        match &self.current.kind {
            TokenKind::Keyword(Keyword::Select | Keyword::With | Keyword::Values)
            | TokenKind::LeftParen => self.parse_query_statement(),
            TokenKind::Keyword(Keyword::Insert) => self.parse_insert(self.current.span.start, None),
            TokenKind::Keyword(Keyword::Update) => self.parse_update(self.current.span.start, None),
            TokenKind::Keyword(Keyword::Delete) => self.parse_delete(self.current.span.start, None),
            TokenKind::Keyword(Keyword::Create) => self.parse_create(),
            TokenKind::Keyword(Keyword::Alter) => self.parse_alter(),
            TokenKind::Keyword(Keyword::Drop) => self.parse_drop(),
            TokenKind::Keyword(Keyword::Grant) => self.parse_grant(),
            TokenKind::Keyword(Keyword::Revoke) => self.parse_revoke(),
            TokenKind::Keyword(Keyword::End) => self.parse_transaction(),
            TokenKind::Keyword(Keyword::Set | Keyword::Do) => self.parse_utility(),
            TokenKind::Identifier(_) if self.check_any_word(TRANSACTION_WORDS) => {
                self.parse_transaction()
            }
            TokenKind::Identifier(_) if self.check_any_word(UTILITY_WORDS) => self.parse_utility(),
            _ => Err(SyntaxError::unexpected("statement", &self.current)),
        }
    }

    /// Parses BEGIN/START TRANSACTION/COMMIT/ROLLBACK/END and savepoints.
    fn parse_transaction(&mut self) -> PResult<Node> {
        let start = self.current.span.start;
        let mut value = self.current_word().unwrap_or_default();
        self.advance();
        if value == "START" {
            self.expect_word("TRANSACTION")?;
            value.push_str(" TRANSACTION");
        }
        self.skip_to_statement_end()?;
        Ok(self.finish(NodeKind::Transaction, start).with_value(value))
    }

    /// Parses a utility statement that is recognized but not analyzed.
    fn parse_utility(&mut self) -> PResult<Node> {
        let start = self.current.span.start;
        let value = self.current_word().unwrap_or_default();
        self.advance();
        self.skip_to_statement_end()?;
        Ok(self.finish(NodeKind::OtherStatement, start).with_value(value))
    }

    // --- Node helpers ---

    /// Creates a node spanning from `start` to the end of the last consumed
    /// token.
    pub(crate) fn finish(&self, kind: NodeKind, start: usize) -> Node {
        Node::new(kind, Span::new(start, self.previous.span.end.max(start)))
    }

    /// Returns the source text of a span, whitespace collapsed.
    pub(crate) fn source_text(&self, span: Span) -> String {
        self.input
            .get(span.start..span.end)
            .unwrap_or_default()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Enters a nested expression or query.
    pub(crate) fn enter(&mut self) -> PResult<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(SyntaxError::new(
                format!("Maximum nesting depth of {MAX_DEPTH} exceeded"),
                self.current.span,
            ));
        }
        Ok(())
    }

    /// Leaves a nested expression or query.
    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // --- Token helpers ---

    /// Advances to the next token.
    pub(crate) fn advance(&mut self) {
        let next = match self.lookahead.take() {
            Some(token) => token,
            None => self.lexer.next_token(),
        };
        self.previous = std::mem::replace(&mut self.current, next);
    }

    /// Returns the token after the current one without consuming anything.
    pub(crate) fn peek(&mut self) -> &Token {
        let lexer = &mut self.lexer;
        self.lookahead.get_or_insert_with(|| lexer.next_token())
    }

    /// Returns the end offset of the last consumed token.
    pub(crate) const fn previous_end(&self) -> usize {
        self.previous.span.end
    }

    /// Returns the current token.
    pub(crate) const fn current(&self) -> &Token {
        &self.current
    }

    /// Checks if the current token matches the given kind.
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    pub(crate) fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(&self.current.kind, TokenKind::Keyword(kw) if *kw == keyword)
    }

    /// Checks if the current token is the unquoted word `word`.
    pub(crate) fn check_word(&self, word: &str) -> bool {
        self.current.is_word(word)
    }

    /// Checks if the current token is one of the unquoted words.
    pub(crate) fn check_any_word(&self, words: &[&str]) -> bool {
        words.iter().any(|w| self.current.is_word(w))
    }

    /// Returns the current token as an uppercase word, for identifiers and
    /// keywords.
    pub(crate) fn current_word(&self) -> Option<String> {
        match &self.current.kind {
            TokenKind::Identifier(name) => Some(name.to_ascii_uppercase()),
            TokenKind::Keyword(kw) => Some(kw.as_str().to_string()),
            _ => None,
        }
    }

    /// Consumes the current token if it matches the given kind.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it is the given keyword.
    pub(crate) fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it is the given word.
    pub(crate) fn eat_word(&mut self, word: &str) -> bool {
        if self.check_word(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects the current token to be the given kind.
    pub(crate) fn expect(&mut self, kind: &TokenKind) -> PResult<()> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            let expected = kind.symbol().unwrap_or("token");
            Err(SyntaxError::unexpected(expected, &self.current))
        }
    }

    /// Expects the current token to be the given keyword.
    pub(crate) fn expect_keyword(&mut self, keyword: Keyword) -> PResult<()> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(SyntaxError::unexpected(keyword.as_str(), &self.current))
        }
    }

    /// Expects the current token to be the given word.
    pub(crate) fn expect_word(&mut self, word: &str) -> PResult<()> {
        if self.eat_word(word) {
            Ok(())
        } else {
            Err(SyntaxError::unexpected(word, &self.current))
        }
    }

    /// Expects and returns a normalized identifier: unquoted names are
    /// lowercased, quoted names are kept as written.
    pub(crate) fn expect_identifier(&mut self) -> PResult<String> {
        let name = match &self.current.kind {
            TokenKind::Identifier(name) => name.to_lowercase(),
            TokenKind::QuotedIdentifier(name) => name.clone(),
            _ => return Err(SyntaxError::unexpected("identifier", &self.current)),
        };
        self.advance();
        Ok(name)
    }

    /// Returns true if the current token can start a name.
    pub(crate) fn check_identifier(&self) -> bool {
        matches!(
            self.current.kind,
            TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_)
        )
    }

    /// Parses an identifier into an `identifier` node.
    pub(crate) fn parse_identifier(&mut self) -> PResult<Node> {
        let start = self.current.span.start;
        let name = self.expect_identifier()?;
        Ok(self.finish(NodeKind::Identifier, start).with_value(name))
    }

    /// Parses a dotted name into a `qualified_name` node.
    pub(crate) fn parse_qualified_name(&mut self) -> PResult<Node> {
        let start = self.current.span.start;
        let mut parts = vec![self.expect_identifier()?];
        while self.check(&TokenKind::Dot) {
            self.advance();
            parts.push(self.expect_identifier()?);
        }
        Ok(self
            .finish(NodeKind::QualifiedName, start)
            .with_value(parts.join(".")))
    }

    /// Parses `( name, ... )` into a `column_list` node.
    pub(crate) fn parse_column_list(&mut self) -> PResult<Node> {
        let start = self.current.span.start;
        self.expect(&TokenKind::LeftParen)?;
        let mut columns = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                columns.push(self.parse_identifier()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(self
            .finish(NodeKind::ColumnList, start)
            .with_children(columns))
    }

    /// Consumes a parenthesized group, including nested parentheses, without
    /// building nodes. A `;` before the closing `)` ends the statement.
    pub(crate) fn skip_parenthesized(&mut self) -> PResult<()> {
        self.expect(&TokenKind::LeftParen)?;
        let mut depth = 1usize;
        while depth > 0 {
            match &self.current.kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth -= 1,
                TokenKind::Eof | TokenKind::Semicolon | TokenKind::Error(_) => {
                    return Err(SyntaxError::unexpected(")", &self.current));
                }
                _ => {}
            }
            self.advance();
        }
        Ok(())
    }

    /// Consumes everything up to the end of the statement.
    pub(crate) fn skip_to_statement_end(&mut self) -> PResult<()> {
        while !self.check(&TokenKind::Semicolon) && !self.current.is_eof() {
            if matches!(self.current.kind, TokenKind::Error(_)) {
                return Err(SyntaxError::unexpected("token", &self.current));
            }
            self.advance();
        }
        Ok(())
    }

    /// Consumes the longest run of words that begins one of `phrases` and
    /// returns it joined by single spaces.
    pub(crate) fn leading_words(&mut self, phrases: &[&str]) -> String {
        let mut matched = String::new();
        while let Some(word) = self.current_word() {
            let candidate = if matched.is_empty() {
                word
            } else {
                format!("{matched} {word}")
            };
            let extends = phrases.iter().any(|phrase| {
                *phrase == candidate
                    || phrase
                        .strip_prefix(candidate.as_str())
                        .is_some_and(|rest| rest.starts_with(' '))
            });
            if !extends {
                break;
            }
            matched = candidate;
            self.advance();
        }
        matched
    }
}

/// Words that start transaction control statements.
const TRANSACTION_WORDS: &[&str] = &[
    "BEGIN", "START", "COMMIT", "ROLLBACK", "ABORT", "SAVEPOINT", "RELEASE",
];

/// Words that start utility statements which are recognized but opaque.
const UTILITY_WORDS: &[&str] = &[
    "ANALYZE", "CALL", "CHECKPOINT", "CLUSTER", "COMMENT", "COPY", "DISCARD", "EXPLAIN",
    "IMPORT", "LISTEN", "LOCK", "NOTIFY", "REASSIGN", "REFRESH", "REINDEX", "RESET",
    "SECURITY", "SHOW", "TRUNCATE", "UNLISTEN", "VACUUM",
];
