//! SQL Tokenizer implementation.

use super::{Keyword, Span, Token, TokenKind};
use crate::dialect::{Dialect, PostgresDialect};

/// A lexer that tokenizes SQL input.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// Lexical conventions in effect.
    dialect: &'a dyn Dialect,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input using the PostgreSQL dialect.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_dialect(input, &PostgresDialect)
    }

    /// Creates a new lexer for the given input and dialect.
    #[must_use]
    pub fn with_dialect(input: &'a str, dialect: &'a dyn Dialect) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            dialect,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Advances past `c` if it is the current character.
    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skips whitespace and comments.
    ///
    /// Block comments nest. An unterminated block comment is returned as an
    /// error token covering the comment.
    fn skip_whitespace_and_comments(&mut self) -> Option<Token> {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.start = self.pos;
                self.advance();
                self.advance();
                let mut depth = 1usize;
                while depth > 0 {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            depth -= 1;
                        }
                        Some('/') if self.peek() == Some('*') => {
                            self.advance();
                            depth += 1;
                        }
                        Some(_) => {}
                        None => {
                            return Some(self.error("Unterminated block comment"));
                        }
                    }
                }
                continue;
            }

            return None;
        }
    }

    /// Creates a span from start to current position.
    fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// Creates a token with the current span.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.make_span())
    }

    fn error(&self, message: impl Into<String>) -> Token {
        self.make_token(TokenKind::Error(message.into()))
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];

        if let Some(keyword) = Keyword::from_str(text) {
            self.make_token(TokenKind::Keyword(keyword))
        } else {
            self.make_token(TokenKind::Identifier(text.to_string()))
        }
    }

    /// Scans a quoted identifier (e.g., "column name" or `column name`).
    fn scan_quoted_identifier(&mut self, quote: char) -> Token {
        self.advance();
        let mut name = String::new();

        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    if self.eat(quote) {
                        name.push(quote);
                    } else {
                        break;
                    }
                }
                Some(c) => name.push(c),
                None => return self.error("Unterminated quoted identifier"),
            }
        }

        if name.is_empty() {
            return self.error("Zero-length quoted identifier");
        }
        self.make_token(TokenKind::QuotedIdentifier(name))
    }

    /// Scans a number (integer, decimal or exponent form).
    fn scan_number(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next() != Some('.') {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            let mark = self.pos;
            self.advance();
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            } else {
                self.pos = mark;
            }
        }

        if self.peek().is_some_and(|c| c.is_alphabetic() || c == '_') {
            while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
                self.advance();
            }
            let text = &self.input[self.start..self.pos];
            return self.error(format!("Invalid numeric literal: {text}"));
        }

        self.make_token(TokenKind::Number(
            self.input[self.start..self.pos].to_string(),
        ))
    }

    /// Scans a standard string literal, `''` escaping a quote.
    fn scan_string(&mut self) -> Token {
        self.advance();
        let mut value = String::new();

        loop {
            match self.advance() {
                Some('\'') => {
                    if self.eat('\'') {
                        value.push('\'');
                    } else {
                        break;
                    }
                }
                Some(c) => value.push(c),
                None => return self.error("Unterminated string literal"),
            }
        }

        self.make_token(TokenKind::String(value))
    }

    /// Scans an `E'..'` string with backslash escapes.
    fn scan_escape_string(&mut self) -> Token {
        self.advance();
        self.advance();
        let mut value = String::new();

        loop {
            match self.advance() {
                Some('\'') => {
                    if self.eat('\'') {
                        value.push('\'');
                    } else {
                        break;
                    }
                }
                Some('\\') => match self.advance() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('b') => value.push('\u{8}'),
                    Some('f') => value.push('\u{c}'),
                    Some(c) => value.push(c),
                    None => return self.error("Unterminated string literal"),
                },
                Some(c) => value.push(c),
                None => return self.error("Unterminated string literal"),
            }
        }

        self.make_token(TokenKind::String(value))
    }

    /// Scans a bit string (`B'0101'`) or hex string (`X'1F'`).
    fn scan_bit_string(&mut self, hex: bool) -> Token {
        self.advance();
        self.advance();
        let mut digits = String::new();

        loop {
            match self.advance() {
                Some('\'') => break,
                Some(c) if hex && c.is_ascii_hexdigit() => digits.push(c),
                Some(c @ ('0' | '1')) if !hex => digits.push(c),
                Some(c) if c.is_whitespace() => {}
                Some(c) => {
                    while self.peek().is_some_and(|c| c != '\'') {
                        self.advance();
                    }
                    self.eat('\'');
                    return self.error(format!("Invalid character in bit string literal: {c}"));
                }
                None => return self.error("Unterminated bit string literal"),
            }
        }

        self.make_token(TokenKind::BitString(digits))
    }

    /// Scans what follows a `$`: a positional parameter or a dollar-quoted
    /// string.
    fn scan_dollar(&mut self) -> Token {
        if self.peek().is_some_and(|c| c.is_ascii_digit()) {
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
            return self.make_token(TokenKind::Parameter(
                self.input[self.start..self.pos].to_string(),
            ));
        }

        let tag_start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.advance();
        }
        if self.peek() != Some('$') {
            self.pos = tag_start;
            return self.error("Unexpected character: $");
        }
        self.advance();

        let delimiter = &self.input[self.start..self.pos];
        match self.input[self.pos..].find(delimiter) {
            Some(offset) => {
                let body = self.input[self.pos..self.pos + offset].to_string();
                self.pos += offset + delimiter.len();
                self.make_token(TokenKind::String(body))
            }
            None => {
                self.pos = self.input.len();
                self.error("Unterminated dollar-quoted string")
            }
        }
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        if let Some(error) = self.skip_whitespace_and_comments() {
            return error;
        }
        self.start = self.pos;

        let c = match self.advance() {
            Some(c) => c,
            None => return self.make_token(TokenKind::Eof),
        };

        match c {
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            '[' => self.make_token(TokenKind::LeftBracket),
            ']' => self.make_token(TokenKind::RightBracket),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            '+' => self.make_token(TokenKind::Plus),
            '*' => self.make_token(TokenKind::Star),
            '/' => self.make_token(TokenKind::Slash),
            '%' => self.make_token(TokenKind::Percent),
            '^' => self.make_token(TokenKind::Caret),
            '=' => self.make_token(TokenKind::Eq),
            '?' => self.make_token(TokenKind::Parameter("?".to_string())),

            '-' => {
                if self.eat('>') {
                    if self.eat('>') {
                        self.make_token(TokenKind::Operator("->>".to_string()))
                    } else {
                        self.make_token(TokenKind::Operator("->".to_string()))
                    }
                } else {
                    self.make_token(TokenKind::Minus)
                }
            }
            '.' => {
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.pos = self.start;
                    self.scan_number()
                } else {
                    self.make_token(TokenKind::Dot)
                }
            }
            ':' => {
                if self.eat(':') {
                    self.make_token(TokenKind::DoubleColon)
                } else if self.dialect.supports_named_parameters()
                    && self.peek().is_some_and(|c| c.is_alphabetic() || c == '_')
                {
                    while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
                        self.advance();
                    }
                    self.make_token(TokenKind::Parameter(
                        self.input[self.start..self.pos].to_string(),
                    ))
                } else {
                    self.make_token(TokenKind::Colon)
                }
            }
            '<' => {
                if self.eat('=') {
                    self.make_token(TokenKind::LtEq)
                } else if self.eat('>') {
                    self.make_token(TokenKind::NotEq)
                } else if self.eat('<') {
                    self.make_token(TokenKind::LeftShift)
                } else if self.eat('@') {
                    self.make_token(TokenKind::Operator("<@".to_string()))
                } else {
                    self.make_token(TokenKind::Lt)
                }
            }
            '>' => {
                if self.eat('=') {
                    self.make_token(TokenKind::GtEq)
                } else if self.eat('>') {
                    self.make_token(TokenKind::RightShift)
                } else {
                    self.make_token(TokenKind::Gt)
                }
            }
            '!' => {
                if self.eat('=') {
                    self.make_token(TokenKind::NotEq)
                } else if self.eat('~') {
                    let op = if self.eat('*') { "!~*" } else { "!~" };
                    self.make_token(TokenKind::Operator(op.to_string()))
                } else {
                    self.error("Unexpected character: !")
                }
            }
            '~' => {
                if self.eat('*') {
                    self.make_token(TokenKind::Operator("~*".to_string()))
                } else if self.eat('~') {
                    self.make_token(TokenKind::Operator("~~".to_string()))
                } else {
                    self.make_token(TokenKind::BitNot)
                }
            }
            '@' => {
                let op = if self.eat('>') { "@>" } else { "@" };
                self.make_token(TokenKind::Operator(op.to_string()))
            }
            '#' => {
                let op = if self.eat('>') {
                    if self.eat('>') {
                        "#>>"
                    } else {
                        "#>"
                    }
                } else {
                    "#"
                };
                self.make_token(TokenKind::Operator(op.to_string()))
            }
            '|' => {
                if self.eat('|') {
                    self.make_token(TokenKind::Concat)
                } else {
                    self.make_token(TokenKind::BitOr)
                }
            }
            '&' => {
                if self.eat('&') {
                    self.make_token(TokenKind::Operator("&&".to_string()))
                } else {
                    self.make_token(TokenKind::BitAnd)
                }
            }

            '\'' => {
                self.pos = self.start;
                self.scan_string()
            }

            '$' if self.dialect.supports_dollar_quoting() => self.scan_dollar(),

            'E' | 'e' if self.peek() == Some('\'') && self.dialect.supports_escape_strings() => {
                self.pos = self.start;
                self.scan_escape_string()
            }
            'X' | 'x' if self.peek() == Some('\'') => {
                self.pos = self.start;
                self.scan_bit_string(true)
            }
            'B' | 'b' if self.peek() == Some('\'') => {
                self.pos = self.start;
                self.scan_bit_string(false)
            }

            c if self.dialect.identifier_quotes().contains(&c) => {
                self.pos = self.start;
                self.scan_quoted_identifier(c)
            }

            c if c.is_ascii_digit() => {
                self.pos = self.start;
                self.scan_number()
            }

            c if c.is_alphabetic() || c == '_' => {
                self.pos = self.start;
                self.scan_identifier()
            }

            _ => self.error(format!("Unexpected character: {c}")),
        }
    }

    /// Tokenizes the entire input and returns all tokens.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}
