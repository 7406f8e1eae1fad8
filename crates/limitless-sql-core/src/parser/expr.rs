//! Expressions and data types.

use super::error::SyntaxError;
use super::parser::{PResult, Parser};
use super::pratt::{
    binary_operator, infix_binding_power, postfix_binding_power, prefix_binding_power,
    unary_operator,
};
use crate::lexer::{Keyword, TokenKind};
use crate::tree::{Node, NodeKind};

/// Functions whose arguments are separated by keywords (`FROM`, `FOR`, `IN`).
const KEYWORD_ARG_FUNCTIONS: &[&str] = &["extract", "substring", "position", "trim", "overlay"];

/// First words of multi-word type names.
const MULTI_WORD_TYPES: &[&str] = &["double", "character", "char", "bit", "timestamp", "time", "national"];

impl Parser<'_> {
    /// Parses a full expression.
    pub(crate) fn parse_expr(&mut self) -> PResult<Node> {
        self.parse_expression(0)
    }

    /// Parses a comma-separated list of expressions.
    pub(crate) fn parse_expr_list(&mut self) -> PResult<Vec<Node>> {
        let mut items = vec![self.parse_expr()?];
        while self.eat(&TokenKind::Comma) {
            items.push(self.parse_expr()?);
        }
        Ok(items)
    }

    /// Parses an expression using Pratt parsing.
    pub(crate) fn parse_expression(&mut self, min_bp: u8) -> PResult<Node> {
        self.enter()?;
        let mut lhs = self.parse_prefix()?;

        loop {
            if let Some(bp) = postfix_binding_power(&self.current().kind) {
                if bp < min_bp {
                    break;
                }
                lhs = self.parse_postfix(lhs)?;
                continue;
            }

            let Some((l_bp, r_bp)) = infix_binding_power(&self.current().kind) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }

            let start = lhs.span.start;
            match &self.current().kind {
                TokenKind::Keyword(Keyword::Is) => {
                    lhs = self.parse_is_test(lhs)?;
                }
                TokenKind::Keyword(Keyword::Not) => {
                    let negatable = matches!(
                        self.peek().kind,
                        TokenKind::Keyword(
                            Keyword::In | Keyword::Like | Keyword::ILike | Keyword::Between
                        )
                    ) || self.peek().is_word("SIMILAR");
                    if !negatable {
                        break;
                    }
                    self.advance();
                    lhs = self.parse_predicate(lhs, start, r_bp, true)?;
                }
                TokenKind::Keyword(Keyword::In | Keyword::Between | Keyword::Like | Keyword::ILike) => {
                    lhs = self.parse_predicate(lhs, start, r_bp, false)?;
                }
                _ => {
                    let Some(op) = binary_operator(&self.current().kind) else {
                        break;
                    };
                    self.advance();
                    let rhs = self.parse_expression(r_bp)?;
                    lhs = self
                        .finish(NodeKind::BinaryExpr, start)
                        .with_value(op)
                        .with_children(vec![lhs, rhs]);
                }
            }
        }

        self.leave();
        Ok(lhs)
    }

    /// Parses `IN`, `BETWEEN`, `LIKE`/`ILIKE` and `SIMILAR TO`, after an
    /// optional `NOT` has been consumed.
    fn parse_predicate(&mut self, lhs: Node, start: usize, r_bp: u8, negated: bool) -> PResult<Node> {
        let prefix = if negated { "NOT " } else { "" };
        if self.eat_keyword(Keyword::In) {
            let paren = self.current().span.start;
            self.expect(&TokenKind::LeftParen)?;
            let mut children = vec![lhs];
            if self.check_query_start() {
                let query = self.parse_query()?;
                self.expect(&TokenKind::RightParen)?;
                children.push(self.finish(NodeKind::Subquery, paren).with_children(vec![query]));
            } else {
                children.extend(self.parse_expr_list()?);
                self.expect(&TokenKind::RightParen)?;
            }
            return Ok(self
                .finish(NodeKind::InList, start)
                .with_value(format!("{prefix}IN"))
                .with_children(children));
        }
        if self.eat_keyword(Keyword::Between) {
            self.eat_word("SYMMETRIC");
            let low = self.parse_expression(r_bp)?;
            self.expect_keyword(Keyword::And)?;
            let high = self.parse_expression(r_bp)?;
            return Ok(self
                .finish(NodeKind::Between, start)
                .with_value(format!("{prefix}BETWEEN"))
                .with_children(vec![lhs, low, high]));
        }
        let op = if self.eat_word("SIMILAR") {
            self.expect_keyword(Keyword::To)?;
            "SIMILAR TO".to_string()
        } else {
            let op = binary_operator(&self.current().kind)
                .ok_or_else(|| SyntaxError::unexpected("IN, BETWEEN or LIKE", self.current()))?;
            self.advance();
            op
        };
        let mut children = vec![lhs, self.parse_expression(r_bp)?];
        if self.eat_word("ESCAPE") {
            children.push(self.parse_expression(r_bp)?);
        }
        Ok(self
            .finish(NodeKind::BinaryExpr, start)
            .with_value(format!("{prefix}{op}"))
            .with_children(children))
    }

    /// Parses `IS [NOT] {NULL | TRUE | FALSE | UNKNOWN | DISTINCT FROM expr}`.
    fn parse_is_test(&mut self, lhs: Node) -> PResult<Node> {
        let start = lhs.span.start;
        self.expect_keyword(Keyword::Is)?;
        let mut value = String::from("IS ");
        if self.eat_keyword(Keyword::Not) {
            value.push_str("NOT ");
        }
        let mut children = vec![lhs];
        if self.eat_keyword(Keyword::Null) {
            value.push_str("NULL");
        } else if self.eat_keyword(Keyword::True) {
            value.push_str("TRUE");
        } else if self.eat_keyword(Keyword::False) {
            value.push_str("FALSE");
        } else if self.eat_word("UNKNOWN") {
            value.push_str("UNKNOWN");
        } else if self.eat_keyword(Keyword::Distinct) {
            self.expect_keyword(Keyword::From)?;
            value.push_str("DISTINCT FROM");
            children.push(self.parse_expression(6)?);
        } else {
            return Err(SyntaxError::unexpected(
                "NULL, TRUE, FALSE, UNKNOWN or DISTINCT FROM",
                self.current(),
            ));
        }
        Ok(self
            .finish(NodeKind::IsTest, start)
            .with_value(value)
            .with_children(children))
    }

    /// Parses a postfix operator applied to `lhs`.
    fn parse_postfix(&mut self, lhs: Node) -> PResult<Node> {
        let start = lhs.span.start;
        if self.eat(&TokenKind::DoubleColon) {
            let data_type = self.parse_data_type()?;
            return Ok(self
                .finish(NodeKind::Cast, start)
                .with_value("::")
                .with_children(vec![lhs, data_type]));
        }
        if self.eat_keyword(Keyword::Collate) {
            let collation = self.parse_qualified_name()?;
            return Ok(self
                .finish(NodeKind::Collate, start)
                .with_children(vec![lhs, collation]));
        }
        self.expect(&TokenKind::LeftBracket)?;
        let mut children = vec![lhs];
        if !self.check(&TokenKind::Colon) {
            children.push(self.parse_expr()?);
        }
        if self.eat(&TokenKind::Colon) && !self.check(&TokenKind::RightBracket) {
            children.push(self.parse_expr()?);
        }
        self.expect(&TokenKind::RightBracket)?;
        Ok(self.finish(NodeKind::Subscript, start).with_children(children))
    }

    /// Parses a prefix expression.
    fn parse_prefix(&mut self) -> PResult<Node> {
        if let (Some(op), Some(bp)) = (
            unary_operator(&self.current().kind),
            prefix_binding_power(&self.current().kind),
        ) {
            let start = self.current().span.start;
            self.advance();
            let operand = self.parse_expression(bp)?;
            return Ok(self
                .finish(NodeKind::UnaryExpr, start)
                .with_value(op)
                .with_children(vec![operand]));
        }

        self.parse_primary()
    }

    /// Parses a primary expression.
    fn parse_primary(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        if let Some(kw @ (Keyword::All | Keyword::Left | Keyword::Right)) = self.current().as_keyword() {
            if matches!(self.peek().kind, TokenKind::LeftParen) {
                self.advance();
                return self.parse_function_call(kw.as_str().to_ascii_lowercase(), start);
            }
        }
        match &self.current().kind {
            TokenKind::Number(text) | TokenKind::String(text) | TokenKind::BitString(text) => {
                let value = text.clone();
                self.advance();
                Ok(self.finish(NodeKind::Literal, start).with_value(value))
            }
            TokenKind::Keyword(kw @ (Keyword::True | Keyword::False | Keyword::Null | Keyword::Default)) => {
                let value = kw.as_str();
                self.advance();
                Ok(self.finish(NodeKind::Literal, start).with_value(value))
            }
            TokenKind::Parameter(name) => {
                let value = name.clone();
                self.advance();
                Ok(self.finish(NodeKind::Parameter, start).with_value(value))
            }
            TokenKind::Star => {
                self.advance();
                Ok(self.finish(NodeKind::Wildcard, start).with_value("*"))
            }
            TokenKind::LeftParen => self.parse_parenthesized(),
            TokenKind::Keyword(Keyword::Case) => self.parse_case(),
            TokenKind::Keyword(Keyword::Cast) => self.parse_cast_call(),
            TokenKind::Keyword(Keyword::Exists) => {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                let query = self.parse_query()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(self.finish(NodeKind::Exists, start).with_children(vec![query]))
            }
            TokenKind::Identifier(_) if self.check_word("ARRAY") => self.parse_array(),
            TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_) => self.parse_name_expression(),
            _ => Err(SyntaxError::unexpected("expression", self.current())),
        }
    }

    /// Parses `( expr )`, a row constructor or a scalar subquery.
    fn parse_parenthesized(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        self.expect(&TokenKind::LeftParen)?;
        if self.check_query_start() {
            let query = self.parse_query()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(self.finish(NodeKind::Subquery, start).with_children(vec![query]));
        }
        let first = self.parse_expr()?;
        if self.check(&TokenKind::Comma) {
            let mut items = vec![first];
            while self.eat(&TokenKind::Comma) {
                items.push(self.parse_expr()?);
            }
            self.expect(&TokenKind::RightParen)?;
            return Ok(self.finish(NodeKind::Row, start).with_children(items));
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(first)
    }

    /// Parses a column reference, wildcard, function call or typed literal.
    fn parse_name_expression(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        let mut parts = vec![self.expect_identifier()?];

        if matches!(self.current().kind, TokenKind::String(_)) && parts.len() == 1 {
            let data_type = self
                .finish(NodeKind::DataType, start)
                .with_value(parts.remove(0));
            let literal = self.parse_primary()?;
            return Ok(self
                .finish(NodeKind::Cast, start)
                .with_value("literal")
                .with_children(vec![data_type, literal]));
        }

        while self.eat(&TokenKind::Dot) {
            if self.eat(&TokenKind::Star) {
                parts.push("*".to_string());
                return Ok(self
                    .finish(NodeKind::Wildcard, start)
                    .with_value(parts.join(".")));
            }
            parts.push(self.expect_identifier()?);
        }

        let name = parts.join(".");
        if self.check(&TokenKind::LeftParen) {
            return self.parse_function_call(name, start);
        }
        Ok(self.finish(NodeKind::ColumnRef, start).with_value(name))
    }

    /// Parses the argument list and trailing clauses of a function call.
    fn parse_function_call(&mut self, name: String, start: usize) -> PResult<Node> {
        self.expect(&TokenKind::LeftParen)?;
        let mut children = Vec::new();

        if KEYWORD_ARG_FUNCTIONS.contains(&name.as_str()) {
            while !self.check(&TokenKind::RightParen) {
                if self.eat(&TokenKind::Comma)
                    || self.eat_keyword(Keyword::From)
                    || self.eat_keyword(Keyword::For)
                    || self.eat_keyword(Keyword::In)
                    || self.eat_word("PLACING")
                    || self.eat_word("BOTH")
                    || self.eat_word("LEADING")
                    || self.eat_word("TRAILING")
                {
                    continue;
                }
                children.push(self.parse_expression(6)?);
            }
        } else if self.check(&TokenKind::Star) {
            let star = self.current().span.start;
            self.advance();
            children.push(self.finish(NodeKind::Wildcard, star).with_value("*"));
        } else if !self.check(&TokenKind::RightParen) {
            if self.check_keyword(Keyword::Distinct) {
                let distinct = self.current().span.start;
                self.advance();
                children.push(self.finish(NodeKind::Distinct, distinct));
            } else {
                self.eat_keyword(Keyword::All);
            }
            children.extend(self.parse_expr_list()?);
            if self.check_keyword(Keyword::Order) {
                children.push(self.parse_order_by()?);
            }
        }
        self.expect(&TokenKind::RightParen)?;

        if self.eat_word("WITHIN") {
            self.expect_keyword(Keyword::Group)?;
            self.expect(&TokenKind::LeftParen)?;
            children.push(self.parse_order_by()?);
            self.expect(&TokenKind::RightParen)?;
        }
        if self.check_word("FILTER") {
            let filter = self.current().span.start;
            self.advance();
            self.expect(&TokenKind::LeftParen)?;
            self.expect_keyword(Keyword::Where)?;
            let condition = self.parse_expr()?;
            self.expect(&TokenKind::RightParen)?;
            children.push(self.finish(NodeKind::Where, filter).with_children(vec![condition]));
        }
        if self.check_word("OVER") {
            let over = self.current().span.start;
            self.advance();
            if self.check(&TokenKind::LeftParen) {
                let spec = self.parse_window_spec()?;
                children.push(self.finish(NodeKind::Window, over).with_children(spec));
            } else {
                let window = self.expect_identifier()?;
                children.push(self.finish(NodeKind::Window, over).with_value(window));
            }
        }

        Ok(self
            .finish(NodeKind::FunctionCall, start)
            .with_value(name)
            .with_children(children))
    }

    /// Parses `CAST(expr AS type)`.
    fn parse_cast_call(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        self.expect_keyword(Keyword::Cast)?;
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.parse_expr()?;
        self.expect_keyword(Keyword::As)?;
        let data_type = self.parse_data_type()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(self
            .finish(NodeKind::Cast, start)
            .with_value("CAST")
            .with_children(vec![expr, data_type]))
    }

    /// Parses a CASE expression.
    fn parse_case(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        self.expect_keyword(Keyword::Case)?;
        let mut children = Vec::new();

        if !self.check_keyword(Keyword::When) {
            children.push(self.parse_expr()?);
        }

        while self.check_keyword(Keyword::When) {
            let when = self.current().span.start;
            self.advance();
            let condition = self.parse_expr()?;
            self.expect_keyword(Keyword::Then)?;
            let result = self.parse_expr()?;
            children.push(
                self.finish(NodeKind::WhenClause, when)
                    .with_children(vec![condition, result]),
            );
        }
        if children.iter().all(|c| c.kind != NodeKind::WhenClause) {
            return Err(SyntaxError::unexpected("WHEN", self.current()));
        }

        if self.eat_keyword(Keyword::Else) {
            children.push(self.parse_expr()?);
        }
        self.expect_keyword(Keyword::End)?;

        Ok(self.finish(NodeKind::Case, start).with_children(children))
    }

    /// Parses `ARRAY[...]` or `ARRAY(subquery)`.
    fn parse_array(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        self.expect_word("ARRAY")?;
        let mut children = Vec::new();
        if self.eat(&TokenKind::LeftParen) {
            let query = self.parse_query()?;
            self.expect(&TokenKind::RightParen)?;
            children.push(query);
        } else {
            self.expect(&TokenKind::LeftBracket)?;
            if !self.check(&TokenKind::RightBracket) {
                children.extend(self.parse_expr_list()?);
            }
            self.expect(&TokenKind::RightBracket)?;
        }
        Ok(self.finish(NodeKind::Array, start).with_children(children))
    }

    /// Parses a signed numeric literal, folding the sign into the value.
    pub(crate) fn parse_signed_number(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        let negative = if self.eat(&TokenKind::Minus) {
            true
        } else {
            self.eat(&TokenKind::Plus);
            false
        };
        let TokenKind::Number(text) = &self.current().kind else {
            return Err(SyntaxError::unexpected("number", self.current()));
        };
        let value = if negative {
            format!("-{text}")
        } else {
            text.clone()
        };
        self.advance();
        Ok(self.finish(NodeKind::Literal, start).with_value(value))
    }

    /// Parses a data type into a `data_type` node whose value is the
    /// lowercased type name without modifiers, with `[]` per array dimension.
    pub(crate) fn parse_data_type(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        let mut name = match &self.current().kind {
            TokenKind::Identifier(word) => word.to_lowercase(),
            TokenKind::QuotedIdentifier(word) => word.clone(),
            _ => return Err(SyntaxError::unexpected("data type", self.current())),
        };
        self.advance();

        if MULTI_WORD_TYPES.contains(&name.as_str()) {
            self.extend_type_name(&mut name)?;
        } else {
            while self.eat(&TokenKind::Dot) {
                name.push('.');
                name.push_str(&self.expect_identifier()?);
            }
        }

        if self.check(&TokenKind::LeftParen) {
            self.skip_parenthesized()?;
        }
        if name == "timestamp" || name == "time" {
            self.parse_time_zone(&mut name)?;
        }
        if name == "interval" {
            while self.check_any_word(&["YEAR", "MONTH", "DAY", "HOUR", "MINUTE", "SECOND"])
                || self.check_keyword(Keyword::To)
            {
                self.advance();
            }
        }

        loop {
            if self.check(&TokenKind::LeftBracket) {
                self.advance();
                if matches!(self.current().kind, TokenKind::Number(_)) {
                    self.advance();
                }
                self.expect(&TokenKind::RightBracket)?;
                name.push_str("[]");
            } else if self.eat_word("ARRAY") {
                if self.eat(&TokenKind::LeftBracket) {
                    if matches!(self.current().kind, TokenKind::Number(_)) {
                        self.advance();
                    }
                    self.expect(&TokenKind::RightBracket)?;
                }
                name.push_str("[]");
            } else {
                break;
            }
        }

        Ok(self.finish(NodeKind::DataType, start).with_value(name))
    }

    /// Completes multi-word type names such as `double precision` and
    /// `character varying`.
    fn extend_type_name(&mut self, name: &mut String) -> PResult<()> {
        match name.as_str() {
            "double" => {
                self.expect_word("PRECISION")?;
                name.push_str(" precision");
            }
            "national" => {
                let next = self.expect_identifier()?;
                name.push(' ');
                name.push_str(&next);
                if self.eat_word("VARYING") {
                    name.push_str(" varying");
                }
            }
            "character" | "char" | "bit" => {
                if self.eat_word("VARYING") {
                    name.push_str(" varying");
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Parses an optional `WITH TIME ZONE` / `WITHOUT TIME ZONE` suffix.
    fn parse_time_zone(&mut self, name: &mut String) -> PResult<()> {
        let with = self.check_keyword(Keyword::With) && self.peek().is_word("TIME");
        if with || self.check_word("WITHOUT") {
            self.advance();
            self.expect_word("TIME")?;
            self.expect_word("ZONE")?;
            name.push_str(if with {
                " with time zone"
            } else {
                " without time zone"
            });
        }
        Ok(())
    }

    /// Returns true if the current token starts a query.
    pub(crate) fn check_query_start(&self) -> bool {
        matches!(
            self.current().kind,
            TokenKind::Keyword(Keyword::Select | Keyword::With | Keyword::Values)
        )
    }
}
