//! Queries and data manipulation statements.

use super::error::SyntaxError;
use super::parser::{PResult, Parser};
use crate::lexer::{Keyword, TokenKind};
use crate::tree::{Node, NodeKind};

/// Words that open a part of a window specification rather than name an
/// existing window.
const WINDOW_SPEC_WORDS: &[&str] = &["PARTITION", "ROWS", "RANGE", "GROUPS"];

impl Parser<'_> {
    /// Parses a statement starting with SELECT, VALUES, WITH or `(`.
    /// A WITH clause may also introduce INSERT, UPDATE or DELETE.
    pub(crate) fn parse_query_statement(&mut self) -> PResult<Node> {
        if !self.check_keyword(Keyword::With) {
            return self.parse_query();
        }
        let start = self.current().span.start;
        let with = self.parse_with()?;
        match self.current().as_keyword() {
            Some(Keyword::Insert) => self.parse_insert(start, Some(with)),
            Some(Keyword::Update) => self.parse_update(start, Some(with)),
            Some(Keyword::Delete) => self.parse_delete(start, Some(with)),
            _ => self.parse_query_after_with(start, Some(with)),
        }
    }

    /// Parses a query: an optional WITH clause, one or more SELECT/VALUES
    /// terms joined by set operators, then ORDER BY, LIMIT, OFFSET, FETCH
    /// and locking clauses. The result is always a `select` node.
    pub(crate) fn parse_query(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        let with = if self.check_keyword(Keyword::With) {
            Some(self.parse_with()?)
        } else {
            None
        };
        self.parse_query_after_with(start, with)
    }

    fn parse_query_after_with(&mut self, start: usize, with: Option<Node>) -> PResult<Node> {
        self.enter()?;
        let mut body = self.parse_query_term()?;

        let combined = self.check_set_operator();
        while self.check_set_operator() {
            let mut op = self.current_word().unwrap_or_default();
            self.advance();
            if self.eat_keyword(Keyword::All) {
                op.push_str(" ALL");
            } else if self.eat_keyword(Keyword::Distinct) {
                op.push_str(" DISTINCT");
            }
            let right = self.parse_query_term()?;
            let left_start = body.span.start;
            body = self
                .finish(NodeKind::SetOperation, left_start)
                .with_value(op)
                .with_children(vec![body, right]);
        }

        let mut node = if combined {
            let mut children: Vec<Node> = with.into_iter().collect();
            children.push(body);
            self.finish(NodeKind::Select, start).with_children(children)
        } else {
            if let Some(with) = with {
                body.children.insert(0, with);
            }
            body.span.start = start;
            body
        };

        self.parse_query_tail(&mut node.children)?;
        node.span.end = self.previous_end().max(node.span.end);
        self.leave();
        Ok(node)
    }

    fn check_set_operator(&self) -> bool {
        self.check_keyword(Keyword::Union)
            || self.check_keyword(Keyword::Intersect)
            || self.check_keyword(Keyword::Except)
    }

    /// Parses one operand of a set operation.
    fn parse_query_term(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        match self.current().as_keyword() {
            Some(Keyword::Select) => self.parse_select_core(),
            Some(Keyword::Values) => {
                let values = self.parse_values()?;
                Ok(self.finish(NodeKind::Select, start).with_children(vec![values]))
            }
            _ if self.check(&TokenKind::LeftParen) => {
                self.advance();
                let query = self.parse_query()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(query)
            }
            _ => Err(SyntaxError::unexpected("SELECT or VALUES", self.current())),
        }
    }

    /// Parses SELECT through WINDOW.
    fn parse_select_core(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        self.expect_keyword(Keyword::Select)?;
        let mut children = Vec::new();

        if self.check_keyword(Keyword::Distinct) {
            let distinct = self.current().span.start;
            self.advance();
            let mut node_children = Vec::new();
            let value = if self.eat_keyword(Keyword::On) {
                self.expect(&TokenKind::LeftParen)?;
                node_children = self.parse_expr_list()?;
                self.expect(&TokenKind::RightParen)?;
                "DISTINCT ON"
            } else {
                "DISTINCT"
            };
            children.push(
                self.finish(NodeKind::Distinct, distinct)
                    .with_value(value)
                    .with_children(node_children),
            );
        } else {
            self.eat_keyword(Keyword::All);
        }

        children.push(self.parse_select_list()?);

        if self.check_keyword(Keyword::Into) {
            let into = self.current().span.start;
            self.advance();
            self.eat_word("TEMPORARY");
            self.eat_word("TEMP");
            self.eat_word("UNLOGGED");
            self.eat_keyword(Keyword::Table);
            let target = self.parse_qualified_name()?;
            children.push(
                self.finish(NodeKind::AsQuery, into)
                    .with_value("INTO")
                    .with_children(vec![target]),
            );
        }

        if self.check_keyword(Keyword::From) {
            let from = self.current().span.start;
            self.advance();
            let items = self.parse_from_items()?;
            children.push(self.finish(NodeKind::From, from).with_children(items));
        }

        if let Some(clause) = self.parse_where()? {
            children.push(clause);
        }

        if self.check_keyword(Keyword::Group) {
            let group = self.current().span.start;
            self.advance();
            self.expect_keyword(Keyword::By)?;
            if !self.eat_keyword(Keyword::All) {
                self.eat_keyword(Keyword::Distinct);
            }
            let items = self.parse_expr_list()?;
            children.push(self.finish(NodeKind::GroupBy, group).with_children(items));
        }

        if self.check_keyword(Keyword::Having) {
            let having = self.current().span.start;
            self.advance();
            let condition = self.parse_expr()?;
            children.push(self.finish(NodeKind::Having, having).with_children(vec![condition]));
        }

        if self.check_word("WINDOW") {
            let window = self.current().span.start;
            self.advance();
            let mut definitions = Vec::new();
            loop {
                let definition = self.current().span.start;
                let name = self.expect_identifier()?;
                self.expect_keyword(Keyword::As)?;
                let spec = self.parse_window_spec()?;
                definitions.push(
                    self.finish(NodeKind::WindowDef, definition)
                        .with_value(name)
                        .with_children(spec),
                );
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
            children.push(self.finish(NodeKind::Window, window).with_children(definitions));
        }

        Ok(self.finish(NodeKind::Select, start).with_children(children))
    }

    /// Parses the select list into a `select_list` node.
    fn parse_select_list(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        let mut items = Vec::new();
        loop {
            let item = self.parse_expr()?;
            items.push(self.parse_optional_alias(item)?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(self.finish(NodeKind::SelectList, start).with_children(items))
    }

    /// Wraps `node` in an `alias` node if `[AS] name` follows.
    fn parse_optional_alias(&mut self, node: Node) -> PResult<Node> {
        let explicit = self.eat_keyword(Keyword::As);
        if !explicit && !self.check_alias_candidate() {
            return Ok(node);
        }
        let start = node.span.start;
        let name = self.expect_identifier()?;
        Ok(self
            .finish(NodeKind::Alias, start)
            .with_value(name)
            .with_children(vec![node]))
    }

    /// An implicit alias is an identifier that does not begin a clause.
    fn check_alias_candidate(&self) -> bool {
        match &self.current().kind {
            TokenKind::QuotedIdentifier(_) => true,
            TokenKind::Identifier(_) => !self.check_any_word(CLAUSE_WORDS),
            _ => false,
        }
    }

    /// Parses comma-separated FROM items, each with its joins.
    fn parse_from_items(&mut self) -> PResult<Vec<Node>> {
        let mut items = vec![self.parse_joined_table()?];
        while self.eat(&TokenKind::Comma) {
            items.push(self.parse_joined_table()?);
        }
        Ok(items)
    }

    /// Parses a table reference followed by any number of joins.
    fn parse_joined_table(&mut self) -> PResult<Node> {
        let mut left = self.parse_table_ref()?;

        while let Some(join_type) = self.parse_join_type()? {
            let start = left.span.start;
            let right = self.parse_table_ref()?;
            let mut children = vec![left, right];

            if self.check_keyword(Keyword::On) {
                let on = self.current().span.start;
                self.advance();
                let condition = self.parse_expr()?;
                children.push(
                    self.finish(NodeKind::JoinCondition, on)
                        .with_value("ON")
                        .with_children(vec![condition]),
                );
            } else if self.check_keyword(Keyword::Using) {
                let using = self.current().span.start;
                self.advance();
                let columns = self.parse_column_list()?;
                children.push(
                    self.finish(NodeKind::JoinCondition, using)
                        .with_value("USING")
                        .with_children(vec![columns]),
                );
            }

            left = self
                .finish(NodeKind::Join, start)
                .with_value(join_type)
                .with_children(children);
        }

        Ok(left)
    }

    /// Consumes a join operator and returns its normalized spelling.
    fn parse_join_type(&mut self) -> PResult<Option<String>> {
        let natural = self.eat_keyword(Keyword::Natural);
        let kind = match self.current().as_keyword() {
            Some(Keyword::Join) => {
                self.advance();
                return Ok(Some(if natural { "NATURAL JOIN" } else { "JOIN" }.to_string()));
            }
            Some(kw @ (Keyword::Inner | Keyword::Cross)) => kw.as_str(),
            Some(kw @ (Keyword::Left | Keyword::Right | Keyword::Full)) => {
                self.advance();
                self.eat_keyword(Keyword::Outer);
                self.expect_keyword(Keyword::Join)?;
                let prefix = if natural { "NATURAL " } else { "" };
                return Ok(Some(format!("{prefix}{} JOIN", kw.as_str())));
            }
            _ if natural => return Err(SyntaxError::unexpected("JOIN", self.current())),
            _ => return Ok(None),
        };
        self.advance();
        self.expect_keyword(Keyword::Join)?;
        Ok(Some(format!("{kind} JOIN")))
    }

    /// Parses a single FROM item.
    fn parse_table_ref(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        self.eat_word("LATERAL");

        let item = if self.check(&TokenKind::LeftParen) {
            self.advance();
            if self.check_query_start() || self.check(&TokenKind::LeftParen) {
                let query = self.parse_query()?;
                self.expect(&TokenKind::RightParen)?;
                self.finish(NodeKind::Subquery, start).with_children(vec![query])
            } else {
                let inner = self.parse_joined_table()?;
                self.expect(&TokenKind::RightParen)?;
                inner
            }
        } else {
            let only = self.check_keyword(Keyword::Only);
            if only {
                self.advance();
            }
            let name = self.parse_qualified_name()?;
            if self.check(&TokenKind::LeftParen) {
                let function = name.value.clone().unwrap_or_default();
                self.parse_table_function(function, name.span.start)?
            } else {
                self.eat(&TokenKind::Star);
                name
            }
        };

        let aliased = self.parse_optional_alias(item)?;
        if aliased.kind == NodeKind::Alias && self.check(&TokenKind::LeftParen) {
            let columns = self.parse_column_list()?;
            let start = aliased.span.start;
            let value = aliased.value.clone().unwrap_or_default();
            let mut children = aliased.children;
            children.push(columns);
            return Ok(self
                .finish(NodeKind::Alias, start)
                .with_value(value)
                .with_children(children));
        }
        Ok(aliased)
    }

    /// Parses a set-returning function used as a FROM item.
    fn parse_table_function(&mut self, name: String, start: usize) -> PResult<Node> {
        self.expect(&TokenKind::LeftParen)?;
        let args = if self.check(&TokenKind::RightParen) {
            Vec::new()
        } else {
            self.parse_expr_list()?
        };
        self.expect(&TokenKind::RightParen)?;
        if self.eat_keyword(Keyword::With) {
            self.expect_word("ORDINALITY")?;
        }
        Ok(self
            .finish(NodeKind::FunctionCall, start)
            .with_value(name)
            .with_children(args))
    }

    /// Parses an optional WHERE clause.
    pub(crate) fn parse_where(&mut self) -> PResult<Option<Node>> {
        if !self.check_keyword(Keyword::Where) {
            return Ok(None);
        }
        let start = self.current().span.start;
        self.advance();
        if self.eat_word("CURRENT") {
            self.expect_word("OF")?;
            let cursor = self.parse_identifier()?;
            return Ok(Some(
                self.finish(NodeKind::Where, start)
                    .with_value("CURRENT OF")
                    .with_children(vec![cursor]),
            ));
        }
        let condition = self.parse_expr()?;
        Ok(Some(
            self.finish(NodeKind::Where, start)
                .with_children(vec![condition]),
        ))
    }

    /// Parses ORDER BY / LIMIT / OFFSET / FETCH / FOR UPDATE after the body
    /// of a query.
    fn parse_query_tail(&mut self, children: &mut Vec<Node>) -> PResult<()> {
        if self.check_keyword(Keyword::Order) {
            children.push(self.parse_order_by()?);
        }

        loop {
            let start = self.current().span.start;
            if self.eat_keyword(Keyword::Limit) {
                let node = if self.eat_keyword(Keyword::All) {
                    self.finish(NodeKind::Limit, start).with_value("ALL")
                } else {
                    let count = self.parse_expr()?;
                    self.finish(NodeKind::Limit, start).with_children(vec![count])
                };
                children.push(node);
            } else if self.eat_keyword(Keyword::Offset) {
                let count = self.parse_expr()?;
                if !self.eat_word("ROW") {
                    self.eat_word("ROWS");
                }
                children.push(self.finish(NodeKind::Offset, start).with_children(vec![count]));
            } else if self.eat_word("FETCH") {
                if !self.eat_word("FIRST") {
                    self.expect_word("NEXT")?;
                }
                let mut count = Vec::new();
                if !self.check_any_word(&["ROW", "ROWS"]) {
                    count.push(self.parse_expression(20)?);
                }
                if !self.eat_word("ROW") {
                    self.expect_word("ROWS")?;
                }
                if self.eat_keyword(Keyword::With) {
                    self.expect_word("TIES")?;
                } else {
                    self.expect_keyword(Keyword::Only)?;
                }
                children.push(
                    self.finish(NodeKind::Limit, start)
                        .with_value("FETCH")
                        .with_children(count),
                );
            } else if self.eat_keyword(Keyword::For) {
                let mut words = Vec::new();
                while let Some(word) = self.current_word() {
                    if !matches!(word.as_str(), "UPDATE" | "SHARE" | "NO" | "KEY") {
                        break;
                    }
                    words.push(word);
                    self.advance();
                }
                if words.is_empty() {
                    return Err(SyntaxError::unexpected("UPDATE or SHARE", self.current()));
                }
                if self.eat_word("OF") {
                    self.parse_qualified_name()?;
                    while self.eat(&TokenKind::Comma) {
                        self.parse_qualified_name()?;
                    }
                }
                if !self.eat_word("NOWAIT") && self.eat_word("SKIP") {
                    self.expect_word("LOCKED")?;
                }
                children.push(
                    self.finish(NodeKind::Locking, start)
                        .with_value(format!("FOR {}", words.join(" "))),
                );
            } else {
                return Ok(());
            }
        }
    }

    /// Parses `ORDER BY item, ...` into an `order_by` node.
    pub(crate) fn parse_order_by(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        self.expect_keyword(Keyword::Order)?;
        self.expect_keyword(Keyword::By)?;
        let mut items = Vec::new();
        loop {
            let item_start = self.current().span.start;
            let expr = self.parse_expr()?;
            let mut value = Vec::new();
            if self.eat_keyword(Keyword::Asc) {
                value.push("ASC".to_string());
            } else if self.eat_keyword(Keyword::Desc) {
                value.push("DESC".to_string());
            } else if self.eat_keyword(Keyword::Using) {
                let op = self.current().describe();
                self.advance();
                value.push(format!("USING {op}"));
            }
            if self.eat_word("NULLS") {
                let position = self.current_word().unwrap_or_default();
                if !self.eat_word("FIRST") {
                    self.expect_word("LAST")?;
                }
                value.push(format!("NULLS {position}"));
            }
            let mut item = self
                .finish(NodeKind::OrderItem, item_start)
                .with_children(vec![expr]);
            if !value.is_empty() {
                item = item.with_value(value.join(" "));
            }
            items.push(item);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(self.finish(NodeKind::OrderBy, start).with_children(items))
    }

    /// Parses `( [name] [PARTITION BY exprs] [ORDER BY ...] [frame] )` and
    /// returns the parts in order.
    pub(crate) fn parse_window_spec(&mut self) -> PResult<Vec<Node>> {
        self.expect(&TokenKind::LeftParen)?;
        let mut parts = Vec::new();
        if self.check_identifier() && !self.check_any_word(WINDOW_SPEC_WORDS) {
            parts.push(self.parse_identifier()?);
        }
        if self.check_word("PARTITION") {
            let partition = self.current().span.start;
            self.advance();
            self.expect_keyword(Keyword::By)?;
            let exprs = self.parse_expr_list()?;
            parts.push(
                self.finish(NodeKind::WindowPartition, partition)
                    .with_children(exprs),
            );
        }
        if self.check_keyword(Keyword::Order) {
            parts.push(self.parse_order_by()?);
        }
        if self.check_any_word(&["ROWS", "RANGE", "GROUPS"]) {
            parts.push(self.parse_window_frame()?);
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(parts)
    }

    /// Parses a frame clause into a `window_frame` node whose value is the
    /// normalized clause and whose children are the offset expressions.
    fn parse_window_frame(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        let mut words = vec![self.current_word().unwrap_or_default()];
        let mut offsets = Vec::new();
        self.advance();

        if self.eat_keyword(Keyword::Between) {
            words.push("BETWEEN".into());
            words.push(self.parse_frame_bound(&mut offsets)?);
            self.expect_keyword(Keyword::And)?;
            words.push("AND".into());
        }
        words.push(self.parse_frame_bound(&mut offsets)?);

        if self.eat_word("EXCLUDE") {
            let excluded = if self.eat_word("CURRENT") {
                self.expect_word("ROW")?;
                "CURRENT ROW"
            } else if self.eat_keyword(Keyword::Group) {
                "GROUP"
            } else if self.eat_word("TIES") {
                "TIES"
            } else {
                self.expect_word("NO")?;
                self.expect_word("OTHERS")?;
                "NO OTHERS"
            };
            words.push(format!("EXCLUDE {excluded}"));
        }

        Ok(self
            .finish(NodeKind::WindowFrame, start)
            .with_value(words.join(" "))
            .with_children(offsets))
    }

    /// Parses one frame bound, pushing its offset expression if it has one.
    fn parse_frame_bound(&mut self, offsets: &mut Vec<Node>) -> PResult<String> {
        if self.eat_word("CURRENT") {
            self.expect_word("ROW")?;
            return Ok("CURRENT ROW".into());
        }
        let bound = if self.eat_word("UNBOUNDED") {
            "UNBOUNDED"
        } else {
            // Binds tighter than AND so BETWEEN bounds split correctly.
            offsets.push(self.parse_expression(7)?);
            "OFFSET"
        };
        let direction = self.current_word().unwrap_or_default();
        if !self.eat_word("PRECEDING") {
            self.expect_word("FOLLOWING")?;
        }
        Ok(format!("{bound} {direction}"))
    }

    /// Parses `WITH [RECURSIVE] name [(cols)] AS [[NOT] MATERIALIZED] (stmt), ...`.
    fn parse_with(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        self.expect_keyword(Keyword::With)?;
        let recursive = self.eat_word("RECURSIVE");
        let mut ctes = Vec::new();
        loop {
            let cte_start = self.current().span.start;
            let name = self.expect_identifier()?;
            let mut children = Vec::new();
            if self.check(&TokenKind::LeftParen) {
                children.push(self.parse_column_list()?);
            }
            self.expect_keyword(Keyword::As)?;
            if self.eat_keyword(Keyword::Not) {
                self.expect_word("MATERIALIZED")?;
            } else {
                self.eat_word("MATERIALIZED");
            }
            self.expect(&TokenKind::LeftParen)?;
            let body_start = self.current().span.start;
            let body = match self.current().as_keyword() {
                Some(Keyword::Insert) => self.parse_insert(body_start, None)?,
                Some(Keyword::Update) => self.parse_update(body_start, None)?,
                Some(Keyword::Delete) => self.parse_delete(body_start, None)?,
                _ => self.parse_query()?,
            };
            children.push(body);
            self.expect(&TokenKind::RightParen)?;
            ctes.push(
                self.finish(NodeKind::Cte, cte_start)
                    .with_value(name)
                    .with_children(children),
            );
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        let node = self.finish(NodeKind::With, start).with_children(ctes);
        Ok(if recursive {
            node.with_value("RECURSIVE")
        } else {
            node
        })
    }

    /// Parses `VALUES (..), (..)`.
    fn parse_values(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        self.expect_keyword(Keyword::Values)?;
        let mut rows = Vec::new();
        loop {
            let row_start = self.current().span.start;
            self.expect(&TokenKind::LeftParen)?;
            let items = self.parse_expr_list()?;
            self.expect(&TokenKind::RightParen)?;
            rows.push(self.finish(NodeKind::ValuesRow, row_start).with_children(items));
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(self.finish(NodeKind::Values, start).with_children(rows))
    }

    /// Parses an INSERT statement. `start` and `with` carry a preceding
    /// WITH clause.
    pub(crate) fn parse_insert(&mut self, start: usize, with: Option<Node>) -> PResult<Node> {
        let mut children: Vec<Node> = with.into_iter().collect();
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;

        let table = self.parse_qualified_name()?;
        children.push(if self.check_keyword(Keyword::As) {
            self.parse_optional_alias(table)?
        } else {
            table
        });

        if self.check(&TokenKind::LeftParen) && !self.peek_is_query_start() {
            children.push(self.parse_column_list()?);
        }

        if self.eat_word("OVERRIDING") {
            if !self.eat_word("SYSTEM") {
                self.expect_word("USER")?;
            }
            self.expect_word("VALUE")?;
        }

        if self.check_keyword(Keyword::Default) {
            let default = self.current().span.start;
            self.advance();
            self.expect_keyword(Keyword::Values)?;
            children.push(self.finish(NodeKind::DefaultValues, default));
        } else {
            children.push(self.parse_query()?);
        }

        if self.check_keyword(Keyword::On) {
            children.push(self.parse_on_conflict()?);
        }
        if let Some(returning) = self.parse_returning()? {
            children.push(returning);
        }

        Ok(self.finish(NodeKind::Insert, start).with_children(children))
    }

    fn peek_is_query_start(&mut self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Keyword(Keyword::Select | Keyword::With | Keyword::Values)
                | TokenKind::LeftParen
        )
    }

    /// Parses `ON CONFLICT [target] DO NOTHING | DO UPDATE SET ...`.
    fn parse_on_conflict(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        self.expect_keyword(Keyword::On)?;
        self.expect_word("CONFLICT")?;
        let mut children = Vec::new();

        if self.check(&TokenKind::LeftParen) {
            self.advance();
            loop {
                children.push(self.parse_index_element()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(&TokenKind::RightParen)?;
            if let Some(clause) = self.parse_where()? {
                children.push(clause);
            }
        } else if self.eat_keyword(Keyword::On) {
            self.expect_keyword(Keyword::Constraint)?;
            children.push(self.parse_identifier()?);
        }

        self.expect_keyword(Keyword::Do)?;
        let value = if self.eat_word("NOTHING") {
            "DO NOTHING"
        } else {
            self.expect_keyword(Keyword::Update)?;
            self.expect_keyword(Keyword::Set)?;
            children.extend(self.parse_assignments()?);
            if let Some(clause) = self.parse_where()? {
                children.push(clause);
            }
            "DO UPDATE"
        };

        Ok(self
            .finish(NodeKind::OnConflict, start)
            .with_value(value)
            .with_children(children))
    }

    /// Parses `col = expr, (a, b) = (..), ...` after SET.
    fn parse_assignments(&mut self) -> PResult<Vec<Node>> {
        let mut assignments = Vec::new();
        loop {
            let start = self.current().span.start;
            if self.check(&TokenKind::LeftParen) {
                let columns = self.parse_column_list()?;
                self.expect(&TokenKind::Eq)?;
                let value = self.parse_expr()?;
                assignments.push(
                    self.finish(NodeKind::Assignment, start)
                        .with_children(vec![columns, value]),
                );
            } else {
                let mut target = self.expect_identifier()?;
                while self.eat(&TokenKind::Dot) {
                    target.push('.');
                    target.push_str(&self.expect_identifier()?);
                }
                if self.check(&TokenKind::LeftBracket) {
                    self.advance();
                    self.parse_expr()?;
                    self.expect(&TokenKind::RightBracket)?;
                }
                self.expect(&TokenKind::Eq)?;
                let value = self.parse_expr()?;
                assignments.push(
                    self.finish(NodeKind::Assignment, start)
                        .with_value(target)
                        .with_children(vec![value]),
                );
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(assignments)
    }

    /// Parses an optional RETURNING clause.
    fn parse_returning(&mut self) -> PResult<Option<Node>> {
        if !self.check_keyword(Keyword::Returning) {
            return Ok(None);
        }
        let start = self.current().span.start;
        self.advance();
        let mut items = Vec::new();
        loop {
            let item = self.parse_expr()?;
            items.push(self.parse_optional_alias(item)?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(Some(self.finish(NodeKind::Returning, start).with_children(items)))
    }

    /// Parses an UPDATE statement.
    pub(crate) fn parse_update(&mut self, start: usize, with: Option<Node>) -> PResult<Node> {
        let mut children: Vec<Node> = with.into_iter().collect();
        self.expect_keyword(Keyword::Update)?;
        if self.check_keyword(Keyword::Only) {
            let only = self.current().span.start;
            self.advance();
            children.push(self.finish(NodeKind::Only, only));
        }
        let table = self.parse_qualified_name()?;
        children.push(self.parse_optional_alias(table)?);

        self.expect_keyword(Keyword::Set)?;
        children.extend(self.parse_assignments()?);

        if self.check_keyword(Keyword::From) {
            let from = self.current().span.start;
            self.advance();
            let items = self.parse_from_items()?;
            children.push(self.finish(NodeKind::From, from).with_children(items));
        }
        if let Some(clause) = self.parse_where()? {
            children.push(clause);
        }
        if let Some(returning) = self.parse_returning()? {
            children.push(returning);
        }

        Ok(self.finish(NodeKind::Update, start).with_children(children))
    }

    /// Parses a DELETE statement.
    pub(crate) fn parse_delete(&mut self, start: usize, with: Option<Node>) -> PResult<Node> {
        let mut children: Vec<Node> = with.into_iter().collect();
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;
        if self.check_keyword(Keyword::Only) {
            let only = self.current().span.start;
            self.advance();
            children.push(self.finish(NodeKind::Only, only));
        }
        let table = self.parse_qualified_name()?;
        children.push(self.parse_optional_alias(table)?);

        if self.check_keyword(Keyword::Using) {
            let using = self.current().span.start;
            self.advance();
            let items = self.parse_from_items()?;
            children.push(self.finish(NodeKind::Using, using).with_children(items));
        }
        if let Some(clause) = self.parse_where()? {
            children.push(clause);
        }
        if let Some(returning) = self.parse_returning()? {
            children.push(returning);
        }

        Ok(self.finish(NodeKind::Delete, start).with_children(children))
    }
}

/// Words that begin a clause and so cannot be an implicit alias.
const CLAUSE_WORDS: &[&str] = &[
    "WINDOW", "FETCH", "LATERAL", "RETURNING", "CONFLICT", "OVERRIDING", "TABLESAMPLE",
    "SHARD", "INHERITS", "PARTITION", "TABLESPACE", "NOWAIT", "SKIP",
];
