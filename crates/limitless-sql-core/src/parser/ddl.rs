//! Data definition and privilege statements.

use super::error::SyntaxError;
use super::parser::{PResult, Parser};
use crate::lexer::{Keyword, TokenKind};
use crate::tree::{Node, NodeKind};

/// Object kinds of `CREATE` statements that are recognized without being
/// analyzed further.
const CREATE_OBJECT_KINDS: &[&str] = &[
    "ACCESS METHOD",
    "AGGREGATE",
    "CAST",
    "COLLATION",
    "CONSTRAINT TRIGGER",
    "CONVERSION",
    "DATABASE",
    "DEFAULT CONVERSION",
    "DOMAIN",
    "EVENT TRIGGER",
    "FOREIGN DATA WRAPPER",
    "FOREIGN TABLE",
    "GROUP",
    "LANGUAGE",
    "OPERATOR",
    "OPERATOR CLASS",
    "OPERATOR FAMILY",
    "POLICY",
    "PROCEDURAL LANGUAGE",
    "PUBLICATION",
    "ROLE",
    "RULE",
    "SERVER",
    "STATISTICS",
    "SUBSCRIPTION",
    "TABLESPACE",
    "TEXT SEARCH CONFIGURATION",
    "TEXT SEARCH DICTIONARY",
    "TEXT SEARCH PARSER",
    "TEXT SEARCH TEMPLATE",
    "TRANSFORM",
    "TRIGGER",
    "TRUSTED LANGUAGE",
    "TRUSTED PROCEDURAL LANGUAGE",
    "TYPE",
    "USER",
    "USER MAPPING",
];

/// Object kinds of `ALTER` statements other than `ALTER TABLE`.
const ALTER_OBJECT_KINDS: &[&str] = &[
    "AGGREGATE",
    "COLLATION",
    "CONVERSION",
    "DATABASE",
    "DEFAULT PRIVILEGES",
    "DOMAIN",
    "EVENT TRIGGER",
    "EXTENSION",
    "FOREIGN DATA WRAPPER",
    "FOREIGN TABLE",
    "FUNCTION",
    "GROUP",
    "INDEX",
    "LANGUAGE",
    "LARGE OBJECT",
    "MATERIALIZED VIEW",
    "OPERATOR",
    "OPERATOR CLASS",
    "OPERATOR FAMILY",
    "POLICY",
    "PROCEDURAL LANGUAGE",
    "PROCEDURE",
    "PUBLICATION",
    "ROLE",
    "ROUTINE",
    "RULE",
    "SCHEMA",
    "SEQUENCE",
    "SERVER",
    "STATISTICS",
    "SUBSCRIPTION",
    "SYSTEM",
    "TABLESPACE",
    "TEXT SEARCH CONFIGURATION",
    "TEXT SEARCH DICTIONARY",
    "TEXT SEARCH PARSER",
    "TEXT SEARCH TEMPLATE",
    "TRIGGER",
    "TYPE",
    "USER",
    "USER MAPPING",
    "VIEW",
];

/// Actions of `ALTER EXTENSION`.
const ALTER_EXTENSION_ACTIONS: &[&str] = &["UPDATE", "SET SCHEMA", "ADD", "DROP"];

/// Actions of `ALTER INDEX name`.
const ALTER_INDEX_ACTIONS: &[&str] = &[
    "RENAME TO",
    "SET TABLESPACE",
    "SET SCHEMA",
    "SET",
    "RESET",
    "ATTACH PARTITION",
    "DEPENDS ON EXTENSION",
    "NO DEPENDS ON EXTENSION",
    "ALTER COLUMN",
    "ALTER",
];

/// Actions of `ALTER SEQUENCE name` other than sequence options.
const ALTER_SEQUENCE_ACTIONS: &[&str] = &[
    "RENAME TO",
    "SET SCHEMA",
    "SET LOGGED",
    "SET UNLOGGED",
    "OWNER TO",
];

/// Object kinds accepted by `DROP`.
const DROP_OBJECT_KINDS: &[&str] = &[
    "ACCESS METHOD",
    "AGGREGATE",
    "CAST",
    "COLLATION",
    "CONVERSION",
    "DATABASE",
    "DOMAIN",
    "EVENT TRIGGER",
    "EXTENSION",
    "FOREIGN DATA WRAPPER",
    "FOREIGN TABLE",
    "FUNCTION",
    "GROUP",
    "INDEX",
    "LANGUAGE",
    "MATERIALIZED VIEW",
    "OPERATOR",
    "OPERATOR CLASS",
    "OPERATOR FAMILY",
    "OWNED",
    "POLICY",
    "PROCEDURAL LANGUAGE",
    "PROCEDURE",
    "PUBLICATION",
    "ROLE",
    "ROUTINE",
    "RULE",
    "SCHEMA",
    "SEQUENCE",
    "SERVER",
    "STATISTICS",
    "SUBSCRIPTION",
    "TABLE",
    "TABLESPACE",
    "TEXT SEARCH CONFIGURATION",
    "TEXT SEARCH DICTIONARY",
    "TEXT SEARCH PARSER",
    "TEXT SEARCH TEMPLATE",
    "TRANSFORM",
    "TRIGGER",
    "TYPE",
    "USER",
    "USER MAPPING",
    "VIEW",
];

/// Drop kinds whose operands are plain (possibly qualified) names.
const DROP_NAMED_KINDS: &[&str] = &[
    "DATABASE",
    "DOMAIN",
    "EXTENSION",
    "FOREIGN TABLE",
    "INDEX",
    "MATERIALIZED VIEW",
    "SCHEMA",
    "SEQUENCE",
    "TABLE",
    "TYPE",
    "VIEW",
];

/// Kinds of objects a privilege can be granted on.
const PRIVILEGE_TARGET_KINDS: &[&str] = &[
    "ALL FUNCTIONS IN SCHEMA",
    "ALL PROCEDURES IN SCHEMA",
    "ALL ROUTINES IN SCHEMA",
    "ALL SEQUENCES IN SCHEMA",
    "ALL TABLES IN SCHEMA",
    "DATABASE",
    "DOMAIN",
    "FOREIGN DATA WRAPPER",
    "FOREIGN SERVER",
    "FUNCTION",
    "LANGUAGE",
    "LARGE OBJECT",
    "PARAMETER",
    "PROCEDURE",
    "ROUTINE",
    "SCHEMA",
    "SEQUENCE",
    "TABLE",
    "TABLESPACE",
    "TYPE",
];

/// `ALTER TABLE` actions that are recognized but not analyzed.
const ALTER_TABLE_OPAQUE_ACTIONS: &[&str] = &[
    "CLUSTER ON",
    "DISABLE ROW LEVEL SECURITY",
    "DISABLE RULE",
    "DISABLE TRIGGER",
    "ENABLE ALWAYS RULE",
    "ENABLE ALWAYS TRIGGER",
    "ENABLE REPLICA RULE",
    "ENABLE REPLICA TRIGGER",
    "ENABLE ROW LEVEL SECURITY",
    "ENABLE RULE",
    "ENABLE TRIGGER",
    "FORCE ROW LEVEL SECURITY",
    "INHERIT",
    "NO FORCE ROW LEVEL SECURITY",
    "NO INHERIT",
    "NOT OF",
    "OF",
    "REPLICA IDENTITY",
    "RESET",
    "VALIDATE CONSTRAINT",
];

/// Words that start a routine characteristic.
const ROUTINE_OPTION_WORDS: &[&str] = &[
    "RETURNS", "LANGUAGE", "IMMUTABLE", "STABLE", "VOLATILE", "STRICT", "CALLED", "SECURITY",
    "EXTERNAL", "PARALLEL", "COST", "ROWS", "SUPPORT", "LEAKPROOF", "WINDOW", "TRANSFORM",
    "BEGIN", "RETURN",
];

impl Parser<'_> {
    /// Parses a `CREATE` statement.
    pub(crate) fn parse_create(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        self.expect_keyword(Keyword::Create)?;
        let modifiers = self.parse_create_modifiers()?;

        if self.check_keyword(Keyword::Table) {
            return self.parse_create_table(start, modifiers);
        }
        match self.current_word().as_deref() {
            Some("INDEX") => self.parse_create_index(start, modifiers),
            Some("SCHEMA") => self.parse_create_schema(start, modifiers),
            Some("EXTENSION") => self.parse_create_extension(start, modifiers),
            Some("SEQUENCE") => self.parse_create_sequence(start, modifiers),
            Some("VIEW") => self.parse_create_view(start, modifiers),
            Some("FUNCTION" | "PROCEDURE") => self.parse_create_function(start, modifiers),
            _ => {
                let kind = self.leading_words(CREATE_OBJECT_KINDS);
                if kind.is_empty() {
                    return Err(SyntaxError::unexpected("object type", self.current()));
                }
                self.skip_to_statement_end()?;
                Ok(self
                    .finish(NodeKind::OtherStatement, start)
                    .with_value(format!("CREATE {kind}"))
                    .with_children(modifiers))
            }
        }
    }

    /// Parses `OR REPLACE`, `TEMP`, `UNLOGGED`, `UNIQUE` and friends between
    /// `CREATE` and the object kind.
    fn parse_create_modifiers(&mut self) -> PResult<Vec<Node>> {
        let mut modifiers = Vec::new();
        loop {
            let start = self.current().span.start;
            let kind = if self.eat_keyword(Keyword::Or) {
                self.expect_word("REPLACE")?;
                NodeKind::OrReplace
            } else if self.check_any_word(&["GLOBAL", "LOCAL"]) {
                self.advance();
                if !self.eat_word("TEMPORARY") {
                    self.expect_word("TEMP")?;
                }
                NodeKind::Temporary
            } else if self.eat_word("TEMPORARY") || self.eat_word("TEMP") {
                NodeKind::Temporary
            } else if self.eat_word("UNLOGGED") {
                NodeKind::Unlogged
            } else if self.eat_keyword(Keyword::Unique) {
                NodeKind::Unique
            } else if self.eat_word("MATERIALIZED") {
                NodeKind::Materialized
            } else if self.eat_word("RECURSIVE") {
                continue;
            } else {
                return Ok(modifiers);
            };
            modifiers.push(self.finish(kind, start));
        }
    }

    fn parse_if_not_exists(&mut self) -> PResult<Option<Node>> {
        if !self.check_word("IF") {
            return Ok(None);
        }
        let start = self.current().span.start;
        self.advance();
        self.expect_keyword(Keyword::Not)?;
        self.expect_keyword(Keyword::Exists)?;
        Ok(Some(self.finish(NodeKind::IfNotExists, start)))
    }

    fn parse_if_exists(&mut self) -> PResult<Option<Node>> {
        if !self.check_word("IF") {
            return Ok(None);
        }
        let start = self.current().span.start;
        self.advance();
        self.expect_keyword(Keyword::Exists)?;
        Ok(Some(self.finish(NodeKind::IfExists, start)))
    }

    // --- CREATE TABLE ---

    fn parse_create_table(&mut self, start: usize, mut children: Vec<Node>) -> PResult<Node> {
        self.expect_keyword(Keyword::Table)?;
        children.extend(self.parse_if_not_exists()?);
        children.push(self.parse_qualified_name()?);

        let mut has_body = false;
        if self.check_word("OF") {
            let of = self.current().span.start;
            self.advance();
            let type_name = self.parse_qualified_name()?;
            let value = type_name.value.clone().unwrap_or_default();
            children.push(
                self.finish(NodeKind::OfType, of)
                    .with_value(value)
                    .with_children(vec![type_name]),
            );
            if self.check(&TokenKind::LeftParen) {
                children.extend(self.parse_table_elements()?);
            }
            has_body = true;
        } else if self.check_word("PARTITION") && self.peek().is_word("OF") {
            children.push(self.parse_partition_of()?);
            has_body = true;
        } else if self.check(&TokenKind::LeftParen) {
            children.extend(self.parse_table_elements()?);
            has_body = true;
        }

        self.parse_table_options(&mut children)?;

        if self.check_keyword(Keyword::As) {
            let as_start = self.current().span.start;
            self.advance();
            let query = self.parse_query()?;
            children.push(
                self.finish(NodeKind::AsQuery, as_start)
                    .with_children(vec![query]),
            );
            children.extend(self.parse_with_data()?);
        } else if !has_body {
            return Err(SyntaxError::unexpected("( or AS", self.current()));
        }

        Ok(self
            .finish(NodeKind::CreateTable, start)
            .with_children(children))
    }

    /// Parses `PARTITION OF parent [(elements)] {FOR VALUES ... | DEFAULT}`.
    fn parse_partition_of(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        self.expect_word("PARTITION")?;
        self.expect_word("OF")?;
        let mut children = vec![self.parse_qualified_name()?];
        if self.check(&TokenKind::LeftParen) {
            children.extend(self.parse_table_elements()?);
        }
        let value = self.parse_partition_bound()?;
        Ok(self
            .finish(NodeKind::PartitionBound, start)
            .with_value(value)
            .with_children(children))
    }

    /// Consumes a partition bound specification and returns its form.
    fn parse_partition_bound(&mut self) -> PResult<&'static str> {
        if self.eat_keyword(Keyword::Default) {
            return Ok("DEFAULT");
        }
        self.expect_keyword(Keyword::For)?;
        self.expect_keyword(Keyword::Values)?;
        if self.eat_keyword(Keyword::In) {
            self.skip_parenthesized()?;
            Ok("FOR VALUES IN")
        } else if self.eat_keyword(Keyword::From) {
            self.skip_parenthesized()?;
            self.expect_keyword(Keyword::To)?;
            self.skip_parenthesized()?;
            Ok("FOR VALUES FROM")
        } else {
            self.expect_keyword(Keyword::With)?;
            self.skip_parenthesized()?;
            Ok("FOR VALUES WITH")
        }
    }

    /// Parses the clauses that may follow the element list of a table.
    fn parse_table_options(&mut self, children: &mut Vec<Node>) -> PResult<()> {
        loop {
            let start = self.current().span.start;
            if self.eat_word("INHERITS") {
                self.expect(&TokenKind::LeftParen)?;
                let mut parents = vec![self.parse_qualified_name()?];
                while self.eat(&TokenKind::Comma) {
                    parents.push(self.parse_qualified_name()?);
                }
                self.expect(&TokenKind::RightParen)?;
                children.push(self.finish(NodeKind::Inherits, start).with_children(parents));
            } else if self.check_word("PARTITION") {
                self.advance();
                self.expect_keyword(Keyword::By)?;
                let strategy = self.current_word().unwrap_or_default();
                if !matches!(strategy.as_str(), "RANGE" | "LIST" | "HASH") {
                    return Err(SyntaxError::unexpected("RANGE, LIST or HASH", self.current()));
                }
                self.advance();
                let keys = self.parse_index_elements()?;
                children.push(
                    self.finish(NodeKind::PartitionBy, start)
                        .with_value(strategy)
                        .with_children(keys),
                );
            } else if self.check_keyword(Keyword::Using) {
                children.push(self.parse_access_method()?);
            } else if self.check_keyword(Keyword::With) && self.peek().kind == TokenKind::LeftParen {
                children.push(self.parse_storage_parameters()?);
            } else if self.eat_word("WITHOUT") {
                self.expect_word("OIDS")?;
                children.push(self.finish(NodeKind::WithoutOids, start));
            } else if self.check_keyword(Keyword::On) && self.peek().is_word("COMMIT") {
                self.advance();
                self.advance();
                let action = if self.eat_keyword(Keyword::Drop) {
                    "DROP"
                } else if self.eat_keyword(Keyword::Delete) {
                    self.expect_word("ROWS")?;
                    "DELETE ROWS"
                } else {
                    self.expect_word("PRESERVE")?;
                    self.expect_word("ROWS")?;
                    "PRESERVE ROWS"
                };
                children.push(self.finish(NodeKind::OnCommit, start).with_value(action));
            } else if self.check_word("TABLESPACE") {
                children.push(self.parse_tablespace()?);
            } else if self.check_word("SHARD") {
                self.advance();
                self.expect_word("KEY")?;
                let columns = self.parse_column_list()?;
                children.push(
                    self.finish(NodeKind::ShardKey, start)
                        .with_children(columns.children),
                );
            } else {
                return Ok(());
            }
        }
    }

    /// Parses `USING method`.
    fn parse_access_method(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        self.expect_keyword(Keyword::Using)?;
        let method = self.expect_identifier()?;
        Ok(self.finish(NodeKind::AccessMethod, start).with_value(method))
    }

    /// Parses `TABLESPACE name`.
    fn parse_tablespace(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        self.expect_word("TABLESPACE")?;
        let name = self.expect_identifier()?;
        Ok(self.finish(NodeKind::Tablespace, start).with_value(name))
    }

    /// Parses `WITH (name [= value], ...)`.
    fn parse_storage_parameters(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        self.expect_keyword(Keyword::With)?;
        self.expect(&TokenKind::LeftParen)?;
        let mut parameters = Vec::new();
        loop {
            let param_start = self.current().span.start;
            let mut name = self.expect_identifier()?;
            while self.eat(&TokenKind::Dot) {
                name.push('.');
                name.push_str(&self.expect_identifier()?);
            }
            let mut value = Vec::new();
            if self.eat(&TokenKind::Eq) {
                value.push(self.parse_option_value()?);
            }
            parameters.push(
                self.finish(NodeKind::StorageParameter, param_start)
                    .with_value(name)
                    .with_children(value),
            );
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(self
            .finish(NodeKind::StorageParameters, start)
            .with_children(parameters))
    }

    /// Parses a single-token option value into a `literal` node.
    fn parse_option_value(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        let value = match &self.current().kind {
            TokenKind::Minus | TokenKind::Plus | TokenKind::Number(_) => {
                return self.parse_signed_number();
            }
            TokenKind::String(text) | TokenKind::QuotedIdentifier(text) => text.clone(),
            TokenKind::Identifier(word) => word.to_lowercase(),
            TokenKind::Keyword(kw) => kw.as_str().to_lowercase(),
            _ => return Err(SyntaxError::unexpected("option value", self.current())),
        };
        self.advance();
        Ok(self.finish(NodeKind::Literal, start).with_value(value))
    }

    /// Parses `WITH [NO] DATA` after a query.
    fn parse_with_data(&mut self) -> PResult<Option<Node>> {
        if !self.check_keyword(Keyword::With) {
            return Ok(None);
        }
        let no = self.peek().is_word("NO");
        if !no && !self.peek().is_word("DATA") {
            return Ok(None);
        }
        let start = self.current().span.start;
        self.advance();
        if no {
            self.advance();
        }
        self.expect_word("DATA")?;
        let value = if no { "WITH NO DATA" } else { "WITH DATA" };
        Ok(Some(self.finish(NodeKind::WithData, start).with_value(value)))
    }

    /// Parses `( element, ... )` of a table definition.
    fn parse_table_elements(&mut self) -> PResult<Vec<Node>> {
        self.expect(&TokenKind::LeftParen)?;
        let mut elements = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                elements.push(self.parse_table_element()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(elements)
    }

    fn parse_table_element(&mut self) -> PResult<Node> {
        if self.check_keyword(Keyword::Like) {
            let start = self.current().span.start;
            self.advance();
            let source = self.parse_qualified_name()?;
            while self.check_any_word(&["INCLUDING", "EXCLUDING"]) {
                self.advance();
                if self.current_word().is_none() {
                    return Err(SyntaxError::unexpected("LIKE option", self.current()));
                }
                self.advance();
            }
            return Ok(self
                .finish(NodeKind::LikeClause, start)
                .with_children(vec![source]));
        }
        if self.check_table_constraint_start() {
            return self.parse_table_constraint();
        }
        self.parse_column_def()
    }

    fn check_table_constraint_start(&self) -> bool {
        matches!(
            self.current().as_keyword(),
            Some(
                Keyword::Constraint
                    | Keyword::Primary
                    | Keyword::Unique
                    | Keyword::Check
                    | Keyword::Foreign
            )
        ) || self.check_word("EXCLUDE")
    }

    /// Parses a table constraint into a `table_constraint` node whose value
    /// is the constraint type.
    fn parse_table_constraint(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        let mut children = Vec::new();
        if self.eat_keyword(Keyword::Constraint) {
            children.push(self.parse_identifier()?);
        }

        let value = match self.current().as_keyword() {
            Some(Keyword::Primary) => {
                self.advance();
                self.expect_word("KEY")?;
                children.push(self.parse_column_list()?);
                self.parse_index_parameters(&mut children)?;
                "PRIMARY KEY"
            }
            Some(Keyword::Unique) => {
                self.advance();
                self.parse_nulls_distinct()?;
                children.push(self.parse_column_list()?);
                self.parse_index_parameters(&mut children)?;
                "UNIQUE"
            }
            Some(Keyword::Check) => {
                self.advance();
                children.push(self.parse_check_condition()?);
                "CHECK"
            }
            Some(Keyword::Foreign) => {
                self.advance();
                self.expect_word("KEY")?;
                children.push(self.parse_column_list()?);
                children.push(self.parse_references()?);
                "FOREIGN KEY"
            }
            _ if self.eat_word("EXCLUDE") => {
                if self.check_keyword(Keyword::Using) {
                    children.push(self.parse_access_method()?);
                }
                children.extend(self.parse_exclusion_elements()?);
                self.parse_index_parameters(&mut children)?;
                if self.check_keyword(Keyword::Where) {
                    self.advance();
                    self.expect(&TokenKind::LeftParen)?;
                    let predicate = self.parse_expr()?;
                    self.expect(&TokenKind::RightParen)?;
                    children.push(predicate);
                }
                "EXCLUDE"
            }
            _ => return Err(SyntaxError::unexpected("constraint", self.current())),
        };
        self.skip_constraint_attributes()?;

        Ok(self
            .finish(NodeKind::TableConstraint, start)
            .with_value(value)
            .with_children(children))
    }

    /// Parses `( expr ) [NO INHERIT]` after CHECK.
    fn parse_check_condition(&mut self) -> PResult<Node> {
        self.expect(&TokenKind::LeftParen)?;
        let condition = self.parse_expr()?;
        self.expect(&TokenKind::RightParen)?;
        if self.check_word("NO") && self.peek().is_word("INHERIT") {
            self.advance();
            self.advance();
        }
        Ok(condition)
    }

    fn parse_nulls_distinct(&mut self) -> PResult<()> {
        if self.eat_word("NULLS") {
            self.eat_keyword(Keyword::Not);
            self.expect_keyword(Keyword::Distinct)?;
        }
        Ok(())
    }

    /// Parses `INCLUDE (..)`, `WITH (..)` and `USING INDEX TABLESPACE` after
    /// a unique or primary key constraint.
    fn parse_index_parameters(&mut self, children: &mut Vec<Node>) -> PResult<()> {
        if self.check_word("INCLUDE") {
            children.push(self.parse_include()?);
        }
        if self.check_keyword(Keyword::With) && self.peek().kind == TokenKind::LeftParen {
            children.push(self.parse_storage_parameters()?);
        }
        if self.check_keyword(Keyword::Using) && self.peek().is_word("INDEX") {
            let start = self.current().span.start;
            self.advance();
            self.advance();
            self.expect_word("TABLESPACE")?;
            let name = self.expect_identifier()?;
            children.push(self.finish(NodeKind::Tablespace, start).with_value(name));
        }
        Ok(())
    }

    fn parse_include(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        self.expect_word("INCLUDE")?;
        let columns = self.parse_column_list()?;
        Ok(self
            .finish(NodeKind::Include, start)
            .with_children(vec![columns]))
    }

    /// Consumes DEFERRABLE, INITIALLY and NOT VALID attributes.
    fn skip_constraint_attributes(&mut self) -> PResult<()> {
        loop {
            if self.eat_word("DEFERRABLE") {
                continue;
            }
            if self.check_keyword(Keyword::Not)
                && (self.peek().is_word("DEFERRABLE") || self.peek().is_word("VALID"))
            {
                self.advance();
                self.advance();
                continue;
            }
            if self.eat_word("INITIALLY") {
                if !self.eat_word("DEFERRED") {
                    self.expect_word("IMMEDIATE")?;
                }
                continue;
            }
            return Ok(());
        }
    }

    /// Parses `REFERENCES table [(cols)] [MATCH ..] [ON DELETE ..] [ON UPDATE ..]`.
    fn parse_references(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        self.expect_keyword(Keyword::References)?;
        let mut children = vec![self.parse_qualified_name()?];
        if self.check(&TokenKind::LeftParen) {
            children.push(self.parse_column_list()?);
        }
        if self.eat_word("MATCH") {
            if self.current_word().is_none() {
                return Err(SyntaxError::unexpected("FULL, PARTIAL or SIMPLE", self.current()));
            }
            self.advance();
        }

        while self.check_keyword(Keyword::On)
            && matches!(
                self.peek().kind,
                TokenKind::Keyword(Keyword::Delete | Keyword::Update)
            )
        {
            let action_start = self.current().span.start;
            self.advance();
            let event = self.current_word().unwrap_or_default();
            self.advance();
            let action = if self.eat_keyword(Keyword::Set) {
                let target = if self.eat_keyword(Keyword::Null) {
                    "SET NULL"
                } else {
                    self.expect_keyword(Keyword::Default)?;
                    "SET DEFAULT"
                };
                if self.check(&TokenKind::LeftParen) {
                    self.parse_column_list()?;
                }
                target
            } else if self.eat_word("CASCADE") {
                "CASCADE"
            } else if self.eat_word("RESTRICT") {
                "RESTRICT"
            } else {
                self.expect_word("NO")?;
                self.expect_word("ACTION")?;
                "NO ACTION"
            };
            children.push(
                self.finish(NodeKind::ReferentialAction, action_start)
                    .with_value(format!("ON {event} {action}")),
            );
        }

        Ok(self.finish(NodeKind::References, start).with_children(children))
    }

    /// Parses a column definition: name, type and constraints.
    fn parse_column_def(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        let name = self.expect_identifier()?;
        let mut children = vec![self.parse_data_type()?];
        while let Some(constraint) = self.parse_column_constraint()? {
            children.push(constraint);
        }
        Ok(self
            .finish(NodeKind::ColumnDef, start)
            .with_value(name)
            .with_children(children))
    }

    fn parse_column_constraint(&mut self) -> PResult<Option<Node>> {
        let start = self.current().span.start;
        let mut children = Vec::new();
        let named = self.eat_keyword(Keyword::Constraint);
        if named {
            children.push(self.parse_identifier()?);
        }

        let value = match self.current().as_keyword() {
            Some(Keyword::Not) => {
                self.advance();
                self.expect_keyword(Keyword::Null)?;
                "NOT NULL"
            }
            Some(Keyword::Null) => {
                self.advance();
                "NULL"
            }
            Some(Keyword::Default) => {
                self.advance();
                children.push(self.parse_expr()?);
                "DEFAULT"
            }
            Some(Keyword::Primary) => {
                self.advance();
                self.expect_word("KEY")?;
                self.parse_index_parameters(&mut children)?;
                "PRIMARY KEY"
            }
            Some(Keyword::Unique) => {
                self.advance();
                self.parse_nulls_distinct()?;
                self.parse_index_parameters(&mut children)?;
                "UNIQUE"
            }
            Some(Keyword::Check) => {
                self.advance();
                children.push(self.parse_check_condition()?);
                "CHECK"
            }
            Some(Keyword::References) => {
                children.push(self.parse_references()?);
                "REFERENCES"
            }
            Some(Keyword::Collate) => {
                self.advance();
                children.push(self.parse_qualified_name()?);
                "COLLATE"
            }
            _ if self.eat_word("GENERATED") => self.parse_generated(&mut children)?,
            _ if self.check_any_word(&["COMPRESSION", "STORAGE"]) => {
                let option = if self.check_word("STORAGE") {
                    "STORAGE"
                } else {
                    "COMPRESSION"
                };
                self.advance();
                children.push(self.parse_option_value()?);
                option
            }
            _ if named => return Err(SyntaxError::unexpected("constraint", self.current())),
            _ => return Ok(None),
        };
        self.skip_constraint_attributes()?;

        Ok(Some(
            self.finish(NodeKind::ColumnConstraint, start)
                .with_value(value)
                .with_children(children),
        ))
    }

    /// Parses the rest of `GENERATED {ALWAYS|BY DEFAULT} AS IDENTITY [(..)]`
    /// or `GENERATED ALWAYS AS (expr) STORED`.
    fn parse_generated(&mut self, children: &mut Vec<Node>) -> PResult<&'static str> {
        let always = self.eat_word("ALWAYS");
        if !always {
            self.expect_keyword(Keyword::By)?;
            self.expect_keyword(Keyword::Default)?;
        }
        self.expect_keyword(Keyword::As)?;
        if always && self.check(&TokenKind::LeftParen) {
            self.advance();
            children.push(self.parse_expr()?);
            self.expect(&TokenKind::RightParen)?;
            self.expect_word("STORED")?;
            return Ok("GENERATED STORED");
        }
        self.expect_word("IDENTITY")?;
        if self.eat(&TokenKind::LeftParen) {
            while let Some(option) = self.parse_sequence_option()? {
                children.push(option);
            }
            self.expect(&TokenKind::RightParen)?;
        }
        Ok("IDENTITY")
    }

    // --- CREATE INDEX ---

    fn parse_create_index(&mut self, start: usize, mut children: Vec<Node>) -> PResult<Node> {
        self.expect_word("INDEX")?;
        if self.check_word("CONCURRENTLY") {
            let concurrently = self.current().span.start;
            self.advance();
            children.push(self.finish(NodeKind::Concurrently, concurrently));
        }
        children.extend(self.parse_if_not_exists()?);
        if !self.check_keyword(Keyword::On) {
            children.push(self.parse_identifier()?);
        }
        self.expect_keyword(Keyword::On)?;
        if self.check_keyword(Keyword::Only) {
            let only = self.current().span.start;
            self.advance();
            children.push(self.finish(NodeKind::Only, only));
        }
        children.push(self.parse_qualified_name()?);
        if self.check_keyword(Keyword::Using) {
            children.push(self.parse_access_method()?);
        }
        children.extend(self.parse_index_elements()?);
        if self.check_word("INCLUDE") {
            children.push(self.parse_include()?);
        }
        self.parse_nulls_distinct()?;
        if self.check_keyword(Keyword::With) {
            children.push(self.parse_storage_parameters()?);
        }
        if self.check_word("TABLESPACE") {
            children.push(self.parse_tablespace()?);
        }
        children.extend(self.parse_where()?);

        Ok(self
            .finish(NodeKind::CreateIndex, start)
            .with_children(children))
    }

    /// Parses `( element, ... )` of an index or partition key.
    fn parse_index_elements(&mut self) -> PResult<Vec<Node>> {
        self.expect(&TokenKind::LeftParen)?;
        let mut elements = vec![self.parse_index_element()?];
        while self.eat(&TokenKind::Comma) {
            elements.push(self.parse_index_element()?);
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(elements)
    }

    /// Parses `( element WITH operator, ... )` of an EXCLUDE constraint. Each
    /// element's value ends with `WITH operator`.
    fn parse_exclusion_elements(&mut self) -> PResult<Vec<Node>> {
        self.expect(&TokenKind::LeftParen)?;
        let mut elements = Vec::new();
        loop {
            let element = self.parse_index_element()?;
            self.expect_keyword(Keyword::With)?;
            let operator = self.parse_exclusion_operator()?;
            let value = match element.value {
                Some(order) => format!("{order} WITH {operator}"),
                None => format!("WITH {operator}"),
            };
            elements.push(
                self.finish(NodeKind::IndexElement, element.span.start)
                    .with_value(value)
                    .with_children(element.children),
            );
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(elements)
    }

    /// Parses an exclusion operator: a symbol or `OPERATOR(schema.op)`.
    fn parse_exclusion_operator(&mut self) -> PResult<String> {
        if self.eat_word("OPERATOR") {
            self.expect(&TokenKind::LeftParen)?;
            let mut name = String::new();
            while !self.check(&TokenKind::RightParen) {
                if matches!(
                    self.current().kind,
                    TokenKind::Semicolon | TokenKind::Eof | TokenKind::Error(_)
                ) {
                    return Err(SyntaxError::unexpected(")", self.current()));
                }
                name.push_str(&self.current().describe());
                self.advance();
            }
            self.advance();
            return Ok(format!("OPERATOR({name})"));
        }
        let operator = match &self.current().kind {
            TokenKind::Operator(op) => op.clone(),
            TokenKind::LeftParen
            | TokenKind::RightParen
            | TokenKind::LeftBracket
            | TokenKind::RightBracket
            | TokenKind::Comma
            | TokenKind::Semicolon
            | TokenKind::Dot
            | TokenKind::Colon
            | TokenKind::DoubleColon => {
                return Err(SyntaxError::unexpected("operator", self.current()));
            }
            other => match other.symbol() {
                Some(symbol) => symbol.to_string(),
                None => return Err(SyntaxError::unexpected("operator", self.current())),
            },
        };
        self.advance();
        Ok(operator)
    }

    /// Parses an index element: a column or expression, optional operator
    /// class and ordering.
    pub(crate) fn parse_index_element(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        let mut children = vec![self.parse_expr()?];
        if self.check_identifier() && !self.check_word("NULLS") {
            children.push(self.parse_qualified_name()?);
            if self.check(&TokenKind::LeftParen) {
                self.skip_parenthesized()?;
            }
        }
        let mut value = Vec::new();
        if self.eat_keyword(Keyword::Asc) {
            value.push("ASC".to_string());
        } else if self.eat_keyword(Keyword::Desc) {
            value.push("DESC".to_string());
        }
        if self.eat_word("NULLS") {
            let position = self.current_word().unwrap_or_default();
            if !self.eat_word("FIRST") {
                self.expect_word("LAST")?;
            }
            value.push(format!("NULLS {position}"));
        }
        let node = self
            .finish(NodeKind::IndexElement, start)
            .with_children(children);
        Ok(if value.is_empty() {
            node
        } else {
            node.with_value(value.join(" "))
        })
    }

    // --- CREATE SCHEMA / EXTENSION ---

    fn parse_create_schema(&mut self, start: usize, mut children: Vec<Node>) -> PResult<Node> {
        self.expect_word("SCHEMA")?;
        children.extend(self.parse_if_not_exists()?);
        let name = if self.check_identifier() && !self.check_word("AUTHORIZATION") {
            Some(self.expect_identifier()?)
        } else {
            None
        };
        if self.check_word("AUTHORIZATION") {
            let auth = self.current().span.start;
            self.advance();
            let role = self.expect_identifier()?;
            children.push(self.finish(NodeKind::Authorization, auth).with_value(role));
        }
        if name.is_none() && children.iter().all(|c| c.kind != NodeKind::Authorization) {
            return Err(SyntaxError::unexpected("schema name", self.current()));
        }

        if self.check_keyword(Keyword::Create) || self.check_keyword(Keyword::Grant) {
            let elements_start = self.current().span.start;
            let mut elements = Vec::new();
            loop {
                let element = match self.current().as_keyword() {
                    Some(Keyword::Create) => self.parse_create()?,
                    Some(Keyword::Grant) => self.parse_grant()?,
                    _ => break,
                };
                elements.push(element);
            }
            children.push(
                self.finish(NodeKind::SchemaElements, elements_start)
                    .with_children(elements),
            );
        }

        let node = self
            .finish(NodeKind::CreateSchema, start)
            .with_children(children);
        Ok(match name {
            Some(name) => node.with_value(name),
            None => node,
        })
    }

    fn parse_create_extension(&mut self, start: usize, mut children: Vec<Node>) -> PResult<Node> {
        self.expect_word("EXTENSION")?;
        children.extend(self.parse_if_not_exists()?);
        let name = self.expect_identifier()?;
        self.eat_keyword(Keyword::With);
        loop {
            let option = self.current().span.start;
            if self.eat_word("SCHEMA") {
                let schema = self.expect_identifier()?;
                children.push(self.finish(NodeKind::SchemaName, option).with_value(schema));
            } else if self.eat_word("VERSION") {
                let version = self.parse_option_value()?;
                let value = version.value.clone().unwrap_or_default();
                children.push(self.finish(NodeKind::Version, option).with_value(value));
            } else if self.eat_word("CASCADE") {
                children.push(self.finish(NodeKind::Cascade, option));
            } else {
                break;
            }
        }
        Ok(self
            .finish(NodeKind::CreateExtension, start)
            .with_value(name)
            .with_children(children))
    }

    // --- CREATE SEQUENCE ---

    fn parse_create_sequence(&mut self, start: usize, mut children: Vec<Node>) -> PResult<Node> {
        self.expect_word("SEQUENCE")?;
        children.extend(self.parse_if_not_exists()?);
        children.push(self.parse_qualified_name()?);
        while let Some(option) = self.parse_sequence_option()? {
            children.push(option);
        }
        Ok(self
            .finish(NodeKind::CreateSequence, start)
            .with_children(children))
    }

    /// Parses one sequence option into a `sequence_option` node whose value
    /// is the option name and whose child, if any, is its argument.
    fn parse_sequence_option(&mut self) -> PResult<Option<Node>> {
        let start = self.current().span.start;
        let mut children = Vec::new();
        let value = if self.eat_keyword(Keyword::As) {
            children.push(self.parse_data_type()?);
            "AS"
        } else if self.eat_word("INCREMENT") {
            self.eat_keyword(Keyword::By);
            children.push(self.parse_signed_number()?);
            "INCREMENT"
        } else if self.eat_word("MINVALUE") {
            children.push(self.parse_signed_number()?);
            "MINVALUE"
        } else if self.eat_word("MAXVALUE") {
            children.push(self.parse_signed_number()?);
            "MAXVALUE"
        } else if self.eat_word("START") {
            self.eat_keyword(Keyword::With);
            children.push(self.parse_signed_number()?);
            "START"
        } else if self.eat_word("RESTART") {
            if self.eat_keyword(Keyword::With) || matches!(self.current().kind, TokenKind::Number(_))
            {
                children.push(self.parse_signed_number()?);
            }
            "RESTART"
        } else if self.eat_word("CACHE") {
            children.push(self.parse_signed_number()?);
            "CACHE"
        } else if self.eat_word("CYCLE") {
            "CYCLE"
        } else if self.eat_word("NO") {
            if self.eat_word("MINVALUE") {
                "NO MINVALUE"
            } else if self.eat_word("MAXVALUE") {
                "NO MAXVALUE"
            } else {
                self.expect_word("CYCLE")?;
                "NO CYCLE"
            }
        } else if self.eat_word("OWNED") {
            self.expect_keyword(Keyword::By)?;
            if !self.eat_word("NONE") {
                children.push(self.parse_qualified_name()?);
            }
            "OWNED BY"
        } else if self.check_word("SEQUENCE") && self.peek().is_word("NAME") {
            self.advance();
            self.advance();
            children.push(self.parse_qualified_name()?);
            "SEQUENCE NAME"
        } else {
            return Ok(None);
        };
        Ok(Some(
            self.finish(NodeKind::SequenceOption, start)
                .with_value(value)
                .with_children(children),
        ))
    }

    // --- CREATE VIEW ---

    fn parse_create_view(&mut self, start: usize, mut children: Vec<Node>) -> PResult<Node> {
        self.expect_word("VIEW")?;
        children.extend(self.parse_if_not_exists()?);
        children.push(self.parse_qualified_name()?);
        if self.check(&TokenKind::LeftParen) {
            children.push(self.parse_column_list()?);
        }
        if self.check_keyword(Keyword::Using) {
            children.push(self.parse_access_method()?);
        }
        if self.check_keyword(Keyword::With) {
            children.push(self.parse_storage_parameters()?);
        }
        if self.check_word("TABLESPACE") {
            children.push(self.parse_tablespace()?);
        }

        let as_start = self.current().span.start;
        self.expect_keyword(Keyword::As)?;
        let query = self.parse_query()?;
        children.push(
            self.finish(NodeKind::AsQuery, as_start)
                .with_children(vec![query]),
        );

        if let Some(data) = self.parse_with_data()? {
            children.push(data);
        } else if self.eat_keyword(Keyword::With) {
            if !self.eat_word("CASCADED") {
                self.eat_word("LOCAL");
            }
            self.expect_keyword(Keyword::Check)?;
            self.expect_word("OPTION")?;
        }

        Ok(self.finish(NodeKind::CreateView, start).with_children(children))
    }

    // --- CREATE FUNCTION / PROCEDURE ---

    fn parse_create_function(&mut self, start: usize, mut children: Vec<Node>) -> PResult<Node> {
        let routine = self.current_word().unwrap_or_default();
        self.advance();
        children.push(self.parse_qualified_name()?);

        self.expect(&TokenKind::LeftParen)?;
        if !self.check(&TokenKind::RightParen) {
            loop {
                children.push(self.parse_parameter_def()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RightParen)?;

        while let Some(option) = self.parse_routine_characteristic()? {
            children.push(option);
        }

        Ok(self
            .finish(NodeKind::CreateFunction, start)
            .with_value(routine)
            .with_children(children))
    }

    /// Parses `[IN|OUT|INOUT|VARIADIC] [name] type [DEFAULT expr]`.
    fn parse_parameter_def(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        let mut mode = None;
        if self.eat_keyword(Keyword::In) {
            mode = Some("IN");
        } else if self.check_any_word(&["OUT", "INOUT", "VARIADIC"]) {
            let word = self.current_word().unwrap_or_default();
            mode = match word.as_str() {
                "OUT" => Some("OUT"),
                "INOUT" => Some("INOUT"),
                _ => Some("VARIADIC"),
            };
            self.advance();
        }

        let named = self.check_identifier() && {
            let first = self.current_word();
            let next = self.peek();
            let next_is_name = matches!(
                next.kind,
                TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_)
            );
            let continues_type = match first.as_deref() {
                Some("DOUBLE") => next.is_word("PRECISION"),
                Some("CHARACTER" | "CHAR" | "BIT") => next.is_word("VARYING"),
                Some("NATIONAL") => true,
                _ => false,
            };
            next_is_name && !continues_type
        };
        let name = if named {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        let mut children = vec![self.parse_data_type()?];
        if self.eat_keyword(Keyword::Default) || self.eat(&TokenKind::Eq) {
            children.push(self.parse_expr()?);
        }

        let node = self
            .finish(NodeKind::ParameterDef, start)
            .with_children(children);
        Ok(match (name, mode) {
            (Some(name), _) => node.with_value(name),
            (None, Some(mode)) => node.with_value(mode),
            (None, None) => node,
        })
    }

    /// Parses one routine characteristic: RETURNS, LANGUAGE, the body, or a
    /// generic option recorded by its source text.
    fn parse_routine_characteristic(&mut self) -> PResult<Option<Node>> {
        let start = self.current().span.start;

        if self.check_word("RETURNS") && !matches!(self.peek().kind, TokenKind::Keyword(Keyword::Null)) {
            self.advance();
            let node = if self.eat_keyword(Keyword::Table) {
                self.skip_parenthesized()?;
                self.finish(NodeKind::Returns, start).with_value("TABLE")
            } else {
                let setof = self.eat_word("SETOF");
                let data_type = self.parse_data_type()?;
                let node = self
                    .finish(NodeKind::Returns, start)
                    .with_children(vec![data_type]);
                if setof {
                    node.with_value("SETOF")
                } else {
                    node
                }
            };
            return Ok(Some(node));
        }

        if self.eat_word("LANGUAGE") {
            let language = match &self.current().kind {
                TokenKind::Identifier(name) | TokenKind::String(name) => name.to_lowercase(),
                TokenKind::QuotedIdentifier(name) => name.clone(),
                _ => return Err(SyntaxError::unexpected("language name", self.current())),
            };
            self.advance();
            return Ok(Some(self.finish(NodeKind::Language, start).with_value(language)));
        }

        if self.eat_keyword(Keyword::As) {
            let TokenKind::String(body) = &self.current().kind else {
                return Err(SyntaxError::unexpected("routine body", self.current()));
            };
            let body = body.clone();
            self.advance();
            if self.eat(&TokenKind::Comma) {
                if !matches!(self.current().kind, TokenKind::String(_)) {
                    return Err(SyntaxError::unexpected("link symbol", self.current()));
                }
                self.advance();
            }
            return Ok(Some(self.finish(NodeKind::RoutineBody, start).with_value(body)));
        }

        if self.check_word("BEGIN") && self.peek().is_word("ATOMIC") {
            self.advance();
            self.advance();
            self.skip_atomic_body()?;
            return Ok(Some(
                self.finish(NodeKind::RoutineBody, start)
                    .with_value("BEGIN ATOMIC"),
            ));
        }

        if self.eat_word("RETURN") {
            let expr = self.parse_expr()?;
            return Ok(Some(
                self.finish(NodeKind::RoutineBody, start)
                    .with_value("RETURN")
                    .with_children(vec![expr]),
            ));
        }

        let generic = self.check_any_word(ROUTINE_OPTION_WORDS)
            || self.check_keyword(Keyword::Not)
            || self.check_keyword(Keyword::Set);
        if !generic {
            return Ok(None);
        }
        let first = self.current_word();
        self.advance();
        if matches!(first.as_deref(), Some("NOT" | "EXTERNAL" | "RETURNS")) {
            self.advance();
        }
        while !self.check(&TokenKind::Semicolon)
            && !self.current().is_eof()
            && !self.check_any_word(ROUTINE_OPTION_WORDS)
            && !self.check_keyword(Keyword::As)
            && !self.check_keyword(Keyword::Not)
            && !self.check_keyword(Keyword::Set)
        {
            if matches!(self.current().kind, TokenKind::Error(_)) {
                return Err(SyntaxError::unexpected("routine option", self.current()));
            }
            self.advance();
        }
        let span = self.finish(NodeKind::RoutineOption, start).span;
        let text = self.source_text(span);
        Ok(Some(
            self.finish(NodeKind::RoutineOption, start)
                .with_value(text),
        ))
    }

    /// Consumes the statements of a `BEGIN ATOMIC ... END` body.
    fn skip_atomic_body(&mut self) -> PResult<()> {
        let mut depth = 0usize;
        loop {
            match &self.current().kind {
                TokenKind::Keyword(Keyword::Case) => depth += 1,
                TokenKind::Keyword(Keyword::End) if depth == 0 => {
                    self.advance();
                    return Ok(());
                }
                TokenKind::Keyword(Keyword::End) => depth -= 1,
                TokenKind::Eof | TokenKind::Error(_) => {
                    return Err(SyntaxError::unexpected("END", self.current()));
                }
                _ => {}
            }
            self.advance();
        }
    }

    // --- ALTER ---

    /// Parses an `ALTER` statement. Only `ALTER TABLE` is analyzed; other
    /// object kinds are recorded as opaque statements.
    pub(crate) fn parse_alter(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        self.expect_keyword(Keyword::Alter)?;
        if self.eat_word("EXTENSION") {
            return self.parse_alter_extension(start);
        }
        if self.check_word("INDEX")
            && !matches!(self.peek().kind, TokenKind::Keyword(Keyword::All))
        {
            self.advance();
            return self.parse_alter_index(start);
        }
        if self.eat_word("SEQUENCE") {
            return self.parse_alter_sequence(start);
        }
        if !self.check_keyword(Keyword::Table) {
            let kind = self.leading_words(ALTER_OBJECT_KINDS);
            if kind.is_empty() {
                return Err(SyntaxError::unexpected("object type", self.current()));
            }
            self.skip_to_statement_end()?;
            return Ok(self
                .finish(NodeKind::OtherStatement, start)
                .with_value(format!("ALTER {kind}")));
        }

        self.advance();
        let mut children = Vec::new();
        children.extend(self.parse_if_exists()?);
        if self.check_keyword(Keyword::Only) {
            let only = self.current().span.start;
            self.advance();
            children.push(self.finish(NodeKind::Only, only));
        }
        children.push(self.parse_qualified_name()?);
        self.eat(&TokenKind::Star);

        loop {
            children.push(self.parse_alter_table_action()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        Ok(self.finish(NodeKind::AlterTable, start).with_children(children))
    }

    /// Parses `ALTER EXTENSION name action`. The statement's value is the
    /// extension name.
    fn parse_alter_extension(&mut self, start: usize) -> PResult<Node> {
        let name = self.expect_identifier()?;
        let action =
            self.parse_opaque_alter_action(ALTER_EXTENSION_ACTIONS, "ALTER EXTENSION action")?;
        Ok(self
            .finish(NodeKind::AlterExtension, start)
            .with_value(name)
            .with_children(vec![action]))
    }

    /// Parses `ALTER INDEX [IF EXISTS] name action`.
    fn parse_alter_index(&mut self, start: usize) -> PResult<Node> {
        let mut children = Vec::new();
        children.extend(self.parse_if_exists()?);
        children.push(self.parse_qualified_name()?);
        children.push(
            self.parse_opaque_alter_action(ALTER_INDEX_ACTIONS, "ALTER INDEX action")?,
        );
        Ok(self
            .finish(NodeKind::AlterIndex, start)
            .with_children(children))
    }

    /// Parses `ALTER SEQUENCE [IF EXISTS] name` followed by sequence options
    /// or a single rename, schema or owner action.
    fn parse_alter_sequence(&mut self, start: usize) -> PResult<Node> {
        let mut children = Vec::new();
        children.extend(self.parse_if_exists()?);
        children.push(self.parse_qualified_name()?);
        let mut options = Vec::new();
        while let Some(option) = self.parse_sequence_option()? {
            options.push(option);
        }
        if options.is_empty() {
            children.push(
                self.parse_opaque_alter_action(ALTER_SEQUENCE_ACTIONS, "ALTER SEQUENCE action")?,
            );
        }
        children.extend(options);
        Ok(self
            .finish(NodeKind::AlterSequence, start)
            .with_children(children))
    }

    /// Parses an action named by one of `phrases` into an `alter_action`
    /// node. Its arguments are consumed without building nodes.
    fn parse_opaque_alter_action(&mut self, phrases: &[&str], expected: &str) -> PResult<Node> {
        let start = self.current().span.start;
        let words = self.leading_words(phrases);
        if words.is_empty() {
            return Err(SyntaxError::unexpected(expected, self.current()));
        }
        self.skip_to_statement_end()?;
        Ok(self.finish(NodeKind::AlterAction, start).with_value(words))
    }

    /// Parses one `ALTER TABLE` action into an `alter_action` node whose
    /// value names the action.
    fn parse_alter_table_action(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        let mut children = Vec::new();

        let value: String = if self.eat_word("ADD") {
            if !self.eat_keyword(Keyword::Column) && self.check_table_constraint_start() {
                children.push(self.parse_table_constraint()?);
                "ADD CONSTRAINT".into()
            } else {
                children.extend(self.parse_if_not_exists()?);
                children.push(self.parse_column_def()?);
                "ADD COLUMN".into()
            }
        } else if self.eat_keyword(Keyword::Drop) {
            let value = if self.eat_keyword(Keyword::Constraint) {
                "DROP CONSTRAINT"
            } else {
                self.eat_keyword(Keyword::Column);
                "DROP COLUMN"
            };
            children.extend(self.parse_if_exists()?);
            children.push(self.parse_identifier()?);
            children.extend(self.parse_drop_behavior());
            value.into()
        } else if self.eat_keyword(Keyword::Alter) {
            self.eat_keyword(Keyword::Column);
            children.push(self.parse_identifier()?);
            self.parse_alter_column(&mut children)?
        } else if self.eat_word("RENAME") {
            if self.eat_keyword(Keyword::To) {
                children.push(self.parse_identifier()?);
                "RENAME TO".into()
            } else {
                let value = if self.eat_keyword(Keyword::Constraint) {
                    "RENAME CONSTRAINT"
                } else {
                    self.eat_keyword(Keyword::Column);
                    "RENAME COLUMN"
                };
                children.push(self.parse_identifier()?);
                self.expect_keyword(Keyword::To)?;
                children.push(self.parse_identifier()?);
                value.into()
            }
        } else if self.eat_word("OWNER") {
            self.expect_keyword(Keyword::To)?;
            children.push(self.parse_identifier()?);
            "OWNER TO".into()
        } else if self.check_keyword(Keyword::Set) && self.peek().is_word("SCHEMA") {
            self.advance();
            self.advance();
            children.push(self.parse_identifier()?);
            "SET SCHEMA".into()
        } else if self.check_keyword(Keyword::Set) && self.peek().is_word("TABLESPACE") {
            self.advance();
            self.advance();
            children.push(self.parse_identifier()?);
            "SET TABLESPACE".into()
        } else if self.eat_keyword(Keyword::Set) {
            let word = self.current_word().unwrap_or_default();
            self.skip_alter_action()?;
            format!("SET {word}").trim_end().to_string()
        } else if self.eat_word("ATTACH") {
            self.expect_word("PARTITION")?;
            children.push(self.parse_qualified_name()?);
            self.parse_partition_bound()?;
            "ATTACH PARTITION".into()
        } else if self.eat_word("DETACH") {
            self.expect_word("PARTITION")?;
            children.push(self.parse_qualified_name()?);
            if !self.eat_word("CONCURRENTLY") {
                self.eat_word("FINALIZE");
            }
            "DETACH PARTITION".into()
        } else {
            let words = self.leading_words(ALTER_TABLE_OPAQUE_ACTIONS);
            if words.is_empty() {
                return Err(SyntaxError::unexpected("ALTER TABLE action", self.current()));
            }
            self.skip_alter_action()?;
            words
        };

        Ok(self
            .finish(NodeKind::AlterAction, start)
            .with_value(value)
            .with_children(children))
    }

    /// Parses the part of `ALTER COLUMN name ...` after the column name.
    fn parse_alter_column(&mut self, children: &mut Vec<Node>) -> PResult<String> {
        if self.check_keyword(Keyword::Set) && self.peek().is_word("DATA") {
            self.advance();
            self.advance();
        }
        if self.eat_word("TYPE") {
            children.push(self.parse_data_type()?);
            if self.eat_keyword(Keyword::Collate) {
                children.push(self.parse_qualified_name()?);
            }
            if self.eat_keyword(Keyword::Using) {
                children.push(self.parse_expr()?);
            }
            return Ok("ALTER COLUMN TYPE".into());
        }
        if self.eat_keyword(Keyword::Set) {
            if self.eat_keyword(Keyword::Default) {
                children.push(self.parse_expr()?);
                return Ok("ALTER COLUMN SET DEFAULT".into());
            }
            if self.eat_keyword(Keyword::Not) {
                self.expect_keyword(Keyword::Null)?;
                return Ok("ALTER COLUMN SET NOT NULL".into());
            }
            let word = self.current_word().unwrap_or_default();
            self.skip_alter_action()?;
            return Ok(format!("ALTER COLUMN SET {word}").trim_end().to_string());
        }
        if self.eat_keyword(Keyword::Drop) {
            if self.eat_keyword(Keyword::Default) {
                return Ok("ALTER COLUMN DROP DEFAULT".into());
            }
            if self.eat_keyword(Keyword::Not) {
                self.expect_keyword(Keyword::Null)?;
                return Ok("ALTER COLUMN DROP NOT NULL".into());
            }
            let word = self.current_word().unwrap_or_default();
            self.skip_alter_action()?;
            return Ok(format!("ALTER COLUMN DROP {word}").trim_end().to_string());
        }
        if self.eat_word("ADD") {
            let mut generated = Vec::new();
            self.expect_word("GENERATED")?;
            self.parse_generated(&mut generated)?;
            children.extend(generated);
            return Ok("ALTER COLUMN ADD IDENTITY".into());
        }
        Err(SyntaxError::unexpected("ALTER COLUMN action", self.current()))
    }

    /// Consumes the rest of an `ALTER TABLE` action up to the next top-level
    /// comma or the end of the statement.
    fn skip_alter_action(&mut self) -> PResult<()> {
        loop {
            match &self.current().kind {
                TokenKind::Comma | TokenKind::Semicolon | TokenKind::Eof => return Ok(()),
                TokenKind::LeftParen => self.skip_parenthesized()?,
                TokenKind::Error(_) => {
                    return Err(SyntaxError::unexpected("token", self.current()));
                }
                _ => self.advance(),
            }
        }
    }

    // --- DROP ---

    /// Parses `DROP kind [IF EXISTS] names [CASCADE|RESTRICT]`.
    pub(crate) fn parse_drop(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        self.expect_keyword(Keyword::Drop)?;
        let kind = self.leading_words(DROP_OBJECT_KINDS);
        if kind.is_empty() {
            return Err(SyntaxError::unexpected("object type", self.current()));
        }

        let mut children = Vec::new();
        if kind == "INDEX" && self.check_word("CONCURRENTLY") {
            let concurrently = self.current().span.start;
            self.advance();
            children.push(self.finish(NodeKind::Concurrently, concurrently));
        }
        children.extend(self.parse_if_exists()?);

        if DROP_NAMED_KINDS.contains(&kind.as_str())
            || matches!(kind.as_str(), "FUNCTION" | "PROCEDURE" | "ROUTINE" | "AGGREGATE")
        {
            loop {
                children.push(self.parse_qualified_name()?);
                if self.check(&TokenKind::LeftParen) {
                    self.skip_parenthesized()?;
                }
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        } else {
            while !self.check(&TokenKind::Semicolon)
                && !self.current().is_eof()
                && !self.check_any_word(&["CASCADE", "RESTRICT"])
            {
                if matches!(self.current().kind, TokenKind::Error(_)) {
                    return Err(SyntaxError::unexpected("token", self.current()));
                }
                self.advance();
            }
        }
        children.extend(self.parse_drop_behavior());

        Ok(self
            .finish(NodeKind::Drop, start)
            .with_value(kind)
            .with_children(children))
    }

    fn parse_drop_behavior(&mut self) -> Option<Node> {
        let start = self.current().span.start;
        let value = if self.eat_word("CASCADE") {
            "CASCADE"
        } else if self.eat_word("RESTRICT") {
            "RESTRICT"
        } else {
            return None;
        };
        Some(self.finish(NodeKind::DropBehavior, start).with_value(value))
    }

    // --- GRANT / REVOKE ---

    /// Parses `GRANT privileges ON target TO grantees [WITH GRANT OPTION]`
    /// and role membership grants.
    pub(crate) fn parse_grant(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        self.expect_keyword(Keyword::Grant)?;
        let mut children = vec![self.parse_privileges()?];
        if self.check_keyword(Keyword::On) {
            children.push(self.parse_privilege_target()?);
        }
        self.expect_keyword(Keyword::To)?;
        children.push(self.parse_grantees()?);

        if self.check_keyword(Keyword::With) {
            let option = self.current().span.start;
            self.advance();
            let value = if self.eat_keyword(Keyword::Grant) {
                "GRANT OPTION"
            } else if self.eat_word("ADMIN") {
                "ADMIN OPTION"
            } else {
                self.expect_word("INHERIT")?;
                "INHERIT OPTION"
            };
            if !self.eat_word("OPTION") && self.current_word().is_some() {
                self.advance();
            }
            children.push(self.finish(NodeKind::GrantOption, option).with_value(value));
        }
        self.parse_granted_by()?;

        Ok(self.finish(NodeKind::Grant, start).with_children(children))
    }

    /// Parses `REVOKE [GRANT OPTION FOR] privileges ON target FROM grantees`.
    pub(crate) fn parse_revoke(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        self.expect_keyword(Keyword::Revoke)?;
        let mut children = Vec::new();

        let option = self.current().span.start;
        let option_value = if self.check_keyword(Keyword::Grant) && self.peek().is_word("OPTION") {
            Some("GRANT OPTION FOR")
        } else if self.check_word("ADMIN") && self.peek().is_word("OPTION") {
            Some("ADMIN OPTION FOR")
        } else {
            None
        };
        if let Some(value) = option_value {
            self.advance();
            self.advance();
            self.expect_keyword(Keyword::For)?;
            children.push(self.finish(NodeKind::GrantOption, option).with_value(value));
        }

        children.push(self.parse_privileges()?);
        if self.check_keyword(Keyword::On) {
            children.push(self.parse_privilege_target()?);
        }
        self.expect_keyword(Keyword::From)?;
        children.push(self.parse_grantees()?);
        self.parse_granted_by()?;
        children.extend(self.parse_drop_behavior());

        Ok(self.finish(NodeKind::Revoke, start).with_children(children))
    }

    /// Parses the privilege (or role) list into a `privileges` node whose
    /// value is the comma-separated privilege names.
    fn parse_privileges(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        let mut groups = Vec::new();
        loop {
            let mut words = Vec::new();
            loop {
                if self.check_keyword(Keyword::On)
                    || self.check_keyword(Keyword::To)
                    || self.check_keyword(Keyword::From)
                {
                    break;
                }
                if self.check(&TokenKind::LeftParen) {
                    self.parse_column_list()?;
                    continue;
                }
                match (&self.current().kind, self.current_word()) {
                    (_, Some(word)) => words.push(word),
                    (TokenKind::QuotedIdentifier(name), None) => words.push(name.clone()),
                    _ => break,
                }
                self.advance();
            }
            if words.is_empty() {
                return Err(SyntaxError::unexpected("privilege", self.current()));
            }
            groups.push(words.join(" "));
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(self
            .finish(NodeKind::Privileges, start)
            .with_value(groups.join(", ")))
    }

    /// Parses `ON [kind] objects` into a `privilege_target` node. The kind
    /// defaults to TABLE.
    fn parse_privilege_target(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        self.expect_keyword(Keyword::On)?;
        let mut kind = self.leading_words(PRIVILEGE_TARGET_KINDS);
        if kind.is_empty() {
            kind = "TABLE".to_string();
        }

        let mut objects = Vec::new();
        loop {
            if matches!(self.current().kind, TokenKind::Number(_)) {
                objects.push(self.parse_signed_number()?);
            } else {
                objects.push(self.parse_qualified_name()?);
                if self.check(&TokenKind::LeftParen) {
                    self.skip_parenthesized()?;
                }
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        Ok(self
            .finish(NodeKind::PrivilegeTarget, start)
            .with_value(kind)
            .with_children(objects))
    }

    fn parse_grantees(&mut self) -> PResult<Node> {
        let start = self.current().span.start;
        let mut grantees = Vec::new();
        loop {
            self.eat_keyword(Keyword::Group);
            grantees.push(self.parse_identifier()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(self.finish(NodeKind::Grantees, start).with_children(grantees))
    }

    fn parse_granted_by(&mut self) -> PResult<()> {
        if self.eat_word("GRANTED") {
            self.expect_keyword(Keyword::By)?;
            self.expect_identifier()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::Parser;
    use crate::tree::{Node, NodeKind};

    fn statement(sql: &str) -> Node {
        let (tree, errors) = Parser::new(sql).parse_script();
        assert!(errors.is_empty(), "unexpected errors for {sql}: {errors:?}");
        tree.into_root().children.remove(0)
    }

    fn values(node: &Node, kind: NodeKind) -> Vec<String> {
        node.walk()
            .filter(|(n, _)| n.kind == kind)
            .filter_map(|(n, _)| n.value.clone())
            .collect()
    }

    #[test]
    fn test_create_table_with_shard_key() {
        let stmt = statement("CREATE TABLE t (id INT PRIMARY KEY, name TEXT NOT NULL) SHARD KEY (id)");
        assert_eq!(stmt.kind, NodeKind::CreateTable);
        assert_eq!(values(&stmt, NodeKind::ColumnDef), vec!["id", "name"]);
        let shard = stmt.child(NodeKind::ShardKey).unwrap();
        assert_eq!(shard.children[0].value(), Some("id"));
        assert_eq!(
            values(&stmt, NodeKind::ColumnConstraint),
            vec!["PRIMARY KEY", "NOT NULL"]
        );
    }

    #[test]
    fn test_create_table_options() {
        let stmt = statement(
            "CREATE TEMP TABLE IF NOT EXISTS s.t (LIKE base INCLUDING ALL) \
             INHERITS (p) USING heap WITH (fillfactor = 70) ON COMMIT DELETE ROWS TABLESPACE fast",
        );
        for kind in [
            NodeKind::Temporary,
            NodeKind::IfNotExists,
            NodeKind::LikeClause,
            NodeKind::Inherits,
            NodeKind::AccessMethod,
            NodeKind::StorageParameters,
            NodeKind::OnCommit,
            NodeKind::Tablespace,
        ] {
            assert!(stmt.has_child(kind), "missing {kind}");
        }
        assert_eq!(stmt.child(NodeKind::OnCommit).unwrap().value(), Some("DELETE ROWS"));
        assert_eq!(values(&stmt, NodeKind::StorageParameter), vec!["fillfactor"]);
    }

    #[test]
    fn test_create_table_of_type_and_partition_of() {
        let stmt = statement("CREATE TABLE t OF person");
        assert_eq!(stmt.child(NodeKind::OfType).unwrap().value(), Some("person"));

        let stmt = statement("CREATE TABLE m1 PARTITION OF m FOR VALUES FROM (1) TO (10)");
        assert!(!stmt.has_child(NodeKind::OfType));
        assert_eq!(
            stmt.child(NodeKind::PartitionBound).unwrap().value(),
            Some("FOR VALUES FROM")
        );
    }

    #[test]
    fn test_partition_by_and_constraints() {
        let stmt = statement(
            "CREATE TABLE m (id int, at date, CONSTRAINT fk FOREIGN KEY (id) REFERENCES o (id) ON DELETE CASCADE, \
             EXCLUDE USING gist (at WITH &&)) PARTITION BY RANGE (at)",
        );
        assert_eq!(stmt.child(NodeKind::PartitionBy).unwrap().value(), Some("RANGE"));
        assert_eq!(
            values(&stmt, NodeKind::TableConstraint),
            vec!["FOREIGN KEY", "EXCLUDE"]
        );
        assert_eq!(values(&stmt, NodeKind::IndexElement), vec!["WITH &&"]);
        assert_eq!(values(&stmt, NodeKind::ReferentialAction), vec!["ON DELETE CASCADE"]);
    }

    #[test]
    fn test_generated_columns() {
        let stmt = statement(
            "CREATE TABLE t (a int GENERATED ALWAYS AS IDENTITY (START WITH 10), \
             b int GENERATED ALWAYS AS (a * 2) STORED)",
        );
        assert_eq!(
            values(&stmt, NodeKind::ColumnConstraint),
            vec!["IDENTITY", "GENERATED STORED"]
        );
        assert_eq!(values(&stmt, NodeKind::SequenceOption), vec!["START"]);
    }

    #[test]
    fn test_create_table_as() {
        let stmt = statement("CREATE TABLE t AS SELECT * FROM s WITH NO DATA");
        assert!(stmt.has_child(NodeKind::AsQuery));
        assert_eq!(stmt.child(NodeKind::WithData).unwrap().value(), Some("WITH NO DATA"));
    }

    #[test]
    fn test_create_index() {
        let stmt = statement(
            "CREATE UNIQUE INDEX CONCURRENTLY IF NOT EXISTS ix ON ONLY t USING HASH (lower(name) DESC) WHERE id > 0",
        );
        assert_eq!(stmt.kind, NodeKind::CreateIndex);
        assert!(stmt.has_child(NodeKind::Unique));
        assert!(stmt.has_child(NodeKind::Concurrently));
        assert_eq!(stmt.child(NodeKind::AccessMethod).unwrap().value(), Some("hash"));
        assert_eq!(stmt.child(NodeKind::IndexElement).unwrap().value(), Some("DESC"));
        assert!(stmt.has_child(NodeKind::Where));
    }

    #[test]
    fn test_create_schema_with_elements() {
        let stmt = statement("CREATE SCHEMA hr AUTHORIZATION joe CREATE TABLE a (x int) CREATE VIEW v AS SELECT 1");
        assert_eq!(stmt.value(), Some("hr"));
        let elements = stmt.child(NodeKind::SchemaElements).unwrap();
        let kinds: Vec<NodeKind> = elements.children.iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NodeKind::CreateTable, NodeKind::CreateView]);
    }

    #[test]
    fn test_create_extension() {
        let stmt = statement("CREATE EXTENSION IF NOT EXISTS hstore WITH SCHEMA ext VERSION '1.8' CASCADE");
        assert_eq!(stmt.value(), Some("hstore"));
        assert_eq!(stmt.child(NodeKind::SchemaName).unwrap().value(), Some("ext"));
        assert_eq!(stmt.child(NodeKind::Version).unwrap().value(), Some("1.8"));
        assert!(stmt.has_child(NodeKind::Cascade));
    }

    #[test]
    fn test_create_sequence_options() {
        let stmt = statement(
            "CREATE SEQUENCE s AS smallint INCREMENT BY -2 MINVALUE -100 NO MAXVALUE START WITH 5 CACHE 10 NO CYCLE OWNED BY t.id",
        );
        assert_eq!(
            values(&stmt, NodeKind::SequenceOption),
            vec!["AS", "INCREMENT", "MINVALUE", "NO MAXVALUE", "START", "CACHE", "NO CYCLE", "OWNED BY"]
        );
        let increment = stmt.children_of(NodeKind::SequenceOption).nth(1).unwrap();
        assert_eq!(increment.children[0].value(), Some("-2"));
    }

    #[test]
    fn test_create_function_and_procedure() {
        let stmt = statement(
            "CREATE OR REPLACE FUNCTION add(a integer, b double precision DEFAULT 1) RETURNS integer \
             LANGUAGE plpgsql IMMUTABLE STRICT AS $$ BEGIN RETURN a + b; END; $$",
        );
        assert_eq!(stmt.value(), Some("FUNCTION"));
        assert!(stmt.has_child(NodeKind::OrReplace));
        assert_eq!(values(&stmt, NodeKind::ParameterDef), vec!["a", "b"]);
        assert_eq!(stmt.child(NodeKind::Language).unwrap().value(), Some("plpgsql"));
        assert_eq!(values(&stmt, NodeKind::RoutineOption), vec!["IMMUTABLE", "STRICT"]);
        assert!(stmt.has_child(NodeKind::RoutineBody));

        let stmt = statement("CREATE PROCEDURE p() RETURNS int LANGUAGE sql AS 'SELECT 1'");
        assert_eq!(stmt.value(), Some("PROCEDURE"));
        assert!(stmt.has_child(NodeKind::Returns));
    }

    #[test]
    fn test_alter_table_actions() {
        let stmt = statement(
            "ALTER TABLE IF EXISTS t ADD COLUMN c int NOT NULL, DROP CONSTRAINT k CASCADE, \
             ALTER COLUMN c SET DEFAULT 0, ALTER c TYPE bigint, RENAME TO u, ENABLE ROW LEVEL SECURITY",
        );
        assert_eq!(
            values(&stmt, NodeKind::AlterAction),
            vec![
                "ADD COLUMN",
                "DROP CONSTRAINT",
                "ALTER COLUMN SET DEFAULT",
                "ALTER COLUMN TYPE",
                "RENAME TO",
                "ENABLE ROW LEVEL SECURITY"
            ]
        );
    }

    #[test]
    fn test_opaque_statements_record_kind() {
        assert_eq!(
            statement("CREATE TRIGGER trg AFTER INSERT ON t EXECUTE FUNCTION f()").value(),
            Some("CREATE TRIGGER")
        );
        assert_eq!(
            statement("CREATE FOREIGN DATA WRAPPER dummy").value(),
            Some("CREATE FOREIGN DATA WRAPPER")
        );
        assert_eq!(
            statement("ALTER INDEX ALL IN TABLESPACE a SET TABLESPACE b").value(),
            Some("ALTER INDEX")
        );
    }

    #[test]
    fn test_alter_extension_index_and_sequence() {
        let stmt = statement("ALTER EXTENSION PostGIS UPDATE TO '3.4'");
        assert_eq!(stmt.kind, NodeKind::AlterExtension);
        assert_eq!(stmt.value(), Some("postgis"));
        assert_eq!(stmt.child(NodeKind::AlterAction).unwrap().value(), Some("UPDATE"));

        let stmt = statement("ALTER EXTENSION hstore SET SCHEMA utils");
        assert_eq!(stmt.child(NodeKind::AlterAction).unwrap().value(), Some("SET SCHEMA"));

        let stmt = statement("ALTER INDEX IF EXISTS s.i RENAME TO j");
        assert_eq!(stmt.kind, NodeKind::AlterIndex);
        assert!(stmt.has_child(NodeKind::IfExists));
        assert_eq!(stmt.child(NodeKind::QualifiedName).unwrap().value(), Some("s.i"));
        assert_eq!(stmt.child(NodeKind::AlterAction).unwrap().value(), Some("RENAME TO"));

        let stmt = statement("ALTER INDEX i SET (fillfactor = 70)");
        assert_eq!(stmt.child(NodeKind::AlterAction).unwrap().value(), Some("SET"));

        let stmt = statement("ALTER SEQUENCE s RESTART WITH 5 CYCLE OWNED BY t.id");
        assert_eq!(stmt.kind, NodeKind::AlterSequence);
        assert_eq!(
            values(&stmt, NodeKind::SequenceOption),
            vec!["RESTART", "CYCLE", "OWNED BY"]
        );
        assert!(!stmt.has_child(NodeKind::AlterAction));

        let stmt = statement("ALTER SEQUENCE s OWNER TO bob");
        assert_eq!(stmt.child(NodeKind::AlterAction).unwrap().value(), Some("OWNER TO"));
        assert!(!stmt.has_child(NodeKind::SequenceOption));
    }

    #[test]
    fn test_drop() {
        let stmt = statement("DROP MATERIALIZED VIEW IF EXISTS a, b.c CASCADE");
        assert_eq!(stmt.value(), Some("MATERIALIZED VIEW"));
        assert_eq!(values(&stmt, NodeKind::QualifiedName), vec!["a", "b.c"]);
        assert_eq!(stmt.child(NodeKind::DropBehavior).unwrap().value(), Some("CASCADE"));
    }

    #[test]
    fn test_grant_targets() {
        let stmt = statement("GRANT SELECT, UPDATE (a) ON ALL TABLES IN SCHEMA public TO alice WITH GRANT OPTION");
        assert_eq!(stmt.child(NodeKind::Privileges).unwrap().value(), Some("SELECT, UPDATE"));
        assert_eq!(
            stmt.child(NodeKind::PrivilegeTarget).unwrap().value(),
            Some("ALL TABLES IN SCHEMA")
        );
        assert!(stmt.has_child(NodeKind::GrantOption));

        let stmt = statement("GRANT USAGE ON FOREIGN DATA WRAPPER fdw TO bob");
        assert_eq!(
            stmt.child(NodeKind::PrivilegeTarget).unwrap().value(),
            Some("FOREIGN DATA WRAPPER")
        );

        let stmt = statement("REVOKE ALL ON t FROM PUBLIC CASCADE");
        assert_eq!(stmt.child(NodeKind::PrivilegeTarget).unwrap().value(), Some("TABLE"));
        assert!(stmt.has_child(NodeKind::DropBehavior));
    }

    #[test]
    fn test_grant_role_membership() {
        let stmt = statement("GRANT admins TO carol");
        assert!(!stmt.has_child(NodeKind::PrivilegeTarget));
        assert_eq!(stmt.child(NodeKind::Privileges).unwrap().value(), Some("ADMINS"));
    }
}
