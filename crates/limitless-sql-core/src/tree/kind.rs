//! Construct kinds and their categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Broad grouping of construct kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// The root of a unit.
    Script,
    /// A top-level or nested statement.
    Statement,
    /// A clause or option of a statement.
    Clause,
    /// A column, constraint or parameter definition.
    Definition,
    /// An expression.
    Expression,
    /// A name.
    Identifier,
    /// A literal value.
    Literal,
    /// A type reference.
    DataType,
    /// A region the parser could not understand.
    Unparsed,
}

macro_rules! node_kinds {
    ($($variant:ident => $name:literal, $category:ident;)*) => {
        /// The closed set of construct kinds a [`Node`](super::Node) can have.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum NodeKind {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )*
        }

        impl NodeKind {
            /// Every kind, in declaration order.
            pub const ALL: &'static [NodeKind] = &[$(NodeKind::$variant,)*];

            /// Returns the snake_case name used in catalogs and reports.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// Returns the category this kind belongs to.
            #[must_use]
            pub const fn category(&self) -> Category {
                match self {
                    $(Self::$variant => Category::$category,)*
                }
            }
        }

        impl FromStr for NodeKind {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Self::$variant),)*
                    other => Err(format!("unknown construct kind: {other}")),
                }
            }
        }
    };
}

node_kinds! {
    Script => "script", Script;

    // Statements
    Select => "select", Statement;
    Insert => "insert", Statement;
    Update => "update", Statement;
    Delete => "delete", Statement;
    CreateTable => "create_table", Statement;
    CreateIndex => "create_index", Statement;
    CreateSchema => "create_schema", Statement;
    CreateExtension => "create_extension", Statement;
    CreateSequence => "create_sequence", Statement;
    CreateView => "create_view", Statement;
    CreateFunction => "create_function", Statement;
    AlterTable => "alter_table", Statement;
    AlterExtension => "alter_extension", Statement;
    AlterIndex => "alter_index", Statement;
    AlterSequence => "alter_sequence", Statement;
    Drop => "drop", Statement;
    Grant => "grant", Statement;
    Revoke => "revoke", Statement;
    Transaction => "transaction", Statement;
    OtherStatement => "other_statement", Statement;

    // Statement modifiers
    Temporary => "temporary", Clause;
    Unlogged => "unlogged", Clause;
    IfNotExists => "if_not_exists", Clause;
    IfExists => "if_exists", Clause;
    OrReplace => "or_replace", Clause;
    Materialized => "materialized", Clause;
    Unique => "unique", Clause;
    Concurrently => "concurrently", Clause;
    Only => "only", Clause;

    // CREATE TABLE clauses
    LikeClause => "like_clause", Clause;
    OfType => "of_type", Clause;
    Inherits => "inherits", Clause;
    PartitionBy => "partition_by", Clause;
    PartitionBound => "partition_bound", Clause;
    AccessMethod => "access_method", Clause;
    StorageParameters => "storage_parameters", Clause;
    StorageParameter => "storage_parameter", Clause;
    WithoutOids => "without_oids", Clause;
    OnCommit => "on_commit", Clause;
    Tablespace => "tablespace", Clause;
    ShardKey => "shard_key", Clause;
    AsQuery => "as_query", Clause;
    WithData => "with_data", Clause;

    // Definitions
    ColumnDef => "column_def", Definition;
    ColumnConstraint => "column_constraint", Definition;
    TableConstraint => "table_constraint", Definition;
    References => "references", Clause;
    ReferentialAction => "referential_action", Clause;
    IndexElement => "index_element", Definition;
    Include => "include", Clause;
    ParameterDef => "parameter_def", Definition;

    // Queries
    With => "with", Clause;
    Cte => "cte", Clause;
    Distinct => "distinct", Clause;
    SelectList => "select_list", Clause;
    Alias => "alias", Clause;
    From => "from", Clause;
    Join => "join", Clause;
    JoinCondition => "join_condition", Clause;
    Where => "where", Clause;
    GroupBy => "group_by", Clause;
    Having => "having", Clause;
    OrderBy => "order_by", Clause;
    OrderItem => "order_item", Clause;
    Limit => "limit", Clause;
    Offset => "offset", Clause;
    Locking => "locking", Clause;
    SetOperation => "set_operation", Clause;
    Window => "window", Clause;
    WindowDef => "window_def", Clause;
    WindowPartition => "window_partition", Clause;
    WindowFrame => "window_frame", Clause;

    // Data manipulation
    ColumnList => "column_list", Clause;
    Values => "values", Clause;
    ValuesRow => "values_row", Clause;
    DefaultValues => "default_values", Clause;
    Assignment => "assignment", Clause;
    OnConflict => "on_conflict", Clause;
    Returning => "returning", Clause;
    Using => "using", Clause;

    // Schemas, extensions, sequences
    Authorization => "authorization", Clause;
    SchemaElements => "schema_elements", Clause;
    SchemaName => "schema_name", Clause;
    Version => "version", Clause;
    Cascade => "cascade", Clause;
    SequenceOption => "sequence_option", Clause;

    // Routines
    Returns => "returns", Clause;
    Language => "language", Clause;
    RoutineBody => "routine_body", Clause;
    RoutineOption => "routine_option", Clause;

    // ALTER / DROP
    AlterAction => "alter_action", Clause;
    DropBehavior => "drop_behavior", Clause;

    // Privileges
    Privileges => "privileges", Clause;
    PrivilegeTarget => "privilege_target", Clause;
    Grantees => "grantees", Clause;
    GrantOption => "grant_option", Clause;

    // Expressions
    BinaryExpr => "binary_expr", Expression;
    UnaryExpr => "unary_expr", Expression;
    FunctionCall => "function_call", Expression;
    Case => "case", Expression;
    WhenClause => "when_clause", Expression;
    Cast => "cast", Expression;
    Subquery => "subquery", Expression;
    Exists => "exists", Expression;
    InList => "in_list", Expression;
    Between => "between", Expression;
    IsTest => "is_test", Expression;
    ColumnRef => "column_ref", Expression;
    Wildcard => "wildcard", Expression;
    Parameter => "parameter", Expression;
    Array => "array", Expression;
    Subscript => "subscript", Expression;
    Row => "row", Expression;
    Collate => "collate", Expression;

    // Leaves
    Identifier => "identifier", Identifier;
    QualifiedName => "qualified_name", Identifier;
    Literal => "literal", Literal;
    DataType => "data_type", DataType;
    Unparsed => "unparsed", Unparsed;
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_from_str() {
        for kind in NodeKind::ALL {
            assert_eq!(kind.as_str().parse::<NodeKind>(), Ok(*kind));
        }
    }

    #[test]
    fn test_serde_name_matches_as_str() {
        let json = serde_json::to_string(&NodeKind::ShardKey).unwrap();
        assert_eq!(json, "\"shard_key\"");
        let kind: NodeKind = serde_json::from_str("\"create_table\"").unwrap();
        assert_eq!(kind, NodeKind::CreateTable);
    }

    #[test]
    fn test_categories() {
        assert_eq!(NodeKind::CreateTable.category(), Category::Statement);
        assert_eq!(NodeKind::ShardKey.category(), Category::Clause);
        assert_eq!(NodeKind::ColumnDef.category(), Category::Definition);
        assert_eq!(NodeKind::Unparsed.category(), Category::Unparsed);
        assert_eq!(NodeKind::DataType.category(), Category::DataType);
    }

    #[test]
    fn test_unknown_kind() {
        assert!("create_trigger".parse::<NodeKind>().is_err());
    }
}
