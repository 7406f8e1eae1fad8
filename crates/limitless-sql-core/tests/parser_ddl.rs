//! Tests for DDL and privilege statements.

mod common;
use common::*;

use limitless_sql_core::NodeKind;

#[test]
fn create_table_column_constraints() {
    let s = parse_statement(
        "CREATE TABLE orders (\
            id bigserial PRIMARY KEY, \
            customer_id int NOT NULL REFERENCES customers (id) ON DELETE SET NULL ON UPDATE CASCADE, \
            total numeric(10, 2) DEFAULT 0 CHECK (total >= 0), \
            note text COLLATE \"C\", \
            code varchar(8) UNIQUE DEFERRABLE INITIALLY DEFERRED\
        )",
    );
    assert_eq!(
        values(&s, NodeKind::ColumnDef),
        vec!["id", "customer_id", "total", "note", "code"]
    );
    assert_eq!(
        values(&s, NodeKind::DataType),
        vec!["bigserial", "int", "numeric", "text", "varchar"]
    );
    assert_eq!(
        values(&s, NodeKind::ReferentialAction),
        vec!["ON DELETE SET NULL", "ON UPDATE CASCADE"]
    );
    assert_eq!(
        values(&s, NodeKind::ColumnConstraint),
        vec![
            "PRIMARY KEY",
            "NOT NULL",
            "REFERENCES",
            "DEFAULT",
            "CHECK",
            "COLLATE",
            "UNIQUE"
        ]
    );
}

#[test]
fn create_table_named_table_constraints() {
    let s = parse_statement(
        "CREATE UNLOGGED TABLE t (a int, b int, \
         CONSTRAINT pk PRIMARY KEY (a) INCLUDE (b) WITH (fillfactor = 90), \
         UNIQUE NULLS NOT DISTINCT (b))",
    );
    assert!(s.has_child(NodeKind::Unlogged));
    assert_eq!(values(&s, NodeKind::TableConstraint), vec!["PRIMARY KEY", "UNIQUE"]);
    let pk = s.children_of(NodeKind::TableConstraint).next().unwrap();
    assert_eq!(pk.child(NodeKind::Identifier).unwrap().value(), Some("pk"));
    assert!(pk.has_child(NodeKind::Include));
    assert!(pk.has_child(NodeKind::StorageParameters));
}

#[test]
fn create_table_partitioning() {
    let s = parse_statement("CREATE TABLE m (id int, region text) PARTITION BY LIST (region)");
    assert_eq!(s.child(NodeKind::PartitionBy).unwrap().value(), Some("LIST"));

    let s = parse_statement("CREATE TABLE m_eu PARTITION OF m FOR VALUES IN ('eu')");
    assert_eq!(
        s.child(NodeKind::PartitionBound).unwrap().value(),
        Some("FOR VALUES IN")
    );

    let s = parse_statement("CREATE TABLE m_rest PARTITION OF m DEFAULT");
    assert_eq!(s.child(NodeKind::PartitionBound).unwrap().value(), Some("DEFAULT"));
}

#[test]
fn create_table_misc_clauses() {
    let s = parse_statement("CREATE GLOBAL TEMPORARY TABLE t (a int) WITHOUT OIDS ON COMMIT DROP");
    assert!(s.has_child(NodeKind::Temporary));
    assert!(s.has_child(NodeKind::WithoutOids));
    assert_eq!(s.child(NodeKind::OnCommit).unwrap().value(), Some("DROP"));
}

#[test]
fn shard_key_span_covers_clause() {
    let sql = "CREATE TABLE t (id INT) SHARD KEY (id);";
    let s = parse_statement(sql);
    let shard = s.child(NodeKind::ShardKey).unwrap();
    assert_eq!(&sql[shard.span.start..shard.span.end], "SHARD KEY (id)");
}

#[test]
fn create_index_variants() {
    let s = parse_statement("CREATE INDEX ON t (a, b text_pattern_ops NULLS FIRST) TABLESPACE fast");
    assert!(!s.has_child(NodeKind::Identifier));
    assert_eq!(s.children_of(NodeKind::IndexElement).count(), 2);
    assert_eq!(values(&s, NodeKind::IndexElement), vec!["NULLS FIRST"]);
    assert_eq!(s.child(NodeKind::Tablespace).unwrap().value(), Some("fast"));

    let s = parse_statement("CREATE INDEX ix ON t USING gin (data) WITH (fastupdate = off)");
    assert_eq!(s.child(NodeKind::AccessMethod).unwrap().value(), Some("gin"));
    assert_eq!(values(&s, NodeKind::Literal), vec!["off"]);
}

#[test]
fn create_views() {
    let s = parse_statement("CREATE OR REPLACE VIEW v (a) AS SELECT 1 WITH LOCAL CHECK OPTION");
    assert_eq!(s.kind, NodeKind::CreateView);
    assert!(s.has_child(NodeKind::OrReplace));
    assert!(s.has_child(NodeKind::AsQuery));

    let s = parse_statement("CREATE MATERIALIZED VIEW mv AS SELECT * FROM t WITH NO DATA");
    assert!(s.has_child(NodeKind::Materialized));
    assert_eq!(s.child(NodeKind::WithData).unwrap().value(), Some("WITH NO DATA"));
}

#[test]
fn create_sequence_temporary() {
    let s = parse_statement("CREATE TEMP SEQUENCE IF NOT EXISTS s CYCLE");
    assert_eq!(s.kind, NodeKind::CreateSequence);
    assert!(s.has_child(NodeKind::Temporary));
    assert!(s.has_child(NodeKind::IfNotExists));
    assert_eq!(values(&s, NodeKind::SequenceOption), vec!["CYCLE"]);
}

#[test]
fn dollar_quoted_bodies_are_single_tokens() {
    let tree = parse_tree(
        "CREATE FUNCTION f() RETURNS void LANGUAGE plpgsql AS $body$ BEGIN PERFORM 1; END; $body$; SELECT 1;",
    );
    let kinds: Vec<NodeKind> = tree.statements().iter().map(|n| n.kind).collect();
    assert_eq!(kinds, vec![NodeKind::CreateFunction, NodeKind::Select]);
    let body = tree.statements()[0].child(NodeKind::RoutineBody).unwrap();
    assert_eq!(body.value(), Some(" BEGIN PERFORM 1; END; "));
}

#[test]
fn routine_options_and_sql_bodies() {
    let s = parse_statement(
        "CREATE FUNCTION f(VARIADIC xs int[]) RETURNS SETOF int LANGUAGE sql \
         SECURITY DEFINER SET search_path = public RETURN 1",
    );
    assert_eq!(s.child(NodeKind::Returns).unwrap().value(), Some("SETOF"));
    assert_eq!(
        values(&s, NodeKind::RoutineOption),
        vec!["SECURITY DEFINER", "SET search_path = public"]
    );
    assert_eq!(s.child(NodeKind::RoutineBody).unwrap().value(), Some("RETURN"));

    let s = parse_statement(
        "CREATE PROCEDURE p(IN a int) LANGUAGE sql BEGIN ATOMIC INSERT INTO t VALUES (a); END",
    );
    assert_eq!(s.child(NodeKind::RoutineBody).unwrap().value(), Some("BEGIN ATOMIC"));
}

#[test]
fn alter_table_partitions_and_ownership() {
    let s = parse_statement(
        "ALTER TABLE ONLY m ATTACH PARTITION m1 FOR VALUES FROM (1) TO (5), OWNER TO admin",
    );
    assert_eq!(s.kind, NodeKind::AlterTable);
    assert!(s.has_child(NodeKind::Only));
    assert_eq!(
        values(&s, NodeKind::AlterAction),
        vec!["ATTACH PARTITION", "OWNER TO"]
    );
}

#[test]
fn alter_table_add_constraint() {
    let s = parse_statement("ALTER TABLE t ADD CONSTRAINT fk FOREIGN KEY (a) REFERENCES u (id) NOT VALID");
    let action = s.child(NodeKind::AlterAction).unwrap();
    assert_eq!(action.value(), Some("ADD CONSTRAINT"));
    assert_eq!(values(action, NodeKind::TableConstraint), vec!["FOREIGN KEY"]);
}

#[test]
fn opaque_statements() {
    let tree = parse_tree(
        "CREATE RULE r AS ON INSERT TO t DO INSTEAD NOTHING; \
         CREATE OR REPLACE TRIGGER trg BEFORE UPDATE ON t FOR EACH ROW EXECUTE FUNCTION f(); \
         CREATE FOREIGN TABLE ft (a int) SERVER s; \
         CREATE TYPE mood AS ENUM ('sad', 'ok'); \
         ALTER DEFAULT PRIVILEGES GRANT SELECT ON TABLES TO r; \
         VACUUM ANALYZE t;",
    );
    let statement_values: Vec<Option<&str>> =
        tree.statements().iter().map(|n| n.value()).collect();
    assert_eq!(
        statement_values,
        vec![
            Some("CREATE RULE"),
            Some("CREATE TRIGGER"),
            Some("CREATE FOREIGN TABLE"),
            Some("CREATE TYPE"),
            Some("ALTER DEFAULT PRIVILEGES"),
            Some("VACUUM"),
        ]
    );
    assert!(tree.statements()[1].has_child(NodeKind::OrReplace));
}

#[test]
fn drop_statements() {
    let s = parse_statement("DROP INDEX CONCURRENTLY IF EXISTS ix RESTRICT");
    assert_eq!(s.value(), Some("INDEX"));
    assert!(s.has_child(NodeKind::Concurrently));
    assert!(s.has_child(NodeKind::IfExists));

    let s = parse_statement("DROP FUNCTION f(int), g()");
    assert_eq!(values(&s, NodeKind::QualifiedName), vec!["f", "g"]);

    let s = parse_statement("DROP TRIGGER trg ON t CASCADE");
    assert_eq!(s.value(), Some("TRIGGER"));
    assert!(s.has_child(NodeKind::DropBehavior));
}

#[test]
fn grant_on_each_target_kind() {
    let cases = [
        ("GRANT USAGE ON DOMAIN d TO r", "DOMAIN"),
        ("GRANT USAGE ON FOREIGN SERVER s TO r", "FOREIGN SERVER"),
        ("GRANT USAGE ON LANGUAGE plpgsql TO r", "LANGUAGE"),
        ("GRANT SELECT ON LARGE OBJECT 1234 TO r", "LARGE OBJECT"),
        ("GRANT EXECUTE ON PROCEDURE p(int) TO r", "PROCEDURE"),
        ("GRANT EXECUTE ON ROUTINE f TO r", "ROUTINE"),
        ("GRANT USAGE ON TYPE t TO r", "TYPE"),
        ("GRANT USAGE, SELECT ON SEQUENCE s TO r", "SEQUENCE"),
        ("GRANT CREATE ON SCHEMA app TO r", "SCHEMA"),
    ];
    for (sql, kind) in cases {
        let s = parse_statement(sql);
        assert_eq!(
            s.child(NodeKind::PrivilegeTarget).unwrap().value(),
            Some(kind),
            "{sql}"
        );
    }
}

#[test]
fn revoke_grant_option() {
    let s = parse_statement("REVOKE GRANT OPTION FOR SELECT ON t FROM r");
    assert_eq!(s.kind, NodeKind::Revoke);
    assert_eq!(
        s.child(NodeKind::GrantOption).unwrap().value(),
        Some("GRANT OPTION FOR")
    );
}

#[test]
fn create_schema_authorization_only() {
    let s = parse_statement("CREATE SCHEMA AUTHORIZATION app_owner");
    assert_eq!(s.value(), None);
    assert_eq!(
        s.child(NodeKind::Authorization).unwrap().value(),
        Some("app_owner")
    );
}
