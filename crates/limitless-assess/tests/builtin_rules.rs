//! Tests for the rules of the built-in catalog.

mod common;
use common::*;

use limitless_assess::prelude::*;

#[test]
fn create_table_forms() {
    assert!(fires("CREATE TABLE t OF person", "create-table-of-type"));
    assert!(fires(
        "CREATE TABLE m1 PARTITION OF m FOR VALUES FROM (1) TO (10)",
        "create-table-partition-of"
    ));
    assert!(fires("CREATE TABLE t (LIKE base INCLUDING ALL)", "create-table-like"));
    assert!(fires("CREATE TEMP TABLE t (id int)", "create-temporary-table"));
    assert!(!fires("CREATE TEMP TABLE t (id int)", "create-temporary-sequence"));
}

#[test]
fn create_table_parameters() {
    let result = assess(
        "CREATE TABLE t (id int) INHERITS (p) USING heap WITH (fillfactor = 70) \
         ON COMMIT DELETE ROWS TABLESPACE fast",
    );
    let mut ids = rule_ids(&result.findings);
    ids.sort_unstable();
    assert_eq!(
        ids,
        vec![
            "parameter-inherits",
            "parameter-on-commit",
            "parameter-tablespace",
            "parameter-using-method",
            "storage-parameter",
        ]
    );
    let on_commit = of_rule(&result.findings, "parameter-on-commit");
    assert_eq!(on_commit[0].message, "ON COMMIT DELETE ROWS is not supported");

    let finding = single_finding("CREATE TABLE t (id int) PARTITION BY RANGE (id)");
    assert_eq!(finding.rule_id, "parameter-partition-by");
    assert_eq!(finding.message, "PARTITION BY RANGE is not supported");
}

#[test]
fn constraints() {
    assert!(fires(
        "CREATE TABLE t (id int, CONSTRAINT fk FOREIGN KEY (id) REFERENCES u (id))",
        "constraint-foreign-key"
    ));
    assert!(fires(
        "CREATE TABLE t (id int REFERENCES u (id))",
        "column-references"
    ));
    assert!(fires(
        "CREATE TABLE t (a int, b int GENERATED ALWAYS AS (a * 2) STORED)",
        "constraint-generated-stored"
    ));

    let finding = single_finding("CREATE TABLE t (id int GENERATED ALWAYS AS IDENTITY)");
    assert_eq!(finding.rule_id, "constraint-identity");
    assert_eq!(finding.severity, Severity::Warning);

    assert!(assess("CREATE TABLE t (id int PRIMARY KEY, v text NOT NULL UNIQUE CHECK (v <> ''))")
        .findings
        .is_empty());
}

#[test]
fn alter_table() {
    assert!(fires(
        "ALTER TABLE t ADD COLUMN id bigserial NOT NULL",
        "alter-table-add-serial-not-null"
    ));
    assert!(!fires(
        "ALTER TABLE t ADD COLUMN id bigint NOT NULL",
        "alter-table-add-serial-not-null"
    ));
    assert!(!fires(
        "CREATE TABLE t (id bigserial NOT NULL)",
        "alter-table-add-serial-not-null"
    ));

    let finding = single_finding("ALTER TABLE m DETACH PARTITION m1");
    assert_eq!(finding.rule_id, "alter-table-partition");
    assert_eq!(finding.message, "ALTER TABLE DETACH PARTITION is not supported");

    assert!(fires("ALTER TABLE t SET TABLESPACE slow", "alter-table-set-tablespace"));
}

#[test]
fn alter_renames() {
    let finding = single_finding("ALTER TABLE ONLY t RENAME COLUMN a TO b");
    assert_eq!(finding.rule_id, "alter-table-only-rename-column");
    assert_eq!(finding.message, "ALTER TABLE ONLY is not supported");
    assert!(assess("ALTER TABLE t RENAME COLUMN a TO b").findings.is_empty());
    assert!(assess("ALTER TABLE t RENAME TO u").findings.is_empty());

    let finding = single_finding("ALTER TABLE t RENAME CONSTRAINT c TO d");
    assert_eq!(finding.rule_id, "alter-table-rename-constraint");

    let finding = single_finding("ALTER INDEX IF EXISTS i RENAME TO j");
    assert_eq!(finding.rule_id, "alter-index-rename");
    assert_eq!(finding.message, "ALTER INDEX is not supported");
    assert!(assess("ALTER INDEX p ATTACH PARTITION c").findings.is_empty());
}

#[test]
fn alter_extensions() {
    let finding = single_finding("ALTER EXTENSION postgis UPDATE");
    assert_eq!(finding.rule_id, "alter-extension-allow-list");
    assert_eq!(finding.message, "Extension postgis is not supported");
    assert!(fires(
        "ALTER EXTENSION postgis SET SCHEMA utils",
        "alter-extension-allow-list"
    ));
    assert!(assess("ALTER EXTENSION pgcrypto UPDATE TO '1.3'").findings.is_empty());

    assert!(assess("ALTER EXTENSION hstore UPDATE").findings.is_empty());
    assert_eq!(
        rule_ids(&assess_with(&version("15.5"), "ALTER EXTENSION hstore UPDATE").findings),
        vec!["alter-extension-allow-list"]
    );
}

#[test]
fn alter_sequences() {
    for sql in [
        "ALTER SEQUENCE s CYCLE",
        "ALTER SEQUENCE s RESTART",
        "ALTER SEQUENCE s INCREMENT BY 2",
    ] {
        let finding = single_finding(sql);
        assert_eq!(finding.rule_id, "alter-sequence-options", "{sql}");
        assert_eq!(finding.message, "ALTER SEQUENCE is only supported with OWNED BY");
    }
    assert!(assess("ALTER SEQUENCE public.orders_order_id_seq OWNED BY public.orders.order_id")
        .findings
        .is_empty());
    assert!(assess("ALTER SEQUENCE s RENAME TO t").findings.is_empty());
}

#[test]
fn indexes() {
    let finding = single_finding("CREATE INDEX i ON t USING gin (doc)");
    assert_eq!(finding.rule_id, "index-access-method");
    assert_eq!(finding.message, "Index type gin is not supported");

    assert!(assess("CREATE INDEX i ON t USING btree (id)").findings.is_empty());
    assert!(assess("CREATE INDEX i ON t USING HASH (id)").findings.is_empty());
    assert!(fires("CREATE INDEX i ON t (id) TABLESPACE fast", "parameter-tablespace"));

    let finding = single_finding("CREATE UNIQUE INDEX i ON t (id)");
    assert_eq!(finding.rule_id, "index-unique");
    assert_eq!(finding.severity, Severity::Warning);
}

#[test]
fn schemas_and_extensions() {
    assert!(fires(
        "CREATE SCHEMA hr CREATE TABLE a (x int)",
        "create-schema-with-elements"
    ));
    assert!(assess("CREATE SCHEMA hr").findings.is_empty());

    let finding = single_finding("CREATE EXTENSION IF NOT EXISTS postgis");
    assert_eq!(finding.message, "Extension postgis is not supported");
    assert!(assess("CREATE EXTENSION pgcrypto").findings.is_empty());
}

#[test]
fn sequences() {
    assert!(assess("CREATE SEQUENCE s").findings.is_empty());
    assert!(assess("CREATE SEQUENCE s NO CYCLE").findings.is_empty());
    assert!(fires("CREATE SEQUENCE s CYCLE", "sequence-cycle"));
    assert!(fires("CREATE UNLOGGED SEQUENCE s", "create-unlogged-sequence"));

    let result = assess("CREATE TEMP SEQUENCE s MINVALUE 1 MAXVALUE 5");
    assert_eq!(rule_ids(&result.findings), vec!["create-temporary-sequence"]);

    let finding = single_finding("CREATE SEQUENCE s AS smallint INCREMENT BY 1000");
    assert_eq!(finding.rule_id, "sequence-capacity");
    assert_eq!(
        finding.message,
        "MAXVALUE (4095000) is out of range for sequence data type smallint"
    );

    let finding = single_finding("CREATE SEQUENCE s CACHE 300000");
    assert_eq!(
        finding.message,
        "CACHE parameter must be less than chunk size: 250000"
    );
}

#[test]
fn sequence_fault_is_reported_as_info() {
    let finding = single_finding("CREATE SEQUENCE s CACHE 1.5");
    assert_eq!(finding.rule_id, "sequence-capacity");
    assert_eq!(finding.severity, Severity::Info);
    assert!(finding.message.starts_with("Rule evaluation failed"), "{}", finding.message);
}

#[test]
fn routines() {
    let result = assess("CREATE PROCEDURE p() RETURNS int LANGUAGE sql AS 'SELECT 1'");
    assert_eq!(
        rule_ids(&result.findings),
        vec!["procedure-return-type", "routine-body-not-analyzed"]
    );

    let result = assess(
        "CREATE FUNCTION f() RETURNS int LANGUAGE plpython3u AS 'return 1'",
    );
    assert_eq!(
        rule_ids(&result.findings),
        vec!["routine-language", "routine-body-not-analyzed"]
    );
    assert_eq!(
        result.findings[0].message,
        "Invalid or untrusted language plpython3u"
    );

    let result = assess("CREATE FUNCTION f() RETURNS int LANGUAGE sql AS 'SELECT 1'");
    assert_eq!(rule_ids(&result.findings), vec!["routine-body-not-analyzed"]);
    assert_eq!(result.unsupported_statements, 0);
}

#[test]
fn privileges() {
    let finding = single_finding("GRANT USAGE ON FOREIGN SERVER s TO bob");
    assert_eq!(finding.rule_id, "privilege-target");
    assert_eq!(finding.message, "Privileges on FOREIGN SERVER are not supported");

    let finding = single_finding("GRANT CONNECT ON DATABASE d TO bob");
    assert_eq!(finding.rule_id, "privilege-target-unreviewed");
    assert_eq!(finding.severity, Severity::Info);

    assert!(assess("GRANT SELECT ON t TO bob").findings.is_empty());
    assert!(assess("GRANT admins TO carol").findings.is_empty());
}

#[test]
fn unsupported_statements() {
    for sql in [
        "CREATE TRIGGER trg AFTER INSERT ON t EXECUTE FUNCTION f()",
        "CREATE FOREIGN DATA WRAPPER dummy",
        "ALTER SYSTEM SET work_mem = '64MB'",
        "LISTEN channel",
        "CLUSTER t USING i",
    ] {
        let finding = single_finding(sql);
        assert_eq!(finding.rule_id, "unsupported-statement", "{sql}");
        assert_eq!(finding.message, "This statement is not supported", "{sql}");
    }
    assert!(assess("VACUUM t").findings.is_empty());
}

#[test]
fn sharded_table_subquery() {
    let result = assess("CREATE TABLE t (id int CHECK (id IN (SELECT 1))) SHARD KEY (id)");
    assert_eq!(
        rule_ids(&result.findings),
        vec!["shard-key-clause", "sharded-table-subquery"]
    );
    assert_eq!(result.findings[1].severity, Severity::Warning);

    assert!(assess("CREATE TABLE t (id int CHECK (id IN (SELECT 1)))")
        .findings
        .is_empty());
}
