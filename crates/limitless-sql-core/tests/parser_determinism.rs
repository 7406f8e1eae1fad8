//! Parsing is deterministic and every produced tree is well-formed, including
//! partial trees from recovery.

mod common;
use common::*;

use limitless_sql_core::{NodeKind, parse};

const SCRIPTS: &[&str] = &[
    "",
    ";;;",
    "CREATE TABLE t (id INT) SHARD KEY (id);",
    "SELEKT * FROM t;",
    "SELECT a, b FROM t WHERE a = 1; SELECT a, b FROM t WHERE a = 1;",
    "CREATE SCHEMA s CREATE TABLE x (a int) CREATE INDEX ON x (a) GRANT SELECT ON x TO r;",
    "INSERT INTO t VALUES (1), (2) RETURNING *; garbage here; DELETE FROM t",
    "SELECT '1'::int + $1, E'a\\'b', B'1010', X'FF' FROM t /* c /* nested */ */ -- end",
    "CREATE TABLE broken (a int,, b int); CREATE INDEX i ON t USING btree (a);",
    "WITH x AS (SELECT 1) SELECT * FROM x JOIN y ON x.a = y.a LEFT JOIN z USING (b)",
];

#[test]
fn parsing_twice_gives_identical_results() {
    for sql in SCRIPTS {
        assert_eq!(parse(sql), parse(sql), "{sql}");
    }
}

#[test]
fn every_tree_is_well_formed() {
    for sql in SCRIPTS {
        let result = parse(sql);
        assert_well_formed(result.tree());
        assert_eq!(result.tree().root().span.end, sql.len());
    }
}

#[test]
fn statement_spans_stay_within_their_text() {
    for sql in SCRIPTS {
        let result = parse(sql);
        for statement in result.tree().statements() {
            let text = &sql[statement.span.start..statement.span.end];
            assert!(!text.trim().is_empty() || statement.span.is_empty(), "{sql}");
            assert!(!text.ends_with(';'), "{sql}: {text}");
        }
    }
}

#[test]
fn unparsed_nodes_match_errors() {
    for sql in SCRIPTS {
        let result = parse(sql);
        let unparsed = count(result.tree().root(), NodeKind::Unparsed);
        assert_eq!(unparsed, result.errors().len(), "{sql}");
    }
}

#[test]
fn tree_serializes_to_json() {
    let result = parse("CREATE TABLE t (id int)");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["outcome"], "tree");
    assert_eq!(json["root"]["children"][0]["kind"], "create_table");
}
