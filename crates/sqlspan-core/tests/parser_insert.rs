//! Tests for INSERT statements.

mod common;
use common::*;

use sqlspan_core::ast::{AstNode, BinaryOperator, Expr, InsertSource, Value};

#[test]
fn insert_values_with_expression() {
    let insert = parse_insert("INSERT INTO tbl_name (col1,col2) VALUES(15,col1*2)");
    assert_eq!(insert.table_name.to_string(), "tbl_name");
    assert_eq!(insert.columns.len(), 2);
    assert_eq!(insert.columns[0].value, "col1");
    assert_eq!(insert.columns[1].value, "col2");

    let InsertSource::Values(rows) = &insert.source else {
        panic!("expected VALUES");
    };
    assert_eq!(rows.len(), 1);
    assert!(matches!(
        rows[0][0],
        Expr::Value {
            value: Value::Long(15),
            ..
        }
    ));
    let Expr::BinaryOp { op, .. } = &rows[0][1] else {
        panic!("expected an expression value");
    };
    assert_eq!(*op, BinaryOperator::Multiply);

    assert_eq!(
        insert.to_sql_string(),
        "INSERT INTO tbl_name (col1, col2) VALUES (15, col1 * 2)"
    );
    round_trip("INSERT INTO tbl_name (col1,col2) VALUES(15,col1*2)");
}

#[test]
fn insert_multiple_rows() {
    let insert =
        parse_insert("INSERT INTO tbl_name (a,b,c) VALUES(1,2,3),(4,5,6),(7,8,9)");
    let InsertSource::Values(rows) = &insert.source else {
        panic!("expected VALUES");
    };
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].len(), 3);
    round_trip("INSERT INTO tbl_name (a,b,c) VALUES(1,2,3),(4,5,6),(7,8,9)");
}

#[test]
fn insert_without_column_list() {
    let insert = parse_insert("INSERT INTO t VALUES (1, 'x')");
    assert!(insert.columns.is_empty());
    round_trip("INSERT INTO t VALUES (1, 'x')");
}

#[test]
fn insert_from_select() {
    let insert = parse_insert("INSERT INTO archive (id) SELECT id FROM events WHERE done");
    let InsertSource::Query(query) = &insert.source else {
        panic!("expected a query source");
    };
    assert!(query.body.selection.is_some());
    round_trip("INSERT INTO archive (id) SELECT id FROM events WHERE done");
}

#[test]
fn insert_schema_qualified_table() {
    let insert = parse_insert("INSERT INTO analytics.events VALUES (1)");
    assert_eq!(insert.table_name.to_string(), "analytics.events");
    round_trip("INSERT INTO analytics.events VALUES (1)");
}

#[test]
fn insert_statement_span() {
    let insert = parse_insert("INSERT INTO t VALUES (1)");
    assert_eq!(insert.span.from.col, 1);
    assert_eq!(insert.span.to.col, 25);
}
