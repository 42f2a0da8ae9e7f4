#![allow(dead_code)]

use sqlspan_core::ast::{
    compare_without_marker, AstNode, File, InsertStmt, NodeRef, Query, SqlSelect, Stmt,
};
use sqlspan_core::dialect::GenericDialect;
use sqlspan_core::parser::{Parser, ParserOptions};
use sqlspan_core::ParseError;

pub fn parse(sql: &str) -> Stmt {
    sqlspan_core::parse(sql)
        .unwrap_or_else(|e| panic!("failed to parse: {sql}\nerror: {e}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    sqlspan_core::parse(sql).expect_err(&format!("expected a parse error for: {sql}"))
}

pub fn parse_file(sql: &str) -> File {
    let mut parser = Parser::new_with_options(
        sql,
        &GenericDialect,
        ParserOptions {
            parse_comment: true,
        },
    )
    .unwrap_or_else(|e| panic!("failed to tokenize: {sql}\nerror: {e}"));
    parser
        .parse_file()
        .unwrap_or_else(|e| panic!("failed to parse file: {sql}\nerror: {e}"))
}

pub fn parse_query(sql: &str) -> Query {
    match parse(sql) {
        Stmt::Query(query) => *query,
        other => panic!("expected a query, got {other:?}"),
    }
}

pub fn parse_select(sql: &str) -> SqlSelect {
    *parse_query(sql).body
}

pub fn parse_insert(sql: &str) -> InsertStmt {
    match parse(sql) {
        Stmt::Insert(insert) => insert,
        other => panic!("expected INSERT, got {other:?}"),
    }
}

/// Checks the round-trip contract: rendering is a fixed point, and
/// re-parsing the rendering yields a structurally equal tree.
pub fn round_trip(sql: &str) {
    let first = parse(sql);
    let rendered = first.to_sql_string();
    let second = parse(&rendered);
    let rendered_again = second.to_sql_string();
    assert_eq!(
        rendered, rendered_again,
        "rendering is not a fixed point.\n  input:  {sql}\n  first:  {rendered}\n  second: {rendered_again}"
    );
    let diff = compare_without_marker(NodeRef::Stmt(&first), NodeRef::Stmt(&second));
    assert!(
        diff.is_empty(),
        "re-parse differs structurally.\n  input: {sql}\n  rendered: {rendered}\n  diff: {diff}"
    );
}
