//! Tests for the Pratt expression parser: precedence, special forms
//! and literals.

mod common;
use common::*;

use sqlspan_core::ast::{
    AstNode, BinaryOperator, Expr, SelectItem, UnaryOperator, Value,
};

fn parse_expr(sql: &str) -> Expr {
    let select = parse_select(&format!("SELECT {sql}"));
    match select.projection.into_iter().next().unwrap() {
        SelectItem::UnnamedExpr(expr) => expr,
        other => panic!("expected a bare expression, got {other:?}"),
    }
}

#[test]
fn precedence_mul_over_add() {
    let Expr::BinaryOp { op, right, .. } = parse_expr("1 + 2 * 3") else {
        panic!("expected a binary expression");
    };
    assert_eq!(op, BinaryOperator::Plus);
    assert!(matches!(
        *right,
        Expr::BinaryOp {
            op: BinaryOperator::Multiply,
            ..
        }
    ));
    round_trip("SELECT 1 + 2 * 3");
}

#[test]
fn precedence_and_over_or() {
    let Expr::BinaryOp { op, .. } = parse_expr("a OR b AND c") else {
        panic!("expected a binary expression");
    };
    assert_eq!(op, BinaryOperator::Or);
    round_trip("SELECT a OR b AND c");
}

#[test]
fn left_associativity() {
    // a - b - c parses as (a - b) - c.
    let Expr::BinaryOp { left, .. } = parse_expr("a - b - c") else {
        panic!("expected a binary expression");
    };
    assert!(matches!(
        *left,
        Expr::BinaryOp {
            op: BinaryOperator::Minus,
            ..
        }
    ));
    round_trip("SELECT a - b - c");
}

#[test]
fn nested_parens_are_kept() {
    let expr = parse_expr("(a + b) * c");
    let Expr::BinaryOp { left, op, .. } = expr else {
        panic!("expected a binary expression");
    };
    assert_eq!(op, BinaryOperator::Multiply);
    assert!(matches!(*left, Expr::Nested { .. }));
    round_trip("SELECT (a + b) * c");
}

#[test]
fn unary_minus_and_not() {
    assert!(matches!(
        parse_expr("-1"),
        Expr::UnaryOp {
            op: UnaryOperator::Minus,
            ..
        }
    ));
    // NOT binds tighter than AND: `NOT a AND b` is `(NOT a) AND b`.
    let Expr::BinaryOp { op, left, .. } = parse_expr("NOT a AND b") else {
        panic!("expected a conjunction");
    };
    assert_eq!(op, BinaryOperator::And);
    assert!(matches!(
        *left,
        Expr::UnaryOp {
            op: UnaryOperator::Not,
            ..
        }
    ));
    round_trip("SELECT NOT a AND b");
}

#[test]
fn between_and_not_between() {
    let Expr::Between { negated, low, high, .. } = parse_expr("x BETWEEN 1 AND 10") else {
        panic!("expected BETWEEN");
    };
    assert!(!negated);
    assert!(matches!(
        *low,
        Expr::Value {
            value: Value::Long(1),
            ..
        }
    ));
    assert!(matches!(
        *high,
        Expr::Value {
            value: Value::Long(10),
            ..
        }
    ));
    assert!(matches!(
        parse_expr("x NOT BETWEEN 1 AND 10"),
        Expr::Between { negated: true, .. }
    ));
    round_trip("SELECT * FROM t WHERE x BETWEEN 1 AND 10");
}

#[test]
fn between_inside_conjunction() {
    // The AND separating the bounds must not eat the outer conjunction.
    let Expr::BinaryOp { op, left, .. } = parse_expr("x BETWEEN 1 AND 10 AND y") else {
        panic!("expected a conjunction");
    };
    assert_eq!(op, BinaryOperator::And);
    assert!(matches!(*left, Expr::Between { .. }));
}

#[test]
fn in_list_and_in_subquery() {
    let Expr::InList { list, negated, .. } = parse_expr("x IN (1, 2, 3)") else {
        panic!("expected IN list");
    };
    assert_eq!(list.len(), 3);
    assert!(!negated);

    assert!(matches!(
        parse_expr("x NOT IN (1, 2)"),
        Expr::InList { negated: true, .. }
    ));
    assert!(matches!(
        parse_expr("region IN (SELECT region FROM top_regions)"),
        Expr::InSubquery { negated: false, .. }
    ));
    round_trip("SELECT * FROM t WHERE x NOT IN (1, 2)");
    round_trip("SELECT * FROM t WHERE region IN (SELECT region FROM top_regions)");
}

#[test]
fn is_null_and_is_not_null() {
    assert!(matches!(parse_expr("x IS NULL"), Expr::IsNull { .. }));
    assert!(matches!(parse_expr("x IS NOT NULL"), Expr::IsNotNull { .. }));
    round_trip("SELECT * FROM t WHERE x IS NOT NULL");
}

#[test]
fn like_and_not_like() {
    assert!(matches!(
        parse_expr("name LIKE '%test%'"),
        Expr::BinaryOp {
            op: BinaryOperator::Like,
            ..
        }
    ));
    assert!(matches!(
        parse_expr("name NOT LIKE '%test%'"),
        Expr::BinaryOp {
            op: BinaryOperator::NotLike,
            ..
        }
    ));
    round_trip("SELECT * FROM t WHERE name NOT LIKE '%test%'");
}

#[test]
fn case_expression() {
    let Expr::Case(case) = parse_expr("CASE WHEN x = 1 THEN 'one' ELSE 'many' END") else {
        panic!("expected CASE");
    };
    assert!(case.operand.is_none());
    assert_eq!(case.conditions.len(), 1);
    assert_eq!(case.results.len(), 1);
    assert!(case.else_result.is_some());
    round_trip("SELECT CASE WHEN x = 1 THEN 'one' ELSE 'many' END");
}

#[test]
fn simple_case_with_operand() {
    let Expr::Case(case) = parse_expr("CASE x WHEN 1 THEN 'one' WHEN 2 THEN 'two' END") else {
        panic!("expected CASE");
    };
    assert!(case.operand.is_some());
    assert_eq!(case.conditions.len(), 2);
    round_trip("SELECT CASE x WHEN 1 THEN 'one' WHEN 2 THEN 'two' END");
}

#[test]
fn cast_call_and_double_colon() {
    let Expr::Cast { data_type, .. } = parse_expr("CAST(x AS INT)") else {
        panic!("expected CAST");
    };
    assert_eq!(data_type.to_string(), "INT");

    // `x::int` produces the same node and renders as CAST.
    let expr = parse_expr("x::int");
    assert!(matches!(expr, Expr::Cast { .. }));
    assert_eq!(expr.to_sql_string(), "CAST(x AS INT)");
    round_trip("SELECT x::int");
}

#[test]
fn exists_and_not_exists() {
    assert!(matches!(
        parse_expr("EXISTS (SELECT 1)"),
        Expr::Exists { negated: false, .. }
    ));
    assert!(matches!(
        parse_expr("NOT EXISTS (SELECT 1)"),
        Expr::Exists { negated: true, .. }
    ));
    round_trip("SELECT * FROM t WHERE EXISTS (SELECT 1)");
}

#[test]
fn scalar_subquery() {
    assert!(matches!(
        parse_expr("(SELECT MAX(id) FROM users)"),
        Expr::Subquery { .. }
    ));
    round_trip("SELECT (SELECT MAX(id) FROM users)");
}

#[test]
fn function_calls() {
    let Expr::Function(function) = parse_expr("COUNT(*)") else {
        panic!("expected a function call");
    };
    assert_eq!(function.name.to_string(), "COUNT");
    assert!(matches!(function.args[0], Expr::Wildcard(_)));

    let Expr::Function(function) = parse_expr("coalesce(a, b, 0)") else {
        panic!("expected a function call");
    };
    assert_eq!(function.args.len(), 3);
    round_trip("SELECT COUNT(*), coalesce(a, b, 0) FROM t");
}

#[test]
fn literals() {
    assert!(matches!(
        parse_expr("42"),
        Expr::Value {
            value: Value::Long(42),
            ..
        }
    ));
    assert!(matches!(
        parse_expr("1.5"),
        Expr::Value {
            value: Value::Double(_),
            ..
        }
    ));
    assert!(matches!(
        parse_expr("'text'"),
        Expr::Value {
            value: Value::SingleQuotedString(_),
            ..
        }
    ));
    assert!(matches!(
        parse_expr("N'text'"),
        Expr::Value {
            value: Value::NationalStringLiteral(_),
            ..
        }
    ));
    assert!(matches!(
        parse_expr("NULL"),
        Expr::Value {
            value: Value::Null,
            ..
        }
    ));
    round_trip("SELECT 42, 1.5, 'text', N'text', NULL, TRUE, FALSE");
}

#[test]
fn typed_date_literals() {
    assert!(matches!(
        parse_expr("DATE '2020-01-02'"),
        Expr::Value {
            value: Value::Date(_),
            ..
        }
    ));
    assert!(matches!(
        parse_expr("TIMESTAMP '2020-01-02 03:04:05'"),
        Expr::Value {
            value: Value::Timestamp(_),
            ..
        }
    ));
    round_trip("SELECT DATE '2020-01-02', TIME '03:04:05'");
}

#[test]
fn quoted_identifiers_keep_quote_style() {
    let expr = parse_expr("\"column name\"");
    let Expr::Identifier(ident) = &expr else {
        panic!("expected an identifier");
    };
    assert_eq!(ident.value, "column name");
    assert_eq!(ident.quote_style, Some('"'));
    assert_eq!(expr.to_sql_string(), "\"column name\"");
    round_trip("SELECT \"column name\", `backticked` FROM t");
}

#[test]
fn minimal_parens_survive_reparse() {
    round_trip("SELECT (a OR b) AND c FROM t");
    round_trip("SELECT a - (b - c)");
    round_trip("SELECT NOT (a AND b) FROM t");
    round_trip("SELECT -(a + b)");
}
