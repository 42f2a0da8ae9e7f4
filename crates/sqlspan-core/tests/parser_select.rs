//! Tests for SELECT queries: projections, FROM, joins, CTEs and the
//! trailing clauses.

mod common;
use common::*;

use sqlspan_core::ast::{
    AstNode, Expr, JoinConstraint, JoinOperator, SelectItem, Stmt, TableFactor,
};

#[test]
fn select_wildcard_from_table() {
    let stmt = parse("SELECT * from test_table");
    let Stmt::Query(query) = &stmt else {
        panic!("expected a query");
    };
    assert!(matches!(query.body.projection[0], SelectItem::Wildcard(_)));
    let TableFactor::Table { name, alias } = &query.body.from[0] else {
        panic!("expected a named table");
    };
    assert_eq!(name.to_string(), "test_table");
    assert!(alias.is_none());
    // Keywords come back uppercased.
    assert_eq!(stmt.to_sql_string(), "SELECT * FROM test_table");
}

#[test]
fn select_projection_aliases() {
    let select = parse_select("SELECT region, SUM(amount) AS total_sales FROM orders");
    assert_eq!(select.projection.len(), 2);
    assert!(matches!(&select.projection[0], SelectItem::UnnamedExpr(_)));
    let SelectItem::ExprWithAlias { expr, alias } = &select.projection[1] else {
        panic!("expected an aliased item");
    };
    assert!(matches!(expr, Expr::Function(_)));
    assert_eq!(alias.value, "total_sales");
    round_trip("SELECT region, SUM(amount) AS total_sales FROM orders");
}

#[test]
fn select_alias_without_as() {
    let select = parse_select("SELECT amount total FROM orders o");
    assert!(matches!(
        &select.projection[0],
        SelectItem::ExprWithAlias { alias, .. } if alias.value == "total"
    ));
    let TableFactor::Table { alias, .. } = &select.from[0] else {
        panic!("expected a named table");
    };
    assert_eq!(alias.as_ref().unwrap().value, "o");
}

#[test]
fn select_qualified_wildcard() {
    let select = parse_select("SELECT accounts.* FROM accounts");
    assert!(matches!(
        &select.projection[0],
        SelectItem::QualifiedWildcard { prefix, .. } if prefix.to_string() == "accounts"
    ));
    round_trip("SELECT accounts.* FROM accounts");
}

#[test]
fn select_compound_identifiers() {
    let select = parse_select("SELECT orders.product FROM orders WHERE orders.region = 'west'");
    let SelectItem::UnnamedExpr(Expr::CompoundIdentifier(idents)) = &select.projection[0] else {
        panic!("expected a compound identifier");
    };
    assert_eq!(idents.len(), 2);
    assert_eq!(idents[0].value, "orders");
    assert_eq!(idents[1].value, "product");
    round_trip("SELECT orders.product FROM orders WHERE orders.region = 'west'");
}

#[test]
fn select_distinct() {
    let select = parse_select("SELECT DISTINCT region FROM orders");
    assert!(select.distinct);
    round_trip("SELECT DISTINCT region FROM orders");
}

#[test]
fn select_left_join_with_on() {
    let select = parse_select(
        "SELECT orders.product, accounts.* FROM orders \
         LEFT JOIN accounts ON orders.account_id = accounts.id",
    );
    let TableFactor::Join { left, join } = &select.from[0] else {
        panic!("expected a join");
    };
    assert!(matches!(**left, TableFactor::Table { .. }));
    assert_eq!(join.op, JoinOperator::LeftOuter);
    assert!(matches!(join.constraint, JoinConstraint::On(_)));
    round_trip(
        "SELECT orders.product, accounts.* FROM orders \
         LEFT JOIN accounts ON orders.account_id = accounts.id",
    );
}

#[test]
fn select_join_chain_nests_leftward() {
    let select = parse_select("SELECT * FROM a JOIN b ON a.x = b.x JOIN c ON b.y = c.y");
    let TableFactor::Join { left, join } = &select.from[0] else {
        panic!("expected a join");
    };
    assert!(matches!(**left, TableFactor::Join { .. }));
    assert_eq!(join.op, JoinOperator::Inner);
    round_trip("SELECT * FROM a JOIN b ON a.x = b.x JOIN c ON b.y = c.y");
}

#[test]
fn select_join_using() {
    let select = parse_select("SELECT * FROM a INNER JOIN b USING (id, region)");
    let TableFactor::Join { join, .. } = &select.from[0] else {
        panic!("expected a join");
    };
    let JoinConstraint::Using(columns) = &join.constraint else {
        panic!("expected USING");
    };
    assert_eq!(columns.len(), 2);
    round_trip("SELECT * FROM a INNER JOIN b USING (id, region)");
}

#[test]
fn select_cross_join() {
    let select = parse_select("SELECT * FROM a CROSS JOIN b");
    let TableFactor::Join { join, .. } = &select.from[0] else {
        panic!("expected a join");
    };
    assert_eq!(join.op, JoinOperator::Cross);
    assert!(matches!(join.constraint, JoinConstraint::None));
    round_trip("SELECT * FROM a CROSS JOIN b");
}

#[test]
fn select_derived_table() {
    let select = parse_select("SELECT * FROM (SELECT id FROM users) AS u");
    let TableFactor::Derived {
        subquery, alias, ..
    } = &select.from[0]
    else {
        panic!("expected a derived table");
    };
    assert_eq!(subquery.body.projection.len(), 1);
    assert_eq!(alias.as_ref().unwrap().value, "u");
    round_trip("SELECT * FROM (SELECT id FROM users) AS u");
}

#[test]
fn select_group_by_and_having() {
    let select = parse_select(
        "SELECT COUNT(customer_id), country FROM customers \
         GROUP BY country HAVING COUNT(customer_id) > 3",
    );
    assert_eq!(select.group_by.len(), 1);
    assert!(select.having.is_some());
    round_trip(
        "SELECT COUNT(customer_id), country FROM customers \
         GROUP BY country HAVING COUNT(customer_id) > 3",
    );
}

#[test]
fn select_order_by_limit_offset() {
    let query = parse_query(
        "SELECT product FROM orders ORDER BY product_units DESC, product LIMIT 100 OFFSET 20",
    );
    assert_eq!(query.order_by.len(), 2);
    assert_eq!(query.order_by[0].asc, Some(false));
    assert_eq!(query.order_by[1].asc, None);
    let limit = query.limit.as_ref().unwrap();
    assert!(limit.offset.is_some());
    round_trip(
        "SELECT product FROM orders ORDER BY product_units DESC, product LIMIT 100 OFFSET 20",
    );
}

#[test]
fn select_with_cte() {
    let sql = "WITH regional_sales AS (\
               SELECT region, SUM(amount) AS total_sales FROM orders GROUP BY region) \
               SELECT product, SUM(quantity) AS product_units FROM orders \
               WHERE region IN (SELECT region FROM top_regions) \
               GROUP BY region, product";
    let query = parse_query(sql);
    assert_eq!(query.ctes.len(), 1);
    assert_eq!(query.ctes[0].alias.value, "regional_sales");
    assert!(matches!(
        query.body.selection,
        Some(Expr::InSubquery { .. })
    ));
    // The canonical rendering equals the (already canonical) input.
    assert_eq!(parse(sql).to_sql_string(), sql);
    round_trip(sql);
}

#[test]
fn select_without_from() {
    let select = parse_select("SELECT 1 + 1");
    assert!(select.from.is_empty());
    round_trip("SELECT 1 + 1");
}

#[test]
fn select_statement_spans_cover_clauses() {
    let stmt = parse("SELECT id FROM users WHERE id = 1");
    let span = stmt.span();
    assert_eq!(span.from.line, 1);
    assert_eq!(span.from.col, 1);
    assert_eq!(span.to.col, 34);
}

#[test]
fn update_statement() {
    let Stmt::Update(update) = parse("UPDATE users SET name = 'Bob', active = TRUE WHERE id = 1")
    else {
        panic!("expected UPDATE");
    };
    assert_eq!(update.table_name.to_string(), "users");
    assert_eq!(update.assignments.len(), 2);
    assert!(update.selection.is_some());
    round_trip("UPDATE users SET name = 'Bob', active = TRUE WHERE id = 1");
}

#[test]
fn delete_statement() {
    let Stmt::Delete(delete) = parse("DELETE FROM users WHERE id = 1") else {
        panic!("expected DELETE");
    };
    assert_eq!(delete.table_name.to_string(), "users");
    assert!(delete.selection.is_some());
    round_trip("DELETE FROM users WHERE id = 1");
}
