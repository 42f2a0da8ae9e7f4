//! End-to-end round-trip tests: parse → render → re-parse → compare,
//! across all statement families.

mod common;
use common::*;

use sqlspan_core::ast::{compare_without_marker, AstNode, NodeRef};

const CORPUS: &[&str] = &[
    // SELECT
    "SELECT * from test_table",
    "SELECT CustomerName, City FROM Customers",
    "SELECT DISTINCT Country FROM Customers",
    "SELECT * FROM Customers WHERE Country = 'Mexico'",
    "SELECT * FROM Customers WHERE CustomerID = 1",
    "SELECT * FROM Customers WHERE Country = 'Germany' AND City = 'Berlin'",
    "SELECT * FROM Customers WHERE City = 'Berlin' OR City = 'Munchen'",
    "SELECT * FROM Customers WHERE NOT Country = 'Germany'",
    "SELECT * FROM Customers ORDER BY Country DESC, CustomerName ASC",
    "SELECT * FROM Products WHERE Price BETWEEN 10 AND 20",
    "SELECT * FROM Customers WHERE Country IN ('Germany', 'France', 'UK')",
    "SELECT * FROM Customers WHERE CustomerName LIKE 'a%'",
    "SELECT COUNT(ProductID) FROM Products",
    "SELECT COUNT(customer_id), country FROM customers GROUP BY country HAVING COUNT(customer_id) > 3",
    "SELECT orders.product, SUM(orders.quantity) AS product_units, accounts.* \
     FROM orders LEFT JOIN accounts ON orders.account_id = accounts.id \
     WHERE orders.region IN (SELECT region FROM top_regions) \
     ORDER BY product_units LIMIT 100",
    "WITH regional_sales AS (SELECT region, SUM(amount) AS total_sales FROM orders GROUP BY region) \
     SELECT product, SUM(quantity) AS product_units FROM orders \
     WHERE region IN (SELECT region FROM top_regions) GROUP BY region, product",
    "SELECT CASE WHEN Quantity > 30 THEN 'big' ELSE 'small' END FROM OrderDetails",
    "SELECT * FROM t WHERE EXISTS (SELECT 1 FROM u WHERE u.id = t.id)",
    "SELECT CAST(price AS DECIMAL(10, 2)) FROM products",
    // INSERT
    "INSERT INTO tbl_name (col1,col2) VALUES(15,col1*2)",
    "INSERT INTO tbl_name (a,b,c) VALUES(1,2,3),(4,5,6),(7,8,9)",
    "INSERT INTO Customers (CustomerName, City, Country) SELECT SupplierName, City, Country FROM Suppliers",
    // UPDATE / DELETE
    "UPDATE Customers SET ContactName = 'Alfred', City = 'Frankfurt' WHERE CustomerID = 1",
    "DELETE FROM Customers WHERE CustomerName = 'Alfreds Futterkiste'",
    // CREATE TABLE
    "CREATE TABLE Persons (PersonID int, LastName varchar(255), FirstName varchar(255), City varchar(255))",
    "CREATE TABLE account (account_id serial primary key, name varchar(255) not null, \
     email varchar(255) unique not null)",
    "CREATE TABLE orders (id int primary key, account_id int references account(account_id), \
     foreign key (id, account_id) references shipments(order_id, account_id), \
     CONSTRAINT positive check(id > 0))",
    // CREATE VIRTUAL TABLE
    "CREATE VIRTUAL TABLE IF NOT EXISTS \"conversation_fts\" USING fts5(id, text, prefix = \"2\", prefix = \"3\")",
    "CREATE VIRTUAL TABLE docs USING fts4",
    // CREATE INDEX
    "CREATE INDEX idx_lastname ON Persons (LastName)",
    "CREATE UNIQUE INDEX idx_email ON account USING btree (email) WHERE email IS NOT NULL",
    // ALTER TABLE
    "ALTER TABLE Customers ADD Email varchar(255)",
    "ALTER TABLE Customers ADD CONSTRAINT uniq_email UNIQUE (Email)",
    "ALTER TABLE Customers DROP COLUMN Email",
    "ALTER TABLE Customers DROP CONSTRAINT uniq_email CASCADE",
    "ALTER TABLE Customers ALTER COLUMN Age TYPE smallint",
    "ALTER TABLE Customers RENAME TO Clients",
    // DROP
    "DROP TABLE Shippers",
    "DROP TABLE IF EXISTS Shippers, Suppliers CASCADE",
    "DROP INDEX idx_lastname",
];

#[test]
fn corpus_round_trips() {
    for sql in CORPUS {
        round_trip(sql);
    }
}

#[test]
fn rendering_is_idempotent() {
    for sql in CORPUS {
        let once = parse(sql).to_sql_string();
        let twice = parse(&once).to_sql_string();
        assert_eq!(once, twice, "not idempotent for: {sql}");
    }
}

#[test]
fn reparse_is_structurally_equal() {
    for sql in CORPUS {
        let first = parse(sql);
        let second = parse(&first.to_sql_string());
        let diff = compare_without_marker(NodeRef::Stmt(&first), NodeRef::Stmt(&second));
        assert!(diff.is_empty(), "diff for {sql}:\n{diff}");
    }
}

#[test]
fn node_spans_nest_throughout_corpus() {
    for sql in CORPUS {
        let stmt = parse(sql);
        check_spans(NodeRef::Stmt(&stmt), sql);
    }
}

fn check_spans(node: NodeRef<'_>, sql: &str) {
    let span = node.span();
    assert!(
        span.from <= span.to,
        "inverted span {span} on {} in: {sql}",
        node.kind_name()
    );
    for child in node.children() {
        let child_span = child.span();
        assert!(
            span.from <= child_span.from && child_span.to <= span.to,
            "{} span {} does not enclose {} span {} in: {sql}",
            node.kind_name(),
            span,
            child.kind_name(),
            child_span
        );
        check_spans(child, sql);
    }
}
