//! SQL parser.
//!
//! A hand-written recursive descent parser with Pratt expression
//! parsing over an eagerly tokenized input. The grammar is permissive:
//! it accepts a union of common SQL dialects rather than enforcing any
//! single standard.
//!
//! # Supported statements
//!
//! | Statement | Notes |
//! |-----------|-------|
//! | `SELECT` / `WITH` | CTEs, joins, `WHERE`, `GROUP BY`, `HAVING`, `ORDER BY`, `LIMIT`/`OFFSET` |
//! | `INSERT` | `VALUES` row lists or a sub-`SELECT` |
//! | `UPDATE` / `DELETE` | `SET` assignments, `WHERE` |
//! | `CREATE TABLE` | columns, column constraints, table constraints, `IF NOT EXISTS` |
//! | `CREATE VIRTUAL TABLE` | `USING module(arg, name = arg, …)` |
//! | `CREATE [UNIQUE] INDEX` | `USING method`, partial-index `WHERE` |
//! | `ALTER TABLE` | `ADD`, `DROP`, `ALTER COLUMN`, `RENAME` |
//! | `DROP TABLE` / `DROP INDEX` | `IF EXISTS`, `CASCADE`, multiple names |
//!
//! # Expressions
//!
//! Pratt parsing with the precedence ladder (loosest first): `OR`,
//! `AND`, prefix `NOT`, `IS`, comparisons / `LIKE` / `IN` / `BETWEEN`,
//! `+` `-`, `*` `/` `%`, `::` and unary sign. `BETWEEN` bounds parse at
//! comparison precedence so the separating `AND` stays a separator.

mod parser;
mod pratt;

pub use parser::{Parser, ParserOptions};
