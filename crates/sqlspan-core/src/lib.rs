//! # sqlspan-core
//!
//! An SQL parsing toolkit: tokenizer, recursive descent parser and AST
//! with lossless position tracking, round-trippable rendering and
//! comment association.
//!
//! The pipeline is `&str → Tokenizer → Vec<Token> → Parser →
//! File { stmts, comments }`, after which the tree can be walked
//! ([`ast::inspect`]), rewritten ([`astutil::apply`]) and rendered back
//! to SQL text that re-parses to an equivalent tree.
//!
//! ## Parsing a statement
//!
//! ```rust
//! use sqlspan_core::ast::AstNode;
//!
//! let stmt = sqlspan_core::parse("SELECT * from test_table").unwrap();
//! assert_eq!(stmt.to_sql_string(), "SELECT * FROM test_table");
//! ```
//!
//! ## Comment association
//!
//! ```rust
//! use sqlspan_core::ast::{CommentMap, NodeRef};
//! use sqlspan_core::dialect::GenericDialect;
//! use sqlspan_core::parser::{Parser, ParserOptions};
//!
//! let sql = "--leading\nSELECT 1;";
//! let mut parser = Parser::new_with_options(
//!     sql,
//!     &GenericDialect,
//!     ParserOptions { parse_comment: true },
//! )
//! .unwrap();
//! let file = parser.parse_file().unwrap();
//! let map = CommentMap::build(&file);
//! assert!(map.get(NodeRef::Stmt(&file.stmts[0])).is_some());
//! ```

pub mod ast;
pub mod astutil;
pub mod dialect;
pub mod error;
pub mod lexer;
pub mod parser;

pub use error::ParseError;
pub use parser::{Parser, ParserOptions};

use ast::Stmt;
use dialect::GenericDialect;

/// Parses a single statement with the generic dialect and comments
/// disabled.
///
/// # Errors
///
/// Returns the first tokenizer or grammar error.
pub fn parse(sql: &str) -> Result<Stmt, ParseError> {
    Parser::new(sql, &GenericDialect)?.parse_statement()
}
