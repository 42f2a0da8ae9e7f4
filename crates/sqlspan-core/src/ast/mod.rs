//! Abstract syntax tree for SQL statements.
//!
//! Every node carries (or can recompute) its source span and renders
//! back to SQL text via `Display`; re-parsing the rendering yields a
//! structurally equal tree.

mod comment;
mod compare;
mod ddl;
mod expression;
mod operator;
mod query;
mod statement;
mod types;
mod value;
mod walk;

use core::fmt;

pub use comment::{Comment, CommentGroup, CommentMap};
pub use compare::compare_without_marker;
pub use ddl::{
    AlterColumnAction, AlterTableAction, AlterTableStmt, ColumnConstraint, ColumnConstraintKind,
    ColumnDef, CreateIndexStmt, CreateTableStmt, CreateVirtualTableStmt, DropIndexStmt,
    DropTableStmt, TableConstraint, TableConstraintKind, TableElement, VirtualTableArg,
};
pub use expression::{CaseExpr, Expr, Function, Ident, ObjectName};
pub use operator::{BinaryOperator, UnaryOperator};
pub use query::{
    Cte, JoinClause, JoinConstraint, JoinOperator, LimitExpr, OrderByExpr, Query, SelectItem,
    SqlSelect, TableFactor,
};
pub use statement::{Assignment, DeleteStmt, File, InsertSource, InsertStmt, Stmt, UpdateStmt};
pub use types::DataType;
pub use value::Value;
pub use walk::{inspect, NodeRef};

use crate::lexer::Span;

/// The single polymorphic capability of AST nodes: a source span and a
/// canonical SQL rendering.
pub trait AstNode: fmt::Display {
    /// Returns the source region this node covers. Parents always
    /// enclose their children.
    fn span(&self) -> Span;

    /// Renders the node back to SQL. Substituting the result for the
    /// node's source text re-parses to an equivalent tree.
    fn to_sql_string(&self) -> String {
        self.to_string()
    }
}
