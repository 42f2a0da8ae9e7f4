//! Statement AST types and the parsed `File`.

use core::fmt;

use crate::lexer::Span;

use super::comment::CommentGroup;
use super::ddl::{
    AlterTableStmt, CreateIndexStmt, CreateTableStmt, CreateVirtualTableStmt, DropIndexStmt,
    DropTableStmt,
};
use super::expression::{Expr, Ident, ObjectName};
use super::query::Query;
use super::AstNode;

/// An SQL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `SELECT` / `WITH … SELECT`
    Query(Box<Query>),
    /// `INSERT INTO …`
    Insert(InsertStmt),
    /// `UPDATE …`
    Update(UpdateStmt),
    /// `DELETE FROM …`
    Delete(DeleteStmt),
    /// `CREATE TABLE …`
    CreateTable(CreateTableStmt),
    /// `CREATE VIRTUAL TABLE …`
    CreateVirtualTable(CreateVirtualTableStmt),
    /// `CREATE [UNIQUE] INDEX …`
    CreateIndex(CreateIndexStmt),
    /// `ALTER TABLE …`
    AlterTable(AlterTableStmt),
    /// `DROP TABLE …`
    DropTable(DropTableStmt),
    /// `DROP INDEX …`
    DropIndex(DropIndexStmt),
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(s) => write!(f, "{s}"),
            Self::Insert(s) => write!(f, "{s}"),
            Self::Update(s) => write!(f, "{s}"),
            Self::Delete(s) => write!(f, "{s}"),
            Self::CreateTable(s) => write!(f, "{s}"),
            Self::CreateVirtualTable(s) => write!(f, "{s}"),
            Self::CreateIndex(s) => write!(f, "{s}"),
            Self::AlterTable(s) => write!(f, "{s}"),
            Self::DropTable(s) => write!(f, "{s}"),
            Self::DropIndex(s) => write!(f, "{s}"),
        }
    }
}

impl AstNode for Stmt {
    fn span(&self) -> Span {
        match self {
            Self::Query(s) => s.span(),
            Self::Insert(s) => s.span,
            Self::Update(s) => s.span,
            Self::Delete(s) => s.span,
            Self::CreateTable(s) => s.span,
            Self::CreateVirtualTable(s) => s.span,
            Self::CreateIndex(s) => s.span,
            Self::AlterTable(s) => s.span,
            Self::DropTable(s) => s.span,
            Self::DropIndex(s) => s.span,
        }
    }
}

/// An `INSERT INTO` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStmt {
    /// Span from `INSERT` to the end of the source.
    pub span: Span,
    /// Target table.
    pub table_name: ObjectName,
    /// Explicit column list, if present.
    pub columns: Vec<Ident>,
    /// The rows or query being inserted.
    pub source: InsertSource,
}

/// The data source of an INSERT.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    /// `VALUES (…), (…), …`
    Values(Vec<Vec<Expr>>),
    /// `INSERT INTO t SELECT …`
    Query(Box<Query>),
}

impl fmt::Display for InsertStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INSERT INTO {}", self.table_name)?;
        if !self.columns.is_empty() {
            f.write_str(" (")?;
            for (i, column) in self.columns.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{column}")?;
            }
            f.write_str(")")?;
        }
        match &self.source {
            InsertSource::Values(rows) => {
                f.write_str(" VALUES")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    f.write_str(" (")?;
                    for (j, value) in row.iter().enumerate() {
                        if j > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{value}")?;
                    }
                    f.write_str(")")?;
                }
                Ok(())
            }
            InsertSource::Query(query) => write!(f, " {query}"),
        }
    }
}

impl AstNode for InsertStmt {
    fn span(&self) -> Span {
        self.span
    }
}

/// One `SET` assignment in an UPDATE.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Target column.
    pub id: Ident,
    /// Assigned value.
    pub value: Expr,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.id, self.value)
    }
}

impl AstNode for Assignment {
    fn span(&self) -> Span {
        Span::new(self.id.span.from, self.value.span().to)
    }
}

/// An `UPDATE` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStmt {
    /// Span from `UPDATE` to the end of the last clause.
    pub span: Span,
    /// Target table.
    pub table_name: ObjectName,
    /// SET assignments.
    pub assignments: Vec<Assignment>,
    /// WHERE clause.
    pub selection: Option<Expr>,
}

impl fmt::Display for UpdateStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UPDATE {} SET", self.table_name)?;
        for (i, assignment) in self.assignments.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, " {assignment}")?;
        }
        if let Some(selection) = &self.selection {
            write!(f, " WHERE {selection}")?;
        }
        Ok(())
    }
}

impl AstNode for UpdateStmt {
    fn span(&self) -> Span {
        self.span
    }
}

/// A `DELETE FROM` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStmt {
    /// Span from `DELETE` to the end of the last clause.
    pub span: Span,
    /// Target table.
    pub table_name: ObjectName,
    /// WHERE clause.
    pub selection: Option<Expr>,
}

impl fmt::Display for DeleteStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DELETE FROM {}", self.table_name)?;
        if let Some(selection) = &self.selection {
            write!(f, " WHERE {selection}")?;
        }
        Ok(())
    }
}

impl AstNode for DeleteStmt {
    fn span(&self) -> Span {
        self.span
    }
}

/// A parsed source file: statements plus the comment groups parked by
/// the parser (when comment parsing is enabled), both in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct File {
    /// Statements in source order.
    pub stmts: Vec<Stmt>,
    /// Comment groups in source order.
    pub comments: Vec<CommentGroup>,
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.stmts.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{stmt};")?;
        }
        Ok(())
    }
}

impl AstNode for File {
    fn span(&self) -> Span {
        match (self.stmts.first(), self.stmts.last()) {
            (Some(first), Some(last)) => Span::new(first.span().from, last.span().to),
            _ => Span::default(),
        }
    }
}
