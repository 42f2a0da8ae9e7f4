//! Generic AST traversal.
//!
//! `NodeRef` is a borrowing view over every spanned node type, and its
//! `children()` enumeration is the single source of truth for child
//! slots: `inspect`, the comment map and the structural comparison all
//! walk through it.

use crate::lexer::Span;

use super::ddl::{
    AlterColumnAction, AlterTableAction, ColumnConstraint, ColumnConstraintKind, ColumnDef,
    TableConstraint, TableConstraintKind, TableElement, VirtualTableArg,
};
use super::expression::{Expr, Ident, ObjectName};
use super::query::{
    Cte, JoinClause, JoinConstraint, LimitExpr, OrderByExpr, Query, SelectItem, SqlSelect,
    TableFactor,
};
use super::statement::{Assignment, File, InsertSource, Stmt};
use super::AstNode;

/// A borrowed reference to any AST node.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    File(&'a File),
    Stmt(&'a Stmt),
    Query(&'a Query),
    Cte(&'a Cte),
    Select(&'a SqlSelect),
    SelectItem(&'a SelectItem),
    TableFactor(&'a TableFactor),
    JoinClause(&'a JoinClause),
    OrderByExpr(&'a OrderByExpr),
    LimitExpr(&'a LimitExpr),
    Expr(&'a Expr),
    Ident(&'a Ident),
    ObjectName(&'a ObjectName),
    ColumnDef(&'a ColumnDef),
    ColumnConstraint(&'a ColumnConstraint),
    TableConstraint(&'a TableConstraint),
    VirtualTableArg(&'a VirtualTableArg),
    Assignment(&'a Assignment),
}

impl<'a> NodeRef<'a> {
    /// Returns the node's source span.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::File(n) => n.span(),
            Self::Stmt(n) => n.span(),
            Self::Query(n) => n.span(),
            Self::Cte(n) => n.span(),
            Self::Select(n) => n.span(),
            Self::SelectItem(n) => n.span(),
            Self::TableFactor(n) => n.span(),
            Self::JoinClause(n) => n.span(),
            Self::OrderByExpr(n) => n.span(),
            Self::LimitExpr(n) => n.span(),
            Self::Expr(n) => n.span(),
            Self::Ident(n) => n.span(),
            Self::ObjectName(n) => n.span(),
            Self::ColumnDef(n) => n.span(),
            Self::ColumnConstraint(n) => n.span(),
            Self::TableConstraint(n) => n.span(),
            Self::VirtualTableArg(n) => n.span(),
            Self::Assignment(n) => n.span(),
        }
    }

    /// Renders the node back to SQL.
    #[must_use]
    pub fn to_sql_string(&self) -> String {
        match self {
            Self::File(n) => n.to_string(),
            Self::Stmt(n) => n.to_string(),
            Self::Query(n) => n.to_string(),
            Self::Cte(n) => n.to_string(),
            Self::Select(n) => n.to_string(),
            Self::SelectItem(n) => n.to_string(),
            Self::TableFactor(n) => n.to_string(),
            Self::JoinClause(n) => n.to_string(),
            Self::OrderByExpr(n) => n.to_string(),
            Self::LimitExpr(n) => n.to_string(),
            Self::Expr(n) => n.to_string(),
            Self::Ident(n) => n.to_string(),
            Self::ObjectName(n) => n.to_string(),
            Self::ColumnDef(n) => n.to_string(),
            Self::ColumnConstraint(n) => n.to_string(),
            Self::TableConstraint(n) => n.to_string(),
            Self::VirtualTableArg(n) => n.to_string(),
            Self::Assignment(n) => n.to_string(),
        }
    }

    /// Returns a stable name for the node's concrete kind, down to the
    /// statement/expression variant.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::File(_) => "File",
            Self::Stmt(stmt) => match stmt {
                Stmt::Query(_) => "QueryStmt",
                Stmt::Insert(_) => "InsertStmt",
                Stmt::Update(_) => "UpdateStmt",
                Stmt::Delete(_) => "DeleteStmt",
                Stmt::CreateTable(_) => "CreateTableStmt",
                Stmt::CreateVirtualTable(_) => "CreateVirtualTableStmt",
                Stmt::CreateIndex(_) => "CreateIndexStmt",
                Stmt::AlterTable(_) => "AlterTableStmt",
                Stmt::DropTable(_) => "DropTableStmt",
                Stmt::DropIndex(_) => "DropIndexStmt",
            },
            Self::Query(_) => "Query",
            Self::Cte(_) => "Cte",
            Self::Select(_) => "SqlSelect",
            Self::SelectItem(_) => "SelectItem",
            Self::TableFactor(_) => "TableFactor",
            Self::JoinClause(_) => "JoinClause",
            Self::OrderByExpr(_) => "OrderByExpr",
            Self::LimitExpr(_) => "LimitExpr",
            Self::Expr(expr) => match expr {
                Expr::Identifier(_) => "Ident",
                Expr::CompoundIdentifier(_) => "CompoundIdent",
                Expr::Wildcard(_) => "Wildcard",
                Expr::QualifiedWildcard { .. } => "QualifiedWildcard",
                Expr::IsNull { .. } => "IsNull",
                Expr::IsNotNull { .. } => "IsNotNull",
                Expr::InList { .. } => "InList",
                Expr::InSubquery { .. } => "InSubQuery",
                Expr::Between { .. } => "Between",
                Expr::BinaryOp { .. } => "BinaryExpr",
                Expr::UnaryOp { .. } => "UnaryExpr",
                Expr::Cast { .. } => "Cast",
                Expr::Nested { .. } => "Nested",
                Expr::Value { .. } => "Value",
                Expr::Function(_) => "Function",
                Expr::Case(_) => "Case",
                Expr::Exists { .. } => "Exists",
                Expr::Subquery { .. } => "SubQuery",
            },
            Self::Ident(_) => "Ident",
            Self::ObjectName(_) => "ObjectName",
            Self::ColumnDef(_) => "ColumnDef",
            Self::ColumnConstraint(_) => "ColumnConstraint",
            Self::TableConstraint(_) => "TableConstraint",
            Self::VirtualTableArg(_) => "VirtualTableArg",
            Self::Assignment(_) => "Assignment",
        }
    }

    /// Enumerates the node's children in source order.
    #[must_use]
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        let mut out = Vec::new();
        match self {
            Self::File(file) => {
                out.extend(file.stmts.iter().map(NodeRef::Stmt));
            }
            Self::Stmt(stmt) => match stmt {
                Stmt::Query(query) => out.push(NodeRef::Query(query)),
                Stmt::Insert(insert) => {
                    out.push(NodeRef::ObjectName(&insert.table_name));
                    out.extend(insert.columns.iter().map(NodeRef::Ident));
                    match &insert.source {
                        InsertSource::Values(rows) => {
                            for row in rows {
                                out.extend(row.iter().map(NodeRef::Expr));
                            }
                        }
                        InsertSource::Query(query) => out.push(NodeRef::Query(query)),
                    }
                }
                Stmt::Update(update) => {
                    out.push(NodeRef::ObjectName(&update.table_name));
                    out.extend(update.assignments.iter().map(NodeRef::Assignment));
                    out.extend(update.selection.iter().map(NodeRef::Expr));
                }
                Stmt::Delete(delete) => {
                    out.push(NodeRef::ObjectName(&delete.table_name));
                    out.extend(delete.selection.iter().map(NodeRef::Expr));
                }
                Stmt::CreateTable(create) => {
                    out.push(NodeRef::ObjectName(&create.name));
                    for element in &create.elements {
                        match element {
                            TableElement::Column(column) => out.push(NodeRef::ColumnDef(column)),
                            TableElement::Constraint(constraint) => {
                                out.push(NodeRef::TableConstraint(constraint));
                            }
                        }
                    }
                }
                Stmt::CreateVirtualTable(create) => {
                    out.push(NodeRef::ObjectName(&create.name));
                    out.push(NodeRef::Ident(&create.module));
                    out.extend(create.args.iter().map(NodeRef::VirtualTableArg));
                }
                Stmt::CreateIndex(create) => {
                    out.push(NodeRef::ObjectName(&create.name));
                    out.push(NodeRef::ObjectName(&create.table_name));
                    out.extend(create.method.iter().map(NodeRef::Ident));
                    out.extend(create.columns.iter().map(NodeRef::Ident));
                    out.extend(create.selection.iter().map(NodeRef::Expr));
                }
                Stmt::AlterTable(alter) => {
                    out.push(NodeRef::ObjectName(&alter.table_name));
                    match &alter.action {
                        AlterTableAction::AddColumn { column } => {
                            out.push(NodeRef::ColumnDef(column));
                        }
                        AlterTableAction::AddConstraint { constraint } => {
                            out.push(NodeRef::TableConstraint(constraint));
                        }
                        AlterTableAction::DropColumn { name, .. }
                        | AlterTableAction::DropConstraint { name, .. } => {
                            out.push(NodeRef::Ident(name));
                        }
                        AlterTableAction::AlterColumn { name, op } => {
                            out.push(NodeRef::Ident(name));
                            match op {
                                AlterColumnAction::SetDefault(expr) => {
                                    out.push(NodeRef::Expr(expr));
                                }
                                AlterColumnAction::SetType(_)
                                | AlterColumnAction::DropDefault
                                | AlterColumnAction::SetNotNull
                                | AlterColumnAction::DropNotNull => {}
                            }
                        }
                        AlterTableAction::RenameTable { new_name } => {
                            out.push(NodeRef::ObjectName(new_name));
                        }
                        AlterTableAction::RenameColumn { old_name, new_name } => {
                            out.push(NodeRef::Ident(old_name));
                            out.push(NodeRef::Ident(new_name));
                        }
                    }
                }
                Stmt::DropTable(drop) => {
                    out.extend(drop.names.iter().map(NodeRef::ObjectName));
                }
                Stmt::DropIndex(drop) => {
                    out.extend(drop.names.iter().map(NodeRef::ObjectName));
                }
            },
            Self::Query(query) => {
                out.extend(query.ctes.iter().map(NodeRef::Cte));
                out.push(NodeRef::Select(&query.body));
                out.extend(query.order_by.iter().map(NodeRef::OrderByExpr));
                out.extend(query.limit.iter().map(NodeRef::LimitExpr));
            }
            Self::Cte(cte) => {
                out.push(NodeRef::Ident(&cte.alias));
                out.push(NodeRef::Query(&cte.query));
            }
            Self::Select(select) => {
                out.extend(select.projection.iter().map(NodeRef::SelectItem));
                out.extend(select.from.iter().map(NodeRef::TableFactor));
                out.extend(select.selection.iter().map(NodeRef::Expr));
                out.extend(select.group_by.iter().map(NodeRef::Expr));
                out.extend(select.having.iter().map(NodeRef::Expr));
            }
            Self::SelectItem(item) => match item {
                SelectItem::UnnamedExpr(expr) => out.push(NodeRef::Expr(expr)),
                SelectItem::ExprWithAlias { expr, alias } => {
                    out.push(NodeRef::Expr(expr));
                    out.push(NodeRef::Ident(alias));
                }
                SelectItem::QualifiedWildcard { prefix, .. } => {
                    out.push(NodeRef::ObjectName(prefix));
                }
                SelectItem::Wildcard(_) => {}
            },
            Self::TableFactor(factor) => match factor {
                TableFactor::Table { name, alias } => {
                    out.push(NodeRef::ObjectName(name));
                    out.extend(alias.iter().map(NodeRef::Ident));
                }
                TableFactor::Derived {
                    subquery, alias, ..
                } => {
                    out.push(NodeRef::Query(subquery));
                    out.extend(alias.iter().map(NodeRef::Ident));
                }
                TableFactor::Join { left, join } => {
                    out.push(NodeRef::TableFactor(left));
                    out.push(NodeRef::JoinClause(join));
                }
            },
            Self::JoinClause(join) => {
                out.push(NodeRef::TableFactor(&join.right));
                match &join.constraint {
                    JoinConstraint::On(expr) => out.push(NodeRef::Expr(expr)),
                    JoinConstraint::Using(columns) => {
                        out.extend(columns.iter().map(NodeRef::Ident));
                    }
                    JoinConstraint::None => {}
                }
            }
            Self::OrderByExpr(order_by) => out.push(NodeRef::Expr(&order_by.expr)),
            Self::LimitExpr(limit) => {
                out.push(NodeRef::Expr(&limit.quantity));
                out.extend(limit.offset.iter().map(NodeRef::Expr));
            }
            Self::Expr(expr) => match expr {
                Expr::Identifier(_) | Expr::Wildcard(_) | Expr::Value { .. } => {}
                Expr::CompoundIdentifier(idents) => {
                    out.extend(idents.iter().map(NodeRef::Ident));
                }
                Expr::QualifiedWildcard { prefix, .. } => {
                    out.extend(prefix.iter().map(NodeRef::Ident));
                }
                Expr::IsNull { expr, .. }
                | Expr::IsNotNull { expr, .. }
                | Expr::UnaryOp { expr, .. }
                | Expr::Cast { expr, .. }
                | Expr::Nested { expr, .. } => out.push(NodeRef::Expr(expr)),
                Expr::InList { expr, list, .. } => {
                    out.push(NodeRef::Expr(expr));
                    out.extend(list.iter().map(NodeRef::Expr));
                }
                Expr::InSubquery { expr, subquery, .. } => {
                    out.push(NodeRef::Expr(expr));
                    out.push(NodeRef::Query(subquery));
                }
                Expr::Between {
                    expr, low, high, ..
                } => {
                    out.push(NodeRef::Expr(expr));
                    out.push(NodeRef::Expr(low));
                    out.push(NodeRef::Expr(high));
                }
                Expr::BinaryOp { left, right, .. } => {
                    out.push(NodeRef::Expr(left));
                    out.push(NodeRef::Expr(right));
                }
                Expr::Function(function) => {
                    out.push(NodeRef::ObjectName(&function.name));
                    out.extend(function.args.iter().map(NodeRef::Expr));
                }
                Expr::Case(case) => {
                    if let Some(operand) = &case.operand {
                        out.push(NodeRef::Expr(operand));
                    }
                    for (condition, result) in case.conditions.iter().zip(&case.results) {
                        out.push(NodeRef::Expr(condition));
                        out.push(NodeRef::Expr(result));
                    }
                    if let Some(else_result) = &case.else_result {
                        out.push(NodeRef::Expr(else_result));
                    }
                }
                Expr::Exists { subquery, .. } => out.push(NodeRef::Query(subquery)),
                Expr::Subquery { query, .. } => out.push(NodeRef::Query(query)),
            },
            Self::Ident(_) => {}
            Self::ObjectName(name) => {
                out.extend(name.0.iter().map(NodeRef::Ident));
            }
            Self::ColumnDef(column) => {
                out.push(NodeRef::Ident(&column.name));
                out.extend(column.constraints.iter().map(NodeRef::ColumnConstraint));
            }
            Self::ColumnConstraint(constraint) => {
                out.extend(constraint.name.iter().map(NodeRef::Ident));
                match &constraint.spec {
                    ColumnConstraintKind::Check(expr) | ColumnConstraintKind::Default(expr) => {
                        out.push(NodeRef::Expr(expr));
                    }
                    ColumnConstraintKind::References { table, columns } => {
                        out.push(NodeRef::ObjectName(table));
                        out.extend(columns.iter().map(NodeRef::Ident));
                    }
                    ColumnConstraintKind::NotNull | ColumnConstraintKind::Unique { .. } => {}
                }
            }
            Self::TableConstraint(constraint) => {
                out.extend(constraint.name.iter().map(NodeRef::Ident));
                match &constraint.spec {
                    TableConstraintKind::Unique { columns, .. } => {
                        out.extend(columns.iter().map(NodeRef::Ident));
                    }
                    TableConstraintKind::ForeignKey {
                        columns,
                        table,
                        referred_columns,
                    } => {
                        out.extend(columns.iter().map(NodeRef::Ident));
                        out.push(NodeRef::ObjectName(table));
                        out.extend(referred_columns.iter().map(NodeRef::Ident));
                    }
                    TableConstraintKind::Check(expr) => out.push(NodeRef::Expr(expr)),
                }
            }
            Self::VirtualTableArg(arg) => match arg {
                VirtualTableArg::Expr(expr) => out.push(NodeRef::Expr(expr)),
                VirtualTableArg::Assign { name, value } => {
                    out.push(NodeRef::Ident(name));
                    out.push(NodeRef::Expr(value));
                }
            },
            Self::Assignment(assignment) => {
                out.push(NodeRef::Ident(&assignment.id));
                out.push(NodeRef::Expr(&assignment.value));
            }
        }
        out
    }
}

/// Walks the tree depth-first in pre-order. `f(Some(node))` is invoked
/// for each node; returning `false` skips the node's children. After a
/// node's children have been walked, `f(None)` marks the end of the
/// subtree, so every descent is paired with a pop marker.
pub fn inspect<'a>(node: NodeRef<'a>, f: &mut impl FnMut(Option<NodeRef<'a>>) -> bool) {
    if f(Some(node)) {
        for child in node.children() {
            inspect(child, f);
        }
        f(None);
    }
}
