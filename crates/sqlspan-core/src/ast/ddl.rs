//! DDL statement AST types.

use core::fmt;

use crate::lexer::Span;

use super::expression::{Expr, Ident, ObjectName};
use super::types::DataType;
use super::AstNode;

/// A `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStmt {
    /// Span from `CREATE` to one past the closing parenthesis.
    pub span: Span,
    /// `IF NOT EXISTS` flag.
    pub if_not_exists: bool,
    /// Table name.
    pub name: ObjectName,
    /// Column definitions and table constraints, in source order.
    pub elements: Vec<TableElement>,
}

impl fmt::Display for CreateTableStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE TABLE ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(f, "{} (", self.name)?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{element}")?;
        }
        f.write_str(")")
    }
}

impl AstNode for CreateTableStmt {
    fn span(&self) -> Span {
        self.span
    }
}

/// One element of a CREATE TABLE body.
#[derive(Debug, Clone, PartialEq)]
pub enum TableElement {
    /// A column definition.
    Column(ColumnDef),
    /// A table-level constraint.
    Constraint(TableConstraint),
}

impl fmt::Display for TableElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(column) => write!(f, "{column}"),
            Self::Constraint(constraint) => write!(f, "{constraint}"),
        }
    }
}

impl AstNode for TableElement {
    fn span(&self) -> Span {
        match self {
            Self::Column(column) => column.span,
            Self::Constraint(constraint) => constraint.span,
        }
    }
}

/// A column definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// Span from the column name to the end of the last constraint.
    pub span: Span,
    /// Column name.
    pub name: Ident,
    /// Column type.
    pub data_type: DataType,
    /// Column constraints, in source order.
    pub constraints: Vec<ColumnConstraint>,
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)?;
        for constraint in &self.constraints {
            write!(f, " {constraint}")?;
        }
        Ok(())
    }
}

impl AstNode for ColumnDef {
    fn span(&self) -> Span {
        self.span
    }
}

/// A constraint attached to a single column, optionally named.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnConstraint {
    /// Span from `CONSTRAINT` (or the constraint keyword) to its end.
    pub span: Span,
    /// `CONSTRAINT name` prefix, if present.
    pub name: Option<Ident>,
    /// The constraint itself.
    pub spec: ColumnConstraintKind,
}

/// Column constraint kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnConstraintKind {
    /// `NOT NULL`
    NotNull,
    /// `UNIQUE` or `PRIMARY KEY`
    Unique { is_primary: bool },
    /// `CHECK (expr)`
    Check(Expr),
    /// `DEFAULT expr`
    Default(Expr),
    /// `REFERENCES table (columns)`
    References {
        table: ObjectName,
        columns: Vec<Ident>,
    },
}

impl fmt::Display for ColumnConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "CONSTRAINT {name} ")?;
        }
        match &self.spec {
            ColumnConstraintKind::NotNull => f.write_str("NOT NULL"),
            ColumnConstraintKind::Unique { is_primary } => {
                f.write_str(if *is_primary { "PRIMARY KEY" } else { "UNIQUE" })
            }
            ColumnConstraintKind::Check(expr) => write!(f, "CHECK({expr})"),
            ColumnConstraintKind::Default(expr) => write!(f, "DEFAULT {expr}"),
            ColumnConstraintKind::References { table, columns } => {
                write!(f, "REFERENCES {table}")?;
                if !columns.is_empty() {
                    f.write_str("(")?;
                    for (i, column) in columns.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{column}")?;
                    }
                    f.write_str(")")?;
                }
                Ok(())
            }
        }
    }
}

impl AstNode for ColumnConstraint {
    fn span(&self) -> Span {
        self.span
    }
}

/// A table-level constraint, optionally named.
#[derive(Debug, Clone, PartialEq)]
pub struct TableConstraint {
    /// Span from `CONSTRAINT` (or the constraint keyword) to its end.
    pub span: Span,
    /// `CONSTRAINT name` prefix, if present.
    pub name: Option<Ident>,
    /// The constraint itself.
    pub spec: TableConstraintKind,
}

/// Table constraint kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum TableConstraintKind {
    /// `UNIQUE (columns)` or `PRIMARY KEY (columns)`
    Unique {
        columns: Vec<Ident>,
        is_primary: bool,
    },
    /// `FOREIGN KEY (columns) REFERENCES table (columns)`
    ForeignKey {
        columns: Vec<Ident>,
        table: ObjectName,
        referred_columns: Vec<Ident>,
    },
    /// `CHECK (expr)`
    Check(Expr),
}

fn fmt_column_list(f: &mut fmt::Formatter<'_>, columns: &[Ident]) -> fmt::Result {
    f.write_str("(")?;
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{column}")?;
    }
    f.write_str(")")
}

impl fmt::Display for TableConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "CONSTRAINT {name} ")?;
        }
        match &self.spec {
            TableConstraintKind::Unique {
                columns,
                is_primary,
            } => {
                f.write_str(if *is_primary {
                    "PRIMARY KEY "
                } else {
                    "UNIQUE "
                })?;
                fmt_column_list(f, columns)
            }
            TableConstraintKind::ForeignKey {
                columns,
                table,
                referred_columns,
            } => {
                f.write_str("FOREIGN KEY ")?;
                fmt_column_list(f, columns)?;
                write!(f, " REFERENCES {table}")?;
                fmt_column_list(f, referred_columns)
            }
            TableConstraintKind::Check(expr) => write!(f, "CHECK({expr})"),
        }
    }
}

impl AstNode for TableConstraint {
    fn span(&self) -> Span {
        self.span
    }
}

/// A `CREATE VIRTUAL TABLE` statement (SQLite-style module syntax).
#[derive(Debug, Clone, PartialEq)]
pub struct CreateVirtualTableStmt {
    /// Span from `CREATE` to the end of the statement.
    pub span: Span,
    /// `IF NOT EXISTS` flag.
    pub if_not_exists: bool,
    /// Table name.
    pub name: ObjectName,
    /// The module named by `USING`.
    pub module: Ident,
    /// Module arguments.
    pub args: Vec<VirtualTableArg>,
}

impl fmt::Display for CreateVirtualTableStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE VIRTUAL TABLE ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(f, "{} USING {}", self.name, self.module)?;
        if !self.args.is_empty() {
            f.write_str("(")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl AstNode for CreateVirtualTableStmt {
    fn span(&self) -> Span {
        self.span
    }
}

/// One argument of a virtual table module.
#[derive(Debug, Clone, PartialEq)]
pub enum VirtualTableArg {
    /// A plain expression argument.
    Expr(Expr),
    /// A `name = expr` assignment argument.
    Assign { name: Ident, value: Expr },
}

impl fmt::Display for VirtualTableArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expr(expr) => write!(f, "{expr}"),
            Self::Assign { name, value } => write!(f, "{name} = {value}"),
        }
    }
}

impl AstNode for VirtualTableArg {
    fn span(&self) -> Span {
        match self {
            Self::Expr(expr) => expr.span(),
            Self::Assign { name, value } => Span::new(name.span.from, value.span().to),
        }
    }
}

/// A `CREATE [UNIQUE] INDEX` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateIndexStmt {
    /// Span from `CREATE` to the end of the statement.
    pub span: Span,
    /// `UNIQUE` flag.
    pub unique: bool,
    /// Index name.
    pub name: ObjectName,
    /// Indexed table.
    pub table_name: ObjectName,
    /// Index method (`USING btree`), if given.
    pub method: Option<Ident>,
    /// Indexed columns.
    pub columns: Vec<Ident>,
    /// Partial-index predicate (`WHERE expr`), if given.
    pub selection: Option<Expr>,
}

impl fmt::Display for CreateIndexStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.unique {
            f.write_str("UNIQUE ")?;
        }
        write!(f, "INDEX {} ON {}", self.name, self.table_name)?;
        if let Some(method) = &self.method {
            write!(f, " USING {method}")?;
        }
        f.write_str(" ")?;
        fmt_column_list(f, &self.columns)?;
        if let Some(selection) = &self.selection {
            write!(f, " WHERE {selection}")?;
        }
        Ok(())
    }
}

impl AstNode for CreateIndexStmt {
    fn span(&self) -> Span {
        self.span
    }
}

/// An `ALTER TABLE` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct AlterTableStmt {
    /// Span from `ALTER` to the end of the action.
    pub span: Span,
    /// Target table.
    pub table_name: ObjectName,
    /// The single action of this statement.
    pub action: AlterTableAction,
}

/// An ALTER TABLE action.
#[derive(Debug, Clone, PartialEq)]
pub enum AlterTableAction {
    /// `ADD [COLUMN] column-def`
    AddColumn { column: ColumnDef },
    /// `ADD table-constraint`
    AddConstraint { constraint: TableConstraint },
    /// `DROP [COLUMN] name [CASCADE]`
    DropColumn { name: Ident, cascade: bool },
    /// `DROP CONSTRAINT name [CASCADE]`
    DropConstraint { name: Ident, cascade: bool },
    /// `ALTER [COLUMN] name op`
    AlterColumn {
        name: Ident,
        op: AlterColumnAction,
    },
    /// `RENAME TO new-name`
    RenameTable { new_name: ObjectName },
    /// `RENAME [COLUMN] old TO new`
    RenameColumn { old_name: Ident, new_name: Ident },
}

/// The operation of an `ALTER COLUMN` action.
#[derive(Debug, Clone, PartialEq)]
pub enum AlterColumnAction {
    /// `TYPE data-type`
    SetType(DataType),
    /// `SET DEFAULT expr`
    SetDefault(Expr),
    /// `DROP DEFAULT`
    DropDefault,
    /// `SET NOT NULL`
    SetNotNull,
    /// `DROP NOT NULL`
    DropNotNull,
}

impl fmt::Display for AlterTableStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ALTER TABLE {} ", self.table_name)?;
        match &self.action {
            AlterTableAction::AddColumn { column } => write!(f, "ADD COLUMN {column}"),
            AlterTableAction::AddConstraint { constraint } => write!(f, "ADD {constraint}"),
            AlterTableAction::DropColumn { name, cascade } => {
                write!(f, "DROP COLUMN {name}")?;
                if *cascade {
                    f.write_str(" CASCADE")?;
                }
                Ok(())
            }
            AlterTableAction::DropConstraint { name, cascade } => {
                write!(f, "DROP CONSTRAINT {name}")?;
                if *cascade {
                    f.write_str(" CASCADE")?;
                }
                Ok(())
            }
            AlterTableAction::AlterColumn { name, op } => {
                write!(f, "ALTER COLUMN {name} ")?;
                match op {
                    AlterColumnAction::SetType(data_type) => write!(f, "TYPE {data_type}"),
                    AlterColumnAction::SetDefault(expr) => write!(f, "SET DEFAULT {expr}"),
                    AlterColumnAction::DropDefault => f.write_str("DROP DEFAULT"),
                    AlterColumnAction::SetNotNull => f.write_str("SET NOT NULL"),
                    AlterColumnAction::DropNotNull => f.write_str("DROP NOT NULL"),
                }
            }
            AlterTableAction::RenameTable { new_name } => write!(f, "RENAME TO {new_name}"),
            AlterTableAction::RenameColumn { old_name, new_name } => {
                write!(f, "RENAME COLUMN {old_name} TO {new_name}")
            }
        }
    }
}

impl AstNode for AlterTableStmt {
    fn span(&self) -> Span {
        self.span
    }
}

/// A `DROP TABLE` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct DropTableStmt {
    /// Span from `DROP` to the end of the statement.
    pub span: Span,
    /// `IF EXISTS` flag.
    pub if_exists: bool,
    /// Tables to drop.
    pub names: Vec<ObjectName>,
    /// `CASCADE` flag.
    pub cascade: bool,
}

impl fmt::Display for DropTableStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DROP TABLE ")?;
        if self.if_exists {
            f.write_str("IF EXISTS ")?;
        }
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}")?;
        }
        if self.cascade {
            f.write_str(" CASCADE")?;
        }
        Ok(())
    }
}

impl AstNode for DropTableStmt {
    fn span(&self) -> Span {
        self.span
    }
}

/// A `DROP INDEX` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct DropIndexStmt {
    /// Span from `DROP` to the end of the statement.
    pub span: Span,
    /// Indexes to drop.
    pub names: Vec<ObjectName>,
}

impl fmt::Display for DropIndexStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DROP INDEX ")?;
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}")?;
        }
        Ok(())
    }
}

impl AstNode for DropIndexStmt {
    fn span(&self) -> Span {
        self.span
    }
}
