//! Query (SELECT / WITH) AST types.

use core::fmt;

use crate::lexer::{Pos, Span};

use super::expression::{Expr, Ident, ObjectName};
use super::AstNode;

/// A full query: optional CTE list, select body, ordering and limit.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Span from `WITH`/`SELECT` to the end of the last clause.
    pub span: Span,
    /// Common table expressions, in source order.
    pub ctes: Vec<Cte>,
    /// The select body.
    pub body: Box<SqlSelect>,
    /// ORDER BY entries.
    pub order_by: Vec<OrderByExpr>,
    /// LIMIT clause.
    pub limit: Option<LimitExpr>,
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.ctes.is_empty() {
            f.write_str("WITH ")?;
            for (i, cte) in self.ctes.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{cte}")?;
            }
            f.write_str(" ")?;
        }
        write!(f, "{}", self.body)?;
        if !self.order_by.is_empty() {
            f.write_str(" ORDER BY ")?;
            for (i, item) in self.order_by.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{item}")?;
            }
        }
        if let Some(limit) = &self.limit {
            write!(f, " {limit}")?;
        }
        Ok(())
    }
}

impl AstNode for Query {
    fn span(&self) -> Span {
        self.span
    }
}

/// A common table expression: `name AS (query)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cte {
    /// Span from the alias to one past the closing parenthesis.
    pub span: Span,
    /// The CTE name.
    pub alias: Ident,
    /// The parenthesized query.
    pub query: Box<Query>,
}

impl fmt::Display for Cte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} AS ({})", self.alias, self.query)
    }
}

impl AstNode for Cte {
    fn span(&self) -> Span {
        self.span
    }
}

/// The SELECT body of a query.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlSelect {
    /// Span from `SELECT` to the end of the last clause.
    pub span: Span,
    /// DISTINCT flag.
    pub distinct: bool,
    /// Projection items.
    pub projection: Vec<SelectItem>,
    /// FROM clause: a comma-separated list of (possibly joined)
    /// table factors. Empty for `SELECT 1`.
    pub from: Vec<TableFactor>,
    /// WHERE clause.
    pub selection: Option<Expr>,
    /// GROUP BY expressions.
    pub group_by: Vec<Expr>,
    /// HAVING clause.
    pub having: Option<Expr>,
}

impl fmt::Display for SqlSelect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT")?;
        if self.distinct {
            f.write_str(" DISTINCT")?;
        }
        for (i, item) in self.projection.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, " {item}")?;
        }
        if !self.from.is_empty() {
            f.write_str(" FROM ")?;
            for (i, factor) in self.from.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{factor}")?;
            }
        }
        if let Some(selection) = &self.selection {
            write!(f, " WHERE {selection}")?;
        }
        if !self.group_by.is_empty() {
            f.write_str(" GROUP BY ")?;
            for (i, expr) in self.group_by.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{expr}")?;
            }
        }
        if let Some(having) = &self.having {
            write!(f, " HAVING {having}")?;
        }
        Ok(())
    }
}

impl AstNode for SqlSelect {
    fn span(&self) -> Span {
        self.span
    }
}

/// One projection item.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    /// A bare expression.
    UnnamedExpr(Expr),
    /// `expr AS alias` (or with the `AS` elided).
    ExprWithAlias {
        expr: Expr,
        alias: Ident,
    },
    /// `prefix.*`
    QualifiedWildcard {
        prefix: ObjectName,
        /// Position one past the `*`.
        to: Pos,
    },
    /// `*`
    Wildcard(Span),
}

impl fmt::Display for SelectItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnnamedExpr(expr) => write!(f, "{expr}"),
            Self::ExprWithAlias { expr, alias } => write!(f, "{expr} AS {alias}"),
            Self::QualifiedWildcard { prefix, .. } => write!(f, "{prefix}.*"),
            Self::Wildcard(_) => f.write_str("*"),
        }
    }
}

impl AstNode for SelectItem {
    fn span(&self) -> Span {
        match self {
            Self::UnnamedExpr(expr) => expr.span(),
            Self::ExprWithAlias { expr, alias } => Span::new(expr.span().from, alias.span.to),
            Self::QualifiedWildcard { prefix, to } => Span::new(prefix.span().from, *to),
            Self::Wildcard(span) => *span,
        }
    }
}

/// A table factor in the FROM clause.
#[derive(Debug, Clone, PartialEq)]
pub enum TableFactor {
    /// A named table with an optional alias.
    Table {
        name: ObjectName,
        alias: Option<Ident>,
    },
    /// A derived table: `(query) [AS] alias`.
    Derived {
        span: Span,
        subquery: Box<Query>,
        alias: Option<Ident>,
    },
    /// A join chain; joins nest leftward so `a JOIN b JOIN c` is
    /// `Join(Join(a, b), c)`.
    Join {
        left: Box<TableFactor>,
        join: Box<JoinClause>,
    },
}

impl fmt::Display for TableFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table { name, alias } => {
                write!(f, "{name}")?;
                if let Some(alias) = alias {
                    write!(f, " AS {alias}")?;
                }
                Ok(())
            }
            Self::Derived {
                subquery, alias, ..
            } => {
                write!(f, "({subquery})")?;
                if let Some(alias) = alias {
                    write!(f, " AS {alias}")?;
                }
                Ok(())
            }
            Self::Join { left, join } => write!(f, "{left} {join}"),
        }
    }
}

impl AstNode for TableFactor {
    fn span(&self) -> Span {
        match self {
            Self::Table { name, alias } => match alias {
                Some(alias) => Span::new(name.span().from, alias.span.to),
                None => name.span(),
            },
            Self::Derived { span, alias, .. } => match alias {
                Some(alias) => Span::new(span.from, alias.span.to),
                None => *span,
            },
            Self::Join { left, join } => Span::new(left.span().from, join.span().to),
        }
    }
}

/// The kind of a join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOperator {
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
    Cross,
}

impl JoinOperator {
    /// Returns the canonical SQL spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "JOIN",
            Self::LeftOuter => "LEFT JOIN",
            Self::RightOuter => "RIGHT JOIN",
            Self::FullOuter => "FULL JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}

impl fmt::Display for JoinOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The join condition.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinConstraint {
    /// `ON expr`
    On(Expr),
    /// `USING (col, …)`
    Using(Vec<Ident>),
    /// No condition (CROSS JOIN).
    None,
}

/// One join step: operator, right-hand factor and condition.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    /// Span from the join keyword to the end of the condition.
    pub span: Span,
    /// The join operator.
    pub op: JoinOperator,
    /// The joined factor.
    pub right: Box<TableFactor>,
    /// The join condition.
    pub constraint: JoinConstraint,
}

impl fmt::Display for JoinClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op, self.right)?;
        match &self.constraint {
            JoinConstraint::On(expr) => write!(f, " ON {expr}"),
            JoinConstraint::Using(columns) => {
                f.write_str(" USING (")?;
                for (i, column) in columns.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{column}")?;
                }
                f.write_str(")")
            }
            JoinConstraint::None => Ok(()),
        }
    }
}

impl AstNode for JoinClause {
    fn span(&self) -> Span {
        self.span
    }
}

/// One ORDER BY entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByExpr {
    /// Span from the expression to the end of the direction keyword.
    pub span: Span,
    /// The ordering expression.
    pub expr: Box<Expr>,
    /// `Some(true)` for ASC, `Some(false)` for DESC, `None` if
    /// unspecified.
    pub asc: Option<bool>,
}

impl fmt::Display for OrderByExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        match self.asc {
            Some(true) => f.write_str(" ASC"),
            Some(false) => f.write_str(" DESC"),
            None => Ok(()),
        }
    }
}

impl AstNode for OrderByExpr {
    fn span(&self) -> Span {
        self.span
    }
}

/// The LIMIT clause: `LIMIT quantity [OFFSET offset]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitExpr {
    /// Span from `LIMIT` to the end of the clause.
    pub span: Span,
    /// Row count expression.
    pub quantity: Expr,
    /// OFFSET expression.
    pub offset: Option<Expr>,
}

impl fmt::Display for LimitExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LIMIT {}", self.quantity)?;
        if let Some(offset) = &self.offset {
            write!(f, " OFFSET {offset}")?;
        }
        Ok(())
    }
}

impl AstNode for LimitExpr {
    fn span(&self) -> Span {
        self.span
    }
}
