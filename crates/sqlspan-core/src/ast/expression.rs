//! Expression AST types.

use core::fmt;

use crate::lexer::{Pos, Span, Word};

use super::operator::{BinaryOperator, UnaryOperator};
use super::query::Query;
use super::types::DataType;
use super::value::Value;
use super::AstNode;

/// An identifier, with its original quote style preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    /// The identifier as written, without quotes.
    pub value: String,
    /// The opening quote character, if the identifier was quoted.
    pub quote_style: Option<char>,
    /// Source span, including quotes.
    pub span: Span,
}

impl Ident {
    /// Creates an unquoted identifier.
    #[must_use]
    pub fn new(value: impl Into<String>, span: Span) -> Self {
        Self {
            value: value.into(),
            quote_style: None,
            span,
        }
    }

    /// Creates an identifier with an explicit quote style.
    #[must_use]
    pub fn with_quote(value: impl Into<String>, quote_style: char, span: Span) -> Self {
        Self {
            value: value.into(),
            quote_style: Some(quote_style),
            span,
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quote_style {
            Some(open) => write!(
                f,
                "{}{}{}",
                open,
                self.value,
                Word::matching_end_quote(open)
            ),
            None => f.write_str(&self.value),
        }
    }
}

impl AstNode for Ident {
    fn span(&self) -> Span {
        self.span
    }
}

/// A possibly-qualified name (`schema.table`, `table`).
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectName(pub Vec<Ident>);

impl ObjectName {
    /// Returns the trailing (unqualified) identifier.
    #[must_use]
    pub fn name(&self) -> &Ident {
        self.0.last().expect("ObjectName is never empty")
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ident) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{ident}")?;
        }
        Ok(())
    }
}

impl AstNode for ObjectName {
    fn span(&self) -> Span {
        let first = self.0.first().expect("ObjectName is never empty");
        let last = self.0.last().expect("ObjectName is never empty");
        Span::new(first.span.from, last.span.to)
    }
}

/// A function call.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// Function name.
    pub name: ObjectName,
    /// Arguments; `COUNT(*)` carries a single `Expr::Wildcard`.
    pub args: Vec<Expr>,
    /// Position one past the closing parenthesis.
    pub rparen: Pos,
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

impl AstNode for Function {
    fn span(&self) -> Span {
        Span::new(self.name.span().from, self.rparen)
    }
}

/// A `CASE … END` expression, in both the simple (with operand) and
/// searched forms. `conditions` and `results` run in lockstep.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseExpr {
    /// Span from `CASE` to one past `END`.
    pub span: Span,
    /// Operand of a simple CASE.
    pub operand: Option<Box<Expr>>,
    /// WHEN expressions.
    pub conditions: Vec<Expr>,
    /// THEN expressions, one per condition.
    pub results: Vec<Expr>,
    /// ELSE expression.
    pub else_result: Option<Box<Expr>>,
}

impl fmt::Display for CaseExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CASE")?;
        if let Some(operand) = &self.operand {
            write!(f, " {operand}")?;
        }
        for (condition, result) in self.conditions.iter().zip(&self.results) {
            write!(f, " WHEN {condition} THEN {result}")?;
        }
        if let Some(else_result) = &self.else_result {
            write!(f, " ELSE {else_result}")?;
        }
        f.write_str(" END")
    }
}

impl AstNode for CaseExpr {
    fn span(&self) -> Span {
        self.span
    }
}

/// An SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A plain identifier.
    Identifier(Ident),
    /// A dotted identifier chain (`t.col`, `db.t.col`).
    CompoundIdentifier(Vec<Ident>),
    /// `*`
    Wildcard(Span),
    /// `t.*`
    QualifiedWildcard {
        /// The qualifying identifiers.
        prefix: Vec<Ident>,
        /// Position one past the `*`.
        to: Pos,
    },
    /// `expr IS NULL`
    IsNull {
        expr: Box<Expr>,
        /// Position one past `NULL`.
        to: Pos,
    },
    /// `expr IS NOT NULL`
    IsNotNull {
        expr: Box<Expr>,
        /// Position one past `NULL`.
        to: Pos,
    },
    /// `expr [NOT] IN (e1, e2, …)`
    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
        negated: bool,
        /// Position one past the closing parenthesis.
        rparen: Pos,
    },
    /// `expr [NOT] IN (SELECT …)`
    InSubquery {
        expr: Box<Expr>,
        subquery: Box<Query>,
        negated: bool,
        /// Position one past the closing parenthesis.
        rparen: Pos,
    },
    /// `expr [NOT] BETWEEN low AND high`
    Between {
        expr: Box<Expr>,
        negated: bool,
        low: Box<Expr>,
        high: Box<Expr>,
    },
    /// A binary operation.
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
    /// A prefix operation.
    UnaryOp {
        /// Position of the operator.
        from: Pos,
        op: UnaryOperator,
        expr: Box<Expr>,
    },
    /// `CAST(expr AS type)` (also produced by `expr::type`).
    Cast {
        expr: Box<Expr>,
        data_type: DataType,
        span: Span,
    },
    /// A parenthesized expression.
    Nested { expr: Box<Expr>, span: Span },
    /// A literal.
    Value { value: Value, span: Span },
    /// A function call.
    Function(Function),
    /// `CASE … END`
    Case(CaseExpr),
    /// `[NOT] EXISTS (SELECT …)`
    Exists {
        negated: bool,
        subquery: Box<Query>,
        span: Span,
    },
    /// A scalar subquery `(SELECT …)`.
    Subquery { query: Box<Query>, span: Span },
}

impl Expr {
    /// Precedence of the expression's top-level operator, if it has
    /// one. Used to decide minimal parenthesization when rendering.
    #[must_use]
    pub fn precedence(&self) -> Option<u8> {
        match self {
            Self::BinaryOp { op, .. } => Some(op.precedence()),
            Self::UnaryOp { op, .. } => Some(op.precedence()),
            Self::Between { .. } | Self::InList { .. } | Self::InSubquery { .. } => Some(20),
            Self::IsNull { .. } | Self::IsNotNull { .. } => Some(17),
            _ => None,
        }
    }
}

/// Writes `child`, parenthesized iff its top-level operator binds
/// strictly looser than the surrounding context (or equally on the
/// non-associative right side).
fn fmt_operand(
    f: &mut fmt::Formatter<'_>,
    child: &Expr,
    parent_precedence: u8,
    wrap_equal: bool,
) -> fmt::Result {
    let needs_parens = match child.precedence() {
        Some(p) if p < parent_precedence => true,
        Some(p) if p == parent_precedence => wrap_equal,
        _ => false,
    };
    if needs_parens {
        write!(f, "({child})")
    } else {
        write!(f, "{child}")
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(ident) => write!(f, "{ident}"),
            Self::CompoundIdentifier(idents) => {
                for (i, ident) in idents.iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    write!(f, "{ident}")?;
                }
                Ok(())
            }
            Self::Wildcard(_) => f.write_str("*"),
            Self::QualifiedWildcard { prefix, .. } => {
                for ident in prefix {
                    write!(f, "{ident}.")?;
                }
                f.write_str("*")
            }
            Self::IsNull { expr, .. } => {
                fmt_operand(f, expr, 17, false)?;
                f.write_str(" IS NULL")
            }
            Self::IsNotNull { expr, .. } => {
                fmt_operand(f, expr, 17, false)?;
                f.write_str(" IS NOT NULL")
            }
            Self::InList { expr, list, negated, .. } => {
                fmt_operand(f, expr, 20, false)?;
                f.write_str(if *negated { " NOT IN (" } else { " IN (" })?;
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            Self::InSubquery {
                expr,
                subquery,
                negated,
                ..
            } => {
                fmt_operand(f, expr, 20, false)?;
                f.write_str(if *negated { " NOT IN (" } else { " IN (" })?;
                write!(f, "{subquery})")
            }
            Self::Between {
                expr,
                negated,
                low,
                high,
            } => {
                fmt_operand(f, expr, 20, false)?;
                f.write_str(if *negated { " NOT BETWEEN " } else { " BETWEEN " })?;
                // Bounds parse at BETWEEN precedence, so anything that
                // binds at or below comparison level needs parentheses
                // to survive a re-parse.
                fmt_operand(f, low, 20, true)?;
                f.write_str(" AND ")?;
                fmt_operand(f, high, 20, true)
            }
            Self::BinaryOp { left, op, right } => {
                fmt_operand(f, left, op.precedence(), false)?;
                write!(f, " {op} ")?;
                fmt_operand(f, right, op.precedence(), true)
            }
            Self::UnaryOp { op, expr, .. } => {
                match op {
                    UnaryOperator::Not => f.write_str("NOT ")?,
                    _ => write!(f, "{op}")?,
                }
                // Equal precedence wraps too: `- -1` must not render
                // as `--1`, which would lex as a comment.
                fmt_operand(f, expr, op.precedence(), true)
            }
            Self::Cast {
                expr, data_type, ..
            } => write!(f, "CAST({expr} AS {data_type})"),
            Self::Nested { expr, .. } => write!(f, "({expr})"),
            Self::Value { value, .. } => write!(f, "{value}"),
            Self::Function(function) => write!(f, "{function}"),
            Self::Case(case) => write!(f, "{case}"),
            Self::Exists {
                negated, subquery, ..
            } => {
                if *negated {
                    f.write_str("NOT ")?;
                }
                write!(f, "EXISTS ({subquery})")
            }
            Self::Subquery { query, .. } => write!(f, "({query})"),
        }
    }
}

impl AstNode for Expr {
    fn span(&self) -> Span {
        match self {
            Self::Identifier(ident) => ident.span,
            Self::CompoundIdentifier(idents) => {
                let first = idents.first().expect("compound identifier is never empty");
                let last = idents.last().expect("compound identifier is never empty");
                Span::new(first.span.from, last.span.to)
            }
            Self::Wildcard(span) => *span,
            Self::QualifiedWildcard { prefix, to } => {
                let first = prefix.first().expect("qualified wildcard has a prefix");
                Span::new(first.span.from, *to)
            }
            Self::IsNull { expr, to } | Self::IsNotNull { expr, to } => {
                Span::new(expr.span().from, *to)
            }
            Self::InList { expr, rparen, .. } | Self::InSubquery { expr, rparen, .. } => {
                Span::new(expr.span().from, *rparen)
            }
            Self::Between { expr, high, .. } => Span::new(expr.span().from, high.span().to),
            Self::BinaryOp { left, right, .. } => Span::new(left.span().from, right.span().to),
            Self::UnaryOp { from, expr, .. } => Span::new(*from, expr.span().to),
            Self::Cast { span, .. }
            | Self::Nested { span, .. }
            | Self::Value { span, .. }
            | Self::Exists { span, .. }
            | Self::Subquery { span, .. } => *span,
            Self::Function(function) => function.span(),
            Self::Case(case) => case.span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(value: &str) -> Expr {
        Expr::Identifier(Ident::new(value, Span::default()))
    }

    fn long(v: i64) -> Expr {
        Expr::Value {
            value: Value::Long(v),
            span: Span::default(),
        }
    }

    fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
        Expr::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    #[test]
    fn test_binary_render() {
        let expr = binary(ident("col1"), BinaryOperator::Multiply, long(2));
        assert_eq!(expr.to_string(), "col1 * 2");
    }

    #[test]
    fn test_minimal_parens_on_lower_precedence_child() {
        // (a OR b) AND c needs the parentheses to survive a re-parse.
        let expr = binary(
            binary(ident("a"), BinaryOperator::Or, ident("b")),
            BinaryOperator::And,
            ident("c"),
        );
        assert_eq!(expr.to_string(), "(a OR b) AND c");
    }

    #[test]
    fn test_no_parens_on_higher_precedence_child() {
        let expr = binary(
            ident("a"),
            BinaryOperator::Plus,
            binary(ident("b"), BinaryOperator::Multiply, ident("c")),
        );
        assert_eq!(expr.to_string(), "a + b * c");
    }

    #[test]
    fn test_right_side_equal_precedence_wraps() {
        // a - (b - c) is not the same as a - b - c.
        let expr = binary(
            ident("a"),
            BinaryOperator::Minus,
            binary(ident("b"), BinaryOperator::Minus, ident("c")),
        );
        assert_eq!(expr.to_string(), "a - (b - c)");

        let left_leaning = binary(
            binary(ident("a"), BinaryOperator::Minus, ident("b")),
            BinaryOperator::Minus,
            ident("c"),
        );
        assert_eq!(left_leaning.to_string(), "a - b - c");
    }

    #[test]
    fn test_not_wraps_looser_operand() {
        let expr = Expr::UnaryOp {
            from: Pos::new(1, 1),
            op: UnaryOperator::Not,
            expr: Box::new(binary(ident("a"), BinaryOperator::And, ident("b"))),
        };
        assert_eq!(expr.to_string(), "NOT (a AND b)");
    }

    #[test]
    fn test_between_bounds_wrap_comparisons() {
        let expr = Expr::Between {
            expr: Box::new(ident("x")),
            negated: false,
            low: Box::new(binary(ident("a"), BinaryOperator::Eq, ident("b"))),
            high: Box::new(binary(ident("c"), BinaryOperator::Plus, ident("d"))),
        };
        assert_eq!(expr.to_string(), "x BETWEEN (a = b) AND c + d");
    }

    #[test]
    fn test_span_composition() {
        let left = Expr::Identifier(Ident::new(
            "a",
            Span::new(Pos::new(1, 1), Pos::new(1, 2)),
        ));
        let right = Expr::Identifier(Ident::new(
            "b",
            Span::new(Pos::new(1, 5), Pos::new(1, 6)),
        ));
        let expr = binary(left, BinaryOperator::Plus, right);
        assert_eq!(expr.span(), Span::new(Pos::new(1, 1), Pos::new(1, 6)));
    }
}
