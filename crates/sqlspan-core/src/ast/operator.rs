//! SQL operators with canonical spellings and precedence.

use core::fmt;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulus,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
    Like,
    NotLike,
}

impl BinaryOperator {
    /// Returns the canonical SQL spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulus => "%",
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
        }
    }

    /// Returns the operator precedence (higher binds tighter). The
    /// values match the parser's ladder so rendering can decide where
    /// parentheses are required.
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Or => 5,
            Self::And => 10,
            Self::Eq
            | Self::NotEq
            | Self::Lt
            | Self::LtEq
            | Self::Gt
            | Self::GtEq
            | Self::Like
            | Self::NotLike => 20,
            Self::Plus | Self::Minus => 30,
            Self::Multiply | Self::Divide | Self::Modulus => 40,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unary (prefix) operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Minus,
    Not,
}

impl UnaryOperator {
    /// Returns the canonical SQL spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Not => "NOT",
        }
    }

    /// Returns the operator precedence.
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Not => 15,
            Self::Plus | Self::Minus => 50,
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ordering() {
        assert!(BinaryOperator::Multiply.precedence() > BinaryOperator::Plus.precedence());
        assert!(BinaryOperator::And.precedence() > BinaryOperator::Or.precedence());
        assert!(BinaryOperator::Eq.precedence() > BinaryOperator::And.precedence());
    }

    #[test]
    fn test_spelling() {
        assert_eq!(BinaryOperator::NotEq.as_str(), "!=");
        assert_eq!(BinaryOperator::NotLike.as_str(), "NOT LIKE");
        assert_eq!(UnaryOperator::Not.as_str(), "NOT");
    }
}
