//! Operator precedence for the Pratt expression parser.

use crate::ast::BinaryOperator;
use crate::lexer::{Keyword, TokenKind};

/// `OR`
pub(crate) const OR_PREC: u8 = 5;
/// `AND`
pub(crate) const AND_PREC: u8 = 10;
/// Prefix `NOT`
pub(crate) const UNARY_NOT_PREC: u8 = 15;
/// `IS`
pub(crate) const IS_PREC: u8 = 17;
/// Comparisons, `LIKE`, `IN`, `BETWEEN`
pub(crate) const CMP_PREC: u8 = 20;
/// Binary `+` / `-`
pub(crate) const PLUS_MINUS_PREC: u8 = 30;
/// `*` / `/` / `%`
pub(crate) const MUL_DIV_PREC: u8 = 40;
/// `::` cast and unary sign
pub(crate) const UNARY_SIGN_PREC: u8 = 50;

/// Returns the infix precedence of a token, or 0 if it cannot continue
/// an expression. `NOT` is only infix when followed by `IN`, `BETWEEN`
/// or `LIKE`, which the parser checks before calling this.
pub(crate) fn infix_precedence(kind: &TokenKind) -> u8 {
    match kind {
        TokenKind::Word(w) => match w.keyword {
            _ if w.quote_style.is_some() => 0,
            Some(Keyword::Or) => OR_PREC,
            Some(Keyword::And) => AND_PREC,
            Some(Keyword::Is) => IS_PREC,
            Some(Keyword::In) | Some(Keyword::Between) | Some(Keyword::Like) => CMP_PREC,
            _ => 0,
        },
        TokenKind::Eq
        | TokenKind::Neq
        | TokenKind::Lt
        | TokenKind::LtEq
        | TokenKind::Gt
        | TokenKind::GtEq => CMP_PREC,
        TokenKind::Plus | TokenKind::Minus => PLUS_MINUS_PREC,
        TokenKind::Mult | TokenKind::Div | TokenKind::Mod => MUL_DIV_PREC,
        TokenKind::DoubleColon => UNARY_SIGN_PREC,
        _ => 0,
    }
}

/// Maps an operator token to its binary operator, for the plain
/// left-associative cases.
pub(crate) fn binary_operator(kind: &TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Plus),
        TokenKind::Minus => Some(BinaryOperator::Minus),
        TokenKind::Mult => Some(BinaryOperator::Multiply),
        TokenKind::Div => Some(BinaryOperator::Divide),
        TokenKind::Mod => Some(BinaryOperator::Modulus),
        TokenKind::Eq => Some(BinaryOperator::Eq),
        TokenKind::Neq => Some(BinaryOperator::NotEq),
        TokenKind::Lt => Some(BinaryOperator::Lt),
        TokenKind::LtEq => Some(BinaryOperator::LtEq),
        TokenKind::Gt => Some(BinaryOperator::Gt),
        TokenKind::GtEq => Some(BinaryOperator::GtEq),
        TokenKind::Word(w) if w.quote_style.is_none() => match w.keyword {
            Some(Keyword::And) => Some(BinaryOperator::And),
            Some(Keyword::Or) => Some(BinaryOperator::Or),
            Some(Keyword::Like) => Some(BinaryOperator::Like),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Word;

    #[test]
    fn test_ladder_ordering() {
        assert!(OR_PREC < AND_PREC);
        assert!(AND_PREC < UNARY_NOT_PREC);
        assert!(UNARY_NOT_PREC < IS_PREC);
        assert!(IS_PREC < CMP_PREC);
        assert!(CMP_PREC < PLUS_MINUS_PREC);
        assert!(PLUS_MINUS_PREC < MUL_DIV_PREC);
        assert!(MUL_DIV_PREC < UNARY_SIGN_PREC);
    }

    #[test]
    fn test_infix_precedence() {
        assert_eq!(infix_precedence(&TokenKind::Mult), MUL_DIV_PREC);
        assert_eq!(infix_precedence(&TokenKind::Eq), CMP_PREC);
        assert_eq!(
            infix_precedence(&TokenKind::Word(Word::new("and", None))),
            AND_PREC
        );
        // A quoted word is an identifier, never an operator.
        assert_eq!(
            infix_precedence(&TokenKind::Word(Word::new("and", Some('"')))),
            0
        );
        assert_eq!(infix_precedence(&TokenKind::LParen), 0);
    }

    #[test]
    fn test_binary_operator_mapping() {
        assert_eq!(binary_operator(&TokenKind::Plus), Some(BinaryOperator::Plus));
        assert_eq!(binary_operator(&TokenKind::Neq), Some(BinaryOperator::NotEq));
        assert_eq!(binary_operator(&TokenKind::LParen), None);
    }
}
