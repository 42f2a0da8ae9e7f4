//! Error types for tokenizing and parsing.

use crate::lexer::Pos;

/// Errors raised while turning SQL text into an AST.
///
/// Every variant carries the position of the offending input. There is
/// no partial-result recovery: the first error aborts the current
/// `parse_statement` / `parse_file` call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// EOF inside a `'…'` or `N'…'` literal.
    #[error("unterminated string literal starting at {pos}")]
    UnterminatedString {
        /// Position of the opening quote.
        pos: Pos,
    },

    /// EOF inside a `/* … */` comment.
    #[error("unterminated block comment starting at {pos}")]
    UnterminatedComment {
        /// Position of the opening `/*`.
        pos: Pos,
    },

    /// A token is present but the grammar expects something else.
    #[error("unexpected token at {pos}: expected {expected}, found {found}")]
    UnexpectedToken {
        /// Position of the offending token.
        pos: Pos,
        /// What the grammar rule expected.
        expected: String,
        /// What was found instead.
        found: String,
    },

    /// The token stream ran out mid-rule.
    #[error("unexpected end of input at {pos}: expected {expected}")]
    UnexpectedEof {
        /// Position after the last token.
        pos: Pos,
        /// What the grammar rule expected.
        expected: String,
    },

    /// A reserved word appeared where none is allowed.
    #[error("unexpected keyword {keyword} at {pos}")]
    UnexpectedKeyword {
        /// Position of the keyword token.
        pos: Pos,
        /// The canonical spelling of the keyword.
        keyword: String,
    },
}

impl ParseError {
    /// Returns the source position the error points at.
    #[must_use]
    pub const fn pos(&self) -> Pos {
        match self {
            Self::UnterminatedString { pos }
            | Self::UnterminatedComment { pos }
            | Self::UnexpectedToken { pos, .. }
            | Self::UnexpectedEof { pos, .. }
            | Self::UnexpectedKeyword { pos, .. } => *pos,
        }
    }
}
