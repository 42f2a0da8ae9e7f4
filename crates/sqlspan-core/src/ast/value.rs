//! Literal values.

use core::fmt;

/// A literal SQL value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Integer literal.
    Long(i64),
    /// Floating point literal.
    Double(f64),
    /// `'…'` string literal.
    SingleQuotedString(String),
    /// `N'…'` national string literal.
    NationalStringLiteral(String),
    /// `TRUE` / `FALSE`.
    Boolean(bool),
    /// `NULL`.
    Null,
    /// `DATE '…'` typed literal.
    Date(String),
    /// `TIME '…'` typed literal.
    Time(String),
    /// `TIMESTAMP '…'` typed literal.
    Timestamp(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long(v) => write!(f, "{v}"),
            // Debug formatting keeps a trailing `.0` on round values so
            // the rendering still lexes as a float.
            Self::Double(v) => write!(f, "{v:?}"),
            Self::SingleQuotedString(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Self::NationalStringLiteral(s) => write!(f, "N'{}'", s.replace('\'', "''")),
            Self::Boolean(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
            Self::Null => f.write_str("NULL"),
            Self::Date(s) => write!(f, "DATE '{s}'"),
            Self::Time(s) => write!(f, "TIME '{s}'"),
            Self::Timestamp(s) => write!(f, "TIMESTAMP '{s}'"),
        }
    }
}
