//! Generic SQL dialect.

use super::Dialect;

/// A permissive dialect accepting the common ground of ANSI SQL,
/// PostgreSQL, MySQL and SQLite identifier rules.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn is_identifier_start(&self, ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_'
    }

    fn is_identifier_part(&self, ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
    }

    fn is_delimited_identifier_start(&self, ch: char) -> bool {
        ch == '"' || ch == '`'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_start() {
        let dialect = GenericDialect::new();
        assert!(dialect.is_identifier_start('a'));
        assert!(dialect.is_identifier_start('Z'));
        assert!(dialect.is_identifier_start('_'));
        assert!(!dialect.is_identifier_start('1'));
        assert!(!dialect.is_identifier_start('$'));
    }

    #[test]
    fn test_identifier_part() {
        let dialect = GenericDialect::new();
        assert!(dialect.is_identifier_part('a'));
        assert!(dialect.is_identifier_part('9'));
        assert!(dialect.is_identifier_part('$'));
        assert!(!dialect.is_identifier_part('-'));
    }

    #[test]
    fn test_delimited_identifier_start() {
        let dialect = GenericDialect::new();
        assert!(dialect.is_delimited_identifier_start('"'));
        assert!(dialect.is_delimited_identifier_start('`'));
        // `[` stays a bracket token in the generic dialect; only the
        // MSSQL-style dialect claims it.
        assert!(!dialect.is_delimited_identifier_start('['));
        assert!(!dialect.is_delimited_identifier_start('\''));
    }
}
