//! Tests for error reporting: kinds and positions.

mod common;
use common::*;

use sqlspan_core::lexer::Pos;
use sqlspan_core::ParseError;

#[test]
fn unterminated_string() {
    let err = parse_err("SELECT 'oops");
    assert_eq!(
        err,
        ParseError::UnterminatedString {
            pos: Pos::new(1, 8)
        }
    );
}

#[test]
fn unterminated_block_comment() {
    let err = parse_err("SELECT 1 /* oops");
    assert_eq!(
        err,
        ParseError::UnterminatedComment {
            pos: Pos::new(1, 10)
        }
    );
}

#[test]
fn unexpected_token_in_expression() {
    let err = parse_err("SELECT FROM t");
    let ParseError::UnexpectedKeyword { pos, keyword } = err else {
        panic!("expected UnexpectedKeyword, got {err:?}");
    };
    assert_eq!(pos, Pos::new(1, 8));
    assert_eq!(keyword, "FROM");
}

#[test]
fn unexpected_eof_mid_rule() {
    let err = parse_err("SELECT 1 +");
    assert!(matches!(err, ParseError::UnexpectedEof { .. }));

    let err = parse_err("SELECT * FROM");
    assert!(matches!(err, ParseError::UnexpectedEof { .. }));
}

#[test]
fn unexpected_token_after_statement() {
    let err = parse_err("SELECT 1; SELECT 2");
    let ParseError::UnexpectedToken { pos, .. } = err else {
        panic!("expected UnexpectedToken, got {err:?}");
    };
    assert_eq!(pos, Pos::new(1, 11));
}

#[test]
fn reserved_word_as_identifier() {
    let err = parse_err("SELECT * FROM select");
    assert!(matches!(err, ParseError::UnexpectedKeyword { .. }));
}

#[test]
fn stray_character_is_rejected_by_parser() {
    // The tokenizer accepts `?` as a Char token; the grammar rejects it.
    let err = parse_err("SELECT ? FROM t");
    assert!(matches!(err, ParseError::UnexpectedToken { .. }));
}

#[test]
fn errors_carry_positions_across_lines() {
    let err = parse_err("SELECT a\nFROM t\nWHERE");
    let ParseError::UnexpectedEof { pos, .. } = err else {
        panic!("expected UnexpectedEof, got {err:?}");
    };
    assert_eq!(pos, Pos::new(3, 6));
}
