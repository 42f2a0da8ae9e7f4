//! SQL tokenizer with line/column bookkeeping.

use crate::dialect::Dialect;
use crate::error::ParseError;

use super::{Pos, Token, TokenKind, Word};

/// Tokenizer options.
#[derive(Debug, Clone, Copy)]
pub struct TokenizerOptions {
    /// Emit `Comment` tokens. When false, comments are consumed (and
    /// still advance the position) but produce no token.
    pub parse_comment: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            parse_comment: true,
        }
    }
}

/// A tokenizer that turns SQL text into a flat token sequence.
///
/// Whitespace is emitted one token per character so that downstream
/// consumers (comment grouping in particular) can count newlines.
/// Positions follow the `Pos` rules: tab stop 4, `\r\n` is one newline,
/// a lone `\r` is swallowed.
pub struct Tokenizer<'a> {
    input: &'a str,
    dialect: &'a dyn Dialect,
    /// Current byte offset into `input`.
    offset: usize,
    line: u32,
    col: u32,
    parse_comment: bool,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer with default options (comments retained).
    #[must_use]
    pub fn new(input: &'a str, dialect: &'a dyn Dialect) -> Self {
        Self::with_options(input, dialect, TokenizerOptions::default())
    }

    /// Creates a tokenizer with explicit options.
    #[must_use]
    pub fn with_options(input: &'a str, dialect: &'a dyn Dialect, options: TokenizerOptions) -> Self {
        Self {
            input,
            dialect,
            offset: 0,
            line: 1,
            col: 1,
            parse_comment: options.parse_comment,
        }
    }

    /// Returns the position after the last consumed character.
    #[must_use]
    pub const fn pos(&self) -> Pos {
        Pos::new(self.line, self.col)
    }

    /// Tokenizes the entire input.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnterminatedString` or
    /// `ParseError::UnterminatedComment` when EOF is hit inside a
    /// string literal or block comment.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.input[self.offset..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.offset..].chars();
        chars.next();
        chars.next()
    }

    /// Consumes one character, updating line/column per the `Pos` rules.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        match c {
            '\n' => {
                self.line += 1;
                self.col = 1;
            }
            '\t' => {
                self.col = ((self.col - 1) / 4 + 1) * 4 + 1;
            }
            // A bare `\r` does not move the column; the `\r\n` pair is
            // collapsed by the whitespace rule below.
            '\r' => {}
            _ => self.col += 1,
        }
        Some(c)
    }

    fn token(&self, kind: TokenKind, from: Pos) -> Token {
        Token::new(kind, from, self.pos())
    }

    /// Produces the next token, or `None` at end of input.
    fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        loop {
            let from = self.pos();
            let Some(ch) = self.peek() else {
                return Ok(None);
            };

            match ch {
                ' ' | '\t' | '\n' => {
                    self.advance();
                    return Ok(Some(self.token(TokenKind::Whitespace(ch), from)));
                }
                '\r' => {
                    self.advance();
                    if self.peek() == Some('\n') {
                        self.advance();
                        return Ok(Some(self.token(TokenKind::Whitespace('\n'), from)));
                    }
                    // Lone carriage return: swallowed.
                    continue;
                }
                'N' | 'n' if self.peek_next() == Some('\'') => {
                    self.advance();
                    let value = self.tokenize_single_quoted(from)?;
                    return Ok(Some(
                        self.token(TokenKind::NationalStringLiteral(value), from),
                    ));
                }
                '\'' => {
                    let value = self.tokenize_single_quoted(from)?;
                    return Ok(Some(self.token(TokenKind::SingleQuotedString(value), from)));
                }
                c if self.dialect.is_delimited_identifier_start(c) => {
                    self.advance();
                    let end_quote = Word::matching_end_quote(c);
                    let mut value = String::new();
                    while let Some(inner) = self.peek() {
                        if inner == end_quote {
                            self.advance();
                            break;
                        }
                        value.push(inner);
                        self.advance();
                    }
                    return Ok(Some(
                        self.token(TokenKind::Word(Word::new(value, Some(c))), from),
                    ));
                }
                c if self.dialect.is_identifier_start(c) => {
                    let mut value = String::new();
                    value.push(c);
                    self.advance();
                    while let Some(part) = self.peek() {
                        if !self.dialect.is_identifier_part(part) {
                            break;
                        }
                        value.push(part);
                        self.advance();
                    }
                    return Ok(Some(self.token(TokenKind::Word(Word::new(value, None)), from)));
                }
                '0'..='9' => {
                    let mut value = String::new();
                    while let Some(digit @ '0'..='9') = self.peek() {
                        value.push(digit);
                        self.advance();
                    }
                    // `1.1` and `1.` are single number tokens; a `.`
                    // anywhere else is a Period.
                    if self.peek() == Some('.') {
                        value.push('.');
                        self.advance();
                        while let Some(digit @ '0'..='9') = self.peek() {
                            value.push(digit);
                            self.advance();
                        }
                    }
                    return Ok(Some(self.token(TokenKind::Number(value), from)));
                }
                '-' => {
                    if self.peek_next() == Some('-') {
                        self.advance();
                        self.advance();
                        let mut value = String::new();
                        while let Some(c) = self.peek() {
                            if c == '\n' {
                                break;
                            }
                            value.push(c);
                            self.advance();
                        }
                        if !self.parse_comment {
                            continue;
                        }
                        return Ok(Some(self.token(TokenKind::Comment(value), from)));
                    }
                    self.advance();
                    return Ok(Some(self.token(TokenKind::Minus, from)));
                }
                '/' => {
                    if self.peek_next() == Some('*') {
                        self.advance();
                        self.advance();
                        let mut value = String::new();
                        loop {
                            match self.peek() {
                                Some('*') if self.peek_next() == Some('/') => {
                                    self.advance();
                                    self.advance();
                                    break;
                                }
                                Some(c) => {
                                    value.push(c);
                                    self.advance();
                                }
                                None => {
                                    return Err(ParseError::UnterminatedComment { pos: from });
                                }
                            }
                        }
                        if !self.parse_comment {
                            continue;
                        }
                        return Ok(Some(self.token(TokenKind::Comment(value), from)));
                    }
                    self.advance();
                    return Ok(Some(self.token(TokenKind::Div, from)));
                }
                '!' => {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        return Ok(Some(self.token(TokenKind::Neq, from)));
                    }
                    return Ok(Some(self.token(TokenKind::Char('!'), from)));
                }
                '<' => {
                    self.advance();
                    let kind = match self.peek() {
                        Some('=') => {
                            self.advance();
                            TokenKind::LtEq
                        }
                        Some('>') => {
                            self.advance();
                            TokenKind::Neq
                        }
                        _ => TokenKind::Lt,
                    };
                    return Ok(Some(self.token(kind, from)));
                }
                '>' => {
                    self.advance();
                    let kind = if self.peek() == Some('=') {
                        self.advance();
                        TokenKind::GtEq
                    } else {
                        TokenKind::Gt
                    };
                    return Ok(Some(self.token(kind, from)));
                }
                ':' => {
                    self.advance();
                    let kind = if self.peek() == Some(':') {
                        self.advance();
                        TokenKind::DoubleColon
                    } else {
                        TokenKind::Colon
                    };
                    return Ok(Some(self.token(kind, from)));
                }
                _ => {
                    self.advance();
                    let kind = match ch {
                        '(' => TokenKind::LParen,
                        ')' => TokenKind::RParen,
                        '{' => TokenKind::LBrace,
                        '}' => TokenKind::RBrace,
                        '[' => TokenKind::LBracket,
                        ']' => TokenKind::RBracket,
                        ',' => TokenKind::Comma,
                        ';' => TokenKind::Semicolon,
                        '.' => TokenKind::Period,
                        '+' => TokenKind::Plus,
                        '*' => TokenKind::Mult,
                        '%' => TokenKind::Mod,
                        '=' => TokenKind::Eq,
                        '&' => TokenKind::Ampersand,
                        '\\' => TokenKind::Backslash,
                        other => TokenKind::Char(other),
                    };
                    return Ok(Some(self.token(kind, from)));
                }
            }
        }
    }

    /// Scans a `'…'` body with `''` as the escape for a single quote.
    /// Expects the cursor on the opening quote; `from` is the start of
    /// the whole token (the `N` for national strings).
    fn tokenize_single_quoted(&mut self, from: Pos) -> Result<String, ParseError> {
        self.advance();
        let mut value = String::new();
        loop {
            match self.peek() {
                Some('\'') => {
                    if self.peek_next() == Some('\'') {
                        value.push('\'');
                        self.advance();
                        self.advance();
                    } else {
                        self.advance();
                        return Ok(value);
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
                None => return Err(ParseError::UnterminatedString { pos: from }),
            }
        }
    }
}
