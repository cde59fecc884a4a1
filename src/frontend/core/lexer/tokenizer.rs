//! Tokenizer implementation
//! Main lexer structure and token generation logic

use super::literals::{is_identifier_char, is_identifier_start, is_number_start, scan_number};
use super::state::keyword_from_str;
use super::symbols::{is_operator_char, scan_operator};
use crate::frontend::core::lexer::tokens::*;
use crate::util::span::{Position, Span};
use std::iter::Peekable;
use std::str::Chars;

/// Main lexer structure
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    offset: usize,
    line: usize,
    column: usize,
    start_offset: usize,
    start_line: usize,
    start_column: usize,
    /// Set once the iterator has handed out the Eof token
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            offset: 0,
            line: 1,
            column: 1,
            start_offset: 0,
            start_line: 1,
            start_column: 1,
            finished: false,
        }
    }

    /// Get current position
    pub fn position(&self) -> Position {
        Position::with_offset(self.line, self.column, self.offset)
    }

    /// Get start position of current token
    pub fn start_position(&self) -> Position {
        Position::with_offset(self.start_line, self.start_column, self.start_offset)
    }

    /// Get span of current token
    pub fn span(&self) -> Span {
        Span::new(self.start_position(), self.position())
    }

    /// Advance to next character
    pub fn advance(&mut self) -> Option<char> {
        match self.chars.next() {
            Some('\n') => {
                self.offset += 1;
                self.line += 1;
                self.column = 1;
                Some('\n')
            }
            Some(c) => {
                self.offset += c.len_utf8();
                self.column += 1;
                Some(c)
            }
            None => None,
        }
    }

    /// Peek at next character
    pub fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    /// Build a token spanning from the mark to the current position
    pub fn make_token(
        &self,
        kind: TokenKind,
    ) -> Token {
        Token::new(kind, self.span())
    }

    fn mark_start(&mut self) {
        self.start_offset = self.offset;
        self.start_line = self.line;
        self.start_column = self.column;
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.advance() {
            if c == '\n' {
                break;
            }
        }
    }

    fn scan_identifier(&mut self) -> Token {
        let mut name = String::new();
        while let Some(&c) = self.peek() {
            if !is_identifier_char(c) {
                break;
            }
            name.push(c);
            self.advance();
        }
        let kind = keyword_from_str(&name).unwrap_or(TokenKind::Identifier(name));
        self.make_token(kind)
    }

    /// Generate next token
    ///
    /// After the input is exhausted every call returns an Eof token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        loop {
            self.mark_start();

            let c = match self.peek() {
                Some(&c) => c,
                None => return Ok(self.make_token(TokenKind::Eof)),
            };

            if c.is_whitespace() {
                self.advance();
                continue;
            }

            if c == '#' {
                self.skip_line_comment();
                continue;
            }

            if is_identifier_start(c) {
                return Ok(self.scan_identifier());
            }

            if is_number_start(c) {
                return scan_number(self);
            }

            if is_operator_char(c) {
                return Ok(scan_operator(self));
            }

            self.advance();
            return Ok(self.make_token(TokenKind::Char(c)));
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        if matches!(&result, Ok(token) if token.kind == TokenKind::Eof) {
            self.finished = true;
        }
        Some(result)
    }
}
