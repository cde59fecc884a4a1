//! Operator scanning

use super::tokenizer::Lexer;
use crate::frontend::core::lexer::tokens::{Token, TokenKind};

/// Characters that may appear in an operator token
pub const OPERATOR_CHARS: [char; 8] = ['>', '<', '=', '+', '-', '*', '/', '!'];

#[inline]
pub fn is_operator_char(c: char) -> bool {
    OPERATOR_CHARS.contains(&c)
}

/// Scan a maximal run of operator characters as one token
///
/// `<=`, `==` and `!=` come out whole; so does a run like `+-`, which the
/// parser will reject as an unknown operator.
pub fn scan_operator(lexer: &mut Lexer<'_>) -> Token {
    let mut op = String::new();
    while let Some(&c) = lexer.peek() {
        if !is_operator_char(c) {
            break;
        }
        op.push(c);
        lexer.advance();
    }
    lexer.make_token(TokenKind::Operator(op))
}
