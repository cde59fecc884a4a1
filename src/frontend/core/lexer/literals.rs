//! Numeric literal scanning
//!
//! Drives the [`NumericDfa`] over the character stream.

use super::dfa::{DfaError, NumericDfa, NumericValue};
use super::tokenizer::Lexer;
use crate::frontend::core::lexer::tokens::*;

/// Characters that start a numeric literal
#[inline]
pub fn is_number_start(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

#[inline]
pub fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic()
}

#[inline]
pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Scan a numeric literal.
///
/// Characters are fed to the automaton until it rejects one; the rejected
/// character stays in the stream.
pub fn scan_number(lexer: &mut Lexer<'_>) -> Result<Token, LexError> {
    let mut dfa = NumericDfa::new();
    while let Some(&c) = lexer.peek() {
        if !dfa.read(c) {
            break;
        }
        lexer.advance();
    }

    let span = lexer.span();
    match dfa.value() {
        Ok(NumericValue::Int(v)) => Ok(Token::new(TokenKind::IntLiteral(v), span)),
        Ok(NumericValue::Double(v)) => Ok(Token::new(TokenKind::FloatLiteral(v), span)),
        Err(DfaError::NotAccepted) => Err(LexError::MalformedNumber {
            text: dfa.text().to_string(),
            span,
        }),
        Err(DfaError::OutOfRange) => Err(LexError::IntegerOutOfRange {
            text: dfa.text().to_string(),
            span,
        }),
    }
}
