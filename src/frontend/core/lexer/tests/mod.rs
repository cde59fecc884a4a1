//! Lexer tests module
//!
//! - basic: identifiers, whitespace, raw characters, end of input
//! - literals: numeric literals, including property tests
//! - operators: operator runs
//! - keywords: reserved words
//! - comments: `#` line comments
//! - errors: malformed literals


use crate::frontend::core::lexer::{tokenize, TokenKind};

/// Token kinds of `source`, without the trailing Eof
pub(super) fn kinds(source: &str) -> Vec<TokenKind> {
    let mut tokens: Vec<TokenKind> = tokenize(source)
        .unwrap_or_else(|e| panic!("tokenize {source:?} failed: {e}"))
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(tokens.pop(), Some(TokenKind::Eof));
    tokens
}
