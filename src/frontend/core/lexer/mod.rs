//! Lexer module
//!
//! Turns source text into tokens. Numeric literals are recognized by the
//! automaton in [`dfa`]; everything else is scanned directly.

pub mod dfa;
pub mod literals;
pub mod state;
pub mod symbols;
pub mod tokenizer;
pub mod tokens;

pub use dfa::{DfaState, NumericDfa, NumericValue};
pub use tokenizer::Lexer;
pub use tokens::{LexError, Token, TokenKind};

/// Tokenize a whole source string
///
/// The returned vector always ends with exactly one Eof token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    tracing::debug!("tokenizing {} bytes", source.len());

    let mut tokens = Vec::new();
    for token in Lexer::new(source) {
        let token = token?;
        log_token(&token);
        tokens.push(token);
    }

    tracing::debug!("lexed {} tokens", tokens.len());
    Ok(tokens)
}

fn log_token(token: &Token) {
    tracing::trace!(
        "token {} at {}",
        token.kind,
        token.span.start
    );
}

#[cfg(test)]
mod tests;
