//! Token types

use crate::util::span::Span;
use std::fmt;

/// Lexer error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexError {
    #[error("malformed number literal '{text}'")]
    MalformedNumber { text: String, span: Span },
    #[error("integer literal '{text}' does not fit in a 64-bit int")]
    IntegerOutOfRange { text: String, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::MalformedNumber { span, .. } | LexError::IntegerOutOfRange { span, .. } => {
                *span
            }
        }
    }
}

/// Token kind
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Keywords
    KwDef,
    KwIf,
    KwThen,
    KwElse,
    KwInt,
    KwDouble,

    Identifier(String),

    // Literals
    IntLiteral(i64),
    FloatLiteral(f64),

    /// Maximal run of operator characters, e.g. `<=` or `+`
    Operator(String),

    /// Any other single character: `(`, `)`, `,`, `;`, ...
    Char(char),

    Eof,
}

impl TokenKind {
    pub fn is_char(
        &self,
        c: char,
    ) -> bool {
        matches!(self, TokenKind::Char(x) if *x == c)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            TokenKind::KwDef => write!(f, "'def'"),
            TokenKind::KwIf => write!(f, "'if'"),
            TokenKind::KwThen => write!(f, "'then'"),
            TokenKind::KwElse => write!(f, "'else'"),
            TokenKind::KwInt => write!(f, "'int'"),
            TokenKind::KwDouble => write!(f, "'double'"),
            TokenKind::Identifier(name) => write!(f, "identifier '{}'", name),
            TokenKind::IntLiteral(v) => write!(f, "integer literal {}", v),
            TokenKind::FloatLiteral(v) => write!(f, "float literal {:?}", v),
            TokenKind::Operator(op) => write!(f, "operator '{}'", op),
            TokenKind::Char(c) => write!(f, "'{}'", c),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// Token
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        span: Span,
    ) -> Self {
        Self { kind, span }
    }
}

impl From<TokenKind> for Token {
    fn from(kind: TokenKind) -> Self {
        Token {
            kind,
            span: Span::dummy(),
        }
    }
}
