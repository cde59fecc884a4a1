//! Parser state and error handling

use crate::frontend::core::lexer::tokens::*;
use crate::frontend::core::lexer::Lexer;
use crate::frontend::core::parser::ast::Prototype;
use crate::frontend::error::CompileError;
use crate::frontend::typecheck::TypeEnvironment;
use crate::util::config::PrecedenceTable;
use crate::util::span::Span;
use thiserror::Error;

/// Parse error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Expected a specific token
    #[error("expected {expected}, found {found}")]
    ExpectedToken {
        expected: String,
        found: TokenKind,
        span: Span,
    },
    /// Token that cannot start an expression
    #[error("unexpected {found} when expecting an expression")]
    UnexpectedToken { found: TokenKind, span: Span },
    /// Operator with a positive precedence that the language does not define
    #[error("unsupported binary operator '{op}'")]
    UnsupportedOperator { op: String, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::ExpectedToken { span, .. }
            | ParseError::UnexpectedToken { span, .. }
            | ParseError::UnsupportedOperator { span, .. } => *span,
        }
    }
}

pub type ParseResult<T> = Result<T, CompileError>;

/// Recursive-descent parser with one token of lookahead
///
/// The parser starts before the first token; call [`advance`](Self::advance)
/// once to load it.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    pub(crate) precedence: PrecedenceTable,
    /// Parameters of the function whose body is being parsed
    pub(crate) env: TypeEnvironment,
    /// Prototype of that function, for recursive calls
    pub(crate) proto: Option<Prototype>,
}

impl<'a> Parser<'a> {
    pub fn new(
        source: &'a str,
        precedence: PrecedenceTable,
    ) -> Self {
        Self {
            lexer: Lexer::new(source),
            current: Token::from(TokenKind::Eof),
            precedence,
            env: TypeEnvironment::new(),
            proto: None,
        }
    }

    /// The lookahead token
    #[inline]
    pub fn current(&self) -> &Token {
        &self.current
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.current.span
    }

    /// Move the lookahead to the next token
    ///
    /// On a lexical error the lookahead is left unchanged; the malformed
    /// text has been consumed, so the next call makes progress.
    pub fn advance(&mut self) -> Result<(), LexError> {
        let token = self.lexer.next_token()?;
        tracing::trace!("lookahead {}", token.kind);
        self.current = token;
        Ok(())
    }

    pub fn at(
        &self,
        kind: &TokenKind,
    ) -> bool {
        &self.current.kind == kind
    }

    pub fn at_char(
        &self,
        c: char,
    ) -> bool {
        self.current.kind.is_char(c)
    }

    pub(crate) fn expected(
        &self,
        what: impl Into<String>,
    ) -> CompileError {
        ParseError::ExpectedToken {
            expected: what.into(),
            found: self.current.kind.clone(),
            span: self.span(),
        }
        .into()
    }

    /// Consume `kind` or fail naming `what` was expected
    pub fn expect(
        &mut self,
        kind: &TokenKind,
        what: &str,
    ) -> ParseResult<Span> {
        if !self.at(kind) {
            return Err(self.expected(what));
        }
        let span = self.span();
        self.advance()?;
        Ok(span)
    }

    pub fn expect_char(
        &mut self,
        c: char,
    ) -> ParseResult<Span> {
        self.expect(&TokenKind::Char(c), &format!("'{}'", c))
    }

    /// Precedence of the lookahead if it is a binary operator, else -1
    pub fn current_precedence(&self) -> i32 {
        match &self.current.kind {
            TokenKind::Operator(op) => self.precedence.precedence_of(op).unwrap_or(-1),
            _ => -1,
        }
    }
}
