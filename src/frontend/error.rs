//! Compilation errors

use crate::frontend::core::lexer::LexError;
use crate::frontend::core::parser::ParseError;
use crate::frontend::typecheck::TypeError;
use crate::middle::codegen::CodegenError;
use crate::util::diagnostic::{Category, Diagnostic};
use crate::util::span::Span;
use thiserror::Error;

/// Any failure while compiling one top-level unit
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

impl CompileError {
    pub fn category(&self) -> Category {
        match self {
            CompileError::Lex(_) => Category::Lexical,
            CompileError::Parse(_) => Category::Syntax,
            CompileError::Type(_) | CompileError::Codegen(CodegenError::Type(_)) => {
                Category::Type
            }
            CompileError::Codegen(_) => Category::Codegen,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::Lex(e) => Some(e.span()),
            CompileError::Parse(e) => Some(e.span()),
            CompileError::Type(e) => Some(e.span()),
            CompileError::Codegen(e) => e.span(),
        }
    }

    /// Did the failure happen before code generation?
    pub fn is_frontend(&self) -> bool {
        !matches!(self, CompileError::Codegen(_))
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.category(), self.to_string(), self.span())
    }
}

impl From<CompileError> for Diagnostic {
    fn from(err: CompileError) -> Self {
        err.to_diagnostic()
    }
}
