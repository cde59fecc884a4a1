//! Type errors

use super::types::NumType;
use crate::util::span::Span;
use thiserror::Error;

/// Type error
///
/// Each message names the rule that was violated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TypeError {
    #[error("unknown variable '{name}'")]
    UnknownVariable { name: String, span: Span },

    #[error("unknown function '{name}'")]
    UnknownFunction { name: String, span: Span },

    #[error("function '{name}' expects {expected} argument(s), found {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
        span: Span,
    },

    /// `index` is zero-based; the message counts from one
    #[error(
        "argument {} of '{name}' must be {expected}, found {found}",
        .index + 1
    )]
    ArgumentType {
        name: String,
        index: usize,
        expected: NumType,
        found: NumType,
        span: Span,
    },

    #[error(
        "operands of '{op}' must have the same type, found {lhs} and {rhs} (int is never converted to double implicitly)"
    )]
    MixedOperands {
        op: String,
        lhs: NumType,
        rhs: NumType,
        span: Span,
    },

    #[error("branches of a conditional must have the same type, found {then_ty} and {else_ty}")]
    MixedBranches {
        then_ty: NumType,
        else_ty: NumType,
        span: Span,
    },

    #[error("function '{name}' is declared to return {expected} but its body is {found}")]
    ReturnType {
        name: String,
        expected: NumType,
        found: NumType,
        span: Span,
    },

    #[error("parameter '{param}' appears more than once in '{function}'")]
    DuplicateParameter {
        function: String,
        param: String,
        span: Span,
    },

    #[error("function '{name}' is already defined")]
    Redefinition { name: String, span: Span },
}

impl TypeError {
    pub fn span(&self) -> Span {
        match self {
            TypeError::UnknownVariable { span, .. }
            | TypeError::UnknownFunction { span, .. }
            | TypeError::ArityMismatch { span, .. }
            | TypeError::ArgumentType { span, .. }
            | TypeError::MixedOperands { span, .. }
            | TypeError::MixedBranches { span, .. }
            | TypeError::ReturnType { span, .. }
            | TypeError::DuplicateParameter { span, .. }
            | TypeError::Redefinition { span, .. } => *span,
        }
    }
}
