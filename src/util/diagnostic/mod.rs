//! 诊断数据结构
//!
//! Every failure in the pipeline is turned into a [`Diagnostic`] before it
//! reaches the user. The [`TextEmitter`] renders it for a terminal.

mod emitter;

pub use emitter::{EmitterConfig, TextEmitter};

use crate::util::span::Span;
use std::fmt;

/// 诊断严重级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// Pipeline stage that produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Lexical,
    Syntax,
    Type,
    Codegen,
    /// Raised while executing generated code
    Runtime,
}

impl fmt::Display for Category {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Category::Lexical => write!(f, "lexical"),
            Category::Syntax => write!(f, "syntax"),
            Category::Type => write!(f, "type"),
            Category::Codegen => write!(f, "codegen"),
            Category::Runtime => write!(f, "runtime"),
        }
    }
}

/// 诊断信息
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub category: Category,
    pub message: String,
    pub span: Option<Span>,
}

impl Diagnostic {
    pub fn error(
        category: Category,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            severity: Severity::Error,
            category,
            message: message.into(),
            span,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.category, self.message)
    }
}
