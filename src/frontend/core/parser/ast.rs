//! Abstract Syntax Tree types
//!
//! Every [`Expr`] carries the type it was checked to when the parser built
//! it. Nodes are only created through the parser, so a tree handed to code
//! generation is always fully typed.

use crate::frontend::typecheck::NumType;
use crate::util::span::Span;
use std::fmt;

/// Name of the synthetic function wrapping a top-level expression
pub const ANON_EXPR_NAME: &str = "__anon_expr";

/// Numeric literal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Int(i64),
    Double(f64),
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
}

impl BinOp {
    pub const ALL: [BinOp; 10] = [
        BinOp::Add,
        BinOp::Sub,
        BinOp::Mul,
        BinOp::Div,
        BinOp::Lt,
        BinOp::Gt,
        BinOp::Le,
        BinOp::Ge,
        BinOp::Eq,
        BinOp::Ne,
    ];

    pub fn from_symbol(symbol: &str) -> Option<BinOp> {
        BinOp::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge | BinOp::Eq | BinOp::Ne
        )
    }
}

impl fmt::Display for BinOp {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Expression
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    ty: NumType,
}

impl Expr {
    /// Build a node whose type has already been checked
    pub(crate) fn new(
        kind: ExprKind,
        ty: NumType,
        span: Span,
    ) -> Self {
        Self { kind, span, ty }
    }

    /// Checked type of this node
    #[inline]
    pub fn type_of(&self) -> NumType {
        self.ty
    }
}

/// Expression kinds
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Variable(String),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        callee: String,
        args: Vec<Expr>,
    },
    If {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
}

/// Function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: NumType,
    pub span: Span,
}

/// Function signature with parameter names
#[derive(Debug, Clone, PartialEq)]
pub struct Prototype {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: NumType,
    pub span: Span,
}

impl Prototype {
    /// Prototype of the nullary wrapper around a top-level expression
    pub fn anonymous(span: Span) -> Self {
        Self {
            name: ANON_EXPR_NAME.to_string(),
            params: Vec::new(),
            return_type: NumType::Int,
            span,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.name == ANON_EXPR_NAME
    }
}

/// Function definition: a prototype and a single-expression body
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub proto: Prototype,
    pub body: Expr,
}
