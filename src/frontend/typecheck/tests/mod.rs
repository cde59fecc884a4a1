//! Type checking tests
//!
//! - rules: the per-node typing rules
//! - environment: parameter tables and signature lookup

mod environment;
mod rules;

use crate::frontend::core::parser::ast::{Expr, ExprKind, Literal, Param, Prototype};
use crate::frontend::typecheck::NumType;
use crate::util::span::Span;

pub(super) fn int(v: i64) -> Expr {
    Expr::new(ExprKind::Literal(Literal::Int(v)), NumType::Int, Span::dummy())
}

pub(super) fn double(v: f64) -> Expr {
    Expr::new(
        ExprKind::Literal(Literal::Double(v)),
        NumType::Double,
        Span::dummy(),
    )
}

pub(super) fn proto(
    name: &str,
    params: &[(&str, NumType)],
    ret: NumType,
) -> Prototype {
    Prototype {
        name: name.to_string(),
        params: params
            .iter()
            .map(|(n, ty)| Param {
                name: n.to_string(),
                ty: *ty,
                span: Span::dummy(),
            })
            .collect(),
        return_type: ret,
        span: Span::dummy(),
    }
}
