//! Type checking
//!
//! Checking is not a separate pass: the parser asks the [`Checker`] for the
//! type of every node as it builds it, from the already-checked types of the
//! node's children. A node that fails its rule is never constructed.
//!
//! There is no implicit widening: an `int` is never accepted where a
//! `double` is required.

use indexmap::IndexMap;

use crate::frontend::core::parser::ast::{BinOp, Expr, Literal, Param, Prototype};
use crate::util::span::Span;

pub mod errors;
pub mod types;

#[cfg(test)]
mod tests;

pub use errors::TypeError;
pub use types::NumType;

/// Parameter table of the function being parsed
#[derive(Debug, Clone, Default)]
pub struct TypeEnvironment {
    params: IndexMap<String, NumType>,
}

impl TypeEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind every parameter of `proto`; repeated names are rejected
    pub fn from_prototype(proto: &Prototype) -> Result<Self, TypeError> {
        let mut env = Self::new();
        for param in &proto.params {
            env.bind(&proto.name, param)?;
        }
        Ok(env)
    }

    fn bind(
        &mut self,
        function: &str,
        param: &Param,
    ) -> Result<(), TypeError> {
        if self.params.contains_key(&param.name) {
            return Err(TypeError::DuplicateParameter {
                function: function.to_string(),
                param: param.name.clone(),
                span: param.span,
            });
        }
        self.params.insert(param.name.clone(), param.ty);
        Ok(())
    }

    pub fn lookup(
        &self,
        name: &str,
    ) -> Option<NumType> {
        self.params.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Parameter and return types of a function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<NumType>,
    pub ret: NumType,
}

impl Signature {
    pub fn new(
        params: Vec<NumType>,
        ret: NumType,
    ) -> Self {
        Self { params, ret }
    }
}

impl From<&Prototype> for Signature {
    fn from(proto: &Prototype) -> Self {
        Signature::new(proto.params.iter().map(|p| p.ty).collect(), proto.return_type)
    }
}

/// Source of callee signatures while checking calls
pub trait SignatureLookup {
    fn signature(
        &self,
        name: &str,
    ) -> Option<Signature>;
}

impl SignatureLookup for IndexMap<String, Signature> {
    fn signature(
        &self,
        name: &str,
    ) -> Option<Signature> {
        self.get(name).cloned()
    }
}

/// No functions declared
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSignatures;

impl SignatureLookup for NoSignatures {
    fn signature(
        &self,
        _name: &str,
    ) -> Option<Signature> {
        None
    }
}

/// Typing rules
///
/// `current` is the prototype whose body is being checked, so a function
/// can call itself before it exists in the module.
pub struct Checker<'a> {
    env: &'a TypeEnvironment,
    signatures: &'a dyn SignatureLookup,
    current: Option<&'a Prototype>,
}

impl<'a> Checker<'a> {
    pub fn new(
        env: &'a TypeEnvironment,
        signatures: &'a dyn SignatureLookup,
        current: Option<&'a Prototype>,
    ) -> Self {
        Self {
            env,
            signatures,
            current,
        }
    }

    fn lookup_signature(
        &self,
        name: &str,
    ) -> Option<Signature> {
        match self.current {
            Some(proto) if proto.name == name => Some(Signature::from(proto)),
            _ => self.signatures.signature(name),
        }
    }

    pub fn literal(lit: &Literal) -> NumType {
        match lit {
            Literal::Int(_) => NumType::Int,
            Literal::Double(_) => NumType::Double,
        }
    }

    pub fn variable(
        &self,
        name: &str,
        span: Span,
    ) -> Result<NumType, TypeError> {
        self.env
            .lookup(name)
            .ok_or_else(|| TypeError::UnknownVariable {
                name: name.to_string(),
                span,
            })
    }

    pub fn binary(
        op: BinOp,
        lhs: &Expr,
        rhs: &Expr,
    ) -> Result<NumType, TypeError> {
        let (l, r) = (lhs.type_of(), rhs.type_of());
        if l != r {
            return Err(TypeError::MixedOperands {
                op: op.symbol().to_string(),
                lhs: l,
                rhs: r,
                span: lhs.span.to(rhs.span),
            });
        }
        Ok(l.combine(r))
    }

    pub fn call(
        &self,
        callee: &str,
        args: &[Expr],
        span: Span,
    ) -> Result<NumType, TypeError> {
        let sig = self
            .lookup_signature(callee)
            .ok_or_else(|| TypeError::UnknownFunction {
                name: callee.to_string(),
                span,
            })?;

        if sig.params.len() != args.len() {
            return Err(TypeError::ArityMismatch {
                name: callee.to_string(),
                expected: sig.params.len(),
                found: args.len(),
                span,
            });
        }

        for (index, (expected, arg)) in sig.params.iter().zip(args).enumerate() {
            if arg.type_of() != *expected {
                return Err(TypeError::ArgumentType {
                    name: callee.to_string(),
                    index,
                    expected: *expected,
                    found: arg.type_of(),
                    span: arg.span,
                });
            }
        }

        Ok(sig.ret)
    }

    /// The condition may be either type; the branches must agree
    pub fn conditional(
        then_branch: &Expr,
        else_branch: &Expr,
    ) -> Result<NumType, TypeError> {
        let (t, e) = (then_branch.type_of(), else_branch.type_of());
        if t != e {
            return Err(TypeError::MixedBranches {
                then_ty: t,
                else_ty: e,
                span: then_branch.span.to(else_branch.span),
            });
        }
        Ok(t.combine(e))
    }

    pub fn definition(
        proto: &Prototype,
        body: &Expr,
    ) -> Result<(), TypeError> {
        if body.type_of() != proto.return_type {
            return Err(TypeError::ReturnType {
                name: proto.name.clone(),
                expected: proto.return_type,
                found: body.type_of(),
                span: body.span,
            });
        }
        Ok(())
    }
}
