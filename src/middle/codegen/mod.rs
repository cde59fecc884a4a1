//! Code generation
//!
//! Lowers one typed function definition at a time into the module's SSA
//! IR. Types were already checked while parsing; the generator checks them
//! again and treats any disagreement as an error rather than emitting IR
//! for it.
//!
//! A function that fails to generate is erased from the module, so the
//! module only ever holds functions that passed the verifier.

pub mod control_flow;
pub mod expr;
pub mod ir_builder;

#[cfg(test)]
mod tests;

use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

use crate::frontend::core::parser::ast::{Expr, FunctionDef, Prototype};
use crate::frontend::typecheck::{NumType, Signature, SignatureLookup, TypeError};
use crate::middle::core::ir::{Function, IrType, Module, Param, Value};
use crate::middle::core::verify::{verify_function, VerifyError};
use crate::util::span::Span;

pub use ir_builder::FunctionBuilder;

/// Code generation errors
///
/// `UnboundVariable` and `UnresolvedType` can only come from a tree the
/// parser did not check.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodegenError {
    #[error("internal error: variable '{name}' is not bound in this function")]
    UnboundVariable { name: String, span: Span },

    #[error("internal error: expression reached code generation with an unresolved type")]
    UnresolvedType { span: Span },

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Verify(#[from] VerifyError),
}

impl CodegenError {
    pub fn span(&self) -> Option<Span> {
        match self {
            CodegenError::UnboundVariable { span, .. } | CodegenError::UnresolvedType { span } => {
                Some(*span)
            }
            CodegenError::Type(e) => Some(e.span()),
            CodegenError::Verify(_) => None,
        }
    }
}

/// IR type of a checked type
pub(crate) fn lower_type(
    ty: NumType,
    span: Span,
) -> Result<IrType, CodegenError> {
    IrType::from_num(ty).ok_or(CodegenError::UnresolvedType { span })
}

impl SignatureLookup for Module {
    fn signature(
        &self,
        name: &str,
    ) -> Option<Signature> {
        let function = self.get(name)?;
        let params = function
            .params
            .iter()
            .map(|p| p.ty.to_num())
            .collect::<Option<Vec<_>>>()?;
        Some(Signature::new(params, function.ret.to_num()?))
    }
}

/// Lowers definitions into a module
#[derive(Debug)]
pub struct CodeGenerator {
    module: Module,
}

impl CodeGenerator {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module: Module::new(module_name),
        }
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn into_module(self) -> Module {
        self.module
    }

    /// Erase a function from the module
    pub fn remove_function(
        &mut self,
        name: &str,
    ) -> Option<Function> {
        self.module.remove(name)
    }

    /// Generate `def`, consuming its tree
    ///
    /// On success the new function is in the module. On failure the module
    /// is as it was before the call.
    pub fn generate_function(
        &mut self,
        def: FunctionDef,
    ) -> Result<&Function, CodegenError> {
        let FunctionDef { proto, body } = def;

        if self.module.contains(&proto.name) {
            return Err(TypeError::Redefinition {
                name: proto.name.clone(),
                span: proto.span,
            }
            .into());
        }

        let declaration = declare(&proto)?;
        self.module.insert(declaration.clone());
        debug!("declared @{}", proto.name);

        match self.lower_function(declaration, &proto, &body) {
            Ok(function) => {
                debug!("generated @{} ({} blocks)", proto.name, function.layout.len());
                Ok(self.module.insert(function))
            }
            Err(e) => {
                self.module.remove(&proto.name);
                debug!("erased @{}: {}", proto.name, e);
                Err(e)
            }
        }
    }

    fn lower_function(
        &self,
        declaration: Function,
        proto: &Prototype,
        body: &Expr,
    ) -> Result<Function, CodegenError> {
        let mut lowering = FunctionLowering::new(&self.module, declaration);
        let entry = lowering.builder.append_new_block("entry");
        lowering.builder.position_at_end(entry);
        lowering.bind_params(proto);

        if body.type_of() != proto.return_type {
            return Err(TypeError::ReturnType {
                name: proto.name.clone(),
                expected: proto.return_type,
                found: body.type_of(),
                span: body.span,
            }
            .into());
        }

        let value = lowering.lower_expr(body)?;
        lowering.builder.build_ret(value);

        let function = lowering.builder.finish();
        verify_function(&function, &self.module)?;
        Ok(function)
    }
}

fn declare(proto: &Prototype) -> Result<Function, CodegenError> {
    let params = proto
        .params
        .iter()
        .map(|p| {
            Ok(Param {
                name: p.name.clone(),
                ty: lower_type(p.ty, p.span)?,
            })
        })
        .collect::<Result<Vec<_>, CodegenError>>()?;
    let ret = lower_type(proto.return_type, proto.span)?;
    Ok(Function::declare(&proto.name, params, ret))
}

/// Per-function lowering state: the builder and the parameter table
pub(crate) struct FunctionLowering<'m> {
    pub(crate) module: &'m Module,
    pub(crate) builder: FunctionBuilder,
    params: IndexMap<String, (Value, NumType)>,
}

impl<'m> FunctionLowering<'m> {
    fn new(
        module: &'m Module,
        declaration: Function,
    ) -> Self {
        Self {
            module,
            builder: FunctionBuilder::new(declaration),
            params: IndexMap::new(),
        }
    }

    fn bind_params(
        &mut self,
        proto: &Prototype,
    ) {
        self.params = proto
            .params
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.clone(), (Value::Arg(i), p.ty)))
            .collect();
    }

    pub(crate) fn lookup(
        &self,
        name: &str,
    ) -> Option<(Value, NumType)> {
        self.params.get(name).copied()
    }
}
