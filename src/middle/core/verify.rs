//! Structural IR verifier
//!
//! Run on every function right after it is generated. A failure here means
//! the generator produced malformed IR, not that the source was wrong.

use super::ir::*;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid IR in function '{function}': {message}")]
pub struct VerifyError {
    pub function: String,
    pub message: String,
}

/// Where an instruction sits: (layout index of its block, index in block)
type Site = (usize, usize);

struct Verifier<'a> {
    function: &'a Function,
    module: &'a Module,
    sites: HashMap<InstId, Site>,
    preds: HashMap<BlockId, Vec<BlockId>>,
}

/// Check a defined function against the module it lives in
pub fn verify_function(
    function: &Function,
    module: &Module,
) -> Result<(), VerifyError> {
    let mut verifier = Verifier {
        function,
        module,
        sites: HashMap::new(),
        preds: HashMap::new(),
    };
    verifier.check_layout()?;
    verifier.check_blocks()
}

impl<'a> Verifier<'a> {
    fn fail<T>(
        &self,
        message: impl Into<String>,
    ) -> Result<T, VerifyError> {
        Err(VerifyError {
            function: self.function.name.clone(),
            message: message.into(),
        })
    }

    fn block(
        &self,
        id: BlockId,
    ) -> Result<&'a BasicBlock, VerifyError> {
        match self.function.block(id) {
            Some(b) => Ok(b),
            None => self.fail(format!("reference to missing block #{}", id.0)),
        }
    }

    /// Every block laid out once, every instruction placed once, every
    /// block terminated
    fn check_layout(&mut self) -> Result<(), VerifyError> {
        let f = self.function;
        if f.layout.is_empty() {
            return self.fail("function has no blocks");
        }
        if f.layout.len() != f.blocks.len() {
            return self.fail(format!(
                "{} blocks created but {} laid out",
                f.blocks.len(),
                f.layout.len()
            ));
        }

        let mut seen = vec![false; f.blocks.len()];
        for (b, id) in f.layout.iter().enumerate() {
            let block = self.block(*id)?;
            if std::mem::replace(&mut seen[id.0], true) {
                return self.fail(format!("block '{}' laid out twice", block.label));
            }

            for (p, inst) in block.insts.iter().enumerate() {
                if f.inst(*inst).is_none() {
                    return self.fail(format!("block '{}' uses missing instruction", block.label));
                }
                if self.sites.insert(*inst, (b, p)).is_some() {
                    return self.fail(format!("instruction #{} placed twice", inst.0));
                }
            }

            let Some(term) = &block.terminator else {
                return self.fail(format!("block '{}' has no terminator", block.label));
            };
            for succ in term.successors() {
                self.block(succ)?;
                self.preds.entry(succ).or_default().push(*id);
            }
        }

        if self.sites.len() != f.insts.len() {
            return self.fail("instruction not placed in any block");
        }
        Ok(())
    }

    fn check_blocks(&self) -> Result<(), VerifyError> {
        for (b, id) in self.function.layout.iter().enumerate() {
            let block = self.block(*id)?;
            let mut in_phi_prefix = true;
            for (p, inst_id) in block.insts.iter().enumerate() {
                let Some(inst) = self.function.inst(*inst_id) else {
                    continue;
                };
                let is_phi = matches!(inst.kind, InstKind::Phi { .. });
                if is_phi && !in_phi_prefix {
                    return self.fail(format!("phi '{}' is not at the start of its block", inst.name));
                }
                in_phi_prefix &= is_phi;
                self.check_inst(*id, (b, p), inst)?;
            }
            if let Some(term) = &block.terminator {
                self.check_terminator((b, block.insts.len()), term)?;
            }
        }
        Ok(())
    }

    /// Type of `value` used at `site`; the definition must come first
    fn use_type(
        &self,
        value: &Value,
        site: Site,
    ) -> Result<IrType, VerifyError> {
        if let Value::Inst(id) = value {
            match self.sites.get(id) {
                Some(def) if *def < site => {}
                _ => {
                    return self.fail(format!("instruction #{} used before its definition", id.0));
                }
            }
        }
        match self.function.value_type(value) {
            Some(ty) => Ok(ty),
            None => self.fail(format!("operand {:?} refers to nothing", value)),
        }
    }

    fn expect_type(
        &self,
        value: &Value,
        site: Site,
        expected: IrType,
        what: &str,
    ) -> Result<(), VerifyError> {
        let found = self.use_type(value, site)?;
        if found != expected {
            return self.fail(format!("{} must be {}, found {}", what, expected, found));
        }
        Ok(())
    }

    fn check_inst(
        &self,
        block: BlockId,
        site: Site,
        inst: &Instruction,
    ) -> Result<(), VerifyError> {
        let name = &inst.name;
        let result = match &inst.kind {
            InstKind::Binary { op, lhs, rhs } => {
                self.expect_type(lhs, site, op.ty(), &format!("operand of '{name}'"))?;
                self.expect_type(rhs, site, op.ty(), &format!("operand of '{name}'"))?;
                op.ty()
            }
            InstKind::ICmp { lhs, rhs, .. } => {
                self.expect_type(lhs, site, IrType::I64, &format!("operand of '{name}'"))?;
                self.expect_type(rhs, site, IrType::I64, &format!("operand of '{name}'"))?;
                IrType::I1
            }
            InstKind::FCmp { lhs, rhs, .. } => {
                self.expect_type(lhs, site, IrType::Double, &format!("operand of '{name}'"))?;
                self.expect_type(rhs, site, IrType::Double, &format!("operand of '{name}'"))?;
                IrType::I1
            }
            InstKind::ZExt(v) => {
                self.expect_type(v, site, IrType::I1, &format!("operand of '{name}'"))?;
                IrType::I64
            }
            InstKind::UIToFP(v) => {
                self.expect_type(v, site, IrType::I1, &format!("operand of '{name}'"))?;
                IrType::Double
            }
            InstKind::Call { callee, args } => self.check_call(site, name, callee, args)?,
            InstKind::Phi { incoming } => self.check_phi(block, inst, incoming)?,
        };

        if result != inst.ty {
            return self.fail(format!(
                "'{}' is typed {} but produces {}",
                name, inst.ty, result
            ));
        }
        Ok(())
    }

    fn check_call(
        &self,
        site: Site,
        name: &str,
        callee: &str,
        args: &[Value],
    ) -> Result<IrType, VerifyError> {
        let Some(target) = self.module.get(callee) else {
            return self.fail(format!("'{}' calls unknown function '{}'", name, callee));
        };
        if target.params.len() != args.len() {
            return self.fail(format!(
                "'{}' passes {} argument(s) to '{}', which takes {}",
                name,
                args.len(),
                callee,
                target.params.len()
            ));
        }
        for (arg, param) in args.iter().zip(&target.params) {
            self.expect_type(arg, site, param.ty, &format!("argument '{}' of '{}'", param.name, name))?;
        }
        Ok(target.ret)
    }

    fn check_phi(
        &self,
        block: BlockId,
        inst: &Instruction,
        incoming: &[(Value, BlockId)],
    ) -> Result<IrType, VerifyError> {
        let preds = self.preds.get(&block).map(Vec::as_slice).unwrap_or(&[]);
        if incoming.len() != preds.len() {
            return self.fail(format!(
                "phi '{}' has {} incoming value(s) for {} predecessor(s)",
                inst.name,
                incoming.len(),
                preds.len()
            ));
        }
        for (value, from) in incoming {
            if !preds.contains(from) {
                return self.fail(format!(
                    "phi '{}' names '{}', which is not a predecessor",
                    inst.name,
                    self.block(*from)?.label
                ));
            }
            // an incoming value only has to be defined somewhere; it is
            // read on the edge, not in this block
            let ty = self.use_type(value, (usize::MAX, usize::MAX))?;
            if ty != inst.ty {
                return self.fail(format!(
                    "phi '{}' of type {} receives {}",
                    inst.name, inst.ty, ty
                ));
            }
        }
        Ok(inst.ty)
    }

    fn check_terminator(
        &self,
        site: Site,
        term: &Terminator,
    ) -> Result<(), VerifyError> {
        match term {
            Terminator::Ret(v) => {
                self.expect_type(v, site, self.function.ret, "return value")
            }
            Terminator::Br(_) => Ok(()),
            Terminator::CondBr { cond, .. } => {
                self.expect_type(cond, site, IrType::I1, "branch condition")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middle::codegen::FunctionBuilder;

    fn int_fn(name: &str) -> FunctionBuilder {
        FunctionBuilder::new(Function::declare(
            name,
            vec![Param {
                name: "x".into(),
                ty: IrType::I64,
            }],
            IrType::I64,
        ))
    }

    fn verify(function: &Function) -> Result<(), VerifyError> {
        verify_function(function, &Module::new("test"))
    }

    #[test]
    fn test_accepts_straight_line_function() {
        let mut b = int_fn("inc");
        let entry = b.append_new_block("entry");
        b.position_at_end(entry);
        let sum = b.build_binary(ArithOp::Add, Value::Arg(0), Value::ConstInt(1), "addtmp");
        b.build_ret(sum);
        assert_eq!(verify(&b.finish()), Ok(()));
    }

    #[test]
    fn test_rejects_missing_terminator() {
        let mut b = int_fn("open");
        b.append_new_block("entry");
        let err = verify(&b.finish()).unwrap_err();
        assert_eq!(err.function, "open");
        assert!(err.message.contains("no terminator"));
    }

    #[test]
    fn test_rejects_mismatched_operand() {
        let mut b = int_fn("mixed");
        let entry = b.append_new_block("entry");
        b.position_at_end(entry);
        let sum = b.build_binary(ArithOp::Add, Value::Arg(0), Value::ConstDouble(1.0), "addtmp");
        b.build_ret(sum);
        let err = verify(&b.finish()).unwrap_err();
        assert!(err.message.contains("must be i64"));
    }

    #[test]
    fn test_rejects_wrong_return_type() {
        let mut b = int_fn("ret");
        let entry = b.append_new_block("entry");
        b.position_at_end(entry);
        b.build_ret(Value::ConstDouble(0.5));
        let err = verify(&b.finish()).unwrap_err();
        assert!(err.message.contains("return value"));
    }

    #[test]
    fn test_rejects_phi_from_non_predecessor() {
        let mut b = int_fn("join");
        let entry = b.append_new_block("entry");
        let stray = b.append_new_block("stray");
        let join = b.append_new_block("join");

        b.position_at_end(entry);
        b.build_br(join);
        b.position_at_end(stray);
        b.build_ret(Value::ConstInt(0));
        b.position_at_end(join);
        let phi = b.build_phi(IrType::I64, vec![(Value::Arg(0), stray)], "v");
        b.build_ret(phi);

        let err = verify(&b.finish()).unwrap_err();
        assert!(err.message.contains("not a predecessor"));
    }

    #[test]
    fn test_rejects_call_to_unknown_function() {
        let mut b = int_fn("caller");
        let entry = b.append_new_block("entry");
        b.position_at_end(entry);
        let r = b.build_call("missing", IrType::I64, vec![Value::Arg(0)], "calltmp");
        b.build_ret(r);
        let err = verify(&b.finish()).unwrap_err();
        assert!(err.message.contains("unknown function 'missing'"));
    }
}
