//! Expression lowering

use super::{lower_type, CodegenError, FunctionLowering};
use crate::frontend::core::parser::ast::{BinOp, Expr, ExprKind, Literal};
use crate::frontend::typecheck::{NumType, TypeError};
use crate::middle::core::ir::{ArithOp, FloatPredicate, IntPredicate, Value};

impl FunctionLowering<'_> {
    pub(crate) fn lower_expr(
        &mut self,
        expr: &Expr,
    ) -> Result<Value, CodegenError> {
        lower_type(expr.type_of(), expr.span)?;

        match &expr.kind {
            ExprKind::Literal(Literal::Int(v)) => Ok(Value::ConstInt(*v)),
            ExprKind::Literal(Literal::Double(v)) => Ok(Value::ConstDouble(*v)),
            ExprKind::Variable(name) => self
                .lookup(name)
                .map(|(value, _)| value)
                .ok_or_else(|| CodegenError::UnboundVariable {
                    name: name.clone(),
                    span: expr.span,
                }),
            ExprKind::Binary { op, lhs, rhs } => self.lower_binary(expr, *op, lhs, rhs),
            ExprKind::Call { callee, args } => self.lower_call(expr, callee, args),
            ExprKind::If {
                condition,
                then_branch,
                else_branch,
            } => self.lower_if(expr, condition, then_branch, else_branch),
        }
    }

    fn lower_binary(
        &mut self,
        expr: &Expr,
        op: BinOp,
        lhs: &Expr,
        rhs: &Expr,
    ) -> Result<Value, CodegenError> {
        let l = self.lower_expr(lhs)?;
        let r = self.lower_expr(rhs)?;

        let ty = expr.type_of();
        if lhs.type_of() != ty || rhs.type_of() != ty {
            return Err(TypeError::MixedOperands {
                op: op.symbol().to_string(),
                lhs: lhs.type_of(),
                rhs: rhs.type_of(),
                span: expr.span,
            }
            .into());
        }

        let b = &mut self.builder;
        let value = match ty {
            NumType::Int => match op {
                BinOp::Add => b.build_binary(ArithOp::Add, l, r, "int_add"),
                BinOp::Sub => b.build_binary(ArithOp::Sub, l, r, "int_sub"),
                BinOp::Mul => b.build_binary(ArithOp::Mul, l, r, "int_mul"),
                BinOp::Div => b.build_binary(ArithOp::SDiv, l, r, "int_div"),
                _ => {
                    let (pred, name) = int_predicate(op);
                    let bit = b.build_icmp(pred, l, r, &format!("int_{}", name));
                    b.build_zext(bit, "bool_to_int")
                }
            },
            NumType::Double => match op {
                BinOp::Add => b.build_binary(ArithOp::FAdd, l, r, "double_add"),
                BinOp::Sub => b.build_binary(ArithOp::FSub, l, r, "double_sub"),
                BinOp::Mul => b.build_binary(ArithOp::FMul, l, r, "double_mul"),
                BinOp::Div => b.build_binary(ArithOp::FDiv, l, r, "double_div"),
                _ => {
                    let (pred, name) = float_predicate(op);
                    let bit = b.build_fcmp(pred, l, r, &format!("double_{}", name));
                    b.build_uitofp(bit, "bool_to_double")
                }
            },
            NumType::Unresolved => return Err(CodegenError::UnresolvedType { span: expr.span }),
        };
        Ok(value)
    }

    fn lower_call(
        &mut self,
        expr: &Expr,
        callee: &str,
        args: &[Expr],
    ) -> Result<Value, CodegenError> {
        let module = self.module;
        let Some(target) = module.get(callee) else {
            return Err(TypeError::UnknownFunction {
                name: callee.to_string(),
                span: expr.span,
            }
            .into());
        };

        if target.params.len() != args.len() {
            return Err(TypeError::ArityMismatch {
                name: callee.to_string(),
                expected: target.params.len(),
                found: args.len(),
                span: expr.span,
            }
            .into());
        }

        let mut values = Vec::with_capacity(args.len());
        for (index, (arg, param)) in args.iter().zip(&target.params).enumerate() {
            let ty = lower_type(arg.type_of(), arg.span)?;
            if ty != param.ty {
                return Err(TypeError::ArgumentType {
                    name: callee.to_string(),
                    index,
                    expected: param.ty.to_num().unwrap_or_default(),
                    found: arg.type_of(),
                    span: arg.span,
                }
                .into());
            }
            values.push(self.lower_expr(arg)?);
        }

        Ok(self.builder.build_call(callee, target.ret, values, "calltmp"))
    }
}

fn int_predicate(op: BinOp) -> (IntPredicate, &'static str) {
    match op {
        BinOp::Lt => (IntPredicate::Slt, "less_than"),
        BinOp::Gt => (IntPredicate::Sgt, "greater_than"),
        BinOp::Le => (IntPredicate::Sle, "equal_or_less_than"),
        BinOp::Ge => (IntPredicate::Sge, "equal_or_greater_than"),
        BinOp::Eq => (IntPredicate::Eq, "equal"),
        _ => (IntPredicate::Ne, "not_equal"),
    }
}

fn float_predicate(op: BinOp) -> (FloatPredicate, &'static str) {
    match op {
        BinOp::Lt => (FloatPredicate::Ult, "less_than"),
        BinOp::Gt => (FloatPredicate::Ugt, "greater_than"),
        BinOp::Le => (FloatPredicate::Ule, "equal_or_less_than"),
        BinOp::Ge => (FloatPredicate::Uge, "equal_or_greater_than"),
        BinOp::Eq => (FloatPredicate::Ueq, "equal"),
        _ => (FloatPredicate::Une, "not_equal"),
    }
}
