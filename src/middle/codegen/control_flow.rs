//! Conditional expression lowering
//!
//! ```text
//!   <current>:  %if_condition = <cond> != 0
//!               br i1 %if_condition, label %then, label %else
//!   then:       ... br label %ifcont
//!   else:       ... br label %ifcont
//!   ifcont:     %iftmp = phi [ then-value, then-exit ], [ else-value, else-exit ]
//! ```
//!
//! The exit blocks are read back after each branch is lowered, since a
//! nested conditional moves the cursor into its own `ifcont`.

use super::{lower_type, CodegenError, FunctionLowering};
use crate::frontend::core::parser::ast::Expr;
use crate::frontend::typecheck::{NumType, TypeError};
use crate::middle::core::ir::{FloatPredicate, IntPredicate, Value};

impl FunctionLowering<'_> {
    pub(crate) fn lower_if(
        &mut self,
        expr: &Expr,
        condition: &Expr,
        then_branch: &Expr,
        else_branch: &Expr,
    ) -> Result<Value, CodegenError> {
        let cond = self.lower_expr(condition)?;
        let cond = match condition.type_of() {
            NumType::Int => self.builder.build_icmp(
                IntPredicate::Ne,
                cond,
                Value::ConstInt(0),
                "if_condition",
            ),
            NumType::Double => self.builder.build_fcmp(
                FloatPredicate::Une,
                cond,
                Value::ConstDouble(0.0),
                "if_condition",
            ),
            NumType::Unresolved => {
                return Err(CodegenError::UnresolvedType {
                    span: condition.span,
                })
            }
        };

        let ty = lower_type(expr.type_of(), expr.span)?;
        if then_branch.type_of() != expr.type_of() || else_branch.type_of() != expr.type_of() {
            return Err(TypeError::MixedBranches {
                then_ty: then_branch.type_of(),
                else_ty: else_branch.type_of(),
                span: expr.span,
            }
            .into());
        }

        let then_bb = self.builder.append_new_block("then");
        let else_bb = self.builder.create_block("else");
        let merge_bb = self.builder.create_block("ifcont");
        self.builder.build_cond_br(cond, then_bb, else_bb);

        self.builder.position_at_end(then_bb);
        let then_value = self.lower_expr(then_branch)?;
        self.builder.build_br(merge_bb);
        let then_exit = self.builder.current_block().unwrap_or(then_bb);

        self.builder.append_block(else_bb);
        self.builder.position_at_end(else_bb);
        let else_value = self.lower_expr(else_branch)?;
        self.builder.build_br(merge_bb);
        let else_exit = self.builder.current_block().unwrap_or(else_bb);

        self.builder.append_block(merge_bb);
        self.builder.position_at_end(merge_bb);
        Ok(self.builder.build_phi(
            ty,
            vec![(then_value, then_exit), (else_value, else_exit)],
            "iftmp",
        ))
    }
}
