//! IR Builder
//!
//! Appends instructions to one function at an insertion cursor, the way
//! LLVM's `IRBuilder` does.

use crate::middle::core::ir::*;

/// Builds the body of a single function
pub struct FunctionBuilder {
    function: Function,
    cursor: Option<BlockId>,
}

impl FunctionBuilder {
    /// Start building a body for the declaration `function`
    pub fn new(function: Function) -> Self {
        Self {
            function,
            cursor: None,
        }
    }

    pub fn function(&self) -> &Function {
        &self.function
    }

    /// Finish building and hand back the function
    pub fn finish(self) -> Function {
        self.function
    }

    /// Create a block that is not yet part of the layout
    pub fn create_block(
        &mut self,
        label: &str,
    ) -> BlockId {
        let label = self.function.unique_name(label);
        let id = BlockId(self.function.blocks.len());
        self.function.blocks.push(BasicBlock {
            label,
            insts: Vec::new(),
            terminator: None,
        });
        id
    }

    /// Place a created block at the end of the layout
    pub fn append_block(
        &mut self,
        id: BlockId,
    ) {
        if !self.function.layout.contains(&id) {
            self.function.layout.push(id);
        }
    }

    /// Create a block and place it at the end of the layout
    pub fn append_new_block(
        &mut self,
        label: &str,
    ) -> BlockId {
        let id = self.create_block(label);
        self.append_block(id);
        id
    }

    pub fn position_at_end(
        &mut self,
        id: BlockId,
    ) {
        self.cursor = Some(id);
    }

    /// Block at the insertion cursor
    pub fn current_block(&self) -> Option<BlockId> {
        self.cursor
    }

    pub fn value_type(
        &self,
        value: &Value,
    ) -> Option<IrType> {
        self.function.value_type(value)
    }

    fn push(
        &mut self,
        name: &str,
        ty: IrType,
        kind: InstKind,
    ) -> Value {
        let name = self.function.unique_name(name);
        let id = InstId(self.function.insts.len());
        self.function.insts.push(Instruction { name, ty, kind });
        if let Some(block) = self.cursor.and_then(|b| self.function.blocks.get_mut(b.0)) {
            block.insts.push(id);
        }
        Value::Inst(id)
    }

    fn terminate(
        &mut self,
        term: Terminator,
    ) {
        if let Some(block) = self.cursor.and_then(|b| self.function.blocks.get_mut(b.0)) {
            block.terminator = Some(term);
        }
    }

    pub fn build_binary(
        &mut self,
        op: ArithOp,
        lhs: Value,
        rhs: Value,
        name: &str,
    ) -> Value {
        self.push(name, op.ty(), InstKind::Binary { op, lhs, rhs })
    }

    pub fn build_icmp(
        &mut self,
        pred: IntPredicate,
        lhs: Value,
        rhs: Value,
        name: &str,
    ) -> Value {
        self.push(name, IrType::I1, InstKind::ICmp { pred, lhs, rhs })
    }

    pub fn build_fcmp(
        &mut self,
        pred: FloatPredicate,
        lhs: Value,
        rhs: Value,
        name: &str,
    ) -> Value {
        self.push(name, IrType::I1, InstKind::FCmp { pred, lhs, rhs })
    }

    pub fn build_zext(
        &mut self,
        value: Value,
        name: &str,
    ) -> Value {
        self.push(name, IrType::I64, InstKind::ZExt(value))
    }

    pub fn build_uitofp(
        &mut self,
        value: Value,
        name: &str,
    ) -> Value {
        self.push(name, IrType::Double, InstKind::UIToFP(value))
    }

    pub fn build_call(
        &mut self,
        callee: &str,
        ret: IrType,
        args: Vec<Value>,
        name: &str,
    ) -> Value {
        self.push(
            name,
            ret,
            InstKind::Call {
                callee: callee.to_string(),
                args,
            },
        )
    }

    pub fn build_phi(
        &mut self,
        ty: IrType,
        incoming: Vec<(Value, BlockId)>,
        name: &str,
    ) -> Value {
        self.push(name, ty, InstKind::Phi { incoming })
    }

    pub fn build_ret(
        &mut self,
        value: Value,
    ) {
        self.terminate(Terminator::Ret(value));
    }

    pub fn build_br(
        &mut self,
        target: BlockId,
    ) {
        self.terminate(Terminator::Br(target));
    }

    pub fn build_cond_br(
        &mut self,
        cond: Value,
        then_block: BlockId,
        else_block: BlockId,
    ) {
        self.terminate(Terminator::CondBr {
            cond,
            then_block,
            else_block,
        });
    }
}
