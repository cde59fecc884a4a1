//! Call frames for the interpreter

use crate::backends::common::RuntimeValue;
use crate::backends::{ExecutorError, ExecutorResult};
use crate::middle::core::ir::{BlockId, Function, Value};

/// Call frame for one function activation
///
/// Holds the arguments, the value computed by each instruction so far, the
/// position inside the current block, and the block control came from,
/// which phi nodes select on.
#[derive(Debug)]
pub struct Frame<'f> {
    /// The function being executed
    pub function: &'f Function,
    args: Vec<RuntimeValue>,
    /// Indexed by instruction id
    values: Vec<Option<RuntimeValue>>,
    /// Block being executed
    pub block: BlockId,
    /// Index of the next instruction in `block`
    pub pos: usize,
    /// Block executed before `block`
    pub predecessor: Option<BlockId>,
}

impl<'f> Frame<'f> {
    /// Create a frame positioned at the function's entry block
    pub fn new(
        function: &'f Function,
        args: Vec<RuntimeValue>,
    ) -> ExecutorResult<Self> {
        let block = function
            .entry()
            .ok_or_else(|| ExecutorError::NotDefined(function.name.clone()))?;
        Ok(Self {
            function,
            args,
            values: vec![None; function.insts.len()],
            block,
            pos: 0,
            predecessor: None,
        })
    }

    /// Read an operand
    pub fn get(
        &self,
        value: &Value,
    ) -> ExecutorResult<RuntimeValue> {
        match value {
            Value::ConstInt(v) => Ok(RuntimeValue::Int(*v)),
            Value::ConstDouble(v) => Ok(RuntimeValue::Double(*v)),
            Value::Arg(i) => self.args.get(*i).copied().ok_or_else(|| {
                ExecutorError::Runtime(format!(
                    "argument {} out of range in @{}",
                    i, self.function.name
                ))
            }),
            Value::Inst(id) => self.values.get(id.0).copied().flatten().ok_or_else(|| {
                ExecutorError::Runtime(format!(
                    "instruction {} used before it was computed in @{}",
                    id.0, self.function.name
                ))
            }),
        }
    }

    /// Record the result of instruction `index`
    pub fn set(
        &mut self,
        index: usize,
        value: RuntimeValue,
    ) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = Some(value);
        }
    }

    /// Transfer control to `target`
    pub fn jump(
        &mut self,
        target: BlockId,
    ) {
        self.predecessor = Some(self.block);
        self.block = target;
        self.pos = 0;
    }

    /// Store a callee's result in the pending call instruction and move past it
    pub fn resume(
        &mut self,
        value: RuntimeValue,
    ) -> ExecutorResult<()> {
        let id = self
            .function
            .block(self.block)
            .and_then(|b| b.insts.get(self.pos))
            .copied()
            .ok_or_else(|| {
                ExecutorError::Runtime(format!(
                    "no pending call to resume in @{}",
                    self.function.name
                ))
            })?;
        self.set(id.0, value);
        self.pos += 1;
        Ok(())
    }
}
