//! Interpreter executor for generated IR
//!
//! Walks a function's blocks from `entry`, computing each instruction into
//! the frame and following terminators until a `ret`. Calls push a new
//! [`Frame`] onto an explicit stack instead of recursing on the host stack,
//! so nesting is bounded only by [`ExecutorConfig::max_stack_depth`].

use crate::backends::common::RuntimeValue;
use crate::backends::interpreter::Frame;
use crate::backends::{ExecutionState, Executor, ExecutorConfig, ExecutorError, ExecutorResult};
use crate::middle::core::ir::{
    ArithOp, FloatPredicate, InstKind, Instruction, IntPredicate, Module, Terminator,
};

/// What one step of the innermost frame asks the frame loop to do
enum Step<'m> {
    /// Keep stepping the same frame
    Continue,
    /// Push a frame for `callee`
    Call {
        callee: &'m str,
        args: Vec<RuntimeValue>,
    },
    /// Pop the frame and hand `value` to its caller
    Return(RuntimeValue),
}

/// The IR interpreter
#[derive(Debug, Default)]
pub struct Interpreter {
    /// Current execution state
    state: ExecutionState,
    /// Configuration
    config: ExecutorConfig,
}

impl Interpreter {
    /// Create a new interpreter with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an interpreter with custom configuration
    pub fn with_config(config: ExecutorConfig) -> Self {
        Self {
            state: ExecutionState::default(),
            config,
        }
    }

    /// Interpreter bounded to `depth` nested calls
    pub fn with_max_depth(depth: usize) -> Self {
        Self::with_config(ExecutorConfig {
            max_stack_depth: depth,
        })
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Check a call against its target and open a frame for it
    fn enter<'m>(
        &mut self,
        module: &'m Module,
        name: &str,
        args: Vec<RuntimeValue>,
    ) -> ExecutorResult<Frame<'m>> {
        let function = module
            .get(name)
            .ok_or_else(|| ExecutorError::FunctionNotFound(name.to_string()))?;
        if function.is_declaration() {
            return Err(ExecutorError::NotDefined(name.to_string()));
        }
        if function.params.len() != args.len() {
            return Err(ExecutorError::ArityMismatch {
                function: name.to_string(),
                expected: function.params.len(),
                found: args.len(),
            });
        }
        for (param, arg) in function.params.iter().zip(&args) {
            if param.ty != arg.ir_type() {
                return Err(ExecutorError::Type(format!(
                    "parameter %{} of @{} is {}, got {}",
                    param.name,
                    name,
                    param.ty,
                    arg.ir_type()
                )));
            }
        }

        if self.state.call_depth >= self.config.max_stack_depth {
            return Err(ExecutorError::StackOverflow(self.config.max_stack_depth));
        }
        let frame = Frame::new(function, args)?;
        self.state.call_depth += 1;
        self.state.max_depth_reached = self.state.max_depth_reached.max(self.state.call_depth);
        self.state.current_function = Some(name.to_string());
        tracing::trace!("enter @{} at depth {}", name, self.state.call_depth);
        Ok(frame)
    }

    /// Run `name` and every call it makes until it returns
    fn run(
        &mut self,
        module: &Module,
        name: &str,
        args: Vec<RuntimeValue>,
    ) -> ExecutorResult<RuntimeValue> {
        let mut stack = vec![self.enter(module, name, args)?];
        loop {
            let Some(frame) = stack.last_mut() else {
                return Err(ExecutorError::Runtime("call stack is empty".to_string()));
            };
            match self.step(frame)? {
                Step::Continue => {}
                Step::Call { callee, args } => {
                    let callee = self.enter(module, callee, args)?;
                    stack.push(callee);
                }
                Step::Return(value) => {
                    stack.pop();
                    self.state.call_depth -= 1;
                    let Some(caller) = stack.last_mut() else {
                        return Ok(value);
                    };
                    caller.resume(value)?;
                    self.state.steps += 1;
                    self.state.current_function = Some(caller.function.name.clone());
                }
            }
        }
    }

    /// Execute the next instruction or terminator of `frame`
    fn step<'m>(
        &mut self,
        frame: &mut Frame<'m>,
    ) -> ExecutorResult<Step<'m>> {
        let function = frame.function;
        let block = function.block(frame.block).ok_or_else(|| {
            ExecutorError::Runtime(format!(
                "block {} does not exist in @{}",
                frame.block.0, function.name
            ))
        })?;

        if let Some(&id) = block.insts.get(frame.pos) {
            let inst = function.inst(id).ok_or_else(|| {
                ExecutorError::Runtime(format!(
                    "instruction {} does not exist in @{}",
                    id.0, function.name
                ))
            })?;
            if let InstKind::Call { callee, args } = &inst.kind {
                let args = args
                    .iter()
                    .map(|a| frame.get(a))
                    .collect::<ExecutorResult<Vec<_>>>()?;
                return Ok(Step::Call { callee, args });
            }
            let value = exec_instruction(frame, inst)?;
            frame.set(id.0, value);
            frame.pos += 1;
            self.state.steps += 1;
            return Ok(Step::Continue);
        }

        match &block.terminator {
            Some(Terminator::Ret(value)) => Ok(Step::Return(frame.get(value)?)),
            Some(Terminator::Br(target)) => {
                frame.jump(*target);
                Ok(Step::Continue)
            }
            Some(Terminator::CondBr {
                cond,
                then_block,
                else_block,
            }) => {
                let taken = expect_bool(frame.get(cond)?)?;
                frame.jump(if taken { *then_block } else { *else_block });
                Ok(Step::Continue)
            }
            None => Err(ExecutorError::Runtime(format!(
                "block '{}' in @{} has no terminator",
                block.label, function.name
            ))),
        }
    }
}

impl Executor for Interpreter {
    fn execute_function(
        &mut self,
        module: &Module,
        name: &str,
        args: &[RuntimeValue],
    ) -> ExecutorResult<RuntimeValue> {
        let depth = self.state.call_depth;
        let caller = self.state.current_function.clone();

        let result = self.run(module, name, args.to_vec());

        // an error leaves frames open; drop them from the count
        self.state.call_depth = depth;
        self.state.current_function = caller;
        result
    }

    fn reset(&mut self) {
        self.state = ExecutionState::default();
    }

    fn state(&self) -> &ExecutionState {
        &self.state
    }
}

/// Compute a non-call instruction
fn exec_instruction(
    frame: &Frame<'_>,
    inst: &Instruction,
) -> ExecutorResult<RuntimeValue> {
    match &inst.kind {
        InstKind::Binary { op, lhs, rhs } => exec_binary_op(*op, frame.get(lhs)?, frame.get(rhs)?),
        InstKind::ICmp { pred, lhs, rhs } => {
            let a = expect_int(frame.get(lhs)?)?;
            let b = expect_int(frame.get(rhs)?)?;
            Ok(RuntimeValue::Bool(exec_icmp(*pred, a, b)))
        }
        InstKind::FCmp { pred, lhs, rhs } => {
            let a = expect_double(frame.get(lhs)?)?;
            let b = expect_double(frame.get(rhs)?)?;
            Ok(RuntimeValue::Bool(exec_fcmp(*pred, a, b)))
        }
        InstKind::ZExt(value) => {
            let bit = expect_bool(frame.get(value)?)?;
            Ok(RuntimeValue::Int(i64::from(bit)))
        }
        InstKind::UIToFP(value) => {
            let bit = expect_bool(frame.get(value)?)?;
            Ok(RuntimeValue::Double(if bit { 1.0 } else { 0.0 }))
        }
        InstKind::Call { callee, .. } => Err(ExecutorError::Runtime(format!(
            "call to @{} must go through the frame stack",
            callee
        ))),
        InstKind::Phi { incoming } => {
            let from = frame.predecessor;
            let (value, _) = incoming
                .iter()
                .find(|(_, block)| Some(*block) == from)
                .ok_or_else(|| {
                    ExecutorError::Runtime(format!(
                        "phi '%{}' has no incoming value for the predecessor block",
                        inst.name
                    ))
                })?;
            frame.get(value)
        }
    }
}

/// Execute a binary operation
fn exec_binary_op(
    op: ArithOp,
    a: RuntimeValue,
    b: RuntimeValue,
) -> ExecutorResult<RuntimeValue> {
    let value = match op {
        ArithOp::Add => RuntimeValue::Int(expect_int(a)?.wrapping_add(expect_int(b)?)),
        ArithOp::Sub => RuntimeValue::Int(expect_int(a)?.wrapping_sub(expect_int(b)?)),
        ArithOp::Mul => RuntimeValue::Int(expect_int(a)?.wrapping_mul(expect_int(b)?)),
        ArithOp::SDiv => {
            let (a, b) = (expect_int(a)?, expect_int(b)?);
            if b == 0 {
                return Err(ExecutorError::DivisionByZero);
            }
            RuntimeValue::Int(a.wrapping_div(b))
        }
        ArithOp::FAdd => RuntimeValue::Double(expect_double(a)? + expect_double(b)?),
        ArithOp::FSub => RuntimeValue::Double(expect_double(a)? - expect_double(b)?),
        ArithOp::FMul => RuntimeValue::Double(expect_double(a)? * expect_double(b)?),
        ArithOp::FDiv => RuntimeValue::Double(expect_double(a)? / expect_double(b)?),
    };
    Ok(value)
}

fn exec_icmp(
    pred: IntPredicate,
    a: i64,
    b: i64,
) -> bool {
    match pred {
        IntPredicate::Eq => a == b,
        IntPredicate::Ne => a != b,
        IntPredicate::Slt => a < b,
        IntPredicate::Sgt => a > b,
        IntPredicate::Sle => a <= b,
        IntPredicate::Sge => a >= b,
    }
}

/// Unordered predicates: true whenever either side is NaN
fn exec_fcmp(
    pred: FloatPredicate,
    a: f64,
    b: f64,
) -> bool {
    if a.is_nan() || b.is_nan() {
        return true;
    }
    match pred {
        FloatPredicate::Ueq => a == b,
        FloatPredicate::Une => a != b,
        FloatPredicate::Ult => a < b,
        FloatPredicate::Ugt => a > b,
        FloatPredicate::Ule => a <= b,
        FloatPredicate::Uge => a >= b,
    }
}

fn expect_int(value: RuntimeValue) -> ExecutorResult<i64> {
    value
        .as_int()
        .ok_or_else(|| ExecutorError::Type(format!("expected i64, got {}", value.ir_type())))
}

fn expect_double(value: RuntimeValue) -> ExecutorResult<f64> {
    value
        .as_double()
        .ok_or_else(|| ExecutorError::Type(format!("expected double, got {}", value.ir_type())))
}

fn expect_bool(value: RuntimeValue) -> ExecutorResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| ExecutorError::Type(format!("expected i1, got {}", value.ir_type())))
}
