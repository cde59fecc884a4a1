//! Execution backends for generated IR
//!
//! ```text
//! Module (from codegen)
//!         |
//!         v
//!    Interpreter
//!         |
//!         v
//!    RuntimeValue
//! ```
//!
//! Only an interpreter exists. It executes the SSA IR directly and is what
//! the CLI and the tests use to observe results.

pub mod common;
pub mod dev;
pub mod interpreter;

use std::fmt;

use crate::middle::core::ir::Module;

pub use common::RuntimeValue;

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;

/// Executor error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutorError {
    /// Malformed IR reached the executor
    Runtime(String),
    /// An operand had the wrong kind of value
    Type(String),
    /// Call depth exceeded the configured bound
    StackOverflow(usize),
    /// Integer division by zero
    DivisionByZero,
    /// Function not found in the module
    FunctionNotFound(String),
    /// Function is declared but has no body
    NotDefined(String),
    /// Wrong number of arguments
    ArityMismatch {
        function: String,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for ExecutorError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            ExecutorError::Runtime(msg) => write!(f, "runtime error: {}", msg),
            ExecutorError::Type(msg) => write!(f, "type error at runtime: {}", msg),
            ExecutorError::StackOverflow(depth) => {
                write!(f, "stack overflow: call depth exceeded {}", depth)
            }
            ExecutorError::DivisionByZero => write!(f, "division by zero"),
            ExecutorError::FunctionNotFound(name) => write!(f, "function not found: {}", name),
            ExecutorError::NotDefined(name) => {
                write!(f, "function '{}' is declared but has no body", name)
            }
            ExecutorError::ArityMismatch {
                function,
                expected,
                found,
            } => write!(
                f,
                "function '{}' takes {} argument(s), {} given",
                function, expected, found
            ),
        }
    }
}

impl std::error::Error for ExecutorError {}

/// Execution state for a running program
#[derive(Debug, Clone, Default)]
pub struct ExecutionState {
    /// Innermost function being executed
    pub current_function: Option<String>,
    /// Current call depth
    pub call_depth: usize,
    /// Deepest call depth reached since the last reset
    pub max_depth_reached: usize,
    /// Instructions executed since the last reset
    pub steps: u64,
}

/// Configuration for an executor
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Maximum call stack depth
    pub max_stack_depth: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_stack_depth: 1024,
        }
    }
}

/// Executor trait - all backends implement this
pub trait Executor {
    /// Execute function `name` of `module` with arguments
    fn execute_function(
        &mut self,
        module: &Module,
        name: &str,
        args: &[RuntimeValue],
    ) -> ExecutorResult<RuntimeValue>;

    /// Reset the executor state
    fn reset(&mut self);

    /// Get current execution state
    fn state(&self) -> &ExecutionState;
}
