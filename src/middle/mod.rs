//! Intermediate representation and code generation
//!
//! The typed AST is lowered into SSA IR (`core`) by the `codegen` module.

pub mod codegen;
pub mod core;

pub use self::codegen::{CodeGenerator, CodegenError};
pub use self::core::{Function, Module, VerifyError};
