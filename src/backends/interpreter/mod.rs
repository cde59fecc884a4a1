//! Interpreter backend for generated IR
//!
//! Executes SSA functions block by block. Used by the CLI to evaluate
//! top-level expressions and by the tests to observe generated code.

pub mod executor;
pub mod frames;


pub use executor::Interpreter;
pub use frames::Frame;
