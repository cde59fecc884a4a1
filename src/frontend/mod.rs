//! Frontend compilation pipeline
//!
//! Source text is tokenized, parsed and type-checked in a single pass; each
//! definition comes out as a typed tree ready for code generation.
//! [`session`] drives that pass over a whole input.

pub mod core;
pub mod error;
pub mod session;
pub mod typecheck;

pub use error::CompileError;
pub use session::{CompiledUnit, Compiler, Session, UnitKind, UnitOutcome};
