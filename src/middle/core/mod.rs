//! Core intermediate representation
//!
//! The IR data structures and the verifier every generated function must
//! pass.

pub mod ir;
pub mod verify;

pub use ir::*;
pub use verify::{verify_function, VerifyError};
