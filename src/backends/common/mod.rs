//! Shared backend components
//!
//! - Runtime value types

pub mod value;

pub use value::RuntimeValue;
