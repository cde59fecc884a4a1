//! Runtime values

use std::fmt;

use crate::frontend::typecheck::NumType;
use crate::middle::core::ir::IrType;

/// A value held by the interpreter
///
/// `Bool` only lives between a compare and its widening; no function
/// returns one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuntimeValue {
    Bool(bool),
    Int(i64),
    Double(f64),
}

impl RuntimeValue {
    pub fn ir_type(&self) -> IrType {
        match self {
            RuntimeValue::Bool(_) => IrType::I1,
            RuntimeValue::Int(_) => IrType::I64,
            RuntimeValue::Double(_) => IrType::Double,
        }
    }

    /// Source-level type, `None` for `Bool`
    pub fn num_type(&self) -> Option<NumType> {
        self.ir_type().to_num()
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            RuntimeValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            RuntimeValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RuntimeValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<i64> for RuntimeValue {
    fn from(v: i64) -> Self {
        RuntimeValue::Int(v)
    }
}

impl From<f64> for RuntimeValue {
    fn from(v: f64) -> Self {
        RuntimeValue::Double(v)
    }
}

impl fmt::Display for RuntimeValue {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            RuntimeValue::Bool(b) => write!(f, "{}", b),
            RuntimeValue::Int(v) => write!(f, "{}", v),
            // keep the decimal point so doubles read as doubles
            RuntimeValue::Double(v) => write!(f, "{:?}", v),
        }
    }
}
