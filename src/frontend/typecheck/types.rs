//! Numeric types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of an expression
///
/// `Unresolved` only exists while a node is being built; every node that
/// leaves the parser carries `Int` or `Double`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumType {
    #[default]
    Unresolved,
    Int,
    Double,
}

impl NumType {
    /// Result type of combining two operand (or branch) types
    ///
    /// Double wins over Int. This is only the result type; whether the
    /// combination is legal is decided by the checker.
    pub fn combine(
        self,
        other: NumType,
    ) -> NumType {
        match (self, other) {
            (NumType::Double, _) | (_, NumType::Double) => NumType::Double,
            (NumType::Int, NumType::Int) => NumType::Int,
            _ => NumType::Unresolved,
        }
    }

    pub fn is_resolved(self) -> bool {
        self != NumType::Unresolved
    }

    /// Keyword spelling, `None` for `Unresolved`
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            NumType::Int => Some("int"),
            NumType::Double => Some("double"),
            NumType::Unresolved => None,
        }
    }
}

impl fmt::Display for NumType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.keyword().unwrap_or("<unresolved>"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_prefers_double() {
        assert_eq!(NumType::Int.combine(NumType::Int), NumType::Int);
        assert_eq!(NumType::Int.combine(NumType::Double), NumType::Double);
        assert_eq!(NumType::Double.combine(NumType::Int), NumType::Double);
        assert_eq!(NumType::Double.combine(NumType::Double), NumType::Double);
    }

    #[test]
    fn test_combine_with_unresolved() {
        assert_eq!(NumType::Int.combine(NumType::Unresolved), NumType::Unresolved);
        assert_eq!(
            NumType::Unresolved.combine(NumType::Double),
            NumType::Double
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(NumType::Int.to_string(), "int");
        assert_eq!(NumType::Double.to_string(), "double");
        assert_eq!(NumType::Unresolved.to_string(), "<unresolved>");
    }
}
