//! Top-level items: function definitions and bare expressions

pub mod declarations;
