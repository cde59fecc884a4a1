//! Core algorithm layer
//!
//! - `lexer`: numeric DFA and tokenizer
//! - `parser`: precedence climbing with interleaved type checking

pub mod lexer;
pub mod parser;

// Re-export commonly used items
pub use lexer::tokenize;
pub use parser::{parse_program, Parser};
