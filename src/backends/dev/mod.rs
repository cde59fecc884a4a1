//! Developer tools
//!
//! - `repl`: interactive line editor over a persistent [`Compiler`](crate::frontend::Compiler)

pub mod repl;

pub use repl::{LineRepl, LineReplConfig, ReplState};
