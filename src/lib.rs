//! mc: a minimal statically-typed expression language
//!
//! Source text is tokenized, parsed into a typed tree and lowered into an
//! SSA intermediate representation, one top-level unit at a time.
//!
//! # Example
//!
//! ```text
//! def double half(double x) x / 2.0;
//! def int fact(int n) if n < 2 then 1 else n * fact(n - 1);
//! fact(5);
//! ```

#![warn(rust_2018_idioms)]

// Public modules
pub mod backends;
pub mod frontend;
pub mod middle;

// Utility modules
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::backends::RuntimeValue;
use crate::frontend::{Compiler, UnitKind, UnitOutcome};
use crate::middle::core::ir::Module;
use crate::util::config::CompileConfig;
use crate::util::diagnostic::Diagnostic;

/// Language version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Language name
pub const NAME: &str = "mc";

/// Compilation failed; every diagnostic that was reported
#[derive(Debug, thiserror::Error)]
#[error("{} error(s) in {name}", .diagnostics.len())]
pub struct Failed {
    pub name: String,
    pub diagnostics: Vec<Diagnostic>,
}

fn failures(outcomes: &[UnitOutcome]) -> Vec<Diagnostic> {
    outcomes
        .iter()
        .filter_map(|o| o.diagnostic().cloned())
        .collect()
}

/// Compile `source` into an IR module
///
/// Fails if any unit failed. Top-level expressions are not kept in the
/// module.
pub fn compile(
    name: &str,
    source: &str,
    config: &CompileConfig,
) -> Result<Module> {
    debug!("compile {} ({} bytes)", name, source.len());
    let mut compiler = Compiler::new(config.clone());
    let outcomes = compiler.compile(name, source);

    let diagnostics = failures(&outcomes);
    if !diagnostics.is_empty() {
        return Err(Failed {
            name: name.to_string(),
            diagnostics,
        }
        .into());
    }
    Ok(compiler.into_module())
}

/// Compile `source` and evaluate every top-level expression in order
pub fn run(
    name: &str,
    source: &str,
    config: &CompileConfig,
) -> Result<Vec<RuntimeValue>> {
    debug!("run {} ({} bytes)", name, source.len());
    let mut compiler = Compiler::new(config.clone()).with_interpreter();
    let outcomes = compiler.compile(name, source);

    let diagnostics = failures(&outcomes);
    if !diagnostics.is_empty() {
        return Err(Failed {
            name: name.to_string(),
            diagnostics,
        }
        .into());
    }
    Ok(outcomes
        .iter()
        .filter_map(UnitOutcome::unit)
        .filter(|u| u.kind == UnitKind::Expression)
        .filter_map(|u| u.value)
        .collect())
}

/// Read a source file
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Compile a file into an IR module
pub fn compile_file(
    path: &Path,
    config: &CompileConfig,
) -> Result<Module> {
    let source = read_source(path)?;
    compile(&path.display().to_string(), &source, config)
}

/// Run a file
pub fn run_file(
    path: &Path,
    config: &CompileConfig,
) -> Result<Vec<RuntimeValue>> {
    let source = read_source(path)?;
    run(&path.display().to_string(), &source, config)
}
