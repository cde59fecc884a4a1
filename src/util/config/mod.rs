//! Compiler configuration
//!
//! The embedding driver owns the configuration and hands it to the
//! [`Session`](crate::frontend::Session) before any source is parsed.
//! It can be built in code or loaded from a TOML file:
//!
//! ```toml
//! module_name = "demo"
//! max_call_depth = 512
//!
//! [precedence]
//! "<" = 10
//! "+" = 20
//! "*" = 40
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Binary operator precedence table (operator symbol -> precedence)
///
/// A precedence `<= 0` means "not a binary operator": expression parsing
/// stops when it meets such an operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrecedenceTable(IndexMap<String, i32>);

impl PrecedenceTable {
    /// An empty table: every operator halts expression parsing
    pub fn empty() -> Self {
        Self(IndexMap::new())
    }

    /// Set the precedence of an operator
    pub fn insert(
        &mut self,
        op: impl Into<String>,
        precedence: i32,
    ) {
        self.0.insert(op.into(), precedence);
    }

    /// Builder-style variant of [`insert`](Self::insert)
    pub fn with(
        mut self,
        op: impl Into<String>,
        precedence: i32,
    ) -> Self {
        self.insert(op, precedence);
        self
    }

    /// Precedence of `op` if it acts as a binary operator
    pub fn precedence_of(
        &self,
        op: &str,
    ) -> Option<i32> {
        self.0.get(op).copied().filter(|&p| p > 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.0.iter().map(|(op, p)| (op.as_str(), *p))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for PrecedenceTable {
    /// Comparisons bind loosest, then additive, then multiplicative
    fn default() -> Self {
        let mut table = Self::empty();
        for op in ["<", ">", "<=", ">=", "==", "!="] {
            table.insert(op, 10);
        }
        table.insert("+", 20);
        table.insert("-", 20);
        table.insert("*", 40);
        table.insert("/", 40);
        table
    }
}

fn default_module_name() -> String {
    "mc".to_string()
}

fn default_max_call_depth() -> usize {
    1024
}

fn default_true() -> bool {
    true
}

/// Compilation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileConfig {
    /// Binary operator precedences
    #[serde(default)]
    pub precedence: PrecedenceTable,

    /// Name of the generated IR module
    #[serde(default = "default_module_name")]
    pub module_name: String,

    /// Maximum interpreter call depth
    #[serde(default = "default_max_call_depth")]
    pub max_call_depth: usize,

    /// Colored diagnostics
    #[serde(default = "default_true")]
    pub color: bool,

    /// Print the IR of every compiled unit to stderr
    #[serde(default)]
    pub dump_ir: bool,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            precedence: PrecedenceTable::default(),
            module_name: default_module_name(),
            max_call_depth: default_max_call_depth(),
            color: true,
            dump_ir: false,
        }
    }
}

impl CompileConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(ConfigError::Parse)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    #[inline]
    pub fn with_precedence(
        mut self,
        precedence: PrecedenceTable,
    ) -> Self {
        self.precedence = precedence;
        self
    }

    #[inline]
    pub fn with_module_name(
        mut self,
        name: impl Into<String>,
    ) -> Self {
        self.module_name = name.into();
        self
    }

    #[inline]
    pub fn with_max_call_depth(
        mut self,
        depth: usize,
    ) -> Self {
        self.max_call_depth = depth;
        self
    }

    #[inline]
    pub fn with_color(
        mut self,
        color: bool,
    ) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn with_dump_ir(
        mut self,
        dump: bool,
    ) -> Self {
        self.dump_ir = dump;
        self
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
