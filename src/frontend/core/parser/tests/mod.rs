//! Parser tests
//!
//! - basic: primaries and precedence climbing
//! - fn_def: prototypes and definitions
//! - state: lookahead handling
//! - boundary: syntax errors and edge cases


use crate::frontend::core::parser::{parse_program, FunctionDef, ParseResult};
use crate::util::config::PrecedenceTable;

pub(super) fn parse(source: &str) -> ParseResult<Vec<FunctionDef>> {
    parse_program(source, &PrecedenceTable::default())
}

/// Body of the single item in `source`
pub(super) fn parse_one(source: &str) -> FunctionDef {
    let mut items = parse(source).unwrap_or_else(|e| panic!("parse {source:?} failed: {e}"));
    assert_eq!(items.len(), 1, "expected one item in {source:?}");
    items.remove(0)
}
