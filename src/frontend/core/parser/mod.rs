//! Parser module
//!
//! Recursive descent with precedence climbing for binary operators. Every
//! node is type-checked as it is built, so a parsed tree is a typed tree.

pub mod ast;
pub mod parser_state;
pub mod pratt;
pub mod statements;
#[cfg(test)]
pub mod tests;

use indexmap::IndexMap;

// Re-export commonly used items
pub use ast::*;
pub use parser_state::{ParseError, ParseResult, Parser};

use crate::frontend::core::lexer::tokens::TokenKind;
use crate::frontend::typecheck::Signature;
use crate::util::config::PrecedenceTable;

/// Parse a whole program without generating code
///
/// Definitions become visible to later items as soon as they are parsed.
/// Stops at the first error.
pub fn parse_program(
    source: &str,
    precedence: &PrecedenceTable,
) -> ParseResult<Vec<FunctionDef>> {
    let mut parser = Parser::new(source, precedence.clone());
    let mut signatures: IndexMap<String, Signature> = IndexMap::new();
    let mut items = Vec::new();

    parser.advance()?;
    loop {
        match parser.current().kind {
            TokenKind::Eof => break,
            TokenKind::Char(';') => {
                parser.advance()?;
            }
            TokenKind::KwDef => {
                let def = parser.parse_definition(&signatures)?;
                signatures.insert(def.proto.name.clone(), Signature::from(&def.proto));
                items.push(def);
            }
            _ => items.push(parser.parse_top_level_expr(&signatures)?),
        }
    }

    tracing::debug!("parsed {} items", items.len());
    Ok(items)
}
