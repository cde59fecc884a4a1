//! Code generation tests
//!
//! - expr: literals, operators, calls
//! - control_flow: conditionals and phi joins
//! - functions: definitions, rollback, redefinition, internal errors

mod expr;

use crate::frontend::core::lexer::tokens::TokenKind;
use crate::frontend::core::parser::Parser;
use crate::frontend::error::CompileError;
use crate::middle::codegen::CodeGenerator;
use crate::util::config::PrecedenceTable;

/// Parse and generate every item of `source` into a fresh module
pub(super) fn generate(source: &str) -> Result<CodeGenerator, CompileError> {
    let mut gen = CodeGenerator::new("test");
    let mut parser = Parser::new(source, PrecedenceTable::default());
    parser.advance()?;
    loop {
        let def = match parser.current().kind {
            TokenKind::Eof => break,
            TokenKind::Char(';') => {
                parser.advance()?;
                continue;
            }
            TokenKind::KwDef => parser.parse_definition(gen.module())?,
            _ => parser.parse_top_level_expr(gen.module())?,
        };
        gen.generate_function(def)?;
    }
    Ok(gen)
}

/// IR text of function `name` after generating `source`
pub(super) fn function_ir(
    source: &str,
    name: &str,
) -> String {
    let gen = generate(source).unwrap_or_else(|e| panic!("generate {source:?} failed: {e}"));
    gen.module()
        .get(name)
        .unwrap_or_else(|| panic!("no function {name}"))
        .to_string()
}
