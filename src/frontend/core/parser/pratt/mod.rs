//! Expression parsing
//!
//! `expression := primary binOpRHS(0)`. Primaries live in [`nud`], operator
//! folding by precedence climbing in [`led`].

pub mod led;
pub mod nud;

use crate::frontend::core::parser::ast::Expr;
use crate::frontend::core::parser::parser_state::{ParseResult, Parser};
use crate::frontend::typecheck::{Checker, SignatureLookup};

impl Parser<'_> {
    /// Parse a full expression
    pub fn parse_expression(
        &mut self,
        sigs: &dyn SignatureLookup,
    ) -> ParseResult<Expr> {
        let lhs = self.parse_primary(sigs)?;
        self.parse_bin_op_rhs(0, lhs, sigs)
    }

    /// Typing rules in the current function scope
    pub(crate) fn checker<'s>(
        &'s self,
        sigs: &'s dyn SignatureLookup,
    ) -> Checker<'s> {
        Checker::new(&self.env, sigs, self.proto.as_ref())
    }
}
