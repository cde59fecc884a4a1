//! Binary operator folding (precedence climbing)

use crate::frontend::core::lexer::tokens::*;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::parser_state::{ParseError, ParseResult, Parser};
use crate::frontend::typecheck::{Checker, SignatureLookup};

impl Parser<'_> {
    /// Fold operators of precedence at least `min_prec` onto `lhs`
    ///
    /// Operators of equal precedence associate to the left; a tighter
    /// operator after the right operand takes that operand first.
    pub fn parse_bin_op_rhs(
        &mut self,
        min_prec: i32,
        mut lhs: Expr,
        sigs: &dyn SignatureLookup,
    ) -> ParseResult<Expr> {
        loop {
            let prec = self.current_precedence();
            if prec < min_prec {
                return Ok(lhs);
            }

            let op = self.binary_operator()?;
            self.advance()?;

            let mut rhs = self.parse_primary(sigs)?;
            if prec < self.current_precedence() {
                rhs = self.parse_bin_op_rhs(prec + 1, rhs, sigs)?;
            }

            let ty = Checker::binary(op, &lhs, &rhs)?;
            let span = lhs.span.to(rhs.span);
            lhs = Expr::new(
                ExprKind::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                ty,
                span,
            );
        }
    }

    fn binary_operator(&self) -> ParseResult<BinOp> {
        let TokenKind::Operator(symbol) = &self.current().kind else {
            return Err(self.expected("binary operator"));
        };
        BinOp::from_symbol(symbol).ok_or_else(|| {
            ParseError::UnsupportedOperator {
                op: symbol.clone(),
                span: self.span(),
            }
            .into()
        })
    }
}
