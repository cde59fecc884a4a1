//! Primary expressions

use crate::frontend::core::lexer::tokens::*;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::parser_state::{ParseError, ParseResult, Parser};
use crate::frontend::typecheck::{Checker, SignatureLookup};

impl Parser<'_> {
    /// primary := literal | identifier-expr | '(' expression ')' | ifExpr
    pub fn parse_primary(
        &mut self,
        sigs: &dyn SignatureLookup,
    ) -> ParseResult<Expr> {
        match &self.current().kind {
            TokenKind::IntLiteral(v) => {
                let lit = Literal::Int(*v);
                self.parse_literal(lit)
            }
            TokenKind::FloatLiteral(v) => {
                let lit = Literal::Double(*v);
                self.parse_literal(lit)
            }
            TokenKind::Identifier(_) => self.parse_identifier_expr(sigs),
            TokenKind::Char('(') => self.parse_paren_expr(sigs),
            TokenKind::KwIf => self.parse_if_expr(sigs),
            other => Err(ParseError::UnexpectedToken {
                found: other.clone(),
                span: self.span(),
            }
            .into()),
        }
    }

    fn parse_literal(
        &mut self,
        lit: Literal,
    ) -> ParseResult<Expr> {
        let span = self.span();
        self.advance()?;
        Ok(Expr::new(ExprKind::Literal(lit), Checker::literal(&lit), span))
    }

    /// '(' expression ')'
    fn parse_paren_expr(
        &mut self,
        sigs: &dyn SignatureLookup,
    ) -> ParseResult<Expr> {
        self.advance()?;
        let expr = self.parse_expression(sigs)?;
        self.expect_char(')')?;
        Ok(expr)
    }

    /// identifier | identifier '(' (expression (',' expression)*)? ')'
    fn parse_identifier_expr(
        &mut self,
        sigs: &dyn SignatureLookup,
    ) -> ParseResult<Expr> {
        let start = self.span();
        let TokenKind::Identifier(name) = self.current().kind.clone() else {
            return Err(self.expected("identifier"));
        };
        self.advance()?;

        if !self.at_char('(') {
            let ty = self.checker(sigs).variable(&name, start)?;
            return Ok(Expr::new(ExprKind::Variable(name), ty, start));
        }

        self.advance()?;
        let mut args = Vec::new();
        if !self.at_char(')') {
            loop {
                args.push(self.parse_expression(sigs)?);
                if self.at_char(')') {
                    break;
                }
                if !self.at_char(',') {
                    return Err(self.expected("')' or ',' in argument list"));
                }
                self.advance()?;
            }
        }
        let end = self.expect_char(')')?;

        let span = start.to(end);
        let ty = self.checker(sigs).call(&name, &args, span)?;
        Ok(Expr::new(ExprKind::Call { callee: name, args }, ty, span))
    }

    /// 'if' expression 'then' expression 'else' expression
    fn parse_if_expr(
        &mut self,
        sigs: &dyn SignatureLookup,
    ) -> ParseResult<Expr> {
        let start = self.span();
        self.advance()?;

        let condition = self.parse_expression(sigs)?;
        self.expect(&TokenKind::KwThen, "'then'")?;
        let then_branch = self.parse_expression(sigs)?;
        self.expect(&TokenKind::KwElse, "'else'")?;
        let else_branch = self.parse_expression(sigs)?;

        let ty = Checker::conditional(&then_branch, &else_branch)?;
        let span = start.to(else_branch.span);
        Ok(Expr::new(
            ExprKind::If {
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            ty,
            span,
        ))
    }
}
