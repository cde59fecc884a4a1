//! Definition and prototype parsing

use crate::frontend::core::lexer::tokens::*;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::parser_state::{ParseResult, Parser};
use crate::frontend::typecheck::{Checker, NumType, SignatureLookup, TypeEnvironment};

impl Parser<'_> {
    /// definition := 'def' prototype expression
    ///
    /// `sigs` supplies the signatures of functions compiled so far. The
    /// function being defined is visible to its own body.
    pub fn parse_definition(
        &mut self,
        sigs: &dyn SignatureLookup,
    ) -> ParseResult<FunctionDef> {
        self.expect(&TokenKind::KwDef, "'def'")?;
        let proto = self.parse_prototype()?;

        self.env = TypeEnvironment::from_prototype(&proto)?;
        self.proto = Some(proto.clone());
        let body = self.parse_expression(sigs);
        self.leave_function();
        let body = body?;

        Checker::definition(&proto, &body)?;
        Ok(FunctionDef { proto, body })
    }

    /// Wrap a top-level expression in a nullary `int` function
    pub fn parse_top_level_expr(
        &mut self,
        sigs: &dyn SignatureLookup,
    ) -> ParseResult<FunctionDef> {
        self.env = TypeEnvironment::new();
        self.proto = None;
        let body = self.parse_expression(sigs)?;

        let proto = Prototype::anonymous(body.span);
        Checker::definition(&proto, &body)?;
        Ok(FunctionDef { proto, body })
    }

    /// prototype := returnType identifier '(' (type identifier (',' type identifier)*)? ')'
    pub fn parse_prototype(&mut self) -> ParseResult<Prototype> {
        let start = self.span();
        let return_type = self.parse_type("return type ('int' or 'double')")?;

        let TokenKind::Identifier(name) = self.current().kind.clone() else {
            return Err(self.expected("function name in prototype"));
        };
        self.advance()?;
        self.expect_char('(')?;

        let mut params = Vec::new();
        if !self.at_char(')') {
            loop {
                let ty_span = self.span();
                let ty = self.parse_type("parameter type ('int' or 'double')")?;
                let TokenKind::Identifier(param) = self.current().kind.clone() else {
                    return Err(self.expected("parameter name"));
                };
                let span = ty_span.to(self.span());
                self.advance()?;
                params.push(Param {
                    name: param,
                    ty,
                    span,
                });

                if !self.at_char(',') {
                    break;
                }
                self.advance()?;
            }
        }
        let end = self.expect_char(')')?;

        Ok(Prototype {
            name,
            params,
            return_type,
            span: start.to(end),
        })
    }

    fn parse_type(
        &mut self,
        what: &str,
    ) -> ParseResult<NumType> {
        let ty = match self.current().kind {
            TokenKind::KwInt => NumType::Int,
            TokenKind::KwDouble => NumType::Double,
            _ => return Err(self.expected(what)),
        };
        self.advance()?;
        Ok(ty)
    }

    fn leave_function(&mut self) {
        self.env = TypeEnvironment::new();
        self.proto = None;
    }
}
