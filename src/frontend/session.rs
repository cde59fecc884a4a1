//! Driver loop
//!
//! A [`Compiler`] owns everything that outlives one piece of input: the
//! configuration, the code generator's module and an optional executor. A
//! [`Session`] borrows it to compile one source text, unit by unit.
//!
//! Recovery is one token: when parsing a unit fails, the session reports
//! the failure and drops the lookahead token before trying the next unit.

use tracing::{debug, warn};

use crate::backends::interpreter::Interpreter;
use crate::backends::{Executor, RuntimeValue};
use crate::frontend::core::lexer::tokens::TokenKind;
use crate::frontend::core::parser::{Parser, ANON_EXPR_NAME};
use crate::frontend::error::CompileError;
use crate::middle::codegen::CodeGenerator;
use crate::middle::core::ir::Module;
use crate::util::config::CompileConfig;
use crate::util::diagnostic::{Category, Diagnostic, TextEmitter};
use crate::util::span::{SourceFile, Span};

/// What a compiled unit was
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Definition,
    Expression,
}

/// A unit that made it through code generation
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledUnit {
    /// Function name; `__anon_expr` for top-level expressions
    pub name: String,
    pub kind: UnitKind,
    /// IR text of the generated function
    pub ir: String,
    /// Result of evaluating a top-level expression, if an executor ran it
    pub value: Option<RuntimeValue>,
}

/// Result of one top-level unit
#[derive(Debug, Clone, PartialEq)]
pub enum UnitOutcome {
    Success(CompiledUnit),
    Failure(Diagnostic),
}

impl UnitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UnitOutcome::Success(_))
    }

    pub fn unit(&self) -> Option<&CompiledUnit> {
        match self {
            UnitOutcome::Success(unit) => Some(unit),
            UnitOutcome::Failure(_) => None,
        }
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            UnitOutcome::Success(_) => None,
            UnitOutcome::Failure(diagnostic) => Some(diagnostic),
        }
    }
}

/// Long-lived compiler state
pub struct Compiler {
    config: CompileConfig,
    codegen: CodeGenerator,
    executor: Option<Box<dyn Executor>>,
    reporter: Option<TextEmitter>,
}

impl Compiler {
    pub fn new(config: CompileConfig) -> Self {
        let codegen = CodeGenerator::new(config.module_name.clone());
        Self {
            config,
            codegen,
            executor: None,
            reporter: None,
        }
    }

    /// Evaluate top-level expressions with `executor`
    pub fn with_executor(
        mut self,
        executor: Box<dyn Executor>,
    ) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Evaluate top-level expressions with an interpreter bounded by the
    /// configured call depth
    pub fn with_interpreter(self) -> Self {
        let depth = self.config.max_call_depth;
        self.with_executor(Box::new(Interpreter::with_max_depth(depth)))
    }

    /// Write every failure to stderr as it happens
    pub fn with_reporter(
        mut self,
        emitter: TextEmitter,
    ) -> Self {
        self.reporter = Some(emitter);
        self
    }

    pub fn config(&self) -> &CompileConfig {
        &self.config
    }

    pub fn module(&self) -> &Module {
        self.codegen.module()
    }

    pub fn into_module(self) -> Module {
        self.codegen.into_module()
    }

    /// Start compiling `source`
    pub fn session<'a>(
        &'a mut self,
        name: &str,
        source: &'a str,
    ) -> Session<'a> {
        Session::new(self, name, source)
    }

    /// Compile every unit of `source`
    pub fn compile(
        &mut self,
        name: &str,
        source: &str,
    ) -> Vec<UnitOutcome> {
        self.session(name, source).collect()
    }
}

/// One pass over one source text
pub struct Session<'a> {
    compiler: &'a mut Compiler,
    parser: Parser<'a>,
    source: SourceFile,
    /// The lookahead must be refreshed before the next unit
    needs_advance: bool,
}

impl<'a> Session<'a> {
    pub fn new(
        compiler: &'a mut Compiler,
        name: &str,
        source: &'a str,
    ) -> Self {
        let parser = Parser::new(source, compiler.config.precedence.clone());
        Self {
            compiler,
            parser,
            source: SourceFile::new(name, source),
            needs_advance: true,
        }
    }

    /// Compile the next top-level unit; `None` at end of input
    pub fn next_unit(&mut self) -> Option<UnitOutcome> {
        loop {
            if self.needs_advance {
                if let Err(e) = self.parser.advance() {
                    warn!("skipping malformed input at {}", e.span().start);
                    return Some(self.report(e.into()));
                }
                self.needs_advance = false;
            }

            match self.parser.current().kind {
                TokenKind::Eof => return None,
                TokenKind::Char(';') => self.needs_advance = true,
                TokenKind::KwDef => return Some(self.handle_definition()),
                _ => return Some(self.handle_top_level_expr()),
            }
        }
    }

    fn handle_definition(&mut self) -> UnitOutcome {
        debug!("unit: definition at {}", self.parser.span().start);
        let def = match self.parser.parse_definition(self.compiler.codegen.module()) {
            Ok(def) => def,
            Err(e) => return self.report(e),
        };

        let name = def.proto.name.clone();
        let ir = match self.compiler.codegen.generate_function(def) {
            Ok(function) => function.to_string(),
            Err(e) => return self.report(e.into()),
        };
        self.dump(&ir);
        debug!("unit: defined @{}", name);

        UnitOutcome::Success(CompiledUnit {
            name,
            kind: UnitKind::Definition,
            ir,
            value: None,
        })
    }

    fn handle_top_level_expr(&mut self) -> UnitOutcome {
        debug!("unit: expression at {}", self.parser.span().start);
        let def = match self
            .parser
            .parse_top_level_expr(self.compiler.codegen.module())
        {
            Ok(def) => def,
            Err(e) => return self.report(e),
        };

        let span = def.proto.span;
        let ir = match self.compiler.codegen.generate_function(def) {
            Ok(function) => function.to_string(),
            Err(e) => return self.report(e.into()),
        };
        self.dump(&ir);

        let evaluated = self.evaluate(span);
        self.compiler.codegen.remove_function(ANON_EXPR_NAME);
        debug!("unit: expression done");

        match evaluated {
            Ok(value) => UnitOutcome::Success(CompiledUnit {
                name: ANON_EXPR_NAME.to_string(),
                kind: UnitKind::Expression,
                ir,
                value,
            }),
            Err(diagnostic) => self.emit(diagnostic),
        }
    }

    fn evaluate(
        &mut self,
        span: Span,
    ) -> Result<Option<RuntimeValue>, Diagnostic> {
        let Some(executor) = self.compiler.executor.as_mut() else {
            return Ok(None);
        };
        executor
            .execute_function(self.compiler.codegen.module(), ANON_EXPR_NAME, &[])
            .map(Some)
            .map_err(|e| Diagnostic::error(Category::Runtime, e.to_string(), Some(span)))
    }

    /// Turn a failure into an outcome, arranging the one-token skip for
    /// failures before code generation
    fn report(
        &mut self,
        err: CompileError,
    ) -> UnitOutcome {
        if err.is_frontend() {
            warn!("recovering: skipping {}", self.parser.current().kind);
            self.needs_advance = true;
        }
        self.emit(err.to_diagnostic())
    }

    fn emit(
        &self,
        diagnostic: Diagnostic,
    ) -> UnitOutcome {
        if let Some(emitter) = &self.compiler.reporter {
            eprint!("{}", emitter.render(&diagnostic, Some(&self.source)));
        }
        UnitOutcome::Failure(diagnostic)
    }

    fn dump(
        &self,
        ir: &str,
    ) {
        if self.compiler.config.dump_ir {
            eprint!("{}", ir);
        }
    }
}

impl Iterator for Session<'_> {
    type Item = UnitOutcome;

    fn next(&mut self) -> Option<UnitOutcome> {
        self.next_unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> Vec<UnitOutcome> {
        Compiler::new(CompileConfig::default())
            .with_interpreter()
            .compile("test", source)
    }

    fn value(outcome: &UnitOutcome) -> Option<RuntimeValue> {
        outcome.unit().and_then(|u| u.value)
    }

    fn category(outcome: &UnitOutcome) -> Option<Category> {
        outcome.diagnostic().map(|d| d.category)
    }

    #[test]
    fn test_definition_then_call() {
        let outcomes = run("def int add(int a, int b) a+b; add(1, 2)");
        assert_eq!(outcomes.len(), 2);
        let def = outcomes[0].unit().unwrap();
        assert_eq!(def.kind, UnitKind::Definition);
        assert_eq!(def.name, "add");
        assert!(def.ir.starts_with("define i64 @add(i64 %a, i64 %b) {"));
        assert_eq!(value(&outcomes[1]), Some(RuntimeValue::Int(3)));
    }

    #[test]
    fn test_anonymous_function_is_removed() {
        let mut compiler = Compiler::new(CompileConfig::default()).with_interpreter();
        let outcomes = compiler.compile("test", "def int one() 1; one(); one() + 1");
        assert!(outcomes.iter().all(UnitOutcome::is_success));
        assert_eq!(value(&outcomes[2]), Some(RuntimeValue::Int(2)));
        assert!(compiler.module().get(ANON_EXPR_NAME).is_none());
        assert_eq!(compiler.module().len(), 1);
    }

    #[test]
    fn test_without_executor_nothing_is_evaluated() {
        let outcomes = Compiler::new(CompileConfig::default()).compile("test", "2+3");
        let unit = outcomes[0].unit().unwrap();
        assert_eq!(unit.kind, UnitKind::Expression);
        assert_eq!(unit.value, None);
    }

    #[test]
    fn test_syntax_error_skips_one_token() {
        let outcomes = run("1 + ; 2");
        assert_eq!(outcomes.len(), 2);
        assert_eq!(category(&outcomes[0]), Some(Category::Syntax));
        assert_eq!(value(&outcomes[1]), Some(RuntimeValue::Int(2)));
    }

    #[test]
    fn test_lexical_error_recovers() {
        let outcomes = run("1.; 2");
        assert_eq!(category(&outcomes[0]), Some(Category::Lexical));
        assert_eq!(value(outcomes.last().unwrap()), Some(RuntimeValue::Int(2)));
    }

    #[test]
    fn test_type_error_recovers() {
        let outcomes = run("1 + 2.0; 3");
        assert_eq!(outcomes.len(), 2);
        assert_eq!(category(&outcomes[0]), Some(Category::Type));
        assert_eq!(value(&outcomes[1]), Some(RuntimeValue::Int(3)));
    }

    #[test]
    fn test_error_at_end_of_input() {
        let outcomes = run("1 +");
        assert_eq!(outcomes.len(), 1);
        assert_eq!(category(&outcomes[0]), Some(Category::Syntax));
    }

    #[test]
    fn test_redefinition_keeps_first_body() {
        let outcomes = run("def int f() 1; def int f() 2; f()");
        assert_eq!(outcomes.len(), 3);
        assert_eq!(category(&outcomes[1]), Some(Category::Type));
        assert_eq!(value(&outcomes[2]), Some(RuntimeValue::Int(1)));
    }

    #[test]
    fn test_runtime_errors_are_diagnostics() {
        let outcomes = run("def int d(int x) 1 / x; d(0)");
        let diagnostic = outcomes[1].diagnostic().unwrap();
        assert_eq!(diagnostic.category, Category::Runtime);
        assert!(diagnostic.message.contains("division by zero"));
    }

    #[test]
    fn test_call_depth_is_bounded() {
        let config = CompileConfig::default().with_max_call_depth(16);
        let mut compiler = Compiler::new(config).with_interpreter();
        let outcomes = compiler.compile("test", "def int r(int n) r(n); r(1)");
        let diagnostic = outcomes[1].diagnostic().unwrap();
        assert!(diagnostic.message.contains("stack overflow"));
        assert!(compiler.module().get(ANON_EXPR_NAME).is_none());
    }

    #[test]
    fn test_definitions_persist_across_sessions() {
        let mut compiler = Compiler::new(CompileConfig::default()).with_interpreter();
        compiler.compile("line1", "def double half(double x) x / 2.0");
        let outcomes = compiler.compile("line2", "if half(3.0) > 1.0 then 10 else 20");
        assert_eq!(value(&outcomes[0]), Some(RuntimeValue::Int(10)));
    }

    #[test]
    fn test_empty_input() {
        assert!(run("").is_empty());
        assert!(run(";;; # only a comment\n").is_empty());
    }
}
