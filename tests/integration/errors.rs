//! Failure reporting and recovery

use mc::frontend::{Compiler, UnitOutcome};
use mc::util::config::CompileConfig;
use mc::util::diagnostic::{Category, TextEmitter};
use mc::util::span::SourceFile;
use mc::Failed;

fn outcomes(source: &str) -> Vec<UnitOutcome> {
    Compiler::new(CompileConfig::default())
        .with_interpreter()
        .compile("test", source)
}

fn categories(source: &str) -> Vec<Option<Category>> {
    outcomes(source)
        .iter()
        .map(|o| o.diagnostic().map(|d| d.category))
        .collect()
}

#[test]
fn test_return_type_mismatch_is_type_error() {
    assert_eq!(categories("def int f(double x) x"), vec![Some(Category::Type)]);
}

#[test]
fn test_mixed_operands_is_type_error() {
    assert_eq!(categories("1 + 2.0"), vec![Some(Category::Type)]);
}

#[test]
fn test_argument_type_is_checked() {
    let results = outcomes("def int add(int a, int b) a+b; add(1, 2.0)");
    assert!(results[0].is_success());
    let diagnostic = results[1].diagnostic().unwrap();
    assert_eq!(diagnostic.category, Category::Type);
    assert!(diagnostic.message.contains("argument 2 of 'add'"));
}

#[test]
fn test_unknown_names() {
    assert_eq!(
        categories("def int f(int x) y; g(1)"),
        vec![Some(Category::Type), Some(Category::Type)]
    );
}

#[test]
fn test_failed_definition_is_absent() {
    let mut compiler = Compiler::new(CompileConfig::default());
    let results = compiler.compile("test", "def int ok() 1; def int bad(int x) x + 1.0");
    assert!(results[0].is_success());
    assert!(!results[1].is_success());
    assert!(compiler.module().get("ok").is_some());
    assert!(compiler.module().get("bad").is_none());
}

#[test]
fn test_errors_do_not_stop_later_units() {
    let results = outcomes("def int f(int x) x +; 1.; 4 * 5");
    let last = results.last().unwrap().unit().unwrap();
    assert_eq!(last.value.map(|v| v.to_string()), Some("20".to_string()));
}

#[test]
fn test_run_collects_every_failure() {
    let err = mc::run("demo.mc", "1 + 2.0; foo(); 3", &CompileConfig::default()).unwrap_err();
    let failed = err.downcast_ref::<Failed>().unwrap();
    assert_eq!(failed.diagnostics.len(), 2);
    assert_eq!(err.to_string(), "2 error(s) in demo.mc");
}

#[test]
fn test_rendered_diagnostic_points_at_source() {
    let source = "def int f(double x) x";
    let results = outcomes(source);
    let diagnostic = results[0].diagnostic().unwrap();
    let file = SourceFile::new("demo.mc", source);
    let text = TextEmitter::plain().render(diagnostic, Some(&file));
    assert!(text.starts_with("error[type]: function 'f' is declared to return int"));
    assert!(text.contains(" --> demo.mc:1:"));
    assert!(text.contains("   1 | def int f(double x) x"));
}
