//! End-to-end evaluation through the public API

use mc::backends::RuntimeValue;
use mc::util::config::CompileConfig;

fn eval(source: &str) -> Vec<i64> {
    mc::run("test", source, &CompileConfig::default())
        .unwrap_or_else(|e| panic!("{source:?} failed: {e:?}"))
        .into_iter()
        .map(|v| match v {
            RuntimeValue::Int(i) => i,
            other => panic!("expected int, got {other}"),
        })
        .collect()
}

#[test]
fn test_precedence() {
    assert_eq!(eval("2+3*4; 2*3+4; 10-3-2"), vec![14, 10, 5]);
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(eval("(2+3)*4; 10-(3-2)"), vec![20, 9]);
}

#[test]
fn test_comparisons_yield_zero_or_one() {
    assert_eq!(
        eval("1 < 2; 2 < 1; 3 <= 3; 4 >= 5; 7 == 7; 7 != 7"),
        vec![1, 0, 1, 0, 1, 0]
    );
}

#[test]
fn test_conditional() {
    assert_eq!(eval("if 1 then 2 else 3; if 0 then 2 else 3"), vec![2, 3]);
}

#[test]
fn test_calls() {
    assert_eq!(eval("def int add(int a, int b) a+b; add(1,2)"), vec![3]);
}

#[test]
fn test_recursion() {
    let source = "def int fact(int n) if n < 2 then 1 else n * fact(n - 1); fact(10)";
    assert_eq!(eval(source), vec![3628800]);
}

#[test]
fn test_deep_recursion_within_call_depth_bound() {
    // runs in a test thread, whose stack is far smaller than the main one
    assert_eq!(
        eval("def int r(int n) if n == 0 then 0 else 1 + r(n - 1); r(1000)"),
        vec![1000]
    );
}

#[test]
fn test_mutual_use_of_earlier_definitions() {
    let source = "
        def int sq(int x) x * x;
        def int sumsq(int a, int b) sq(a) + sq(b);
        sumsq(3, 4)
    ";
    assert_eq!(eval(source), vec![25]);
}

#[test]
fn test_double_functions_feed_int_results() {
    let source = "
        def double avg(double a, double b) (a + b) / 2.0;
        if avg(1.0, 2.0) == 1.5 then 1 else 0
    ";
    assert_eq!(eval(source), vec![1]);
}

#[test]
fn test_integer_division_truncates() {
    assert_eq!(eval("7 / 2; 0 - 7 / 2"), vec![3, -3]);
}

#[test]
fn test_compile_keeps_only_definitions() {
    let module = mc::compile(
        "test",
        "def int one() 1; one() + 1; def int two() 2",
        &CompileConfig::default(),
    )
    .unwrap();
    let names: Vec<&str> = module.functions().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["one", "two"]);
}
