//! Configuration flowing into the pipeline

use mc::backends::RuntimeValue;
use mc::util::config::{CompileConfig, PrecedenceTable};

#[test]
fn test_precedence_table_from_toml() {
    // additive binds tighter than multiplicative
    let config = CompileConfig::from_toml_str(
        r#"
        [precedence]
        "+" = 40
        "-" = 40
        "*" = 20
        "/" = 20
        "#,
    )
    .unwrap();
    let values = mc::run("test", "2*3+4", &config).unwrap();
    assert_eq!(values, vec![RuntimeValue::Int(14)]);
}

#[test]
fn test_operator_missing_from_table_ends_expression() {
    let config =
        CompileConfig::default().with_precedence(PrecedenceTable::empty().with("+", 20));
    // `*` halts the expression, so `2*3` cannot be parsed as one unit
    assert!(mc::run("test", "2*3", &config).is_err());
    assert_eq!(
        mc::run("test", "2+3", &config).unwrap(),
        vec![RuntimeValue::Int(5)]
    );
}

#[test]
fn test_module_name() {
    let config = CompileConfig::default().with_module_name("demo");
    let module = mc::compile("test", "def int one() 1", &config).unwrap();
    assert!(module.to_string().starts_with("; ModuleID = 'demo'"));
}

#[test]
fn test_call_depth_from_config() {
    let source = "def int count(int n) if n == 0 then 0 else 1 + count(n - 1); count(100)";
    let shallow = CompileConfig::default().with_max_call_depth(50);
    assert!(mc::run("test", source, &shallow).is_err());
    let deep = CompileConfig::default().with_max_call_depth(200);
    assert_eq!(mc::run("test", source, &deep).unwrap(), vec![RuntimeValue::Int(100)]);
}
