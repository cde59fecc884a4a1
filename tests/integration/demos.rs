//! The programs under demos/

use std::path::PathBuf;

use mc::backends::interpreter::Interpreter;
use mc::backends::{Executor, RuntimeValue};
use mc::util::config::CompileConfig;

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

#[test]
fn test_binsearch_checks_pass() {
    let values = mc::run_file(&demo("binsearch.mc"), &CompileConfig::default()).unwrap();
    assert_eq!(values, vec![RuntimeValue::Int(1); 3]);
}

#[test]
fn test_binsearch_computes_square_root() {
    let module = mc::compile_file(&demo("binsearch.mc"), &CompileConfig::default()).unwrap();
    let root = Interpreter::new()
        .execute_function(
            &module,
            "BinarySearch",
            &[
                RuntimeValue::Double(2.0),
                RuntimeValue::Double(1.0),
                RuntimeValue::Double(2.0),
                RuntimeValue::Int(30),
            ],
        )
        .unwrap()
        .as_double()
        .unwrap();
    assert!((root - 2f64.sqrt()).abs() < 1e-8, "got {root}");
}

#[test]
fn test_func_demo() {
    let values = mc::run_file(&demo("func.mc"), &CompileConfig::default()).unwrap();
    let ints: Vec<i64> = values.iter().filter_map(|v| v.as_int()).collect();
    assert_eq!(ints, vec![3, 1, 1, 1, 1]);
}

#[test]
fn test_func_demo_signatures() {
    let module = mc::compile_file(&demo("func.mc"), &CompileConfig::default()).unwrap();
    let ir = module.to_string();
    assert!(ir.contains("define i64 @f1(i64 %x, i64 %y)"));
    assert!(ir.contains("define double @f2(i64 %x, double %y)"));
    assert!(ir.contains("define double @f3(double %x, i64 %y)"));
    assert!(ir.contains("define double @f4(double %x, double %y)"));
    assert!(ir.contains("define double @f5()"));
}
