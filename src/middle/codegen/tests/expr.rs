//! Expression lowering tests

use super::function_ir;

#[cfg(test)]
mod codegen_expr_tests {
    use super::*;

    #[test]
    fn test_int_arithmetic() {
        assert_eq!(
            function_ir("def int add(int a, int b) a+b", "add"),
            "define i64 @add(i64 %a, i64 %b) {\n\
             entry:\n  \
             %int_add = add i64 %a, %b\n  \
             ret i64 %int_add\n\
             }\n"
        );
    }

    #[test]
    fn test_double_arithmetic() {
        let ir = function_ir("def double f(double x) x * 2.0 - x / 4.0", "f");
        assert!(ir.contains("%double_mul = fmul double %x, 2.000000e+00"));
        assert!(ir.contains("%double_div = fdiv double %x, 4.000000e+00"));
        assert!(ir.contains("%double_sub = fsub double %double_mul, %double_div"));
        assert!(ir.contains("ret double %double_sub"));
    }

    #[test]
    fn test_int_division_is_signed() {
        let ir = function_ir("def int f(int a) a / 2", "f");
        assert!(ir.contains("%int_div = sdiv i64 %a, 2"));
    }

    #[test]
    fn test_int_comparison_is_widened_with_zext() {
        let ir = function_ir("def int lt(int a, int b) a < b", "lt");
        assert!(ir.contains("%int_less_than = icmp slt i64 %a, %b"));
        assert!(ir.contains("%bool_to_int = zext i1 %int_less_than to i64"));
        assert!(ir.contains("ret i64 %bool_to_int"));
    }

    #[test]
    fn test_double_comparison_is_widened_with_uitofp() {
        let ir = function_ir("def double ge(double a, double b) a >= b", "ge");
        assert!(ir.contains("%double_equal_or_greater_than = fcmp uge double %a, %b"));
        assert!(ir.contains("uitofp i1 %double_equal_or_greater_than to double"));
    }

    #[test]
    fn test_repeated_names_are_suffixed() {
        let ir = function_ir("def int f(int a) a + a + a", "f");
        assert!(ir.contains("%int_add = add i64 %a, %a"));
        assert!(ir.contains("%int_add1 = add i64 %int_add, %a"));
        assert!(ir.contains("ret i64 %int_add1"));
    }

    #[test]
    fn test_call_lowering() {
        let ir = function_ir("def int add(int a, int b) a+b; def int g() add(1, 2)", "g");
        assert!(ir.contains("%calltmp = call i64 @add(i64 1, i64 2)"));
    }

    #[test]
    fn test_mixed_argument_types_in_call() {
        let ir = function_ir(
            "def double mix(int n, double x) x; def double g(double y) mix(3, y)",
            "g",
        );
        assert!(ir.contains("call double @mix(i64 3, double %y)"));
    }

    #[test]
    fn test_top_level_expression_function() {
        let ir = function_ir("2+3*4", "__anon_expr");
        assert!(ir.starts_with("define i64 @__anon_expr() {"));
        assert!(ir.contains("%int_mul = mul i64 3, 4"));
        assert!(ir.contains("%int_add = add i64 2, %int_mul"));
    }
}
