//! Typing rule tests

use super::{double, int, proto};
use crate::frontend::core::parser::ast::BinOp;
use crate::frontend::typecheck::{
    Checker, NoSignatures, NumType, Signature, TypeEnvironment, TypeError,
};
use crate::util::span::Span;
use indexmap::IndexMap;

#[cfg(test)]
mod rules_tests {
    use super::*;

    #[test]
    fn test_binary_same_types() {
        assert_eq!(Checker::binary(BinOp::Add, &int(1), &int(2)), Ok(NumType::Int));
        assert_eq!(
            Checker::binary(BinOp::Mul, &double(1.0), &double(2.0)),
            Ok(NumType::Double)
        );
    }

    #[test]
    fn test_comparison_keeps_operand_type() {
        assert_eq!(Checker::binary(BinOp::Lt, &int(1), &int(2)), Ok(NumType::Int));
        assert_eq!(
            Checker::binary(BinOp::Ne, &double(1.0), &double(2.0)),
            Ok(NumType::Double)
        );
    }

    #[test]
    fn test_no_implicit_widening() {
        for (lhs, rhs) in [(int(1), double(2.0)), (double(1.0), int(2))] {
            let err = Checker::binary(BinOp::Add, &lhs, &rhs).unwrap_err();
            assert!(matches!(err, TypeError::MixedOperands { .. }));
            assert!(err.to_string().contains("'+'"));
        }
    }

    #[test]
    fn test_conditional_branches() {
        assert_eq!(Checker::conditional(&int(1), &int(2)), Ok(NumType::Int));
        assert!(matches!(
            Checker::conditional(&int(1), &double(2.0)),
            Err(TypeError::MixedBranches {
                then_ty: NumType::Int,
                else_ty: NumType::Double,
                ..
            })
        ));
    }

    #[test]
    fn test_definition_return_type() {
        let f = proto("f", &[], NumType::Double);
        assert!(Checker::definition(&f, &double(1.0)).is_ok());
        let err = Checker::definition(&f, &int(1)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "function 'f' is declared to return double but its body is int"
        );
    }

    #[test]
    fn test_variable_lookup() {
        let env = TypeEnvironment::from_prototype(&proto(
            "f",
            &[("x", NumType::Double)],
            NumType::Double,
        ))
        .unwrap();
        let checker = Checker::new(&env, &NoSignatures, None);
        assert_eq!(checker.variable("x", Span::dummy()), Ok(NumType::Double));
        assert!(matches!(
            checker.variable("y", Span::dummy()),
            Err(TypeError::UnknownVariable { .. })
        ));
    }

    #[test]
    fn test_call_checks_arguments_in_order() {
        let mut sigs = IndexMap::new();
        sigs.insert(
            "mix".to_string(),
            Signature::new(vec![NumType::Int, NumType::Double], NumType::Double),
        );
        let env = TypeEnvironment::new();
        let checker = Checker::new(&env, &sigs, None);

        assert_eq!(
            checker.call("mix", &[int(1), double(2.0)], Span::dummy()),
            Ok(NumType::Double)
        );

        let err = checker
            .call("mix", &[double(1.0), double(2.0)], Span::dummy())
            .unwrap_err();
        assert!(matches!(err, TypeError::ArgumentType { index: 0, .. }));
        assert_eq!(err.to_string(), "argument 1 of 'mix' must be int, found double");
    }

    #[test]
    fn test_call_sees_current_prototype() {
        let current = proto("rec", &[("n", NumType::Int)], NumType::Int);
        let env = TypeEnvironment::from_prototype(&current).unwrap();

        let inside = Checker::new(&env, &NoSignatures, Some(&current));
        assert_eq!(inside.call("rec", &[int(1)], Span::dummy()), Ok(NumType::Int));

        let outside = Checker::new(&env, &NoSignatures, None);
        assert!(matches!(
            outside.call("rec", &[int(1)], Span::dummy()),
            Err(TypeError::UnknownFunction { .. })
        ));
    }
}
