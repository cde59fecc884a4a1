//! Parameter table and signature tests

use super::proto;
use crate::frontend::typecheck::{NumType, Signature, TypeEnvironment, TypeError};

#[cfg(test)]
mod environment_tests {
    use super::*;

    #[test]
    fn test_environment_binds_parameters() {
        let env = TypeEnvironment::from_prototype(&proto(
            "f",
            &[("a", NumType::Int), ("b", NumType::Double)],
            NumType::Int,
        ))
        .unwrap();
        assert_eq!(env.len(), 2);
        assert_eq!(env.lookup("a"), Some(NumType::Int));
        assert_eq!(env.lookup("b"), Some(NumType::Double));
        assert_eq!(env.lookup("c"), None);
    }

    #[test]
    fn test_environment_rejects_duplicates() {
        let err = TypeEnvironment::from_prototype(&proto(
            "g",
            &[("a", NumType::Int), ("a", NumType::Int)],
            NumType::Int,
        ))
        .unwrap_err();
        assert_eq!(
            err,
            TypeError::DuplicateParameter {
                function: "g".into(),
                param: "a".into(),
                span: Default::default(),
            }
        );
    }

    #[test]
    fn test_signature_from_prototype() {
        let p = proto("h", &[("x", NumType::Double)], NumType::Int);
        assert_eq!(
            Signature::from(&p),
            Signature::new(vec![NumType::Double], NumType::Int)
        );
    }
}
