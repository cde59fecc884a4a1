//! Whole-pipeline properties

use mc::frontend::core::lexer::{tokenize, TokenKind};
use mc::util::config::CompileConfig;
use proptest::prelude::*;
use quickcheck::quickcheck;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_whitespace_and_comments_do_not_change_tokens() {
    assert_eq!(kinds("1 + 2 # trailing comment\n"), kinds("1+2"));
}

#[test]
fn test_compilation_is_deterministic() {
    let source = std::fs::read_to_string(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/demos/binsearch.mc"
    ))
    .unwrap();
    let config = CompileConfig::default();
    let first = mc::compile("binsearch", &source, &config).unwrap().to_string();
    let second = mc::compile("binsearch", &source, &config).unwrap().to_string();
    assert_eq!(first, second);
}

quickcheck! {
    fn prop_integer_literals_round_trip(n: u32) -> bool {
        kinds(&n.to_string()) == vec![TokenKind::IntLiteral(i64::from(n)), TokenKind::Eof]
    }
}

proptest! {
    #[test]
    fn prop_arithmetic_matches_host(a in 0i64..1000, b in 0i64..1000, c in 1i64..100) {
        let source = format!("{a} + {b} * {c} - {a} / {c}");
        let values = mc::run("prop", &source, &CompileConfig::default()).unwrap();
        prop_assert_eq!(values[0].as_int(), Some(a + b * c - a / c));
    }

    #[test]
    fn prop_conditional_selects_by_nonzero(cond in -5i64..5, x in 0i64..100, y in 0i64..100) {
        // there are no negative literals
        let cond_src = if cond < 0 { format!("(0 - {})", -cond) } else { cond.to_string() };
        let source = format!("if {cond_src} then {x} else {y}");
        let values = mc::run("prop", &source, &CompileConfig::default()).unwrap();
        let expected = if cond != 0 { x } else { y };
        prop_assert_eq!(values[0].as_int(), Some(expected));
    }
}
