//! Keyword recognition

use crate::frontend::core::lexer::tokens::TokenKind;

/// Reserved words of the language
pub const KEYWORDS: [&str; 6] = ["def", "if", "then", "else", "int", "double"];

/// Convert an identifier-shaped word to its keyword token, if reserved
pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
    match s {
        "def" => Some(TokenKind::KwDef),
        "if" => Some(TokenKind::KwIf),
        "then" => Some(TokenKind::KwThen),
        "else" => Some(TokenKind::KwElse),
        // type names
        "int" => Some(TokenKind::KwInt),
        "double" => Some(TokenKind::KwDouble),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_keyword_is_recognized() {
        for kw in KEYWORDS {
            assert!(keyword_from_str(kw).is_some(), "{kw} should be reserved");
        }
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(keyword_from_str("Def"), None);
        assert_eq!(keyword_from_str("definition"), None);
    }
}
