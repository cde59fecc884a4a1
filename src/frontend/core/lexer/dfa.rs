//! Numeric literal recognizer
//!
//! An explicit deterministic automaton over the literal grammar
//!
//! ```text
//! [0-9]+ | [0-9]*'.'[0-9]+    optionally followed by    ('e'|'E')('+'|'-')?[0-9]+
//! ```
//!
//! The automaton is fed one character at a time. A rejected character is
//! not consumed, so the tokenizer can re-offer it to the general scanner.

use thiserror::Error;

/// Automaton states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DfaState {
    /// Nothing read yet
    Start,
    /// `[0-9]+` (accepting, Int)
    IntegerDigits,
    /// A `.` that still needs a fraction digit
    DotSeen,
    /// `...'.'[0-9]+` (accepting, Double)
    FractionDigits,
    /// `e`/`E` read, sign or digit required
    ExponentMarker,
    /// Exponent sign read, digit required
    ExponentSign,
    /// Exponent digits (accepting, Double)
    ExponentDigits,
}

/// Value of an accepted literal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericValue {
    Int(i64),
    Double(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DfaError {
    #[error("input is not a complete numeric literal")]
    NotAccepted,
    #[error("integer literal does not fit in 64 bits")]
    OutOfRange,
}

/// Numeric literal automaton
#[derive(Debug, Clone)]
pub struct NumericDfa {
    state: DfaState,
    text: String,
}

impl Default for NumericDfa {
    fn default() -> Self {
        Self::new()
    }
}

impl NumericDfa {
    pub fn new() -> Self {
        Self {
            state: DfaState::Start,
            text: String::new(),
        }
    }

    /// Try to extend the literal with `c`.
    ///
    /// Returns `false`, leaving the automaton untouched, when `c` cannot
    /// continue a numeric literal from the current state.
    pub fn read(
        &mut self,
        c: char,
    ) -> bool {
        use DfaState::*;

        let next = match (self.state, c) {
            (Start, '0'..='9') => IntegerDigits,
            (Start, '.') => DotSeen,
            (IntegerDigits, '0'..='9') => IntegerDigits,
            (IntegerDigits, '.') => DotSeen,
            (IntegerDigits, 'e' | 'E') => ExponentMarker,
            (DotSeen, '0'..='9') => FractionDigits,
            (FractionDigits, '0'..='9') => FractionDigits,
            (FractionDigits, 'e' | 'E') => ExponentMarker,
            (ExponentMarker, '+' | '-') => ExponentSign,
            (ExponentMarker, '0'..='9') => ExponentDigits,
            (ExponentSign, '0'..='9') => ExponentDigits,
            (ExponentDigits, '0'..='9') => ExponentDigits,
            _ => return false,
        };

        self.state = next;
        self.text.push(c);
        true
    }

    /// Feed every character of `input`, stopping at the first rejection.
    /// Returns the number of characters consumed.
    pub fn read_str(
        &mut self,
        input: &str,
    ) -> usize {
        input.chars().take_while(|&c| self.read(c)).count()
    }

    pub fn state(&self) -> DfaState {
        self.state
    }

    /// Text consumed so far
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_accepted(&self) -> bool {
        self.is_integer() || self.is_double()
    }

    pub fn is_integer(&self) -> bool {
        self.state == DfaState::IntegerDigits
    }

    pub fn is_double(&self) -> bool {
        matches!(
            self.state,
            DfaState::FractionDigits | DfaState::ExponentDigits
        )
    }

    /// Parse the accumulated text according to the accepting state
    pub fn value(&self) -> Result<NumericValue, DfaError> {
        if self.is_integer() {
            self.text
                .parse::<i64>()
                .map(NumericValue::Int)
                .map_err(|_| DfaError::OutOfRange)
        } else if self.is_double() {
            // the automaton only accepts strings in f64's grammar
            self.text
                .parse::<f64>()
                .map(NumericValue::Double)
                .map_err(|_| DfaError::NotAccepted)
        } else {
            Err(DfaError::NotAccepted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> NumericDfa {
        let mut dfa = NumericDfa::new();
        dfa.read_str(input);
        dfa
    }

    #[test]
    fn test_integer_is_accepted_as_int() {
        let dfa = run("42");
        assert!(dfa.is_accepted());
        assert!(dfa.is_integer());
        assert!(!dfa.is_double());
        assert_eq!(dfa.value(), Ok(NumericValue::Int(42)));
    }

    #[test]
    fn test_fraction_forms_are_double() {
        assert_eq!(run("3.25").value(), Ok(NumericValue::Double(3.25)));
        assert_eq!(run(".5").value(), Ok(NumericValue::Double(0.5)));
    }

    #[test]
    fn test_exponent_forms_are_double() {
        assert_eq!(run("1e3").value(), Ok(NumericValue::Double(1000.0)));
        assert_eq!(run("2.5E-2").value(), Ok(NumericValue::Double(0.025)));
        assert_eq!(run(".5e+1").value(), Ok(NumericValue::Double(5.0)));
    }

    #[test]
    fn test_incomplete_literals_are_rejected() {
        for input in ["", ".", "1.", "1.e5", "1e", "1e+", "2.5E-", ".e5"] {
            let dfa = run(input);
            assert!(!dfa.is_accepted(), "{input:?} should not be accepted");
            assert_eq!(dfa.value(), Err(DfaError::NotAccepted));
        }
    }

    #[test]
    fn test_rejected_char_leaves_state_unchanged() {
        let mut dfa = NumericDfa::new();
        assert!(dfa.read('7'));
        assert!(!dfa.read('x'));
        assert_eq!(dfa.state(), DfaState::IntegerDigits);
        assert_eq!(dfa.text(), "7");

        assert!(!dfa.read('+'));
        assert_eq!(dfa.text(), "7");
    }

    #[test]
    fn test_read_str_stops_at_first_rejection() {
        let mut dfa = NumericDfa::new();
        assert_eq!(dfa.read_str("12.5+3"), 4);
        assert_eq!(dfa.text(), "12.5");
        assert!(dfa.is_double());
    }

    #[test]
    fn test_second_dot_is_not_consumed() {
        let mut dfa = NumericDfa::new();
        assert_eq!(dfa.read_str("1.2.3"), 3);
        assert_eq!(dfa.value(), Ok(NumericValue::Double(1.2)));
    }

    #[test]
    fn test_integer_overflow_is_reported() {
        let dfa = run("99999999999999999999");
        assert!(dfa.is_integer());
        assert_eq!(dfa.value(), Err(DfaError::OutOfRange));
    }
}
