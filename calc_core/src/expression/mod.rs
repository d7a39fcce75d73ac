//! # Expression Evaluator
//!
//! Turns the text shown on the calculator display into a number.
//!
//! Evaluation is a pure function of the input string:
//!
//! 1. [`preprocess`] rewrites keypad glyphs, constants, function names and
//!    factorials into plain arithmetic text
//! 2. [`parser`] evaluates that text with a restricted recursive-descent
//!    parser (`+ - * / **`, parentheses and six math functions, nothing else)
//! 3. [`format`] normalizes the value for display
//!
//! ## Example
//!
//! ```rust
//! use calc_core::expression::evaluate;
//! use calc_core::errors::MathErrorKind;
//!
//! assert_eq!(evaluate("2+3×4").unwrap().display, "14");
//! assert_eq!(evaluate("1÷3").unwrap().display, "0.33333333");
//! assert_eq!(evaluate("10!").unwrap().display, "3628800");
//!
//! let err = evaluate("ln(-1)").unwrap_err();
//! assert_eq!(err.math_kind(), Some(MathErrorKind::Domain));
//! ```

pub mod format;
pub mod parser;
pub mod preprocess;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult, MathErrorKind};

pub use format::format_result;
pub use preprocess::{factorial, preprocess};

/// A successfully evaluated expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Expression text as typed
    pub expression: String,
    /// Raw numeric value (always finite)
    pub value: f64,
    /// Normalized display text
    pub display: String,
}

/// Outcome of evaluating one expression
pub type EvaluationResult = CalcResult<Evaluation>;

/// Evaluate calculator display text.
///
/// Fails with [`CalcError::MathEvaluation`] on malformed input or when the
/// result is not a finite number.
pub fn evaluate(expression: &str) -> EvaluationResult {
    let prepared = preprocess(expression);
    tracing::debug!(expression, prepared = %prepared, "evaluating expression");

    let outcome = parser::evaluate_prepared(&prepared)
        .map_err(|e| CalcError::math(expression, MathErrorKind::Parse, e.to_string()))?;

    if !outcome.value.is_finite() {
        let kind = if outcome.saw_domain_fault {
            MathErrorKind::Domain
        } else if outcome.saw_zero_divisor {
            MathErrorKind::DivisionByZero
        } else {
            MathErrorKind::Overflow
        };
        return Err(CalcError::math(
            expression,
            kind,
            format!("result is {}", outcome.value),
        ));
    }

    Ok(Evaluation {
        expression: expression.to_string(),
        value: outcome.value,
        display: format_result(outcome.value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display(expr: &str) -> String {
        evaluate(expr).unwrap().display
    }

    fn kind(expr: &str) -> MathErrorKind {
        evaluate(expr).unwrap_err().math_kind().unwrap()
    }

    #[test]
    fn test_standard_precedence() {
        assert_eq!(display("2+3*4"), "14");
        assert_eq!(display("2+3×4"), "14");
        assert_eq!(display("8÷2-1"), "3");
    }

    #[test]
    fn test_factorials() {
        assert_eq!(display("0!"), "1");
        assert_eq!(display("5!"), "120");
        assert_eq!(display("10!"), "3628800");
        assert_eq!(display("3!+1"), "7");
    }

    #[test]
    fn test_integer_and_fraction_display() {
        assert_eq!(display("4/2"), "2");
        assert_eq!(display("1/3"), "0.33333333");
        assert_eq!(display("0.1+0.2"), "0.3");
    }

    #[test]
    fn test_percent_is_literal_division() {
        // The `%` key inserts `/100`
        assert_eq!(display("50/100"), "0.5");
    }

    #[test]
    fn test_scientific_functions() {
        assert_eq!(display("√(16)"), "4");
        assert_eq!(display("log(1000)"), "3");
        assert_eq!(display("ln(e)"), "1");
        assert_eq!(display("sin(0)"), "0");
        assert_eq!(display("cos(π)"), "-1");
        assert_eq!(display("2**10"), "1024");
    }

    #[test]
    fn test_constants_substitute_literally() {
        assert_eq!(display("π"), "3.14159265");
        // Digit followed by π concatenates literally
        assert_eq!(display("2π"), "23.14159265");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(kind("1/0"), MathErrorKind::DivisionByZero);
        assert_eq!(kind("0/0"), MathErrorKind::DivisionByZero);
        assert_eq!(kind("ln(-1)"), MathErrorKind::Domain);
        assert_eq!(kind("√(-4)"), MathErrorKind::Domain);
        assert_eq!(kind("log(0)"), MathErrorKind::Domain);
        assert_eq!(kind("171!"), MathErrorKind::Overflow);
        assert_eq!(kind("2++"), MathErrorKind::Parse);
        assert_eq!(kind("√9"), MathErrorKind::Parse);
    }

    #[test]
    fn test_deep_nesting_is_a_parse_error() {
        let parens = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        assert_eq!(kind(&parens), MathErrorKind::Parse);
        assert_eq!(kind(&format!("{}1", "-".repeat(100_000))), MathErrorKind::Parse);
        assert_eq!(kind(&format!("{}1{}", "√(".repeat(100_000), ")".repeat(100_000))), MathErrorKind::Parse);
    }

    #[test]
    fn test_error_keeps_original_text() {
        match evaluate("5÷0").unwrap_err() {
            CalcError::MathEvaluation { expression, .. } => assert_eq!(expression, "5÷0"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_recovers_after_intermediate_infinity() {
        // Only a non-finite final value is an error
        assert_eq!(display("1/(1/0)"), "0");
    }
}
