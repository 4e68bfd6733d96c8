//! Expression evaluation core
//!
//! Tokenizer, recursive descent parser and AST evaluator for flat arithmetic
//! expressions, plus the display formatting shared by the session and the
//! front-ends.

pub mod evaluator;
pub mod history;
mod operations;
pub mod parser;

pub use operations::Operation;

use thiserror::Error;

/// Text shown in place of a result whenever a calculation fails
pub const ERROR_DISPLAY: &str = "Error";

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Why an expression could not be turned into a finite number
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division by zero attempted
    #[error("Division by zero")]
    DivisionByZero,
    /// Result is not finite (overflowed to infinity or became NaN)
    #[error("Overflow: result is not a finite number")]
    Overflow,
    /// Invalid expression syntax
    #[error("Invalid expression: {0}")]
    ParseError(String),
    /// Empty or whitespace-only expression
    #[error("Empty expression")]
    EmptyExpression,
}

impl CalcError {
    /// Creates a parse error
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError(message.into())
    }
}

/// Formats a value for the result display.
///
/// Integral values print without a decimal point; everything else prints the
/// shortest decimal string that round-trips to the same `f64`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // covers -0.0
        return "0".to_string();
    }
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Formats an evaluation outcome, collapsing every failure to [`ERROR_DISPLAY`]
#[must_use]
pub fn format_outcome(outcome: &CalcResult<f64>) -> String {
    match outcome {
        Ok(value) => format_number(*value),
        Err(_) => ERROR_DISPLAY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== CalcError tests =====

    #[test]
    fn test_calc_error_display_division_by_zero() {
        assert_eq!(CalcError::DivisionByZero.to_string(), "Division by zero");
    }

    #[test]
    fn test_calc_error_display_parse_error() {
        let err = CalcError::parse("unexpected token");
        assert_eq!(err.to_string(), "Invalid expression: unexpected token");
    }

    #[test]
    fn test_calc_error_display_empty_expression() {
        assert_eq!(CalcError::EmptyExpression.to_string(), "Empty expression");
    }

    #[test]
    fn test_calc_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CalcError::Overflow);
        assert!(err.to_string().contains("finite"));
    }

    // ===== format_number tests =====

    #[test]
    fn test_format_integral_has_no_decimal_point() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(-12.0), "-12");
        assert_eq!(format_number(20.0), "20");
    }

    #[test]
    fn test_format_fraction_keeps_full_precision() {
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(1.0 / 3.0), "0.3333333333333333");
    }

    #[test]
    fn test_format_small_fraction_uses_plain_decimal() {
        assert_eq!(format_number(0.0001), "0.0001");
    }

    #[test]
    fn test_format_negative_zero() {
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_format_large_integral() {
        assert_eq!(format_number(1e20), "100000000000000000000");
    }

    #[test]
    fn test_format_outcome() {
        assert_eq!(format_outcome(&Ok(8.0)), "8");
        assert_eq!(format_outcome(&Err(CalcError::DivisionByZero)), "Error");
    }
}
