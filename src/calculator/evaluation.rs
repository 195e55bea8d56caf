//! Expression evaluation for the keypad.
//!
//! Sanitizes the typed expression, rejects division by a literal zero,
//! runs the arithmetic parser and formats the outcome.

use tracing::debug;

use super::error::EvaluationError;
use super::parser::parse_and_evaluate;
use super::sanitize::{divides_by_literal_zero, sanitize};

/// Default text shown when an evaluation fails.
pub const DEFAULT_ERROR_MARKER: &str = "Error";

/// Controls how failures are rendered as text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultFormat {
    /// Text used in place of a number when evaluation fails.
    pub error_marker: String,
}

impl Default for ResultFormat {
    fn default() -> Self {
        Self {
            error_marker: DEFAULT_ERROR_MARKER.to_string(),
        }
    }
}

/// Result of evaluating a keypad expression.
#[derive(Clone, Debug, PartialEq)]
pub enum CalcResult {
    /// Successful calculation with a finite numeric result.
    Success {
        /// The sanitized expression.
        expression: String,
        /// The numeric value.
        value: f64,
        /// The value as text, ready to seed further input.
        text: String,
    },
    /// The expression could not be evaluated to a finite number.
    Error {
        /// The sanitized expression.
        expression: String,
        /// What went wrong.
        error: EvaluationError,
        /// The error marker to display.
        message: String,
    },
}

impl CalcResult {
    /// Get the expression that was evaluated.
    pub fn expression(&self) -> &str {
        match self {
            Self::Success { expression, .. } => expression,
            Self::Error { expression, .. } => expression,
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Get the display string (result text or error marker).
    pub fn display(&self) -> &str {
        match self {
            Self::Success { text, .. } => text,
            Self::Error { message, .. } => message,
        }
    }

    /// Get the numeric value (only for successful results).
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Success { value, .. } => Some(*value),
            Self::Error { .. } => None,
        }
    }

    /// Get the failure cause (only for errors).
    pub fn error(&self) -> Option<&EvaluationError> {
        match self {
            Self::Success { .. } => None,
            Self::Error { error, .. } => Some(error),
        }
    }
}

/// Evaluate a keypad expression.
///
/// Never fails: every problem is folded into [`CalcResult::Error`].
pub fn evaluate_expression(input: &str, format: &ResultFormat) -> CalcResult {
    let expression = sanitize(input.trim());

    let outcome = if divides_by_literal_zero(&expression) {
        Err(EvaluationError::DivisionByZero)
    } else {
        parse_and_evaluate(&expression).and_then(|value| {
            if value.is_finite() {
                Ok(value)
            } else {
                Err(EvaluationError::NonFinite)
            }
        })
    };

    match outcome {
        Ok(value) => CalcResult::Success {
            text: format_number(value),
            expression,
            value,
        },
        Err(error) => {
            debug!(%expression, %error, "evaluation failed");
            CalcResult::Error {
                expression,
                error,
                message: format.error_marker.clone(),
            }
        }
    }
}

/// Format a finite number as plain text.
///
/// Uses the shortest digits that parse back to the same value and never
/// an exponent, so the text can seed further input without losing precision.
pub fn format_number(value: f64) -> String {
    // Avoid printing "-0"
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str) -> CalcResult {
        evaluate_expression(input, &ResultFormat::default())
    }

    #[test]
    fn test_basic_evaluation() {
        let result = eval("5+3");
        assert!(result.is_success());
        assert_eq!(result.display(), "8");
        assert_eq!(result.value(), Some(8.0));
    }

    #[test]
    fn test_decimal_result() {
        let result = eval("1/3");
        assert!(result.is_success());
        assert_eq!(result.display(), "0.3333333333333333");
    }

    #[test]
    fn test_result_text_keeps_full_precision() {
        assert_eq!(eval("0.1+0.2").display(), "0.30000000000000004");

        let tiny = eval("1/100000000000");
        assert_eq!(tiny.value(), Some(1e-11));
        assert_eq!(tiny.display(), "0.00000000001");
    }

    #[test]
    fn test_division_by_zero() {
        let result = eval("8/0");
        assert!(!result.is_success());
        assert_eq!(result.display(), "Error");
        assert_eq!(result.error(), Some(&EvaluationError::DivisionByZero));
    }

    #[test]
    fn test_zero_prefixed_divisor_evaluates() {
        let result = eval("8/01");
        assert_eq!(result.value(), Some(8.0));
    }

    #[test]
    fn test_fractional_zero_divisor_is_non_finite() {
        assert_eq!(eval("8/0.0").error(), Some(&EvaluationError::NonFinite));
        assert_eq!(eval("8/(0)").error(), Some(&EvaluationError::NonFinite));
        assert_eq!(eval("8/0.5").value(), Some(16.0));
    }

    #[test]
    fn test_invalid_expression() {
        let result = eval("5+*3");
        assert!(!result.is_success());
        assert!(result.error().is_some_and(EvaluationError::is_syntax));
        assert_eq!(result.display(), "Error");
    }

    #[test]
    fn test_input_is_sanitized() {
        let result = eval(" 2 x* 4 ");
        assert_eq!(result.expression(), "2*4");
        assert_eq!(result.value(), Some(8.0));
    }

    #[test]
    fn test_custom_error_marker() {
        let format = ResultFormat {
            error_marker: "E".to_string(),
        };
        assert_eq!(evaluate_expression("(", &format).display(), "E");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(8.0), "8");
        assert_eq!(format_number(-2.0), "-2");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(1e-12), "0.000000000001");
        assert_eq!(format_number(1e21), "1000000000000000000000");
    }

    #[test]
    fn test_format_number_parses_back() {
        for value in [1.0 / 3.0, 2.0 / 3.0, 1e-11, -123.456, 9.094947017729282e-13, 1e20] {
            let text = format_number(value);
            assert_eq!(parse_and_evaluate(&text), Ok(value), "{text}");
        }
    }
}
