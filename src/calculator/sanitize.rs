//! Character rules for keypad input.
//!
//! Decides which characters may enter the input buffer and cleans
//! an expression before it is handed to the parser.

use lazy_static::lazy_static;
use regex::Regex;

/// Binary operators recognised by the keypad.
pub const OPERATORS: &[char] = &['+', '-', '*', '/'];

lazy_static! {
    /// Matches every character that is not allowed in an expression.
    static ref DISALLOWED_CHARS: Regex = Regex::new(r"[^0-9+\-*/().]").unwrap();

    /// Matches a division by the literal integer zero: `/0` not followed by a digit or a decimal point.
    static ref DIVISION_BY_ZERO: Regex = Regex::new(r"/0(?:[^0-9.]|$)").unwrap();
}

/// Check if a character may be typed into the input buffer.
pub fn is_allowed_char(c: char) -> bool {
    c.is_ascii_digit() || is_operator(c) || matches!(c, '(' | ')' | '.')
}

/// Check if a character is one of the four arithmetic operators.
pub fn is_operator(c: char) -> bool {
    OPERATORS.contains(&c)
}

/// Remove every character outside the allowed set.
pub fn sanitize(input: &str) -> String {
    DISALLOWED_CHARS.replace_all(input, "").into_owned()
}

/// Check if the expression divides by the literal integer zero.
///
/// `8/0` and `8/0+1` match; `8/01`, `8/10` and `8/0.5` do not. A zero
/// written with a fraction (`8/0.0`) is left to the evaluator, which
/// rejects the infinite result anyway.
pub fn divides_by_literal_zero(expression: &str) -> bool {
    DIVISION_BY_ZERO.is_match(expression)
}
