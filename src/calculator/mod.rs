//! Calculator module for keypad arithmetic.
//!
//! This module provides functionality to:
//! - Decide which keypad characters may enter an expression
//! - Evaluate expressions with a bounded arithmetic parser
//! - Track typed input and results in an expression engine
//! - Copy results to the clipboard

mod clipboard;
mod engine;
mod error;
mod evaluation;
mod parser;
mod sanitize;

pub use clipboard::{ClipboardError, copy_to_clipboard};
pub use engine::{EngineState, ExpressionEngine, Snapshot};
pub use error::EvaluationError;
pub use evaluation::{
    CalcResult, DEFAULT_ERROR_MARKER, ResultFormat, evaluate_expression, format_number,
};
pub use parser::parse_and_evaluate;
pub use sanitize::{OPERATORS, divides_by_literal_zero, is_allowed_char, is_operator, sanitize};
