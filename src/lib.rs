//! Keypad calculator: an expression engine fed by key presses.

pub mod calculator;
pub mod command;
pub mod config;

pub use calculator::{CalcResult, EngineState, EvaluationError, ExpressionEngine};
pub use command::Command;
pub use config::Config;
