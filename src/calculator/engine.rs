//! Keypad expression engine.
//!
//! Holds the expression being typed and the last evaluation result,
//! and applies the keypad editing rules to every key.

use serde::Serialize;
use tracing::debug;

use super::evaluation::{CalcResult, ResultFormat, evaluate_expression};
use super::sanitize::{is_allowed_char, is_operator};

/// Coarse state of the engine, derived from the buffer and the result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    /// Nothing typed and nothing evaluated.
    Empty,
    /// An expression is being typed.
    Entering,
    /// The last evaluation succeeded and nothing has been typed since.
    Evaluated,
    /// The last evaluation failed and nothing has been typed since.
    Errored,
}

/// Serializable view of the engine for external observers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub input: String,
    pub result: Option<String>,
    pub value: Option<f64>,
    pub display: String,
    pub state: EngineState,
}

/// The calculator state machine for one session.
#[derive(Clone, Debug, Default)]
pub struct ExpressionEngine {
    input: String,
    result: Option<CalcResult>,
    format: ResultFormat,
    /// Set by a performed evaluation, reset by any edit.
    settled: bool,
}

impl ExpressionEngine {
    /// Create an engine with default formatting.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom result formatting.
    pub fn with_format(format: ResultFormat) -> Self {
        Self {
            input: String::new(),
            result: None,
            format,
            settled: false,
        }
    }

    /// Reset the buffer and forget the last result.
    pub fn clear(&mut self) {
        self.input.clear();
        self.result = None;
        self.settled = false;
        debug!("cleared");
    }

    /// Remove the last typed character, if any.
    pub fn backspace(&mut self) {
        if self.input.pop().is_some() {
            self.settled = false;
        }
    }

    /// Type a single character.
    ///
    /// Characters outside the keypad set are ignored. An operator typed
    /// after another operator replaces it, except that `-` may follow a
    /// different operator to start a negative number.
    pub fn append_char(&mut self, c: char) {
        if !is_allowed_char(c) {
            debug!(char = ?c, "ignored character");
            return;
        }

        if let Some(last) = self.input.chars().last()
            && is_operator(c)
            && is_operator(last)
            && !(c == '-' && last != '-')
        {
            self.input.pop();
        }

        self.input.push(c);
        self.settled = false;
    }

    /// Evaluate the buffer.
    ///
    /// An empty buffer is left alone. On success the result text becomes the
    /// new buffer so typing can continue from it; on failure the buffer is
    /// cleared and the error marker is displayed.
    pub fn evaluate(&mut self) {
        if self.input.trim().is_empty() {
            return;
        }

        let result = evaluate_expression(&self.input, &self.format);
        debug!(expression = %result.expression(), display = %result.display(), "evaluated");

        self.input = match &result {
            CalcResult::Success { text, .. } => text.clone(),
            CalcResult::Error { .. } => String::new(),
        };
        self.result = Some(result);
        self.settled = true;
    }

    /// The text to show: the buffer, else the last result, else nothing.
    pub fn display_value(&self) -> &str {
        if !self.input.is_empty() {
            &self.input
        } else if let Some(result) = &self.result {
            result.display()
        } else {
            ""
        }
    }

    /// The raw expression buffer.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The last evaluation result, if any.
    pub fn result(&self) -> Option<&CalcResult> {
        self.result.as_ref()
    }

    /// Where the engine stands. `Evaluated` and `Errored` hold until the next edit.
    pub fn state(&self) -> EngineState {
        match &self.result {
            Some(result) if self.settled => {
                if result.is_success() {
                    EngineState::Evaluated
                } else {
                    EngineState::Errored
                }
            }
            _ if self.input.is_empty() => EngineState::Empty,
            _ => EngineState::Entering,
        }
    }

    /// Capture the buffer, result, display value and state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            input: self.input.clone(),
            result: self.result.as_ref().map(|r| r.display().to_string()),
            value: self.result.as_ref().and_then(CalcResult::value),
            display: self.display_value().to_string(),
            state: self.state(),
        }
    }
}
