use thiserror::Error;

/// Why an expression could not be turned into a finite number.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("unexpected '{found}' at position {position}")]
    UnexpectedChar { found: char, position: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),

    #[error("expression is nested too deeply")]
    TooDeep,

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NonFinite,
}

impl EvaluationError {
    /// Check if the error comes from malformed input rather than from the arithmetic.
    pub fn is_syntax(&self) -> bool {
        !matches!(self, Self::DivisionByZero | Self::NonFinite)
    }
}
