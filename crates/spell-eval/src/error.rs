use std::fmt;

use spell_common::Position;

/// A runtime error: unbound name, wrong arity, type mismatch, division by
/// zero, not-callable, or invalid built-in input.
///
/// Raised inside a `Protego` block, it is caught and bound to `error`
/// rather than propagating (see `Evaluator::exec_try_catch`).
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub message: String,
    pub position: Option<Position>,
}

impl RuntimeError {
    pub fn new(message: impl Into<String>, position: Option<Position>) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }

    pub fn at(message: impl Into<String>, position: Position) -> Self {
        Self::new(message, Some(position))
    }

    pub fn without_position(message: impl Into<String>) -> Self {
        Self::new(message, None)
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(
                f,
                "Runtime Error at line {}, column {}: {}",
                position.line, position.column, self.message
            ),
            None => write!(f, "Runtime Error: {}", self.message),
        }
    }
}

impl std::error::Error for RuntimeError {}
