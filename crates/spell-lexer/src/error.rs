use std::fmt;

use spell_common::Position;

/// A lexer error with location information.
///
/// Lexing stops at the first error -- SpellLang does not attempt error
/// recovery at this stage (see PURPOSE & SCOPE: diagnostics are not a
/// first-class design goal of the interpreter).
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub message: String,
    pub position: Position,
}

impl LexError {
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer Error at line {}, column {}: {}",
            self.position.line, self.position.column, self.message
        )
    }
}

impl std::error::Error for LexError {}
