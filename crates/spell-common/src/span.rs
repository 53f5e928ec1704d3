use std::fmt;

use serde::Serialize;

/// A 1-based (line, column) source position.
///
/// Every token carries its own `Position`, tracked by the lexer as it
/// consumes the source character by character. AST nodes inherit the
/// position of their first token (invariant i of the data model).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The position of the first character of the first line.
    pub fn start() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_is_one_one() {
        assert_eq!(Position::start(), Position::new(1, 1));
    }

    #[test]
    fn display_format() {
        assert_eq!(Position::new(3, 7).to_string(), "line 3, column 7");
    }
}
