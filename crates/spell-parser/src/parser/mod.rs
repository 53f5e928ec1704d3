//! Recursive-descent parser core: token cursor plus the small set of
//! `eat`/`expect` primitives every statement and expression rule is built
//! from.

mod expr;
mod stmt;

use spell_common::{Position, Token, TokenKind};

use crate::ast::Program;
use crate::error::ParseError;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let mut stmts = Vec::new();
        while !self.at_eof() {
            stmts.push(stmt::statement(&mut self)?);
        }
        Ok(stmts)
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn position(&self) -> Position {
        self.current().position
    }

    fn at_eof(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn at_keyword(&self, text: &str) -> bool {
        self.current().is_keyword(text)
    }

    fn at_operator(&self, text: &str) -> bool {
        self.current().is_operator(text)
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.position())
    }

    fn eat_keyword(&mut self, text: &str) -> Result<Token, ParseError> {
        if self.at_keyword(text) {
            Ok(self.advance())
        } else {
            Err(self.error(format!(
                "expected keyword '{text}', found '{}'",
                self.current().text
            )))
        }
    }

    fn eat_operator(&mut self, text: &str) -> Result<Token, ParseError> {
        if self.at_operator(text) {
            Ok(self.advance())
        } else {
            Err(self.error(format!(
                "expected '{text}', found '{}'",
                self.current().text
            )))
        }
    }

    /// Consume an identifier token. `len` is also accepted here even though
    /// it lexes as a keyword, so it can be used as a call name (it is the
    /// only keyword that doubles as a built-in function name).
    fn eat_identifier(&mut self) -> Result<String, ParseError> {
        let tok = self.current();
        if tok.kind == TokenKind::Identifier || tok.is_keyword("len") {
            Ok(self.advance().text)
        } else {
            Err(self.error(format!("expected identifier, found '{}'", tok.text)))
        }
    }

    fn eat_block(&mut self) -> Result<Vec<crate::ast::Stmt>, ParseError> {
        self.eat_operator("{")?;
        let mut stmts = Vec::new();
        while !self.at_operator("}") {
            if self.at_eof() {
                return Err(self.error("unclosed block, expected '}'"));
            }
            stmts.push(stmt::statement(self)?);
        }
        self.eat_operator("}")?;
        Ok(stmts)
    }
}
