//! SpellLang parser: recursive descent, one token of lookahead.
//!
//! Turns a token stream from `spell_lexer` into a flat [`ast::Program`].
//! Expressions use precedence climbing over a binding-power table; every
//! other construct is a direct, hand-written grammar rule keyed off the
//! leading token.

pub mod ast;
pub mod error;
mod parser;

pub use ast::{BinOp, Expr, ForAssign, Program, Stmt, UnOp, VarKind};
pub use error::ParseError;

/// Lex and parse a complete SpellLang source string.
///
/// Lexer errors are folded into [`ParseError`] so callers working purely in
/// terms of source text only need to handle one error type before
/// evaluation begins; the CLI front end distinguishes the two kinds itself
/// by calling `spell_lexer::tokenize` directly when it needs to.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = spell_lexer::tokenize(source)
        .map_err(|e| ParseError::new(e.message, e.position))?;
    parse_tokens(tokens)
}

/// Parse an already-tokenized source.
pub fn parse_tokens(tokens: Vec<spell_common::Token>) -> Result<Program, ParseError> {
    parser::Parser::new(tokens).parse_program()
}
