use serde::Serialize;

use crate::span::Position;

/// The coarse category of a token, per the SpellLang data model.
///
/// The concrete lexeme is carried in [`Token::text`] -- `Keyword` and
/// `Operator` tokens are disambiguated by comparing `text` against the
/// keyword or operator vocabulary, rather than by a separate variant per
/// keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Number,
    Str,
    Operator,
    Eof,
}

/// A token produced by the SpellLang lexer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }

    pub fn is_keyword(&self, text: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == text
    }

    pub fn is_operator(&self, text: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == text
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

/// The complete reserved-word vocabulary of SpellLang.
///
/// `Forar` and `in` are reserved for a future collection-iterating loop
/// form; the grammar does not yet produce a statement for them, but they
/// are promoted out of `Identifier` so user code cannot shadow them.
pub const KEYWORDS: &[&str] = &[
    "Wand",
    "Incantation",
    "Cast",
    "Illuminate",
    "Ifar",
    "Elsear",
    "Loopus",
    "Persistus",
    "Cauldron",
    "SpellBooks",
    "Protego",
    "Alohomora",
    "Magical",
    "Creature",
    "Bloodline",
    "Forar",
    "in",
    "len",
];

/// Look up whether an identifier-shaped lexeme is actually a reserved keyword.
pub fn keyword_from_str(s: &str) -> Option<&'static str> {
    KEYWORDS.iter().copied().find(|&kw| kw == s)
}
