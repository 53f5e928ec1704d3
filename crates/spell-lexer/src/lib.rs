//! SpellLang lexer -- turns source text into a stream of tokens.
//!
//! A single forward pass over the source: whitespace and comments are
//! discarded, two-character operators are matched greedily before
//! single-character ones, and identifier-shaped lexemes are reclassified
//! as keywords when they match the reserved-word vocabulary.

mod cursor;
mod error;

use cursor::Cursor;
use spell_common::{keyword_from_str, Position, Token, TokenKind};

pub use error::LexError;

/// Tokenize a complete source string.
///
/// Returns the full token stream, terminated by a single `Eof` token, or
/// the first [`LexError`] encountered. SpellLang does not perform lexer
/// error recovery -- a malformed token or unterminated string stops the
/// pass immediately.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

struct Lexer<'src> {
    cursor: Cursor<'src>,
}

impl<'src> Lexer<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia()?;
            let position = self.cursor.position();
            let Some(c) = self.cursor.peek() else {
                tokens.push(Token::new(TokenKind::Eof, "", position));
                break;
            };

            let token = if c == '"' {
                self.lex_string(position)?
            } else if c.is_ascii_digit() {
                self.lex_number(position)
            } else if is_ident_start(c) {
                self.lex_identifier(position)
            } else if let Some(tok) = self.lex_operator(position) {
                tok
            } else {
                return Err(LexError::new(
                    format!("unexpected character: {c:?}"),
                    position,
                ));
            };
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Skip whitespace, newlines, and comments. `\r` is treated as
    /// plain whitespace (the caller never sees it as a token).
    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            match self.cursor.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.cursor.advance();
                }
                Some('#') => {
                    self.cursor.eat_while(|c| c != '\n');
                }
                Some('/') if self.cursor.peek_next() == Some('*') => {
                    self.skip_block_comment()?;
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Discard a `/* ... */` block comment. All characters up to and
    /// including the terminating `*/` are discarded, including newlines.
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start = self.cursor.position();
        self.cursor.advance(); // '/'
        self.cursor.advance(); // '*'
        loop {
            match self.cursor.peek() {
                None => return Err(LexError::new("unterminated block comment", start)),
                Some('*') if self.cursor.peek_next() == Some('/') => {
                    self.cursor.advance(); // '*'
                    self.cursor.advance(); // '/'
                    return Ok(());
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    fn lex_string(&mut self, position: Position) -> Result<Token, LexError> {
        self.cursor.advance(); // opening quote
        let start = self.cursor.byte_pos();
        loop {
            match self.cursor.peek() {
                None => return Err(LexError::new("unterminated string literal", position)),
                Some('"') => {
                    let end = self.cursor.byte_pos();
                    let text = self.cursor.slice(start, end).to_string();
                    self.cursor.advance(); // closing quote
                    return Ok(Token::new(TokenKind::Str, text, position));
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    fn lex_number(&mut self, position: Position) -> Token {
        let start = self.cursor.byte_pos();
        self.cursor.eat_while(|c| c.is_ascii_digit());
        let end = self.cursor.byte_pos();
        let text = self.cursor.slice(start, end).to_string();
        Token::new(TokenKind::Number, text, position)
    }

    fn lex_identifier(&mut self, position: Position) -> Token {
        let start = self.cursor.byte_pos();
        self.cursor.eat_while(is_ident_continue);
        let end = self.cursor.byte_pos();
        let text = self.cursor.slice(start, end).to_string();
        let kind = if keyword_from_str(&text).is_some() {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Token::new(kind, text, position)
    }

    fn lex_operator(&mut self, position: Position) -> Option<Token> {
        const TWO_CHAR: &[&str] = &["==", "!=", "<=", ">=", "&&", "||"];
        const ONE_CHAR: &str = "=+-*/%<>!(){}[],.:;";

        let c = self.cursor.peek()?;
        if let Some(n) = self.cursor.peek_next() {
            let two: String = [c, n].iter().collect();
            if TWO_CHAR.contains(&two.as_str()) {
                self.cursor.advance();
                self.cursor.advance();
                return Some(Token::new(TokenKind::Operator, two, position));
            }
        }
        if ONE_CHAR.contains(c) {
            self.cursor.advance();
            return Some(Token::new(TokenKind::Operator, c.to_string(), position));
        }
        None
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_texts(source: &str) -> Vec<(TokenKind, String)> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn empty_source_is_just_eof() {
        assert_eq!(kinds_and_texts(""), vec![(TokenKind::Eof, String::new())]);
    }

    #[test]
    fn lexes_keyword_and_identifier() {
        let toks = kinds_and_texts("Wand x");
        assert_eq!(
            toks,
            vec![
                (TokenKind::Keyword, "Wand".into()),
                (TokenKind::Identifier, "x".into()),
                (TokenKind::Eof, "".into()),
            ]
        );
    }

    #[test]
    fn lexes_two_char_before_one_char_operators() {
        let toks = kinds_and_texts("a <= b == c");
        let ops: Vec<_> = toks
            .iter()
            .filter(|(k, _)| *k == TokenKind::Operator)
            .map(|(_, t)| t.as_str())
            .collect();
        assert_eq!(ops, vec!["<=", "=="]);
    }

    #[test]
    fn lexes_number_and_string() {
        let toks = kinds_and_texts(r#"42 "hello""#);
        assert_eq!(
            toks,
            vec![
                (TokenKind::Number, "42".into()),
                (TokenKind::Str, "hello".into()),
                (TokenKind::Eof, "".into()),
            ]
        );
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = tokenize(r#""hello"#).unwrap_err();
        assert!(err.to_string().contains("unterminated string"));
    }

    #[test]
    fn line_comment_is_discarded() {
        let toks = kinds_and_texts("Wand x # this is a comment\nIllum");
        let texts: Vec<_> = toks.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(texts, vec!["Wand", "x", "Illum", ""]);
    }

    #[test]
    fn block_comment_spans_lines() {
        let toks = kinds_and_texts("Wand /* line one\nline two */ x");
        let texts: Vec<_> = toks.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(texts, vec!["Wand", "x", ""]);
    }

    #[test]
    fn unterminated_block_comment_is_an_error() {
        let err = tokenize("Wand /* never closed").unwrap_err();
        assert!(err.to_string().contains("unterminated block comment"));
    }

    #[test]
    fn carriage_return_is_whitespace() {
        let toks = kinds_and_texts("Wand\r\nx");
        let texts: Vec<_> = toks.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(texts, vec!["Wand", "x", ""]);
    }

    #[test]
    fn unexpected_character_is_an_error() {
        let err = tokenize("@").unwrap_err();
        assert!(err.to_string().contains("unexpected character"));
    }

    #[test]
    fn token_positions_are_one_based_origin() {
        let toks = tokenize("Wand x\n  = 1").unwrap();
        assert_eq!(toks[0].position, Position::new(1, 1)); // Wand
        assert_eq!(toks[1].position, Position::new(1, 6)); // x
        assert_eq!(toks[2].position, Position::new(2, 3)); // =
        assert_eq!(toks[3].position, Position::new(2, 5)); // 1
    }

    #[test]
    fn in_and_len_are_reserved_keywords() {
        let toks = kinds_and_texts("in len");
        assert_eq!(
            toks,
            vec![
                (TokenKind::Keyword, "in".into()),
                (TokenKind::Keyword, "len".into()),
                (TokenKind::Eof, "".into()),
            ]
        );
    }
}
