use insta::assert_yaml_snapshot;
use serde::Serialize;
use spell_lexer::tokenize;

/// A human-readable representation of a token for snapshot testing.
#[derive(Serialize)]
struct TokenSnapshot {
    kind: String,
    text: String,
    line: u32,
    column: u32,
}

fn tokenize_snapshot(source: &str) -> Vec<TokenSnapshot> {
    tokenize(source)
        .expect("source should lex cleanly")
        .into_iter()
        .map(|tok| TokenSnapshot {
            kind: format!("{:?}", tok.kind),
            text: tok.text,
            line: tok.position.line,
            column: tok.position.column,
        })
        .collect()
}

#[test]
fn test_keywords() {
    let source = "Wand Incantation Cast Illuminate Ifar Elsear Loopus Persistus \
                   Cauldron SpellBooks Protego Alohomora Magical Creature Bloodline len";
    assert_yaml_snapshot!(tokenize_snapshot(source));
}

#[test]
fn test_operators() {
    let source = "== != <= >= && || = + - * / % < > ! ( ) { } [ ] , . : ;";
    assert_yaml_snapshot!(tokenize_snapshot(source));
}

#[test]
fn test_numbers() {
    assert_yaml_snapshot!(tokenize_snapshot("0 7 42 1000000"));
}

#[test]
fn test_identifiers() {
    assert_yaml_snapshot!(tokenize_snapshot("x total_count _private camelCase42"));
}

#[test]
fn test_simple_string() {
    assert_yaml_snapshot!(tokenize_snapshot(r#""hello world""#));
}

#[test]
fn test_empty_string() {
    assert_yaml_snapshot!(tokenize_snapshot(r#""""#));
}

#[test]
fn test_line_comment() {
    assert_yaml_snapshot!(tokenize_snapshot("# this is a comment\nWand x"));
}

#[test]
fn test_block_comment() {
    assert_yaml_snapshot!(tokenize_snapshot("Wand /* spans\nmultiple lines */ x"));
}

#[test]
fn test_mixed_expression() {
    assert_yaml_snapshot!(tokenize_snapshot("Wand result = add(1, 2) * 3"));
}

#[test]
fn test_newlines_and_positions() {
    assert_yaml_snapshot!(tokenize_snapshot("Wand x = 1\nWand y = 2\n"));
}

#[test]
fn test_crlf_newlines() {
    assert_yaml_snapshot!(tokenize_snapshot("Wand x = 1\r\nWand y = 2"));
}

#[test]
fn test_empty_input() {
    assert_yaml_snapshot!(tokenize_snapshot(""));
}

#[test]
fn test_whitespace_only() {
    assert_yaml_snapshot!(tokenize_snapshot("   \t  \r\n "));
}

#[test]
fn test_full_program() {
    let source = r#"
Wand count = 0
Loopus (Wand i = 0; i < 5; i = i + 1) {
    count = count + i
}
Illuminate count
"#;
    assert_yaml_snapshot!(tokenize_snapshot(source));
}

#[test]
fn test_unterminated_string_is_rejected() {
    let err = tokenize(r#""unterminated"#).unwrap_err();
    assert!(err.to_string().contains("unterminated string"));
}

#[test]
fn test_unterminated_block_comment_is_rejected() {
    let err = tokenize("/* never closed").unwrap_err();
    assert!(err.to_string().contains("unterminated block comment"));
}
