//! End-to-end interpreter tests: source text in, printed lines out.

use spell_eval::{Evaluator, OutputSink};
use spell_parser::parse;

struct ForwardingSink<'a>(&'a mut Vec<String>);

impl OutputSink for ForwardingSink<'_> {
    fn write_line(&mut self, line: &str) {
        self.0.push(line.to_string());
    }
}

fn run(source: &str) -> Result<Vec<String>, spell_eval::RuntimeError> {
    let program = parse(source).expect("program should parse");
    let mut lines = Vec::new();
    let mut evaluator = Evaluator::new(Box::new(ForwardingSink(&mut lines)));
    evaluator.run(&program)?;
    Ok(lines)
}

#[test]
fn builtins_len_str_int() {
    let source = r#"
Illuminate(len("hello"))
Illuminate(len([1, 2, 3]))
Illuminate(str(42))
Illuminate(int("7") + 1)
"#;
    assert_eq!(run(source).unwrap(), vec!["5", "3", "42", "8"]);
}

#[test]
fn string_and_list_concatenation() {
    let source = r#"
Illuminate("foo" + "bar")
Illuminate([1, 2] + [3])
"#;
    assert_eq!(run(source).unwrap(), vec!["foobar", "[1, 2, 3]"]);
}

#[test]
fn map_literal_rendering() {
    assert_eq!(
        run(r#"Illuminate({ "a": 1, "b": 2 })"#).unwrap(),
        vec!["{a: 1, b: 2}"]
    );
}

#[test]
fn string_comparison_is_lexicographic() {
    assert_eq!(run(r#"Illuminate("abc" < "abd")"#).unwrap(), vec!["1"]);
}

#[test]
fn nested_function_calls_and_recursion_depth() {
    let source = r#"
Incantation countdown(n) {
  Illuminate(n)
  Ifar n > 0 {
    Cast countdown(n - 1)
  }
}
Cast countdown(3)
"#;
    assert_eq!(run(source).unwrap(), vec!["3", "2", "1", "0"]);
}

#[test]
fn unbound_name_error_message_matches_spec_format() {
    let err = run("Illuminate(missing)").unwrap_err();
    assert!(err.to_string().starts_with("Runtime Error at line 1, column"));
    assert!(err.to_string().contains("unbound name 'missing'"));
}

#[test]
fn division_by_zero_uncaught_propagates() {
    let err = run("Illuminate(1 / 0)").unwrap_err();
    assert!(err.to_string().contains("division by zero"));
}

#[test]
fn wrong_arity_is_a_runtime_error() {
    let source = "Incantation add(a, b) { Illuminate(a + b) }\nCast add(1)";
    let err = run(source).unwrap_err();
    assert!(err.to_string().contains("expects 2 argument"));
}

#[test]
fn bloodline_parent_must_be_a_class() {
    let source = "Wand NotAClass = 1\nMagical Creature Cat() Bloodline NotAClass { }";
    let err = run(source).unwrap_err();
    assert!(err.to_string().contains("is not a class"));
}

#[test]
fn assignment_to_unbound_name_is_an_error() {
    let err = run("x = 1").unwrap_err();
    assert!(err.to_string().contains("unbound name 'x'"));
}
