use std::rc::Rc;

use crate::environment::{define, Env};
use crate::error::RuntimeError;
use crate::value::{BuiltinValue, Value};

/// Seed the tiny standard library (`len`, `str`, `int`) into the global
/// frame. Called once, at evaluator construction.
pub fn seed_globals(global: &Env) {
    register(global, "len", 1, len_builtin);
    register(global, "str", 1, str_builtin);
    register(global, "int", 1, int_builtin);
}

fn register(env: &Env, name: &str, arity: usize, func: crate::value::NativeFn) {
    define(
        env,
        name,
        Value::Builtin(Rc::new(BuiltinValue {
            name: name.to_string(),
            arity,
            func,
        })),
    );
}

fn len_builtin(args: &[Value]) -> Result<Value, RuntimeError> {
    match &args[0] {
        Value::Str(s) => Ok(Value::Int(s.chars().count() as i64)),
        Value::List(l) => Ok(Value::Int(l.borrow().len() as i64)),
        Value::Map(m) => Ok(Value::Int(m.borrow().len() as i64)),
        other => Err(RuntimeError::without_position(format!(
            "len() expects a string, list, or map, got {}",
            other.type_name()
        ))),
    }
}

fn str_builtin(args: &[Value]) -> Result<Value, RuntimeError> {
    Ok(Value::Str(args[0].render()))
}

fn int_builtin(args: &[Value]) -> Result<Value, RuntimeError> {
    match &args[0] {
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Str(s) => s.trim().parse::<i64>().map(Value::Int).map_err(|_| {
            RuntimeError::without_position(format!("int() could not parse {s:?} as an integer"))
        }),
        other => Err(RuntimeError::without_position(format!(
            "int() expects a string or int, got {}",
            other.type_name()
        ))),
    }
}
