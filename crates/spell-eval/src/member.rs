//! Class-chain member resolution (§9 design notes).
//!
//! The grammar has no member-access expression, so nothing a parsed
//! program can write reaches [`lookup_member`] today. It exists because
//! single inheritance is otherwise meaningless: the spec calls for
//! "when a name is looked up on an instance and not found in its fields,
//! walk the class chain parent-ward until found" and asks for that
//! behavior to be implemented and test-covered even without surface
//! syntax to trigger it.
use std::rc::Rc;

use crate::value::{ClassValue, FunctionValue, InstanceValue, Value};

/// Resolve `name` on `instance`: own fields first (they shadow everything,
/// per invariant iii), then an ancestor class's declared `Incantation` or
/// literal `Wand` by the same name, walking `Bloodline` parents outward.
pub fn lookup_member(instance: &InstanceValue, name: &str) -> Option<Value> {
    if let Some(value) = instance.fields.borrow().get(name) {
        return Some(value.clone());
    }
    let mut current = instance.class.parent.clone();
    while let Some(class) = current {
        if let Some(value) = declared_member(&class, name) {
            return Some(value);
        }
        current = class.parent.clone();
    }
    None
}

/// A name declared directly in a class body: a method (bound to that
/// class's own captured environment) or a literal-initialized field.
/// Neither is executed with side effects -- this never instantiates the
/// ancestor, it only reads its static declarations.
fn declared_member(class: &Rc<ClassValue>, name: &str) -> Option<Value> {
    use spell_parser::{Expr, Stmt};

    for stmt in &class.body {
        match stmt {
            Stmt::FuncDecl {
                name: decl_name,
                params,
                body,
                ..
            } if decl_name == name => {
                return Some(Value::Function(Rc::new(FunctionValue {
                    params: params.clone(),
                    body: body.clone(),
                    captured_env: Rc::clone(&class.captured_env),
                })));
            }
            Stmt::VarDecl {
                name: decl_name,
                init_expr,
                ..
            } if decl_name == name => match init_expr {
                Expr::IntLit { value, .. } => return Some(Value::Int(*value)),
                Expr::StrLit { value, .. } => return Some(Value::Str(value.clone())),
                _ => return None,
            },
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Frame;
    use std::cell::RefCell;

    fn class(name: &str, body: Vec<spell_parser::Stmt>, parent: Option<Rc<ClassValue>>) -> Rc<ClassValue> {
        Rc::new(ClassValue {
            name: name.to_string(),
            params: vec![],
            body,
            captured_env: Frame::global(),
            parent,
        })
    }

    fn instance(class: Rc<ClassValue>, fields: Vec<(&str, Value)>) -> InstanceValue {
        let mut map = rustc_hash::FxHashMap::default();
        for (k, v) in fields {
            map.insert(k.to_string(), v);
        }
        InstanceValue {
            class,
            fields: Rc::new(RefCell::new(map)),
        }
    }

    #[test]
    fn own_field_shadows_ancestor() {
        let parent = class(
            "Animal",
            vec![spell_parser::Stmt::VarDecl {
                kind: spell_parser::VarKind::Wand,
                name: "sound".to_string(),
                init_expr: spell_parser::Expr::StrLit {
                    value: "growl".into(),
                    position: spell_common::Position::start(),
                },
                position: spell_common::Position::start(),
            }],
            None,
        );
        let cat = class("Cat", vec![], Some(parent));
        let inst = instance(cat, vec![("sound", Value::Str("meow".into()))]);
        assert_eq!(
            lookup_member(&inst, "sound"),
            Some(Value::Str("meow".into()))
        );
    }

    #[test]
    fn falls_back_to_parent_declaration() {
        let parent = class(
            "Animal",
            vec![spell_parser::Stmt::VarDecl {
                kind: spell_parser::VarKind::Wand,
                name: "sound".to_string(),
                init_expr: spell_parser::Expr::StrLit {
                    value: "growl".into(),
                    position: spell_common::Position::start(),
                },
                position: spell_common::Position::start(),
            }],
            None,
        );
        let cat = class("Cat", vec![], Some(parent));
        let inst = instance(cat, vec![]);
        assert_eq!(
            lookup_member(&inst, "sound"),
            Some(Value::Str("growl".into()))
        );
    }

    #[test]
    fn missing_name_returns_none() {
        let cat = class("Cat", vec![], None);
        let inst = instance(cat, vec![]);
        assert_eq!(lookup_member(&inst, "nope"), None);
    }
}
