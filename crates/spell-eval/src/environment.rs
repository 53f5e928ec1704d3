use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::value::Value;

/// A lexical scope: a mapping name -> value, with a link to its parent
/// frame. The global frame is the root and has no parent.
///
/// Frames are shared via `Rc<RefCell<_>>` because a [`Function`](crate::value::FunctionValue)
/// or [`Class`](crate::value::ClassValue) value extends the lifetime of its
/// declaration-site frame for as long as the value itself is reachable
/// (data-model invariant v). A function stored back into its own defining
/// frame creates a reference cycle; this is accepted as a leak rather than
/// broken explicitly, matching the "values live as long as any reachable
/// environment refers to them" resource model.
pub struct Frame {
    bindings: FxHashMap<String, Value>,
    parent: Option<Env>,
}

pub type Env = Rc<RefCell<Frame>>;

impl Frame {
    pub fn global() -> Env {
        Rc::new(RefCell::new(Frame {
            bindings: FxHashMap::default(),
            parent: None,
        }))
    }

    pub fn child(parent: &Env) -> Env {
        Rc::new(RefCell::new(Frame {
            bindings: FxHashMap::default(),
            parent: Some(Rc::clone(parent)),
        }))
    }

    /// Bindings declared directly in this frame, not including parents.
    pub fn own_bindings(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.bindings.iter()
    }
}

/// Define (or overwrite) `name` in the current frame.
pub fn define(env: &Env, name: &str, value: Value) {
    env.borrow_mut().bindings.insert(name.to_string(), value);
}

/// Walk the frame chain looking up `name`.
pub fn lookup(env: &Env, name: &str) -> Option<Value> {
    if let Some(v) = env.borrow().bindings.get(name) {
        return Some(v.clone());
    }
    let parent = env.borrow().parent.clone();
    match parent {
        Some(parent) => lookup(&parent, name),
        None => None,
    }
}

/// Walk the frame chain and mutate the nearest existing binding for `name`.
/// Returns `false` if no such binding exists anywhere in the chain.
pub fn assign(env: &Env, name: &str, value: Value) -> bool {
    if env.borrow().bindings.contains_key(name) {
        env.borrow_mut().bindings.insert(name.to_string(), value);
        return true;
    }
    let parent = env.borrow().parent.clone();
    match parent {
        Some(parent) => assign(&parent, name, value),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_and_lookup_in_same_frame() {
        let frame = Frame::global();
        define(&frame, "x", Value::Int(7));
        assert_eq!(lookup(&frame, "x"), Some(Value::Int(7)));
    }

    #[test]
    fn lookup_walks_parent_chain() {
        let parent = Frame::global();
        define(&parent, "x", Value::Int(1));
        let child = Frame::child(&parent);
        assert_eq!(lookup(&child, "x"), Some(Value::Int(1)));
    }

    #[test]
    fn lookup_unbound_returns_none() {
        let frame = Frame::global();
        assert_eq!(lookup(&frame, "missing"), None);
    }

    #[test]
    fn child_binding_shadows_parent() {
        let parent = Frame::global();
        define(&parent, "x", Value::Int(1));
        let child = Frame::child(&parent);
        define(&child, "x", Value::Int(2));
        assert_eq!(lookup(&child, "x"), Some(Value::Int(2)));
        assert_eq!(lookup(&parent, "x"), Some(Value::Int(1)));
    }

    #[test]
    fn assign_mutates_nearest_binding() {
        let parent = Frame::global();
        define(&parent, "x", Value::Int(1));
        let child = Frame::child(&parent);
        assert!(assign(&child, "x", Value::Int(9)));
        assert_eq!(lookup(&parent, "x"), Some(Value::Int(9)));
    }

    #[test]
    fn assign_unbound_fails() {
        let frame = Frame::global();
        assert!(!assign(&frame, "missing", Value::Int(1)));
    }
}
