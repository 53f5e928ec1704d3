//! The SpellLang abstract syntax tree.
//!
//! Statements and expressions are two closed sum types rather than a class
//! hierarchy -- the evaluator dispatches on variant, and the compiler checks
//! exhaustiveness for us. Every node carries the [`Position`] of its first
//! token (data-model invariant i).

pub mod expr;
pub mod stmt;

pub use expr::{BinOp, Expr, UnOp};
pub use stmt::{ForAssign, Program, Stmt, VarKind};
