use spell_common::Position;

use crate::ast::expr::Expr;

/// A complete parsed program: a flat sequence of top-level statements.
pub type Program = Vec<Stmt>;

/// The keyword a variable was declared with. All three bind a name in the
/// current frame identically; the kind is retained for diagnostics only --
/// the evaluator does not enforce that a `Cauldron` initializer is a list
/// literal or that a `SpellBooks` initializer is a map literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Wand,
    Cauldron,
    SpellBooks,
}

/// An assignment appearing in a `Loopus` init or step clause.
///
/// Distinct from the general [`Stmt::Assign`]: a `Loopus` counter has no
/// preceding `Wand` declaration, so this form defines the name in the
/// enclosing frame when it is not already bound, rather than failing.
#[derive(Debug, Clone, PartialEq)]
pub struct ForAssign {
    pub name: String,
    pub expr: Expr,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl {
        kind: VarKind,
        name: String,
        init_expr: Expr,
        position: Position,
    },
    Assign {
        name: String,
        expr: Expr,
        position: Position,
    },
    FuncDecl {
        name: String,
        params: Vec<String>,
        body: Vec<Stmt>,
        position: Position,
    },
    ClassDecl {
        name: String,
        params: Vec<String>,
        body: Vec<Stmt>,
        parent: Option<String>,
        position: Position,
    },
    Print {
        expr: Expr,
        position: Position,
    },
    If {
        cond: Expr,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
        position: Position,
    },
    While {
        cond: Expr,
        body: Vec<Stmt>,
        position: Position,
    },
    For {
        init: ForAssign,
        cond: Expr,
        step: ForAssign,
        body: Vec<Stmt>,
        position: Position,
    },
    TryCatch {
        try_body: Vec<Stmt>,
        catch_body: Vec<Stmt>,
        position: Position,
    },
    ExprStmt {
        expr: Expr,
        position: Position,
    },
}

impl Stmt {
    pub fn position(&self) -> Position {
        match self {
            Stmt::VarDecl { position, .. }
            | Stmt::Assign { position, .. }
            | Stmt::FuncDecl { position, .. }
            | Stmt::ClassDecl { position, .. }
            | Stmt::Print { position, .. }
            | Stmt::If { position, .. }
            | Stmt::While { position, .. }
            | Stmt::For { position, .. }
            | Stmt::TryCatch { position, .. }
            | Stmt::ExprStmt { position, .. } => *position,
        }
    }
}
