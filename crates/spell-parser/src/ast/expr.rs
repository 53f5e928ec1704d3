use spell_common::Position;

/// Binary operators, ordered here by ascending precedence -- see
/// [`crate::parser::expr::infix_binding_power`] for the actual table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Not,
}

/// An expression node. Evaluating one always produces a [`Value`](../../spell_eval/enum.Value.html).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    IntLit {
        value: i64,
        position: Position,
    },
    StrLit {
        value: String,
        position: Position,
    },
    ListLit {
        elements: Vec<Expr>,
        position: Position,
    },
    MapLit {
        entries: Vec<(Expr, Expr)>,
        position: Position,
    },
    Ident {
        name: String,
        position: Position,
    },
    Call {
        callee_name: String,
        args: Vec<Expr>,
        position: Position,
    },
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        position: Position,
    },
    UnaryOp {
        op: UnOp,
        operand: Box<Expr>,
        position: Position,
    },
}

impl Expr {
    pub fn position(&self) -> Position {
        match self {
            Expr::IntLit { position, .. }
            | Expr::StrLit { position, .. }
            | Expr::ListLit { position, .. }
            | Expr::MapLit { position, .. }
            | Expr::Ident { position, .. }
            | Expr::Call { position, .. }
            | Expr::BinaryOp { position, .. }
            | Expr::UnaryOp { position, .. } => *position,
        }
    }
}
