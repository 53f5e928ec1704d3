//! Precedence-climbing expression parser.
//!
//! Binding powers are assigned two per level (left, right) so that equal
//! precedence binds left-associatively: the right slot of one level always
//! equals the left slot of the next token at the same level, so a second
//! operator at the same precedence fails the `> min_bp` test and closes out
//! the left operand first.

use spell_common::TokenKind;

use crate::ast::{BinOp, Expr, UnOp};
use crate::error::ParseError;

use super::Parser;

fn infix_binding_power(op: &str) -> Option<(u8, u8)> {
    match op {
        "||" => Some((1, 2)),
        "&&" => Some((3, 4)),
        "==" | "!=" => Some((5, 6)),
        "<" | ">" | "<=" | ">=" => Some((7, 8)),
        "+" | "-" => Some((9, 10)),
        "*" | "/" | "%" => Some((11, 12)),
        _ => None,
    }
}

fn bin_op(op: &str) -> BinOp {
    match op {
        "||" => BinOp::Or,
        "&&" => BinOp::And,
        "==" => BinOp::Eq,
        "!=" => BinOp::NotEq,
        "<" => BinOp::Lt,
        ">" => BinOp::Gt,
        "<=" => BinOp::LtEq,
        ">=" => BinOp::GtEq,
        "+" => BinOp::Add,
        "-" => BinOp::Sub,
        "*" => BinOp::Mul,
        "/" => BinOp::Div,
        "%" => BinOp::Rem,
        _ => unreachable!("bin_op called with non-operator text"),
    }
}

const PREFIX_BP: u8 = 13;

pub(super) fn expression(p: &mut Parser) -> Result<Expr, ParseError> {
    expr_bp(p, 0)
}

fn expr_bp(p: &mut Parser, min_bp: u8) -> Result<Expr, ParseError> {
    let mut lhs = prefix_or_primary(p)?;

    loop {
        let tok = p.current();
        if tok.kind != TokenKind::Operator {
            break;
        }
        let Some((l_bp, r_bp)) = infix_binding_power(&tok.text) else {
            break;
        };
        if l_bp < min_bp {
            break;
        }
        let position = lhs.position();
        let op_text = p.advance().text;
        let rhs = expr_bp(p, r_bp)?;
        lhs = Expr::BinaryOp {
            op: bin_op(&op_text),
            left: Box::new(lhs),
            right: Box::new(rhs),
            position,
        };
    }

    Ok(lhs)
}

fn prefix_or_primary(p: &mut Parser) -> Result<Expr, ParseError> {
    if p.at_operator("-") || p.at_operator("!") {
        let position = p.position();
        let op_text = p.advance().text;
        let op = if op_text == "-" { UnOp::Neg } else { UnOp::Not };
        let operand = expr_bp(p, PREFIX_BP)?;
        return Ok(Expr::UnaryOp {
            op,
            operand: Box::new(operand),
            position,
        });
    }
    primary(p)
}

fn primary(p: &mut Parser) -> Result<Expr, ParseError> {
    let position = p.position();
    let tok = p.current().clone();

    match tok.kind {
        TokenKind::Number => {
            p.advance();
            let value = tok
                .text
                .parse::<i64>()
                .map_err(|_| ParseError::new(format!("invalid integer literal '{}'", tok.text), position))?;
            Ok(Expr::IntLit { value, position })
        }
        TokenKind::Str => {
            p.advance();
            Ok(Expr::StrLit {
                value: tok.text,
                position,
            })
        }
        TokenKind::Identifier => {
            p.advance();
            if p.at_operator("(") {
                let args = call_args(p)?;
                Ok(Expr::Call {
                    callee_name: tok.text,
                    args,
                    position,
                })
            } else {
                Ok(Expr::Ident {
                    name: tok.text,
                    position,
                })
            }
        }
        TokenKind::Keyword if tok.text == "len" => {
            p.advance();
            if p.at_operator("(") {
                let args = call_args(p)?;
                Ok(Expr::Call {
                    callee_name: tok.text,
                    args,
                    position,
                })
            } else {
                Ok(Expr::Ident {
                    name: tok.text,
                    position,
                })
            }
        }
        TokenKind::Operator if tok.text == "(" => {
            p.advance();
            let inner = expr_bp(p, 0)?;
            p.eat_operator(")")?;
            Ok(inner)
        }
        TokenKind::Operator if tok.text == "[" => list_literal(p, position),
        TokenKind::Operator if tok.text == "{" => map_literal(p, position),
        _ => Err(p.error(format!("expected expression, found '{}'", tok.text))),
    }
}

fn call_args(p: &mut Parser) -> Result<Vec<Expr>, ParseError> {
    p.eat_operator("(")?;
    let mut args = Vec::new();
    if !p.at_operator(")") {
        args.push(expr_bp(p, 0)?);
        while p.at_operator(",") {
            p.advance();
            args.push(expr_bp(p, 0)?);
        }
    }
    p.eat_operator(")")?;
    Ok(args)
}

fn list_literal(p: &mut Parser, position: spell_common::Position) -> Result<Expr, ParseError> {
    p.eat_operator("[")?;
    let mut elements = Vec::new();
    if !p.at_operator("]") {
        elements.push(expr_bp(p, 0)?);
        while p.at_operator(",") {
            p.advance();
            elements.push(expr_bp(p, 0)?);
        }
    }
    p.eat_operator("]")?;
    Ok(Expr::ListLit { elements, position })
}

fn map_literal(p: &mut Parser, position: spell_common::Position) -> Result<Expr, ParseError> {
    p.eat_operator("{")?;
    let mut entries = Vec::new();
    if !p.at_operator("}") {
        entries.push(map_entry(p)?);
        while p.at_operator(",") {
            p.advance();
            entries.push(map_entry(p)?);
        }
    }
    p.eat_operator("}")?;
    Ok(Expr::MapLit { entries, position })
}

fn map_entry(p: &mut Parser) -> Result<(Expr, Expr), ParseError> {
    let key = expr_bp(p, 0)?;
    p.eat_operator(":")?;
    let value = expr_bp(p, 0)?;
    Ok((key, value))
}
