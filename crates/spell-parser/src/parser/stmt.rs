use spell_common::TokenKind;

use crate::ast::{Expr, ForAssign, Stmt, VarKind};
use crate::error::ParseError;

use super::{expr, Parser};

pub(super) fn statement(p: &mut Parser) -> Result<Stmt, ParseError> {
    if p.at_keyword("Wand") {
        var_decl(p, VarKind::Wand)
    } else if p.at_keyword("Cauldron") {
        var_decl(p, VarKind::Cauldron)
    } else if p.at_keyword("SpellBooks") {
        var_decl(p, VarKind::SpellBooks)
    } else if p.at_keyword("Incantation") {
        func_decl(p)
    } else if p.at_keyword("Cast") {
        cast_stmt(p)
    } else if p.at_keyword("Illuminate") {
        print_stmt(p)
    } else if p.at_keyword("Ifar") {
        if_stmt(p)
    } else if p.at_keyword("Persistus") {
        while_stmt(p)
    } else if p.at_keyword("Loopus") {
        for_stmt(p)
    } else if p.at_keyword("Protego") {
        try_catch_stmt(p)
    } else if p.at_keyword("Magical") {
        class_decl(p)
    } else if p.current().kind == TokenKind::Identifier {
        assign_stmt(p)
    } else {
        Err(p.error(format!(
            "expected a statement, found '{}'",
            p.current().text
        )))
    }
}

fn var_decl(p: &mut Parser, kind: VarKind) -> Result<Stmt, ParseError> {
    let position = p.position();
    p.advance(); // Wand | Cauldron | SpellBooks
    let name = p.eat_identifier()?;
    p.eat_operator("=")?;
    let init_expr = expr::expression(p)?;
    Ok(Stmt::VarDecl {
        kind,
        name,
        init_expr,
        position,
    })
}

fn assign_stmt(p: &mut Parser) -> Result<Stmt, ParseError> {
    let position = p.position();
    let name = p.eat_identifier()?;
    p.eat_operator("=")?;
    let expr = expr::expression(p)?;
    Ok(Stmt::Assign {
        name,
        expr,
        position,
    })
}

/// Parses the bare `name = expr` form used by a `Loopus` init/step clause.
/// Unlike [`assign_stmt`], this never requires a prior declaration: the
/// evaluator defines the name in the enclosing frame if it is not already
/// bound there.
fn for_assign(p: &mut Parser) -> Result<ForAssign, ParseError> {
    let position = p.position();
    let name = p.eat_identifier()?;
    p.eat_operator("=")?;
    let expr = expr::expression(p)?;
    Ok(ForAssign {
        name,
        expr,
        position,
    })
}

fn func_decl(p: &mut Parser) -> Result<Stmt, ParseError> {
    let position = p.position();
    p.advance(); // Incantation
    let name = p.eat_identifier()?;
    let params = param_list(p)?;
    let body = p.eat_block()?;
    Ok(Stmt::FuncDecl {
        name,
        params,
        body,
        position,
    })
}

fn param_list(p: &mut Parser) -> Result<Vec<String>, ParseError> {
    p.eat_operator("(")?;
    let mut params = Vec::new();
    if !p.at_operator(")") {
        params.push(p.eat_identifier()?);
        while p.at_operator(",") {
            p.advance();
            params.push(p.eat_identifier()?);
        }
    }
    p.eat_operator(")")?;
    Ok(params)
}

/// `Cast name(args)` -- a call evaluated purely for effect.
fn cast_stmt(p: &mut Parser) -> Result<Stmt, ParseError> {
    let position = p.position();
    p.advance(); // Cast
    let callee_name = p.eat_identifier()?;
    let args = call_args(p)?;
    Ok(Stmt::ExprStmt {
        expr: Expr::Call {
            callee_name,
            args,
            position,
        },
        position,
    })
}

fn call_args(p: &mut Parser) -> Result<Vec<Expr>, ParseError> {
    p.eat_operator("(")?;
    let mut args = Vec::new();
    if !p.at_operator(")") {
        args.push(expr::expression(p)?);
        while p.at_operator(",") {
            p.advance();
            args.push(expr::expression(p)?);
        }
    }
    p.eat_operator(")")?;
    Ok(args)
}

fn print_stmt(p: &mut Parser) -> Result<Stmt, ParseError> {
    let position = p.position();
    p.advance(); // Illuminate
    p.eat_operator("(")?;
    let expr = expr::expression(p)?;
    p.eat_operator(")")?;
    Ok(Stmt::Print { expr, position })
}

fn if_stmt(p: &mut Parser) -> Result<Stmt, ParseError> {
    let position = p.position();
    p.advance(); // Ifar
    let cond = expr::expression(p)?;
    let then_body = p.eat_block()?;
    let else_body = if p.at_keyword("Elsear") {
        p.advance();
        p.eat_block()?
    } else {
        Vec::new()
    };
    Ok(Stmt::If {
        cond,
        then_body,
        else_body,
        position,
    })
}

fn while_stmt(p: &mut Parser) -> Result<Stmt, ParseError> {
    let position = p.position();
    p.advance(); // Persistus
    let cond = expr::expression(p)?;
    let body = p.eat_block()?;
    Ok(Stmt::While {
        cond,
        body,
        position,
    })
}

fn for_stmt(p: &mut Parser) -> Result<Stmt, ParseError> {
    let position = p.position();
    p.advance(); // Loopus
    let init = for_assign(p)?;
    p.eat_operator(";")?;
    let cond = expr::expression(p)?;
    p.eat_operator(";")?;
    let step = for_assign(p)?;
    let body = p.eat_block()?;
    Ok(Stmt::For {
        init,
        cond,
        step,
        body,
        position,
    })
}

fn try_catch_stmt(p: &mut Parser) -> Result<Stmt, ParseError> {
    let position = p.position();
    p.advance(); // Protego
    let try_body = p.eat_block()?;
    p.eat_keyword("Alohomora")?;
    let catch_body = p.eat_block()?;
    Ok(Stmt::TryCatch {
        try_body,
        catch_body,
        position,
    })
}

fn class_decl(p: &mut Parser) -> Result<Stmt, ParseError> {
    let position = p.position();
    p.advance(); // Magical
    p.eat_keyword("Creature")?;
    let name = p.eat_identifier()?;
    let params = param_list(p)?;
    let parent = if p.at_keyword("Bloodline") {
        p.advance();
        Some(p.eat_identifier()?)
    } else {
        None
    };
    let body = p.eat_block()?;
    Ok(Stmt::ClassDecl {
        name,
        params,
        body,
        parent,
        position,
    })
}
