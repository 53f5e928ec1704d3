use std::rc::Rc;

use spell_common::Position;
use spell_parser::{BinOp, Expr, Program, Stmt, UnOp};

use crate::environment::{self, Env, Frame};
use crate::error::RuntimeError;
use crate::sink::OutputSink;
use crate::value::{BuiltinValue, ClassValue, FunctionValue, InstanceValue, Value};

/// Walks a [`Program`] against a chain of [`Frame`]s, dispatching on AST
/// node variant. Expressions evaluate to a [`Value`]; statements execute
/// purely for effect.
pub struct Evaluator {
    global: Env,
    sink: Box<dyn OutputSink>,
}

impl Evaluator {
    pub fn new(sink: Box<dyn OutputSink>) -> Self {
        let global = Frame::global();
        crate::builtins::seed_globals(&global);
        Self { global, sink }
    }

    pub fn run(&mut self, program: &Program) -> Result<(), RuntimeError> {
        let global = Rc::clone(&self.global);
        self.exec_block(program, &global)
    }

    fn exec_block(&mut self, stmts: &[Stmt], env: &Env) -> Result<(), RuntimeError> {
        for stmt in stmts {
            self.exec_stmt(stmt, env)?;
        }
        Ok(())
    }

    fn exec_stmt(&mut self, stmt: &Stmt, env: &Env) -> Result<(), RuntimeError> {
        match stmt {
            Stmt::VarDecl {
                name, init_expr, ..
            } => {
                let value = self.eval_expr(init_expr, env)?;
                environment::define(env, name, value);
                Ok(())
            }
            Stmt::Assign {
                name,
                expr,
                position,
            } => {
                let value = self.eval_expr(expr, env)?;
                if environment::assign(env, name, value) {
                    Ok(())
                } else {
                    Err(RuntimeError::at(format!("unbound name '{name}'"), *position))
                }
            }
            Stmt::FuncDecl {
                name, params, body, ..
            } => {
                let function = Value::Function(Rc::new(FunctionValue {
                    params: params.clone(),
                    body: body.clone(),
                    captured_env: Rc::clone(env),
                }));
                environment::define(env, name, function);
                Ok(())
            }
            Stmt::ClassDecl {
                name,
                params,
                body,
                parent,
                position,
            } => {
                let parent_class = match parent {
                    Some(parent_name) => Some(self.resolve_parent_class(parent_name, env, *position)?),
                    None => None,
                };
                let class = Value::Class(Rc::new(ClassValue {
                    name: name.clone(),
                    params: params.clone(),
                    body: body.clone(),
                    captured_env: Rc::clone(env),
                    parent: parent_class,
                }));
                environment::define(env, name, class);
                Ok(())
            }
            Stmt::Print { expr, .. } => {
                let value = self.eval_expr(expr, env)?;
                self.sink.write_line(&value.render());
                Ok(())
            }
            Stmt::If {
                cond,
                then_body,
                else_body,
                ..
            } => {
                let cond = self.eval_expr(cond, env)?;
                let frame = Frame::child(env);
                if cond.is_truthy() {
                    self.exec_block(then_body, &frame)
                } else {
                    self.exec_block(else_body, &frame)
                }
            }
            Stmt::While { cond, body, .. } => {
                loop {
                    if !self.eval_expr(cond, env)?.is_truthy() {
                        break;
                    }
                    let frame = Frame::child(env);
                    self.exec_block(body, &frame)?;
                }
                Ok(())
            }
            Stmt::For {
                init,
                cond,
                step,
                body,
                ..
            } => {
                let init_value = self.eval_expr(&init.expr, env)?;
                environment::define(env, &init.name, init_value);
                loop {
                    if !self.eval_expr(cond, env)?.is_truthy() {
                        break;
                    }
                    let frame = Frame::child(env);
                    self.exec_block(body, &frame)?;
                    let step_value = self.eval_expr(&step.expr, env)?;
                    environment::define(env, &step.name, step_value);
                }
                Ok(())
            }
            Stmt::TryCatch {
                try_body,
                catch_body,
                ..
            } => {
                let try_frame = Frame::child(env);
                match self.exec_block(try_body, &try_frame) {
                    Ok(()) => Ok(()),
                    Err(err) => {
                        let catch_frame = Frame::child(env);
                        environment::define(&catch_frame, "error", Value::Str(err.message));
                        self.exec_block(catch_body, &catch_frame)
                    }
                }
            }
            Stmt::ExprStmt { expr, .. } => {
                self.eval_expr(expr, env)?;
                Ok(())
            }
        }
    }

    fn resolve_parent_class(
        &self,
        parent_name: &str,
        env: &Env,
        position: Position,
    ) -> Result<Rc<ClassValue>, RuntimeError> {
        match environment::lookup(env, parent_name) {
            Some(Value::Class(class)) => Ok(class),
            Some(other) => Err(RuntimeError::at(
                format!("'{parent_name}' is not a class, found {}", other.type_name()),
                position,
            )),
            None => Err(RuntimeError::at(
                format!("unbound name '{parent_name}'"),
                position,
            )),
        }
    }

    fn eval_expr(&mut self, expr: &Expr, env: &Env) -> Result<Value, RuntimeError> {
        match expr {
            Expr::IntLit { value, .. } => Ok(Value::Int(*value)),
            Expr::StrLit { value, .. } => Ok(Value::Str(value.clone())),
            Expr::ListLit { elements, .. } => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.eval_expr(element, env)?);
                }
                Ok(Value::list(values))
            }
            Expr::MapLit { entries, .. } => {
                let mut values = Vec::with_capacity(entries.len());
                for (key, value) in entries {
                    let key = self.eval_expr(key, env)?;
                    let value = self.eval_expr(value, env)?;
                    values.push((key, value));
                }
                Ok(Value::map(values))
            }
            Expr::Ident { name, position } => environment::lookup(env, name)
                .ok_or_else(|| RuntimeError::at(format!("unbound name '{name}'"), *position)),
            Expr::Call {
                callee_name,
                args,
                position,
            } => self.eval_call(callee_name, args, env, *position),
            Expr::BinaryOp {
                op,
                left,
                right,
                position,
            } => self.eval_binary(*op, left, right, env, *position),
            Expr::UnaryOp {
                op,
                operand,
                position,
            } => self.eval_unary(*op, operand, env, *position),
        }
    }

    fn eval_call(
        &mut self,
        callee_name: &str,
        args: &[Expr],
        env: &Env,
        position: Position,
    ) -> Result<Value, RuntimeError> {
        let callee = environment::lookup(env, callee_name)
            .ok_or_else(|| RuntimeError::at(format!("unbound name '{callee_name}'"), position))?;

        let mut arg_values = Vec::with_capacity(args.len());
        for arg in args {
            arg_values.push(self.eval_expr(arg, env)?);
        }

        match callee {
            Value::Function(f) => self.call_function(&f, &arg_values, position),
            Value::Class(c) => self.instantiate(&c, &arg_values, position),
            Value::Builtin(b) => self.call_builtin(&b, &arg_values, position),
            other => Err(RuntimeError::at(
                format!("'{callee_name}' is not callable, found {}", other.type_name()),
                position,
            )),
        }
    }

    fn call_function(
        &mut self,
        function: &Rc<FunctionValue>,
        args: &[Value],
        position: Position,
    ) -> Result<Value, RuntimeError> {
        if args.len() != function.params.len() {
            return Err(RuntimeError::at(
                format!(
                    "function expects {} argument(s), got {}",
                    function.params.len(),
                    args.len()
                ),
                position,
            ));
        }
        let frame = Frame::child(&function.captured_env);
        for (param, arg) in function.params.iter().zip(args) {
            environment::define(&frame, param, arg.clone());
        }
        self.exec_block(&function.body, &frame)?;
        Ok(Value::Nil)
    }

    /// Runs the class body once, in a frame parented at the class's
    /// declaration-site environment with `self` and the constructor
    /// parameters bound. Every binding left in that frame besides `self`
    /// and the parameters becomes an instance field.
    fn instantiate(
        &mut self,
        class: &Rc<ClassValue>,
        args: &[Value],
        position: Position,
    ) -> Result<Value, RuntimeError> {
        if args.len() != class.params.len() {
            return Err(RuntimeError::at(
                format!(
                    "class '{}' expects {} argument(s), got {}",
                    class.name,
                    class.params.len(),
                    args.len()
                ),
                position,
            ));
        }
        let frame = Frame::child(&class.captured_env);
        for (param, arg) in class.params.iter().zip(args) {
            environment::define(&frame, param, arg.clone());
        }
        let fields = Rc::new(std::cell::RefCell::new(rustc_hash::FxHashMap::default()));
        let instance = Rc::new(InstanceValue {
            class: Rc::clone(class),
            fields: Rc::clone(&fields),
        });
        environment::define(&frame, "self", Value::Instance(Rc::clone(&instance)));
        self.exec_block(&class.body, &frame)?;

        let params: std::collections::HashSet<&str> =
            class.params.iter().map(String::as_str).collect();
        for (name, value) in frame.borrow().own_bindings() {
            if name != "self" && !params.contains(name.as_str()) {
                fields.borrow_mut().insert(name.clone(), value.clone());
            }
        }
        Ok(Value::Instance(instance))
    }

    fn call_builtin(
        &self,
        builtin: &Rc<BuiltinValue>,
        args: &[Value],
        position: Position,
    ) -> Result<Value, RuntimeError> {
        if args.len() != builtin.arity {
            return Err(RuntimeError::at(
                format!(
                    "'{}' expects {} argument(s), got {}",
                    builtin.name,
                    builtin.arity,
                    args.len()
                ),
                position,
            ));
        }
        (builtin.func)(args).map_err(|e| {
            if e.position.is_some() {
                e
            } else {
                RuntimeError::at(e.message, position)
            }
        })
    }

    fn eval_binary(
        &mut self,
        op: BinOp,
        left: &Expr,
        right: &Expr,
        env: &Env,
        position: Position,
    ) -> Result<Value, RuntimeError> {
        // Logical operators short-circuit: the right operand is only
        // evaluated when the left one didn't already decide the result.
        if op == BinOp::Or {
            let left = self.eval_expr(left, env)?;
            if left.is_truthy() {
                return Ok(Value::Int(1));
            }
            let right = self.eval_expr(right, env)?;
            return Ok(Value::Int(right.is_truthy() as i64));
        }
        if op == BinOp::And {
            let left = self.eval_expr(left, env)?;
            if !left.is_truthy() {
                return Ok(Value::Int(0));
            }
            let right = self.eval_expr(right, env)?;
            return Ok(Value::Int(right.is_truthy() as i64));
        }

        let left = self.eval_expr(left, env)?;
        let right = self.eval_expr(right, env)?;
        match op {
            BinOp::Eq => Ok(Value::Int(Value::values_equal(&left, &right) as i64)),
            BinOp::NotEq => Ok(Value::Int(!Value::values_equal(&left, &right) as i64)),
            BinOp::Lt | BinOp::Gt | BinOp::LtEq | BinOp::GtEq => {
                eval_compare(op, &left, &right, position)
            }
            BinOp::Add => eval_add(&left, &right, position),
            BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Rem => {
                eval_arith(op, &left, &right, position)
            }
            BinOp::Or | BinOp::And => unreachable!("short-circuit operators handled above"),
        }
    }

    fn eval_unary(
        &mut self,
        op: UnOp,
        operand: &Expr,
        env: &Env,
        position: Position,
    ) -> Result<Value, RuntimeError> {
        let value = self.eval_expr(operand, env)?;
        match op {
            UnOp::Neg => match value {
                Value::Int(n) => Ok(Value::Int(-n)),
                other => Err(RuntimeError::at(
                    format!("unary '-' expects a number, found {}", other.type_name()),
                    position,
                )),
            },
            UnOp::Not => Ok(Value::Int(!value.is_truthy() as i64)),
        }
    }
}

fn eval_add(left: &Value, right: &Value, position: Position) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a + b)),
        (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{a}{b}"))),
        (Value::List(a), Value::List(b)) => {
            let mut elements = a.borrow().clone();
            elements.extend(b.borrow().iter().cloned());
            Ok(Value::list(elements))
        }
        (l, r) => Err(RuntimeError::at(
            format!("cannot add {} and {}", l.type_name(), r.type_name()),
            position,
        )),
    }
}

fn eval_arith(op: BinOp, left: &Value, right: &Value, position: Position) -> Result<Value, RuntimeError> {
    let (Value::Int(a), Value::Int(b)) = (left, right) else {
        return Err(RuntimeError::at(
            format!(
                "expected numbers, found {} and {}",
                left.type_name(),
                right.type_name()
            ),
            position,
        ));
    };
    match op {
        BinOp::Sub => Ok(Value::Int(a - b)),
        BinOp::Mul => Ok(Value::Int(a * b)),
        BinOp::Div => {
            if *b == 0 {
                Err(RuntimeError::at("division by zero", position))
            } else {
                Ok(Value::Int(a / b))
            }
        }
        BinOp::Rem => {
            if *b == 0 {
                Err(RuntimeError::at("division by zero", position))
            } else {
                Ok(Value::Int(a % b))
            }
        }
        _ => unreachable!("eval_arith called with a non-arithmetic operator"),
    }
}

fn eval_compare(op: BinOp, left: &Value, right: &Value, position: Position) -> Result<Value, RuntimeError> {
    let ordering = match (left, right) {
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Str(a), Value::Str(b)) => a.cmp(b),
        (l, r) => {
            return Err(RuntimeError::at(
                format!("cannot compare {} and {}", l.type_name(), r.type_name()),
                position,
            ))
        }
    };
    use std::cmp::Ordering;
    let result = match (op, ordering) {
        (BinOp::Lt, Ordering::Less) => true,
        (BinOp::Gt, Ordering::Greater) => true,
        (BinOp::LtEq, Ordering::Less | Ordering::Equal) => true,
        (BinOp::GtEq, Ordering::Greater | Ordering::Equal) => true,
        _ => false,
    };
    Ok(Value::Int(result as i64))
}
