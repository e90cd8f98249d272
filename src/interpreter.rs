//! Tree‑walking evaluator.
//!
//! Executes statements against a long‑lived global [`Environment`], using the
//! resolver's [`Locals`] table to jump straight to the scope that binds each
//! name. Statement execution yields a [`Flow`]: `return` travels up through
//! blocks and loops as `Flow::Return` until the call boundary consumes it,
//! while runtime errors travel in the `Err` channel and end the run.

use std::io::{self, Write};
use std::rc::Rc;

use log::{debug, info};

use crate::ast::{Expr, ExprId, LiteralValue, Stmt};
use crate::environment::{EnvRef, Environment};
use crate::error::{LoxError, Result};
use crate::resolver::Locals;
use crate::token::{Token, TokenType};
use crate::value::{Class, Function, Instance, NativeFn, NativeFunction, Value};

use std::cell::RefCell;
use std::collections::HashMap;

/// How a statement finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow<'a> {
    /// Fell through to the next statement.
    Normal,

    /// A `return` is unwinding to the nearest call boundary.
    Return(Value<'a>),
}

pub struct Interpreter<'a, W: Write = io::Stdout> {
    globals: EnvRef<'a>,
    environment: EnvRef<'a>,
    locals: Locals,
    out: W,
}

impl Default for Interpreter<'_, io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter<'_, io::Stdout> {
    /// An interpreter printing to standard output.
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl<'a, W: Write> Interpreter<'a, W> {
    /// An interpreter printing to `out`.
    pub fn with_output(out: W) -> Self {
        info!("Initializing Interpreter");

        let globals: EnvRef<'a> = Environment::new().into_ref();

        Self {
            environment: Rc::clone(&globals),
            globals,
            locals: Locals::default(),
            out,
        }
    }

    /// Register a host function in the global scope.
    pub fn define_native(&mut self, name: &str, arity: usize, func: NativeFn<'a>) {
        debug!("Defining native function '{}'", name);

        let native = NativeFunction {
            name: name.to_string(),
            arity,
            func,
        };

        self.globals
            .borrow_mut()
            .define(name, Value::Native(Rc::new(native)));
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs a resolved program. Stops at the first runtime error; output
    /// already written stays written.
    pub fn interpret(&mut self, statements: &[Stmt<'a>], locals: Locals) -> Result<()> {
        info!(
            "Interpreting {} statements with {} resolved locals",
            statements.len(),
            locals.len()
        );

        self.locals = locals;

        for stmt in statements {
            if let Flow::Return(_) = self.execute(stmt)? {
                break;
            }
        }

        self.out.flush()?;

        info!("Interpretation completed successfully");

        Ok(())
    }

    // ───────────────────────────── statements ─────────────────────────────

    /// Executes a single statement.
    pub fn execute(&mut self, stmt: &Stmt<'a>) -> Result<Flow<'a>> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(Flow::Normal)
            }

            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                writeln!(self.out, "{}", value)?;
                debug!("Printed value: {}", value);
                Ok(Flow::Normal)
            }

            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                self.environment.borrow_mut().define(name.lexeme, value);
                Ok(Flow::Normal)
            }

            Stmt::Block(statements) => {
                let scope = Environment::with_enclosing(Rc::clone(&self.environment)).into_ref();
                self.execute_block(statements, scope)
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }

            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    if let Flow::Return(value) = self.execute(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            }

            Stmt::Function(declaration) => {
                debug!("Defining function '{}'", declaration.name.lexeme);
                let function = Function::new(Rc::clone(declaration), Rc::clone(&self.environment));
                self.environment
                    .borrow_mut()
                    .define(declaration.name.lexeme, Value::Function(Rc::new(function)));
                Ok(Flow::Normal)
            }

            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                debug!("Returning value: {}", value);
                Ok(Flow::Return(value))
            }

            Stmt::Class { name, methods } => {
                debug!("Defining class '{}'", name.lexeme);
                let methods: HashMap<String, Rc<Function<'a>>> = methods
                    .iter()
                    .map(|decl| {
                        let method = Function::new(Rc::clone(decl), Rc::clone(&self.environment));
                        (decl.name.lexeme.to_string(), Rc::new(method))
                    })
                    .collect();
                let class = Class {
                    name: name.lexeme.to_string(),
                    methods,
                };
                self.environment
                    .borrow_mut()
                    .define(name.lexeme, Value::Class(Rc::new(class)));
                Ok(Flow::Normal)
            }
        }
    }

    /// Runs `statements` inside `scope`, restoring the previous scope on
    /// every exit path.
    pub fn execute_block(&mut self, statements: &[Stmt<'a>], scope: EnvRef<'a>) -> Result<Flow<'a>> {
        let previous: EnvRef<'a> = std::mem::replace(&mut self.environment, scope);

        let result = self.execute_all(statements);

        self.environment = previous;

        result
    }

    fn execute_all(&mut self, statements: &[Stmt<'a>]) -> Result<Flow<'a>> {
        for stmt in statements {
            if let Flow::Return(value) = self.execute(stmt)? {
                return Ok(Flow::Return(value));
            }
        }

        Ok(Flow::Normal)
    }

    // ──────────────────────────── expressions ─────────────────────────────

    /// Evaluates an expression and returns a Value.
    pub fn evaluate(&mut self, expr: &Expr<'a>) -> Result<Value<'a>> {
        match expr {
            Expr::Literal(literal) => Ok(match literal {
                LiteralValue::Number(n) => Value::Number(*n),
                LiteralValue::Str(s) => Value::String(s.clone()),
                LiteralValue::True => Value::Bool(true),
                LiteralValue::False => Value::Bool(false),
                LiteralValue::Nil => Value::Nil,
            }),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Unary { operator, right } => self.evaluate_unary(operator, right),

            Expr::Binary {
                left,
                operator,
                right,
            } => self.evaluate_binary(left, operator, right),

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;

                // Short-circuit, yielding the deciding operand itself.
                let decided = if operator.token_type == TokenType::OR {
                    left.is_truthy()
                } else {
                    !left.is_truthy()
                };

                if decided {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            }

            Expr::Variable { id, name } => self.look_up_variable(*id, name),

            Expr::Assign { id, name, value } => {
                let value = self.evaluate(value)?;

                match self.locals.get(*id) {
                    Some(distance) => {
                        Environment::assign_at(&self.environment, distance, name, value.clone())?
                    }
                    None => self.globals.borrow_mut().assign(name, value.clone())?,
                }

                Ok(value)
            }

            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee = self.evaluate(callee)?;

                let mut args: Vec<Value<'a>> = Vec::with_capacity(arguments.len());
                for arg in arguments {
                    args.push(self.evaluate(arg)?);
                }

                self.call_value(callee, paren, args)
            }

            Expr::Get { object, name } => match self.evaluate(object)? {
                Value::Instance(instance) => {
                    let value = instance.borrow().get(name)?;
                    Ok(value)
                }
                _ => Err(LoxError::runtime(name, "Only instances have properties.")),
            },

            Expr::Set {
                object,
                name,
                value,
            } => {
                let Value::Instance(instance) = self.evaluate(object)? else {
                    return Err(LoxError::runtime(name, "Only instances have fields."));
                };

                let value = self.evaluate(value)?;
                instance.borrow_mut().set(name, value.clone());

                Ok(value)
            }
        }
    }

    fn look_up_variable(&self, id: ExprId, name: &Token<'_>) -> Result<Value<'a>> {
        match self.locals.get(id) {
            Some(distance) => Environment::get_at(&self.environment, distance, name),
            None => self.globals.borrow().get(name),
        }
    }

    fn evaluate_unary(&mut self, operator: &Token<'_>, right: &Expr<'a>) -> Result<Value<'a>> {
        let right = self.evaluate(right)?;

        match operator.token_type {
            TokenType::MINUS => match right {
                Value::Number(n) => Ok(Value::Number(-n)),
                other => {
                    debug!("Unary '-' on {}", other.type_name());
                    Err(LoxError::runtime(operator, "Operand must be a number."))
                }
            },
            TokenType::BANG => Ok(Value::Bool(!right.is_truthy())),
            _ => Err(LoxError::runtime(operator, "Invalid unary operator.")),
        }
    }

    fn evaluate_binary(
        &mut self,
        left: &Expr<'a>,
        operator: &Token<'_>,
        right: &Expr<'a>,
    ) -> Result<Value<'a>> {
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;

        match operator.token_type {
            TokenType::PLUS => match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
                (a, b) => {
                    debug!("'+' on {} and {}", a.type_name(), b.type_name());
                    Err(LoxError::runtime(
                        operator,
                        "Operands must be two numbers or two strings.",
                    ))
                }
            },
            TokenType::MINUS => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Number(a - b))
            }
            TokenType::STAR => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Number(a * b))
            }
            TokenType::SLASH => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Number(a / b))
            }
            TokenType::GREATER => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Bool(a > b))
            }
            TokenType::GREATER_EQUAL => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Bool(a >= b))
            }
            TokenType::LESS => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Bool(a < b))
            }
            TokenType::LESS_EQUAL => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Bool(a <= b))
            }
            TokenType::EQUAL_EQUAL => Ok(Value::Bool(left == right)),
            TokenType::BANG_EQUAL => Ok(Value::Bool(left != right)),
            _ => Err(LoxError::runtime(operator, "Invalid binary operator.")),
        }
    }

    // ────────────────────────────── calls ─────────────────────────────────

    /// Invokes a callable. Arity and callability are checked before any
    /// callee code runs.
    fn call_value(
        &mut self,
        callee: Value<'a>,
        paren: &Token<'_>,
        args: Vec<Value<'a>>,
    ) -> Result<Value<'a>> {
        let arity: usize = match &callee {
            Value::Native(native) => native.arity,
            Value::Function(function) => function.arity(),
            Value::Class(_) => 0,
            _ => {
                return Err(LoxError::runtime(
                    paren,
                    "Can only call functions and classes.",
                ))
            }
        };

        if args.len() != arity {
            return Err(LoxError::runtime(
                paren,
                format!("Expected {} arguments but got {}.", arity, args.len()),
            ));
        }

        match callee {
            Value::Native(native) => {
                debug!("Calling native function '{}'", native.name);
                (native.func)(&args).map_err(|message| LoxError::runtime(paren, message))
            }

            Value::Function(function) => self.call_function(&function, args),

            Value::Class(class) => {
                debug!("Instantiating class '{}'", class.name);
                Ok(Value::Instance(Rc::new(RefCell::new(Instance::new(class)))))
            }

            _ => Err(LoxError::runtime(
                paren,
                "Can only call functions and classes.",
            )),
        }
    }

    /// Runs a user function body in a fresh scope whose parent is the
    /// function's closure, not the caller's scope.
    fn call_function(&mut self, function: &Function<'a>, args: Vec<Value<'a>>) -> Result<Value<'a>> {
        debug!("Calling user-defined function '{}'", function.name());

        let declaration = Rc::clone(&function.declaration);
        let mut scope = Environment::with_enclosing(Rc::clone(&function.closure));

        for (param, arg) in declaration.params.iter().zip(args) {
            scope.define(param.lexeme, arg);
        }

        match self.execute_block(&declaration.body, scope.into_ref())? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Nil),
        }
    }
}

fn number_operands(operator: &Token<'_>, left: &Value<'_>, right: &Value<'_>) -> Result<(f64, f64)> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => {
            debug!(
                "'{}' on {} and {}",
                operator.lexeme,
                left.type_name(),
                right.type_name()
            );
            Err(LoxError::runtime(operator, "Operands must be numbers."))
        }
    }
}
