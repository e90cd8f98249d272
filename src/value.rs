//! Runtime values and the callable/object types behind them.
//!
//! Scalars compare by value; functions, classes and instances compare by
//! identity (`Rc::ptr_eq`).

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::ast::FunctionDecl;
use crate::environment::EnvRef;
use crate::error::{LoxError, Result};
use crate::token::Token;

/// Signature of a host function exposed to scripts.
pub type NativeFn<'a> = fn(&[Value<'a>]) -> std::result::Result<Value<'a>, String>;

/// A host function registered with [`crate::interpreter::Interpreter::define_native`].
pub struct NativeFunction<'a> {
    pub name: String,
    pub arity: usize,
    pub func: NativeFn<'a>,
}

/// A user function: its declaration plus the scope it was declared in.
pub struct Function<'a> {
    pub declaration: Rc<FunctionDecl<'a>>,
    pub closure: EnvRef<'a>,
}

impl<'a> Function<'a> {
    pub fn new(declaration: Rc<FunctionDecl<'a>>, closure: EnvRef<'a>) -> Self {
        Self {
            declaration,
            closure,
        }
    }

    pub fn name(&self) -> &'a str {
        self.declaration.name.lexeme
    }

    pub fn arity(&self) -> usize {
        self.declaration.params.len()
    }
}

/// A class: a name and a method table. Calling it makes an [`Instance`].
pub struct Class<'a> {
    pub name: String,
    pub methods: HashMap<String, Rc<Function<'a>>>,
}

impl<'a> Class<'a> {
    pub fn find_method(&self, name: &str) -> Option<Rc<Function<'a>>> {
        self.methods.get(name).cloned()
    }
}

/// An object: fields set at runtime, falling back to the class's methods.
pub struct Instance<'a> {
    pub class: Rc<Class<'a>>,
    fields: HashMap<String, Value<'a>>,
}

impl<'a> Instance<'a> {
    pub fn new(class: Rc<Class<'a>>) -> Self {
        Self {
            class,
            fields: HashMap::new(),
        }
    }

    /// Field first, then method. Unknown names are an error, never `nil`.
    pub fn get(&self, name: &Token<'_>) -> Result<Value<'a>> {
        if let Some(value) = self.fields.get(name.lexeme) {
            return Ok(value.clone());
        }

        if let Some(method) = self.class.find_method(name.lexeme) {
            return Ok(Value::Function(method));
        }

        Err(LoxError::runtime(
            name,
            format!("Undefined property '{}'.", name.lexeme),
        ))
    }

    pub fn set(&mut self, name: &Token<'_>, value: Value<'a>) {
        self.fields.insert(name.lexeme.to_string(), value);
    }
}

/// Every value a script can observe.
#[derive(Clone)]
pub enum Value<'a> {
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
    Native(Rc<NativeFunction<'a>>),
    Function(Rc<Function<'a>>),
    Class(Rc<Class<'a>>),
    Instance(Rc<RefCell<Instance<'a>>>),
}

impl Value<'_> {
    /// `nil` and `false` are falsy; everything else (including `0` and `""`) is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// Human‑readable kind, logged when an operator gets the wrong operand types.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Native(_) | Value::Function(_) => "function",
            Value::Class(_) => "class",
            Value::Instance(_) => "instance",
        }
    }
}

impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Native(a), Value::Native(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Number formatting for `print`: integral values drop the fraction.
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        write!(f, "NaN")
    } else if n.is_infinite() {
        write!(f, "{}Infinity", if n < 0.0 { "-" } else { "" })
    } else if n.fract() == 0.0 {
        write!(f, "{:.0}", n)
    } else {
        write!(f, "{}", n)
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write_number(f, *n),
            Value::String(s) => write!(f, "{}", s),
            Value::Native(native) => write!(f, "<native fn {}>", native.name),
            Value::Function(function) => write!(f, "<fn {}>", function.name()),
            Value::Class(class) => write!(f, "{}", class.name),
            Value::Instance(instance) => write!(f, "{} instance", instance.borrow().class.name),
        }
    }
}

// Environments can contain the closures that point back at them, so Debug
// never descends into a closure.
impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s),
            other => write!(f, "{}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness_only_nil_and_false_are_falsy() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Number(0.0).is_truthy());
        assert!(Value::String(String::new()).is_truthy());
    }

    #[test]
    fn numbers_print_without_trailing_zero() {
        assert_eq!(Value::Number(7.0).to_string(), "7");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Number(-3.0).to_string(), "-3");
        assert_eq!(Value::Number(1.0 / 0.0).to_string(), "Infinity");
    }

    #[test]
    fn type_names_group_callables() {
        assert_eq!(Value::Nil.type_name(), "nil");
        assert_eq!(Value::Number(1.0).type_name(), "number");
        assert_eq!(Value::String("s".into()).type_name(), "string");

        let class = Rc::new(Class {
            name: "Box".to_string(),
            methods: HashMap::new(),
        });
        let instance = Instance::new(Rc::clone(&class));
        assert_eq!(Value::Class(class).type_name(), "class");
        assert_eq!(
            Value::Instance(Rc::new(RefCell::new(instance))).type_name(),
            "instance"
        );
    }

    #[test]
    fn nil_equals_only_nil() {
        assert_eq!(Value::Nil, Value::Nil);
        assert_ne!(Value::Nil, Value::Bool(false));
        assert_ne!(Value::Number(0.0), Value::String("0".into()));
    }
}
