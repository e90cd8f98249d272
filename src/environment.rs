use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use crate::error::{LoxError, Result};
use crate::token::Token;
use crate::value::Value;

/// Shared handle to a scope. Closures keep their defining scope alive
/// through one of these, so scope lifetime is not tied to the call stack.
pub type EnvRef<'a> = Rc<RefCell<Environment<'a>>>;

/// One lexical scope: name → value plus a link to the enclosing scope
/// (`None` only for the globals).
#[derive(Debug, Default)]
pub struct Environment<'a> {
    values: HashMap<String, Value<'a>>,
    enclosing: Option<EnvRef<'a>>,
}

impl<'a> Environment<'a> {
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: EnvRef<'a>) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Wrap into a shared handle.
    pub fn into_ref(self) -> EnvRef<'a> {
        Rc::new(RefCell::new(self))
    }

    /// Bind `name` in *this* scope. Rebinding an existing name overwrites it.
    pub fn define(&mut self, name: &str, value: Value<'a>) {
        debug!("define '{}' = {}", name, value);
        self.values.insert(name.to_string(), value);
    }

    /// Look `name` up, walking outward to the first scope that binds it.
    pub fn get(&self, name: &Token<'_>) -> Result<Value<'a>> {
        if let Some(value) = self.values.get(name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(undefined(name))
        }
    }

    /// Reassign `name` in the nearest scope that binds it.
    pub fn assign(&mut self, name: &Token<'_>, value: Value<'a>) -> Result<()> {
        if let Some(slot) = self.values.get_mut(name.lexeme) {
            *slot = value;
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(undefined(name))
        }
    }

    /// The scope exactly `distance` enclosing links above `env`.
    pub fn ancestor(env: &EnvRef<'a>, distance: usize) -> Option<EnvRef<'a>> {
        let mut current: EnvRef<'a> = Rc::clone(env);

        for _ in 0..distance {
            let next = current.borrow().enclosing.clone()?;
            current = next;
        }

        Some(current)
    }

    /// Read `name` from the scope `distance` hops out, without searching.
    pub fn get_at(env: &EnvRef<'a>, distance: usize, name: &Token<'_>) -> Result<Value<'a>> {
        let scope = Self::ancestor(env, distance).ok_or_else(|| undefined(name))?;
        let scope = scope.borrow();

        scope
            .values
            .get(name.lexeme)
            .cloned()
            .ok_or_else(|| undefined(name))
    }

    /// Write `name` in the scope `distance` hops out, without searching.
    pub fn assign_at(
        env: &EnvRef<'a>,
        distance: usize,
        name: &Token<'_>,
        value: Value<'a>,
    ) -> Result<()> {
        let scope = Self::ancestor(env, distance).ok_or_else(|| undefined(name))?;
        let mut scope = scope.borrow_mut();

        match scope.values.get_mut(name.lexeme) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(undefined(name)),
        }
    }
}

fn undefined(name: &Token<'_>) -> LoxError {
    LoxError::runtime(name, format!("Undefined variable '{}'.", name.lexeme))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenType;

    fn ident(name: &str) -> Token<'_> {
        Token::new(TokenType::IDENTIFIER, name, 1)
    }

    #[test]
    fn inner_scope_shadows_without_touching_outer() {
        let outer = Environment::new().into_ref();
        outer.borrow_mut().define("a", Value::Number(1.0));

        let inner = Environment::with_enclosing(Rc::clone(&outer)).into_ref();
        inner.borrow_mut().define("a", Value::Number(2.0));

        assert_eq!(inner.borrow().get(&ident("a")).unwrap(), Value::Number(2.0));
        assert_eq!(outer.borrow().get(&ident("a")).unwrap(), Value::Number(1.0));
    }

    #[test]
    fn assign_at_targets_exact_hop() {
        let global = Environment::new().into_ref();
        global.borrow_mut().define("x", Value::Number(0.0));
        let middle = Environment::with_enclosing(Rc::clone(&global)).into_ref();
        middle.borrow_mut().define("x", Value::Number(10.0));
        let inner = Environment::with_enclosing(Rc::clone(&middle)).into_ref();

        Environment::assign_at(&inner, 2, &ident("x"), Value::Number(5.0)).unwrap();

        assert_eq!(
            Environment::get_at(&inner, 1, &ident("x")).unwrap(),
            Value::Number(10.0)
        );
        assert_eq!(
            Environment::get_at(&inner, 2, &ident("x")).unwrap(),
            Value::Number(5.0)
        );
    }

    #[test]
    fn missing_name_is_runtime_error() {
        let env = Environment::new().into_ref();
        let err = env.borrow().get(&ident("nope")).unwrap_err();

        assert_eq!(err.message(), "Undefined variable 'nope'.");
        assert!(env.borrow_mut().assign(&ident("nope"), Value::Nil).is_err());
    }
}
