use crate::core;
use crate::types::{Symbol, Value};
use itertools::Itertools;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

pub type Scope = HashMap<Symbol, Value>;

/// One frame of the scope chain.
///
/// Lookups consult the builtin library before anything else, so a name from
/// `core::CORE` can never be rebound: a `let` or parameter of the same name is
/// stored but never read.
#[derive(Default)]
pub struct Environment {
    scope: RefCell<Scope>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    pub fn root() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn child_scope(bindings: Scope, parent: &Rc<Environment>) -> Rc<Self> {
        Rc::new(Self {
            scope: RefCell::new(bindings),
            parent: Some(parent.clone()),
        })
    }

    pub fn spawn_from(parent: &Rc<Environment>) -> Rc<Self> {
        Self::child_scope(Scope::new(), parent)
    }

    pub fn define<T>(&self, key: T, value: Value) -> Option<Value>
    where
        T: Into<Symbol>,
    {
        self.scope.borrow_mut().insert(key.into(), value)
    }

    pub fn get(&self, key: &Symbol) -> Value {
        if let Some(&func) = core::CORE.get(key.as_str()) {
            return Value::Primitive(func);
        }
        self.lookup(key).unwrap_or(Value::Absent)
    }

    fn lookup(&self, key: &Symbol) -> Option<Value> {
        match self.scope.borrow().get(key) {
            Some(value) => Some(value.clone()),
            None => self.parent.as_ref().and_then(|parent| parent.lookup(key)),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.scope.borrow().keys().map(|k| k.as_str()).sorted().join(", "))?;
        if let Some(parent) = &self.parent {
            write!(f, " -> {}", parent)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_names_are_absent() {
        let env = Environment::root();
        assert!(env.get(&"nope".into()).is_absent());
    }

    #[test]
    fn children_see_parent_bindings() {
        let root = Environment::root();
        root.define("x", Value::from(1.0));
        let child = Environment::spawn_from(&root);
        child.define("y", Value::from(2.0));
        assert_eq!(child.get(&"x".into()), Value::from(1.0));
        assert_eq!(child.get(&"y".into()), Value::from(2.0));
        assert!(root.get(&"y".into()).is_absent());
    }

    #[test]
    fn local_bindings_shadow_parents() {
        let root = Environment::root();
        root.define("x", Value::from(1.0));
        let mut bindings = Scope::new();
        bindings.insert("x".into(), Value::from(2.0));
        let child = Environment::child_scope(bindings, &root);
        assert_eq!(child.get(&"x".into()), Value::from(2.0));
        assert_eq!(root.get(&"x".into()), Value::from(1.0));
    }

    #[test]
    fn builtins_cannot_be_shadowed() {
        let root = Environment::root();
        root.define("head", Value::from(1.0));
        match root.get(&"head".into()) {
            Value::Primitive(f) => assert_eq!(f.name, "head"),
            other => panic!("expected the builtin, got {:?}", other),
        }
    }

    #[test]
    fn define_replaces_existing_binding() {
        let env = Environment::root();
        assert!(env.define("x", Value::from(1.0)).is_none());
        assert_eq!(env.define("x", Value::from(2.0)), Some(Value::from(1.0)));
        assert_eq!(env.get(&"x".into()), Value::from(2.0));
    }
}
