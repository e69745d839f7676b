// ABOUTME: Environment module managing variable bindings and the scope chain

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::Error;
use crate::value::{Node, Value};

/// A node in a parent-linked scope chain. The binding table sits behind
/// its own `Rc` so that [`Environment::concat`] can rebuild a chain that
/// shares tables with the originals.
#[derive(Debug)]
pub struct Environment {
    bindings: Rc<RefCell<HashMap<String, Value>>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a new root environment with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: Rc::new(RefCell::new(HashMap::new())),
            parent: None,
        })
    }

    /// Creates a new child environment with a parent.
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: Rc::new(RefCell::new(HashMap::new())),
            parent: Some(parent),
        })
    }

    /// Adds or overwrites a binding in THIS scope (doesn't walk parents).
    pub fn define(&self, name: String, value: Value) {
        self.bindings.borrow_mut().insert(name, value);
    }

    /// Looks a name up in this scope and its parents, first hit wins.
    pub fn lookup(&self, name: &str) -> Result<Value, Error> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Ok(value.clone());
        }
        match &self.parent {
            Some(parent) => parent.lookup(name),
            None => Err(Error::name(format!("undefined name {name}"))),
        }
    }

    /// Rebinds a name in the nearest enclosing scope that defines it.
    pub fn assign(&self, name: &str, value: Value) -> Result<(), Error> {
        if self.bindings.borrow().contains_key(name) {
            self.bindings.borrow_mut().insert(name.to_string(), value);
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.assign(name, value),
            None => Err(Error::name(format!("undefined name {name}"))),
        }
    }

    /// Builds a chain where lookups fall through all of `first` before
    /// entering `second`. The chain nodes are fresh but the binding
    /// tables are shared, so mutations through either input stay visible.
    pub fn concat(first: &Rc<Environment>, second: &Rc<Environment>) -> Rc<Environment> {
        let mut tables = Vec::new();
        let mut cursor = Some(Rc::clone(first));
        while let Some(env) = cursor {
            tables.push(Rc::clone(&env.bindings));
            cursor = env.parent.clone();
        }
        let mut cursor = Some(Rc::clone(second));
        while let Some(env) = cursor {
            tables.push(Rc::clone(&env.bindings));
            cursor = env.parent.clone();
        }
        let mut chain: Option<Rc<Environment>> = None;
        for bindings in tables.into_iter().rev() {
            chain = Some(Rc::new(Environment {
                bindings,
                parent: chain,
            }));
        }
        chain.unwrap_or_else(Environment::new)
    }

    /// Drops the captured environment of every lambda bound in this
    /// scope. Self-referential closures keep their defining scope alive
    /// through an `Rc` cycle; this severs it at interpreter teardown.
    pub fn break_cycles(&self) {
        for value in self.bindings.borrow().values() {
            if let Value::Node(node) = value {
                if let Node::Lambda(lambda) = &**node {
                    *lambda.env.borrow_mut() = Environment::new();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_lookup() {
        let env = Environment::new();
        env.define("x".to_string(), Value::Int(42));

        match env.lookup("x") {
            Ok(Value::Int(n)) => assert_eq!(n, 42),
            other => panic!("expected Int(42), got {other:?}"),
        }
    }

    #[test]
    fn test_undefined_name() {
        let env = Environment::new();
        let err = env.lookup("missing").unwrap_err();
        assert_eq!(err.to_string(), "NameError: undefined name missing");
    }

    #[test]
    fn test_shadowing() {
        let parent = Environment::new();
        parent.define("x".to_string(), Value::Int(1));

        let child = Environment::with_parent(parent);
        child.define("x".to_string(), Value::Int(2));

        assert!(matches!(child.lookup("x"), Ok(Value::Int(2))));
    }

    #[test]
    fn test_parent_lookup() {
        let parent = Environment::new();
        parent.define("x".to_string(), Value::Int(1));

        let child = Environment::with_parent(Rc::clone(&parent));
        assert!(matches!(child.lookup("x"), Ok(Value::Int(1))));
    }

    #[test]
    fn test_assign_rebinds_in_owning_scope() {
        let parent = Environment::new();
        parent.define("x".to_string(), Value::Int(1));

        let child = Environment::with_parent(Rc::clone(&parent));
        child.assign("x", Value::Int(5)).unwrap();

        assert!(matches!(parent.lookup("x"), Ok(Value::Int(5))));
    }

    #[test]
    fn test_assign_unbound_fails_without_creating_binding() {
        let env = Environment::new();
        assert!(env.assign("y", Value::Int(1)).is_err());
        assert!(env.lookup("y").is_err());
    }

    #[test]
    fn test_concat_order_and_shared_tables() {
        let first = Environment::new();
        first.define("a".to_string(), Value::Int(1));
        first.define("both".to_string(), Value::Int(10));

        let second = Environment::new();
        second.define("b".to_string(), Value::Int(2));
        second.define("both".to_string(), Value::Int(20));

        let joined = Environment::concat(&first, &second);
        assert!(matches!(joined.lookup("a"), Ok(Value::Int(1))));
        assert!(matches!(joined.lookup("b"), Ok(Value::Int(2))));
        // `first` wins for names bound on both sides.
        assert!(matches!(joined.lookup("both"), Ok(Value::Int(10))));

        // Mutations through the originals stay visible.
        second.define("b".to_string(), Value::Int(7));
        assert!(matches!(joined.lookup("b"), Ok(Value::Int(7))));

        // And assignments through the concatenation reach the originals.
        joined.assign("b", Value::Int(9)).unwrap();
        assert!(matches!(second.lookup("b"), Ok(Value::Int(9))));
    }
}
