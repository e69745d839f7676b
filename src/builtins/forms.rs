//! Special forms: define, set!, lambda, quote, if, eval
//!
//! These receive their arguments unevaluated and decide themselves
//! when, and under which scope, to evaluate them.

use std::cell::RefCell;
use std::rc::Rc;

use super::bind;
use crate::env::Environment;
use crate::error::Error;
use crate::eval::eval;
use crate::value::{list_elements, Lambda, Node, NodeRef, Value};

/// `(define name expr)` binds in the current scope;
/// `(define (name params...) body...)` is function-declaration sugar.
pub fn builtin_define(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    if args.len() < 2 {
        return Err(Error::syntax("expected 2 arguments in define"));
    }
    match &*args[0] {
        Node::Var(name) => {
            if args.len() != 2 {
                return Err(Error::syntax("expected 2 arguments in define"));
            }
            let value = eval(&args[1], env)?;
            env.define(name.clone(), value);
            Ok(Value::Node(Rc::new(Node::Empty)))
        }
        Node::Pair(..) => {
            let mut declaration = list_elements(&args[0]);
            declaration.pop();
            let mut names = Vec::with_capacity(declaration.len());
            for part in declaration {
                match &*part {
                    Node::Var(name) => names.push(name.clone()),
                    _ => return Err(Error::syntax("invalid function declaration")),
                }
            }
            let name = names.remove(0);
            let lambda = Lambda {
                params: names,
                body: Rc::new(Node::Body(args[1..].to_vec())),
                env: RefCell::new(Rc::clone(env)),
            };
            env.define(name, Value::Node(Rc::new(Node::Lambda(lambda))));
            Ok(Value::Node(Rc::new(Node::Empty)))
        }
        _ => Err(Error::syntax("invalid define syntax")),
    }
}

/// `(set! name expr)` rebinds in the nearest scope defining the name.
pub fn builtin_set(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    if args.len() != 2 {
        return Err(Error::syntax("expected 2 arguments in set!"));
    }
    let value = eval(&args[1], env)?;
    let name = match &*args[0] {
        Node::Var(name) => name.clone(),
        other => other.to_string(),
    };
    env.assign(&name, value)?;
    Ok(Value::Node(Rc::new(Node::Empty)))
}

/// `(lambda params body...)`. A non-pair parameter position (such as the
/// empty list) yields a parameterless function.
pub fn builtin_lambda(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    if args.len() < 2 {
        return Err(Error::syntax("invalid lambda definition"));
    }
    let mut params = Vec::new();
    if let Node::Pair(..) = &*args[0] {
        let mut declaration = list_elements(&args[0]);
        declaration.pop();
        for part in declaration {
            match &*part {
                Node::Var(name) => params.push(name.clone()),
                _ => return Err(Error::syntax("invalid function declaration")),
            }
        }
    }
    let lambda = Lambda {
        params,
        body: Rc::new(Node::Body(args[1..].to_vec())),
        env: RefCell::new(Rc::clone(env)),
    };
    Ok(Value::Node(Rc::new(Node::Lambda(lambda))))
}

/// `(quote expr)` wraps the argument node without evaluating it.
pub fn builtin_quote(args: &[NodeRef], _env: &Rc<Environment>) -> Result<Value, Error> {
    if args.len() != 1 {
        return Err(Error::syntax("expected 1 argument in quote"));
    }
    Ok(Value::Node(Rc::clone(&args[0])))
}

/// `(if cond then)` / `(if cond then else)`. A false condition with no
/// else branch yields no value, so the prompt prints nothing.
pub fn builtin_if(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    if !(args.len() == 2 || args.len() == 3) {
        return Err(Error::syntax("expected 2 or 3 arguments in if"));
    }
    if eval(&args[0], env)?.is_truthy() {
        eval(&args[1], env)
    } else if args.len() == 3 {
        eval(&args[2], env)
    } else {
        Ok(Value::Undefined)
    }
}

/// `(eval expr)` evaluates the argument's value a second time in the
/// current scope.
pub fn builtin_eval(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    if args.len() != 1 {
        return Err(Error::runtime("expected 1 argument in eval"));
    }
    match eval(&args[0], env)? {
        Value::Node(node) => eval(&node, env),
        _ => Err(Error::runtime("not self evaluating")),
    }
}

pub fn register(env: &Rc<Environment>) {
    bind(env, "define", builtin_define);
    bind(env, "set!", builtin_set);
    bind(env, "lambda", builtin_lambda);
    bind(env, "quote", builtin_quote);
    bind(env, "if", builtin_if);
    bind(env, "eval", builtin_eval);
}
