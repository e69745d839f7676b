//! # Builtin Operators
//!
//! The 38 operators the global scope is populated with, organized by
//! category. Every operator receives its arguments as unevaluated nodes
//! plus the caller's scope, so special forms and value primitives share
//! one registration shape; value primitives simply evaluate each
//! argument up front.
//!
//! ## Categories
//!
//! - **[forms]** (6): define, set!, lambda, quote, if, eval
//! - **[arithmetic]** (7): +, -, *, /, min, max, abs
//! - **[comparison]** (8): =, <, >, <=, >=, eq?, equal?, integer-equal?
//! - **[logic]** (3): and, or, not
//! - **[types]** (6): null?, pair?, number?, boolean?, symbol?, list?
//! - **[lists]** (8): cons, car, cdr, set-car!, set-cdr!, list,
//!   list-ref, list-tail

use std::rc::Rc;

use crate::env::Environment;
use crate::error::Error;
use crate::eval::eval;
use crate::value::{BuiltinFn, Node, NodeRef, Value};

pub mod arithmetic;
pub mod comparison;
pub mod forms;
pub mod lists;
pub mod logic;
pub mod types;

/// Registers every builtin operator into the environment.
pub fn register_builtins(env: &Rc<Environment>) {
    forms::register(env);
    arithmetic::register(env);
    comparison::register(env);
    logic::register(env);
    types::register(env);
    lists::register(env);
}

pub(crate) fn bind(env: &Rc<Environment>, name: &str, run: BuiltinFn) {
    env.define(name.to_string(), Value::Node(Rc::new(Node::Builtin(run))));
}

/// Extracts an integer operand or reports the offending operator.
pub(crate) fn int_arg(value: &Value, op: &str) -> Result<i64, Error> {
    match value {
        Value::Int(n) => Ok(*n),
        _ => Err(Error::runtime(format!("required number in {op}"))),
    }
}

/// Evaluates the single argument of a unary operator.
pub(crate) fn one_arg(args: &[NodeRef], env: &Rc<Environment>, op: &str) -> Result<Value, Error> {
    match args {
        [arg] => eval(arg, env),
        _ => Err(Error::runtime(format!("expected 1 argument in {op}"))),
    }
}
