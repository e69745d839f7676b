//! Comparison operations: =, <, >, <=, >=, eq?, equal?, integer-equal?
//!
//! The numeric chain operators accept any number of integer arguments
//! and are vacuously true on an empty or single-element sequence.
//! `eq?` is identity-based equality with value exceptions, `equal?` is
//! structural.

use std::rc::Rc;

use super::{bind, int_arg};
use crate::env::Environment;
use crate::error::Error;
use crate::eval::eval;
use crate::value::{is_list, list_elements, Node, NodeRef, Value};

/// `=`: all arguments equal the first.
pub fn builtin_num_eq(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    let Some((first, rest)) = args.split_first() else {
        return Ok(Value::Bool(true));
    };
    let target = int_arg(&eval(first, env)?, "=")?;
    let mut result = true;
    for arg in rest {
        result = int_arg(&eval(arg, env)?, "=")? == target && result;
    }
    Ok(Value::Bool(result))
}

/// Checks a pairwise relation along the argument sequence. Every
/// argument is evaluated even once the result is settled.
fn monotone(
    args: &[NodeRef],
    env: &Rc<Environment>,
    op: &str,
    holds: fn(i64, i64) -> bool,
) -> Result<Value, Error> {
    let Some((first, rest)) = args.split_first() else {
        return Ok(Value::Bool(true));
    };
    let mut current = int_arg(&eval(first, env)?, op)?;
    let mut result = true;
    for arg in rest {
        let next = int_arg(&eval(arg, env)?, op)?;
        result = holds(current, next) && result;
        current = next;
    }
    Ok(Value::Bool(result))
}

pub fn builtin_less(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    monotone(args, env, "<", |a, b| a < b)
}

pub fn builtin_greater(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    monotone(args, env, ">", |a, b| a > b)
}

pub fn builtin_less_eq(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    monotone(args, env, "<=", |a, b| a <= b)
}

pub fn builtin_greater_eq(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    monotone(args, env, ">=", |a, b| a >= b)
}

/// `eq?`: node identity, except Ints and Bools compare by value, Vars
/// by name, and two empty lists are always equal.
pub fn builtin_eq(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    if args.len() != 2 {
        return Err(Error::runtime("expected 2 arguments in eq?"));
    }
    let first = eval(&args[0], env)?;
    let second = eval(&args[1], env)?;
    Ok(Value::Bool(eq_values(&first, &second)))
}

fn eq_values(first: &Value, second: &Value) -> bool {
    match (first, second) {
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Node(a), Value::Node(b)) => match (&**a, &**b) {
            (Node::Empty, Node::Empty) => true,
            (Node::Var(x), Node::Var(y)) => x == y,
            _ => Rc::ptr_eq(a, b),
        },
        _ => false,
    }
}

/// `equal?`: structural recursive equality.
pub fn builtin_equal(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    if args.len() != 2 {
        return Err(Error::runtime("expected 2 arguments in equal?"));
    }
    let first = eval(&args[0], env)?;
    let second = eval(&args[1], env)?;
    Ok(Value::Bool(equal_values(&first, &second)))
}

fn equal_values(first: &Value, second: &Value) -> bool {
    match (first, second) {
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Node(a), Value::Node(b)) => equal_nodes(a, b),
        _ => false,
    }
}

/// Pairs compare by flattened shape: equal length, element-wise equal,
/// and a proper list never equals an improper one.
fn equal_nodes(first: &NodeRef, second: &NodeRef) -> bool {
    match (&**first, &**second) {
        (Node::Empty, Node::Empty) => true,
        (Node::Var(a), Node::Var(b)) => a == b,
        (Node::Const(a), Node::Const(b)) => equal_values(a, b),
        (Node::Quote(a), Node::Quote(b)) => equal_nodes(a, b),
        (Node::Pair(..), Node::Pair(..)) => {
            let mut left = list_elements(first);
            let mut right = list_elements(second);
            if left.len() != right.len() {
                return false;
            }
            match (is_list(first), is_list(second)) {
                (true, true) => {
                    left.pop();
                    right.pop();
                }
                (false, false) => {}
                _ => return false,
            }
            left.iter().zip(&right).all(|(a, b)| equal_nodes(a, b))
        }
        _ => Rc::ptr_eq(first, second),
    }
}

/// `integer-equal?`: both arguments must be integers.
pub fn builtin_int_equal(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    if args.len() != 2 {
        return Err(Error::runtime("expected 2 arguments in integer-equal?"));
    }
    match (eval(&args[0], env)?, eval(&args[1], env)?) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a == b)),
        _ => Err(Error::runtime("expected integers in integer-equal?")),
    }
}

pub fn register(env: &Rc<Environment>) {
    bind(env, "=", builtin_num_eq);
    bind(env, "<", builtin_less);
    bind(env, ">", builtin_greater);
    bind(env, "<=", builtin_less_eq);
    bind(env, ">=", builtin_greater_eq);
    bind(env, "eq?", builtin_eq);
    bind(env, "equal?", builtin_equal);
    bind(env, "integer-equal?", builtin_int_equal);
}
