//! List operations: cons, car, cdr, set-car!, set-cdr!, list,
//! list-ref, list-tail
//!
//! Pairs are shared and mutable in place; `cons` and `list` promote
//! their evaluated arguments back to nodes.

use std::cell::RefCell;
use std::rc::Rc;

use super::bind;
use crate::env::Environment;
use crate::error::Error;
use crate::eval::eval;
use crate::value::{
    is_list, list_elements, list_from_vec, node_from_value, Node, NodeRef, Value,
};

pub fn builtin_cons(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    if args.len() != 2 {
        return Err(Error::runtime("expected 2 arguments in cons"));
    }
    let car = node_from_value(&eval(&args[0], env)?)?;
    let cdr = node_from_value(&eval(&args[1], env)?)?;
    Ok(Value::Node(Rc::new(Node::Pair(
        RefCell::new(car),
        RefCell::new(cdr),
    ))))
}

pub fn builtin_car(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    if args.len() != 1 {
        return Err(Error::runtime("expected 1 argument in car"));
    }
    let node = node_from_value(&eval(&args[0], env)?)?;
    match &*node {
        Node::Pair(car, _) => Ok(Value::Node(car.borrow().clone())),
        _ => Err(Error::runtime("expected pair in car")),
    }
}

pub fn builtin_cdr(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    if args.len() != 1 {
        return Err(Error::runtime("expected 1 argument in cdr"));
    }
    let node = node_from_value(&eval(&args[0], env)?)?;
    match &*node {
        Node::Pair(_, cdr) => Ok(Value::Node(cdr.borrow().clone())),
        _ => Err(Error::runtime("expected pair in cdr")),
    }
}

pub fn builtin_set_car(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    if args.len() != 2 {
        return Err(Error::runtime("expected 2 arguments in set-car!"));
    }
    let node = node_from_value(&eval(&args[0], env)?)?;
    match &*node {
        Node::Pair(car, _) => {
            let value = node_from_value(&eval(&args[1], env)?)?;
            *car.borrow_mut() = value;
            Ok(Value::Node(Rc::new(Node::Empty)))
        }
        _ => Err(Error::runtime("expected pair in set-car!")),
    }
}

pub fn builtin_set_cdr(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    if args.len() != 2 {
        return Err(Error::runtime("expected 2 arguments in set-cdr!"));
    }
    let node = node_from_value(&eval(&args[0], env)?)?;
    match &*node {
        Node::Pair(_, cdr) => {
            let value = node_from_value(&eval(&args[1], env)?)?;
            *cdr.borrow_mut() = value;
            Ok(Value::Node(Rc::new(Node::Empty)))
        }
        _ => Err(Error::runtime("expected pair in set-cdr!")),
    }
}

/// Builds a proper list from the evaluated arguments.
pub fn builtin_list(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    let mut elements = Vec::with_capacity(args.len());
    for arg in args {
        elements.push(node_from_value(&eval(arg, env)?)?);
    }
    Ok(Value::Node(list_from_vec(elements)))
}

fn list_index(args: &[NodeRef], env: &Rc<Environment>, op: &str) -> Result<(Vec<NodeRef>, usize), Error> {
    let node = node_from_value(&eval(&args[0], env)?)?;
    if !is_list(&node) {
        return Err(Error::runtime(format!("expected list in {op}")));
    }
    let elements = list_elements(&node);
    let position = match eval(&args[1], env)? {
        Value::Int(position) => position,
        _ => return Err(Error::runtime("expected number for index")),
    };
    let index =
        usize::try_from(position).map_err(|_| Error::runtime("index out of range"))?;
    Ok((elements, index))
}

/// `(list-ref lst n)` returns the n-th element of a proper list.
pub fn builtin_list_ref(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    if args.len() != 2 {
        return Err(Error::runtime("expected 2 arguments in list-ref"));
    }
    let (mut elements, index) = list_index(args, env, "list-ref")?;
    elements.pop();
    let element = elements
        .get(index)
        .ok_or_else(|| Error::runtime("index out of range"))?;
    Ok(Value::Node(Rc::clone(element)))
}

/// `(list-tail lst n)` returns the tail starting at index n, rebuilt as
/// a proper list. The index may equal the length, yielding `()`.
pub fn builtin_list_tail(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    if args.len() != 2 {
        return Err(Error::runtime("expected 2 arguments in list-tail"));
    }
    let (mut elements, index) = list_index(args, env, "list-tail")?;
    if index >= elements.len() {
        return Err(Error::runtime("index out of range"));
    }
    let mut rest = elements.split_off(index);
    rest.pop();
    Ok(Value::Node(list_from_vec(rest)))
}

pub fn register(env: &Rc<Environment>) {
    bind(env, "cons", builtin_cons);
    bind(env, "car", builtin_car);
    bind(env, "cdr", builtin_cdr);
    bind(env, "set-car!", builtin_set_car);
    bind(env, "set-cdr!", builtin_set_cdr);
    bind(env, "list", builtin_list);
    bind(env, "list-ref", builtin_list_ref);
    bind(env, "list-tail", builtin_list_tail);
}
