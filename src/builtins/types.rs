//! Type predicates: null?, pair?, number?, boolean?, symbol?, list?

use std::rc::Rc;

use super::{bind, one_arg};
use crate::env::Environment;
use crate::error::Error;
use crate::value::{is_list, Node, NodeRef, Value};

pub fn builtin_is_null(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    let value = one_arg(args, env, "null?")?;
    Ok(Value::Bool(matches!(
        &value,
        Value::Node(node) if matches!(**node, Node::Empty)
    )))
}

pub fn builtin_is_pair(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    let value = one_arg(args, env, "pair?")?;
    Ok(Value::Bool(matches!(
        &value,
        Value::Node(node) if matches!(**node, Node::Pair(..))
    )))
}

pub fn builtin_is_number(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    let value = one_arg(args, env, "number?")?;
    Ok(Value::Bool(matches!(value, Value::Int(_))))
}

pub fn builtin_is_boolean(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    let value = one_arg(args, env, "boolean?")?;
    Ok(Value::Bool(matches!(value, Value::Bool(_))))
}

pub fn builtin_is_symbol(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    let value = one_arg(args, env, "symbol?")?;
    Ok(Value::Bool(matches!(
        &value,
        Value::Node(node) if matches!(**node, Node::Var(_))
    )))
}

pub fn builtin_is_list(args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    let value = one_arg(args, env, "list?")?;
    Ok(Value::Bool(match &value {
        Value::Node(node) => is_list(node),
        _ => false,
    }))
}

pub fn register(env: &Rc<Environment>) {
    bind(env, "null?", builtin_is_null);
    bind(env, "pair?", builtin_is_pair);
    bind(env, "number?", builtin_is_number);
    bind(env, "boolean?", builtin_is_boolean);
    bind(env, "symbol?", builtin_is_symbol);
    bind(env, "list?", builtin_is_list);
}
