// ABOUTME: Tree-walking evaluator and lambda application

use std::rc::Rc;

use crate::env::Environment;
use crate::error::Error;
use crate::value::{list_elements, Lambda, Node, NodeRef, Value};

/// Evaluates one node under the given scope.
pub fn eval(node: &NodeRef, env: &Rc<Environment>) -> Result<Value, Error> {
    match &**node {
        Node::Empty => Err(Error::runtime("() is not self evaluating")),
        Node::Const(value) => Ok(value.clone()),
        Node::Var(name) => env.lookup(name),
        Node::Quote(inner) => Ok(Value::Node(Rc::clone(inner))),
        Node::Pair(car, cdr) => {
            let head_node = car.borrow().clone();
            let head = eval(&head_node, env)?;
            let func = match &head {
                Value::Node(func) if func.is_callable() => Rc::clone(func),
                other => {
                    return Err(Error::runtime(format!("{other} is not self evaluating")))
                }
            };
            let tail_node = cdr.borrow().clone();
            let mut args = list_elements(&tail_node);
            match args.pop() {
                Some(tail) if matches!(*tail, Node::Empty) => {}
                _ => return Err(Error::syntax("dotted pair is not self evaluating")),
            }
            apply(&func, &args, env)
        }
        Node::Body(forms) => {
            let mut result = Value::Undefined;
            for form in forms {
                result = eval(form, env)?;
            }
            Ok(result)
        }
        Node::Lambda(_) | Node::Builtin(_) => {
            Err(Error::syntax("function is not self evaluating"))
        }
    }
}

/// Invokes a callable node on unevaluated argument nodes.
pub fn apply(func: &NodeRef, args: &[NodeRef], env: &Rc<Environment>) -> Result<Value, Error> {
    match &**func {
        Node::Lambda(lambda) => lambda.apply(args, env),
        Node::Builtin(run) => run(args, env),
        _ => Err(Error::syntax("function is not self evaluating")),
    }
}

impl Lambda {
    /// Binds actuals to parameters in a fresh scope and evaluates the body.
    ///
    /// Actual argument expressions are evaluated under the captured chain
    /// concatenated with the caller's, captured side winning; the body
    /// additionally sees the fresh parameter frame in front.
    pub fn apply(&self, args: &[NodeRef], caller: &Rc<Environment>) -> Result<Value, Error> {
        if args.len() != self.params.len() {
            return Err(Error::syntax("invalid arguments count in lambda call"));
        }
        let captured = self.env.borrow().clone();
        let full = Environment::concat(&captured, caller);
        let local = Environment::with_parent(captured);
        for (param, arg) in self.params.iter().zip(args) {
            let value = eval(arg, &full)?;
            local.define(param.clone(), value);
        }
        let body_env = Environment::concat(&local, caller);
        eval(&self.body, &body_env)
    }
}
