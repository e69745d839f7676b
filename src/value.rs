// ABOUTME: Value types and the shared syntax-tree nodes they wrap

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::env::Environment;
use crate::error::Error;

pub type NodeRef = Rc<Node>;

/// Signature shared by every builtin operator. Arguments arrive as
/// unevaluated nodes and each operator decides when to evaluate them,
/// which lets special forms and value primitives share one shape.
pub type BuiltinFn = fn(&[NodeRef], &Rc<Environment>) -> Result<Value, Error>;

/// A runtime value. Cloning is cheap; the `Node` variant shares the
/// referenced tree instead of copying it.
#[derive(Debug, Clone)]
pub enum Value {
    /// Sentinel for an unset slot, never user-visible.
    Undefined,
    Int(i64),
    Bool(bool),
    Node(NodeRef),
}

impl Value {
    /// Everything is truthy except `#f`.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Bool(false))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => Ok(()),
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{}", if *b { "#t" } else { "#f" }),
            Value::Node(node) => write!(f, "{node}"),
        }
    }
}

/// A user-defined function: parameter names, a `Node::Body`, and the
/// definition-time environment.
#[derive(Debug)]
pub struct Lambda {
    pub params: Vec<String>,
    pub body: NodeRef,
    /// Behind a `RefCell` so interpreter teardown can drop it and break
    /// the closure/scope reference cycle.
    pub env: RefCell<Rc<Environment>>,
}

#[derive(Debug)]
pub enum Node {
    /// The empty list `()`. Not self-evaluating.
    Empty,
    /// Self-evaluating literal; holds `Int` or `Bool` only.
    Const(Value),
    /// Identifier, evaluated by scope lookup.
    Var(String),
    /// `'x`; evaluates to the held node without evaluating it.
    Quote(NodeRef),
    /// Cons cell. Mutable in place via set-car!/set-cdr!.
    Pair(RefCell<NodeRef>, RefCell<NodeRef>),
    /// Ordered lambda-body forms; evaluates to the last form's value.
    Body(Vec<NodeRef>),
    Lambda(Lambda),
    Builtin(BuiltinFn),
}

impl Node {
    pub fn is_callable(&self) -> bool {
        matches!(self, Node::Lambda(_) | Node::Builtin(_))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Empty => write!(f, "()"),
            Node::Const(value) => write!(f, "{value}"),
            Node::Var(name) => write!(f, "{name}"),
            Node::Quote(inner) => write!(f, "'{inner}"),
            Node::Pair(car, cdr) => {
                write!(f, "({}", car.borrow())?;
                let mut cursor = cdr.borrow().clone();
                loop {
                    let next = match &*cursor {
                        Node::Empty => break,
                        Node::Pair(car, cdr) => {
                            write!(f, " {}", car.borrow())?;
                            cdr.borrow().clone()
                        }
                        tail => {
                            write!(f, " . {tail}")?;
                            break;
                        }
                    };
                    cursor = next;
                }
                write!(f, ")")
            }
            Node::Body(forms) => {
                for (i, form) in forms.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{form}")?;
                }
                Ok(())
            }
            Node::Lambda(_) | Node::Builtin(_) => write!(f, "function"),
        }
    }
}

/// Flattens a pair chain into its elements. The final non-pair tail is
/// included as the last element, so a proper list ends with `Empty`.
/// A non-pair node flattens to itself alone.
pub fn list_elements(node: &NodeRef) -> Vec<NodeRef> {
    let mut elements = Vec::new();
    let mut cursor = Rc::clone(node);
    loop {
        let next = match &*cursor {
            Node::Pair(car, cdr) => {
                elements.push(car.borrow().clone());
                cdr.borrow().clone()
            }
            _ => {
                elements.push(cursor);
                return elements;
            }
        };
        cursor = next;
    }
}

/// True for `Empty` and for pair chains whose rightmost tail is `Empty`.
pub fn is_list(node: &NodeRef) -> bool {
    match &**node {
        Node::Empty => true,
        Node::Pair(..) => list_elements(node)
            .last()
            .is_some_and(|tail| matches!(**tail, Node::Empty)),
        _ => false,
    }
}

/// Right-folds `elements` onto `tail` as nested pairs.
pub fn list_with_tail(mut elements: Vec<NodeRef>, tail: NodeRef) -> NodeRef {
    let mut node = tail;
    while let Some(element) = elements.pop() {
        node = Rc::new(Node::Pair(RefCell::new(element), RefCell::new(node)));
    }
    node
}

/// Builds a proper list with the implicit `Empty` tail.
pub fn list_from_vec(elements: Vec<NodeRef>) -> NodeRef {
    list_with_tail(elements, Rc::new(Node::Empty))
}

/// Promotes a value to a node: Int and Bool become `Const`, a node
/// passes through unchanged.
pub fn node_from_value(value: &Value) -> Result<NodeRef, Error> {
    match value {
        Value::Int(_) | Value::Bool(_) => Ok(Rc::new(Node::Const(value.clone()))),
        Value::Node(node) => Ok(Rc::clone(node)),
        Value::Undefined => Err(Error::runtime("unexpectable argument type")),
    }
}
