extern crate derive_more;
use crate::environment::Environment;
use crate::evaluator;
use derive_more::Deref;
use itertools::Itertools;
use std::fmt;
use std::fmt::Formatter;
use std::ops::{RangeFrom, RangeInclusive};
use std::rc::Rc;

#[derive(Deref, Debug, PartialEq, Eq, Hash, Clone)]
pub struct Symbol(pub String);

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol(name.into())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    String(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    Literal(Literal),
    Identifier(Symbol),
}

#[derive(Deref, Debug, PartialEq)]
pub struct NodeList(pub Vec<Node>);

/// A node of the syntax tree. Lists are reference counted so that closures can
/// hold on to their bodies without copying them.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Atom(Atom),
    List(Rc<NodeList>),
}

impl Node {
    pub fn wrap_list(elements: Vec<Node>) -> Self {
        Self::List(Rc::new(NodeList(elements)))
    }

    pub fn number(value: f64) -> Self {
        Self::Atom(Atom::Literal(Literal::Number(value)))
    }

    pub fn string(value: &str) -> Self {
        Self::Atom(Atom::Literal(Literal::String(value.into())))
    }

    pub fn identifier(name: &str) -> Self {
        Self::Atom(Atom::Identifier(name.into()))
    }

    pub(crate) fn as_identifier(&self) -> Option<&Symbol> {
        match self {
            Node::Atom(Atom::Identifier(s)) => Some(s),
            _ => None,
        }
    }

    pub(crate) fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(list) => Some(&list[..]),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Arity {
    Between(RangeInclusive<usize>),
    AtLeast(RangeFrom<usize>),
}

#[derive(Debug)]
pub struct BadArgCount {
    name: &'static str,
    expected: Arity,
    got: usize,
}

impl fmt::Display for BadArgCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "When evaluating {} expected {} arguments, but received {} arguments",
            self.name, self.expected, self.got
        )
    }
}

impl Arity {
    pub(crate) const fn exactly(n: usize) -> Self {
        Self::Between(n..=n)
    }

    pub(crate) const fn at_least(n: usize) -> Self {
        Self::AtLeast(n..)
    }

    pub(crate) fn contains(&self, n: usize) -> bool {
        match self {
            Self::Between(range) => range.contains(&n),
            Self::AtLeast(range) => range.contains(&n),
        }
    }

    pub(crate) fn min(&self) -> usize {
        match self {
            Self::Between(range) => *range.start(),
            Self::AtLeast(range) => range.start,
        }
    }

    pub(crate) fn max(&self) -> Option<usize> {
        match self {
            Self::Between(range) => Some(*range.end()),
            Self::AtLeast(_) => None,
        }
    }

    pub(crate) fn validate_for(&self, n: usize, name: &'static str) -> Result<(), BadArgCount> {
        match self.contains(n) {
            true => Ok(()),
            false => Err(BadArgCount {
                name,
                expected: self.clone(),
                got: n,
            }),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Between(r) => {
                if r.start() == r.end() {
                    write!(f, "exactly {}", r.start())
                } else {
                    write!(f, "from {} to {}", r.start(), r.end())
                }
            }
            Arity::AtLeast(r) => write!(f, "at least {}", r.start),
        }
    }
}

pub struct PrimitiveFn {
    pub name: &'static str,
    pub arity: Arity,
    pub fn_ptr: fn(&[Value]) -> evaluator::Result,
}

impl fmt::Debug for PrimitiveFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "primitive function #<{}>", self.name)
    }
}

/// A primitive which has been called with fewer arguments than it needs.
/// Calling it again supplies the rest.
#[derive(Debug)]
pub struct Partial {
    pub func: &'static PrimitiveFn,
    pub bound: Vec<Value>,
}

#[derive(Clone)]
pub struct Closure {
    pub parameters: Vec<Symbol>,
    pub body: Node,
    pub parent: Rc<Environment>,
}

impl fmt::Debug for Closure {
    // Not derived because we want to skip the parent: the parent may well contain this Closure!
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Closure{{parameters: {:?}, body: {:?}}}",
            self.parameters, self.body
        )
    }
}

impl fmt::Display for Closure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#<lambda ({})>", self.parameters.iter().join(" "))
    }
}

#[derive(Deref, Debug)]
pub struct ValueList(pub Vec<Value>);

#[derive(Debug, Clone)]
pub enum Value {
    Absent,
    Number(f64),
    String(String),
    List(Rc<ValueList>),
    Primitive(&'static PrimitiveFn),
    Partial(Rc<Partial>),
    // Functions in application order: the first is called first.
    Composition(Rc<ValueList>),
    Closure(Rc<Closure>),
}

/// Zero is the only false value.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Number(x) => *x != 0.0,
        _ => true,
    }
}

pub(crate) fn callable(value: &Value) -> bool {
    use Value::*;
    match value {
        Primitive(_) | Partial(_) | Composition(_) | Closure(_) => true,
        Absent | Number(_) | String(_) | List(_) => false,
    }
}

#[derive(Debug)]
pub enum TypeMismatch {
    NotANumber,
    NotAList,
    NotASequence,
    NotCallable,
}

impl fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let expected = match self {
            TypeMismatch::NotANumber => "a number",
            TypeMismatch::NotAList => "a list",
            TypeMismatch::NotASequence => "a list or string",
            TypeMismatch::NotCallable => "a function",
        };
        write!(f, "expected {}", expected)
    }
}

impl Value {
    pub(crate) fn as_number(&self) -> Result<f64, TypeMismatch> {
        match self {
            Value::Number(x) => Ok(*x),
            _ => Err(TypeMismatch::NotANumber),
        }
    }

    pub(crate) fn as_list(&self) -> Result<&[Value], TypeMismatch> {
        match self {
            Value::List(x) => Ok(&x[..]),
            _ => Err(TypeMismatch::NotAList),
        }
    }

    pub(crate) fn as_callable(&self) -> Result<&Value, TypeMismatch> {
        match callable(self) {
            true => Ok(self),
            false => Err(TypeMismatch::NotCallable),
        }
    }

    pub fn is_absent(&self) -> bool {
        match self {
            Value::Absent => true,
            _ => false,
        }
    }

    pub fn new_list() -> Self {
        Self::List(Rc::new(ValueList(Vec::new())))
    }

    pub fn wrap_list(elements: Vec<Value>) -> Self {
        Self::List(Rc::new(ValueList(elements)))
    }

    pub(crate) fn from_bool(b: bool) -> Self {
        Value::Number(if b { 1.0 } else { 0.0 })
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Number(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(elements: Vec<Value>) -> Self {
        Value::wrap_list(elements)
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Number(x) => Value::Number(*x),
            Literal::String(s) => Value::String(s.clone()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match [self, other] {
            [List(x), List(y)] | [Composition(x), Composition(y)] => equal_sequences(x, y),
            [Number(x), Number(y)] => x == y,
            [String(x), String(y)] => x == y,
            [Absent, Absent] => true,
            [Primitive(x), Primitive(y)] => x.name == y.name,
            [Partial(x), Partial(y)] => Rc::ptr_eq(x, y),
            [Closure(x), Closure(y)] => Rc::ptr_eq(x, y),
            [_, _] => false,
        }
    }
}

fn equal_sequences(xs: &[Value], ys: &[Value]) -> bool {
    xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| x == y)
}
