use crate::types::{Atom, Literal, Node, Value};
use itertools::Itertools;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrintMode {
    // Strings in double quotes, as the REPL echoes them
    ReadableRepresentation,
    // Strings as their bare contents, as `print` writes them
    Directly,
}

pub fn pr_str(value: &Value, mode: PrintMode) -> String {
    match value {
        Value::Absent => String::from("absent"),
        Value::Number(x) => x.to_string(),
        Value::String(s) => match mode {
            PrintMode::ReadableRepresentation => format!("\"{}\"", s),
            PrintMode::Directly => s.clone(),
        },
        Value::List(elements) => format!(
            "({})",
            elements.iter().map(|v| pr_str(v, mode)).join(" ")
        ),
        Value::Primitive(f) => format!("#<builtin {}>", f.name),
        Value::Partial(p) => format!("#<partial {}>", p.func.name),
        Value::Composition(_) => String::from("#<composition>"),
        Value::Closure(c) => c.to_string(),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", pr_str(self, PrintMode::ReadableRepresentation))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Atom(Atom::Literal(Literal::Number(x))) => write!(f, "{}", x),
            Node::Atom(Atom::Literal(Literal::String(s))) => write!(f, "\"{}\"", s),
            Node::Atom(Atom::Identifier(name)) => write!(f, "{}", name),
            Node::List(elements) => write!(f, "({})", elements.iter().join(" ")),
        }
    }
}
