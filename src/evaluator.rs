use crate::environment::{Environment, Scope};
use crate::types::{
    callable, Atom, BadArgCount, Closure, Node, Partial, PrimitiveFn, TypeMismatch, Value,
};
use crate::special_forms;
use itertools::Itertools;
use std::fmt;
use std::iter;
use std::rc::Rc;

pub type Result<T = Value> = std::result::Result<T, Error>;
#[derive(Debug)]
pub enum Error {
    Def(special_forms::DefError),
    Let(special_forms::LetError),
    Fn(special_forms::FnError),
    TypeMismatch(TypeMismatch),
    BadArgCount(BadArgCount),
    IOError(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Def(e) => write!(f, "def: {:?}", e),
            Error::Let(e) => write!(f, "let: {:?}", e),
            Error::Fn(e) => write!(f, "lambda: {:?}", e),
            Error::TypeMismatch(e) => write!(f, "type mismatch: {}", e),
            Error::BadArgCount(e) => write!(f, "{}", e),
            Error::IOError(e) => write!(f, "io error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<TypeMismatch> for Error {
    fn from(t: TypeMismatch) -> Self {
        Self::TypeMismatch(t)
    }
}

impl From<BadArgCount> for Error {
    fn from(e: BadArgCount) -> Self {
        Self::BadArgCount(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::IOError(e)
    }
}

/// Evaluate `ast`. Without an environment the evaluation runs in a fresh root
/// environment, so nothing it defines outlives the call.
pub fn evaluate(ast: &Node, env: Option<&Rc<Environment>>) -> Result {
    match env {
        Some(env) => EVAL(ast, env),
        None => EVAL(ast, &Environment::root()),
    }
}

#[allow(non_snake_case)]
pub(crate) fn EVAL(ast: &Node, env: &Rc<Environment>) -> Result {
    match ast {
        Node::Atom(Atom::Literal(literal)) => Ok(Value::from(literal)),
        Node::Atom(Atom::Identifier(name)) => Ok(env.get(name)),
        Node::List(list) => evaluate_list(list, env),
    }
}

fn evaluate_list(list: &[Node], env: &Rc<Environment>) -> Result {
    if let Some(name) = list.first().and_then(Node::as_identifier) {
        match name.as_str() {
            "let" => return special_forms::apply_let(&list[1..], env),
            "lambda" => return special_forms::apply_lambda(&list[1..], env),
            "def" => {
                let result = special_forms::apply_def(&list[1..], env);
                if result.is_ok() {
                    log::debug!("define {} in {}", list[1..].iter().join(" "), env);
                }
                return result;
            }
            "if" => return special_forms::apply_if(&list[1..], env),
            // Any other identifier is looked up and applied below
            _ => (),
        }
    }
    let evaluated = evaluate_sequence_elementwise(list, env)?;
    let head_is_callable = evaluated.first().map_or(false, callable);
    if !head_is_callable {
        // Literal lists, and calls to things which aren't functions, evaluate to themselves
        return Ok(Value::wrap_list(evaluated));
    }
    apply(&evaluated[0], &evaluated[1..])
}

pub fn evaluate_sequence_elementwise(seq: &[Node], env: &Rc<Environment>) -> Result<Vec<Value>> {
    seq.iter().map(|node| EVAL(node, env)).collect()
}

pub(crate) fn apply(func: &Value, args: &[Value]) -> Result {
    match func {
        Value::Primitive(f) => call_primitive(*f, args),
        Value::Partial(partial) => {
            let mut all_args = partial.bound.clone();
            all_args.extend_from_slice(args);
            call_primitive(partial.func, &all_args)
        }
        Value::Composition(funcs) => call_composition(funcs, args),
        Value::Closure(closure) => call_closure(closure, args),
        _ => Err(Error::TypeMismatch(TypeMismatch::NotCallable)),
    }
}

pub(crate) fn pretty_print_args(args: &[Value]) -> String {
    match args.len() {
        0 => "no args".into(),
        1 => args[0].to_string(),
        _ => format!("\n\t{}", args.iter().join("\n\t")),
    }
}

/// Primitives are curried: too few arguments gives back a partial
/// application, and arguments beyond the maximum are dropped.
pub fn call_primitive(func: &'static PrimitiveFn, args: &[Value]) -> Result {
    if args.len() < func.arity.min() {
        log::trace!("Partially apply {} to {}", func.name, pretty_print_args(args));
        return Ok(Value::Partial(Rc::new(Partial {
            func,
            bound: args.to_vec(),
        })));
    }
    let args = match func.arity.max() {
        Some(max) if args.len() > max => &args[..max],
        _ => args,
    };
    log::trace!("Call {} with {}", func.name, pretty_print_args(args));
    let result = (func.fn_ptr)(args);
    match &result {
        Ok(val) => log::trace!("Call to {} resulted in {}", func.name, val),
        Err(e) => log::trace!("Call to {} failed: {}", func.name, e),
    }
    result
}

fn call_composition(funcs: &[Value], args: &[Value]) -> Result {
    let (first, rest) = funcs
        .split_first()
        .ok_or(Error::TypeMismatch(TypeMismatch::NotCallable))?;
    let mut result = apply(first, args)?;
    for func in rest {
        result = apply(func, &[result])?;
    }
    Ok(result)
}

fn call_closure(func: &Closure, args: &[Value]) -> Result {
    log::trace!("Call {} with {}", func, pretty_print_args(args));
    // Missing arguments are bound as absent; extra arguments are ignored.
    let padded = args.iter().cloned().chain(iter::repeat(Value::Absent));
    let bindings: Scope = func.parameters.iter().cloned().zip(padded).collect();
    let env = Environment::child_scope(bindings, &func.parent);
    EVAL(&func.body, &env)
}
