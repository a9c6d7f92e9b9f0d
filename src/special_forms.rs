use crate::environment::{Environment, Scope};
use crate::evaluator::{Error, Result, EVAL};
use crate::types::{truthy, Arity, Closure, Node, Symbol, Value};
use std::rc::Rc;

#[derive(Debug)]
pub enum LetError {
    WrongArgCount(usize),
    BindingsNotGivenAsList,
    BindingNotAPair,
    BindToNonIdentifier,
}

/// `(let ((name expr) ...) body)`
///
/// Every `expr` is evaluated in the enclosing environment, so the bindings
/// cannot see one another.
pub fn apply_let(args: &[Node], env: &Rc<Environment>) -> Result {
    let (bindings, body) = match args {
        [bindings, body] => Ok((bindings, body)),
        _ => Err(Error::Let(LetError::WrongArgCount(args.len()))),
    }?;
    let bindings = bindings
        .as_list()
        .ok_or(Error::Let(LetError::BindingsNotGivenAsList))?;
    let scope = bindings
        .iter()
        .map(|binding| evaluate_binding(binding, env))
        .collect::<Result<Scope>>()?;
    let child = Environment::child_scope(scope, env);
    EVAL(body, &child)
}

fn evaluate_binding(binding: &Node, env: &Rc<Environment>) -> Result<(Symbol, Value)> {
    match binding.as_list() {
        Some([name, expr]) => {
            let name = name
                .as_identifier()
                .ok_or(Error::Let(LetError::BindToNonIdentifier))?;
            Ok((name.clone(), EVAL(expr, env)?))
        }
        _ => Err(Error::Let(LetError::BindingNotAPair)),
    }
}

#[derive(Debug)]
pub enum FnError {
    WrongArgCount(usize),
    ParametersNotGivenAsList,
    ParameterNotAnIdentifier,
}

pub fn apply_lambda(args: &[Node], env: &Rc<Environment>) -> Result {
    let (parameters, body) = match args {
        [parameters, body] => Ok((parameters, body)),
        _ => Err(Error::Fn(FnError::WrongArgCount(args.len()))),
    }?;
    make_closure(parameters, body, env).map_err(Error::Fn)
}

fn make_closure(
    parameters: &Node,
    body: &Node,
    env: &Rc<Environment>,
) -> std::result::Result<Value, FnError> {
    let parameters = parameters
        .as_list()
        .ok_or(FnError::ParametersNotGivenAsList)?;
    let extract_identifier = |node: &Node| {
        node.as_identifier()
            .cloned()
            .ok_or(FnError::ParameterNotAnIdentifier)
    };
    let parameters = parameters
        .iter()
        .map(extract_identifier)
        .collect::<std::result::Result<Vec<Symbol>, _>>()?;
    let closure = Closure {
        parameters,
        body: body.clone(),
        parent: env.clone(),
    };
    Ok(Value::Closure(Rc::new(closure)))
}

#[derive(Debug)]
pub enum DefError {
    WrongArgCount(usize),
    NameNotAnIdentifier,
    BadParameters(FnError),
}

/// `(def name (params...) body)` binds a closure in the current scope and
/// evaluates to the name in upper case.
pub fn apply_def(args: &[Node], env: &Rc<Environment>) -> Result {
    let (name, parameters, body) = match args {
        [name, parameters, body] => Ok((name, parameters, body)),
        _ => Err(Error::Def(DefError::WrongArgCount(args.len()))),
    }?;
    let name = name
        .as_identifier()
        .ok_or(Error::Def(DefError::NameNotAnIdentifier))?;
    let closure = make_closure(parameters, body, env)
        .map_err(|e| Error::Def(DefError::BadParameters(e)))?;
    env.define(name.clone(), closure);
    Ok(Value::String(name.to_uppercase()))
}

pub fn apply_if(args: &[Node], env: &Rc<Environment>) -> Result {
    Arity::Between(2..=3)
        .validate_for(args.len(), "if")
        .map_err(Error::BadArgCount)?;
    let condition = EVAL(&args[0], env)?;
    if truthy(&condition) {
        EVAL(&args[1], env)
    } else if let Some(otherwise) = args.get(2) {
        EVAL(otherwise, env)
    } else {
        Ok(Value::Absent)
    }
}
