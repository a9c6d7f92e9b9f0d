use crate::environment::Environment;
use crate::evaluator::{self, evaluate};
use crate::printer::{pr_str, PrintMode};
use crate::reader;
use crate::types::Node;
use std::rc::Rc;

#[allow(non_snake_case)]
pub fn READ(text: &str) -> Node {
    reader::read_str(text)
}

#[allow(non_snake_case)]
pub fn PRINT(result: &evaluator::Result) -> Result<String, String> {
    match result {
        Ok(value) => Ok(pr_str(value, PrintMode::ReadableRepresentation)),
        Err(e) => Err(e.to_string()),
    }
}

/// Parse and evaluate `text` in a fresh root environment.
pub fn run(text: &str) -> evaluator::Result {
    evaluate(&READ(text), None)
}

/// Parse and evaluate `text` in `env`, keeping whatever it defines, and
/// print the result.
pub fn rep(text: &str, env: &Rc<Environment>) -> Result<String, String> {
    log::debug!("rep {:?}", text);
    PRINT(&evaluate(&READ(text), Some(env)))
}
