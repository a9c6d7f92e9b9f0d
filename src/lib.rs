#[macro_use]
extern crate lazy_static;

pub mod cmdline;
pub mod core;
pub mod environment;
pub mod evaluator;
pub mod interpreter;
pub mod printer;
pub mod reader;
pub mod special_forms;
pub mod tokens;
pub mod types;

pub use evaluator::evaluate;
pub use interpreter::run;
pub use reader::read_str as parse;
pub use types::{Node, Value};
