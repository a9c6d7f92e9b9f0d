use flisp::{cmdline, environment};
use std::process;

fn main() {
    pretty_env_logger::init();
    let env = environment::Environment::root();
    let args = std::env::args().collect();
    if let Err(e) = cmdline::launch(args, &env) {
        eprintln!("{}", cmdline::describe_error(&e.to_string()));
        process::exit(1);
    }
}
