use crate::environment::Environment;
use crate::{evaluator, interpreter};
use ansi_term::Colour::Red;
use linefeed::{DefaultTerminal, Interface, ReadResult, Terminal};
use std::fmt;
use std::fs::read_to_string;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Debug)]
pub enum Error {
    Usage(String),
    IOError(std::io::Error),
    Eval(evaluator::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Usage(program) => write!(f, "usage: {} [FILE]", program),
            Error::IOError(e) => write!(f, "io error: {}", e),
            Error::Eval(e) => write!(f, "{}", e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::IOError(e)
    }
}

impl From<evaluator::Error> for Error {
    fn from(e: evaluator::Error) -> Self {
        Self::Eval(e)
    }
}

pub fn setup() -> std::io::Result<Interface<DefaultTerminal>> {
    let interface = linefeed::Interface::new("flisp")?;
    interface.set_prompt("> ")?;
    if let Some(path) = history_path() {
        interface.load_history(path).ok();
    };
    Ok(interface)
}

fn history_path() -> Option<PathBuf> {
    match dirs::data_dir() {
        Some(mut path) => {
            path.push(".flisp_history");
            Some(path)
        }
        None => None,
    }
}

pub fn save_history<T: Terminal>(interface: &Interface<T>) -> std::io::Result<()> {
    match history_path() {
        Some(path) => interface.save_history(path),
        None => Ok(()),
    }
}

/// Format an error for the terminal, in colour when stderr is one.
pub fn describe_error(message: &str) -> String {
    match atty::is(atty::Stream::Stderr) {
        true => format!("{} {}", Red.bold().paint("error:"), message),
        false => format!("error: {}", message),
    }
}

pub fn repl<T: Terminal>(
    interface: &Interface<T>,
    processor: impl Fn(&str) -> Result<String, String>,
) {
    loop {
        match interface.read_line() {
            Ok(ReadResult::Eof) => break,
            Ok(ReadResult::Signal(sig)) => {
                writeln!(interface, "Received signal {:?}", sig).ok();
            }
            Ok(ReadResult::Input(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                interface.add_history_unique(line.clone());
                match processor(&line) {
                    Ok(output) => writeln!(interface, "{}", output).ok(),
                    Err(e) => writeln!(std::io::stderr(), "{}", describe_error(&e)).ok(),
                };
            }
            Err(e) => {
                writeln!(interface, "Error: {}", e).ok();
                break;
            }
        }
    }
}

/// Run the file named on the command line, or start a REPL when there isn't
/// one. Every REPL entry shares `env`; a file gets a fresh environment.
pub fn launch(args: Vec<String>, env: &Rc<Environment>) -> Result<(), Error> {
    match args.as_slice() {
        [_] => {
            let interface = setup()?;
            cmdline_repl(&interface, env);
            save_history(&interface)?;
            Ok(())
        }
        [_, path] => {
            log::info!("Running {}", path);
            let source = read_to_string(path)?;
            interpreter::run(&source)?;
            Ok(())
        }
        _ => Err(Error::Usage(
            args.first().cloned().unwrap_or_else(|| "flisp".into()),
        )),
    }
}

fn cmdline_repl<T: Terminal>(interface: &Interface<T>, env: &Rc<Environment>) {
    repl(interface, |line| interpreter::rep(line, env));
}
