use crate::tokens::{tokenize, Token};
use crate::types::{Atom, Literal, Node};
use std::vec;

type Reader = vec::IntoIter<Token>;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Level {
    TopLevel,
    Nested,
}

/// Read a whole document.
///
/// A document holding a single form reads as that form; otherwise the
/// top-level forms are gathered into one list. The reader never fails:
/// unbalanced brackets are reported through the log and otherwise tolerated.
pub fn read_str(input: &str) -> Node {
    parse(tokenize(input))
}

pub fn parse(tokens: Vec<Token>) -> Node {
    let mut reader = tokens.into_iter();
    let mut forms = read_list(&mut reader, Level::TopLevel);
    match forms.len() {
        1 => forms.remove(0),
        _ => Node::wrap_list(forms),
    }
}

fn read_list(reader: &mut Reader, level: Level) -> Vec<Node> {
    let mut elements = Vec::new();
    while let Some(token) = reader.next() {
        match token.as_str() {
            "(" => elements.push(Node::wrap_list(read_list(reader, Level::Nested))),
            ")" => {
                if level == Level::TopLevel {
                    log::warn!(
                        "unmatched ')': ignoring the {} tokens after it",
                        reader.len()
                    );
                }
                return elements;
            }
            _ => elements.push(categorize(&token)),
        }
    }
    if level == Level::Nested {
        log::warn!("unclosed list: closing it at end of input");
    }
    elements
}

fn is_string_literal(token: &str) -> bool {
    token.len() >= 2 && token.starts_with('"') && token.ends_with('"')
}

pub fn categorize(token: &str) -> Node {
    if let Some(x) = token.parse::<f64>().ok().filter(|x| x.is_finite()) {
        return Node::Atom(Atom::Literal(Literal::Number(x)));
    }
    if is_string_literal(token) {
        let contents = &token[1..token.len() - 1];
        return Node::Atom(Atom::Literal(Literal::String(contents.into())));
    }
    Node::Atom(Atom::Identifier(token.into()))
}
