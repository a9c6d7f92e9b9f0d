use regex::Regex;

pub type Token = String;

// Stands in for whitespace inside string literals while the source is split
// into tokens. Taken from the Unicode private use area so it cannot clash with
// anything the regex below treats as whitespace.
const SENTINEL: char = '\u{E000}';

lazy_static! {
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

fn pad_brackets(code: &str) -> String {
    code.replace('(', " ( ").replace(')', " ) ")
}

fn protect_whitespace(literal: &str) -> String {
    literal
        .chars()
        .map(|c| if c.is_whitespace() { SENTINEL } else { c })
        .collect()
}

/// Split source text into tokens.
///
/// Brackets always form tokens of their own, except inside a string literal,
/// where they (and any whitespace) remain part of the literal's token. Quote
/// characters are kept on the token so the reader can tell literals apart.
pub fn tokenize(input: &str) -> Vec<Token> {
    // Segments alternate between code and the contents of a string literal.
    let segments: Vec<String> = input
        .split('"')
        .enumerate()
        .map(|(i, segment)| match i % 2 {
            0 => pad_brackets(segment),
            _ => protect_whitespace(segment),
        })
        .collect();
    let joined = segments.join("\"");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    WHITESPACE_RE
        .split(trimmed)
        .map(|token| token.replace(SENTINEL, " "))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<String> {
        tokenize(input)
    }

    #[test]
    fn empty_input_has_no_tokens() {
        assert!(tokens("").is_empty());
        assert!(tokens(" \n\t ").is_empty());
    }

    #[test]
    fn brackets_are_separate_tokens() {
        assert_eq!(tokens("(a (b c))"), vec!["(", "a", "(", "b", "c", ")", ")"]);
        assert_eq!(tokens("()"), vec!["(", ")"]);
    }

    #[test]
    fn runs_of_whitespace_separate_tokens() {
        assert_eq!(tokens("  add\t1 \n  2 "), vec!["add", "1", "2"]);
    }

    #[test]
    fn string_literals_keep_spaces_and_brackets() {
        assert_eq!(tokens(r#"("a b" "(c)")"#), vec!["(", r#""a b""#, r#""(c)""#, ")"]);
        assert_eq!(tokens(r#"")a""#), vec![r#"")a""#]);
    }

    #[test]
    fn whitespace_inside_literal_becomes_space() {
        assert_eq!(tokens("\"a\tb\""), vec!["\"a b\""]);
    }
}
