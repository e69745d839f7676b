// ABOUTME: Syntax highlighter for the REPL prompt
// Implements rustyline's Highlighter trait with ANSI color codes,
// tokenizing by this language's rules: parens, dot and quote are the
// only delimiters, and a word is anything between them.

use std::borrow::Cow;

use rustyline::completion::Completer;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Helper;

// 3-bit/4-bit ANSI codes for maximum terminal compatibility.
const COLOR_RESET: &str = "\x1b[0m";
const COLOR_PARENS: &str = "\x1b[1;34m"; // Bold blue
const COLOR_SPECIAL_FORM: &str = "\x1b[1;35m"; // Bold magenta
const COLOR_BUILTIN: &str = "\x1b[36m"; // Cyan
const COLOR_NUMBER: &str = "\x1b[33m"; // Yellow
const COLOR_QUOTE: &str = "\x1b[1;33m"; // Bold yellow

const SPECIAL_FORMS: &[&str] = &["and", "define", "if", "lambda", "or", "quote", "set!"];

const BUILTINS: &[&str] = &[
    "*",
    "+",
    "-",
    "/",
    "<",
    "<=",
    "=",
    ">",
    ">=",
    "abs",
    "boolean?",
    "car",
    "cdr",
    "cons",
    "eq?",
    "equal?",
    "eval",
    "integer-equal?",
    "list",
    "list-ref",
    "list-tail",
    "list?",
    "max",
    "min",
    "not",
    "null?",
    "number?",
    "pair?",
    "set-car!",
    "set-cdr!",
    "symbol?",
];

pub struct LispHelper;

impl Helper for LispHelper {}

impl Completer for LispHelper {
    type Candidate = String;
}

impl Hinter for LispHelper {
    type Hint = String;
}

impl Validator for LispHelper {}

impl Highlighter for LispHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let highlighted = highlight_line(line);
        if highlighted == line {
            Cow::Borrowed(line)
        } else {
            Cow::Owned(highlighted)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

fn is_delimiter(ch: char) -> bool {
    matches!(ch, '(' | ')' | '.' | '\'') || ch.is_whitespace()
}

fn is_number(word: &str) -> bool {
    let digits = word.strip_prefix(['+', '-']).unwrap_or(word);
    !digits.is_empty() && digits.chars().all(|ch| ch.is_ascii_digit())
}

fn word_color(word: &str) -> Option<&'static str> {
    if is_number(word) || word == "#t" || word == "#f" {
        Some(COLOR_NUMBER)
    } else if SPECIAL_FORMS.contains(&word) {
        Some(COLOR_SPECIAL_FORM)
    } else if BUILTINS.contains(&word) {
        Some(COLOR_BUILTIN)
    } else {
        None
    }
}

fn push_colored(result: &mut String, color: &str, text: &str) {
    result.push_str(color);
    result.push_str(text);
    result.push_str(COLOR_RESET);
}

fn highlight_line(line: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '(' | ')' => {
                push_colored(&mut result, COLOR_PARENS, &chars[i].to_string());
                i += 1;
            }
            '\'' => {
                push_colored(&mut result, COLOR_QUOTE, "'");
                i += 1;
            }
            ch if is_delimiter(ch) => {
                result.push(ch);
                i += 1;
            }
            _ => {
                let start = i;
                while i < chars.len() && !is_delimiter(chars[i]) {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                match word_color(&word) {
                    Some(color) => push_colored(&mut result, color, &word),
                    None => result.push_str(&word),
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_words_pass_through() {
        assert_eq!(highlight_line("foo bar"), "foo bar");
    }

    #[test]
    fn test_numbers_and_booleans_are_colored() {
        assert_eq!(
            highlight_line("42"),
            format!("{COLOR_NUMBER}42{COLOR_RESET}")
        );
        assert_eq!(
            highlight_line("#t"),
            format!("{COLOR_NUMBER}#t{COLOR_RESET}")
        );
        assert!(is_number("-7"));
        assert!(!is_number("12a"));
        assert!(!is_number("+"));
    }

    #[test]
    fn test_special_forms_and_builtins_are_colored() {
        let highlighted = highlight_line("(define x (car y))");
        assert!(highlighted.contains(&format!("{COLOR_SPECIAL_FORM}define{COLOR_RESET}")));
        assert!(highlighted.contains(&format!("{COLOR_BUILTIN}car{COLOR_RESET}")));
    }

    #[test]
    fn test_stripped_of_codes_matches_input() {
        let line = "'(+ 1 2 . rest)";
        let highlighted = highlight_line(line);
        let stripped: String = {
            let mut out = String::new();
            let mut rest = highlighted.as_str();
            while let Some(pos) = rest.find('\x1b') {
                out.push_str(&rest[..pos]);
                let tail = &rest[pos..];
                let end = tail.find('m').map(|m| m + 1).unwrap_or(tail.len());
                rest = &tail[end..];
            }
            out.push_str(rest);
            out
        };
        assert_eq!(stripped, line);
    }
}
