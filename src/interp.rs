// ABOUTME: Interpreter entry point tying parser, evaluator and output together

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{Read, Write};
use std::rc::Rc;

use crate::builtins::register_builtins;
use crate::config::OUTPUT_PREFIX;
use crate::env::Environment;
use crate::error::Error;
use crate::eval::eval;
use crate::parser::Parser;

/// Owns the byte input, the byte output and the global scope; reads and
/// evaluates one expression per [`Interpreter::run`] call. The global
/// scope persists across calls, including across failed expressions.
pub struct Interpreter<R: Read, W: Write> {
    parser: Parser<R>,
    out: W,
    global: Rc<Environment>,
}

impl<R: Read, W: Write> Interpreter<R, W> {
    pub fn new(input: R, out: W) -> Self {
        let global = Environment::new();
        register_builtins(&global);
        Interpreter {
            parser: Parser::new(input),
            out,
            global,
        }
    }

    /// Parses and evaluates the next expression, writing its printed
    /// form (when non-empty) prefixed to the output. `Ok(false)` means
    /// the input is exhausted; the driver decides whether that ends the
    /// session.
    pub fn run(&mut self) -> Result<bool, Error> {
        let Some(node) = self.parser.parse()? else {
            return Ok(false);
        };
        let value = eval(&node, &self.global)?;
        let printed = value.to_string();
        if !printed.is_empty() {
            writeln!(self.out, "{OUTPUT_PREFIX}{printed}")
                .map_err(|err| Error::runtime(err.to_string()))?;
        }
        Ok(true)
    }
}

impl<R: Read, W: Write> Drop for Interpreter<R, W> {
    fn drop(&mut self) {
        self.global.break_cycles();
    }
}

/// Growable byte queue shared between a line-oriented driver and the
/// tokenizer's pull-based reads. Reading past the buffered bytes
/// reports end-of-input; pushing more data makes later reads succeed
/// again.
#[derive(Clone, Default)]
pub struct InputBuffer {
    bytes: Rc<RefCell<VecDeque<u8>>>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line of source text followed by a newline.
    pub fn push_line(&self, line: &str) {
        let mut bytes = self.bytes.borrow_mut();
        bytes.extend(line.bytes());
        bytes.push_back(b'\n');
    }

    /// Discards any unconsumed bytes.
    pub fn clear(&self) {
        self.bytes.borrow_mut().clear();
    }
}

impl Read for InputBuffer {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let mut bytes = self.bytes.borrow_mut();
        let mut count = 0;
        while count < buf.len() {
            match bytes.pop_front() {
                Some(byte) => {
                    buf[count] = byte;
                    count += 1;
                }
                None => break,
            }
        }
        Ok(count)
    }
}
