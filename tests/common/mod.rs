// ABOUTME: Shared REPL-level fixture for the integration suites

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use lispp::error::Error;
use lispp::interp::{InputBuffer, Interpreter};

/// Captures everything the interpreter writes so tests can assert on
/// the exact prompt output, one expression at a time.
#[derive(Clone, Default)]
pub struct CapturedOutput(Rc<RefCell<Vec<u8>>>);

impl CapturedOutput {
    fn take(&self) -> String {
        let mut bytes = self.0.borrow_mut();
        String::from_utf8_lossy(&std::mem::take(&mut *bytes)).into_owned()
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// One interpreter whose global scope persists across expressions,
/// exactly like an interactive session.
pub struct Session {
    input: InputBuffer,
    output: CapturedOutput,
    interp: Interpreter<InputBuffer, CapturedOutput>,
}

impl Session {
    pub fn new() -> Self {
        let input = InputBuffer::new();
        let output = CapturedOutput::default();
        let interp = Interpreter::new(input.clone(), output.clone());
        Session {
            input,
            output,
            interp,
        }
    }

    fn run(&mut self, expression: &str) -> Result<String, Error> {
        self.input.clear();
        self.output.take();
        self.input.push_line(expression);
        self.interp.run()?;
        Ok(self.output.take())
    }

    pub fn expect_eq(&mut self, expression: &str, expected: &str) {
        match self.run(expression) {
            Ok(output) => assert_eq!(
                output,
                format!("     >> {expected}\n"),
                "unexpected output for {expression}"
            ),
            Err(err) => panic!("unexpected error for {expression}: {err}"),
        }
    }

    pub fn expect_silent(&mut self, expression: &str) {
        match self.run(expression) {
            Ok(output) => assert_eq!(output, "", "expected no output for {expression}"),
            Err(err) => panic!("unexpected error for {expression}: {err}"),
        }
    }

    pub fn expect_no_error(&mut self, expression: &str) {
        if let Err(err) = self.run(expression) {
            panic!("unexpected error for {expression}: {err}");
        }
    }

    pub fn expect_error(&mut self, expression: &str, prefix: &str) {
        match self.run(expression) {
            Ok(output) => {
                panic!("expected {prefix} error for {expression}, got output {output:?}")
            }
            Err(err) => assert!(
                err.to_string().starts_with(prefix),
                "expected {prefix} error for {expression}, got {err}"
            ),
        }
    }

    pub fn expect_error_message(&mut self, expression: &str, message: &str) {
        match self.run(expression) {
            Ok(output) => {
                panic!("expected error for {expression}, got output {output:?}")
            }
            Err(err) => assert_eq!(err.to_string(), message, "wrong error for {expression}"),
        }
    }
}
