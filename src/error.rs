// ABOUTME: Error types for tokenizing, parsing and evaluation failures

use thiserror::Error as ThisError;

/// Interpreter failures. The display prefixes are stable: the REPL driver
/// prints errors verbatim and the test suite matches on them.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed input, or structural misuse of a special form.
    #[error("SyntaxError: {0}")]
    Syntax(String),

    /// Unbound name on lookup or `set!`.
    #[error("NameError: {0}")]
    Name(String),

    /// Type mismatch, arity violation or bad index in a primitive.
    #[error("RuntimeError: {0}")]
    Runtime(String),
}

impl Error {
    pub fn syntax(message: impl Into<String>) -> Self {
        Error::Syntax(message.into())
    }

    pub fn name(message: impl Into<String>) -> Self {
        Error::Name(message.into())
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Error::Runtime(message.into())
    }
}
