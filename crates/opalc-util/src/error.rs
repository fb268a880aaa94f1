//! Fatal compile diagnostics.
//!
//! The compiler has a single error sink and no recovery: every diagnostic
//! is fatal. Library code expresses that as a `Result` that propagates a
//! [`CompileError`] with `?` all the way out of the parse; the driver owns
//! the process policy (format the `file:line: message` line on stderr,
//! then exit non-zero or abort).

use thiserror::Error;

/// Error type shared by every compiler phase.
#[derive(Error, Debug)]
pub enum CompileError {
    /// A positioned diagnostic. The driver prepends the file name, so the
    /// display here is just `<line>: <message>`.
    #[error("{line}: {message}")]
    Fatal { line: u32, message: String },

    /// I/O failure reading the source or writing an output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompileError {
    /// Build a positioned fatal diagnostic.
    pub fn fatal(line: u32, message: impl Into<String>) -> Self {
        CompileError::Fatal {
            line,
            message: message.into(),
        }
    }

    /// Line number of a positioned diagnostic, if any.
    pub fn line(&self) -> Option<u32> {
        match self {
            CompileError::Fatal { line, .. } => Some(*line),
            CompileError::Io(_) => None,
        }
    }
}

/// Result alias used throughout the compiler crates.
pub type CompileResult<T> = std::result::Result<T, CompileError>;
