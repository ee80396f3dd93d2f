//! Terminal errors with structured context.
//!
//! Stream failures are carried verbatim so callers can inspect the original
//! `io::Error`; the helpers add an operation name, a retry hint and a JSON
//! context for programmatic handling.

use std::io;

use serde_json::{Value, json};
use thiserror::Error;

/// Failures reported by a [`Term`](crate::Term) read or size operation.
#[derive(Error, Debug)]
pub enum TermError {
    #[error("end of input")]
    Eof,
    #[error("Failed to read from input: {0}")]
    Read(#[source] io::Error),
    #[error("Line exceeds the {limit} byte limit")]
    LineTooLong { limit: usize },
    #[error("Console error: {0}")]
    Console(#[source] io::Error),
    #[error("Interrupted by user")]
    Interrupted,
}

impl TermError {
    /// Returns true for a clean end of input.
    pub fn is_eof(&self) -> bool {
        matches!(self, TermError::Eof)
    }

    /// Returns the operation that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            TermError::Eof | TermError::Read(_) | TermError::LineTooLong { .. } => "read",
            TermError::Console(_) => "console",
            TermError::Interrupted => "read_password",
        }
    }

    /// Returns whether the same call may succeed when repeated.
    ///
    /// End of input and oversized lines end the stream for good; only a
    /// transient source error or a console hiccup is worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            TermError::Read(err) | TermError::Console(err) => matches!(
                err.kind(),
                io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut | io::ErrorKind::Interrupted
            ),
            TermError::Eof | TermError::LineTooLong { .. } | TermError::Interrupted => false,
        }
    }

    /// Returns structured context about the error for debugging.
    pub fn context(&self) -> Value {
        match self {
            TermError::Eof => json!({ "operation": "read", "reason": "eof" }),
            TermError::Read(err) => json!({
                "operation": "read",
                "kind": format!("{:?}", err.kind()),
                "reason": err.to_string()
            }),
            TermError::LineTooLong { limit } => json!({
                "operation": "read",
                "limit": limit
            }),
            TermError::Console(err) => json!({
                "operation": "console",
                "kind": format!("{:?}", err.kind()),
                "reason": err.to_string()
            }),
            TermError::Interrupted => json!({ "operation": "read_password" }),
        }
    }

    /// Returns a helpful suggestion for resolving the error.
    pub fn suggestion(&self) -> String {
        match self {
            TermError::Eof => "The input stream has ended. No further lines will arrive.".to_string(),
            TermError::Read(_) => {
                "Reading input failed. Check that the input stream is still open.".to_string()
            }
            TermError::LineTooLong { limit } => format!(
                "Input lines must be at most {limit} bytes. Raise FAKETERM_MAX_LINE_BYTES to accept longer lines."
            ),
            TermError::Console(_) => {
                "The console rejected a terminal operation. Check that stdin is a terminal."
                    .to_string()
            }
            TermError::Interrupted => "Input was cancelled with Ctrl+C.".to_string(),
        }
    }
}

impl From<TermError> for io::Error {
    fn from(err: TermError) -> Self {
        match err {
            TermError::Read(inner) | TermError::Console(inner) => inner,
            TermError::Eof => io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"),
            TermError::LineTooLong { limit } => io::Error::new(
                io::ErrorKind::InvalidData,
                format!("line exceeds the {limit} byte limit"),
            ),
            TermError::Interrupted => {
                io::Error::new(io::ErrorKind::Interrupted, "interrupted by user")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eof_is_eof() {
        assert!(TermError::Eof.is_eof());
        assert!(!TermError::Read(io::Error::other("boom")).is_eof());
        assert!(!TermError::LineTooLong { limit: 4 }.is_eof());
    }

    #[test]
    fn test_error_operation() {
        assert_eq!(TermError::Eof.operation(), "read");
        assert_eq!(TermError::Read(io::Error::other("x")).operation(), "read");
        assert_eq!(TermError::LineTooLong { limit: 1 }.operation(), "read");
        assert_eq!(TermError::Console(io::Error::other("x")).operation(), "console");
        assert_eq!(TermError::Interrupted.operation(), "read_password");
    }

    #[test]
    fn test_error_is_retryable() {
        let timed_out = io::Error::new(io::ErrorKind::TimedOut, "slow");
        assert!(TermError::Read(timed_out).is_retryable());
        let reset = io::Error::new(io::ErrorKind::ConnectionReset, "reset");
        assert!(!TermError::Read(reset).is_retryable());
        assert!(!TermError::Eof.is_retryable());
        assert!(!TermError::LineTooLong { limit: 8 }.is_retryable());
    }

    #[test]
    fn test_error_context() {
        let err = TermError::Read(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        let ctx = err.context();
        assert_eq!(ctx["operation"], "read");
        assert_eq!(ctx["kind"], "BrokenPipe");
        assert_eq!(ctx["reason"], "pipe closed");

        let ctx = TermError::LineTooLong { limit: 16 }.context();
        assert_eq!(ctx["limit"], 16);
    }

    #[test]
    fn test_error_suggestion_mentions_limit() {
        let err = TermError::LineTooLong { limit: 1024 };
        assert!(err.suggestion().contains("1024"));
    }

    #[test]
    fn test_into_io_error_keeps_source() {
        let err = TermError::Read(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::PermissionDenied);
        assert_eq!(io_err.to_string(), "denied");

        let io_err: io::Error = TermError::Eof.into();
        assert_eq!(io_err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
