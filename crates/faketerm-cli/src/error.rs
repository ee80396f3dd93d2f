//! Errors surfaced by the `faketerm` tool, with sysexits-style exit codes.

use std::io;

use faketerm::TermError;
use thiserror::Error;

/// Exit codes following sysexits.h.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USAGE: i32 = 64;
    pub const DATAERR: i32 = 65;
    pub const NOINPUT: i32 = 66;
    pub const IOERR: i32 = 74;
    /// 128 + SIGINT, as shells report a Ctrl+C.
    pub const INTERRUPTED: i32 = 130;
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Term(#[from] TermError),
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Term(TermError::Eof) => exit_codes::NOINPUT,
            AppError::Term(TermError::LineTooLong { .. }) => exit_codes::DATAERR,
            AppError::Term(TermError::Interrupted) => exit_codes::INTERRUPTED,
            AppError::Term(TermError::Read(_) | TermError::Console(_)) | AppError::Output(_) => {
                exit_codes::IOERR
            }
        }
    }

    pub fn suggestion(&self) -> String {
        match self {
            AppError::Term(err) => err.suggestion(),
            AppError::Output(_) => {
                "Writing output failed. Check that the output stream is still open.".to_string()
            }
        }
    }
}
