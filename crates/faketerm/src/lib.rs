#![deny(clippy::all)]
//! Terminal-like line I/O over any reader/writer pair.
//!
//! [`FakeTerm`] reads lines from a byte source and forwards writes to a byte
//! sink, accepting the terminal control calls of [`Term`] as no-ops.
//! [`ConsoleTerm`] is the interactive counterpart over stdin/stdout.

mod config;
mod console;
pub mod error;
mod fake;
mod line_reader;
mod term;

pub use config::DEFAULT_MAX_LINE_BYTES;
pub use config::TermConfig;
pub use console::ConsoleTerm;
pub use error::TermError;
pub use fake::FakeTerm;
pub use term::Term;
pub use term::write_all;
