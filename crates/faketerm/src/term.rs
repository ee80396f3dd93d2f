//! The terminal-like capability set.
//!
//! Code that talks to a user through a [`Term`] runs unchanged against an
//! interactive console ([`ConsoleTerm`](crate::ConsoleTerm)) or against any
//! pair of byte streams ([`FakeTerm`](crate::FakeTerm)).

use std::io;
use std::sync::Arc;

use crate::error::TermError;

/// Line-oriented read/write surface of an interactive terminal.
///
/// All methods take `&self`; implementations serialize reads and writes
/// internally, each direction under its own lock.
pub trait Term {
    /// Blocks until a full line is available and returns it without its
    /// trailing `\r`/`\n` characters. End of input is [`TermError::Eof`].
    fn read_line(&self) -> Result<String, TermError>;

    /// Reads a line after showing `prompt`, hiding the typed characters where
    /// the implementation can.
    fn read_password(&self, prompt: &str) -> Result<String, TermError>;

    fn set_bracketed_paste_mode(&self, on: bool);

    /// Sets the prompt shown before each [`read_line`](Term::read_line).
    fn set_prompt(&self, prompt: &str);

    fn set_size(&self, width: u16, height: u16) -> Result<(), TermError>;

    /// Writes `buf` to the output and returns what the output reported.
    fn write(&self, buf: &[u8]) -> io::Result<usize>;
}

impl<T: Term + ?Sized> Term for &T {
    fn read_line(&self) -> Result<String, TermError> {
        (**self).read_line()
    }

    fn read_password(&self, prompt: &str) -> Result<String, TermError> {
        (**self).read_password(prompt)
    }

    fn set_bracketed_paste_mode(&self, on: bool) {
        (**self).set_bracketed_paste_mode(on)
    }

    fn set_prompt(&self, prompt: &str) {
        (**self).set_prompt(prompt)
    }

    fn set_size(&self, width: u16, height: u16) -> Result<(), TermError> {
        (**self).set_size(width, height)
    }

    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        (**self).write(buf)
    }
}

impl<T: Term + ?Sized> Term for Box<T> {
    fn read_line(&self) -> Result<String, TermError> {
        (**self).read_line()
    }

    fn read_password(&self, prompt: &str) -> Result<String, TermError> {
        (**self).read_password(prompt)
    }

    fn set_bracketed_paste_mode(&self, on: bool) {
        (**self).set_bracketed_paste_mode(on)
    }

    fn set_prompt(&self, prompt: &str) {
        (**self).set_prompt(prompt)
    }

    fn set_size(&self, width: u16, height: u16) -> Result<(), TermError> {
        (**self).set_size(width, height)
    }

    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        (**self).write(buf)
    }
}

impl<T: Term + ?Sized> Term for Arc<T> {
    fn read_line(&self) -> Result<String, TermError> {
        (**self).read_line()
    }

    fn read_password(&self, prompt: &str) -> Result<String, TermError> {
        (**self).read_password(prompt)
    }

    fn set_bracketed_paste_mode(&self, on: bool) {
        (**self).set_bracketed_paste_mode(on)
    }

    fn set_prompt(&self, prompt: &str) {
        (**self).set_prompt(prompt)
    }

    fn set_size(&self, width: u16, height: u16) -> Result<(), TermError> {
        (**self).set_size(width, height)
    }

    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        (**self).write(buf)
    }
}

/// Writes all of `buf` through `term`, retrying short writes.
pub fn write_all(term: &(impl Term + ?Sized), mut buf: &[u8]) -> io::Result<()> {
    while !buf.is_empty() {
        match term.write(buf) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "failed to write whole buffer",
                ));
            }
            Ok(n) => buf = &buf[n..],
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
    Ok(())
}
