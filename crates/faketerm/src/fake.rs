use std::fmt;
use std::io;
use std::io::Read;
use std::io::Write;
use std::sync::Mutex;

use faketerm_common::mutex_lock_or_recover;
use tracing::debug;

use crate::config::TermConfig;
use crate::error::TermError;
use crate::line_reader::LineReader;
use crate::term::Term;

/// A [`Term`] over a plain reader/writer pair.
///
/// Reads and writes each hold their own lock, so one read and one write can be
/// in flight at the same time while concurrent reads (or writes) queue up.
/// The terminal never closes the streams; they are dropped with it or handed
/// back by [`into_parts`](FakeTerm::into_parts).
///
/// Password reads are plain line reads: nothing is masked, so secrets typed
/// into the input stream travel exactly as any other line.
pub struct FakeTerm<R, W> {
    output: Mutex<W>,
    input: Mutex<LineReader<R>>,
}

impl<R: Read, W: Write> FakeTerm<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_config(reader, writer, TermConfig::default())
    }

    pub fn with_config(reader: R, writer: W, config: TermConfig) -> Self {
        debug!(max_line_bytes = config.max_line_bytes, "fake terminal created");
        Self {
            output: Mutex::new(writer),
            input: Mutex::new(LineReader::new(reader, config.max_line_bytes)),
        }
    }

    /// Returns the underlying reader and writer. Buffered input that was not
    /// yet returned as a line is discarded.
    pub fn into_parts(self) -> (R, W) {
        let input = self
            .input
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let output = self
            .output
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        (input.into_inner(), output)
    }
}

impl<R: Read, W: Write> Term for FakeTerm<R, W> {
    fn read_line(&self) -> Result<String, TermError> {
        let mut input = mutex_lock_or_recover(&self.input);
        input.read_line()
    }

    /// Same as [`read_line`](Term::read_line). The prompt is not shown and the
    /// line is not masked.
    fn read_password(&self, _prompt: &str) -> Result<String, TermError> {
        self.read_line()
    }

    /// Inert: a byte stream has no paste mode.
    fn set_bracketed_paste_mode(&self, _on: bool) {}

    /// Inert: no prompt is ever written to the output.
    fn set_prompt(&self, _prompt: &str) {}

    /// Inert: always succeeds.
    fn set_size(&self, _width: u16, _height: u16) -> Result<(), TermError> {
        Ok(())
    }

    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        let mut output = mutex_lock_or_recover(&self.output);
        output.write(buf)
    }
}

impl<R: Read, W: Write> Write for &FakeTerm<R, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        <FakeTerm<R, W> as Term>::write(*self, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        mutex_lock_or_recover(&self.output).flush()
    }
}

impl<R: Read, W: Write> Write for FakeTerm<R, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        <Self as Term>::write(self, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        mutex_lock_or_recover(&self.output).flush()
    }
}

impl<R, W> fmt::Debug for FakeTerm<R, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeTerm").finish_non_exhaustive()
    }
}
