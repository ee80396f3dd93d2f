use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;

use tracing::{debug, trace};

use crate::error::TermError;

/// How the input ended, replayed to every read after the first one that saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReaderState {
    Open,
    Exhausted,
    Failed { kind: io::ErrorKind, message: String },
    Overflowed { limit: usize },
}

/// Splits a byte stream into `\n`-terminated lines.
///
/// A final line without a terminator is still returned. When the source fails
/// with a partial line buffered, that line comes back first and the error on
/// the following call.
#[derive(Debug)]
pub(crate) struct LineReader<R> {
    inner: BufReader<R>,
    max_line_bytes: usize,
    pending: Option<io::Error>,
    state: ReaderState,
}

impl<R: Read> LineReader<R> {
    pub(crate) fn new(reader: R, max_line_bytes: usize) -> Self {
        Self {
            inner: BufReader::new(reader),
            max_line_bytes,
            pending: None,
            state: ReaderState::Open,
        }
    }

    pub(crate) fn read_line(&mut self) -> Result<String, TermError> {
        if let Some(err) = self.pending.take() {
            return Err(TermError::Read(err));
        }
        match &self.state {
            ReaderState::Open => {}
            ReaderState::Exhausted => return Err(TermError::Eof),
            ReaderState::Failed { kind, message } => {
                return Err(TermError::Read(io::Error::new(*kind, message.clone())));
            }
            ReaderState::Overflowed { limit } => {
                return Err(TermError::LineTooLong { limit: *limit });
            }
        }

        let mut line = Vec::new();
        loop {
            let available = match self.inner.fill_buf() {
                Ok(buf) => buf,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    debug!(error = %err, "input failed");
                    self.state = ReaderState::Failed {
                        kind: err.kind(),
                        message: err.to_string(),
                    };
                    if line.is_empty() {
                        return Err(TermError::Read(err));
                    }
                    self.pending = Some(err);
                    return Ok(finish_line(line));
                }
            };

            if available.is_empty() {
                debug!("input exhausted");
                self.state = ReaderState::Exhausted;
                if line.is_empty() {
                    return Err(TermError::Eof);
                }
                return Ok(finish_line(line));
            }

            let (taken, complete) = match available.iter().position(|&b| b == b'\n') {
                Some(idx) => {
                    line.extend_from_slice(&available[..idx]);
                    (idx + 1, true)
                }
                None => {
                    line.extend_from_slice(available);
                    (available.len(), false)
                }
            };
            self.inner.consume(taken);

            // A `\r` before the `\n` is part of the terminator, not the line.
            let content_len = match line.last() {
                Some(b'\r') => line.len() - 1,
                _ => line.len(),
            };
            if content_len > self.max_line_bytes {
                debug!(limit = self.max_line_bytes, "line exceeds limit");
                self.state = ReaderState::Overflowed {
                    limit: self.max_line_bytes,
                };
                return Err(TermError::LineTooLong {
                    limit: self.max_line_bytes,
                });
            }

            if complete {
                trace!(bytes = line.len(), "line read");
                return Ok(finish_line(line));
            }
        }
    }

    /// Returns the source. Input buffered but not yet returned is dropped.
    pub(crate) fn into_inner(self) -> R {
        self.inner.into_inner()
    }
}

/// Strips every trailing `\r` and `\n` from `line`.
pub(crate) fn trim_line_end(line: &str) -> &str {
    line.trim_end_matches(|c| c == '\r' || c == '\n')
}

fn finish_line(mut bytes: Vec<u8>) -> String {
    while matches!(bytes.last(), Some(b'\r' | b'\n')) {
        bytes.pop();
    }
    match String::from_utf8(bytes) {
        Ok(line) => line,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}
