//! The line loops behind the tool. They see only `&dyn Term`, so the same code
//! serves a console and a pipe.

use faketerm::Term;
use faketerm::TermError;
use faketerm::write_all;
use tracing::debug;

use crate::error::AppError;

pub const PASSWORD_PROMPT: &str = "Password: ";

/// Writes every line read back followed by `\n` until end of input.
/// Returns the number of lines echoed.
pub fn echo_lines(term: &dyn Term) -> Result<usize, AppError> {
    let mut count = 0;
    loop {
        let line = match term.read_line() {
            Ok(line) => line,
            Err(TermError::Eof) => {
                debug!(lines = count, "input finished");
                return Ok(count);
            }
            Err(err) => return Err(err.into()),
        };
        let mut echoed = line.into_bytes();
        echoed.push(b'\n');
        write_all(term, &echoed)?;
        count += 1;
    }
}

/// Reads one password line and reports only its length.
pub fn report_password(term: &dyn Term) -> Result<usize, AppError> {
    let secret = term.read_password(PASSWORD_PROMPT)?;
    let length = secret.chars().count();
    write_all(term, format!("{length} characters\n").as_bytes())?;
    Ok(length)
}
