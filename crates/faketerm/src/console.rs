use std::io;
use std::io::IsTerminal;
use std::io::Write;
use std::sync::Mutex;

use crossterm::event;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::execute;
use crossterm::terminal;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use faketerm_common::mutex_lock_or_recover;
use tracing::debug;

use crate::error::TermError;
use crate::line_reader::trim_line_end;
use crate::term::Term;

/// Leaves raw mode on drop so a failed password read cannot strand the
/// user's shell without echo.
#[must_use = "RawModeGuard must be held while keys are read without echo"]
struct RawModeGuard;

impl RawModeGuard {
    fn new() -> Result<Self, TermError> {
        enable_raw_mode().map_err(TermError::Console)?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// The interactive [`Term`] over the process's stdin and stdout.
#[derive(Debug)]
pub struct ConsoleTerm {
    input: Mutex<io::Stdin>,
    output: Mutex<io::Stdout>,
    prompt: Mutex<String>,
    size: Mutex<Option<(u16, u16)>>,
}

impl Default for ConsoleTerm {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleTerm {
    pub fn new() -> Self {
        Self {
            input: Mutex::new(io::stdin()),
            output: Mutex::new(io::stdout()),
            prompt: Mutex::new(String::new()),
            size: Mutex::new(None),
        }
    }

    /// Returns true when stdin is attached to a terminal.
    pub fn is_available() -> bool {
        io::stdin().is_terminal()
    }

    pub fn prompt(&self) -> String {
        mutex_lock_or_recover(&self.prompt).clone()
    }

    /// Returns the size last passed to [`set_size`](Term::set_size), or the
    /// console's own size when none was set.
    pub fn size(&self) -> Result<(u16, u16), TermError> {
        if let Some(size) = *mutex_lock_or_recover(&self.size) {
            return Ok(size);
        }
        terminal::size().map_err(TermError::Console)
    }

    fn write_and_flush(&self, buf: &[u8]) -> Result<(), TermError> {
        let mut output = mutex_lock_or_recover(&self.output);
        output.write_all(buf).map_err(TermError::Console)?;
        output.flush().map_err(TermError::Console)
    }
}

impl Term for ConsoleTerm {
    fn read_line(&self) -> Result<String, TermError> {
        let input = mutex_lock_or_recover(&self.input);
        let prompt = self.prompt();
        if !prompt.is_empty() {
            self.write_and_flush(prompt.as_bytes())?;
        }

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => Err(TermError::Eof),
            Ok(_) => Ok(trim_line_end(&line).to_string()),
            Err(err) => Err(TermError::Read(err)),
        }
    }

    fn read_password(&self, prompt: &str) -> Result<String, TermError> {
        let _input = mutex_lock_or_recover(&self.input);
        self.write_and_flush(prompt.as_bytes())?;

        let result = {
            let _raw = RawModeGuard::new()?;
            read_masked_line()
        };
        self.write_and_flush(b"\r\n")?;
        result
    }

    fn set_bracketed_paste_mode(&self, on: bool) {
        let mut output = mutex_lock_or_recover(&self.output);
        let stdout: &mut io::Stdout = &mut output;
        let result = if on {
            execute!(stdout, EnableBracketedPaste)
        } else {
            execute!(stdout, DisableBracketedPaste)
        };
        if let Err(err) = result {
            debug!(error = %err, on, "bracketed paste toggle failed");
        }
    }

    fn set_prompt(&self, prompt: &str) {
        *mutex_lock_or_recover(&self.prompt) = prompt.to_string();
    }

    fn set_size(&self, width: u16, height: u16) -> Result<(), TermError> {
        *mutex_lock_or_recover(&self.size) = Some((width, height));
        Ok(())
    }

    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        let mut output = mutex_lock_or_recover(&self.output);
        let n = output.write(buf)?;
        output.flush()?;
        Ok(n)
    }
}

/// Collects key presses until Enter without echoing them.
fn read_masked_line() -> Result<String, TermError> {
    let mut secret = String::new();
    loop {
        match event::read().map_err(TermError::Console)? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                match key.code {
                    KeyCode::Enter => return Ok(secret),
                    KeyCode::Backspace => {
                        secret.pop();
                    }
                    KeyCode::Char('c') if ctrl => return Err(TermError::Interrupted),
                    KeyCode::Char('d') if ctrl => {
                        if secret.is_empty() {
                            return Err(TermError::Eof);
                        }
                    }
                    KeyCode::Char('u') if ctrl => secret.clear(),
                    KeyCode::Char(c) if !ctrl => secret.push(c),
                    _ => {}
                }
            }
            Event::Paste(text) => secret.push_str(trim_line_end(&text)),
            _ => {}
        }
    }
}
