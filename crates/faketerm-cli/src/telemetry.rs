//! Log setup for the `faketerm` tool.
//!
//! Stdout carries only echoed lines, so diagnostics go to stderr or, when
//! `FAKETERM_LOG` names a file, to that file through a background writer.

use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

const LOG_FILE_ENV: &str = "FAKETERM_LOG";

/// Keeps the background log writer alive; logs are flushed when it drops.
#[derive(Debug)]
pub struct TelemetryGuard {
    _guard: Option<WorkerGuard>,
}

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    pub fn from_env() -> Self {
        Self::from_value(std::env::var_os(LOG_FILE_ENV))
    }

    fn from_value(value: Option<OsString>) -> Self {
        match value {
            Some(path) if !path.is_empty() => LogTarget::File(PathBuf::from(path)),
            _ => LogTarget::Stderr,
        }
    }
}

/// Filter used when `RUST_LOG` is unset.
pub fn default_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

struct LogWriter {
    writer: BoxMakeWriter,
    guard: Option<WorkerGuard>,
    ansi: bool,
}

impl LogWriter {
    fn stderr() -> Self {
        Self {
            writer: BoxMakeWriter::new(std::io::stderr),
            guard: None,
            ansi: std::io::stderr().is_terminal(),
        }
    }
}

/// Opens `target`, falling back to stderr when the log file cannot be opened.
fn open_writer(target: &LogTarget) -> LogWriter {
    let path = match target {
        LogTarget::Stderr => return LogWriter::stderr(),
        LogTarget::File(path) => path,
    };
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            LogWriter {
                writer: BoxMakeWriter::new(non_blocking),
                guard: Some(guard),
                ansi: false,
            }
        }
        Err(err) => {
            eprintln!(
                "Warning: failed to open log file {}: {}",
                path.display(),
                err
            );
            LogWriter::stderr()
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the level picked by
/// `verbose`.
pub fn init_tracing(verbose: bool) -> TelemetryGuard {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));
    let log = open_writer(&LogTarget::from_env());

    let initialized = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_ansi(log.ansi)
        .with_writer(log.writer)
        .try_init()
        .is_ok();

    TelemetryGuard {
        _guard: if initialized { log.guard } else { None },
    }
}
