use std::env;

/// Longest line accepted by default, terminator excluded (64 KiB).
pub const DEFAULT_MAX_LINE_BYTES: usize = 64 * 1024;

const MAX_LINE_BYTES_ENV: &str = "FAKETERM_MAX_LINE_BYTES";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermConfig {
    pub max_line_bytes: usize,
}

impl Default for TermConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl TermConfig {
    pub fn from_env() -> Self {
        Self {
            max_line_bytes: env::var(MAX_LINE_BYTES_ENV)
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&v: &usize| v > 0)
                .unwrap_or(DEFAULT_MAX_LINE_BYTES),
        }
    }

    /// A zero limit is ignored; every stream must be able to carry a line.
    pub fn with_max_line_bytes(mut self, max: usize) -> Self {
        if max > 0 {
            self.max_line_bytes = max;
        }
        self
    }
}
