use clap::Parser;
use clap::ValueEnum;
pub use clap_complete::Shell;

const LONG_ABOUT: &str = r#"faketerm echoes every line it reads back to its output.

The same loop runs against an interactive console or against plain pipes:
in stream mode the terminal controls (prompt, bracketed paste, size) are
accepted and ignored, so piped input produces exactly the echoed lines.

MODES:
    auto     console when stdin is a terminal, stream otherwise
    console  interactive terminal on stdin/stdout
    stream   line reads from stdin, raw writes to stdout

EXAMPLES:
    printf 'one\r\ntwo\n' | faketerm
    faketerm --mode console --prompt '> '
    echo hunter2 | faketerm --password
    faketerm --completions bash > faketerm.bash"#;

#[derive(Debug, Parser)]
#[command(name = "faketerm")]
#[command(author, version)]
#[command(about = "Echo lines through a terminal or a plain byte stream")]
#[command(long_about = LONG_ABOUT)]
pub struct Cli {
    /// Terminal backing the session
    #[arg(short, long, value_enum, default_value = "auto")]
    pub mode: Mode,

    /// Prompt shown before each line (console mode only)
    #[arg(short, long, default_value = "")]
    pub prompt: String,

    /// Read one password line and report its length instead of echoing
    #[arg(long)]
    pub password: bool,

    /// Longest accepted input line in bytes (stream mode)
    #[arg(long, env = "FAKETERM_MAX_LINE_BYTES")]
    pub max_line_bytes: Option<usize>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Auto,
    Console,
    Stream,
}

impl Mode {
    /// Turns `Auto` into a concrete mode.
    pub fn resolve(self, stdin_is_terminal: bool) -> Mode {
        match self {
            Mode::Auto if stdin_is_terminal => Mode::Console,
            Mode::Auto => Mode::Stream,
            other => other,
        }
    }
}
