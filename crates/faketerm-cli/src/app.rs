use std::io;

use clap::CommandFactory;
use clap::Parser;
use clap_complete::generate;
use faketerm::ConsoleTerm;
use faketerm::FakeTerm;
use faketerm::Term;
use faketerm::TermConfig;
use tracing::debug;

use crate::commands::Cli;
use crate::commands::Mode;
use crate::echo::echo_lines;
use crate::echo::report_password;
use crate::error::AppError;
use crate::error::exit_codes;
use crate::telemetry;

const PROGRAM_NAME: &str = "faketerm";

#[derive(Debug, Default)]
pub struct Application;

impl Application {
    pub fn new() -> Self {
        Self
    }

    pub fn run(&self) -> i32 {
        let cli = match Cli::try_parse() {
            Ok(cli) => cli,
            Err(e) => return report_parse_error(&e),
        };
        match self.execute(cli) {
            Ok(()) => exit_codes::SUCCESS,
            Err(e) => self.handle_error(e),
        }
    }

    fn execute(&self, cli: Cli) -> Result<(), AppError> {
        let _telemetry = telemetry::init_tracing(cli.verbose);

        if let Some(shell) = cli.completions {
            generate(shell, &mut Cli::command(), PROGRAM_NAME, &mut io::stdout());
            return Ok(());
        }

        let mode = cli.mode.resolve(ConsoleTerm::is_available());
        debug!(?mode, password = cli.password, "CLI command parsed");

        let term = open_terminal(mode, &cli);
        term.set_prompt(&cli.prompt);

        if cli.password {
            report_password(&*term)?;
        } else {
            echo_lines(&*term)?;
        }
        Ok(())
    }

    fn handle_error(&self, error: AppError) -> i32 {
        eprintln!("Error: {error}");
        eprintln!("Suggestion: {}", error.suggestion());
        error.exit_code()
    }
}

/// Prints clap's message and maps it to an exit code. `--help` and
/// `--version` come through here too and still succeed.
fn report_parse_error(error: &clap::Error) -> i32 {
    let _ = error.print();
    usage_exit_code(error)
}

fn usage_exit_code(error: &clap::Error) -> i32 {
    if error.use_stderr() {
        exit_codes::USAGE
    } else {
        exit_codes::SUCCESS
    }
}

fn open_terminal(mode: Mode, cli: &Cli) -> Box<dyn Term> {
    match mode {
        Mode::Console => Box::new(ConsoleTerm::new()),
        Mode::Auto | Mode::Stream => {
            let config = match cli.max_line_bytes {
                Some(max) => TermConfig::default().with_max_line_bytes(max),
                None => TermConfig::default(),
            };
            Box::new(FakeTerm::with_config(io::stdin(), io::stdout(), config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_usage_maps_to_usage_code() {
        let err = Cli::try_parse_from(["faketerm", "--mode", "raw"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), exit_codes::USAGE);

        let err = Cli::try_parse_from(["faketerm", "--no-such-flag"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), exit_codes::USAGE);
    }

    #[test]
    fn test_help_and_version_succeed() {
        let err = Cli::try_parse_from(["faketerm", "--help"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), exit_codes::SUCCESS);

        let err = Cli::try_parse_from(["faketerm", "--version"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), exit_codes::SUCCESS);
    }
}
