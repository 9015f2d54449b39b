//! Command-line plumbing shared by the four tools
//!
//! Configuration is read in this order: an optional `.env` file, the
//! `COUNTTOOLS_*` environment, then flags. Diagnostics go to stderr with
//! exit status 1; `-?` prints the help text and also exits with 1.

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser};

use crate::error::CountError;

/// Logging options, flattened into every tool.
#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    /// Level of diagnostic logging on stderr (error, warn, info, debug, trace)
    #[arg(
        long = "log-level",
        env = "COUNTTOOLS_LOG",
        default_value = "warn",
        value_name = "LEVEL"
    )]
    pub log_level: tracing::Level,
}

/// Parse the command line of tool `P`.
///
/// On failure the clap message (or help text) is already printed and the
/// exit code to return is handed back.
pub fn parse_args<P: Parser>() -> std::result::Result<P, ExitCode> {
    // Optional env file; its absence is not an error.
    let _ = dotenvy::dotenv();

    P::try_parse().map_err(|err| {
        let code = match err.kind() {
            ErrorKind::DisplayVersion => 0,
            _ => 1,
        };
        let _ = err.print();
        ExitCode::from(code)
    })
}

pub fn init_logging(args: &LogArgs) -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(args.log_level)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to initialise logging: {}", err))
}

/// Run a tool body and turn its outcome into an exit code.
pub fn run_tool<P, F>(log: &LogArgs, body: F) -> ExitCode
where
    P: CommandFactory,
    F: FnOnce() -> Result<()>,
{
    if let Err(err) = init_logging(log) {
        eprintln!("warning: {:#}", err);
    }

    match body() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report::<P>(&err);
            ExitCode::from(1)
        }
    }
}

fn report<P: CommandFactory>(err: &anyhow::Error) {
    match err.downcast_ref::<CountError>() {
        Some(count_err) => {
            eprintln!("{}", count_err);
            if count_err.wants_help() {
                let _ = P::command().print_long_help();
            }
        }
        None => eprintln!("ERROR: {:#}", err),
    }
}
