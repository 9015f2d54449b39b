//! threshcount - drop count records at or below a threshold
//!
//! Reads a count file on standard input and writes the records whose count
//! is strictly greater than THRESHOLD to standard output.

use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser};

use counttools::cli::{self, LogArgs};
use counttools::io::{open_output, stdin_source, CountReader};
use counttools::threshold::{filter_above, parse_threshold};
use counttools::CountError;

#[derive(Parser, Debug)]
#[command(name = "threshcount", version, disable_help_flag = true)]
#[command(allow_negative_numbers = true)]
#[command(about = "Threshold a count file read on standard input")]
#[command(long_about = "\
threshcount reads a count file on standard input, discarding those lines whose
counts are less than or equal to the threshold argument passed on the command
line. It outputs the result to standard output. The input contains at least
two tab-separated columns; the first specifying the count and the second the
value.")]
struct Cli {
    /// Display this help message
    #[arg(short = '?', long = "help", action = ArgAction::Help)]
    help: Option<bool>,

    /// Positive integer; records with a count above it are kept
    #[arg(value_name = "THRESHOLD")]
    threshold: Option<String>,

    #[command(flatten)]
    log: LogArgs,
}

fn run(args: &Cli) -> Result<()> {
    let threshold = match args.threshold.as_deref() {
        Some(arg) => parse_threshold(arg)?,
        None => return Err(CountError::Usage("Missing threshold argument.".to_string()).into()),
    };

    let mut reader = CountReader::<_, i64>::new(stdin_source());
    let mut out = open_output(None)?;
    filter_above(&mut reader, threshold, &mut out)?;
    out.finish()?;
    Ok(())
}

fn main() -> ExitCode {
    let args = match cli::parse_args::<Cli>() {
        Ok(args) => args,
        Err(code) => return code,
    };
    cli::run_tool::<Cli, _>(&args.log, || run(&args))
}
