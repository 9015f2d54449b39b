//! count - tally the unique lines of standard input
//!
//! Writes `<count>\t<line>` for each distinct line once all input is read.

use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser};

use counttools::cli::{self, LogArgs};
use counttools::io::{open_output, stdin_source};
use counttools::tally::LineTally;
use counttools::OutputOrder;

#[derive(Parser, Debug)]
#[command(name = "count", version, disable_help_flag = true)]
#[command(about = "Count the unique lines on standard input")]
#[command(long_about = "\
count counts the number of unique lines on the standard input, outputting the
counts after all the input is read. Output is in alphabetical order of the
lines unless -f is given.")]
struct Cli {
    /// Always count an empty final line (input ending in a newline)
    #[arg(short = 'e')]
    count_trailing_empty: bool,

    /// Sort output in order of descending frequency
    #[arg(short = 'f')]
    by_frequency: bool,

    /// Display this help message
    #[arg(short = '?', long = "help", action = ArgAction::Help)]
    help: Option<bool>,

    #[command(flatten)]
    log: LogArgs,
}

fn run(args: &Cli) -> Result<()> {
    let mut source = stdin_source();
    let tally = LineTally::count_source(&mut source, args.count_trailing_empty)?;

    let mut out = open_output(None)?;
    tally.write_to(OutputOrder::from_flag(args.by_frequency), &mut out)?;
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
