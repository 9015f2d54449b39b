//! sortalph - sort a count file alphabetically, summing duplicates
//!
//! Usage:
//!   sortalph [-d] [-f] [INPUT [OUTPUT]]

use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser};

use counttools::cli::{self, LogArgs};
use counttools::sort_alph::sort_file;
use counttools::OutputOrder;

#[derive(Parser, Debug)]
#[command(name = "sortalph", version, disable_help_flag = true)]
#[command(about = "Sort a count file alphabetically and sum duplicate entries")]
#[command(long_about = "\
sortalph reads in a count file, sorts it alphabetically, and sums duplicate
entries if they are present, outputting the results to standard output (or to
the file OUTPUT, if this is specified). The input count file INPUT contains at
least two tab-separated columns; the first specifying the count and the second
the value. If INPUT is not specified, or is given as the character \"-\",
sortalph will read from standard input.")]
struct Cli {
    /// Interpret counts as floating-point numbers
    #[arg(short = 'd')]
    float: bool,

    /// Sort output in order of descending frequency
    #[arg(short = 'f')]
    by_frequency: bool,

    /// Display this help message
    #[arg(short = '?', long = "help", action = ArgAction::Help)]
    help: Option<bool>,

    /// Count file to sort, or - for standard input
    #[arg(value_name = "INPUT", default_value = "-")]
    input: String,

    /// Output file (standard output if omitted)
    #[arg(value_name = "OUTPUT")]
    output: Option<String>,

    #[command(flatten)]
    log: LogArgs,
}

fn run(args: &Cli) -> Result<()> {
    let order = OutputOrder::from_flag(args.by_frequency);
    let output = args.output.as_deref();

    let written = if args.float {
        sort_file::<f64>(&args.input, output, order)?
    } else {
        sort_file::<i64>(&args.input, output, order)?
    };
    tracing::info!("wrote {} distinct values", written);
    Ok(())
}

fn main() -> ExitCode {
    let args = match cli::parse_args::<Cli>() {
        Ok(args) => args,
        Err(code) => return code,
    };
    cli::run_tool::<Cli, _>(&args.log, || run(&args))
}
