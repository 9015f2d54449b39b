//! addcount - sum two count files together
//!
//! Usage:
//!   addcount [-d] INPUT1 INPUT2 [OUTPUT]
//!
//! Both inputs must be sorted by value; either (not both) may be `-`.

use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser};

use counttools::cli::{self, LogArgs};
use counttools::sort_merge::merge_join::merge_files;
use counttools::CountError;

#[derive(Parser, Debug)]
#[command(name = "addcount", version, disable_help_flag = true)]
#[command(about = "Sum the counts stored in two sorted count files")]
#[command(long_about = "\
addcount sums the counts stored in two count files together, outputting the
results to standard output (or to the file OUTPUT, if this is specified). The
two input count files INPUT1 and INPUT2 contain at least two tab-separated
columns; the first specifying the count and the second the value. The files
must be sorted in alphabetical order on the second (value) column. At most one
of INPUT1 and INPUT2 can be the character \"-\", indicating that this stream
should be read from standard input.")]
struct Cli {
    /// Interpret counts as floating-point numbers
    #[arg(short = 'd')]
    float: bool,

    /// Display this help message
    #[arg(short = '?', long = "help", action = ArgAction::Help)]
    help: Option<bool>,

    /// First sorted count file, or - for standard input
    #[arg(value_name = "INPUT1")]
    input1: Option<String>,

    /// Second sorted count file, or - for standard input
    #[arg(value_name = "INPUT2")]
    input2: Option<String>,

    /// Output file (standard output if omitted)
    #[arg(value_name = "OUTPUT")]
    output: Option<String>,

    #[command(flatten)]
    log: LogArgs,
}

fn run(args: &Cli) -> Result<()> {
    let (input1, input2) = match (args.input1.as_deref(), args.input2.as_deref()) {
        (Some(input1), Some(input2)) => (input1, input2),
        _ => return Err(CountError::Usage("Missing input arguments.".to_string()).into()),
    };
    let output = args.output.as_deref();

    let stats = if args.float {
        merge_files::<f64>(input1, input2, output)?
    } else {
        merge_files::<i64>(input1, input2, output)?
    };
    tracing::info!(
        "wrote {} records ({} values summed)",
        stats.written,
        stats.summed
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = match cli::parse_args::<Cli>() {
        Ok(args) => args,
        Err(code) => return code,
    };
    cli::run_tool::<Cli, _>(&args.log, || run(&args))
}
