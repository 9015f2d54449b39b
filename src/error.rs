//! Error taxonomy shared by all count tools
//!
//! Every variant is fatal: the tools print the `Display` text on stderr and
//! exit with status 1. The text matches the historical diagnostics, with
//! the source name (or `<stdin>` / `<stdout>`) and the 1-based line number
//! leading the message where a line is involved.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CountError {
    /// Bad or missing command-line arguments; the tool prints its help too.
    #[error("ERROR: {0}")]
    Usage(String),

    #[error("ERROR: only one input file can be standard input")]
    AmbiguousStdin,

    #[error("ERROR: Could not open file {name}: {source}")]
    FileOpen {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("{source_name}:{line}: error: no tab character found on line")]
    MissingTab { source_name: String, line: usize },

    #[error("{source_name}:{line}: error: could not read count field")]
    InvalidCount { source_name: String, line: usize },

    /// A side of the merge is not strictly ascending by value.
    #[error("{source_name}:{line}: error: file not sorted")]
    UnsortedInput { source_name: String, line: usize },

    #[error("{name}: error: {source}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("{name}: error: {source}")]
    Write {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl CountError {
    /// Whether the tool should follow the diagnostic with its help text.
    pub fn wants_help(&self) -> bool {
        matches!(self, CountError::Usage(_))
    }
}

pub type Result<T> = std::result::Result<T, CountError>;
