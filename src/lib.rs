//! counttools - utilities for tab-separated count files
//!
//! A count file holds one `<count>\t<value>` record per line. This crate
//! provides the shared record parsing and the algorithms behind four
//! command-line tools:
//!
//! - `addcount`: merge-join two sorted count files, summing equal values
//! - `count`: tally the distinct lines of standard input
//! - `sortalph`: sort a count file by value, summing duplicates
//! - `threshcount`: keep the records whose count exceeds a threshold

pub mod error;
pub mod record;
/// Named inputs and outputs, line-at-a-time reading
pub mod io;

/// Sorted merge of two count files
pub mod sort_merge;

pub mod order;
pub mod sort_alph;
pub mod tally;
pub mod threshold;

/// Shared command-line plumbing for the binaries
pub mod cli;

pub use error::{CountError, Result};
pub use order::OutputOrder;
pub use record::{Count, CountRecord};
