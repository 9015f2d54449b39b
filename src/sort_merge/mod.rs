//! Sorted merge of count files
//!
//! Two count files, each sorted strictly ascending by value, are combined
//! in one streaming pass:
//!
//! 1. **Verify**: every record read must be greater than the previous one
//!    from the same file ([`verify::SortedReader`])
//! 2. **Merge Join**: two cursors advance in lockstep; equal values are
//!    written once with their counts summed ([`merge_join::merge_join`])
//!
//! Memory use is constant: one record and one previous value per side.

pub mod merge_join;
pub mod verify;

pub use merge_join::{merge_join, MergeStats};
pub use verify::SortedReader;
