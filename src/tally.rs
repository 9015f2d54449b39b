//! Unique-line tally behind `count`

use std::io::{BufRead, Write};

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::io::{CountWriter, LineSource};
use crate::order::{sort_entries, OutputOrder};

/// Map from distinct line to number of occurrences.
#[derive(Debug, Clone, Default)]
pub struct LineTally {
    table: FxHashMap<Vec<u8>, u64>,
    lines: u64,
}

impl LineTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `line`.
    pub fn add_line(&mut self, line: &[u8]) {
        match self.table.get_mut(line) {
            Some(count) => *count += 1,
            None => {
                self.table.insert(line.to_vec(), 1);
            }
        }
        self.lines += 1;
    }

    pub fn get(&self, line: &[u8]) -> u64 {
        self.table.get(line).copied().unwrap_or(0)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of lines counted.
    pub fn total_lines(&self) -> u64 {
        self.lines
    }

    /// Tally every line of `source`.
    ///
    /// Input that ends with a newline (or is empty) is followed by an empty
    /// line only a line-oriented reader would see; it is counted when
    /// `count_trailing_empty` is set.
    pub fn count_source<R: BufRead>(
        source: &mut LineSource<R>,
        count_trailing_empty: bool,
    ) -> Result<Self> {
        let mut tally = Self::new();
        while let Some(line) = source.next_line()? {
            tally.add_line(line);
        }
        if count_trailing_empty && source.ends_with_empty_line() {
            tally.add_line(b"");
        }
        tracing::debug!(
            source = %source.name(),
            "counted {} lines, {} distinct",
            tally.total_lines(),
            tally.len()
        );
        Ok(tally)
    }

    /// `(line, count)` pairs in the requested order.
    pub fn into_sorted(self, order: OutputOrder) -> Vec<(Vec<u8>, u64)> {
        let mut entries: Vec<_> = self.table.into_iter().collect();
        sort_entries(&mut entries, order, |a, b| a.cmp(b));
        entries
    }

    /// Write `<count>\t<line>` for every distinct line.
    pub fn write_to<W: Write>(self, order: OutputOrder, out: &mut CountWriter<W>) -> Result<()> {
        for (line, count) in self.into_sorted(order) {
            out.write_record(&count, &line)?;
        }
        Ok(())
    }
}
