//! Alphabetical sort with duplicate summation behind `sortalph`
//!
//! Unlike the merge inputs, the source may be in any order and may repeat a
//! value; repeated values are summed.

use std::io::{BufRead, Write};

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::io::{open_input, open_output, CountReader, CountWriter};
use crate::order::{sort_entries, OutputOrder};
use crate::record::{Count, CountRecord};

/// Accumulated count per value.
#[derive(Debug, Clone)]
pub struct ValueTotals<C: Count> {
    table: FxHashMap<Vec<u8>, C>,
    records: u64,
}

impl<C: Count> Default for ValueTotals<C> {
    fn default() -> Self {
        Self {
            table: FxHashMap::default(),
            records: 0,
        }
    }
}

impl<C: Count> ValueTotals<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: CountRecord<C>) {
        self.table
            .entry(record.value)
            .and_modify(|total| *total = total.combine(record.count))
            .or_insert(record.count);
        self.records += 1;
    }

    pub fn get(&self, value: &[u8]) -> Option<C> {
        self.table.get(value).copied()
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of records added.
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Read every record of `reader`.
    pub fn read_all<R: BufRead>(reader: &mut CountReader<R, C>) -> Result<Self> {
        let mut totals = Self::new();
        while let Some(record) = reader.next_record()? {
            totals.add(record);
        }
        tracing::debug!(
            source = %reader.source_name(),
            mode = C::MODE,
            "read {} records, {} distinct values",
            totals.records(),
            totals.len()
        );
        Ok(totals)
    }

    pub fn into_sorted(self, order: OutputOrder) -> Vec<(Vec<u8>, C)> {
        let mut entries: Vec<_> = self.table.into_iter().collect();
        sort_entries(&mut entries, order, C::cmp_count);
        entries
    }

    pub fn write_to<W: Write>(self, order: OutputOrder, out: &mut CountWriter<W>) -> Result<()> {
        for (value, total) in self.into_sorted(order) {
            out.write_record(&total, &value)?;
        }
        Ok(())
    }
}

/// Sort the count file `input` (`-` is stdin) into `output`, or standard
/// output when it is `None`. Returns the number of distinct values written.
pub fn sort_file<C: Count>(input: &str, output: Option<&str>, order: OutputOrder) -> Result<u64> {
    let mut reader = CountReader::<_, C>::new(open_input(input)?);
    let mut out = open_output(output)?;

    let totals = ValueTotals::read_all(&mut reader)?;
    totals.write_to(order, &mut out)?;
    let written = out.records_written();
    out.finish()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CountError;

    fn totals<C: Count>(text: &str) -> Result<ValueTotals<C>> {
        let mut reader = CountReader::from_reader("in", text.as_bytes());
        ValueTotals::read_all(&mut reader)
    }

    fn render<C: Count>(totals: ValueTotals<C>, order: OutputOrder) -> String {
        let mut out = CountWriter::new("out", Vec::new());
        totals.write_to(order, &mut out).unwrap();
        String::from_utf8(out.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_sorts_and_sums_duplicates() {
        let t = totals::<i64>("4\tpear\n1\tapple\n2\tpear\n3\tfig\n").unwrap();
        assert_eq!(t.get(b"pear"), Some(6));
        assert_eq!(t.records(), 4);
        assert_eq!(
            render(t, OutputOrder::Alphabetical),
            "1\tapple\n3\tfig\n6\tpear\n"
        );
    }

    #[test]
    fn test_descending_frequency_keeps_ties() {
        let t = totals::<i64>("2\tb\n5\tc\n2\ta\n").unwrap();
        assert_eq!(
            render(t, OutputOrder::DescendingFrequency),
            "5\tc\n2\ta\n2\tb\n"
        );
    }

    #[test]
    fn test_floating_point_totals() {
        let t = totals::<f64>("0.5\tx\n1.25\ty\n0.5\tx\n").unwrap();
        assert_eq!(t.get(b"x"), Some(1.0));
        assert_eq!(
            render(t, OutputOrder::DescendingFrequency),
            "1.25\ty\n1\tx\n"
        );
    }

    #[test]
    fn test_line_without_tab_is_rejected() {
        let err = totals::<i64>("1\ta\n7\n").unwrap_err();
        assert!(matches!(err, CountError::MissingTab { line: 2, .. }));
    }
}
