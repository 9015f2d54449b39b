//! Order validation for merge inputs
//!
//! Wraps a [`CountReader`] and rejects any record whose value is not
//! strictly greater (byte-wise) than the previous record's value from the
//! same source. The first record is exempt.

use std::io::BufRead;

use crate::error::{CountError, Result};
use crate::io::CountReader;
use crate::record::{Count, CountRecord};

pub struct SortedReader<R, C> {
    inner: CountReader<R, C>,
    last_value: Option<Vec<u8>>,
    records: u64,
}

impl<R: BufRead, C: Count> SortedReader<R, C> {
    pub fn new(inner: CountReader<R, C>) -> Self {
        Self {
            inner,
            last_value: None,
            records: 0,
        }
    }

    pub fn source_name(&self) -> &str {
        self.inner.source_name()
    }

    /// Records read so far.
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Next record, validated against the previous one.
    pub fn next_record(&mut self) -> Result<Option<CountRecord<C>>> {
        let record = match self.inner.next_record()? {
            Some(record) => record,
            None => return Ok(None),
        };
        if let Some(last) = &self.last_value {
            if last.as_slice() >= record.value.as_slice() {
                return Err(CountError::UnsortedInput {
                    source_name: self.inner.source_name().to_string(),
                    line: self.inner.line_number(),
                });
            }
        }
        self.last_value = Some(record.value.clone());
        self.records += 1;
        Ok(Some(record))
    }
}
