//! Merge-join two sorted count sources
//!
//! Both sources must be sorted strictly ascending by value. Output is
//! sorted the same way; a value present on both sides is written once with
//! the two counts summed.
//!
//! Single pass, O(n + m). Only the two current records and the two
//! last-seen values are held in memory.

use std::cmp::Ordering;
use std::io::{BufRead, Write};

use crate::error::{CountError, Result};
use crate::io::{is_stdin_arg, open_input, open_output, CountReader, CountWriter};
use crate::record::{Count, CountRecord};

use super::verify::SortedReader;

/// Counters reported after a successful merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub left_records: u64,
    pub right_records: u64,
    /// Values found on both sides
    pub summed: u64,
    pub written: u64,
}

/// Merge `left` and `right` into `out`.
///
/// Aborts on the first parse or order error from either side. Records
/// already handed to `out` stay there.
pub fn merge_join<A, B, C, W>(
    left: CountReader<A, C>,
    right: CountReader<B, C>,
    out: &mut CountWriter<W>,
) -> Result<MergeStats>
where
    A: BufRead,
    B: BufRead,
    C: Count,
    W: Write,
{
    let mut left = SortedReader::new(left);
    let mut right = SortedReader::new(right);
    let written_before = out.records_written();
    let mut summed = 0u64;

    let mut current_left = left.next_record()?;
    let mut current_right = right.next_record()?;

    loop {
        match (current_left.take(), current_right.take()) {
            (Some(l), Some(r)) => match l.value.cmp(&r.value) {
                Ordering::Less => {
                    emit(out, &l)?;
                    current_left = left.next_record()?;
                    current_right = Some(r);
                }
                Ordering::Equal => {
                    tracing::trace!("summing {:?}", l.value_lossy());
                    out.write_record(&l.count.combine(r.count), &l.value)?;
                    summed += 1;
                    current_left = left.next_record()?;
                    current_right = right.next_record()?;
                }
                Ordering::Greater => {
                    emit(out, &r)?;
                    current_left = Some(l);
                    current_right = right.next_record()?;
                }
            },
            // Drain whichever side is left.
            (Some(l), None) => {
                emit(out, &l)?;
                current_left = left.next_record()?;
            }
            (None, Some(r)) => {
                emit(out, &r)?;
                current_right = right.next_record()?;
            }
            (None, None) => break,
        }
    }

    let stats = MergeStats {
        left_records: left.records(),
        right_records: right.records(),
        summed,
        written: out.records_written() - written_before,
    };
    tracing::debug!(
        left = %left.source_name(),
        right = %right.source_name(),
        mode = C::MODE,
        "merged {} + {} records into {} ({} summed)",
        stats.left_records,
        stats.right_records,
        stats.written,
        stats.summed
    );
    Ok(stats)
}

/// Merge the count files named on the command line (`-` is stdin, at most
/// once) into `output`, or standard output when it is `None`.
pub fn merge_files<C: Count>(
    input1: &str,
    input2: &str,
    output: Option<&str>,
) -> Result<MergeStats> {
    if is_stdin_arg(input1) && is_stdin_arg(input2) {
        return Err(CountError::AmbiguousStdin);
    }
    let left = CountReader::<_, C>::new(open_input(input1)?);
    let right = CountReader::<_, C>::new(open_input(input2)?);
    let mut out = open_output(output)?;

    let stats = merge_join(left, right, &mut out)?;
    out.finish()?;
    Ok(stats)
}

fn emit<C: Count, W: Write>(out: &mut CountWriter<W>, record: &CountRecord<C>) -> Result<()> {
    out.write_record(&record.count, &record.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merge<C: Count>(left: &str, right: &str) -> Result<(String, MergeStats)> {
        let mut out = CountWriter::new("out", Vec::new());
        let stats = merge_join(
            CountReader::<_, C>::from_reader("left", left.as_bytes()),
            CountReader::<_, C>::from_reader("right", right.as_bytes()),
            &mut out,
        )?;
        let bytes = out.finish()?;
        Ok((String::from_utf8(bytes).unwrap(), stats))
    }

    #[test]
    fn test_merge_sums_shared_values() {
        let (out, stats) = merge::<i64>(
            "2\tapple\n5\tcherry\n",
            "1\tbanana\n3\tcherry\n4\tdate\n",
        )
        .unwrap();
        assert_eq!(out, "2\tapple\n1\tbanana\n8\tcherry\n4\tdate\n");
        assert_eq!(
            stats,
            MergeStats {
                left_records: 2,
                right_records: 3,
                summed: 1,
                written: 4,
            }
        );
    }

    #[test]
    fn test_merge_with_empty_side() {
        let input = "3\ta\n1\tb\n";
        assert_eq!(merge::<i64>(input, "").unwrap().0, input);
        assert_eq!(merge::<i64>("", input).unwrap().0, input);
        assert_eq!(merge::<i64>("", "").unwrap().0, "");
    }

    #[test]
    fn test_merge_floating_point() {
        let (out, _) = merge::<f64>("0.5\tx\n", "0.25\tx\n1e2\ty\n").unwrap();
        assert_eq!(out, "0.75\tx\n100\ty\n");
    }

    #[test]
    fn test_final_line_without_newline() {
        let (out, _) = merge::<i64>("1\ta\n2\tc", "5\tb").unwrap();
        assert_eq!(out, "1\ta\n5\tb\n2\tc\n");
    }

    #[test]
    fn test_unsorted_left_fails() {
        let err = merge::<i64>("1\tbanana\n2\tapple\n", "").unwrap_err();
        assert!(matches!(
            err,
            CountError::UnsortedInput { ref source_name, line: 2 } if source_name == "left"
        ));
    }

    #[test]
    fn test_unsorted_right_fails() {
        let err = merge::<i64>("1\ta\n", "1\tb\n1\tb\n").unwrap_err();
        assert!(matches!(
            err,
            CountError::UnsortedInput { ref source_name, line: 2 } if source_name == "right"
        ));
    }

    #[test]
    fn test_unsorted_record_is_not_written() {
        let mut out = CountWriter::new("out", Vec::new());
        let result = merge_join(
            CountReader::<_, i64>::from_reader("left", &b"1\tbanana\n2\tapple\n"[..]),
            CountReader::<_, i64>::from_reader("right", &b""[..]),
            &mut out,
        );
        assert!(result.is_err());
        let bytes = out.finish().unwrap();
        assert!(!String::from_utf8(bytes).unwrap().contains("apple"));
    }

    #[test]
    fn test_inner_empty_line_is_an_error() {
        let err = merge::<i64>("1\ta\n\n2\tb\n", "").unwrap_err();
        assert!(matches!(err, CountError::MissingTab { line: 2, .. }));
    }

    #[test]
    fn test_merge_files_rejects_double_stdin() {
        assert!(matches!(
            merge_files::<i64>("-", "-", None),
            Err(CountError::AmbiguousStdin)
        ));
    }

    #[test]
    fn test_merge_files_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.cnt");
        let b = dir.path().join("b.cnt");
        let out = dir.path().join("out.cnt");
        std::fs::write(&a, "1\tx\n2\ty\n").unwrap();
        std::fs::write(&b, "3\ty\n").unwrap();

        let stats = merge_files::<i64>(
            a.to_str().unwrap(),
            b.to_str().unwrap(),
            Some(out.to_str().unwrap()),
        )
        .unwrap();
        assert_eq!(stats.written, 2);
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "1\tx\n5\ty\n");
    }

    #[test]
    fn test_bad_count_reports_side() {
        let err = merge::<i64>("1\ta\n", "x\tb\n").unwrap_err();
        assert_eq!(err.to_string(), "right:1: error: could not read count field");
    }
}
