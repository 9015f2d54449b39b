//! Threshold filter behind `threshcount`

use std::io::{BufRead, Write};

use crate::error::{CountError, Result};
use crate::io::{CountReader, CountWriter};
use crate::record::Count;

/// Parse a threshold argument. Numeric-prefix rules as for count fields;
/// the result must be positive.
pub fn parse_threshold(arg: &str) -> Result<i64> {
    let threshold = i64::parse_field(arg.as_bytes())
        .ok_or_else(|| CountError::Usage(format!("Invalid threshold argument {}", arg)))?;
    if threshold <= 0 {
        return Err(CountError::Usage(format!(
            "Threshold must be positive: {}",
            threshold
        )));
    }
    Ok(threshold)
}

/// Copy the records of `reader` whose count is strictly greater than
/// `threshold`, in input order. Returns the number of records kept.
pub fn filter_above<R: BufRead, W: Write>(
    reader: &mut CountReader<R, i64>,
    threshold: i64,
    out: &mut CountWriter<W>,
) -> Result<u64> {
    let mut seen = 0u64;
    let mut kept = 0u64;
    while let Some(record) = reader.next_record()? {
        seen += 1;
        if record.count > threshold {
            out.write_record(&record.count, &record.value)?;
            kept += 1;
        }
    }
    tracing::debug!(threshold, "kept {} of {} records", kept, seen);
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(text: &str, threshold: i64) -> Result<String> {
        let mut reader = CountReader::from_reader("<stdin>", text.as_bytes());
        let mut out = CountWriter::new("<stdout>", Vec::new());
        filter_above(&mut reader, threshold, &mut out)?;
        Ok(String::from_utf8(out.finish()?).unwrap())
    }

    #[test]
    fn test_strictly_greater() {
        assert_eq!(filter("3\tx\n7\ty\n2\tz\n", 3).unwrap(), "7\ty\n");
    }

    #[test]
    fn test_preserves_input_order() {
        assert_eq!(
            filter("9\tz\n1\ta\n5\tm\n", 1).unwrap(),
            "9\tz\n5\tm\n"
        );
    }

    #[test]
    fn test_parse_threshold() {
        assert_eq!(parse_threshold("3").unwrap(), 3);
        assert_eq!(parse_threshold("10abc").unwrap(), 10);
        assert_eq!(
            parse_threshold("0").unwrap_err().to_string(),
            "ERROR: Threshold must be positive: 0"
        );
        assert_eq!(
            parse_threshold("-4").unwrap_err().to_string(),
            "ERROR: Threshold must be positive: -4"
        );
        assert_eq!(
            parse_threshold("many").unwrap_err().to_string(),
            "ERROR: Invalid threshold argument many"
        );
    }

    #[test]
    fn test_bad_record() {
        let err = filter("3\tx\nseven\ty\n", 1).unwrap_err();
        assert_eq!(err.to_string(), "<stdin>:2: error: could not read count field");
    }
}
