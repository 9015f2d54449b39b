//! Count records and the line parser shared by every tool
//!
//! A count line is `<count>\t<value>`. Everything after the first tab is the
//! value, kept as raw bytes so that comparisons are byte-wise and output is
//! written back verbatim.
//!
//! The count field is read the way a C++ stream extraction reads a number:
//! leading whitespace is skipped, the longest numeric prefix is taken, and
//! anything after it is ignored. An empty prefix or an out-of-range number
//! is an error.

use std::cmp::Ordering;
use std::fmt;

use memchr::memchr;

use crate::error::{CountError, Result};

/// Numeric mode of a run. Fixed per invocation: `i64` by default, `f64`
/// when the tool is given `-d`.
pub trait Count: Copy + PartialEq + fmt::Display + fmt::Debug {
    /// Short name used in log output.
    const MODE: &'static str;

    /// Parse the numeric prefix of a count field.
    fn parse_field(field: &[u8]) -> Option<Self>;

    /// Sum of two counts for the same value.
    fn combine(self, other: Self) -> Self;

    /// Total order used when sorting by frequency.
    fn cmp_count(&self, other: &Self) -> Ordering;
}

impl Count for i64 {
    const MODE: &'static str = "integer";

    fn parse_field(field: &[u8]) -> Option<Self> {
        integer_prefix(field)?.parse().ok()
    }

    // No overflow checking beyond the native width.
    fn combine(self, other: Self) -> Self {
        self.wrapping_add(other)
    }

    fn cmp_count(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl Count for f64 {
    const MODE: &'static str = "floating-point";

    fn parse_field(field: &[u8]) -> Option<Self> {
        let (text, special) = float_prefix(field)?;
        let value: f64 = text.parse().ok()?;
        if value.is_infinite() && !special {
            // finite literal out of range
            return None;
        }
        Some(value)
    }

    fn combine(self, other: Self) -> Self {
        self + other
    }

    fn cmp_count(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

/// A `(count, value)` pair.
#[derive(Clone, Debug, PartialEq)]
pub struct CountRecord<C: Count> {
    pub count: C,
    pub value: Vec<u8>,
}

impl<C: Count> CountRecord<C> {
    pub fn new(count: C, value: impl Into<Vec<u8>>) -> Self {
        Self {
            count,
            value: value.into(),
        }
    }

    /// Parse one line (without its trailing newline).
    ///
    /// `source_name` and `line` only feed the diagnostics.
    ///
    /// ```
    /// use counttools::record::CountRecord;
    ///
    /// let record = CountRecord::<i64>::parse(b"12\tred\tapple", "<stdin>", 1).unwrap();
    /// assert_eq!(record.count, 12);
    /// assert_eq!(record.value, b"red\tapple");
    /// ```
    pub fn parse(line: &[u8], source_name: &str, line_no: usize) -> Result<Self> {
        let tab = memchr(b'\t', line).ok_or_else(|| CountError::MissingTab {
            source_name: source_name.to_string(),
            line: line_no,
        })?;
        let count = C::parse_field(&line[..tab]).ok_or_else(|| CountError::InvalidCount {
            source_name: source_name.to_string(),
            line: line_no,
        })?;
        Ok(Self {
            count,
            value: line[tab + 1..].to_vec(),
        })
    }

    /// Value as text, for logs and tests.
    pub fn value_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.value)
    }
}

/// Space, `\t`, `\n`, `\v`, `\f`, `\r`: the C `isspace` set.
fn skip_whitespace(field: &[u8]) -> &[u8] {
    let start = field
        .iter()
        .position(|b| !matches!(b, b' ' | b'\t'..=b'\r'))
        .unwrap_or(field.len());
    &field[start..]
}

fn digits_len(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn sign_len(bytes: &[u8]) -> usize {
    usize::from(matches!(bytes.first(), Some(b'+' | b'-')))
}

/// `[+-]?[0-9]+` at the start of the field.
fn integer_prefix(field: &[u8]) -> Option<&str> {
    let field = skip_whitespace(field);
    let sign = sign_len(field);
    let digits = digits_len(&field[sign..]);
    if digits == 0 {
        return None;
    }
    std::str::from_utf8(&field[..sign + digits]).ok()
}

/// Decimal floating-point literal at the start of the field. The flag is
/// set for `inf`/`infinity`/`nan`, which are accepted as-is.
fn float_prefix(field: &[u8]) -> Option<(&str, bool)> {
    let field = skip_whitespace(field);
    let sign = sign_len(field);
    let rest = &field[sign..];

    for word in ["infinity", "inf", "nan"] {
        if rest.len() >= word.len() && rest[..word.len()].eq_ignore_ascii_case(word.as_bytes()) {
            let text = std::str::from_utf8(&field[..sign + word.len()]).ok()?;
            return Some((text, true));
        }
    }

    let mut end = sign;
    let int_digits = digits_len(&field[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if field.get(end) == Some(&b'.') {
        frac_digits = digits_len(&field[end + 1..]);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    // The exponent only counts when digits follow the marker.
    if matches!(field.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        exp += sign_len(&field[exp..]);
        let exp_digits = digits_len(&field[exp..]);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    let text = std::str::from_utf8(&field[..end]).ok()?;
    Some((text, false))
}
