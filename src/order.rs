//! Output ordering for the tools that build a full map before writing

use std::cmp::Ordering;

/// How `count` and `sortalph` order their output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputOrder {
    /// Ascending byte-wise by value.
    #[default]
    Alphabetical,
    /// Descending by count; equal counts ascending by value.
    DescendingFrequency,
}

impl OutputOrder {
    pub fn from_flag(by_frequency: bool) -> Self {
        if by_frequency {
            OutputOrder::DescendingFrequency
        } else {
            OutputOrder::Alphabetical
        }
    }
}

/// Sort `(value, count)` entries with unique values.
pub fn sort_entries<C, F>(entries: &mut [(Vec<u8>, C)], order: OutputOrder, cmp_count: F)
where
    F: Fn(&C, &C) -> Ordering,
{
    match order {
        OutputOrder::Alphabetical => entries.sort_unstable_by(|a, b| a.0.cmp(&b.0)),
        OutputOrder::DescendingFrequency => entries
            .sort_unstable_by(|a, b| cmp_count(&b.1, &a.1).then_with(|| a.0.cmp(&b.0))),
    }
}
