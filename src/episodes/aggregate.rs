//! Span reducers
//!
//! Small folds used to collapse the events of one episode span into a single
//! feature value. Tie-break order is observable in the output, so the mode is
//! computed here rather than borrowed from a statistics crate.

use std::collections::HashSet;

/// Value reported when a categorical column has nothing but missing values
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Most frequent present value, or [`UNKNOWN_LABEL`] when none is present
///
/// On a tie the value encountered first wins.
///
/// ```rust
/// use door_episodes::episodes::mode_or_unknown;
///
/// let values = [None, Some("b"), Some("a"), Some("a"), Some("b")];
/// assert_eq!(mode_or_unknown(values), "b");
/// assert_eq!(mode_or_unknown([None::<&str>, None]), "Unknown");
/// ```
pub fn mode_or_unknown<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    // (value, count) in first-seen order
    let mut tally: Vec<(&'a str, usize)> = Vec::new();
    for value in values.into_iter().flatten() {
        match tally.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => tally.push((value, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, count) in tally {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }

    best.map_or_else(|| UNKNOWN_LABEL.to_string(), |(value, _)| value.to_string())
}

/// Number of distinct values
pub fn distinct_count<'a, I>(values: I) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    values.into_iter().collect::<HashSet<_>>().len()
}

/// Logical OR over a sequence of flags; false when empty
pub fn any_flag<I>(flags: I) -> bool
where
    I: IntoIterator<Item = bool>,
{
    flags.into_iter().any(|flag| flag)
}
