//! Result assembly
//!
//! Merges generator output into the final candidate list: exact duplicates
//! removed, ordinal ascending order.

use std::collections::BTreeSet;

/// Merge candidate lists into a sorted, duplicate-free list
pub fn assemble<I>(candidate_lists: I) -> Vec<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    candidate_lists
        .into_iter()
        .flatten()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
