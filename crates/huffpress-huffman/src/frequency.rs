//! Symbol frequency analysis.

use std::collections::btree_map;
use std::collections::BTreeMap;

/// Occurrence count per distinct symbol.
///
/// Entries iterate in ascending symbol order, which is what makes tree
/// construction reproducible for identical input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<char, u64>,
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every symbol of `text`.
    pub fn count(text: &str) -> Self {
        let mut table = Self::new();
        for symbol in text.chars() {
            table.add(symbol, 1);
        }
        table
    }

    /// Count every symbol of `text` on the rayon pool.
    ///
    /// Partial tables are merged additively, so the result is identical to
    /// [`FrequencyTable::count`].
    #[cfg(feature = "parallel")]
    pub fn count_parallel(text: &str) -> Self {
        use rayon::prelude::*;

        text.par_chars()
            .fold(Self::new, |mut table, symbol| {
                table.add(symbol, 1);
                table
            })
            .reduce(Self::new, |mut a, b| {
                a.merge(&b);
                a
            })
    }

    /// Add `count` occurrences of `symbol`.
    #[inline]
    pub fn add(&mut self, symbol: char, count: u64) {
        *self.counts.entry(symbol).or_insert(0) += count;
    }

    /// Merge the counts of another table into this one.
    pub fn merge(&mut self, other: &FrequencyTable) {
        for (symbol, count) in other.iter() {
            self.add(symbol, count);
        }
    }

    /// Occurrences of `symbol`, if it was observed.
    pub fn get(&self, symbol: char) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if no symbol was observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of symbol occurrences.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}

impl FromIterator<(char, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (char, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, count) in iter {
            table.add(symbol, count);
        }
        table
    }
}

impl IntoIterator for FrequencyTable {
    type Item = (char, u64);
    type IntoIter = btree_map::IntoIter<char, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}
