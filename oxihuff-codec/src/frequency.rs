//! Symbol frequency analysis.

use std::collections::BTreeMap;

/// Occurrence count for every distinct symbol of a text.
///
/// Symbols are kept in ascending order, which fixes the order in which
/// leaves enter the tree builder.
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
    pub fn from_text(text: &str) -> Self {
        text.chars().collect()
    }

    /// Record one occurrence of `symbol`.
    pub fn add(&mut self, symbol: char) {
        *self.counts.entry(symbol).or_insert(0) += 1;
    }

    /// Occurrence count of `symbol` (0 if absent).
    pub fn get(&self, symbol: char) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if no symbol has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of symbols counted.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate over `(symbol, count)` in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}

impl FromIterator<char> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut table = Self::new();
        for symbol in iter {
            table.add(symbol);
        }
        table
    }
}
