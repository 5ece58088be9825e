//! Items and their term-frequency vectors.
//!
//! An [`Item`] is the unit the engine clusters: a unique identifier (for
//! abstracts, the PubMed id) plus a [`TermCounts`] vector built upstream from
//! the item's text. The engine never looks at the text itself.

use std::collections::hash_map::{self, HashMap};

/// Sparse term-frequency vector: term -> occurrence count.
///
/// Absent terms have count zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermCounts {
    counts: HashMap<String, u64>,
}

impl TermCounts {
    /// Create an empty vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for `term`, zero if absent.
    #[inline]
    pub fn get(&self, term: &str) -> u64 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    /// Add `n` occurrences of `term`.
    pub fn add(&mut self, term: impl Into<String>, n: u64) {
        if n == 0 {
            return;
        }
        *self.counts.entry(term.into()).or_insert(0) += n;
    }

    /// Add a single occurrence of `term`.
    pub fn increment(&mut self, term: impl Into<String>) {
        self.add(term, 1);
    }

    /// Elementwise sum: fold every count of `other` into `self`.
    pub fn merge(&mut self, other: &TermCounts) {
        for (term, &n) in &other.counts {
            *self.counts.entry(term.clone()).or_insert(0) += n;
        }
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if no term has a nonzero count.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Whether `term` has a nonzero count.
    pub fn contains(&self, term: &str) -> bool {
        self.counts.contains_key(term)
    }

    /// Iterate over `(term, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(t, &n)| (t.as_str(), n))
    }

    /// Distinct terms in arbitrary order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for TermCounts {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut counts = TermCounts::new();
        counts.extend(iter);
        counts
    }
}

impl<S: Into<String>> Extend<(S, u64)> for TermCounts {
    fn extend<I: IntoIterator<Item = (S, u64)>>(&mut self, iter: I) {
        for (term, n) in iter {
            self.add(term, n);
        }
    }
}

impl IntoIterator for TermCounts {
    type Item = (String, u64);
    type IntoIter = hash_map::IntoIter<String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

/// A uniquely identified document carrying its term-frequency vector.
///
/// Immutable once handed to the engine; identity is the `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Unique identifier.
    pub id: u64,
    /// Term-frequency vector.
    pub counts: TermCounts,
}

impl Item {
    /// Create an item.
    pub fn new(id: u64, counts: TermCounts) -> Self {
        Self { id, counts }
    }

    /// Convenience constructor from `(term, count)` pairs.
    pub fn from_pairs<S: Into<String>>(id: u64, pairs: impl IntoIterator<Item = (S, u64)>) -> Self {
        Self::new(id, pairs.into_iter().collect())
    }
}
