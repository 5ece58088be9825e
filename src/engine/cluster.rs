//! Cluster accumulator.

use std::collections::HashMap;
use std::fmt;

use crate::item::TermCounts;

/// A flat cluster: a dense integer id plus the summed term counts of its
/// members.
///
/// The aggregate is diagnostic only; membership decisions never read it.
/// A cluster only grows.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    id: usize,
    counts: TermCounts,
    n_members: usize,
}

impl Cluster {
    /// Create an empty cluster.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            counts: TermCounts::new(),
            n_members: 0,
        }
    }

    /// Cluster id, assigned in creation order starting at 0.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Fold one member's term counts into the aggregate.
    pub fn add_member(&mut self, counts: &TermCounts) {
        self.n_members += 1;
        self.counts.merge(counts);
    }

    /// Number of members folded in so far.
    pub fn n_members(&self) -> usize {
        self.n_members
    }

    /// Elementwise sum of member term counts.
    pub fn counts(&self) -> &TermCounts {
        &self.counts
    }

    /// Mean count per member for every term.
    pub fn normalized_counts(&self) -> HashMap<String, f64> {
        if self.n_members == 0 {
            return HashMap::new();
        }
        let n = self.n_members as f64;
        self.counts
            .iter()
            .map(|(term, c)| (term.to_string(), c as f64 / n))
            .collect()
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<cluster {}>", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_member_accumulates() {
        let mut cluster = Cluster::new(3);
        cluster.add_member(&TermCounts::from_iter([("aorta", 2)]));
        cluster.add_member(&TermCounts::from_iter([("aorta", 1), ("valve", 4)]));

        assert_eq!(cluster.id(), 3);
        assert_eq!(cluster.n_members(), 2);
        assert_eq!(cluster.counts().get("aorta"), 3);
        assert_eq!(cluster.counts().get("valve"), 4);
    }

    #[test]
    fn test_normalized_counts() {
        let mut cluster = Cluster::new(0);
        assert!(cluster.normalized_counts().is_empty());

        cluster.add_member(&TermCounts::from_iter([("x", 3)]));
        cluster.add_member(&TermCounts::from_iter([("x", 1), ("y", 1)]));
        let norm = cluster.normalized_counts();
        assert!((norm["x"] - 2.0).abs() < 1e-12);
        assert!((norm["y"] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        assert_eq!(Cluster::new(12).to_string(), "<cluster 12>");
    }
}
