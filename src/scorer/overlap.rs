//! Normalized overlap scorers.

use super::dot::DotProduct;
use super::traits::Scorer;
use crate::item::TermCounts;

/// Cosine similarity of raw term counts.
///
/// Zero when either vector is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cosine;

impl Cosine {
    fn norm(counts: &TermCounts) -> f64 {
        counts
            .iter()
            .map(|(_, n)| (n as f64) * (n as f64))
            .sum::<f64>()
            .sqrt()
    }
}

impl Scorer for Cosine {
    fn score(&self, target: &TermCounts, candidate: &TermCounts) -> f64 {
        let denom = Self::norm(target) * Self::norm(candidate);
        if denom == 0.0 {
            return 0.0;
        }
        DotProduct::dot(target, candidate) as f64 / denom
    }
}

/// Jaccard overlap of the two term sets; counts are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Jaccard;

impl Scorer for Jaccard {
    fn score(&self, target: &TermCounts, candidate: &TermCounts) -> f64 {
        let shared = target.terms().filter(|t| candidate.contains(t)).count();
        let union = target.len() + candidate.len() - shared;
        if union == 0 {
            return 0.0;
        }
        shared as f64 / union as f64
    }
}
