//! Dot-product scoring.
//!
//! For each term of the target, multiply its count by the candidate's count
//! for the same term and sum. Products are accumulated as integers, so the
//! result is exactly symmetric even though only the target's terms are walked.

use super::traits::Scorer;
use crate::item::TermCounts;

/// Inner product of raw term counts. The default scorer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DotProduct;

impl DotProduct {
    /// Integer inner product of two count vectors.
    pub fn dot(target: &TermCounts, candidate: &TermCounts) -> u128 {
        target
            .iter()
            .map(|(term, n)| n as u128 * candidate.get(term) as u128)
            .sum()
    }
}

impl Scorer for DotProduct {
    #[inline]
    fn score(&self, target: &TermCounts, candidate: &TermCounts) -> f64 {
        Self::dot(target, candidate) as f64
    }
}
