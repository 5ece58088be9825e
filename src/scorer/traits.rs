//! Scorer trait.

use crate::item::TermCounts;

/// Similarity strategy between two term-frequency vectors.
///
/// Implementations must be pure: the same inputs always give the same score.
pub trait Scorer: Send + Sync {
    /// Score `candidate` as a match for `target`. Higher is more similar.
    fn score(&self, target: &TermCounts, candidate: &TermCounts) -> f64;
}

impl<S: Scorer + ?Sized> Scorer for &S {
    fn score(&self, target: &TermCounts, candidate: &TermCounts) -> f64 {
        (**self).score(target, candidate)
    }
}

impl<S: Scorer + ?Sized> Scorer for Box<S> {
    fn score(&self, target: &TermCounts, candidate: &TermCounts) -> f64 {
        (**self).score(target, candidate)
    }
}

/// A function-based scorer.
#[derive(Clone)]
pub struct FnScorer<F> {
    f: F,
}

impl<F> FnScorer<F> {
    /// Create a scorer from a function.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> std::fmt::Debug for FnScorer<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnScorer")
    }
}

impl<F> Scorer for FnScorer<F>
where
    F: Fn(&TermCounts, &TermCounts) -> f64 + Send + Sync,
{
    fn score(&self, target: &TermCounts, candidate: &TermCounts) -> f64 {
        (self.f)(target, candidate)
    }
}

/// Create a scorer from a closure.
pub fn from_fn<F>(f: F) -> FnScorer<F>
where
    F: Fn(&TermCounts, &TermCounts) -> f64 + Send + Sync,
{
    FnScorer::new(f)
}
