//! Comparing a predicted partition with a ground-truth one.
//!
//! Ground truth never feeds back into clustering; these measures exist so a
//! labeled dataset can be used to judge the output.
//!
//! | Metric | Range | Best | Notes |
//! |--------|-------|------|-------|
//! | [`nmi`] | [0, 1] | 1 | Normalized mutual information |
//! | [`ari`] | [-1, 1] | 1 | Adjusted Rand Index, chance-corrected |
//! | [`purity`] | [0, 1] | 1 | Rewards over-clustering; 1.0 for all singletons |
//! | [`homogeneity`] | [0, 1] | 1 | Each cluster holds one class |
//! | [`completeness`] | [0, 1] | 1 | Each class sits in one cluster |
//! | [`v_measure`] | [0, 1] | 1 | Harmonic mean of the two above |
//! | [`fowlkes_mallows`] | [0, 1] | 1 | Pairwise precision/recall |
//!
//! The label-vector functions take one label per item, aligned by position.
//! [`Evaluation::compare`] works on id partitions directly, which is what the
//! engine and the dataset loader produce.
//!
//! ```rust
//! use std::collections::BTreeSet;
//! use reciprocal::metrics::Evaluation;
//!
//! let predicted: Vec<BTreeSet<u64>> = vec![[1, 2].into(), [3, 4].into()];
//! let expected: Vec<BTreeSet<u64>> = vec![[1, 2].into(), [3, 4].into()];
//! let eval = Evaluation::compare(&predicted, &expected);
//! assert!((eval.ari - 1.0).abs() < 1e-9);
//! ```

use std::collections::{BTreeSet, HashMap};

const EPS: f64 = 1e-10;

/// Joint counts of (predicted, truth) label pairs with their marginals.
struct Contingency {
    joint: HashMap<(usize, usize), usize>,
    pred: HashMap<usize, usize>,
    truth: HashMap<usize, usize>,
    n: usize,
}

impl Contingency {
    fn new(pred: &[usize], truth: &[usize]) -> Self {
        let mut joint = HashMap::new();
        let mut p = HashMap::new();
        let mut t = HashMap::new();
        for (&a, &b) in pred.iter().zip(truth) {
            *joint.entry((a, b)).or_insert(0) += 1;
            *p.entry(a).or_insert(0) += 1;
            *t.entry(b).or_insert(0) += 1;
        }
        Self {
            joint,
            pred: p,
            truth: t,
            n: pred.len(),
        }
    }

    fn entropy(marginal: &HashMap<usize, usize>, n: usize) -> f64 {
        let n = n as f64;
        marginal
            .values()
            .map(|&c| {
                let p = c as f64 / n;
                -p * p.ln()
            })
            .sum()
    }

    fn h_pred(&self) -> f64 {
        Self::entropy(&self.pred, self.n)
    }

    fn h_truth(&self) -> f64 {
        Self::entropy(&self.truth, self.n)
    }

    fn mutual_information(&self) -> f64 {
        let n = self.n as f64;
        self.joint
            .iter()
            .map(|(&(a, b), &c)| {
                let p_ab = c as f64 / n;
                let p_a = self.pred[&a] as f64 / n;
                let p_b = self.truth[&b] as f64 / n;
                p_ab * (p_ab / (p_a * p_b)).ln()
            })
            .sum()
    }

    /// H(truth | pred) and H(pred | truth).
    fn conditional_entropies(&self) -> (f64, f64) {
        let mi = self.mutual_information();
        (self.h_truth() - mi, self.h_pred() - mi)
    }
}

fn comb2(n: usize) -> f64 {
    if n < 2 {
        0.0
    } else {
        (n * (n - 1) / 2) as f64
    }
}

fn usable(pred: &[usize], truth: &[usize]) -> bool {
    pred.len() == truth.len() && !pred.is_empty()
}

/// Normalized Mutual Information: `2 I(P; T) / (H(P) + H(T))`.
///
/// ```rust
/// use reciprocal::metrics::nmi;
///
/// assert!((nmi(&[0, 0, 1, 1], &[1, 1, 0, 0]) - 1.0).abs() < 1e-9);
/// assert!(nmi(&[0, 1, 0, 1], &[0, 0, 1, 1]) < 0.5);
/// ```
pub fn nmi(pred: &[usize], truth: &[usize]) -> f64 {
    if !usable(pred, truth) {
        return 0.0;
    }
    let table = Contingency::new(pred, truth);
    let denom = table.h_pred() + table.h_truth();
    if denom < EPS {
        // both partitions are a single block
        return 1.0;
    }
    (2.0 * table.mutual_information() / denom).clamp(0.0, 1.0)
}

/// Adjusted Rand Index.
pub fn ari(pred: &[usize], truth: &[usize]) -> f64 {
    if !usable(pred, truth) {
        return 0.0;
    }
    let table = Contingency::new(pred, truth);

    let index: f64 = table.joint.values().map(|&c| comb2(c)).sum();
    let sum_a: f64 = table.pred.values().map(|&c| comb2(c)).sum();
    let sum_b: f64 = table.truth.values().map(|&c| comb2(c)).sum();
    let total = comb2(table.n);
    if total == 0.0 {
        return 1.0;
    }

    let expected = sum_a * sum_b / total;
    let max_index = (sum_a + sum_b) / 2.0;
    let denom = max_index - expected;
    if denom.abs() < EPS {
        return 1.0;
    }
    (index - expected) / denom
}

/// Fraction of items that share their cluster's majority class.
pub fn purity(pred: &[usize], truth: &[usize]) -> f64 {
    if !usable(pred, truth) {
        return 0.0;
    }
    let table = Contingency::new(pred, truth);

    let mut majority: HashMap<usize, usize> = HashMap::new();
    for (&(a, _), &c) in &table.joint {
        let m = majority.entry(a).or_insert(0);
        *m = (*m).max(c);
    }
    majority.values().sum::<usize>() as f64 / table.n as f64
}

/// Homogeneity: `1 - H(T|P) / H(T)`.
pub fn homogeneity(pred: &[usize], truth: &[usize]) -> f64 {
    if !usable(pred, truth) {
        return 0.0;
    }
    let table = Contingency::new(pred, truth);
    let h_t = table.h_truth();
    if h_t < EPS {
        return 1.0;
    }
    let (h_t_given_p, _) = table.conditional_entropies();
    (1.0 - h_t_given_p / h_t).clamp(0.0, 1.0)
}

/// Completeness: `1 - H(P|T) / H(P)`.
pub fn completeness(pred: &[usize], truth: &[usize]) -> f64 {
    if !usable(pred, truth) {
        return 0.0;
    }
    let table = Contingency::new(pred, truth);
    let h_p = table.h_pred();
    if h_p < EPS {
        return 1.0;
    }
    let (_, h_p_given_t) = table.conditional_entropies();
    (1.0 - h_p_given_t / h_p).clamp(0.0, 1.0)
}

/// V-measure: harmonic mean of homogeneity and completeness.
pub fn v_measure(pred: &[usize], truth: &[usize]) -> f64 {
    let h = homogeneity(pred, truth);
    let c = completeness(pred, truth);
    if h + c < EPS {
        return 0.0;
    }
    2.0 * h * c / (h + c)
}

/// Fowlkes-Mallows index: geometric mean of pairwise precision and recall.
pub fn fowlkes_mallows(pred: &[usize], truth: &[usize]) -> f64 {
    if pred.len() != truth.len() || pred.len() < 2 {
        return 0.0;
    }
    let table = Contingency::new(pred, truth);

    let tp: f64 = table.joint.values().map(|&c| comb2(c)).sum();
    let pred_pairs: f64 = table.pred.values().map(|&c| comb2(c)).sum();
    let truth_pairs: f64 = table.truth.values().map(|&c| comb2(c)).sum();
    if pred_pairs == 0.0 || truth_pairs == 0.0 {
        return 0.0;
    }
    (tp / pred_pairs * tp / truth_pairs).sqrt()
}

/// Align two id partitions into label vectors over the ids they share.
///
/// Ids are visited in ascending order; label `k` is the index of the set
/// containing the id. Ids present in only one partition are dropped.
pub fn partition_labels(
    predicted: &[BTreeSet<u64>],
    expected: &[BTreeSet<u64>],
) -> (Vec<usize>, Vec<usize>) {
    let label_of = |partition: &[BTreeSet<u64>]| -> HashMap<u64, usize> {
        partition
            .iter()
            .enumerate()
            .flat_map(|(k, set)| set.iter().map(move |&id| (id, k)))
            .collect()
    };
    let pred = label_of(predicted);
    let truth = label_of(expected);

    let mut shared: Vec<u64> = pred.keys().filter(|id| truth.contains_key(id)).copied().collect();
    shared.sort_unstable();

    shared.iter().map(|id| (pred[id], truth[id])).unzip()
}

/// All metrics for one predicted/expected comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Ids present in both partitions.
    pub n_items: usize,
    /// Normalized mutual information.
    pub nmi: f64,
    /// Adjusted Rand Index.
    pub ari: f64,
    /// Purity.
    pub purity: f64,
    /// Homogeneity.
    pub homogeneity: f64,
    /// Completeness.
    pub completeness: f64,
    /// V-measure.
    pub v_measure: f64,
    /// Fowlkes-Mallows index.
    pub fowlkes_mallows: f64,
}

impl Evaluation {
    /// Compare two id partitions over their shared ids.
    pub fn compare(predicted: &[BTreeSet<u64>], expected: &[BTreeSet<u64>]) -> Self {
        let (pred, truth) = partition_labels(predicted, expected);
        Self {
            n_items: pred.len(),
            nmi: nmi(&pred, &truth),
            ari: ari(&pred, &truth),
            purity: purity(&pred, &truth),
            homogeneity: homogeneity(&pred, &truth),
            completeness: completeness(&pred, &truth),
            v_measure: v_measure(&pred, &truth),
            fowlkes_mallows: fowlkes_mallows(&pred, &truth),
        }
    }
}

impl std::fmt::Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "n={} nmi={:.3} ari={:.3} purity={:.3} homogeneity={:.3} completeness={:.3} v={:.3} fm={:.3}",
            self.n_items,
            self.nmi,
            self.ari,
            self.purity,
            self.homogeneity,
            self.completeness,
            self.v_measure,
            self.fowlkes_mallows
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nmi_permuted_labels() {
        let pred = [1, 1, 0, 0, 2, 2];
        let truth = [0, 0, 1, 1, 2, 2];
        assert!((nmi(&pred, &truth) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_ari_perfect_and_mismatched_lengths() {
        assert!((ari(&[0, 0, 1, 1], &[5, 5, 9, 9]) - 1.0).abs() < 1e-9);
        assert_eq!(ari(&[0, 0], &[0]), 0.0);
    }

    #[test]
    fn test_purity_overclustering() {
        let pred = [0, 1, 2, 3];
        let truth = [0, 0, 1, 1];
        assert!((purity(&pred, &truth) - 1.0).abs() < 1e-9);
        // every cluster pure, but classes are split
        assert!(completeness(&pred, &truth) < 1.0);
        assert!((homogeneity(&pred, &truth) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_homogeneity_completeness_perfect() {
        let pred = [0, 0, 1, 1];
        let truth = [0, 0, 1, 1];
        assert!((homogeneity(&pred, &truth) - 1.0).abs() < 1e-9);
        assert!((completeness(&pred, &truth) - 1.0).abs() < 1e-9);
        assert!((v_measure(&pred, &truth) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fowlkes_mallows() {
        assert!((fowlkes_mallows(&[0, 0, 1, 1], &[0, 0, 1, 1]) - 1.0).abs() < 1e-9);
        assert_eq!(fowlkes_mallows(&[0, 1, 2], &[0, 0, 0]), 0.0);
    }

    #[test]
    fn test_partition_labels_drops_unshared_ids() {
        let predicted: Vec<BTreeSet<u64>> = vec![[10, 30].into(), [20, 99].into()];
        let expected: Vec<BTreeSet<u64>> = vec![[10].into(), [20, 30].into()];
        let (pred, truth) = partition_labels(&predicted, &expected);
        // ids 10, 20, 30 in order
        assert_eq!(pred, vec![0, 1, 0]);
        assert_eq!(truth, vec![0, 1, 1]);
    }

    #[test]
    fn test_evaluation_compare() {
        let predicted: Vec<BTreeSet<u64>> = vec![[1, 2, 3].into(), [4].into()];
        let expected: Vec<BTreeSet<u64>> = vec![[1, 2].into(), [3, 4].into()];
        let eval = Evaluation::compare(&predicted, &expected);
        assert_eq!(eval.n_items, 4);
        assert!(eval.nmi > 0.0 && eval.nmi < 1.0);
        assert!((eval.purity - 0.75).abs() < 1e-9);
        assert!(eval.to_string().starts_with("n=4"));
    }
}
