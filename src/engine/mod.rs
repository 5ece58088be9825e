//! Mutual-best-match clustering.
//!
//! Groups items without a preset cluster count or similarity threshold.
//! Every item links to its single nearest neighbor; pairs that choose each
//! other seed clusters, and every other item joins the cluster its chain of
//! nearest neighbors leads to.
//!
//! ## Pipeline
//!
//! ```text
//! items → best match per item (O(n²) scores) → assignment tree + roots
//!       → breadth-first propagation from roots → orphan promotion → clusters
//! ```
//!
//! 1. **Tree** ([`AssignmentTree`]): first-seen tie-break, self excluded.
//! 2. **Propagation**: each root's cluster flows down to its descendants.
//! 3. **Assembly**: unreached items become singleton clusters.
//!
//! ## Known limitation
//!
//! Only reciprocal pairs seed clusters. Three items that prefer each other in
//! a ring (A→B→C→A) are not grouped: each becomes its own singleton and is
//! reported as an orphan. This is kept as-is rather than patched over.
//!
//! ## Usage
//!
//! ```rust
//! use reciprocal::{Item, MutualBestMatch};
//!
//! let items = vec![
//!     Item::from_pairs(1, [("aorta", 3), ("turner", 2)]),
//!     Item::from_pairs(2, [("aorta", 2), ("turner", 2)]),
//!     Item::from_pairs(3, [("insulin", 4)]),
//!     Item::from_pairs(4, [("insulin", 3), ("glucose", 1)]),
//! ];
//!
//! let clusters = MutualBestMatch::new().cluster_ids(&items).unwrap();
//! assert_eq!(clusters.len(), 2);
//! assert!(clusters[0].contains(&1) && clusters[0].contains(&2));
//! ```

mod assemble;
mod cluster;
mod propagate;
mod tree;

#[cfg(feature = "graph")]
mod graph;

use std::collections::{BTreeSet, HashSet};

use tracing::info;

pub use cluster::Cluster;
pub use tree::{best_match, AssignmentTree, BestMatch};

use crate::error::{Error, Result};
use crate::item::Item;
use crate::report::Report;
use crate::scorer::{DotProduct, Scorer};

/// The mutual-best-match clustering engine.
#[derive(Debug, Clone)]
pub struct MutualBestMatch<S = DotProduct> {
    scorer: S,
    parallel: bool,
}

impl MutualBestMatch<DotProduct> {
    /// Create an engine with the dot-product scorer.
    pub fn new() -> Self {
        Self {
            scorer: DotProduct,
            parallel: false,
        }
    }
}

impl Default for MutualBestMatch<DotProduct> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scorer> MutualBestMatch<S> {
    /// Replace the scoring strategy.
    pub fn with_scorer<T: Scorer>(self, scorer: T) -> MutualBestMatch<T> {
        MutualBestMatch {
            scorer,
            parallel: self.parallel,
        }
    }

    /// Score pairs in parallel. Needs the `parallel` feature; ignored otherwise.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The scoring strategy in use.
    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Build the nearest-neighbor tree without propagating clusters.
    pub fn build_tree(&self, items: &[Item]) -> Result<AssignmentTree> {
        validate(items)?;
        Ok(AssignmentTree::build(&self.scorer, items, self.parallel))
    }

    /// Run the full pipeline and return the complete assignment.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] / [`Error::TooFewItems`] for fewer than two items.
    /// - [`Error::DuplicateId`] if two items share an id.
    pub fn assign<'a>(&self, items: &'a [Item]) -> Result<Assignment<'a>> {
        let tree = self.build_tree(items)?;
        let mut report = Report::new();

        let propagation = propagate::propagate(items, &tree, &mut report);
        let n_seeded = propagation.clusters.len();
        let assembled = assemble::promote_orphans(items, propagation, &mut report);

        info!(
            items = items.len(),
            clusters = assembled.clusters.len(),
            seeded = n_seeded,
            orphans = assembled.orphans.len(),
            "clustering complete"
        );

        Ok(Assignment {
            items,
            labels: assembled.labels,
            clusters: assembled.clusters,
            orphans: assembled.orphans,
            n_seeded,
            report,
        })
    }

    /// Cluster `items` into groups of item references, in cluster-id order.
    pub fn cluster<'a>(&self, items: &'a [Item]) -> Result<Vec<Vec<&'a Item>>> {
        Ok(self.assign(items)?.groups())
    }

    /// Cluster `items` into sets of item ids, in cluster-id order.
    pub fn cluster_ids(&self, items: &[Item]) -> Result<Vec<BTreeSet<u64>>> {
        Ok(self.assign(items)?.id_sets())
    }

    /// Like [`cluster_ids`](Self::cluster_ids), passing a ground-truth
    /// partition through untouched for side-by-side comparison.
    ///
    /// The truth never influences clustering.
    pub fn cluster_with_truth(
        &self,
        items: &[Item],
        truth: Vec<BTreeSet<u64>>,
    ) -> Result<(Vec<BTreeSet<u64>>, Vec<BTreeSet<u64>>)> {
        Ok((self.cluster_ids(items)?, truth))
    }
}

fn validate(items: &[Item]) -> Result<()> {
    match items.len() {
        0 => return Err(Error::EmptyInput),
        1 => return Err(Error::TooFewItems { found: 1 }),
        _ => {}
    }

    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id) {
            return Err(Error::DuplicateId { id: item.id });
        }
    }
    Ok(())
}

/// Result of a clustering run.
///
/// Every input item carries exactly one cluster id. Ids are dense from 0:
/// seeded clusters first (in mutual-pair discovery order), then orphan
/// singletons (in input order).
#[derive(Debug, Clone)]
pub struct Assignment<'a> {
    items: &'a [Item],
    labels: Vec<usize>,
    clusters: Vec<Cluster>,
    orphans: Vec<u64>,
    n_seeded: usize,
    report: Report,
}

impl<'a> Assignment<'a> {
    /// Cluster id per input index.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// All clusters in id order, orphan singletons included.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Cluster holding the item at input index `i`.
    pub fn cluster_of(&self, i: usize) -> &Cluster {
        &self.clusters[self.labels[i]]
    }

    /// Total number of clusters.
    pub fn n_clusters(&self) -> usize {
        self.clusters.len()
    }

    /// Number of clusters seeded by mutual pairs.
    pub fn n_seeded(&self) -> usize {
        self.n_seeded
    }

    /// Ids of items promoted to singleton clusters, in input order.
    pub fn orphans(&self) -> &[u64] {
        &self.orphans
    }

    /// Anomalies recorded during the run.
    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Items grouped by cluster, in cluster-id order.
    pub fn groups(&self) -> Vec<Vec<&'a Item>> {
        let items = self.items;
        assemble::group_indices(&self.labels, self.clusters.len())
            .into_iter()
            .map(|group| group.into_iter().map(|i| &items[i]).collect())
            .collect()
    }

    /// Item ids grouped by cluster, in cluster-id order.
    pub fn id_sets(&self) -> Vec<BTreeSet<u64>> {
        assemble::group_indices(&self.labels, self.clusters.len())
            .into_iter()
            .map(|group| group.into_iter().map(|i| self.items[i].id).collect())
            .collect()
    }
}
