//! Nearest-neighbor assignment tree.
//!
//! Every item points at its single best match. Walking the items in input
//! order, item `x` with best match `b` either
//!
//! - finds `b` already recorded as its own child (`b` chose `x` earlier):
//!   the pair is mutual, and `x` becomes a root seeding a new cluster, or
//! - records itself as a pending child of `b`.
//!
//! ```text
//!   A ──► B        A chose B       children[B] = {A}
//!   B ──► A        B chose A, A ∈ children[B]   → B is root 0
//!   C ──► A        C chose A       children[A] = {C}
//! ```
//!
//! Only length-2 reciprocal links seed clusters. A reciprocal cycle of
//! length 3 or more (A→B→C→A) never seeds one, and its members end up as
//! orphans and are promoted to singletons after propagation.
//!
//! Items are addressed by their index in the input slice throughout.
//!
//! # Complexity
//!
//! O(n²) score evaluations; O(n) memory beyond the input.

use tracing::debug;

use crate::item::Item;
use crate::scorer::Scorer;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// An item's nearest neighbor and the score that selected it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMatch {
    /// Input index of the best-matching item.
    pub index: usize,
    /// Score of that match.
    pub score: f64,
}

/// Find the best match for `items[target]` among all other items.
///
/// Ties resolve to the earliest candidate in input order. The item itself
/// is never a candidate. Returns `None` when there is no other item.
pub fn best_match<S: Scorer + ?Sized>(
    scorer: &S,
    items: &[Item],
    target: usize,
) -> Option<BestMatch> {
    let counts = &items[target].counts;
    let mut best: Option<BestMatch> = None;

    for (index, candidate) in items.iter().enumerate() {
        if index == target {
            continue;
        }
        let score = scorer.score(counts, &candidate.counts);
        // strict: an equal score never displaces an earlier candidate
        let better = match best {
            None => true,
            Some(b) => score > b.score || (b.score.is_nan() && !score.is_nan()),
        };
        if better {
            best = Some(BestMatch { index, score });
        }
    }

    best
}

/// Best match of every item, in input order.
fn best_matches<S: Scorer + ?Sized>(scorer: &S, items: &[Item], parallel: bool) -> Vec<BestMatch> {
    #[cfg(feature = "parallel")]
    if parallel {
        // each item's scan is sequential, so ties still resolve by input order
        return (0..items.len())
            .into_par_iter()
            .filter_map(|i| best_match(scorer, items, i))
            .collect();
    }

    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    (0..items.len())
        .filter_map(|i| best_match(scorer, items, i))
        .collect()
}

/// Parent/child graph produced by the best-match pass, plus the seed roots.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentTree {
    ids: Vec<u64>,
    best: Vec<BestMatch>,
    parent: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

impl AssignmentTree {
    /// Run the best-match pass over `items`.
    ///
    /// Callers must supply at least two items.
    pub(crate) fn build<S: Scorer + ?Sized>(scorer: &S, items: &[Item], parallel: bool) -> Self {
        let n = items.len();
        let best = best_matches(scorer, items, parallel);
        debug_assert_eq!(best.len(), n);

        let mut parent: Vec<Option<usize>> = vec![None; n];
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut roots = Vec::new();

        for (x, m) in best.iter().enumerate() {
            let b = m.index;
            if parent[b] == Some(x) {
                debug!(
                    item = items[x].id,
                    partner = items[b].id,
                    cluster = roots.len(),
                    "mutual best match"
                );
                roots.push(x);
            } else {
                parent[x] = Some(b);
                children[b].push(x);
            }
        }

        Self {
            ids: items.iter().map(|item| item.id).collect(),
            best,
            parent,
            children,
            roots,
        }
    }

    /// Number of items in the tree.
    pub fn len(&self) -> usize {
        self.best.len()
    }

    /// True if the tree has no items.
    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    /// Id of item `i`.
    pub fn id(&self, i: usize) -> u64 {
        self.ids[i]
    }

    /// Best match of item `i`.
    pub fn best(&self, i: usize) -> BestMatch {
        self.best[i]
    }

    /// Recorded parent of item `i`; `None` for roots.
    pub fn parent(&self, i: usize) -> Option<usize> {
        self.parent[i]
    }

    /// Children recorded under item `i`, in discovery order.
    pub fn children(&self, i: usize) -> &[usize] {
        &self.children[i]
    }

    /// Mutual-match roots in discovery order. Root `k` seeds cluster `k`.
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::{from_fn, DotProduct};
    use crate::TermCounts;

    fn item(id: u64, pairs: &[(&str, u64)]) -> Item {
        Item::from_pairs(id, pairs.iter().copied())
    }

    #[test]
    fn test_best_match_excludes_self() {
        // a scores highest against itself, but may only pick another item
        let items = vec![
            item(1, &[("x", 10)]),
            item(2, &[("x", 1)]),
            item(3, &[("y", 1)]),
        ];
        let m = best_match(&DotProduct, &items, 0).unwrap();
        assert_eq!(m.index, 1);
        assert_eq!(m.score, 10.0);
    }

    #[test]
    fn test_best_match_first_seen_tie_break() {
        let items = vec![
            item(1, &[("x", 1)]),
            item(2, &[("x", 2)]),
            item(3, &[("x", 2)]),
        ];
        assert_eq!(best_match(&DotProduct, &items, 0).unwrap().index, 1);
    }

    #[test]
    fn test_best_match_all_zero_picks_first_candidate() {
        let items = vec![item(1, &[("x", 1)]), item(2, &[("y", 1)]), item(3, &[("z", 1)])];
        assert_eq!(best_match(&DotProduct, &items, 0).unwrap().index, 1);
        assert_eq!(best_match(&DotProduct, &items, 1).unwrap().index, 0);
    }

    #[test]
    fn test_best_match_single_item() {
        let items = vec![item(1, &[("x", 1)])];
        assert!(best_match(&DotProduct, &items, 0).is_none());
    }

    #[test]
    fn test_mutual_pair_roots_on_second_item() {
        // 0 <-> 1 mutual, 2 -> 0
        let items = vec![
            item(10, &[("a", 3), ("b", 3)]),
            item(11, &[("a", 3), ("b", 2)]),
            item(12, &[("a", 1)]),
        ];
        let tree = AssignmentTree::build(&DotProduct, &items, false);

        assert_eq!(tree.roots(), &[1]);
        assert_eq!(tree.parent(0), Some(1));
        assert_eq!(tree.parent(1), None);
        assert_eq!(tree.parent(2), Some(0));
        assert_eq!(tree.children(1), &[0]);
        assert_eq!(tree.children(0), &[2]);
        assert_eq!(tree.id(2), 12);
    }

    #[test]
    fn test_three_cycle_has_no_roots() {
        // score table forces 0 -> 1 -> 2 -> 0
        let prefs = |a: &TermCounts, b: &TermCounts| {
            let ia = a.get("id");
            let ib = b.get("id");
            if ib == (ia + 1) % 3 {
                1.0
            } else {
                0.0
            }
        };
        let items: Vec<Item> = (0..3).map(|i| item(i, &[("id", i)])).collect();
        let tree = AssignmentTree::build(&from_fn(prefs), &items, false);

        assert!(tree.roots().is_empty());
        assert_eq!(tree.parent(0), Some(1));
        assert_eq!(tree.parent(1), Some(2));
        assert_eq!(tree.parent(2), Some(0));
    }

    #[test]
    fn test_every_item_has_one_outgoing_edge_or_is_root() {
        let items = vec![
            item(1, &[("a", 2)]),
            item(2, &[("a", 1), ("b", 1)]),
            item(3, &[("b", 3)]),
            item(4, &[("b", 2), ("c", 1)]),
            item(5, &[("c", 4)]),
        ];
        let tree = AssignmentTree::build(&DotProduct, &items, false);
        for i in 0..items.len() {
            let is_root = tree.roots().contains(&i);
            assert_ne!(is_root, tree.parent(i).is_some());
        }
        let n_edges: usize = (0..items.len()).map(|i| tree.children(i).len()).sum();
        assert_eq!(n_edges + tree.roots().len(), items.len());
    }
}
