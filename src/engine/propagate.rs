//! Breadth-first cluster propagation over the assignment tree.
//!
//! Each root starts queued with its freshly allocated cluster. Dequeuing an
//! item folds its counts into its cluster and hands that cluster to every
//! recorded child, which is queued behind everything already waiting.
//! Children inherit in discovery order; nothing is sorted.
//!
//! A cluster is fixed before its item is dequeued and never changes after.

use std::collections::VecDeque;

use tracing::info;

use super::cluster::Cluster;
use super::tree::AssignmentTree;
use crate::item::Item;
use crate::report::{Issue, IssueKind, Report, Severity};

/// Per-item traversal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unvisited,
    Queued,
    Visited,
}

/// Outcome of propagation: a cluster per reachable item.
#[derive(Debug, Clone)]
pub(crate) struct Propagation {
    /// Cluster id per input index; `None` for items no root reached.
    pub labels: Vec<Option<usize>>,
    /// Seeded clusters, one per root, in root order.
    pub clusters: Vec<Cluster>,
}

/// Propagate root clusters down the tree.
pub(crate) fn propagate(items: &[Item], tree: &AssignmentTree, report: &mut Report) -> Propagation {
    let n = tree.len();
    let mut labels: Vec<Option<usize>> = vec![None; n];
    let mut state = vec![State::Unvisited; n];
    let mut clusters = Vec::with_capacity(tree.roots().len());
    let mut agenda = VecDeque::with_capacity(n);

    for &root in tree.roots() {
        let id = clusters.len();
        clusters.push(Cluster::new(id));
        labels[root] = Some(id);
        state[root] = State::Queued;
        agenda.push_back(root);
    }

    while let Some(current) = agenda.pop_front() {
        if state[current] == State::Visited {
            info!(item = items[current].id, "cycle found, skipping");
            report.add(Issue::new(
                Severity::Info,
                IssueKind::RevisitSkipped,
                items[current].id,
            ));
            continue;
        }
        state[current] = State::Visited;

        // queued items always carry a cluster
        let Some(cluster_id) = labels[current] else {
            continue;
        };
        clusters[cluster_id].add_member(&items[current].counts);

        for &child in tree.children(current) {
            if labels[child].is_none() {
                labels[child] = Some(cluster_id);
            }
            state[child] = match state[child] {
                State::Visited => State::Visited,
                _ => State::Queued,
            };
            agenda.push_back(child);
        }
    }

    Propagation { labels, clusters }
}
