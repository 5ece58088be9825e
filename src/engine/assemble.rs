//! Orphan promotion and final grouping.
//!
//! Items no root reached (members of reciprocal cycles of length 3 or more,
//! and anything hanging off such a cycle) each get a singleton cluster of
//! their own, numbered after the seeded clusters in input order. Orphans are
//! never merged with each other, even when they are mutually near.

use tracing::warn;

use super::cluster::Cluster;
use super::propagate::Propagation;
use crate::item::Item;
use crate::report::{Issue, IssueKind, Report, Severity};

/// Complete labeling after orphan promotion.
#[derive(Debug, Clone)]
pub(crate) struct Assembled {
    pub labels: Vec<usize>,
    pub clusters: Vec<Cluster>,
    pub orphans: Vec<u64>,
}

/// Give every unassigned item its own cluster.
pub(crate) fn promote_orphans(
    items: &[Item],
    propagation: Propagation,
    report: &mut Report,
) -> Assembled {
    let Propagation {
        labels,
        mut clusters,
    } = propagation;
    let mut orphans = Vec::new();

    let labels: Vec<usize> = labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| match label {
            Some(id) => id,
            None => {
                let id = clusters.len();
                let mut cluster = Cluster::new(id);
                cluster.add_member(&items[i].counts);
                clusters.push(cluster);

                warn!(item = items[i].id, cluster = id, "unassigned");
                report.add(
                    Issue::new(Severity::Warning, IssueKind::Orphan, items[i].id)
                        .with_context(format!("cluster {id}")),
                );
                orphans.push(items[i].id);
                id
            }
        })
        .collect();

    if !orphans.is_empty() {
        warn!(count = orphans.len(), ids = ?orphans, "orphans promoted to singleton clusters");
    }

    Assembled {
        labels,
        clusters,
        orphans,
    }
}

/// Invert a labeling into member indices per cluster, in cluster-id order.
///
/// Members keep input order within each group.
pub(crate) fn group_indices(labels: &[usize], n_clusters: usize) -> Vec<Vec<usize>> {
    let mut groups = vec![Vec::new(); n_clusters];
    for (i, &label) in labels.iter().enumerate() {
        groups[label].push(i);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orphans_numbered_after_seeded() {
        let items: Vec<Item> = (0..4)
            .map(|i| Item::from_pairs(i, [("t", i + 1)]))
            .collect();
        let seeded = Cluster::new(0);
        let propagation = Propagation {
            labels: vec![Some(0), None, Some(0), None],
            clusters: vec![seeded],
        };
        let mut report = Report::new();
        let out = promote_orphans(&items, propagation, &mut report);

        assert_eq!(out.labels, vec![0, 1, 0, 2]);
        assert_eq!(out.orphans, vec![1, 3]);
        assert_eq!(out.clusters[1].n_members(), 1);
        assert_eq!(out.clusters[2].counts().get("t"), 4);
        assert_eq!(report.affected(IssueKind::Orphan), vec![1, 3]);
    }

    #[test]
    fn test_group_indices() {
        let groups = group_indices(&[1, 0, 1, 2], 3);
        assert_eq!(groups, vec![vec![1], vec![0, 2], vec![3]]);
    }
}
