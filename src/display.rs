//! Text rendering of predicted and expected partitions.
//!
//! Groups print one per line as `  P<i>: id id ...` (predicted) or
//! `  E<i>: ...` (expected), ids ascending. In evaluation output each
//! predicted id can be colored by the expected group it belongs to, so
//! misplaced articles stand out.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Write;

const PREDICTED_PREFIX: char = 'P';
const EXPECTED_PREFIX: char = 'E';

/// ANSI-colored id, one color per group index.
fn color(group: usize, id: u64) -> String {
    format!("\x1b[{}m {}\x1b[00m", 91 + group, id)
}

fn render_groups<F>(prefix: char, groups: &[BTreeSet<u64>], mut member: F) -> String
where
    F: FnMut(u64) -> String,
{
    let mut out = String::new();
    for (i, group) in groups.iter().enumerate() {
        let members: Vec<String> = group.iter().map(|&id| member(id)).collect();
        let _ = writeln!(out, "  {prefix}{i}: {}", members.join(" "));
    }
    out
}

/// Predicted clusters without reference groups.
pub fn render_predicted(clusters: &[BTreeSet<u64>]) -> String {
    format!(
        "\npredicted clusters:\n\n{}",
        render_groups(PREDICTED_PREFIX, clusters, |id| id.to_string())
    )
}

/// Expected groups followed by predicted clusters.
///
/// With `colored`, every id is wrapped in the ANSI color of its expected
/// group. Ids missing from the expected partition print uncolored.
pub fn render_evaluation(
    predicted: &[BTreeSet<u64>],
    expected: &[BTreeSet<u64>],
    colored: bool,
) -> String {
    let group_of: HashMap<u64, usize> = expected
        .iter()
        .enumerate()
        .flat_map(|(k, group)| group.iter().map(move |&id| (id, k)))
        .collect();

    let paint = |id: u64| match group_of.get(&id) {
        Some(&k) if colored => color(k, id),
        _ => id.to_string(),
    };

    format!(
        "\n\nexpected clusters:\n\n{}\n\npredicted clusters:\n\n{}",
        render_groups(EXPECTED_PREFIX, expected, paint),
        render_groups(PREDICTED_PREFIX, predicted, paint)
    )
}
