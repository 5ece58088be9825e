//! Export of nearest-neighbor edges as a `petgraph` graph.

use petgraph::graph::{DiGraph, NodeIndex};

use super::tree::AssignmentTree;

impl AssignmentTree {
    /// Directed graph with one node per item (weighted by its id) and one
    /// edge per item to its best match (weighted by the match score).
    ///
    /// Unlike the tree itself, roots keep their outgoing edge, so mutual
    /// pairs show up as 2-cycles and unseeded rings as longer cycles.
    pub fn to_graph(&self) -> DiGraph<u64, f64> {
        let mut graph = DiGraph::with_capacity(self.len(), self.len());
        let nodes: Vec<NodeIndex> = (0..self.len()).map(|i| graph.add_node(self.id(i))).collect();

        for (i, &node) in nodes.iter().enumerate() {
            let m = self.best(i);
            let _ = graph.add_edge(node, nodes[m.index], m.score);
        }
        graph
    }
}
