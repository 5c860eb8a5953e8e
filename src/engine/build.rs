use std::{cmp::Ordering, collections::BinaryHeap};

use bitvec::vec::BitVec;
use itertools::Itertools;
use tracing::debug;

use super::MstEngine;
use crate::{
    algorithm::Algorithm,
    graph::{EdgeKey, NodeId, NodeVec},
    union_find::UnionFind,
};

/// A candidate edge on Prim's frontier, ordered so that the binary heap pops
/// the lightest edge first (then the smallest candidate, then the smallest source).
#[derive(Debug, Clone, Copy, PartialEq)]
struct Frontier {
    weight: f64,
    candidate: NodeId,
    source: NodeId,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.candidate.cmp(&self.candidate))
            .then_with(|| other.source.cmp(&self.source))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl MstEngine {
    /// Selects the algorithm named `name` (unknown names select the default) and
    /// rebuilds the tree from scratch with it.
    pub fn build_initial_mst(&mut self, name: &str) {
        self.config.algorithm = Algorithm::from_name_or_default(name);
        self.rebuild();
    }

    /// Discards the tree and rebuilds it with the current algorithm. The graph is untouched.
    pub fn rebuild(&mut self) {
        self.tree.clear();
        if self.graph.node_count() == 0 {
            return;
        }
        match self.config.algorithm {
            Algorithm::Kruskal => self.build_kruskal(),
            Algorithm::Prim => self.build_prim(),
        }
        debug!(
            target: "adaptive_mst::build",
            algorithm = %self.config.algorithm,
            nodes = self.graph.node_count(),
            tree_edges = self.tree.len(),
            cost = self.tree.weight(),
            "spanning tree rebuilt"
        );
    }

    /// Minimum spanning forest over every component.
    ///
    /// Edges are taken by ascending `(weight, lo, hi)`.
    fn build_kruskal(&mut self) {
        let mut sets = UnionFind::new(self.graph.node_count());

        let sorted = self
            .graph
            .edges()
            .sorted_by(|(ka, wa), (kb, wb)| wa.total_cmp(wb).then_with(|| ka.cmp(kb)));

        for (key, weight) in sorted {
            if sets.set_count() == 1 {
                break;
            }
            if sets.union(key.lo(), key.hi()) {
                self.tree.add_edge(key, weight);
            }
        }
    }

    /// Minimum spanning tree of the component containing node 0 only.
    fn build_prim(&mut self) {
        let node_count = self.graph.node_count();
        let target = node_count.saturating_sub(1);

        let mut adjacency: NodeVec<Vec<(NodeId, f64)>> = NodeVec::new();
        adjacency.ensure_len(node_count, Vec::new);
        for (key, weight) in self.graph.edges() {
            adjacency[key.lo()].push((key.hi(), weight));
            adjacency[key.hi()].push((key.lo(), weight));
        }

        let mut included: BitVec = BitVec::repeat(false, node_count);
        let mut frontier = BinaryHeap::new();

        let grow = |node: NodeId, included: &BitVec, frontier: &mut BinaryHeap<Frontier>| {
            for &(next, weight) in &adjacency[node] {
                if !included[next.0] {
                    frontier.push(Frontier {
                        weight,
                        candidate: next,
                        source: node,
                    });
                }
            }
        };

        let start = NodeId(0);
        included.set(start.0, true);
        grow(start, &included, &mut frontier);

        while self.tree.len() < target {
            let Some(Frontier {
                weight,
                candidate,
                source,
            }) = frontier.pop()
            else {
                break;
            };
            if included[candidate.0] {
                continue;
            }
            included.set(candidate.0, true);
            if let Some(key) = EdgeKey::new(candidate, source) {
                self.tree.add_edge(key, weight);
            }
            grow(candidate, &included, &mut frontier);
        }
    }
}
