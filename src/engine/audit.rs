use super::MstEngine;
use crate::{error::InvariantError, graph::EdgeKey, union_find::UnionFind};

impl MstEngine {
    /// Audits the structural invariants linking the tree to the graph.
    ///
    /// Checks, in order: the tree-edge bound, that every tree edge lies inside
    /// the node range and exists in the graph with the identical weight, that
    /// the tree is acyclic, that the adjacency lists mirror the edge set
    /// exactly, and that the running weight matches an exact resum.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let node_count = self.graph.node_count();
        let bound = node_count.saturating_sub(1);
        if self.tree.len() > bound {
            return Err(InvariantError::TooManyTreeEdges {
                tree_edges: self.tree.len(),
                node_count,
                bound,
            });
        }

        let mut sets = UnionFind::new(node_count);
        for (key, weight) in self.tree.edges() {
            let edge = key.with_weight(weight);
            if !self.graph.contains_node(key.hi()) {
                return Err(InvariantError::NodeOutOfRange(edge));
            }
            match self.graph.weight(&key) {
                None => return Err(InvariantError::TreeEdgeNotInGraph(edge)),
                Some(graph_weight) if graph_weight != weight => {
                    return Err(InvariantError::WeightMismatch {
                        tree: edge,
                        graph_weight,
                    })
                }
                Some(_) => {}
            }
            if !sets.union(key.lo(), key.hi()) {
                return Err(InvariantError::Cycle(edge));
            }
        }

        for (node, list) in self.tree.adjacency() {
            for &(neighbour, weight) in list {
                let mirrored = EdgeKey::new(node, neighbour)
                    .and_then(|key| self.tree.edge_weight(&key))
                    .is_some_and(|w| w == weight);
                let once = list.iter().filter(|(n, _)| *n == neighbour).count() == 1;
                if !mirrored || !once {
                    return Err(InvariantError::AdjacencyMismatch { node });
                }
            }
        }
        for (key, _) in self.tree.edges() {
            for (from, to) in [(key.lo(), key.hi()), (key.hi(), key.lo())] {
                if !self.tree.neighbours(from).iter().any(|(n, _)| *n == to) {
                    return Err(InvariantError::AdjacencyMismatch { node: from });
                }
            }
        }

        let running = self.tree.weight();
        let exact = self.tree.resum();
        if (running - exact).abs() > self.config.weight_tolerance * (1.0 + exact.abs()) {
            return Err(InvariantError::WeightDrift { running, exact });
        }

        Ok(())
    }
}
