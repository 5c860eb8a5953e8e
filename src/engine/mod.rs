//! The maintenance engine: every mutation of the graph enters here and keeps
//! the spanning tree consistent with it.
//!
//! The engine exclusively owns a [`GraphStore`] and a [`SpanningTree`]. Invalid
//! input never fails: self-loops, non-finite weights, unknown node ids and
//! unknown algorithm names all degrade to no-ops or fallbacks.

use std::fmt::{self, Display};

use tracing::{debug, warn};

use crate::{
    algorithm::Algorithm,
    config::MstConfig,
    graph::{Edge, EdgeKey, GraphStore, NodeId},
    spanning_tree::SpanningTree,
};

mod audit;
mod build;
mod incremental;

/// Summary counters of an engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
pub struct Stats {
    pub node_count: usize,
    pub edge_count: usize,
    pub tree_edge_count: usize,
    pub tree_cost: f64,
    pub algorithm: Algorithm,
}

impl Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes: {}, edges: {}, tree edges: {}, cost: {}, algorithm: {}",
            self.node_count, self.edge_count, self.tree_edge_count, self.tree_cost, self.algorithm
        )
    }
}

/// A weighted undirected graph that maintains a minimum spanning tree (or
/// forest) under node and edge insertions and deletions.
#[derive(Clone, Debug)]
pub struct MstEngine {
    graph: GraphStore,
    tree: SpanningTree,
    config: MstConfig,
}

impl Default for MstEngine {
    fn default() -> Self {
        MstEngine::new(0)
    }
}

impl MstEngine {
    /// An engine with `node_count` isolated nodes and the default configuration.
    pub fn new(node_count: usize) -> Self {
        MstEngine::with_config(node_count, MstConfig::default())
    }

    /// Node counts above `config.node_limit` are clamped to it.
    pub fn with_config(node_count: usize, config: MstConfig) -> Self {
        MstEngine {
            graph: GraphStore::new(clamp_node_count(node_count, config.node_limit)),
            tree: SpanningTree::new(),
            config,
        }
    }

    pub fn config(&self) -> &MstConfig {
        &self.config
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    pub fn tree(&self) -> &SpanningTree {
        &self.tree
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn tree_weight(&self) -> f64 {
        self.tree.weight()
    }

    /// Appends an isolated node and returns its id.
    pub fn add_node(&mut self) -> NodeId {
        self.graph.add_node()
    }

    /// Drops all edges and the tree and sets the node count, clamped to the
    /// node limit. The algorithm is kept.
    pub fn reset(&mut self, node_count: usize) {
        self.graph
            .reset(clamp_node_count(node_count, self.config.node_limit));
        self.tree.clear();
    }

    /// Selects the algorithm for later rebuilds. Unrecognized names select the default.
    pub fn set_algorithm(&mut self, name: &str) {
        self.config.algorithm = Algorithm::from_name_or_default(name);
    }

    pub fn algorithm(&self) -> Algorithm {
        self.config.algorithm
    }

    /// Deletes `node` and every incident edge, then renumbers every node above
    /// it down by one. Out-of-range ids are ignored.
    pub fn delete_node(&mut self, node: NodeId) {
        if !self.graph.contains_node(node) {
            return;
        }

        for key in self.graph.incident_pairs(node) {
            self.delete_pair(key);
        }

        if self.graph.node_count() == 1 {
            self.reset(0);
            return;
        }

        self.graph.renumber_after_node_removal(node);
        self.tree.renumber_after_node_removal(node);
        debug!(
            target: "adaptive_mst::engine",
            %node,
            nodes = self.graph.node_count(),
            tree_edges = self.tree.len(),
            "node deleted"
        );

        if !self.tree.is_full(self.graph.node_count()) {
            self.rebuild();
        }
    }

    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        EdgeKey::new(u, v).is_some_and(|k| self.graph.contains_pair(&k))
    }

    pub fn is_tree_edge(&self, u: NodeId, v: NodeId) -> bool {
        EdgeKey::new(u, v).is_some_and(|k| self.tree.contains_pair(&k))
    }

    pub fn edge_weight(&self, u: NodeId, v: NodeId) -> Option<f64> {
        self.graph.weight(&EdgeKey::new(u, v)?)
    }

    /// Snapshot of every graph edge, in insertion order.
    pub fn graph_edges(&self) -> Vec<Edge> {
        self.graph
            .edges()
            .map(|(key, weight)| key.with_weight(weight))
            .collect()
    }

    /// Snapshot of the current tree edges.
    pub fn mst_edges(&self) -> Vec<Edge> {
        self.tree
            .edges()
            .map(|(key, weight)| key.with_weight(weight))
            .collect()
    }

    pub fn stats(&self) -> Stats {
        Stats {
            node_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
            tree_edge_count: self.tree.len(),
            tree_cost: self.tree.weight(),
            algorithm: self.config.algorithm,
        }
    }
}

fn clamp_node_count(node_count: usize, node_limit: usize) -> usize {
    if node_count > node_limit {
        warn!(
            target: "adaptive_mst::engine",
            requested = node_count,
            limit = node_limit,
            "node count clamped to the node limit"
        );
    }
    node_count.min(node_limit)
}

#[cfg(test)]
mod properties;
