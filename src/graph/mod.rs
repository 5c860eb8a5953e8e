//! The full weighted graph: dense node ids and at most one weighted edge per
//! unordered node pair.

use std::fmt::{self, Display};

use ahash::RandomState;
use indexmap::IndexMap;

use crate::define_indexed_vec;

define_indexed_vec!(
    /// Dense node identifier in `[0, node_count)`.
    ///
    /// Ids are not stable: removing node `k` shifts every id above `k` down by one.
    pub struct NodeId;

    /// A table with one entry per node.
    pub struct NodeVec;
);

impl NodeId {
    /// The id this node takes after `removed` has been deleted, or `None` if it is `removed`.
    pub fn shifted_after_removal(self, removed: NodeId) -> Option<NodeId> {
        match self.cmp(&removed) {
            std::cmp::Ordering::Less => Some(self),
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => Some(NodeId(self.0 - 1)),
        }
    }
}

/// Canonical key of an unordered node pair, `lo < hi`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    lo: NodeId,
    hi: NodeId,
}

impl EdgeKey {
    /// Returns `None` for self-loops.
    pub fn new(u: NodeId, v: NodeId) -> Option<Self> {
        match u.cmp(&v) {
            std::cmp::Ordering::Less => Some(EdgeKey { lo: u, hi: v }),
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => Some(EdgeKey { lo: v, hi: u }),
        }
    }

    pub fn lo(&self) -> NodeId {
        self.lo
    }

    pub fn hi(&self) -> NodeId {
        self.hi
    }

    pub fn is_incident(&self, node: NodeId) -> bool {
        self.lo == node || self.hi == node
    }

    /// The key after `removed` has been deleted, or `None` if the edge touched it.
    pub fn shifted_after_removal(self, removed: NodeId) -> Option<EdgeKey> {
        let lo = self.lo.shifted_after_removal(removed)?;
        let hi = self.hi.shifted_after_removal(removed)?;
        // Shifting preserves order, so the pair stays canonical.
        Some(EdgeKey { lo, hi })
    }

    pub fn with_weight(self, weight: f64) -> Edge {
        Edge {
            u: self.lo,
            v: self.hi,
            weight,
        }
    }
}

/// A weighted undirected edge as handed out by queries. `u < v` in every snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
pub struct Edge {
    pub u: NodeId,
    pub v: NodeId,
    pub weight: f64,
}

impl Edge {
    pub fn new(u: NodeId, v: NodeId, weight: f64) -> Self {
        Edge { u, v, weight }
    }

    pub fn key(&self) -> Option<EdgeKey> {
        EdgeKey::new(self.u, self.v)
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.u, self.v, self.weight)
    }
}

pub(crate) type EdgeMap = IndexMap<EdgeKey, f64, RandomState>;

/// Owns the node count and every edge of the full graph, whether or not it is in the tree.
///
/// Edges are kept in insertion order; removals keep the relative order of the rest.
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
    node_count: usize,
    edges: EdgeMap,
}

impl GraphStore {
    pub fn new(node_count: usize) -> Self {
        GraphStore {
            node_count,
            edges: EdgeMap::default(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        node.0 < self.node_count
    }

    /// Appends a node and returns its id.
    pub fn add_node(&mut self) -> NodeId {
        self.node_count += 1;
        NodeId(self.node_count - 1)
    }

    /// Extends the node range so that `node` exists.
    pub fn ensure_node(&mut self, node: NodeId) {
        if node.0 >= self.node_count {
            self.node_count = node.0 + 1;
        }
    }

    /// Drops every edge and sets the node count.
    pub fn reset(&mut self, node_count: usize) {
        self.node_count = node_count;
        self.edges.clear();
    }

    pub fn weight(&self, key: &EdgeKey) -> Option<f64> {
        self.edges.get(key).copied()
    }

    pub fn contains_pair(&self, key: &EdgeKey) -> bool {
        self.edges.contains_key(key)
    }

    /// Stores `key` with `weight`, growing the node range as needed.
    ///
    /// This is the raw store. Replacing an existing pair must go through the
    /// engine's deletion protocol first, so an existing pair is overwritten in place.
    pub fn insert(&mut self, key: EdgeKey, weight: f64) -> Option<f64> {
        self.ensure_node(key.hi);
        self.edges.insert(key, weight)
    }

    /// Removes the pair, returning its prior weight if it existed.
    pub fn remove_pair(&mut self, key: &EdgeKey) -> Option<f64> {
        self.edges.shift_remove(key)
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, f64)> + '_ {
        self.edges.iter().map(|(k, w)| (*k, *w))
    }

    pub fn incident_pairs(&self, node: NodeId) -> Vec<EdgeKey> {
        self.edges
            .keys()
            .filter(|k| k.is_incident(node))
            .copied()
            .collect()
    }

    /// Removes `removed` from the node range, dropping its edges and shifting
    /// every id above it down by one.
    pub fn renumber_after_node_removal(&mut self, removed: NodeId) {
        if !self.contains_node(removed) {
            return;
        }
        self.edges = renumber_edges(&self.edges, removed);
        self.node_count -= 1;
    }
}

/// Rewrites an edge map for the removal of `removed`, keeping insertion order.
pub(crate) fn renumber_edges(edges: &EdgeMap, removed: NodeId) -> EdgeMap {
    edges
        .iter()
        .filter_map(|(k, w)| Some((k.shifted_after_removal(removed)?, *w)))
        .collect()
}
