//! The currently selected tree edges, their adjacency projection and the
//! running total weight.

use std::collections::VecDeque;
use std::fmt::{self, Display};

use bitvec::vec::BitVec;
use tracing::trace;

use crate::graph::{renumber_edges, Edge, EdgeKey, EdgeMap, NodeId, NodeVec};

/// Breadth-first labelling of the tree's connected components.
#[derive(Clone, Debug, PartialEq)]
pub struct Components {
    labels: NodeVec<usize>,
    count: usize,
}

impl Components {
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn label(&self, node: NodeId) -> Option<usize> {
        self.labels.get(node).copied()
    }

    /// Whether the two endpoints of `key` lie in different components.
    pub fn separates(&self, key: &EdgeKey) -> bool {
        match (self.label(key.lo()), self.label(key.hi())) {
            (Some(a), Some(b)) => a != b,
            _ => false,
        }
    }

    pub fn labels(&self) -> &NodeVec<usize> {
        &self.labels
    }
}

impl Display for Components {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.labels.write_display(f, |l| l.to_string())
    }
}

/// Tree edge set plus its symmetric adjacency lists.
///
/// The adjacency list of a node holds `(neighbour, weight)` pairs and mirrors the edge set exactly.
#[derive(Clone, Debug, Default)]
pub struct SpanningTree {
    edges: EdgeMap,
    adjacency: NodeVec<Vec<(NodeId, f64)>>,
    weight: f64,
}

impl SpanningTree {
    pub fn new() -> Self {
        SpanningTree::default()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Running total weight of the tree edges.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Exact sum of the current tree edge weights.
    pub fn resum(&self) -> f64 {
        self.edges.values().sum()
    }

    /// True when the tree has `max(0, node_count - 1)` edges.
    pub fn is_full(&self, node_count: usize) -> bool {
        self.edges.len() == node_count.saturating_sub(1)
    }

    pub fn contains_pair(&self, key: &EdgeKey) -> bool {
        self.edges.contains_key(key)
    }

    pub fn edge_weight(&self, key: &EdgeKey) -> Option<f64> {
        self.edges.get(key).copied()
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, f64)> + '_ {
        self.edges.iter().map(|(k, w)| (*k, *w))
    }

    pub fn neighbours(&self, node: NodeId) -> &[(NodeId, f64)] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn adjacency(&self) -> &NodeVec<Vec<(NodeId, f64)>> {
        &self.adjacency
    }

    pub fn clear(&mut self) {
        self.edges.clear();
        self.adjacency.clear();
        self.weight = 0.0;
    }

    /// Inserts a tree edge into the edge set and both adjacency lists.
    ///
    /// Returns `false` and changes nothing if the pair already is a tree edge.
    pub fn add_edge(&mut self, key: EdgeKey, weight: f64) -> bool {
        if self.edges.contains_key(&key) {
            return false;
        }
        self.edges.insert(key, weight);
        self.adjacency.ensure_len(key.hi().0 + 1, Vec::new);
        self.adjacency[key.lo()].push((key.hi(), weight));
        self.adjacency[key.hi()].push((key.lo(), weight));
        self.weight += weight;
        trace!(target: "adaptive_mst::tree", lo = %key.lo(), hi = %key.hi(), weight, "tree edge added");
        true
    }

    /// Removes a tree edge, returning its weight. No-op if absent.
    pub fn remove_edge(&mut self, key: &EdgeKey) -> Option<f64> {
        let weight = self.edges.shift_remove(key)?;
        self.unlink(key.lo(), key.hi());
        self.unlink(key.hi(), key.lo());
        self.weight -= weight;
        trace!(target: "adaptive_mst::tree", lo = %key.lo(), hi = %key.hi(), weight, "tree edge removed");
        Some(weight)
    }

    /// A node holds at most one entry per neighbour, so the id alone identifies it.
    fn unlink(&mut self, from: NodeId, to: NodeId) {
        if from.0 < self.adjacency.len() {
            self.adjacency[from].retain(|&(n, _)| n != to);
        }
    }

    fn seen_set(&self, extra: &[NodeId]) -> BitVec {
        let len = extra
            .iter()
            .map(|n| n.0 + 1)
            .fold(self.adjacency.len(), usize::max);
        BitVec::repeat(false, len)
    }

    /// Breadth-first reachability over the tree edges.
    pub fn connected(&self, s: NodeId, t: NodeId) -> bool {
        if s == t {
            return true;
        }
        let mut seen = self.seen_set(&[s, t]);
        let mut queue = VecDeque::from([s]);
        seen.set(s.0, true);

        while let Some(u) = queue.pop_front() {
            for &(v, _) in self.neighbours(u) {
                if seen[v.0] {
                    continue;
                }
                if v == t {
                    return true;
                }
                seen.set(v.0, true);
                queue.push_back(v);
            }
        }
        false
    }

    /// The maximum-weight edge on the unique tree path between `s` and `t`.
    ///
    /// Returns `None` if `t` is unreachable from `s` (or `s == t`). Among equal
    /// maxima the edge closest to `t` wins.
    pub fn heaviest_edge_on_path(&self, s: NodeId, t: NodeId) -> Option<Edge> {
        if s == t {
            return None;
        }
        let mut seen = self.seen_set(&[s, t]);
        let mut parent: NodeVec<Option<(NodeId, f64)>> = NodeVec::new();
        parent.ensure_len(seen.len(), || None);

        let mut queue = VecDeque::from([s]);
        seen.set(s.0, true);
        let mut found = false;

        'search: while let Some(u) = queue.pop_front() {
            for &(v, w) in self.neighbours(u) {
                if seen[v.0] {
                    continue;
                }
                parent[v] = Some((u, w));
                if v == t {
                    found = true;
                    break 'search;
                }
                seen.set(v.0, true);
                queue.push_back(v);
            }
        }
        if !found {
            return None;
        }

        let mut heaviest: Option<Edge> = None;
        let mut cur = t;
        while cur != s {
            let (prev, w) = parent[cur]?;
            if heaviest.map_or(true, |h| w > h.weight) {
                heaviest = EdgeKey::new(cur, prev).map(|k| k.with_weight(w));
            }
            cur = prev;
        }
        heaviest
    }

    /// Labels every node in `0..node_count`; isolated nodes form singleton components.
    pub fn components(&self, node_count: usize) -> Components {
        let mut labels: NodeVec<Option<usize>> = NodeVec::new();
        labels.ensure_len(node_count, || None);
        let mut count = 0;

        for start in (0..node_count).map(NodeId) {
            if labels[start].is_some() {
                continue;
            }
            labels[start] = Some(count);
            let mut queue = VecDeque::from([start]);
            while let Some(u) = queue.pop_front() {
                for &(v, _) in self.neighbours(u) {
                    if v.0 < node_count && labels[v].is_none() {
                        labels[v] = Some(count);
                        queue.push_back(v);
                    }
                }
            }
            count += 1;
        }

        Components {
            labels: labels.iter().map(|(_, l)| l.unwrap_or(0)).collect(),
            count,
        }
    }

    /// Applies the removal of node `removed` to the tree: drops incident edges,
    /// shifts ids above it down by one, rebuilds the adjacency from the shifted
    /// ids and resums the weight exactly.
    pub fn renumber_after_node_removal(&mut self, removed: NodeId) {
        self.edges = renumber_edges(&self.edges, removed);
        self.rebuild_adjacency();
        self.weight = self.resum();
    }

    fn rebuild_adjacency(&mut self) {
        self.adjacency.clear();
        for (key, weight) in self.edges.iter() {
            self.adjacency.ensure_len(key.hi().0 + 1, Vec::new);
            self.adjacency[key.lo()].push((key.hi(), *weight));
            self.adjacency[key.hi()].push((key.lo(), *weight));
        }
    }
}
