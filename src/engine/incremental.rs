use tracing::{debug, trace, warn};

use super::MstEngine;
use crate::graph::{EdgeKey, NodeId};

impl MstEngine {
    /// Inserts or replaces the edge `u`–`v` and updates the tree.
    ///
    /// When the tree is full and `u`, `v` are already joined, the new edge
    /// replaces the heaviest edge on the tree path between them if it is
    /// strictly lighter. A tree that is not full is rebuilt instead.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, weight: f64) {
        let Some(key) = EdgeKey::new(u, v) else {
            trace!(target: "adaptive_mst::engine", %u, "self-loop ignored");
            return;
        };
        if !weight.is_finite() {
            trace!(target: "adaptive_mst::engine", %u, %v, weight, "non-finite weight ignored");
            return;
        }
        if !self.graph.contains_node(key.hi()) && key.hi().0 >= self.config.node_limit {
            warn!(
                target: "adaptive_mst::engine",
                node = %key.hi(),
                limit = self.config.node_limit,
                "edge references a node beyond the node limit, ignored"
            );
            return;
        }

        self.graph.ensure_node(key.hi());
        if self.graph.contains_pair(&key) {
            self.delete_pair(key);
        }
        self.graph.insert(key, weight);

        if !self.tree.is_full(self.graph.node_count()) {
            self.rebuild();
            return;
        }

        if !self.tree.connected(u, v) {
            self.tree.add_edge(key, weight);
            return;
        }

        let Some(heaviest) = self.tree.heaviest_edge_on_path(u, v) else {
            return;
        };
        if weight < heaviest.weight {
            if let Some(old) = heaviest.key() {
                self.tree.remove_edge(&old);
            }
            self.tree.add_edge(key, weight);
            debug!(
                target: "adaptive_mst::engine",
                added = %key.with_weight(weight),
                removed = %heaviest,
                cost = self.tree.weight(),
                "cycle exchange"
            );
        }
    }

    /// Deletes the edge `u`–`v`. If it was a tree edge the cut is reconnected
    /// with the lightest crossing edge, when one exists.
    pub fn delete_edge(&mut self, u: NodeId, v: NodeId) {
        if let Some(key) = EdgeKey::new(u, v) {
            self.delete_pair(key);
        }
    }

    pub(super) fn delete_pair(&mut self, key: EdgeKey) {
        if self.graph.remove_pair(&key).is_none() {
            return;
        }
        if self.tree.remove_edge(&key).is_some() {
            self.reconnect_after_cut();
        }
    }

    /// Joins tree components with the lightest non-tree edge crossing them
    /// until one component remains or no crossing edge exists.
    ///
    /// Every pass adds one tree edge between two components, so the loop runs
    /// at most `node_count - 1` times. Exact weight ties keep the edge inserted first.
    pub fn reconnect_after_cut(&mut self) {
        loop {
            let components = self.tree.components(self.graph.node_count());
            if components.count() <= 1 {
                return;
            }

            let lightest = self
                .graph
                .edges()
                .filter(|(key, _)| !self.tree.contains_pair(key) && components.separates(key))
                .min_by(|(_, a), (_, b)| a.total_cmp(b));

            let Some((key, weight)) = lightest else {
                debug!(
                    target: "adaptive_mst::engine",
                    components = components.count(),
                    "cut cannot be reconnected"
                );
                return;
            };

            debug!(
                target: "adaptive_mst::engine",
                edge = %key.with_weight(weight),
                components = components.count(),
                "reconnecting cut"
            );
            self.tree.add_edge(key, weight);
        }
    }
}
