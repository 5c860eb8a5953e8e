use std::cell::Cell;

use crate::graph::NodeId;

/// A node of the union–find forest.
///
/// - `Root { rank }` means this node is a root and stores its union–by–rank value.
/// - `Child(parent)` means this node points to its parent.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UFNode {
    Root { rank: usize },
    Child(NodeId),
}

/// Disjoint sets over dense node ids.
///
/// The parent–pointer forest is stored as a `Vec<Cell<UFNode>>` so that `find`
/// (with path compression) can update parent pointers even on an immutable reference.
#[derive(Debug)]
pub struct UnionFind {
    nodes: Vec<Cell<UFNode>>,
    set_count: usize,
}

impl UnionFind {
    /// `n` singleton sets.
    pub fn new(n: usize) -> Self {
        UnionFind {
            nodes: (0..n).map(|_| Cell::new(UFNode::Root { rank: 0 })).collect(),
            set_count: n,
        }
    }

    /// Number of disjoint sets currently held.
    pub fn set_count(&self) -> usize {
        self.set_count
    }

    /// Finds the representative (root) of the set containing `x`, performing path compression.
    pub fn find(&self, x: NodeId) -> NodeId {
        match self.nodes[x.0].get() {
            UFNode::Root { .. } => x,
            UFNode::Child(parent) => {
                let root = self.find(parent);
                self.nodes[x.0].set(UFNode::Child(root));
                root
            }
        }
    }

    fn rank(&self, root: NodeId) -> usize {
        match self.nodes[root.0].get() {
            UFNode::Root { rank } => rank,
            UFNode::Child(_) => unreachable!("find() should always return a root"),
        }
    }

    /// Merges the sets containing `x` and `y` by rank.
    ///
    /// Returns `false` when both already were in the same set.
    pub fn union(&mut self, x: NodeId, y: NodeId) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return false;
        }

        let rank_x = self.rank(root_x);
        let rank_y = self.rank(root_y);

        let (winner, loser) = if rank_x < rank_y {
            (root_y, root_x)
        } else {
            (root_x, root_y)
        };

        if rank_x == rank_y {
            self.nodes[winner.0].set(UFNode::Root { rank: rank_x + 1 });
        }
        self.nodes[loser.0].set(UFNode::Child(winner));
        self.set_count -= 1;
        true
    }
}
