use thiserror::Error;

use crate::graph::{Edge, NodeId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown algorithm: {0:?}")]
pub struct ParseAlgorithmError(pub String);

/// A violated structural invariant, as reported by
/// [`MstEngine::check_invariants`](crate::engine::MstEngine::check_invariants).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantError {
    #[error("Tree has {tree_edges} edges but {node_count} nodes allow at most {bound}")]
    TooManyTreeEdges {
        tree_edges: usize,
        node_count: usize,
        bound: usize,
    },
    #[error("Tree edge {0} is missing from the graph")]
    TreeEdgeNotInGraph(Edge),
    #[error("Tree edge {tree} disagrees with graph weight {graph_weight}")]
    WeightMismatch { tree: Edge, graph_weight: f64 },
    #[error("Tree edge {0} closes a cycle")]
    Cycle(Edge),
    #[error("Tree edge {0} references a node outside the node range")]
    NodeOutOfRange(Edge),
    #[error("Adjacency of node {node} does not mirror the tree edges")]
    AdjacencyMismatch { node: NodeId },
    #[error("Running tree weight {running} differs from the exact sum {exact}")]
    WeightDrift { running: f64, exact: f64 },
}
