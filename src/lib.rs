//! # Adaptive MST
//!
//! A mutable weighted graph that keeps a minimum spanning tree (or, for a
//! disconnected graph, forest) up to date while nodes and edges come and go.
//!
//! Full builds use Kruskal's or Prim's algorithm. Between builds the tree is
//! maintained incrementally: a new edge that closes a cycle replaces the
//! heaviest edge on that cycle if it is lighter, and a deleted tree edge is
//! replaced by the lightest edge crossing the cut.
//!
//! ```
//! use adaptive_mst::{engine::MstEngine, graph::NodeId};
//!
//! let mut mst = MstEngine::new(3);
//! mst.add_edge(NodeId(0), NodeId(1), 1.0);
//! mst.add_edge(NodeId(1), NodeId(2), 2.0);
//! mst.add_edge(NodeId(0), NodeId(2), 0.5);
//! assert_eq!(mst.tree_weight(), 1.5);
//! ```
//!
//! The engine is single-threaded and exclusively owned by its caller.

pub mod algorithm;
pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod spanning_tree;
pub mod typed_vec;
pub mod union_find;

pub use algorithm::Algorithm;
pub use config::MstConfig;
pub use engine::{MstEngine, Stats};
pub use graph::{Edge, NodeId};
