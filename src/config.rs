use crate::algorithm::Algorithm;

pub const DEFAULT_WEIGHT_TOLERANCE: f64 = 1e-9;
pub const DEFAULT_NODE_LIMIT: usize = 1 << 16;

/// Engine settings.
///
/// `node_limit` bounds implicit growth of the node range: an edge insertion
/// that would extend the range to an id at or beyond it is dropped, and
/// `reset` clamps to it. Explicit `add_node` calls are not limited.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
pub struct MstConfig {
    pub algorithm: Algorithm,
    pub weight_tolerance: f64,
    pub node_limit: usize,
}

impl Default for MstConfig {
    fn default() -> Self {
        MstConfig {
            algorithm: Algorithm::default(),
            weight_tolerance: DEFAULT_WEIGHT_TOLERANCE,
            node_limit: DEFAULT_NODE_LIMIT,
        }
    }
}

impl MstConfig {
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the drift the invariant audit allows. Non-finite values select the default.
    pub fn with_weight_tolerance(mut self, tolerance: f64) -> Self {
        self.weight_tolerance = if tolerance.is_finite() {
            tolerance.abs()
        } else {
            DEFAULT_WEIGHT_TOLERANCE
        };
        self
    }

    pub fn with_node_limit(mut self, node_limit: usize) -> Self {
        self.node_limit = node_limit;
        self
    }
}
