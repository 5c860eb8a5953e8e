use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::ParseAlgorithmError;

/// Full-rebuild strategy.
///
/// Kruskal spans every component of the graph; Prim only grows the component
/// containing node 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
pub enum Algorithm {
    #[default]
    Kruskal,
    Prim,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Kruskal, Algorithm::Prim];

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Kruskal => "Kruskal",
            Algorithm::Prim => "Prim",
        }
    }

    /// Parses one of the recognized names, falling back to the default for anything else.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ParseAlgorithmError(s.to_owned()))
    }
}
