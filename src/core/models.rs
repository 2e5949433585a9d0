use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::GraphError;

/// Dense, insertion-ordered node index inside a [`crate::core::GraphStore`].
pub type NodeId = usize;

/// Value carried by every edge of a store: a distance or a capacity.
pub trait EdgeAttribute:
    Copy + PartialEq + fmt::Debug + fmt::Display + FromStr<Err = GraphError> + Serialize
{
    /// Whether `u -> v` and `v -> u` are distinct edges.
    const DIRECTED: bool;

    fn is_valid(&self) -> bool;
}

/// Distance of an undirected edge in a shortest-path quiz.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Weight(pub f64);

impl EdgeAttribute for Weight {
    const DIRECTED: bool = false;

    fn is_valid(&self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl FromStr for Weight {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GraphError::InvalidAttribute {
            value: s.trim().to_string(),
        };
        let weight = s.trim().parse::<f64>().map(Weight).map_err(|_| invalid())?;
        if weight.is_valid() { Ok(weight) } else { Err(invalid()) }
    }
}

/// Capacity of a directed edge in a max-flow quiz.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Capacity(pub u64);

impl EdgeAttribute for Capacity {
    const DIRECTED: bool = true;

    fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Capacity {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GraphError::InvalidAttribute {
            value: s.trim().to_string(),
        };
        let capacity = s.trim().parse::<u64>().map(Capacity).map_err(|_| invalid())?;
        if capacity.is_valid() { Ok(capacity) } else { Err(invalid()) }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Edge<A> {
    pub from: String,
    pub to: String,
    pub attr: A,
}

/// One question put to a quiz: the two endpoints and the user's guess.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Query {
    pub source: String,
    pub target: String,
    pub guess: u64,
}
