use std::fmt;
use std::ops::RangeInclusive;

use rand::Rng;
use serde::Serialize;

use crate::core::{
    Capacity, EdgeAttribute, FLOW_RANDOM_NODES, GraphStore, PATH_RANDOM_NODES, Query, Weight,
};
use crate::error::{GraphError, OracleError, QuizError};
use crate::oracle::{EdgeFlow, max_flow, shortest_path};
use crate::quiz::{
    FLOW_SINK, FLOW_SOURCE, ROUTE_SOURCE, ROUTE_TARGET, RandomGraphGenerator, flow_example,
    route_example,
};

/// Explicit handle for one user's quiz session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session #{}", self.0)
    }
}

/// What backs up a verdict: the route taken or the flow on each edge.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evidence {
    Path {
        nodes: Vec<String>,
    },
    Flow {
        edges: Vec<EdgeFlow>,
        sink_reachable: bool,
    },
}

/// The correct answer to a query. Flow values stay integral so that a guess
/// is compared exactly, however large the capacities are.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Expected {
    Length(f64),
    Flow(u128),
}

impl Expected {
    fn matches(self, guess: u64) -> bool {
        match self {
            // guesses are whole numbers; a fractional length can never match
            Expected::Length(length) => (guess as f64 - length).abs() < 1e-9,
            Expected::Flow(value) => u128::from(guess) == value,
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Length(length) => write!(f, "{}", Weight(*length)),
            Expected::Flow(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Verdict {
    pub correct: bool,
    pub expected: Expected,
    pub evidence: Evidence,
}

impl Verdict {
    pub fn expected_display(&self) -> String {
        self.expected.to_string()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum QuizState {
    #[default]
    Idle,
    Answered {
        query: Query,
        verdict: Verdict,
    },
}

impl QuizState {
    pub fn name(&self) -> &'static str {
        match self {
            QuizState::Idle => "idle",
            QuizState::Answered { .. } => "answered",
        }
    }
}

/// The oracle's answer before it is compared with a guess.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    pub value: Expected,
    pub evidence: Evidence,
}

impl Solution {
    pub fn judge(self, guess: u64) -> Verdict {
        Verdict {
            correct: self.value.matches(guess),
            expected: self.value,
            evidence: self.evidence,
        }
    }
}

/// Binds a quiz variant to its edge attribute and its oracle.
pub trait QuizKind {
    type Attr: EdgeAttribute;

    const NAME: &'static str;

    /// Node counts accepted by the random generator.
    const RANDOM_NODES: RangeInclusive<usize>;

    /// Suggested endpoints for the worked example.
    const EXAMPLE_ENDPOINTS: (&'static str, &'static str);

    fn solve(
        store: &GraphStore<Self::Attr>,
        source: &str,
        target: &str,
    ) -> Result<Solution, OracleError>;

    fn example() -> Result<GraphStore<Self::Attr>, GraphError>;

    fn random_graph<R: Rng>(
        generator: &mut RandomGraphGenerator<R>,
        node_count: usize,
    ) -> Result<GraphStore<Self::Attr>, QuizError>;
}

/// Guess the length of the shortest path in an undirected weighted graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShortestPath;

impl QuizKind for ShortestPath {
    type Attr = Weight;

    const NAME: &'static str = "shortest-path";
    const RANDOM_NODES: RangeInclusive<usize> = PATH_RANDOM_NODES;
    const EXAMPLE_ENDPOINTS: (&'static str, &'static str) = (ROUTE_SOURCE, ROUTE_TARGET);

    fn solve(
        store: &GraphStore<Weight>,
        source: &str,
        target: &str,
    ) -> Result<Solution, OracleError> {
        let answer = shortest_path(store, source, target)?;
        Ok(Solution {
            value: Expected::Length(answer.length),
            evidence: Evidence::Path { nodes: answer.path },
        })
    }

    fn example() -> Result<GraphStore<Weight>, GraphError> {
        route_example()
    }

    fn random_graph<R: Rng>(
        generator: &mut RandomGraphGenerator<R>,
        node_count: usize,
    ) -> Result<GraphStore<Weight>, QuizError> {
        generator.path_graph(node_count)
    }
}

/// Guess the maximum flow in a directed capacitated graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MaxFlow;

impl QuizKind for MaxFlow {
    type Attr = Capacity;

    const NAME: &'static str = "max-flow";
    const RANDOM_NODES: RangeInclusive<usize> = FLOW_RANDOM_NODES;
    const EXAMPLE_ENDPOINTS: (&'static str, &'static str) = (FLOW_SOURCE, FLOW_SINK);

    fn solve(
        store: &GraphStore<Capacity>,
        source: &str,
        target: &str,
    ) -> Result<Solution, OracleError> {
        let answer = max_flow(store, source, target)?;
        Ok(Solution {
            value: Expected::Flow(answer.value),
            evidence: Evidence::Flow {
                edges: answer.assignment,
                sink_reachable: answer.sink_reachable,
            },
        })
    }

    fn example() -> Result<GraphStore<Capacity>, GraphError> {
        flow_example()
    }

    fn random_graph<R: Rng>(
        generator: &mut RandomGraphGenerator<R>,
        node_count: usize,
    ) -> Result<GraphStore<Capacity>, QuizError> {
        generator.flow_graph(node_count)
    }
}
