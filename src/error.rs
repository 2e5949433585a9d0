//! Error types shared by the graph store, the oracles and the quiz sessions.
//!
//! Every failure here is recoverable at the session level. [`Severity`] tells
//! the console how loudly to report each one.

use thiserror::Error;

use crate::quiz::SessionId;

/// How a failure should be surfaced to the user.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Severity {
    /// Expected outcome that the user should simply be told about.
    Info,
    /// Rejected input; nothing changed.
    Warning,
    /// Unexpected fault or a wrong answer.
    Error,
}

/// Rejected graph-building requests. The store is left unchanged.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// A node with this label already exists.
    #[error("node `{label}` already exists")]
    DuplicateNode {
        /// Label that was requested twice.
        label: String,
    },
    /// The store already holds its maximum number of nodes.
    #[error("no more nodes can be added (limit is {limit})")]
    CapacityExceeded {
        /// Configured node limit.
        limit: usize,
    },
    /// Labels must contain at least one non-whitespace character.
    #[error("node labels cannot be empty")]
    InvalidLabel,
    /// An edge endpoint does not exist in the store.
    #[error("node `{label}` does not exist")]
    UnknownNode {
        /// Missing endpoint.
        label: String,
    },
    /// Weights and capacities must be strictly positive.
    #[error("`{value}` is not a valid edge value; it must be positive")]
    InvalidAttribute {
        /// Raw value that was rejected.
        value: String,
    },
    /// Edges must join two distinct nodes.
    #[error("an edge cannot start and end at `{label}`")]
    SelfLoop {
        /// Node on both ends of the rejected edge.
        label: String,
    },
}

/// Failures reported by the shortest-path and max-flow oracles.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum OracleError {
    /// A query endpoint is not part of the graph.
    #[error("node `{label}` does not exist")]
    UnknownNode {
        /// Missing endpoint.
        label: String,
    },
    /// The query used the same node for both ends.
    #[error("start and end must be different nodes (both were `{label}`)")]
    SameEndpoints {
        /// Node used for both ends.
        label: String,
    },
    /// No path joins the two nodes.
    #[error("there is no path between `{from}` and `{to}`")]
    NoPathFound {
        /// Start of the query.
        from: String,
        /// End of the query.
        to: String,
    },
    /// The max-flow computation failed. Never used for a legitimate zero flow.
    #[error("max-flow computation failed: {detail}")]
    FlowComputationError {
        /// What went wrong.
        detail: String,
    },
}

/// Rejected random-generation requests.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GeneratorError {
    /// Requested node count is outside the bounds for this quiz kind.
    #[error("node count must be between {min} and {max} (got {requested})")]
    NodeCountOutOfRange {
        /// Requested count.
        requested: usize,
        /// Smallest allowed count.
        min: usize,
        /// Largest allowed count.
        max: usize,
    },
}

/// Everything a quiz session can reject.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum QuizError {
    /// Graph edit was rejected.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Oracle could not produce an answer.
    #[error(transparent)]
    Oracle(#[from] OracleError),
    /// Random generation was rejected.
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    /// Query used the same node for both ends; no oracle was called.
    #[error("start and end must be different nodes (both were `{label}`)")]
    SameEndpoints {
        /// Node used for both ends.
        label: String,
    },
    /// Action is not allowed in the current quiz state.
    #[error("cannot {action} while the quiz is {state}")]
    InvalidTransition {
        /// Attempted action.
        action: &'static str,
        /// Name of the current state.
        state: &'static str,
    },
    /// No session of the requested kind is registered under this id.
    #[error("no matching session for {id}")]
    UnknownSession {
        /// Id that was looked up.
        id: SessionId,
    },
}

impl QuizError {
    /// Presentation severity for this error.
    pub fn severity(&self) -> Severity {
        match self {
            QuizError::Oracle(OracleError::NoPathFound { .. }) => Severity::Info,
            QuizError::Oracle(OracleError::FlowComputationError { .. })
            | QuizError::UnknownSession { .. } => Severity::Error,
            _ => Severity::Warning,
        }
    }
}
