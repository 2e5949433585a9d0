use std::marker::PhantomData;

use tracing::{info, warn};

use crate::core::{Edge, GraphStore, Query};
use crate::error::QuizError;
use crate::quiz::{QuizKind, QuizState, SessionId, Verdict};

/// One quiz: a graph plus the Idle/Answered state machine built on it.
///
/// Graph edits are only accepted while idle, so a verdict always refers to
/// the graph that is on screen.
#[derive(Clone, Debug)]
pub struct QuizSession<K: QuizKind> {
    id: SessionId,
    graph: GraphStore<K::Attr>,
    state: QuizState,
    oracle_calls: usize,
    _kind: PhantomData<K>,
}

impl<K: QuizKind> QuizSession<K> {
    pub fn new(id: SessionId, graph: GraphStore<K::Attr>) -> Self {
        QuizSession {
            id,
            graph,
            state: QuizState::Idle,
            oracle_calls: 0,
            _kind: PhantomData,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn graph(&self) -> &GraphStore<K::Attr> {
        &self.graph
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn is_answered(&self) -> bool {
        matches!(self.state, QuizState::Answered { .. })
    }

    pub fn query(&self) -> Option<&Query> {
        match &self.state {
            QuizState::Answered { query, .. } => Some(query),
            QuizState::Idle => None,
        }
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        match &self.state {
            QuizState::Answered { verdict, .. } => Some(verdict),
            QuizState::Idle => None,
        }
    }

    /// How many times an oracle has been consulted by this session.
    pub fn oracle_calls(&self) -> usize {
        self.oracle_calls
    }

    pub fn submit(&mut self, source: &str, target: &str, guess: u64) -> Result<Verdict, QuizError> {
        self.require_idle("submit an answer")?;
        let source = source.trim();
        let target = target.trim();
        if source == target {
            warn!(session = %self.id, source, "same start and end node");
            return Err(QuizError::SameEndpoints {
                label: source.to_string(),
            });
        }

        self.oracle_calls += 1;
        let verdict = K::solve(&self.graph, source, target)?.judge(guess);
        info!(
            session = %self.id,
            kind = K::NAME,
            source,
            target,
            guess,
            correct = verdict.correct,
            "answer judged"
        );

        self.state = QuizState::Answered {
            query: Query {
                source: source.to_string(),
                target: target.to_string(),
                guess,
            },
            verdict: verdict.clone(),
        };
        Ok(verdict)
    }

    /// Clears the answer and keeps the graph.
    pub fn retry(&mut self) -> Result<(), QuizError> {
        if !self.is_answered() {
            return Err(self.invalid("retry"));
        }
        self.state = QuizState::Idle;
        info!(session = %self.id, "retrying on the same graph");
        Ok(())
    }

    /// Clears the answer and the graph.
    pub fn rebuild(&mut self) {
        self.graph.clear();
        self.state = QuizState::Idle;
        info!(session = %self.id, "graph cleared");
    }

    /// Swaps in a freshly generated graph, dropping any previous answer.
    pub fn replace_graph(&mut self, graph: GraphStore<K::Attr>) {
        self.graph = graph;
        self.state = QuizState::Idle;
        info!(
            session = %self.id,
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "graph replaced"
        );
    }

    pub fn add_node(&mut self, label: &str) -> Result<String, QuizError> {
        self.require_idle("add a node")?;
        Ok(self.graph.add_node(label)?)
    }

    pub fn add_lettered_node(&mut self) -> Result<String, QuizError> {
        self.require_idle("add a node")?;
        Ok(self.graph.add_lettered_node()?)
    }

    pub fn add_edge(
        &mut self,
        from: &str,
        to: &str,
        attr: K::Attr,
    ) -> Result<Edge<K::Attr>, QuizError> {
        self.require_idle("add an edge")?;
        Ok(self.graph.add_edge(from, to, attr)?)
    }

    fn require_idle(&self, action: &'static str) -> Result<(), QuizError> {
        if self.is_answered() { Err(self.invalid(action)) } else { Ok(()) }
    }

    fn invalid(&self, action: &'static str) -> QuizError {
        warn!(session = %self.id, action, state = self.state.name(), "transition rejected");
        QuizError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }
}
