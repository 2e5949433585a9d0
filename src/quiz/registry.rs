use std::collections::HashMap;

use tracing::info;

use crate::core::{Capacity, GraphStore, Weight};
use crate::error::QuizError;
use crate::quiz::{MaxFlow, QuizSession, SessionId, ShortestPath};

enum AnySession {
    Path(QuizSession<ShortestPath>),
    Flow(QuizSession<MaxFlow>),
}

/// Owns every open session. Sessions are only reachable through their id and
/// never share a graph or an answer.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, AnySession>,
    next_id: u64,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_path(&mut self, graph: GraphStore<Weight>) -> SessionId {
        let id = self.allocate_id();
        self.sessions.insert(id, AnySession::Path(QuizSession::new(id, graph)));
        info!(session = %id, kind = "shortest-path", "session opened");
        id
    }

    pub fn open_flow(&mut self, graph: GraphStore<Capacity>) -> SessionId {
        let id = self.allocate_id();
        self.sessions.insert(id, AnySession::Flow(QuizSession::new(id, graph)));
        info!(session = %id, kind = "max-flow", "session opened");
        id
    }

    pub fn path(&self, id: SessionId) -> Result<&QuizSession<ShortestPath>, QuizError> {
        match self.sessions.get(&id) {
            Some(AnySession::Path(session)) => Ok(session),
            _ => Err(QuizError::UnknownSession { id }),
        }
    }

    pub fn path_mut(&mut self, id: SessionId) -> Result<&mut QuizSession<ShortestPath>, QuizError> {
        match self.sessions.get_mut(&id) {
            Some(AnySession::Path(session)) => Ok(session),
            _ => Err(QuizError::UnknownSession { id }),
        }
    }

    pub fn flow(&self, id: SessionId) -> Result<&QuizSession<MaxFlow>, QuizError> {
        match self.sessions.get(&id) {
            Some(AnySession::Flow(session)) => Ok(session),
            _ => Err(QuizError::UnknownSession { id }),
        }
    }

    pub fn flow_mut(&mut self, id: SessionId) -> Result<&mut QuizSession<MaxFlow>, QuizError> {
        match self.sessions.get_mut(&id) {
            Some(AnySession::Flow(session)) => Ok(session),
            _ => Err(QuizError::UnknownSession { id }),
        }
    }

    /// Drops a session and everything it holds. Returns whether it existed.
    pub fn close(&mut self, id: SessionId) -> bool {
        let closed = self.sessions.remove(&id).is_some();
        if closed {
            info!(session = %id, "session closed");
        }
        closed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn allocate_id(&mut self) -> SessionId {
        let id = SessionId(self.next_id);
        self.next_id += 1;
        id
    }
}
