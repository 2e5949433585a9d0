use serde::Serialize;

use crate::core::{Edge, Query};
use crate::quiz::{QuizKind, QuizSession, SessionId, Verdict};

/// Read-only view of a session handed to the presentation layer.
#[derive(Serialize, Debug)]
pub struct SessionSnapshot<'a, A> {
    pub id: SessionId,
    pub kind: &'static str,
    pub state: &'static str,
    pub directed: bool,
    pub oracle_calls: usize,
    pub nodes: Vec<&'a str>,
    pub edges: &'a [Edge<A>],
    pub query: Option<&'a Query>,
    pub verdict: Option<&'a Verdict>,
}

pub fn snapshot<K: QuizKind>(session: &QuizSession<K>) -> SessionSnapshot<'_, K::Attr> {
    SessionSnapshot {
        id: session.id(),
        kind: K::NAME,
        state: session.state().name(),
        directed: session.graph().is_directed(),
        oracle_calls: session.oracle_calls(),
        nodes: session.graph().nodes().collect(),
        edges: session.graph().edges(),
        query: session.query(),
        verdict: session.verdict(),
    }
}

pub fn get_json_data<K: QuizKind>(session: &QuizSession<K>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&snapshot(session))
}
