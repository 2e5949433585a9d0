use bimap::BiMap;
use tracing::debug;

use crate::core::{Edge, EdgeAttribute, MAX_BUILDER_NODES, NodeId};
use crate::error::GraphError;

/// Node and edge collection backing a single quiz session.
///
/// Nodes get dense ids in insertion order, so iterating by id gives the
/// order the user added them in. Edges keep their first insertion position
/// even when a later add overwrites their value.
#[derive(Clone, Debug)]
pub struct GraphStore<A: EdgeAttribute> {
    // map from label to node id
    nodes: BiMap<String, NodeId>,
    edges: Vec<Edge<A>>,
    node_limit: usize,
    next_letter: usize,
}

/// Label of the `index`-th lettered node: `A`, `B`, ... `Z`.
pub fn letter_label(index: usize) -> Option<String> {
    u8::try_from(index)
        .ok()
        .filter(|&i| usize::from(i) < MAX_BUILDER_NODES)
        .map(|i| char::from(b'A' + i).to_string())
}

impl<A: EdgeAttribute> Default for GraphStore<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: EdgeAttribute> GraphStore<A> {
    pub fn new() -> Self {
        Self::with_node_limit(MAX_BUILDER_NODES)
    }

    pub fn with_node_limit(node_limit: usize) -> Self {
        GraphStore {
            nodes: BiMap::new(),
            edges: Vec::new(),
            node_limit,
            next_letter: 0,
        }
    }

    pub fn add_node(&mut self, label: &str) -> Result<String, GraphError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(GraphError::InvalidLabel);
        }
        if self.nodes.contains_left(label) {
            return Err(GraphError::DuplicateNode {
                label: label.to_string(),
            });
        }
        if self.nodes.len() >= self.node_limit {
            return Err(GraphError::CapacityExceeded {
                limit: self.node_limit,
            });
        }

        let id = self.nodes.len();
        // ids are never reused because nodes are only removed by `clear`
        self.nodes.insert(label.to_string(), id);
        debug!(label, id, "node added");
        Ok(label.to_string())
    }

    /// Adds the next node in the `A`..`Z` sequence.
    ///
    /// The letter counter only advances on success, so a clash with a node
    /// the user named by hand keeps failing until the store is cleared.
    pub fn add_lettered_node(&mut self) -> Result<String, GraphError> {
        let limit = self.node_limit.min(MAX_BUILDER_NODES);
        let Some(label) = letter_label(self.next_letter).filter(|_| self.next_letter < limit) else {
            return Err(GraphError::CapacityExceeded { limit });
        };
        let label = self.add_node(&label)?;
        self.next_letter += 1;
        Ok(label)
    }

    /// Inserts an edge, or overwrites the value of the edge already joining
    /// the same pair (in the same direction when the attribute is directed).
    pub fn add_edge(&mut self, from: &str, to: &str, attr: A) -> Result<Edge<A>, GraphError> {
        let from = from.trim();
        let to = to.trim();
        for label in [from, to] {
            if !self.nodes.contains_left(label) {
                return Err(GraphError::UnknownNode {
                    label: label.to_string(),
                });
            }
        }
        if !attr.is_valid() {
            return Err(GraphError::InvalidAttribute {
                value: attr.to_string(),
            });
        }
        if from == to {
            return Err(GraphError::SelfLoop {
                label: from.to_string(),
            });
        }

        if let Some(existing) = self
            .edges
            .iter_mut()
            .find(|edge| joins(edge, from, to, A::DIRECTED))
        {
            debug!(from, to, old = %existing.attr, new = %attr, "edge overwritten");
            existing.attr = attr;
            return Ok(existing.clone());
        }

        let edge = Edge {
            from: from.to_string(),
            to: to.to_string(),
            attr,
        };
        debug!(from, to, value = %attr, "edge added");
        self.edges.push(edge.clone());
        Ok(edge)
    }

    /// Node labels in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        (0..self.nodes.len()).filter_map(|id| self.label(id))
    }

    pub fn edges(&self) -> &[Edge<A>] {
        &self.edges
    }

    /// Edges as `(from, to, value)` id triples, in insertion order.
    pub fn edge_ids(&self) -> impl Iterator<Item = (NodeId, NodeId, A)> + '_ {
        self.edges.iter().filter_map(|edge| {
            Some((self.node_id(&edge.from)?, self.node_id(&edge.to)?, edge.attr))
        })
    }

    #[cfg(test)]
    pub fn edge_between(&self, from: &str, to: &str) -> Option<&Edge<A>> {
        self.edges
            .iter()
            .find(|edge| joins(edge, from, to, A::DIRECTED))
    }

    pub fn node_id(&self, label: &str) -> Option<NodeId> {
        self.nodes.get_by_left(label).copied()
    }

    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.nodes.get_by_right(&id).map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.nodes.contains_left(label)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_limit(&self) -> usize {
        self.node_limit
    }

    pub fn is_directed(&self) -> bool {
        A::DIRECTED
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drops every node and edge and restarts the letter sequence at `A`.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.next_letter = 0;
    }
}

fn joins<A>(edge: &Edge<A>, from: &str, to: &str, directed: bool) -> bool {
    (edge.from == from && edge.to == to) || (!directed && edge.from == to && edge.to == from)
}
