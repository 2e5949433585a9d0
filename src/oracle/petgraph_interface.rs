use petgraph::EdgeType;
use petgraph::graph::{Graph, NodeIndex};
use std::collections::HashMap;

use crate::core::{EdgeAttribute, GraphStore, NodeId};

/// Builds a petgraph copy of the store with labels as node weights.
///
/// Nodes are added in id order, so `NodeIndex::new(id)` addresses the node
/// with store id `id`.
pub fn convert_to_petgraph<A, Ty>(store: &GraphStore<A>) -> Graph<String, A, Ty>
where
    A: EdgeAttribute,
    Ty: EdgeType,
{
    let mut petgraph = Graph::with_capacity(store.node_count(), store.edge_count());

    let node_map: HashMap<NodeId, NodeIndex> = store
        .nodes()
        .enumerate()
        .map(|(id, label)| (id, petgraph.add_node(label.to_string())))
        .collect();

    for (from, to, attr) in store.edge_ids() {
        if let (Some(&from_index), Some(&to_index)) = (node_map.get(&from), node_map.get(&to)) {
            petgraph.add_edge(from_index, to_index, attr);
        }
    }

    petgraph
}
