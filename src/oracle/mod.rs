mod max_flow;
mod petgraph_interface;
mod shortest_path;

pub use max_flow::{EdgeFlow, max_flow};
pub use petgraph_interface::convert_to_petgraph;
pub use shortest_path::shortest_path;

use crate::core::{EdgeAttribute, GraphStore, NodeId};
use crate::error::OracleError;

/// Looks up both query endpoints, rejecting unknown or identical nodes.
fn resolve_endpoints<A: EdgeAttribute>(
    store: &GraphStore<A>,
    source: &str,
    target: &str,
) -> Result<(NodeId, NodeId), OracleError> {
    let lookup = |label: &str| {
        store.node_id(label).ok_or_else(|| OracleError::UnknownNode {
            label: label.to_string(),
        })
    };
    let from = lookup(source)?;
    let to = lookup(target)?;
    if from == to {
        return Err(OracleError::SameEndpoints {
            label: source.to_string(),
        });
    }
    Ok((from, to))
}
