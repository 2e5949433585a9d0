use petgraph::Undirected;
use petgraph::algo::astar;
use petgraph::graph::{Graph, NodeIndex};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::core::{GraphStore, Weight};
use crate::error::OracleError;
use crate::oracle::{convert_to_petgraph, resolve_endpoints};

/// One minimum-weight route and its total weight.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PathAnswer {
    /// Labels along the route, both endpoints included.
    pub path: Vec<String>,
    pub length: f64,
}

/// Minimum-weight path between two nodes of an undirected weighted graph.
///
/// Runs A* with a zero heuristic, which is Dijkstra's algorithm. When several
/// paths tie, whichever one the search settles first is returned.
#[instrument(
    level = "debug",
    skip(store),
    fields(nodes = store.node_count(), edges = store.edge_count())
)]
pub fn shortest_path(
    store: &GraphStore<Weight>,
    source: &str,
    target: &str,
) -> Result<PathAnswer, OracleError> {
    let (from, to) = resolve_endpoints(store, source, target)?;
    let graph: Graph<String, Weight, Undirected> = convert_to_petgraph(store);
    let goal = NodeIndex::new(to);

    let Some((length, route)) = astar(
        &graph,
        NodeIndex::new(from),
        |node| node == goal,
        |edge| edge.weight().0,
        |_| 0.0,
    ) else {
        debug!(source, target, "no path");
        return Err(OracleError::NoPathFound {
            from: source.to_string(),
            to: target.to_string(),
        });
    };

    let path: Vec<String> = route.into_iter().map(|index| graph[index].clone()).collect();
    debug!(length, hops = path.len().saturating_sub(1), "shortest path found");
    Ok(PathAnswer { path, length })
}
