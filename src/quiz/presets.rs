//! The two worked examples every player starts with.

use crate::core::{Capacity, EdgeAttribute, GraphStore, Weight};
use crate::error::GraphError;

const ROUTE_EDGES: [(&str, &str, f64); 8] = [
    ("Start", "Senboku", 15.0),
    ("Senboku", "Akita", 75.0),
    ("Senboku", "Daisen", 40.0),
    ("Akita", "Daisen", 56.0),
    ("Daisen", "Yuzawa", 45.0),
    ("Akita", "Goal", 42.0),
    ("Daisen", "Goal", 50.0),
    ("Yuzawa", "Goal", 58.0),
];

const FLOW_EDGES: [(&str, &str, u64); 8] = [
    ("S", "A", 10),
    ("S", "B", 5),
    ("A", "B", 15),
    ("A", "C", 9),
    ("B", "D", 8),
    ("B", "C", 5),
    ("C", "T", 10),
    ("D", "T", 10),
];

pub const ROUTE_SOURCE: &str = "Start";
pub const ROUTE_TARGET: &str = "Goal";
pub const FLOW_SOURCE: &str = "S";
pub const FLOW_SINK: &str = "T";

/// Undirected road map between cities, weighted by distance.
pub fn route_example() -> Result<GraphStore<Weight>, GraphError> {
    let mut store = GraphStore::new();
    for (from, to, weight) in ROUTE_EDGES {
        add_missing_nodes(&mut store, [from, to])?;
        store.add_edge(from, to, Weight(weight))?;
    }
    Ok(store)
}

/// Directed pipe network from `S` to `T`.
pub fn flow_example() -> Result<GraphStore<Capacity>, GraphError> {
    let mut store = GraphStore::new();
    for (from, to, capacity) in FLOW_EDGES {
        add_missing_nodes(&mut store, [from, to])?;
        store.add_edge(from, to, Capacity(capacity))?;
    }
    Ok(store)
}

fn add_missing_nodes<A: EdgeAttribute>(
    store: &mut GraphStore<A>,
    labels: [&str; 2],
) -> Result<(), GraphError> {
    for label in labels {
        if !store.contains(label) {
            store.add_node(label)?;
        }
    }
    Ok(())
}
