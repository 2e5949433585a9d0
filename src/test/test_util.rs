use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::core::{Capacity, EdgeAttribute, GraphStore, Weight};

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn store_with<A: EdgeAttribute>(nodes: &[&str], edges: &[(&str, &str, A)]) -> GraphStore<A> {
    let mut store = GraphStore::new();
    for node in nodes {
        store.add_node(node).expect("test node must be valid");
    }
    for &(from, to, attr) in edges {
        store.add_edge(from, to, attr).expect("test edge must be valid");
    }
    store
}

pub fn path_store(nodes: &[&str], edges: &[(&str, &str, f64)]) -> GraphStore<Weight> {
    let edges: Vec<(&str, &str, Weight)> =
        edges.iter().map(|&(u, v, w)| (u, v, Weight(w))).collect();
    store_with(nodes, &edges)
}

pub fn flow_store(nodes: &[&str], edges: &[(&str, &str, u64)]) -> GraphStore<Capacity> {
    let edges: Vec<(&str, &str, Capacity)> =
        edges.iter().map(|&(u, v, c)| (u, v, Capacity(c))).collect();
    store_with(nodes, &edges)
}

/// Sum of the weights along `path`, or `None` if a hop is not an edge.
pub fn path_weight(store: &GraphStore<Weight>, path: &[String]) -> Option<f64> {
    path.windows(2)
        .map(|hop| store.edge_between(&hop[0], &hop[1]).map(|edge| edge.attr.0))
        .sum()
}

/// Shortest distance found by trying every simple path.
pub fn brute_force_shortest(store: &GraphStore<Weight>, source: &str, target: &str) -> Option<f64> {
    fn walk(
        store: &GraphStore<Weight>,
        current: &str,
        target: &str,
        visited: &mut HashSet<String>,
        so_far: f64,
        best: &mut Option<f64>,
    ) {
        if current == target {
            *best = Some(best.map_or(so_far, |b: f64| b.min(so_far)));
            return;
        }
        for edge in store.edges() {
            let next = if edge.from == current {
                &edge.to
            } else if edge.to == current {
                &edge.from
            } else {
                continue;
            };
            if visited.insert(next.clone()) {
                walk(store, next, target, visited, so_far + edge.attr.0, best);
                visited.remove(next);
            }
        }
    }

    let mut best = None;
    let mut visited = HashSet::from([source.to_string()]);
    walk(store, source, target, &mut visited, 0.0, &mut best);
    best
}

/// Capacity of the smallest cut separating `source` from `sink`, found by
/// enumerating every node subset.
pub fn min_cut_capacity(store: &GraphStore<Capacity>, source: &str, sink: &str) -> u128 {
    let nodes: Vec<&str> = store.nodes().filter(|&n| n != source && n != sink).collect();
    let mut best = u128::MAX;
    for mask in 0u32..(1 << nodes.len()) {
        let mut side: HashSet<&str> = HashSet::from([source]);
        for (i, node) in nodes.iter().enumerate() {
            if mask & (1 << i) != 0 {
                side.insert(*node);
            }
        }
        let cut: u128 = store
            .edges()
            .iter()
            .filter(|edge| side.contains(edge.from.as_str()) && !side.contains(edge.to.as_str()))
            .map(|edge| u128::from(edge.attr.0))
            .sum();
        best = best.min(cut);
    }
    best
}
