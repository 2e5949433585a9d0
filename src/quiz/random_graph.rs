use std::collections::HashSet;
use std::ops::RangeInclusive;

use rand::Rng;
use rand::seq::index::sample;
use tracing::info;

use crate::core::{
    Capacity, EdgeAttribute, FLOW_CAPACITY_RANGE, FLOW_RANDOM_NODES, GraphStore, NodeId,
    PATH_RANDOM_NODES, PATH_WEIGHT_RANGE, Weight, letter_label,
};
use crate::error::{GeneratorError, QuizError};

/// Produces connected random quiz graphs labelled `A`, `B`, ...
pub struct RandomGraphGenerator<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomGraphGenerator<R> {
    pub fn new(rng: R) -> Self {
        RandomGraphGenerator { rng }
    }

    /// Undirected graph with weights in `5..=99`.
    pub fn path_graph(&mut self, node_count: usize) -> Result<GraphStore<Weight>, QuizError> {
        check_node_count(node_count, &PATH_RANDOM_NODES)?;
        let edges = self.undirected_edges(node_count, PATH_WEIGHT_RANGE);
        let store = build_store(node_count, edges, |value| Weight(value as f64))?;
        info!(
            nodes = store.node_count(),
            edges = store.edge_count(),
            "random path graph generated"
        );
        Ok(store)
    }

    /// Directed graph with capacities in `5..=20`. Edges are oriented at
    /// random, so some source/sink pairs end up with no directed path.
    pub fn flow_graph(&mut self, node_count: usize) -> Result<GraphStore<Capacity>, QuizError> {
        check_node_count(node_count, &FLOW_RANDOM_NODES)?;
        let edges: Vec<(NodeId, NodeId, u64)> = self
            .undirected_edges(node_count, FLOW_CAPACITY_RANGE)
            .into_iter()
            .map(|(u, v, capacity)| {
                if self.rng.gen_bool(0.5) { (u, v, capacity) } else { (v, u, capacity) }
            })
            .collect();
        let store = build_store(node_count, edges, Capacity)?;
        info!(
            nodes = store.node_count(),
            edges = store.edge_count(),
            "random flow graph generated"
        );
        Ok(store)
    }

    /// Random spanning tree plus `n/2..=n` extra edge attempts. Attempts that
    /// land on an existing pair are dropped.
    fn undirected_edges(
        &mut self,
        n: usize,
        values: RangeInclusive<u64>,
    ) -> Vec<(NodeId, NodeId, u64)> {
        let mut edges = Vec::new();
        let mut seen: HashSet<(NodeId, NodeId)> = HashSet::new();

        let mut available: Vec<NodeId> = vec![0];
        for v in 1..n {
            let u = available[self.rng.gen_range(0..available.len())];
            edges.push((u, v, self.rng.gen_range(values.clone())));
            seen.insert((u.min(v), u.max(v)));
            available.push(v);
        }

        let extra_edges = self.rng.gen_range(n / 2..=n);
        for _ in 0..extra_edges {
            let pair = sample(&mut self.rng, n, 2);
            let (u, v) = (pair.index(0), pair.index(1));
            if seen.insert((u.min(v), u.max(v))) {
                edges.push((u, v, self.rng.gen_range(values.clone())));
            }
        }
        edges
    }
}

fn check_node_count(
    requested: usize,
    bounds: &RangeInclusive<usize>,
) -> Result<(), GeneratorError> {
    if bounds.contains(&requested) {
        Ok(())
    } else {
        Err(GeneratorError::NodeCountOutOfRange {
            requested,
            min: *bounds.start(),
            max: *bounds.end(),
        })
    }
}

fn build_store<A: EdgeAttribute>(
    node_count: usize,
    edges: Vec<(NodeId, NodeId, u64)>,
    to_attr: impl Fn(u64) -> A,
) -> Result<GraphStore<A>, QuizError> {
    let mut store = GraphStore::new();
    let labels: Vec<String> = (0..node_count).filter_map(letter_label).collect();
    for label in &labels {
        store.add_node(label)?;
    }
    for (u, v, value) in edges {
        store.add_edge(&labels[u], &labels[v], to_attr(value))?;
    }
    Ok(store)
}
