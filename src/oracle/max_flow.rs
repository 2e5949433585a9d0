use std::collections::VecDeque;

use petgraph::Directed;
use petgraph::algo::has_path_connecting;
use petgraph::graph::{Graph, NodeIndex};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::core::{Capacity, GraphStore, NodeId};
use crate::error::OracleError;
use crate::oracle::{convert_to_petgraph, resolve_endpoints};

/// Flow routed over one directed edge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EdgeFlow {
    pub from: String,
    pub to: String,
    pub flow: u64,
    pub capacity: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FlowAnswer {
    /// Sum of up to 26 * 25 `u64` capacities, so it can exceed `u64::MAX`.
    pub value: u128,
    /// One entry per edge of the graph, in insertion order. Empty when the
    /// sink cannot be reached at all.
    pub assignment: Vec<EdgeFlow>,
    pub sink_reachable: bool,
}

/// Maximum flow from `source` to `sink` over a directed capacitated graph.
///
/// An unreachable sink is a valid answer of zero; only arithmetic or
/// feasibility faults produce [`OracleError::FlowComputationError`].
#[instrument(
    level = "debug",
    skip(store),
    fields(nodes = store.node_count(), edges = store.edge_count())
)]
pub fn max_flow(
    store: &GraphStore<Capacity>,
    source: &str,
    sink: &str,
) -> Result<FlowAnswer, OracleError> {
    let (s, t) = resolve_endpoints(store, source, sink)?;
    let graph: Graph<String, Capacity, Directed> = convert_to_petgraph(store);

    if !has_path_connecting(&graph, NodeIndex::new(s), NodeIndex::new(t), None) {
        debug!(source, sink, "sink unreachable, flow is zero");
        return Ok(FlowAnswer {
            value: 0,
            assignment: Vec::new(),
            sink_reachable: false,
        });
    }

    let mut network = ResidualNetwork::new(store.node_count());
    for (from, to, capacity) in store.edge_ids() {
        network.add_capacity(from, to, capacity.0)?;
    }
    let value = network.edmonds_karp(s, t)?;

    let assignment = store
        .edges()
        .iter()
        .zip(store.edge_ids())
        .map(|(edge, (from, to, capacity))| {
            Ok(EdgeFlow {
                from: edge.from.clone(),
                to: edge.to.clone(),
                flow: network.assigned_flow(from, to)?,
                capacity: capacity.0,
            })
        })
        .collect::<Result<Vec<_>, OracleError>>()?;

    check_feasible(store, &assignment, source, sink, value)?;
    debug!(value, "max flow computed");
    Ok(FlowAnswer {
        value,
        assignment,
        sink_reachable: true,
    })
}

fn fault(detail: impl Into<String>) -> OracleError {
    OracleError::FlowComputationError {
        detail: detail.into(),
    }
}

/// Dense residual network. `flow` is skew-symmetric, so anti-parallel edges
/// share one net flow value that is split back per edge afterwards.
struct ResidualNetwork {
    n: usize,
    capacity: Vec<Vec<u64>>,
    flow: Vec<Vec<i128>>,
}

impl ResidualNetwork {
    fn new(n: usize) -> Self {
        ResidualNetwork {
            n,
            capacity: vec![vec![0; n]; n],
            flow: vec![vec![0; n]; n],
        }
    }

    fn add_capacity(&mut self, from: NodeId, to: NodeId, amount: u64) -> Result<(), OracleError> {
        let cell = &mut self.capacity[from][to];
        *cell = cell
            .checked_add(amount)
            .ok_or_else(|| fault(format!("capacity overflow on edge {from}->{to}")))?;
        Ok(())
    }

    fn residual(&self, from: NodeId, to: NodeId) -> i128 {
        i128::from(self.capacity[from][to]) - self.flow[from][to]
    }

    /// Shortest augmenting path by edge count, as a predecessor array.
    fn find_augmenting_path(&self, s: NodeId, t: NodeId) -> Option<Vec<Option<NodeId>>> {
        let mut predecessor = vec![None; self.n];
        let mut visited = vec![false; self.n];
        let mut queue = VecDeque::from([s]);
        visited[s] = true;

        while let Some(u) = queue.pop_front() {
            for v in 0..self.n {
                if !visited[v] && self.residual(u, v) > 0 {
                    visited[v] = true;
                    predecessor[v] = Some(u);
                    if v == t {
                        return Some(predecessor);
                    }
                    queue.push_back(v);
                }
            }
        }
        None
    }

    fn edmonds_karp(&mut self, s: NodeId, t: NodeId) -> Result<u128, OracleError> {
        // Edmonds-Karp needs at most |V| * |E| augmentations
        let max_rounds = self.n.pow(3) + 1;
        let mut rounds = 0;

        while let Some(predecessor) = self.find_augmenting_path(s, t) {
            rounds += 1;
            if rounds > max_rounds {
                return Err(fault(format!("no convergence after {max_rounds} augmentations")));
            }

            let mut bottleneck = i128::MAX;
            let mut v = t;
            while let Some(u) = predecessor[v] {
                bottleneck = bottleneck.min(self.residual(u, v));
                v = u;
            }
            if bottleneck <= 0 || v != s {
                return Err(fault("augmenting path is broken"));
            }

            let mut v = t;
            while let Some(u) = predecessor[v] {
                self.flow[u][v] += bottleneck;
                self.flow[v][u] -= bottleneck;
                v = u;
            }
        }

        let out_of_source: i128 = self.flow[s].iter().sum();
        u128::try_from(out_of_source)
            .map_err(|_| fault(format!("flow value {out_of_source} is out of range")))
    }

    /// Flow on the directed edge `from -> to`. Whatever net flow runs the
    /// other way belongs to the anti-parallel edge, if there is one.
    fn assigned_flow(&self, from: NodeId, to: NodeId) -> Result<u64, OracleError> {
        let net = self.flow[from][to].max(0);
        u64::try_from(net)
            .map_err(|_| fault(format!("flow {net} on {from}->{to} is out of range")))
    }
}

/// Capacity bounds on every edge and conservation at every inner node.
fn check_feasible(
    store: &GraphStore<Capacity>,
    assignment: &[EdgeFlow],
    source: &str,
    sink: &str,
    value: u128,
) -> Result<(), OracleError> {
    if let Some(edge) = assignment.iter().find(|edge| edge.flow > edge.capacity) {
        return Err(fault(format!(
            "edge {}->{} carries {} over capacity {}",
            edge.from, edge.to, edge.flow, edge.capacity
        )));
    }

    let balance = |label: &str| -> i128 {
        assignment
            .iter()
            .map(|edge| {
                let flow = i128::from(edge.flow);
                match (edge.from == label, edge.to == label) {
                    (true, false) => flow,
                    (false, true) => -flow,
                    _ => 0,
                }
            })
            .sum()
    };

    for label in store.nodes().filter(|&label| label != source && label != sink) {
        let net = balance(label);
        if net != 0 {
            return Err(fault(format!("flow is not conserved at `{label}` (net {net})")));
        }
    }
    if i128::try_from(value).ok() != Some(balance(source)) {
        return Err(fault("source outflow does not match the flow value"));
    }
    Ok(())
}
