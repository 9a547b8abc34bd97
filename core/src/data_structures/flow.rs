//! Antisymmetric flow matrix keyed by ordered vertex pair
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;

use super::{Capacity, CapacityGraph, Flow, NodeId};

/// Current flow assignment; `flow(u, v) == -flow(v, u)` for every pair
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowMatrix {
    flows: HashMap<(NodeId, NodeId), Flow>,
}

impl FlowMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flow on the ordered pair, zero if never touched
    #[inline]
    pub fn get(&self, from: NodeId, to: NodeId) -> Flow {
        self.flows.get(&(from, to)).copied().unwrap_or(0)
    }

    /// Push `amount` along `from -> to`, updating the reverse entry in step
    pub fn push(&mut self, from: NodeId, to: NodeId, amount: Flow) {
        *self.flows.entry((from, to)).or_insert(0) += amount;
        *self.flows.entry((to, from)).or_insert(0) -= amount;
    }

    /// Residual capacity `capacity(u, v) - flow(u, v)`
    #[inline]
    pub fn residual(&self, graph: &CapacityGraph, from: NodeId, to: NodeId) -> Capacity {
        graph.capacity(from, to).saturating_sub(self.get(from, to))
    }

    pub fn reset(&mut self) {
        self.flows.clear();
    }

    /// Every stored entry, including pairs whose flow returned to zero
    pub fn entries(&self) -> impl Iterator<Item = ((NodeId, NodeId), Flow)> + '_ {
        self.flows.iter().map(|(&pair, &flow)| (pair, flow))
    }

    /// Net flow leaving `vertex`
    pub fn net_outflow(&self, vertex: NodeId) -> Flow {
        self.entries()
            .filter(|&((from, _), _)| from == vertex)
            .map(|(_, flow)| flow)
            .sum()
    }

    /// Net outflow of every vertex in one pass
    pub fn net_outflows(&self, vertex_count: usize) -> Vec<Flow> {
        let mut outflow = vec![0; vertex_count];
        for ((from, _), flow) in self.entries() {
            if let Some(slot) = outflow.get_mut(from) {
                *slot += flow;
            }
        }
        outflow
    }
}
