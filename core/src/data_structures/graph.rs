//! Directed capacity graph with an undirected adjacency relation
//!
//! Each physical edge registers both endpoints as neighbors of each other so
//! that the augmenting-path search can cancel flow in the reverse direction,
//! while capacity is recorded only for the ordered pair given in the input.
//! The graph is immutable once constructed.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{Capacity, NodeId};
use crate::error::{FlowError, FlowResult};

/// Input edge description prior to validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    /// Tail vertex
    pub from: NodeId,
    /// Head vertex
    pub to: NodeId,
    /// Capacity of the ordered pair (from, to)
    pub capacity: Capacity,
}

impl EdgeSpec {
    pub fn new(from: NodeId, to: NodeId, capacity: Capacity) -> Self {
        Self { from, to, capacity }
    }
}

impl From<(NodeId, NodeId, Capacity)> for EdgeSpec {
    fn from((from, to, capacity): (NodeId, NodeId, Capacity)) -> Self {
        Self::new(from, to, capacity)
    }
}

/// Capacity graph over a fixed vertex set
#[derive(Debug, Clone)]
pub struct CapacityGraph {
    /// Number of vertices, fixed at construction
    vertex_count: usize,
    /// Neighbor lists in input order; duplicates are retained
    adjacency: Vec<Vec<NodeId>>,
    /// Capacity per ordered pair; absent pairs have zero capacity
    capacity: HashMap<(NodeId, NodeId), Capacity>,
}

impl CapacityGraph {
    /// Build a graph from `edges`, validating every endpoint and capacity.
    ///
    /// Repeated edges for the same ordered pair overwrite the earlier
    /// capacity (last write wins) rather than accumulating it.
    pub fn from_edges<I, E>(vertex_count: usize, edges: I) -> FlowResult<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<EdgeSpec>,
    {
        let mut graph = Self::empty(vertex_count)?;

        for edge in edges {
            graph.insert_edge(edge.into())?;
        }

        debug!(
            "Constructed capacity graph: {} vertices, {} capacity pairs",
            graph.vertex_count,
            graph.capacity.len()
        );

        Ok(graph)
    }

    /// Graph with `vertex_count` vertices and no edges
    pub fn empty(vertex_count: usize) -> FlowResult<Self> {
        let mut adjacency = Vec::new();
        adjacency
            .try_reserve_exact(vertex_count)
            .map_err(|_| FlowError::GraphTooLarge { vertex_count })?;
        adjacency.resize_with(vertex_count, Vec::new);

        Ok(Self {
            vertex_count,
            adjacency,
            capacity: HashMap::new(),
        })
    }

    fn insert_edge(&mut self, edge: EdgeSpec) -> FlowResult<()> {
        self.check_vertex(edge.from)?;
        self.check_vertex(edge.to)?;

        if edge.capacity < 0 {
            return Err(FlowError::InvalidCapacity {
                from: edge.from,
                to: edge.to,
                capacity: edge.capacity,
            });
        }

        self.adjacency[edge.from].push(edge.to);
        self.adjacency[edge.to].push(edge.from);

        if let Some(previous) = self.capacity.insert((edge.from, edge.to), edge.capacity) {
            warn!(
                "Duplicate edge {} -> {}: capacity {} replaced by {}",
                edge.from, edge.to, previous, edge.capacity
            );
        }

        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of ordered pairs carrying an explicit capacity
    pub fn edge_count(&self) -> usize {
        self.capacity.len()
    }

    #[inline]
    pub fn contains_vertex(&self, vertex: NodeId) -> bool {
        vertex < self.vertex_count
    }

    /// Reject vertex indices outside `[0, n)`
    pub fn check_vertex(&self, vertex: NodeId) -> FlowResult<()> {
        if self.contains_vertex(vertex) {
            Ok(())
        } else {
            Err(FlowError::InvalidVertexIndex {
                vertex: i64::try_from(vertex).unwrap_or(i64::MAX),
                vertex_count: self.vertex_count,
            })
        }
    }

    /// Neighbors of `vertex` in both edge directions
    #[inline]
    pub fn neighbors(&self, vertex: NodeId) -> &[NodeId] {
        &self.adjacency[vertex]
    }

    /// Capacity of the ordered pair, zero when no edge sets it
    #[inline]
    pub fn capacity(&self, from: NodeId, to: NodeId) -> Capacity {
        self.capacity.get(&(from, to)).copied().unwrap_or(0)
    }

    /// All explicit capacity entries in unspecified order
    pub fn capacities(&self) -> impl Iterator<Item = (NodeId, NodeId, Capacity)> + '_ {
        self.capacity.iter().map(|(&(from, to), &capacity)| (from, to, capacity))
    }

    /// Sum of capacities leaving `vertex`; an upper bound on any flow from it
    pub fn outgoing_capacity(&self, vertex: NodeId) -> Capacity {
        self.capacities()
            .filter(|&(from, _, _)| from == vertex)
            .fold(0, |total: Capacity, (_, _, capacity)| total.saturating_add(capacity))
    }

    /// Total capacity of pairs leaving the marked side of a vertex partition
    pub fn cut_capacity(&self, source_side: &[bool]) -> Capacity {
        let inside = |vertex: NodeId| source_side.get(vertex).copied().unwrap_or(false);
        self.capacities()
            .filter(|&(from, to, _)| inside(from) && !inside(to))
            .fold(0, |total: Capacity, (_, _, capacity)| total.saturating_add(capacity))
    }
}
