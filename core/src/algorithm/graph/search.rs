//! Depth-first augmenting-path search over the residual graph
//!
//! Both strategies visit neighbors in adjacency order, skip visited vertices
//! and saturated pairs, and stop at the first neighbor that reaches the sink.
//! A vertex that dead-ends stays visited until the next search.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

use crate::config::SearchStrategy;
use crate::data_structures::{CapacityGraph, Flow, FlowMatrix, NodeId};

/// Path found by one search together with the flow pushed along it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentingPath {
    /// Vertices from source to sink
    pub vertices: Vec<NodeId>,
    /// Minimum residual capacity along the path
    pub bottleneck: Flow,
}

/// Pending DFS frame for the iterative strategy
#[derive(Debug, Clone, Copy)]
struct Frame {
    vertex: NodeId,
    bottleneck: Flow,
    /// Index of the next neighbor to examine
    cursor: usize,
}

impl Frame {
    fn new(vertex: NodeId, bottleneck: Flow) -> Self {
        Self { vertex, bottleneck, cursor: 0 }
    }
}

/// Reusable search state for one source/sink computation
#[derive(Debug)]
pub(crate) struct PathSearch<'g> {
    graph: &'g CapacityGraph,
    sink: NodeId,
    visited: Vec<bool>,
    /// Vertices marked visited across all searches so far
    marked: usize,
}

impl<'g> PathSearch<'g> {
    pub(crate) fn new(graph: &'g CapacityGraph, sink: NodeId) -> Self {
        Self {
            graph,
            sink,
            visited: vec![false; graph.vertex_count()],
            marked: 0,
        }
    }

    pub(crate) fn marked(&self) -> usize {
        self.marked
    }

    /// Find one augmenting path from `source` and push its bottleneck.
    ///
    /// Returns `None` once the residual graph has no source-sink path.
    pub(crate) fn augment(
        &mut self,
        strategy: SearchStrategy,
        flows: &mut FlowMatrix,
        source: NodeId,
    ) -> Option<AugmentingPath> {
        self.visited.fill(false);
        let mut vertices = Vec::new();

        let bottleneck = match strategy {
            SearchStrategy::Recursive => {
                let pushed = self.descend(flows, source, Flow::MAX, &mut vertices);
                vertices.reverse();
                pushed
            }
            SearchStrategy::Iterative => self.walk(flows, source, &mut vertices),
        };

        (bottleneck > 0).then_some(AugmentingPath { vertices, bottleneck })
    }

    fn mark(&mut self, vertex: NodeId) {
        self.visited[vertex] = true;
        self.marked += 1;
    }

    /// Recursive form; `trail` is filled sink-first on the way back up
    fn descend(
        &mut self,
        flows: &mut FlowMatrix,
        current: NodeId,
        bottleneck: Flow,
        trail: &mut Vec<NodeId>,
    ) -> Flow {
        if current == self.sink {
            trail.push(current);
            return bottleneck;
        }
        self.mark(current);

        let graph = self.graph;
        for &next in graph.neighbors(current) {
            if self.visited[next] {
                continue;
            }
            let residual = flows.residual(graph, current, next);
            if residual <= 0 {
                continue;
            }

            let pushed = self.descend(flows, next, bottleneck.min(residual), trail);
            if pushed > 0 {
                flows.push(current, next, pushed);
                trail.push(current);
                return pushed;
            }
        }

        0
    }

    /// Explicit-stack form; `trail` is filled source-first
    fn walk(&mut self, flows: &mut FlowMatrix, source: NodeId, trail: &mut Vec<NodeId>) -> Flow {
        let graph = self.graph;
        let mut stack = vec![Frame::new(source, Flow::MAX)];

        while let Some(top) = stack.last_mut() {
            if top.vertex == self.sink {
                let pushed = top.bottleneck;
                stack.pop();

                // Each remaining frame's cursor sits one past the neighbor it descended into
                for frame in &stack {
                    let next = graph.neighbors(frame.vertex)[frame.cursor - 1];
                    flows.push(frame.vertex, next, pushed);
                    trail.push(frame.vertex);
                }
                trail.push(self.sink);
                return pushed;
            }

            if top.cursor == 0 {
                self.visited[top.vertex] = true;
                self.marked += 1;
            }

            let neighbors = graph.neighbors(top.vertex);
            let Some(&next) = neighbors.get(top.cursor) else {
                stack.pop();
                continue;
            };
            top.cursor += 1;

            if self.visited[next] {
                continue;
            }
            let residual = flows.residual(graph, top.vertex, next);
            if residual <= 0 {
                continue;
            }

            let bottleneck = top.bottleneck.min(residual);
            stack.push(Frame::new(next, bottleneck));
        }

        0
    }
}
