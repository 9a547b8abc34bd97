//! Whitespace-separated problem input
//!
//! Format, consumed in order: `n m`, then `m` triples `u v c`, then `s t`.
//! Token positions in error reports are 1-based.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::io::Read;
use std::str::{FromStr, SplitWhitespace};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::algorithm::graph::{MaxFlowResult, MaxFlowSolver};
use crate::config::SolverConfig;
use crate::data_structures::{CapacityGraph, EdgeSpec, NodeId};
use crate::error::{FlowError, FlowResult};

/// Upper bound on edge storage reserved up front from the declared edge count
const EDGE_PREALLOCATION_LIMIT: usize = 1 << 16;

/// One max-flow query: a network plus its terminals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemInstance {
    pub vertex_count: usize,
    pub edges: Vec<EdgeSpec>,
    pub source: NodeId,
    pub sink: NodeId,
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
    /// Tokens consumed so far
    consumed: usize,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            inner: input.split_whitespace(),
            consumed: 0,
        }
    }

    fn next_integer(&mut self, expected: &'static str) -> FlowResult<i64> {
        self.consumed += 1;
        let position = self.consumed;

        match self.inner.next() {
            None => Err(FlowError::MalformedInput {
                position,
                expected,
                found: "end of input".to_string(),
            }),
            Some(token) => token.parse::<i64>().map_err(|_| FlowError::MalformedInput {
                position,
                expected,
                found: format!("{:?}", token),
            }),
        }
    }

    fn next_count(&mut self, expected: &'static str) -> FlowResult<usize> {
        let value = self.next_integer(expected)?;
        usize::try_from(value).map_err(|_| FlowError::MalformedInput {
            position: self.consumed,
            expected,
            found: value.to_string(),
        })
    }

    fn next_vertex(&mut self, expected: &'static str, vertex_count: usize) -> FlowResult<NodeId> {
        let value = self.next_integer(expected)?;
        usize::try_from(value)
            .ok()
            .filter(|&vertex| vertex < vertex_count)
            .ok_or(FlowError::InvalidVertexIndex {
                vertex: value,
                vertex_count,
            })
    }

    fn remaining(self) -> usize {
        self.inner.count()
    }
}

impl ProblemInstance {
    /// Parse and validate the textual input format
    pub fn parse(input: &str) -> FlowResult<Self> {
        let mut tokens = Tokens::new(input);

        let vertex_count = tokens.next_count("vertex count")?;
        let edge_count = tokens.next_count("edge count")?;

        let mut edges = Vec::with_capacity(edge_count.min(EDGE_PREALLOCATION_LIMIT));
        for _ in 0..edge_count {
            let from = tokens.next_vertex("edge tail vertex", vertex_count)?;
            let to = tokens.next_vertex("edge head vertex", vertex_count)?;
            let capacity = tokens.next_integer("edge capacity")?;
            if capacity < 0 {
                return Err(FlowError::InvalidCapacity { from, to, capacity });
            }
            edges.push(EdgeSpec::new(from, to, capacity));
        }

        let source = tokens.next_vertex("source vertex", vertex_count)?;
        let sink = tokens.next_vertex("sink vertex", vertex_count)?;

        let trailing = tokens.remaining();
        if trailing > 0 {
            debug!("Ignoring {} trailing tokens after sink", trailing);
        }

        Ok(Self {
            vertex_count,
            edges,
            source,
            sink,
        })
    }

    pub fn from_reader<R: Read>(mut reader: R) -> FlowResult<Self> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Self::parse(&input)
    }

    /// Validate the edges and terminals, then build the capacity graph
    pub fn build_graph(&self) -> FlowResult<CapacityGraph> {
        let graph = CapacityGraph::from_edges(self.vertex_count, self.edges.iter().copied())?;
        graph.check_vertex(self.source)?;
        graph.check_vertex(self.sink)?;
        Ok(graph)
    }

    pub fn solver(&self, config: SolverConfig) -> FlowResult<MaxFlowSolver> {
        Ok(MaxFlowSolver::with_config(self.build_graph()?, config))
    }

    /// Solve this instance on a fresh solver
    pub fn solve(&self, config: &SolverConfig) -> FlowResult<MaxFlowResult> {
        self.solver(config.clone())?.solve(self.source, self.sink)
    }
}

impl FromStr for ProblemInstance {
    type Err = FlowError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input)
    }
}
