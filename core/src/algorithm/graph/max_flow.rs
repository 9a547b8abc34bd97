//! Maximum Flow Algorithm Implementation
//!
//! Ford-Fulkerson with depth-first augmenting paths over a residual graph.
//! The solver owns an immutable capacity graph and a flow matrix that is
//! reset at the start of every computation, so repeated calls on the same
//! instance are independent of each other.
//!
//! Each iteration of the outer loop either raises the total by a positive
//! integer bottleneck or terminates; the total is bounded by the capacity
//! leaving the source, so the loop ends. When it ends no augmenting path
//! remains and the flow is maximum by the max-flow/min-cut theorem.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::VecDeque;
use std::time::Instant;

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::search::{AugmentingPath, PathSearch};
use crate::algorithm::traits::Algorithm;
use crate::config::{SearchStrategy, SolverConfig};
use crate::data_structures::{Capacity, CapacityGraph, EdgeSpec, Flow, FlowMatrix, NodeId};
use crate::error::{FlowError, FlowResult};
use crate::validation::correctness::check_invariants;

const PARAMETER_NAMES: &[&str] = &["strategy", "deadline_ms", "verify_invariants", "record_paths"];

/// Maximum flow solver over a fixed capacity graph
#[derive(Debug, Clone)]
pub struct MaxFlowSolver {
    /// Capacity graph, immutable after construction
    graph: CapacityGraph,
    /// Flow left by the most recent computation
    flows: FlowMatrix,
    /// Solver parameters
    config: SolverConfig,
    /// Terminals of the last computation that ran to completion
    last_run: Option<(NodeId, NodeId)>,
}

/// Minimum cut derived from the final residual graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinCut {
    /// Vertices reachable from the source in the residual graph
    pub source_side: Vec<NodeId>,
    /// Saturated pairs crossing from the source side, sorted
    pub edges: Vec<EdgeSpec>,
    /// Total capacity of the crossing pairs
    pub capacity: Capacity,
}

/// Counters collected during one computation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowMetrics {
    /// Augmenting paths pushed
    pub augmentations: usize,
    /// Path searches started, including the final unsuccessful one
    pub searches: usize,
    /// Vertices marked visited across all searches
    pub vertices_marked: usize,
    /// Wall-clock time of the computation
    pub execution_time_ms: f64,
}

/// Maximum flow result with detailed flow information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxFlowResult {
    /// Maximum flow value
    pub max_flow: Flow,
    pub source: NodeId,
    pub sink: NodeId,
    /// Search strategy that produced the flow
    pub strategy: SearchStrategy,
    /// Augmenting paths in the order they were pushed; empty unless recorded
    pub augmenting_paths: Vec<AugmentingPath>,
    /// Minimum cut; absent when source and sink coincide
    pub min_cut: Option<MinCut>,
    /// Algorithm performance metrics
    pub metrics: FlowMetrics,
}

#[derive(Debug, Default)]
struct Outcome {
    value: Flow,
    paths: Vec<AugmentingPath>,
    metrics: FlowMetrics,
}

impl MaxFlowSolver {
    pub fn new(graph: CapacityGraph) -> Self {
        Self::with_config(graph, SolverConfig::default())
    }

    pub fn with_config(graph: CapacityGraph, config: SolverConfig) -> Self {
        Self {
            graph,
            flows: FlowMatrix::new(),
            config,
            last_run: None,
        }
    }

    /// Build the capacity graph and wrap it in a solver with default settings
    pub fn from_edges<I, E>(vertex_count: usize, edges: I) -> FlowResult<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<EdgeSpec>,
    {
        Ok(Self::new(CapacityGraph::from_edges(vertex_count, edges)?))
    }

    pub fn graph(&self) -> &CapacityGraph {
        &self.graph
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SolverConfig) {
        self.config = config;
    }

    /// Maximum flow value from `source` to `sink`
    pub fn max_flow(&mut self, source: NodeId, sink: NodeId) -> FlowResult<Flow> {
        let outcome = self.run(source, sink)?;
        if self.config.verify_invariants {
            check_invariants(&self.graph, &self.flows, source, sink)?;
        }
        Ok(outcome.value)
    }

    /// Full computation: value, optional paths, minimum cut and metrics
    pub fn solve(&mut self, source: NodeId, sink: NodeId) -> FlowResult<MaxFlowResult> {
        let outcome = self.run(source, sink)?;
        let min_cut = self.min_cut();

        if self.config.verify_invariants {
            check_invariants(&self.graph, &self.flows, source, sink)?;
            if let Some(cut) = &min_cut {
                if cut.capacity != outcome.value {
                    return Err(FlowError::InvariantViolation(format!(
                        "minimum cut capacity {} differs from flow value {}",
                        cut.capacity, outcome.value
                    )));
                }
            }
        }

        Ok(MaxFlowResult {
            max_flow: outcome.value,
            source,
            sink,
            strategy: self.config.strategy,
            augmenting_paths: outcome.paths,
            min_cut,
            metrics: outcome.metrics,
        })
    }

    fn run(&mut self, source: NodeId, sink: NodeId) -> FlowResult<Outcome> {
        self.graph.check_vertex(source)?;
        self.graph.check_vertex(sink)?;

        self.last_run = None;
        self.flows.reset();

        let started = Instant::now();
        let deadline = self.config.deadline();
        let strategy = self.config.strategy;
        let mut outcome = Outcome::default();

        info!(
            "Solving max flow {} -> {} over {} vertices ({} search)",
            source,
            sink,
            self.graph.vertex_count(),
            strategy
        );

        if source == sink {
            debug!("Source and sink coincide; flow is zero");
            outcome.metrics.execution_time_ms = started.elapsed().as_secs_f64() * 1000.0;
            self.last_run = Some((source, sink));
            return Ok(outcome);
        }

        let mut search = PathSearch::new(&self.graph, sink);

        loop {
            if let Some(limit) = deadline {
                let elapsed = started.elapsed();
                if elapsed >= limit {
                    return Err(FlowError::DeadlineExceeded {
                        elapsed_ms: elapsed.as_millis(),
                        augmentations: outcome.metrics.augmentations,
                        partial_flow: outcome.value,
                    });
                }
            }

            outcome.metrics.searches += 1;
            let Some(path) = search.augment(strategy, &mut self.flows, source) else {
                break;
            };

            outcome.value = outcome
                .value
                .checked_add(path.bottleneck)
                .ok_or(FlowError::FlowOverflow)?;
            outcome.metrics.augmentations += 1;
            trace!("Augmenting path {:?} carries {}", path.vertices, path.bottleneck);

            if self.config.record_paths {
                outcome.paths.push(path);
            }
        }

        outcome.metrics.vertices_marked = search.marked();
        outcome.metrics.execution_time_ms = started.elapsed().as_secs_f64() * 1000.0;
        self.last_run = Some((source, sink));

        info!(
            "Maximum flow {} after {} augmentations",
            outcome.value, outcome.metrics.augmentations
        );

        Ok(outcome)
    }

    /// Flow on `from -> to` left by the last computation
    pub fn flow(&self, from: NodeId, to: NodeId) -> Flow {
        self.flows.get(from, to)
    }

    /// Residual capacity of `from -> to` left by the last computation
    pub fn residual(&self, from: NodeId, to: NodeId) -> Capacity {
        self.flows.residual(&self.graph, from, to)
    }

    pub fn net_outflow(&self, vertex: NodeId) -> Flow {
        self.flows.net_outflow(vertex)
    }

    pub fn flows(&self) -> &FlowMatrix {
        &self.flows
    }

    /// Minimum cut of the last completed computation.
    ///
    /// `None` before any computation has completed and when the last one had
    /// coinciding source and sink.
    pub fn min_cut(&self) -> Option<MinCut> {
        let (source, sink) = self.last_run?;
        if source == sink {
            return None;
        }

        let mut reachable = vec![false; self.graph.vertex_count()];
        let mut queue = VecDeque::from([source]);
        reachable[source] = true;

        while let Some(vertex) = queue.pop_front() {
            for &next in self.graph.neighbors(vertex) {
                if !reachable[next] && self.residual(vertex, next) > 0 {
                    reachable[next] = true;
                    queue.push_back(next);
                }
            }
        }

        let mut edges: Vec<EdgeSpec> = self
            .graph
            .capacities()
            .filter(|&(from, to, capacity)| reachable[from] && !reachable[to] && capacity > 0)
            .map(EdgeSpec::from)
            .collect();
        edges.sort_by_key(|edge| (edge.from, edge.to));

        let source_side = reachable
            .iter()
            .enumerate()
            .filter_map(|(vertex, &inside)| inside.then_some(vertex))
            .collect();

        Some(MinCut {
            source_side,
            capacity: self.graph.cut_capacity(&reachable),
            edges,
        })
    }
}

fn parse_flag(name: &str, value: &str) -> FlowResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(FlowError::invalid_parameter(name, "expected a boolean")),
    }
}

impl Algorithm for MaxFlowSolver {
    fn name(&self) -> &str {
        "Ford-Fulkerson"
    }

    fn category(&self) -> &str {
        "max_flow"
    }

    fn description(&self) -> &str {
        "Ford-Fulkerson maximum flow with depth-first augmenting paths over the residual graph, \
         reporting the flow value together with a minimum cut."
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        PARAMETER_NAMES
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> FlowResult<()> {
        match name {
            "strategy" => {
                self.config.strategy = value.parse()?;
            }
            "deadline_ms" => {
                let value = value.trim();
                self.config.deadline_ms = if value.eq_ignore_ascii_case("none") {
                    None
                } else {
                    Some(value.parse::<u64>().map_err(|_| {
                        FlowError::invalid_parameter(name, "deadline_ms must be a non-negative integer or 'none'")
                    })?)
                };
            }
            "verify_invariants" => {
                self.config.verify_invariants = parse_flag(name, value)?;
            }
            "record_paths" => {
                self.config.record_paths = parse_flag(name, value)?;
            }
            _ => return Err(FlowError::invalid_parameter(name, "unknown parameter")),
        }
        Ok(())
    }

    fn get_parameter(&self, name: &str) -> Option<String> {
        match name {
            "strategy" => Some(self.config.strategy.to_string()),
            "deadline_ms" => Some(
                self.config
                    .deadline_ms
                    .map_or_else(|| "none".to_string(), |ms| ms.to_string()),
            ),
            "verify_invariants" => Some(self.config.verify_invariants.to_string()),
            "record_paths" => Some(self.config.record_paths.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::correctness::brute_force_min_cut;
    use proptest::prelude::*;
    use std::time::Duration;

    fn diamond() -> MaxFlowSolver {
        MaxFlowSolver::from_edges(4, [(0, 1, 3), (0, 2, 2), (1, 3, 2), (2, 3, 3)]).unwrap()
    }

    #[test]
    fn test_diamond_network() {
        let mut solver = diamond();
        assert_eq!(solver.max_flow(0, 3).unwrap(), 4);
    }

    #[test]
    fn test_single_edge() {
        let mut solver = MaxFlowSolver::from_edges(2, [(0, 1, 5)]).unwrap();
        assert_eq!(solver.max_flow(0, 1).unwrap(), 5);
        // Capacity is directional
        assert_eq!(solver.max_flow(1, 0).unwrap(), 0);
    }

    #[test]
    fn test_no_edges() {
        let mut solver = MaxFlowSolver::new(CapacityGraph::empty(3).unwrap());
        assert_eq!(solver.max_flow(0, 2).unwrap(), 0);
    }

    #[test]
    fn test_source_equals_sink() {
        let mut solver = diamond();
        assert_eq!(solver.max_flow(2, 2).unwrap(), 0);
        assert!(solver.flows().entries().all(|(_, flow)| flow == 0));
        assert!(solver.min_cut().is_none());
    }

    #[test]
    fn test_disconnected_components() {
        let mut solver = MaxFlowSolver::from_edges(5, [(0, 1, 4), (1, 0, 4), (3, 4, 9)]).unwrap();
        assert_eq!(solver.max_flow(0, 4).unwrap(), 0);
    }

    #[test]
    fn test_repeated_calls_are_idempotent() {
        let mut solver = diamond();
        let first = solver.max_flow(0, 3).unwrap();
        let second = solver.max_flow(0, 3).unwrap();
        assert_eq!(first, second);

        // A different query in between must not leak flow into the next one
        solver.max_flow(1, 2).unwrap();
        assert_eq!(solver.max_flow(0, 3).unwrap(), first);
    }

    #[test]
    fn test_out_of_range_terminals_are_rejected() {
        let mut solver = diamond();
        assert!(matches!(
            solver.max_flow(0, 4),
            Err(FlowError::InvalidVertexIndex { vertex: 4, vertex_count: 4 })
        ));
        assert!(matches!(
            solver.solve(9, 0),
            Err(FlowError::InvalidVertexIndex { vertex: 9, .. })
        ));
    }

    #[test]
    fn test_self_loops_carry_no_flow() {
        let mut solver = MaxFlowSolver::from_edges(3, [(1, 1, 50), (0, 1, 2), (1, 2, 7)]).unwrap();
        assert_eq!(solver.max_flow(0, 2).unwrap(), 2);
        assert_eq!(solver.flow(1, 1), 0);
    }

    #[test]
    fn test_duplicate_edge_keeps_last_capacity() {
        let mut solver = MaxFlowSolver::from_edges(2, [(0, 1, 9), (0, 1, 4)]).unwrap();
        assert_eq!(solver.max_flow(0, 1).unwrap(), 4);
    }

    #[test]
    fn test_antiparallel_edges() {
        let mut solver = MaxFlowSolver::from_edges(3, [(0, 1, 6), (1, 0, 6), (1, 2, 4), (2, 1, 1)]).unwrap();
        assert_eq!(solver.max_flow(0, 2).unwrap(), 4);
        assert_eq!(solver.max_flow(2, 0).unwrap(), 1);
    }

    #[test]
    fn test_solve_reports_min_cut_and_metrics() {
        let mut solver = diamond();
        let result = solver.solve(0, 3).unwrap();

        assert_eq!(result.max_flow, 4);
        assert_eq!(result.metrics.augmentations, result.metrics.searches - 1);
        assert!(result.augmenting_paths.is_empty());

        let cut = result.min_cut.unwrap();
        assert_eq!(cut.capacity, 4);
        assert!(cut.source_side.contains(&0));
        assert!(!cut.source_side.contains(&3));
        assert_eq!(
            cut.edges.iter().map(|edge| edge.capacity).sum::<Capacity>(),
            cut.capacity
        );
    }

    #[test]
    fn test_recorded_paths_sum_to_flow() {
        let config = SolverConfig::default().with_recorded_paths(true);
        let graph = CapacityGraph::from_edges(4, [(0, 1, 3), (0, 2, 2), (1, 3, 2), (2, 3, 3)]).unwrap();
        let mut solver = MaxFlowSolver::with_config(graph, config);

        let result = solver.solve(0, 3).unwrap();
        assert_eq!(result.augmenting_paths.len(), result.metrics.augmentations);
        assert_eq!(
            result.augmenting_paths.iter().map(|path| path.bottleneck).sum::<Flow>(),
            result.max_flow
        );
        for path in &result.augmenting_paths {
            assert_eq!(path.vertices.first(), Some(&0));
            assert_eq!(path.vertices.last(), Some(&3));
        }
    }

    #[test]
    fn test_zero_deadline_is_exceeded() {
        let config = SolverConfig::default().with_deadline(Duration::ZERO);
        let graph = CapacityGraph::from_edges(2, [(0, 1, 5)]).unwrap();
        let mut solver = MaxFlowSolver::with_config(graph, config);

        assert!(matches!(
            solver.max_flow(0, 1),
            Err(FlowError::DeadlineExceeded { augmentations: 0, partial_flow: 0, .. })
        ));
        assert!(solver.min_cut().is_none());
    }

    #[test]
    fn test_huge_capacities_overflow_is_reported() {
        let mut solver = MaxFlowSolver::from_edges(
            4,
            [(0, 1, Capacity::MAX), (0, 2, Capacity::MAX), (1, 3, Capacity::MAX), (2, 3, Capacity::MAX)],
        )
        .unwrap();
        assert!(matches!(solver.max_flow(0, 3), Err(FlowError::FlowOverflow)));
    }

    #[test]
    fn test_verification_passes_on_valid_flow() {
        let graph = CapacityGraph::from_edges(4, [(0, 1, 3), (0, 2, 2), (1, 3, 2), (2, 3, 3), (1, 2, 1)]).unwrap();
        let config = SolverConfig::default().with_verification(true);
        let mut solver = MaxFlowSolver::with_config(graph, config);

        assert_eq!(solver.solve(0, 3).unwrap().max_flow, 5);
    }

    #[test]
    fn test_parameter_setting() {
        let mut solver = diamond();
        assert_eq!(solver.name(), "Ford-Fulkerson");
        assert_eq!(solver.category(), "max_flow");

        assert!(solver.set_parameter("strategy", "recursive").is_ok());
        assert_eq!(solver.get_parameter("strategy").as_deref(), Some("recursive"));

        assert!(solver.set_parameter("deadline_ms", "100").is_ok());
        assert_eq!(solver.config().deadline_ms, Some(100));
        assert!(solver.set_parameter("deadline_ms", "none").is_ok());
        assert_eq!(solver.config().deadline_ms, None);

        assert!(solver.set_parameter("record_paths", "yes").is_ok());
        assert!(solver.config().record_paths);

        // Test invalid parameters
        assert!(solver.set_parameter("invalid_param", "value").is_err());
        assert!(solver.set_parameter("deadline_ms", "-3").is_err());
        assert!(solver.set_parameter("verify_invariants", "maybe").is_err());
        assert!(solver.set_parameter("strategy", "bfs").is_err());

        let parameters = solver.parameters();
        assert_eq!(parameters.len(), 4);
        assert_eq!(parameters["record_paths"], "true");
    }

    fn arbitrary_network() -> impl Strategy<Value = (usize, Vec<(usize, usize, i64)>, usize, usize)> {
        (2usize..8).prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec((0..n, 0..n, 0i64..20), 0..20),
                0..n,
                0..n,
            )
        })
    }

    proptest! {
        #[test]
        fn test_flow_equals_brute_force_min_cut((n, edges, source, sink) in arbitrary_network()) {
            let mut solver = MaxFlowSolver::from_edges(n, edges).unwrap();
            let value = solver.max_flow(source, sink).unwrap();
            let cut = brute_force_min_cut(solver.graph(), source, sink).unwrap();
            prop_assert_eq!(value, cut);
        }

        #[test]
        fn test_flow_invariants_hold((n, edges, source, sink) in arbitrary_network()) {
            let mut solver = MaxFlowSolver::from_edges(n, edges).unwrap();
            let value = solver.max_flow(source, sink).unwrap();

            prop_assert!(check_invariants(solver.graph(), solver.flows(), source, sink).is_ok());
            for ((from, to), flow) in solver.flows().entries() {
                prop_assert_eq!(flow, -solver.flow(to, from));
                prop_assert!(solver.residual(from, to) >= 0);
            }
            if source != sink {
                prop_assert_eq!(solver.net_outflow(source), value);
                prop_assert_eq!(solver.net_outflow(sink), -value);
            }
        }

        #[test]
        fn test_strategies_agree((n, edges, source, sink) in arbitrary_network()) {
            let graph = CapacityGraph::from_edges(n, edges).unwrap();
            let mut recursive = MaxFlowSolver::with_config(
                graph.clone(),
                SolverConfig::default().with_strategy(SearchStrategy::Recursive),
            );
            let mut iterative = MaxFlowSolver::with_config(
                graph,
                SolverConfig::default().with_strategy(SearchStrategy::Iterative),
            );

            prop_assert_eq!(
                recursive.max_flow(source, sink).unwrap(),
                iterative.max_flow(source, sink).unwrap()
            );
            prop_assert_eq!(recursive.flows(), iterative.flows());
        }

        #[test]
        fn test_min_cut_matches_flow((n, edges, source, sink) in arbitrary_network()) {
            prop_assume!(source != sink);
            let mut solver = MaxFlowSolver::from_edges(n, edges).unwrap();
            let result = solver.solve(source, sink).unwrap();
            let cut = result.min_cut.unwrap();

            prop_assert_eq!(cut.capacity, result.max_flow);
            prop_assert!(cut.source_side.contains(&source));
            prop_assert!(!cut.source_side.contains(&sink));
        }
    }
}
