//! Parallel solving of independent problem instances
//!
//! Every instance gets its own solver, so no flow state is shared between
//! queries; results are returned in input order.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::info;
use rayon::prelude::*;

use crate::algorithm::graph::MaxFlowResult;
use crate::config::SolverConfig;
use crate::error::FlowResult;
use crate::io::parser::ProblemInstance;

/// Solve each instance on the rayon thread pool
pub fn solve_batch(instances: &[ProblemInstance], config: &SolverConfig) -> Vec<FlowResult<MaxFlowResult>> {
    info!("Solving batch of {} max-flow instances", instances.len());

    instances
        .par_iter()
        .map(|instance| instance.solve(config))
        .collect()
}
