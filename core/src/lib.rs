//! Ford-Fulkerson maximum flow over residual capacity graphs
//!
//! The crate is organised the way the computation flows: input is parsed into
//! a [`ProblemInstance`], validated into a [`CapacityGraph`], and solved by a
//! [`MaxFlowSolver`] that repeatedly pushes flow along depth-first augmenting
//! paths until the residual graph disconnects source from sink.
//!
//! ```
//! use maxflow_core::MaxFlowSolver;
//!
//! let mut solver = MaxFlowSolver::from_edges(4, [(0, 1, 3), (0, 2, 2), (1, 3, 2), (2, 3, 3)])?;
//! assert_eq!(solver.max_flow(0, 3)?, 4);
//! # Ok::<(), maxflow_core::FlowError>(())
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod config;
pub mod data_structures;
pub mod error;
pub mod execution;
pub mod io;
pub mod validation;

pub use algorithm::graph::{AugmentingPath, FlowMetrics, MaxFlowResult, MaxFlowSolver, MinCut};
pub use algorithm::traits::Algorithm;
pub use config::{SearchStrategy, SolverConfig};
pub use data_structures::{Capacity, CapacityGraph, EdgeSpec, Flow, FlowMatrix, NodeId};
pub use error::{FlowError, FlowResult};
pub use execution::solve_batch;
pub use io::{render_json, render_text, ProblemInstance};
