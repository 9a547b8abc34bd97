//! Graph algorithms over capacity networks
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod max_flow;
pub mod search;

pub use self::max_flow::{FlowMetrics, MaxFlowResult, MaxFlowSolver, MinCut};
pub use self::search::AugmentingPath;
