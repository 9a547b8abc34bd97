//! Owned graph containers sized to the input vertex count
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod flow;
pub mod graph;

pub use self::flow::FlowMatrix;
pub use self::graph::{CapacityGraph, EdgeSpec};

/// Vertex index in `[0, n)`
pub type NodeId = usize;

/// Edge capacity, non-negative by construction
pub type Capacity = i64;

/// Signed flow value; negative entries record flow pushed in the reverse direction
pub type Flow = i64;
