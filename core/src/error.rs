//! Error taxonomy for flow network construction, parsing and solving
//!
//! Every failure is reported before any augmenting-path search begins, except
//! for deadline expiry and accumulator overflow which can only be observed
//! while the outer loop is running.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use thiserror::Error;

use crate::data_structures::{Capacity, Flow};

/// Result alias used throughout the crate
pub type FlowResult<T> = Result<T, FlowError>;

/// Comprehensive error types for maximum flow operations
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("invalid vertex index {vertex}: graph has {vertex_count} vertices")]
    InvalidVertexIndex { vertex: i64, vertex_count: usize },

    #[error("invalid capacity {capacity} on edge {from} -> {to}: capacities must be non-negative")]
    InvalidCapacity { from: usize, to: usize, capacity: Capacity },

    #[error("malformed input at token {position}: expected {expected}, found {found}")]
    MalformedInput {
        position: usize,
        expected: &'static str,
        found: String,
    },

    #[error("invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("deadline exceeded after {elapsed_ms} ms ({augmentations} augmentations, partial flow {partial_flow})")]
    DeadlineExceeded {
        elapsed_ms: u128,
        augmentations: usize,
        partial_flow: Flow,
    },

    #[error("cannot allocate a graph with {vertex_count} vertices")]
    GraphTooLarge { vertex_count: usize },

    #[error("accumulated flow does not fit in a 64-bit integer")]
    FlowOverflow,

    #[error("flow invariant violated: {0}")]
    InvariantViolation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl FlowError {
    /// Process exit code reported by the command-line front end
    pub fn exit_code(&self) -> i32 {
        match self {
            FlowError::Io(_) | FlowError::Config(_) | FlowError::InvalidParameter { .. } => 1,
            FlowError::MalformedInput { .. } => 2,
            FlowError::InvalidVertexIndex { .. } => 3,
            FlowError::InvalidCapacity { .. } => 4,
            FlowError::DeadlineExceeded { .. } => 5,
            FlowError::FlowOverflow => 6,
            FlowError::InvariantViolation(_) => 7,
            FlowError::GraphTooLarge { .. } => 8,
        }
    }

    pub(crate) fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        FlowError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
