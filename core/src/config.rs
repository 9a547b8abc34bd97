//! Solver configuration
//!
//! Configuration is loaded from JSON and can be adjusted afterwards through the
//! string-keyed parameter interface of [`crate::algorithm::Algorithm`].
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FlowError, FlowResult};

/// Augmenting-path search implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    /// Recursive depth-first search; depth bounded by the vertex count
    Recursive,
    /// Explicit frame stack with identical path selection
    #[default]
    Iterative,
}

impl SearchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchStrategy::Recursive => "recursive",
            SearchStrategy::Iterative => "iterative",
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchStrategy {
    type Err = FlowError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "recursive" => Ok(SearchStrategy::Recursive),
            "iterative" => Ok(SearchStrategy::Iterative),
            other => Err(FlowError::invalid_parameter(
                "strategy",
                format!("expected 'recursive' or 'iterative', got '{}'", other),
            )),
        }
    }
}

/// Tunable solver behaviour
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Augmenting-path search implementation
    pub strategy: SearchStrategy,
    /// Wall-clock budget for one computation, checked between augmentations
    pub deadline_ms: Option<u64>,
    /// Verify conservation, antisymmetry and residual bounds after each solve
    pub verify_invariants: bool,
    /// Keep the vertex sequence of every augmenting path in the result
    pub record_paths: bool,
}

impl SolverConfig {
    pub fn from_json_str(json: &str) -> FlowResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> FlowResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline_ms = Some(u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn with_verification(mut self, enabled: bool) -> Self {
        self.verify_invariants = enabled;
        self
    }

    pub fn with_recorded_paths(mut self, enabled: bool) -> Self {
        self.record_paths = enabled;
        self
    }
}
