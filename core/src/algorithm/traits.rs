//! Core algorithm trait definitions
//!
//! Algorithms expose a descriptive identity and a string-keyed parameter
//! interface so that front ends can adjust them without knowing their
//! concrete configuration types.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;

use crate::error::FlowResult;

/// Common interface for configurable algorithms
pub trait Algorithm {
    /// Returns the algorithm's descriptive name
    fn name(&self) -> &str;

    /// Returns the algorithm's category (e.g. max_flow)
    fn category(&self) -> &str;

    /// Returns a one-paragraph description
    fn description(&self) -> &str;

    /// Names accepted by [`Algorithm::set_parameter`]
    fn parameter_names(&self) -> &'static [&'static str];

    /// Sets algorithm parameter with type validation
    fn set_parameter(&mut self, name: &str, value: &str) -> FlowResult<()>;

    /// Gets algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<String>;

    /// Snapshot of every parameter and its current value
    fn parameters(&self) -> HashMap<String, String> {
        self.parameter_names()
            .iter()
            .filter_map(|&name| self.get_parameter(name).map(|value| (name.to_string(), value)))
            .collect()
    }
}
