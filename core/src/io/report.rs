//! Result rendering for the command-line front end
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use crate::algorithm::graph::MaxFlowResult;
use crate::error::FlowResult;

/// `Maximum Flow: <value>`, optionally followed by one `cut` line per crossing pair
pub fn render_text(result: &MaxFlowResult, include_cut: bool) -> String {
    let mut lines = vec![format!("Maximum Flow: {}", result.max_flow)];

    if include_cut {
        if let Some(cut) = &result.min_cut {
            lines.extend(
                cut.edges
                    .iter()
                    .map(|edge| format!("cut {} -> {} ({})", edge.from, edge.to, edge.capacity)),
            );
        }
    }

    lines.join("\n")
}

pub fn render_json(result: &MaxFlowResult) -> FlowResult<String> {
    Ok(serde_json::to_string_pretty(result)?)
}
