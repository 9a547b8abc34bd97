//! Flow correctness verification
//!
//! Checks the invariants every valid flow assignment satisfies, and provides
//! an exhaustive minimum-cut oracle for cross-checking small networks.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use crate::data_structures::{Capacity, CapacityGraph, FlowMatrix, NodeId};
use crate::error::{FlowError, FlowResult};

/// Largest vertex count accepted by [`brute_force_min_cut`]
pub const BRUTE_FORCE_VERTEX_LIMIT: usize = 20;

/// Verify antisymmetry, non-negative residuals and conservation.
///
/// Conservation is checked at every vertex other than `source` and `sink`.
pub fn check_invariants(
    graph: &CapacityGraph,
    flows: &FlowMatrix,
    source: NodeId,
    sink: NodeId,
) -> FlowResult<()> {
    for ((from, to), flow) in flows.entries() {
        let reverse = flows.get(to, from);
        if reverse != -flow {
            return Err(FlowError::InvariantViolation(format!(
                "antisymmetry broken on {} -> {}: flow {} but reverse {}",
                from, to, flow, reverse
            )));
        }

        let residual = flows.residual(graph, from, to);
        if residual < 0 {
            return Err(FlowError::InvariantViolation(format!(
                "flow {} on {} -> {} exceeds capacity {}",
                flow,
                from,
                to,
                graph.capacity(from, to)
            )));
        }
    }

    let outflows = flows.net_outflows(graph.vertex_count());
    if let Some((vertex, excess)) = outflows
        .iter()
        .enumerate()
        .find(|&(vertex, &excess)| vertex != source && vertex != sink && excess != 0)
    {
        return Err(FlowError::InvariantViolation(format!(
            "conservation broken at vertex {}: net outflow {}",
            vertex, excess
        )));
    }

    Ok(())
}

/// Minimum cut capacity by enumerating every source/sink partition
pub fn brute_force_min_cut(graph: &CapacityGraph, source: NodeId, sink: NodeId) -> FlowResult<Capacity> {
    graph.check_vertex(source)?;
    graph.check_vertex(sink)?;

    if source == sink {
        return Ok(0);
    }

    let vertex_count = graph.vertex_count();
    if vertex_count > BRUTE_FORCE_VERTEX_LIMIT {
        return Err(FlowError::invalid_parameter(
            "vertex_count",
            format!(
                "exhaustive cut enumeration supports at most {} vertices, got {}",
                BRUTE_FORCE_VERTEX_LIMIT, vertex_count
            ),
        ));
    }

    let mut source_side = vec![false; vertex_count];
    let mut best = Capacity::MAX;

    for mask in 0u32..(1u32 << vertex_count) {
        if mask & (1 << source) == 0 || mask & (1 << sink) != 0 {
            continue;
        }
        for (vertex, inside) in source_side.iter_mut().enumerate() {
            *inside = mask & (1 << vertex) != 0;
        }
        best = best.min(graph.cut_capacity(&source_side));
    }

    Ok(best)
}
