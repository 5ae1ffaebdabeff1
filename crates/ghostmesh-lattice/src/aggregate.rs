// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — GhostMesh Holographic Aggregator
// ─────────────────────────────────────────────────────────────────────
//! Reduces the lattice to a single summary vector and scalar.

use ghostmesh_types::StepSummary;

use crate::node::Node;

/// Element-wise mean state and mean confidence over `nodes`.
///
/// Pure reduction; an empty slice yields a zero vector and zero confidence.
pub fn aggregate(nodes: &[Node], dimension: usize, step_count: u64) -> StepSummary {
    let mut total_state = vec![0.0f64; dimension];
    let mut total_confidence = 0.0f64;

    for node in nodes {
        total_confidence += node.confidence;
        for (t, &v) in total_state.iter_mut().zip(node.state()) {
            *t += v;
        }
    }

    if nodes.is_empty() {
        return StepSummary {
            state: total_state,
            confidence: 0.0,
            step_count,
        };
    }

    let n = nodes.len() as f64;
    for t in total_state.iter_mut() {
        *t /= n;
    }

    StepSummary {
        state: total_state,
        confidence: total_confidence / n,
        step_count,
    }
}
