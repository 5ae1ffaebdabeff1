// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — GhostMesh Order Metric (Ghost Density Factor)
// ─────────────────────────────────────────────────────────────────────
//! Entropy-derived order of the per-node energy distribution.
//!
//!   e_i    = mean |s_i[k]|
//!   p_i    = e_i / Σe
//!   H      = -Σ p_i ln(p_i + ε)
//!   order  = 1.8 + (1 - H / ln N) · 1.2
//!
//! Low (1.8) when energy is spread uniformly, high (→ 3.0) when it is
//! concentrated in few nodes ("crystallised").

use ghostmesh_types::clamp_score;

use crate::node::Node;
use crate::params::{ENTROPY_EPS, ORDER_BASELINE, ORDER_CEILING, ORDER_SPAN};

/// Mean absolute value of a state vector.
pub fn node_energy(state: &[f64]) -> f64 {
    if state.is_empty() {
        return 0.0;
    }
    state.iter().map(|x| x.abs()).sum::<f64>() / state.len() as f64
}

/// Per-node energies in arena order.
pub fn energy_distribution(nodes: &[Node]) -> Vec<f64> {
    nodes.iter().map(|n| node_energy(n.state())).collect()
}

/// Shannon entropy `-Σ p ln(p + ε)` of the normalised energies, divided
/// by `ln N`. Returns `None` for a degenerate distribution (zero total
/// energy or fewer than two nodes).
pub fn normalized_entropy(energies: &[f64]) -> Option<f64> {
    let n = energies.len();
    if n < 2 {
        return None;
    }
    let total: f64 = energies.iter().sum();
    if total == 0.0 {
        return None;
    }

    let entropy: f64 = -energies
        .iter()
        .map(|&e| {
            let p = e / total;
            p * (p + ENTROPY_EPS).ln()
        })
        .sum::<f64>();

    Some(entropy / (n as f64).ln())
}

/// Order value in `[1.8, 3.0]` for an arbitrary energy distribution.
pub fn order_from_energies(energies: &[f64]) -> f64 {
    match normalized_entropy(energies) {
        Some(h_norm) => clamp_score(
            ORDER_BASELINE + (1.0 - h_norm) * ORDER_SPAN,
            ORDER_BASELINE,
            ORDER_CEILING,
        ),
        None => {
            log::warn!(
                "order metric: degenerate energy distribution over {} nodes, returning baseline",
                energies.len()
            );
            ORDER_BASELINE
        }
    }
}

/// Order value of the current node states.
pub fn order_metric(nodes: &[Node]) -> f64 {
    order_from_energies(&energy_distribution(nodes))
}
