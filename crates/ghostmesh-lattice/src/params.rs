// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — GhostMesh Canonical Parameters
// ─────────────────────────────────────────────────────────────────────
//! Canonical constants for the volumetric lattice: Von Neumann shifts,
//! order-metric scaling, and the annealing target sum.

pub use ghostmesh_types::constants::{ALIGNMENT_INVARIANT, TAU_SOVEREIGN};

/// Maximum neighbour count of an interior node.
pub const MAX_NEIGHBORS: usize = 6;

/// Axis-aligned unit shifts (±x, ±y, ±z) defining Von Neumann adjacency.
pub const VON_NEUMANN_SHIFTS: [[isize; 3]; MAX_NEIGHBORS] = [
    [-1, 0, 0],
    [1, 0, 0],
    [0, -1, 0],
    [0, 1, 0],
    [0, 0, -1],
    [0, 0, 1],
];

/// Order value for a maximally spread (or all-zero) energy distribution.
pub const ORDER_BASELINE: f64 = 1.8;

/// Span added on top of the baseline when energy is fully concentrated.
pub const ORDER_SPAN: f64 = 1.2;

/// Upper bound of the order metric: `ORDER_BASELINE + ORDER_SPAN`.
pub const ORDER_CEILING: f64 = ORDER_BASELINE + ORDER_SPAN;

/// Additive guard inside `ln(p + ε)`.
pub const ENTROPY_EPS: f64 = 1e-9;

/// The Gross: annealed vectors are rescaled to sum to 144.
pub const ANNEAL_TARGET_SUM: f64 = 144.0;
