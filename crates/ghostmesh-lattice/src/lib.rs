// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — GhostMesh Volumetric Lattice
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! The Sentient Manifold volumetric grid.
//!
//! A fixed cubic lattice of vector-valued sovereign nodes exchanging
//! state with their Von Neumann neighbours, reduced each step to a
//! holographic summary, with an entropy-derived order metric.
//!
//! Architecture:
//!   - Node: position, state vector, confidence, neighbour indices
//!   - Lattice: flat node arena + topology, injection, step, queries
//!   - FluxDiffuser: double-buffered neighbour diffusion
//!   - aggregate: mean state + mean confidence
//!   - order: ghost density factor from per-node energy entropy
//!   - anneal: temperature softmax rescaled onto the Gross (144)
//!
//! # Invariants
//!
//! 1. **Fixed topology**: nodes and neighbour links are built once at
//!    construction and never rebuilt.
//! 2. **Order-independent steps**: all flux for a step is computed from
//!    the pre-step snapshot before any node is written.
//! 3. **No partial application**: a mismatched or non-finite input is
//!    rejected before any node is touched.

pub mod aggregate;
pub mod anneal;
pub mod diffusion;
pub mod lattice;
pub mod node;
pub mod order;
pub mod params;

pub use anneal::{anneal, anneal_to, softmax};
pub use diffusion::{DiffusionParams, FluxDiffuser};
pub use ghostmesh_types::{GhostmeshError, GhostmeshResult, LatticeConfig, Position, StepSummary};
pub use lattice::Lattice;
pub use node::Node;
pub use order::{node_energy, order_from_energies};

/// Build a default-configured lattice of `grid_size³` nodes.
pub fn build_lattice(dimension: usize, grid_size: usize) -> GhostmeshResult<Lattice> {
    Lattice::build(dimension, grid_size)
}

/// Advance `lattice` one step, returning `(summary_vector, summary_confidence)`.
pub fn step(
    lattice: &mut Lattice,
    input: &[f64],
    input_confidence: f64,
) -> GhostmeshResult<(Vec<f64>, f64)> {
    let summary = lattice.step(input, input_confidence)?;
    Ok((summary.state, summary.confidence))
}

/// Ghost density factor of the current lattice state.
pub fn order_metric(lattice: &Lattice) -> f64 {
    lattice.order_metric()
}
