// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — GhostMesh Flux Diffusion
// ─────────────────────────────────────────────────────────────────────
//! Explicit Euler diffusion over the Von Neumann topology:
//!
//!   f_i[k]  = Σ_{j∈N(i)} (s_j[k] - s_i[k])
//!   s_i[k] ← s_i[k] + f_i[k] · (coupling / τ) · dt
//!
//! Flux for every node is accumulated from the pre-step snapshot into a
//! pre-allocated scratch buffer, then committed in a second pass, so the
//! result does not depend on node visitation order.

use ghostmesh_types::LatticeConfig;

use crate::node::Node;

/// Diffusion step parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffusionParams {
    pub coupling: f64,
    /// Damping divisor τ (the golden ratio by default).
    pub damping: f64,
    pub dt: f64,
}

impl DiffusionParams {
    pub fn from_config(config: &LatticeConfig) -> Self {
        Self {
            coupling: config.coupling,
            damping: config.damping,
            dt: config.dt,
        }
    }

    /// `coupling / τ`.
    pub fn rate(&self) -> f64 {
        self.coupling / self.damping
    }

    /// Multiplier applied to the flux on commit: `rate · dt`.
    pub fn step_factor(&self) -> f64 {
        self.rate() * self.dt
    }
}

/// Double-buffered flux integrator with a reusable scratch buffer.
#[derive(Debug, Clone)]
pub struct FluxDiffuser {
    params: DiffusionParams,
    dimension: usize,
    /// Row-major flux, `node_count × dimension`.
    flux: Vec<f64>,
}

impl FluxDiffuser {
    pub fn new(params: DiffusionParams, node_count: usize, dimension: usize) -> Self {
        Self {
            params,
            dimension,
            flux: vec![0.0; node_count * dimension],
        }
    }

    /// Flux of the last computed step for node `idx`.
    #[cfg(test)]
    fn flux_of(&self, idx: usize) -> &[f64] {
        let base = idx * self.dimension;
        &self.flux[base..base + self.dimension]
    }

    /// Fill the scratch buffer from the current (pre-step) node states.
    ///
    /// Reads only; no node is mutated.
    pub fn compute_flux(&mut self, nodes: &[Node]) {
        let d = self.dimension;
        debug_assert_eq!(self.flux.len(), nodes.len() * d);

        for (i, node) in nodes.iter().enumerate() {
            let row = &mut self.flux[i * d..(i + 1) * d];
            row.fill(0.0);
            for &j in &node.neighbors {
                let neighbor = &nodes[j].state;
                for ((f, &own), &other) in row.iter_mut().zip(&node.state).zip(neighbor) {
                    *f += other - own;
                }
            }
        }
    }

    /// Apply the buffered flux to every node. Confidence is carried forward.
    pub fn commit(&self, nodes: &mut [Node]) {
        let d = self.dimension;
        let factor = self.params.step_factor();

        for (i, node) in nodes.iter_mut().enumerate() {
            let row = &self.flux[i * d..(i + 1) * d];
            for (s, &f) in node.state.iter_mut().zip(row) {
                *s += f * factor;
            }
        }
    }

    /// One full snapshot-then-commit diffusion step.
    pub fn step(&mut self, nodes: &mut [Node]) {
        self.compute_flux(nodes);
        self.commit(nodes);
    }

    /// Max |f| over the last computed flux (convergence diagnostic).
    pub fn max_flux(&self) -> f64 {
        self.flux.iter().fold(0.0f64, |m, &f| m.max(f.abs()))
    }
}
