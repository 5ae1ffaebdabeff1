// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — GhostMesh Lattice Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::constants::TAU_SOVEREIGN;
use crate::error::{GhostmeshError, GhostmeshResult};

/// Runtime configuration for a GhostMesh lattice.
///
/// Fixed for the lifetime of the lattice built from it; there is no
/// incremental resize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    /// Length `D` of every node's state vector.
    /// Default: 64.
    pub dimension: usize,

    /// Edge length of the cube; the lattice holds `grid_size³` nodes.
    /// Default: 3 (27 sovereign nodes).
    pub grid_size: usize,

    /// Diffusive coupling strength between neighbours.
    /// Default: 0.1. Zero freezes the diffusion step.
    pub coupling: f64,

    /// Divisor applied to the coupling: `rate = coupling / damping`.
    /// Default: φ (`TAU_SOVEREIGN`).
    pub damping: f64,

    /// Integration step size.
    /// Default: 0.1.
    pub dt: f64,

    /// Standard deviation of the zero-mean Gaussian initial state.
    /// Default: 0.1.
    pub init_std: f64,

    /// Node receiving full-scale input injection.
    /// Default: (1, 1, 1), the centre of a 3×3×3 grid.
    pub reference_position: [usize; 3],

    /// Injection factor for the reference node.
    /// Default: 1.0.
    pub reference_scale: f64,

    /// Injection factor for every other node.
    /// Default: 0.1.
    pub diffuse_scale: f64,

    /// RNG seed for the initial state; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            dimension: 64,
            grid_size: 3,
            coupling: 0.1,
            damping: TAU_SOVEREIGN,
            dt: 0.1,
            init_std: 0.1,
            reference_position: [1, 1, 1],
            reference_scale: 1.0,
            diffuse_scale: 0.1,
            seed: None,
        }
    }
}

impl LatticeConfig {
    /// Shorthand for a default config with the given shape.
    pub fn with_shape(dimension: usize, grid_size: usize) -> Self {
        Self {
            dimension,
            grid_size,
            ..Default::default()
        }
    }

    /// Builder-style seed setter.
    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Effective diffusion rate `coupling / damping`.
    pub fn rate(&self) -> f64 {
        self.coupling / self.damping
    }

    /// Number of nodes a lattice built from this config will own.
    ///
    /// Saturates for grids that `validate` would reject.
    pub fn node_count(&self) -> usize {
        self.grid_size.saturating_pow(3)
    }

    /// Whether `reference_position` addresses a node inside the grid.
    pub fn reference_in_grid(&self) -> bool {
        self.reference_position.iter().all(|&c| c < self.grid_size)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> GhostmeshResult<()> {
        if self.dimension == 0 {
            return Err(GhostmeshError::Construction(
                "dimension must be > 0".to_string(),
            ));
        }
        if self.grid_size == 0 {
            return Err(GhostmeshError::Construction(
                "grid_size must be > 0".to_string(),
            ));
        }
        let state_len = self
            .grid_size
            .checked_pow(3)
            .and_then(|n| n.checked_mul(self.dimension));
        if state_len.is_none() {
            return Err(GhostmeshError::Construction(format!(
                "grid_size {}^3 x dimension {} overflows the node arena",
                self.grid_size, self.dimension
            )));
        }
        if !self.coupling.is_finite() || self.coupling < 0.0 {
            return Err(GhostmeshError::Config(format!(
                "coupling must be finite and >= 0, got {}",
                self.coupling
            )));
        }
        if !self.damping.is_finite() || self.damping <= 0.0 {
            return Err(GhostmeshError::Config(format!(
                "damping must be finite and > 0, got {}",
                self.damping
            )));
        }
        if !self.dt.is_finite() || self.dt < 0.0 {
            return Err(GhostmeshError::Config(format!(
                "dt must be finite and >= 0, got {}",
                self.dt
            )));
        }
        if !self.init_std.is_finite() || self.init_std < 0.0 {
            return Err(GhostmeshError::Config(format!(
                "init_std must be finite and >= 0, got {}",
                self.init_std
            )));
        }
        if !self.reference_scale.is_finite() || !self.diffuse_scale.is_finite() {
            return Err(GhostmeshError::Config(format!(
                "injection scales must be finite, got reference={} diffuse={}",
                self.reference_scale, self.diffuse_scale
            )));
        }
        Ok(())
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> GhostmeshResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| GhostmeshError::Config(format!("JSON parse error: {e}")))
    }

    /// Serialise to a JSON string.
    pub fn to_json(&self) -> GhostmeshResult<String> {
        serde_json::to_string(self)
            .map_err(|e| GhostmeshError::Config(format!("JSON encode error: {e}")))
    }
}
