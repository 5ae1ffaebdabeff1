// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — GhostMesh Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all GhostMesh failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GhostmeshError {
    /// Lattice could not be built (non-positive dimension or grid size).
    #[error("construction error: {0}")]
    Construction(String),

    /// Input vector length does not match the lattice dimension.
    #[error("shape mismatch: expected {expected} components, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Invalid argument to a standalone utility.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Numerical error (NaN/Inf in an input).
    #[error("numerical error: {0}")]
    Numerical(String),
}

pub type GhostmeshResult<T> = Result<T, GhostmeshError>;
