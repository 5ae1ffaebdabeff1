// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — GhostMesh Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, and error hierarchy for the
//! GhostMesh volumetric lattice and its cortex collaborators.

pub mod config;
pub mod constants;
pub mod error;
pub mod summary;

pub use config::LatticeConfig;
pub use constants::{ALIGNMENT_INVARIANT, TAU_SOVEREIGN};
pub use error::{GhostmeshError, GhostmeshResult};
pub use summary::{clamp_score, Position, StepSummary};
