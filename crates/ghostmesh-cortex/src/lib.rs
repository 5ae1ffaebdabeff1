// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — GhostMesh Cortex
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Collaborators that sit around the lattice but never reach into it.
//!
//! - `alpha`: predictive alpha from SNR, autocorrelation and entropic flux
//! - `supervisor`: metacognitive audit over coherence/lambda telemetry
//! - `lethe`: time-decayed working memory with milestone promotion
//! - `luo_shu`: 3×3 magic-square alignment of nine system metrics

pub mod alpha;
pub mod lethe;
pub mod luo_shu;
pub mod supervisor;

pub use alpha::{
    calculate_alpha, strategy_alignment, SignalStrength, StrategyAction, StrategyAlignment,
};
pub use lethe::{LetheConfig, LetheEngine, MemoryRecord, MetabolizeOutcome, Milestone};
pub use luo_shu::{evaluate_luo_shu, LuoShuMetrics, LuoShuReport, LuoShuStatus, LUO_SHU_WEIGHTS};
pub use supervisor::{
    Audit, Decision, MetacognitiveSupervisor, PermissionLevel, SupervisorConfig, TelemetryState,
};
