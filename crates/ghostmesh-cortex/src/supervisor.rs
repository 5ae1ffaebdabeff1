// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — GhostMesh Metacognitive Supervisor
// ─────────────────────────────────────────────────────────────────────
//! Audits coherence/lambda telemetry and decides whether output may
//! proceed.
//!
//! Each audit first folds the sample into exponential moving averages,
//! then scores it:
//!
//!   confidence = 0.6 · c + 0.4 · (1 - min(|c - ema_c| · 5, 1))
//!   fragility  = 0.9 if c < 0.6 and λ > 15, else 0.2
//!   drift      = |c - ema_c| > 0.15
//!
//! Decisions are checked in priority order: fragility, confidence, drift.

use std::collections::VecDeque;
use std::fmt;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use ghostmesh_types::{GhostmeshError, GhostmeshResult};

/// One telemetry sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetryState {
    pub coherence: f64,
    pub lambda: f64,
}

impl TelemetryState {
    pub fn new(coherence: f64, lambda: f64) -> Self {
        Self { coherence, lambda }
    }
}

/// Supervisor thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupervisorConfig {
    /// EMA smoothing factor in (0, 1].
    pub ema_alpha: f64,
    pub history_window: usize,
    pub drift_threshold: f64,
    pub min_confidence: f64,
    pub fragility_threshold: f64,
    /// Confidence above which the raw permission level is granted.
    pub raw_confidence: f64,
    pub fragile_coherence: f64,
    pub fragile_lambda: f64,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            ema_alpha: 0.1,
            history_window: 100,
            drift_threshold: 0.15,
            min_confidence: 0.75,
            fragility_threshold: 0.8,
            raw_confidence: 0.92,
            fragile_coherence: 0.6,
            fragile_lambda: 15.0,
        }
    }
}

impl SupervisorConfig {
    pub fn validate(&self) -> GhostmeshResult<()> {
        if !(self.ema_alpha > 0.0 && self.ema_alpha <= 1.0) {
            return Err(GhostmeshError::Config(format!(
                "ema_alpha must be in (0, 1], got {}",
                self.ema_alpha
            )));
        }
        if self.history_window == 0 {
            return Err(GhostmeshError::Config(
                "history_window must be > 0".to_string(),
            ));
        }
        let thresholds = [
            ("drift_threshold", self.drift_threshold),
            ("min_confidence", self.min_confidence),
            ("fragility_threshold", self.fragility_threshold),
            ("raw_confidence", self.raw_confidence),
            ("fragile_coherence", self.fragile_coherence),
            ("fragile_lambda", self.fragile_lambda),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() {
                return Err(GhostmeshError::Config(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    Retest,
    Abstain,
    Calibrate,
    Proceed,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retest => "RETEST",
            Self::Abstain => "ABSTAIN",
            Self::Calibrate => "CALIBRATE",
            Self::Proceed => "PROCEED",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermissionLevel {
    Standard,
    Raw,
}

impl PermissionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "STANDARD",
            Self::Raw => "RAW",
        }
    }
}

/// Outcome of one audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Audit {
    pub decision: Decision,
    pub confidence: f64,
    pub fragility: f64,
    pub drift: bool,
    pub rationale: String,
}

#[derive(Debug, Default)]
struct Telemetry {
    /// `None` until the first finite sample arrives.
    ema_coherence: Option<f64>,
    ema_lambda: f64,
    history: VecDeque<TelemetryState>,
}

/// Metacognitive supervisor.
///
/// Thread-safe: EMA and history mutations are guarded by a
/// `parking_lot::Mutex`.
pub struct MetacognitiveSupervisor {
    config: SupervisorConfig,
    telemetry: Mutex<Telemetry>,
}

impl Default for MetacognitiveSupervisor {
    fn default() -> Self {
        Self {
            config: SupervisorConfig::default(),
            telemetry: Mutex::new(Telemetry::default()),
        }
    }
}

impl MetacognitiveSupervisor {
    pub fn new(config: SupervisorConfig) -> GhostmeshResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            telemetry: Mutex::new(Telemetry::default()),
        })
    }

    pub fn config(&self) -> &SupervisorConfig {
        &self.config
    }

    /// Fold a sample into the EMAs and the rolling history.
    ///
    /// Non-finite samples are dropped so they cannot poison the averages.
    pub fn record_state(&self, state: TelemetryState) {
        let mut telemetry = self.telemetry.lock();
        self.record_locked(&mut telemetry, state);
    }

    fn record_locked(&self, telemetry: &mut Telemetry, state: TelemetryState) {
        if !state.coherence.is_finite() || !state.lambda.is_finite() {
            log::warn!(
                "dropping non-finite telemetry (coherence={}, lambda={})",
                state.coherence,
                state.lambda
            );
            return;
        }
        let a = self.config.ema_alpha;
        match telemetry.ema_coherence {
            None => {
                telemetry.ema_coherence = Some(state.coherence);
                telemetry.ema_lambda = state.lambda;
            }
            Some(ema) => {
                telemetry.ema_coherence = Some(a * state.coherence + (1.0 - a) * ema);
                telemetry.ema_lambda = a * state.lambda + (1.0 - a) * telemetry.ema_lambda;
            }
        }
        telemetry.history.push_back(state);
        while telemetry.history.len() > self.config.history_window {
            telemetry.history.pop_front();
        }
    }

    /// Confidence in [0, 1] for `state` against the current coherence EMA.
    pub fn confidence(&self, state: &TelemetryState) -> f64 {
        let ema = self.telemetry.lock().ema_coherence;
        confidence_against(state.coherence, ema.unwrap_or(0.0))
    }

    pub fn fragility(&self, state: &TelemetryState) -> f64 {
        if state.coherence < self.config.fragile_coherence
            && state.lambda > self.config.fragile_lambda
        {
            0.9
        } else {
            0.2
        }
    }

    pub fn detect_drift(&self, state: &TelemetryState) -> bool {
        let ema = self.telemetry.lock().ema_coherence.unwrap_or(0.0);
        (state.coherence - ema).abs() > self.config.drift_threshold
    }

    /// Record `state`, then decide.
    pub fn audit(&self, state: TelemetryState) -> Audit {
        let ema = {
            let mut telemetry = self.telemetry.lock();
            self.record_locked(&mut telemetry, state);
            telemetry.ema_coherence.unwrap_or(0.0)
        };

        let confidence = confidence_against(state.coherence, ema);
        let fragility = self.fragility(&state);
        let drift = (state.coherence - ema).abs() > self.config.drift_threshold;
        let scores = format!("Conf: {confidence:.2} | Frag: {fragility:.2} | Drift: {drift}");

        let (decision, rationale) = if fragility > self.config.fragility_threshold {
            log::error!("fragile telemetry, requesting retest ({scores})");
            (
                Decision::Retest,
                format!("High fragility detected ({scores}). Triggering secondary scan."),
            )
        } else if confidence < self.config.min_confidence {
            (
                Decision::Abstain,
                format!("Insufficient confidence ({scores}). Abstaining."),
            )
        } else if drift {
            (
                Decision::Calibrate,
                format!("Timeline drift detected ({scores}). Adjusting local metrics."),
            )
        } else {
            (
                Decision::Proceed,
                format!("Stable resonance ({scores}). Output authorized."),
            )
        };
        log::debug!("audit decision {decision}: {rationale}");

        Audit {
            decision,
            confidence,
            fragility,
            drift,
            rationale,
        }
    }

    pub fn permission_level(&self, state: &TelemetryState) -> PermissionLevel {
        if self.confidence(state) > self.config.raw_confidence {
            PermissionLevel::Raw
        } else {
            PermissionLevel::Standard
        }
    }

    pub fn ema_coherence(&self) -> Option<f64> {
        self.telemetry.lock().ema_coherence
    }

    pub fn ema_lambda(&self) -> f64 {
        self.telemetry.lock().ema_lambda
    }

    pub fn history_len(&self) -> usize {
        self.telemetry.lock().history.len()
    }

    /// Snapshot of the rolling history, oldest first.
    pub fn history(&self) -> Vec<TelemetryState> {
        self.telemetry.lock().history.iter().copied().collect()
    }

    pub fn reset(&self) {
        *self.telemetry.lock() = Telemetry::default();
    }
}

fn confidence_against(coherence: f64, ema: f64) -> f64 {
    let stability = 1.0 - ((coherence - ema).abs() * 5.0).min(1.0);
    coherence * 0.6 + stability * 0.4
}
