// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — GhostMesh Alpha Scorer
// ─────────────────────────────────────────────────────────────────────
//! Predictive alpha:
//!
//!   α = ρ · exp(-flux) · snr / (1 + snr)
//!
//! The SNR term saturates toward 1, so α is bounded above by ρ for any
//! non-negative flux.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Compute predictive alpha. Non-finite results collapse to 0.0.
pub fn calculate_alpha(snr: f64, rho: f64, entropic_flux: f64) -> f64 {
    let signal_gain = snr / (1.0 + snr);
    let persistence = (-entropic_flux).exp();
    let alpha = rho * persistence * signal_gain;
    if !alpha.is_finite() {
        log::warn!(
            "non-finite alpha (snr={snr}, rho={rho}, flux={entropic_flux}), defaulting to 0.0"
        );
        return 0.0;
    }
    alpha
}

/// Signal band for a given alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalStrength {
    HighConvictionInflection,
    SustainedTrend,
    StableStochastic,
    NoisyReversion,
    EntropicNull,
}

impl SignalStrength {
    pub fn from_alpha(alpha: f64) -> Self {
        if alpha > 1.5 {
            Self::HighConvictionInflection
        } else if alpha > 1.0 {
            Self::SustainedTrend
        } else if alpha > 0.5 {
            Self::StableStochastic
        } else if alpha > 0.2 {
            Self::NoisyReversion
        } else {
            Self::EntropicNull
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighConvictionInflection => "HIGH_CONVICTION_INFLECTION",
            Self::SustainedTrend => "SUSTAINED_TREND",
            Self::StableStochastic => "STABLE_STOCHASTIC",
            Self::NoisyReversion => "NOISY_REVERSION",
            Self::EntropicNull => "ENTROPIC_NULL",
        }
    }
}

impl fmt::Display for SignalStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyAction {
    ExpandExposure,
    HedgePosition,
}

impl StrategyAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExpandExposure => "EXPAND_EXPOSURE",
            Self::HedgePosition => "HEDGE_POSITION",
        }
    }
}

impl fmt::Display for StrategyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strategy metadata derived from a single alpha score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyAlignment {
    pub alpha: f64,
    pub strength: SignalStrength,
    pub action: StrategyAction,
}

pub fn strategy_alignment(alpha: f64) -> StrategyAlignment {
    let action = if alpha > 1.0 {
        StrategyAction::ExpandExposure
    } else {
        StrategyAction::HedgePosition
    };
    StrategyAlignment {
        alpha,
        strength: SignalStrength::from_alpha(alpha),
        action,
    }
}
