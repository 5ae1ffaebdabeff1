// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — GhostMesh Luo Shu Alignment
// ─────────────────────────────────────────────────────────────────────
//! Maps nine system metrics onto the Luo Shu magic square
//!
//!   [ 4  9  2 ]
//!   [ 3  5  7 ]
//!   [ 8  1  6 ]
//!
//! Each metric is normalised so that its nominal value yields exactly the
//! cell weight. Torsion is the mean absolute deviation of the 8 line sums
//! (3 rows, 3 columns, 2 diagonals) from the alignment invariant.

use std::fmt;

use serde::{Deserialize, Serialize};

use ghostmesh_types::{clamp_score, ALIGNMENT_INVARIANT};

/// Cell weights of the magic square, row-major.
pub const LUO_SHU_WEIGHTS: [[f64; 3]; 3] = [[4.0, 9.0, 2.0], [3.0, 5.0, 7.0], [8.0, 1.0, 6.0]];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LuoShuMetrics {
    pub snr: f64,
    pub alpha: f64,
    pub reality_stability: f64,
    pub rho: f64,
    pub timeline_coherence: f64,
    pub utility: f64,
    pub g_parameter: f64,
    pub chaos_level: f64,
    pub sigma_map: f64,
}

impl Default for LuoShuMetrics {
    fn default() -> Self {
        Self {
            snr: 5.0,
            alpha: 1.0,
            reality_stability: 100.0,
            rho: 95.0,
            timeline_coherence: 100.0,
            utility: 1.0,
            g_parameter: 1.0,
            chaos_level: 0.0,
            sigma_map: 0.0,
        }
    }
}

impl LuoShuMetrics {
    /// Nominal metrics: every cell equals its weight, every line sums to 15.
    pub fn baseline() -> Self {
        Self {
            g_parameter: 0.1,
            ..Self::default()
        }
    }

    /// Scaled 3×3 grid.
    pub fn grid(&self) -> [[f64; 3]; 3] {
        let w = &LUO_SHU_WEIGHTS;
        [
            [
                self.snr / 5.0 * w[0][0],
                self.alpha * w[0][1],
                self.reality_stability / 100.0 * w[0][2],
            ],
            [
                self.rho / 95.0 * w[1][0],
                self.timeline_coherence / 100.0 * w[1][1],
                self.utility * w[1][2],
            ],
            [
                (1.0 - self.g_parameter + 0.1) * w[2][0],
                (100.0 - self.chaos_level).max(0.0) / 100.0 * w[2][1],
                (1.0 - self.sigma_map.abs()) * w[2][2],
            ],
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LuoShuStatus {
    Aligned,
    TorsionDetected,
    HarmonicCollapse,
}

impl LuoShuStatus {
    pub fn from_compliance(compliance: f64) -> Self {
        if compliance > 90.0 {
            Self::Aligned
        } else if compliance > 50.0 {
            Self::TorsionDetected
        } else {
            Self::HarmonicCollapse
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aligned => "ALIGNED",
            Self::TorsionDetected => "TORSION DETECTED",
            Self::HarmonicCollapse => "HARMONIC COLLAPSE",
        }
    }
}

impl fmt::Display for LuoShuStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LuoShuReport {
    pub grid: [[f64; 3]; 3],
    /// Rows 0..3, columns 3..6, main diagonal, anti-diagonal.
    pub line_sums: [f64; 8],
    pub torsion: f64,
    /// Percentage in [0, 100].
    pub compliance: f64,
    pub status: LuoShuStatus,
}

pub fn evaluate_luo_shu(metrics: &LuoShuMetrics) -> LuoShuReport {
    let grid = metrics.grid();
    let mut line_sums = [0.0; 8];
    for i in 0..3 {
        line_sums[i] = grid[i].iter().sum();
        line_sums[3 + i] = (0..3).map(|r| grid[r][i]).sum();
    }
    line_sums[6] = (0..3).map(|k| grid[k][k]).sum();
    line_sums[7] = (0..3).map(|k| grid[k][2 - k]).sum();

    let torsion = line_sums
        .iter()
        .map(|s| (s - ALIGNMENT_INVARIANT).abs())
        .sum::<f64>()
        / line_sums.len() as f64;
    let compliance = clamp_score(100.0 - torsion * 10.0, 0.0, 100.0);

    LuoShuReport {
        grid,
        line_sums,
        torsion,
        compliance,
        status: LuoShuStatus::from_compliance(compliance),
    }
}
