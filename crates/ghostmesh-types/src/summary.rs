// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — GhostMesh Records
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

/// Clamp a value to [lo, hi], mapping NaN to lo and Inf to nearest bound.
#[inline]
pub fn clamp_score(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        log::warn!("clamp_score: NaN detected, clamping to {lo:.4}");
        return lo;
    }
    if value.is_infinite() {
        let boundary = if value > 0.0 { hi } else { lo };
        log::warn!("clamp_score: Inf detected, clamping to {boundary:.4}");
        return boundary;
    }
    value.clamp(lo, hi)
}

/// Integer lattice coordinate, each axis in `[0, grid_size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    pub const fn as_array(&self) -> [usize; 3] {
        [self.x, self.y, self.z]
    }

    /// Shift by a signed unit step, returning `None` if the result leaves
    /// `[0, limit)` on any axis.
    pub fn offset(&self, delta: [isize; 3], limit: usize) -> Option<Self> {
        let shift = |c: usize, d: isize| -> Option<usize> {
            let moved = c.checked_add_signed(d)?;
            (moved < limit).then_some(moved)
        };
        Some(Self {
            x: shift(self.x, delta[0])?,
            y: shift(self.y, delta[1])?,
            z: shift(self.z, delta[2])?,
        })
    }

    /// Number of axes on which this position touches the grid boundary.
    ///
    /// An axis counts once per touched face, so on a grid of size 1 every
    /// axis counts twice.
    pub fn boundary_faces(&self, limit: usize) -> usize {
        self.as_array()
            .iter()
            .map(|&c| usize::from(c == 0) + usize::from(c + 1 == limit))
            .sum()
    }
}

impl From<[usize; 3]> for Position {
    fn from(c: [usize; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

/// Holographic projection of the lattice after one step.
///
/// `state` is the element-wise mean of every node's state; `confidence`
/// is the mean node confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSummary {
    pub state: Vec<f64>,
    pub confidence: f64,
    /// Steps taken by the lattice when this summary was produced.
    pub step_count: u64,
}

impl StepSummary {
    pub fn dimension(&self) -> usize {
        self.state.len()
    }

    /// Arithmetic mean of the summary vector's components.
    pub fn average(&self) -> f64 {
        if self.state.is_empty() {
            return 0.0;
        }
        self.state.iter().sum::<f64>() / self.state.len() as f64
    }

    /// Sum of the summary vector, for comparison against
    /// `ALIGNMENT_INVARIANT` by callers that project onto it.
    pub fn total(&self) -> f64 {
        self.state.iter().sum()
    }
}
