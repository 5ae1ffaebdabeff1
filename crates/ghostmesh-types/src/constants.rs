// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — GhostMesh Shared Constants
// ─────────────────────────────────────────────────────────────────────
//! Architectural constants shared by the lattice and the cortex.

/// Sovereign damping constant: the golden ratio φ = (1 + √5) / 2.
///
/// Divides the diffusion coupling, so larger values slow the exchange.
pub const TAU_SOVEREIGN: f64 = 1.618_033_988_749_895;

/// Luo Shu reference total (every line of the 3×3 magic square sums to 15).
///
/// Advisory only: callers compare projected lattice output against it.
/// Nothing in the lattice asserts that any sum equals this value.
pub const ALIGNMENT_INVARIANT: f64 = 15.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tau_is_golden_ratio() {
        let phi = (1.0 + 5.0f64.sqrt()) / 2.0;
        assert!((TAU_SOVEREIGN - phi).abs() < 1e-15);
        // φ² = φ + 1
        assert!((TAU_SOVEREIGN * TAU_SOVEREIGN - TAU_SOVEREIGN - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_alignment_invariant_is_luo_shu_sum() {
        // Magic constant for a 3×3 square over 1..=9: n(n²+1)/2
        let n = 3.0;
        assert_eq!(ALIGNMENT_INVARIANT, n * (n * n + 1.0) / 2.0);
    }
}
