// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — GhostMesh Prayer-Wheel Annealing
// ─────────────────────────────────────────────────────────────────────
//! Temperature-scaled softmax rescaled onto a fixed target sum.
//!
//! Standalone: the diffusion step never calls into this module.

use ghostmesh_types::{GhostmeshError, GhostmeshResult};

use crate::params::ANNEAL_TARGET_SUM;

/// Numerically stable softmax of `values / temperature`.
///
/// Shifts by the max value before dividing by `temperature`, so every
/// logit is ≤ 0 and the largest is exactly 0. Finite inputs stay finite
/// for any positive temperature.
pub fn softmax(values: &[f64], temperature: f64) -> GhostmeshResult<Vec<f64>> {
    if values.is_empty() {
        return Err(GhostmeshError::Validation(
            "anneal requires a non-empty vector".to_string(),
        ));
    }
    if !(temperature.is_finite() && temperature > 0.0) {
        return Err(GhostmeshError::Validation(format!(
            "temperature must be finite and > 0, got {temperature}"
        )));
    }
    if let Some(bad) = values.iter().position(|v| !v.is_finite()) {
        return Err(GhostmeshError::Numerical(format!(
            "anneal input contains non-finite value {} at index {bad}",
            values[bad]
        )));
    }

    let max_v = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut exp_v: Vec<f64> = values
        .iter()
        .map(|v| ((v - max_v) / temperature).exp())
        .collect();
    // The max element contributes exp(0) = 1, so the sum is ≥ 1.
    let sum: f64 = exp_v.iter().sum();
    for e in exp_v.iter_mut() {
        *e /= sum;
    }
    Ok(exp_v)
}

/// Softmax rescaled so the elements sum to `target_sum`.
pub fn anneal_to(values: &[f64], temperature: f64, target_sum: f64) -> GhostmeshResult<Vec<f64>> {
    if !target_sum.is_finite() {
        return Err(GhostmeshError::Validation(format!(
            "target_sum must be finite, got {target_sum}"
        )));
    }
    let mut probs = softmax(values, temperature)?;
    for p in probs.iter_mut() {
        *p *= target_sum;
    }
    Ok(probs)
}

/// Softmax rescaled onto the Gross (144).
pub fn anneal(values: &[f64], temperature: f64) -> GhostmeshResult<Vec<f64>> {
    anneal_to(values, temperature, ANNEAL_TARGET_SUM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_input() {
        let out = anneal(&[1.0, 1.0, 1.0, 1.0], 1.0).unwrap();
        for v in &out {
            assert!((v - 36.0).abs() < 1e-9, "got {v}");
        }
    }

    #[test]
    fn test_sums_to_gross() {
        let inputs: [&[f64]; 4] = [
            &[0.3, -2.0, 7.5, 0.0, 1.25],
            &[-100.0, -101.0],
            &[42.0],
            &[1e-8, 3.0, -3.0, 0.5, 0.5, 9.0, -7.0],
        ];
        for values in inputs {
            for t in [0.05, 1.0, 12.0] {
                let out = anneal(values, t).unwrap();
                let sum: f64 = out.iter().sum();
                assert!((sum - 144.0).abs() < 1e-9, "sum={sum} for T={t}");
                assert!(out.iter().all(|&v| v >= 0.0));
            }
        }
    }

    #[test]
    fn test_large_logits_stable() {
        let out = anneal(&[1000.0, 0.0], 1.0).unwrap();
        assert!(out.iter().all(|v| v.is_finite()));
        assert!((out[0] - 144.0).abs() < 1e-9);
        assert!(out[1] >= 0.0 && out[1] < 1e-9);
    }

    #[test]
    fn test_extreme_magnitudes_and_temperatures() {
        let cases: [(&[f64], f64); 3] = [
            (&[1e308, -1e308, 0.0], 1e-300),
            (&[1.0, 0.0], 1e-310),
            (&[-1e308, -1e308], 1e-300),
        ];
        for (values, t) in cases {
            let out = anneal(values, t).unwrap();
            assert!(out.iter().all(|v| v.is_finite() && *v >= 0.0), "{out:?}");
            let sum: f64 = out.iter().sum();
            assert!((sum - 144.0).abs() < 1e-9, "sum={sum} for T={t}");
        }
        let out = anneal(&[1e308, -1e308, 0.0], 1e-300).unwrap();
        assert_eq!(out, vec![144.0, 0.0, 0.0]);
        let out = anneal(&[-1e308, -1e308], 1e-300).unwrap();
        assert_eq!(out, vec![72.0, 72.0]);
    }

    #[test]
    fn test_high_temperature_flattens() {
        let cold = anneal(&[0.0, 1.0], 0.1).unwrap();
        let hot = anneal(&[0.0, 1.0], 100.0).unwrap();
        assert!(cold[1] > hot[1]);
        assert!((hot[0] - hot[1]).abs() < 1.0);
    }

    #[test]
    fn test_order_preserved() {
        let out = anneal(&[0.1, 0.5, 0.3], 1.0).unwrap();
        assert!(out[1] > out[2] && out[2] > out[0]);
    }

    #[test]
    fn test_custom_target() {
        let out = anneal_to(&[2.0, 2.0], 1.0, 15.0).unwrap();
        assert!((out[0] - 7.5).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_non_positive_temperature() {
        assert!(matches!(
            anneal(&[1.0], 0.0),
            Err(GhostmeshError::Validation(_))
        ));
        assert!(matches!(
            anneal(&[1.0], -1.0),
            Err(GhostmeshError::Validation(_))
        ));
        assert!(anneal(&[1.0], f64::NAN).is_err());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            anneal(&[], 1.0),
            Err(GhostmeshError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_non_finite_element() {
        assert!(matches!(
            anneal(&[1.0, f64::INFINITY], 1.0),
            Err(GhostmeshError::Numerical(_))
        ));
    }
}
