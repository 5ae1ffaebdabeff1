// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — GhostMesh Sovereign Grid
// ─────────────────────────────────────────────────────────────────────
//! The volumetric lattice: `grid_size³` nodes in a flat arena with a
//! fixed Von Neumann neighbour topology.
//!
//! One step:
//!   1. Inject input (reference node at full scale, the rest diffuse)
//!   2. Flux diffusion (snapshot-then-commit)
//!   3. Aggregate (holographic projection)

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use ghostmesh_types::{GhostmeshError, GhostmeshResult, LatticeConfig, Position, StepSummary};

use crate::aggregate::aggregate;
use crate::diffusion::{DiffusionParams, FluxDiffuser};
use crate::node::Node;
use crate::order;
use crate::params::{ALIGNMENT_INVARIANT, VON_NEUMANN_SHIFTS};

/// Cubic lattice of sovereign nodes.
///
/// Single owner, mutated in place by `step`. Every mutating method takes
/// `&mut self`; share across threads only behind external synchronisation.
#[derive(Debug, Clone)]
pub struct Lattice {
    config: LatticeConfig,
    nodes: Vec<Node>,
    reference: Option<usize>,
    diffuser: FluxDiffuser,
    step_count: u64,
}

impl Lattice {
    /// Build every node and link neighbours. Validates `config` first;
    /// no partial lattice is returned on error.
    pub fn new(config: &LatticeConfig) -> GhostmeshResult<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let normal = Normal::new(0.0, config.init_std)
            .map_err(|e| GhostmeshError::Config(format!("init_std: {e}")))?;

        let g = config.grid_size;
        let d = config.dimension;
        let mut nodes = Vec::with_capacity(config.node_count());
        for x in 0..g {
            for y in 0..g {
                for z in 0..g {
                    let state: Vec<f64> = (0..d).map(|_| normal.sample(&mut rng)).collect();
                    nodes.push(Node::new(Position::new(x, y, z), state));
                }
            }
        }

        // Link neighbours once every node exists.
        for idx in 0..nodes.len() {
            let pos = nodes[idx].position();
            nodes[idx].neighbors = VON_NEUMANN_SHIFTS
                .iter()
                .filter_map(|&shift| pos.offset(shift, g))
                .map(|p| flat_index(p, g))
                .collect();
        }

        let reference = if config.reference_in_grid() {
            Some(flat_index(config.reference_position.into(), g))
        } else {
            log::warn!(
                "reference position {:?} outside grid of size {g}; all nodes get diffuse input",
                config.reference_position
            );
            None
        };

        let diffuser = FluxDiffuser::new(DiffusionParams::from_config(config), nodes.len(), d);

        let lattice = Self {
            config: config.clone(),
            nodes,
            reference,
            diffuser,
            step_count: 0,
        };
        log::debug!(
            "lattice built: {} nodes, {} edges, dimension {d}",
            lattice.node_count(),
            lattice.edge_count()
        );
        Ok(lattice)
    }

    /// Default-configured lattice of the given shape.
    pub fn build(dimension: usize, grid_size: usize) -> GhostmeshResult<Self> {
        Self::new(&LatticeConfig::with_shape(dimension, grid_size))
    }

    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }

    pub fn dimension(&self) -> usize {
        self.config.dimension
    }

    pub fn grid_size(&self) -> usize {
        self.config.grid_size
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Undirected neighbour links, each adjacent pair counted once.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(Node::neighbor_count).sum::<usize>() / 2
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Arena index of `position`, if it lies in the grid.
    pub fn index_of(&self, position: Position) -> Option<usize> {
        let g = self.grid_size();
        position
            .as_array()
            .iter()
            .all(|&c| c < g)
            .then(|| flat_index(position, g))
    }

    pub fn node(&self, position: Position) -> Option<&Node> {
        self.index_of(position).map(|i| &self.nodes[i])
    }

    /// Node receiving full-scale injection, if the reference is in the grid.
    pub fn reference_node(&self) -> Option<&Node> {
        self.reference.map(|i| &self.nodes[i])
    }

    /// Overwrite one node's state.
    pub fn set_state(&mut self, position: Position, state: &[f64]) -> GhostmeshResult<()> {
        self.check_shape(state)?;
        let idx = self.require_index(position)?;
        self.nodes[idx].state.copy_from_slice(state);
        Ok(())
    }

    /// Overwrite one node's confidence. Not clamped.
    pub fn set_confidence(&mut self, position: Position, confidence: f64) -> GhostmeshResult<()> {
        let idx = self.require_index(position)?;
        self.nodes[idx].confidence = confidence;
        Ok(())
    }

    /// Add `scale · input` to every node's state.
    ///
    /// The reference node uses `reference_scale`, all others
    /// `diffuse_scale`. The input is validated before any node is touched.
    /// `_input_confidence` is accepted and currently has no effect on node
    /// confidence.
    pub fn inject(&mut self, input: &[f64], _input_confidence: f64) -> GhostmeshResult<()> {
        self.check_shape(input)?;
        if let Some(bad) = input.iter().position(|v| !v.is_finite()) {
            return Err(GhostmeshError::Numerical(format!(
                "input contains non-finite value {} at index {bad}",
                input[bad]
            )));
        }

        let reference_scale = self.config.reference_scale;
        let diffuse_scale = self.config.diffuse_scale;
        for (idx, node) in self.nodes.iter_mut().enumerate() {
            let scale = if Some(idx) == self.reference {
                reference_scale
            } else {
                diffuse_scale
            };
            for (s, &i) in node.state.iter_mut().zip(input) {
                *s += scale * i;
            }
        }
        Ok(())
    }

    /// One snapshot-then-commit diffusion pass.
    pub fn diffuse(&mut self) {
        self.diffuser.step(&mut self.nodes);
    }

    /// Aggregate of the current state. Does not mutate.
    pub fn summary(&self) -> StepSummary {
        aggregate(&self.nodes, self.dimension(), self.step_count)
    }

    /// Inject, diffuse, and aggregate.
    pub fn step(&mut self, input: &[f64], input_confidence: f64) -> GhostmeshResult<StepSummary> {
        self.inject(input, input_confidence)?;
        self.diffuse();
        self.step_count += 1;
        Ok(self.summary())
    }

    /// Run `n_steps` steps with the same input, returning the last summary.
    pub fn run(
        &mut self,
        input: &[f64],
        input_confidence: f64,
        n_steps: u64,
    ) -> GhostmeshResult<StepSummary> {
        let mut summary = self.summary();
        for _ in 0..n_steps {
            summary = self.step(input, input_confidence)?;
        }
        Ok(summary)
    }

    /// Ghost density factor in `[1.8, 3.0]`. Does not mutate.
    pub fn order_metric(&self) -> f64 {
        order::order_metric(&self.nodes)
    }

    /// Per-node energies (mean |state|) in arena order.
    pub fn energies(&self) -> Vec<f64> {
        order::energy_distribution(&self.nodes)
    }

    /// Largest |flux| component of the most recent diffusion pass; 0.0
    /// before the first step.
    pub fn max_flux(&self) -> f64 {
        self.diffuser.max_flux()
    }

    /// The Luo Shu reference total. Advisory; never enforced.
    pub fn alignment_invariant(&self) -> f64 {
        ALIGNMENT_INVARIANT
    }

    fn check_shape(&self, v: &[f64]) -> GhostmeshResult<()> {
        if v.len() != self.dimension() {
            return Err(GhostmeshError::ShapeMismatch {
                expected: self.dimension(),
                actual: v.len(),
            });
        }
        Ok(())
    }

    fn require_index(&self, position: Position) -> GhostmeshResult<usize> {
        self.index_of(position).ok_or_else(|| {
            GhostmeshError::Validation(format!(
                "position {:?} outside grid of size {}",
                position.as_array(),
                self.grid_size()
            ))
        })
    }
}

/// x-major arena index: `(x·g + y)·g + z`.
#[inline]
fn flat_index(p: Position, g: usize) -> usize {
    (p.x * g + p.y) * g + p.z
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{MAX_NEIGHBORS, ORDER_BASELINE, ORDER_CEILING};

    fn seeded(dimension: usize, grid_size: usize, seed: u64) -> Lattice {
        Lattice::new(&LatticeConfig::with_shape(dimension, grid_size).seeded(seed)).unwrap()
    }

    #[test]
    fn test_node_count_and_unique_positions() {
        let lattice = seeded(8, 4, 1);
        assert_eq!(lattice.node_count(), 64);
        let mut positions: Vec<Position> = lattice.nodes().iter().map(Node::position).collect();
        positions.sort();
        positions.dedup();
        assert_eq!(positions.len(), 64);
    }

    #[test]
    fn test_arena_index_matches_position() {
        let lattice = seeded(2, 3, 1);
        for (i, node) in lattice.nodes().iter().enumerate() {
            assert_eq!(lattice.index_of(node.position()), Some(i));
        }
        assert_eq!(lattice.index_of(Position::new(3, 0, 0)), None);
    }

    #[test]
    fn test_initial_state_shape_and_confidence() {
        let lattice = seeded(16, 3, 9);
        for node in lattice.nodes() {
            assert_eq!(node.dimension(), 16);
            assert_eq!(node.confidence, 1.0);
            assert!(node.state().iter().all(|v| v.is_finite() && v.abs() < 1.0));
        }
    }

    #[test]
    fn test_neighbor_count_by_boundary() {
        for g in 2..=5 {
            let lattice = seeded(1, g, 3);
            for node in lattice.nodes() {
                let expected = MAX_NEIGHBORS - node.position().boundary_faces(g);
                assert_eq!(
                    node.neighbor_count(),
                    expected,
                    "node {:?} in grid {g}",
                    node.position()
                );
            }
        }
    }

    #[test]
    fn test_neighbors_are_unit_axis_steps() {
        let lattice = seeded(1, 4, 3);
        for node in lattice.nodes() {
            let p = node.position().as_array();
            for &j in node.neighbors() {
                let q = lattice.nodes()[j].position().as_array();
                let dist: usize = p.iter().zip(&q).map(|(a, b)| a.abs_diff(*b)).sum();
                assert_eq!(dist, 1);
                // Links are symmetric.
                let back = lattice.index_of(node.position()).unwrap();
                assert!(lattice.nodes()[j].neighbors().contains(&back));
            }
        }
    }

    #[test]
    fn test_edge_count() {
        for g in 1..=5 {
            let lattice = seeded(1, g, 3);
            assert_eq!(lattice.edge_count(), 3 * g * g * (g - 1), "grid {g}");
        }
    }

    #[test]
    fn test_single_node_grid() {
        let lattice = seeded(4, 1, 3);
        assert_eq!(lattice.node_count(), 1);
        assert_eq!(lattice.nodes()[0].neighbor_count(), 0);
        assert!(lattice.reference_node().is_none());
    }

    #[test]
    fn test_construction_errors() {
        assert!(matches!(
            Lattice::build(0, 3),
            Err(GhostmeshError::Construction(_))
        ));
        assert!(matches!(
            Lattice::build(4, 0),
            Err(GhostmeshError::Construction(_))
        ));
    }

    #[test]
    fn test_same_seed_same_lattice() {
        let a = seeded(8, 3, 42);
        let b = seeded(8, 3, 42);
        assert_eq!(a.nodes(), b.nodes());
        let c = seeded(8, 3, 43);
        assert_ne!(a.nodes(), c.nodes());
    }

    #[test]
    fn test_inject_scales() {
        let mut lattice = seeded(2, 3, 5);
        let before: Vec<Vec<f64>> = lattice.nodes().iter().map(|n| n.state().to_vec()).collect();
        lattice.inject(&[2.0, -1.0], 0.3).unwrap();

        let reference = lattice.index_of(Position::new(1, 1, 1)).unwrap();
        for (i, node) in lattice.nodes().iter().enumerate() {
            let scale = if i == reference { 1.0 } else { 0.1 };
            assert!((node.state()[0] - (before[i][0] + 2.0 * scale)).abs() < 1e-12);
            assert!((node.state()[1] - (before[i][1] - scale)).abs() < 1e-12);
            assert_eq!(node.confidence, 1.0);
        }
    }

    #[test]
    fn test_inject_without_reference_is_diffuse() {
        let mut lattice = seeded(1, 1, 5);
        let before = lattice.nodes()[0].state()[0];
        lattice.inject(&[1.0], 1.0).unwrap();
        assert!((lattice.nodes()[0].state()[0] - (before + 0.1)).abs() < 1e-12);
    }

    #[test]
    fn test_shape_mismatch_leaves_state_untouched() {
        let mut lattice = seeded(4, 3, 5);
        let snapshot = lattice.nodes().to_vec();
        let err = lattice.step(&[1.0, 0.0], 1.0).unwrap_err();
        assert_eq!(
            err,
            GhostmeshError::ShapeMismatch {
                expected: 4,
                actual: 2
            }
        );
        assert_eq!(lattice.nodes(), &snapshot[..]);
        assert_eq!(lattice.step_count(), 0);
    }

    #[test]
    fn test_non_finite_input_rejected() {
        let mut lattice = seeded(2, 3, 5);
        let snapshot = lattice.nodes().to_vec();
        assert!(matches!(
            lattice.step(&[f64::NAN, 0.0], 1.0),
            Err(GhostmeshError::Numerical(_))
        ));
        assert_eq!(lattice.nodes(), &snapshot[..]);
    }

    #[test]
    fn test_step_matches_snapshot_formula() {
        let mut lattice = seeded(3, 3, 17);
        let input = [0.4, -0.2, 1.0];
        let reference = lattice.index_of(Position::new(1, 1, 1)).unwrap();

        // Expected: inject into a copy, then compute every update from that copy.
        let injected: Vec<Vec<f64>> = lattice
            .nodes()
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let scale = if i == reference { 1.0 } else { 0.1 };
                n.state()
                    .iter()
                    .zip(&input)
                    .map(|(s, x)| s + scale * x)
                    .collect()
            })
            .collect();
        let factor = lattice.config().rate() * lattice.config().dt;
        let expected: Vec<Vec<f64>> = lattice
            .nodes()
            .iter()
            .enumerate()
            .map(|(i, n)| {
                (0..3)
                    .map(|k| {
                        let flux: f64 = n
                            .neighbors()
                            .iter()
                            .map(|&j| injected[j][k] - injected[i][k])
                            .sum();
                        injected[i][k] + flux * factor
                    })
                    .collect()
            })
            .collect();

        lattice.step(&input, 1.0).unwrap();
        for (i, node) in lattice.nodes().iter().enumerate() {
            for k in 0..3 {
                assert!(
                    (node.state()[k] - expected[i][k]).abs() < 1e-12,
                    "node {i} component {k}: {} vs {}",
                    node.state()[k],
                    expected[i][k]
                );
            }
        }
    }

    #[test]
    fn test_zero_coupling_freezes_diffusion() {
        let cfg = LatticeConfig {
            coupling: 0.0,
            ..LatticeConfig::with_shape(4, 3).seeded(2)
        };
        let mut lattice = Lattice::new(&cfg).unwrap();
        let snapshot = lattice.nodes().to_vec();
        for _ in 0..10 {
            lattice.diffuse();
        }
        assert_eq!(lattice.nodes(), &snapshot[..]);
    }

    #[test]
    fn test_max_flux_tracks_last_step() {
        let mut lattice = seeded(2, 3, 4);
        assert_eq!(lattice.max_flux(), 0.0);

        lattice.step(&[0.0, 0.0], 1.0).unwrap();
        assert!(lattice.max_flux() > 0.0);

        let positions: Vec<Position> = lattice.nodes().iter().map(|n| n.position()).collect();
        for p in positions {
            lattice.set_state(p, &[0.25, -0.25]).unwrap();
        }
        lattice.diffuse();
        assert_eq!(lattice.max_flux(), 0.0);
    }

    #[test]
    fn test_summary_is_pure() {
        let lattice = seeded(4, 3, 2);
        let snapshot = lattice.nodes().to_vec();
        let a = lattice.summary();
        let b = lattice.summary();
        assert_eq!(a, b);
        assert_eq!(lattice.nodes(), &snapshot[..]);
        assert_eq!(a.confidence, 1.0);
    }

    #[test]
    fn test_step_summary_is_mean_of_nodes() {
        let mut lattice = seeded(2, 3, 8);
        let summary = lattice.step(&[1.0, 0.5], 0.9).unwrap();
        let n = lattice.node_count() as f64;
        for k in 0..2 {
            let mean: f64 = lattice.nodes().iter().map(|nd| nd.state()[k]).sum::<f64>() / n;
            assert!((summary.state[k] - mean).abs() < 1e-12);
        }
        assert_eq!(summary.step_count, 1);
        assert_eq!(summary.confidence, 1.0);
    }

    #[test]
    fn test_run_counts_steps() {
        let mut lattice = seeded(2, 3, 8);
        let summary = lattice.run(&[0.0, 0.0], 1.0, 25).unwrap();
        assert_eq!(lattice.step_count(), 25);
        assert_eq!(summary.step_count, 25);
    }

    #[test]
    fn test_order_metric_bounds_over_run() {
        let mut lattice = seeded(8, 3, 21);
        let input = vec![0.5; 8];
        for _ in 0..50 {
            lattice.step(&input, 1.0).unwrap();
            let order = lattice.order_metric();
            assert!(
                (ORDER_BASELINE..=ORDER_CEILING).contains(&order),
                "order={order}"
            );
        }
    }

    #[test]
    fn test_order_metric_uniform_and_concentrated() {
        let mut lattice = seeded(2, 3, 4);
        let positions: Vec<Position> = lattice.nodes().iter().map(Node::position).collect();
        for &p in &positions {
            lattice.set_state(p, &[0.5, -0.5]).unwrap();
        }
        assert!((lattice.order_metric() - ORDER_BASELINE).abs() < 1e-6);

        for &p in &positions {
            lattice.set_state(p, &[0.0, 0.0]).unwrap();
        }
        assert_eq!(lattice.order_metric(), ORDER_BASELINE);

        lattice
            .set_state(Position::new(2, 0, 1), &[3.0, 1.0])
            .unwrap();
        assert!((lattice.order_metric() - ORDER_CEILING).abs() < 1e-6);
    }

    #[test]
    fn test_set_state_validation() {
        let mut lattice = seeded(2, 3, 4);
        assert!(matches!(
            lattice.set_state(Position::new(0, 0, 0), &[1.0]),
            Err(GhostmeshError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            lattice.set_state(Position::new(0, 3, 0), &[1.0, 2.0]),
            Err(GhostmeshError::Validation(_))
        ));
    }

    #[test]
    fn test_set_confidence_feeds_summary() {
        let mut lattice = seeded(1, 2, 4);
        lattice.set_confidence(Position::new(0, 0, 0), 0.0).unwrap();
        // 7 nodes at 1.0, one at 0.0
        assert!((lattice.summary().confidence - 7.0 / 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_alignment_invariant() {
        let lattice = seeded(1, 2, 4);
        assert_eq!(lattice.alignment_invariant(), 15.0);
    }
}
