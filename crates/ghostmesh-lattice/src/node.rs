// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — GhostMesh Sovereign Node
// ─────────────────────────────────────────────────────────────────────
//! A single lattice cell: fixed position, vector state, confidence, and
//! neighbour indices into the owning lattice's node arena.

use serde::{Deserialize, Serialize};

use ghostmesh_types::Position;

/// One cell of the volumetric grid.
///
/// `neighbors` are arena indices, not owning references: the lattice
/// owns every node and the links are fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    position: Position,
    pub(crate) state: Vec<f64>,
    /// Coherence carried alongside the state. Never clamped.
    pub confidence: f64,
    pub(crate) neighbors: Vec<usize>,
}

impl Node {
    pub(crate) fn new(position: Position, state: Vec<f64>) -> Self {
        Self {
            position,
            state,
            confidence: 1.0,
            neighbors: Vec::new(),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn state(&self) -> &[f64] {
        &self.state
    }

    pub fn dimension(&self) -> usize {
        self.state.len()
    }

    /// Arena indices of the Von Neumann neighbours.
    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }

    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Mean of the state vector.
    pub fn average(&self) -> f64 {
        if self.state.is_empty() {
            return 0.0;
        }
        self.state.iter().sum::<f64>() / self.state.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_defaults() {
        let node = Node::new(Position::new(1, 2, 0), vec![0.5, -0.5, 1.0]);
        assert_eq!(node.position(), Position::new(1, 2, 0));
        assert_eq!(node.dimension(), 3);
        assert_eq!(node.confidence, 1.0);
        assert_eq!(node.neighbor_count(), 0);
    }

    #[test]
    fn test_average() {
        let node = Node::new(Position::new(0, 0, 0), vec![1.0, 2.0, 3.0, 6.0]);
        assert!((node.average() - 3.0).abs() < 1e-12);
    }
}
