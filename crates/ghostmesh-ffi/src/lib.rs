// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — GhostMesh Kernel PyO3 FFI Bindings
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
// Note: #[deny(unsafe_code)] not applied; PyO3 proc macros generate
// unsafe blocks internally. All hand-written code in this crate is safe.
//! Python-callable wrappers around the GhostMesh lattice and cortex.
//!
//! Every `GhostmeshError` surfaces as a Python `ValueError`.
//!
//! Usage from Python:
//! ```python
//! from ghostmesh_kernel import build_lattice, anneal
//!
//! lattice = build_lattice(64, 3)
//! vec, conf = lattice.step([0.0] * 64, 1.0)
//! gdf = lattice.order_metric()
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use ghostmesh_cortex::{
    LetheConfig, LetheEngine, LuoShuMetrics, MemoryRecord, MetacognitiveSupervisor,
    SupervisorConfig, TelemetryState,
};
use ghostmesh_lattice::{Lattice, LatticeConfig, Position};
use ghostmesh_types::{GhostmeshError, StepSummary};

fn to_py_err(e: GhostmeshError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

// ─── PyLatticeConfig ────────────────────────────────────────────────

#[pyclass(name = "LatticeConfig")]
#[derive(Clone)]
struct PyLatticeConfig {
    inner: LatticeConfig,
}

#[pymethods]
impl PyLatticeConfig {
    #[new]
    #[pyo3(signature = (
        dimension = 64,
        grid_size = 3,
        coupling = 0.1,
        damping = ghostmesh_types::TAU_SOVEREIGN,
        dt = 0.1,
        init_std = 0.1,
        reference_position = [1, 1, 1],
        reference_scale = 1.0,
        diffuse_scale = 0.1,
        seed = None,
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        dimension: usize,
        grid_size: usize,
        coupling: f64,
        damping: f64,
        dt: f64,
        init_std: f64,
        reference_position: [usize; 3],
        reference_scale: f64,
        diffuse_scale: f64,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        let config = LatticeConfig {
            dimension,
            grid_size,
            coupling,
            damping,
            dt,
            init_std,
            reference_position,
            reference_scale,
            diffuse_scale,
            seed,
        };
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    /// Construct from JSON string.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let config = LatticeConfig::from_json(json).map_err(to_py_err)?;
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    fn to_json(&self) -> PyResult<String> {
        self.inner.to_json().map_err(to_py_err)
    }

    #[getter]
    fn dimension(&self) -> usize {
        self.inner.dimension
    }

    #[getter]
    fn grid_size(&self) -> usize {
        self.inner.grid_size
    }

    fn __repr__(&self) -> String {
        format!(
            "LatticeConfig(dimension={}, grid_size={}, coupling={}, seed={:?})",
            self.inner.dimension, self.inner.grid_size, self.inner.coupling, self.inner.seed
        )
    }
}

// ─── PyLattice ──────────────────────────────────────────────────────

#[pyclass(name = "Lattice")]
struct PyLattice {
    inner: Lattice,
}

fn summary_dict<'py>(py: Python<'py>, summary: &StepSummary) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("state", summary.state.clone())?;
    dict.set_item("confidence", summary.confidence)?;
    dict.set_item("average", summary.average())?;
    dict.set_item("total", summary.total())?;
    dict.set_item("step_count", summary.step_count)?;
    Ok(dict)
}

#[pymethods]
impl PyLattice {
    #[new]
    #[pyo3(signature = (config = None))]
    fn new(config: Option<PyLatticeConfig>) -> PyResult<Self> {
        let cfg = config.map(|c| c.inner).unwrap_or_default();
        let inner = Lattice::new(&cfg).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Inject, diffuse, aggregate. Returns `(summary_vector, confidence)`.
    #[pyo3(signature = (input, input_confidence = 1.0))]
    fn step(&mut self, input: Vec<f64>, input_confidence: f64) -> PyResult<(Vec<f64>, f64)> {
        ghostmesh_lattice::step(&mut self.inner, &input, input_confidence).map_err(to_py_err)
    }

    fn order_metric(&self) -> f64 {
        self.inner.order_metric()
    }

    fn summary<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        summary_dict(py, &self.inner.summary())
    }

    fn node_state(&self, x: usize, y: usize, z: usize) -> PyResult<Vec<f64>> {
        self.inner
            .node(Position::new(x, y, z))
            .map(|n| n.state().to_vec())
            .ok_or_else(|| {
                PyValueError::new_err(format!("position ({x}, {y}, {z}) outside the grid"))
            })
    }

    fn set_node_state(&mut self, x: usize, y: usize, z: usize, state: Vec<f64>) -> PyResult<()> {
        self.inner
            .set_state(Position::new(x, y, z), &state)
            .map_err(to_py_err)
    }

    /// Largest |flux| of the last diffusion pass (convergence diagnostic).
    fn max_flux(&self) -> f64 {
        self.inner.max_flux()
    }

    fn energies(&self) -> Vec<f64> {
        self.inner.energies()
    }

    fn alignment_invariant(&self) -> f64 {
        self.inner.alignment_invariant()
    }

    #[getter]
    fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    #[getter]
    fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    #[getter]
    fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    #[getter]
    fn step_count(&self) -> u64 {
        self.inner.step_count()
    }

    fn __repr__(&self) -> String {
        format!(
            "Lattice(grid={}^3, dimension={}, steps={})",
            self.inner.grid_size(),
            self.inner.dimension(),
            self.inner.step_count()
        )
    }
}

// ─── PyMetacognitiveSupervisor ──────────────────────────────────────

#[pyclass(name = "MetacognitiveSupervisor")]
struct PySupervisor {
    inner: MetacognitiveSupervisor,
}

#[pymethods]
impl PySupervisor {
    #[new]
    #[pyo3(signature = (min_confidence = 0.75, drift_threshold = 0.15, history_window = 100))]
    fn new(min_confidence: f64, drift_threshold: f64, history_window: usize) -> PyResult<Self> {
        let config = SupervisorConfig {
            min_confidence,
            drift_threshold,
            history_window,
            ..SupervisorConfig::default()
        };
        let inner = MetacognitiveSupervisor::new(config).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Returns `(decision, rationale)`.
    fn audit(&self, coherence: f64, lambda_val: f64) -> (String, String) {
        let audit = self.inner.audit(TelemetryState::new(coherence, lambda_val));
        (audit.decision.as_str().to_string(), audit.rationale)
    }

    fn confidence(&self, coherence: f64, lambda_val: f64) -> f64 {
        self.inner
            .confidence(&TelemetryState::new(coherence, lambda_val))
    }

    fn permission_level(&self, coherence: f64, lambda_val: f64) -> &'static str {
        self.inner
            .permission_level(&TelemetryState::new(coherence, lambda_val))
            .as_str()
    }

    #[getter]
    fn history_len(&self) -> usize {
        self.inner.history_len()
    }

    fn reset(&self) {
        self.inner.reset();
    }
}

// ─── PyLetheEngine ──────────────────────────────────────────────────

#[pyclass(name = "LetheEngine")]
struct PyLetheEngine {
    inner: LetheEngine,
}

#[pymethods]
impl PyLetheEngine {
    #[new]
    #[pyo3(signature = (survival_threshold = 0.1, promotion_threshold = 0.8))]
    fn new(survival_threshold: f64, promotion_threshold: f64) -> PyResult<Self> {
        let config = LetheConfig {
            survival_threshold,
            promotion_threshold,
            ..LetheConfig::default()
        };
        let inner = LetheEngine::new(config).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Ingest one record and decay the working set. Returns a dict with
    /// `survivors`, `pruned` and `promoted` counts.
    #[pyo3(signature = (content, timestamp_s, now_s, meta = String::new(), retrievals = 0))]
    fn metabolize<'py>(
        &mut self,
        py: Python<'py>,
        content: String,
        timestamp_s: f64,
        now_s: f64,
        meta: String,
        retrievals: u32,
    ) -> PyResult<Bound<'py, PyDict>> {
        let record = MemoryRecord::new(content, meta, timestamp_s).with_retrievals(retrievals);
        let out = self.inner.metabolize(record, now_s);
        let dict = PyDict::new(py);
        dict.set_item("survivors", out.survivors)?;
        dict.set_item("pruned", out.pruned)?;
        dict.set_item("promoted", out.promoted)?;
        Ok(dict)
    }

    fn reinforce(&mut self, index: usize) -> PyResult<()> {
        self.inner.reinforce(index).map_err(to_py_err)
    }

    fn working_memory(&self) -> Vec<String> {
        self.inner
            .working_memory()
            .iter()
            .map(|m| m.content.clone())
            .collect()
    }

    fn milestones(&self) -> Vec<String> {
        self.inner
            .milestones()
            .iter()
            .map(|m| m.content.clone())
            .collect()
    }
}

// ─── Functions ──────────────────────────────────────────────────────

#[pyfunction]
fn build_lattice(dimension: usize, grid_size: usize) -> PyResult<PyLattice> {
    let inner = ghostmesh_lattice::build_lattice(dimension, grid_size).map_err(to_py_err)?;
    Ok(PyLattice { inner })
}

/// Temperature softmax rescaled to sum to 144.
#[pyfunction]
#[pyo3(signature = (values, temperature = 1.0))]
fn anneal(values: Vec<f64>, temperature: f64) -> PyResult<Vec<f64>> {
    ghostmesh_lattice::anneal(&values, temperature).map_err(to_py_err)
}

#[pyfunction]
fn calculate_alpha(snr: f64, rho: f64, entropic_flux: f64) -> f64 {
    ghostmesh_cortex::calculate_alpha(snr, rho, entropic_flux)
}

#[pyfunction]
fn signal_strength(alpha: f64) -> &'static str {
    ghostmesh_cortex::SignalStrength::from_alpha(alpha).as_str()
}

/// Evaluate Luo Shu alignment. Missing metrics take their nominal defaults.
#[pyfunction]
#[pyo3(signature = (metrics_json = "{}"))]
fn evaluate_luo_shu<'py>(py: Python<'py>, metrics_json: &str) -> PyResult<Bound<'py, PyDict>> {
    let metrics: LuoShuMetrics = serde_json::from_str(metrics_json)
        .map_err(|e| PyValueError::new_err(format!("metrics JSON parse error: {e}")))?;
    let report = ghostmesh_cortex::evaluate_luo_shu(&metrics);
    let dict = PyDict::new(py);
    let grid: Vec<Vec<f64>> = report.grid.iter().map(|r| r.to_vec()).collect();
    dict.set_item("grid", grid)?;
    dict.set_item("torsion", report.torsion)?;
    dict.set_item("compliance", report.compliance)?;
    dict.set_item("status", report.status.as_str())?;
    Ok(dict)
}

// ─── Module ─────────────────────────────────────────────────────────

#[pymodule]
fn ghostmesh_kernel(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Lattice
    m.add_class::<PyLatticeConfig>()?;
    m.add_class::<PyLattice>()?;
    m.add_function(wrap_pyfunction!(build_lattice, m)?)?;
    m.add_function(wrap_pyfunction!(anneal, m)?)?;
    // Cortex
    m.add_class::<PySupervisor>()?;
    m.add_class::<PyLetheEngine>()?;
    m.add_function(wrap_pyfunction!(calculate_alpha, m)?)?;
    m.add_function(wrap_pyfunction!(signal_strength, m)?)?;
    m.add_function(wrap_pyfunction!(evaluate_luo_shu, m)?)?;
    m.add("ALIGNMENT_INVARIANT", ghostmesh_types::ALIGNMENT_INVARIANT)?;
    m.add("TAU_SOVEREIGN", ghostmesh_types::TAU_SOVEREIGN)?;
    Ok(())
}
