use numpy::ndarray::Array2;
use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

pub mod core;
pub mod error;

use crate::core::{Species, SystemState};

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Python-facing wrapper around the Rust simulation core.
///
/// The display/control layer (matplotlib animation, sliders, buttons)
/// lives in Python and drives this handle: `advance` once per animation
/// tick, the setters from widget callbacks, and the getters for drawing.
#[pyclass]
pub struct GasBox {
    state: SystemState,
}

#[pymethods]
impl GasBox {
    /// Create an empty enclosure.
    ///
    /// Parameters
    /// - temperature: ambient temperature in kelvin (> 0), default 300
    /// - height: enclosure height (> 0), default 2500; width is fixed at 2500
    /// - seed: RNG seed (int) for reproducibility; None for nondeterministic
    ///
    /// Errors: raises ValueError on invalid parameters.
    #[new]
    #[pyo3(signature = (temperature=300.0, height=2500.0, seed=None))]
    fn new(temperature: f64, height: f64, seed: Option<u64>) -> PyResult<Self> {
        let state = SystemState::with_params(temperature, height, seed).map_err(py_err)?;
        Ok(Self { state })
    }

    /// Spawn one particle of the given species.
    ///
    /// Accepted tags: "helium", "neon", "argon", "krypton".
    fn add_particle(&mut self, species: &str) -> PyResult<()> {
        let species: Species = species.parse().map_err(py_err)?;
        self.state.add_particle(species).map_err(py_err)
    }

    /// Set the ambient temperature (K) and rescale every particle's
    /// velocity by the temperature ratio.
    fn set_temperature(&mut self, temperature: f64) -> PyResult<()> {
        self.state.update_temperatures(temperature).map_err(py_err)
    }

    /// Set the enclosure height; particles above the new ceiling are
    /// clamped onto it with their vertical velocity flipped.
    fn set_height(&mut self, height: f64) -> PyResult<()> {
        self.state.update_height(height).map_err(py_err)
    }

    /// Advance every particle by `dt`, resolving wall bounces at their
    /// exact hit times (releases the GIL during computation).
    fn advance(&mut self, py: Python<'_>, dt: f64) -> PyResult<()> {
        py.allow_threads(|| self.state.update_positions(dt)).map_err(py_err)
    }

    /// Return positions as a NumPy array of shape (N, 2), dtype=float64.
    fn get_positions<'py>(&self, py: Python<'py>) -> PyResult<Py<PyArray2<f64>>> {
        let n = self.state.num_particles();
        let mut arr = Array2::<f64>::zeros((n, 2));
        for (i, p) in self.state.particles.iter().enumerate() {
            arr[[i, 0]] = p.x;
            arr[[i, 1]] = p.y;
        }
        Ok(arr.into_pyarray(py).to_owned().into())
    }

    /// Return velocities as a NumPy array of shape (N, 2), dtype=float64.
    fn get_velocities<'py>(&self, py: Python<'py>) -> PyResult<Py<PyArray2<f64>>> {
        let n = self.state.num_particles();
        let mut arr = Array2::<f64>::zeros((n, 2));
        for (i, p) in self.state.particles.iter().enumerate() {
            arr[[i, 0]] = p.vx;
            arr[[i, 1]] = p.vy;
        }
        Ok(arr.into_pyarray(py).to_owned().into())
    }

    /// Return one display-color tag per particle, parallel to
    /// `get_positions` (matplotlib color names).
    fn get_colors(&self) -> Vec<&'static str> {
        self.state
            .colors()
            .into_iter()
            .map(|c| c.as_str())
            .collect()
    }

    /// Total wall-bounce events since creation.
    fn collision_count(&self) -> u64 {
        self.state.collisions()
    }

    /// Number of particles.
    fn num_particles(&self) -> usize {
        self.state.num_particles()
    }

    /// Current ambient temperature (K).
    fn temperature(&self) -> f64 {
        self.state.temperature()
    }

    /// Current enclosure height.
    fn height(&self) -> f64 {
        self.state.height()
    }

    /// Enclosure width (fixed).
    fn width(&self) -> f64 {
        self.state.width()
    }

    /// Set all particle positions from a NumPy array of shape (N, 2),
    /// dtype=float64. Values must be finite and inside the enclosure.
    fn set_positions<'py>(&mut self, positions: PyReadonlyArray2<'py, f64>) -> PyResult<()> {
        let arr = positions.as_array();
        let n = self.state.num_particles();
        if arr.shape() != [n, 2] {
            return Err(py_err(format!(
                "positions must have shape ({n}, 2), got {:?}",
                arr.shape()
            )));
        }
        let (width, height) = (self.state.width(), self.state.height());
        for i in 0..n {
            let (x, y) = (arr[[i, 0]], arr[[i, 1]]);
            if !x.is_finite() || !y.is_finite() {
                return Err(py_err("position values must be finite"));
            }
            if !(0.0..=width).contains(&x) || !(0.0..=height).contains(&y) {
                return Err(py_err(format!(
                    "position ({x}, {y}) lies outside the enclosure"
                )));
            }
            self.state.particles[i].x = x;
            self.state.particles[i].y = y;
        }
        Ok(())
    }

    /// Set all particle velocities from a NumPy array of shape (N, 2),
    /// dtype=float64. Values must be finite.
    fn set_velocities<'py>(&mut self, velocities: PyReadonlyArray2<'py, f64>) -> PyResult<()> {
        let arr = velocities.as_array();
        let n = self.state.num_particles();
        if arr.shape() != [n, 2] {
            return Err(py_err(format!(
                "velocities must have shape ({n}, 2), got {:?}",
                arr.shape()
            )));
        }
        for i in 0..n {
            let (vx, vy) = (arr[[i, 0]], arr[[i, 1]]);
            if !vx.is_finite() || !vy.is_finite() {
                return Err(py_err("velocity values must be finite"));
            }
            self.state.particles[i].vx = vx;
            self.state.particles[i].vy = vy;
        }
        Ok(())
    }
}

/// The noblebox Python module entry point.
#[pymodule]
fn noblebox(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<GasBox>()?;
    Ok(())
}
