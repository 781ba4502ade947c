use ndarray::{Array1, ArrayView1};

use crate::Result;

/// What a minimization run ended with.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizeResult {
    /// Whether the minimizer considers it converged.
    pub success: bool,
    /// The point it stopped at.
    pub x: Array1<f64>,
    /// The objective's value at `x`.
    pub fun: f64,
    /// The amount of iterations it took.
    pub nit: usize,
    /// A human readable reason for stopping.
    pub message: String,
}

/// Minimizes a differentiable function of a flat vector.
pub trait Minimizer {
    /// Minimizes `objective` starting at `x0`.
    ///
    /// # Arguments
    /// * `objective` - Maps a point to its value and gradient.
    /// * `x0` - The starting point.
    ///
    /// # Returns
    /// The outcome of the run. Not converging is reported through `MinimizeResult::success`;
    /// errors coming out of `objective` must be returned unmodified.
    fn minimize<F>(&mut self, objective: F, x0: Array1<f64>) -> Result<MinimizeResult>
    where
        F: FnMut(ArrayView1<f64>) -> Result<(f64, Array1<f64>)>;
}
