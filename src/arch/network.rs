use ndarray::{Array2, ArrayView2};

use super::{activations::ActFn, loss::ErrFn};
use crate::Result;

/// Everything a forward pass produces.
#[derive(Debug, Clone)]
pub struct Forward {
    /// Pre-activations per layer, `z[0]` being the input itself.
    pub z: Vec<Array2<f64>>,
    /// Activations per layer. Every layer but the last carries a leading row of ones when the
    /// network has bias units, so `a[i]` is exactly what `weights[i]` multiplies.
    pub a: Vec<Array2<f64>>,
    /// Error plus regularization, normalized by the amount of examples.
    pub cost: f64,
}

impl Forward {
    /// The network's output for every example.
    pub fn hypothesis(&self) -> ArrayView2<'_, f64> {
        self.a[self.a.len() - 1].view()
    }
}

/// A feed-forward network as seen by the cost function and the trainer.
///
/// `weights()[i]` connects layer `i` to layer `i + 1` and has shape
/// `(units[i + 1], units[i] + bias)`, the bias column (if any) being the first one.
pub trait Network {
    /// Whether every layer but the output one feeds a bias unit forward.
    fn bias(&self) -> bool;

    /// The activation function of every layer, the input layer's one included.
    fn act_fns(&self) -> &[ActFn];

    /// The currently committed weights.
    fn weights(&self) -> &[Array2<f64>];

    /// Replaces the committed weights.
    ///
    /// # Errors
    /// A `DimensionMismatch` if the shapes don't match `dimensions()`.
    fn set_weights(&mut self, weights: Vec<Array2<f64>>) -> Result<()>;

    /// Replaces the committed weights with freshly sampled ones.
    fn reset_weights(&mut self) -> Result<()>;

    /// The `(rows, cols)` of every weight matrix, in order.
    fn dimensions(&self) -> Vec<(usize, usize)>;

    /// Runs a forward pass with the given `weights` (not the committed ones) over the examples in
    /// the columns of `x`, and computes the regularized cost against `y`.
    ///
    /// # Arguments
    /// * `weights` - The weights to evaluate.
    /// * `x` - Features, one column per example.
    /// * `y` - Expected outputs, one column per example.
    /// * `err_fn` - The error function.
    /// * `learn_rate` - The regularization rate.
    ///
    /// # Errors
    /// A `DimensionMismatch` if `weights`, `x` or `y` don't fit the network or each other.
    fn calculate_cost<E>(
        &self,
        weights: &[Array2<f64>],
        x: ArrayView2<f64>,
        y: ArrayView2<f64>,
        err_fn: &E,
        learn_rate: f64,
    ) -> Result<Forward>
    where
        E: ErrFn + ?Sized;
}
