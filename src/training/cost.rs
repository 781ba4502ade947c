use log::error;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, s};

use crate::{
    NnErr, Result,
    arch::{Forward, Network, loss::ErrFn},
    flatten,
};

/// The regularized cost of a network over a fixed set of examples, as a function of its weights.
///
/// Evaluating never touches the network's committed weights, the weights to evaluate are always
/// given explicitly.
pub struct CostFn<'a, N, E>
where
    N: Network,
    E: ErrFn + ?Sized,
{
    network: &'a N,
    x: ArrayView2<'a, f64>,
    y: ArrayView2<'a, f64>,
    learn_rate: f64,
    err_fn: &'a E,
}

impl<'a, N, E> CostFn<'a, N, E>
where
    N: Network,
    E: ErrFn + ?Sized,
{
    /// Binds a network to its training data.
    ///
    /// # Arguments
    /// * `network` - The network whose architecture is evaluated.
    /// * `x` - Features, one column per example.
    /// * `y` - Expected outputs, one column per example.
    /// * `learn_rate` - The regularization rate.
    /// * `err_fn` - The error function.
    pub fn new(
        network: &'a N,
        x: ArrayView2<'a, f64>,
        y: ArrayView2<'a, f64>,
        learn_rate: f64,
        err_fn: &'a E,
    ) -> Self {
        Self {
            network,
            x,
            y,
            learn_rate,
            err_fn,
        }
    }

    /// The amount of examples the cost is averaged over.
    pub fn examples(&self) -> usize {
        self.x.ncols()
    }

    /// The cost of `weights`, without computing the gradient.
    ///
    /// # Errors
    /// A `DimensionMismatch` if `weights` or the data don't fit the network.
    pub fn cost(&self, weights: &[Array2<f64>]) -> Result<f64> {
        self.forward(weights).map(|forward| forward.cost)
    }

    /// The cost of `weights` along with its gradient, one matrix per weight matrix.
    ///
    /// # Errors
    /// A `DimensionMismatch` if `weights` or the data don't fit the network.
    pub fn cost_and_grad(&self, weights: &[Array2<f64>]) -> Result<(f64, Vec<Array2<f64>>)> {
        let Forward { z, a, cost } = self.forward(weights)?;
        let grad = self.backward(weights, &z, &a);
        Ok((cost, grad))
    }

    fn forward(&self, weights: &[Array2<f64>]) -> Result<Forward> {
        self.network
            .calculate_cost(weights, self.x, self.y, self.err_fn, self.learn_rate)
            .inspect_err(|e| {
                if let NnErr::DimensionMismatch { .. } = e {
                    error!(
                        "calculating the cost of the network failed, most likely due to a \
                         dimension mismatch: {e}"
                    );
                }
            })
    }

    /// Backpropagates the error of an already validated forward pass.
    fn backward(
        &self,
        weights: &[Array2<f64>],
        z: &[Array2<f64>],
        a: &[Array2<f64>],
    ) -> Vec<Array2<f64>> {
        let nlayers = a.len();
        let last = nlayers - 1;
        let bias = self.network.bias() as usize;
        let act_fns = self.network.act_fns();
        let m = self.examples() as f64;

        // d[0] is never needed, it only keeps the indices aligned with the layers.
        let mut d = vec![Array2::zeros((0, 0)); nlayers];
        d[last] = act_fns[last].grad(z[last].view()) * self.err_fn.grad(a[last].view(), self.y);

        for i in (1..last).rev() {
            let back = weights[i].slice(s![.., bias..]).t().dot(&d[i + 1]);
            let delta = act_fns[i].grad(z[i].view()) * back;
            d[i] = delta;
        }

        weights
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let mut grad = d[i + 1].dot(&a[i].t()) / m;
                grad.slice_mut(s![.., bias..])
                    .scaled_add(self.learn_rate / m, &w.slice(s![.., bias..]));
                grad
            })
            .collect()
    }
}

/// A [`CostFn`] over a single flat weight vector, the shape minimizers work with.
pub struct FlatCostFn<'c, 'a, N, E>
where
    N: Network,
    E: ErrFn + ?Sized,
{
    cost_fn: &'c CostFn<'a, N, E>,
    dimensions: &'c [(usize, usize)],
}

impl<'c, 'a, N, E> FlatCostFn<'c, 'a, N, E>
where
    N: Network,
    E: ErrFn + ?Sized,
{
    /// Wraps `cost_fn`, cutting flat vectors into matrices of the given `dimensions`.
    pub fn new(cost_fn: &'c CostFn<'a, N, E>, dimensions: &'c [(usize, usize)]) -> Self {
        Self {
            cost_fn,
            dimensions,
        }
    }

    /// The cost at `v` and its gradient, unrolled in the same order as `v`.
    ///
    /// # Errors
    /// A `DimensionMismatch` if `v` doesn't hold exactly as many weights as the dimensions
    /// describe, or if the weights don't fit the network.
    pub fn evaluate(&self, v: ArrayView1<f64>) -> Result<(f64, Array1<f64>)> {
        let weights = flatten::reshape(v, self.dimensions)?;
        let (cost, grad) = self.cost_fn.cost_and_grad(&weights)?;
        Ok((cost, flatten::unroll_owned(&grad)))
    }

    /// The cost at `v`.
    pub fn cost(&self, v: ArrayView1<f64>) -> Result<f64> {
        let weights = flatten::reshape(v, self.dimensions)?;
        self.cost_fn.cost(&weights)
    }
}
