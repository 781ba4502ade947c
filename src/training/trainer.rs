use log::{info, warn};
use ndarray::ArrayView2;

use super::cost::{CostFn, FlatCostFn};
use crate::{
    Result,
    arch::{Network, loss::ErrFn},
    flatten,
    optimization::{MinimizeResult, Minimizer},
};

/// Trains networks by minimizing their cost from several random starting points and keeping the
/// best converged result.
#[derive(Debug, Clone)]
pub struct Trainer<E, M>
where
    E: ErrFn,
    M: Minimizer,
{
    err_fn: E,
    minimizer: M,
    learn_rate: f64,
    iterations: usize,
}

impl<E, M> Trainer<E, M>
where
    E: ErrFn,
    M: Minimizer,
{
    /// Creates a new `Trainer` with a regularization rate of 1 and 10 restarts.
    ///
    /// # Arguments
    /// * `err_fn` - The error function the cost is built from.
    /// * `minimizer` - The minimizer run on every restart.
    pub fn new(err_fn: E, minimizer: M) -> Self {
        Self {
            err_fn,
            minimizer,
            learn_rate: 1.,
            iterations: 10,
        }
    }

    /// Sets the regularization rate.
    pub fn learn_rate(mut self, learn_rate: f64) -> Self {
        self.learn_rate = learn_rate;
        self
    }

    /// Sets how many times the weights are reset and minimized.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn minimizer(&self) -> &M {
        &self.minimizer
    }

    /// Trains `network` on the examples in the columns of `x` and `y`.
    ///
    /// Every restart resets the network's weights and minimizes the cost from there. Only
    /// converged runs are considered, and the one with the lowest cost (the earliest one on ties)
    /// is committed into the network.
    ///
    /// # Returns
    /// The best converged run, or `None` if no run converged. In that case the network is left
    /// with the weights of the last reset.
    ///
    /// # Errors
    /// Any error raised by the cost function (a `DimensionMismatch` if the data doesn't fit the
    /// network) or by the minimizer, unmodified.
    pub fn train<N>(
        &mut self,
        network: &mut N,
        x: ArrayView2<f64>,
        y: ArrayView2<f64>,
    ) -> Result<Option<MinimizeResult>>
    where
        N: Network,
    {
        let dimensions = network.dimensions();
        let mut min_error = f64::INFINITY;
        let mut best = None;

        for restart in 1..=self.iterations {
            network.reset_weights()?;
            let initial = flatten::unroll_owned(network.weights());

            let cost_fn = CostFn::new(&*network, x, y, self.learn_rate, &self.err_fn);
            let flat = FlatCostFn::new(&cost_fn, &dimensions);
            let result = self.minimizer.minimize(|v| flat.evaluate(v), initial)?;

            if !result.success {
                warn!(
                    "restart {restart}/{}: did not converge after {} iterations ({}), cost {}",
                    self.iterations, result.nit, result.message, result.fun
                );
                continue;
            }

            info!(
                "restart {restart}/{}: converged in {} iterations, cost {}",
                self.iterations, result.nit, result.fun
            );

            if result.fun < min_error {
                min_error = result.fun;
                best = Some(result);
            }
        }

        let Some(best) = best else {
            warn!(
                "none of the {} restarts converged, the network keeps its last random weights",
                self.iterations
            );
            return Ok(None);
        };

        network.set_weights(flatten::reshape(best.x.view(), &dimensions)?)?;
        info!("committed the best weights, cost {}", best.fun);

        Ok(Some(best))
    }
}
