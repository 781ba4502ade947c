use log::debug;
use ndarray::{Array1, ArrayView1};
use serde::Deserialize;

use super::{MinimizeResult, Minimizer};
use crate::{NnErr, Result};

/// Gradient descent with optional momentum, run until the gradient or the cost stop changing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientDescent {
    learning_rate: f64,
    momentum: f64,
    max_iters: usize,
    gtol: f64,
    ftol: f64,
}

impl GradientDescent {
    /// Returns a new `GradientDescent` without momentum.
    ///
    /// # Arguments
    /// * `learning_rate` - The *length* of the steps taken against the gradient.
    /// * `max_iters` - The amount of steps after which the run is considered failed.
    ///
    /// # Returns
    /// An error if `learning_rate` is not a positive number.
    pub fn new(learning_rate: f64, max_iters: usize) -> Result<Self> {
        if !(learning_rate.is_finite() && learning_rate > 0.) {
            return Err(NnErr::InvalidConfig(format!(
                "learning rate must be positive, got {learning_rate}"
            )));
        }

        Ok(Self {
            learning_rate,
            momentum: 0.,
            max_iters,
            gtol: 1e-5,
            ftol: 1e-9,
        })
    }

    /// Sets the momentum, the fraction of the previous step carried into the next one.
    ///
    /// # Returns
    /// An error if `momentum` is not in `[0, 1)`.
    pub fn momentum(mut self, momentum: f64) -> Result<Self> {
        if !(0. ..1.).contains(&momentum) {
            return Err(NnErr::InvalidConfig(format!(
                "momentum must be in [0, 1), got {momentum}"
            )));
        }

        self.momentum = momentum;
        Ok(self)
    }

    /// Converged once the largest gradient component is at most `gtol`.
    pub fn gtol(mut self, gtol: f64) -> Self {
        self.gtol = gtol;
        self
    }

    /// Converged once a step lowers the cost by at most `ftol` relative to its magnitude.
    pub fn ftol(mut self, ftol: f64) -> Self {
        self.ftol = ftol;
        self
    }
}

impl Minimizer for GradientDescent {
    fn minimize<F>(&mut self, mut objective: F, x0: Array1<f64>) -> Result<MinimizeResult>
    where
        F: FnMut(ArrayView1<f64>) -> Result<(f64, Array1<f64>)>,
    {
        let lr = self.learning_rate;
        let mu = self.momentum;

        let mut x = x0;
        let mut velocity = Array1::zeros(x.len());
        let mut prev_fun = f64::INFINITY;
        let mut nit = 0;

        loop {
            let (fun, grad) = objective(x.view())?;

            if !fun.is_finite() {
                return Ok(finish(false, x, fun, nit, "objective is not finite"));
            }

            let gnorm = grad.iter().fold(0., |max: f64, g| max.max(g.abs()));
            if gnorm <= self.gtol {
                return Ok(finish(true, x, fun, nit, "gradient norm below gtol"));
            }

            let scale = prev_fun.abs().max(fun.abs()).max(1.);
            if prev_fun.is_finite() && fun <= prev_fun && prev_fun - fun <= self.ftol * scale {
                return Ok(finish(true, x, fun, nit, "relative cost reduction below ftol"));
            }

            if nit == self.max_iters {
                return Ok(finish(false, x, fun, nit, "maximum number of iterations reached"));
            }

            if nit % 100 == 0 {
                debug!("iteration {nit}: cost={fun} |grad|={gnorm}");
            }

            velocity.zip_mut_with(&grad, |v, &g| *v = mu * *v + g);
            x.scaled_add(-lr, &velocity);
            prev_fun = fun;
            nit += 1;
        }
    }
}

fn finish(success: bool, x: Array1<f64>, fun: f64, nit: usize, message: &str) -> MinimizeResult {
    MinimizeResult {
        success,
        x,
        fun,
        nit,
        message: message.to_string(),
    }
}

/// Gradient descent as written in a JSON config.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GradientDescentConfig {
    pub learning_rate: f64,
    pub momentum: f64,
    pub max_iters: usize,
    pub gtol: f64,
    pub ftol: f64,
}

impl Default for GradientDescentConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.5,
            momentum: 0.9,
            max_iters: 2000,
            gtol: 1e-5,
            ftol: 1e-9,
        }
    }
}

impl TryFrom<GradientDescentConfig> for GradientDescent {
    type Error = NnErr;

    fn try_from(config: GradientDescentConfig) -> Result<Self> {
        Ok(GradientDescent::new(config.learning_rate, config.max_iters)?
            .momentum(config.momentum)?
            .gtol(config.gtol)
            .ftol(config.ftol))
    }
}
