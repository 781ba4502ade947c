use std::fmt;

use ndarray::Array2;
use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};
use serde::Deserialize;

use crate::{NnErr, Result};

/// How the weights of a network are drawn on every reset.
///
/// Fan-in and fan-out are taken from the shape of the matrix being generated: a `(rows, cols)`
/// matrix has `cols` inputs and `rows` outputs.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WeightInit {
    /// Uniform in `[low, high)`.
    Uniform { low: f64, high: f64 },
    /// Normal with the given mean and standard deviation.
    Normal { mean: f64, std_dev: f64 },
    /// Uniform in `±sqrt(6 / (fan_in + fan_out))`.
    XavierUniform,
    /// Normal with `std_dev = sqrt(1 / fan_in)`.
    Lecun,
    /// Every weight set to `value`.
    Const { value: f64 },
}

impl Default for WeightInit {
    fn default() -> Self {
        Self::Uniform {
            low: -0.12,
            high: 0.12,
        }
    }
}

impl WeightInit {
    /// Samples a new `(rows, cols)` weight matrix.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `dim` - The shape of the matrix.
    ///
    /// # Returns
    /// An error if the distribution can't be built from the configured values.
    pub fn sample<R: Rng>(&self, rng: &mut R, dim: (usize, usize)) -> Result<Array2<f64>> {
        let (fan_out, fan_in) = dim;

        match *self {
            WeightInit::Uniform { low, high } => {
                let uniform = Uniform::new(low, high).map_err(rand_err)?;
                Ok(draw(rng, dim, uniform))
            }
            WeightInit::Normal { mean, std_dev } => {
                let normal = Normal::new(mean, std_dev).map_err(rand_err)?;
                Ok(draw(rng, dim, normal))
            }
            WeightInit::XavierUniform => {
                let range = (6. / (fan_in + fan_out) as f64).sqrt();
                WeightInit::Uniform {
                    low: -range,
                    high: range,
                }
                .sample(rng, dim)
            }
            WeightInit::Lecun => {
                let std_dev = (1. / fan_in as f64).sqrt();
                WeightInit::Normal { mean: 0., std_dev }.sample(rng, dim)
            }
            WeightInit::Const { value } => Ok(Array2::from_elem(dim, value)),
        }
    }
}

fn draw<R, D>(rng: &mut R, dim: (usize, usize), distribution: D) -> Array2<f64>
where
    R: Rng,
    D: Distribution<f64>,
{
    Array2::from_shape_simple_fn(dim, || distribution.sample(&mut *rng))
}

fn rand_err<E: fmt::Display>(e: E) -> NnErr {
    NnErr::InvalidConfig(format!("weight initialization: {e}"))
}
