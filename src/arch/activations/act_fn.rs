use ndarray::{Array2, ArrayView2};
use serde::Deserialize;

use super::{Sigmoid, Tanh};

/// The activation function of a layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActFn {
    Identity,
    Sigmoid(Sigmoid),
    Tanh(Tanh),
}

impl ActFn {
    pub fn identity() -> Self {
        Self::Identity
    }

    pub fn sigmoid(amp: f64) -> Self {
        Self::Sigmoid(Sigmoid::new(amp))
    }

    pub fn tanh() -> Self {
        Self::Tanh(Tanh::new())
    }

    pub fn f(&self, z: f64) -> f64 {
        match self {
            Self::Identity => z,
            Self::Sigmoid(a) => a.f(z),
            Self::Tanh(a) => a.f(z),
        }
    }

    pub fn df(&self, z: f64) -> f64 {
        match self {
            Self::Identity => 1.,
            Self::Sigmoid(a) => a.df(z),
            Self::Tanh(a) => a.df(z),
        }
    }

    /// Applies the function elementwise to the pre-activations `z`.
    pub fn apply(&self, z: ArrayView2<f64>) -> Array2<f64> {
        z.mapv(|z| self.f(z))
    }

    /// Elementwise derivative evaluated at the pre-activations `z`, same shape as `z`.
    pub fn grad(&self, z: ArrayView2<f64>) -> Array2<f64> {
        z.mapv(|z| self.df(z))
    }
}

/// Activation function as written in a JSON config.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActFnConfig {
    Identity,
    Sigmoid {
        #[serde(default = "default_amp")]
        amp: f64,
    },
    Tanh,
}

fn default_amp() -> f64 {
    1.
}

impl From<ActFnConfig> for ActFn {
    fn from(config: ActFnConfig) -> Self {
        match config {
            ActFnConfig::Identity => ActFn::identity(),
            ActFnConfig::Sigmoid { amp } => ActFn::sigmoid(amp),
            ActFnConfig::Tanh => ActFn::tanh(),
        }
    }
}
