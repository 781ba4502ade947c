use ndarray::{Array2, ArrayView2};
use rand::Rng;

use crate::{NnErr, Result, error::ensure_dim};

/// A set of training examples, stored one per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x: Array2<f64>,
    y: Array2<f64>,
}

impl Dataset {
    /// Pairs the features `x` with the expected outputs `y`.
    ///
    /// # Errors
    /// A `DimensionMismatch` if `x` and `y` hold a different amount of examples, or an
    /// `InvalidConfig` if they hold none.
    pub fn new(x: Array2<f64>, y: Array2<f64>) -> Result<Self> {
        ensure_dim("columns of y", y.ncols(), x.ncols())?;

        if x.ncols() == 0 {
            return Err(NnErr::InvalidConfig("a dataset needs at least one example".into()));
        }

        Ok(Self { x, y })
    }

    /// A dataset with every feature and output drawn uniformly from `[0, 1)`.
    pub fn random<R: Rng>(rng: &mut R, inputs: usize, outputs: usize, len: usize) -> Result<Self> {
        let x = Array2::from_shape_simple_fn((inputs, len), || rng.random());
        let y = Array2::from_shape_simple_fn((outputs, len), || rng.random());
        Self::new(x, y)
    }

    pub fn x(&self) -> ArrayView2<'_, f64> {
        self.x.view()
    }

    pub fn y(&self) -> ArrayView2<'_, f64> {
        self.y.view()
    }

    /// The amount of examples.
    pub fn len(&self) -> usize {
        self.x.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
