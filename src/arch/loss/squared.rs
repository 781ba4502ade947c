use ndarray::{Array2, ArrayView2};

use super::ErrFn;

/// Squared error: `(h - y)² / 2`.
#[derive(Default, Clone, Copy, Debug)]
pub struct Squared;

impl ErrFn for Squared {
    fn calc(&self, h: ArrayView2<f64>, y: ArrayView2<f64>) -> Array2<f64> {
        (&h - &y).mapv(|x| 0.5 * x.powi(2))
    }

    fn grad(&self, h: ArrayView2<f64>, y: ArrayView2<f64>) -> Array2<f64> {
        &h - &y
    }
}
