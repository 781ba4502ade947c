use ndarray::{Array2, ArrayView2, Zip};

use super::ErrFn;

// Keeps `ln` and the divisions finite when the hypothesis saturates.
const EPS: f64 = 1e-15;

/// Logistic (cross-entropy) error: `-(y ln h + (1 - y) ln(1 - h))`.
///
/// Expects hypotheses in `(0, 1)`, e.g. the output of a sigmoid layer.
#[derive(Default, Clone, Copy, Debug)]
pub struct Logit;

impl ErrFn for Logit {
    fn calc(&self, h: ArrayView2<f64>, y: ArrayView2<f64>) -> Array2<f64> {
        Zip::from(&h).and(&y).map_collect(|&h, &y| {
            let h = h.clamp(EPS, 1. - EPS);
            -(y * h.ln() + (1. - y) * (1. - h).ln())
        })
    }

    fn grad(&self, h: ArrayView2<f64>, y: ArrayView2<f64>) -> Array2<f64> {
        Zip::from(&h).and(&y).map_collect(|&h, &y| {
            // `calc` is flat wherever the clamp kicks in.
            if !(EPS..=1. - EPS).contains(&h) {
                return 0.;
            }

            (h - y) / (h * (1. - h))
        })
    }
}
