//! Finite difference approximations, used to validate analytic gradients.

use ndarray::{Array1, ArrayView1, Zip};

use crate::{NnErr, Result, error::ensure_dim};

/// Approximates the gradient of `objective` at `weights` with central differences.
///
/// Every component `i` is estimated as `(f(w + e·eᵢ) - f(w - e·eᵢ)) / 2e`, restoring the component
/// before moving on to the next one.
///
/// # Arguments
/// * `objective` - The function whose gradient is approximated.
/// * `weights` - The point to approximate the gradient at.
/// * `e` - The perturbation applied to each component.
///
/// # Errors
/// An `InvalidConfig` if `e` isn't a positive number, or whatever error `objective` returns.
pub fn numerical_gradient<F>(mut objective: F, weights: &Array1<f64>, e: f64) -> Result<Array1<f64>>
where
    F: FnMut(ArrayView1<f64>) -> Result<f64>,
{
    if !(e.is_finite() && e > 0.) {
        return Err(NnErr::InvalidConfig(format!(
            "the perturbation must be a positive number, got {e}"
        )));
    }

    let mut w = weights.clone();
    let mut grad = Array1::zeros(w.len());

    for i in 0..w.len() {
        let original = w[i];

        w[i] = original + e;
        let inc = objective(w.view())?;
        w[i] = original - e;
        let dec = objective(w.view())?;
        w[i] = original;

        grad[i] = (inc - dec) / (2. * e);
    }

    Ok(grad)
}

/// The largest absolute difference between two vectors of the same length.
pub fn max_abs_diff(a: ArrayView1<f64>, b: ArrayView1<f64>) -> Result<f64> {
    ensure_dim("compared vector", b.len(), a.len())?;

    let max = Zip::from(&a)
        .and(&b)
        .fold(0., |max: f64, a, b| max.max((a - b).abs()));

    Ok(max)
}
