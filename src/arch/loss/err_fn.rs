use ndarray::{Array2, ArrayView2};

/// An error function between a hypothesis `h` and the expected output `y`.
///
/// Both methods work elementwise and preserve the shape of `h`; the cost function takes care of
/// summing and normalizing.
pub trait ErrFn {
    /// The error of every element of `h` against `y`.
    fn calc(&self, h: ArrayView2<f64>, y: ArrayView2<f64>) -> Array2<f64>;

    /// The derivative of `calc` with respect to `h`.
    fn grad(&self, h: ArrayView2<f64>, y: ArrayView2<f64>) -> Array2<f64>;
}
