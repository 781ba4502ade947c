//! Conversions between a list of weight matrices and the single flat vector a minimizer works on.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::{NnErr, Result, error::ensure_dim};

/// Unrolls `matrices` into a single vector, in order, each matrix read row by row.
pub fn unroll<'a, I>(matrices: I) -> Array1<f64>
where
    I: IntoIterator<Item = ArrayView2<'a, f64>>,
{
    matrices
        .into_iter()
        .flat_map(|m| m.into_iter().copied())
        .collect()
}

/// Unrolls owned matrices, see [`unroll`].
pub fn unroll_owned(matrices: &[Array2<f64>]) -> Array1<f64> {
    unroll(matrices.iter().map(|m| m.view()))
}

/// The total amount of scalars described by `dimensions`.
pub fn size(dimensions: &[(usize, usize)]) -> usize {
    dimensions.iter().map(|(rows, cols)| rows * cols).sum()
}

/// Cuts `v` back into matrices of the given `dimensions`, the inverse of [`unroll`].
///
/// # Arguments
/// * `v` - A flat vector of weights.
/// * `dimensions` - The `(rows, cols)` of every matrix, in order.
///
/// # Returns
/// The matrices, or a `DimensionMismatch` if `v` doesn't hold exactly as many scalars as the
/// dimensions describe.
pub fn reshape(v: ArrayView1<f64>, dimensions: &[(usize, usize)]) -> Result<Vec<Array2<f64>>> {
    ensure_dim("flattened weights", v.len(), size(dimensions))?;

    let mut rest = v;
    let mut matrices = Vec::with_capacity(dimensions.len());

    for &dim in dimensions {
        let (head, tail) = rest.split_at(ndarray::Axis(0), dim.0 * dim.1);
        let matrix = Array2::from_shape_vec(dim, head.to_vec()).map_err(|_| {
            NnErr::DimensionMismatch {
                what: "weight matrix",
                got: head.len(),
                expected: dim.0 * dim.1,
            }
        })?;

        matrices.push(matrix);
        rest = tail;
    }

    Ok(matrices)
}
