//! Numeric helpers shared by the resize kernels and their tests
//!
//! Small comparison and reduction utilities over dynamic-rank volumes. The
//! inner product is the workhorse of the adjoint law
//! `dot(g, forward(x)) == dot(backward(g), x)`.

use scirs2_core::ndarray_ext::{ArrayView, IxDyn};
use scirs2_core::numeric::Float;

/// Inner product of two volumes over their flattened elements
///
/// # Panics
///
/// Panics if the shapes don't match.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array;
/// use trivol_kernels::inner_product;
///
/// let a = Array::from_shape_vec(vec![2, 2], vec![1.0_f64, 2.0, 3.0, 4.0]).unwrap();
/// let b = Array::from_shape_vec(vec![2, 2], vec![1.0, 1.0, 0.0, 2.0]).unwrap();
/// assert!((inner_product(&a.view(), &b.view()) - 11.0).abs() < 1e-12);
/// ```
pub fn inner_product<T>(a: &ArrayView<'_, T, IxDyn>, b: &ArrayView<'_, T, IxDyn>) -> T
where
    T: Float,
{
    assert_eq!(
        a.shape(),
        b.shape(),
        "Shapes must match for inner product: {:?} vs {:?}",
        a.shape(),
        b.shape()
    );

    let mut sum = T::zero();
    for (&a_val, &b_val) in a.iter().zip(b.iter()) {
        sum = sum + a_val * b_val;
    }
    sum
}

/// Check whether two volumes are element-wise equal within a tolerance
///
/// Returns `false` on shape mismatch rather than panicking, so it can be
/// used directly inside assertions.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array;
/// use trivol_kernels::approx_equal;
///
/// let a = Array::from_shape_vec(vec![2], vec![1.0, 2.0]).unwrap();
/// let b = Array::from_shape_vec(vec![2], vec![1.0 + 1e-12, 2.0]).unwrap();
/// assert!(approx_equal(&a.view(), &b.view(), 1e-10));
/// assert!(!approx_equal(&a.view(), &b.view(), 1e-14));
/// ```
pub fn approx_equal<T>(a: &ArrayView<'_, T, IxDyn>, b: &ArrayView<'_, T, IxDyn>, tol: T) -> bool
where
    T: Float,
{
    if a.shape() != b.shape() {
        return false;
    }

    a.iter()
        .zip(b.iter())
        .all(|(&a_val, &b_val)| (a_val - b_val).abs() <= tol)
}

/// Largest absolute element-wise difference between two volumes
///
/// # Panics
///
/// Panics if the shapes don't match.
pub fn max_abs_diff<T>(a: &ArrayView<'_, T, IxDyn>, b: &ArrayView<'_, T, IxDyn>) -> T
where
    T: Float,
{
    assert_eq!(
        a.shape(),
        b.shape(),
        "Shapes must match for max_abs_diff: {:?} vs {:?}",
        a.shape(),
        b.shape()
    );

    a.iter()
        .zip(b.iter())
        .fold(T::zero(), |acc, (&a_val, &b_val)| {
            acc.max((a_val - b_val).abs())
        })
}
