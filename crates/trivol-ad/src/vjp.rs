//! Vector-Jacobian Product (VJP) rule for the trilinear resize
//!
//! For the forward operation `y = resize(x)`, the VJP computes
//!
//! ```text
//! vjp(dy) = ∂L/∂x
//! ```
//!
//! where `dy = ∂L/∂y` is the incoming gradient (cotangent). The resize is a
//! *linear* map whose Jacobian depends only on the geometry (shapes and
//! alignment convention), never on the input values, so the context captured
//! at forward time is just that geometry; no tensor needs to be saved.

use std::ops::AddAssign;

use anyhow::Result;
use scirs2_core::ndarray_ext::{Array, ArrayView, IxDyn};
use scirs2_core::numeric::Float;
use trivol_kernels::{
    check_input_volume, check_resize_sizes, resize_trilinear, resize_trilinear_backward,
};

/// Trait for operations that support VJP (backward differentiation)
pub trait VjpOp<T>
where
    T: Float + AddAssign,
{
    /// Compute the VJP (backward pass) given the output gradient
    ///
    /// # Arguments
    ///
    /// * `output_grad` - Gradient w.r.t. the output (∂L/∂output)
    ///
    /// # Returns
    ///
    /// Gradients w.r.t. each input of the forward operation
    fn vjp(&self, output_grad: &ArrayView<'_, T, IxDyn>) -> Result<Vec<Array<T, IxDyn>>>;
}

/// VJP context for the trilinear volume resize
///
/// Captures the forward-pass geometry so the backward pass can run without
/// the input volume.
///
/// # Example
///
/// ```
/// use scirs2_core::ndarray_ext::Array;
/// use trivol_ad::{TrilinearResizeVjp, VjpOp};
///
/// let x = Array::from_shape_vec(vec![1, 1, 1, 1, 2], vec![10.0, 20.0]).unwrap();
///
/// // Forward pass
/// let ctx = TrilinearResizeVjp::for_input(&x.view(), [1, 1, 4], true).unwrap();
/// let y = ctx.forward(&x.view()).unwrap();
/// assert_eq!(y.shape(), &[1, 1, 1, 1, 4]);
///
/// // Backward pass
/// let grad_y = Array::from_elem(vec![1, 1, 1, 1, 4], 1.0);
/// let grads = ctx.vjp(&grad_y.view()).unwrap();
/// assert_eq!(grads[0].shape(), x.shape());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrilinearResizeVjp {
    /// Batch dimension of the forward input
    pub batch: usize,
    /// Channel dimension of the forward input
    pub channels: usize,
    /// Spatial sizes of the forward input
    pub input_size: [usize; 3],
    /// Spatial sizes of the forward output
    pub output_size: [usize; 3],
    /// Coordinate convention used by the forward pass
    pub align_corners: bool,
}

impl TrilinearResizeVjp {
    /// Create a VJP context by recording the geometry of a forward input
    ///
    /// Validates the input volume and the target sizes up front so a context
    /// can only exist for a resize that would succeed.
    pub fn for_input<T>(
        input: &ArrayView<'_, T, IxDyn>,
        output_size: [usize; 3],
        align_corners: bool,
    ) -> Result<Self>
    where
        T: Float,
    {
        check_input_volume(input)?;
        let shape = input.shape();
        let input_size = [shape[2], shape[3], shape[4]];
        check_resize_sizes(input_size, output_size)?;

        Ok(Self {
            batch: shape[0],
            channels: shape[1],
            input_size,
            output_size,
            align_corners,
        })
    }

    /// Run the forward resize this context describes
    pub fn forward<T>(&self, input: &ArrayView<'_, T, IxDyn>) -> Result<Array<T, IxDyn>>
    where
        T: Float,
    {
        let output = resize_trilinear(input, self.output_size, self.align_corners)?;
        Ok(output)
    }
}

impl<T> VjpOp<T> for TrilinearResizeVjp
where
    T: Float + AddAssign,
{
    fn vjp(&self, output_grad: &ArrayView<'_, T, IxDyn>) -> Result<Vec<Array<T, IxDyn>>> {
        let grad_input = resize_trilinear_backward(
            output_grad,
            self.batch,
            self.channels,
            self.input_size,
            self.output_size,
            self.align_corners,
        )?;
        Ok(vec![grad_input])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::Array;
    use trivol_kernels::inner_product;

    fn test_volume(shape: &[usize]) -> Array<f64, IxDyn> {
        Array::from_shape_fn(IxDyn(shape), |idx| {
            ((idx[0] * 19 + idx[1] * 11 + idx[2] * 7 + idx[3] * 3 + idx[4]) as f64 * 0.43).sin()
        })
    }

    #[test]
    fn test_vjp_satisfies_adjoint_law() {
        for &align in &[true, false] {
            let x = test_volume(&[2, 2, 2, 3, 2]);
            let g = test_volume(&[2, 2, 3, 5, 4]);

            let ctx = TrilinearResizeVjp::for_input(&x.view(), [3, 5, 4], align).unwrap();
            let y = ctx.forward(&x.view()).unwrap();
            let grads = ctx.vjp(&g.view()).unwrap();

            let lhs = inner_product(&g.view(), &y.view());
            let rhs = inner_product(&grads[0].view(), &x.view());
            assert!((lhs - rhs).abs() < 1e-9, "align={}: {} vs {}", align, lhs, rhs);
        }
    }

    #[test]
    fn test_vjp_context_records_geometry() {
        let x = test_volume(&[2, 3, 4, 5, 6]);
        let ctx = TrilinearResizeVjp::for_input(&x.view(), [2, 2, 2], false).unwrap();

        assert_eq!(ctx.batch, 2);
        assert_eq!(ctx.channels, 3);
        assert_eq!(ctx.input_size, [4, 5, 6]);
        assert_eq!(ctx.output_size, [2, 2, 2]);
    }

    #[test]
    fn test_vjp_rejects_invalid_input() {
        let not_5d = Array::<f64, _>::zeros(IxDyn(&[2, 3, 4]));
        assert!(TrilinearResizeVjp::for_input(&not_5d.view(), [1, 1, 1], true).is_err());

        let x = test_volume(&[1, 1, 2, 2, 2]);
        assert!(TrilinearResizeVjp::for_input(&x.view(), [0, 2, 2], true).is_err());
    }

    #[test]
    fn test_vjp_rejects_mismatched_cotangent() {
        let x = test_volume(&[1, 1, 2, 2, 2]);
        let ctx = TrilinearResizeVjp::for_input(&x.view(), [4, 4, 4], true).unwrap();

        let wrong = test_volume(&[1, 1, 4, 4, 5]);
        assert!(VjpOp::<f64>::vjp(&ctx, &wrong.view()).is_err());
    }
}
