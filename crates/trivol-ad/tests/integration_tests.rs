//! Integration tests: finite-difference validation of the resize adjoint
//!
//! These tests settle the one behavior that must not be assumed: the
//! replicate-edge boundary clamp keeps its weights un-renormalized, and the
//! backward scatter must be the exact adjoint of that choice. The gradient
//! checker compares the analytical backward pass against numerical
//! derivatives of the forward pass, so any off-by-one at the clamped
//! boundary coordinates fails loudly.

use scirs2_core::ndarray_ext::{Array, IxDyn};
use trivol_ad::gradcheck::{check_gradient, GradCheckConfig};
use trivol_ad::{TrilinearResizeVjp, VjpOp};
use trivol_kernels::{resize_trilinear, resize_trilinear_backward};

fn test_volume(shape: &[usize]) -> Array<f64, IxDyn> {
    Array::from_shape_fn(IxDyn(shape), |idx| {
        ((idx[0] * 23 + idx[1] * 13 + idx[2] * 7 + idx[3] * 3 + idx[4]) as f64 * 0.71).sin() * 2.0
    })
}

fn gradcheck_resize(
    batch: usize,
    channels: usize,
    input_size: [usize; 3],
    output_size: [usize; 3],
    align_corners: bool,
) {
    let x = test_volume(&[batch, channels, input_size[0], input_size[1], input_size[2]]);
    let grad_y = test_volume(&[
        batch,
        channels,
        output_size[0],
        output_size[1],
        output_size[2],
    ]);

    let f = |x: &Array<f64, IxDyn>| -> anyhow::Result<Array<f64, IxDyn>> {
        Ok(resize_trilinear(&x.view(), output_size, align_corners)?)
    };
    let df = |_x: &Array<f64, IxDyn>, g: &Array<f64, IxDyn>| -> anyhow::Result<Array<f64, IxDyn>> {
        Ok(resize_trilinear_backward(
            &g.view(),
            batch,
            channels,
            input_size,
            output_size,
            align_corners,
        )?)
    };

    let result = check_gradient(f, df, &x, &grad_y, &GradCheckConfig::default()).unwrap();
    assert!(
        result.passed,
        "gradcheck failed for {:?} -> {:?} (align={}): {}/{} mismatches, max_abs_diff={:.3e}",
        input_size,
        output_size,
        align_corners,
        result.num_failures,
        result.num_elements,
        result.max_abs_diff
    );
}

#[test]
fn test_gradcheck_upsample_aligned() {
    gradcheck_resize(1, 2, [2, 3, 2], [3, 5, 4], true);
}

#[test]
fn test_gradcheck_upsample_half_pixel() {
    gradcheck_resize(1, 2, [2, 3, 2], [3, 5, 4], false);
}

#[test]
fn test_gradcheck_downsample_aligned() {
    gradcheck_resize(1, 1, [4, 3, 4], [2, 2, 3], true);
}

#[test]
fn test_gradcheck_downsample_half_pixel() {
    gradcheck_resize(1, 1, [4, 3, 4], [2, 2, 3], false);
}

#[test]
fn test_gradcheck_boundary_heavy_half_pixel() {
    // 1 -> 5 along two axes: every output coordinate replicates the single
    // sample, the harshest exercise of the clamped mapping.
    gradcheck_resize(1, 1, [1, 1, 2], [5, 5, 3], false);
}

#[test]
fn test_gradcheck_identity_sizes() {
    gradcheck_resize(2, 1, [2, 2, 2], [2, 2, 2], true);
}

#[test]
fn test_vjp_context_end_to_end() {
    let x = test_volume(&[2, 2, 2, 2, 3]);
    let ctx = TrilinearResizeVjp::for_input(&x.view(), [4, 3, 5], false).unwrap();

    let y = ctx.forward(&x.view()).unwrap();
    assert_eq!(y.shape(), &[2, 2, 4, 3, 5]);

    let grad_y = test_volume(&[2, 2, 4, 3, 5]);
    let grads = ctx.vjp(&grad_y.view()).unwrap();
    assert_eq!(grads.len(), 1);
    assert_eq!(grads[0].shape(), x.shape());

    // The context-driven backward agrees with the kernel called directly.
    let direct =
        resize_trilinear_backward(&grad_y.view(), 2, 2, [2, 2, 3], [4, 3, 5], false).unwrap();
    assert_eq!(grads[0], direct);
}
