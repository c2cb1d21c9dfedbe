//! Trilinear volumetric resize: forward interpolation and adjoint backward
//!
//! Resizes 5-D volumes shaped `(batch, channels, depth, height, width)` by
//! trilinear interpolation: every output cell is the weighted average of the
//! 8 nearest input samples (the corners of a unit cube), with per-axis linear
//! weights from [`axis_mappings`](crate::mapping::axis_mappings) and
//! replicate-edge clamping at the boundaries.
//!
//! The backward kernel is the exact adjoint (transpose) of the forward one:
//! where the forward pass *gathers* 8 weighted samples into one output cell,
//! the backward pass *scatters* one output-gradient scalar into the same 8
//! cells with the same weights. For any volume `x` and any output gradient
//! `g` of matching shapes,
//!
//! ```text
//! dot(g, forward(x)) == dot(backward(g), x)
//! ```
//!
//! holds up to floating-point rounding, for both alignment conventions.
//! Matching input/output sizes take an identity fast path that copies (or
//! additively copies) without computing any weights.

use std::ops::AddAssign;

use scirs2_core::ndarray_ext::{Array, ArrayView, IxDyn, Zip};
use scirs2_core::numeric::Float;

use crate::error::ResizeResult;
use crate::mapping::axis_mappings;
use crate::validate::{check_grad_output, check_input_volume, check_resize_sizes};

/// Resize a 5-D volume with trilinear interpolation
///
/// The batch and channel dimensions are carried through unchanged; only the
/// three spatial axes are resampled. The input is read-only; a contiguous
/// copy is taken internally when the view is not already in standard layout
/// and released on every exit path.
///
/// # Arguments
///
/// * `input` - Volume of shape `(batch, channels, depth, height, width)`
/// * `output_size` - Target spatial sizes `[depth, height, width]`
/// * `align_corners` - Corner-aligned instead of half-pixel coordinate mapping
///
/// # Returns
///
/// A newly allocated volume of shape
/// `(batch, channels, output_size[0], output_size[1], output_size[2])`,
/// every cell written exactly once.
///
/// # Errors
///
/// Returns an error if `input` is not a non-empty 5-D array or any spatial
/// size is zero. Validation runs before any allocation, so a failed call has
/// no side effects.
///
/// # Complexity
///
/// Time: O(batch × channels × outD × outH × outW)
/// Space: O(output volume)
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array;
/// use trivol_kernels::resize_trilinear;
///
/// // Width-axis upsample of a 1×1×1×1×2 volume with corner alignment:
/// // scale = (2-1)/(4-1) = 1/3, so the samples interpolate evenly.
/// let input = Array::from_shape_vec(vec![1, 1, 1, 1, 2], vec![10.0_f64, 20.0]).unwrap();
/// let output = resize_trilinear(&input.view(), [1, 1, 4], true).unwrap();
///
/// assert_eq!(output.shape(), &[1, 1, 1, 1, 4]);
/// assert!((output[[0, 0, 0, 0, 0]] - 10.0).abs() < 1e-12);
/// assert!((output[[0, 0, 0, 0, 1]] - 40.0 / 3.0).abs() < 1e-9);
/// assert!((output[[0, 0, 0, 0, 2]] - 50.0 / 3.0).abs() < 1e-9);
/// assert!((output[[0, 0, 0, 0, 3]] - 20.0).abs() < 1e-12);
/// ```
pub fn resize_trilinear<T>(
    input: &ArrayView<'_, T, IxDyn>,
    output_size: [usize; 3],
    align_corners: bool,
) -> ResizeResult<Array<T, IxDyn>>
where
    T: Float,
{
    check_input_volume(input)?;
    let shape = input.shape();
    let (batch, channels) = (shape[0], shape[1]);
    let input_size = [shape[2], shape[3], shape[4]];
    check_resize_sizes(input_size, output_size)?;

    // Copy-on-write contiguity normalization, dropped on every exit path.
    let input = input.as_standard_layout();

    // Identity mapping: exact element-wise copy, no weights computed.
    if input_size == output_size {
        return Ok(input.to_owned());
    }

    let d_map = axis_mappings::<T>(input_size[0], output_size[0], align_corners);
    let h_map = axis_mappings::<T>(input_size[1], output_size[1], align_corners);
    let w_map = axis_mappings::<T>(input_size[2], output_size[2], align_corners);

    let mut output = Array::<T, _>::zeros(IxDyn(&[
        batch,
        channels,
        output_size[0],
        output_size[1],
        output_size[2],
    ]));

    for b in 0..batch {
        for c in 0..channels {
            for (t2, dm) in d_map.iter().enumerate() {
                for (h2, hm) in h_map.iter().enumerate() {
                    for (w2, wm) in w_map.iter().enumerate() {
                        output[[b, c, t2, h2, w2]] = dm.w_lo
                            * (hm.w_lo
                                * (wm.w_lo * input[[b, c, dm.lo, hm.lo, wm.lo]]
                                    + wm.w_hi * input[[b, c, dm.lo, hm.lo, wm.hi]])
                                + hm.w_hi
                                    * (wm.w_lo * input[[b, c, dm.lo, hm.hi, wm.lo]]
                                        + wm.w_hi * input[[b, c, dm.lo, hm.hi, wm.hi]]))
                            + dm.w_hi
                                * (hm.w_lo
                                    * (wm.w_lo * input[[b, c, dm.hi, hm.lo, wm.lo]]
                                        + wm.w_hi * input[[b, c, dm.hi, hm.lo, wm.hi]])
                                    + hm.w_hi
                                        * (wm.w_lo * input[[b, c, dm.hi, hm.hi, wm.lo]]
                                            + wm.w_hi * input[[b, c, dm.hi, hm.hi, wm.hi]]));
                    }
                }
            }
        }
    }

    Ok(output)
}

/// Backward pass of [`resize_trilinear`]: scatter-accumulate the adjoint
///
/// Allocates the input gradient at
/// `(batch, channels, input_size[0], input_size[1], input_size[2])`,
/// zero-fills it, then scatter-adds every `grad_output` scalar into the (up
/// to 8) input cells its output coordinate interpolated from, weighted by
/// the same corner weights the forward pass used. Distinct output cells can
/// map to overlapping corners, so every write is additive; the
/// zero-initialization is owned by this kernel, never by the caller.
///
/// # Arguments
///
/// * `grad_output` - Gradient w.r.t. the forward output, shape
///   `(batch, channels, outD, outH, outW)`
/// * `batch`, `channels` - Declared leading dimensions
/// * `input_size` - Spatial sizes `[depth, height, width]` of the original input
/// * `output_size` - Spatial sizes the forward pass produced
/// * `align_corners` - Must match the forward call
///
/// # Returns
///
/// The gradient w.r.t. the forward input, shaped like the original input.
///
/// # Errors
///
/// Returns an error if any size is zero or `grad_output` disagrees with the
/// declared `(batch, channels, outD, outH, outW)` shape in any dimension.
/// Validation runs before the gradient buffer is allocated.
///
/// # Complexity
///
/// Time: O(batch × channels × outD × outH × outW)
/// Space: O(input volume)
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array;
/// use trivol_kernels::resize_trilinear_backward;
///
/// // Adjoint of the 2 -> 4 corner-aligned width upsample: each input cell
/// // collects the interpolation weights of the output cells it fed.
/// let grad_output = Array::from_elem(vec![1, 1, 1, 1, 4], 1.0_f64);
/// let grad_input =
///     resize_trilinear_backward(&grad_output.view(), 1, 1, [1, 1, 2], [1, 1, 4], true).unwrap();
///
/// assert_eq!(grad_input.shape(), &[1, 1, 1, 1, 2]);
/// assert!((grad_input[[0, 0, 0, 0, 0]] - 2.0).abs() < 1e-12);
/// assert!((grad_input[[0, 0, 0, 0, 1]] - 2.0).abs() < 1e-12);
/// // Unit mass per output cell is conserved.
/// assert!((grad_input.sum() - grad_output.sum()).abs() < 1e-12);
/// ```
pub fn resize_trilinear_backward<T>(
    grad_output: &ArrayView<'_, T, IxDyn>,
    batch: usize,
    channels: usize,
    input_size: [usize; 3],
    output_size: [usize; 3],
    align_corners: bool,
) -> ResizeResult<Array<T, IxDyn>>
where
    T: Float + AddAssign,
{
    check_resize_sizes(input_size, output_size)?;
    check_grad_output(grad_output, batch, channels, output_size)?;

    let grad_output = grad_output.as_standard_layout();

    let mut grad_input = Array::<T, _>::zeros(IxDyn(&[
        batch,
        channels,
        input_size[0],
        input_size[1],
        input_size[2],
    ]));

    // Identity mapping is bijective: the additive copy degenerates to a
    // plain copy because each input cell receives exactly one contribution.
    if input_size == output_size {
        Zip::from(&mut grad_input)
            .and(&grad_output)
            .for_each(|gi, &go| *gi += go);
        return Ok(grad_input);
    }

    let d_map = axis_mappings::<T>(input_size[0], output_size[0], align_corners);
    let h_map = axis_mappings::<T>(input_size[1], output_size[1], align_corners);
    let w_map = axis_mappings::<T>(input_size[2], output_size[2], align_corners);

    for b in 0..batch {
        for c in 0..channels {
            for (t2, dm) in d_map.iter().enumerate() {
                for (h2, hm) in h_map.iter().enumerate() {
                    for (w2, wm) in w_map.iter().enumerate() {
                        let g = grad_output[[b, c, t2, h2, w2]];
                        grad_input[[b, c, dm.lo, hm.lo, wm.lo]] += dm.w_lo * hm.w_lo * wm.w_lo * g;
                        grad_input[[b, c, dm.lo, hm.lo, wm.hi]] += dm.w_lo * hm.w_lo * wm.w_hi * g;
                        grad_input[[b, c, dm.lo, hm.hi, wm.lo]] += dm.w_lo * hm.w_hi * wm.w_lo * g;
                        grad_input[[b, c, dm.lo, hm.hi, wm.hi]] += dm.w_lo * hm.w_hi * wm.w_hi * g;
                        grad_input[[b, c, dm.hi, hm.lo, wm.lo]] += dm.w_hi * hm.w_lo * wm.w_lo * g;
                        grad_input[[b, c, dm.hi, hm.lo, wm.hi]] += dm.w_hi * hm.w_lo * wm.w_hi * g;
                        grad_input[[b, c, dm.hi, hm.hi, wm.lo]] += dm.w_hi * hm.w_hi * wm.w_lo * g;
                        grad_input[[b, c, dm.hi, hm.hi, wm.hi]] += dm.w_hi * hm.w_hi * wm.w_hi * g;
                    }
                }
            }
        }
    }

    Ok(grad_input)
}

/// Parallel variant of [`resize_trilinear`]
///
/// Batch slices are processed concurrently; every output cell is still
/// written by exactly one task, so the result is identical to the serial
/// kernel.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::{Array, IxDyn};
/// use trivol_kernels::{resize_trilinear, resize_trilinear_parallel};
///
/// let input = Array::from_shape_fn(IxDyn(&[2, 3, 2, 3, 4]), |idx: IxDyn| {
///     (idx[0] + 2 * idx[2] + 3 * idx[4]) as f64
/// });
/// let serial = resize_trilinear(&input.view(), [3, 5, 6], false).unwrap();
/// let parallel = resize_trilinear_parallel(&input.view(), [3, 5, 6], false).unwrap();
/// assert_eq!(serial, parallel);
/// ```
#[cfg(feature = "parallel")]
pub fn resize_trilinear_parallel<T>(
    input: &ArrayView<'_, T, IxDyn>,
    output_size: [usize; 3],
    align_corners: bool,
) -> ResizeResult<Array<T, IxDyn>>
where
    T: Float + Send + Sync,
{
    use scirs2_core::ndarray_ext::Axis;
    use scirs2_core::parallel_ops::*;

    check_input_volume(input)?;
    let shape = input.shape();
    let (batch, channels) = (shape[0], shape[1]);
    let input_size = [shape[2], shape[3], shape[4]];
    check_resize_sizes(input_size, output_size)?;

    let input = input.as_standard_layout();

    if input_size == output_size {
        return Ok(input.to_owned());
    }

    let d_map = axis_mappings::<T>(input_size[0], output_size[0], align_corners);
    let h_map = axis_mappings::<T>(input_size[1], output_size[1], align_corners);
    let w_map = axis_mappings::<T>(input_size[2], output_size[2], align_corners);

    let mut output = Array::<T, _>::zeros(IxDyn(&[
        batch,
        channels,
        output_size[0],
        output_size[1],
        output_size[2],
    ]));

    output
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(b, mut out_slice)| {
            for c in 0..channels {
                for (t2, dm) in d_map.iter().enumerate() {
                    for (h2, hm) in h_map.iter().enumerate() {
                        for (w2, wm) in w_map.iter().enumerate() {
                            out_slice[[c, t2, h2, w2]] = dm.w_lo
                                * (hm.w_lo
                                    * (wm.w_lo * input[[b, c, dm.lo, hm.lo, wm.lo]]
                                        + wm.w_hi * input[[b, c, dm.lo, hm.lo, wm.hi]])
                                    + hm.w_hi
                                        * (wm.w_lo * input[[b, c, dm.lo, hm.hi, wm.lo]]
                                            + wm.w_hi * input[[b, c, dm.lo, hm.hi, wm.hi]]))
                                + dm.w_hi
                                    * (hm.w_lo
                                        * (wm.w_lo * input[[b, c, dm.hi, hm.lo, wm.lo]]
                                            + wm.w_hi * input[[b, c, dm.hi, hm.lo, wm.hi]])
                                        + hm.w_hi
                                            * (wm.w_lo * input[[b, c, dm.hi, hm.hi, wm.lo]]
                                                + wm.w_hi
                                                    * input[[b, c, dm.hi, hm.hi, wm.hi]]));
                        }
                    }
                }
            }
        });

    Ok(output)
}

/// Parallel variant of [`resize_trilinear_backward`]
///
/// Parallelizes across batch slices only: distinct output coordinates within
/// one slice can scatter into the same input cell, so intra-slice
/// accumulation stays serial while slices (which never alias) run
/// concurrently.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::{Array, IxDyn};
/// use trivol_kernels::{resize_trilinear_backward, resize_trilinear_backward_parallel};
///
/// let grad = Array::from_shape_fn(IxDyn(&[2, 2, 3, 5, 6]), |idx: IxDyn| (idx[2] + idx[4]) as f64);
/// let serial =
///     resize_trilinear_backward(&grad.view(), 2, 2, [2, 3, 4], [3, 5, 6], true).unwrap();
/// let parallel =
///     resize_trilinear_backward_parallel(&grad.view(), 2, 2, [2, 3, 4], [3, 5, 6], true).unwrap();
/// assert_eq!(serial, parallel);
/// ```
#[cfg(feature = "parallel")]
pub fn resize_trilinear_backward_parallel<T>(
    grad_output: &ArrayView<'_, T, IxDyn>,
    batch: usize,
    channels: usize,
    input_size: [usize; 3],
    output_size: [usize; 3],
    align_corners: bool,
) -> ResizeResult<Array<T, IxDyn>>
where
    T: Float + AddAssign + Send + Sync,
{
    use scirs2_core::ndarray_ext::Axis;
    use scirs2_core::parallel_ops::*;

    check_resize_sizes(input_size, output_size)?;
    check_grad_output(grad_output, batch, channels, output_size)?;

    let grad_output = grad_output.as_standard_layout();

    let mut grad_input = Array::<T, _>::zeros(IxDyn(&[
        batch,
        channels,
        input_size[0],
        input_size[1],
        input_size[2],
    ]));

    if input_size == output_size {
        Zip::from(&mut grad_input)
            .and(&grad_output)
            .for_each(|gi, &go| *gi += go);
        return Ok(grad_input);
    }

    let d_map = axis_mappings::<T>(input_size[0], output_size[0], align_corners);
    let h_map = axis_mappings::<T>(input_size[1], output_size[1], align_corners);
    let w_map = axis_mappings::<T>(input_size[2], output_size[2], align_corners);

    grad_input
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(b, mut grad_slice)| {
            for c in 0..channels {
                for (t2, dm) in d_map.iter().enumerate() {
                    for (h2, hm) in h_map.iter().enumerate() {
                        for (w2, wm) in w_map.iter().enumerate() {
                            let g = grad_output[[b, c, t2, h2, w2]];
                            grad_slice[[c, dm.lo, hm.lo, wm.lo]] +=
                                dm.w_lo * hm.w_lo * wm.w_lo * g;
                            grad_slice[[c, dm.lo, hm.lo, wm.hi]] +=
                                dm.w_lo * hm.w_lo * wm.w_hi * g;
                            grad_slice[[c, dm.lo, hm.hi, wm.lo]] +=
                                dm.w_lo * hm.w_hi * wm.w_lo * g;
                            grad_slice[[c, dm.lo, hm.hi, wm.hi]] +=
                                dm.w_lo * hm.w_hi * wm.w_hi * g;
                            grad_slice[[c, dm.hi, hm.lo, wm.lo]] +=
                                dm.w_hi * hm.w_lo * wm.w_lo * g;
                            grad_slice[[c, dm.hi, hm.lo, wm.hi]] +=
                                dm.w_hi * hm.w_lo * wm.w_hi * g;
                            grad_slice[[c, dm.hi, hm.hi, wm.lo]] +=
                                dm.w_hi * hm.w_hi * wm.w_lo * g;
                            grad_slice[[c, dm.hi, hm.hi, wm.hi]] +=
                                dm.w_hi * hm.w_hi * wm.w_hi * g;
                        }
                    }
                }
            }
        });

    Ok(grad_input)
}
