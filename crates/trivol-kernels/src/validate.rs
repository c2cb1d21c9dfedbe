//! Shape validation for the resize kernels
//!
//! All checks run before any buffer is allocated or written, so a rejected
//! call is total and side-effect-free. Volumes are dynamic-rank views; rank
//! and emptiness are therefore runtime properties and part of the contract.

use scirs2_core::ndarray_ext::{ArrayView, IxDyn};

use crate::error::{ResizeError, ResizeResult};

/// Check that all six spatial sizes are strictly positive
///
/// # Errors
///
/// Returns [`ResizeError::NonPositiveSize`] naming all six sizes if any of
/// them is zero.
pub fn check_resize_sizes(input_size: [usize; 3], output_size: [usize; 3]) -> ResizeResult<()> {
    let positive = input_size.iter().chain(output_size.iter()).all(|&s| s > 0);
    if !positive {
        return Err(ResizeError::non_positive_size(input_size, output_size));
    }
    Ok(())
}

/// Check that an input volume is a non-empty 5-D array
///
/// # Errors
///
/// Returns [`ResizeError::InvalidVolume`] with the offending shape if the
/// view is not rank 5 or has a zero dimension.
pub fn check_input_volume<T>(input: &ArrayView<'_, T, IxDyn>) -> ResizeResult<()> {
    let shape = input.shape();
    if shape.len() != 5 || shape.iter().any(|&d| d == 0) {
        return Err(ResizeError::invalid_volume(shape));
    }
    Ok(())
}

/// Check that a gradient volume matches the declared output shape exactly
///
/// The expected shape is `(batch, channels, outD, outH, outW)`; dimensions
/// are compared one by one and the first disagreement is reported.
///
/// # Errors
///
/// Returns [`ResizeError::InvalidVolume`] if the view is not a non-empty 5-D
/// array, or [`ResizeError::DimensionMismatch`] carrying the axis index,
/// expected size, and actual size of the first mismatch.
pub fn check_grad_output<T>(
    grad_output: &ArrayView<'_, T, IxDyn>,
    batch: usize,
    channels: usize,
    output_size: [usize; 3],
) -> ResizeResult<()> {
    check_input_volume(grad_output)?;

    let expected = [
        batch,
        channels,
        output_size[0],
        output_size[1],
        output_size[2],
    ];
    for (axis, (&want, &got)) in expected.iter().zip(grad_output.shape().iter()).enumerate() {
        if want != got {
            return Err(ResizeError::dimension_mismatch(axis, want, got));
        }
    }
    Ok(())
}
