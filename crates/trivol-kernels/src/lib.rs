//! # trivol-kernels
//!
//! Trilinear resize kernels for 5-D volumes with exact adjoint backward passes.
//!
//! This crate resamples volumes shaped `(batch, channels, depth, height,
//! width)` to a new spatial size by trilinear interpolation, and computes the
//! gradient of that operation: the scatter-add adjoint of the forward
//! weighted gather. It is the compute core of the TriVol stack:
//!
//! - **Coordinate mapping** with two conventions: corner-aligned
//!   (`align_corners = true`, endpoints pinned exactly) and half-pixel
//!   (pixel centers map to pixel centers, the default convention in modern
//!   resamplers)
//! - **8-corner interpolation** with replicate-edge boundary clamping
//! - **Exact adjoint backward**: `dot(g, forward(x)) == dot(backward(g), x)`
//!   for both conventions, including the clamped boundary cells
//! - **Identity fast path**: matching sizes copy element-wise with no weight
//!   arithmetic, so a no-op resize is bit-exact
//! - **Parallel variants** over batch slices (feature `parallel`, default on)
//!
//! ## Quick Start
//!
//! ```
//! use scirs2_core::ndarray_ext::Array;
//! use trivol_kernels::{resize_trilinear, resize_trilinear_backward};
//!
//! // A 1×1 volume with a 2-sample width axis.
//! let input = Array::from_shape_vec(vec![1, 1, 1, 1, 2], vec![10.0_f64, 20.0]).unwrap();
//!
//! // Upsample the width axis to 4 with corner alignment.
//! let output = resize_trilinear(&input.view(), [1, 1, 4], true).unwrap();
//! assert_eq!(output.shape(), &[1, 1, 1, 1, 4]);
//!
//! // Propagate a gradient back through the resize.
//! let grad = Array::from_elem(vec![1, 1, 1, 1, 4], 1.0_f64);
//! let grad_input =
//!     resize_trilinear_backward(&grad.view(), 1, 1, [1, 1, 2], [1, 1, 4], true).unwrap();
//! assert_eq!(grad_input.shape(), input.shape());
//! // Forward weights partition unit mass per output cell.
//! assert!((grad_input.sum() - grad.sum()).abs() < 1e-12);
//! ```
//!
//! ## Shape contract
//!
//! Volumes are dynamic-rank `scirs2_core::ndarray_ext` arrays validated to be
//! non-empty and exactly 5-D before any buffer is touched; every rejection is
//! a structured [`ResizeError`] and a failed call has no side effects.
//!
//! ## Features
//!
//! - `parallel` (default) - batch-parallel kernel variants via
//!   `scirs2_core::parallel_ops`
//!
//! ## SciRS2 Integration
//!
//! This crate uses `scirs2-core` for all array operations and numerical
//! computations. Direct use of `ndarray`, `rand`, or `num-traits` is not
//! permitted.

#![deny(warnings)]

pub mod error;
pub mod mapping;
pub mod trilinear;
pub mod utils;
pub mod validate;


// Re-exports
pub use error::{ResizeError, ResizeResult};
pub use mapping::*;
pub use trilinear::*;
pub use utils::*;
pub use validate::*;
