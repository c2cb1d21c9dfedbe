//! Output-to-source coordinate mapping for linear resampling
//!
//! Resizing an axis from `input_size` to `output_size` samples maps every
//! output index to a fractional source coordinate, which is then split into
//! the two bracketing source indices and their linear weights. Two mapping
//! conventions are supported:
//!
//! - **align_corners**: output index 0 maps to source index 0 and output
//!   index `output_size - 1` maps to source index `input_size - 1`, exactly.
//! - **half-pixel** (the default when `align_corners` is false): output pixel
//!   *centers* map to source pixel centers, `src = scale * (i + 0.5) - 0.5`,
//!   clamped below at 0.
//!
//! Source coordinates are computed in `f64` regardless of the element type,
//! matching the accumulation precision of the resampling kernels, and the
//! weights are narrowed to the element type once per mapping entry.

use scirs2_core::numeric::Float;

/// Source indices and linear weights for one output coordinate along one axis
///
/// Invariants: `0 <= lo <= hi < axis_size` and `w_lo + w_hi == 1`. At the
/// upper boundary `hi == lo` (the last sample is replicated) and the weights
/// are left as computed rather than renormalized; the replicated sample then
/// receives the combined weight through the two reads landing on one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMapping<T> {
    /// Lower bracketing source index
    pub lo: usize,
    /// Upper bracketing source index (equal to `lo` at the boundary)
    pub hi: usize,
    /// Weight of the sample at `lo`
    pub w_lo: T,
    /// Weight of the sample at `hi`
    pub w_hi: T,
}

/// Compute the per-axis scale factor used by the source index mapping
///
/// With `align_corners` and more than one output sample the endpoints of the
/// two grids coincide, so the scale is the ratio of the *intervals*,
/// `(input_size - 1) / (output_size - 1)`. Otherwise the scale is the plain
/// size ratio; for the degenerate aligned single-output case the mapper
/// resolves to source index 0 regardless of the scale value.
///
/// # Panics
///
/// Panics if either size is zero (callers validate via
/// [`check_resize_sizes`](crate::validate::check_resize_sizes) first).
///
/// # Examples
///
/// ```
/// use trivol_kernels::compute_scale;
///
/// assert!((compute_scale(2, 4, true) - 1.0 / 3.0).abs() < 1e-15);
/// assert!((compute_scale(2, 4, false) - 0.5).abs() < 1e-15);
/// ```
pub fn compute_scale(input_size: usize, output_size: usize, align_corners: bool) -> f64 {
    assert!(
        input_size > 0 && output_size > 0,
        "axis sizes must be positive: input {} output {}",
        input_size,
        output_size
    );

    if align_corners && output_size > 1 {
        (input_size - 1) as f64 / (output_size - 1) as f64
    } else {
        input_size as f64 / output_size as f64
    }
}

/// Map an output index to a fractional source coordinate
///
/// In half-pixel mode coordinates below 0 are clamped to 0; this is the
/// convention's boundary policy, not an error condition.
///
/// # Examples
///
/// ```
/// use trivol_kernels::source_index;
///
/// // align_corners: src = scale * idx
/// assert!((source_index(1.0 / 3.0, 3, true) - 1.0).abs() < 1e-15);
///
/// // half-pixel: src = scale * (idx + 0.5) - 0.5, clamped at 0
/// assert!((source_index(0.5, 0, false) - 0.0).abs() < 1e-15);
/// assert!((source_index(0.5, 1, false) - 0.25).abs() < 1e-15);
/// ```
pub fn source_index(scale: f64, out_index: usize, align_corners: bool) -> f64 {
    if align_corners {
        scale * out_index as f64
    } else {
        let src = scale * (out_index as f64 + 0.5) - 0.5;
        src.max(0.0)
    }
}

/// Resolve one output coordinate to its bracketing source indices and weights
///
/// `lo` is the floor of the source coordinate; `hi` is `lo + 1` unless `lo`
/// already is the last valid index, in which case the last sample is
/// replicated (`hi == lo`) and the weights are left untouched.
///
/// The caller must pass the `scale` produced by [`compute_scale`] for the
/// same `(axis_size, align_corners)` pair; the mapping then satisfies
/// `0 <= lo <= hi < axis_size`.
///
/// # Examples
///
/// ```
/// use trivol_kernels::{axis_mapping, compute_scale};
///
/// let scale = compute_scale(2, 4, true);
/// let m = axis_mapping::<f64>(scale, 1, true, 2);
/// assert_eq!((m.lo, m.hi), (0, 1));
/// assert!((m.w_lo - 2.0 / 3.0).abs() < 1e-12);
/// assert!((m.w_hi - 1.0 / 3.0).abs() < 1e-12);
///
/// // Last output index never reads past the end of the axis.
/// let m = axis_mapping::<f64>(scale, 3, true, 2);
/// assert_eq!((m.lo, m.hi), (1, 1));
/// ```
pub fn axis_mapping<T>(
    scale: f64,
    out_index: usize,
    align_corners: bool,
    axis_size: usize,
) -> AxisMapping<T>
where
    T: Float,
{
    let src = source_index(scale, out_index, align_corners);
    let lo = src as usize;
    debug_assert!(lo < axis_size, "source index {} escaped axis {}", src, axis_size);

    let hi = if lo < axis_size - 1 { lo + 1 } else { lo };
    let frac = src - lo as f64;

    AxisMapping {
        lo,
        hi,
        w_lo: T::from(1.0 - frac).unwrap(),
        w_hi: T::from(frac).unwrap(),
    }
}

/// Precompute the full mapping table for one axis
///
/// The scale factor is derived once and reused across every output
/// coordinate on the axis.
///
/// # Examples
///
/// ```
/// use trivol_kernels::axis_mappings;
///
/// let table = axis_mappings::<f64>(2, 4, false);
/// assert_eq!(table.len(), 4);
/// // Half-pixel first coordinate clamps to the first sample.
/// assert_eq!((table[0].lo, table[0].hi), (0, 1));
/// assert!((table[0].w_lo - 1.0).abs() < 1e-12);
/// ```
pub fn axis_mappings<T>(input_size: usize, output_size: usize, align_corners: bool) -> Vec<AxisMapping<T>>
where
    T: Float,
{
    let scale = compute_scale(input_size, output_size, align_corners);
    (0..output_size)
        .map(|out_index| axis_mapping(scale, out_index, align_corners, input_size))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_scale_aligned() {
        assert!((compute_scale(5, 9, true) - 0.5).abs() < 1e-15);
        assert!((compute_scale(2, 4, true) - 1.0 / 3.0).abs() < 1e-15);
    }

    #[test]
    fn test_compute_scale_half_pixel() {
        assert!((compute_scale(4, 2, false) - 2.0).abs() < 1e-15);
        assert!((compute_scale(2, 4, false) - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_compute_scale_aligned_single_output() {
        // Degenerate aligned case falls through to the size ratio; the mapper
        // resolves index 0 to source 0 whatever the scale is.
        assert!((compute_scale(7, 1, true) - 7.0).abs() < 1e-15);
        let m = axis_mapping::<f64>(compute_scale(7, 1, true), 0, true, 7);
        assert_eq!(m.lo, 0);
        assert!((m.w_lo - 1.0).abs() < 1e-15);
    }

    #[test]
    #[should_panic(expected = "axis sizes must be positive")]
    fn test_compute_scale_zero_size() {
        compute_scale(0, 4, true);
    }

    #[test]
    fn test_source_index_negative_clamped() {
        // First half-pixel coordinate of a 2 -> 4 upsample lands at -0.25.
        let src = source_index(0.5, 0, false);
        assert!((src - 0.0).abs() < 1e-15);
    }

    #[test]
    fn test_axis_mapping_weights_sum_to_one() {
        for &align in &[true, false] {
            let table = axis_mappings::<f64>(3, 7, align);
            for m in &table {
                assert!((m.w_lo + m.w_hi - 1.0).abs() < 1e-12);
                assert!(m.w_lo >= 0.0 && m.w_hi >= 0.0);
            }
        }
    }

    #[test]
    fn test_axis_mapping_boundary_clamp() {
        for &align in &[true, false] {
            for &(input, output) in &[(2usize, 4usize), (4, 2), (1, 5), (3, 3), (5, 8)] {
                let table = axis_mappings::<f64>(input, output, align);
                for m in &table {
                    assert!(m.lo <= m.hi);
                    assert!(m.hi < input, "hi {} escaped axis of size {}", m.hi, input);
                }
            }
        }
    }

    #[test]
    fn test_axis_mapping_aligned_endpoints() {
        // align_corners pins both endpoints exactly.
        let table = axis_mappings::<f64>(5, 11, true);
        let first = table.first().unwrap();
        let last = table.last().unwrap();
        assert_eq!(first.lo, 0);
        assert!((first.w_lo - 1.0).abs() < 1e-12);
        assert_eq!(last.hi, 4);
        assert!((last.w_hi + last.w_lo - 1.0).abs() < 1e-12);
        assert!(last.w_lo < 1e-12 || last.lo == 4);
    }

    #[test]
    fn test_axis_mapping_single_sample_axis() {
        let table = axis_mappings::<f64>(1, 4, false);
        for m in &table {
            assert_eq!((m.lo, m.hi), (0, 0));
        }
    }

    #[test]
    fn test_axis_mapping_half_pixel_2_to_4() {
        // scale = 0.5; src = [0 (clamped from -0.25), 0.25, 0.75, 1.25]
        let table = axis_mappings::<f64>(2, 4, false);
        let expect = [(0, 1, 1.0), (0, 1, 0.75), (0, 1, 0.25), (1, 1, 0.75)];
        for (m, &(lo, hi, w_lo)) in table.iter().zip(expect.iter()) {
            assert_eq!((m.lo, m.hi), (lo, hi));
            assert!((m.w_lo - w_lo).abs() < 1e-12);
        }
    }
}
