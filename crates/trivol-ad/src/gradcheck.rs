//! Gradient checking utilities
//!
//! Verifies analytical gradient implementations (such as the resize adjoint)
//! against numerical gradients computed with finite differences. This is the
//! tool that *tests* rather than assumes the boundary-clamp adjoint: an
//! off-by-one in the edge replication shows up immediately as a mismatch at
//! the clamped coordinates.
//!
//! # Finite Difference Methods
//!
//! Both variants are implemented:
//! - **Central difference**: `f'(x) ≈ [f(x+h) - f(x-h)] / (2h)` (more accurate)
//! - **Forward difference**: `f'(x) ≈ [f(x+h) - f(x)] / h` (faster)
//!
//! # Example
//!
//! ```
//! use scirs2_core::ndarray_ext::{Array, IxDyn};
//! use trivol_ad::gradcheck::{check_gradient, GradCheckConfig};
//!
//! // f is the identity, so its exact gradient passes grad_y through.
//! let f = |x: &Array<f64, IxDyn>| Ok(x.clone());
//! let df = |_x: &Array<f64, IxDyn>, grad_y: &Array<f64, IxDyn>| Ok(grad_y.clone());
//!
//! let x = Array::from_shape_vec(vec![2, 2], vec![1.0, -2.0, 0.5, 3.0]).unwrap();
//! let grad_y = Array::from_elem(vec![2, 2], 1.0);
//!
//! let result = check_gradient(f, df, &x, &grad_y, &GradCheckConfig::default()).unwrap();
//! assert!(result.passed);
//! ```

use anyhow::{anyhow, Result};
use scirs2_core::ndarray_ext::{Array, IxDyn};
use scirs2_core::numeric::Float;

/// Gradient checking configuration
#[derive(Debug, Clone)]
pub struct GradCheckConfig {
    /// Step size for finite differences (default: 1e-5)
    pub epsilon: f64,

    /// Relative tolerance for gradient comparison (default: 1e-3)
    pub rtol: f64,

    /// Absolute tolerance for gradient comparison (default: 1e-5)
    pub atol: f64,

    /// Use central difference (more accurate but 2x slower)
    pub use_central_diff: bool,

    /// Print detailed error messages
    pub verbose: bool,
}

impl Default for GradCheckConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-5,
            rtol: 1e-3,
            atol: 1e-5,
            use_central_diff: true,
            verbose: false,
        }
    }
}

/// Result of gradient checking
#[derive(Debug)]
pub struct GradCheckResult {
    /// Maximum absolute difference between analytical and numerical gradients
    pub max_abs_diff: f64,

    /// Maximum relative difference
    pub max_rel_diff: f64,

    /// Whether the gradient check passed
    pub passed: bool,

    /// Number of elements checked
    pub num_elements: usize,

    /// Number of elements that failed the check
    pub num_failures: usize,
}

/// Check a gradient implementation using finite differences
///
/// Verifies that the analytical gradient matches the numerical gradient of
/// `dot(grad_y, f(x))` element by element.
///
/// # Arguments
///
/// * `f` - Forward function: x -> y
/// * `df` - Gradient function: (x, grad_y) -> grad_x
/// * `x` - Input volume to check gradients at (standard layout)
/// * `grad_y` - Upstream gradient (∂L/∂y)
/// * `config` - Gradient checking configuration
///
/// # Returns
///
/// Result containing gradient check statistics
pub fn check_gradient<T, F, G>(
    f: F,
    df: G,
    x: &Array<T, IxDyn>,
    grad_y: &Array<T, IxDyn>,
    config: &GradCheckConfig,
) -> Result<GradCheckResult>
where
    T: Float + std::fmt::Display,
    F: Fn(&Array<T, IxDyn>) -> Result<Array<T, IxDyn>>,
    G: Fn(&Array<T, IxDyn>, &Array<T, IxDyn>) -> Result<Array<T, IxDyn>>,
{
    // Compute analytical gradient
    let analytical_grad = df(x, grad_y)?;

    if analytical_grad.shape() != x.shape() {
        return Err(anyhow!(
            "Gradient shape {:?} doesn't match input shape {:?}",
            analytical_grad.shape(),
            x.shape()
        ));
    }

    // Compute numerical gradient using finite differences
    let numerical_grad = compute_numerical_gradient(f, x, grad_y, config)?;

    // Compare gradients
    compare_gradients(&analytical_grad, &numerical_grad, config)
}

/// Compute the numerical gradient using finite differences
fn compute_numerical_gradient<T, F>(
    f: F,
    x: &Array<T, IxDyn>,
    grad_y: &Array<T, IxDyn>,
    config: &GradCheckConfig,
) -> Result<Array<T, IxDyn>>
where
    T: Float,
    F: Fn(&Array<T, IxDyn>) -> Result<Array<T, IxDyn>>,
{
    let epsilon = T::from(config.epsilon).ok_or_else(|| anyhow!("Failed to convert epsilon"))?;
    let mut numerical_grad = Array::<T, _>::zeros(x.raw_dim());

    for idx in 0..x.len() {
        // Perturb x[idx] by +epsilon
        let mut x_plus = x.clone();
        {
            let slice = x_plus
                .as_slice_mut()
                .ok_or_else(|| anyhow!("Input volume must be in standard layout"))?;
            slice[idx] = slice[idx] + epsilon;
        }
        let y_plus = f(&x_plus)?;

        let grad_contribution = if config.use_central_diff {
            // Central difference: [f(x+h) - f(x-h)] / (2h)
            let mut x_minus = x.clone();
            {
                let slice = x_minus
                    .as_slice_mut()
                    .ok_or_else(|| anyhow!("Input volume must be in standard layout"))?;
                slice[idx] = slice[idx] - epsilon;
            }
            let y_minus = f(&x_minus)?;

            // dot(grad_y, (y_plus - y_minus) / (2*epsilon))
            let diff = &y_plus - &y_minus;
            let scaled = diff.mapv(|v| v / (epsilon + epsilon));
            dot_product(grad_y, &scaled)?
        } else {
            // Forward difference: [f(x+h) - f(x)] / h
            let y = f(x)?;
            let diff = &y_plus - &y;
            let scaled = diff.mapv(|v| v / epsilon);
            dot_product(grad_y, &scaled)?
        };

        let slice = numerical_grad
            .as_slice_mut()
            .ok_or_else(|| anyhow!("Gradient buffer must be in standard layout"))?;
        slice[idx] = grad_contribution;
    }

    Ok(numerical_grad)
}

/// Dot product between two volumes (element-wise multiply and sum)
fn dot_product<T>(a: &Array<T, IxDyn>, b: &Array<T, IxDyn>) -> Result<T>
where
    T: Float,
{
    if a.shape() != b.shape() {
        return Err(anyhow!(
            "Shape mismatch: {:?} vs {:?}",
            a.shape(),
            b.shape()
        ));
    }

    let mut sum = T::zero();
    for (&a_val, &b_val) in a.iter().zip(b.iter()) {
        sum = sum + a_val * b_val;
    }
    Ok(sum)
}

/// Compare analytical and numerical gradients element by element
fn compare_gradients<T>(
    analytical: &Array<T, IxDyn>,
    numerical: &Array<T, IxDyn>,
    config: &GradCheckConfig,
) -> Result<GradCheckResult>
where
    T: Float + std::fmt::Display,
{
    let rtol = T::from(config.rtol).ok_or_else(|| anyhow!("Failed to convert rtol"))?;
    let atol = T::from(config.atol).ok_or_else(|| anyhow!("Failed to convert atol"))?;

    let mut max_abs_diff = 0.0_f64;
    let mut max_rel_diff = 0.0_f64;
    let mut num_failures = 0;

    for (idx, (&a_val, &n_val)) in analytical.iter().zip(numerical.iter()).enumerate() {
        let abs_diff = (a_val - n_val).abs();
        let rel_diff = if n_val.abs() > T::epsilon() {
            abs_diff / n_val.abs()
        } else {
            abs_diff
        };

        let abs_diff_f64 = abs_diff
            .to_f64()
            .ok_or_else(|| anyhow!("Conversion error"))?;
        let rel_diff_f64 = rel_diff
            .to_f64()
            .ok_or_else(|| anyhow!("Conversion error"))?;

        max_abs_diff = max_abs_diff.max(abs_diff_f64);
        max_rel_diff = max_rel_diff.max(rel_diff_f64);

        if abs_diff > atol && rel_diff > rtol {
            num_failures += 1;

            if config.verbose {
                println!(
                    "Gradient mismatch at flat index {}: analytical={}, numerical={}, \
                     abs_diff={}, rel_diff={}",
                    idx, a_val, n_val, abs_diff, rel_diff
                );
            }
        }
    }

    let passed = num_failures == 0;

    if config.verbose {
        if passed {
            println!("✓ Gradient check passed!");
        } else {
            println!(
                "✗ Gradient check failed: {}/{} elements exceeded tolerance",
                num_failures,
                analytical.len()
            );
        }
        println!("  Max absolute difference: {:.2e}", max_abs_diff);
        println!("  Max relative difference: {:.2e}", max_rel_diff);
    }

    Ok(GradCheckResult {
        max_abs_diff,
        max_rel_diff,
        passed,
        num_elements: analytical.len(),
        num_failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(shape: &[usize]) -> Array<f64, IxDyn> {
        Array::from_shape_fn(IxDyn(shape), |idx| {
            (0..shape.len()).map(|a| idx[a] * (a + 1)).sum::<usize>() as f64 * 0.5 - 1.0
        })
    }

    #[test]
    fn test_identity_gradient_passes() {
        let f = |x: &Array<f64, IxDyn>| Ok(x.clone());
        let df = |_x: &Array<f64, IxDyn>, g: &Array<f64, IxDyn>| Ok(g.clone());

        let x = ramp(&[2, 3]);
        let g = ramp(&[2, 3]);

        let result = check_gradient(f, df, &x, &g, &GradCheckConfig::default()).unwrap();
        assert!(result.passed);
        assert_eq!(result.num_elements, 6);
        assert_eq!(result.num_failures, 0);
    }

    #[test]
    fn test_scaling_gradient_passes() {
        let f = |x: &Array<f64, IxDyn>| Ok(x.mapv(|v| v * 3.0));
        let df = |_x: &Array<f64, IxDyn>, g: &Array<f64, IxDyn>| Ok(g.mapv(|v| v * 3.0));

        let x = ramp(&[2, 2, 2]);
        let g = ramp(&[2, 2, 2]);

        let result = check_gradient(f, df, &x, &g, &GradCheckConfig::default()).unwrap();
        assert!(result.passed);
    }

    #[test]
    fn test_wrong_gradient_fails() {
        let f = |x: &Array<f64, IxDyn>| Ok(x.clone());
        // Off by a factor of two
        let df = |_x: &Array<f64, IxDyn>, g: &Array<f64, IxDyn>| Ok(g.mapv(|v| v * 2.0));

        let x = ramp(&[3, 3]);
        let g = Array::from_elem(IxDyn(&[3, 3]), 1.0);

        let result = check_gradient(f, df, &x, &g, &GradCheckConfig::default()).unwrap();
        assert!(!result.passed);
        assert!(result.num_failures > 0);
    }

    #[test]
    fn test_forward_difference_mode() {
        let f = |x: &Array<f64, IxDyn>| Ok(x.mapv(|v| v * 0.5));
        let df = |_x: &Array<f64, IxDyn>, g: &Array<f64, IxDyn>| Ok(g.mapv(|v| v * 0.5));

        let config = GradCheckConfig {
            use_central_diff: false,
            rtol: 1e-2,
            atol: 1e-4,
            ..Default::default()
        };

        let x = ramp(&[2, 4]);
        let g = ramp(&[2, 4]);

        let result = check_gradient(f, df, &x, &g, &config).unwrap();
        assert!(result.passed);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let f = |x: &Array<f64, IxDyn>| Ok(x.clone());
        // Gradient with the wrong shape
        let df = |_x: &Array<f64, IxDyn>, _g: &Array<f64, IxDyn>| {
            Ok(Array::<f64, _>::zeros(IxDyn(&[1])))
        };

        let x = ramp(&[2, 2]);
        let g = ramp(&[2, 2]);

        assert!(check_gradient(f, df, &x, &g, &GradCheckConfig::default()).is_err());
    }
}
