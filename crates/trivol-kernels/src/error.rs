//! Error types for volumetric resize operations
//!
//! Every failure mode of the resize kernels is a shape-validation failure,
//! detected before any buffer is allocated or written. The variants carry
//! structured payloads so callers can report exactly which dimension was
//! rejected and why.

use std::fmt;

/// Error type for volumetric resize operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResizeError {
    /// One or more of the six spatial sizes is zero
    NonPositiveSize {
        input_size: [usize; 3],
        output_size: [usize; 3],
    },

    /// A supplied volume is not a non-empty 5-D array
    InvalidVolume { shape: Vec<usize> },

    /// A gradient volume disagrees with the declared output shape
    DimensionMismatch {
        axis: usize,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for ResizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResizeError::NonPositiveSize {
                input_size,
                output_size,
            } => write!(
                f,
                "input and output sizes should be greater than 0, but got input \
                 (D: {}, H: {}, W: {}) output (D: {}, H: {}, W: {})",
                input_size[0],
                input_size[1],
                input_size[2],
                output_size[0],
                output_size[1],
                output_size[2]
            ),

            ResizeError::InvalidVolume { shape } => write!(
                f,
                "non-empty 5-D volume (batch, channels, depth, height, width) expected, \
                 but got shape {:?}",
                shape
            ),

            ResizeError::DimensionMismatch {
                axis,
                expected,
                actual,
            } => write!(
                f,
                "grad_output has size {} at dimension {}, expected {}",
                actual, axis, expected
            ),
        }
    }
}

impl std::error::Error for ResizeError {}

/// Result type for volumetric resize operations
pub type ResizeResult<T> = Result<T, ResizeError>;

impl ResizeError {
    /// Create a non-positive size error
    pub fn non_positive_size(input_size: [usize; 3], output_size: [usize; 3]) -> Self {
        ResizeError::NonPositiveSize {
            input_size,
            output_size,
        }
    }

    /// Create an invalid volume error
    pub fn invalid_volume(shape: &[usize]) -> Self {
        ResizeError::InvalidVolume {
            shape: shape.to_vec(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch(axis: usize, expected: usize, actual: usize) -> Self {
        ResizeError::DimensionMismatch {
            axis,
            expected,
            actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_positive_size_display() {
        let err = ResizeError::non_positive_size([4, 0, 8], [4, 5, 8]);

        let msg = format!("{}", err);
        assert!(msg.contains("greater than 0"));
        assert!(msg.contains("(D: 4, H: 0, W: 8)"));
        assert!(msg.contains("(D: 4, H: 5, W: 8)"));
    }

    #[test]
    fn test_invalid_volume_display() {
        let err = ResizeError::invalid_volume(&[2, 3, 4]);

        let msg = format!("{}", err);
        assert!(msg.contains("non-empty 5-D volume"));
        assert!(msg.contains("[2, 3, 4]"));
    }

    #[test]
    fn test_dimension_mismatch_display() {
        let err = ResizeError::dimension_mismatch(3, 7, 5);

        let msg = format!("{}", err);
        assert!(msg.contains("size 5 at dimension 3"));
        assert!(msg.contains("expected 7"));
    }
}
