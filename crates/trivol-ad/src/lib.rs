//! # trivol-ad
//!
//! Differentiation support for the TriVol resize kernels.
//!
//! This crate provides:
//! - A custom VJP (Vector-Jacobian Product) rule exposing the trilinear
//!   resize as a differentiable operation
//! - Finite-difference gradient checking for validating adjoint
//!   implementations against numerical gradients

#![deny(warnings)]

pub mod gradcheck;
pub mod vjp;

// Re-exports
pub use vjp::*;
