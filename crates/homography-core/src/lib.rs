//! Core math and data primitives for planar homography estimation.
//!
//! This crate provides the building blocks used by the solver crates:
//!
//! - linear algebra type aliases (`Real`, `Pt2`, `Mat3`, ...) and homogeneous
//!   helpers,
//! - the correspondence data model ([`Correspondence`], [`Side`]),
//! - a deterministic, model-agnostic RANSAC engine ([`ransac_fit`],
//!   [`Estimator`]).
//!
//! # Modules
//!
//! - \[`math`\]: basic type aliases and homogeneous helpers.
//! - \[`types`\]: correspondences and reprojection statistics.
//! - \[`ransac`\]: generic robust estimation helpers.
//! - \[`synthetic`\]: deterministic synthetic data helpers (tests/examples).

/// Linear algebra type aliases and helpers.
mod math;
/// Generic RANSAC engine and traits.
mod ransac;
/// Deterministic synthetic data generation helpers.
///
/// Used in workspace tests and examples; also handy for benchmarking and
/// regression testing of estimators.
pub mod synthetic;
/// Correspondence and statistics types.
mod types;

pub use math::*;
pub use ransac::*;
pub use types::*;
