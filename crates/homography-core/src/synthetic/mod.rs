//! Deterministic synthetic data generation helpers.
//!
//! This module provides small, reusable building blocks for constructing
//! synthetic homography problems used in tests and examples:
//! - planar point grids,
//! - mapping points through a known homography into correspondences,
//! - deterministic pseudo-random noise and outlier injection.
//!
//! The helpers are deterministic (explicit seeds; stable point ordering) and
//! do not depend on the internal algorithm of `rand` RNGs.
//!
//! # Example
//!
//! ```
//! use homography_core::{synthetic::{noise::UniformPixelNoise, planar}, Mat3};
//!
//! let h = Mat3::new(1.1, 0.05, 30.0, -0.02, 0.95, 12.0, 1e-4, 2e-4, 1.0);
//! let grid = planar::grid_points_2d(5, 4, 40.0);
//! let set = planar::project_through(&h, &grid, &UniformPixelNoise::default()).unwrap();
//! assert_eq!(set.len(), 20);
//! ```

pub mod noise;
pub mod planar;
