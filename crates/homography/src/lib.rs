//! High-level entry crate for planar homography estimation.
//!
//! Given point correspondences between two images, estimate the 3×3
//! projective transform `H` with `target ~ H * source`:
//! - direct linear solve ([`linear::dlt_homography`]),
//! - Hartley-normalized linear solve ([`linear::normalized_dlt`]),
//! - RANSAC over the normalized solve ([`linear::ransac_homography`]).
//!
//! # Quick Start
//!
//! ```
//! use homography::prelude::*;
//! use homography::synthetic::{noise::UniformPixelNoise, planar};
//!
//! # fn main() -> anyhow::Result<()> {
//! let h_true = Mat3::new(1.05, 0.02, 14.0, -0.03, 0.98, 6.0, 1e-4, 0.0, 1.0);
//! let grid = planar::grid_points_2d(6, 5, 50.0);
//! let mut set = planar::project_through(&h_true, &grid, &UniformPixelNoise::default())?;
//! planar::displace_targets(&mut set, &[3, 17], 40.0, 1);
//!
//! let config = EstimatorConfig::Robust(RansacOptions { max_iters: 200, thresh: 2.0, seed: 9 });
//! let estimate = config.estimate(&set)?;
//! let inliers = estimate.inliers.unwrap_or_default();
//! assert!(!inliers.contains(&3) && !inliers.contains(&17));
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`core`] - Math types, correspondences, RANSAC engine
//! - [`linear`] - The estimators and their error type
//! - [`synthetic`] - Synthetic data generation for testing

/// Math types, correspondences and the generic RANSAC engine.
pub mod core {
    pub use homography_core::*;
}

/// Direct, normalized and robust homography estimators.
pub mod linear {
    pub use homography_linear::*;
}

/// Deterministic synthetic correspondence sets for tests and demos.
pub mod synthetic {
    pub use homography_core::synthetic::*;
}

/// Commonly used types and functions.
pub mod prelude {
    pub use homography_core::{Correspondence, Mat3, Pt2, RansacOptions, Real, Side};
    pub use homography_linear::{
        DirectSolver, EstimatorConfig, HomographyError, HomographyEstimate, HomographyEstimator,
        NormalizedSolver, RobustEstimator,
    };
}
