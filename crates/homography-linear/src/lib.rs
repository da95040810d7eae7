//! Linear and robust estimators for planar homographies.
//!
//! A homography `H` maps pixels of a source image to pixels of a target
//! image: `target ~ H * source`. Three estimators are provided:
//!
//! - [`dlt_homography`] / [`DirectSolver`]: DLT on raw coordinates,
//! - [`normalized_dlt`] / [`NormalizedSolver`]: DLT on Hartley-normalized
//!   coordinates, de-normalized afterwards,
//! - [`ransac_homography`] / [`RobustEstimator`]: RANSAC over the normalized
//!   DLT with a final refit on the inliers.
//!
//! All of them return `H` scaled so that `H[2,2] == 1` and fail with a
//! [`HomographyError`] instead of returning a degenerate matrix.
//!
//! # Example
//!
//! ```
//! use homography_core::{Correspondence, Pt2};
//! use homography_linear::normalized_homography;
//!
//! let set: Vec<_> = [(0.0, 0.0), (100.0, 0.0), (100.0, 80.0), (0.0, 80.0)]
//!     .iter()
//!     .map(|&(x, y)| Correspondence::new(Pt2::new(x, y), Pt2::new(x + 5.0, y - 3.0)))
//!     .collect();
//! let h = normalized_homography(&set).unwrap();
//! assert!((h[(0, 2)] - 5.0).abs() < 1e-9);
//! ```

mod dlt;
mod error;
mod estimator;
mod normalize;
mod normalized;
mod robust;
mod transform;

pub use dlt::*;
pub use error::*;
pub use estimator::*;
pub use normalize::*;
pub use normalized::*;
pub use robust::*;
pub use transform::*;
